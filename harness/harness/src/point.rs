use nalgebra::Point3;

/// A 3-D waypoint on a wire route, as exchanged with the remote store.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Default)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PathPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
        }
    }
}

impl From<PathPoint> for Point3<f64> {
    fn from(value: PathPoint) -> Self {
        Point3::new(value.x, value.y, value.z)
    }
}

impl From<Point3<f64>> for PathPoint {
    fn from(value: Point3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Length of the route through the points, in the units of the points.
pub fn path_length(points: &[PathPoint]) -> f64 {
    let points = points
        .iter()
        .copied()
        .map(Point3::from)
        .collect::<Vec<_>>();

    math::polyline::polyline_length(&points)
}
