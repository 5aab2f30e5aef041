use nalgebra::Point3;

/// Sum of the euclidean distances between consecutive points.
///
/// A polyline with fewer than two points has no length.
pub fn polyline_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
        .fold(0.0, |length, distance| length + distance)
}

/// Apply a multiplicative margin to a measured length.
pub fn with_margin(length: f64, margin: f64) -> f64 {
    length * margin
}
