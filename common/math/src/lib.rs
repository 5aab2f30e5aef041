pub mod margin;
pub mod polyline;
