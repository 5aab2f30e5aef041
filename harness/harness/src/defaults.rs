//! The single default policy used by both transform directions and by connection creation.
//!
//! Values that one representation carries and the other does not are filled in from here, so a
//! round trip always produces the same values.

pub struct DefaultPolicy {
    pub harness_name: &'static str,
    pub connector_manufacturer: &'static str,
    pub connector_part_number: &'static str,
    pub wire_manufacturer: &'static str,
    /// AWG
    pub wire_gauge: f64,
    /// Provisional length in millimeters, until the remote store computes one.
    pub wire_length: f64,
    /// Color of an edge whose wire is not present in the harness.
    pub fallback_color: &'static str,
    /// Color of a wire created by connecting two pins.
    pub new_wire_color: &'static str,
    /// Extent of the square that initial node positions are scattered within.
    pub scatter_extent: f64,
}

impl DefaultPolicy {
    pub fn wire_part_number(&self, color: &str) -> String {
        format!("UL1007-{}", color.to_uppercase())
    }
}

pub const DEFAULTS: DefaultPolicy = DefaultPolicy {
    harness_name: "Updated Harness",
    connector_manufacturer: "Unknown",
    connector_part_number: "Unknown",
    wire_manufacturer: "Generic",
    wire_gauge: 22.0,
    wire_length: 150.0,
    fallback_color: "gray",
    new_wire_color: "black",
    scatter_extent: 400.0,
};
