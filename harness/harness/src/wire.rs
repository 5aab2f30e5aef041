use serde_with::skip_serializing_none;

use crate::id::WireId;
use crate::point::PathPoint;

/// A physical wire.
///
/// The A/B suffixed attributes describe the two wire ends.
#[skip_serializing_none]
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub manufacturer: String,
    pub part_number: String,
    pub color: String,
    pub gauge: f64,
    /// In millimeters, authoritative once computed by the remote store.
    pub length: f64,

    #[serde(default)]
    pub path_3d: Option<Vec<PathPoint>>,

    #[serde(default)]
    pub strip_length_a: Option<f64>,
    #[serde(default)]
    pub strip_length_b: Option<f64>,
    #[serde(default)]
    pub terminal_part_number_a: Option<String>,
    #[serde(default)]
    pub terminal_part_number_b: Option<String>,
    #[serde(default)]
    pub marking_text_a: Option<String>,
    #[serde(default)]
    pub marking_text_b: Option<String>,
}
