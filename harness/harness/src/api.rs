//! Paths and bodies of the remote store's HTTP interface, relative to the API base url.

use crate::id::{HarnessId, WireId};
use crate::point::PathPoint;

pub const COMPONENTS_PATH: &str = "/components/";

pub fn harness_path(harness_id: &HarnessId) -> String {
    format!("/harnesses/{}", harness_id)
}

/// Requires a `manufacturing_margin` query parameter.
pub fn wire_path_3d_path(harness_id: &HarnessId, wire_id: &WireId) -> String {
    format!("/harnesses/{}/wires/{}/3d-path", harness_id, wire_id)
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct WirePathBody {
    pub points: Vec<PathPoint>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq)]
pub struct WireLengthBody {
    pub length: f64,
}

/// Read-only exports, opened outside of the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportKind {
    StripList,
    MarkTubeList,
    FormboardPdf,
    JigDxf { scale: f64 },
}

impl ExportKind {
    pub fn path(&self, harness_id: &HarnessId) -> String {
        match self {
            ExportKind::StripList => format!("/harnesses/{}/strip-list", harness_id),
            ExportKind::MarkTubeList => format!("/harnesses/{}/mark-tube-list", harness_id),
            ExportKind::FormboardPdf => format!("/harnesses/{}/formboard-pdf", harness_id),
            ExportKind::JigDxf {
                scale,
            } => format!("/harnesses/{}/jig-dxf?scale={}", harness_id, scale),
        }
    }
}
