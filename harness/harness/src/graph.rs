//! The editable node/edge representation of a harness.
//!
//! Nodes are connectors placed on a 2-D canvas, edges are wires between two pin handles.

use serde_with::skip_serializing_none;

use crate::connector::Pin;
use crate::id::{EdgeId, NodeId, PinId, WireId};
use crate::point::PathPoint;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Visual type of a node, only connector nodes take part in the domain model.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Connector,
    #[serde(other)]
    Other,
}

#[skip_serializing_none]
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct ConnectorPayload {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub pins: Option<Vec<Pin>>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: ConnectorPayload,
    #[serde(default)]
    pub selected: bool,
}

impl GraphNode {
    pub fn is_connector(&self) -> bool {
        matches!(self.kind, NodeKind::Connector)
    }

    pub fn has_pin(&self, pin_id: &PinId) -> bool {
        self.data
            .pins
            .iter()
            .flatten()
            .any(|pin| pin.id.eq(pin_id))
    }
}

#[skip_serializing_none]
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct WirePayload {
    #[serde(default)]
    pub wire_id: Option<WireId>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
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
    #[serde(default)]
    pub path_3d: Option<Vec<PathPoint>>,
    /// Authoritative length in millimeters, as last confirmed by the remote store.
    #[serde(default)]
    pub length: Option<f64>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: PinId,
    pub target_handle: PinId,
    pub data: WirePayload,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct HarnessGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

//
// Partial updates
//
// Each field is tri-state: absent = leave unchanged, `Some(None)` = clear, `Some(Some(v))` = set.
//

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct ConnectorPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub label: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub part_number: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub pins: Option<Option<Vec<Pin>>>,
}

impl ConnectorPatch {
    /// Shallow merge into an existing payload.
    pub fn apply(self, payload: &mut ConnectorPayload) {
        merge(&mut payload.label, self.label);
        merge(&mut payload.part_number, self.part_number);
        merge(&mut payload.pins, self.pins);
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct WirePatch {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub wire_id: Option<Option<WireId>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub label: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub strip_length_a: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub strip_length_b: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub terminal_part_number_a: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub terminal_part_number_b: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub marking_text_a: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub marking_text_b: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub path_3d: Option<Option<Vec<PathPoint>>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub length: Option<Option<f64>>,
}

impl WirePatch {
    /// An edge without a wire id cannot be transformed back into the domain model.
    pub fn clears_wire_id(&self) -> bool {
        matches!(self.wire_id, Some(None))
    }

    /// Shallow merge into an existing payload.
    pub fn apply(self, payload: &mut WirePayload) {
        merge(&mut payload.wire_id, self.wire_id);
        merge(&mut payload.color, self.color);
        merge(&mut payload.label, self.label);
        merge(&mut payload.strip_length_a, self.strip_length_a);
        merge(&mut payload.strip_length_b, self.strip_length_b);
        merge(&mut payload.terminal_part_number_a, self.terminal_part_number_a);
        merge(&mut payload.terminal_part_number_b, self.terminal_part_number_b);
        merge(&mut payload.marking_text_a, self.marking_text_a);
        merge(&mut payload.marking_text_b, self.marking_text_b);
        merge(&mut payload.path_3d, self.path_3d);
        merge(&mut payload.length, self.length);
    }
}

fn merge<T>(field: &mut Option<T>, update: Option<Option<T>>) {
    if let Some(value) = update {
        *field = value;
    }
}

//
// Structural changes
//

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: NodeId, position: Position },
    Select { id: NodeId, selected: bool },
    Remove { id: NodeId },
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

/// Apply the changes in the order given, changes for unknown ids are ignored.
pub fn apply_node_changes(changes: Vec<NodeChange>, nodes: &mut Vec<GraphNode>) {
    for change in changes {
        match change {
            NodeChange::Position {
                id,
                position,
            } => {
                if let Some(node) = nodes.iter_mut().find(|node| node.id.eq(&id)) {
                    node.position = position;
                }
            }
            NodeChange::Select {
                id,
                selected,
            } => {
                if let Some(node) = nodes.iter_mut().find(|node| node.id.eq(&id)) {
                    node.selected = selected;
                }
            }
            NodeChange::Remove {
                id,
            } => nodes.retain(|node| node.id.ne(&id)),
        }
    }
}

/// Apply the changes in the order given, changes for unknown ids are ignored.
pub fn apply_edge_changes(changes: Vec<EdgeChange>, edges: &mut Vec<GraphEdge>) {
    for change in changes {
        match change {
            EdgeChange::Select {
                id,
                selected,
            } => {
                if let Some(edge) = edges.iter_mut().find(|edge| edge.id.eq(&id)) {
                    edge.selected = selected;
                }
            }
            EdgeChange::Remove {
                id,
            } => edges.retain(|edge| edge.id.ne(&id)),
        }
    }
}

/// Remove edges whose source or target node no longer exists.
///
/// Returns the ids of the removed edges.
pub fn remove_dangling_edges(nodes: &[GraphNode], edges: &mut Vec<GraphEdge>) -> Vec<EdgeId> {
    let mut removed = vec![];
    edges.retain(|edge| {
        let attached = [&edge.source, &edge.target]
            .into_iter()
            .all(|node_id| nodes.iter().any(|node| node.id.eq(node_id)));
        if !attached {
            removed.push(edge.id.clone());
        }
        attached
    });
    removed
}
