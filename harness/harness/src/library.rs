//! Placeable component templates and the drag/drop transfer that turns one into a graph node.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::connector::Pin;
use crate::graph::{ConnectorPayload, GraphNode, NodeKind, Position};
use crate::id::NodeId;

/// Transfer key for the node type tag.
pub const NODE_TYPE_KEY: &str = "application/harness-node-type";
/// Transfer key for the JSON-encoded template data.
pub const NODE_DATA_KEY: &str = "application/harness-node-data";
pub const CONNECTOR_NODE_TYPE: &str = "connector";

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Connector,
    Wire,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ComponentTemplate {
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct LibraryComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub name: String,
    pub data: ComponentTemplate,
}

/// Key/value pairs carried by a drag/drop operation.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Default)]
pub struct DragTransfer {
    entries: BTreeMap<String, String>,
}

impl DragTransfer {
    pub fn from_component(component: &LibraryComponent) -> Result<Self, DropError> {
        if component.kind != ComponentKind::Connector {
            return Err(DropError::NotAConnector(component.name.clone()));
        }

        let data = serde_json::to_string(&component.data).map_err(|e| DropError::InvalidData(e.to_string()))?;

        let mut transfer = Self::default();
        transfer.set_data(NODE_TYPE_KEY, CONNECTOR_NODE_TYPE);
        transfer.set_data(NODE_DATA_KEY, &data);

        Ok(transfer)
    }

    pub fn set_data(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
    }

    /// Build the connector node for a drop at `position`.
    ///
    /// The node id is `<template name>-<suffix>`, the caller provides a unique suffix.
    pub fn to_node(&self, position: Position, suffix: &str) -> Result<GraphNode, DropError> {
        let node_type = self
            .get_data(NODE_TYPE_KEY)
            .filter(|node_type| !node_type.is_empty())
            .ok_or(DropError::MissingKey(NODE_TYPE_KEY))?;

        if node_type != CONNECTOR_NODE_TYPE {
            return Err(DropError::UnsupportedNodeType(node_type.to_string()));
        }

        let data = self
            .get_data(NODE_DATA_KEY)
            .ok_or(DropError::MissingKey(NODE_DATA_KEY))?;

        let template: ComponentTemplate =
            serde_json::from_str(data).map_err(|e| DropError::InvalidData(e.to_string()))?;

        Ok(GraphNode {
            id: NodeId(format!("{}-{}", template.name, suffix)),
            kind: NodeKind::Connector,
            position,
            data: ConnectorPayload {
                label: Some(template.name),
                part_number: template.part_number,
                pins: Some(template.pins),
            },
            selected: false,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropError {
    #[error("Missing drag/drop transfer key. key: {0}")]
    MissingKey(&'static str),
    #[error("Unsupported node type. type: {0}")]
    UnsupportedNodeType(String),
    #[error("Invalid template data. cause: {0}")]
    InvalidData(String),
    #[error("Only connector templates can be placed. component: {0}")]
    NotAConnector(String),
}
