use rand::Rng;
use thiserror::Error;
use tracing::trace;

use crate::connection::Connection;
use crate::connector::Connector;
use crate::defaults::DEFAULTS;
use crate::design::Harness;
use crate::graph::{ConnectorPayload, GraphEdge, GraphNode, HarnessGraph, NodeKind, Position, WirePayload};
use crate::id::{ConnectorId, EdgeId, NodeId};
use crate::wire::Wire;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Malformed edge, missing wire id. edge: {edge_id}")]
    MalformedEdge { edge_id: EdgeId },
}

/// Build the graph model for a harness.
///
/// The domain model carries no layout, nodes are scattered at random.
pub fn to_graph(harness: &Harness) -> HarnessGraph {
    to_graph_with_rng(harness, &mut rand::rng())
}

/// See [`to_graph`], positions are drawn from `rng`.
///
/// The input is not validated, edge ids are `e<index>-<from>-<to>` so repeated transforms of the
/// same harness produce the same edges.
pub fn to_graph_with_rng<R: Rng>(harness: &Harness, rng: &mut R) -> HarnessGraph {
    let nodes = harness
        .connectors
        .iter()
        .map(|connector| GraphNode {
            id: NodeId::from(&connector.id),
            kind: NodeKind::Connector,
            position: Position::new(
                rng.random_range(0.0..DEFAULTS.scatter_extent),
                rng.random_range(0.0..DEFAULTS.scatter_extent),
            ),
            data: ConnectorPayload {
                label: Some(connector.id.to_string()),
                part_number: Some(connector.part_number.clone()),
                pins: Some(connector.pins.clone()),
            },
            selected: false,
        })
        .collect::<Vec<_>>();

    let edges = harness
        .connections
        .iter()
        .enumerate()
        .map(|(index, connection)| {
            let wire = harness.wire(&connection.wire_id);

            GraphEdge {
                id: EdgeId(format!(
                    "e{}-{}-{}",
                    index, connection.from_connector_id, connection.to_connector_id
                )),
                source: NodeId::from(&connection.from_connector_id),
                target: NodeId::from(&connection.to_connector_id),
                source_handle: connection.from_pin_id.clone(),
                target_handle: connection.to_pin_id.clone(),
                data: wire_payload(connection, wire),
                selected: false,
            }
        })
        .collect::<Vec<_>>();

    trace!("harness to graph. nodes: {}, edges: {}", nodes.len(), edges.len());

    HarnessGraph {
        nodes,
        edges,
    }
}

fn wire_payload(connection: &Connection, wire: Option<&Wire>) -> WirePayload {
    let color = wire
        .map(|wire| wire.color.clone())
        .unwrap_or_else(|| DEFAULTS.fallback_color.to_string());

    let Some(wire) = wire else {
        return WirePayload {
            wire_id: Some(connection.wire_id.clone()),
            color: Some(color),
            ..WirePayload::default()
        };
    };

    WirePayload {
        wire_id: Some(connection.wire_id.clone()),
        color: Some(color),
        label: None,
        strip_length_a: wire.strip_length_a,
        strip_length_b: wire.strip_length_b,
        terminal_part_number_a: wire.terminal_part_number_a.clone(),
        terminal_part_number_b: wire.terminal_part_number_b.clone(),
        marking_text_a: wire.marking_text_a.clone(),
        marking_text_b: wire.marking_text_b.clone(),
        path_3d: wire.path_3d.clone(),
        length: Some(wire.length),
    }
}

/// Build the domain model for a graph.
///
/// Only connector nodes become connectors. Each edge becomes one connection and one wire, values
/// the graph does not carry come from [`DEFAULTS`].
///
/// Fails on the first edge that has no wire id.
pub fn to_harness(nodes: &[GraphNode], edges: &[GraphEdge]) -> Result<Harness, TransformError> {
    let connectors = nodes
        .iter()
        .filter(|node| node.is_connector())
        .map(|node| Connector {
            id: ConnectorId::from(&node.id),
            manufacturer: DEFAULTS.connector_manufacturer.to_string(),
            part_number: node
                .data
                .part_number
                .clone()
                .unwrap_or_else(|| DEFAULTS.connector_part_number.to_string()),
            pins: node
                .data
                .pins
                .clone()
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    let mut connections = Vec::with_capacity(edges.len());
    let mut wires = Vec::with_capacity(edges.len());

    for edge in edges {
        let wire_id = edge
            .data
            .wire_id
            .clone()
            .ok_or_else(|| TransformError::MalformedEdge {
                edge_id: edge.id.clone(),
            })?;

        connections.push(Connection {
            wire_id: wire_id.clone(),
            from_connector_id: ConnectorId::from(&edge.source),
            from_pin_id: edge.source_handle.clone(),
            to_connector_id: ConnectorId::from(&edge.target),
            to_pin_id: edge.target_handle.clone(),
        });

        let color = edge
            .data
            .color
            .clone()
            .unwrap_or_else(|| DEFAULTS.fallback_color.to_string());

        wires.push(Wire {
            id: wire_id,
            manufacturer: DEFAULTS.wire_manufacturer.to_string(),
            part_number: DEFAULTS.wire_part_number(&color),
            color,
            gauge: DEFAULTS.wire_gauge,
            length: edge
                .data
                .length
                .unwrap_or(DEFAULTS.wire_length),
            path_3d: edge.data.path_3d.clone(),
            strip_length_a: edge.data.strip_length_a,
            strip_length_b: edge.data.strip_length_b,
            terminal_part_number_a: edge
                .data
                .terminal_part_number_a
                .clone(),
            terminal_part_number_b: edge
                .data
                .terminal_part_number_b
                .clone(),
            marking_text_a: edge.data.marking_text_a.clone(),
            marking_text_b: edge.data.marking_text_b.clone(),
        });
    }

    trace!(
        "graph to harness. connectors: {}, connections: {}",
        connectors.len(),
        connections.len()
    );

    Ok(Harness {
        id: None,
        name: DEFAULTS.harness_name.to_string(),
        connectors,
        wires,
        connections,
    })
}
