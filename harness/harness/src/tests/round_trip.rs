use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::{fixture, rstest};

use crate::connection::Connection;
use crate::connector::{Connector, Pin};
use crate::defaults::DEFAULTS;
use crate::design::Harness;
use crate::graph::{GraphEdge, NodeKind};
use crate::id::{ConnectorId, EdgeId, HarnessId, NodeId, PinId, WireId};
use crate::point::{PathPoint, path_length};
use crate::transform::{TransformError, to_graph, to_graph_with_rng, to_harness};
use crate::wire::Wire;

fn connector(id: &str, pins: &[&str]) -> Connector {
    Connector {
        id: ConnectorId::from(id),
        manufacturer: "Molex".to_string(),
        part_number: format!("PN-{}", id),
        pins: pins
            .iter()
            .map(|pin| Pin::new(*pin))
            .collect(),
    }
}

fn wire(id: &str, color: &str) -> Wire {
    Wire {
        id: WireId::from(id),
        manufacturer: "Alpha Wire".to_string(),
        part_number: "5856".to_string(),
        color: color.to_string(),
        gauge: 18.0,
        length: 321.5,
        path_3d: None,
        strip_length_a: None,
        strip_length_b: None,
        terminal_part_number_a: None,
        terminal_part_number_b: None,
        marking_text_a: None,
        marking_text_b: None,
    }
}

fn connection(wire_id: &str, from: (&str, &str), to: (&str, &str)) -> Connection {
    Connection {
        wire_id: WireId::from(wire_id),
        from_connector_id: ConnectorId::from(from.0),
        from_pin_id: PinId::from(from.1),
        to_connector_id: ConnectorId::from(to.0),
        to_pin_id: PinId::from(to.1),
    }
}

#[fixture]
fn harness() -> Harness {
    let mut w1 = wire("W-001", "red");
    w1.strip_length_a = Some(5.0);
    w1.strip_length_b = Some(6.5);
    w1.terminal_part_number_a = Some("0430300001".to_string());
    w1.marking_text_b = Some("GND".to_string());
    w1.path_3d = Some(vec![PathPoint::new(0.0, 0.0, 0.0), PathPoint::new(0.0, 10.0, 0.0)]);

    Harness {
        id: Some(HarnessId::from("0a9eb930")),
        name: "Engine loom".to_string(),
        connectors: vec![connector("CONN1", &["1", "2"]), connector("CONN2", &["1", "2", "3"])],
        wires: vec![w1, wire("W-002", "blue")],
        connections: vec![
            connection("W-001", ("CONN1", "1"), ("CONN2", "3")),
            connection("W-002", ("CONN1", "2"), ("CONN2", "1")),
        ],
    }
}

#[rstest]
fn round_trip_preserves_connectors_and_connections(harness: Harness) {
    // given
    let graph = to_graph(&harness);

    // when
    let result = to_harness(&graph.nodes, &graph.edges).unwrap();

    // then
    let ids_and_pins = |harness: &Harness| {
        harness
            .connectors
            .iter()
            .map(|connector| (connector.id.clone(), connector.part_number.clone(), connector.pins.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids_and_pins(&result), ids_and_pins(&harness));
    assert_eq!(result.connections, harness.connections);
    assert_eq!(result.check_references(), Ok(()));
}

#[rstest]
fn round_trip_preserves_graph_carried_wire_attributes(harness: Harness) {
    // given
    let graph = to_graph(&harness);

    // when
    let result = to_harness(&graph.nodes, &graph.edges).unwrap();

    // then
    for original in &harness.wires {
        let wire = result.wire(&original.id).unwrap();
        assert_eq!(wire.color, original.color);
        assert_eq!(wire.length, original.length);
        assert_eq!(wire.path_3d, original.path_3d);
        assert_eq!(wire.strip_length_a, original.strip_length_a);
        assert_eq!(wire.strip_length_b, original.strip_length_b);
        assert_eq!(wire.terminal_part_number_a, original.terminal_part_number_a);
        assert_eq!(wire.terminal_part_number_b, original.terminal_part_number_b);
        assert_eq!(wire.marking_text_a, original.marking_text_a);
        assert_eq!(wire.marking_text_b, original.marking_text_b);
    }
}

#[rstest]
fn round_trip_defaults_what_the_graph_does_not_carry(harness: Harness) {
    // given
    let graph = to_graph(&harness);

    // when
    let first = to_harness(&graph.nodes, &graph.edges).unwrap();
    let second = to_harness(&graph.nodes, &graph.edges).unwrap();

    // then
    assert_eq!(first, second);
    assert!(
        first
            .connectors
            .iter()
            .all(|connector| connector.manufacturer == DEFAULTS.connector_manufacturer)
    );
    let red = first
        .wire(&WireId::from("W-001"))
        .unwrap();
    assert_eq!(red.manufacturer, DEFAULTS.wire_manufacturer);
    assert_eq!(red.gauge, DEFAULTS.wire_gauge);
    assert_eq!(red.part_number, "UL1007-RED");
}

#[rstest]
fn edge_ids_are_stable(harness: Harness) {
    // when
    let first = to_graph_with_rng(&harness, &mut StdRng::seed_from_u64(1));
    let second = to_graph_with_rng(&harness, &mut StdRng::seed_from_u64(2));

    // then
    let edge_ids = |edges: &[GraphEdge]| {
        edges
            .iter()
            .map(|edge| edge.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(edge_ids(&first.edges), vec![
        EdgeId::from("e0-CONN1-CONN2"),
        EdgeId::from("e1-CONN1-CONN2")
    ]);
    assert_eq!(edge_ids(&first.edges), edge_ids(&second.edges));
}

#[rstest]
fn edges_only_reference_emitted_nodes(harness: Harness) {
    let graph = to_graph(&harness);

    for edge in &graph.edges {
        for node_id in [&edge.source, &edge.target] {
            assert!(graph.nodes.iter().any(|node| node.id.eq(node_id)));
        }
    }
    assert!(
        graph
            .nodes
            .iter()
            .all(|node| node.kind == NodeKind::Connector)
    );
}

#[rstest]
fn nodes_are_scattered_within_extent(harness: Harness) {
    let graph = to_graph_with_rng(&harness, &mut StdRng::seed_from_u64(42));

    for node in &graph.nodes {
        assert!((0.0..DEFAULTS.scatter_extent).contains(&node.position.x));
        assert!((0.0..DEFAULTS.scatter_extent).contains(&node.position.y));
    }
}

#[rstest]
fn missing_wire_falls_back_to_gray(mut harness: Harness) {
    // given
    harness
        .wires
        .retain(|wire| wire.id != WireId::from("W-002"));

    // when
    let graph = to_graph(&harness);

    // then
    assert_eq!(graph.edges[1].data.color.as_deref(), Some(DEFAULTS.fallback_color));
    assert_eq!(graph.edges[1].data.length, None);
}

#[rstest]
fn edge_without_wire_id_is_malformed(harness: Harness) {
    // given
    let mut graph = to_graph(&harness);
    graph.edges[1].data.wire_id = None;

    // when
    let result = to_harness(&graph.nodes, &graph.edges);

    // then
    assert_eq!(
        result,
        Err(TransformError::MalformedEdge {
            edge_id: EdgeId::from("e1-CONN1-CONN2")
        })
    );
}

#[rstest]
fn non_connector_nodes_are_ignored(harness: Harness) {
    // given
    let mut graph = to_graph(&harness);
    let mut note = graph.nodes[0].clone();
    note.id = NodeId::from("note-1");
    note.kind = NodeKind::Other;
    graph.nodes.push(note);

    // when
    let result = to_harness(&graph.nodes, &graph.edges).unwrap();

    // then
    assert_eq!(result.connectors.len(), 2);
}

#[test]
fn missing_optional_payload_fields_are_defaulted() {
    // given
    let mut graph = to_graph(&Harness {
        id: None,
        name: "empty".to_string(),
        connectors: vec![connector("CONN1", &["1"])],
        wires: vec![],
        connections: vec![],
    });
    graph.nodes[0].data.part_number = None;
    graph.nodes[0].data.pins = None;

    // when
    let result = to_harness(&graph.nodes, &graph.edges).unwrap();

    // then
    assert_eq!(result.connectors[0].part_number, DEFAULTS.connector_part_number);
    assert!(result.connectors[0].pins.is_empty());
    assert_eq!(result.name, DEFAULTS.harness_name);
}

#[test]
fn path_length_of_l_shape() {
    let points = [
        PathPoint::new(0.0, 0.0, 0.0),
        PathPoint::new(6.0, 0.0, 0.0),
        PathPoint::new(6.0, 4.0, 0.0),
    ];
    assert_eq!(path_length(&points), 10.0);
}
