use crux_core::{App, Command, Request};
use harness::connector::Pin;
use harness::design::Harness;
use harness::graph::NodeKind;
use harness::point::path_length;

use crate::capabilities::store::{HarnessStoreOperation, StoreResponse, StoreResult};
use crate::capabilities::timer::{SyncTimerOperation, TimerId, TimerOutput};
use crate::*;

type Responder = Box<dyn FnMut(&HarnessStoreOperation) -> StoreResult>;

/// Drives the core the way a shell does, with timers that only elapse when told to.
pub struct TestShell {
    app: HarnessEditor,
    pub model: Model,
    pub store_requests: Vec<HarnessStoreOperation>,
    commands: Vec<Command<Effect, Event>>,
    timers: Vec<(usize, TimerId, Request<SyncTimerOperation>)>,
    held: Vec<(usize, Request<HarnessStoreOperation>)>,
    hold_wire_paths: bool,
    responder: Responder,
}

impl Default for TestShell {
    fn default() -> Self {
        Self::with_responder(respond)
    }
}

impl TestShell {
    pub fn with_responder(responder: impl FnMut(&HarnessStoreOperation) -> StoreResult + 'static) -> Self {
        Self {
            app: HarnessEditor,
            model: Model::default(),
            store_requests: vec![],
            commands: vec![],
            timers: vec![],
            held: vec![],
            hold_wire_paths: false,
            responder: Box::new(responder),
        }
    }

    /// Wire path requests are held until [`TestShell::resolve_held`] is called.
    pub fn hold_wire_paths(mut self) -> Self {
        self.hold_wire_paths = true;
        self
    }

    pub fn dispatch(&mut self, event: Event) {
        let command = self
            .app
            .update(event, &mut self.model, &());
        self.commands.push(command);
        self.drain(self.commands.len() - 1);
    }

    pub fn view(&self) -> HarnessEditorViewModel {
        self.app.view(&self.model)
    }

    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Let every live timer elapse.
    pub fn elapse(&mut self) {
        for (index, id, mut request) in std::mem::take(&mut self.timers) {
            request
                .resolve(TimerOutput::Elapsed {
                    id,
                })
                .unwrap();
            self.drain(index);
        }
    }

    pub fn resolve_held(&mut self, position: usize, result: StoreResult) {
        let (index, mut request) = self.held.remove(position);
        request.resolve(result).unwrap();
        self.drain(index);
    }

    pub fn puts(&self) -> Vec<&Harness> {
        self.store_requests
            .iter()
            .filter_map(|operation| match operation {
                HarnessStoreOperation::PutHarness {
                    harness, ..
                } => Some(harness),
                _ => None,
            })
            .collect()
    }

    fn drain(&mut self, index: usize) {
        loop {
            let effects = self.commands[index]
                .effects()
                .collect::<Vec<_>>();
            let events = self.commands[index]
                .events()
                .collect::<Vec<_>>();
            if effects.is_empty() && events.is_empty() {
                break;
            }

            for effect in effects {
                self.handle(index, effect);
            }
            for event in events {
                self.dispatch(event);
            }
        }
    }

    fn handle(&mut self, index: usize, effect: Effect) {
        match effect {
            Effect::Render(_) => {}
            Effect::Store(mut request) => {
                let operation = request.operation.clone();
                self.store_requests
                    .push(operation.clone());

                if self.hold_wire_paths && matches!(operation, HarnessStoreOperation::PutWirePath { .. }) {
                    self.held.push((index, request));
                } else {
                    let result = (self.responder)(&operation);
                    request.resolve(result).unwrap();
                }
            }
            Effect::Timer(request) => match request.operation.clone() {
                SyncTimerOperation::Start {
                    id, ..
                } => self.timers.push((index, id, request)),
                SyncTimerOperation::Cancel {
                    id,
                } => {
                    if let Some(position) = self
                        .timers
                        .iter()
                        .position(|(_, timer_id, _)| *timer_id == id)
                    {
                        let (start_index, id, mut start) = self.timers.remove(position);
                        start
                            .resolve(TimerOutput::Cancelled {
                                id,
                            })
                            .unwrap();
                        self.drain(start_index);
                    }
                }
            },
        }
    }
}

pub fn ok(response: StoreResponse) -> StoreResult {
    StoreResult::Ok {
        response,
    }
}

/// A store that echoes what it is given.
pub fn respond(operation: &HarnessStoreOperation) -> StoreResult {
    match operation {
        HarnessStoreOperation::GetHarness {
            harness_id,
        } => ok(StoreResponse::Harness {
            harness: fixture_harness(harness_id),
        }),
        HarnessStoreOperation::PutHarness {
            harness, ..
        } => ok(StoreResponse::Harness {
            harness: harness.clone(),
        }),
        HarnessStoreOperation::GetComponents => ok(StoreResponse::Components {
            components: vec![],
        }),
        HarnessStoreOperation::PutWirePath {
            points,
            manufacturing_margin,
            ..
        } => ok(StoreResponse::WireLength {
            length: path_length(points) * manufacturing_margin,
        }),
    }
}

pub fn fixture_harness(harness_id: &HarnessId) -> Harness {
    serde_json::from_str(&format!(
        r#"{{
            "id": "{}",
            "name": "Door loom",
            "connectors": [
                {{ "id": "CONN1", "manufacturer": "Molex", "part_number": "43025-0400", "pins": [{{ "id": "1" }}, {{ "id": "2" }}] }},
                {{ "id": "CONN2", "manufacturer": "Molex", "part_number": "43025-0400", "pins": [{{ "id": "1" }}, {{ "id": "2" }}] }}
            ],
            "wires": [
                {{ "id": "W-001", "manufacturer": "Generic", "part_number": "UL1007-RED", "color": "red", "gauge": 22.0, "length": 150.0 }}
            ],
            "connections": [
                {{ "wire_id": "W-001", "from_connector_id": "CONN1", "from_pin_id": "1", "to_connector_id": "CONN2", "to_pin_id": "1" }}
            ]
        }}"#,
        harness_id
    ))
    .unwrap()
}

pub fn connector_node(id: &str, pins: &[&str]) -> GraphNode {
    GraphNode {
        id: NodeId::from(id),
        kind: NodeKind::Connector,
        position: Position::default(),
        data: ConnectorPayload {
            label: Some(id.to_string()),
            part_number: None,
            pins: Some(
                pins.iter()
                    .map(|pin| Pin::new(*pin))
                    .collect(),
            ),
        },
        selected: false,
    }
}

pub fn wire_edge(id: &str, source: (&str, &str), target: (&str, &str), wire_id: &str) -> GraphEdge {
    GraphEdge {
        id: EdgeId::from(id),
        source: NodeId::from(source.0),
        target: NodeId::from(target.0),
        source_handle: PinId::from(source.1),
        target_handle: PinId::from(target.1),
        data: WirePayload {
            wire_id: Some(WireId::from(wire_id)),
            color: Some("red".to_string()),
            ..WirePayload::default()
        },
        selected: false,
    }
}

/// Two connectors, `CONN1` and `CONN2`, no wires.
pub fn load_event() -> Event {
    Event::LoadHarness {
        harness_id: HarnessId::from("H1"),
        nodes: vec![connector_node("CONN1", &["1", "2"]), connector_node("CONN2", &["1", "2"])],
        edges: vec![],
    }
}

pub fn connect_event(from: (&str, &str), to: (&str, &str)) -> Event {
    Event::Connect {
        source: NodeId::from(from.0),
        source_handle: PinId::from(from.1),
        target: NodeId::from(to.0),
        target_handle: PinId::from(to.1),
    }
}
