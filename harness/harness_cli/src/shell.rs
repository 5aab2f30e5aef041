use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail};
use crux_core::{Core, Request};
use harness_app::capabilities::timer::{SyncTimerOperation, TimerId, TimerOutput};
use harness_app::{Effect, Event, HarnessEditor, HarnessEditorViewModel};
use tracing::{debug, trace};

use crate::store::HarnessStore;

struct PendingTimer {
    id: TimerId,
    deadline: Instant,
    request: Request<SyncTimerOperation>,
}

/// Runs the core, performing store requests synchronously and timers against the wall clock.
pub struct Shell<S> {
    core: Core<HarnessEditor>,
    store: S,
    timers: Vec<PendingTimer>,
    effects: VecDeque<Effect>,
}

impl<S: HarnessStore> Shell<S> {
    pub fn new(store: S) -> Self {
        Self {
            core: Core::new(),
            store,
            timers: vec![],
            effects: VecDeque::new(),
        }
    }

    pub fn view(&self) -> HarnessEditorViewModel {
        self.core.view()
    }

    /// Process the event and every effect that follows from it, except timers which stay pending.
    ///
    /// Fails if the core reports an error.
    pub fn dispatch(&mut self, event: Event) -> anyhow::Result<()> {
        trace!("event: {:?}", event);
        let effects = self.core.process_event(event);
        self.enqueue(effects);
        self.run_loop()
    }

    /// Let pending timers elapse, in deadline order, until none remain.
    pub fn run_until_idle(&mut self) -> anyhow::Result<()> {
        while let Some(position) = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| timer.deadline)
            .map(|(position, _)| position)
        {
            let mut timer = self.timers.remove(position);

            let remaining = timer
                .deadline
                .saturating_duration_since(Instant::now());
            if !remaining.is_zero() {
                trace!("waiting for timer. timer: {:?}, remaining: {:?}", timer.id, remaining);
                thread::sleep(remaining);
            }

            let effects = self
                .core
                .resolve(&mut timer.request, TimerOutput::Elapsed {
                    id: timer.id,
                })
                .map_err(|e| anyhow!("{:?}", e))?;
            self.enqueue(effects);
            self.run_loop()?;
        }
        Ok(())
    }

    fn run_loop(&mut self) -> anyhow::Result<()> {
        while let Some(effect) = self.effects.pop_front() {
            match effect {
                Effect::Render(_) => {
                    if let Some((_, error)) = self.core.view().error {
                        self.effects.clear();
                        bail!(error)
                    }
                }
                Effect::Store(mut request) => {
                    let result = self.store.execute(&request.operation);
                    let effects = self
                        .core
                        .resolve(&mut request, result)
                        .map_err(|e| anyhow!("{:?}", e))?;
                    self.enqueue(effects);
                }
                Effect::Timer(request) => match request.operation.clone() {
                    SyncTimerOperation::Start {
                        id,
                        millis,
                    } => {
                        debug!("timer started. timer: {:?}, millis: {}", id, millis);
                        self.timers.push(PendingTimer {
                            id,
                            deadline: Instant::now() + Duration::from_millis(millis),
                            request,
                        });
                    }
                    SyncTimerOperation::Cancel {
                        id,
                    } => {
                        debug!("timer cancelled. timer: {:?}", id);
                        if let Some(position) = self
                            .timers
                            .iter()
                            .position(|timer| timer.id == id)
                        {
                            let mut timer = self.timers.remove(position);
                            let effects = self
                                .core
                                .resolve(&mut timer.request, TimerOutput::Cancelled {
                                    id,
                                })
                                .map_err(|e| anyhow!("{:?}", e))?;
                            self.enqueue(effects);
                        }
                    }
                },
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            trace!("effect: {:?}", effect);
            self.effects.push_back(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use harness::design::Harness;
    use harness::point::path_length;
    use harness_app::capabilities::store::{HarnessStoreOperation, StoreError, StoreResponse, StoreResult};
    use harness_app::{HarnessId, LoadState, NodeChange, NodeId, PathPoint, PinId};
    use indoc::indoc;

    use super::*;

    /// An in-memory store that records every request.
    #[derive(Default)]
    struct FakeStore {
        requests: RefCell<Vec<HarnessStoreOperation>>,
    }

    impl HarnessStore for FakeStore {
        fn execute(&self, operation: &HarnessStoreOperation) -> StoreResult {
            self.requests
                .borrow_mut()
                .push(operation.clone());

            let response = match operation {
                HarnessStoreOperation::GetHarness {
                    harness_id,
                } if harness_id.as_str() == "missing" => {
                    return StoreResult::Err {
                        error: StoreError::NetworkFailure {
                            message: "404 Not Found".to_string(),
                        },
                    };
                }
                HarnessStoreOperation::GetHarness {
                    ..
                } => StoreResponse::Harness {
                    harness: fixture(),
                },
                HarnessStoreOperation::PutHarness {
                    harness, ..
                } => StoreResponse::Harness {
                    harness: harness.clone(),
                },
                HarnessStoreOperation::GetComponents => StoreResponse::Components {
                    components: vec![],
                },
                HarnessStoreOperation::PutWirePath {
                    points,
                    manufacturing_margin,
                    ..
                } => StoreResponse::WireLength {
                    length: path_length(points) * manufacturing_margin,
                },
            };
            StoreResult::Ok {
                response,
            }
        }
    }

    impl FakeStore {
        fn puts(&self) -> usize {
            self.requests
                .borrow()
                .iter()
                .filter(|operation| matches!(operation, HarnessStoreOperation::PutHarness { .. }))
                .count()
        }
    }

    fn fixture() -> Harness {
        serde_json::from_str(indoc! {r#"
            {
                "name": "Bench loom",
                "connectors": [
                    { "id": "CONN1", "manufacturer": "Molex", "part_number": "43025-0200", "pins": [{ "id": "1" }, { "id": "2" }] },
                    { "id": "CONN2", "manufacturer": "Molex", "part_number": "43025-0200", "pins": [{ "id": "1" }, { "id": "2" }] }
                ],
                "wires": [],
                "connections": []
            }
        "#})
        .unwrap()
    }

    fn shell() -> Shell<FakeStore> {
        let mut shell = Shell::new(FakeStore::default());
        shell
            .dispatch(Event::ConfigureSync {
                quiescence_millis: 10,
            })
            .unwrap();
        shell
    }

    #[test]
    fn edits_are_pushed_once_the_timer_elapses() {
        // given
        let mut shell = shell();
        shell
            .dispatch(Event::FetchHarness {
                harness_id: HarnessId::from("H1"),
            })
            .unwrap();

        // when
        shell
            .dispatch(Event::Connect {
                source: NodeId::from("CONN1"),
                source_handle: PinId::from("1"),
                target: NodeId::from("CONN2"),
                target_handle: PinId::from("1"),
            })
            .unwrap();
        assert_eq!(shell.store.puts(), 0);
        shell.run_until_idle().unwrap();

        // then
        assert_eq!(shell.store.puts(), 1);
        assert!(!shell.view().sync_pending);
    }

    #[test]
    fn emptied_graph_is_not_pushed() {
        // given
        let mut shell = shell();
        shell
            .dispatch(Event::FetchHarness {
                harness_id: HarnessId::from("H1"),
            })
            .unwrap();

        // when
        for id in ["CONN1", "CONN2"] {
            shell
                .dispatch(Event::ApplyNodeChanges {
                    changes: vec![NodeChange::Remove {
                        id: NodeId::from(id),
                    }],
                })
                .unwrap();
        }
        shell.run_until_idle().unwrap();

        // then
        assert_eq!(shell.store.puts(), 0);
        assert!(shell.view().nodes.is_empty());
    }

    #[test]
    fn core_errors_fail_the_dispatch() {
        // given
        let mut shell = shell();
        shell
            .dispatch(Event::FetchHarness {
                harness_id: HarnessId::from("H1"),
            })
            .unwrap();

        // when
        let result = shell.dispatch(Event::Connect {
            source: NodeId::from("CONN1"),
            source_handle: PinId::from("9"),
            target: NodeId::from("CONN2"),
            target_handle: PinId::from("1"),
        });

        // then
        assert!(result.is_err());
        shell.run_until_idle().unwrap();
        assert_eq!(shell.store.puts(), 0);
    }

    #[test]
    fn failed_fetch_leaves_the_failed_state() {
        // given
        let mut shell = shell();

        // when
        shell
            .dispatch(Event::FetchHarness {
                harness_id: HarnessId::from("missing"),
            })
            .unwrap();

        // then
        assert!(matches!(shell.view().load_state, LoadState::Failed { .. }));
    }

    #[test]
    fn saved_path_length_is_written_back() {
        // given
        let mut shell = shell();
        shell
            .dispatch(Event::FetchHarness {
                harness_id: HarnessId::from("H1"),
            })
            .unwrap();
        shell
            .dispatch(Event::Connect {
                source: NodeId::from("CONN1"),
                source_handle: PinId::from("2"),
                target: NodeId::from("CONN2"),
                target_handle: PinId::from("2"),
            })
            .unwrap();
        let edge_id = shell.view().edges[0].id.clone();

        // when
        for event in [
            Event::SetMargin {
                margin: 1.5,
            },
            Event::SetSelectedEdge {
                edge_id: Some(edge_id),
            },
            Event::PickPathPoint {
                point: PathPoint::new(0.0, 0.0, 0.0),
            },
            Event::PickPathPoint {
                point: PathPoint::new(0.0, 0.0, 4.0),
            },
            Event::SavePath,
        ] {
            shell.dispatch(event).unwrap();
        }
        shell.run_until_idle().unwrap();

        // then
        assert_eq!(shell.view().edges[0].data.length, Some(6.0));
        assert_eq!(shell.store.puts(), 1);
    }
}
