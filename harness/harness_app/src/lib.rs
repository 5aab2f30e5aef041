//! The harness editor core.
//!
//! Owns the editing session for one harness, every mutation of the graph goes through
//! [`HarnessEditor::update`]. Store requests and timers are performed by the shell, see [`capabilities`].

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

pub use crux_core::Core;
use crux_core::macros::effect;
use crux_core::render::RenderOperation;
use crux_core::{App, Command, render};
pub use harness::api::ExportKind;
use harness::defaults::DEFAULTS;
pub use harness::graph::{
    ConnectorPatch, ConnectorPayload, EdgeChange, GraphEdge, GraphNode, NodeChange, Position, WirePatch, WirePayload,
};
use harness::graph::{apply_edge_changes, apply_node_changes, remove_dangling_edges};
pub use harness::id::{EdgeId, HarnessId, NodeId, PinId, WireId};
pub use harness::library::{DragTransfer, DropError, LibraryComponent};
pub use harness::point::PathPoint;
use harness::transform::{TransformError, to_graph};
use math::margin::{ManufacturingMargin, MarginError};
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use crate::capabilities::store::{self, HarnessStoreOperation, StoreError, StoreResult};
use crate::capabilities::timer::{self, SyncTimerOperation, TimerOutput};
use crate::path_editor::{NotEditing, PathEditor};
use crate::sync::{Schedule, SyncConfig, SyncScheduler};

pub mod capabilities;
pub mod path_editor;
pub mod sync;

#[derive(Default)]
pub struct HarnessEditor;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        harness_id: HarnessId,
    },
    Loaded {
        harness_id: HarnessId,
    },
    Failed {
        harness_id: HarnessId,
        message: String,
    },
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "2d")]
    Schematic,
    #[serde(rename = "3d")]
    Routing,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum SelectedElement {
    Node { id: NodeId, data: ConnectorPayload },
    Edge { id: EdgeId, data: WirePayload },
}

#[derive(Default)]
pub struct Model {
    harness_id: Option<HarnessId>,
    /// Name of the fetched harness, pushed in place of the default name.
    harness_name: Option<String>,
    load_state: LoadState,

    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,

    selected_edge_id: Option<EdgeId>,
    view_mode: ViewMode,
    margin: ManufacturingMargin,

    path_editor: PathEditor,
    /// Generation of the latest path save per edge, responses for older generations are stale.
    path_saves: BTreeMap<EdgeId, u64>,
    path_save_generation: u64,

    sync: SyncScheduler,

    library: Vec<LibraryComponent>,
    model_path: Option<String>,

    error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

impl Model {
    /// The element shown in the properties panel, the first selected node, otherwise the first
    /// selected edge.
    pub fn selected_element(&self) -> Option<SelectedElement> {
        self.nodes
            .iter()
            .find(|node| node.selected)
            .map(|node| SelectedElement::Node {
                id: node.id.clone(),
                data: node.data.clone(),
            })
            .or_else(|| {
                self.edges
                    .iter()
                    .find(|edge| edge.selected)
                    .map(|edge| SelectedElement::Edge {
                        id: edge.id.clone(),
                        data: edge.data.clone(),
                    })
            })
    }

    fn load(
        &mut self,
        harness_id: HarnessId,
        harness_name: Option<String>,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    ) -> Result<Command<Effect, Event>, AppError> {
        if let Some(edge) = edges
            .iter()
            .find(|edge| edge.data.wire_id.is_none())
        {
            return Err(AppError::MalformedEdge(edge.id.clone()));
        }

        let cancel = self.cancel_sync();

        info!(
            "Loaded harness. harness: {}, nodes: {}, edges: {}",
            harness_id,
            nodes.len(),
            edges.len()
        );

        self.harness_id = Some(harness_id.clone());
        self.harness_name = harness_name;
        self.nodes = nodes;
        self.edges = edges;
        self.selected_edge_id = None;
        self.path_editor = PathEditor::Idle;
        self.path_saves.clear();
        self.load_state = LoadState::Loaded {
            harness_id,
        };

        self.sync.skip_next_observation();
        let sync = self.observe()?;

        Ok(cancel.and(sync))
    }

    /// End the session, the component library and sync configuration are kept.
    fn close(&mut self) -> Command<Effect, Event> {
        let cancel = self.cancel_sync();

        *self = Model {
            library: std::mem::take(&mut self.library),
            sync: std::mem::take(&mut self.sync),
            path_save_generation: self.path_save_generation,
            ..Model::default()
        };

        cancel
    }

    fn observe(&mut self) -> Result<Command<Effect, Event>, AppError> {
        let schedule = self.sync.observe(
            self.harness_id.as_ref(),
            self.harness_name.as_deref(),
            &self.nodes,
            &self.edges,
        )?;

        Ok(match schedule {
            Schedule::Skipped => Command::done(),
            Schedule::Cancelled {
                timer_id,
            } => timer::cancel(timer_id),
            Schedule::Scheduled {
                timer_id,
                superseded,
            } => {
                let cancel = superseded.map_or_else(Command::done, timer::cancel);
                let start = timer::start(timer_id, self.sync.config().quiescence).then_send(|output| Event::SyncTimer {
                    output,
                });
                cancel.and(start)
            }
        })
    }

    fn cancel_sync(&mut self) -> Command<Effect, Event> {
        self.sync
            .cancel()
            .map_or_else(Command::done, timer::cancel)
    }

    /// Forget edges that no longer exist.
    fn release_edges(&mut self, removed: &[EdgeId]) {
        for edge_id in removed {
            if self.selected_edge_id.as_ref() == Some(edge_id) {
                self.selected_edge_id = None;
            }
            self.path_editor.release(edge_id);
            self.path_saves.remove(edge_id);
        }
    }

    fn update_wire_length(&mut self, edge_id: &EdgeId, length: f64) -> bool {
        match self
            .edges
            .iter_mut()
            .find(|edge| edge.id.eq(edge_id))
        {
            Some(edge) => {
                edge.data.length = Some(length);
                true
            }
            None => false,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    None,

    ConfigureSync {
        quiescence_millis: u64,
    },

    FetchHarness {
        harness_id: HarnessId,
    },
    HarnessFetched {
        harness_id: HarnessId,
        result: StoreResult,
    },
    /// Replace the editing state with an already transformed graph.
    LoadHarness {
        harness_id: HarnessId,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    },

    ApplyNodeChanges {
        changes: Vec<NodeChange>,
    },
    ApplyEdgeChanges {
        changes: Vec<EdgeChange>,
    },
    Connect {
        source: NodeId,
        source_handle: PinId,
        target: NodeId,
        target_handle: PinId,
    },
    UpdateNodeData {
        node_id: NodeId,
        patch: ConnectorPatch,
    },
    UpdateEdgeData {
        edge_id: EdgeId,
        patch: WirePatch,
    },

    SetSelectedEdge {
        edge_id: Option<EdgeId>,
    },
    SetViewMode {
        mode: ViewMode,
    },
    SetMargin {
        margin: f64,
    },
    UpdateWireLength {
        edge_id: EdgeId,
        length: f64,
    },

    PickPathPoint {
        point: PathPoint,
    },
    UndoPathPoint,
    ClearPath,
    SavePath,
    WirePathSaved {
        edge_id: EdgeId,
        generation: u64,
        result: StoreResult,
    },

    SyncTimer {
        output: TimerOutput,
    },
    HarnessSaved {
        harness_id: HarnessId,
        result: StoreResult,
    },

    FetchComponents,
    ComponentsFetched {
        result: StoreResult,
    },
    DropComponent {
        transfer: DragTransfer,
        position: Position,
    },

    SetModelPath {
        file_path: Option<String>,
    },

    CloseEditor,
}

impl Event {
    /// Events not caused by the user, they leave any displayed error in place.
    fn is_background(&self) -> bool {
        matches!(
            self,
            Event::SyncTimer { .. } | Event::HarnessSaved { .. } | Event::WirePathSaved { .. }
        )
    }
}

#[effect]
pub enum Effect {
    Render(RenderOperation),
    Store(HarnessStoreOperation),
    Timer(SyncTimerOperation),
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct PathPreview {
    pub edge_id: EdgeId,
    pub points: Vec<PathPoint>,
    pub length: f64,
    pub length_with_margin: f64,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Default)]
pub struct HarnessEditorViewModel {
    pub harness_id: Option<HarnessId>,
    pub load_state: LoadState,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub selected_edge_id: Option<EdgeId>,
    pub selected_element: Option<SelectedElement>,
    pub view_mode: ViewMode,
    pub manufacturing_margin: f64,
    pub path: Option<PathPreview>,
    pub library: Vec<LibraryComponent>,
    pub model_path: Option<String>,
    pub sync_pending: bool,
    pub error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

impl HarnessEditor {
    fn update_inner(
        &self,
        event: <HarnessEditor as App>::Event,
    ) -> Box<
        dyn FnOnce(
            &mut <HarnessEditor as App>::Model,
        ) -> Result<Command<<HarnessEditor as App>::Effect, <HarnessEditor as App>::Event>, AppError>,
    > {
        match event {
            Event::None => Box::new(|_model: &mut Model| Ok(render::render())),
            Event::ConfigureSync {
                quiescence_millis,
            } => Box::new(move |model: &mut Model| {
                debug!("Configuring sync. quiescence: {}ms", quiescence_millis);
                model.sync.configure(SyncConfig {
                    quiescence: Duration::from_millis(quiescence_millis),
                });
                Ok(Command::done())
            }),
            Event::FetchHarness {
                harness_id,
            } => Box::new(move |model: &mut Model| {
                info!("Fetching harness. harness: {}", harness_id);
                model.load_state = LoadState::Loading {
                    harness_id: harness_id.clone(),
                };

                let fetch = store::get_harness(harness_id.clone()).then_send(move |result| Event::HarnessFetched {
                    harness_id,
                    result,
                });

                Ok(render::render().and(fetch))
            }),
            Event::HarnessFetched {
                harness_id,
                result,
            } => Box::new(move |model: &mut Model| {
                let expected = LoadState::Loading {
                    harness_id: harness_id.clone(),
                };
                if model.load_state != expected {
                    debug!("Discarding superseded harness fetch. harness: {}", harness_id);
                    return Ok(Command::done());
                }

                match result.into_harness() {
                    Ok(harness) => {
                        let graph = to_graph(&harness);
                        let command = model.load(harness_id, Some(harness.name), graph.nodes, graph.edges)?;
                        Ok(render::render().and(command))
                    }
                    Err(error) => {
                        warn!("Harness fetch failed. harness: {}, error: {}", harness_id, error);
                        model.load_state = LoadState::Failed {
                            harness_id,
                            message: error.to_string(),
                        };
                        Ok(render::render())
                    }
                }
            }),
            Event::LoadHarness {
                harness_id,
                nodes,
                edges,
            } => Box::new(move |model: &mut Model| {
                let command = model.load(harness_id, None, nodes, edges)?;
                Ok(render::render().and(command))
            }),
            Event::ApplyNodeChanges {
                changes,
            } => Box::new(move |model: &mut Model| {
                trace!("Applying node changes. changes: {:?}", changes);
                apply_node_changes(changes, &mut model.nodes);

                let removed = remove_dangling_edges(&model.nodes, &mut model.edges);
                if !removed.is_empty() {
                    debug!("Removed edges of removed nodes. edges: {:?}", removed);
                }
                model.release_edges(&removed);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::ApplyEdgeChanges {
                changes,
            } => Box::new(move |model: &mut Model| {
                trace!("Applying edge changes. changes: {:?}", changes);
                let before = model
                    .edges
                    .iter()
                    .map(|edge| edge.id.clone())
                    .collect::<Vec<_>>();

                apply_edge_changes(changes, &mut model.edges);

                let removed = before
                    .into_iter()
                    .filter(|edge_id| !model.edges.iter().any(|edge| edge.id.eq(edge_id)))
                    .collect::<Vec<_>>();
                model.release_edges(&removed);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::Connect {
                source,
                source_handle,
                target,
                target_handle,
            } => Box::new(move |model: &mut Model| {
                for (node_id, pin_id) in [(&source, &source_handle), (&target, &target_handle)] {
                    let known = model
                        .nodes
                        .iter()
                        .any(|node| node.id.eq(node_id) && node.has_pin(pin_id));
                    if !known {
                        return Err(AppError::InvalidConnection {
                            node: node_id.clone(),
                            pin: pin_id.clone(),
                        });
                    }
                }

                let edge = GraphEdge {
                    id: EdgeId(format!("edge-{}", Uuid::new_v4())),
                    source,
                    target,
                    source_handle,
                    target_handle,
                    data: WirePayload {
                        wire_id: Some(WireId(format!("wire-{}", Uuid::new_v4()))),
                        color: Some(DEFAULTS.new_wire_color.to_string()),
                        ..WirePayload::default()
                    },
                    selected: false,
                };

                info!(
                    "Connected. edge: {}, from: {}:{}, to: {}:{}",
                    edge.id, edge.source, edge.source_handle, edge.target, edge.target_handle
                );
                model.edges.push(edge);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::UpdateNodeData {
                node_id,
                patch,
            } => Box::new(move |model: &mut Model| {
                let Some(node) = model
                    .nodes
                    .iter_mut()
                    .find(|node| node.id.eq(&node_id))
                else {
                    debug!("Ignoring update for unknown node. node: {}", node_id);
                    return Ok(Command::done());
                };
                patch.apply(&mut node.data);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::UpdateEdgeData {
                edge_id,
                patch,
            } => Box::new(move |model: &mut Model| {
                if patch.clears_wire_id() {
                    return Err(AppError::MalformedEdge(edge_id));
                }

                let Some(edge) = model
                    .edges
                    .iter_mut()
                    .find(|edge| edge.id.eq(&edge_id))
                else {
                    debug!("Ignoring update for unknown edge. edge: {}", edge_id);
                    return Ok(Command::done());
                };
                patch.apply(&mut edge.data);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::SetSelectedEdge {
                edge_id,
            } => Box::new(move |model: &mut Model| {
                match edge_id {
                    Some(edge_id) => {
                        let edge = model
                            .edges
                            .iter()
                            .find(|edge| edge.id.eq(&edge_id))
                            .ok_or(AppError::UnknownEdge(edge_id.clone()))?;
                        model.path_editor.select(Some(edge));
                        model.selected_edge_id = Some(edge_id);
                    }
                    None => {
                        model.path_editor.select(None);
                        model.selected_edge_id = None;
                    }
                }
                Ok(render::render())
            }),
            Event::SetViewMode {
                mode,
            } => Box::new(move |model: &mut Model| {
                model.view_mode = mode;
                Ok(render::render())
            }),
            Event::SetMargin {
                margin,
            } => Box::new(move |model: &mut Model| {
                model.margin = ManufacturingMargin::try_new(margin).map_err(AppError::InvalidMargin)?;
                Ok(render::render())
            }),
            Event::UpdateWireLength {
                edge_id,
                length,
            } => Box::new(move |model: &mut Model| {
                if !model.update_wire_length(&edge_id, length) {
                    debug!("Ignoring length for unknown edge. edge: {}", edge_id);
                    return Ok(Command::done());
                }

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::PickPathPoint {
                point,
            } => Box::new(move |model: &mut Model| {
                model.path_editor.pick(point)?;
                Ok(render::render())
            }),
            Event::UndoPathPoint => Box::new(|model: &mut Model| {
                model.path_editor.undo()?;
                Ok(render::render())
            }),
            Event::ClearPath => Box::new(|model: &mut Model| {
                model.path_editor.clear()?;
                Ok(render::render())
            }),
            Event::SavePath => Box::new(|model: &mut Model| {
                let harness_id = model
                    .harness_id
                    .clone()
                    .ok_or(AppError::NoHarnessLoaded)?;
                let edge_id = model
                    .path_editor
                    .edge_id()
                    .cloned()
                    .ok_or(AppError::NoEdgeSelected)?;
                let points = model.path_editor.points().to_vec();

                let edge = model
                    .edges
                    .iter_mut()
                    .find(|edge| edge.id.eq(&edge_id))
                    .ok_or(AppError::UnknownEdge(edge_id.clone()))?;
                let wire_id = edge
                    .data
                    .wire_id
                    .clone()
                    .ok_or(AppError::MalformedEdge(edge_id.clone()))?;

                edge.data.path_3d = Some(points.clone());

                model.path_save_generation += 1;
                let generation = model.path_save_generation;
                model
                    .path_saves
                    .insert(edge_id.clone(), generation);

                info!(
                    "Saving wire path. edge: {}, wire: {}, points: {}, margin: {}",
                    edge_id,
                    wire_id,
                    points.len(),
                    model.margin
                );

                let sync = model.observe()?;
                let save = store::put_wire_path(harness_id, wire_id, points, model.margin.value()).then_send(
                    move |result| Event::WirePathSaved {
                        edge_id,
                        generation,
                        result,
                    },
                );

                Ok(render::render().and(sync).and(save))
            }),
            Event::WirePathSaved {
                edge_id,
                generation,
                result,
            } => Box::new(move |model: &mut Model| {
                if model.path_saves.get(&edge_id) != Some(&generation) {
                    debug!(
                        "Discarding stale wire path response. edge: {}, generation: {}",
                        edge_id, generation
                    );
                    return Ok(Command::done());
                }
                model.path_saves.remove(&edge_id);

                let length = match result.into_wire_length() {
                    Ok(length) => length,
                    Err(error) => {
                        warn!("Wire path save failed, dropped. edge: {}, error: {}", edge_id, error);
                        return Ok(Command::done());
                    }
                };

                info!("Wire path saved. edge: {}, length: {}", edge_id, length);
                if !model.update_wire_length(&edge_id, length) {
                    return Ok(render::render());
                }

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::SyncTimer {
                output,
            } => Box::new(move |model: &mut Model| match output {
                TimerOutput::Elapsed {
                    id,
                } => {
                    let Some(push) = model.sync.fire(id) else {
                        return Ok(Command::done());
                    };

                    info!(
                        "Pushing harness. harness: {}, connectors: {}, wires: {}",
                        push.harness_id,
                        push.harness.connectors.len(),
                        push.harness.wires.len()
                    );

                    let harness_id = push.harness_id.clone();
                    Ok(
                        store::put_harness(push.harness_id, push.harness).then_send(move |result| {
                            Event::HarnessSaved {
                                harness_id,
                                result,
                            }
                        }),
                    )
                }
                TimerOutput::Cancelled {
                    id,
                } => {
                    trace!("Sync timer cancelled. timer: {:?}", id);
                    Ok(Command::done())
                }
            }),
            Event::HarnessSaved {
                harness_id,
                result,
            } => Box::new(move |_model: &mut Model| {
                match result.into_harness() {
                    Ok(harness) => debug!(
                        "Harness pushed. harness: {}, connections: {}",
                        harness_id,
                        harness.connections.len()
                    ),
                    Err(error) => warn!("Harness push failed, dropped. harness: {}, error: {}", harness_id, error),
                }
                Ok(Command::done())
            }),
            Event::FetchComponents => Box::new(|_model: &mut Model| {
                info!("Fetching component library.");
                Ok(store::get_components().then_send(|result| Event::ComponentsFetched {
                    result,
                }))
            }),
            Event::ComponentsFetched {
                result,
            } => Box::new(move |model: &mut Model| {
                let components = result
                    .into_components()
                    .map_err(AppError::NetworkFailure)?;
                info!("Fetched component library. components: {}", components.len());
                model.library = components;
                Ok(render::render())
            }),
            Event::DropComponent {
                transfer,
                position,
            } => Box::new(move |model: &mut Model| {
                let suffix = Uuid::new_v4().simple().to_string();
                let node = transfer
                    .to_node(position, &suffix)
                    .map_err(AppError::DropRejected)?;

                info!("Placed connector. node: {}", node.id);
                model.nodes.push(node);

                let sync = model.observe()?;
                Ok(render::render().and(sync))
            }),
            Event::SetModelPath {
                file_path,
            } => Box::new(move |model: &mut Model| {
                model.model_path = file_path;
                Ok(render::render())
            }),
            Event::CloseEditor => Box::new(|model: &mut Model| {
                info!("Closing editor.");
                let cancel = model.close();
                Ok(render::render().and(cancel))
            }),
        }
    }
}

impl App for HarnessEditor {
    type Event = Event;
    type Model = Model;
    type ViewModel = HarnessEditorViewModel;
    type Capabilities = ();
    type Effect = Effect;

    fn update(
        &self,
        event: Self::Event,
        model: &mut Self::Model,
        _caps: &Self::Capabilities,
    ) -> Command<Self::Effect, Self::Event> {
        let background = event.is_background();
        let try_fn = self.update_inner(event);

        match try_fn(model) {
            Err(e) => {
                error!("{}", e);
                model
                    .error
                    .replace((chrono::DateTime::from(SystemTime::now()), format!("{}", e)));
                render::render()
            }
            Ok(command) => {
                if !background {
                    model.error.take();
                }
                command
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let path = model
            .path_editor
            .edge_id()
            .map(|edge_id| {
                let length = model.path_editor.length();
                PathPreview {
                    edge_id: edge_id.clone(),
                    points: model.path_editor.points().to_vec(),
                    length,
                    length_with_margin: model.margin.apply(length),
                }
            });

        let view_model = HarnessEditorViewModel {
            harness_id: model.harness_id.clone(),
            load_state: model.load_state.clone(),
            nodes: model.nodes.clone(),
            edges: model.edges.clone(),
            selected_edge_id: model.selected_edge_id.clone(),
            selected_element: model.selected_element(),
            view_mode: model.view_mode,
            manufacturing_margin: model.margin.value(),
            path,
            library: model.library.clone(),
            model_path: model.model_path.clone(),
            sync_pending: model.sync.is_pending(),
            error: model.error.clone(),
        };

        trace!("view model: {:?}", view_model);

        view_model
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed edge, missing wire id. edge: {0}")]
    MalformedEdge(EdgeId),
    #[error("Invalid connection, unknown pin. node: {node}, pin: {pin}")]
    InvalidConnection { node: NodeId, pin: PinId },
    #[error("Invalid margin. cause: {0}")]
    InvalidMargin(MarginError),
    #[error("Network failure. cause: {0}")]
    NetworkFailure(StoreError),
    #[error("Operation requires a harness")]
    NoHarnessLoaded,
    #[error("Operation requires an edge being edited")]
    NoEdgeSelected,
    #[error("Unknown edge. edge: {0}")]
    UnknownEdge(EdgeId),
    #[error("Drop rejected. cause: {0}")]
    DropRejected(DropError),
}

impl From<TransformError> for AppError {
    fn from(error: TransformError) -> Self {
        match error {
            TransformError::MalformedEdge {
                edge_id,
            } => AppError::MalformedEdge(edge_id),
        }
    }
}

impl From<NotEditing> for AppError {
    fn from(_: NotEditing) -> Self {
        AppError::NoEdgeSelected
    }
}

#[cfg(test)]
mod tests;
