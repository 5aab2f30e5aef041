//! Interactive 3D routing of the selected wire.

use harness::graph::GraphEdge;
use harness::id::EdgeId;
use harness::point::{PathPoint, path_length};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("No edge is being edited")]
pub struct NotEditing;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PathEditor {
    #[default]
    Idle,
    Editing {
        edge_id: EdgeId,
        points: Vec<PathPoint>,
    },
}

impl PathEditor {
    /// Follow the edge selection.
    ///
    /// Selecting a different edge discards unsaved points and starts from the edge's stored path,
    /// re-selecting the edge being edited keeps them.
    pub fn select(&mut self, edge: Option<&GraphEdge>) {
        match edge {
            None => *self = PathEditor::Idle,
            Some(edge) if self.edge_id() == Some(&edge.id) => {}
            Some(edge) => {
                *self = PathEditor::Editing {
                    edge_id: edge.id.clone(),
                    points: edge
                        .data
                        .path_3d
                        .clone()
                        .unwrap_or_default(),
                }
            }
        }
    }

    /// Stop editing if `edge_id` is the edge being edited.
    pub fn release(&mut self, edge_id: &EdgeId) {
        if self.edge_id() == Some(edge_id) {
            *self = PathEditor::Idle;
        }
    }

    pub fn pick(&mut self, point: PathPoint) -> Result<(), NotEditing> {
        self.points_mut()?.push(point);
        Ok(())
    }

    /// Remove the last picked point, no-op when there are none.
    pub fn undo(&mut self) -> Result<(), NotEditing> {
        self.points_mut()?.pop();
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), NotEditing> {
        self.points_mut()?.clear();
        Ok(())
    }

    pub fn edge_id(&self) -> Option<&EdgeId> {
        match self {
            PathEditor::Idle => None,
            PathEditor::Editing {
                edge_id, ..
            } => Some(edge_id),
        }
    }

    pub fn points(&self) -> &[PathPoint] {
        match self {
            PathEditor::Idle => &[],
            PathEditor::Editing {
                points, ..
            } => points,
        }
    }

    pub fn length(&self) -> f64 {
        path_length(self.points())
    }

    fn points_mut(&mut self) -> Result<&mut Vec<PathPoint>, NotEditing> {
        match self {
            PathEditor::Idle => Err(NotEditing),
            PathEditor::Editing {
                points, ..
            } => Ok(points),
        }
    }
}

#[cfg(test)]
mod tests {
    use harness::graph::WirePayload;
    use harness::id::{NodeId, PinId, WireId};
    use rstest::rstest;

    use super::*;

    fn edge(id: &str, path: Option<Vec<PathPoint>>) -> GraphEdge {
        GraphEdge {
            id: EdgeId::from(id),
            source: NodeId::from("A"),
            target: NodeId::from("B"),
            source_handle: PinId::from("1"),
            target_handle: PinId::from("1"),
            data: WirePayload {
                wire_id: Some(WireId::from("W1")),
                path_3d: path,
                ..WirePayload::default()
            },
            selected: false,
        }
    }

    #[test]
    fn selecting_an_edge_loads_its_stored_path() {
        // given
        let stored = vec![PathPoint::new(0.0, 0.0, 0.0), PathPoint::new(0.0, 0.0, 5.0)];
        let mut editor = PathEditor::default();

        // when
        editor.select(Some(&edge("e1", Some(stored.clone()))));

        // then
        assert_eq!(editor, PathEditor::Editing {
            edge_id: EdgeId::from("e1"),
            points: stored,
        });
        assert_eq!(editor.length(), 5.0);
    }

    #[test]
    fn switching_edges_discards_unsaved_points() {
        // given
        let mut editor = PathEditor::default();
        editor.select(Some(&edge("e1", None)));
        editor
            .pick(PathPoint::new(1.0, 2.0, 3.0))
            .unwrap();

        // when
        editor.select(Some(&edge("e2", None)));

        // then
        assert_eq!(editor.edge_id(), Some(&EdgeId::from("e2")));
        assert!(editor.points().is_empty());
    }

    #[test]
    fn reselecting_the_same_edge_keeps_points() {
        // given
        let e1 = edge("e1", None);
        let mut editor = PathEditor::default();
        editor.select(Some(&e1));
        editor
            .pick(PathPoint::new(1.0, 2.0, 3.0))
            .unwrap();

        // when
        editor.select(Some(&e1));

        // then
        assert_eq!(editor.points().len(), 1);
    }

    #[test]
    fn pick_undo_and_clear() {
        // given
        let mut editor = PathEditor::default();
        editor.select(Some(&edge("e1", None)));

        // when
        editor
            .pick(PathPoint::new(0.0, 0.0, 0.0))
            .unwrap();
        editor
            .pick(PathPoint::new(3.0, 4.0, 0.0))
            .unwrap();
        editor
            .pick(PathPoint::new(3.0, 4.0, 9.0))
            .unwrap();
        editor.undo().unwrap();

        // then
        assert_eq!(editor.points().len(), 2);
        assert_eq!(editor.length(), 5.0);

        // when
        editor.clear().unwrap();

        // then
        assert!(editor.points().is_empty());
        assert_eq!(editor.edge_id(), Some(&EdgeId::from("e1")));

        // and undo on an empty path is a no-op
        assert_eq!(editor.undo(), Ok(()));
    }

    #[rstest]
    #[case::pick(|editor: &mut PathEditor| editor.pick(PathPoint::default()))]
    #[case::undo(|editor: &mut PathEditor| editor.undo())]
    #[case::clear(|editor: &mut PathEditor| editor.clear())]
    fn idle_editor_rejects_edits(#[case] edit: fn(&mut PathEditor) -> Result<(), NotEditing>) {
        // given
        let mut editor = PathEditor::Idle;

        // expect
        assert_eq!(edit(&mut editor), Err(NotEditing));
        assert_eq!(editor, PathEditor::Idle);
    }

    #[test]
    fn releasing_another_edge_keeps_editing() {
        // given
        let mut editor = PathEditor::default();
        editor.select(Some(&edge("e1", None)));

        // when
        editor.release(&EdgeId::from("e2"));

        // then
        assert_eq!(editor.edge_id(), Some(&EdgeId::from("e1")));

        // when
        editor.release(&EdgeId::from("e1"));

        // then
        assert_eq!(editor, PathEditor::Idle);
    }
}
