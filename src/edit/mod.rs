//! Undoable document mutations.
//!
//! The geometric operations never touch the [`TopologyStore`] directly. They
//! build [`Edit`] values, group them into an [`EditBatch`] and hand the batch
//! to an [`EditSink`], which decides how (and whether) to apply and record it.

mod document;
mod history;

pub use document::Document;
pub use history::History;

use tracing::warn;

use crate::error::{Result, TopologyError};
use crate::math::Point2;
use crate::topology::{ChainId, TopologyStore, VertexId};

/// A single reversible mutation of the topology store.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Brings a previously allocated, detached vertex into the document.
    AddVertex { vertex: VertexId },
    /// Removes vertices that no chain references any more.
    DeleteVertices { vertices: Vec<VertexId> },
    /// Replaces the ordered vertex list of a chain.
    SetChainVertices {
        chain: ChainId,
        before: Vec<VertexId>,
        after: Vec<VertexId>,
    },
    /// Moves a vertex to a new position.
    MoveVertex {
        vertex: VertexId,
        from: Point2,
        to: Point2,
    },
}

impl Edit {
    /// Applies the edit to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing or in the wrong
    /// state. The store is left unchanged in that case.
    pub fn apply(&self, store: &mut TopologyStore) -> std::result::Result<(), TopologyError> {
        match self {
            Self::AddVertex { vertex } => {
                if !store.vertex(*vertex)?.is_deleted() {
                    return Err(TopologyError::VertexAlreadyLive);
                }
                store.set_deleted(*vertex, false)
            }
            Self::DeleteVertices { vertices } => {
                for &v in vertices {
                    let data = store.vertex(v)?;
                    if data.is_deleted() {
                        return Err(TopologyError::VertexDeleted);
                    }
                    if !data.parents().is_empty() {
                        return Err(TopologyError::VertexStillReferenced);
                    }
                }
                for &v in vertices {
                    store.set_deleted(v, true)?;
                }
                Ok(())
            }
            Self::SetChainVertices { chain, after, .. } => {
                store.set_chain_vertices(*chain, after.clone()).map(|_| ())
            }
            Self::MoveVertex { vertex, to, .. } => store.set_point(*vertex, *to),
        }
    }

    /// Undoes the edit.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing or in the wrong
    /// state.
    pub fn revert(&self, store: &mut TopologyStore) -> std::result::Result<(), TopologyError> {
        match self {
            Self::AddVertex { vertex } => store.set_deleted(*vertex, true),
            Self::DeleteVertices { vertices } => {
                for &v in vertices {
                    store.vertex(v)?;
                }
                for &v in vertices {
                    store.set_deleted(v, false)?;
                }
                Ok(())
            }
            Self::SetChainVertices { chain, before, .. } => {
                store.set_chain_vertices(*chain, before.clone()).map(|_| ())
            }
            Self::MoveVertex { vertex, from, .. } => store.set_point(*vertex, *from),
        }
    }
}

/// An ordered group of edits applied and undone as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBatch {
    label: String,
    edits: Vec<Edit>,
}

impl EditBatch {
    /// Creates an empty batch with a human-readable label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edits: Vec::new(),
        }
    }

    /// Appends an edit.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit in order; all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first failing edit's error after rolling back the edits
    /// already applied.
    pub fn apply(&self, store: &mut TopologyStore) -> std::result::Result<(), TopologyError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if let Err(err) = edit.apply(store) {
                for done in self.edits[..i].iter().rev() {
                    if let Err(rollback) = done.revert(store) {
                        warn!(label = %self.label, %rollback, "rollback of edit failed");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Reverts every edit in reverse order; all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first failing revert's error after re-applying the edits
    /// already reverted.
    pub fn revert(&self, store: &mut TopologyStore) -> std::result::Result<(), TopologyError> {
        let n = self.edits.len();
        for (k, edit) in self.edits.iter().rev().enumerate() {
            if let Err(err) = edit.revert(store) {
                for done in &self.edits[n - k..] {
                    if let Err(rollback) = done.apply(store) {
                        warn!(label = %self.label, %rollback, "re-apply of edit failed");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Host capability through which operations request document changes.
pub trait EditSink {
    /// Read access to the current document state.
    fn store(&self) -> &TopologyStore;

    /// Allocates a detached vertex handle. The vertex becomes part of the
    /// document only once an [`Edit::AddVertex`] for it is submitted.
    fn allocate_vertex(&mut self, point: Point2) -> VertexId;

    /// Frees a handle from [`allocate_vertex`](Self::allocate_vertex) whose
    /// batch was never committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is unknown or already part of the
    /// document.
    fn release_vertex(&mut self, vertex: VertexId) -> Result<()>;

    /// Applies a batch atomically and records it for undo.
    ///
    /// # Errors
    ///
    /// Returns an error if any edit of the batch cannot be applied; the
    /// document is unchanged in that case.
    fn submit(&mut self, batch: EditBatch) -> Result<()>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::VertexData;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn move_apply_and_revert() {
        let mut store = TopologyStore::new();
        let v = store.add_vertex(VertexData::new(p(1.0, 1.0)));
        let edit = Edit::MoveVertex {
            vertex: v,
            from: p(1.0, 1.0),
            to: p(4.0, 5.0),
        };
        edit.apply(&mut store).unwrap();
        assert_eq!(store.point(v).unwrap(), p(4.0, 5.0));
        edit.revert(&mut store).unwrap();
        assert_eq!(store.point(v).unwrap(), p(1.0, 1.0));
    }

    #[test]
    fn add_vertex_requires_detached() {
        let mut store = TopologyStore::new();
        let live = store.add_vertex(VertexData::new(p(0.0, 0.0)));
        let err = Edit::AddVertex { vertex: live }.apply(&mut store).unwrap_err();
        assert!(matches!(err, TopologyError::VertexAlreadyLive));
    }

    #[test]
    fn delete_checks_every_vertex_before_mutating() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(p(0.0, 0.0)));
        let b = store.add_vertex(VertexData::new(p(1.0, 0.0)));
        let c = store.add_vertex(VertexData::new(p(2.0, 0.0)));
        store.add_chain(vec![b, c]).unwrap();

        let err = Edit::DeleteVertices {
            vertices: vec![a, b],
        }
        .apply(&mut store)
        .unwrap_err();
        assert!(matches!(err, TopologyError::VertexStillReferenced));
        assert!(!store.vertex(a).unwrap().is_deleted());
    }

    #[test]
    fn failing_batch_rolls_back() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(p(0.0, 0.0)));
        let b = store.add_vertex(VertexData::new(p(1.0, 0.0)));

        let mut batch = EditBatch::new("test");
        batch.push(Edit::MoveVertex {
            vertex: a,
            from: p(0.0, 0.0),
            to: p(9.0, 9.0),
        });
        // b is live, so adding it again fails.
        batch.push(Edit::AddVertex { vertex: b });

        assert!(batch.apply(&mut store).is_err());
        assert_eq!(store.point(a).unwrap(), p(0.0, 0.0));
    }

    #[test]
    fn insert_batch_round_trip() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(p(0.0, 0.0)));
        let b = store.add_vertex(VertexData::new(p(2.0, 0.0)));
        let chain = store.add_chain(vec![a, b]).unwrap();
        let n = store.add_detached_vertex(p(1.0, 0.0));

        let mut batch = EditBatch::new("insert");
        batch.push(Edit::AddVertex { vertex: n });
        batch.push(Edit::SetChainVertices {
            chain,
            before: vec![a, b],
            after: vec![a, n, b],
        });

        batch.apply(&mut store).unwrap();
        assert_eq!(store.chain(chain).unwrap().vertices(), &[a, n, b]);
        assert_eq!(store.live_vertex_count(), 3);

        batch.revert(&mut store).unwrap();
        assert_eq!(store.chain(chain).unwrap().vertices(), &[a, b]);
        assert!(store.vertex(n).unwrap().is_deleted());
        assert!(store.vertex(n).unwrap().parents().is_empty());
    }
}
