use tracing::info;

use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::topology::{TopologyStore, VertexId};

use super::{EditBatch, EditSink, History};

/// Reference host: a topology store plus its undo/redo history.
#[derive(Debug, Default)]
pub struct Document {
    store: TopologyStore,
    history: History,
}

impl Document {
    /// Wraps an existing store with a default-depth history.
    #[must_use]
    pub fn new(store: TopologyStore) -> Self {
        Self {
            store,
            history: History::default(),
        }
    }

    /// Limits undo and redo to `depth` batches each.
    #[must_use]
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = History::with_depth(depth);
        self
    }

    /// Mutable access for building the document outside the edit log
    /// (loading, test fixtures).
    pub fn store_mut(&mut self) -> &mut TopologyStore {
        &mut self.store
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reverts the most recent batch.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to undo or the batch can no
    /// longer be reverted (it stays on the undo stack in that case).
    pub fn undo(&mut self) -> Result<()> {
        let batch = self
            .history
            .pop_undo()
            .ok_or_else(|| OperationError::History("nothing to undo".into()))?;
        if let Err(err) = batch.revert(&mut self.store) {
            self.history.push_undo(batch);
            return Err(err.into());
        }
        info!(label = batch.label(), "undo");
        self.history.push_redo(batch);
        Ok(())
    }

    /// Re-applies the most recently undone batch.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to redo or the batch can no
    /// longer be applied (it stays on the redo stack in that case).
    pub fn redo(&mut self) -> Result<()> {
        let batch = self
            .history
            .pop_redo()
            .ok_or_else(|| OperationError::History("nothing to redo".into()))?;
        if let Err(err) = batch.apply(&mut self.store) {
            self.history.push_redo(batch);
            return Err(err.into());
        }
        info!(label = batch.label(), "redo");
        self.history.push_undo(batch);
        Ok(())
    }
}

impl EditSink for Document {
    fn store(&self) -> &TopologyStore {
        &self.store
    }

    fn allocate_vertex(&mut self, point: Point2) -> VertexId {
        self.store.add_detached_vertex(point)
    }

    fn release_vertex(&mut self, vertex: VertexId) -> Result<()> {
        self.store.remove_detached_vertex(vertex)?;
        Ok(())
    }

    fn submit(&mut self, batch: EditBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        batch.apply(&mut self.store)?;
        info!(label = batch.label(), edits = batch.len(), "committed");
        self.history.record(batch);
        Ok(())
    }
}
