use super::EditBatch;

const DEFAULT_DEPTH: usize = 100;

/// Bounded undo/redo stacks of committed batches.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<EditBatch>,
    redo_stack: Vec<EditBatch>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

impl History {
    /// Creates a history keeping at most `max_depth` batches per stack.
    #[must_use]
    pub fn with_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Records a freshly committed batch. Clears the redo stack.
    pub fn record(&mut self, batch: EditBatch) {
        push_bounded(&mut self.undo_stack, batch, self.max_depth);
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the batch the next undo would revert.
    #[must_use]
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(EditBatch::label)
    }

    pub(crate) fn pop_undo(&mut self) -> Option<EditBatch> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<EditBatch> {
        self.redo_stack.pop()
    }

    /// Returns a reverted batch to the redo stack.
    pub(crate) fn push_redo(&mut self, batch: EditBatch) {
        push_bounded(&mut self.redo_stack, batch, self.max_depth);
    }

    /// Returns a re-applied batch to the undo stack without touching redo.
    pub(crate) fn push_undo(&mut self, batch: EditBatch) {
        push_bounded(&mut self.undo_stack, batch, self.max_depth);
    }
}

fn push_bounded(stack: &mut Vec<EditBatch>, batch: EditBatch, max_depth: usize) {
    if stack.len() >= max_depth {
        stack.remove(0);
    }
    stack.push(batch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_bounded() {
        let mut history = History::with_depth(2);
        history.record(EditBatch::new("a"));
        history.record(EditBatch::new("b"));
        history.record(EditBatch::new("c"));
        assert_eq!(history.pop_undo().map(|b| b.label().to_owned()), Some("c".into()));
        assert_eq!(history.pop_undo().map(|b| b.label().to_owned()), Some("b".into()));
        assert!(history.pop_undo().is_none());
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::default();
        history.push_redo(EditBatch::new("old"));
        assert!(history.can_redo());
        history.record(EditBatch::new("new"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_label(), Some("new"));
    }
}
