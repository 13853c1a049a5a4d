use std::collections::BTreeMap;

use crate::math::Point2;

use super::chain::ChainId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The projected planar position of the vertex.
    pub point: Point2,
    /// Key/value tags. An empty map means a plain vertex.
    pub tags: BTreeMap<String, String>,
    /// Chains referencing this vertex, one entry per distinct chain.
    /// Maintained by the store; read-only for everyone else.
    pub(crate) parents: Vec<ChainId>,
    /// Tombstone flag. Deleted and not-yet-added vertices keep their key so
    /// that undo and redo can revive them under the same handle.
    pub(crate) deleted: bool,
}

impl VertexData {
    /// Creates a new plain vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            tags: BTreeMap::new(),
            parents: Vec::new(),
            deleted: false,
        }
    }

    /// Adds a tag to the vertex.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Chains that reference this vertex.
    #[must_use]
    pub fn parents(&self) -> &[ChainId] {
        &self.parents
    }

    /// Whether the vertex has been removed from the document.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}
