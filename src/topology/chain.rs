use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a chain in the topology store.
    pub struct ChainId;
}

/// An ordered sequence of vertices forming a path.
///
/// The chain is closed when its first and last vertex are the same handle.
#[derive(Debug, Clone, Default)]
pub struct ChainData {
    pub(crate) vertices: Vec<VertexId>,
}

impl ChainData {
    /// The ordered vertex handles of the chain.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of vertex slots, counting the seam of a closed chain twice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if the first and last vertex are the same.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.vertices.first() == self.vertices.last()
    }

    /// Returns `true` if the chain references `vertex`.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }
}
