pub mod chain;
pub mod vertex;

pub use chain::{ChainData, ChainId};
pub use vertex::{VertexData, VertexId};

use crate::error::{ProtectionReason, TopologyError};
use crate::math::Point2;
use slotmap::SlotMap;

/// Central arena that owns all vertices and chains.
///
/// Chains reference vertices via typed IDs (generational indices). Each vertex
/// keeps back-references to the chains using it, so "how many chains share
/// this vertex" never requires scanning the arena.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    chains: SlotMap<ChainId, ChainData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a live vertex and returns its ID.
    pub fn add_vertex(&mut self, mut data: VertexData) -> VertexId {
        data.parents.clear();
        data.deleted = false;
        self.vertices.insert(data)
    }

    /// Allocates a vertex that is not yet part of the document.
    ///
    /// The vertex stays invisible (deleted) until an
    /// [`Edit::AddVertex`](crate::edit::Edit::AddVertex) brings it to life.
    pub fn add_detached_vertex(&mut self, point: Point2) -> VertexId {
        let mut data = VertexData::new(point);
        data.deleted = true;
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// Deleted vertices are still returned; check [`VertexData::is_deleted`].
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    /// Returns the position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: VertexId) -> Result<Point2, TopologyError> {
        Ok(self.vertex(id)?.point)
    }

    /// Collects the positions of a list of vertices, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any vertex is not found in the store.
    pub fn points(&self, ids: &[VertexId]) -> Result<Vec<Point2>, TopologyError> {
        ids.iter().map(|&id| self.point(id)).collect()
    }

    /// Sets or replaces a tag on a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn set_tag(
        &mut self,
        id: VertexId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TopologyError> {
        self.vertex_mut(id)?.tags.insert(key.into(), value.into());
        Ok(())
    }

    pub(crate) fn set_point(&mut self, id: VertexId, point: Point2) -> Result<(), TopologyError> {
        self.vertex_mut(id)?.point = point;
        Ok(())
    }

    pub(crate) fn set_deleted(&mut self, id: VertexId, deleted: bool) -> Result<(), TopologyError> {
        let vertex = self.vertex_mut(id)?;
        if deleted && !vertex.parents.is_empty() {
            return Err(TopologyError::VertexStillReferenced);
        }
        vertex.deleted = deleted;
        Ok(())
    }

    /// Frees a detached vertex that was never brought into the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is missing, live, or still referenced
    /// by a chain.
    pub fn remove_detached_vertex(&mut self, id: VertexId) -> Result<(), TopologyError> {
        let vertex = self.vertex(id)?;
        if !vertex.deleted {
            return Err(TopologyError::VertexAlreadyLive);
        }
        if !vertex.parents.is_empty() {
            return Err(TopologyError::VertexStillReferenced);
        }
        self.vertices.remove(id);
        Ok(())
    }

    /// Returns why a vertex must not be deleted, or `None` for a plain vertex.
    ///
    /// A vertex is protected when it carries tags or belongs to more than one
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn protection(&self, id: VertexId) -> Result<Option<ProtectionReason>, TopologyError> {
        let vertex = self.vertex(id)?;
        if !vertex.tags.is_empty() {
            Ok(Some(ProtectionReason::Tagged))
        } else if vertex.parents.len() > 1 {
            Ok(Some(ProtectionReason::SharedByChains))
        } else {
            Ok(None)
        }
    }

    /// Number of vertices currently part of the document.
    #[must_use]
    pub fn live_vertex_count(&self) -> usize {
        self.vertices.values().filter(|v| !v.deleted).count()
    }

    // --- Chain operations ---

    /// Inserts a chain over existing live vertices and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex is missing or deleted.
    pub fn add_chain(&mut self, vertices: Vec<VertexId>) -> Result<ChainId, TopologyError> {
        self.check_live(&vertices)?;
        let id = self.chains.insert(ChainData::default());
        self.set_chain_vertices(id, vertices)?;
        Ok(id)
    }

    /// Returns a reference to the chain data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn chain(&self, id: ChainId) -> Result<&ChainData, TopologyError> {
        self.chains
            .get(id)
            .ok_or(TopologyError::EntityNotFound("chain"))
    }

    /// Replaces the vertex list of a chain and returns the previous list.
    ///
    /// Vertex back-references are updated for every vertex entering or
    /// leaving the chain.
    pub(crate) fn set_chain_vertices(
        &mut self,
        id: ChainId,
        vertices: Vec<VertexId>,
    ) -> Result<Vec<VertexId>, TopologyError> {
        self.check_live(&vertices)?;
        let chain = self
            .chains
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("chain"))?;
        let old = std::mem::replace(&mut chain.vertices, vertices);

        for v in &old {
            if !self.chains[id].vertices.contains(v) {
                if let Some(data) = self.vertices.get_mut(*v) {
                    data.parents.retain(|c| *c != id);
                }
            }
        }
        for v in &self.chains[id].vertices {
            if let Some(data) = self.vertices.get_mut(*v) {
                if !data.parents.contains(&id) {
                    data.parents.push(id);
                }
            }
        }
        Ok(old)
    }

    fn check_live(&self, vertices: &[VertexId]) -> Result<(), TopologyError> {
        for &v in vertices {
            if self.vertex(v)?.deleted {
                return Err(TopologyError::VertexDeleted);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_with_points(points: &[(f64, f64)]) -> (TopologyStore, Vec<VertexId>) {
        let mut store = TopologyStore::new();
        let ids = points
            .iter()
            .map(|&(x, y)| store.add_vertex(VertexData::new(Point2::new(x, y))))
            .collect();
        (store, ids)
    }

    #[test]
    fn chain_sets_back_references() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let chain = store.add_chain(ids.clone()).unwrap();
        for id in &ids {
            assert_eq!(store.vertex(*id).unwrap().parents(), &[chain]);
        }
    }

    #[test]
    fn closed_chain_counts_seam_once() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let chain = store
            .add_chain(vec![ids[0], ids[1], ids[2], ids[0]])
            .unwrap();
        assert!(store.chain(chain).unwrap().is_closed());
        assert_eq!(store.vertex(ids[0]).unwrap().parents().len(), 1);
        assert_eq!(store.protection(ids[0]).unwrap(), None);
    }

    #[test]
    fn shared_vertex_is_protected() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        store.add_chain(vec![ids[0], ids[1]]).unwrap();
        store.add_chain(vec![ids[1], ids[2]]).unwrap();
        assert_eq!(
            store.protection(ids[1]).unwrap(),
            Some(ProtectionReason::SharedByChains)
        );
        assert_eq!(store.protection(ids[0]).unwrap(), None);
    }

    #[test]
    fn tagged_vertex_is_protected() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0)]);
        store.set_tag(ids[0], "highway", "crossing").unwrap();
        assert_eq!(
            store.protection(ids[0]).unwrap(),
            Some(ProtectionReason::Tagged)
        );
    }

    #[test]
    fn replacing_chain_vertices_drops_stale_parents() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let chain = store.add_chain(ids.clone()).unwrap();
        let old = store
            .set_chain_vertices(chain, vec![ids[0], ids[2]])
            .unwrap();
        assert_eq!(old, ids);
        assert!(store.vertex(ids[1]).unwrap().parents().is_empty());
        assert_eq!(store.vertex(ids[2]).unwrap().parents(), &[chain]);
    }

    #[test]
    fn referenced_vertex_cannot_be_deleted() {
        let (mut store, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0)]);
        store.add_chain(ids.clone()).unwrap();
        assert!(matches!(
            store.set_deleted(ids[0], true),
            Err(TopologyError::VertexStillReferenced)
        ));
    }

    #[test]
    fn detached_vertex_cannot_join_chain() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(Point2::new(0.0, 0.0)));
        let b = store.add_detached_vertex(Point2::new(1.0, 0.0));
        assert!(matches!(
            store.add_chain(vec![a, b]),
            Err(TopologyError::VertexDeleted)
        ));
        assert_eq!(store.live_vertex_count(), 1);
    }

    #[test]
    fn missing_entities_are_reported() {
        let mut other = TopologyStore::new();
        let foreign = other.add_vertex(VertexData::new(Point2::origin()));
        let store = TopologyStore::new();
        assert!(matches!(
            store.vertex(foreign),
            Err(TopologyError::EntityNotFound("vertex"))
        ));
    }

    #[test]
    fn only_unused_detached_vertices_can_be_freed() {
        let mut store = TopologyStore::new();
        let live = store.add_vertex(VertexData::new(Point2::new(0.0, 0.0)));
        let detached = store.add_detached_vertex(Point2::new(1.0, 0.0));

        assert!(matches!(
            store.remove_detached_vertex(live),
            Err(TopologyError::VertexAlreadyLive)
        ));
        store.remove_detached_vertex(detached).unwrap();
        assert!(store.vertex(detached).is_err());
        assert!(store.remove_detached_vertex(detached).is_err());
        assert_eq!(store.live_vertex_count(), 1);
    }
}
