use tracing::{debug, warn};

use crate::edit::{Edit, EditBatch, EditSink};
use crate::error::{OperationError, Result, TopologyError};
use crate::topology::VertexId;

use super::extract::Segment;

pub(crate) const ADD_LABEL: &str = "Make Parallel: add nodes";
pub(crate) const REMOVE_LABEL: &str = "Make Parallel: remove nodes";

/// Outcome of matching the destination's vertex count to the source's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexCountMatch {
    /// The destination segment after insertion or removal.
    pub segment: Segment,
    pub inserted: usize,
    pub removed: usize,
}

/// Inserts or removes interior vertices of the destination segment until it
/// has as many vertices as the source segment.
///
/// - More source vertices: new vertices are inserted just before the
///   destination's last vertex, at that vertex's position.
/// - More destination vertices: vertices are removed walking backwards from
///   the last-but-one. If any of them is protected (tagged or shared with
///   another chain) nothing is removed at all.
///
/// Segments with two or fewer vertices are left untouched. Each non-empty
/// change is submitted as one batch.
#[derive(Debug)]
pub struct MatchVertexCount<'a> {
    source: &'a Segment,
    destination: &'a Segment,
}

impl<'a> MatchVertexCount<'a> {
    #[must_use]
    pub fn new(source: &'a Segment, destination: &'a Segment) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Executes the reconciliation against the given host.
    ///
    /// # Errors
    ///
    /// - `OperationError::ProtectedVertex` if a vertex slated for removal is
    ///   protected; no edit is submitted
    /// - `TopologyError` if the destination segment no longer matches its
    ///   chain, or the host rejects the batch
    pub fn execute<S: EditSink>(&self, sink: &mut S) -> Result<VertexCountMatch> {
        let src_len = self.source.len();
        let dst_len = self.destination.len();
        debug!(source = src_len, destination = dst_len, "matching vertex counts");

        let unchanged = VertexCountMatch {
            segment: self.destination.clone(),
            inserted: 0,
            removed: 0,
        };
        if src_len <= 2 || dst_len <= 2 || src_len == dst_len {
            return Ok(unchanged);
        }

        if src_len > dst_len {
            self.insert(sink, src_len - dst_len)
        } else {
            self.remove(sink, dst_len - src_len)
        }
    }

    fn insert<S: EditSink>(&self, sink: &mut S, count: usize) -> Result<VertexCountMatch> {
        let end = self.destination.end_index_in(sink.store())?;
        let chain_id = self.destination.chain();
        let before = sink.store().chain(chain_id)?.vertices().to_vec();
        let anchor = sink.store().point(before[end])?;
        debug!(count, at = end, "inserting vertices into destination");

        let mut batch = EditBatch::new(ADD_LABEL);
        let added: Vec<VertexId> = (0..count)
            .map(|_| {
                let vertex = sink.allocate_vertex(anchor);
                batch.push(Edit::AddVertex { vertex });
                vertex
            })
            .collect();

        let after: Vec<VertexId> = before[..end]
            .iter()
            .chain(&added)
            .chain(&before[end..])
            .copied()
            .collect();
        batch.push(Edit::SetChainVertices {
            chain: chain_id,
            before,
            after,
        });
        if let Err(err) = sink.submit(batch) {
            for &vertex in &added {
                if let Err(release) = sink.release_vertex(vertex) {
                    warn!(?vertex, %release, "failed to release allocated vertex");
                }
            }
            return Err(err);
        }

        let (last, head) = self
            .destination
            .vertices()
            .split_last()
            .ok_or(TopologyError::VertexNotInChain)?;
        let mut vertices = head.to_vec();
        vertices.extend(added);
        vertices.push(*last);
        Ok(VertexCountMatch {
            segment: Segment::new(chain_id, vertices),
            inserted: count,
            removed: 0,
        })
    }

    fn remove<S: EditSink>(&self, sink: &mut S, count: usize) -> Result<VertexCountMatch> {
        let end = self.destination.end_index_in(sink.store())?;
        let chain_id = self.destination.chain();
        let before = sink.store().chain(chain_id)?.vertices().to_vec();
        debug!(count, at = end, "removing vertices from destination");

        let doomed = &before[end - count..end];
        for &vertex in doomed.iter().rev() {
            if let Some(reason) = sink.store().protection(vertex)? {
                warn!(?vertex, %reason, "refusing to delete protected vertex");
                return Err(OperationError::ProtectedVertex { vertex, reason }.into());
            }
        }

        let mut after = before.clone();
        let removed: Vec<VertexId> = after.drain(end - count..end).collect();
        let orphans: Vec<VertexId> = removed
            .iter()
            .copied()
            .filter(|v| !after.contains(v))
            .collect();

        let mut batch = EditBatch::new(REMOVE_LABEL);
        batch.push(Edit::SetChainVertices {
            chain: chain_id,
            before,
            after,
        });
        if !orphans.is_empty() {
            batch.push(Edit::DeleteVertices { vertices: orphans });
        }
        sink.submit(batch)?;

        let (last, head) = self
            .destination
            .vertices()
            .split_last()
            .ok_or(TopologyError::VertexNotInChain)?;
        let mut vertices = head[..head.len() - count].to_vec();
        vertices.push(*last);
        Ok(VertexCountMatch {
            segment: Segment::new(chain_id, vertices),
            inserted: 0,
            removed: count,
        })
    }
}
