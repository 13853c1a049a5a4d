use tracing::{debug, warn};

use crate::config::ClosedChainPolicy;
use crate::error::{OperationError, Result, TopologyError};
use crate::topology::{ChainId, TopologyStore, VertexId};

/// A contiguous, ordered run of a chain's vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    chain: ChainId,
    vertices: Vec<VertexId>,
}

impl Segment {
    /// Creates a segment from vertices already known to be contiguous on
    /// `chain`.
    #[must_use]
    pub fn new(chain: ChainId, vertices: Vec<VertexId>) -> Self {
        Self { chain, vertices }
    }

    #[must_use]
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Index of the segment's last vertex within its chain's vertex list.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::VertexNotInChain` if the segment no longer
    /// matches the chain.
    pub fn end_index_in(&self, store: &TopologyStore) -> Result<usize> {
        let chain = store.chain(self.chain)?;
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Err(TopologyError::VertexNotInChain.into());
        };
        let start = chain
            .vertices()
            .iter()
            .position(|&v| v == first)
            .ok_or(TopologyError::VertexNotInChain)?;
        let end = start + self.len() - 1;
        if chain.vertices().get(end) != Some(&last) {
            return Err(TopologyError::VertexNotInChain.into());
        }
        Ok(end)
    }
}

/// Extracts the span between two boundary vertices of one chain.
///
/// The chain is walked in its stored order. The start vertex must come
/// before the end vertex; otherwise the chain runs the wrong way relative to
/// the selection and the extraction is refused rather than auto-reversed.
#[derive(Debug)]
pub struct ExtractSegment {
    chain: ChainId,
    start: VertexId,
    end: VertexId,
    policy: ClosedChainPolicy,
}

impl ExtractSegment {
    #[must_use]
    pub fn new(chain: ChainId, start: VertexId, end: VertexId) -> Self {
        Self {
            chain,
            start,
            end,
            policy: ClosedChainPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ClosedChainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes the extraction. Both boundary vertices are included.
    ///
    /// # Errors
    ///
    /// - `OperationError::ReversedDirection` if `end` precedes `start` on an
    ///   open chain
    /// - `OperationError::SeamInSpan` if the span would wrap around the seam
    ///   of a closed chain
    /// - `OperationError::ClosedChainRejected` for any closed chain under
    ///   [`ClosedChainPolicy::Reject`]
    /// - `TopologyError` if the chain or a boundary vertex is missing
    pub fn execute(&self, store: &TopologyStore) -> Result<Segment> {
        let chain = store.chain(self.chain)?;
        let vertices = chain.vertices();
        let closed = chain.is_closed();

        if closed {
            if self.policy == ClosedChainPolicy::Reject {
                return Err(OperationError::ClosedChainRejected.into());
            }
            warn!(
                vertices = vertices.len(),
                "segment taken from a closed chain"
            );
        }

        let start = vertices
            .iter()
            .position(|&v| v == self.start)
            .ok_or(TopologyError::VertexNotInChain)?;

        let Some(offset) = vertices[start..].iter().position(|&v| v == self.end) else {
            if !vertices.contains(&self.end) {
                return Err(TopologyError::VertexNotInChain.into());
            }
            if closed {
                warn!("requested span crosses the seam of a closed chain");
                return Err(OperationError::SeamInSpan.into());
            }
            warn!("chain runs in the wrong direction");
            return Err(OperationError::ReversedDirection.into());
        };

        let span = vertices[start..=start + offset].to_vec();
        debug!(len = span.len(), closed, "extracted segment");
        Ok(Segment::new(self.chain, span))
    }
}
