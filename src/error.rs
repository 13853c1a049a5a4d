use thiserror::Error;

use crate::topology::VertexId;

/// Top-level error type for parallel offset editing.
#[derive(Debug, Error)]
pub enum ParallelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("edge {index} of the source segment has zero length")]
    ZeroLengthEdge { index: usize },

    #[error("non-finite coordinate: {0}")]
    NonFinite(String),
}

/// Errors related to the host arena of vertices and chains.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("vertex is not part of the chain")]
    VertexNotInChain,

    #[error("vertex is deleted")]
    VertexDeleted,

    #[error("vertex is already part of the document")]
    VertexAlreadyLive,

    #[error("vertex is still referenced by a chain")]
    VertexStillReferenced,
}

/// Errors raised while validating the four selected vertices.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("expected exactly four selected vertices, found {found}")]
    WrongCount { found: usize },

    #[error("selected vertex #{index} is not part of any chain")]
    Detached { index: usize },

    #[error("selected vertex #{index} belongs to more than one chain")]
    MultipleChains { index: usize },

    #[error("first and third selected vertex must be on the same chain")]
    SourcePairSplit,

    #[error("second and fourth selected vertex must be on the same chain")]
    DestinationPairSplit,

    #[error("source and destination must be two different chains")]
    SameChain,
}

/// Which of the two segments an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    Source,
    Destination,
}

impl std::fmt::Display for SegmentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Why a vertex may not be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionReason {
    Tagged,
    SharedByChains,
}

impl std::fmt::Display for ProtectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tagged => f.write_str("carries tags"),
            Self::SharedByChains => f.write_str("belongs to multiple chains"),
        }
    }
}

/// Errors related to the make-parallel operation itself.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("chain runs in the wrong direction, try to reverse it")]
    ReversedDirection,

    #[error("closed chain seam lies inside the requested span")]
    SeamInSpan,

    #[error("closed chains are not supported")]
    ClosedChainRejected,

    #[error("{role} segment must be at least 3 vertices long, got {len}")]
    SegmentTooShort { role: SegmentRole, len: usize },

    #[error("refusing to delete vertex {vertex:?}: it {reason}")]
    ProtectedVertex {
        vertex: VertexId,
        reason: ProtectionReason,
    },

    #[error("history: {0}")]
    History(String),
}

/// Convenience type alias for results using [`ParallelError`].
pub type Result<T> = std::result::Result<T, ParallelError>;
