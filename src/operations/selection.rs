use crate::error::{Result, SelectionError};
use crate::topology::{ChainId, TopologyStore, VertexId};

/// Number of vertices the operation works on.
const SELECTION_SIZE: usize = 4;

/// Start and end vertex of a span on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanBounds {
    pub chain: ChainId,
    pub start: VertexId,
    pub end: VertexId,
}

/// The four selected vertices grouped into a source and a destination span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub source: SpanBounds,
    pub destination: SpanBounds,
}

/// Validates an ordered selection of four vertices.
///
/// Vertices 0 and 2 bound the source span, vertices 1 and 3 the destination
/// span. Every vertex must belong to exactly one chain.
#[derive(Debug, Clone)]
pub struct Selection {
    vertices: Vec<VertexId>,
}

impl Selection {
    #[must_use]
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }

    /// Whether a selection of `count` vertices can be acted on at all.
    #[must_use]
    pub fn is_actionable(count: usize) -> bool {
        count == SELECTION_SIZE
    }

    /// Groups the selection into source and destination spans.
    ///
    /// # Errors
    ///
    /// Returns a `SelectionError` describing the first shape violation, or a
    /// `TopologyError` if a vertex is unknown to the store.
    pub fn resolve(&self, store: &TopologyStore) -> Result<ResolvedSelection> {
        if !Self::is_actionable(self.vertices.len()) {
            return Err(SelectionError::WrongCount {
                found: self.vertices.len(),
            }
            .into());
        }

        let mut chains = [ChainId::default(); SELECTION_SIZE];
        for (index, (&vertex, slot)) in self.vertices.iter().zip(&mut chains).enumerate() {
            *slot = sole_chain(store, vertex, index)?;
        }

        if chains[0] != chains[2] {
            return Err(SelectionError::SourcePairSplit.into());
        }
        if chains[1] != chains[3] {
            return Err(SelectionError::DestinationPairSplit.into());
        }
        if chains[0] == chains[1] {
            return Err(SelectionError::SameChain.into());
        }

        Ok(ResolvedSelection {
            source: SpanBounds {
                chain: chains[0],
                start: self.vertices[0],
                end: self.vertices[2],
            },
            destination: SpanBounds {
                chain: chains[1],
                start: self.vertices[1],
                end: self.vertices[3],
            },
        })
    }
}

fn sole_chain(store: &TopologyStore, vertex: VertexId, index: usize) -> Result<ChainId> {
    let data = store.vertex(vertex)?;
    match data.parents() {
        _ if data.is_deleted() => Err(SelectionError::Detached { index }.into()),
        [] => Err(SelectionError::Detached { index }.into()),
        [chain] => Ok(*chain),
        _ => Err(SelectionError::MultipleChains { index }.into()),
    }
}
