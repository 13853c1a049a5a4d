use crate::math::TOLERANCE;

/// How closed chains (first vertex == last vertex) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosedChainPolicy {
    /// Accept closed chains with a warning. Spans that would have to cross
    /// the seam vertex are refused.
    #[default]
    Degraded,
    /// Refuse any closed chain.
    Reject,
}

/// Parameters controlling the make-parallel operation.
#[derive(Debug, Clone, Copy)]
pub struct MakeParallelConfig {
    /// Sine of the largest angle between two offset lines that still counts
    /// as parallel. Parallel neighbours are not intersected.
    pub parallel_tolerance: f64,
    /// Treatment of closed chains during segment extraction.
    pub closed_chains: ClosedChainPolicy,
}

impl Default for MakeParallelConfig {
    fn default() -> Self {
        Self {
            parallel_tolerance: TOLERANCE,
            closed_chains: ClosedChainPolicy::default(),
        }
    }
}
