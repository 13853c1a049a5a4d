pub mod extract;
pub mod make_parallel;
pub mod match_vertex_count;
pub mod offset_distance;
pub mod parallel_offset;
pub mod selection;

pub use extract::{ExtractSegment, Segment};
pub use make_parallel::{MakeParallel, MakeParallelReport};
pub use match_vertex_count::{MatchVertexCount, VertexCountMatch};
pub use offset_distance::OffsetDistance;
pub use parallel_offset::ParallelOffset2D;
pub use selection::{ResolvedSelection, Selection, SpanBounds};
