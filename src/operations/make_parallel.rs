use tracing::{debug, info};

use crate::config::MakeParallelConfig;
use crate::edit::{Edit, EditBatch, EditSink};
use crate::error::{OperationError, Result, SegmentRole};
use crate::notification::{Notice, NotificationSink};
use crate::topology::VertexId;

use super::extract::{ExtractSegment, Segment};
use super::match_vertex_count::MatchVertexCount;
use super::offset_distance::OffsetDistance;
use super::parallel_offset::ParallelOffset2D;
use super::selection::{Selection, SpanBounds};

pub(crate) const MOVE_LABEL: &str = "Make Parallel: move nodes";

/// Minimum number of vertices on either segment.
const MIN_SEGMENT_LEN: usize = 3;

/// Summary of a completed make-parallel invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakeParallelReport {
    /// Signed offset distance the destination was placed at.
    pub distance: f64,
    pub inserted: usize,
    pub removed: usize,
    pub moved: usize,
}

/// Makes the destination span parallel to the source span.
///
/// The selection is four vertices: source start, destination start, source
/// end, destination end. The destination is resampled to the source's vertex
/// count and every destination vertex is moved onto the source's offset line,
/// keeping the distance and side the destination start currently has.
///
/// Up to two batches are committed: one for vertex insertion or removal and
/// one moving every destination vertex. Geometry is validated before either
/// is submitted.
#[derive(Debug)]
pub struct MakeParallel {
    selection: Vec<VertexId>,
    config: MakeParallelConfig,
}

impl MakeParallel {
    #[must_use]
    pub fn new(selection: Vec<VertexId>) -> Self {
        Self {
            selection,
            config: MakeParallelConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MakeParallelConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether the action should be offered for `selected` vertices.
    #[must_use]
    pub fn is_enabled(selected: usize) -> bool {
        Selection::is_actionable(selected)
    }

    /// Runs the operation and reports any failure to `notices` instead of
    /// returning it.
    pub fn invoke<S, N>(&self, sink: &mut S, notices: &mut N) -> Option<MakeParallelReport>
    where
        S: EditSink,
        N: NotificationSink,
    {
        match self.execute(sink) {
            Ok(report) => Some(report),
            Err(err) => {
                info!(%err, "make parallel aborted");
                notices.notify(Notice::from(&err));
                None
            }
        }
    }

    /// Runs the operation.
    ///
    /// # Errors
    ///
    /// - `SelectionError` if the selection is not two pairs on two chains
    /// - `OperationError` for a reversed or unsupported chain, a segment
    ///   shorter than 3 vertices, or a protected vertex in the way
    /// - `GeometryError` if the source has a zero-length edge or non-finite
    ///   coordinates
    /// - `TopologyError` if the host rejects an edit
    pub fn execute<S: EditSink>(&self, sink: &mut S) -> Result<MakeParallelReport> {
        let resolved = Selection::new(self.selection.clone()).resolve(sink.store())?;
        let source = self.extract(sink, resolved.source)?;
        let destination = self.extract(sink, resolved.destination)?;
        debug!(
            source = source.len(),
            destination = destination.len(),
            "segments extracted"
        );

        ensure_len(&source, SegmentRole::Source)?;
        ensure_len(&destination, SegmentRole::Destination)?;

        let source_points = sink.store().points(source.vertices())?;
        let destination_points = sink.store().points(destination.vertices())?;
        let distance = OffsetDistance::new(&source_points, &destination_points).execute()?;
        let targets = ParallelOffset2D::new(source_points, distance)
            .with_tolerance(self.config.parallel_tolerance)
            .execute()?;

        let matched = MatchVertexCount::new(&source, &destination).execute(sink)?;
        debug_assert_eq!(matched.segment.len(), targets.len());

        let mut batch = EditBatch::new(MOVE_LABEL);
        for (&vertex, &to) in matched.segment.vertices().iter().zip(&targets) {
            let from = sink.store().point(vertex)?;
            batch.push(Edit::MoveVertex { vertex, from, to });
        }
        let moved = batch.len();
        sink.submit(batch)?;

        info!(
            distance,
            inserted = matched.inserted,
            removed = matched.removed,
            moved,
            "made segments parallel"
        );
        Ok(MakeParallelReport {
            distance,
            inserted: matched.inserted,
            removed: matched.removed,
            moved,
        })
    }

    fn extract<S: EditSink>(&self, sink: &S, bounds: SpanBounds) -> Result<Segment> {
        ExtractSegment::new(bounds.chain, bounds.start, bounds.end)
            .with_policy(self.config.closed_chains)
            .execute(sink.store())
    }
}

fn ensure_len(segment: &Segment, role: SegmentRole) -> Result<()> {
    if segment.len() < MIN_SEGMENT_LEN {
        return Err(OperationError::SegmentTooShort {
            role,
            len: segment.len(),
        }
        .into());
    }
    Ok(())
}
