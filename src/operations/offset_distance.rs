use std::f64::consts::TAU;

use tracing::{info, warn};

use crate::error::{OperationError, Result, SegmentRole};
use crate::math::vector_2d::{distance, heading};
use crate::math::{Point2, TOLERANCE};

/// Resolves the signed offset distance implied by where the destination
/// currently sits relative to the source.
///
/// The magnitude is the distance between the two first vertices. The sign
/// follows the side of the source's first edge the destination start lies
/// on: positive on the left, negative on the right, matching the left-normal
/// convention of [`ParallelOffset2D`](super::ParallelOffset2D).
///
/// The side is found by comparing the clockwise and counter-clockwise turn
/// from the first edge's heading to the heading towards the destination
/// start. An exact tie (destination collinear with the first edge) resolves
/// to positive.
#[derive(Debug)]
pub struct OffsetDistance<'a> {
    source: &'a [Point2],
    destination: &'a [Point2],
}

impl<'a> OffsetDistance<'a> {
    #[must_use]
    pub fn new(source: &'a [Point2], destination: &'a [Point2]) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Executes the resolution and returns the signed distance.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::SegmentTooShort` if the source has fewer than
    /// two points or the destination is empty.
    pub fn execute(&self) -> Result<f64> {
        let (Some(s0), Some(s1)) = (self.source.first(), self.source.get(1)) else {
            return Err(OperationError::SegmentTooShort {
                role: SegmentRole::Source,
                len: self.source.len(),
            }
            .into());
        };
        let Some(t0) = self.destination.first() else {
            return Err(OperationError::SegmentTooShort {
                role: SegmentRole::Destination,
                len: 0,
            }
            .into());
        };

        let magnitude = distance(s0, t0);
        if magnitude < TOLERANCE {
            warn!("destination starts on the source, offset distance is zero");
        }

        let edge_heading = heading(s0, s1);
        let target_heading = heading(s0, t0);
        let clockwise = (target_heading - edge_heading).rem_euclid(TAU);
        let counter_clockwise = (edge_heading - target_heading).rem_euclid(TAU);

        let factor = if clockwise < counter_clockwise {
            -1.0
        } else {
            1.0
        };
        let d = factor * magnitude;
        info!(distance = d, "resolved offset distance");
        Ok(d)
    }
}
