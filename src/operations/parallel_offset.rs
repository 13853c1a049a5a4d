use tracing::debug;

use crate::error::{GeometryError, OperationError, Result, SegmentRole};
use crate::math::intersect_2d::line_line_intersection;
use crate::math::vector_2d::{ensure_finite, left_normal};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Computes the vertex positions of a copy of an open polyline shifted
/// sideways by a signed distance.
///
/// # Algorithm
///
/// 1. Compute the unit left normal of every edge
/// 2. Offset each edge along its normal by `distance`
/// 3. Each interior vertex lands on the intersection of its two adjacent
///    offset lines. If those lines are parallel the shared offset point is
///    used directly
/// 4. The two end vertices are offset along their single adjacent edge's
///    normal and never intersected
///
/// The result has exactly one point per input point. Closed input is treated
/// as open: the last normal is not wrapped around to the first edge.
///
/// # Sign Convention
///
/// - Positive distance: left offset (relative to walking direction)
/// - Negative distance: right offset
#[derive(Debug)]
pub struct ParallelOffset2D {
    points: Vec<Point2>,
    distance: f64,
    tolerance: f64,
}

impl ParallelOffset2D {
    /// Creates a new parallel offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self {
            points,
            distance,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the sine threshold below which two offset lines count as parallel.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `OperationError::SegmentTooShort` if fewer than 3 points are given
    /// - `GeometryError::ZeroLengthEdge` if two consecutive points coincide
    /// - `GeometryError::NonFinite` if an input or output coordinate is not
    ///   finite
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let n = self.points.len();
        if n < 3 {
            return Err(OperationError::SegmentTooShort {
                role: SegmentRole::Source,
                len: n,
            }
            .into());
        }
        if !self.distance.is_finite() {
            return Err(GeometryError::NonFinite(format!("distance {}", self.distance)).into());
        }
        for p in &self.points {
            ensure_finite(p)?;
        }

        let pts = &self.points;
        let d = self.distance;

        let normals = pts
            .windows(2)
            .enumerate()
            .map(|(i, w)| left_normal(&w[0], &w[1], i))
            .collect::<Result<Vec<Vector2>>>()?;

        let mut out = Vec::with_capacity(n);
        out.push(pts[0] + normals[0] * d);

        let mut prev_a = pts[0] + normals[0] * d;
        let mut prev_b = pts[1] + normals[0] * d;
        for i in 1..n - 1 {
            let a = pts[i] + normals[i] * d;
            let b = pts[i + 1] + normals[i] * d;
            let corner = line_line_intersection(&a, &b, &prev_a, &prev_b, self.tolerance)
                .unwrap_or_else(|| {
                    debug!(vertex = i, "adjacent offset lines are parallel");
                    a
                });
            ensure_finite(&corner)?;
            out.push(corner);
            prev_a = a;
            prev_b = b;
        }

        out.push(pts[n - 1] + normals[n - 2] * d);
        Ok(out)
    }
}
