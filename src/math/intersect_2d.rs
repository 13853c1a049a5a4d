use super::{Point2, Vector2, TOLERANCE};

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns `true` if the line through `a0, a1` is parallel to the line through
/// `b0, b1`.
///
/// Compares the sine of the angle between the two directions against
/// `tolerance`, so the test does not depend on segment length. A zero-length
/// direction is treated as parallel to everything.
#[must_use]
pub fn lines_parallel(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, tolerance: f64) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let scale = da.norm() * db.norm();
    if scale < TOLERANCE * TOLERANCE {
        return true;
    }
    (cross_2d(&da, &db) / scale).abs() < tolerance
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` unless the
/// sine of the angle between `d1` and `d2` is below [`TOLERANCE`]. The
/// threshold is relative to the direction lengths, so short edges meeting at
/// a clear angle still intersect.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let dp = p2 - p1;
    let t = cross_2d(&dp, d2) / cross;
    let u = cross_2d(&dp, d1) / cross;
    Some((t, u))
}

/// Intersection point of the infinite line through `a0, a1` with the infinite
/// line through `b0, b1`.
///
/// Returns `None` when [`lines_parallel`] holds for `tolerance`.
#[must_use]
pub fn line_line_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> Option<Point2> {
    if lines_parallel(a0, a1, b0, b1, tolerance) {
        return None;
    }
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = cross_2d(&da, &db);
    if cross.abs() < f64::MIN_POSITIVE {
        return None;
    }
    let t = cross_2d(&(b0 - a0), &db) / cross;
    Some(a0 + da * t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn perpendicular_lines_meet() {
        let hit = line_line_intersection(&p(0.0, 2.0), &p(10.0, 2.0), &p(8.0, 0.0), &p(8.0, 10.0), TOLERANCE)
            .unwrap();
        assert_abs_diff_eq!(hit, p(8.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn intersection_outside_both_segments() {
        // Infinite lines, not bounded segments.
        let hit =
            line_line_intersection(&p(0.0, 0.0), &p(1.0, 1.0), &p(10.0, 0.0), &p(9.0, 1.0), TOLERANCE)
                .unwrap();
        assert_abs_diff_eq!(hit, p(5.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        assert!(line_line_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(5.0, 1.0), TOLERANCE)
            .is_none());
    }

    #[test]
    fn short_perpendicular_lines_meet() {
        let hit = line_line_intersection(
            &p(0.0, 2e-7),
            &p(1e-6, 2e-7),
            &p(8e-7, 0.0),
            &p(8e-7, 1e-6),
            TOLERANCE,
        )
        .unwrap();
        assert_abs_diff_eq!(hit, p(8e-7, 2e-7), epsilon = 1e-18);

        let (t, _) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1e-6, 0.0),
            &p(5e-7, -1e-6),
            &Vector2::new(0.0, 1e-6),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn intersection_honours_caller_tolerance() {
        // About 0.57° apart: parallel at a coarse tolerance, not at a fine one.
        let (a0, a1, b0, b1) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.1));
        assert!(line_line_intersection(&a0, &a1, &b0, &b1, 1e-2).is_none());
        let hit = line_line_intersection(&a0, &a1, &b0, &b1, 1e-3).unwrap();
        assert_abs_diff_eq!(hit, p(-100.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn parallel_test_is_length_independent() {
        // Same tiny angle, very different lengths.
        let short = lines_parallel(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 0.0), &p(1.0, 1e-6), 1e-3);
        let long = lines_parallel(&p(0.0, 0.0), &p(1e6, 0.0), &p(0.0, 0.0), &p(1e6, 1.0), 1e-3);
        assert!(short);
        assert!(long);
    }

    #[test]
    fn antiparallel_counts_as_parallel() {
        assert!(lines_parallel(&p(0.0, 0.0), &p(1.0, 0.0), &p(5.0, 3.0), &p(-5.0, 3.0), 1e-9));
    }

    #[test]
    fn right_angle_is_not_parallel() {
        assert!(!lines_parallel(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 0.0), &p(0.0, 1.0), 1e-9));
    }

    #[test]
    fn parametric_values() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(2.0, 0.0),
            &p(1.0, -1.0),
            &Vector2::new(0.0, 4.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.25, epsilon = 1e-12);
    }
}
