use crate::error::{GeometryError, Result};

use super::{Point2, Vector2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Compass heading of the vector `from → to`, in radians within `(-π, π]`.
///
/// Measured clockwise from the +y axis ("north"), so `+y` is `0`, `+x` is
/// `π/2`. Returns `0` for coincident points.
#[must_use]
pub fn heading(from: &Point2, to: &Point2) -> f64 {
    let d = to - from;
    d.x.atan2(d.y)
}

/// Unit normal pointing to the left of the directed edge `a → b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroLengthEdge` (with the given `index`) if the
/// edge is shorter than [`TOLERANCE`].
pub fn left_normal(a: &Point2, b: &Point2, index: usize) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroLengthEdge { index }.into());
    }
    Ok(Vector2::new(-d.y / len, d.x / len))
}

/// Checks that both coordinates of `p` are finite.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` naming the offending point.
pub fn ensure_finite(p: &Point2) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(format!("({}, {})", p.x, p.y)).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ParallelError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn distance_3_4_5() {
        let d = distance(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert_abs_diff_eq!(d, 5.0, epsilon = TOL);
    }

    #[test]
    fn heading_compass_directions() {
        let o = Point2::origin();
        assert_abs_diff_eq!(heading(&o, &Point2::new(0.0, 1.0)), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(heading(&o, &Point2::new(1.0, 0.0)), FRAC_PI_2, epsilon = TOL);
        assert_abs_diff_eq!(heading(&o, &Point2::new(0.0, -1.0)), PI, epsilon = TOL);
        assert_abs_diff_eq!(heading(&o, &Point2::new(-1.0, 0.0)), -FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn left_normal_of_east_edge_points_north() {
        let n = left_normal(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0), 0).unwrap();
        assert_abs_diff_eq!(n, Vector2::new(0.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn left_normal_of_north_edge_points_west() {
        let n = left_normal(&Point2::new(10.0, 0.0), &Point2::new(10.0, 10.0), 1).unwrap();
        assert_abs_diff_eq!(n, Vector2::new(-1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn left_normal_zero_length_fails() {
        let p = Point2::new(2.0, 2.0);
        let err = left_normal(&p, &p, 4).unwrap_err();
        assert!(matches!(
            err,
            ParallelError::Geometry(GeometryError::ZeroLengthEdge { index: 4 })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(ensure_finite(&Point2::new(1.0, 2.0)).is_ok());
        assert!(ensure_finite(&Point2::new(f64::NAN, 2.0)).is_err());
        assert!(ensure_finite(&Point2::new(0.0, f64::INFINITY)).is_err());
    }
}
