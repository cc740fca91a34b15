//! Curve flattening.
//!
//! Quadratic and cubic curves are evaluated with their Bernstein
//! polynomials at uniform parameter steps; ellipses are sampled at uniform
//! angle steps over the normalized sweep.

use crate::action::EllipseArc;
use std::f64::consts::TAU;
use toolmotion_core::{normalize_sweep, same_float, Point};

/// Quadratic Bernstein polynomial `(1-t)²p0 + 2(1-t)t·p1 + t²p2`.
pub fn quadratic(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let k = 1.0 - t;
    k * k * p0 + 2.0 * k * t * p1 + t * t * p2
}

/// Cubic Bernstein polynomial `(1-t)³p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³p3`.
pub fn cubic(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let k = 1.0 - t;
    k * k * k * p0 + 3.0 * k * k * t * p1 + 3.0 * k * t * t * p2 + t * t * t * p3
}

pub fn quadratic_point(t: f64, p0: Point, p1: Point, p2: Point) -> Point {
    Point::xy(quadratic(t, p0.x, p1.x, p2.x), quadratic(t, p0.y, p1.y, p2.y))
}

pub fn cubic_point(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    Point::xy(
        cubic(t, p0.x, p1.x, p2.x, p3.x),
        cubic(t, p0.y, p1.y, p2.y, p3.y),
    )
}

/// Angle of sample `t` (in `[0, 1]`) along the arc.
///
/// Clockwise arcs walk back from the end angle over the complementary
/// sweep. A clockwise full turn collapses to a zero sweep first, since
/// `sin`/`cos` cannot tell the two seam angles apart.
pub fn ellipse_angle(arc: &EllipseArc, t: f64) -> f64 {
    let mut sweep = normalize_sweep(arc.start_angle, arc.end_angle);
    if arc.clockwise {
        if same_float(sweep, TAU) {
            sweep = 0.0;
        }
        arc.end_angle + (1.0 - t) * (TAU - sweep)
    } else {
        arc.start_angle + t * sweep
    }
}

/// Appends `divisions + 1` samples of the arc, from its start to its end.
pub fn sample_ellipse(arc: &EllipseArc, divisions: usize, out: &mut Vec<Point>) {
    let divisions = divisions.max(1);
    out.extend((0..=divisions).map(|j| {
        let t = j as f64 / divisions as f64;
        arc.point_at_angle(ellipse_angle(arc, t))
    }));
}

/// Sum of distances between consecutive points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn circle(start: f64, end: f64, clockwise: bool) -> EllipseArc {
        EllipseArc {
            x: 0.0,
            y: 0.0,
            radius_x: 1.0,
            radius_y: 1.0,
            start_angle: start,
            end_angle: end,
            clockwise,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    #[test]
    fn test_bernstein_endpoints() {
        assert_eq!(quadratic(0.0, 1.0, 5.0, 9.0), 1.0);
        assert_eq!(quadratic(1.0, 1.0, 5.0, 9.0), 9.0);
        assert_eq!(cubic(0.0, 1.0, 5.0, 7.0, 9.0), 1.0);
        assert_eq!(cubic(1.0, 1.0, 5.0, 7.0, 9.0), 9.0);
    }

    #[test]
    fn test_bernstein_midpoints() {
        // Collinear, evenly spaced control points give a linear parameterization
        assert_eq!(quadratic(0.5, 0.0, 5.0, 10.0), 5.0);
        assert!((cubic(0.5, 0.0, 1.0, 2.0, 3.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_counterclockwise_half_circle() {
        let mut pts = Vec::new();
        sample_ellipse(&circle(0.0, PI, false), 4, &mut pts);
        assert_eq!(pts.len(), 5);
        assert!(pts[0].approx_eq(&Point::xy(1.0, 0.0)));
        assert!(pts[2].approx_eq(&Point::xy(0.0, 1.0)));
        assert!(pts[4].approx_eq(&Point::xy(-1.0, 0.0)));
    }

    #[test]
    fn test_clockwise_half_circle_goes_through_negative_y() {
        let mut pts = Vec::new();
        sample_ellipse(&circle(0.0, PI, true), 4, &mut pts);
        assert!(pts[0].approx_eq(&Point::xy(1.0, 0.0)));
        assert!(pts[2].approx_eq(&Point::xy(0.0, -1.0)));
        assert!(pts[4].approx_eq(&Point::xy(-1.0, 0.0)));
    }

    #[test]
    fn test_negative_full_turn_is_full_circle() {
        let mut negative = Vec::new();
        let mut positive = Vec::new();
        sample_ellipse(&circle(0.0, -TAU, false), 8, &mut negative);
        sample_ellipse(&circle(0.0, TAU, false), 8, &mut positive);
        assert_eq!(negative.len(), positive.len());
        for (a, b) in negative.iter().zip(positive.iter()) {
            assert!(a.approx_eq(b));
        }
        assert!(negative[4].approx_eq(&Point::xy(-1.0, 0.0)));
    }

    #[test]
    fn test_clockwise_full_circle_has_no_repeated_samples() {
        let mut pts = Vec::new();
        sample_ellipse(&circle(0.0, TAU, true), 8, &mut pts);
        assert_eq!(pts.len(), 9);
        for w in pts.windows(2) {
            assert!(!w[0].approx_eq(&w[1]));
        }
        assert!(pts[0].approx_eq(&pts[8]));
        assert!(pts[4].approx_eq(&Point::xy(-1.0, 0.0)));
    }

    #[test]
    fn test_polyline_length() {
        let pts = [Point::xy(0.0, 0.0), Point::xy(3.0, 4.0), Point::xy(3.0, 0.0)];
        assert_eq!(polyline_length(&pts), 9.0);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }
}
