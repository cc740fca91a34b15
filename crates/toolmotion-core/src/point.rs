//! Point value type and the vector helpers shared by geometry and motion.
//!
//! Coordinates are compared with a fixed tolerance rather than exact float
//! equality, so values produced by curve math and values snapped to the
//! driver grid (6 decimals) compare equal when they land on the same grid
//! value.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Number of decimal places every coordinate is snapped to before it reaches a driver.
pub const COORD_DECIMALS: i32 = 6;

/// Tolerance used by [`same_float`]; half of one snapping step.
pub const FLOAT_EPSILON: f64 = 5e-7;

/// A 3D coordinate. Drawings are 2D, so `z` is zero unless a depth is involved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// Creates a point from all three components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a point on the drawing plane (`z = 0`).
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }

    /// Planar distance, ignoring `z`.
    pub fn distance_xy(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tolerant equality over all three axes.
    pub fn approx_eq(&self, other: &Point) -> bool {
        same_pos(self, other)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// True when `a` and `b` differ by less than [`FLOAT_EPSILON`].
pub fn same_float(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_EPSILON
}

/// Componentwise [`same_float`] over x, y and z.
pub fn same_pos(a: &Point, b: &Point) -> bool {
    same_float(a.x, b.x) && same_float(a.y, b.y) && same_float(a.z, b.z)
}

/// Componentwise [`same_float`] over x and y.
pub fn same_xy(a: &Point, b: &Point) -> bool {
    same_float(a.x, b.x) && same_float(a.y, b.y)
}

/// Rounds a coordinate to [`COORD_DECIMALS`] places.
pub fn round_coord(value: f64) -> f64 {
    let scale = 10f64.powi(COORD_DECIMALS);
    (value * scale).round() / scale
}

/// Start and end points of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPoints {
    pub start: Point,
    pub end: Point,
}

/// Converts a center/angle arc description into its start and end points.
pub fn arc_to_points(center: &Point, start_angle: f64, end_angle: f64, radius: f64) -> ArcPoints {
    ArcPoints {
        start: Point::new(
            center.x + radius * start_angle.cos(),
            center.y + radius * start_angle.sin(),
            center.z,
        ),
        end: Point::new(
            center.x + radius * end_angle.cos(),
            center.y + radius * end_angle.sin(),
            center.z,
        ),
    }
}

/// Normalizes the sweep from `start_angle` to `end_angle` into `[0, 2π]`.
///
/// A sweep of exactly minus one turn is a full circle, not an empty arc.
/// Otherwise a negative sweep gains one turn and a sweep above one turn
/// loses one.
pub fn normalize_sweep(start_angle: f64, end_angle: f64) -> f64 {
    let mut sweep = end_angle - start_angle;
    if same_float(sweep, -TAU) {
        sweep = TAU;
    }
    if sweep < 0.0 {
        sweep += TAU;
    }
    if sweep > TAU {
        sweep -= TAU;
    }
    sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_distance_3_4_5() {
        let a = Point::xy(0.0, 0.0);
        let b = Point::xy(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(a.distance_xy(&b), 5.0);
    }

    #[test]
    fn test_distance_includes_depth() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(0.0, 0.0, -2.0);
        assert_eq!(a.distance_to(&b), 2.0);
        assert_eq!(a.distance_xy(&b), 0.0);
    }

    #[test]
    fn test_same_float_tolerance() {
        assert!(same_float(1.0, 1.0 + 1e-9));
        assert!(!same_float(1.0, 1.000001));
    }

    #[test]
    fn test_same_pos_and_xy() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(1.0, 2.0, 0.0);
        assert!(!same_pos(&a, &b));
        assert!(same_xy(&a, &b));
        assert!(a.approx_eq(&Point::new(1.0 + 1e-8, 2.0, 3.0)));
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(1.23456789), 1.234568);
        assert_eq!(round_coord(10.0 * PI.sin()), 0.0);
        assert_eq!(round_coord(-0.0000004), 0.0);
    }

    #[test]
    fn test_arc_to_points_half_circle() {
        let pts = arc_to_points(&Point::xy(10.0, 10.0), 0.0, PI, 10.0);
        assert!(pts.start.approx_eq(&Point::xy(20.0, 10.0)));
        assert!(pts.end.approx_eq(&Point::xy(0.0, 10.0)));
    }

    #[test]
    fn test_normalize_sweep() {
        assert_eq!(normalize_sweep(0.0, PI), PI);
        assert_eq!(normalize_sweep(0.0, -TAU), TAU);
        assert!(same_float(normalize_sweep(PI, 0.0), PI));
        assert!(same_float(normalize_sweep(0.0, 3.0 * PI), PI));
        assert_eq!(normalize_sweep(0.0, TAU), TAU);
    }

    #[test]
    fn test_point_serde_defaults_z() {
        let p: Point = serde_json::from_str(r#"{"x": 1.5, "y": -2.0}"#).unwrap();
        assert_eq!(p, Point::xy(1.5, -2.0));
    }

    proptest! {
        #[test]
        fn prop_snapped_values_compare_by_grid(a in -1.0e4f64..1.0e4, b in -1.0e4f64..1.0e4) {
            let ra = round_coord(a);
            let rb = round_coord(b);
            prop_assert_eq!(same_float(ra, rb), ra == rb);
        }

        #[test]
        fn prop_round_coord_is_idempotent(v in -1.0e5f64..1.0e5) {
            let once = round_coord(v);
            prop_assert_eq!(round_coord(once), once);
        }
    }
}
