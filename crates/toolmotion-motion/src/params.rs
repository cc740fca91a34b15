//! Partial coordinate sets handed to drivers.

use std::fmt;
use toolmotion_core::{round_coord, Point};

/// Partial parameter set of a motion command.
///
/// Absent axes keep their current value. `i`/`j` are only meaningful for
/// arcs, where they locate the arc center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Params {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub i: Option<f64>,
    pub j: Option<f64>,
}

impl Params {
    /// Planar move.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::xy(x, y)
        }
    }

    /// Depth-only move.
    pub fn depth(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    /// Arc to `(x, y)` with center parameters `(i, j)`.
    pub fn arc(x: f64, y: f64, i: f64, j: f64) -> Self {
        Self {
            i: Some(i),
            j: Some(j),
            ..Self::xy(x, y)
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Snaps every present field to the 6-decimal driver grid.
    pub fn snap(&mut self) {
        for field in [
            &mut self.x,
            &mut self.y,
            &mut self.z,
            &mut self.i,
            &mut self.j,
        ] {
            if let Some(v) = field.as_mut() {
                *v = round_coord(*v);
            }
        }
    }

    /// The point reached from `from` once these parameters are applied.
    pub fn resolve(&self, from: &Point) -> Point {
        Point::new(
            self.x.unwrap_or(from.x),
            self.y.unwrap_or(from.y),
            self.z.unwrap_or(from.z),
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ('X', self.x),
            ('Y', self.y),
            ('Z', self.z),
            ('I', self.i),
            ('J', self.j),
        ];
        let mut first = true;
        for (axis, value) in fields {
            if let Some(v) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}{}", axis, v)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_only_touches_present_fields() {
        let mut p = Params {
            x: Some(1.000_000_4),
            z: Some(-2.123_456_789),
            ..Params::default()
        };
        p.snap();
        assert_eq!(p.x, Some(1.0));
        assert_eq!(p.y, None);
        assert_eq!(p.z, Some(-2.123457));
    }

    #[test]
    fn test_resolve_falls_back_to_current() {
        let from = Point::new(1.0, 2.0, 3.0);
        assert_eq!(Params::depth(-1.0).resolve(&from), Point::new(1.0, 2.0, -1.0));
        assert_eq!(Params::default().resolve(&from), from);
    }

    #[test]
    fn test_display() {
        assert_eq!(Params::arc(0.0, 10.0, -10.0, 0.0).to_string(), "X0 Y10 I-10 J0");
        assert_eq!(Params::depth(1.5).to_string(), "Z1.5");
        assert_eq!(Params::default().to_string(), "");
    }
}
