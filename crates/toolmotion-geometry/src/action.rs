//! Path-construction steps.

use crate::error::{GeometryError, GeometryResult};
use crate::flatten;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use toolmotion_core::{same_float, Point};

/// Tag identifying the kind of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    MoveTo,
    LineTo,
    QuadraticCurveTo,
    BezierCurveTo,
    Ellipse,
}

impl ActionKind {
    /// Canvas method name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveTo => "moveTo",
            Self::LineTo => "lineTo",
            Self::QuadraticCurveTo => "quadraticCurveTo",
            Self::BezierCurveTo => "bezierCurveTo",
            Self::Ellipse => "ellipse",
        }
    }

    /// Number of raw arguments the kind takes (the ellipse offsets are optional).
    pub fn arity(&self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 2,
            Self::QuadraticCurveTo => 4,
            Self::BezierCurveTo => 6,
            Self::Ellipse => 7,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moveTo" => Ok(Self::MoveTo),
            "lineTo" => Ok(Self::LineTo),
            "quadraticCurveTo" => Ok(Self::QuadraticCurveTo),
            "bezierCurveTo" => Ok(Self::BezierCurveTo),
            "ellipse" => Ok(Self::Ellipse),
            other => Err(GeometryError::UnsupportedAction(other.to_string())),
        }
    }
}

/// Elliptical arc given in center/angle form. Plain circular arcs have equal radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseArc {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[serde(default)]
    pub clockwise: bool,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

impl EllipseArc {
    /// Center after the offset is applied.
    pub fn center(&self) -> Point {
        Point::xy(self.x + self.offset_x, self.y + self.offset_y)
    }

    /// True when both radii match, i.e. the arc is circular.
    pub fn is_circular(&self) -> bool {
        same_float(self.radius_x, self.radius_y)
    }

    /// Point on the ellipse at `angle`.
    pub fn point_at_angle(&self, angle: f64) -> Point {
        let c = self.center();
        Point::xy(
            c.x + self.radius_x * angle.cos(),
            c.y + self.radius_y * angle.sin(),
        )
    }

    /// Where the arc begins.
    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    /// Where the arc ends.
    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.end_angle)
    }
}

/// One path-construction step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadraticCurveTo {
        cpx: f64,
        cpy: f64,
        x: f64,
        y: f64,
    },
    BezierCurveTo {
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    },
    Ellipse(EllipseArc),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::MoveTo { .. } => ActionKind::MoveTo,
            Action::LineTo { .. } => ActionKind::LineTo,
            Action::QuadraticCurveTo { .. } => ActionKind::QuadraticCurveTo,
            Action::BezierCurveTo { .. } => ActionKind::BezierCurveTo,
            Action::Ellipse(_) => ActionKind::Ellipse,
        }
    }

    /// The point the tool stands on once this action is done.
    pub fn endpoint(&self) -> Point {
        match *self {
            Action::MoveTo { x, y }
            | Action::LineTo { x, y }
            | Action::QuadraticCurveTo { x, y, .. }
            | Action::BezierCurveTo { x, y, .. } => Point::xy(x, y),
            Action::Ellipse(ref arc) => arc.end_point(),
        }
    }

    /// Appends the flattened samples of this action, starting from `from`.
    ///
    /// Moves and lines contribute their literal target, curves contribute
    /// `divisions` samples, ellipses contribute `divisions + 1` samples.
    pub fn flatten_into(&self, from: Point, divisions: usize, out: &mut Vec<Point>) {
        let divisions = divisions.max(1);
        match *self {
            Action::MoveTo { x, y } | Action::LineTo { x, y } => out.push(Point::xy(x, y)),
            Action::QuadraticCurveTo { cpx, cpy, x, y } => {
                let control = Point::xy(cpx, cpy);
                let to = Point::xy(x, y);
                out.extend(
                    (1..=divisions)
                        .map(|j| flatten::quadratic_point(j as f64 / divisions as f64, from, control, to)),
                );
            }
            Action::BezierCurveTo {
                cp1x,
                cp1y,
                cp2x,
                cp2y,
                x,
                y,
            } => {
                let c1 = Point::xy(cp1x, cp1y);
                let c2 = Point::xy(cp2x, cp2y);
                let to = Point::xy(x, y);
                out.extend(
                    (1..=divisions)
                        .map(|j| flatten::cubic_point(j as f64 / divisions as f64, from, c1, c2, to)),
                );
            }
            Action::Ellipse(ref arc) => flatten::sample_ellipse(arc, divisions, out),
        }
    }

    /// Raw argument list, in canvas call order.
    pub fn args(&self) -> Vec<f64> {
        match *self {
            Action::MoveTo { x, y } | Action::LineTo { x, y } => vec![x, y],
            Action::QuadraticCurveTo { cpx, cpy, x, y } => vec![cpx, cpy, x, y],
            Action::BezierCurveTo {
                cp1x,
                cp1y,
                cp2x,
                cp2y,
                x,
                y,
            } => vec![cp1x, cp1y, cp2x, cp2y, x, y],
            Action::Ellipse(ref arc) => vec![
                arc.x,
                arc.y,
                arc.radius_x,
                arc.radius_y,
                arc.start_angle,
                arc.end_angle,
                if arc.clockwise { 1.0 } else { 0.0 },
                arc.offset_x,
                arc.offset_y,
            ],
        }
    }

    /// Builds an action from a raw argument list.
    ///
    /// Ellipses take seven arguments plus an optional offset pair; the
    /// seventh argument is the clockwise flag (non-zero means clockwise).
    pub fn from_args(kind: ActionKind, args: &[f64]) -> GeometryResult<Action> {
        let expected = kind.arity();
        let arity_ok = match kind {
            ActionKind::Ellipse => args.len() == 7 || args.len() == 9,
            _ => args.len() == expected,
        };
        if !arity_ok {
            return Err(GeometryError::InvalidArity {
                kind,
                expected,
                actual: args.len(),
            });
        }

        let action = match kind {
            ActionKind::MoveTo => Action::MoveTo {
                x: args[0],
                y: args[1],
            },
            ActionKind::LineTo => Action::LineTo {
                x: args[0],
                y: args[1],
            },
            ActionKind::QuadraticCurveTo => Action::QuadraticCurveTo {
                cpx: args[0],
                cpy: args[1],
                x: args[2],
                y: args[3],
            },
            ActionKind::BezierCurveTo => Action::BezierCurveTo {
                cp1x: args[0],
                cp1y: args[1],
                cp2x: args[2],
                cp2y: args[3],
                x: args[4],
                y: args[5],
            },
            ActionKind::Ellipse => Action::Ellipse(EllipseArc {
                x: args[0],
                y: args[1],
                radius_x: args[2],
                radius_y: args[3],
                start_angle: args[4],
                end_angle: args[5],
                clockwise: args[6] != 0.0,
                offset_x: args.get(7).copied().unwrap_or(0.0),
                offset_y: args.get(8).copied().unwrap_or(0.0),
            }),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in [
            ActionKind::MoveTo,
            ActionKind::LineTo,
            ActionKind::QuadraticCurveTo,
            ActionKind::BezierCurveTo,
            ActionKind::Ellipse,
        ] {
            assert_eq!(kind.name().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let err = "arcTo".parse::<ActionKind>().unwrap_err();
        assert!(matches!(err, GeometryError::UnsupportedAction(ref name) if name == "arcTo"));
    }

    #[test]
    fn test_from_args_checks_arity() {
        let err = Action::from_args(ActionKind::BezierCurveTo, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidArity {
                expected: 6,
                actual: 2,
                ..
            }
        ));
        assert!(Action::from_args(ActionKind::Ellipse, &[0.0; 8]).is_err());
    }

    #[test]
    fn test_from_args_ellipse_with_offsets() {
        let action =
            Action::from_args(ActionKind::Ellipse, &[1.0, 2.0, 3.0, 3.0, 0.0, PI, 1.0, 5.0, 6.0])
                .unwrap();
        match action {
            Action::Ellipse(arc) => {
                assert!(arc.clockwise);
                assert!(arc.is_circular());
                assert_eq!(arc.center(), Point::xy(6.0, 8.0));
            }
            other => panic!("expected ellipse, got {:?}", other),
        }
        assert_eq!(action.args().len(), 9);
    }

    #[test]
    fn test_endpoints() {
        let line = Action::LineTo { x: 3.0, y: 4.0 };
        assert_eq!(line.endpoint(), Point::xy(3.0, 4.0));

        let arc = Action::from_args(ActionKind::Ellipse, &[10.0, 10.0, 10.0, 10.0, 0.0, PI, 0.0])
            .unwrap();
        assert!(arc.endpoint().approx_eq(&Point::xy(0.0, 10.0)));
    }

    #[test]
    fn test_action_serde_tagged() {
        let json = serde_json::to_string(&Action::LineTo { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"action":"lineTo","x":1.0,"y":2.0}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::LineTo { x: 1.0, y: 2.0 });
    }
}
