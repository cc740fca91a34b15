//! # toolmotion geometry
//!
//! The drawing model consumed by the motion state machine.
//!
//! ```text
//! Path
//!   └── SubPath (one contour, flattening cache)
//!         └── Action (MoveTo, LineTo, QuadraticCurveTo, BezierCurveTo, Ellipse)
//! ```
//!
//! Flattening evaluates quadratic and cubic curves through their Bernstein
//! polynomials at uniform parameter steps and samples ellipses at uniform
//! angle steps; lengths are measured on the flattened polyline.
//!
//! ## Usage
//!
//! ```rust
//! use toolmotion_geometry::SubPath;
//!
//! let mut sub = SubPath::new();
//! sub.move_to(0.0, 0.0);
//! sub.line_to(3.0, 4.0);
//! assert_eq!(sub.get_length().unwrap(), 5.0);
//! ```

pub mod action;
pub mod error;
pub mod flatten;
pub mod path;
pub mod subpath;

pub use action::{Action, ActionKind, EllipseArc};
pub use error::{GeometryError, GeometryResult};
pub use path::{Contours, Path};
pub use subpath::{IntPoint, NearestPoint, SubPath, DEFAULT_DIVISIONS};
