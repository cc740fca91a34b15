//! # toolmotion core
//!
//! Fundamental value types shared by every toolmotion crate:
//! - [`Point`] and the tolerant comparison/snapping helpers
//! - [`Capability`] and [`Coolant`] describing what a driver can do
//! - [`DriverError`], the failure type of driver commands

pub mod error;
pub mod machine;
pub mod point;

pub use error::{DriverError, DriverResult};
pub use machine::{Capability, Coolant};
pub use point::{
    arc_to_points, distance, normalize_sweep, round_coord, same_float, same_pos, same_xy,
    ArcPoints, Point, COORD_DECIMALS, FLOAT_EPSILON,
};
