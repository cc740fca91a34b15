//! toolmotion settings crate
//!
//! Handles the machine context (surface, retract policy, depth, ancillary
//! state) and the motion policy, plus their persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{ArcCenterMode, ArcDirection, Config, DepthStrategy, MachineContext, MotionPolicy};
pub use error::{SettingsError, SettingsResult};
