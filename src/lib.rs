//! # toolmotion
//!
//! Translates 2D vector drawings into ordered rapid, linear and arc
//! tool-motion commands for CNC drivers.
//!
//! ## Architecture
//!
//! toolmotion is organized as a workspace with multiple crates:
//!
//! 1. **toolmotion-core** - Points, tolerant comparison, capabilities, driver errors
//! 2. **toolmotion-geometry** - Path/SubPath/Action model and curve flattening
//! 3. **toolmotion-settings** - Machine context and motion policy, JSON/TOML files
//! 4. **toolmotion-motion** - Motion state machine, driver trait, filters
//! 5. **toolmotion** - This facade, re-exporting the above plus logging setup
//!
//! ## Usage
//!
//! ```rust
//! use toolmotion::{Command, MachineContext, Motion, Params, RecordingDriver, SubPath};
//!
//! let mut sub = SubPath::new();
//! sub.move_to(0.0, 0.0);
//! sub.line_to(10.0, 0.0);
//! sub.move_to(10.0, 10.0);
//!
//! let context = MachineContext { depth: 1.0, ..Default::default() };
//! let mut driver = RecordingDriver::new();
//! Motion::new(&mut driver, context).follow_path(&sub).unwrap();
//!
//! assert_eq!(driver.commands()[0], Command::Linear(Params::depth(1.0)));
//! assert_eq!(driver.commands().len(), 4);
//! ```

use anyhow::Context;
use std::path::Path as FsPath;

pub use toolmotion_core::{
    arc_to_points, distance, normalize_sweep, round_coord, same_float, same_pos, same_xy,
    ArcPoints, Capability, Coolant, DriverError, DriverResult, Point, COORD_DECIMALS,
    FLOAT_EPSILON,
};

pub use toolmotion_geometry::{
    Action, ActionKind, Contours, EllipseArc, GeometryError, GeometryResult, IntPoint,
    NearestPoint, Path, SubPath, DEFAULT_DIVISIONS,
};

pub use toolmotion_settings::{
    ArcCenterMode, ArcDirection, Config, DepthStrategy, MachineContext, MotionPolicy,
    SettingsError, SettingsResult,
};

pub use toolmotion_motion::{
    Command, Driver, FilterState, Motion, MotionError, MotionFilter, MotionResult, Params,
    RecordingDriver, CURVE_DIVISIONS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::debug!("toolmotion {} ({}) logging initialized", VERSION, BUILD_DATE);
    Ok(())
}

/// Initialize logging as one JSON object per line, for log collectors.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(())
}

/// Load a session configuration, attaching the file name to any error.
pub fn load_config(path: impl AsRef<FsPath>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    Config::load_from_file(path)
        .with_context(|| format!("failed to load motion config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(BUILD_DATE.len(), "2024-01-01".len());
    }

    #[test]
    fn test_load_config_reads_toml() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[motion]\ndepth_strategy = \"helix\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.motion.depth_strategy, DepthStrategy::Helix);
    }

    #[test]
    fn test_load_config_error_names_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, "{{ \"machine\": {{ \"feed\": -5.0 }} }}").unwrap();

        let err = load_config(file.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to load motion config"));
        assert!(message.contains("machine.feed"));
    }

    #[test]
    fn test_init_logging_twice_fails() {
        // Only the first installation can succeed within one test binary
        let first = init_logging();
        let second = init_json_logging();
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
