//! Configuration for a drawing-to-motion session.
//!
//! Configuration is organized into two sections:
//! - Machine context (stock surface, retract policy, depth, ancillary state)
//! - Motion policy (depth strategy, native arc usage and conventions)
//!
//! Both serialize to JSON or TOML, chosen by file extension.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use toolmotion_core::Coolant;
use tracing::debug;

/// Stock surface, retract policy, cut depth and the ancillary machine state
/// the session asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineContext {
    /// Z of the stock surface
    pub top: f64,
    /// Explicit clearance height; overrides `top - surface_tolerance` when set
    pub above_top: Option<f64>,
    /// Distance subtracted from `top` to get the retract height
    pub surface_tolerance: f64,
    /// Working depth the tool plunges to
    pub depth: f64,
    /// Tool number for automatic tool change
    pub tool: Option<u32>,
    /// Spindle speed
    pub speed: Option<f64>,
    /// Feed rate
    pub feed: Option<f64>,
    /// Coolant state
    pub coolant: Option<Coolant>,
}

impl Default for MachineContext {
    fn default() -> Self {
        Self {
            top: 0.0,
            above_top: None,
            surface_tolerance: 0.0,
            depth: 0.0,
            tool: None,
            speed: None,
            feed: None,
            coolant: None,
        }
    }
}

impl MachineContext {
    /// Height the tool retracts to before travelling between cuts.
    pub fn retract_height(&self) -> f64 {
        self.above_top
            .unwrap_or(self.top - self.surface_tolerance)
    }

    /// Validate machine context values
    pub fn validate(&self) -> SettingsResult<()> {
        let finite = [
            ("machine.top", self.top),
            ("machine.surface_tolerance", self.surface_tolerance),
            ("machine.depth", self.depth),
        ];
        for (key, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::invalid(key, "must be finite"));
            }
        }

        if let Some(above) = self.above_top {
            if !above.is_finite() {
                return Err(SettingsError::invalid("machine.above_top", "must be finite"));
            }
        }

        if self.surface_tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "machine.surface_tolerance",
                "must be >= 0",
            ));
        }

        if let Some(speed) = self.speed {
            if !speed.is_finite() || speed < 0.0 {
                return Err(SettingsError::invalid("machine.speed", "must be >= 0"));
            }
        }

        if let Some(feed) = self.feed {
            if !feed.is_finite() || feed <= 0.0 {
                return Err(SettingsError::invalid("machine.feed", "must be > 0"));
            }
        }

        Ok(())
    }
}

/// How depth is reached along a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthStrategy {
    /// Plunge straight to the target depth before every cutting action
    Plunge,
    /// Ramp depth along the contour in proportion to the length travelled
    Helix,
}

impl Default for DepthStrategy {
    fn default() -> Self {
        Self::Plunge
    }
}

impl fmt::Display for DepthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plunge => write!(f, "plunge"),
            Self::Helix => write!(f, "helix"),
        }
    }
}

/// Which native arc command a canvas sweep maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// Canvas coordinates are y-down: a non-clockwise sweep is a clockwise arc on the machine
    Mirrored,
    /// A non-clockwise sweep is a counterclockwise arc on the machine
    Direct,
}

impl Default for ArcDirection {
    fn default() -> Self {
        Self::Mirrored
    }
}

/// What the `i`/`j` parameters of an arc command hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcCenterMode {
    /// The center coordinates themselves
    Absolute,
    /// Center minus arc start (incremental IJ)
    RelativeToStart,
}

impl Default for ArcCenterMode {
    fn default() -> Self {
        Self::Absolute
    }
}

/// Choices the motion state machine leaves to configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionPolicy {
    pub depth_strategy: DepthStrategy,
    /// Emit circular ellipses as native arc commands when the driver allows it
    pub native_arcs: bool,
    pub arc_direction: ArcDirection,
    pub arc_center: ArcCenterMode,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            depth_strategy: DepthStrategy::Plunge,
            native_arcs: true,
            arc_direction: ArcDirection::Mirrored,
            arc_center: ArcCenterMode::Absolute,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub machine: MachineContext,
    pub motion: MotionPolicy,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded motion config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved motion config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.machine.validate()
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retract_height_prefers_above_top() {
        let mut machine = MachineContext {
            top: 2.0,
            surface_tolerance: 0.5,
            ..Default::default()
        };
        assert_eq!(machine.retract_height(), 1.5);

        machine.above_top = Some(10.0);
        assert_eq!(machine.retract_height(), 10.0);

        // Zero is a valid explicit clearance
        machine.above_top = Some(0.0);
        assert_eq!(machine.retract_height(), 0.0);
    }

    #[test]
    fn test_default_policy() {
        let policy = MotionPolicy::default();
        assert_eq!(policy.depth_strategy, DepthStrategy::Plunge);
        assert!(policy.native_arcs);
        assert_eq!(policy.arc_direction, ArcDirection::Mirrored);
        assert_eq!(policy.arc_center, ArcCenterMode::Absolute);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.machine.surface_tolerance = -1.0;
        assert!(config.validate().is_err());

        config.machine.surface_tolerance = 0.0;
        config.machine.feed = Some(0.0);
        assert!(config.validate().is_err());

        config.machine.feed = Some(600.0);
        config.machine.depth = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [machine]
            depth = 1.5

            [motion]
            depth_strategy = "helix"
            "#,
        )
        .unwrap();
        assert_eq!(config.machine.depth, 1.5);
        assert_eq!(config.motion.depth_strategy, DepthStrategy::Helix);
        assert!(config.motion.native_arcs);
    }

    #[test]
    fn test_unknown_extension() {
        let err = Config::new()
            .save_to_file(Path::new("motion.yaml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ref ext) if ext == "yaml"));
    }
}
