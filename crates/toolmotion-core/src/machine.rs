//! Machine capability flags and ancillary machine state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional features a motion driver may expose.
///
/// `rapid` and `linear` are mandatory for every driver and have no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Native clockwise arc (G2 style)
    ArcCw,
    /// Native counterclockwise arc (G3 style)
    ArcCcw,
    /// Automatic tool change
    ToolChange,
    /// Spindle speed control
    Speed,
    /// Feed rate control
    Feed,
    /// Coolant control
    Coolant,
}

impl Capability {
    /// Every capability, in the order ancillary state is applied.
    pub const ALL: [Capability; 6] = [
        Capability::ArcCw,
        Capability::ArcCcw,
        Capability::ToolChange,
        Capability::Speed,
        Capability::Feed,
        Capability::Coolant,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArcCw => write!(f, "Arc CW"),
            Self::ArcCcw => write!(f, "Arc CCW"),
            Self::ToolChange => write!(f, "Tool Change"),
            Self::Speed => write!(f, "Spindle Speed"),
            Self::Feed => write!(f, "Feed Rate"),
            Self::Coolant => write!(f, "Coolant"),
        }
    }
}

/// Coolant state requested from the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coolant {
    Off,
    Mist,
    Flood,
}

impl Default for Coolant {
    fn default() -> Self {
        Self::Off
    }
}

impl fmt::Display for Coolant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Mist => write!(f, "mist"),
            Self::Flood => write!(f, "flood"),
        }
    }
}
