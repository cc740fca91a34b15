//! A driver that records every command it receives.

use crate::driver::Driver;
use crate::params::Params;
use std::collections::HashSet;
use std::fmt;
use toolmotion_core::{Capability, Coolant, DriverError, DriverResult};

/// One command received by a [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Rapid(Params),
    Linear(Params),
    ArcCw(Params),
    ArcCcw(Params),
    ToolChange(u32),
    Speed(f64),
    Feed(f64),
    Coolant(Coolant),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Rapid(p) => write!(f, "rapid {}", p),
            Command::Linear(p) => write!(f, "linear {}", p),
            Command::ArcCw(p) => write!(f, "arc_cw {}", p),
            Command::ArcCcw(p) => write!(f, "arc_ccw {}", p),
            Command::ToolChange(tool) => write!(f, "tool {}", tool),
            Command::Speed(speed) => write!(f, "speed {}", speed),
            Command::Feed(feed) => write!(f, "feed {}", feed),
            Command::Coolant(state) => write!(f, "coolant {}", state),
        }
    }
}

/// In-memory driver for previews, dry runs and tests.
///
/// Optional commands it does not advertise fail with
/// [`DriverError::Unsupported`], like a real device would.
#[derive(Debug, Clone)]
pub struct RecordingDriver {
    commands: Vec<Command>,
    capabilities: HashSet<Capability>,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDriver {
    /// Recorder advertising every capability.
    pub fn new() -> Self {
        Self::with_capabilities(Capability::ALL)
    }

    /// Recorder limited to rapid and linear moves.
    pub fn basic() -> Self {
        Self::with_capabilities([])
    }

    pub fn with_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            commands: Vec::new(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Stop advertising `capability`.
    pub fn without(mut self, capability: Capability) -> Self {
        self.capabilities.remove(&capability);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn record_optional(&mut self, capability: Capability, command: Command) -> DriverResult<()> {
        if !self.capabilities.contains(&capability) {
            return Err(DriverError::Unsupported(capability));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Driver for RecordingDriver {
    fn rapid(&mut self, params: &Params) -> DriverResult<()> {
        self.commands.push(Command::Rapid(*params));
        Ok(())
    }

    fn linear(&mut self, params: &Params) -> DriverResult<()> {
        self.commands.push(Command::Linear(*params));
        Ok(())
    }

    fn arc_cw(&mut self, params: &Params) -> DriverResult<()> {
        self.record_optional(Capability::ArcCw, Command::ArcCw(*params))
    }

    fn arc_ccw(&mut self, params: &Params) -> DriverResult<()> {
        self.record_optional(Capability::ArcCcw, Command::ArcCcw(*params))
    }

    fn tool_change(&mut self, tool: u32) -> DriverResult<()> {
        self.record_optional(Capability::ToolChange, Command::ToolChange(tool))
    }

    fn speed(&mut self, speed: f64) -> DriverResult<()> {
        self.record_optional(Capability::Speed, Command::Speed(speed))
    }

    fn feed(&mut self, feed: f64) -> DriverResult<()> {
        self.record_optional(Capability::Feed, Command::Feed(feed))
    }

    fn coolant(&mut self, state: Coolant) -> DriverResult<()> {
        self.record_optional(Capability::Coolant, Command::Coolant(state))
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_removes_capability() {
        let driver = RecordingDriver::new().without(Capability::Coolant);
        assert!(!driver.has_capability(Capability::Coolant));
        assert_eq!(driver.capabilities().len(), Capability::ALL.len() - 1);
    }

    #[test]
    fn test_unadvertised_command_fails() {
        let mut driver = RecordingDriver::basic();
        assert!(driver.arc_cw(&Params::arc(1.0, 0.0, 0.0, 0.0)).is_err());
        driver.rapid(&Params::xy(1.0, 2.0)).unwrap();
        assert_eq!(driver.commands(), &[Command::Rapid(Params::xy(1.0, 2.0))]);
    }

    #[test]
    fn test_take_drains() {
        let mut driver = RecordingDriver::new();
        driver.feed(300.0).unwrap();
        assert_eq!(driver.take(), vec![Command::Feed(300.0)]);
        assert!(driver.commands().is_empty());
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Linear(Params::depth(-1.0)).to_string(), "linear Z-1");
        assert_eq!(Command::Coolant(Coolant::Mist).to_string(), "coolant mist");
    }
}
