//! The motion driver capability.
//!
//! A driver turns motion commands into whatever its device understands
//! (G-code text, serial frames, a simulator). `rapid` and `linear` are
//! mandatory; arcs and the ancillary setters are optional and advertised
//! through [`Driver::has_capability`].

use crate::params::Params;
use toolmotion_core::{Capability, Coolant, DriverError, DriverResult};

pub trait Driver {
    /// Pen-up traverse at full speed.
    fn rapid(&mut self, params: &Params) -> DriverResult<()>;

    /// Pen-down feed move.
    fn linear(&mut self, params: &Params) -> DriverResult<()>;

    /// Clockwise arc to `(x, y)` around the center given by `(i, j)`.
    fn arc_cw(&mut self, _params: &Params) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::ArcCw))
    }

    /// Counterclockwise arc to `(x, y)` around the center given by `(i, j)`.
    fn arc_ccw(&mut self, _params: &Params) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::ArcCcw))
    }

    fn tool_change(&mut self, _tool: u32) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::ToolChange))
    }

    fn speed(&mut self, _speed: f64) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::Speed))
    }

    fn feed(&mut self, _feed: f64) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::Feed))
    }

    fn coolant(&mut self, _state: Coolant) -> DriverResult<()> {
        Err(DriverError::Unsupported(Capability::Coolant))
    }

    /// Whether an optional command is implemented. Defaults to none.
    fn has_capability(&self, _capability: Capability) -> bool {
        false
    }

    /// All advertised optional commands.
    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .iter()
            .copied()
            .filter(|c| self.has_capability(*c))
            .collect()
    }
}
