//! Error types shared across the toolmotion crates.
//!
//! Drivers live outside this workspace, so their failure type is defined
//! here where both the motion crate and driver implementors can reach it.

use crate::machine::Capability;
use std::io;
use thiserror::Error;

/// Errors reported by a motion driver.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The driver was asked for a command it does not implement.
    #[error("Driver does not support {0}")]
    Unsupported(Capability),

    /// The driver refused the command.
    #[error("Command rejected: {0}")]
    Rejected(String),

    /// I/O error while writing the command downstream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DriverError {
    /// Create a rejection from a message
    pub fn rejected(msg: impl Into<String>) -> Self {
        DriverError::Rejected(msg.into())
    }

    /// Check if this error came from a missing capability
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DriverError::Unsupported(_))
    }
}

/// Result type alias for driver commands.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::Unsupported(Capability::ArcCcw);
        assert_eq!(err.to_string(), "Driver does not support Arc CCW");
        assert!(err.is_unsupported());

        let err = DriverError::rejected("soft limit");
        assert_eq!(err.to_string(), "Command rejected: soft limit");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "port closed");
        let err: DriverError = io_err.into();
        assert!(matches!(err, DriverError::Io(_)));
    }
}
