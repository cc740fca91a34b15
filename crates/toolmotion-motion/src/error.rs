//! Error types for the motion crate.

use thiserror::Error;
use toolmotion_core::DriverError;
use toolmotion_geometry::GeometryError;

/// Errors that can occur while driving motion.
#[derive(Error, Debug)]
pub enum MotionError {
    /// The path could not be measured or flattened.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The driver failed to execute a command.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Result type alias for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use toolmotion_core::Capability;

    #[test]
    fn test_motion_error_display() {
        let err: MotionError = DriverError::Unsupported(Capability::ArcCcw).into();
        assert_eq!(err.to_string(), "Driver error: Driver does not support Arc CCW");

        let err: MotionError = GeometryError::EmptyGeometry {
            operation: "get_length",
        }
        .into();
        assert!(matches!(err, MotionError::Geometry(_)));
    }
}
