//! Error types for the geometry crate.

use crate::action::ActionKind;
use thiserror::Error;

/// Errors raised while building or querying paths.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A query needs at least one action but the subpath has none.
    #[error("Cannot compute {operation} of an empty subpath")]
    EmptyGeometry {
        /// The query that failed.
        operation: &'static str,
    },

    /// An action name with no known handler.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Wrong number of raw arguments for an action kind.
    #[error("{kind} expects {expected} arguments, got {actual}")]
    InvalidArity {
        kind: ActionKind,
        expected: usize,
        actual: usize,
    },

    /// An action index outside the subpath.
    #[error("Action index {index} out of range for subpath of {len} actions")]
    IndexOutOfRange { index: usize, len: usize },
}

impl GeometryError {
    pub(crate) fn empty(operation: &'static str) -> Self {
        GeometryError::EmptyGeometry { operation }
    }
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::empty("first point");
        assert_eq!(err.to_string(), "Cannot compute first point of an empty subpath");

        let err = GeometryError::InvalidArity {
            kind: ActionKind::LineTo,
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "lineTo expects 2 arguments, got 3");

        let err = GeometryError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Action index 4 out of range for subpath of 2 actions"
        );
    }
}
