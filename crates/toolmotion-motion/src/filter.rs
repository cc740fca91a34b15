//! Hooks that rewrite command parameters during traversal.

use crate::params::Params;
use toolmotion_core::Point;
use toolmotion_geometry::ActionKind;

/// Traversal progress handed to a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Tool position before the command is emitted
    pub position: Point,
    /// Contour length travelled so far, including this command
    pub traversed: f64,
    /// Flattened length of the whole contour
    pub total: f64,
}

/// Rewrites the parameters of every command derived from a path action.
///
/// Retract and plunge moves are not filtered.
pub trait MotionFilter {
    fn transform(&mut self, kind: ActionKind, params: Params, state: &FilterState) -> Params;
}

impl<F> MotionFilter for F
where
    F: FnMut(ActionKind, Params, &FilterState) -> Params,
{
    fn transform(&mut self, kind: ActionKind, params: Params, state: &FilterState) -> Params {
        self(kind, params, state)
    }
}

/// Filter that leaves parameters untouched.
pub(crate) fn passthrough(_kind: ActionKind, params: Params, _state: &FilterState) -> Params {
    params
}
