//! Error types for the core solver.

use thiserror::Error;

/// Errors that indicate a broken invariant of the solver itself.
///
/// These can only be produced by a bug in this crate or by code outside this crate violating the
/// documented preconditions of its API (e.g. constructing a [`crate::trail::Trail`] by hand and
/// pushing an already-assigned literal). They are never a consequence of a malformed or
/// unsatisfiable input formula.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolated(&'static str),
}
