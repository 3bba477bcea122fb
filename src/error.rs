//! Error types for marga-check.

use thiserror::Error;

/// Precondition violations raised at the construction/binding boundary.
///
/// Domain outcomes of validation (blocked cells, illegal corner touches,
/// out-of-range waypoints, degenerate segments) are reported as values via
/// [`crate::validate::Verdict`], never as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroSized { width: usize, height: usize },

    #[error("cell buffer holds {actual} cells, expected width*height = {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("validator already holds a grid; call reset() before re-initializing")]
    AlreadyInitialized,

    #[error("validator has no grid; call initialize() first")]
    NotInitialized,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GridError>;
