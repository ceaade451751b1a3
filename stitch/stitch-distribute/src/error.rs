//! Error types for stitch distribution.

use stitch_types::PatternError;
use thiserror::Error;

use crate::ChangeKind;

/// Result type for distribution operations.
pub type DistributionResult<T> = Result<T, DistributionError>;

/// Errors raised while placing increases or decreases in a round.
///
/// Every variant indicates a caller asked for an impossible round; the
/// builders never clamp or silently drop changes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DistributionError {
    /// More changes were requested than one round can hold.
    #[error("{changes} {kind}s do not fit in one round (capacity {capacity})")]
    CapacityExceeded {
        /// Increase or decrease.
        kind: ChangeKind,
        /// Requested changes.
        changes: u32,
        /// Most changes the round can take.
        capacity: u32,
    },

    /// The distribution returned fewer distinct positions than requested.
    #[error("requested {requested} change positions but only {distinct} are distinct")]
    PositionCollision {
        /// Requested changes.
        requested: u32,
        /// Distinct positions produced.
        distinct: usize,
    },

    /// The resulting round failed validation.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl DistributionError {
    /// Check if the error is a capacity violation.
    #[must_use]
    pub const fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}
