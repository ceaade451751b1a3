//! Error types for pattern compilation.

use stitch_distribute::DistributionError;
use stitch_types::PatternError;
use thiserror::Error;

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling a pattern.
///
/// Two families matter to callers:
///
/// - **invalid parameter** ([`is_invalid_parameter`](Self::is_invalid_parameter)):
///   the input is out of range; raised before any round is generated and
///   never worth retrying with the same input
/// - **invariant violation** ([`is_invariant_violation`](Self::is_invariant_violation)):
///   the engine produced an inconsistent round; always a bug
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Input outside the supported range.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A generated round broke a stitch-count invariant.
    #[error("pattern invariant violated: {0}")]
    InvariantViolation(String),

    /// Pattern assembly failed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Change placement failed.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

impl CompileError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invariant violation error.
    #[must_use]
    pub fn invariant_violation(details: impl Into<String>) -> Self {
        Self::InvariantViolation(details.into())
    }

    /// Check if the error rejects caller input.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        match self {
            Self::InvalidParameter { .. } => true,
            Self::Pattern(err) => err.is_invalid_parameter(),
            _ => false,
        }
    }

    /// Check if the error is an internal consistency failure.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        match self {
            Self::InvariantViolation(_) | Self::Distribution(_) => true,
            Self::Pattern(err) => err.is_invalid_structure(),
            _ => false,
        }
    }
}
