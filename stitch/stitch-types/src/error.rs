//! Error types for pattern construction and validation.

use thiserror::Error;

use crate::ShapeKind;

/// Result type for pattern data model operations.
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors raised while building or decoding pattern values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A caller-supplied value is out of its valid range.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A dimension required by the shape was not supplied.
    #[error("{shape} requires '{dimension}'")]
    MissingDimension {
        /// Shape being described.
        shape: ShapeKind,
        /// Name of the missing dimension.
        dimension: &'static str,
    },

    /// The shape type is not one the engine can build.
    #[error("unsupported shape type '{0}' (expected sphere, cylinder or cone)")]
    UnsupportedShape(String),

    /// A structural invariant of a round or pattern does not hold.
    #[error("invalid pattern structure: {0}")]
    InvalidStructure(String),

    /// Canonical JSON could not be encoded or decoded.
    #[error("canonical json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatternError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid structure error.
    #[must_use]
    pub fn invalid_structure(details: impl Into<String>) -> Self {
        Self::InvalidStructure(details.into())
    }

    /// Check if the error rejects caller input (bad value, missing dimension, unknown shape).
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::MissingDimension { .. } | Self::UnsupportedShape(_)
        )
    }

    /// Check if the error is a structural violation.
    #[must_use]
    pub const fn is_invalid_structure(&self) -> bool {
        matches!(self, Self::InvalidStructure(_))
    }
}

/// Reject non-finite and non-positive measurements.
pub(crate) fn require_positive(parameter: &str, value: f64) -> PatternResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PatternError::invalid_parameter(
            parameter,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}
