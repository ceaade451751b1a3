//! A single round of a spiral pattern.

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};
use crate::op::{normalize_ops, Op};
use crate::stitch::{StitchInstruction, StitchType};

/// One full circular pass of stitching.
///
/// The production-weighted sum of the instructions always equals
/// `total_stitches`; construction and deserialization both check it.
///
/// # Example
///
/// ```
/// use stitch_types::{RoundInstruction, StitchInstruction, StitchType};
///
/// let round = RoundInstruction::new(
///     1,
///     vec![StitchInstruction::new(StitchType::Increase, 6).unwrap()],
///     12,
/// )
/// .unwrap();
/// assert_eq!(round.consumed_stitches(), 6);
///
/// // 6 increases make 12 stitches, not 11
/// let bad = RoundInstruction::new(
///     1,
///     vec![StitchInstruction::new(StitchType::Increase, 6).unwrap()],
///     11,
/// );
/// assert!(bad.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundRepr")]
pub struct RoundInstruction {
    round_number: u32,
    stitches: Vec<StitchInstruction>,
    total_stitches: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RoundRepr {
    round_number: u32,
    stitches: Vec<StitchInstruction>,
    total_stitches: u32,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<RoundRepr> for RoundInstruction {
    type Error = PatternError;

    fn try_from(repr: RoundRepr) -> PatternResult<Self> {
        let round = Self::new(repr.round_number, repr.stitches, repr.total_stitches)?;
        Ok(match repr.description {
            Some(description) => round.with_description(description),
            None => round,
        })
    }
}

impl RoundInstruction {
    /// Create a round, checking it is non-empty and its stitches add up.
    pub fn new(round_number: u32, stitches: Vec<StitchInstruction>, total_stitches: u32) -> PatternResult<Self> {
        if stitches.is_empty() {
            return Err(PatternError::invalid_structure(format!(
                "round {round_number} has no stitch instructions"
            )));
        }
        if total_stitches == 0 {
            return Err(PatternError::invalid_structure(format!(
                "round {round_number} must end with at least one stitch"
            )));
        }

        let produced: u64 = stitches.iter().map(StitchInstruction::produced).sum();
        if produced != u64::from(total_stitches) {
            return Err(PatternError::invalid_structure(format!(
                "round {round_number} instructions produce {produced} stitches but total_stitches is {total_stitches}"
            )));
        }

        Ok(Self {
            round_number,
            stitches,
            total_stitches,
            description: None,
        })
    }

    /// Create a round from parser operations, flattening sequences first.
    pub fn from_ops(round_number: u32, ops: &[Op], total_stitches: u32) -> PatternResult<Self> {
        Self::new(round_number, normalize_ops(ops)?, total_stitches)
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Zero-based position of the round in its pattern.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Ordered stitch instructions.
    #[must_use]
    pub fn stitches(&self) -> &[StitchInstruction] {
        &self.stitches
    }

    /// Stitch count after the round is complete.
    #[must_use]
    pub const fn total_stitches(&self) -> u32 {
        self.total_stitches
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Stitches of the previous round this round works into.
    #[must_use]
    pub fn consumed_stitches(&self) -> u64 {
        self.stitches.iter().map(StitchInstruction::consumed).sum()
    }

    /// Total operations of one stitch type in the round.
    #[must_use]
    pub fn operations_of(&self, stitch_type: &StitchType) -> u64 {
        self.stitches
            .iter()
            .filter(|s| s.stitch_type() == stitch_type)
            .map(|s| u64::from(s.count()))
            .sum()
    }

    /// Whether the round starts a new ring instead of working into a previous round.
    #[must_use]
    pub fn is_foundation(&self) -> bool {
        self.stitches.iter().any(|s| s.stitch_type().is_foundation())
    }
}
