//! Stitch vocabulary and single stitch instructions.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};

/// A stitch operation, written in US terminology.
///
/// The vocabulary is open: unrecognized codes survive as [`StitchType::Other`]
/// and count as one stitch produced per operation.
///
/// Stitch types compare, hash and count by [`code`](Self::code), so
/// `Other("sc")` is the same stitch as [`StitchType::SingleCrochet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StitchType {
    /// Adjustable starting loop (`MR`).
    MagicRing,
    /// Chain (`ch`).
    Chain,
    /// Single crochet (`sc`).
    SingleCrochet,
    /// Two single crochets in the same stitch (`inc`).
    Increase,
    /// Single crochet two together (`dec`).
    Decrease,
    /// Slip stitch (`slst`).
    SlipStitch,
    /// Any other stitch code.
    Other(String),
}

impl StitchType {
    /// Pattern abbreviation.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MagicRing => "MR",
            Self::Chain => "ch",
            Self::SingleCrochet => "sc",
            Self::Increase => "inc",
            Self::Decrease => "dec",
            Self::SlipStitch => "slst",
            Self::Other(code) => code,
        }
    }

    /// Stitches one operation adds to the round total.
    ///
    /// ```
    /// use stitch_types::StitchType;
    ///
    /// assert_eq!(StitchType::Increase.produces(), 2);
    /// assert_eq!(StitchType::Decrease.produces(), 1);
    /// assert_eq!(StitchType::MagicRing.produces(), 0);
    /// ```
    #[must_use]
    pub fn produces(&self) -> u64 {
        match self.code() {
            "MR" | "ch" => 0,
            "inc" => 2,
            _ => 1,
        }
    }

    /// Stitches of the previous round one operation works into.
    #[must_use]
    pub fn consumes(&self) -> u64 {
        match self.code() {
            "MR" | "ch" => 0,
            "dec" => 2,
            _ => 1,
        }
    }

    /// Foundation operations (magic ring, chain) build a ring rather than stitches.
    #[must_use]
    pub fn is_foundation(&self) -> bool {
        matches!(self.code(), "MR" | "ch")
    }

    /// The named variant for a known code held in [`StitchType::Other`].
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Other(code) => Self::from(code),
            known => known,
        }
    }
}

impl PartialEq for StitchType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for StitchType {}

impl Hash for StitchType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<&str> for StitchType {
    fn from(code: &str) -> Self {
        match code {
            "MR" => Self::MagicRing,
            "ch" => Self::Chain,
            "sc" => Self::SingleCrochet,
            "inc" => Self::Increase,
            "dec" => Self::Decrease,
            "slst" => Self::SlipStitch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StitchType {
    fn from(code: String) -> Self {
        match Self::from(code.as_str()) {
            Self::Other(_) => Self::Other(code),
            known => known,
        }
    }
}

impl From<StitchType> for String {
    fn from(stitch: StitchType) -> Self {
        match stitch {
            StitchType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for StitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One instruction: a stitch type repeated `count` times.
///
/// `count` is a number of operations; an `inc` with count 3 produces six
/// stitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StitchInstructionRepr")]
pub struct StitchInstruction {
    stitch_type: StitchType,
    count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Deserialize)]
struct StitchInstructionRepr {
    stitch_type: StitchType,
    #[serde(default = "default_count")]
    count: u32,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

const fn default_count() -> u32 {
    1
}

impl TryFrom<StitchInstructionRepr> for StitchInstruction {
    type Error = PatternError;

    fn try_from(repr: StitchInstructionRepr) -> PatternResult<Self> {
        let mut instruction = Self::new(repr.stitch_type, repr.count)?;
        instruction.target = repr.target;
        instruction.note = repr.note;
        Ok(instruction)
    }
}

impl StitchInstruction {
    /// Create an instruction; `count` must be at least 1.
    pub fn new(stitch_type: impl Into<StitchType>, count: u32) -> PatternResult<Self> {
        if count == 0 {
            return Err(PatternError::invalid_parameter(
                "count",
                "a stitch instruction needs at least one operation",
            ));
        }
        Ok(Self {
            stitch_type: stitch_type.into().normalized(),
            count,
            target: None,
            note: None,
        })
    }

    /// Set where the stitches are worked (e.g. `"each ch"`).
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attach a clarifying note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Stitch type.
    #[must_use]
    pub const fn stitch_type(&self) -> &StitchType {
        &self.stitch_type
    }

    /// Number of operations.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Placement hint.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Clarifying note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Stitches this instruction adds to the round.
    #[must_use]
    pub fn produced(&self) -> u64 {
        self.stitch_type.produces() * self.count as u64
    }

    /// Stitches of the previous round this instruction works into.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.stitch_type.consumes() * self.count as u64
    }

    fn is_plain(&self) -> bool {
        self.target.is_none() && self.note.is_none()
    }
}

/// Merge runs of identical plain instructions: `sc, sc, inc, sc` becomes `sc 2, inc, sc`.
///
/// Instructions carrying a target or note are never merged.
#[must_use]
pub fn group_consecutive(instructions: impl IntoIterator<Item = StitchInstruction>) -> Vec<StitchInstruction> {
    let mut grouped: Vec<StitchInstruction> = Vec::new();
    for instruction in instructions {
        if let Some(last) = grouped.last_mut() {
            if last.is_plain() && instruction.is_plain() && last.stitch_type == instruction.stitch_type {
                if let Some(count) = last.count.checked_add(instruction.count) {
                    last.count = count;
                    continue;
                }
            }
        }
        grouped.push(instruction);
    }
    grouped
}
