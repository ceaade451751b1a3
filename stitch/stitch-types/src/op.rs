//! Nested stitch operations, as produced by a pattern text parser.

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};
use crate::stitch::{group_consecutive, StitchInstruction, StitchType};

/// A stitch operation tree.
///
/// `(sc 2, inc) x 6` is a [`Op::Sequence`] of two [`Op::Simple`] nodes
/// repeated six times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Op {
    /// A single stitch type worked `count` times.
    Simple {
        /// Stitch worked.
        stitch_type: StitchType,
        /// Number of operations.
        count: u32,
    },
    /// A group of operations worked `repeat` times.
    Sequence {
        /// Operations in one repeat.
        ops: Vec<Op>,
        /// Number of repeats.
        repeat: u32,
    },
}

impl Op {
    /// Simple node.
    #[must_use]
    pub fn simple(stitch_type: impl Into<StitchType>, count: u32) -> Self {
        Self::Simple {
            stitch_type: stitch_type.into(),
            count,
        }
    }

    /// Sequence node.
    #[must_use]
    pub const fn sequence(ops: Vec<Self>, repeat: u32) -> Self {
        Self::Sequence { ops, repeat }
    }

    fn flatten_into(&self, out: &mut Vec<StitchInstruction>, depth: usize) -> PatternResult<()> {
        if depth > MAX_DEPTH {
            return Err(PatternError::invalid_structure(format!(
                "operation sequences nested deeper than {MAX_DEPTH} levels"
            )));
        }
        match self {
            Self::Simple { stitch_type, count } => {
                out.push(StitchInstruction::new(stitch_type.clone(), *count)?);
            }
            Self::Sequence { ops, repeat } => {
                if *repeat == 0 {
                    return Err(PatternError::invalid_parameter(
                        "repeat",
                        "a sequence must be worked at least once",
                    ));
                }
                let mut body = Vec::new();
                for op in ops {
                    op.flatten_into(&mut body, depth + 1)?;
                }
                for _ in 0..*repeat {
                    out.extend(body.iter().cloned());
                }
            }
        }
        Ok(())
    }
}

const MAX_DEPTH: usize = 32;

/// Expand repeats into flat stitch instructions, merging adjacent equal stitches.
///
/// # Example
///
/// ```
/// use stitch_types::{normalize_ops, Op, StitchType};
///
/// let ops = vec![
///     Op::simple(StitchType::SingleCrochet, 1),
///     Op::sequence(vec![Op::simple(StitchType::SingleCrochet, 1), Op::simple(StitchType::Increase, 1)], 2),
/// ];
/// let flat = normalize_ops(&ops).unwrap();
/// let codes: Vec<_> = flat.iter().map(|s| (s.stitch_type().code().to_string(), s.count())).collect();
/// assert_eq!(codes, vec![
///     ("sc".to_string(), 2),
///     ("inc".to_string(), 1),
///     ("sc".to_string(), 1),
///     ("inc".to_string(), 1),
/// ]);
/// ```
///
/// # Errors
///
/// Returns an error for zero counts, zero repeats, empty results, or
/// excessively deep nesting.
pub fn normalize_ops(ops: &[Op]) -> PatternResult<Vec<StitchInstruction>> {
    let mut flat = Vec::new();
    for op in ops {
        op.flatten_into(&mut flat, 0)?;
    }
    if flat.is_empty() {
        return Err(PatternError::invalid_structure("operation list expands to no stitches"));
    }
    Ok(group_consecutive(flat))
}
