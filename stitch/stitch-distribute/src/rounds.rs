//! Builders for increase, decrease and steady rounds.

use std::fmt;

use stitch_types::{group_consecutive, PatternError, RoundInstruction, StitchInstruction, StitchType};
use tracing::debug;

use crate::distribution::even_distribution;
use crate::error::{DistributionError, DistributionResult};

/// Direction of a stitch-count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// One stitch becomes two.
    Increase,
    /// Two stitches become one.
    Decrease,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        })
    }
}

/// Stitch instructions for one round, before it is numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRound {
    /// Grouped instructions in working order.
    pub stitches: Vec<StitchInstruction>,
    /// Stitches of the previous round worked into.
    pub consumed: u32,
    /// Stitches at the end of the round.
    pub produced: u32,
    /// 1-indexed change positions (input stitches for increases, output
    /// slots for decreases).
    pub positions: Vec<u32>,
}

impl ShapedRound {
    /// Number the round and validate it.
    pub fn into_round(self, round_number: u32) -> DistributionResult<RoundInstruction> {
        Ok(RoundInstruction::new(round_number, self.stitches, self.produced)?)
    }

    /// Stitches added (positive) or removed (negative).
    #[must_use]
    pub fn delta(&self) -> i64 {
        i64::from(self.produced) - i64::from(self.consumed)
    }
}

fn require_stitches(current: u32) -> DistributionResult<()> {
    if current == 0 {
        return Err(PatternError::invalid_parameter("current", "a round needs at least one stitch").into());
    }
    Ok(())
}

fn checked_positions(slots: u32, changes: u32, offset: u32) -> DistributionResult<Vec<u32>> {
    let positions = even_distribution(slots, changes, offset);
    let distinct = positions.windows(2).filter(|w| w[0] != w[1]).count() + usize::from(!positions.is_empty());
    if u32::try_from(distinct).ok() != Some(changes) || positions.iter().any(|p| *p == 0 || *p > slots) {
        return Err(DistributionError::PositionCollision {
            requested: changes,
            distinct,
        });
    }
    Ok(positions)
}

/// Lay `slots` stitches, using `change` at the given positions and `sc` elsewhere.
fn lay_out(slots: u32, positions: &[u32], change: &StitchType) -> DistributionResult<Vec<StitchInstruction>> {
    let mut next = positions.iter().peekable();
    let mut flat = Vec::with_capacity(slots as usize);
    for slot in 1..=slots {
        let stitch = if next.peek() == Some(&&slot) {
            next.next();
            change.clone()
        } else {
            StitchType::SingleCrochet
        };
        flat.push(StitchInstruction::new(stitch, 1)?);
    }
    Ok(group_consecutive(flat))
}

/// A round of single crochet that keeps the count unchanged.
pub fn steady_round(current: u32) -> DistributionResult<ShapedRound> {
    require_stitches(current)?;
    Ok(ShapedRound {
        stitches: vec![StitchInstruction::new(StitchType::SingleCrochet, current)?],
        consumed: current,
        produced: current,
        positions: Vec::new(),
    })
}

/// Spread `changes` increases over a round of `current` stitches.
///
/// Each chosen stitch is worked as `inc`, the rest as `sc`. The round ends
/// with `current + changes` stitches. At most one increase per stitch, so
/// `changes` may not exceed `current`.
///
/// # Example
///
/// ```
/// use stitch_distribute::increase_round;
///
/// let round = increase_round(12, 6, 0).unwrap();
/// assert_eq!(round.produced, 18);
/// assert_eq!(round.positions, vec![2, 4, 6, 8, 10, 12]);
/// assert!(increase_round(6, 7, 0).is_err());
/// ```
pub fn increase_round(current: u32, changes: u32, offset: u32) -> DistributionResult<ShapedRound> {
    require_stitches(current)?;
    if changes == 0 {
        return steady_round(current);
    }
    let produced = current
        .checked_add(changes)
        .filter(|_| changes <= current)
        .ok_or(DistributionError::CapacityExceeded {
            kind: ChangeKind::Increase,
            changes,
            capacity: current,
        })?;

    let positions = checked_positions(current, changes, offset)?;
    debug!(current, changes, offset, produced, "increase round");

    Ok(ShapedRound {
        stitches: lay_out(current, &positions, &StitchType::Increase)?,
        consumed: current,
        produced,
        positions,
    })
}

/// Spread `changes` decreases over a round of `current` stitches.
///
/// Positions are chosen among the `current - changes` stitches the round
/// produces; each chosen slot is a `dec` worked over two stitches, the rest
/// `sc`. The round consumes exactly `current` stitches, so `changes` may not
/// exceed `current - changes`.
///
/// # Example
///
/// ```
/// use stitch_distribute::decrease_round;
///
/// let round = decrease_round(18, 6, 0).unwrap();
/// assert_eq!((round.consumed, round.produced), (18, 12));
/// assert!(decrease_round(10, 6, 0).is_err());
/// ```
pub fn decrease_round(current: u32, changes: u32, offset: u32) -> DistributionResult<ShapedRound> {
    require_stitches(current)?;
    if changes == 0 {
        return steady_round(current);
    }
    let capacity = current / 2;
    if changes > capacity {
        return Err(DistributionError::CapacityExceeded {
            kind: ChangeKind::Decrease,
            changes,
            capacity,
        });
    }
    let produced = current - changes;

    let positions = checked_positions(produced, changes, offset)?;
    debug!(current, changes, offset, produced, "decrease round");

    Ok(ShapedRound {
        stitches: lay_out(produced, &positions, &StitchType::Decrease)?,
        consumed: current,
        produced,
        positions,
    })
}
