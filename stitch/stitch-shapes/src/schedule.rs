//! Stitch-count schedules.
//!
//! Schedules are computed from target counts rather than accumulated
//! floating-point steps, so the same input always yields the same integers.

use std::f64::consts::PI;

use stitch_distribute::div_round_half_up;
use tracing::{debug, warn};

use crate::error::{CompileError, CompileResult};

/// Stitches worked into a magic ring.
pub const MAGIC_RING_STITCHES: u32 = 6;

/// Round a non-negative geometric quantity half up into a count.
///
/// Values that do not fit a `u32` are rejected against `parameter`.
fn to_count(parameter: &str, value: f64) -> CompileResult<u32> {
    let rounded = value.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return Err(CompileError::invalid_parameter(
            parameter,
            format!("gives {value} stitches or rounds, more than can be counted"),
        ));
    }
    // in range after the check above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = rounded as u32;
    Ok(count)
}

/// Stitches around a circle of `diameter_cm` at `stitches_per_10cm`.
///
/// Computed as `diameter * gauge * PI / 10` and rounded half up.
///
/// ```
/// use stitch_shapes::circumference_stitches;
///
/// assert_eq!(circumference_stitches(10.0, 14.0).unwrap(), 44);
/// assert!(circumference_stitches(1.0e10, 14.0).unwrap_err().is_invalid_parameter());
/// ```
pub fn circumference_stitches(diameter_cm: f64, stitches_per_10cm: f64) -> CompileResult<u32> {
    circumference_for("diameter_cm", diameter_cm, stitches_per_10cm)
}

/// Rounds needed to cover `length_cm` at `rows_per_10cm`, at least one.
pub fn rounds_for_length(length_cm: f64, rows_per_10cm: f64) -> CompileResult<u32> {
    rounds_for("length_cm", length_cm, rows_per_10cm)
}

/// [`circumference_stitches`], reporting overflow against `parameter`.
pub(crate) fn circumference_for(parameter: &str, diameter_cm: f64, stitches_per_10cm: f64) -> CompileResult<u32> {
    to_count(parameter, diameter_cm * stitches_per_10cm * PI / 10.0)
}

/// [`rounds_for_length`], reporting overflow against `parameter`.
pub(crate) fn rounds_for(parameter: &str, length_cm: f64, rows_per_10cm: f64) -> CompileResult<u32> {
    Ok(to_count(parameter, length_cm * rows_per_10cm / 10.0)?.max(1))
}

/// Fewest rounds that can grow `start` stitches to `end` when each round at most doubles.
#[must_use]
pub fn min_doubling_rounds(start: u32, end: u32) -> u32 {
    let mut count = u64::from(start.max(1));
    let mut rounds = 0;
    while count < u64::from(end) {
        count *= 2;
        rounds += 1;
    }
    rounds
}

/// Per-round increase counts growing `start` stitches to `end`.
///
/// Each round takes an even share of what remains, raised when needed so
/// the target stays reachable by doubling, and never more than one increase
/// per stitch. If `rounds` is too few to reach `end` at all, the plan uses
/// the minimum that can, so the returned length may exceed `rounds`.
///
/// # Example
///
/// ```
/// use stitch_shapes::plan_increases;
///
/// assert_eq!(plan_increases(6, 44, 8).unwrap(), vec![4, 4, 5, 5, 5, 5, 5, 5]);
/// assert_eq!(plan_increases(6, 35, 3).unwrap(), vec![6, 11, 12]);
/// assert_eq!(plan_increases(6, 35, 1).unwrap().len(), 3);
/// ```
pub fn plan_increases(start: u32, end: u32, rounds: u32) -> CompileResult<Vec<u32>> {
    if start == 0 {
        return Err(CompileError::invariant_violation("increase plan cannot start from zero stitches"));
    }
    if end <= start {
        return Ok(vec![0; rounds as usize]);
    }

    let needed = min_doubling_rounds(start, end);
    let rounds = if rounds < needed {
        warn!(start, end, requested = rounds, used = needed, "raising round count to reach target");
        needed
    } else {
        rounds
    };

    let mut plan = Vec::with_capacity(rounds as usize);
    let mut current = start;
    for r in 0..rounds {
        let remaining = rounds - r;
        let need = end - current;
        let even_share = need / remaining;
        let doubling = 1u64.checked_shl(remaining - 1).unwrap_or(u64::MAX);
        let reachable = u64::from(end).div_ceil(doubling);
        let floor = u32::try_from(reachable).unwrap_or(end).saturating_sub(current);
        let change = even_share.max(floor).min(current).min(need);
        plan.push(change);
        current += change;
    }

    if current != end {
        return Err(CompileError::invariant_violation(format!(
            "increase plan from {start} ends at {current}, expected {end}"
        )));
    }
    debug!(start, end, ?plan, "increase plan");
    Ok(plan)
}

/// Per-round change counts for a linear taper of `delta` stitches over `rounds` rounds.
///
/// Round `r` brings the cumulative change to `round(delta * r / rounds)`, so
/// each round changes by the floor or ceiling of `delta / rounds`.
///
/// ```
/// use stitch_shapes::plan_taper;
///
/// let plan = plan_taper(17, 13);
/// assert_eq!(plan.iter().sum::<u32>(), 17);
/// assert!(plan.iter().all(|c| *c == 1 || *c == 2));
/// ```
#[must_use]
pub fn plan_taper(delta: u32, rounds: u32) -> Vec<u32> {
    let mut cumulative = 0u64;
    (1..=u64::from(rounds))
        .map(|r| {
            let target = div_round_half_up(u64::from(delta) * r, u64::from(rounds));
            let change = target - cumulative;
            cumulative = target;
            // change <= ceil(delta / rounds) <= delta
            u32::try_from(change).unwrap_or(delta)
        })
        .collect()
}

/// Stitch counts after applying `changes` to `start`, with the start first.
#[must_use]
pub fn counts_from_changes(start: u32, changes: &[u32], increasing: bool) -> Vec<u32> {
    let mut counts = Vec::with_capacity(changes.len() + 1);
    let mut current = start;
    counts.push(current);
    for &change in changes {
        current = if increasing {
            current.saturating_add(change)
        } else {
            current.saturating_sub(change)
        };
        counts.push(current);
    }
    counts
}
