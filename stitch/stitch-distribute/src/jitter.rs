//! Round-to-round offsets that keep changes from stacking into columns.

/// Alternating offset applied to odd rounds.
///
/// Odd rounds shift their change positions by `step` stitches, even rounds
/// do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterPolicy {
    /// Shift applied on odd rounds.
    pub step: u32,
}

impl JitterPolicy {
    /// Default shift for odd rounds.
    pub const DEFAULT_STEP: u32 = 3;

    /// Policy with the default step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }

    /// Set the odd-round shift. Zero disables jitter.
    #[must_use]
    pub const fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Offset for `round_number`, added to `base_offset`.
    #[must_use]
    pub const fn offset(&self, round_number: u32, base_offset: u32) -> u32 {
        base_offset.saturating_add((round_number % 2) * self.step)
    }
}

impl Default for JitterPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Offset for `round_number` under the default policy.
///
/// ```
/// use stitch_distribute::jitter_offset;
///
/// assert_eq!(jitter_offset(1, 0), 3);
/// assert_eq!(jitter_offset(2, 0), 0);
/// assert_eq!(jitter_offset(1, 5), 8);
/// assert_eq!(jitter_offset(2, 5), 5);
/// ```
#[must_use]
pub const fn jitter_offset(round_number: u32, base_offset: u32) -> u32 {
    JitterPolicy::new().offset(round_number, base_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity() {
        let offsets: Vec<u32> = (1..=6).map(|r| jitter_offset(r, 0)).collect();
        assert_eq!(offsets, vec![3, 0, 3, 0, 3, 0]);
        assert_eq!(jitter_offset(0, 0), 0);
    }

    #[test]
    fn test_custom_step() {
        let policy = JitterPolicy::default().with_step(2);
        assert_eq!(policy.offset(3, 1), 3);
        assert_eq!(policy.offset(4, 1), 1);
        assert_eq!(JitterPolicy::new().with_step(0).offset(7, 4), 4);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(jitter_offset(1, u32::MAX), u32::MAX);
    }
}
