//! Round emission and pattern assembly shared by the compilers.

use stitch_distribute::{decrease_round, increase_round, steady_round, JitterPolicy, ShapedRound};
use stitch_gauge::pattern_yardage;
use stitch_types::{
    Difficulty, Gauge, Pattern, RoundInstruction, ShapeParameters, StitchInstruction, StitchType,
};
use tracing::info;

use crate::error::{CompileError, CompileResult};
use crate::params::CompileParams;
use crate::schedule::MAGIC_RING_STITCHES;

/// Accumulates numbered rounds, tracking the live stitch count.
///
/// Every appended round must work into exactly the stitches the previous
/// round left; a mismatch is an invariant violation.
#[derive(Debug)]
pub(crate) struct RoundWriter {
    jitter: JitterPolicy,
    rounds: Vec<RoundInstruction>,
    current: u32,
}

impl RoundWriter {
    pub(crate) fn new(jitter: JitterPolicy) -> Self {
        Self {
            jitter,
            rounds: Vec::new(),
            current: 0,
        }
    }

    pub(crate) const fn current(&self) -> u32 {
        self.current
    }

    fn next_number(&self) -> CompileResult<u32> {
        u32::try_from(self.rounds.len()).map_err(|_| CompileError::invariant_violation("round count overflow"))
    }

    fn offset(&self) -> CompileResult<u32> {
        Ok(self.jitter.offset(self.next_number()?, 0))
    }

    /// Round 0: magic ring with six single crochet.
    pub(crate) fn magic_ring(&mut self) -> CompileResult<()> {
        let stitches = vec![
            StitchInstruction::new(StitchType::MagicRing, 1)?,
            StitchInstruction::new(StitchType::SingleCrochet, MAGIC_RING_STITCHES)?.with_target("ring"),
        ];
        self.push_foundation(stitches, MAGIC_RING_STITCHES, format!("Magic ring with {MAGIC_RING_STITCHES} sc"))
    }

    /// Round 0: chain ring with one single crochet in each chain.
    pub(crate) fn chain_ring(&mut self, stitches: u32) -> CompileResult<()> {
        let instructions = vec![
            StitchInstruction::new(StitchType::Chain, stitches)?.with_note("join with slst to form ring"),
            StitchInstruction::new(StitchType::SingleCrochet, stitches)?.with_target("each ch"),
        ];
        self.push_foundation(
            instructions,
            stitches,
            format!("Chain {stitches}, join with sl st to form ring"),
        )
    }

    fn push_foundation(&mut self, stitches: Vec<StitchInstruction>, total: u32, description: String) -> CompileResult<()> {
        if !self.rounds.is_empty() {
            return Err(CompileError::invariant_violation("foundation round after round 0"));
        }
        let round = RoundInstruction::new(0, stitches, total)?.with_description(description);
        self.rounds.push(round);
        self.current = total;
        Ok(())
    }

    pub(crate) fn increase(&mut self, changes: u32, label: &str) -> CompileResult<()> {
        let shaped = increase_round(self.current, changes, self.offset()?)?;
        self.push(shaped, label)
    }

    pub(crate) fn decrease(&mut self, changes: u32, label: &str) -> CompileResult<()> {
        let shaped = decrease_round(self.current, changes, self.offset()?)?;
        self.push(shaped, label)
    }

    pub(crate) fn steady(&mut self, label: &str) -> CompileResult<()> {
        let shaped = steady_round(self.current)?;
        self.push(shaped, label)
    }

    fn push(&mut self, shaped: ShapedRound, label: &str) -> CompileResult<()> {
        let number = self.next_number()?;
        if self.rounds.is_empty() {
            return Err(CompileError::invariant_violation("round 0 must be a foundation round"));
        }
        if shaped.consumed != self.current {
            return Err(CompileError::invariant_violation(format!(
                "round {number} works into {} stitches but {} are live",
                shaped.consumed, self.current
            )));
        }
        let produced = shaped.produced;
        let round = shaped
            .into_round(number)?
            .with_description(format!("Round {number}: {label}"));
        self.rounds.push(round);
        self.current = produced;
        Ok(())
    }

    pub(crate) fn into_rounds(self) -> Vec<RoundInstruction> {
        self.rounds
    }
}

/// Descriptive details a compiler contributes to its pattern.
pub(crate) struct Finish<'a> {
    pub shape: ShapeParameters,
    pub difficulty: Difficulty,
    pub tags: &'a [&'a str],
}

/// Validate the rounds and wrap them into a pattern with yardage notes.
pub(crate) fn finish_pattern(
    finish: Finish<'_>,
    gauge: &Gauge,
    params: &CompileParams,
    rounds: Vec<RoundInstruction>,
) -> CompileResult<Pattern> {
    let gauge_info = gauge.to_info().with_yarn_weight(params.yarn_weight);
    let mut builder = Pattern::builder(finish.shape, gauge_info)
        .engine_version(params.engine_version.clone())
        .difficulty(finish.difficulty)
        .tags(finish.tags.iter().copied())
        .rounds(rounds);
    if let Some(at) = params.generated_at {
        builder = builder.generated_at(at);
    }

    let draft = builder.clone().build()?;
    draft
        .verify_continuity()
        .map_err(|err| CompileError::invariant_violation(err.to_string()))?;

    let yardage = pattern_yardage(&draft, params.yarn_weight, &params.yarn_factors)?;
    let pattern = builder
        .notes(format!(
            "Work in continuous spiral rounds; do not join. Estimated yarn: {yardage:.1} m (includes 10% waste)."
        ))
        .build()?;

    info!(
        shape = %finish.shape.kind(),
        rounds = pattern.rounds().len(),
        max_stitches = pattern.max_stitches(),
        total_stitches = pattern.total_stitch_count(),
        yardage_m = yardage,
        "compiled pattern"
    );
    Ok(pattern)
}

/// Check that counts rise to a single plateau and fall back without reversing.
pub(crate) fn check_single_peak(counts: &[u32]) -> CompileResult<()> {
    let Some(max) = counts.iter().max() else {
        return Ok(());
    };
    let peak = counts.iter().position(|c| c == max).unwrap_or(0);
    let rising = counts[..=peak].windows(2).all(|w| w[0] <= w[1]);
    let falling = counts[peak..].windows(2).all(|w| w[0] >= w[1]);
    if rising && falling {
        Ok(())
    } else {
        Err(CompileError::invariant_violation(format!(
            "stitch counts are not single-peaked: {counts:?}"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_tracks_count() {
        let mut writer = RoundWriter::new(JitterPolicy::default());
        writer.magic_ring().unwrap();
        writer.increase(6, "increase phase").unwrap();
        writer.increase(6, "increase phase").unwrap();
        writer.steady("steady").unwrap();
        writer.decrease(6, "decrease phase").unwrap();
        assert_eq!(writer.current(), 12);

        let rounds = writer.into_rounds();
        let counts: Vec<u32> = rounds.iter().map(RoundInstruction::total_stitches).collect();
        assert_eq!(counts, vec![6, 12, 18, 18, 12]);
        assert_eq!(rounds[1].description(), Some("Round 1: increase phase"));
        assert_eq!(rounds[0].description(), Some("Magic ring with 6 sc"));
    }

    #[test]
    fn test_writer_requires_foundation() {
        let mut writer = RoundWriter::new(JitterPolicy::default());
        assert!(writer.steady("body").is_err());
        writer.chain_ring(20).unwrap();
        assert!(writer.chain_ring(20).is_err());
        writer.steady("body").unwrap();
        assert_eq!(writer.into_rounds()[1].consumed_stitches(), 20);
    }

    #[test]
    fn test_writer_surfaces_capacity() {
        let mut writer = RoundWriter::new(JitterPolicy::default());
        writer.magic_ring().unwrap();
        let err = writer.increase(7, "too many").unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_single_peak() {
        assert!(check_single_peak(&[6, 12, 18, 18, 12, 6]).is_ok());
        assert!(check_single_peak(&[6, 6, 6]).is_ok());
        assert!(check_single_peak(&[6, 12, 6, 12, 6]).is_err());
        assert!(check_single_peak(&[]).is_ok());
    }
}
