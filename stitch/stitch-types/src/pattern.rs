//! The compiled pattern aggregate and its canonical JSON form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};
use crate::gauge::GaugeInfo;
use crate::metadata::{Difficulty, PatternMetadata};
use crate::round::RoundInstruction;
use crate::shape::ShapeParameters;

/// A complete, validated crochet pattern.
///
/// Invariants, checked by [`Pattern::new`], [`PatternBuilder::build`] and
/// deserialization:
///
/// - at least one round;
/// - `rounds[i].round_number() == i`;
/// - `metadata.total_rounds() == rounds.len()`;
/// - every shape dimension is positive and finite.
///
/// Serialization always writes the five top-level keys `shape`, `gauge`,
/// `rounds`, `metadata` and `notes` (`notes` is `null` when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatternRepr")]
pub struct Pattern {
    shape: ShapeParameters,
    gauge: GaugeInfo,
    rounds: Vec<RoundInstruction>,
    metadata: PatternMetadata,
    notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternRepr {
    shape: ShapeParameters,
    gauge: GaugeInfo,
    rounds: Vec<RoundInstruction>,
    metadata: PatternMetadata,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<PatternRepr> for Pattern {
    type Error = PatternError;

    fn try_from(repr: PatternRepr) -> PatternResult<Self> {
        Self::new(repr.shape, repr.gauge, repr.rounds, repr.metadata, repr.notes)
    }
}

impl Pattern {
    /// Assemble a pattern, checking every structural invariant.
    pub fn new(
        shape: ShapeParameters,
        gauge: GaugeInfo,
        rounds: Vec<RoundInstruction>,
        metadata: PatternMetadata,
        notes: Option<String>,
    ) -> PatternResult<Self> {
        shape.validate()?;

        if rounds.is_empty() {
            return Err(PatternError::invalid_structure("a pattern needs at least one round"));
        }

        for (index, round) in rounds.iter().enumerate() {
            if usize::try_from(round.round_number()).ok() != Some(index) {
                return Err(PatternError::invalid_structure(format!(
                    "round at position {index} is numbered {}",
                    round.round_number()
                )));
            }
        }

        if usize::try_from(metadata.total_rounds()).ok() != Some(rounds.len()) {
            return Err(PatternError::invalid_structure(format!(
                "metadata lists {} rounds but the pattern has {}",
                metadata.total_rounds(),
                rounds.len()
            )));
        }

        Ok(Self {
            shape,
            gauge,
            rounds,
            metadata,
            notes,
        })
    }

    /// Start a builder for the given shape and gauge.
    #[must_use]
    pub fn builder(shape: ShapeParameters, gauge: GaugeInfo) -> PatternBuilder {
        PatternBuilder::new(shape, gauge)
    }

    /// Target shape.
    #[must_use]
    pub const fn shape(&self) -> &ShapeParameters {
        &self.shape
    }

    /// Gauge the pattern was computed for.
    #[must_use]
    pub const fn gauge(&self) -> &GaugeInfo {
        &self.gauge
    }

    /// Ordered rounds.
    #[must_use]
    pub fn rounds(&self) -> &[RoundInstruction] {
        &self.rounds
    }

    /// Metadata.
    #[must_use]
    pub const fn metadata(&self) -> &PatternMetadata {
        &self.metadata
    }

    /// Free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Stitch count at the end of each round.
    #[must_use]
    pub fn stitch_counts(&self) -> Vec<u32> {
        self.rounds.iter().map(RoundInstruction::total_stitches).collect()
    }

    /// Sum of every round's stitch count.
    #[must_use]
    pub fn total_stitch_count(&self) -> u64 {
        self.rounds.iter().map(|r| u64::from(r.total_stitches())).sum()
    }

    /// Largest stitch count reached.
    #[must_use]
    pub fn max_stitches(&self) -> u32 {
        self.rounds.iter().map(RoundInstruction::total_stitches).max().unwrap_or(0)
    }

    /// Check that each round works into exactly the stitches the previous one left.
    ///
    /// Foundation rounds (magic ring, chain) start fresh and are skipped.
    pub fn verify_continuity(&self) -> PatternResult<()> {
        for pair in self.rounds.windows(2) {
            let (prev, round) = (&pair[0], &pair[1]);
            if round.is_foundation() {
                continue;
            }
            let consumed = round.consumed_stitches();
            if consumed != u64::from(prev.total_stitches()) {
                return Err(PatternError::invalid_structure(format!(
                    "round {} works into {consumed} stitches but round {} ends with {}",
                    round.round_number(),
                    prev.round_number(),
                    prev.total_stitches()
                )));
            }
        }
        Ok(())
    }

    /// Canonical JSON value.
    pub fn to_canonical(&self) -> PatternResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a pattern from its canonical JSON value, re-validating it.
    pub fn from_canonical(value: serde_json::Value) -> PatternResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Compact canonical JSON text.
    pub fn to_json(&self) -> PatternResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented canonical JSON text.
    pub fn to_json_pretty(&self) -> PatternResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse canonical JSON text.
    pub fn from_json(json: &str) -> PatternResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Incremental pattern assembly.
///
/// The builder numbers nothing itself; rounds must arrive in order. Metadata
/// is derived at [`build`](Self::build) time so `total_rounds` always matches.
///
/// # Example
///
/// ```
/// use stitch_types::{Gauge, Pattern, RoundInstruction, ShapeParameters, StitchInstruction, StitchType};
///
/// let ring = RoundInstruction::new(
///     0,
///     vec![
///         StitchInstruction::new(StitchType::MagicRing, 1).unwrap(),
///         StitchInstruction::new(StitchType::SingleCrochet, 6).unwrap(),
///     ],
///     6,
/// )
/// .unwrap();
///
/// let pattern = Pattern::builder(ShapeParameters::sphere(3.0).unwrap(), Gauge::new(14.0, 16.0).unwrap().to_info())
///     .engine_version("test")
///     .round(ring)
///     .build()
///     .unwrap();
/// assert_eq!(pattern.metadata().total_rounds(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    shape: ShapeParameters,
    gauge: GaugeInfo,
    rounds: Vec<RoundInstruction>,
    engine_version: String,
    generated_at: Option<DateTime<Utc>>,
    difficulty: Option<Difficulty>,
    estimated_time_minutes: Option<u32>,
    tags: Vec<String>,
    notes: Option<String>,
}

impl PatternBuilder {
    /// New builder with no rounds.
    #[must_use]
    pub fn new(shape: ShapeParameters, gauge: GaugeInfo) -> Self {
        Self {
            shape,
            gauge,
            rounds: Vec::new(),
            engine_version: String::new(),
            generated_at: None,
            difficulty: None,
            estimated_time_minutes: None,
            tags: Vec::new(),
            notes: None,
        }
    }

    /// Append a round.
    #[must_use]
    pub fn round(mut self, round: RoundInstruction) -> Self {
        self.rounds.push(round);
        self
    }

    /// Append several rounds.
    #[must_use]
    pub fn rounds(mut self, rounds: impl IntoIterator<Item = RoundInstruction>) -> Self {
        self.rounds.extend(rounds);
        self
    }

    /// Record the producing engine version.
    #[must_use]
    pub fn engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = version.into();
        self
    }

    /// Pin the generation timestamp. Defaults to the time of `build`.
    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Set the difficulty.
    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the time estimate.
    #[must_use]
    pub fn estimated_time_minutes(mut self, minutes: u32) -> Self {
        self.estimated_time_minutes = Some(minutes);
        self
    }

    /// Replace the tags.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Number of rounds added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether no rounds have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Validate and produce the pattern.
    pub fn build(self) -> PatternResult<Pattern> {
        let total_rounds = u32::try_from(self.rounds.len())
            .map_err(|_| PatternError::invalid_structure("too many rounds"))?;

        let mut metadata = PatternMetadata::new(self.engine_version, total_rounds).with_tags(self.tags);
        if let Some(at) = self.generated_at {
            metadata = metadata.with_generated_at(at);
        }
        if let Some(difficulty) = self.difficulty {
            metadata = metadata.with_difficulty(difficulty);
        }
        if let Some(minutes) = self.estimated_time_minutes {
            metadata = metadata.with_estimated_time_minutes(minutes);
        }

        Pattern::new(self.shape, self.gauge, self.rounds, metadata, self.notes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::gauge::Gauge;
    use crate::stitch::{StitchInstruction, StitchType};

    fn instr(stitch: StitchType, count: u32) -> StitchInstruction {
        StitchInstruction::new(stitch, count).unwrap()
    }

    fn small_ball() -> PatternBuilder {
        let rounds = vec![
            RoundInstruction::new(
                0,
                vec![
                    instr(StitchType::MagicRing, 1),
                    instr(StitchType::SingleCrochet, 6).with_target("ring"),
                ],
                6,
            )
            .unwrap(),
            RoundInstruction::new(1, vec![instr(StitchType::Increase, 6)], 12).unwrap(),
            RoundInstruction::new(2, vec![instr(StitchType::SingleCrochet, 12)], 12).unwrap(),
            RoundInstruction::new(3, vec![instr(StitchType::Decrease, 6)], 6).unwrap(),
        ];
        Pattern::builder(
            ShapeParameters::sphere(3.0).unwrap(),
            Gauge::new(14.0, 16.0).unwrap().to_info(),
        )
        .engine_version("0.3.0")
        .generated_at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        .difficulty(Difficulty::Intermediate)
        .tags(["sphere"])
        .rounds(rounds)
    }

    #[test]
    fn test_build_and_accessors() {
        let pattern = small_ball().build().unwrap();
        assert_eq!(pattern.metadata().total_rounds(), 4);
        assert_eq!(pattern.stitch_counts(), vec![6, 12, 12, 6]);
        assert_eq!(pattern.total_stitch_count(), 36);
        assert_eq!(pattern.max_stitches(), 12);
        assert!(pattern.notes().is_none());
        pattern.verify_continuity().unwrap();
    }

    #[test]
    fn test_rejects_empty() {
        let err = Pattern::builder(
            ShapeParameters::sphere(3.0).unwrap(),
            Gauge::new(14.0, 16.0).unwrap().to_info(),
        )
        .build()
        .unwrap_err();
        assert!(err.is_invalid_structure());
    }

    #[test]
    fn test_rejects_bad_numbering() {
        let err = small_ball()
            .round(RoundInstruction::new(7, vec![instr(StitchType::SingleCrochet, 6)], 6).unwrap())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("numbered 7"));
    }

    #[test]
    fn test_rejects_metadata_mismatch() {
        let pattern = small_ball().build().unwrap();
        let err = Pattern::new(
            *pattern.shape(),
            pattern.gauge().clone(),
            pattern.rounds().to_vec(),
            PatternMetadata::new("0.3.0", 9),
            None,
        )
        .unwrap_err();
        assert!(err.is_invalid_structure());
    }

    #[test]
    fn test_continuity_violation_detected() {
        let pattern = small_ball()
            .round(RoundInstruction::new(4, vec![instr(StitchType::SingleCrochet, 9)], 9).unwrap())
            .build()
            .unwrap();
        assert!(pattern.verify_continuity().is_err());
    }

    #[test]
    fn test_canonical_keys_and_null_notes() {
        let pattern = small_ball().build().unwrap();
        let value = pattern.to_canonical().unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["gauge", "metadata", "notes", "rounds", "shape"]);
        assert!(obj["notes"].is_null());
        assert!(obj["gauge"].get("hook_size_mm").is_none());
        assert!(obj["rounds"][1].get("description").is_none());
    }

    #[test]
    fn test_round_trip() {
        let pattern = small_ball().notes("Work in continuous rounds.").build().unwrap();
        let back = Pattern::from_json(&pattern.to_json().unwrap()).unwrap();
        assert_eq!(back, pattern);
        assert_eq!(back.metadata().generated_at(), pattern.metadata().generated_at());

        let back = Pattern::from_canonical(pattern.to_canonical().unwrap()).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_decode_rejects_invalid() {
        let pattern = small_ball().build().unwrap();
        let mut value = pattern.to_canonical().unwrap();
        value["metadata"]["total_rounds"] = serde_json::json!(2);
        assert!(Pattern::from_canonical(value).is_err());

        let mut value = pattern.to_canonical().unwrap();
        value["extra"] = serde_json::json!(true);
        assert!(Pattern::from_canonical(value).is_err());

        assert!(Pattern::from_json("{not json").is_err());
    }
}
