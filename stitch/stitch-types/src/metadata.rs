//! Pattern metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Skill level required by a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Single crochet in spiral rounds only.
    Beginner,
    /// Shaping with increases and decreases.
    Intermediate,
    /// Anything beyond the two above.
    Advanced,
}

impl Difficulty {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive data attached to a compiled pattern.
///
/// `generated_at` is informational and does not take part in equality, so two
/// compilations of the same input compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternMetadata {
    generated_at: DateTime<Utc>,
    engine_version: String,
    total_rounds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    tags: Vec<String>,
}

impl PatternMetadata {
    /// Metadata stamped with the current time.
    #[must_use]
    pub fn new(engine_version: impl Into<String>, total_rounds: u32) -> Self {
        Self {
            generated_at: Utc::now(),
            engine_version: engine_version.into(),
            total_rounds,
            estimated_time_minutes: None,
            difficulty: None,
            tags: Vec::new(),
        }
    }

    /// Replace the generation timestamp.
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the time estimate.
    #[must_use]
    pub fn with_estimated_time_minutes(mut self, minutes: u32) -> Self {
        self.estimated_time_minutes = Some(minutes);
        self
    }

    /// Replace the tag list.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// When the pattern was generated.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Version of the engine that produced the pattern.
    #[must_use]
    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// Number of rounds in the pattern.
    #[must_use]
    pub const fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Estimated working time.
    #[must_use]
    pub const fn estimated_time_minutes(&self) -> Option<u32> {
        self.estimated_time_minutes
    }

    /// Skill level.
    #[must_use]
    pub const fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Free-form tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl PartialEq for PatternMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.engine_version == other.engine_version
            && self.total_rounds == other.total_rounds
            && self.estimated_time_minutes == other.estimated_time_minutes
            && self.difficulty == other.difficulty
            && self.tags == other.tags
    }
}

impl Eq for PatternMetadata {}
