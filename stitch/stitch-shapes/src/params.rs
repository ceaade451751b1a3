//! Compilation parameters and presets.

use chrono::{DateTime, Utc};
use stitch_distribute::JitterPolicy;
use stitch_gauge::YarnFactors;
use stitch_types::{Gauge, YarnWeight};
use tracing::warn;

use crate::error::{CompileError, CompileResult};
use crate::schedule::MAGIC_RING_STITCHES;

/// Engine version recorded in pattern metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Input ranges and output budget the compilers accept.
///
/// Gauge ranges are checked before anything is computed; the budget is
/// checked against the planned schedule before any round is allocated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLimits {
    /// Smallest stitch gauge, stitches per 10 cm.
    pub min_stitches_per_10cm: f64,

    /// Largest stitch gauge, stitches per 10 cm.
    pub max_stitches_per_10cm: f64,

    /// Smallest row gauge, rows per 10 cm.
    pub min_rows_per_10cm: f64,

    /// Largest row gauge, rows per 10 cm.
    pub max_rows_per_10cm: f64,

    /// Smallest sphere diameter in cm.
    pub min_sphere_diameter_cm: f64,

    /// Most rounds in one pattern, foundation included.
    pub max_rounds: u32,

    /// Most stitches in one round.
    pub max_stitches_per_round: u32,
}

impl GaugeLimits {
    /// Default lower stitch gauge bound.
    pub const DEFAULT_MIN_STITCHES: f64 = 8.0;
    /// Default upper stitch gauge bound.
    pub const DEFAULT_MAX_STITCHES: f64 = 25.0;
    /// Default lower row gauge bound.
    pub const DEFAULT_MIN_ROWS: f64 = 5.0;
    /// Default upper row gauge bound.
    pub const DEFAULT_MAX_ROWS: f64 = 40.0;
    /// Default minimum sphere diameter.
    pub const DEFAULT_MIN_SPHERE_DIAMETER: f64 = 3.0;
    /// Default round budget.
    pub const DEFAULT_MAX_ROUNDS: u32 = 2_000;
    /// Default per-round stitch budget.
    pub const DEFAULT_MAX_STITCHES_PER_ROUND: u32 = 5_000;

    /// Limits with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_stitches_per_10cm: Self::DEFAULT_MIN_STITCHES,
            max_stitches_per_10cm: Self::DEFAULT_MAX_STITCHES,
            min_rows_per_10cm: Self::DEFAULT_MIN_ROWS,
            max_rows_per_10cm: Self::DEFAULT_MAX_ROWS,
            min_sphere_diameter_cm: Self::DEFAULT_MIN_SPHERE_DIAMETER,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            max_stitches_per_round: Self::DEFAULT_MAX_STITCHES_PER_ROUND,
        }
    }

    /// Set the accepted stitch gauge range.
    #[must_use]
    pub const fn with_stitch_range(mut self, min: f64, max: f64) -> Self {
        self.min_stitches_per_10cm = min;
        self.max_stitches_per_10cm = max;
        self
    }

    /// Set the accepted row gauge range.
    #[must_use]
    pub const fn with_row_range(mut self, min: f64, max: f64) -> Self {
        self.min_rows_per_10cm = min;
        self.max_rows_per_10cm = max;
        self
    }

    /// Set the smallest sphere diameter.
    #[must_use]
    pub const fn with_min_sphere_diameter(mut self, diameter_cm: f64) -> Self {
        self.min_sphere_diameter_cm = diameter_cm;
        self
    }

    /// Set the round and per-round stitch budget.
    #[must_use]
    pub const fn with_budget(mut self, max_rounds: u32, max_stitches_per_round: u32) -> Self {
        self.max_rounds = max_rounds;
        self.max_stitches_per_round = max_stitches_per_round;
        self
    }

    /// Reject a stitch or row gauge outside the accepted ranges.
    pub fn check_gauge(&self, gauge: &Gauge) -> CompileResult<()> {
        let st = gauge.stitches_per_10cm();
        if st < self.min_stitches_per_10cm || st > self.max_stitches_per_10cm {
            return Err(CompileError::invalid_parameter(
                "stitches_per_10cm",
                format!(
                    "{st} is outside the supported range {}-{}",
                    self.min_stitches_per_10cm, self.max_stitches_per_10cm
                ),
            ));
        }
        let rows = gauge.rows_per_10cm();
        if rows < self.min_rows_per_10cm || rows > self.max_rows_per_10cm {
            return Err(CompileError::invalid_parameter(
                "rows_per_10cm",
                format!(
                    "{rows} is outside the supported range {}-{}",
                    self.min_rows_per_10cm, self.max_rows_per_10cm
                ),
            ));
        }
        Ok(())
    }

    /// Reject a round wider than the per-round budget.
    pub fn check_stitches(&self, parameter: &str, stitches: u32) -> CompileResult<()> {
        if stitches > self.max_stitches_per_round {
            return Err(CompileError::invalid_parameter(
                parameter,
                format!(
                    "needs {stitches} stitches in a round; the limit is {}",
                    self.max_stitches_per_round
                ),
            ));
        }
        Ok(())
    }

    /// Reject a schedule longer than the round budget.
    pub fn check_rounds(&self, parameter: &str, rounds: u64) -> CompileResult<()> {
        if rounds > u64::from(self.max_rounds) {
            return Err(CompileError::invalid_parameter(
                parameter,
                format!("needs {rounds} rounds; the limit is {}", self.max_rounds),
            ));
        }
        Ok(())
    }
}

impl Default for GaugeLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters shared by every shape compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileParams {
    /// Yarn weight for yardage and the recorded gauge. `None` uses worsted factors.
    pub yarn_weight: Option<YarnWeight>,

    /// Yarn consumption factors.
    pub yarn_factors: YarnFactors,

    /// Round-to-round offset policy.
    pub jitter: JitterPolicy,

    /// Accepted input ranges.
    pub limits: GaugeLimits,

    /// Steady rounds at a sphere's equator (1 or 2).
    pub equator_rounds: u32,

    /// Close cylinders with increase and decrease caps.
    pub has_caps: bool,

    /// Version string written to metadata.
    pub engine_version: String,

    /// Fixed generation timestamp; `None` stamps the current time.
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for CompileParams {
    fn default() -> Self {
        Self {
            yarn_weight: Some(YarnWeight::Worsted),
            yarn_factors: YarnFactors::default(),
            jitter: JitterPolicy::default(),
            limits: GaugeLimits::default(),
            equator_rounds: Self::DEFAULT_EQUATOR_ROUNDS,
            has_caps: true,
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: None,
        }
    }
}

impl CompileParams {
    /// Default steady rounds at a sphere's equator.
    pub const DEFAULT_EQUATOR_ROUNDS: u32 = 2;

    /// Default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for an open-ended tube (no cylinder caps).
    #[must_use]
    pub fn open_tube() -> Self {
        Self {
            has_caps: false,
            ..Default::default()
        }
    }

    /// Parameters for reproducible output: fixed timestamp, everything else default.
    #[must_use]
    pub fn reproducible(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
            ..Default::default()
        }
    }

    /// Set the yarn weight.
    #[must_use]
    pub fn with_yarn_weight(mut self, yarn_weight: YarnWeight) -> Self {
        self.yarn_weight = Some(yarn_weight);
        self
    }

    /// Set the yarn weight from a free-form label.
    ///
    /// Unknown labels fall back to worsted factors and record no weight.
    #[must_use]
    pub fn with_yarn_label(mut self, label: &str) -> Self {
        self.yarn_weight = YarnWeight::from_label(label);
        if self.yarn_weight.is_none() {
            warn!(label, "unknown yarn weight, using worsted factors");
        }
        self
    }

    /// Set the yarn factor table.
    #[must_use]
    pub fn with_yarn_factors(mut self, factors: YarnFactors) -> Self {
        self.yarn_factors = factors;
        self
    }

    /// Set the jitter policy.
    #[must_use]
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set the accepted input ranges.
    #[must_use]
    pub fn with_limits(mut self, limits: GaugeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the number of steady rounds at a sphere's equator.
    #[must_use]
    pub fn with_equator_rounds(mut self, rounds: u32) -> Self {
        self.equator_rounds = rounds;
        self
    }

    /// Enable or disable cylinder caps.
    #[must_use]
    pub fn with_caps(mut self, has_caps: bool) -> Self {
        self.has_caps = has_caps;
        self
    }

    /// Set the version string written to metadata.
    #[must_use]
    pub fn with_engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = version.into();
        self
    }

    /// Pin the generation timestamp.
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Check the parameters themselves.
    pub fn validate(&self) -> CompileResult<()> {
        if !(1..=2).contains(&self.equator_rounds) {
            return Err(CompileError::invalid_parameter(
                "equator_rounds",
                format!("must be 1 or 2, got {}", self.equator_rounds),
            ));
        }
        let limits = &self.limits;
        if !(limits.min_stitches_per_10cm > 0.0 && limits.min_stitches_per_10cm <= limits.max_stitches_per_10cm) {
            return Err(CompileError::invalid_parameter(
                "limits",
                "stitch gauge range must be positive and ordered",
            ));
        }
        if !(limits.min_rows_per_10cm > 0.0 && limits.min_rows_per_10cm <= limits.max_rows_per_10cm) {
            return Err(CompileError::invalid_parameter(
                "limits",
                "row gauge range must be positive and ordered",
            ));
        }
        if limits.max_rounds == 0 || limits.max_stitches_per_round < MAGIC_RING_STITCHES {
            return Err(CompileError::invalid_parameter(
                "limits",
                format!("budget must allow at least one round of {MAGIC_RING_STITCHES} stitches"),
            ));
        }
        Ok(())
    }
}
