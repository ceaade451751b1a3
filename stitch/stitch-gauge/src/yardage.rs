//! Stitch length and yarn yardage estimation.

use serde::{Deserialize, Serialize};
use stitch_types::{Gauge, Pattern, PatternResult, YarnWeight};

/// Multiplier applied to yarn totals for ends, swatching and rework.
pub const WASTE_FACTOR: f64 = 1.1;

/// Per-weight multipliers from stitch width to yarn consumed per stitch.
///
/// Unknown or unspecified weights use the worsted factor, as do lace, sport
/// and super bulky.
///
/// # Example
///
/// ```
/// use stitch_gauge::YarnFactors;
/// use stitch_types::YarnWeight;
///
/// let factors = YarnFactors::default();
/// assert_eq!(factors.factor(Some(YarnWeight::Bulky)), 0.9);
/// assert_eq!(factors.factor(None), factors.worsted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YarnFactors {
    /// Baby / fingering weight.
    pub baby: f64,
    /// DK weight.
    pub dk: f64,
    /// Worsted weight, also the fallback.
    pub worsted: f64,
    /// Bulky weight.
    pub bulky: f64,
}

impl YarnFactors {
    /// Default baby factor.
    pub const DEFAULT_BABY: f64 = 0.5;
    /// Default DK factor.
    pub const DEFAULT_DK: f64 = 0.6;
    /// Default worsted factor.
    pub const DEFAULT_WORSTED: f64 = 0.7;
    /// Default bulky factor.
    pub const DEFAULT_BULKY: f64 = 0.9;

    /// Factor table with the default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baby: Self::DEFAULT_BABY,
            dk: Self::DEFAULT_DK,
            worsted: Self::DEFAULT_WORSTED,
            bulky: Self::DEFAULT_BULKY,
        }
    }

    /// Set the factor for one weight.
    ///
    /// Weights without a field of their own share the worsted factor.
    #[must_use]
    pub const fn with_factor(mut self, weight: YarnWeight, factor: f64) -> Self {
        match weight {
            YarnWeight::Baby => self.baby = factor,
            YarnWeight::Dk => self.dk = factor,
            YarnWeight::Bulky => self.bulky = factor,
            YarnWeight::Worsted | YarnWeight::Lace | YarnWeight::Sport | YarnWeight::SuperBulky => {
                self.worsted = factor;
            }
        }
        self
    }

    /// Factor for a weight; `None` falls back to worsted.
    #[must_use]
    pub const fn factor(&self, weight: Option<YarnWeight>) -> f64 {
        match weight {
            Some(YarnWeight::Baby) => self.baby,
            Some(YarnWeight::Dk) => self.dk,
            Some(YarnWeight::Bulky) => self.bulky,
            Some(YarnWeight::Worsted | YarnWeight::Lace | YarnWeight::Sport | YarnWeight::SuperBulky) | None => {
                self.worsted
            }
        }
    }
}

impl Default for YarnFactors {
    fn default() -> Self {
        Self::new()
    }
}

/// Average yarn consumed per stitch, in centimeters, using the default factors.
///
/// ```
/// use stitch_gauge::stitch_length;
/// use stitch_types::{Gauge, YarnWeight};
///
/// let gauge = Gauge::new(14.0, 16.0).unwrap();
/// let len = stitch_length(&gauge, Some(YarnWeight::Worsted));
/// assert!((len - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn stitch_length(gauge: &Gauge, yarn_weight: Option<YarnWeight>) -> f64 {
    stitch_length_with(gauge, yarn_weight, &YarnFactors::default())
}

/// Average yarn consumed per stitch, in centimeters, with an explicit factor table.
#[must_use]
pub fn stitch_length_with(gauge: &Gauge, yarn_weight: Option<YarnWeight>, factors: &YarnFactors) -> f64 {
    gauge.stitch_width_cm() * factors.factor(yarn_weight)
}

/// Yarn needed for `stitch_count` stitches, in meters, waste included.
///
/// ```
/// use stitch_gauge::estimate_yardage;
///
/// assert!((estimate_yardage(200, 0.5) - 1.1).abs() < 1e-12);
/// assert_eq!(estimate_yardage(0, 0.5), 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_yardage(stitch_count: u64, stitch_length_cm: f64) -> f64 {
    if stitch_count == 0 {
        return 0.0;
    }
    (stitch_count as f64 * stitch_length_cm / 100.0) * WASTE_FACTOR
}

/// Yarn needed for a whole pattern, in meters, waste included.
///
/// Sums every round's stitch count and uses the gauge recorded in the
/// pattern.
pub fn pattern_yardage(pattern: &Pattern, yarn_weight: Option<YarnWeight>, factors: &YarnFactors) -> PatternResult<f64> {
    let gauge = Gauge::from_info(pattern.gauge())?;
    let length = stitch_length_with(&gauge, yarn_weight, factors);
    Ok(estimate_yardage(pattern.total_stitch_count(), length))
}
