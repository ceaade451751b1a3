//! Gauge comparison and unit conversion.

use serde::{Deserialize, Serialize};
use stitch_types::Gauge;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Relative deviation under which a measured gauge counts as on target.
pub const GAUGE_TOLERANCE: f64 = 0.05;

/// How far a measured gauge is from the gauge a pattern was written for.
///
/// Factors are `target / actual`, rounded to three decimals. A factor above
/// one means the measured fabric is looser than intended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeAdjustment {
    /// Stitch density ratio.
    pub stitch_factor: f64,
    /// Row density ratio.
    pub row_factor: f64,
    /// Advice for the maker.
    pub recommendation: String,
}

impl GaugeAdjustment {
    /// Whether both factors are within tolerance.
    #[must_use]
    pub fn is_on_target(&self) -> bool {
        (self.stitch_factor - 1.0).abs() < GAUGE_TOLERANCE && (self.row_factor - 1.0).abs() < GAUGE_TOLERANCE
    }
}

/// Compare a measured gauge against a target gauge.
///
/// ```
/// use stitch_gauge::gauge_adjustment;
/// use stitch_types::Gauge;
///
/// let target = Gauge::new(30.0, 35.0).unwrap();
/// let actual = Gauge::new(28.0, 33.0).unwrap();
/// let adj = gauge_adjustment(&target, &actual);
/// assert_eq!(adj.stitch_factor, 1.071);
/// assert!(adj.recommendation.contains("smaller hook"));
/// ```
#[must_use]
pub fn gauge_adjustment(target: &Gauge, actual: &Gauge) -> GaugeAdjustment {
    let stitch_factor = target.stitches_per_10cm() / actual.stitches_per_10cm();
    let row_factor = target.rows_per_10cm() / actual.rows_per_10cm();

    GaugeAdjustment {
        stitch_factor: round3(stitch_factor),
        row_factor: round3(row_factor),
        recommendation: recommendation(stitch_factor, row_factor),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn recommendation(stitch_factor: f64, row_factor: f64) -> String {
    if (stitch_factor - 1.0).abs() < GAUGE_TOLERANCE && (row_factor - 1.0).abs() < GAUGE_TOLERANCE {
        return "Gauge is close to target. Proceed with pattern.".to_string();
    }

    let mut advice = Vec::new();
    if stitch_factor > 1.0 + GAUGE_TOLERANCE {
        advice.push("Try a smaller hook size to increase stitch density");
    } else if stitch_factor < 1.0 - GAUGE_TOLERANCE {
        advice.push("Try a larger hook size to decrease stitch density");
    }
    if row_factor > 1.0 + GAUGE_TOLERANCE {
        advice.push("Rows are too loose - adjust tension or hook size");
    } else if row_factor < 1.0 - GAUGE_TOLERANCE {
        advice.push("Rows are too tight - adjust tension or hook size");
    }

    if advice.is_empty() {
        "Gauge is acceptable".to_string()
    } else {
        advice.join("; ")
    }
}

/// Inches to centimeters.
#[must_use]
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Centimeters to inches.
#[must_use]
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}
