//! Gauge measurements and yarn weight categories.
//!
//! A [`Gauge`] is what the maker measures on a swatch (stitches and rows per
//! 10 cm). A [`GaugeInfo`] is what a finished pattern records, in per-centimeter
//! units, together with optional hook and yarn details.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, PatternError, PatternResult};

/// Measured gauge over a 10 cm swatch.
///
/// # Example
///
/// ```
/// use stitch_types::Gauge;
///
/// let gauge = Gauge::new(14.0, 16.0).unwrap();
/// assert!((gauge.stitch_width_cm() - 10.0 / 14.0).abs() < 1e-12);
/// assert!((gauge.rows_per_cm() - 1.6).abs() < 1e-12);
/// assert!(Gauge::new(0.0, 16.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GaugeRepr")]
pub struct Gauge {
    stitches_per_10cm: f64,
    rows_per_10cm: f64,
}

#[derive(Deserialize)]
struct GaugeRepr {
    stitches_per_10cm: f64,
    rows_per_10cm: f64,
}

impl TryFrom<GaugeRepr> for Gauge {
    type Error = PatternError;

    fn try_from(repr: GaugeRepr) -> PatternResult<Self> {
        Self::new(repr.stitches_per_10cm, repr.rows_per_10cm)
    }
}

impl Gauge {
    /// Create a gauge from stitch and row counts over 10 cm.
    ///
    /// Both counts must be positive and finite.
    pub fn new(stitches_per_10cm: f64, rows_per_10cm: f64) -> PatternResult<Self> {
        Ok(Self {
            stitches_per_10cm: require_positive("stitches_per_10cm", stitches_per_10cm)?,
            rows_per_10cm: require_positive("rows_per_10cm", rows_per_10cm)?,
        })
    }

    /// Recover the swatch gauge recorded in a pattern.
    pub fn from_info(info: &GaugeInfo) -> PatternResult<Self> {
        Self::new(info.stitches_per_cm() * 10.0, info.rows_per_cm() * 10.0)
    }

    /// Stitches per 10 cm.
    #[must_use]
    pub const fn stitches_per_10cm(&self) -> f64 {
        self.stitches_per_10cm
    }

    /// Rows per 10 cm.
    #[must_use]
    pub const fn rows_per_10cm(&self) -> f64 {
        self.rows_per_10cm
    }

    /// Stitches per centimeter.
    #[must_use]
    pub fn stitches_per_cm(&self) -> f64 {
        self.stitches_per_10cm / 10.0
    }

    /// Rows per centimeter.
    #[must_use]
    pub fn rows_per_cm(&self) -> f64 {
        self.rows_per_10cm / 10.0
    }

    /// Width of a single stitch in centimeters.
    #[must_use]
    pub fn stitch_width_cm(&self) -> f64 {
        10.0 / self.stitches_per_10cm
    }

    /// Height of a single row in centimeters.
    #[must_use]
    pub fn row_height_cm(&self) -> f64 {
        10.0 / self.rows_per_10cm
    }

    /// Convert to the per-centimeter form recorded in patterns.
    #[must_use]
    pub fn to_info(&self) -> GaugeInfo {
        GaugeInfo {
            stitches_per_cm: self.stitches_per_cm(),
            rows_per_cm: self.rows_per_cm(),
            hook_size_mm: None,
            yarn_weight: None,
            swatch_notes: None,
        }
    }
}

/// Yarn weight categories with distinct per-stitch yarn consumption.
///
/// Canonical names follow common pattern vocabulary: the baby category is
/// written `fingering`, and DK keeps its capitals. Lace, sport and super
/// bulky are accepted labels that have no yarn factor of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YarnWeight {
    /// Lace weight.
    #[serde(rename = "lace")]
    Lace,
    /// Baby / fingering weight.
    #[serde(rename = "fingering", alias = "baby")]
    Baby,
    /// Sport weight.
    #[serde(rename = "sport")]
    Sport,
    /// Double knitting (light worsted).
    #[serde(rename = "DK", alias = "dk")]
    Dk,
    /// Worsted (medium).
    #[serde(rename = "worsted")]
    Worsted,
    /// Bulky (chunky).
    #[serde(rename = "bulky")]
    Bulky,
    /// Super bulky (roving).
    #[serde(rename = "super_bulky", alias = "super bulky")]
    SuperBulky,
}

impl YarnWeight {
    /// All categories, finest first.
    pub const ALL: [Self; 7] = [
        Self::Lace,
        Self::Baby,
        Self::Sport,
        Self::Dk,
        Self::Worsted,
        Self::Bulky,
        Self::SuperBulky,
    ];

    /// Canonical label used in pattern output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lace => "lace",
            Self::Baby => "fingering",
            Self::Sport => "sport",
            Self::Dk => "DK",
            Self::Worsted => "worsted",
            Self::Bulky => "bulky",
            Self::SuperBulky => "super_bulky",
        }
    }

    /// Parse a caller label case-insensitively.
    ///
    /// Returns `None` for labels outside the vocabulary; callers treat those as
    /// worsted for yarn consumption.
    ///
    /// ```
    /// use stitch_types::YarnWeight;
    ///
    /// assert_eq!(YarnWeight::from_label("Baby"), Some(YarnWeight::Baby));
    /// assert_eq!(YarnWeight::from_label("dk"), Some(YarnWeight::Dk));
    /// assert_eq!(YarnWeight::from_label("mohair"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "lace" => Some(Self::Lace),
            "baby" | "fingering" => Some(Self::Baby),
            "sport" => Some(Self::Sport),
            "dk" => Some(Self::Dk),
            "worsted" => Some(Self::Worsted),
            "bulky" => Some(Self::Bulky),
            "super_bulky" | "super bulky" => Some(Self::SuperBulky),
            _ => None,
        }
    }
}

impl fmt::Display for YarnWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YarnWeight {
    type Err = PatternError;

    fn from_str(s: &str) -> PatternResult<Self> {
        Self::from_label(s).ok_or_else(|| {
            PatternError::invalid_parameter(
                "yarn_weight",
                format!("unknown yarn weight '{s}' (expected lace, baby, sport, dk, worsted, bulky or super_bulky)"),
            )
        })
    }
}

/// Gauge as recorded in a finished pattern (per-centimeter units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GaugeInfoRepr")]
pub struct GaugeInfo {
    stitches_per_cm: f64,
    rows_per_cm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    hook_size_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yarn_weight: Option<YarnWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swatch_notes: Option<String>,
}

#[derive(Deserialize)]
struct GaugeInfoRepr {
    stitches_per_cm: f64,
    rows_per_cm: f64,
    #[serde(default)]
    hook_size_mm: Option<f64>,
    #[serde(default)]
    yarn_weight: Option<YarnWeight>,
    #[serde(default)]
    swatch_notes: Option<String>,
}

impl TryFrom<GaugeInfoRepr> for GaugeInfo {
    type Error = PatternError;

    fn try_from(repr: GaugeInfoRepr) -> PatternResult<Self> {
        let mut info = Self::new(repr.stitches_per_cm, repr.rows_per_cm)?;
        if let Some(hook) = repr.hook_size_mm {
            info = info.with_hook_size_mm(hook)?;
        }
        info.yarn_weight = repr.yarn_weight;
        info.swatch_notes = repr.swatch_notes;
        Ok(info)
    }
}

impl GaugeInfo {
    /// Create gauge information from per-centimeter counts.
    pub fn new(stitches_per_cm: f64, rows_per_cm: f64) -> PatternResult<Self> {
        Ok(Self {
            stitches_per_cm: require_positive("stitches_per_cm", stitches_per_cm)?,
            rows_per_cm: require_positive("rows_per_cm", rows_per_cm)?,
            hook_size_mm: None,
            yarn_weight: None,
            swatch_notes: None,
        })
    }

    /// Set the recommended hook size.
    pub fn with_hook_size_mm(mut self, hook_size_mm: f64) -> PatternResult<Self> {
        self.hook_size_mm = Some(require_positive("hook_size_mm", hook_size_mm)?);
        Ok(self)
    }

    /// Set the yarn weight category.
    #[must_use]
    pub fn with_yarn_weight(mut self, yarn_weight: Option<YarnWeight>) -> Self {
        self.yarn_weight = yarn_weight;
        self
    }

    /// Attach free-form swatch notes.
    #[must_use]
    pub fn with_swatch_notes(mut self, notes: impl Into<String>) -> Self {
        self.swatch_notes = Some(notes.into());
        self
    }

    /// Stitches per centimeter.
    #[must_use]
    pub const fn stitches_per_cm(&self) -> f64 {
        self.stitches_per_cm
    }

    /// Rows per centimeter.
    #[must_use]
    pub const fn rows_per_cm(&self) -> f64 {
        self.rows_per_cm
    }

    /// Recommended hook size in millimeters.
    #[must_use]
    pub const fn hook_size_mm(&self) -> Option<f64> {
        self.hook_size_mm
    }

    /// Yarn weight category.
    #[must_use]
    pub const fn yarn_weight(&self) -> Option<YarnWeight> {
        self.yarn_weight
    }

    /// Swatch notes.
    #[must_use]
    pub fn swatch_notes(&self) -> Option<&str> {
        self.swatch_notes.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gauge_derived_values() {
        let gauge = Gauge::new(14.0, 16.0).unwrap();
        assert_relative_eq!(gauge.stitches_per_cm(), 1.4, epsilon = 1e-12);
        assert_relative_eq!(gauge.rows_per_cm(), 1.6, epsilon = 1e-12);
        assert_relative_eq!(gauge.stitch_width_cm(), 10.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(gauge.row_height_cm(), 0.625, epsilon = 1e-12);
    }

    #[test]
    fn test_gauge_rejects_bad_values() {
        assert!(Gauge::new(0.0, 16.0).is_err());
        assert!(Gauge::new(14.0, -1.0).is_err());
        assert!(Gauge::new(f64::NAN, 16.0).is_err());
    }

    #[test]
    fn test_gauge_info_round_trip_through_gauge() {
        let gauge = Gauge::new(18.0, 20.0).unwrap();
        let info = gauge.to_info();
        assert_relative_eq!(info.stitches_per_cm(), 1.8, epsilon = 1e-12);
        let back = Gauge::from_info(&info).unwrap();
        assert_relative_eq!(back.stitches_per_10cm(), 18.0, epsilon = 1e-9);
        assert_relative_eq!(back.rows_per_10cm(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_yarn_weight_labels() {
        assert_eq!(YarnWeight::from_label("BULKY"), Some(YarnWeight::Bulky));
        assert_eq!(YarnWeight::from_label(" Worsted "), Some(YarnWeight::Worsted));
        assert_eq!(YarnWeight::from_label("fingering"), Some(YarnWeight::Baby));
        assert_eq!(YarnWeight::from_label("lace"), Some(YarnWeight::Lace));
        assert_eq!(YarnWeight::from_label("Super Bulky"), Some(YarnWeight::SuperBulky));
        assert_eq!(YarnWeight::from_label("mohair"), None);
        assert!("mohair".parse::<YarnWeight>().is_err());
        assert_eq!("Dk".parse::<YarnWeight>().unwrap(), YarnWeight::Dk);
        assert_eq!(YarnWeight::Baby.to_string(), "fingering");
        assert_eq!(YarnWeight::Dk.to_string(), "DK");
    }

    #[test]
    fn test_yarn_weight_serde_names() {
        let json = serde_json::to_string(&YarnWeight::Dk).unwrap();
        assert_eq!(json, "\"DK\"");
        let weight: YarnWeight = serde_json::from_str("\"baby\"").unwrap();
        assert_eq!(weight, YarnWeight::Baby);
    }

    #[test]
    fn test_extra_yarn_weights_parse_in_gauge_info() {
        for (label, weight) in [
            ("lace", YarnWeight::Lace),
            ("sport", YarnWeight::Sport),
            ("super_bulky", YarnWeight::SuperBulky),
        ] {
            let json = format!(r#"{{"stitches_per_cm": 1.4, "rows_per_cm": 1.6, "yarn_weight": "{label}"}}"#);
            let info: GaugeInfo = serde_json::from_str(&json).unwrap();
            assert_eq!(info.yarn_weight(), Some(weight));
            assert_eq!(serde_json::to_value(&info).unwrap()["yarn_weight"], label);
        }
        assert_eq!(YarnWeight::ALL.len(), 7);
        assert!(YarnWeight::ALL.iter().all(|w| YarnWeight::from_label(w.as_str()) == Some(*w)));
    }

    #[test]
    fn test_gauge_info_serde_skips_absent_fields() {
        let info = GaugeInfo::new(1.4, 1.6)
            .unwrap()
            .with_yarn_weight(Some(YarnWeight::Worsted));
        let value = serde_json::to_value(&info).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("yarn_weight"));
        assert!(!obj.contains_key("hook_size_mm"));
        assert!(!obj.contains_key("swatch_notes"));
    }

    #[test]
    fn test_gauge_info_deserialize_validates() {
        let bad = r#"{"stitches_per_cm": 0.0, "rows_per_cm": 1.6}"#;
        assert!(serde_json::from_str::<GaugeInfo>(bad).is_err());

        let bad_hook = r#"{"stitches_per_cm": 1.4, "rows_per_cm": 1.6, "hook_size_mm": -4.0}"#;
        assert!(serde_json::from_str::<GaugeInfo>(bad_hook).is_err());

        let good = r#"{"stitches_per_cm": 1.4, "rows_per_cm": 1.6, "hook_size_mm": 4.0, "swatch_notes": "blocked"}"#;
        let info: GaugeInfo = serde_json::from_str(good).unwrap();
        assert_eq!(info.hook_size_mm(), Some(4.0));
        assert_eq!(info.swatch_notes(), Some("blocked"));
    }
}
