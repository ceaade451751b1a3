//! Shape parameters for the three supported shape families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, PatternError, PatternResult};

/// The shape families the engine can compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A closed ball worked from a magic ring.
    Sphere,
    /// A constant-circumference tube, open or capped.
    Cylinder,
    /// A linear taper between two circumferences.
    Cone,
}

impl ShapeKind {
    /// Lowercase name used in canonical output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = PatternError;

    fn from_str(s: &str) -> PatternResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "cylinder" => Ok(Self::Cylinder),
            "cone" => Ok(Self::Cone),
            _ => Err(PatternError::UnsupportedShape(s.to_string())),
        }
    }
}

/// Dimensions of a shape, in centimeters.
///
/// Serialized with a `shape_type` tag and only the dimensions that apply to
/// the shape. Use the constructors, which reject non-positive dimensions.
///
/// # Example
///
/// ```
/// use stitch_types::{ShapeKind, ShapeParameters};
///
/// let cone = ShapeParameters::cone(6.0, 2.0, 8.0).unwrap();
/// assert_eq!(cone.kind(), ShapeKind::Cone);
/// assert!(ShapeParameters::sphere(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape_type", rename_all = "lowercase", try_from = "ShapeFields")]
pub enum ShapeParameters {
    /// Sphere of the given diameter.
    Sphere {
        /// Diameter in centimeters.
        diameter_cm: f64,
    },
    /// Cylinder of the given diameter and body height.
    Cylinder {
        /// Diameter in centimeters.
        diameter_cm: f64,
        /// Body height in centimeters.
        height_cm: f64,
    },
    /// Cone tapering from the base diameter to the top diameter.
    Cone {
        /// Diameter where the work starts, in centimeters.
        base_diameter_cm: f64,
        /// Diameter where the work ends, in centimeters.
        top_diameter_cm: f64,
        /// Height in centimeters.
        height_cm: f64,
    },
}

/// Flat, loosely-typed shape description as it arrives from callers.
#[derive(Debug, Clone, Default, Deserialize)]
struct ShapeFields {
    shape_type: String,
    #[serde(default)]
    diameter_cm: Option<f64>,
    #[serde(default)]
    height_cm: Option<f64>,
    #[serde(default)]
    base_diameter_cm: Option<f64>,
    #[serde(default)]
    top_diameter_cm: Option<f64>,
}

impl TryFrom<ShapeFields> for ShapeParameters {
    type Error = PatternError;

    fn try_from(fields: ShapeFields) -> PatternResult<Self> {
        Self::from_fields(
            &fields.shape_type,
            fields.diameter_cm,
            fields.height_cm,
            fields.base_diameter_cm,
            fields.top_diameter_cm,
        )
    }
}

impl ShapeParameters {
    /// Sphere with the given diameter.
    pub fn sphere(diameter_cm: f64) -> PatternResult<Self> {
        Ok(Self::Sphere {
            diameter_cm: require_positive("diameter_cm", diameter_cm)?,
        })
    }

    /// Cylinder with the given diameter and height.
    pub fn cylinder(diameter_cm: f64, height_cm: f64) -> PatternResult<Self> {
        Ok(Self::Cylinder {
            diameter_cm: require_positive("diameter_cm", diameter_cm)?,
            height_cm: require_positive("height_cm", height_cm)?,
        })
    }

    /// Cone from `base_diameter_cm` to `top_diameter_cm` over `height_cm`.
    pub fn cone(base_diameter_cm: f64, top_diameter_cm: f64, height_cm: f64) -> PatternResult<Self> {
        Ok(Self::Cone {
            base_diameter_cm: require_positive("base_diameter_cm", base_diameter_cm)?,
            top_diameter_cm: require_positive("top_diameter_cm", top_diameter_cm)?,
            height_cm: require_positive("height_cm", height_cm)?,
        })
    }

    /// Build shape parameters from a shape name and optional dimensions.
    ///
    /// Dimensions that do not apply to the shape are ignored. A missing
    /// required dimension or an unknown shape name is an error.
    ///
    /// ```
    /// use stitch_types::ShapeParameters;
    ///
    /// let cyl = ShapeParameters::from_fields("cylinder", Some(8.0), Some(12.0), None, None);
    /// assert!(cyl.is_ok());
    ///
    /// let missing = ShapeParameters::from_fields("cylinder", Some(8.0), None, None, None);
    /// assert!(missing.is_err());
    /// ```
    pub fn from_fields(
        shape_type: &str,
        diameter_cm: Option<f64>,
        height_cm: Option<f64>,
        base_diameter_cm: Option<f64>,
        top_diameter_cm: Option<f64>,
    ) -> PatternResult<Self> {
        let kind: ShapeKind = shape_type.parse()?;
        let need = |value: Option<f64>, dimension: &'static str| {
            value.ok_or(PatternError::MissingDimension {
                shape: kind,
                dimension,
            })
        };

        match kind {
            ShapeKind::Sphere => Self::sphere(need(diameter_cm, "diameter_cm")?),
            ShapeKind::Cylinder => Self::cylinder(
                need(diameter_cm, "diameter_cm")?,
                need(height_cm, "height_cm")?,
            ),
            ShapeKind::Cone => Self::cone(
                need(base_diameter_cm, "base_diameter_cm")?,
                need(top_diameter_cm, "top_diameter_cm")?,
                need(height_cm, "height_cm")?,
            ),
        }
    }

    /// Shape family.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Cylinder { .. } => ShapeKind::Cylinder,
            Self::Cone { .. } => ShapeKind::Cone,
        }
    }

    /// Re-check every dimension.
    ///
    /// Variants can be built directly, so aggregates call this before
    /// accepting a shape.
    pub fn validate(&self) -> PatternResult<()> {
        match *self {
            Self::Sphere { diameter_cm } => Self::sphere(diameter_cm).map(|_| ()),
            Self::Cylinder {
                diameter_cm,
                height_cm,
            } => Self::cylinder(diameter_cm, height_cm).map(|_| ()),
            Self::Cone {
                base_diameter_cm,
                top_diameter_cm,
                height_cm,
            } => Self::cone(base_diameter_cm, top_diameter_cm, height_cm).map(|_| ()),
        }
    }
}
