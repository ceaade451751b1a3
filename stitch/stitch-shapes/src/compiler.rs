//! The compiler trait and shape dispatch.

use stitch_types::{Gauge, Pattern, ShapeParameters};

use crate::cone::ConeCompiler;
use crate::cylinder::CylinderCompiler;
use crate::error::CompileResult;
use crate::params::CompileParams;
use crate::sphere::SphereCompiler;

/// A shape that compiles to a round-by-round pattern.
///
/// Implementations are stateless: the same shape, gauge and parameters
/// always produce the same rounds.
pub trait ShapeCompiler {
    /// The validated shape this compiler describes.
    fn shape(&self) -> CompileResult<ShapeParameters>;

    /// Compile the shape at the given gauge.
    fn compile(&self, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern>;
}

/// Compile any supported shape.
///
/// # Example
///
/// ```
/// use stitch_shapes::{compile, CompileParams};
/// use stitch_types::{Gauge, ShapeParameters};
///
/// let gauge = Gauge::new(14.0, 16.0).unwrap();
/// let shape = ShapeParameters::cylinder(8.0, 12.0).unwrap();
/// let pattern = compile(&shape, &gauge, &CompileParams::open_tube()).unwrap();
/// assert_eq!(pattern.max_stitches(), 35);
/// ```
pub fn compile(shape: &ShapeParameters, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern> {
    match *shape {
        ShapeParameters::Sphere { diameter_cm } => SphereCompiler::new(diameter_cm).compile(gauge, params),
        ShapeParameters::Cylinder {
            diameter_cm,
            height_cm,
        } => CylinderCompiler::new(diameter_cm, height_cm).compile(gauge, params),
        ShapeParameters::Cone {
            base_diameter_cm,
            top_diameter_cm,
            height_cm,
        } => ConeCompiler::new(base_diameter_cm, top_diameter_cm, height_cm).compile(gauge, params),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stitch_types::ShapeKind;

    #[test]
    fn test_dispatch_matches_direct() {
        let gauge = Gauge::new(14.0, 16.0).unwrap();
        let params = CompileParams::default();
        let shapes = [
            ShapeParameters::sphere(10.0).unwrap(),
            ShapeParameters::cylinder(8.0, 12.0).unwrap(),
            ShapeParameters::cone(6.0, 2.0, 8.0).unwrap(),
        ];
        for shape in &shapes {
            let pattern = compile(shape, &gauge, &params).unwrap();
            assert_eq!(pattern.shape(), shape);
        }

        let direct = SphereCompiler::new(10.0).compile(&gauge, &params).unwrap();
        let dispatched = compile(&shapes[0], &gauge, &params).unwrap();
        assert_eq!(direct.stitch_counts(), dispatched.stitch_counts());
    }

    #[test]
    fn test_trait_objects() {
        let compilers: Vec<Box<dyn ShapeCompiler>> = vec![
            Box::new(SphereCompiler::new(6.0)),
            Box::new(CylinderCompiler::new(5.0, 4.0)),
            Box::new(ConeCompiler::new(5.0, 3.0, 4.0)),
        ];
        let kinds: Vec<ShapeKind> = compilers.iter().map(|c| c.shape().unwrap().kind()).collect();
        assert_eq!(kinds, vec![ShapeKind::Sphere, ShapeKind::Cylinder, ShapeKind::Cone]);

        assert!(SphereCompiler::new(-1.0).shape().is_err());
    }
}
