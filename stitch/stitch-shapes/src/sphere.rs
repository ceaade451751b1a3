//! Sphere compiler.

use stitch_types::{Difficulty, Gauge, Pattern, RoundInstruction, ShapeParameters};
use tracing::{debug, info};

use crate::assemble::{check_single_peak, finish_pattern, Finish, RoundWriter};
use crate::compiler::ShapeCompiler;
use crate::error::{CompileError, CompileResult};
use crate::params::CompileParams;
use crate::schedule::{circumference_for, plan_increases, rounds_for, MAGIC_RING_STITCHES};

/// Compiles a closed ball worked from a magic ring.
///
/// The pattern has four phases: a magic ring of six stitches, increase
/// rounds out to the equator, one or two steady rounds, and decrease rounds
/// that mirror the increases back to six.
///
/// # Example
///
/// ```
/// use stitch_shapes::{CompileParams, ShapeCompiler, SphereCompiler};
/// use stitch_types::Gauge;
///
/// let gauge = Gauge::new(14.0, 16.0).unwrap();
/// let pattern = SphereCompiler::new(10.0).compile(&gauge, &CompileParams::default()).unwrap();
/// assert_eq!(pattern.max_stitches(), 44);
/// assert_eq!(pattern.rounds().len(), 19);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCompiler {
    diameter_cm: f64,
}

impl SphereCompiler {
    /// Compiler for a sphere of the given diameter.
    #[must_use]
    pub const fn new(diameter_cm: f64) -> Self {
        Self { diameter_cm }
    }

    /// Compile a sphere in one call.
    pub fn generate(diameter_cm: f64, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern> {
        Self::new(diameter_cm).compile(gauge, params)
    }

    /// Diameter in centimeters.
    #[must_use]
    pub const fn diameter_cm(&self) -> f64 {
        self.diameter_cm
    }

    fn validate(&self, gauge: &Gauge, params: &CompileParams) -> CompileResult<ShapeParameters> {
        params.validate()?;
        let shape = ShapeParameters::sphere(self.diameter_cm)?;
        let minimum = params.limits.min_sphere_diameter_cm;
        if self.diameter_cm < minimum {
            return Err(CompileError::invalid_parameter(
                "diameter_cm",
                format!("{} cm is below the {minimum} cm minimum", self.diameter_cm),
            ));
        }
        params.limits.check_gauge(gauge)?;
        Ok(shape)
    }
}

impl ShapeCompiler for SphereCompiler {
    fn shape(&self) -> CompileResult<ShapeParameters> {
        Ok(ShapeParameters::sphere(self.diameter_cm)?)
    }

    fn compile(&self, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern> {
        let shape = self.validate(gauge, params)?;

        let limits = &params.limits;
        let equator = circumference_for("diameter_cm", self.diameter_cm, gauge.stitches_per_10cm())?;
        limits.check_stitches("diameter_cm", equator)?;
        let increase_rounds = rounds_for("diameter_cm", self.diameter_cm / 2.0, gauge.rows_per_10cm())?;
        limits.check_rounds(
            "diameter_cm",
            1 + 2 * u64::from(increase_rounds) + u64::from(params.equator_rounds),
        )?;
        info!(
            diameter_cm = self.diameter_cm,
            equator,
            increase_rounds,
            "compiling sphere"
        );

        let plan = plan_increases(MAGIC_RING_STITCHES, equator, increase_rounds)?;
        debug!(?plan, equator_rounds = params.equator_rounds, "sphere schedule");

        let mut writer = RoundWriter::new(params.jitter);
        writer.magic_ring()?;
        for &changes in &plan {
            writer.increase(changes, "increase phase")?;
        }
        for _ in 0..params.equator_rounds {
            writer.steady("steady at equator")?;
        }
        for &changes in plan.iter().rev() {
            writer.decrease(changes, "decrease phase")?;
        }

        if writer.current() != MAGIC_RING_STITCHES {
            return Err(CompileError::invariant_violation(format!(
                "sphere closes with {} stitches instead of {MAGIC_RING_STITCHES}",
                writer.current()
            )));
        }
        let rounds = writer.into_rounds();
        let counts: Vec<u32> = rounds.iter().map(RoundInstruction::total_stitches).collect();
        check_single_peak(&counts)?;

        finish_pattern(
            Finish {
                shape,
                difficulty: Difficulty::Intermediate,
                tags: &["sphere", "amigurumi", "3D"],
            },
            gauge,
            params,
            rounds,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stitch_types::StitchType;

    fn worsted() -> Gauge {
        Gauge::new(14.0, 16.0).unwrap()
    }

    fn compile(diameter_cm: f64) -> CompileResult<Pattern> {
        SphereCompiler::new(diameter_cm).compile(&worsted(), &CompileParams::default())
    }

    #[test]
    fn test_reference_sphere() {
        let pattern = compile(10.0).unwrap();
        assert_eq!(
            pattern.stitch_counts(),
            vec![6, 10, 14, 19, 24, 29, 34, 39, 44, 44, 44, 39, 34, 29, 24, 19, 14, 10, 6]
        );
        assert_eq!(pattern.metadata().total_rounds(), 19);
        assert_eq!(pattern.metadata().difficulty(), Some(Difficulty::Intermediate));
        assert_eq!(pattern.metadata().tags(), ["sphere", "amigurumi", "3D"]);
    }

    #[test]
    fn test_round_zero_is_magic_ring() {
        let pattern = compile(10.0).unwrap();
        let first = &pattern.rounds()[0];
        assert_eq!(first.total_stitches(), 6);
        assert_eq!(first.stitches()[0].stitch_type(), &StitchType::MagicRing);
        assert_eq!(first.description(), Some("Magic ring with 6 sc"));
    }

    #[test]
    fn test_continuity_and_descriptions() {
        let pattern = compile(10.0).unwrap();
        pattern.verify_continuity().unwrap();
        assert_eq!(pattern.rounds()[1].description(), Some("Round 1: increase phase"));
        assert_eq!(pattern.rounds()[9].description(), Some("Round 9: steady at equator"));
        assert_eq!(pattern.rounds()[11].description(), Some("Round 11: decrease phase"));
    }

    #[test]
    fn test_single_equator_round() {
        let params = CompileParams::default().with_equator_rounds(1);
        let pattern = SphereCompiler::new(10.0).compile(&worsted(), &params).unwrap();
        assert_eq!(pattern.rounds().len(), 18);
        let at_max = pattern.stitch_counts().iter().filter(|c| **c == 44).count();
        assert_eq!(at_max, 2);
    }

    #[test]
    fn test_fine_gauge_equator() {
        let gauge = Gauge::new(18.0, 20.0).unwrap();
        let pattern = SphereCompiler::generate(8.0, &gauge, &CompileParams::default()).unwrap();
        assert_eq!(pattern.max_stitches(), 45);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(compile(0.0).unwrap_err().is_invalid_parameter());
        assert!(compile(-4.0).unwrap_err().is_invalid_parameter());
        assert!(compile(f64::NAN).unwrap_err().is_invalid_parameter());
        let err = compile(2.5).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("minimum"));

        let loose = Gauge::new(6.0, 8.0).unwrap();
        let err = SphereCompiler::new(10.0).compile(&loose, &CompileParams::default()).unwrap_err();
        assert!(err.is_invalid_parameter());

        let params = CompileParams::default().with_equator_rounds(4);
        assert!(SphereCompiler::new(10.0).compile(&worsted(), &params).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_oversized_sphere_is_rejected() {
        // 1e6 cm at 14 st is millions of stitches around
        let err = compile(1.0e6).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("diameter_cm"));
        assert!(compile(1.0e12).unwrap_err().is_invalid_parameter());

        let tall_rows = Gauge::new(14.0, 500.0).unwrap();
        let err = SphereCompiler::new(10.0).compile(&tall_rows, &CompileParams::default()).unwrap_err();
        assert!(err.to_string().contains("rows_per_10cm"));
    }

    #[test]
    fn test_notes_report_yardage() {
        let pattern = compile(10.0).unwrap();
        let notes = pattern.notes().unwrap();
        assert!(notes.starts_with("Work in continuous spiral rounds"));
        assert!(notes.contains(" m (includes 10% waste)"));
    }

    #[test]
    fn test_smallest_sphere() {
        let pattern = compile(3.0).unwrap();
        assert_eq!(pattern.stitch_counts().first(), Some(&6));
        assert_eq!(pattern.stitch_counts().last(), Some(&6));
        pattern.verify_continuity().unwrap();
    }
}
