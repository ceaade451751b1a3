//! Cylinder compiler.

use stitch_types::{Difficulty, Gauge, Pattern, RoundInstruction, ShapeParameters};
use tracing::{debug, info};

use crate::assemble::{check_single_peak, finish_pattern, Finish, RoundWriter};
use crate::compiler::ShapeCompiler;
use crate::error::{CompileError, CompileResult};
use crate::params::CompileParams;
use crate::schedule::{circumference_for, plan_increases, rounds_for, MAGIC_RING_STITCHES};

/// Smallest circumference an open tube can start from.
pub const MIN_OPEN_CIRCUMFERENCE: u32 = 3;

/// Compiles a tube of constant circumference.
///
/// With caps (the default) the tube is closed at both ends by hemisphere
/// caps built exactly like a sphere's increase and decrease phases, each
/// about a quarter of the diameter tall. Without caps it starts from a
/// joined chain ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderCompiler {
    diameter_cm: f64,
    height_cm: f64,
}

impl CylinderCompiler {
    /// Compiler for a cylinder of the given diameter and body height.
    #[must_use]
    pub const fn new(diameter_cm: f64, height_cm: f64) -> Self {
        Self {
            diameter_cm,
            height_cm,
        }
    }

    /// Compile a cylinder in one call.
    pub fn generate(
        diameter_cm: f64,
        height_cm: f64,
        gauge: &Gauge,
        params: &CompileParams,
    ) -> CompileResult<Pattern> {
        Self::new(diameter_cm, height_cm).compile(gauge, params)
    }

    fn emit_capped(
        writer: &mut RoundWriter,
        circumference: u32,
        cap_rounds: u32,
        body_rounds: u32,
    ) -> CompileResult<()> {
        let plan = plan_increases(MAGIC_RING_STITCHES, circumference, cap_rounds)?;
        debug!(?plan, body_rounds, "cylinder cap schedule");

        writer.magic_ring()?;
        for &changes in &plan {
            writer.increase(changes, "bottom cap increase")?;
        }
        for _ in 0..body_rounds {
            writer.steady("body section")?;
        }
        for &changes in plan.iter().rev() {
            writer.decrease(changes, "top cap decrease")?;
        }
        Ok(())
    }

    fn emit_open(writer: &mut RoundWriter, circumference: u32, body_rounds: u32) -> CompileResult<()> {
        writer.chain_ring(circumference)?;
        for _ in 0..body_rounds {
            writer.steady("body section")?;
        }
        Ok(())
    }
}

impl ShapeCompiler for CylinderCompiler {
    fn shape(&self) -> CompileResult<ShapeParameters> {
        Ok(ShapeParameters::cylinder(self.diameter_cm, self.height_cm)?)
    }

    fn compile(&self, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern> {
        params.validate()?;
        let shape = self.shape()?;
        params.limits.check_gauge(gauge)?;

        let limits = &params.limits;
        let circumference = circumference_for("diameter_cm", self.diameter_cm, gauge.stitches_per_10cm())?;
        limits.check_stitches("diameter_cm", circumference)?;
        let minimum = if params.has_caps {
            MAGIC_RING_STITCHES
        } else {
            MIN_OPEN_CIRCUMFERENCE
        };
        if circumference < minimum {
            return Err(CompileError::invalid_parameter(
                "diameter_cm",
                format!(
                    "{} cm gives {circumference} stitches around; at least {minimum} are needed",
                    self.diameter_cm
                ),
            ));
        }

        let body_rounds = rounds_for("height_cm", self.height_cm, gauge.rows_per_10cm())?;
        let cap_rounds = rounds_for("diameter_cm", self.diameter_cm / 4.0, gauge.rows_per_10cm())?;
        let caps = if params.has_caps { 2 * u64::from(cap_rounds) } else { 0 };
        limits.check_rounds("height_cm", 1 + caps + u64::from(body_rounds))?;
        info!(
            diameter_cm = self.diameter_cm,
            height_cm = self.height_cm,
            circumference,
            body_rounds,
            has_caps = params.has_caps,
            "compiling cylinder"
        );

        let mut writer = RoundWriter::new(params.jitter);
        if params.has_caps {
            Self::emit_capped(&mut writer, circumference, cap_rounds, body_rounds)?;
        } else {
            Self::emit_open(&mut writer, circumference, body_rounds)?;
        }
        let rounds = writer.into_rounds();
        let counts: Vec<u32> = rounds.iter().map(RoundInstruction::total_stitches).collect();
        check_single_peak(&counts)?;

        let (difficulty, finish_tag) = if params.has_caps {
            (Difficulty::Intermediate, "capped")
        } else {
            (Difficulty::Beginner, "open")
        };
        finish_pattern(
            Finish {
                shape,
                difficulty,
                tags: &["cylinder", "tube", "3D", finish_tag],
            },
            gauge,
            params,
            rounds,
        )
    }
}
