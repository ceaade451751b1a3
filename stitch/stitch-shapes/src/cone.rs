//! Cone compiler.

use std::fmt;

use stitch_types::{Difficulty, Gauge, Pattern, ShapeParameters};
use tracing::{debug, info};

use crate::assemble::{finish_pattern, Finish, RoundWriter};
use crate::compiler::ShapeCompiler;
use crate::error::{CompileError, CompileResult};
use crate::params::CompileParams;
use crate::schedule::{circumference_for, counts_from_changes, plan_taper, rounds_for};

/// Smallest circumference at either end of a cone.
pub const MIN_CONE_CIRCUMFERENCE: u32 = 3;

/// Whether a cone grows, shrinks or keeps its circumference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaperDirection {
    /// Top is wider than the base.
    Increase,
    /// Top is narrower than the base.
    Decrease,
    /// Both ends round to the same stitch count.
    Constant,
}

impl TaperDirection {
    /// Direction from the start and end stitch counts.
    #[must_use]
    pub const fn between(start: u32, end: u32) -> Self {
        if end > start {
            Self::Increase
        } else if end < start {
            Self::Decrease
        } else {
            Self::Constant
        }
    }
}

impl fmt::Display for TaperDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Constant => "constant",
        })
    }
}

/// Compiles a linear taper between two circumferences.
///
/// Work starts from a chain ring at the base and changes the count by
/// cumulative rounding: after round `r` of `n`, the total change is
/// `round(delta * r / n)`. Each round therefore changes by the floor or the
/// ceiling of `delta / n`.
///
/// # Example
///
/// ```
/// use stitch_shapes::{CompileParams, ConeCompiler, ShapeCompiler};
/// use stitch_types::Gauge;
///
/// let gauge = Gauge::new(14.0, 16.0).unwrap();
/// let pattern = ConeCompiler::new(6.0, 2.0, 8.0).compile(&gauge, &CompileParams::default()).unwrap();
/// assert_eq!(pattern.stitch_counts().first(), Some(&26));
/// assert_eq!(pattern.stitch_counts().last(), Some(&9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeCompiler {
    base_diameter_cm: f64,
    top_diameter_cm: f64,
    height_cm: f64,
}

impl ConeCompiler {
    /// Compiler for a cone from `base_diameter_cm` to `top_diameter_cm` over `height_cm`.
    #[must_use]
    pub const fn new(base_diameter_cm: f64, top_diameter_cm: f64, height_cm: f64) -> Self {
        Self {
            base_diameter_cm,
            top_diameter_cm,
            height_cm,
        }
    }

    /// Compile a cone in one call.
    pub fn generate(
        base_diameter_cm: f64,
        top_diameter_cm: f64,
        height_cm: f64,
        gauge: &Gauge,
        params: &CompileParams,
    ) -> CompileResult<Pattern> {
        Self::new(base_diameter_cm, top_diameter_cm, height_cm).compile(gauge, params)
    }

    fn end_stitches(parameter: &str, diameter_cm: f64, gauge: &Gauge, params: &CompileParams) -> CompileResult<u32> {
        let stitches = circumference_for(parameter, diameter_cm, gauge.stitches_per_10cm())?;
        params.limits.check_stitches(parameter, stitches)?;
        if stitches < MIN_CONE_CIRCUMFERENCE {
            return Err(CompileError::invalid_parameter(
                parameter,
                format!("{diameter_cm} cm gives {stitches} stitches around; at least {MIN_CONE_CIRCUMFERENCE} are needed"),
            ));
        }
        Ok(stitches)
    }

    /// Reject tapers that would need more changes in a round than it has room for.
    fn check_capacity(start: u32, plan: &[u32], direction: TaperDirection) -> CompileResult<()> {
        let increasing = direction == TaperDirection::Increase;
        let counts = counts_from_changes(start, plan, increasing);
        for (round, (&change, &current)) in plan.iter().zip(&counts).enumerate() {
            let capacity = if increasing { current } else { current / 2 };
            if change > capacity {
                return Err(CompileError::invalid_parameter(
                    "height_cm",
                    format!(
                        "taper too steep for the row gauge: round {} needs {change} {direction}s on {current} stitches",
                        round + 1
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl ShapeCompiler for ConeCompiler {
    fn shape(&self) -> CompileResult<ShapeParameters> {
        Ok(ShapeParameters::cone(
            self.base_diameter_cm,
            self.top_diameter_cm,
            self.height_cm,
        )?)
    }

    fn compile(&self, gauge: &Gauge, params: &CompileParams) -> CompileResult<Pattern> {
        params.validate()?;
        let shape = self.shape()?;
        params.limits.check_gauge(gauge)?;

        let start = Self::end_stitches("base_diameter_cm", self.base_diameter_cm, gauge, params)?;
        let end = Self::end_stitches("top_diameter_cm", self.top_diameter_cm, gauge, params)?;
        let total_rounds = rounds_for("height_cm", self.height_cm, gauge.rows_per_10cm())?;
        params.limits.check_rounds("height_cm", 1 + u64::from(total_rounds))?;
        let direction = TaperDirection::between(start, end);
        let delta = start.abs_diff(end);
        info!(start, end, total_rounds, %direction, "compiling cone");

        let plan = plan_taper(delta, total_rounds);
        debug!(?plan, "cone taper schedule");
        Self::check_capacity(start, &plan, direction)?;

        let label = format!("taper ({direction})");
        let mut writer = RoundWriter::new(params.jitter);
        writer.chain_ring(start)?;
        for &change in &plan {
            match direction {
                TaperDirection::Increase => writer.increase(change, &label)?,
                TaperDirection::Decrease => writer.decrease(change, &label)?,
                TaperDirection::Constant => writer.steady(&label)?,
            }
        }

        if writer.current() != end {
            return Err(CompileError::invariant_violation(format!(
                "cone ends with {} stitches instead of {end}",
                writer.current()
            )));
        }

        finish_pattern(
            Finish {
                shape,
                difficulty: Difficulty::Intermediate,
                tags: &["cone", "tapered", "limb", "3D"],
            },
            gauge,
            params,
            writer.into_rounds(),
        )
    }
}
