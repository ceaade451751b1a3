//! Pattern compilers for spiral-round crochet shapes.
//!
//! Each compiler turns a [`ShapeParameters`](stitch_types::ShapeParameters)
//! and a swatch [`Gauge`](stitch_types::Gauge) into a validated
//! [`Pattern`](stitch_types::Pattern):
//!
//! - [`SphereCompiler`]: magic ring, increases to the equator, one or two
//!   steady rounds, mirrored decreases
//! - [`CylinderCompiler`]: constant tube, either capped like a sphere or
//!   started from a chain ring
//! - [`ConeCompiler`]: linear taper from a chain ring
//!
//! [`compile`] dispatches on the shape. Every compiler checks its input
//! before generating rounds and verifies the finished pattern, so callers
//! get either a whole pattern or a [`CompileError`].
//!
//! # Layer 0
//!
//! Pure computation; logging goes through `tracing` and never installs a
//! subscriber.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use stitch_shapes::{compile, CompileParams};
//! use stitch_types::{Gauge, ShapeParameters};
//!
//! let gauge = Gauge::new(14.0, 16.0).unwrap();
//! let shape = ShapeParameters::sphere(10.0).unwrap();
//! let params = CompileParams::reproducible(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
//!
//! let first = compile(&shape, &gauge, &params).unwrap();
//! let second = compile(&shape, &gauge, &params).unwrap();
//! assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
//! assert_eq!(first.max_stitches(), 44);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod assemble;
mod compiler;
mod cone;
mod cylinder;
mod error;
mod params;
mod schedule;
mod sphere;

pub use compiler::{compile, ShapeCompiler};
pub use cone::{ConeCompiler, TaperDirection, MIN_CONE_CIRCUMFERENCE};
pub use cylinder::{CylinderCompiler, MIN_OPEN_CIRCUMFERENCE};
pub use error::{CompileError, CompileResult};
pub use params::{CompileParams, GaugeLimits, ENGINE_VERSION};
pub use schedule::{
    circumference_stitches, counts_from_changes, min_doubling_rounds, plan_increases, plan_taper,
    rounds_for_length, MAGIC_RING_STITCHES,
};
pub use sphere::SphereCompiler;
