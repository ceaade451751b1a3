//! Gauge mapping and yarn yardage estimation.
//!
//! Converts a swatch [`Gauge`](stitch_types::Gauge) into physical quantities:
//!
//! - [`stitch_length`] / [`stitch_length_with`]: average yarn per stitch,
//!   from stitch width and a per-weight [`YarnFactors`] table
//! - [`estimate_yardage`] / [`pattern_yardage`]: total yarn in meters,
//!   including a [`WASTE_FACTOR`] margin
//! - [`gauge_adjustment`]: compare a measured gauge against a target
//!
//! # Layer 0
//!
//! Pure arithmetic, no I/O.
//!
//! # Example
//!
//! ```
//! use stitch_gauge::{estimate_yardage, stitch_length};
//! use stitch_types::{Gauge, YarnWeight};
//!
//! let gauge = Gauge::new(14.0, 16.0).unwrap();
//! let per_stitch = stitch_length(&gauge, Some(YarnWeight::Worsted));
//! let meters = estimate_yardage(1000, per_stitch);
//! assert!((meters - 5.5).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod adjust;
mod yardage;

pub use adjust::{cm_to_inches, gauge_adjustment, inches_to_cm, GaugeAdjustment, CM_PER_INCH, GAUGE_TOLERANCE};
pub use yardage::{estimate_yardage, pattern_yardage, stitch_length, stitch_length_with, YarnFactors, WASTE_FACTOR};
