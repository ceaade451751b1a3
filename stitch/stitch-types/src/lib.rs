//! Pattern data model for parametric crochet shapes.
//!
//! This crate defines the values that flow through the stitch engine:
//!
//! - **Inputs**: [`Gauge`] measured on a swatch and [`ShapeParameters`]
//!   describing a sphere, cylinder or cone in centimeters
//! - **Instructions**: [`StitchInstruction`] (one stitch type, repeated) and
//!   [`RoundInstruction`] (one spiral round)
//! - **Output**: [`Pattern`], a validated sequence of rounds with
//!   [`PatternMetadata`] and a canonical JSON form
//!
//! Every type with an invariant is built through a constructor returning
//! [`PatternResult`]; deserialization goes through the same checks, so a
//! value in hand is always valid.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine logic; it only models data.
//!
//! # Stitch accounting
//!
//! Each [`StitchType`] produces and consumes a fixed number of stitches per
//! operation:
//!
//! | Stitch | Consumes | Produces |
//! |--------|----------|----------|
//! | `MR`, `ch` | 0 | 0 |
//! | `sc`, `slst`, other | 1 | 1 |
//! | `inc` | 1 | 2 |
//! | `dec` | 2 | 1 |
//!
//! A round's `total_stitches` must equal the production-weighted sum of its
//! instructions.
//!
//! # Example
//!
//! ```
//! use stitch_types::{Gauge, Pattern, RoundInstruction, ShapeParameters, StitchInstruction, StitchType};
//!
//! let gauge = Gauge::new(14.0, 16.0).unwrap();
//! let ring = RoundInstruction::new(
//!     0,
//!     vec![
//!         StitchInstruction::new(StitchType::MagicRing, 1).unwrap(),
//!         StitchInstruction::new(StitchType::SingleCrochet, 6).unwrap().with_target("ring"),
//!     ],
//!     6,
//! )
//! .unwrap();
//! let grow = RoundInstruction::new(1, vec![StitchInstruction::new(StitchType::Increase, 6).unwrap()], 12).unwrap();
//!
//! let pattern = Pattern::builder(ShapeParameters::sphere(4.0).unwrap(), gauge.to_info())
//!     .engine_version("example")
//!     .rounds([ring, grow])
//!     .build()
//!     .unwrap();
//!
//! let json = pattern.to_json().unwrap();
//! assert_eq!(Pattern::from_json(&json).unwrap(), pattern);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod gauge;
mod metadata;
mod op;
mod pattern;
mod round;
mod shape;
mod stitch;

pub use error::{PatternError, PatternResult};
pub use gauge::{Gauge, GaugeInfo, YarnWeight};
pub use metadata::{Difficulty, PatternMetadata};
pub use op::{normalize_ops, Op};
pub use pattern::{Pattern, PatternBuilder};
pub use round::RoundInstruction;
pub use shape::{ShapeKind, ShapeParameters};
pub use stitch::{group_consecutive, StitchInstruction, StitchType};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Gauge>();
        assert_send_sync::<GaugeInfo>();
        assert_send_sync::<ShapeParameters>();
        assert_send_sync::<StitchInstruction>();
        assert_send_sync::<RoundInstruction>();
        assert_send_sync::<Pattern>();
        assert_send_sync::<PatternError>();
    }
}
