//! Even placement of increases and decreases around a crochet round.
//!
//! Working changes at the same stitch positions round after round stacks
//! them into visible columns. This crate spaces them as evenly as the
//! arithmetic allows and shifts them between rounds:
//!
//! - [`even_distribution`]: 1-indexed change positions whose cyclic gaps
//!   differ by at most one
//! - [`jitter_offset`] / [`JitterPolicy`]: alternate offsets for odd rounds
//! - [`increase_round`], [`decrease_round`], [`steady_round`]: complete
//!   stitch instructions for one round, grouped into runs
//!
//! All arithmetic is integer; ties round half up.
//!
//! # Layer 0
//!
//! Depends only on `stitch-types`.
//!
//! # Example
//!
//! ```
//! use stitch_distribute::{increase_round, jitter_offset};
//!
//! // Round 3 of a ball: 18 stitches grow to 24, positions shifted for an odd round
//! let round = increase_round(18, 6, jitter_offset(3, 0)).unwrap();
//! assert_eq!(round.produced, 24);
//! let numbered = round.into_round(3).unwrap();
//! assert_eq!(numbered.consumed_stitches(), 18);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod distribution;
mod error;
mod jitter;
mod rounds;

pub use distribution::{cyclic_gaps, div_round_half_up, even_distribution, split_evenly};
pub use error::{DistributionError, DistributionResult};
pub use jitter::{jitter_offset, JitterPolicy};
pub use rounds::{decrease_round, increase_round, steady_round, ChangeKind, ShapedRound};
