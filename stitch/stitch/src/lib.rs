//! Parametric crochet pattern engine.
//!
//! This umbrella crate re-exports the stitch-* crates, providing one API
//! for turning shape dimensions and a swatch gauge into round-by-round
//! spiral crochet instructions. Everything is pure computation with no I/O,
//! usable from CLI tools, servers or WASM.
//!
//! # Quick Start
//!
//! ```
//! use stitch::prelude::*;
//!
//! let gauge = Gauge::new(14.0, 16.0).unwrap();
//! let shape = ShapeParameters::sphere(10.0).unwrap();
//! let pattern = compile(&shape, &gauge, &CompileParams::default()).unwrap();
//!
//! assert_eq!(pattern.rounds()[0].description(), Some("Magic ring with 6 sc"));
//! assert_eq!(pattern.max_stitches(), 44);
//!
//! let json = pattern.to_json().unwrap();
//! assert_eq!(Pattern::from_json(&json).unwrap(), pattern);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Data model: `Gauge`, `ShapeParameters`, `StitchInstruction`,
//!   `RoundInstruction`, `Pattern`
//! - [`gauge`] - Stitch length and yardage estimation, gauge adjustment
//! - [`distribute`] - Even placement of increases and decreases, round jitter
//! - [`shapes`] - Sphere, cylinder and cone compilers

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Data model: gauge, shapes, stitches, rounds and patterns.
pub use stitch_types as types;

/// Stitch length and yardage estimation.
pub use stitch_gauge as gauge;

/// Even placement of increases and decreases.
pub use stitch_distribute as distribute;

/// Shape compilers.
pub use stitch_shapes as shapes;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for compiling patterns.
///
/// # Usage
///
/// ```
/// use stitch::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use stitch_types::{
        Difficulty, Gauge, GaugeInfo, Pattern, PatternError, RoundInstruction, ShapeKind, ShapeParameters,
        StitchInstruction, StitchType, YarnWeight,
    };

    // Compilers
    pub use stitch_shapes::{
        compile, CompileError, CompileParams, ConeCompiler, CylinderCompiler, ShapeCompiler, SphereCompiler,
    };

    // Yardage
    pub use stitch_gauge::{estimate_yardage, stitch_length};
}

// =============================================================================
// Tests
// =============================================================================
