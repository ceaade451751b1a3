//! API Regression Tests for the Stitch Crate Ecosystem
//!
//! These tests pin the public API and the reference patterns it produces.
//! They are organized in 4 tiers:
//!
//! - Tier 1: Data model (stitch-types)
//! - Tier 2: Distribution and yardage (stitch-distribute, stitch-gauge)
//! - Tier 3: Compilers (stitch-shapes)
//! - Tier 4: Canonical output and determinism
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use chrono::{TimeZone, Utc};
use stitch::{distribute, gauge, prelude::*, shapes, types};

fn worsted() -> Gauge {
    Gauge::new(14.0, 16.0).unwrap()
}

// =============================================================================
// TIER 1: Data Model
// =============================================================================

mod tier1_types {
    use super::*;

    #[test]
    fn gauge_conversions() {
        let g = worsted();
        assert!((g.stitches_per_cm() - 1.4).abs() < 1e-12);
        let info = g.to_info().with_yarn_weight(Some(YarnWeight::Dk));
        assert_eq!(info.yarn_weight(), Some(YarnWeight::Dk));
        assert!(Gauge::new(0.0, 16.0).is_err());
    }

    #[test]
    fn shape_parameters_validate() {
        assert!(ShapeParameters::sphere(0.0).unwrap_err().is_invalid_parameter());
        let cone = ShapeParameters::from_fields("cone", None, Some(8.0), Some(6.0), Some(2.0)).unwrap();
        assert_eq!(cone.kind(), ShapeKind::Cone);
        assert!(ShapeParameters::from_fields("torus", Some(1.0), None, None, None).is_err());
    }

    #[test]
    fn stitch_accounting() {
        let round = RoundInstruction::new(
            3,
            vec![
                StitchInstruction::new(StitchType::SingleCrochet, 2).unwrap(),
                StitchInstruction::new(StitchType::Increase, 1).unwrap(),
            ],
            4,
        )
        .unwrap();
        assert_eq!(round.consumed_stitches(), 3);

        let wrong = RoundInstruction::new(
            3,
            vec![StitchInstruction::new(StitchType::Decrease, 3).unwrap()],
            6,
        );
        assert!(wrong.is_err());
    }

    #[test]
    fn nested_ops_normalize() {
        use types::{normalize_ops, Op};

        // (sc 2, inc) x 6
        let ops = vec![Op::sequence(
            vec![Op::simple(StitchType::SingleCrochet, 2), Op::simple(StitchType::Increase, 1)],
            6,
        )];
        let round = RoundInstruction::from_ops(2, &ops, 24).unwrap();
        assert_eq!(round.stitches().len(), 12);
        assert_eq!(round.consumed_stitches(), 18);
        assert!(normalize_ops(&[Op::sequence(vec![], 2)]).is_err());
    }
}

// =============================================================================
// TIER 2: Distribution and Yardage
// =============================================================================

mod tier2_distribution {
    use super::*;

    #[test]
    fn even_distribution_reference() {
        let positions = distribute::even_distribution(37, 6, 0);
        assert_eq!(positions, vec![6, 12, 19, 25, 31, 37]);
        let gaps = distribute::cyclic_gaps(&positions, 37);
        assert!(gaps.iter().all(|g| *g == 6 || *g == 7));

        assert!(distribute::even_distribution(10, 0, 0).is_empty());
        assert_eq!(distribute::even_distribution(4, 9, 2), vec![1, 2, 3, 4]);
    }

    #[test]
    fn jitter_alternates() {
        assert_eq!(distribute::jitter_offset(2, 0), 0);
        assert_eq!(distribute::jitter_offset(3, 0), 3);
        assert_eq!(distribute::JitterPolicy::default().with_step(2).offset(5, 1), 3);
    }

    #[test]
    fn round_builders_conserve_stitches() {
        let inc = distribute::increase_round(18, 6, 3).unwrap();
        assert_eq!((inc.consumed, inc.produced), (18, 24));
        let dec = distribute::decrease_round(24, 6, 0).unwrap();
        assert_eq!((dec.consumed, dec.produced), (24, 18));
        assert!(distribute::decrease_round(10, 6, 0).unwrap_err().is_capacity_exceeded());
    }

    #[test]
    fn yardage_estimate() {
        let per_stitch = stitch_length(&worsted(), Some(YarnWeight::Worsted));
        assert!((estimate_yardage(1000, per_stitch) - 5.5).abs() < 1e-9);

        let adjustment = gauge::gauge_adjustment(&worsted(), &Gauge::new(16.0, 16.0).unwrap());
        assert!(!adjustment.is_on_target());
    }
}

// =============================================================================
// TIER 3: Compilers
// =============================================================================

mod tier3_compilers {
    use super::*;

    #[test]
    fn sphere_reference() {
        let pattern = SphereCompiler::new(10.0).compile(&worsted(), &CompileParams::default()).unwrap();
        assert_eq!(
            pattern.stitch_counts(),
            vec![6, 10, 14, 19, 24, 29, 34, 39, 44, 44, 44, 39, 34, 29, 24, 19, 14, 10, 6]
        );
        assert_eq!(pattern.rounds()[0].description(), Some("Magic ring with 6 sc"));
        assert!(pattern.notes().unwrap().contains("Estimated yarn: 2.7 m"));
    }

    #[test]
    fn cylinder_reference() {
        let pattern = CylinderCompiler::new(8.0, 12.0).compile(&worsted(), &CompileParams::default()).unwrap();
        let counts = pattern.stitch_counts();
        assert_eq!(counts.len(), 26);
        assert_eq!(counts.iter().filter(|c| **c == 35).count(), 20);

        let open = CylinderCompiler::new(8.0, 12.0).compile(&worsted(), &CompileParams::open_tube()).unwrap();
        assert_eq!(open.rounds()[0].stitches()[0].stitch_type(), &StitchType::Chain);
    }

    #[test]
    fn cone_reference() {
        let pattern = ConeCompiler::new(6.0, 2.0, 8.0).compile(&worsted(), &CompileParams::default()).unwrap();
        let counts = pattern.stitch_counts();
        assert_eq!(counts.first(), Some(&26));
        assert_eq!(counts.last(), Some(&9));
        assert!(counts.windows(2).all(|w| w[0] >= w[1] && w[0] - w[1] <= 3));
    }

    #[test]
    fn invalid_parameters_are_classified() {
        let params = CompileParams::default();
        let err = SphereCompiler::new(2.0).compile(&worsted(), &params).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(!err.is_invariant_violation());

        let loose = Gauge::new(5.0, 6.0).unwrap();
        let shape = ShapeParameters::sphere(10.0).unwrap();
        assert!(compile(&shape, &loose, &params).unwrap_err().is_invalid_parameter());

        let limits = shapes::GaugeLimits::default().with_stitch_range(4.0, 30.0);
        assert!(compile(&shape, &loose, &params.with_limits(limits)).is_ok());
    }

    #[test]
    fn every_round_works_into_the_previous() {
        let gauge = Gauge::new(18.0, 20.0).unwrap();
        let params = CompileParams::default();
        for shape in [
            ShapeParameters::sphere(7.5).unwrap(),
            ShapeParameters::cylinder(4.0, 9.0).unwrap(),
            ShapeParameters::cone(3.0, 7.0, 10.0).unwrap(),
        ] {
            let pattern = compile(&shape, &gauge, &params).unwrap();
            pattern.verify_continuity().unwrap();
            for pair in pattern.rounds().windows(2) {
                if !pair[1].is_foundation() {
                    assert_eq!(pair[1].consumed_stitches(), u64::from(pair[0].total_stitches()));
                }
            }
        }
    }
}

// =============================================================================
// TIER 4: Canonical Output and Determinism
// =============================================================================

mod tier4_output {
    use super::*;

    #[test]
    fn canonical_top_level_keys() {
        let pattern = SphereCompiler::new(6.0).compile(&worsted(), &CompileParams::default()).unwrap();
        let value = pattern.to_canonical().unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["gauge", "metadata", "notes", "rounds", "shape"]);
        assert_eq!(value["shape"]["shape_type"], "sphere");
        assert_eq!(value["rounds"][0]["stitches"][0]["stitch_type"], "MR");
        assert_eq!(value["metadata"]["difficulty"], "intermediate");
        assert_eq!(value["gauge"]["yarn_weight"], "worsted");
    }

    #[test]
    fn json_round_trip() {
        let pattern = ConeCompiler::new(6.0, 2.0, 8.0).compile(&worsted(), &CompileParams::default()).unwrap();
        let restored = Pattern::from_json(&pattern.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, pattern);

        let value = pattern.to_canonical().unwrap();
        assert_eq!(Pattern::from_canonical(value).unwrap(), pattern);
    }

    #[test]
    fn pinned_timestamp_is_byte_identical() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let params = CompileParams::reproducible(at);
        let shape = ShapeParameters::cylinder(8.0, 12.0).unwrap();
        let a = compile(&shape, &worsted(), &params).unwrap().to_json().unwrap();
        let b = compile(&shape, &worsted(), &params).unwrap().to_json().unwrap();
        assert_eq!(a, b);
        assert!(a.contains("2025-01-01T12:00:00Z"));
    }

    #[test]
    fn tampered_json_is_rejected() {
        let pattern = SphereCompiler::new(6.0).compile(&worsted(), &CompileParams::default()).unwrap();
        let mut value = pattern.to_canonical().unwrap();
        value["rounds"][2]["total_stitches"] = serde_json::json!(999);
        assert!(Pattern::from_canonical(value).is_err());

        let mut value = pattern.to_canonical().unwrap();
        value["unexpected"] = serde_json::json!(true);
        assert!(Pattern::from_canonical(value).is_err());
    }
}
