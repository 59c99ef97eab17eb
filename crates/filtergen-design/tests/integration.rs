//! Integration tests for filtergen-design.
//!
//! Drives section synthesis and candidate realization through the public API:
//! section counts per order, section ordering, tabulated poles, end-to-end
//! realization of generated candidates, and failure isolation between
//! sibling candidates.

use filtergen_core::{FilterFamily, GeneratorSpec, StageAttrs, StageGraph, Topology, generate};
use filtergen_design::{
    AnalyticPoles, BlockKind, DesignError, DesignParams, PoleTable, Section, realize_all,
    realize_candidate, sections_from_poles, synthesize_sections,
};
use num_complex::Complex64;
use proptest::prelude::*;

fn assert_ordered(sections: &[Section]) {
    let mut seen_first_order = false;
    let mut last_q = f64::NEG_INFINITY;
    for s in sections {
        match s.q {
            Some(q) => {
                assert!(!seen_first_order, "biquad after first-order section: {sections:?}");
                assert!(q >= last_q, "Q not ascending: {sections:?}");
                last_q = q;
            }
            None => seen_first_order = true,
        }
    }
}

// ============================================================================
// Section synthesis
// ============================================================================

#[test]
fn section_counts_follow_order_parity() {
    let source = AnalyticPoles::default();
    for family in FilterFamily::ALL {
        for order in 1..=10u32 {
            let sections = synthesize_sections(&source, family, order).unwrap();
            let biquads = sections.iter().filter(|s| s.is_biquad()).count();
            let first = sections.len() - biquads;
            assert_eq!(biquads, (order / 2) as usize, "{family} order {order}");
            assert_eq!(first, (order % 2) as usize, "{family} order {order}");
            assert_eq!(sections.iter().map(Section::order).sum::<u32>(), order);
            assert_ordered(&sections);
        }
    }
}

#[test]
fn tabulated_third_order_example() {
    let table = PoleTable::new().with(
        FilterFamily::Chebyshev,
        3,
        vec![
            Complex64::new(-5.0, 0.0),
            Complex64::new(-1.0, 2.0),
            Complex64::new(-1.0, -2.0),
        ],
    );
    let sections = synthesize_sections(&table, FilterFamily::Chebyshev, 3).unwrap();
    let w0 = 5f64.sqrt();
    assert_eq!(sections.len(), 2);
    assert!((sections[0].scale - w0).abs() < 1e-12);
    assert!((sections[0].q.unwrap() - w0 / 2.0).abs() < 1e-12);
    assert_eq!(sections[1].scale, 5.0);
    assert_eq!(sections[1].q, None);
}

#[test]
fn chebyshev_sections_have_higher_q_than_butterworth() {
    let source = AnalyticPoles::default();
    let b = synthesize_sections(&source, FilterFamily::Butterworth, 4).unwrap();
    let c = synthesize_sections(&source, FilterFamily::Chebyshev, 4).unwrap();
    assert!(c.last().unwrap().q.unwrap() > b.last().unwrap().q.unwrap());
}

// ============================================================================
// Realization
// ============================================================================

#[test]
fn generated_candidates_realize_end_to_end() {
    let run = generate(&GeneratorSpec::new(4)).unwrap();
    assert!(!run.candidates.is_empty());

    let realized = realize_all(&run.candidates, &DesignParams::default(), &AnalyticPoles::default());
    assert_eq!(realized.len(), run.candidates.len());
    for (candidate, result) in run.candidates.iter().zip(&realized) {
        let r = result.as_ref().unwrap();
        assert_eq!(r.order(), candidate.total_order());
        for s in &r.sections {
            assert!(s.values.iter().all(|(_, v)| v.is_finite() && v > 0.0));
        }
    }
}

#[test]
fn two_stage_candidates_realize_as_single_biquads() {
    let spec = GeneratorSpec::new(2);
    let run = generate(&spec).unwrap();
    let realized = realize_all(&run.candidates, &DesignParams::default(), &AnalyticPoles::default());
    for r in &realized {
        let r = r.as_ref().unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.sections[0].block, BlockKind::SallenKey);
        assert_eq!(r.sections[0].stage, "Stage2");
    }
}

#[test]
fn failing_candidate_does_not_affect_siblings() {
    let spec = GeneratorSpec::new(2).with_topologies([Topology::SallenKey, Topology::Rc]);
    let run = generate(&spec).unwrap();
    assert_eq!(run.candidates.len(), 4);

    let realized = realize_all(&run.candidates, &DesignParams::default(), &AnalyticPoles::default());
    let ok: Vec<bool> = realized.iter().map(Result::is_ok).collect();
    assert_eq!(ok, [true, false, true, false]);
    assert!(matches!(
        realized[1],
        Err(DesignError::UnsupportedConfiguration(_))
    ));
}

#[test]
fn realization_scales_with_cutoff() {
    let mut g = StageGraph::new();
    g.add_node("load", StageAttrs::load());
    g.add_node(
        "Stage1",
        StageAttrs::filter()
            .with_family(FilterFamily::Butterworth)
            .with_order(2)
            .with_topology(Topology::SallenKey),
    );
    g.connect("Stage1", "load");

    let source = AnalyticPoles::default();
    let low = realize_candidate(&g, &DesignParams::new(1000.0, 10e-9), &source).unwrap();
    let high = realize_candidate(&g, &DesignParams::new(2000.0, 10e-9), &source).unwrap();
    let r_low = low.sections[0].values.get("R1").unwrap();
    let r_high = high.sections[0].values.get("R1").unwrap();
    assert!((r_low / r_high - 2.0).abs() < 1e-9);
    // Gain resistors depend on Q only.
    assert_eq!(low.sections[0].values.get("R3"), high.sections[0].values.get("R3"));
}

#[test]
fn invalid_params_are_rejected() {
    let run = generate(&GeneratorSpec::new(2)).unwrap();
    let params = DesignParams::new(-1.0, 10e-9);
    let err = realize_candidate(&run.candidates[0], &params, &AnalyticPoles::default()).unwrap_err();
    assert!(matches!(err, DesignError::UnsupportedConfiguration(_)));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_conjugate_sets_pair_and_sort(
        pairs in prop::collection::vec((-10.0f64..-0.01, 0.01f64..10.0), 0..6),
        real in prop::option::of(-10.0f64..-0.01),
    ) {
        let mut poles = Vec::new();
        for &(re, im) in &pairs {
            poles.push(Complex64::new(re, im));
            poles.push(Complex64::new(re, -im));
        }
        if let Some(re) = real {
            poles.push(Complex64::new(re, 0.0));
        }

        let sections = sections_from_poles(&poles).unwrap();
        prop_assert_eq!(sections.iter().filter(|s| s.is_biquad()).count(), pairs.len());
        prop_assert_eq!(sections.len(), pairs.len() + usize::from(real.is_some()));
        assert_ordered(&sections);
        for s in sections.iter().filter(|s| s.is_biquad()) {
            prop_assert!(s.q.unwrap() > 0.0);
            prop_assert!(s.scale > 0.0);
        }
    }

    #[test]
    fn analytic_sections_are_ordered(order in 1u32..=16, cheby in any::<bool>()) {
        let family = if cheby { FilterFamily::Chebyshev } else { FilterFamily::Butterworth };
        let sections = synthesize_sections(&AnalyticPoles::default(), family, order).unwrap();
        prop_assert_eq!(sections.len(), order.div_ceil(2) as usize);
        assert_ordered(&sections);
    }
}
