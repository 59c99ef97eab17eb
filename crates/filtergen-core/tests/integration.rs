//! Integration tests for filtergen-core.
//!
//! Exercises the whole search (cascade, family assignment, merging, topology
//! assignment, validity filtering) through the public API and checks the
//! candidate sets against hand-derived expectations.

use filtergen_core::{
    FilterFamily, GeneratorSpec, StageGraph, Topology, ValidityRule, build_cascade,
    enumerate_families, enumerate_topologies, generate, reduce,
};

use FilterFamily::{Butterworth as A, Chebyshev as B};

/// `(name, family, order, topology)` for every stage, in node order.
fn describe(graph: &StageGraph) -> Vec<(String, Option<FilterFamily>, u32, Option<Topology>)> {
    graph
        .stages()
        .map(|(name, a)| (name.to_string(), a.family, a.order, a.topology))
        .collect()
}

// ============================================================================
// Two-stage scenario
// ============================================================================

#[test]
fn two_stage_scenario_merges_equal_families() {
    let cascade = build_cascade(2, "load");
    let mut assignments = enumerate_families(&cascade, 2, &[A, B]).unwrap();
    assert_eq!(assignments.len(), 4);

    for graph in &mut assignments {
        reduce(graph).unwrap();
    }

    // (A, A) collapses into one 2nd-order A block.
    assert_eq!(describe(&assignments[0]), [("Stage2".to_string(), Some(A), 2, None)]);
    // (A, B) stays as two 1st-order stages.
    assert_eq!(
        describe(&assignments[1]),
        [("Stage1".to_string(), Some(A), 1, None), ("Stage2".to_string(), Some(B), 1, None)]
    );

    let candidates = enumerate_topologies(&assignments, &[Topology::SallenKey]);
    assert_eq!(candidates.len(), 4);

    let rule = ValidityRule::new(A, 2);
    assert!(rule.accepts(&candidates[0]), "merged (A, A) must be accepted");
    assert!(!rule.accepts(&candidates[1]), "(A, B) has a 1st-order B stage");

    let kept = rule.filter_valid(candidates);
    assert_eq!(kept.len(), 2);
    assert_eq!(
        describe(&kept[0]),
        [("Stage2".to_string(), Some(A), 2, Some(Topology::SallenKey))]
    );
    assert_eq!(
        describe(&kept[1]),
        [("Stage2".to_string(), Some(B), 2, Some(Topology::SallenKey))]
    );
}

// ============================================================================
// Candidate counts
// ============================================================================

/// Brute-force count of candidates before filtering:
/// sum over family assignments of |T|^(runs in the assignment).
fn expected_topology_candidates(stages: usize, families: usize, topologies: usize) -> usize {
    let mut total = 0;
    let mut combo = vec![0usize; stages];
    loop {
        let runs = if stages == 0 {
            0
        } else {
            1 + combo.windows(2).filter(|w| w[0] != w[1]).count()
        };
        total += topologies.pow(runs as u32);

        let mut pos = stages;
        loop {
            if pos == 0 {
                return total;
            }
            pos -= 1;
            combo[pos] += 1;
            if combo[pos] < families {
                break;
            }
            combo[pos] = 0;
        }
    }
}

#[test]
fn topology_candidate_count_matches_run_structure() {
    for stages in 0..=5 {
        let spec = GeneratorSpec::new(stages)
            .with_topologies(Topology::ALL)
            .with_validity(ValidityRule::new(A, 0));
        let run = generate(&spec).unwrap();
        assert_eq!(
            run.report.topology_candidates,
            expected_topology_candidates(stages, 2, 2),
            "stages = {stages}"
        );
        assert_eq!(run.report.accepted, run.report.topology_candidates);
    }
}

#[test]
fn merges_reduce_node_count_exactly() {
    let spec = GeneratorSpec::new(6);
    let run = generate(&spec).unwrap();
    // 2^6 assignments of 6 stages; each merge removes one node.
    let nodes_before = run.report.family_assignments * 7;
    let cascade = build_cascade(6, "load");
    let mut nodes_after = 0;
    for mut graph in enumerate_families(&cascade, 6, &[A, B]).unwrap() {
        reduce(&mut graph).unwrap();
        nodes_after += graph.node_count();
    }
    assert_eq!(nodes_before - run.report.merges, nodes_after);
}

// ============================================================================
// Validity
// ============================================================================

#[test]
fn accepted_candidates_never_hold_short_non_preferred_blocks() {
    let spec = GeneratorSpec::new(5).with_topologies(Topology::ALL);
    let run = generate(&spec).unwrap();
    assert!(run.report.rejected() > 0);
    for candidate in &run.candidates {
        for (_, attrs) in candidate.stages() {
            assert!(attrs.family == Some(A) || attrs.order >= 2);
        }
    }
}

#[test]
fn single_family_search_yields_one_block_per_topology() {
    let spec = GeneratorSpec::new(7)
        .with_families([B])
        .with_topologies(Topology::ALL);
    let run = generate(&spec).unwrap();
    assert_eq!(run.report.family_assignments, 1);
    assert_eq!(run.report.merges, 6);
    assert_eq!(run.candidates.len(), 2);
    for candidate in &run.candidates {
        assert_eq!(candidate.stage_names(), ["Stage7"]);
        assert_eq!(candidate.node("Stage7").unwrap().order, 7);
        assert!(candidate.has_edge("Stage7", "load"));
    }
}

#[test]
fn custom_load_name_is_preserved() {
    let spec = GeneratorSpec::new(3).with_load_name("rl");
    for candidate in generate(&spec).unwrap().candidates {
        assert_eq!(candidate.load_name(), Some("rl"));
        let sink = candidate.node("rl").unwrap();
        assert!(sink.is_load());
        assert_eq!(candidate.successors("rl").count(), 0);
    }
}

#[test]
fn generation_is_deterministic() {
    let spec = GeneratorSpec::new(5).with_topologies(Topology::ALL);
    let first = generate(&spec).unwrap();
    let second = generate(&spec).unwrap();
    assert_eq!(first, second);
}

#[test]
fn early_validity_filter_matches_filtering_after_topologies() {
    for stages in 0..=6 {
        let spec = GeneratorSpec::new(stages).with_topologies(Topology::ALL);

        // Reference: every topology candidate materialized, then filtered.
        let cascade = build_cascade(stages, &spec.load_name);
        let mut assignments = enumerate_families(&cascade, stages, &spec.families).unwrap();
        for graph in &mut assignments {
            reduce(graph).unwrap();
        }
        let all = enumerate_topologies(&assignments, &spec.topologies);
        let all_count = all.len();
        let reference = spec.validity.filter_valid(all);

        let run = generate(&spec).unwrap();
        assert_eq!(run.candidates, reference, "stages={stages}");
        assert_eq!(run.report.topology_candidates, all_count, "stages={stages}");
        assert_eq!(run.report.rejected(), all_count - reference.len());
    }
}
