//! Candidate-generation pipeline.
//!
//! Runs the full search in order:
//!
//! ```text
//! build_cascade -> enumerate_families -> reduce (per assignment)
//!               -> ValidityRule::filter_valid -> enumerate_topologies
//! ```
//!
//! Validity depends only on family and order, which are fixed once an
//! assignment is reduced, so the rule runs before topologies are enumerated. Only accepted candidates are ever
//! materialized; the output is identical to filtering after topology
//! assignment.
//!
//! The candidate count before filtering is `sum(|topologies|^runs)` over all
//! family assignments, which [`search_size`] gives in closed form.

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::enumerate::{Product, enumerate_families, enumerate_topologies};
use crate::grammar::{DEFAULT_LOAD_NAME, build_cascade};
use crate::graph::{GraphError, StageGraph};
use crate::rewrite::reduce;
use crate::stage::{FilterFamily, Topology};
use crate::validity::ValidityRule;

/// Everything the search needs: cascade length, tag sets, and the acceptance rule.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorSpec {
    /// Number of first-order stages in the initial cascade.
    pub stages: usize,
    /// Name of the load node.
    pub load_name: String,
    /// Family set, in enumeration order.
    pub families: Vec<FilterFamily>,
    /// Topology set, in enumeration order.
    pub topologies: Vec<Topology>,
    /// Rule applied to the fully assigned candidates.
    pub validity: ValidityRule,
}

impl Default for GeneratorSpec {
    fn default() -> Self {
        Self {
            stages: 8,
            load_name: DEFAULT_LOAD_NAME.to_string(),
            families: FilterFamily::ALL.to_vec(),
            topologies: vec![Topology::SallenKey],
            validity: ValidityRule::default(),
        }
    }
}

impl GeneratorSpec {
    /// Creates a spec with the default tag sets for a cascade of `stages`.
    pub fn new(stages: usize) -> Self {
        Self {
            stages,
            ..Self::default()
        }
    }

    /// Replaces the family set.
    pub fn with_families(mut self, families: impl IntoIterator<Item = FilterFamily>) -> Self {
        self.families = families.into_iter().collect();
        self
    }

    /// Replaces the topology set.
    pub fn with_topologies(mut self, topologies: impl IntoIterator<Item = Topology>) -> Self {
        self.topologies = topologies.into_iter().collect();
        self
    }

    /// Replaces the validity rule.
    pub fn with_validity(mut self, validity: ValidityRule) -> Self {
        self.validity = validity;
        self
    }

    /// Replaces the load name.
    pub fn with_load_name(mut self, load_name: impl Into<String>) -> Self {
        self.load_name = load_name.into();
        self
    }
}

/// Counts gathered at each step of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Family assignments enumerated.
    pub family_assignments: usize,
    /// Merges performed across all assignments.
    pub merges: usize,
    /// Candidates topology assignment yields before validity filtering.
    pub topology_candidates: usize,
    /// Candidates accepted by the validity rule.
    pub accepted: usize,
}

impl GenerationReport {
    /// Candidates dropped by the validity rule.
    pub fn rejected(&self) -> usize {
        self.topology_candidates - self.accepted
    }
}

/// Result of a pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Accepted candidates in enumeration order.
    pub candidates: Vec<StageGraph>,
    /// Per-step counts.
    pub report: GenerationReport,
}

/// Number of topology candidates the search visits before validity filtering.
///
/// A cascade of `stages` stages over `families` distinct families has
/// `families * (families - 1)^(runs - 1) * C(stages - 1, runs - 1)`
/// assignments that reduce to `runs` stages, each contributing
/// `topologies^runs` candidates. Summing over `runs` gives
///
/// ```text
/// families * topologies * (1 + (families - 1) * topologies)^(stages - 1)
/// ```
///
/// and `1` for `stages = 0`. The result saturates at `usize::MAX`.
pub fn search_size(families: usize, topologies: usize, stages: usize) -> usize {
    if stages == 0 {
        return 1;
    }
    let growth = families
        .saturating_sub(1)
        .saturating_mul(topologies)
        .saturating_add(1);
    Product::total(growth, stages - 1)
        .saturating_mul(families)
        .saturating_mul(topologies)
}

/// Runs the pipeline and returns the accepted candidates with a report.
pub fn generate(spec: &GeneratorSpec) -> Result<Generation, GraphError> {
    let cascade = build_cascade(spec.stages, &spec.load_name);
    let mut assignments = enumerate_families(&cascade, spec.stages, &spec.families)?;

    let mut report = GenerationReport {
        family_assignments: assignments.len(),
        ..GenerationReport::default()
    };
    for graph in &mut assignments {
        report.merges += reduce(graph)?;
    }
    report.topology_candidates = assignments.iter().fold(0usize, |acc, g| {
        acc.saturating_add(Product::total(spec.topologies.len(), g.stages().count()))
    });

    let accepted = spec.validity.filter_valid(assignments);
    let candidates = enumerate_topologies(&accepted, &spec.topologies);
    report.accepted = candidates.len();

    #[cfg(feature = "tracing")]
    tracing::info!(
        stages = spec.stages,
        assignments = report.family_assignments,
        merges = report.merges,
        candidates = report.topology_candidates,
        accepted = report.accepted,
        "candidate generation finished"
    );
    Ok(Generation { candidates, report })
}

/// Runs the pipeline and returns only the accepted candidates.
pub fn generate_candidates(spec: &GeneratorSpec) -> Result<Vec<StageGraph>, GraphError> {
    generate(spec).map(|g| g.candidates)
}
