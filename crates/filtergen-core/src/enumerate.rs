//! Combinatorial assigners for stage families and topologies.
//!
//! Both assigners take the Cartesian product of a configured tag set over a
//! number of stage positions and write one tag per stage into a private clone
//! of the input graph. Enumeration follows lexicographic product order over the
//! configured set (the last position varies fastest), so the candidate list is
//! reproducible for a given configuration.

#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec, vec::Vec};

use crate::grammar::stage_name;
use crate::graph::{GraphError, StageGraph};
use crate::stage::{FilterFamily, Topology};

/// Lexicographic odometer over `base^positions` index tuples.
///
/// Yields `Vec<usize>` tuples with each entry in `0..base`. For `positions = 0`
/// it yields a single empty tuple; for `base = 0` and `positions > 0` it yields
/// nothing.
#[derive(Clone, Debug)]
pub struct Product {
    base: usize,
    current: Option<Vec<usize>>,
}

impl Product {
    /// Creates the product of `0..base` repeated `positions` times.
    pub fn new(base: usize, positions: usize) -> Self {
        let current = if base == 0 && positions > 0 {
            None
        } else {
            Some(vec![0; positions])
        };
        Self { base, current }
    }

    /// Total number of tuples, `base^positions` (saturating).
    pub fn total(base: usize, positions: usize) -> usize {
        (0..positions).fold(1usize, |acc, _| acc.saturating_mul(base))
    }
}

impl Iterator for Product {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;
        let mut next = out.clone();
        // Advance the odometer from the last position.
        let mut pos = next.len();
        let mut exhausted = true;
        while pos > 0 {
            pos -= 1;
            next[pos] += 1;
            if next[pos] < self.base {
                exhausted = false;
                break;
            }
            next[pos] = 0;
        }
        if !exhausted {
            self.current = Some(next);
        }
        Some(out)
    }
}

/// Every assignment of `families` to the `stages` positions of `graph`.
///
/// Returns `families.len()^stages` clones; clone `k` has `Stage<i+1>` tagged with
/// the `i`-th entry of the `k`-th product tuple.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `graph` lacks one of
/// `Stage1..=Stage<stages>`.
pub fn enumerate_families(
    graph: &StageGraph,
    stages: usize,
    families: &[FilterFamily],
) -> Result<Vec<StageGraph>, GraphError> {
    let names: Vec<_> = (1..=stages).map(stage_name).collect();
    for name in &names {
        if !graph.contains(name) {
            return Err(GraphError::NodeNotFound(name.clone()));
        }
    }

    let mut out = Vec::with_capacity(Product::total(families.len(), stages));
    for combo in Product::new(families.len(), stages) {
        let mut candidate = graph.clone();
        for (name, &idx) in names.iter().zip(&combo) {
            if let Some(attrs) = candidate.node_mut(name) {
                attrs.family = Some(families[idx]);
            }
        }
        out.push(candidate);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("family_assign: {} assignments over {stages} stages", out.len());
    Ok(out)
}

/// Every assignment of `topologies` to the surviving stages of each graph.
///
/// Stages are taken in node order (load excluded). A graph with `k` stages
/// contributes `topologies.len()^k` candidates, emitted contiguously in input
/// order.
pub fn enumerate_topologies(graphs: &[StageGraph], topologies: &[Topology]) -> Vec<StageGraph> {
    let mut out = Vec::new();
    for graph in graphs {
        let names: Vec<_> = graph
            .stage_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        for combo in Product::new(topologies.len(), names.len()) {
            let mut candidate = graph.clone();
            for (name, &idx) in names.iter().zip(&combo) {
                if let Some(attrs) = candidate.node_mut(name) {
                    attrs.topology = Some(topologies[idx]);
                }
            }
            out.push(candidate);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "topology_assign: {} candidates from {} graphs",
        out.len(),
        graphs.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::build_cascade;
    use crate::stage::FilterFamily::{Butterworth as B, Chebyshev as C};

    #[test]
    fn product_is_lexicographic() {
        let tuples: Vec<Vec<usize>> = Product::new(2, 2).collect();
        assert_eq!(tuples, [vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn product_edge_cases() {
        assert_eq!(Product::new(3, 0).count(), 1);
        assert_eq!(Product::new(0, 2).count(), 0);
        assert_eq!(Product::new(0, 0).count(), 1);
        assert_eq!(Product::new(3, 4).count(), 81);
        assert_eq!(Product::total(3, 4), 81);
    }

    #[test]
    fn families_are_written_by_position() {
        let g = build_cascade(2, "load");
        let out = enumerate_families(&g, 2, &[B, C]).unwrap();
        let tags: Vec<(Option<FilterFamily>, Option<FilterFamily>)> = out
            .iter()
            .map(|c| (c.node("Stage1").unwrap().family, c.node("Stage2").unwrap().family))
            .collect();
        assert_eq!(
            tags,
            [
                (Some(B), Some(B)),
                (Some(B), Some(C)),
                (Some(C), Some(B)),
                (Some(C), Some(C)),
            ]
        );
        // The input graph is untouched.
        assert!(g.stages().all(|(_, a)| a.family.is_none()));
    }

    #[test]
    fn families_on_missing_stage_fail() {
        let g = build_cascade(1, "load");
        assert_eq!(
            enumerate_families(&g, 2, &[B]),
            Err(GraphError::NodeNotFound("Stage2".into()))
        );
    }

    #[test]
    fn topologies_cover_surviving_stages() {
        let g = build_cascade(3, "load");
        let out = enumerate_topologies(&[g], &[Topology::SallenKey, Topology::Rc]);
        assert_eq!(out.len(), 8);
        assert!(out[0].stages().all(|(_, a)| a.topology == Some(Topology::SallenKey)));
        assert_eq!(out[1].node("Stage3").unwrap().topology, Some(Topology::Rc));
        assert!(out.iter().all(|c| c.node("load").unwrap().topology.is_none()));
    }

    #[test]
    fn topologies_of_load_only_graph() {
        let g = build_cascade(0, "load");
        let out = enumerate_topologies(&[g], &[Topology::SallenKey]);
        assert_eq!(out.len(), 1);
    }
}
