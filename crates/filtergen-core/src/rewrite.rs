//! Stage-merging rewrite rule.
//!
//! Adjacent stages of the same family collapse into one block whose order is
//! the sum of the merged orders. The rule is applied to a fixed point with a
//! first-match, restart-on-merge scan over the edge list:
//!
//! 1. Scan edges in stored order.
//! 2. At the first edge `u -> v` where neither endpoint is the load and both
//!    carry the same assigned family, merge `v` into `u` and restart.
//! 3. Stop when a full scan finds nothing to merge.
//!
//! Every merge removes one node, so the loop terminates after at most
//! `stages - 1` merges. The scan order is the tie-break between overlapping
//! matches and must not be changed: candidate sets are only reproducible if
//! every run picks the same first edge.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::graph::{GraphError, StageGraph};

/// Reduces `graph` in place and returns the number of merges performed.
///
/// Stages without an assigned family never match.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if an edge refers to a node that is not
/// in the graph. The graph may be partially reduced when this happens.
pub fn reduce(graph: &mut StageGraph) -> Result<usize, GraphError> {
    let mut merges = 0;
    while let Some((u, v)) = first_mergeable(graph)? {
        graph.merge(&u, &v)?;
        merges += 1;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!("reduce: {merges} merges, {} stages left", graph.node_count().saturating_sub(1));
    Ok(merges)
}

/// Returns `true` if no edge of `graph` is mergeable.
pub fn is_reduced(graph: &StageGraph) -> Result<bool, GraphError> {
    Ok(first_mergeable(graph)?.is_none())
}

fn first_mergeable(graph: &StageGraph) -> Result<Option<(String, String)>, GraphError> {
    for edge in graph.edges() {
        let from = graph
            .node(&edge.from)
            .ok_or_else(|| GraphError::NodeNotFound(edge.from.clone()))?;
        let to = graph
            .node(&edge.to)
            .ok_or_else(|| GraphError::NodeNotFound(edge.to.clone()))?;
        if from.is_load() || to.is_load() {
            continue;
        }
        if from.family.is_some() && from.family == to.family {
            return Ok(Some((edge.from.clone(), edge.to.clone())));
        }
    }
    Ok(None)
}
