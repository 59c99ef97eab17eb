//! Cascade grammar: builds the initial linear chain of first-order stages.
//!
//! The grammar has two productions. The base case (`n = 0`) produces only the
//! load node; the cascade case produces `Stage<n>` in front of the chain built
//! for `n - 1`. Expanding it yields
//!
//! ```text
//! Stage<n> -> Stage<n-1> -> ... -> Stage1 -> load
//! ```
//!
//! The expansion is done iteratively from the load outward. Nodes are inserted
//! in the order `load, Stage1, ..., Stage<n>` and edges in the order
//! `Stage1 -> load, Stage2 -> Stage1, ...`, which is the order the merge rule
//! later scans in.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

use crate::graph::StageGraph;
use crate::stage::StageAttrs;

/// Default name of the terminal load node.
pub const DEFAULT_LOAD_NAME: &str = "load";

/// Name of the stage at 1-based position `index` (`Stage1`, `Stage2`, ...).
pub fn stage_name(index: usize) -> String {
    format!("Stage{index}")
}

/// Builds a fresh cascade of `stages` first-order filter stages ending in `load_name`.
///
/// The result has `stages + 1` nodes and `stages` edges.
pub fn build_cascade(stages: usize, load_name: &str) -> StageGraph {
    let mut graph = StageGraph::new();
    extend_cascade(&mut graph, stages, load_name);
    graph
}

/// Expands the cascade grammar into an existing graph and returns the chain head.
///
/// For `stages = 0` the head is the load node itself.
pub fn extend_cascade(graph: &mut StageGraph, stages: usize, load_name: &str) -> String {
    graph.add_node(load_name, StageAttrs::load());
    let mut head = String::from(load_name);
    for index in 1..=stages {
        let stage = stage_name(index);
        graph.add_node(stage.clone(), StageAttrs::filter());
        graph.connect(stage.clone(), head);
        head = stage;
    }
    #[cfg(feature = "tracing")]
    tracing::debug!("cascade: {stages} stages, head {head}");
    head
}
