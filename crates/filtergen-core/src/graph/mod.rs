//! Stage graph for filter cascades.
//!
//! A cascade is modelled as a directed graph of named stages. Each node carries
//! a [`StageAttrs`](crate::StageAttrs) record; edges model signal flow from one
//! stage into the next and end at a single load node.
//!
//! # Architecture
//!
//! - [`StageGraph`] - nodes (insertion-ordered) and edges (insertion-ordered),
//!   structural mutations ([`remove_node`](StageGraph::remove_node),
//!   [`merge`](StageGraph::merge)) and adjacency scans.
//! - [`Edge`] / [`EdgeAttrs`] - a directed connection and its optional annotation.
//!
//! # Example
//!
//! ```rust
//! use filtergen_core::graph::StageGraph;
//! use filtergen_core::{FilterFamily, StageAttrs};
//!
//! let mut graph = StageGraph::new();
//! graph.add_node("load", StageAttrs::load());
//! graph.add_node("a", StageAttrs::filter().with_family(FilterFamily::Butterworth));
//! graph.add_node("b", StageAttrs::filter().with_family(FilterFamily::Butterworth));
//! graph.connect("b", "a");
//! graph.connect("a", "load");
//!
//! graph.merge("b", "a").unwrap();
//! assert_eq!(graph.node("b").unwrap().order, 2);
//! assert!(graph.has_edge("b", "load"));
//! ```

pub mod edge;
mod stage_graph;

pub use edge::{Edge, EdgeAttrs};
pub use stage_graph::{GraphError, StageGraph};
