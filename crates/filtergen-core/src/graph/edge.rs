//! Graph edge types for the stage graph.
//!
//! An [`Edge`] carries signal flow from the output of one stage into the input
//! of the next. Edges are kept in insertion order; the merge rule scans them in
//! that order, so the order is part of the graph's observable state.

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Optional attributes attached to an edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeAttrs {
    /// Free-form annotation (e.g. the net name chosen by an emitter).
    pub label: Option<String>,
}

/// A directed connection `from -> to` between two named stages.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source stage name.
    pub from: String,
    /// Destination stage name.
    pub to: String,
    /// Edge attributes, carried over when the merge rule reconnects an edge.
    pub attrs: EdgeAttrs,
}

impl Edge {
    /// Returns `true` if this edge starts or ends at `name`.
    #[inline]
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}
