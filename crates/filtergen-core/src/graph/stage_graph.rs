//! Stage graph - named nodes, ordered edges, and the merge rewrite step.
//!
//! [`StageGraph`] is a small directed graph specialized for filter cascades.
//! Nodes are kept in insertion order (the order stages were created), edges in
//! the order they were added. Both orders are load-bearing: the topology
//! assigner walks nodes in insertion order and the merge rule scans edges
//! left to right.
//!
//! Adjacency queries scan the full edge list. Cascades are single digits to low
//! tens of stages long, so no adjacency index is kept.
//!
//! Cloning a graph deep-copies every node and edge record; each enumeration
//! branch mutates its own clone.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;

use super::edge::{Edge, EdgeAttrs};
use crate::stage::StageAttrs;

/// Structural-invariant violations raised by graph mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The named node does not exist (never added, or already removed).
    NodeNotFound(String),
    /// `merge(from, to)` was called without an edge `from -> to`.
    NotAdjacent(String, String),
    /// The load node took part in a merge.
    LoadNotMergeable(String),
    /// A checked insert found the name already in use.
    DuplicateNode(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(name) => write!(f, "node '{name}' not found"),
            Self::NotAdjacent(a, b) => write!(f, "cannot merge '{b}' into '{a}': no edge {a} -> {b}"),
            Self::LoadNotMergeable(name) => write!(f, "load node '{name}' cannot be merged"),
            Self::DuplicateNode(name) => write!(f, "node '{name}' already exists"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GraphError {}

/// Directed graph of named filter stages terminating in a load node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageGraph {
    nodes: Vec<(String, StageAttrs)>,
    edges: Vec<Edge>,
}

impl StageGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Inserts ---

    /// Adds a node. Unguarded: the caller guarantees `name` is unique.
    pub fn add_node(&mut self, name: impl Into<String>, attrs: StageAttrs) {
        self.nodes.push((name.into(), attrs));
    }

    /// Adds a node, rejecting a name that is already in use.
    pub fn try_add_node(
        &mut self,
        name: impl Into<String>,
        attrs: StageAttrs,
    ) -> Result<(), GraphError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        self.nodes.push((name, attrs));
        Ok(())
    }

    /// Appends a directed edge `from -> to`. Unguarded: endpoints are not checked.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, attrs: EdgeAttrs) {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            attrs,
        });
    }

    /// Appends an edge with default attributes.
    pub fn connect(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.add_edge(from, to, EdgeAttrs::default());
    }

    // --- Queries ---

    /// Returns `true` if a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Attributes of the named node.
    pub fn node(&self, name: &str) -> Option<&StageAttrs> {
        self.position(name).map(|i| &self.nodes[i].1)
    }

    /// Mutable attributes of the named node.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut StageAttrs> {
        self.position(name).map(move |i| &mut self.nodes[i].1)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &StageAttrs)> {
        self.nodes.iter().map(|(name, attrs)| (name.as_str(), attrs))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes, load included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Names of the non-load nodes, in insertion order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, attrs)| !attrs.is_load())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Non-load nodes with their attributes, in insertion order.
    pub fn stages(&self) -> impl Iterator<Item = (&str, &StageAttrs)> {
        self.nodes().filter(|(_, attrs)| !attrs.is_load())
    }

    /// Name of the load node, if one exists.
    pub fn load_name(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(_, attrs)| attrs.is_load())
            .map(|(name, _)| name.as_str())
    }

    /// Sum of `order` over all non-load nodes.
    pub fn total_order(&self) -> u32 {
        self.stages().map(|(_, attrs)| attrs.order).sum()
    }

    /// Edges arriving at `name`.
    pub fn predecessors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.to == name)
    }

    /// Edges leaving `name`.
    pub fn successors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.from == name)
    }

    /// Returns `true` if an edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    // --- Mutations ---

    /// Deletes a node and every edge touching it, returning its attributes.
    pub fn remove_node(&mut self, name: &str) -> Result<StageAttrs, GraphError> {
        let idx = self
            .position(name)
            .ok_or_else(|| GraphError::NodeNotFound(name.into()))?;
        self.edges.retain(|e| !e.touches(name));
        let (_, attrs) = self.nodes.remove(idx);
        #[cfg(feature = "tracing")]
        tracing::trace!("graph_remove: node {name}");
        Ok(attrs)
    }

    /// Merges `n2` into its direct predecessor `n1`.
    ///
    /// `n1` keeps its name and its place in the node order and takes the summed
    /// order; `n2` is deleted. Every predecessor of `n1` (other than `n2`) is
    /// reconnected into `n1`, every successor of `n2` (other than `n1`) is
    /// reconnected out of `n1`, each keeping its edge attributes. Topology is
    /// cleared, since the merged block is a new stage.
    ///
    /// The merged family is `n1`'s. The rewrite rule only merges equal families,
    /// so the mismatched case is never reached from [`reduce`](crate::reduce).
    ///
    /// # Errors
    ///
    /// Fails without mutating if either node is missing, if there is no edge
    /// `n1 -> n2`, or if either node is the load.
    pub fn merge(&mut self, n1: &str, n2: &str) -> Result<(), GraphError> {
        let a1 = *self
            .node(n1)
            .ok_or_else(|| GraphError::NodeNotFound(n1.into()))?;
        let a2 = *self
            .node(n2)
            .ok_or_else(|| GraphError::NodeNotFound(n2.into()))?;
        if a1.is_load() {
            return Err(GraphError::LoadNotMergeable(n1.into()));
        }
        if a2.is_load() {
            return Err(GraphError::LoadNotMergeable(n2.into()));
        }
        if !self.has_edge(n1, n2) {
            return Err(GraphError::NotAdjacent(n1.into(), n2.into()));
        }

        let incoming: Vec<Edge> = self
            .predecessors(n1)
            .filter(|e| e.from != n2)
            .cloned()
            .collect();
        let outgoing: Vec<Edge> = self
            .successors(n2)
            .filter(|e| e.to != n1)
            .cloned()
            .collect();

        let merged = StageAttrs {
            kind: a1.kind,
            family: a1.family,
            order: a1.order + a2.order,
            topology: None,
        };

        self.edges.retain(|e| !e.touches(n1) && !e.touches(n2));
        if let Some(attrs) = self.node_mut(n1) {
            *attrs = merged;
        }
        self.remove_node(n2)?;

        for edge in incoming {
            self.add_edge(edge.from, n1, edge.attrs);
        }
        for edge in outgoing {
            self.add_edge(n1, edge.to, edge.attrs);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("graph_merge: {n2} into {n1} (order {})", merged.order);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|(n, _)| n == name)
    }
}
