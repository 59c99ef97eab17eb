//! Filtergen Core - candidate generation for cascaded low-pass filters
//!
//! This crate explores the design space of cascaded low-pass filters. It builds
//! an abstract chain of first-order stages, enumerates every assignment of
//! filter family and circuit topology, merges adjacent same-family stages into
//! higher-order blocks, and drops combinations that are not physically
//! meaningful. Turning a surviving candidate into component values is the job
//! of `filtergen-design`.
//!
//! # Core Abstractions
//!
//! ## Stage Model
//!
//! - [`StageGraph`] - Directed graph of named stages ending in a load node
//! - [`StageAttrs`] - Fixed-shape stage record (kind, family, order, topology)
//! - [`FilterFamily`] / [`Topology`] - Closed tag sets parsed from text
//!
//! ## Search
//!
//! - [`build_cascade`] - Cascade grammar: `Stage<n> -> ... -> Stage1 -> load`
//! - [`enumerate_families`] - Cartesian product of families over the stages
//! - [`reduce`] - Stage-merging rewrite rule, applied to a fixed point
//! - [`enumerate_topologies`] - Cartesian product of topologies over merged stages
//! - [`ValidityRule`] - Family/order compatibility filter
//! - [`generate`] - The whole pipeline with a [`GenerationReport`]
//! - [`search_size`] - Closed-form count of pre-filter candidates
//!
//! # Example
//!
//! ```rust
//! use filtergen_core::{FilterFamily, GeneratorSpec, Topology, generate};
//!
//! let spec = GeneratorSpec::new(2)
//!     .with_families([FilterFamily::Butterworth, FilterFamily::Chebyshev])
//!     .with_topologies([Topology::SallenKey]);
//! let run = generate(&spec).unwrap();
//!
//! // (B,B) -> one 2nd-order block, (C,C) -> one 2nd-order block; the mixed
//! // assignments keep a 1st-order Chebyshev stage and are rejected.
//! assert_eq!(run.candidates.len(), 2);
//! assert_eq!(run.report.family_assignments, 4);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! filtergen-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod enumerate;
pub mod grammar;
pub mod graph;
pub mod pipeline;
pub mod rewrite;
pub mod stage;
pub mod validity;

// Re-export main types at crate root
pub use enumerate::{Product, enumerate_families, enumerate_topologies};
pub use grammar::{DEFAULT_LOAD_NAME, build_cascade, extend_cascade, stage_name};
pub use graph::{Edge, EdgeAttrs, GraphError, StageGraph};
pub use pipeline::{
    Generation, GenerationReport, GeneratorSpec, generate, generate_candidates, search_size,
};
pub use rewrite::{is_reduced, reduce};
pub use stage::{FilterFamily, ParseTagError, StageAttrs, StageKind, Topology};
pub use validity::{DEFAULT_MIN_ORDER_NON_PREFERRED, ValidityRule};
