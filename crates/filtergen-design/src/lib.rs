//! Filtergen Design - from candidate graphs to circuit blocks.
//!
//! Takes the candidates produced by `filtergen-core` and turns each merged
//! stage into concrete sections:
//!
//! - [`PoleSource`] supplies normalized low-pass poles per family and order
//!   ([`AnalyticPoles`] in closed form, [`PoleTable`] from explicit data)
//! - [`sections_from_poles`] pairs poles into biquads and first-order sections
//! - [`rc_lowpass`] / [`sallen_key_equal_c`] compute component values
//! - [`realize_candidate`] / [`realize_all`] realize whole candidates
//!
//! # Example
//!
//! ```rust
//! use filtergen_core::{GeneratorSpec, generate};
//! use filtergen_design::{AnalyticPoles, DesignParams, realize_all};
//!
//! let run = generate(&GeneratorSpec::new(3)).unwrap();
//! let realized = realize_all(&run.candidates, &DesignParams::default(), &AnalyticPoles::default());
//! assert_eq!(realized.len(), run.candidates.len());
//! ```

mod error;

pub mod components;
pub mod poles;
pub mod realize;
pub mod section;

pub use components::{
    ComponentValues, DEFAULT_CAPACITANCE, DEFAULT_CUTOFF_HZ, DEFAULT_FEEDBACK_RESISTANCE,
    DesignParams, rc_lowpass, sallen_key_equal_c,
};
pub use error::DesignError;
pub use poles::{AnalyticPoles, DEFAULT_RIPPLE_DB, PoleSource, PoleTable};
pub use realize::{BlockKind, CandidateRealization, RealizedSection, realize_all, realize_candidate};
pub use section::{REAL_POLE_TOLERANCE, Section, sections_from_poles, synthesize_sections};
