//! Candidate realization: stage graph → ordered list of circuit blocks.
//!
//! Filter stages are visited in node order. Each stage is split into sections
//! by [`synthesize_sections`]; every biquad is built with the stage's topology
//! and every first-order remainder becomes a buffered RC block.

use std::fmt;

use filtergen_core::{StageGraph, Topology};

use crate::components::{ComponentValues, DesignParams, rc_lowpass, sallen_key_equal_c};
use crate::error::DesignError;
use crate::poles::PoleSource;
use crate::section::{Section, synthesize_sections};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Circuit block used for one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Buffered single-pole RC low-pass.
    Rc,
    /// Equal-capacitor Sallen-Key low-pass.
    SallenKey,
}

impl BlockKind {
    /// Subcircuit base name used by netlist emitters.
    pub fn subcircuit(self) -> &'static str {
        match self {
            Self::Rc => "RC_LP",
            Self::SallenKey => "SALLEN_KEY_LP",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rc => "rc",
            Self::SallenKey => "sallen-key",
        })
    }
}

/// One realized section with its component values.
#[derive(Clone, Debug, PartialEq)]
pub struct RealizedSection {
    /// Stage the section belongs to.
    pub stage: String,
    /// Block that realizes it.
    pub block: BlockKind,
    /// Normalized section parameters.
    pub section: Section,
    /// Component values at the design cutoff.
    pub values: ComponentValues,
}

/// All sections of one candidate, in node order (`Stage1`, `Stage2`, ...).
///
/// The cascade head is the last stage in node order, so this is the reverse
/// of the chain from the head toward the load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateRealization {
    /// Realized sections, stage by stage.
    pub sections: Vec<RealizedSection>,
}

impl CandidateRealization {
    /// Total filter order realized.
    pub fn order(&self) -> u32 {
        self.sections.iter().map(|s| s.section.order()).sum()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the candidate had no filter stages.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn realize_section(
    topology: Topology,
    section: Section,
    params: &DesignParams,
) -> Result<(BlockKind, ComponentValues), DesignError> {
    match (section.q, topology) {
        (None, _) => Ok((BlockKind::Rc, rc_lowpass(section.scale, params))),
        (Some(q), Topology::SallenKey) => Ok((
            BlockKind::SallenKey,
            sallen_key_equal_c(section.scale, q, params)?,
        )),
        (Some(_), Topology::Rc) => Err(DesignError::unsupported(
            "rc topology cannot realize a second-order section",
        )),
    }
}

/// Realizes every filter stage of `candidate`.
///
/// # Errors
///
/// [`DesignError::UnsupportedConfiguration`] for a stage without a family or
/// topology, an RC topology asked to realize a biquad, or invalid `params`.
/// Pole and pairing errors from the source propagate unchanged.
pub fn realize_candidate(
    candidate: &StageGraph,
    params: &DesignParams,
    source: &dyn PoleSource,
) -> Result<CandidateRealization, DesignError> {
    params.validate()?;

    let mut sections = Vec::new();
    for (name, attrs) in candidate.stages() {
        let family = attrs
            .family
            .ok_or_else(|| DesignError::unsupported(format!("stage '{name}' has no family")))?;
        let topology = attrs
            .topology
            .ok_or_else(|| DesignError::unsupported(format!("stage '{name}' has no topology")))?;

        for section in synthesize_sections(source, family, attrs.order)? {
            let (block, values) = realize_section(topology, section, params)
                .map_err(|e| match e {
                    DesignError::UnsupportedConfiguration(reason) => {
                        DesignError::unsupported(format!("stage '{name}': {reason}"))
                    }
                    other => other,
                })?;
            sections.push(RealizedSection {
                stage: name.to_string(),
                block,
                section,
                values,
            });
        }
    }
    Ok(CandidateRealization { sections })
}

/// Realizes each candidate independently, preserving input order.
///
/// A failing candidate yields its own `Err` entry; siblings are unaffected.
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub fn realize_all(
    candidates: &[StageGraph],
    params: &DesignParams,
    source: &dyn PoleSource,
) -> Vec<Result<CandidateRealization, DesignError>> {
    #[cfg(feature = "parallel")]
    let results: Vec<_> = candidates
        .par_iter()
        .map(|candidate| realize_candidate(candidate, params, source))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = candidates
        .iter()
        .map(|candidate| realize_candidate(candidate, params, source))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::debug!(failed, total = results.len(), "some candidates could not be realized");
    }
    results
}
