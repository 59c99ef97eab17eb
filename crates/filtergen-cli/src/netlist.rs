//! SPICE netlist emission for realized candidates.
//!
//! Each candidate becomes one netlist: a subcircuit definition per realized
//! section, an AC source driving node `n1`, and one instance per section
//! chained `n<k> -> n<k+1>`. Subcircuit names carry the 1-based candidate and
//! section numbers so that netlists can be concatenated into one file.

use std::fmt;

use filtergen_core::StageGraph;
use filtergen_design::{BlockKind, CandidateRealization, RealizedSection};

/// Open-loop gain of the ideal op-amp VCVS.
const OPAMP_GAIN: f64 = 1e6;

/// Width of the `=` rule separating candidates in the emitted file.
pub const SEPARATOR_WIDTH: usize = 80;

fn value(role: &str, section: &RealizedSection) -> f64 {
    section.values.get(role).unwrap_or_default()
}

fn write_subcircuit(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    section: &RealizedSection,
) -> fmt::Result {
    writeln!(f, ".subckt {name} input out 0")?;
    match section.block {
        BlockKind::Rc => {
            writeln!(f, "R1 input n1 {:.6e}", value("R1", section))?;
            writeln!(f, "C1 n1 0 {:.6e}", value("C1", section))?;
            writeln!(f, "E1 out 0 n1 out {OPAMP_GAIN:e}")?;
        }
        BlockKind::SallenKey => {
            writeln!(f, "R1 input n1 {:.6e}", value("R1", section))?;
            writeln!(f, "R2 n1 n2 {:.6e}", value("R2", section))?;
            writeln!(f, "R3 n3 0 {:.6e}", value("R3", section))?;
            writeln!(f, "R4 n3 out {:.6e}", value("R4", section))?;
            writeln!(f, "C1 n1 out {:.6e}", value("C1", section))?;
            writeln!(f, "C2 n2 0 {:.6e}", value("C2", section))?;
            writeln!(f, "E1 out 0 n2 n3 {OPAMP_GAIN:e}")?;
        }
    }
    writeln!(f, ".ends {name}")
}

/// Netlist of one realized candidate.
pub struct Netlist<'a> {
    index: usize,
    realization: &'a CandidateRealization,
}

impl<'a> Netlist<'a> {
    /// Netlist of candidate `index` (0-based).
    pub fn new(index: usize, realization: &'a CandidateRealization) -> Self {
        Self { index, realization }
    }

    fn subcircuit_name(&self, k: usize, section: &RealizedSection) -> String {
        format!("{}_{}_{}", section.block.subcircuit(), self.index + 1, k + 1)
    }
}

impl fmt::Display for Netlist<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".title Candidate{}", self.index + 1)?;
        for (k, section) in self.realization.sections.iter().enumerate() {
            write_subcircuit(f, &self.subcircuit_name(k, section), section)?;
        }

        writeln!(f)?;
        writeln!(f, "Vinput n1 0 dc 0 ac 1")?;
        for (k, section) in self.realization.sections.iter().enumerate() {
            let name = self.subcircuit_name(k, section);
            writeln!(f, "X{} {name} n{} n{} 0", k + 1, k + 1, k + 2)?;
        }
        writeln!(f, ".end")
    }
}

/// One line per stage: name, family, order, and topology.
pub struct StageSummary<'a>(pub &'a StageGraph);

impl fmt::Display for StageSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, attrs) in self.0.stages() {
            let family = attrs.family.map_or("-", |fam| fam.tag());
            let topology = attrs.topology.map_or("-", |t| t.tag());
            writeln!(
                f,
                "{name}: family={family} order={} topology={topology}",
                attrs.order
            )?;
        }
        Ok(())
    }
}

/// The `=` rule placed between candidates.
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}
