//! Candidate generation command.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use filtergen_config::{GeneratorConfig, find_config};
use filtergen_core::{StageGraph, generate};
use filtergen_design::{CandidateRealization, DesignError, realize_all};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::netlist::{Netlist, StageSummary, separator};

#[derive(Args)]
pub struct GenerateArgs {
    /// Configuration file (TOML); defaults to the first one found
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of first-order stages in the initial cascade
    #[arg(long)]
    stages: Option<usize>,

    /// Cutoff frequency in Hz
    #[arg(long)]
    cutoff: Option<f64>,

    /// Baseline capacitance in farads
    #[arg(long)]
    capacitance: Option<f64>,

    /// Candidate to print (0-based)
    #[arg(long, default_value = "1")]
    candidate_index: usize,

    /// File receiving the netlists of all candidates
    #[arg(long, default_value = "out/netlist.txt")]
    emit_out: PathBuf,

    /// Output format for the selected candidate
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Stage summary followed by the netlist
    Text,
    /// Stages and realized sections as JSON
    Json,
}

/// Loads the explicit config, else the first one found, else the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(find_config);
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            GeneratorConfig::load(&path)
                .with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(stages) = args.stages {
        config.stages = stages;
    }
    if let Some(cutoff) = args.cutoff {
        config.cutoff_hz = cutoff;
    }
    if let Some(capacitance) = args.capacitance {
        config.capacitance = capacitance;
    }

    let spec = config.generator_spec()?;
    let run = generate(&spec)?;
    tracing::info!(
        assignments = run.report.family_assignments,
        merges = run.report.merges,
        rejected = run.report.rejected(),
        accepted = run.report.accepted,
        "search finished"
    );

    if run.candidates.is_empty() {
        println!("No candidates generated.");
        return Ok(());
    }

    let realized = realize_all(&run.candidates, &config.design_params(), &config.pole_source());
    emit_all(&args.emit_out, &run.candidates, &realized)?;
    println!(
        "Wrote {} candidate netlist(s) to {}",
        run.candidates.len(),
        args.emit_out.display()
    );

    let last = run.candidates.len() - 1;
    let idx = args.candidate_index;
    if idx > last {
        anyhow::bail!("candidate index {idx} out of range; valid: 0..={last}");
    }

    match args.format {
        OutputFormat::Text => {
            print!("{}", StageSummary(&run.candidates[idx]));
            match &realized[idx] {
                Ok(r) => print!("{}", Netlist::new(idx, r)),
                Err(e) => println!("* realization failed: {e}"),
            }
        }
        OutputFormat::Json => {
            let report = CandidateReport::new(idx, &run.candidates[idx], &realized[idx]);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn emit_all(
    path: &Path,
    candidates: &[StageGraph],
    realized: &[Result<CandidateRealization, DesignError>],
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} netlists")?
            .progress_chars("##-"),
    );

    for (i, (candidate, result)) in candidates.iter().zip(realized).enumerate() {
        writeln!(out, "### Candidate {i}")?;
        write!(out, "{}", StageSummary(candidate))?;
        writeln!(out)?;
        match result {
            Ok(r) => write!(out, "{}", Netlist::new(i, r))?,
            Err(e) => {
                tracing::warn!(candidate = i, error = %e, "candidate could not be realized");
                writeln!(out, "* realization failed: {e}")?;
            }
        }
        writeln!(out)?;
        writeln!(out, "{}", separator())?;
        writeln!(out)?;
        pb.inc(1);
    }
    out.flush()?;

    pb.finish_with_message("done");
    Ok(())
}

#[derive(Serialize)]
struct StageReport {
    name: String,
    family: Option<&'static str>,
    order: u32,
    topology: Option<&'static str>,
}

#[derive(Serialize)]
struct SectionReport {
    stage: String,
    block: String,
    scale: f64,
    q: Option<f64>,
    values: Vec<(&'static str, f64)>,
}

#[derive(Serialize)]
struct CandidateReport {
    index: usize,
    stages: Vec<StageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<SectionReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CandidateReport {
    fn new(
        index: usize,
        graph: &StageGraph,
        realized: &Result<CandidateRealization, DesignError>,
    ) -> Self {
        let stages = graph
            .stages()
            .map(|(name, a)| StageReport {
                name: name.to_string(),
                family: a.family.map(|f| f.tag()),
                order: a.order,
                topology: a.topology.map(|t| t.tag()),
            })
            .collect();
        let (sections, error) = match realized {
            Ok(r) => (
                Some(
                    r.sections
                        .iter()
                        .map(|s| SectionReport {
                            stage: s.stage.clone(),
                            block: s.block.to_string(),
                            scale: s.section.scale,
                            q: s.section.q,
                            values: s.values.iter().collect(),
                        })
                        .collect(),
                ),
                None,
            ),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            index,
            stages,
            sections,
            error,
        }
    }
}
