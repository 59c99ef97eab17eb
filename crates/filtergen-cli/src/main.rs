//! Filtergen CLI - enumerate, realize, and emit cascaded low-pass filter candidates.

mod commands;
mod netlist;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filtergen")]
#[command(author, version, about = "Cascaded low-pass filter candidate generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate candidates and write their netlists
    Generate(commands::generate::GenerateArgs),

    /// Show the sections of a single family/order design
    Sections(commands::sections::SectionsArgs),

    /// Print or initialize the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Sections(args) => commands::sections::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
