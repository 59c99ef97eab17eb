//! Configuration file command.

use std::path::PathBuf;

use clap::Args;
use filtergen_config::{CONFIG_FILE_NAME, GeneratorConfig, ensure_user_config_dir, find_config};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration instead of printing it
    /// (to PATH, or to the user configuration file)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    init: Option<Option<PathBuf>>,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if let Some(target) = args.init {
        let path = match target {
            Some(path) => path,
            None => ensure_user_config_dir()?.join(CONFIG_FILE_NAME),
        };
        if path.exists() && !args.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        GeneratorConfig::default().save(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = match find_config() {
        Some(path) => {
            println!("# loaded from {}", path.display());
            GeneratorConfig::load(&path)?
        }
        None => GeneratorConfig::default(),
    };
    config.validate()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
