//! Config file management: path, show, init

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coinswap_core::CoinswapConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (file + environment) as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Init(args) => run_init(args, path),
    }
}

fn run_show(path: &Path) -> Result<()> {
    let mut config = CoinswapConfig::load_from(path)?;
    config.apply_env();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn run_init(args: InitArgs, path: &Path) -> Result<()> {
    write_default(path, args.force)?;
    println!("Created config at {}", path.display());
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = CoinswapConfig::default().to_toml_string()?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
