//! coinswap CLI - coin collection and swap server
//!
//! - `serve`: run the HTTP API (bootstraps the schema unless told not to)
//! - `db`: one-shot schema install and installation check
//! - `config`: locate, print and initialize the config file
//! - `completions`: shell completion scripts

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use coinswap_core::{CoinswapConfig, CONFIG_PATH_ENV};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "coinswap",
    author,
    version,
    about = "Coin catalog, collections and swaps over HTTP",
    long_about = "Serve the coinswap HTTP API backed by PostgreSQL stored procedures. \
                  Collectors browse the catalog, track the coins they own and want, \
                  and trade coins through swap offers and requests."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.coinswap/config.toml)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Database maintenance (init, check)
    Db(commands::db::DbArgs),
    /// Manage coinswap configuration (path, show, init)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Load the config file (explicit path or default location) plus environment overrides.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.clone().unwrap_or_else(CoinswapConfig::config_path);

    match cli.command {
        Commands::Serve(args) => {
            commands::run_serve(args, CoinswapConfig::load(&config_path)?).await?
        }
        Commands::Db(args) => commands::run_db(args, CoinswapConfig::load(&config_path)?).await?,
        Commands::Config(args) => commands::run_config(args, &config_path)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "coinswap",
            "--debug",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--max-connections",
            "1",
            "--no-bootstrap",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind.unwrap().port(), 8080);
                assert_eq!(args.max_connections, Some(1));
                assert!(args.no_bootstrap);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
