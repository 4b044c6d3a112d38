//! Database maintenance: one-shot schema bootstrap and installation check

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use coinswap_core::CoinswapConfig;
use coinswap_server::db::{bootstrap, create_pool_with_options, is_installed, PgPool, SchemaSource};

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommands,
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Run the schema script (tables, views, stored procedures) and exit
    Init(InitArgs),
    /// Connect and report whether the schema is installed
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Also load the sample coin catalog
    #[arg(long)]
    pub seed: bool,

    /// Schema file to run instead of the built-in script
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_db(args: DbArgs, config: CoinswapConfig) -> Result<()> {
    match args.command {
        DbCommands::Init(args) => run_init(args, config).await,
        DbCommands::Check(args) => run_check(args, config).await,
    }
}

async fn connect(url: Option<String>, mut config: CoinswapConfig) -> Result<PgPool> {
    if url.is_some() {
        config.database.url = url;
    }
    let database_url = config.database_url().context(
        "No database configured. Set via --database-url, DATABASE_URL env, or [database] url in the config file",
    )?;
    create_pool_with_options(database_url, 1)
        .await
        .context("Failed to connect to database")
}

async fn run_init(args: InitArgs, config: CoinswapConfig) -> Result<()> {
    let source = SchemaSource::from_path(args.schema.or_else(|| config.database.schema_path.clone()));
    let pool = connect(args.database_url, config).await?;

    bootstrap(&pool, &source, args.seed)
        .await
        .with_context(|| format!("Failed to run schema script ({})", source))?;
    pool.close().await;

    println!("Schema installed from {}", source);
    if args.seed {
        println!("Sample catalog loaded");
    }
    Ok(())
}

async fn run_check(args: CheckArgs, config: CoinswapConfig) -> Result<()> {
    let pool = connect(args.database_url, config).await?;
    let installed = is_installed(&pool)
        .await
        .context("Failed to query database")?;
    pool.close().await;

    if !installed {
        bail!("Database reachable, but the coinswap schema is not installed. Run `coinswap db init`.");
    }
    println!("Database reachable, schema installed");
    Ok(())
}
