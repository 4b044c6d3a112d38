//! HTTP server command
//!
//! Flags override the config file, which overrides built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coinswap_core::CoinswapConfig;
use coinswap_server::db::{bootstrap, create_pool_with_options, SchemaSource};
use coinswap_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections (1 = single shared connection)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve files from this directory under /static
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Skip running the schema script on startup
    #[arg(long)]
    pub no_bootstrap: bool,
}

impl ServeArgs {
    /// Fold command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut CoinswapConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }
        if self.no_bootstrap {
            config.database.bootstrap = false;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: CoinswapConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let database_url = config.database_url().context(
        "No database configured. Set via --database-url, DATABASE_URL env, or [database] url in the config file",
    )?;

    tracing::info!(
        bind = %config.server.bind,
        max_connections = config.database.max_connections,
        "Starting coinswap server"
    );

    let pool = create_pool_with_options(database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    if config.database.bootstrap {
        let source = SchemaSource::from_path(config.database.schema_path.clone());
        bootstrap(&pool, &source, false)
            .await
            .with_context(|| format!("Failed to run schema script ({})", source))?;
    }

    let state = AppState::new(pool, &config);

    // Run server (blocks until shutdown)
    run_server(state, ServerConfig::from_config(&config))
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut config = CoinswapConfig::default();
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".parse().unwrap()),
            max_connections: Some(1),
            cors_permissive: true,
            no_bootstrap: true,
            ..ServeArgs::default()
        };
        args.apply(&mut config);

        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.database.max_connections, 1);
        assert!(config.server.cors_permissive);
        assert!(!config.database.bootstrap);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = CoinswapConfig::default();
        config.database.url = Some("postgres://localhost/coins".into());
        ServeArgs::default().apply(&mut config);

        assert_eq!(config, {
            let mut expected = CoinswapConfig::default();
            expected.database.url = Some("postgres://localhost/coins".into());
            expected
        });
    }
}
