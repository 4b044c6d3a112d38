//! Schema bootstrap
//!
//! `database.sql` creates tables, views and stored procedures idempotently
//! and runs once per server start (or via `coinswap db init`).

use std::borrow::Cow;
use std::path::PathBuf;

use sqlx::PgPool;

use super::error::DbError;

/// Embedded schema and stored procedures
pub const SCHEMA_SQL: &str = include_str!("../../sql/database.sql");

/// Embedded sample catalog
pub const SEED_SQL: &str = include_str!("../../sql/seed.sql");

/// Signature checked by [`is_installed`]; created last by the schema script.
const PROBE_FUNCTION: &str = "cancel_swap_offer(text,integer)";

/// Where the schema script comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    #[default]
    Embedded,
    File(PathBuf),
}

impl SchemaSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(Self::File).unwrap_or_default()
    }

    /// Read the script text.
    pub async fn load(&self) -> Result<Cow<'static, str>, DbError> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(SCHEMA_SQL)),
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map(Cow::Owned)
                .map_err(|source| DbError::Script {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded database.sql"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Execute a multi-statement SQL script.
pub async fn run_script(pool: &PgPool, sql: &str) -> Result<(), DbError> {
    sqlx::raw_sql(sql).execute(pool).await?;
    Ok(())
}

/// Install the schema and, optionally, the sample catalog.
pub async fn bootstrap(pool: &PgPool, source: &SchemaSource, seed: bool) -> Result<(), DbError> {
    tracing::info!(source = %source, "running schema bootstrap");
    let script = source.load().await?;
    run_script(pool, &script).await?;

    if seed {
        tracing::info!("loading sample catalog");
        run_script(pool, SEED_SQL).await?;
    }

    tracing::info!("schema bootstrap complete");
    Ok(())
}

/// Whether the stored procedures are present.
pub async fn is_installed(pool: &PgPool) -> Result<bool, DbError> {
    let installed: bool = sqlx::query_scalar("SELECT to_regprocedure($1) IS NOT NULL")
        .bind(PROBE_FUNCTION)
        .fetch_one(pool)
        .await?;
    Ok(installed)
}
