//! coinswap-server: HTTP API for the coin catalog, collections and swaps
//!
//! - `models`: row types and validated inputs
//! - `db`: pool, schema bootstrap and one repository per resource
//! - `http`: axum router, form binding, session cookies
//!
//! Authorization is delegated to the database: every privileged statement
//! receives the caller's access token (or NULL) as its first argument.

pub mod db;
pub mod http;
pub mod models;

pub use db::{bootstrap, create_pool, create_pool_with_options, is_installed, DbError, SchemaSource};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
