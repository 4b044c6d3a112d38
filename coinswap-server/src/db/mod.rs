//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - One parameterized statement per repository call
//! - Authorization and write validation live in stored procedures;
//!   the access token is always the first argument

pub mod error;
pub mod pool;
pub mod repos;
pub mod schema;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::{bootstrap, is_installed, run_script, SchemaSource};
pub use sqlx::PgPool;
