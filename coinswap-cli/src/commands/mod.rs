//! Command implementations for the coinswap CLI

pub mod config;
pub mod db;
pub mod serve;

pub use config::run_config;
pub use db::run_db;
pub use serve::run_serve;
