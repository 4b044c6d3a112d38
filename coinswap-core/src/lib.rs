//! coinswap-core: configuration shared by the server and the CLI

pub mod config;
pub mod error;

pub use config::{
    CoinswapConfig, DatabaseSection, PagesSection, SameSitePolicy, ServerSection, SessionSection,
    CONFIG_PATH_ENV, DEFAULT_COOKIE_NAME,
};
pub use error::{ConfigError, Result};
