use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable pointing at an alternate config file
pub const CONFIG_PATH_ENV: &str = "COINSWAP_CONFIG";

/// Default name of the session cookie
pub const DEFAULT_COOKIE_NAME: &str = "access-token";

/// Centralized configuration for the coinswap server
///
/// Every section falls back to its defaults, so an empty file (or no file
/// at all) is a valid configuration apart from the database URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinswapConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub session: SessionSection,
    pub pages: PagesSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind the HTTP listener to
    pub bind: SocketAddr,
    /// Allow any origin (development only)
    pub cors_permissive: bool,
    /// Directory served under /static, if any
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// PostgreSQL connection string (DATABASE_URL wins)
    pub url: Option<String>,
    pub max_connections: u32,
    /// Run the schema bootstrap script when the server starts
    pub bootstrap: bool,
    /// Schema file overriding the embedded bootstrap script
    pub schema_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub cookie_name: String,
    pub same_site: SameSitePolicy,
    pub secure: bool,
    pub http_only: bool,
}

/// SameSite attribute of the session cookie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    #[default]
    Strict,
    Lax,
    None,
}

/// Redirect targets for the HTML form endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSection {
    pub index: String,
    pub login: String,
    pub sign_up: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
            static_dir: None,
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            bootstrap: true,
            schema_path: None,
        }
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            same_site: SameSitePolicy::Strict,
            secure: false,
            http_only: true,
        }
    }
}

impl Default for PagesSection {
    fn default() -> Self {
        Self {
            index: "/static/index.html".to_string(),
            login: "/static/login.html".to_string(),
            sign_up: "/static/signUp.html".to_string(),
        }
    }
}

impl CoinswapConfig {
    /// Load config from `path`, then apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from an explicit path (no environment overrides).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file path: $COINSWAP_CONFIG or ~/.coinswap/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coinswap/config.toml")
    }

    /// Apply DATABASE_URL / COINSWAP_BIND from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable bind addresses are logged and ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }

        if let Some(bind) = lookup("COINSWAP_BIND") {
            match bind.parse() {
                Ok(addr) => self.server.bind = addr,
                Err(e) => tracing::warn!(value = %bind, error = %e, "ignoring invalid COINSWAP_BIND"),
            }
        }
    }

    /// Database URL, or an actionable error when none is configured.
    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::missing("database.url"))
    }

    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let name = &self.session.cookie_name;
        if name.is_empty() {
            return Err(ConfigError::invalid("session.cookie_name", "must not be empty"));
        }
        if !name.chars().all(is_cookie_name_char) {
            return Err(ConfigError::invalid(
                "session.cookie_name",
                format!("'{}' contains characters not allowed in a cookie name", name),
            ));
        }

        if self.session.same_site == SameSitePolicy::None && !self.session.secure {
            return Err(ConfigError::invalid(
                "session.same_site",
                "'none' requires session.secure = true",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid("database.max_connections", "must be at least 1"));
        }

        for (key, page) in [
            ("pages.index", &self.pages.index),
            ("pages.login", &self.pages.login),
            ("pages.sign_up", &self.pages.sign_up),
        ] {
            if !page.starts_with('/') {
                return Err(ConfigError::invalid(key, "must be an absolute path starting with '/'"));
            }
        }

        Ok(())
    }

    /// Render as TOML (used by `coinswap config show|init`).
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// RFC 6265 token characters
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CoinswapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.cookie_name, "access-token");
        assert_eq!(config.server.bind.port(), 3030);
        assert_eq!(config.pages.index, "/static/index.html");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoinswapConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CoinswapConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbind = \"0.0.0.0:8080\"\n\n[session]\nsame_site = \"lax\"\n"
        )
        .unwrap();

        let config = CoinswapConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.session.same_site, SameSitePolicy::Lax);
        assert_eq!(config.session.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn load_reads_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\ncookie_name = \"sid\"\n").unwrap();

        let config = CoinswapConfig::load(file.path()).unwrap();
        assert_eq!(config.session.cookie_name, "sid");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();

        let err = CoinswapConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_database_url_and_bind() {
        let vars: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://db/coins"),
            ("COINSWAP_BIND", "0.0.0.0:9000"),
        ]
        .into_iter()
        .collect();

        let mut config = CoinswapConfig::default();
        config.apply_env_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.database_url().unwrap(), "postgres://db/coins");
        assert_eq!(config.server.bind.port(), 9000);
    }

    #[test]
    fn invalid_bind_env_is_ignored() {
        let mut config = CoinswapConfig::default();
        config.apply_env_from(|k| (k == "COINSWAP_BIND").then(|| "not-an-addr".to_string()));
        assert_eq!(config.server.bind, ServerSection::default().bind);
    }

    #[test]
    fn missing_database_url() {
        let config = CoinswapConfig::default();
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::Missing { .. })
        ));
    }

    #[test]
    fn same_site_none_requires_secure() {
        let mut config = CoinswapConfig::default();
        config.session.same_site = SameSitePolicy::None;
        assert!(config.validate().is_err());

        config.session.secure = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_cookie_name_and_pages() {
        let mut config = CoinswapConfig::default();
        config.session.cookie_name = "access token".into();
        assert!(config.validate().is_err());

        let mut config = CoinswapConfig::default();
        config.pages.login = "login.html".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trip_of_defaults() {
        let config = CoinswapConfig::default();
        let rendered = config.to_toml_string().unwrap();
        let parsed: CoinswapConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
