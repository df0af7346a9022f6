use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Registry configuration, read from `~/.stockroll/config.toml`
///
/// Every field has a default, so a missing config file is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockrollConfig {
    /// SQLite database file
    pub database: PathBuf,
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub request_timeout_secs: u64,
}

impl Default for StockrollConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("stockroll.db"),
            server: ServerSection::default(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            request_timeout_secs: 30,
        }
    }
}

impl StockrollConfig {
    /// Load config and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the default location is read
    /// when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would leave the server unusable
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Get config file path: ~/.stockroll/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".stockroll/config.toml")
    }

    /// Apply `STOCKROLL_DATABASE` and `STOCKROLL_BIND` from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = lookup("STOCKROLL_DATABASE") {
            self.database = PathBuf::from(database);
        }

        if let Some(bind) = lookup("STOCKROLL_BIND") {
            self.server.bind = bind
                .parse()
                .with_context(|| format!("STOCKROLL_BIND is not a socket address: {bind}"))?;
        }

        Ok(())
    }
}
