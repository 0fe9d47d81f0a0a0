//! Configuration management for actrics
//!
//! Settings come from an optional YAML file; command-line flags and
//! environment variables take precedence over it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::fetch::{DEFAULT_THREADS, parse_span};

/// Environment variables consulted for an API token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API base URL, for GitHub Enterprise Server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Concurrent workflow fetches
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// How long to keep API responses on disk (`10m`, `1h`, `1d`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<String>,
}

fn default_threads() -> usize {
    DEFAULT_THREADS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            threads: default_threads(),
            cache_ttl: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".actrics").join("config.yaml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Invalid(format!(
                        "config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    log::debug!("No config file at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// API token: `flag` (which clap already fills from `GITHUB_TOKEN`),
    /// then `GH_TOKEN`, then the config file.
    pub fn resolve_token(&self, flag: Option<&str>) -> Option<String> {
        fn present(v: &str) -> bool {
            !v.trim().is_empty()
        }

        flag.filter(|v| present(v))
            .map(str::to_string)
            .or_else(|| {
                TOKEN_ENV_VARS
                    .iter()
                    .filter_map(|name| std::env::var(name).ok())
                    .find(|v| present(v))
            })
            .or_else(|| self.token.clone().filter(|v| present(v)))
    }

    /// Cache TTL from the config file; `None` disables caching.
    pub fn cache_ttl(&self) -> Result<Option<Duration>> {
        match self.preferences.cache_ttl.as_deref() {
            Some(value) => Ok(parse_cache_ttl(value)?),
            None => Ok(None),
        }
    }
}

/// Parse a cache TTL. Zero and empty values disable caching.
pub fn parse_cache_ttl(value: &str) -> std::result::Result<Option<Duration>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let ttl = parse_span("cache-ttl", value)?;
    Ok(ttl.to_std().ok().filter(|d| !d.is_zero()))
}
