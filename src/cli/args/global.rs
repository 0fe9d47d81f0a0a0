//! Global CLI options shared across all commands
//!
//! Handlers take one struct instead of a long parameter list. Precedence is
//! CLI flag > environment variable > config file > default; this struct
//! holds the flag/env layer and `CommandContext` folds in the config file.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format; `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.actrics/config.yaml)
    pub config: Option<String>,

    /// API token from `--token` or `GITHUB_TOKEN`
    pub token: Option<String>,

    /// Concurrent workflow fetches
    pub threads: Option<usize>,

    /// Response cache TTL override (`0` disables)
    pub cache_ttl: Option<String>,

    /// Skip the response cache entirely
    pub no_cache: bool,

    /// Custom API base URL (GitHub Enterprise Server, tests)
    pub api_host: Option<String>,

    /// Debug logging
    pub debug: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            token: cli.token.clone(),
            threads: cli.threads,
            cache_ttl: cli.cache_ttl.clone(),
            no_cache: cli.no_cache,
            api_host: cli.api_host.clone(),
            debug: cli.debug,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get token as `Option<&str>`.
    pub fn token_ref(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref().filter(|h| !h.trim().is_empty())
    }

    /// Get cache TTL override as `Option<&str>`.
    pub fn cache_ttl_ref(&self) -> Option<&str> {
        self.cache_ttl.as_deref()
    }
}
