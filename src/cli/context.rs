//! Command execution context
//!
//! Loads configuration, resolves the token and runtime options, and builds
//! the API client (with its response cache) once for every command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use crate::cache::ResponseCache;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::github::API_BASE_URL;
use crate::client::{ActionsClient, GitHubClient};
use crate::config::{Config, parse_cache_ttl};
use crate::error::{CacheError, Result};

/// Context for command execution: the API client and resolved runtime options.
///
/// The config file is folded in during construction and not kept.
pub struct CommandContext {
    /// Actions API client (Arc-wrapped for the concurrent fetcher)
    pub api: Arc<ActionsClient<GitHubClient>>,
    /// Output format preference
    pub format: OutputFormat,
    /// Concurrent workflow fetches
    pub threads: usize,
}

impl CommandContext {
    /// Create a context using the default cache directory.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        Self::build(opts, ResponseCache::default_dir)
    }

    /// Create a context caching under `root` instead of the default location.
    #[cfg(test)]
    pub(crate) fn with_cache_dir(opts: &GlobalOptions, root: &Path) -> Result<Self> {
        Self::build(opts, || Ok(root.to_path_buf()))
    }

    fn build<F>(opts: &GlobalOptions, cache_root: F) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<PathBuf, CacheError>,
    {
        let config = Config::load_at(opts.config_ref().map(Path::new))?;

        let format = opts
            .format
            .or_else(|| config_format(&config))
            .unwrap_or_default();
        let threads = opts.threads.unwrap_or(config.preferences.threads).max(1);

        let token = config.resolve_token(opts.token_ref());
        if token.is_none() {
            debug!("No GitHub token found, making unauthenticated requests");
        }

        let base_url = opts
            .api_host_ref()
            .map(str::to_string)
            .or_else(|| config.api_host.clone())
            .unwrap_or_else(|| API_BASE_URL.to_string());
        let rest = GitHubClient::new(token)?.with_base_url(base_url);

        let ttl = match opts.cache_ttl_ref() {
            Some(value) => parse_cache_ttl(value)?,
            None => config.cache_ttl()?,
        };

        let mut api = ActionsClient::new(rest);
        match ttl {
            Some(ttl) if !opts.no_cache => {
                let cache = ResponseCache::new(cache_root()?, ttl)?;
                debug!(
                    "Caching responses in {} for {:?}",
                    cache.root().display(),
                    cache.ttl()
                );
                api = api.with_cache(cache);
            }
            _ => debug!("Response cache disabled"),
        }

        Ok(Self {
            api: Arc::new(api),
            format,
            threads,
        })
    }
}

/// Output format from the config file; unknown values fall back to the default.
fn config_format(config: &Config) -> Option<OutputFormat> {
    let value = config.preferences.format.as_deref()?;
    match value.parse() {
        Ok(format) => Some(format),
        Err(e) => {
            warn!("Ignoring config preference: {}", e);
            None
        }
    }
}
