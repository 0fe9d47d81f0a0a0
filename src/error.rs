//! Error types for the actrics CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for actrics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A live request failed; carries the rendered request path.
    #[error("GET {path}: {source}")]
    Request {
        path: String,
        #[source]
        source: ApiError,
    },

    /// A per-workflow fetch failed.
    #[error("workflow {workflow}: {source}")]
    Workflow {
        workflow: String,
        #[source]
        source: Box<Error>,
    },

    #[error("repository has no workflows")]
    NoWorkflows,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation failed: {0}")]
    Other(String),
}

impl Error {
    /// Wrap an error with the name of the workflow being fetched.
    pub fn in_workflow(workflow: impl Into<String>, source: Error) -> Self {
        Error::Workflow {
            workflow: workflow.into(),
            source: Box::new(source),
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Set GITHUB_TOKEN or add a token to the config file.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration and argument errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("repo must be in OWNER/REPO format")]
    InvalidRepo,

    #[error("invalid --{flag} value: {reason}")]
    InvalidFlag { flag: &'static str, reason: String },

    #[error("--from must be before --to")]
    EmptyWindow,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Response cache errors
///
/// Only construction failures reach the user; lookups and writes that fail
/// are downgraded to misses by the API gateway.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache ttl must be positive")]
    InvalidTtl,

    #[error("Could not determine cache directory")]
    NoCacheDir,

    #[error("Cache I/O error: {0}")]
    Io(String),
}
