//! GitHub REST transport

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode};

use super::RestApi;
use crate::error::{ApiError, Result};

/// GitHub API base URL
pub const API_BASE_URL: &str = "https://api.github.com";

/// Client-side pacing; the primary limit is 5000 requests per hour.
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Fallback wait when a rate-limit response carries no timing headers
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// GitHub REST client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GitHubClient {
    /// Create a client for the public API, optionally authenticated.
    pub fn new(token: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Point the client at a different API host (GitHub Enterprise, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// How long to wait before retrying, from `retry-after` or the
/// `x-ratelimit-reset` epoch timestamp.
fn retry_after(headers: &HeaderMap) -> Duration {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(secs) = header("retry-after") {
        return Duration::from_secs(secs.max(0) as u64);
    }
    if let Some(reset) = header("x-ratelimit-reset") {
        let wait = reset - Utc::now().timestamp();
        return Duration::from_secs(wait.max(0) as u64);
    }
    Duration::from_secs(DEFAULT_RETRY_AFTER_SECS)
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
        || headers.contains_key("retry-after")
}

#[async_trait]
impl RestApi for GitHubClient {
    async fn get(&self, path: &str) -> std::result::Result<Vec<u8>, ApiError> {
        self.rate_limiter.until_ready().await;

        let url = self.url_for(path);
        debug!("GET {}", url);

        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("actrics/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to read response: {}", e))
                })?;
                Ok(body.to_vec())
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                if status == StatusCode::TOO_MANY_REQUESTS || rate_limit_exhausted(response.headers())
                {
                    Err(ApiError::RateLimit(retry_after(response.headers())))
                } else {
                    Err(ApiError::Forbidden)
                }
            }
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg))
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg))
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))),
        }
    }
}
