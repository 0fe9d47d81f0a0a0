//! Raw REST transport trait

use async_trait::async_trait;

use crate::error::ApiError;

/// Transport for the GitHub REST API.
///
/// Implementations handle authentication, pacing and status mapping; callers
/// get back the undecoded response body.
#[async_trait]
pub trait RestApi: Send + Sync {
    /// GET a path relative to the API root, including its query string
    /// (e.g. `repos/o/r/actions/workflows?page=1&per_page=100`).
    async fn get(&self, path: &str) -> Result<Vec<u8>, ApiError>;
}
