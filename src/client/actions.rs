//! Cached, paginated GitHub Actions gateway
//!
//! Wraps any [`RestApi`] transport, consulting the optional response cache
//! before each page request and writing successful responses through to it.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::models::{
    JobListResponse, RunListResponse, Workflow, WorkflowJob, WorkflowListResponse, WorkflowRun,
};
use super::pagination::{MAX_PAGE_SIZE, RunFilter, page_params, render_path};
use super::{ActionsApi, RestApi};
use crate::cache::ResponseCache;
use crate::error::{ApiError, Error, Result};

/// Actions listings backed by a REST transport and an optional cache.
///
/// The cache is disabled when constructed without one (`--no-cache`, or no
/// TTL configured).
pub struct ActionsClient<R: RestApi> {
    rest: R,
    cache: Option<ResponseCache>,
}

impl<R: RestApi> ActionsClient<R> {
    pub fn new(rest: R) -> Self {
        Self { rest, cache: None }
    }

    /// Enable response caching.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Try to decode a cached response; any problem is a miss.
    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let data = match cache.get(key) {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!("Cache miss: {}", key);
                return None;
            }
            Err(e) => {
                debug!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(value) => {
                debug!("Cache hit: {}", key);
                Some(value)
            }
            Err(e) => {
                debug!("Ignoring undecodable cache entry for {}: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write-through.
    fn set_cached(&self, key: &str, data: &[u8]) {
        if let Some(ref cache) = self.cache
            && let Err(e) = cache.set(key, data)
        {
            warn!("Failed to cache response for {}: {}", key, e);
        }
    }

    /// GET `path` (path plus query) from the cache or the API.
    async fn cached_get<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T> {
        if let Some(value) = self.get_cached(path) {
            return Ok(value);
        }

        let body = self.rest.get(path).await.map_err(|source| Error::Request {
            path: path.to_string(),
            source,
        })?;
        let value = serde_json::from_slice(&body).map_err(|e| Error::Request {
            path: path.to_string(),
            source: ApiError::InvalidResponse(e.to_string()),
        })?;

        self.set_cached(path, &body);
        Ok(value)
    }

    /// Follow pages of `path` until the reported total is reached, a page
    /// comes back empty, or `limit` items have been collected.
    ///
    /// The page size stays fixed for the whole listing so that page offsets
    /// line up; with a limit below the maximum it is the limit itself.
    async fn fetch_all<P, T>(
        &self,
        path: &str,
        filters: &[(&'static str, String)],
        limit: Option<usize>,
        split: impl Fn(P) -> (usize, Vec<T>) + Send + Sync,
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned + Send,
        T: Send,
    {
        if limit == Some(0) {
            return Ok(Vec::new());
        }
        let per_page = limit.map_or(MAX_PAGE_SIZE, |l| l.min(MAX_PAGE_SIZE));

        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let mut params = page_params(per_page, page);
            params.extend_from_slice(filters);
            let request = render_path(path, &params);

            let (total, batch) = split(self.cached_get::<P>(&request).await?);
            let received = batch.len();
            items.extend(batch);
            debug!(
                "{}: page {} returned {} items ({} of {})",
                path,
                page,
                received,
                items.len(),
                total
            );

            if let Some(limit) = limit
                && items.len() >= limit
            {
                items.truncate(limit);
                break;
            }
            if received == 0 || items.len() >= total {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl<R: RestApi> ActionsApi for ActionsClient<R> {
    async fn list_workflows(&self, owner: &str, repo: &str) -> Result<Vec<Workflow>> {
        let path = format!("repos/{}/{}/actions/workflows", owner, repo);
        self.fetch_all(&path, &[], None, |page: WorkflowListResponse| {
            (page.total_count, page.workflows)
        })
        .await
    }

    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
        filter: &RunFilter,
        limit: Option<usize>,
    ) -> Result<Vec<WorkflowRun>> {
        let path = format!(
            "repos/{}/{}/actions/workflows/{}/runs",
            owner, repo, workflow_id
        );
        self.fetch_all(
            &path,
            &filter.to_query_params(),
            limit,
            |page: RunListResponse| {
                let runs = page.workflow_runs.into_iter().map(WorkflowRun::from);
                (page.total_count, runs.collect())
            },
        )
        .await
    }

    async fn list_jobs(&self, owner: &str, repo: &str, run_id: i64) -> Result<Vec<WorkflowJob>> {
        let path = format!("repos/{}/{}/actions/runs/{}/jobs", owner, repo, run_id);
        self.fetch_all(&path, &[], None, |page: JobListResponse| {
            let jobs = page.jobs.into_iter().map(WorkflowJob::from);
            (page.total_count, jobs.collect())
        })
        .await
    }
}
