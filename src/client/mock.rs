//! Mock API clients for testing
//!
//! [`MockRestClient`] serves canned bodies by request path for gateway tests;
//! [`MockActionsApi`] serves typed listings for orchestration tests. Both are
//! cheap to clone and share their state, so a test can keep a handle for
//! assertions after giving a clone away.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{ActionsApi, RestApi};
use super::models::{Workflow, WorkflowJob, WorkflowRun};
use super::pagination::RunFilter;
use crate::error::{ApiError, Result};

/// Mock REST transport keyed by the full request path.
///
/// Unknown paths answer with `NotFound`.
#[derive(Clone, Default)]
pub struct MockRestClient {
    responses: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    failures: Arc<Mutex<HashMap<String, ApiError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub async fn with_response(self, path: &str, body: Vec<u8>) -> Self {
        self.responses.lock().await.insert(path.to_string(), body);
        self
    }

    /// Serve a JSON value for `path`.
    pub async fn with_json(self, path: &str, body: serde_json::Value) -> Self {
        self.with_response(path, body.to_string().into_bytes()).await
    }

    /// Fail every request for `path` with `error`.
    pub async fn with_failure(self, path: &str, error: ApiError) -> Self {
        self.failures.lock().await.insert(path.to_string(), error);
        self
    }

    /// Paths requested so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

/// `ApiError` isn't `Clone`; rebuild an equivalent value per call.
fn replay(error: &ApiError) -> ApiError {
    match error {
        ApiError::Unauthorized => ApiError::Unauthorized,
        ApiError::Forbidden => ApiError::Forbidden,
        ApiError::NotFound(m) => ApiError::NotFound(m.clone()),
        ApiError::RateLimit(d) => ApiError::RateLimit(*d),
        ApiError::BadRequest(m) => ApiError::BadRequest(m.clone()),
        ApiError::ServerError(m) => ApiError::ServerError(m.clone()),
        ApiError::Network(m) => ApiError::Network(m.clone()),
        ApiError::InvalidResponse(m) => ApiError::InvalidResponse(m.clone()),
    }
}

#[async_trait]
impl RestApi for MockRestClient {
    async fn get(&self, path: &str) -> std::result::Result<Vec<u8>, ApiError> {
        self.calls.lock().await.push(path.to_string());

        if let Some(error) = self.failures.lock().await.get(path) {
            return Err(replay(error));
        }
        self.responses
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(path.to_string()))
    }
}

/// A captured run listing request.
#[derive(Debug, Clone)]
pub struct CapturedRunRequest {
    pub workflow_id: i64,
    pub filter: RunFilter,
    pub limit: Option<usize>,
}

/// Counts one in-flight call; released on drop, including cancellation.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, max: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        max.fetch_max(now, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mock typed Actions API.
#[derive(Clone, Default)]
pub struct MockActionsApi {
    workflows: Arc<Mutex<Vec<Workflow>>>,
    runs: Arc<Mutex<HashMap<i64, Vec<WorkflowRun>>>>,
    jobs: Arc<Mutex<HashMap<i64, Vec<WorkflowJob>>>>,
    failing_workflows: Arc<Mutex<HashSet<i64>>>,
    failing_job_runs: Arc<Mutex<HashSet<i64>>>,
    /// Artificial latency for run listings
    delay: Arc<Mutex<Option<Duration>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    job_calls: Arc<AtomicUsize>,
    captured_requests: Arc<Mutex<Vec<CapturedRunRequest>>>,
}

impl MockActionsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_workflows(self, workflows: Vec<Workflow>) -> Self {
        *self.workflows.lock().await = workflows;
        self
    }

    pub async fn with_runs(self, workflow_id: i64, runs: Vec<WorkflowRun>) -> Self {
        self.runs.lock().await.insert(workflow_id, runs);
        self
    }

    pub async fn with_jobs(self, run_id: i64, jobs: Vec<WorkflowJob>) -> Self {
        self.jobs.lock().await.insert(run_id, jobs);
        self
    }

    /// Make run listing for `workflow_id` fail with a server error.
    pub async fn with_failing_workflow(self, workflow_id: i64) -> Self {
        self.failing_workflows.lock().await.insert(workflow_id);
        self
    }

    /// Make job listing for `run_id` fail with a server error.
    pub async fn with_failing_jobs(self, run_id: i64) -> Self {
        self.failing_job_runs.lock().await.insert(run_id);
        self
    }

    /// Delay every successful run listing by `delay`.
    pub async fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().await = Some(delay);
        self
    }

    /// Highest number of run listings observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Run listings currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn job_calls(&self) -> usize {
        self.job_calls.load(Ordering::SeqCst)
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRunRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl ActionsApi for MockActionsApi {
    async fn list_workflows(&self, _owner: &str, _repo: &str) -> Result<Vec<Workflow>> {
        Ok(self.workflows.lock().await.clone())
    }

    async fn list_workflow_runs(
        &self,
        _owner: &str,
        _repo: &str,
        workflow_id: i64,
        filter: &RunFilter,
        limit: Option<usize>,
    ) -> Result<Vec<WorkflowRun>> {
        self.captured_requests.lock().await.push(CapturedRunRequest {
            workflow_id,
            filter: filter.clone(),
            limit,
        });

        if self.failing_workflows.lock().await.contains(&workflow_id) {
            return Err(ApiError::ServerError(format!("workflow {} unavailable", workflow_id)).into());
        }

        let _in_flight = InFlight::enter(&self.in_flight, &self.max_in_flight);

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut runs = self
            .runs
            .lock()
            .await
            .get(&workflow_id)
            .cloned()
            .unwrap_or_default();
        if let Some(limit) = limit {
            runs.truncate(limit);
        }
        Ok(runs)
    }

    async fn list_jobs(&self, _owner: &str, _repo: &str, run_id: i64) -> Result<Vec<WorkflowJob>> {
        self.job_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_job_runs.lock().await.contains(&run_id) {
            return Err(ApiError::ServerError(format!("jobs for run {} unavailable", run_id)).into());
        }
        Ok(self
            .jobs
            .lock()
            .await
            .get(&run_id)
            .cloned()
            .unwrap_or_default())
    }
}
