//! Typed Actions listing trait

use async_trait::async_trait;

use crate::client::models::{Workflow, WorkflowJob, WorkflowRun};
use crate::client::pagination::RunFilter;
use crate::error::Result;

/// Paginated Actions listings for a single repository.
///
/// Each method follows pages until the server-reported total is reached or a
/// page comes back empty.
#[async_trait]
pub trait ActionsApi: Send + Sync {
    /// List every workflow defined in the repository
    async fn list_workflows(&self, owner: &str, repo: &str) -> Result<Vec<Workflow>>;

    /// List runs of one workflow, newest first.
    ///
    /// With `limit`, stops as soon as that many runs have been collected.
    async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
        filter: &RunFilter,
        limit: Option<usize>,
    ) -> Result<Vec<WorkflowRun>>;

    /// List the jobs of one run
    async fn list_jobs(&self, owner: &str, repo: &str, run_id: i64) -> Result<Vec<WorkflowJob>>;
}
