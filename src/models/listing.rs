//! JSON rows for the `runs` command

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::client::models::{Workflow, WorkflowRun};
use crate::metrics::types::as_nanos;

/// One run of one workflow, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub workflow_id: i64,
    pub workflow_name: String,
    pub run_id: i64,
    pub status: String,
    pub conclusion: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(serialize_with = "as_nanos")]
    pub duration: Duration,
    pub run_attempt: u64,
    pub run_number: u64,
    pub head_branch: String,
}

impl RunRow {
    pub fn new(workflow: &Workflow, run: WorkflowRun) -> Self {
        Self {
            workflow_id: workflow.id,
            workflow_name: workflow.name.clone(),
            run_id: run.id,
            status: run.status,
            conclusion: run.conclusion,
            created_at: run.created_at,
            updated_at: run.updated_at,
            duration: run.duration,
            run_attempt: run.run_attempt,
            run_number: run.run_number,
            head_branch: run.head_branch,
        }
    }
}
