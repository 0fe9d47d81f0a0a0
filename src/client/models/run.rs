//! Workflow runs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Run as returned by `GET .../actions/workflows/{id}/runs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayload {
    pub id: i64,

    #[serde(default)]
    pub workflow_id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub event: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Null while the run is in progress
    #[serde(default)]
    pub conclusion: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub run_started_at: Option<DateTime<Utc>>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub run_number: u64,

    #[serde(default)]
    pub run_attempt: u64,

    /// Billable duration, only present on some API versions
    #[serde(default)]
    pub run_duration_ms: Option<i64>,

    #[serde(default)]
    pub head_branch: Option<String>,
}

/// One page of workflow runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunListResponse {
    #[serde(default)]
    pub total_count: usize,

    #[serde(default)]
    pub workflow_runs: Vec<RunPayload>,
}

/// One execution of a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRun {
    pub id: i64,
    pub workflow_id: i64,
    pub name: String,
    pub event: String,
    pub status: String,
    pub conclusion: String,
    pub created_at: DateTime<Utc>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub run_number: u64,
    pub run_attempt: u64,
    /// Fixed at construction: the reported duration, or `updated_at -
    /// run_started_at` when none was reported.
    pub duration: Duration,
    pub head_branch: String,
}

impl WorkflowRun {
    /// Timestamp used for window membership: start time, else creation time.
    pub fn anchor_time(&self) -> DateTime<Utc> {
        self.run_started_at.unwrap_or(self.created_at)
    }
}

impl From<RunPayload> for WorkflowRun {
    fn from(run: RunPayload) -> Self {
        let mut duration = Duration::milliseconds(run.run_duration_ms.unwrap_or(0));
        if duration.is_zero()
            && let Some(start) = run.run_started_at
        {
            duration = run.updated_at - start;
        }

        Self {
            id: run.id,
            workflow_id: run.workflow_id,
            name: run.name.unwrap_or_default(),
            event: run.event.unwrap_or_default(),
            status: run.status.unwrap_or_default(),
            conclusion: run.conclusion.unwrap_or_default(),
            created_at: run.created_at,
            run_started_at: run.run_started_at,
            updated_at: run.updated_at,
            run_number: run.run_number,
            run_attempt: run.run_attempt,
            duration,
            head_branch: run.head_branch.unwrap_or_default(),
        }
    }
}
