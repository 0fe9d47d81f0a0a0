//! Aggregation inputs and output rows

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};

use crate::client::models::{Workflow, WorkflowJob, WorkflowRun};

/// A run together with the workflow it belongs to and its jobs.
///
/// `jobs` is empty when the job listing for the run failed.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub workflow: Workflow,
    pub run: WorkflowRun,
    pub jobs: Vec<WorkflowJob>,
}

impl RunRecord {
    pub fn anchor_time(&self) -> DateTime<Utc> {
        self.run.anchor_time()
    }
}

/// Time attributed to one runner label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerUsage {
    pub label: String,
    pub runs: usize,
    #[serde(serialize_with = "as_nanos")]
    pub duration: Duration,
}

/// Metrics for one job name within a workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummaryRow {
    pub job: String,
    pub runs: usize,
    pub failed: usize,
    pub failure_rate: f64,
    #[serde(serialize_with = "as_nanos")]
    pub avg_duration: Duration,
    #[serde(serialize_with = "as_nanos")]
    pub total_duration: Duration,
    pub runner_summary: Vec<RunnerUsage>,
}

/// Metrics for one workflow over the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub workflow: String,
    pub workflow_id: i64,
    pub runs: usize,
    pub failed: usize,
    /// `failed / runs`, between 0 and 1
    pub failure_rate: f64,
    #[serde(serialize_with = "as_nanos")]
    pub avg_duration: Duration,
    #[serde(serialize_with = "as_nanos")]
    pub total_duration: Duration,
    pub runner_summary: Vec<RunnerUsage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobSummaryRow>,
}

/// Durations go out as integer nanoseconds.
pub(crate) fn as_nanos<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_nanoseconds().unwrap_or(i64::MAX))
}
