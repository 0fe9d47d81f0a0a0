//! Jobs within a workflow run

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Job as returned by `GET .../actions/runs/{id}/jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPayload {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub conclusion: Option<String>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub runner_name: Option<String>,

    /// Runner labels requested by the job (`runs-on`)
    #[serde(default)]
    pub labels: Vec<String>,
}

/// One page of jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    #[serde(default)]
    pub total_count: usize,

    #[serde(default)]
    pub jobs: Vec<JobPayload>,
}

/// A unit of work within a run, executed on a labeled runner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowJob {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub conclusion: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub runner_name: String,
    pub labels: Vec<String>,
}

impl WorkflowJob {
    /// Wall time between start and completion; zero when either is missing
    /// or the timestamps are inverted.
    pub fn duration(&self) -> Duration {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) if end >= start => end - start,
            _ => Duration::zero(),
        }
    }
}

impl From<JobPayload> for WorkflowJob {
    fn from(job: JobPayload) -> Self {
        Self {
            id: job.id,
            name: job.name,
            status: job.status.unwrap_or_default(),
            conclusion: job.conclusion.unwrap_or_default(),
            started_at: job.started_at,
            completed_at: job.completed_at,
            runner_name: job.runner_name.unwrap_or_default(),
            labels: job.labels,
        }
    }
}
