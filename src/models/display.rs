//! Display model implementations for table output
//!
//! Display models turn workflows, runs and summary rows into table rows with
//! human-formatted columns. JSON output uses the underlying types directly.

use tabled::Tabled;

use crate::client::models::Workflow;
use crate::metrics::{JobSummaryRow, SummaryRow};
use crate::models::RunRow;
use crate::output::formatters::{
    RUNNER_SUMMARY_LIMIT, format_duration, format_failure_rate, format_runner_summary,
    format_timestamp,
};

/// Per-workflow summary line.
#[derive(Debug, Clone, Tabled)]
pub struct SummaryDisplay {
    #[tabled(rename = "WORKFLOW")]
    pub workflow: String,

    #[tabled(rename = "RUNS")]
    pub runs: usize,

    #[tabled(rename = "FAILED")]
    pub failed: usize,

    #[tabled(rename = "FAILURE RATE")]
    pub failure_rate: String,

    #[tabled(rename = "AVG")]
    pub avg_duration: String,

    #[tabled(rename = "TOTAL")]
    pub total_duration: String,

    #[tabled(rename = "RUNNERS")]
    pub runners: String,
}

impl From<&SummaryRow> for SummaryDisplay {
    fn from(row: &SummaryRow) -> Self {
        Self {
            workflow: row.workflow.clone(),
            runs: row.runs,
            failed: row.failed,
            failure_rate: format_failure_rate(row.failure_rate),
            avg_duration: format_duration(row.avg_duration),
            total_duration: format_duration(row.total_duration),
            runners: format_runner_summary(&row.runner_summary, RUNNER_SUMMARY_LIMIT),
        }
    }
}

/// Per-job line within a workflow.
#[derive(Debug, Clone, Tabled)]
pub struct JobDisplay {
    #[tabled(rename = "JOB")]
    pub job: String,

    #[tabled(rename = "RUNS")]
    pub runs: usize,

    #[tabled(rename = "FAILED")]
    pub failed: usize,

    #[tabled(rename = "FAILURE RATE")]
    pub failure_rate: String,

    #[tabled(rename = "AVG")]
    pub avg_duration: String,

    #[tabled(rename = "TOTAL")]
    pub total_duration: String,

    #[tabled(rename = "RUNNERS")]
    pub runners: String,
}

impl From<&JobSummaryRow> for JobDisplay {
    fn from(row: &JobSummaryRow) -> Self {
        Self {
            job: row.job.clone(),
            runs: row.runs,
            failed: row.failed,
            failure_rate: format_failure_rate(row.failure_rate),
            avg_duration: format_duration(row.avg_duration),
            total_duration: format_duration(row.total_duration),
            runners: format_runner_summary(&row.runner_summary, RUNNER_SUMMARY_LIMIT),
        }
    }
}

/// Workflow definition line.
#[derive(Debug, Clone, Tabled)]
pub struct WorkflowDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PATH")]
    pub path: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<&Workflow> for WorkflowDisplay {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id,
            name: workflow.name.clone(),
            path: workflow.path.clone(),
            state: workflow.state.clone(),
        }
    }
}

/// Workflow run line.
#[derive(Debug, Clone, Tabled)]
pub struct RunDisplay {
    #[tabled(rename = "WORKFLOW")]
    pub workflow: String,

    #[tabled(rename = "RUN ID")]
    pub run_id: i64,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "CONCLUSION")]
    pub conclusion: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,

    #[tabled(rename = "BRANCH")]
    pub branch: String,

    #[tabled(rename = "RUN #")]
    pub run_number: u64,

    #[tabled(rename = "ATTEMPT")]
    pub attempt: u64,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&RunRow> for RunDisplay {
    fn from(row: &RunRow) -> Self {
        Self {
            workflow: row.workflow_name.clone(),
            run_id: row.run_id,
            status: row.status.clone(),
            conclusion: if row.conclusion.is_empty() {
                "-".to_string()
            } else {
                row.conclusion.clone()
            },
            duration: format_duration(row.duration),
            branch: row.head_branch.clone(),
            run_number: row.run_number,
            attempt: row.run_attempt,
            created: format_timestamp(row.created_at),
        }
    }
}
