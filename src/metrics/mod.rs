//! Workflow metrics: failure rates, durations and runner usage

pub mod aggregate;
pub mod types;

pub use aggregate::aggregate;
pub use types::{JobSummaryRow, RunRecord, RunnerUsage, SummaryRow};
