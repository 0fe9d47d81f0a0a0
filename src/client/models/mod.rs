//! GitHub Actions data models
//!
//! Each resource has a wire type mirroring the REST payload and a domain type
//! used by the rest of the crate. Domain values are built once per response
//! and never mutated afterwards.

mod job;
mod run;
mod workflow;

pub use job::{JobListResponse, WorkflowJob};
pub use run::{RunListResponse, WorkflowRun};
pub use workflow::{Workflow, WorkflowListResponse};
