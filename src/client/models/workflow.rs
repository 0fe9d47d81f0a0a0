//! Workflow definitions

use serde::{Deserialize, Serialize};

/// A workflow definition in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow ID
    pub id: i64,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Path of the definition file, e.g. `.github/workflows/ci.yml`
    #[serde(default)]
    pub path: String,

    /// `active`, `disabled_manually`, ...
    #[serde(default)]
    pub state: String,
}

impl Workflow {
    /// Workflows managed by the platform itself (e.g. dependabot) live under
    /// a `dynamic/` path and have no definition file in the repository.
    pub fn is_dynamic(&self) -> bool {
        self.path.starts_with("dynamic")
    }

    /// File name of the definition, e.g. `ci.yml`.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// One page of `GET repos/{owner}/{repo}/actions/workflows`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowListResponse {
    #[serde(default)]
    pub total_count: usize,

    #[serde(default)]
    pub workflows: Vec<Workflow>,
}
