//! Repository and workflow selection

use crate::client::models::Workflow;
use crate::error::{ConfigError, Error, Result};

/// Split `OWNER/REPO` into its two parts.
pub fn parse_repo(input: &str) -> std::result::Result<(String, String), ConfigError> {
    let parts: Vec<&str> = input.trim().split('/').map(str::trim).collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepo),
    }
}

/// Whether any selector names this workflow.
///
/// A selector matches the workflow's name, path or file name
/// (case-insensitively), or its numeric ID. Blank selectors never match.
pub fn workflow_matches(workflow: &Workflow, selectors: &[String]) -> bool {
    selectors
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .any(|s| {
            s.eq_ignore_ascii_case(&workflow.name)
                || s.eq_ignore_ascii_case(&workflow.path)
                || s.eq_ignore_ascii_case(workflow.file_name())
                || s.parse::<i64>().is_ok_and(|id| id == workflow.id)
        })
}

/// Pick the workflows to report on.
///
/// Platform-managed (`dynamic/...`) workflows are dropped first. A
/// repository left with no workflows is an error; an empty selector list
/// selects everything, and a selection matching nothing is an empty `Vec`.
pub fn select_workflows(workflows: Vec<Workflow>, selectors: &[String]) -> Result<Vec<Workflow>> {
    let workflows: Vec<Workflow> = workflows.into_iter().filter(|w| !w.is_dynamic()).collect();
    if workflows.is_empty() {
        return Err(Error::NoWorkflows);
    }

    let selectors: Vec<String> = selectors
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if selectors.is_empty() {
        return Ok(workflows);
    }

    Ok(workflows
        .into_iter()
        .filter(|w| workflow_matches(w, &selectors))
        .collect())
}
