//! Runs command: recent runs of the selected workflows
//!
//! Workflows are listed one after another; each listing is capped at the
//! requested limit.

use chrono::Utc;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, RunFilterArgs};
use crate::client::models::Workflow;
use crate::client::{ActionsApi, RunFilter};
use crate::error::{Error, Result};
use crate::fetch::{parse_repo, resolve_time_range, select_workflows};
use crate::models::{RunDisplay, RunRow};
use crate::output::{format_json, format_table};

/// Runs listed per workflow when no limit is given.
pub const DEFAULT_LIMIT: usize = 50;

/// Up to `limit` runs of each workflow, in workflow order.
pub async fn list_runs<A>(
    api: &A,
    owner: &str,
    repo: &str,
    workflows: &[Workflow],
    filter: &RunFilter,
    limit: usize,
) -> Result<Vec<RunRow>>
where
    A: ActionsApi + ?Sized,
{
    let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };

    let mut rows = Vec::new();
    for workflow in workflows {
        let runs = api
            .list_workflow_runs(owner, repo, workflow.id, filter, Some(limit))
            .await
            .map_err(|e| Error::in_workflow(&workflow.name, e))?;
        debug!("workflow {}: {} runs", workflow.name, runs.len());
        rows.extend(runs.into_iter().map(|run| RunRow::new(workflow, run)));
    }
    Ok(rows)
}

/// Run the runs command
pub async fn run(
    opts: &GlobalOptions,
    filters: &RunFilterArgs,
    repo: &str,
    limit: usize,
) -> Result<()> {
    let (owner, name) = parse_repo(repo)?;
    let window = resolve_time_range(
        Utc::now(),
        filters.from.as_deref(),
        filters.to.as_deref(),
        Some(filters.last.as_str()),
    )?;
    let ctx = CommandContext::new(opts)?;

    let workflows = ctx.api.list_workflows(&owner, &name).await?;
    let selected = select_workflows(workflows, &filters.workflows)?;
    if selected.is_empty() {
        eprintln!(
            "No workflows in {}/{} matched the current selection.",
            owner, name
        );
        return Ok(());
    }

    let filter = filters.run_filter().created(window.created_filter());
    let rows = list_runs(ctx.api.as_ref(), &owner, &name, &selected, &filter, limit).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&rows)?),
        OutputFormat::Table => {
            let display: Vec<RunDisplay> = rows.iter().map(RunDisplay::from).collect();
            println!("{}", format_table(&display));
        }
    }
    Ok(())
}
