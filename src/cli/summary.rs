//! Summary command: per-workflow run metrics

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, RunFilterArgs};
use crate::client::{ActionsApi, RunFilter};
use crate::error::Result;
use crate::fetch::{
    FetchOptions, TimeWindow, fetch_records, parse_repo, resolve_time_range, select_workflows,
};
use crate::metrics::{SummaryRow, aggregate};
use crate::models::{JobDisplay, SummaryDisplay};
use crate::output::{format_json, format_table, format_titled_table};

/// Everything `summarize` needs besides the API.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub selectors: Vec<String>,
    /// Branch/status filters; the created range is filled in per mode
    pub filter: RunFilter,
    pub window: TimeWindow,
    /// Most recent N runs per workflow instead of the time window
    pub runs: Option<usize>,
    pub threads: usize,
}

/// Result of a summary.
#[derive(Debug)]
pub enum SummaryOutcome {
    /// The workflow selectors matched nothing
    NoMatch,
    Rows(Vec<SummaryRow>),
}

/// Select workflows, fetch their runs and jobs, and aggregate.
///
/// In "most recent N" mode the created-date filter is dropped and the
/// window is recomputed from the fetched runs.
pub async fn summarize<A>(
    api: Arc<A>,
    owner: &str,
    repo: &str,
    request: &SummaryRequest,
    cancel: &CancellationToken,
) -> Result<SummaryOutcome>
where
    A: ActionsApi + ?Sized + 'static,
{
    let workflows = api.list_workflows(owner, repo).await?;
    let selected = select_workflows(workflows, &request.selectors)?;
    if selected.is_empty() {
        return Ok(SummaryOutcome::NoMatch);
    }

    let filter = match request.runs {
        Some(_) => request.filter.clone().without_created(),
        None => request.filter.clone().created(request.window.created_filter()),
    };
    let options = FetchOptions {
        filter,
        limit: request.runs,
        threads: request.threads,
    };

    let records = fetch_records(api, owner, repo, selected, &options, cancel).await?;

    let window = match request.runs {
        Some(_) => TimeWindow::observed(&records, Utc::now()),
        None => request.window,
    };
    debug!("Aggregating {} runs from {} to {}", records.len(), window.from, window.to);

    Ok(SummaryOutcome::Rows(aggregate(&records, window.from, window.to)))
}

/// Run the summary command
pub async fn run(
    opts: &GlobalOptions,
    filters: &RunFilterArgs,
    repo: &str,
    runs: usize,
) -> Result<()> {
    let (owner, name) = parse_repo(repo)?;
    let window = resolve_time_range(
        Utc::now(),
        filters.from.as_deref(),
        filters.to.as_deref(),
        Some(filters.last.as_str()),
    )?;
    let ctx = CommandContext::new(opts)?;

    let request = SummaryRequest {
        selectors: filters.workflows.clone(),
        filter: filters.run_filter(),
        window,
        runs: (runs > 0).then_some(runs),
        threads: ctx.threads,
    };

    let (cancel, watcher) = cancel_on_interrupt();
    let outcome = summarize(Arc::clone(&ctx.api), &owner, &name, &request, &cancel).await;
    watcher.abort();

    match outcome? {
        SummaryOutcome::NoMatch => {
            eprintln!(
                "No workflows in {}/{} matched the current selection.",
                owner, name
            );
            Ok(())
        }
        SummaryOutcome::Rows(rows) => print_rows(&rows, ctx.format),
    }
}

/// A token cancelled when the user presses Ctrl-C.
fn cancel_on_interrupt() -> (CancellationToken, JoinHandle<()>) {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling outstanding requests");
                cancel.cancel();
            }
        })
    };
    (cancel, watcher)
}

fn print_rows(rows: &[SummaryRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(rows)?),
        OutputFormat::Table => {
            let display: Vec<SummaryDisplay> = rows.iter().map(SummaryDisplay::from).collect();
            println!("{}", format_table(&display));

            for row in rows.iter().filter(|r| !r.jobs.is_empty()) {
                let jobs: Vec<JobDisplay> = row.jobs.iter().map(JobDisplay::from).collect();
                println!();
                println!(
                    "{}",
                    format_titled_table(&format!("Jobs in {}", row.workflow), &jobs)
                );
            }
        }
    }
    Ok(())
}
