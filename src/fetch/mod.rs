//! Concurrent retrieval of runs and jobs for selected workflows
//!
//! One task is spawned per workflow; a semaphore bounds how many are active
//! at once. The first hard failure cancels the rest. Failures listing a
//! single run's jobs are soft: the run is kept with no job data.

pub mod selection;
pub mod window;

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::client::models::Workflow;
use crate::client::{ActionsApi, RunFilter};
use crate::error::{Error, Result};
use crate::metrics::RunRecord;

pub use selection::{parse_repo, select_workflows};
pub use window::{TimeWindow, parse_span, resolve_time_range};

/// Default number of concurrent workflow fetches.
pub const DEFAULT_THREADS: usize = 4;

/// What to fetch for each workflow.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub filter: RunFilter,
    /// Most recent N runs per workflow
    pub limit: Option<usize>,
    /// Concurrent workflow tasks; values below 1 are raised to 1.
    pub threads: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            filter: RunFilter::default(),
            limit: None,
            threads: DEFAULT_THREADS,
        }
    }
}

/// Fetch every run (and its jobs) for `workflows`.
///
/// Records come back in no particular order. Cancelling `cancel` stops all
/// tasks and returns [`Error::Cancelled`] unless a hard error came first.
pub async fn fetch_records<A>(
    api: Arc<A>,
    owner: &str,
    repo: &str,
    workflows: Vec<Workflow>,
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<RunRecord>>
where
    A: ActionsApi + ?Sized + 'static,
{
    let threads = options.threads.max(1);
    debug!(
        "Fetching runs for {} workflows with {} concurrent tasks",
        workflows.len(),
        threads
    );

    let semaphore = Arc::new(Semaphore::new(threads));
    let cancel = cancel.child_token();
    let records = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = JoinSet::new();

    for workflow in workflows {
        let api = Arc::clone(&api);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();
        let records = Arc::clone(&records);
        let owner = owner.to_string();
        let repo = repo.to_string();
        let filter = options.filter.clone();
        let limit = options.limit;

        tasks.spawn(async move {
            let _permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                permit = semaphore.acquire_owned() => permit.map_err(|_| Error::Cancelled)?,
            };

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                result = fetch_workflow(api.as_ref(), &owner, &repo, &workflow, &filter, limit, &cancel) => result,
            };

            match fetched {
                Ok(fetched) => {
                    records
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend(fetched);
                    Ok(())
                }
                Err(e) => {
                    cancel.cancel();
                    Err(e)
                }
            }
        });
    }

    let mut first_error: Option<Error> = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome =
            joined.unwrap_or_else(|e| Err(Error::Other(format!("fetch task failed: {}", e))));
        if let Err(e) = outcome {
            cancel.cancel();
            // Tasks that merely observed the cancellation don't displace the
            // error that caused it.
            let replace = match &first_error {
                None => true,
                Some(Error::Cancelled) => !matches!(e, Error::Cancelled),
                Some(_) => false,
            };
            if replace {
                first_error = Some(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let records = std::mem::take(&mut *records.lock().unwrap_or_else(PoisonError::into_inner));
    debug!("Fetched {} run records", records.len());
    Ok(records)
}

/// Runs of one workflow, each paired with its jobs.
async fn fetch_workflow<A>(
    api: &A,
    owner: &str,
    repo: &str,
    workflow: &Workflow,
    filter: &RunFilter,
    limit: Option<usize>,
    cancel: &CancellationToken,
) -> Result<Vec<RunRecord>>
where
    A: ActionsApi + ?Sized,
{
    let runs = api
        .list_workflow_runs(owner, repo, workflow.id, filter, limit)
        .await
        .map_err(|e| Error::in_workflow(&workflow.name, e))?;
    debug!("workflow {}: {} runs", workflow.name, runs.len());

    let mut records = Vec::with_capacity(runs.len());
    for run in runs {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let jobs = match api.list_jobs(owner, repo, run.id).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!(
                    "workflow {}: failed to fetch jobs for run {}: {}",
                    workflow.name, run.id, e
                );
                Vec::new()
            }
        };

        records.push(RunRecord {
            workflow: workflow.clone(),
            run,
            jobs,
        });
    }

    Ok(records)
}
