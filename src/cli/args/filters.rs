//! Run selection arguments shared by the reporting commands

use clap::Args;

use crate::client::RunFilter;
use crate::fetch::window::DEFAULT_LOOKBACK;

/// Which workflows and runs a command looks at.
///
/// Every flag here is global so it can be given before or after the
/// subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunFilterArgs {
    /// Start of the reporting window (RFC3339, e.g. 2025-01-01T00:00:00Z)
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// End of the reporting window (RFC3339, defaults to now)
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Lookback used when --from is not given (e.g. 12h, 7d, 2w, 1mo)
    #[arg(long, global = true, default_value = DEFAULT_LOOKBACK)]
    pub last: String,

    /// Workflow name, file or ID to include (repeatable, comma-separated)
    #[arg(long = "workflow", short = 'w', global = true, value_delimiter = ',')]
    pub workflows: Vec<String>,

    /// Only runs on this branch
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Only runs with this status or conclusion (e.g. success, failure)
    #[arg(long, global = true)]
    pub status: Option<String>,
}

impl RunFilterArgs {
    /// Branch and status filters; the created range is added by the caller.
    pub fn run_filter(&self) -> RunFilter {
        let mut filter = RunFilter::new();
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.trim().is_empty()) {
            filter = filter.branch(branch.trim());
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.trim().is_empty()) {
            filter = filter.status(status.trim());
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_filter_from_args() {
        let args = RunFilterArgs {
            branch: Some("main".to_string()),
            status: Some(" failure ".to_string()),
            ..Default::default()
        };

        let filter = args.run_filter();
        assert_eq!(filter.branch.as_deref(), Some("main"));
        assert_eq!(filter.status.as_deref(), Some("failure"));
        assert!(filter.created.is_none());
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let args = RunFilterArgs {
            branch: Some("  ".to_string()),
            status: Some(String::new()),
            ..Default::default()
        };

        let filter = args.run_filter();
        assert!(filter.branch.is_none());
        assert!(filter.status.is_none());
    }
}
