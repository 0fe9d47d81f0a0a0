//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod cache;
pub mod context;
pub mod runs;
pub mod summary;
pub mod workflows;

pub use args::{GlobalOptions, OutputFormat, RunFilterArgs};
pub use context::CommandContext;

/// actrics - GitHub Actions workflow metrics
#[derive(Parser, Debug)]
#[command(name = "actrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub filters: RunFilterArgs,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "ACTRICS_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Number of workflows fetched concurrently
    #[arg(long, global = true, env = "ACTRICS_THREADS", hide_env = true)]
    pub threads: Option<usize>,

    /// How long API responses stay cached (e.g. 10m, 1h; 0 disables)
    #[arg(long, global = true, env = "ACTRICS_CACHE_TTL", hide_env = true)]
    pub cache_ttl: Option<String>,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "ACTRICS_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Override config file location
    #[arg(long, global = true, env = "ACTRICS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ACTRICS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// API base URL (GitHub Enterprise Server)
    #[arg(long, global = true, env = "ACTRICS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// GitHub API token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize run counts, failure rates and durations per workflow
    Summary {
        /// Repository as OWNER/REPO
        repo: String,

        /// Use the most recent N runs per workflow instead of the time window
        #[arg(long, default_value_t = 0)]
        runs: usize,
    },

    /// List the workflows defined in a repository
    Workflows {
        /// Repository as OWNER/REPO
        repo: String,
    },

    /// List recent runs of the selected workflows
    Runs {
        /// Repository as OWNER/REPO
        repo: String,

        /// Maximum number of runs per workflow
        #[arg(long, default_value_t = runs::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show the cache directory
    Path,

    /// Delete every cached response
    Clear,
}
