//! actrics - GitHub Actions workflow metrics from the command line

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod fetch;
mod metrics;
mod models;
mod output;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);
    init_logging(opts.debug);

    match cli.command {
        Commands::Summary { ref repo, runs } => {
            cli::summary::run(&opts, &cli.filters, repo, runs).await
        }
        Commands::Workflows { ref repo } => cli::workflows::run(&opts, repo).await,
        Commands::Runs { ref repo, limit } => {
            cli::runs::run(&opts, &cli.filters, repo, limit).await
        }
        Commands::Cache(ref cache_cmd) => match cache_cmd {
            CacheCommands::Path => cli::cache::path(),
            CacheCommands::Clear => cli::cache::clear(opts.format.unwrap_or_default()),
        },
    }
}

/// Warnings by default, debug output with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
