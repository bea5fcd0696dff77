//! `kbindex` command-line entry point.
//!
//! # Responsibility
//! - Assemble configuration from flags and environment, once.
//! - Initialize logging, run one regeneration, print a short report.

use clap::Parser;
use kbindex_core::config::{DEFAULT_ARCHIVES_DIR, DEFAULT_RECENT_LIMIT};
use kbindex_core::{
    default_log_level, init_logging, DisabledSource, GithubSource, IndexService, IndexerConfig,
    RemoteConfig, RunReport,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Regenerate knowledge-base index pages and mirror original documents.
#[derive(Debug, Parser)]
#[command(name = "kbindex", version)]
struct Cli {
    /// Knowledge-base root holding README.md and the archive folder.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Archive folder name under the root.
    #[arg(long, default_value = DEFAULT_ARCHIVES_DIR)]
    archives: String,

    /// Number of entries in the dashboard's recent section.
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    recent: usize,

    /// Skip the private repository even when PRIVATE_REPO and GH_PAT are set.
    #[arg(long)]
    offline: bool,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files, in addition to stderr.
    #[arg(long, env = "KBINDEX_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kbindex: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = match cli.log_dir {
        Some(dir) if dir.is_relative() => Some(std::env::current_dir()?.join(dir)),
        other => other,
    };
    init_logging(level, log_dir.as_deref())?;

    let config = IndexerConfig {
        root: cli.root,
        archives_dir_name: cli.archives,
        recent_limit: cli.recent,
    };
    let remote = if cli.offline {
        None
    } else {
        RemoteConfig::from_env()
    };

    let report = match remote {
        Some(remote) => {
            info!(
                "event=remote_config module=cli status=ok repo={} branch={}",
                remote.repository, remote.branch
            );
            let source = GithubSource::new(remote)?;
            IndexService::new(config, &source).run()?
        }
        None => {
            info!("event=remote_config module=cli status=disabled mode=local_only");
            IndexService::new(config, &DisabledSource).run()?
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!(
        "Organized raw files: moved={} fetched={} linked={} failed_fetches={}",
        report.organize.moved,
        report.organize.fetched,
        report.organize.linked,
        report.organize.fetch_failures
    );
    println!("Found {} summaries.", report.summaries);
    println!("Updated {} topics.", report.topics.len());
    println!("Updated {} types.", report.types.len());
    println!("Updated main README.");
}
