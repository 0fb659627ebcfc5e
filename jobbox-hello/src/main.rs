//! Jobbox CLI
//!
//! Lists the Hello World jobs and runs them through the local host.
//!
//! Architecture:
//! - Configuration: load host settings from environment, overridable by flags
//! - Registry: the Hello World job set, registered once at startup
//! - Commands: list jobs, run a job and print its log lines

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use jobbox_host::{Config, JobRegistry};
use std::future::Future;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
///
/// Job lines are already printed by the run command, so the logger's tracing
/// mirror is off.
const DEFAULT_LOG_FILTER: &str = "jobbox=info,jobbox_host=info,jobbox_host::logger=off";

#[derive(Parser)]
#[command(name = "jobbox")]
#[command(about = "Run Hello World jobs through the Jobbox host", long_about = None)]
struct Cli {
    /// Job timeout in seconds, overriding the configured value
    #[arg(long, global = true, env = "JOBBOX_JOB_TIMEOUT")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Host logs go to stderr so that command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.timeout)?;
    info!(
        "Loaded configuration: host_id={}, job_timeout={:?}",
        config.host_id, config.job_timeout
    );

    let mut registry = JobRegistry::new();
    jobbox_hello::register_jobs(&mut registry).context("Failed to register jobs")?;
    info!("Registered {} job(s)", registry.len());

    block_on_detached(handle_command(cli.command, &config, &registry))?
}

/// Loads configuration from environment variables
///
/// An invalid variable is an error; `timeout` (from `--timeout`) wins over
/// the environment.
fn load_config(timeout: Option<u64>) -> Result<Config> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(secs) = timeout {
        config = config.with_job_timeout(Duration::from_secs(secs));
    }
    config.validate()?;
    Ok(config)
}

/// Runs `future` to completion on a fresh runtime
///
/// The runtime is shut down without waiting on blocking workers, so a
/// timed-out job left running does not keep the process alive.
fn block_on_detached<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}
