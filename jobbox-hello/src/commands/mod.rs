//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod list;
mod output;
mod run;

use anyhow::Result;
use clap::Subcommand;
use jobbox_host::{Config, JobRegistry};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List registered jobs
    List {
        /// Print job summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a job
    Run {
        /// Job name or class path
        job: String,

        /// Job parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = run::parse_param)]
        params: Vec<(String, String)>,

        /// Print the run record as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The host configuration
/// * `registry` - Registry holding the job set
pub async fn handle_command(
    command: Commands,
    config: &Config,
    registry: &JobRegistry,
) -> Result<()> {
    match command {
        Commands::List { json } => list::list_jobs(registry, json),
        Commands::Run { job, params, json } => {
            run::run_job(registry, config, &job, params, json).await
        }
    }
}
