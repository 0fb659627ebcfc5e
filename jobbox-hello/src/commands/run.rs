//! Run command handler
//!
//! Resolves a job in the registry, runs it through the execution service and
//! prints the outcome.

use anyhow::{Result, anyhow};
use colored::*;
use jobbox_host::{
    Config, ExecutionError, ExecutionService, JobRegistry, JobStatus, StandardExecutionService,
};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use super::output::print_run;

/// Parse a `key=value` parameter argument
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{}': expected key=value", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{}': empty key", s));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Run a job and print the resulting run record
///
/// Returns an error when the parameters are rejected or the run does not
/// succeed, so the process exits non-zero.
pub async fn run_job(
    registry: &JobRegistry,
    config: &Config,
    job_key: &str,
    params: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let job = registry
        .get(job_key)
        .ok_or_else(|| anyhow!("Job '{}' not found; see `jobbox list`", job_key))?;

    let parameters: HashMap<String, JsonValue> = params
        .into_iter()
        .map(|(key, value)| (key, JsonValue::String(value)))
        .collect();

    let service = StandardExecutionService::from_config(config);
    let run = match service.execute(job, parameters).await {
        Ok(run) => run,
        Err(ExecutionError::InvalidParameters { job, errors }) => {
            eprintln!("{}", format!("Job '{}' was not run:", job).red().bold());
            for error in &errors {
                eprintln!("  {} {}", "✗".red(), error);
            }
            return Err(anyhow!("{} invalid parameter(s)", errors.len()));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        print_run(&run, config.echo_level);
    }

    match run.status {
        JobStatus::Succeeded => Ok(()),
        status => Err(anyhow!("Run {} ended as {}", run.id, status)),
    }
}
