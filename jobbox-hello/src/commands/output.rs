//! Terminal rendering of runs and log lines

use colored::*;
use jobbox_host::{JobRun, JobStatus, LogEntry, LogLevel};

/// Print a run summary followed by its log lines at or above `echo_level`
pub fn print_run(run: &JobRun, echo_level: LogLevel) {
    println!("{}", "Run Details:".bold());
    println!("  ID:        {}", run.id.to_string().cyan());
    println!("  Job:       {}", run.job_name);
    println!("  Status:    {}", colorize_status(&run.status));
    if let Some(duration) = run.duration() {
        println!("  Duration:  {}ms", duration.num_milliseconds());
    }

    if !run.parameters.is_empty() {
        println!("\n{}", "Parameters:".bold());
        for (key, value) in &run.parameters {
            println!("  {} = {}", key.cyan(), value);
        }
    }

    let shown: Vec<&LogEntry> = run
        .logs
        .iter()
        .filter(|entry| entry.level >= echo_level)
        .collect();

    println!("\n{}", "Logs:".bold());
    if shown.is_empty() {
        println!("{}", "  No log lines.".yellow());
    } else {
        println!("{}", "─".repeat(80).dimmed());
        for entry in shown {
            print_log_entry(entry);
        }
        println!("{}", "─".repeat(80).dimmed());
    }

    if let Some(error) = run.result.as_ref().and_then(|r| r.error_message.as_ref()) {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// Print a log entry
fn print_log_entry(log: &LogEntry) {
    let level_str = log.level.as_str().to_uppercase();
    let level_colored = match log.level {
        LogLevel::Debug => level_str.dimmed(),
        LogLevel::Info => level_str.cyan(),
        LogLevel::Warning => level_str.yellow(),
        LogLevel::Error => level_str.red(),
        LogLevel::Critical => level_str.red().bold(),
    };

    println!(
        "{} [{}] {}",
        log.timestamp.format("%H:%M:%S").to_string().dimmed(),
        level_colored,
        log.message
    );
}

/// Colorize run status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::TimedOut => status_str.red(),
    }
}
