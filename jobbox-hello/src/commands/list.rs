//! List command handler

use anyhow::Result;
use colored::*;
use jobbox_core::dto::job::JobSummary;
use jobbox_host::JobRegistry;

/// List all registered jobs, grouped by job set
pub fn list_jobs(registry: &JobRegistry, json: bool) -> Result<()> {
    let summaries = registry.summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("{}", "No jobs registered.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} job(s):", summaries.len()).bold());

    let mut current_grouping: Option<&str> = None;
    for summary in &summaries {
        if current_grouping != Some(summary.grouping.as_str()) {
            println!();
            println!("{}", summary.grouping.bold().underline());
            current_grouping = Some(summary.grouping.as_str());
        }
        print_job_summary(summary);
    }

    Ok(())
}

fn print_job_summary(summary: &JobSummary) {
    println!("  {} {}", "▸".cyan(), summary.name.bold());
    println!("    {}", summary.description);
    println!("    Class:  {}", summary.class_path.dimmed());

    for param in &summary.params {
        let required = if param.required {
            "required".red()
        } else {
            "optional".dimmed()
        };
        println!(
            "    Param:  {} ({}, {})",
            param.display_label().cyan(),
            param.kind,
            required
        );
    }
}
