use crate::cli::CommonArgs;
use crate::config::{resolve_repositories, Repository};
use crate::heat::build_report;
use crate::model::{DayCount, ExportOutput, SCHEMA_VERSION};
use crate::report::Report;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repos = resolve_repositories(common.repo.as_deref(), common.config.as_deref())
        .context("Failed to resolve repositories")?;

    let report = build_report(&common, &repos, false);
    let days = day_counts(&report);

    if json {
        output_json(days, &repos, &report)?;
    } else if ndjson {
        output_ndjson(&days)?;
    } else {
        output_summary(&days, &report);
    }

    Ok(())
}

/// Active days in date order.
pub fn day_counts(report: &Report) -> Vec<DayCount> {
    report
        .history
        .days
        .iter()
        .map(|(&date, &commits)| DayCount { date, commits })
        .collect()
}

fn output_json(days: Vec<DayCount>, repos: &[Repository], report: &Report) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repositories: repos.iter().map(|r| r.path.to_string_lossy().to_string()).collect(),
        year: report.history.filter.get(),
        days,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(days: &[DayCount]) -> anyhow::Result<()> {
    for day in days {
        println!("{}", serde_json::to_string(day)?);
    }
    Ok(())
}

fn output_summary(days: &[DayCount], report: &Report) {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        println!("No commits found");
        return;
    };

    println!("{}", style("Commit Export Summary").bold());
    println!("{}", "─".repeat(40));
    println!("Active days: {}", days.len());
    println!("Total commits: {}", report.productivity.total);
    println!("First active day: {}", first.date);
    println!("Last active day: {}", last.date);
}
