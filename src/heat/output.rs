use super::HeatView;
use crate::calendar::{CalendarCell, WeekGrid};
use crate::clock::Zone;
use crate::config::Repository;
use crate::model::{HeatOutput, SCHEMA_VERSION};
use crate::report::Report;
use crate::stats::ProductivityStats;
use crate::util::{month_name, WEEKDAYS};
use anyhow::Result;
use chrono::{Datelike, Utc};
use console::style;

/// Width of the weekday label column.
const ROW_INDENT: usize = 6;

/// Background colours from the lightest to the busiest shade.
const PALETTE: [u8; 5] = [51, 45, 39, 33, 27];

pub fn output_json(report: &Report, repos: &[Repository]) -> Result<()> {
    let output = HeatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repositories: repos.iter().map(|r| r.path.to_string_lossy().to_string()).collect(),
        year: report.history.filter.get(),
        report: report.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_heatmap(report: &Report, view: &HeatView, zone: Zone) -> Result<()> {
    if report.is_empty() {
        println!("No commits found");
        return Ok(());
    }

    if let Some(year) = report.history.filter.get() {
        println!("Filtering commits made in {}", year);
    }

    if view.unified {
        print_grid(&report.calendar.unified, &report.productivity);
    } else {
        for (year, grid) in &report.calendar.years {
            println!("{:indent$}{}", "", style(year).bold(), indent = ROW_INDENT);
            print_grid(grid, &report.productivity);
            println!();
        }
    }

    if view.details {
        print_details(report, zone);
    }

    if view.missing {
        for date in &report.streaks.missing {
            println!("{:indent$}Missing commit: {}", "", date, indent = ROW_INDENT);
        }
    }

    Ok(())
}

fn print_grid(grid: &WeekGrid, stats: &ProductivityStats) {
    println!("{}", month_header(grid));
    for row in render_rows(grid, stats) {
        println!("{}", row);
    }
}

fn print_details(report: &Report, zone: Zone) {
    let history = &report.history;
    let stats = &report.productivity;
    let streaks = &report.streaks;

    let mut lines = Vec::new();
    if let (Some(oldest), Some(newest)) = (history.oldest, history.newest) {
        lines.push(format!("Oldest: {}", zone.format(oldest)));
        lines.push(format!("Newest: {}", zone.format(newest)));
    }
    if let Some(window) = &history.window {
        if let (Some(initial), Some(last)) = (window.initial(zone), window.final_ts(zone)) {
            lines.push(format!(
                "Window: {} to {}",
                zone.format(initial),
                zone.format(last)
            ));
        }
    }
    lines.push(format!("Most Productive Day: {} commits", stats.most));
    lines.push(format!("Less Productive Day: {} commits", stats.less));
    lines.push(format!("Total Commits: {}", stats.total));
    lines.push(format!(
        "Longest Streak: {} days, {} commits",
        streaks.longest.days, streaks.longest.marks
    ));
    lines.push(format!(
        "Current Streak: {} days, {} commits",
        streaks.current.days, streaks.current.marks
    ));

    for line in lines {
        println!("{:indent$}{}", "", line, indent = ROW_INDENT);
    }
}

/// Month labels aligned above the week columns of `grid`.
pub fn month_header(grid: &WeekGrid) -> String {
    let mut line = vec![' '; ROW_INDENT + grid.weeks() + 3];
    let mut last_month = None;
    let mut next_free = ROW_INDENT;

    for week in 0..grid.weeks() {
        let Some(date) = grid.first_date_in_week(week) else {
            continue;
        };
        if last_month == Some(date.month()) {
            continue;
        }
        last_month = Some(date.month());

        let col = ROW_INDENT + week;
        if col < next_free {
            continue;
        }
        for (offset, ch) in month_name(date).chars().enumerate() {
            line[col + offset] = ch;
        }
        next_free = col + 4;
    }

    line.into_iter().collect::<String>().trim_end().to_string()
}

/// One line per weekday: label then one character per week.
pub fn render_rows(grid: &WeekGrid, stats: &ProductivityStats) -> Vec<String> {
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(day, name)| {
            let mut row = format!("{:<indent$}", name, indent = ROW_INDENT);
            for cell in grid.column(day) {
                row.push_str(&render_cell(cell, stats));
            }
            row
        })
        .collect()
}

fn render_cell(cell: &CalendarCell, stats: &ProductivityStats) -> String {
    let colors = console::colors_enabled();
    match *cell {
        CalendarCell::Padding => " ".to_string(),
        CalendarCell::Inactive { .. } => style("░").black().bright().to_string(),
        CalendarCell::Active { .. } if !colors => "█".to_string(),
        CalendarCell::Active { commits, .. } => {
            let level = stats.intensity(commits).max(1) as usize;
            style(" ").on_color256(PALETTE[level - 1]).to_string()
        }
    }
}
