//! Longest and current runs of consecutive active days.

use crate::calendar::{CalendarCell, WeekGrid};
use crate::heat::YearFilter;
use crate::model::DayKey;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    /// Consecutive days with at least one commit.
    pub days: u32,
    /// Commits made over those days.
    pub marks: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakReport {
    /// Longest run by days and, independently, by commits.
    pub longest: Streak,
    /// Run that reaches today, or yesterday when nothing was committed today yet.
    pub current: Streak,
    /// Days without commits after the first active day and before today.
    pub missing: Vec<DayKey>,
}

/// Walks `grid` in chronological order and measures its streaks.
///
/// Padding cells neither break nor extend a run. Missing days are only
/// collected when `report_missing` is set, and only for days in `filter`'s year.
pub fn analyze(grid: &WeekGrid, today: DayKey, filter: YearFilter, report_missing: bool) -> StreakReport {
    let mut report = StreakReport::default();
    let mut closed: Vec<Streak> = Vec::new();
    let mut running = Streak::default();
    let mut started = false;
    let mut finished = false;

    for cell in grid.chronological() {
        match *cell {
            CalendarCell::Padding => {}
            CalendarCell::Inactive { date } => {
                let is_today = date == today;
                if is_today {
                    finished = true;
                    report.current = running;
                }
                closed.push(running);
                running = Streak::default();

                if report_missing && started && !finished && filter.matches(&date) {
                    report.missing.push(date);
                }
            }
            CalendarCell::Active { date, commits } => {
                started = true;
                running.days += 1;
                running.marks += u64::from(commits);
                if date == today {
                    finished = true;
                    report.current = running;
                }
            }
        }
    }
    closed.push(running);

    report.longest = Streak {
        days: closed.iter().map(|s| s.days).max().unwrap_or(0),
        marks: closed.iter().map(|s| s.marks).max().unwrap_or(0),
    };
    report
}
