use crate::calendar::Calendar;
use crate::clock::Clock;
use crate::heat::{aggregate, History, WindowMode, YearFilter};
use crate::stats::ProductivityStats;
use crate::streak::{self, StreakReport};
use serde::Serialize;

/// Knobs of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub filter: YearFilter,
    pub mode: WindowMode,
    pub report_missing: bool,
}

/// Everything derived from one set of timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub history: History,
    pub calendar: Calendar,
    pub productivity: ProductivityStats,
    pub streaks: StreakReport,
}

impl Report {
    /// Aggregates, lays out and measures `timestamps`.
    ///
    /// Pure: the same timestamps, clock and options always give an equal report.
    pub fn build(timestamps: &[i64], clock: &Clock, options: &Options) -> Self {
        let history = aggregate(timestamps, clock, options.filter, options.mode);
        let calendar = Calendar::build(&history);
        let productivity = ProductivityStats::from_history(&history.days);
        let streaks = streak::analyze(
            &calendar.unified,
            history.today_date,
            options.filter,
            options.report_missing,
        );

        Self {
            history,
            calendar,
            productivity,
            streaks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
