//! Week-aligned calendar grids.
//!
//! A [`WeekGrid`] has one column per weekday (Sunday first) and one row per
//! calendar week. Days before the first day of the window and after the last
//! one are filled with [`CalendarCell::Padding`] so every column has the same
//! length and row `n` of every column belongs to the same week.

use crate::heat::History;
use crate::model::DayKey;
use crate::util::weekday_index;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Grid alignment only, not a day of the window.
    Padding,
    /// A day of the window without commits.
    Inactive { date: DayKey },
    /// A day with at least one commit.
    Active { date: DayKey, commits: u32 },
}

impl CalendarCell {
    pub fn date(&self) -> Option<DayKey> {
        match *self {
            CalendarCell::Padding => None,
            CalendarCell::Inactive { date } | CalendarCell::Active { date, .. } => Some(date),
        }
    }

    /// Commits on the day; `None` for padding.
    pub fn commits(&self) -> Option<u32> {
        match *self {
            CalendarCell::Padding => None,
            CalendarCell::Inactive { .. } => Some(0),
            CalendarCell::Active { commits, .. } => Some(commits),
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, CalendarCell::Padding)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    columns: [Vec<CalendarCell>; 7],
}

impl WeekGrid {
    fn pad_leading(&mut self, weekday: usize) {
        for column in &mut self.columns[..weekday] {
            column.push(CalendarCell::Padding);
        }
    }

    fn pad_trailing(&mut self) {
        let weeks = self.weeks();
        for column in &mut self.columns {
            column.resize(weeks, CalendarCell::Padding);
        }
    }

    fn push(&mut self, weekday: usize, cell: CalendarCell) {
        self.columns[weekday].push(cell);
    }

    /// Number of weeks, i.e. the length of the longest column.
    pub fn weeks(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.weeks() == 0
    }

    /// Column for a weekday index (0 = Sunday).
    pub fn column(&self, weekday: usize) -> &[CalendarCell] {
        &self.columns[weekday]
    }

    pub fn columns(&self) -> &[Vec<CalendarCell>; 7] {
        &self.columns
    }

    pub fn cell(&self, week: usize, weekday: usize) -> Option<&CalendarCell> {
        self.columns.get(weekday).and_then(|c| c.get(week))
    }

    /// Cells week by week, Sunday to Saturday within each week.
    pub fn chronological(&self) -> impl Iterator<Item = &CalendarCell> + '_ {
        (0..self.weeks()).flat_map(move |week| (0..7).filter_map(move |day| self.cell(week, day)))
    }

    /// Number of cells that stand for a real day.
    pub fn day_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|cell| !cell.is_padding())
            .count()
    }

    /// First real day of a week, used for month labels.
    pub fn first_date_in_week(&self, week: usize) -> Option<DayKey> {
        (0..7).find_map(|day| self.cell(week, day).and_then(CalendarCell::date))
    }
}

/// Per-year grids plus one grid spanning all years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub years: BTreeMap<i32, WeekGrid>,
    pub unified: WeekGrid,
}

impl Calendar {
    /// Lays the history's window out day by day.
    ///
    /// An empty history (no window) yields an empty calendar.
    pub fn build(history: &History) -> Self {
        let mut calendar = Calendar::default();
        let Some(window) = history.window else {
            return calendar;
        };

        debug_assert!(
            window.start <= window.end,
            "analysis window ends before it starts: {} > {}",
            window.start,
            window.end
        );

        for (index, date) in window.days().enumerate() {
            let weekday = weekday_index(date);
            let cell = match history.days.get(&date) {
                Some(&commits) => CalendarCell::Active { date, commits },
                None => CalendarCell::Inactive { date },
            };

            let grid = calendar.years.entry(date.year()).or_insert_with(|| {
                let mut grid = WeekGrid::default();
                grid.pad_leading(weekday);
                grid
            });
            grid.push(weekday, cell);

            if index == 0 {
                calendar.unified.pad_leading(weekday);
            }
            calendar.unified.push(weekday, cell);
        }

        for grid in calendar.years.values_mut() {
            grid.pad_trailing();
        }
        calendar.unified.pad_trailing();

        debug!(
            years = calendar.years.len(),
            weeks = calendar.unified.weeks(),
            "built calendar"
        );
        calendar
    }

    pub fn is_empty(&self) -> bool {
        self.unified.is_empty()
    }
}
