use crate::clock::{Clock, Zone};
use crate::model::{DayKey, HistoryMap};
use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::{debug, warn};

/// Optional restriction of the analysis to one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct YearFilter(Option<i32>);

impl YearFilter {
    pub const NONE: YearFilter = YearFilter(None);

    pub fn year(year: i32) -> Self {
        Self(Some(year))
    }

    /// Parses a `YYYY` value; anything else means "no filter".
    pub fn parse(input: Option<&str>) -> Self {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::NONE;
        };
        let valid = raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit());
        match raw.parse::<i32>() {
            Ok(year) if valid => Self(Some(year)),
            _ => {
                warn!(value = raw, "ignoring invalid year filter");
                Self::NONE
            }
        }
    }

    pub fn get(&self) -> Option<i32> {
        self.0
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn matches(&self, date: &NaiveDate) -> bool {
        self.0.map_or(true, |year| date.year() == year)
    }
}

/// Shape of the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Whole calendar years from the oldest to the newest commit.
    #[default]
    CalendarYears,
    /// At least the 365 days up to today, widened to cover every commit.
    Trailing,
}

/// Days covered by the calendar: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    fn calendar_years(oldest: NaiveDate, newest: NaiveDate) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(oldest.year(), 1, 1)?,
            end: NaiveDate::from_ymd_opt(newest.year() + 1, 1, 1)?,
        })
    }

    fn trailing(oldest: NaiveDate, newest: NaiveDate, today: NaiveDate) -> Option<Self> {
        let year_ago = today.checked_sub_days(Days::new(365))?;
        Some(Self {
            start: oldest.min(year_ago),
            end: newest.max(today).succ_opt()?,
        })
    }

    /// Every day of the window in order, stepping by calendar day.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }

    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date < self.end
    }

    /// First second of the window (`00:00:01` on the first day).
    pub fn initial(&self, zone: Zone) -> Option<i64> {
        zone.timestamp_of(self.start, NaiveTime::from_hms_opt(0, 0, 1)?)
    }

    /// Last second of the window (`23:59:59` on the last day).
    pub fn final_ts(&self, zone: Zone) -> Option<i64> {
        zone.timestamp_of(self.end.pred_opt()?, NaiveTime::from_hms_opt(23, 59, 59)?)
    }
}

/// Day-bucketed commit history plus everything the calendar needs to lay it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    pub days: HistoryMap,
    pub oldest: Option<i64>,
    pub newest: Option<i64>,
    pub window: Option<AnalysisWindow>,
    pub today_date: DayKey,
    pub today_time: i64,
    pub years: i32,
    pub filter: YearFilter,
}

impl History {
    /// The "no history" result: nothing to lay out, nothing to count.
    pub fn empty(clock: &Clock, filter: YearFilter) -> Self {
        Self {
            days: HistoryMap::new(),
            oldest: None,
            newest: None,
            window: None,
            today_date: clock.today(),
            today_time: clock.now(),
            years: 0,
            filter,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Folds canonical timestamps into a [`History`].
///
/// With an active year filter, timestamps from other years are left out of
/// the day map and of the oldest/newest range.
pub fn aggregate(timestamps: &[i64], clock: &Clock, filter: YearFilter, mode: WindowMode) -> History {
    let mut days = HistoryMap::new();
    let mut range: Option<(i64, i64)> = None;

    for &ts in timestamps {
        let Some(date) = clock.date_of(ts) else {
            debug!(ts, "timestamp outside the representable date range");
            continue;
        };
        if !filter.matches(&date) {
            continue;
        }

        *days.entry(date).or_insert(0) += 1;
        range = Some(match range {
            Some((oldest, newest)) => (oldest.min(ts), newest.max(ts)),
            None => (ts, ts),
        });
    }

    let Some((oldest, newest)) = range else {
        debug!(total = timestamps.len(), "no commits left to aggregate");
        return History::empty(clock, filter);
    };

    // both dates resolved above, so the fallbacks never fire
    let oldest_date = clock.date_of(oldest).unwrap_or_default();
    let newest_date = clock.date_of(newest).unwrap_or_default();

    let window = match mode {
        WindowMode::CalendarYears => AnalysisWindow::calendar_years(oldest_date, newest_date),
        WindowMode::Trailing => AnalysisWindow::trailing(oldest_date, newest_date, clock.today()),
    };

    debug!(
        days = days.len(),
        oldest = %oldest_date,
        newest = %newest_date,
        "aggregated commit history"
    );

    History {
        days,
        oldest: Some(oldest),
        newest: Some(newest),
        window,
        today_date: clock.today(),
        today_time: clock.now(),
        years: newest_date.year() - oldest_date.year(),
        filter,
    }
}
