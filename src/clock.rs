//! Time zone and "now" handling.
//!
//! Every conversion between epoch seconds and calendar days goes through a
//! [`Clock`], so the aggregation code never reads the system time or the
//! local zone on its own.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Zone used to turn timestamps into calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    /// Calendar date of `ts` in this zone, `None` when out of chrono's range.
    pub fn date_of(&self, ts: i64) -> Option<NaiveDate> {
        match self {
            Zone::Local => Local.timestamp_opt(ts, 0).earliest().map(|dt| dt.date_naive()),
            Zone::Utc => DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive()),
            Zone::Fixed(offset) => offset.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive()),
        }
    }

    /// Epoch seconds of the wall-clock `date` + `time` in this zone.
    ///
    /// For local times skipped or repeated by a DST switch the earliest
    /// matching instant is used; a time that does not exist at all yields `None`.
    pub fn timestamp_of(&self, date: NaiveDate, time: NaiveTime) -> Option<i64> {
        let naive = date.and_time(time);
        match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp()),
            Zone::Utc => Some(Utc.from_utc_datetime(&naive).timestamp()),
            Zone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.timestamp()),
        }
    }

    /// Human readable rendering of `ts`, e.g. `Mon Jan 01 2024 12:00:00 +0000`.
    pub fn format(&self, ts: i64) -> String {
        const FORMAT: &str = "%a %b %d %Y %H:%M:%S %z";
        let rendered = match self {
            Zone::Local => Local
                .timestamp_opt(ts, 0)
                .earliest()
                .map(|dt| dt.format(FORMAT).to_string()),
            Zone::Utc => DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format(FORMAT).to_string()),
            Zone::Fixed(offset) => offset
                .timestamp_opt(ts, 0)
                .single()
                .map(|dt| dt.format(FORMAT).to_string()),
        };
        rendered.unwrap_or_else(|| ts.to_string())
    }
}

/// Immutable snapshot of "now" in a given zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    zone: Zone,
    now: i64,
    today: NaiveDate,
}

impl Clock {
    /// Clock pinned to the current system time.
    pub fn system(zone: Zone) -> Self {
        Self::at(zone, Utc::now().timestamp())
    }

    /// Clock pinned to `now` (epoch seconds).
    pub fn at(zone: Zone, now: i64) -> Self {
        let today = zone
            .date_of(now)
            .or_else(|| DateTime::<Utc>::from_timestamp(now, 0).map(|dt| dt.date_naive()))
            .unwrap_or_default();
        Self { zone, now, today }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn date_of(&self, ts: i64) -> Option<NaiveDate> {
        self.zone.date_of(ts)
    }
}
