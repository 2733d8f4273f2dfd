use crate::report::Report;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Local calendar day, serialized as `YYYY-MM-DD`.
pub type DayKey = NaiveDate;

/// Commits per day; only days with at least one commit are present.
pub type HistoryMap = BTreeMap<DayKey, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: DayKey,
    pub commits: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repositories: Vec<String>,
    pub year: Option<i32>,
    #[serde(flatten)]
    pub report: Report,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repositories: Vec<String>,
    pub year: Option<i32>,
    pub days: Vec<DayCount>,
}
