//! Normalization of raw backend timestamps into epoch seconds.

use tracing::{debug, warn};

/// Digit count of a millisecond epoch timestamp; over-long samples are scaled down to it.
const CANONICAL_DIGITS: usize = 13;

/// How the samples of a [`RawBatch`] encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleHint {
    /// Plain integer seconds (`git log --format=%at`).
    #[default]
    Seconds,
    /// Seconds with a sub-second part and maybe a zone offset (`1704067200.0-3600`).
    Fractional,
    /// Integers longer than milliseconds, e.g. Subversion microseconds.
    OverLong,
}

/// Timestamps exactly as one backend reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBatch {
    pub samples: Vec<String>,
    pub scale: ScaleHint,
}

impl RawBatch {
    pub fn new(samples: Vec<String>, scale: ScaleHint) -> Self {
        Self { samples, scale }
    }

    /// One sample per line of command output; blank lines are kept and dropped later.
    pub fn from_output(output: &str, scale: ScaleHint) -> Self {
        Self::new(output.split('\n').map(str::to_string).collect(), scale)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn normalize(&self) -> Vec<i64> {
        normalize(&self.samples, self.scale)
    }
}

/// Converts raw samples into canonical epoch seconds, preserving order.
///
/// Empty, non-numeric and negative samples are dropped. For
/// [`ScaleHint::OverLong`] the magnitude of the first valid sample sets the
/// scale for the whole batch and samples of a different length are dropped.
pub fn normalize<S: AsRef<str>>(samples: &[S], scale: ScaleHint) -> Vec<i64> {
    let out: Vec<i64> = match scale {
        ScaleHint::Seconds => samples
            .iter()
            .filter_map(|s| parse_seconds(s.as_ref()))
            .collect(),
        ScaleHint::Fractional => samples
            .iter()
            .filter_map(|s| parse_fractional(s.as_ref()))
            .collect(),
        ScaleHint::OverLong => normalize_over_long(samples),
    };

    let dropped = samples.len() - out.len();
    if dropped > 0 {
        debug!(dropped, kept = out.len(), "dropped unusable timestamp samples");
    }
    out
}

fn parse_seconds(sample: &str) -> Option<i64> {
    sample.trim().parse::<i64>().ok().filter(|ts| *ts >= 0)
}

fn parse_fractional(sample: &str) -> Option<i64> {
    let sample = sample.trim();
    let split = sample
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(sample.len());
    let (whole, rest) = sample.split_at(split);
    if whole.is_empty() {
        return None;
    }
    if !rest.is_empty() && !rest.starts_with(['.', '+', '-', ' ']) {
        return None;
    }
    whole.parse::<i64>().ok()
}

fn digits(sample: &str) -> Option<&str> {
    let sample = sample.trim();
    if !sample.is_empty() && sample.bytes().all(|b| b.is_ascii_digit()) {
        Some(sample)
    } else {
        None
    }
}

fn normalize_over_long<S: AsRef<str>>(samples: &[S]) -> Vec<i64> {
    let Some(width) = samples
        .iter()
        .filter_map(|s| digits(s.as_ref()))
        .find(|d| d.parse::<i128>().is_ok())
        .map(str::len)
    else {
        return Vec::new();
    };

    let mut outliers = 0usize;
    let out: Vec<i64> = samples
        .iter()
        .filter_map(|s| digits(s.as_ref()))
        .filter(|d| {
            let same = d.len() == width;
            if !same {
                outliers += 1;
            }
            same
        })
        .filter_map(|d| d.parse::<i128>().ok())
        .filter_map(|raw| to_millis(raw, width))
        .filter_map(|millis| i64::try_from(millis / 1000).ok())
        .collect();

    if outliers > 0 {
        warn!(outliers, width, "dropped timestamps whose magnitude differs from the batch");
    }
    out
}

fn to_millis(raw: i128, width: usize) -> Option<i128> {
    if width >= CANONICAL_DIGITS {
        let scale = 10i128.checked_pow((width - CANONICAL_DIGITS) as u32)?;
        Some(raw / scale)
    } else {
        let scale = 10i128.checked_pow((CANONICAL_DIGITS - width) as u32)?;
        raw.checked_mul(scale)
    }
}
