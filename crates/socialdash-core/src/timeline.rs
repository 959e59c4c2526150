//! Year-month bucketing of heterogeneous publish dates.
//!
//! Scrapers report dates as RFC 3339 strings, bare dates, US-locale strings,
//! `YYYYMMDD` upload dates, and epoch numbers in seconds or milliseconds.
//! Anything unparseable is dropped from the timeline rather than failing it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::record::MetricRecord;

/// Epoch values below this are seconds; at or above it, milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e12;

/// chrono's `%Y` reads as few as one digit, so `"06/15/24"` would otherwise
/// parse as year 24. Text dates earlier than this are rejected.
const MIN_TEXT_YEAR: i32 = 1000;

/// Two-digit years below this land in the 2000s, the rest in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

/// Fields that carry a publish date, in lookup order.
const DATE_PATHS: &[&str] = &[
    "publishedAt",
    "published_date",
    "publishDate",
    "date",
    "snippet.publishedAt",
    "timestamp",
    "created_at",
    "createdAt",
    "taken_at",
    "upload_date",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date formats tried with trailing text allowed, so `"June 15, 2024 - 10:30
/// AM"` and `"06/15/2024 14:00"` still bucket by their date part.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a, %d %b %Y",
];

/// Month-and-year strings such as `"June 2024"`, bucketed on the 1st.
const MONTH_YEAR_FORMATS: &[&str] = &["%d %B %Y", "%d %b %Y"];

/// Canonical `"YYYY-MM"` bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateBucket(String);

impl DateBucket {
    fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m").to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl PartialEq<&str> for DateBucket {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Number of records published in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub bucket: DateBucket,
    pub count: usize,
}

/// Buckets a date value, or `None` when it cannot be parsed.
#[must_use]
pub fn bucket(value: &Value) -> Option<DateBucket> {
    parse_date_value(value).map(DateBucket::from_date)
}

/// Formats a date value as `YYYY-MM-DD` for exports.
#[must_use]
pub fn format_date(value: &Value) -> Option<String> {
    parse_date_value(value).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Buckets a date string, or `None` when it cannot be parsed.
#[must_use]
pub fn bucket_str(raw: &str) -> Option<DateBucket> {
    parse_date_str(raw).map(DateBucket::from_date)
}

/// The first date-bearing field of `record`.
#[must_use]
pub fn date_of(record: &MetricRecord) -> Option<&Value> {
    record.first_present(DATE_PATHS).map(|(_, value)| value)
}

/// Counts records per month, ascending by bucket.
///
/// Records without a parseable date are skipped.
#[must_use]
pub fn timeline(records: &[MetricRecord]) -> Vec<TimelinePoint> {
    let mut counts: BTreeMap<DateBucket, usize> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        match date_of(record).and_then(bucket) {
            Some(b) => *counts.entry(b).or_default() += 1,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "records without a parseable date left out of timeline");
    }

    counts
        .into_iter()
        .map(|(bucket, count)| TimelinePoint { bucket, count })
        .collect()
}

fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch(raw: f64) -> Option<NaiveDate> {
    if !raw.is_finite() {
        return None;
    }
    let millis = if raw.abs() < EPOCH_MILLIS_THRESHOLD {
        raw * 1000.0
    } else {
        raw
    };
    // Out-of-range floats saturate; chrono rejects the result below.
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.len() {
            8 => NaiveDate::parse_from_str(s, "%Y%m%d").ok(),
            n if n >= 9 => s.parse::<f64>().ok().and_then(from_epoch),
            _ => None,
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .filter(|dt| dt.year() >= MIN_TEXT_YEAR)
    {
        return Some(dt.date());
    }
    if let Some(date) = DATE_FORMATS.iter().find_map(|fmt| parse_date_prefix(s, fmt)) {
        return Some(date);
    }
    if let Some(date) = parse_short_year(s) {
        return Some(date);
    }
    let first_of_month = format!("1 {s}");
    if let Some(date) = MONTH_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&first_of_month, fmt).ok())
        .and_then(full_year)
    {
        return Some(date);
    }

    // Year-month only, e.g. "2024-06".
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .ok()
        .and_then(full_year)
}

fn full_year(date: NaiveDate) -> Option<NaiveDate> {
    (date.year() >= MIN_TEXT_YEAR).then_some(date)
}

/// Parses a date at the start of `s`, tolerating a time or ` - time` suffix.
fn parse_date_prefix(s: &str, fmt: &str) -> Option<NaiveDate> {
    let (date, rest) = NaiveDate::parse_and_remainder(s, fmt).ok()?;
    let rest_ok = rest.is_empty() || rest.starts_with([' ', ',', 'T']);
    if rest_ok {
        full_year(date)
    } else {
        None
    }
}

/// Parses US `M/D/YY` dates, e.g. `"6/5/24"` or `"06/15/24 10:00"`.
fn parse_short_year(s: &str) -> Option<NaiveDate> {
    let date_part = s.split([' ', ',']).next()?;
    let parts: Vec<&str> = date_part.split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return None;
    };
    let is_short_number =
        |p: &str| (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 2 || ![*month, *day, *year].into_iter().all(is_short_number) {
        return None;
    }

    let yy: i32 = year.parse().ok()?;
    let year = if yy < TWO_DIGIT_YEAR_PIVOT { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
