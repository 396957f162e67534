//! Content dates
//!
//! Front-matter dates are free text. They are parsed into a calendar value at
//! load time so listings order by the calendar instead of by string
//! comparison, while the text as written is kept for display.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A date as written in front-matter, with its parsed calendar value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ContentDate {
    raw: String,
    value: Option<NaiveDateTime>,
}

impl ContentDate {
    /// Parse a front-matter date. Text that is not a recognized date is kept
    /// verbatim and the value is left undated.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_date_string(&raw);
        Self { raw, value }
    }

    /// The date exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed calendar value, if the text was a recognized date
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// True when text was given but could not be read as a date
    pub fn is_unrecognized(&self) -> bool {
        self.value.is_none() && !self.is_empty()
    }

    pub fn year(&self) -> Option<i32> {
        self.value.map(|dt| dt.year())
    }

    /// Format the calendar value with a chrono format string, falling back
    /// to the raw text for undated values.
    pub fn format(&self, fmt: &str) -> String {
        match self.value {
            Some(dt) => dt.format(fmt).to_string(),
            None => self.raw.clone(),
        }
    }
}

/// Undated values order before every dated value, so they land last in a
/// newest-first listing.
impl Ord for ContentDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ContentDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ContentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ContentDate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for ContentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    // Month precision, e.g. "2023-06"
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }

    // Year precision, e.g. "2019"
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d") {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
