//! Core data structures for Dst extraction.
//!
//! Defines the extracted time series, the date bounds accepted from callers,
//! the resolved inclusive date range, and extraction statistics.

use crate::error::{DstError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hourly Dst samples in file order
///
/// `timestamps` and `values` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<i32>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, timestamp: NaiveDateTime, value: i32) {
        self.timestamps.push(timestamp);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, i32)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn first(&self) -> Option<(NaiveDateTime, i32)> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<(NaiveDateTime, i32)> {
        Some((*self.timestamps.last()?, *self.values.last()?))
    }

    /// Split into the timestamp and value sequences
    pub fn into_parts(self) -> (Vec<NaiveDateTime>, Vec<i32>) {
        (self.timestamps, self.values)
    }
}

/// How a date-only end bound is promoted to an instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndDatePolicy {
    /// Midnight at the start of the end date (excludes the rest of that day)
    #[default]
    StartOfDay,
    /// Last microsecond of the end date
    EndOfDay,
}

/// A caller-supplied bound: a calendar date or a full date-time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateBound {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl DateBound {
    /// Instant used when this bound opens a range
    pub fn as_begin(&self) -> NaiveDateTime {
        match self {
            DateBound::Date(date) => date.and_time(NaiveTime::MIN),
            DateBound::DateTime(dt) => *dt,
        }
    }

    /// Instant used when this bound closes a range
    pub fn as_end(&self, policy: EndDatePolicy) -> NaiveDateTime {
        match (self, policy) {
            (DateBound::DateTime(dt), _) => *dt,
            (DateBound::Date(date), EndDatePolicy::StartOfDay) => date.and_time(NaiveTime::MIN),
            (DateBound::Date(date), EndDatePolicy::EndOfDay) => date
                .succ_opt()
                .map(|next| next.and_time(NaiveTime::MIN) - TimeDelta::microseconds(1))
                .unwrap_or(NaiveDateTime::MAX),
        }
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        DateBound::Date(date)
    }
}

impl From<NaiveDateTime> for DateBound {
    fn from(dt: NaiveDateTime) -> Self {
        DateBound::DateTime(dt)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl FromStr for DateBound {
    type Err = DstError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(DateBound::DateTime(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateBound::Date)
            .map_err(|e| {
                DstError::invalid_argument(format!(
                    "Invalid date bound '{}' (expected 'YYYY-MM-DD' or 'YYYY-MM-DD HH:MM[:SS]'): {}",
                    s, e
                ))
            })
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateBound::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

/// Resolved inclusive window `[begin, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Resolve optional bounds; missing ends are unbounded
    pub fn new(begin: Option<DateBound>, end: Option<DateBound>, policy: EndDatePolicy) -> Self {
        Self {
            begin: begin.map_or(NaiveDateTime::MIN, |b| b.as_begin()),
            end: end.map_or(NaiveDateTime::MAX, |e| e.as_end(policy)),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            begin: NaiveDateTime::MIN,
            end: NaiveDateTime::MAX,
        }
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.begin <= timestamp && timestamp <= self.end
    }

    /// True when no instant can satisfy the window
    pub fn is_empty(&self) -> bool {
        self.begin > self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Extraction statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines_read: usize,
    pub samples_accepted: usize,
    pub samples_filtered: usize,
    /// Records whose hourly values stopped at the missing-data marker
    pub truncated_records: usize,
    pub processing_time_ms: u128,
}
