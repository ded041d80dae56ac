//! Fixed-width Dst record decoding.
//!
//! Decodes one bulletin line into a [`DstRecord`] using the byte ranges in
//! [`crate::constants::layout`]. Decoding runs in three stages, each failing
//! with [`DstError::MalformedRecord`] for the given line number:
//!
//! 1. structural check of every field (width, literals, character classes),
//! 2. calendar date from `y1 ++ y2`, month and day,
//! 3. hourly values, stopping at the missing-data marker.

use crate::constants::{
    HOURS_PER_RECORD, MIN_RECORD_WIDTH, MIN_YEAR, MISSING_VALUE, RECORD_MARKER, layout,
};
use crate::error::{DstError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::ops::Range;
use tracing::trace;

/// One decoded bulletin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstRecord {
    pub date: NaiveDate,
    /// Version digit, `None` when the column holds a space
    pub version: Option<u8>,
    /// Hourly values preceding the missing-data marker (at most 24)
    pub hourly: Vec<i32>,
    /// Set when the missing-data marker cut the hourly values short
    pub truncated: bool,
}

impl DstRecord {
    pub fn midnight(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// End-of-hour samples: value `i` is stamped `midnight + (i + 1) hours`
    pub fn samples(&self) -> impl Iterator<Item = (NaiveDateTime, i32)> + '_ {
        let midnight = self.midnight();
        self.hourly
            .iter()
            .enumerate()
            .map(move |(i, &value)| (midnight + TimeDelta::hours(i as i64 + 1), value))
    }
}

/// Decode a single record line (1-based `line_number` for diagnostics)
pub fn parse_record(line: &[u8], line_number: usize) -> Result<DstRecord> {
    let line = strip_line_ending(line);

    check_structure(line, line_number)?;
    let date = decode_date(line, line_number)?;
    let version = match line[layout::VERSION] {
        b' ' => None,
        digit => Some(digit - b'0'),
    };
    let (hourly, truncated) = decode_hourly(line, line_number)?;

    trace!(
        "Line {}: {} with {} hourly values{}",
        line_number,
        date,
        hourly.len(),
        if truncated { " (truncated)" } else { "" }
    );

    Ok(DstRecord {
        date,
        version,
        hourly,
        truncated,
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_letter_or_space(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b' '
}

fn is_digit_or_space(b: u8) -> bool {
    b.is_ascii_digit() || b == b' '
}

fn is_signed_digit_or_space(b: u8) -> bool {
    b.is_ascii_digit() || b == b' ' || b == b'-'
}

/// Validate every field against its character class
fn check_structure(line: &[u8], line_number: usize) -> Result<()> {
    if line.len() < MIN_RECORD_WIDTH {
        return Err(DstError::malformed(
            line_number,
            format!(
                "record is {} bytes long, expected at least {}",
                line.len(),
                MIN_RECORD_WIDTH
            ),
        ));
    }

    if &line[layout::MARKER] != RECORD_MARKER {
        return Err(DstError::malformed(line_number, "missing 'DST' marker"));
    }

    expect_class(line, layout::YEAR_LOW, "year", is_digit, line_number)?;
    expect_class(line, layout::MONTH, "month", is_digit, line_number)?;
    expect_literal(line, layout::STAR, b'*', line_number)?;
    expect_class(line, layout::DAY, "day", is_digit, line_number)?;
    expect_class(line, layout::FILLER, "filler", is_letter_or_space, line_number)?;
    expect_literal(line, layout::X_MARK, b'X', line_number)?;
    expect_class(
        line,
        layout::VERSION..layout::VERSION + 1,
        "version",
        is_digit_or_space,
        line_number,
    )?;
    expect_class(line, layout::YEAR_HIGH, "century", is_digit, line_number)?;
    expect_class(line, layout::BASE, "base", is_digit_or_space, line_number)?;
    expect_class(
        line,
        layout::HOURLY,
        "hourly values",
        is_signed_digit_or_space,
        line_number,
    )?;
    expect_class(line, layout::MEAN, "mean", is_signed_digit_or_space, line_number)?;

    Ok(())
}

fn expect_literal(line: &[u8], index: usize, literal: u8, line_number: usize) -> Result<()> {
    if line[index] == literal {
        Ok(())
    } else {
        Err(DstError::malformed(
            line_number,
            format!(
                "expected '{}' at column {}, found '{}'",
                literal as char,
                index + 1,
                line[index].escape_ascii()
            ),
        ))
    }
}

fn expect_class(
    line: &[u8],
    range: Range<usize>,
    field_name: &str,
    allowed: fn(u8) -> bool,
    line_number: usize,
) -> Result<()> {
    match line[range.clone()].iter().position(|&b| !allowed(b)) {
        None => Ok(()),
        Some(offset) => Err(DstError::malformed(
            line_number,
            format!(
                "unexpected character '{}' in {} field at column {}",
                line[range.start + offset].escape_ascii(),
                field_name,
                range.start + offset + 1
            ),
        )),
    }
}

/// Text of a structurally checked field
fn field_str(line: &[u8], range: Range<usize>, line_number: usize) -> Result<&str> {
    std::str::from_utf8(&line[range])
        .map_err(|_| DstError::malformed(line_number, "field is not valid ASCII"))
}

fn parse_number<T: std::str::FromStr>(text: &str, field_name: &str, line_number: usize) -> Result<T> {
    text.trim_matches(' ').parse::<T>().map_err(|_| {
        DstError::malformed(
            line_number,
            format!("invalid {} value '{}'", field_name, text),
        )
    })
}

/// Calendar date from year `y1 ++ y2`, month and day
fn decode_date(line: &[u8], line_number: usize) -> Result<NaiveDate> {
    let year_text = format!(
        "{}{}",
        field_str(line, layout::YEAR_HIGH, line_number)?,
        field_str(line, layout::YEAR_LOW, line_number)?
    );
    let year: i32 = parse_number(&year_text, "year", line_number)?;
    let month: u32 = parse_number(field_str(line, layout::MONTH, line_number)?, "month", line_number)?;
    let day: u32 = parse_number(field_str(line, layout::DAY, line_number)?, "day", line_number)?;

    let date = if year >= MIN_YEAR {
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        None
    };

    date.ok_or_else(|| {
        DstError::malformed(
            line_number,
            format!("invalid calendar date {}-{:02}-{:02}", year_text, month, day),
        )
    })
}

/// Hourly values up to the missing-data marker; fields after it are not decoded
fn decode_hourly(line: &[u8], line_number: usize) -> Result<(Vec<i32>, bool)> {
    let mut values = Vec::with_capacity(HOURS_PER_RECORD);
    let mut truncated = false;

    for index in 0..HOURS_PER_RECORD {
        let raw = field_str(line, layout::hourly_field(index), line_number)?;
        let value: i32 = parse_number(raw, "hourly", line_number)?;

        if value == MISSING_VALUE {
            truncated = true;
            break;
        }

        values.push(value);
    }

    Ok((values, truncated))
}
