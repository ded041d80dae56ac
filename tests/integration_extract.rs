//! Integration tests for Dst bulletin extraction with fixture files
//!
//! The fixtures under `tests/data` hold three daily records from
//! 2016-07-20 to 2016-07-22; the last record stops after hour 6.

use chrono::{NaiveDate, NaiveDateTime};
use dst_index::{DstConfig, DstError, DstExtractor, EndDatePolicy, TimeSeries, extract};
use std::path::{Path, PathBuf};

const REFERENCE_FILE: &str = "SW_OPER_AUX_DST_2F_20160720T000000_20160722T055959_0001.DBL";

const REFERENCE_VALUES: [i32; 54] = [
    43, 27, 13, -2, -18, -23, -26, -24, -16, -12, -5, 1, 10, 10, 8, 1, -3, -6, -12, -12, -10, -12,
    -13, -14, -13, -8, -10, -8, -5, -5, -8, -9, -7, -10, -10, -8, -7, -6, -11, -6, -4, -6, -8,
    -10, -9, -10, -9, -12, -10, -6, -4, -1, -2, -8,
];

fn data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn dt(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 7, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn assert_malformed_at(file: &str, expected_line: usize) {
    match extract(data_file(file), None, None) {
        Err(DstError::MalformedRecord { line, .. }) => assert_eq!(
            line, expected_line,
            "wrong line reported for {}",
            file
        ),
        other => panic!("Expected MalformedRecord for {}, got {:?}", file, other),
    }
}

/// Unbounded extraction of the reference bulletin
///
/// Purpose: Validate the hour-by-hour timestamps and values across three records
/// Benefit: Pins the end-of-hour stamping and sentinel handling to known data
#[test]
fn test_reference_file_without_dates() {
    let series = extract(data_file(REFERENCE_FILE), None, None).unwrap();

    assert_eq!(series.len(), 54);
    assert_eq!(series.timestamps().len(), series.values().len());
    assert_eq!(series.values(), &REFERENCE_VALUES[..]);

    assert_eq!(series.first(), Some((dt(20, 1), 43)));
    assert_eq!(series.last(), Some((dt(22, 6), -8)));

    let expected: Vec<NaiveDateTime> = (0..54)
        .map(|h| dt(20, 0) + chrono::TimeDelta::hours(h + 1))
        .collect();
    assert_eq!(series.timestamps(), &expected[..]);
}

/// Extraction filtered to 2016-07-20 04:00 ..= 14:00
#[test]
fn test_reference_file_with_dates() {
    let series = extract(
        data_file(REFERENCE_FILE),
        Some(dt(20, 4).into()),
        Some(dt(20, 14).into()),
    )
    .unwrap();

    assert_eq!(series.len(), 11);
    assert_eq!(series.first(), Some((dt(20, 4), -2)));
    assert_eq!(series.last(), Some((dt(20, 14), 10)));
    assert_eq!(
        series.values(),
        &[-2, -18, -23, -26, -24, -16, -12, -5, 1, 10, 10]
    );
}

#[test]
fn test_filtered_output_is_contiguous_subsequence() {
    let full = extract(data_file(REFERENCE_FILE), None, None).unwrap();

    let windows = [
        (dt(20, 4), dt(20, 14)),
        (dt(21, 0), dt(21, 0)),
        (dt(21, 12), dt(22, 23)),
        (dt(23, 0), dt(24, 0)),
    ];

    for (begin, end) in windows {
        let filtered = extract(data_file(REFERENCE_FILE), Some(begin.into()), Some(end.into()))
            .unwrap();

        assert!(filtered.iter().all(|(ts, _)| begin <= ts && ts <= end));

        let pairs: Vec<_> = full.iter().collect();
        let sub: Vec<_> = filtered.iter().collect();
        if sub.is_empty() {
            continue;
        }
        let found = pairs.windows(sub.len()).any(|w| w == &sub[..]);
        assert!(found, "window {} ..= {} is not contiguous", begin, end);
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let config = DstConfig::new().with_begin(dt(21, 5));
    let first = dst_index::extract_with_config(data_file(REFERENCE_FILE), &config).unwrap();
    let second = dst_index::extract_with_config(data_file(REFERENCE_FILE), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_date_only_bounds() {
    let day = NaiveDate::from_ymd_opt(2016, 7, 21).unwrap();

    // Date-only end is promoted to midnight of that day
    let series = extract(data_file(REFERENCE_FILE), Some(day.into()), Some(day.into())).unwrap();
    assert_eq!(series.iter().collect::<Vec<_>>(), vec![(dt(21, 0), -14)]);

    let config = DstConfig::new()
        .with_begin(day)
        .with_end(day)
        .with_end_date_policy(EndDatePolicy::EndOfDay);
    let series = dst_index::extract_with_config(data_file(REFERENCE_FILE), &config).unwrap();
    assert_eq!(series.len(), 24);
    assert_eq!(series.first(), Some((dt(21, 0), -14)));
    assert_eq!(series.last(), Some((dt(21, 23), -9)));
}

#[test]
fn test_leading_sentinel_record_contributes_nothing() {
    let extractor = DstExtractor::new(DstConfig::default());
    let (series, stats) = extractor
        .extract_path(&data_file("dst_no_data.txt"))
        .unwrap();

    assert_eq!(series.len(), 30);
    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.truncated_records, 2);
    assert!(
        !series
            .timestamps()
            .iter()
            .any(|&ts| dt(21, 1) <= ts && ts <= dt(22, 0))
    );
}

#[test]
fn test_line_shorter_than_record_width() {
    assert_malformed_at("dst_wrong_lines.txt", 1);
}

#[test]
fn test_missing_dst_prefix() {
    assert_malformed_at("dst_missing_prefix.txt", 2);
}

#[test]
fn test_wrong_date() {
    assert_malformed_at("dst_wrong_date.txt", 2);
}

#[test]
fn test_wrong_value() {
    assert_malformed_at("dst_wrong_value.txt", 3);
}

#[test]
fn test_non_existent_file() {
    match extract("xxx", None, None) {
        Err(DstError::NotReadable { .. }) => {}
        other => panic!("Expected NotReadable, got {:?}", other),
    }
}

#[test]
fn test_series_lengths_match_for_every_fixture() {
    for file in [REFERENCE_FILE, "dst_no_data.txt"] {
        let series: TimeSeries = extract(data_file(file), None, None).unwrap();
        let (timestamps, values) = series.into_parts();
        assert_eq!(timestamps.len(), values.len());
        assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
    }
}
