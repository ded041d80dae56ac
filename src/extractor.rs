//! Dst bulletin extraction.
//!
//! Scans a bulletin line by line, decodes each record and keeps the hourly
//! samples falling inside the configured inclusive window. The first bad
//! line aborts the scan and no partial series is returned.

use crate::config::DstConfig;
use crate::error::{DstError, Result};
use crate::models::{DateBound, DateRange, ExtractionStats, TimeSeries};
use crate::record::parse_record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extract hourly Dst values from a bulletin file
///
/// A date-only bound is promoted to midnight of that day, for `end_date`
/// as well. Use [`extract_with_config`] with [`crate::EndDatePolicy::EndOfDay`]
/// to keep the whole end day.
pub fn extract<P: AsRef<Path>>(
    source: P,
    begin_date: Option<DateBound>,
    end_date: Option<DateBound>,
) -> Result<TimeSeries> {
    let config = DstConfig {
        begin: begin_date,
        end: end_date,
        ..DstConfig::default()
    };
    extract_with_config(source, &config)
}

/// Extract hourly Dst values from a bulletin file using `config`
pub fn extract_with_config<P: AsRef<Path>>(source: P, config: &DstConfig) -> Result<TimeSeries> {
    let (series, _stats) = DstExtractor::new(config.clone()).extract_path(source.as_ref())?;
    Ok(series)
}

/// Extract hourly Dst values from any buffered reader; `name` labels diagnostics
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    name: &str,
    config: &DstConfig,
) -> Result<TimeSeries> {
    let (series, _stats) = DstExtractor::new(config.clone()).extract_reader(reader, name)?;
    Ok(series)
}

/// Bulletin extractor bound to one window
#[derive(Debug, Clone)]
pub struct DstExtractor {
    config: DstConfig,
    range: DateRange,
}

impl DstExtractor {
    pub fn new(config: DstConfig) -> Self {
        let range = config.date_range();
        Self { config, range }
    }

    pub fn config(&self) -> &DstConfig {
        &self.config
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    /// Open `path` and extract its samples
    pub fn extract_path(&self, path: &Path) -> Result<(TimeSeries, ExtractionStats)> {
        if path.as_os_str().is_empty() {
            return Err(DstError::invalid_argument("source path must not be empty"));
        }

        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| DstError::not_readable(name.as_str(), e))?;
        debug!("Opened Dst bulletin {}", name);

        self.extract_reader(BufReader::new(file), &name)
    }

    /// Extract samples from `reader`
    pub fn extract_reader<R: BufRead>(
        &self,
        mut reader: R,
        name: &str,
    ) -> Result<(TimeSeries, ExtractionStats)> {
        let start_time = Instant::now();

        if self.range.is_empty() {
            warn!(
                "Empty date range for {}: begin {} is after end {}",
                name, self.range.begin, self.range.end
            );
        }

        let mut series = TimeSeries::new();
        let mut stats = ExtractionStats::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            let bytes_read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| DstError::not_readable(name, e))?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            let record = parse_record(&buffer, line_number)?;
            if record.truncated {
                stats.truncated_records += 1;
            }

            for (timestamp, value) in record.samples() {
                if self.range.contains(timestamp) {
                    series.push(timestamp, value);
                    stats.samples_accepted += 1;
                } else {
                    stats.samples_filtered += 1;
                }
            }
        }

        stats.lines_read = line_number;
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Extracted {} samples from {} ({} lines, {} filtered, {} truncated records)",
            stats.samples_accepted,
            name,
            stats.lines_read,
            stats.samples_filtered,
            stats.truncated_records
        );

        Ok((series, stats))
    }
}
