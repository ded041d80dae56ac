//! Dst Index Library
//!
//! A Rust library for reading hourly geomagnetic Dst index values from
//! fixed-width bulletin files (one `DST...` record per day, 24 hourly
//! readings per record).
//!
//! This library provides tools for:
//! - Decoding bulletin records with strict field-by-field validation
//! - Extracting `(timestamp, value)` series with an inclusive date window
//! - Stopping at the `9999` missing-data marker within a record
//! - Reporting the first malformed line by number
//!
//! ## Usage
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use dst_index::extract;
//!
//! # fn example() -> dst_index::Result<()> {
//! let begin = NaiveDate::from_ymd_opt(2016, 7, 20).unwrap();
//! let series = extract("dst.DBL", Some(begin.into()), None)?;
//!
//! for (timestamp, value) in series.iter() {
//!     println!("{} {}", timestamp, value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod models;
pub mod record;

pub use config::DstConfig;
pub use error::{DstError, Result};
pub use extractor::{DstExtractor, extract, extract_from_reader, extract_with_config};
pub use models::{DateBound, DateRange, EndDatePolicy, ExtractionStats, TimeSeries};
pub use record::{DstRecord, parse_record};
