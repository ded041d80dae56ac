//! Command-line interface components.

use crate::config::DstConfig;
use crate::models::{DateBound, EndDatePolicy, ExtractionStats, TimeSeries};
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dst_index")]
#[command(about = "Extract hourly Dst index values from fixed-width bulletin files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the Dst bulletin file
    #[arg(value_name = "FILE")]
    pub source: PathBuf,

    /// Keep samples at or after this bound (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS])
    #[arg(short, long, value_name = "BOUND")]
    pub begin: Option<DateBound>,

    /// Keep samples at or before this bound (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS])
    #[arg(short, long, value_name = "BOUND")]
    pub end: Option<DateBound>,

    /// Treat a date-only --end as the last instant of that day instead of its midnight
    #[arg(long)]
    pub end_of_day: bool,

    /// Print extraction statistics to stderr
    #[arg(short, long)]
    pub summary: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Build the extraction configuration from the arguments
    pub fn to_config(&self) -> DstConfig {
        let policy = if self.end_of_day {
            EndDatePolicy::EndOfDay
        } else {
            EndDatePolicy::StartOfDay
        };

        DstConfig {
            begin: self.begin,
            end: self.end,
            end_date_policy: policy,
        }
    }

    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the flag-derived level
pub fn init_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dst_index={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Write one `timestamp<TAB>value` line per sample
pub fn write_series<W: Write>(out: &mut W, series: &TimeSeries) -> io::Result<()> {
    for (timestamp, value) in series.iter() {
        writeln!(out, "{}\t{}", timestamp.format("%Y-%m-%d %H:%M:%S"), value)?;
    }
    out.flush()
}

/// Print extraction statistics to stderr
pub fn print_summary(source: &std::path::Path, series: &TimeSeries, stats: &ExtractionStats) {
    eprintln!("{}", "Dst extraction summary".bright_green().bold());
    eprintln!("  {} {}", "Source:".bright_cyan(), source.display());
    eprintln!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        stats.lines_read.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Samples kept:".bright_cyan(),
        stats.samples_accepted.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Samples filtered:".bright_cyan(),
        stats.samples_filtered
    );
    eprintln!(
        "  {} {}",
        "Truncated records:".bright_cyan(),
        stats.truncated_records
    );

    if let (Some((first, _)), Some((last, _))) = (series.first(), series.last()) {
        eprintln!("  {} {} .. {}", "Span:".bright_cyan(), first, last);
    }

    let min = series.values().iter().min();
    let max = series.values().iter().max();
    if let (Some(min), Some(max)) = (min, max) {
        eprintln!("  {} {} .. {} nT", "Range:".bright_cyan(), min, max);
    }

    eprintln!(
        "  {} {}ms",
        "Time:".bright_cyan(),
        stats.processing_time_ms
    );
}
