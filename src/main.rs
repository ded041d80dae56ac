use anyhow::Context;
use clap::Parser;
use dst_index::DstExtractor;
use dst_index::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();
    cli::init_logging(&args);

    if let Err(error) = run(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let extractor = DstExtractor::new(args.to_config());

    let (series, stats) = extractor
        .extract_path(&args.source)
        .with_context(|| format!("Failed to extract Dst values from {}", args.source.display()))?;

    let stdout = std::io::stdout();
    cli::write_series(&mut stdout.lock(), &series).context("Failed to write samples")?;

    if args.summary {
        cli::print_summary(&args.source, &series, &stats);
    }

    Ok(())
}
