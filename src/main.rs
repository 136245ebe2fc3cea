mod config;
mod normalizer;
mod output;
mod parsers;

use anyhow::{Context, Result, bail};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const RECOPY_HINT: &str = "No events found. Paste the raw event data into a plain-text editor \
     (e.g. TextEdit in plain-text mode) first, then copy it from there and try again.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn raw demo-click event logs into spreadsheet rows", long_about = None)]
struct Args {
    /// stdout (grouped lists), csv (writes demo-clicks.csv), json, or a .csv/.json/.jsonl path
    #[arg(short, long, default_value = "stdout")]
    output: String,

    /// Print a single list, one value per line, for piping into a clipboard
    #[arg(short, long, value_enum, conflicts_with = "output")]
    column: Option<output::Column>,

    /// Raw log file; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    file: Option<String>,

    #[arg(long)]
    stats: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start_time = Instant::now();
    let raw = read_input(args.file.as_deref())?;
    let events = parsers::parse(&raw);
    tracing::info!(bytes = raw.len(), events = events.len(), "parsed input");

    if events.is_empty() && !raw.trim().is_empty() {
        bail!(RECOPY_HINT);
    }

    let mut writer = output::create_writer(&args.output, args.column)?;
    writer.write_batch(&events)?;
    writer.finish()?;

    if args.stats {
        print_stats(raw.len(), events.len(), start_time.elapsed());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading stdin")?;
            Ok(raw)
        }
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path}"))?;
            if file.metadata()?.len() == 0 {
                return Ok(String::new());
            }
            // SAFETY: the mapping is only read, and copied out before it is dropped.
            let mmap = unsafe { Mmap::map(&file)? };
            let text = std::str::from_utf8(&mmap)
                .with_context(|| format!("{path} is not valid UTF-8"))?;
            Ok(text.to_owned())
        }
    }
}

fn print_stats(input_bytes: usize, events: usize, duration: Duration) {
    let duration_secs = duration.as_secs_f64();
    let input_kb = input_bytes as f64 / 1024.0;

    eprintln!("\n=== PARSE STATS ===");
    eprintln!("Input size: {:.2} KB", input_kb);
    eprintln!("Events: {}", events);
    eprintln!("Processing time: {:.3}s", duration_secs);
    eprintln!("Throughput: {:.0} events/s", events as f64 / duration_secs);
}
