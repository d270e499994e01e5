use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tillage_core::clock::SampleClock;
use tillage_core::config::MonitorConfig;
use tillage_core::datalog::format::{write_csv, write_json_lines};
use tillage_core::datalog::LogFormat;
use tillage_core::demo::DemoSource;
use tillage_core::realtime::{PerformanceMonitor, ReadingSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod output;
mod source;

use output::PrintFormat;
use source::JsonLinesSource;

/// Tractor field performance monitor: derives slip, power, fuel and
/// tractive metrics from a stream of raw readings.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines reading feed ("-" for stdin)
    #[arg(short, long, default_value = "-", conflicts_with = "demo")]
    input: String,

    /// Ignore feed timestamps and stamp readings with the sample clock
    #[arg(long)]
    restamp: bool,

    /// Use simulated readings instead of a feed
    #[arg(long)]
    demo: bool,

    /// Number of demo readings (unlimited when omitted)
    #[arg(long, requires = "demo")]
    samples: Option<usize>,

    /// Demo random seed
    #[arg(long, requires = "demo")]
    seed: Option<u64>,

    /// Wait this long between readings (defaults to the configured interval in demo mode)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Format to print processed samples in
    #[arg(short, long, default_value = "table")]
    format: PrintFormat,

    /// Write the buffered session here when the stream ends (.csv or .jsonl)
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MonitorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    let mut monitor = PerformanceMonitor::new(&config).context("building monitor")?;

    let mut source: Box<dyn ReadingSource> = if cli.demo {
        let demo = match cli.seed {
            Some(seed) => DemoSource::seeded(seed, config.sample_interval()),
            None => DemoSource::from_entropy(config.sample_interval()),
        };
        Box::new(match cli.samples {
            Some(n) => demo.limit(n),
            None => demo,
        })
    } else {
        let reader: Box<dyn BufRead> = if cli.input == "-" {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(&cli.input).with_context(|| format!("opening {}", cli.input))?;
            Box::new(BufReader::new(file))
        };
        let feed = JsonLinesSource::new(reader);
        Box::new(if cli.restamp {
            feed.restamp(SampleClock::fixed(config.sample_interval()))
        } else {
            feed
        })
    };

    let pacing = cli
        .interval_ms
        .or(cli.demo.then_some(config.sample_interval_ms))
        .filter(|ms| *ms > 0);
    let mut ticker = pacing.map(|ms| tokio::time::interval(Duration::from_millis(ms)));

    let mut out = io::stdout();
    output::print_header(&mut out, cli.format)?;

    let (mut processed, mut rejected) = (0usize, 0usize);
    while let Some(raw) = source.next_reading() {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        match monitor.process(raw) {
            Ok(sample) => {
                processed += 1;
                output::print_sample(&mut out, cli.format, &sample)?;
            }
            Err(e) => {
                rejected += 1;
                warn!("Rejected reading: {e}");
            }
        }
    }

    info!(
        "Stream ended: {processed} processed, {rejected} rejected, {} buffered",
        monitor.buffer().len()
    );

    if let Some(path) = &cli.export {
        let records = monitor.snapshot(None);
        match LogFormat::from_extension(path) {
            Some(LogFormat::Csv) => write_csv(path, monitor.buffer().started_at(), &records)?,
            Some(LogFormat::JsonLines) => write_json_lines(path, &records)?,
            None => bail!("unsupported export extension: {}", path.display()),
        }
        info!("Exported {} samples to {}", records.len(), path.display());
    }

    Ok(())
}
