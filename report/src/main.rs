//! Throughput report generator.
//!
//! Reads benchmark result lines (`Id = tokio, Throughput (messages/sec) = …,
//! <parameters>`), draws a horizontal grouped bar chart comparing the
//! throughput of every target per parameter combination to an image (PNG, or
//! SVG for a `.svg` output path), and prints a text rendering of the same
//! chart.
//!
//! Run: `cargo run -p throughput-report [-- --input throughput.txt --output throughput.png]`

mod error;
mod plots;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use throughput_chart::{LayoutConfig, collect};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ReportError;

#[derive(Debug, Parser)]
#[command(name = "throughput-report", about = "Chart benchmark throughput per target")]
struct Cli {
    /// Benchmark log, one record per line
    #[arg(short, long, default_value = "throughput.txt")]
    input: PathBuf,
    /// Destination of the chart; `.svg` writes a vector image, anything else a raster one
    #[arg(short, long, default_value = "throughput.png")]
    output: PathBuf,
    /// Base distance between two parameter combinations
    #[arg(long, default_value_t = LayoutConfig::default().spacing)]
    spacing: f64,
    /// Thickness of a single bar
    #[arg(long, default_value_t = LayoutConfig::default().band_height)]
    band_height: f64,
    /// Chart caption
    #[arg(long)]
    title: Option<String>,
    /// Do not print the text chart
    #[arg(long, default_value_t = false)]
    no_show: bool,
    /// Extra tracing filter directives, e.g. `throughput_chart=trace`
    #[arg(short, long)]
    log: Vec<String>,
}

/// Filter from a `RUST_LOG`-style spec plus extra directives, `warn` when the
/// spec is absent or invalid.
fn env_filter(spec: Option<&str>, directives: &[String]) -> Result<EnvFilter, ReportError> {
    let mut env_filter = spec
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    for directive in directives {
        env_filter = env_filter.add_directive(directive.parse()?);
    }
    Ok(env_filter)
}

fn init_tracing(directives: &[String]) -> Result<(), ReportError> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(env_filter(spec.as_deref(), directives)?)
        .with(layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let text = std::fs::read_to_string(&cli.input).map_err(|source| ReportError::Read {
        path: cli.input.clone(),
        source,
    })?;
    info!(path = %cli.input.display(), bytes = text.len(), "read benchmark log");

    let collection = collect(text.lines())?;
    if collection.is_empty() {
        warn!(path = %cli.input.display(), "no benchmark records, drawing an empty chart");
    }
    info!(
        labels = collection.labels.len(),
        targets = collection.series.len(),
        "collected benchmark records"
    );

    let requested = LayoutConfig::new(cli.spacing, cli.band_height);
    let config = requested.fit_targets(collection.series.len());
    if config.spacing > requested.spacing {
        warn!(
            "spacing {} too small for {} targets, using {}",
            requested.spacing,
            collection.series.len(),
            config.spacing
        );
    }
    let chart = collection.layout(config)?;

    let title = cli.title.as_deref().unwrap_or(plots::DEFAULT_TITLE);
    plots::render_to_file(&chart, &cli.output, title)?;
    info!("Saved: {}", cli.output.display());

    if !cli.no_show {
        print!("{}", summary::render(&chart)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(&cli.log) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
