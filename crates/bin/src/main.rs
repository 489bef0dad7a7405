//! Vaxholm CLI binary.
//!
//! Provides the command-line interface for the low-volatility screener.

mod integration;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use integration::ingest::{FetchConfig, IngestReport, ingest};
use integration::logging::{LogFormat, init_logging};
use integration::publish::{ArtifactPaths, Publication, screen_and_publish};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use vaxholm::{MarketSegment, StockholmUniverse, Universe};
use vaxholm_data::throttle::MIN_PACING;
use vaxholm_data::{RecordingSource, RequestPacer, SnapshotSource, YahooMarketData};
use vaxholm_output::export::ensure_writable;
use vaxholm_output::{RunSummary, format_top_table, summary};
use vaxholm_screen::{CompositeWeights, ScreenConfig, Screener};

#[derive(Parser)]
#[command(name = "vaxholm")]
#[command(about = "Vaxholm: low-volatility stock screener for Nasdaq OMX Stockholm", long_about = None)]
#[command(version)]
struct Cli {
    /// Diagnostic log level; RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Diagnostic log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen the universe and write the top-N artifact
    Screen(ScreenArgs),

    /// Show the configured universe
    Universe {
        /// Only list one market segment (large, mid, small)
        #[arg(long)]
        segment: Option<MarketSegment>,

        /// List the market segments with their sizes
        #[arg(long)]
        list_segments: bool,
    },
}

#[derive(Args)]
struct ScreenArgs {
    /// Fraction of the universe kept by the volatility filter
    #[arg(long, default_value_t = 0.30)]
    volatility_percentile: f64,

    /// Fraction of the volatility survivors removed by the momentum filter
    #[arg(long, default_value_t = 0.25)]
    momentum_cutoff: f64,

    /// Number of securities in the shortlist
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Composite weight of the volatility rank
    #[arg(long, default_value_t = 0.40)]
    w_vol: f64,

    /// Composite weight of the momentum rank
    #[arg(long, default_value_t = 0.35)]
    w_mom: f64,

    /// Composite weight of the dividend yield rank
    #[arg(long, default_value_t = 0.25)]
    w_yield: f64,

    /// JSON artifact path
    #[arg(long, default_value = "data.json")]
    output: PathBuf,

    /// Also write the shortlist as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Only screen one market segment (large, mid, small)
    #[arg(long)]
    segment: Option<MarketSegment>,

    /// Calendar days of price history to request
    #[arg(long, default_value_t = 400)]
    history_days: u32,

    /// Minimum spacing between provider requests, in milliseconds
    #[arg(long, default_value_t = 300)]
    pacing_ms: u64,

    /// Tickers fetched at the same time
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Save every fetched input to this snapshot file
    #[arg(long, conflicts_with = "replay")]
    record: Option<PathBuf>,

    /// Screen a recorded snapshot instead of live data
    #[arg(long)]
    replay: Option<PathBuf>,
}

impl ScreenArgs {
    fn screen_config(&self) -> ScreenConfig {
        ScreenConfig {
            volatility_percentile: self.volatility_percentile,
            momentum_cutoff: self.momentum_cutoff,
            top_n: self.top_n,
            weights: CompositeWeights::new(self.w_vol, self.w_mom, self.w_yield),
        }
    }

    const fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            history_days: self.history_days,
            concurrency: self.concurrency,
        }
    }

    const fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Everything that can be checked before the first request.
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        ensure_writable(&self.output)?;
        for path in [&self.csv, &self.record].into_iter().flatten() {
            ensure_writable(path)?;
        }
        if let Some(path) = &self.replay
            && !path.is_file()
        {
            return Err(format!("Snapshot not found: {}", path.display()).into());
        }
        if self.pacing() < MIN_PACING {
            return Err(format!(
                "--pacing-ms must be at least {} (got {})",
                MIN_PACING.as_millis(),
                self.pacing_ms
            )
            .into());
        }
        if self.concurrency == 0 {
            return Err("--concurrency must be at least 1".into());
        }
        if self.history_days == 0 {
            return Err("--history-days must be at least 1".into());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Screen(args) => run_screen(&args).await?,
        Commands::Universe {
            segment,
            list_segments,
        } => {
            let universe = StockholmUniverse::new();
            if list_segments {
                list_all_segments(&universe);
            } else {
                list_universe(&universe, segment);
            }
        }
    }

    Ok(())
}

async fn run_screen(args: &ScreenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let screener = Screener::new(args.screen_config())?;
    args.validate()?;

    let universe = StockholmUniverse::new().restrict(args.segment);
    let scope = args
        .segment
        .map_or_else(|| "Large + Mid + Small Cap".to_string(), |s| s.to_string());
    println!("{}", summary::banner(universe.size(), &scope, Local::now()));

    let pb = ProgressBar::new(universe.size() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let fetch = args.fetch_config();
    let ingested = fetch_inputs(args, &universe, &fetch, &pb).await?;
    pb.finish_and_clear();

    let IngestReport { records, skipped } = ingested;
    let run_summary = RunSummary::new(records.len(), skipped, screener.config());
    println!("{}", run_summary.ingest_block());

    let paths = ArtifactPaths {
        json: &args.output,
        csv: args.csv.as_deref(),
    };
    let outcome = match screen_and_publish(&screener, records, paths)? {
        Publication::Written(outcome) => outcome,
        Publication::Aborted(e) => {
            println!("⚠  {e}");
            return Ok(());
        }
    };

    let run_summary = run_summary.with_outcome(&outcome);
    println!("{}", run_summary.filter_block());
    println!("{}", format_top_table(&outcome.top, screener.config().top_n));
    println!(
        "{}",
        summary::saved_message(&args.output, outcome.universe_count, Local::now())
    );
    Ok(())
}

async fn fetch_inputs(
    args: &ScreenArgs,
    universe: &StockholmUniverse,
    fetch: &FetchConfig,
    pb: &ProgressBar,
) -> Result<IngestReport, Box<dyn std::error::Error>> {
    if let Some(path) = &args.replay {
        pb.set_message(format!("replaying {}", path.display()));
        let source = SnapshotSource::open(path)?;
        return Ok(ingest(&source, universe, fetch, pb).await);
    }

    let pacer = Arc::new(RequestPacer::paced(args.pacing()));
    let live = YahooMarketData::new(pacer)?;
    pb.set_message(format!("fetching ({} concurrent)", fetch.concurrency));

    match &args.record {
        Some(path) => {
            let recorder = RecordingSource::new(live);
            let report = ingest(&recorder, universe, fetch, pb).await;
            let snapshot = recorder.into_snapshot();
            snapshot.save(path)?;
            tracing::info!(path = %path.display(), securities = snapshot.len(), "snapshot saved");
            Ok(report)
        }
        None => Ok(ingest(&live, universe, fetch, pb).await),
    }
}

fn list_all_segments(universe: &StockholmUniverse) {
    println!("Market Segments:");
    println!("================\n");

    let counts = universe.segment_counts();
    for segment in MarketSegment::all() {
        println!(
            "{:<6} - {:<10} {:>3} tickers",
            segment.key(),
            segment.to_string(),
            counts.get(&segment).copied().unwrap_or(0)
        );
    }
}

fn list_universe(universe: &StockholmUniverse, segment: Option<MarketSegment>) {
    let selected = universe.restrict(segment);

    println!("{:<14} {:<28} Segment", "Symbol", "Name");
    println!("{}", "-".repeat(54));
    for constituent in selected.constituents() {
        println!(
            "{:<14} {:<28} {}",
            constituent.symbol, constituent.name, constituent.segment
        );
    }
    println!("\n{} tickers", selected.size());
}
