//! CLI entry point for the surf rater.
//!
//! Subcommands fetch and classify hourly forecasts for the spot catalog,
//! reconcile stored forecasts against a scraped benchmark stream, and list
//! the catalog itself.

mod infra;
mod services;

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use chrono::Timelike;
use clap::{Parser, Subcommand};
use tracing::Instrument;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use surf_rater::aligner::{AlignerConfig, align};
use surf_rater::benchmark::compare::{BenchmarkEntry, agreement_pct, compare};
use surf_rater::benchmark::scale::BucketScheme;
use surf_rater::classifiers::quality::evaluate_surf_quality;
use surf_rater::classifiers::types::Rating;
use surf_rater::fetch::auth::UrlParam;
use surf_rater::fetch::{BasicClient, HttpClient};
use surf_rater::output::{ForecastRow, append_record, load_rows, write_records};
use surf_rater::spots::SurfSpot;

use crate::infra::openmeteo::OpenMeteoClient;
use crate::services::spot_catalog::{BuiltinCatalog, JsonFileCatalog, SpotCatalog};

#[derive(Parser)]
#[command(name = "surf_rater")]
#[command(about = "Hourly surf-quality ratings and benchmark comparison", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, align, and classify hourly forecasts for the spot catalog
    Forecast {
        /// CSV file to append classified rows to
        #[arg(short, long, default_value = "forecasts.csv")]
        output: String,

        /// JSON spot catalog; defaults to the built-in list
        #[arg(long)]
        spots_file: Option<String>,

        /// Only process spots whose name contains this substring
        #[arg(long)]
        spot: Option<String>,

        /// Forecast horizon in days
        #[arg(short, long, default_value_t = 3)]
        days: u8,

        /// Keep only these local hours (e.g. 3,6,9,12,18,21)
        #[arg(long, value_delimiter = ',')]
        hours: Option<Vec<u32>>,
    },
    /// Compare classified forecasts against a scraped benchmark stream
    Compare {
        /// Classified-forecast CSV produced by `forecast`
        #[arg(short, long)]
        classified: String,

        /// Benchmark JSON: [{"datetime": "...", "rating": 0-10}, ...]
        #[arg(short, long)]
        benchmark: String,

        /// Spot name the benchmark stream belongs to
        #[arg(long)]
        spot: String,

        /// CSV file to write comparison rows to
        #[arg(short, long, default_value = "comparison.csv")]
        output: String,

        /// Bucket-scheme JSON; defaults to the 4-bucket legacy scheme
        #[arg(long)]
        scheme: Option<String>,
    },
    /// List the spot catalog
    ListSpots {
        /// JSON spot catalog; defaults to the built-in list
        #[arg(long)]
        spots_file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/surf_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("surf_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            output,
            spots_file,
            spot,
            days,
            hours,
        } => {
            run_forecast(&output, spots_file.as_deref(), spot.as_deref(), days, hours).await?;
        }
        Commands::Compare {
            classified,
            benchmark,
            spot,
            output,
            scheme,
        } => {
            run_compare(&classified, &benchmark, &spot, &output, scheme.as_deref())?;
        }
        Commands::ListSpots { spots_file } => {
            let spots = load_catalog(spots_file.as_deref()).await?;

            for spot in &spots {
                info!(
                    spot = %spot.name,
                    lat = spot.lat,
                    lon = spot.lon,
                    swell_min_m = spot.swell_min_m,
                    arc_from = spot.swell_dir_range.0,
                    arc_to = spot.swell_dir_range.1,
                    facing = spot.facing_direction_deg,
                    "Spot"
                );
            }

            let unprofiled = spots
                .iter()
                .filter(|s| s.facing_direction_deg.is_none())
                .count();
            info!(total = spots.len(), unprofiled, "Spot catalog summary");
        }
    }

    Ok(())
}

async fn load_catalog(spots_file: Option<&str>) -> Result<Vec<SurfSpot>> {
    match spots_file {
        Some(path) => JsonFileCatalog::new(path).list_spots().await,
        None => BuiltinCatalog.list_spots().await,
    }
}

/// Builds the Open-Meteo client, keyed via the `apikey` query parameter
/// when `OPEN_METEO_API_KEY` is set (customer tier).
fn openmeteo_client() -> OpenMeteoClient<Box<dyn HttpClient>> {
    let http: Box<dyn HttpClient> = match std::env::var("OPEN_METEO_API_KEY") {
        Ok(key) if !key.is_empty() => Box::new(UrlParam::apikey(BasicClient::new(), &key)),
        _ => Box::new(BasicClient::new()),
    };
    OpenMeteoClient::new(http)
}

/// Fetches, aligns, and classifies every selected spot, appending rows to
/// `output`. A failed spot is logged and the batch continues.
#[tracing::instrument(skip(spots_file, spot_filter, hours), fields(output, days))]
async fn run_forecast(
    output: &str,
    spots_file: Option<&str>,
    spot_filter: Option<&str>,
    days: u8,
    hours: Option<Vec<u32>>,
) -> Result<()> {
    let spots = load_catalog(spots_file).await?;
    let selected: Vec<_> = spots
        .into_iter()
        .filter(|s| spot_filter.is_none_or(|f| s.name.contains(f)))
        .collect();

    info!(spot_count = selected.len(), days, "Starting forecast run");

    let client = openmeteo_client();
    let config = AlignerConfig::default();

    for spot in &selected {
        let span = tracing::info_span!("process_spot", spot = %spot.name);
        if let Err(e) = process_spot(&client, &config, spot, days, hours.as_deref(), output)
            .instrument(span)
            .await
        {
            error!(spot = %spot.name, error = %e, "Spot processing failed");
        }
    }

    info!(output, "Forecast run finished");
    Ok(())
}

async fn process_spot<C: HttpClient>(
    client: &OpenMeteoClient<C>,
    config: &AlignerConfig,
    spot: &SurfSpot,
    days: u8,
    hours: Option<&[u32]>,
    output: &str,
) -> Result<()> {
    let (marine, weather) = client.fetch_series(spot, days).await?;
    let alignment = align(&marine, &weather, config)?;

    if alignment.gaps.total() > 0 {
        warn!(
            dropped = alignment.gaps.total(),
            "Provider gaps dropped hours"
        );
    }

    let mut written = 0usize;
    for sample in &alignment.samples {
        if let Some(hours) = hours {
            if !hours.contains(&sample.time.hour()) {
                continue;
            }
        }
        let classified = evaluate_surf_quality(spot, sample);
        append_record(output, &ForecastRow::new(&spot.name, &classified))?;
        written += 1;
    }

    info!(
        aligned = alignment.samples.len(),
        written, "Spot processed"
    );
    Ok(())
}

/// Bucket assignment used when no scheme file is given. The tier-to-bucket
/// assignment is a deployment choice; there is no published canonical one.
fn default_scheme() -> BucketScheme {
    BucketScheme::four_tier(&[
        (Rating::LakeMode, 0),
        (Rating::Sketchy, 1),
        (Rating::Playable, 1),
        (Rating::Solid, 2),
        (Rating::Firing, 3),
    ])
}

#[tracing::instrument(skip_all, fields(spot, output))]
fn run_compare(
    classified: &str,
    benchmark: &str,
    spot: &str,
    output: &str,
    scheme: Option<&str>,
) -> Result<()> {
    let rows = load_rows(classified)?;
    let samples: Vec<_> = rows
        .iter()
        .filter(|r| r.spot == spot)
        .map(ForecastRow::to_classified)
        .collect();
    if samples.is_empty() {
        warn!(spot, "No classified rows for spot");
    }

    let entries: Vec<BenchmarkEntry> = serde_json::from_str(&std::fs::read_to_string(benchmark)?)?;

    let scheme = match scheme {
        Some(path) => BucketScheme::from_json_file(path)?,
        None => default_scheme(),
    };

    let records = compare(spot, &samples, &entries, &scheme);
    write_records(output, &records)?;

    info!(
        rows = records.len(),
        agreement_pct = format!("{:.1}", agreement_pct(&records)),
        scheme = %scheme.version,
        "Comparison written"
    );
    Ok(())
}
