//! Batch geocoder for spreadsheet exports.
//!
//! Takes a CSV with an `Address` column, geocodes every row it can
//! against the PAGIS services, and writes an augmented copy with
//! `X`/`Y` columns filled in.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

use magnolia::arcgis::{Locator, ParcelService};
use magnolia::config::Config;
use magnolia::pipeline;
use magnolia::Resolver;

#[derive(Parser, Debug)]
#[command(name = "geocode")]
#[command(about = "Geocode the Address column of a CSV dataset")]
struct Args {
    /// Input CSV file with a header row and an `Address` column
    file: PathBuf,

    /// Optional TOML config overriding endpoints, envelope, timeout
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(timeout) = args.timeout_secs {
        config.timeout_secs = timeout;
    }

    info!("Geocoding {}", args.file.display());

    // One client for the whole run, so connections are reused across
    // rows the way a long-lived session would.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let locator_url = Url::parse(&config.locator_url).context("Invalid locator URL")?;
    let parcels_url = Url::parse(&config.parcels_url).context("Invalid parcels URL")?;

    let resolver = Resolver::new(
        Locator::new(client.clone(), locator_url),
        ParcelService::new(client, parcels_url, config.envelope),
    );

    let out_path = pipeline::run(&args.file, &resolver).await?;
    info!("Wrote {}", out_path.display());

    Ok(())
}
