//! Asset Resolution CLI
//!
//! Resolves at-risk critical infrastructure assets for the hazard
//! dashboard and writes them as JSON (and optionally GeoJSON).
//!
//! Usage:
//!   resolve-assets --zones-dir data/zones --output data/classified_assets.json --geojson

use anyhow::Result;
use asset_resolver::{export, pipeline, BoundingBox, ResolverConfig, OVERPASS_ENDPOINT};
use clap::Parser;
use risk_engine::RiskLevel;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "resolve-assets",
    about = "Classify and rank critical infrastructure assets against hazard zones"
)]
struct Args {
    /// Directory holding the per-hazard zone GeoJSON files
    #[arg(short, long, default_value = "data/zones")]
    zones_dir: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "data/classified_assets.json")]
    output: PathBuf,

    /// Also write a GeoJSON FeatureCollection next to the output
    #[arg(long)]
    geojson: bool,

    /// Overpass interpreter endpoint
    #[arg(long, default_value = OVERPASS_ENDPOINT)]
    endpoint: String,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = asset_resolver::FETCH_TIMEOUT_SECS)]
    timeout: u64,

    /// Minimum qualifying exposure level (low keeps everything)
    #[arg(long, default_value = "medium")]
    min_risk: RiskLevel,

    /// Survey bounding box: south west north east
    #[arg(long, num_args = 4, value_names = ["SOUTH", "WEST", "NORTH", "EAST"])]
    bbox: Option<Vec<f64>>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let bbox = match args.bbox.as_deref() {
        Some([south, west, north, east]) => BoundingBox {
            south: *south,
            west: *west,
            north: *north,
            east: *east,
        },
        Some(_) => anyhow::bail!("--bbox needs exactly four values"),
        None => BoundingBox::PORTO_ALEGRE,
    };

    let config = ResolverConfig {
        bbox,
        endpoint: args.endpoint,
        timeout_secs: args.timeout,
        min_qualifying_level: args.min_risk,
    };

    let assets = pipeline::resolve_assets(&config, &args.zones_dir).await?;

    info!("\nTop 10 assets by composite risk:");
    for asset in assets.iter().take(10) {
        let composite = asset.composite();
        info!(
            "  {:>2} {:13} | {:40} | {}",
            composite.score,
            composite.label,
            name_column(&asset.name),
            asset.asset_type.label()
        );
    }

    info!("writing {} assets to {:?}", assets.len(), args.output);
    let file = File::create(&args.output)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &assets)?;

    if args.geojson {
        let geojson_path = args.output.with_extension("geojson");
        info!("writing GeoJSON to {:?}", geojson_path);
        let file = File::create(&geojson_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &export::to_geojson(&assets))?;
    }

    Ok(())
}

/// Summary column width for names. Truncation counts characters, not
/// bytes; accented OSM names land mid-character under a byte index.
fn name_column(name: &str) -> String {
    name.chars().take(40).collect()
}
