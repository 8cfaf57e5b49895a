//! Boundary extraction CLI.
//!
//! Downloads country, state and district boundaries for one OSM relation
//! and writes them as platform-ready GeoJSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use boundary_extract::export::DirExporter;
use boundary_extract::fetch::{BoundaryClient, DEFAULT_API_URL};
use boundary_extract::{run, ExtractRequest, RegionSelector};

#[derive(Parser, Debug)]
#[command(name = "extract")]
#[command(about = "Extract OSM boundary GeoJSON and reshape it for the platform importer")]
struct Args {
    /// API key for osm-boundaries.com
    #[arg(long, env = "OSM_BOUNDARY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// OSM database snapshot
    #[arg(long, visible_alias = "db", default_value = "osm20211227")]
    database: String,

    /// OSM relation ID to extract
    #[arg(long, visible_alias = "id")]
    osm_id: RegionSelector,

    /// Spatial reference identifier
    #[arg(long, default_value = "4326")]
    srid: String,

    /// Simplification tolerance
    #[arg(long, default_value = "0.01")]
    simplify: String,

    /// Admin level mapping file (YAML)
    #[arg(long)]
    admin_mapping_file: PathBuf,

    /// Directory to save GeoJSON into
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Boundary download endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "120")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Boundary extract");
    info!("Relation: {}", args.osm_id);

    if !args.output_dir.is_dir() {
        anyhow::bail!(
            "output directory {} does not exist or is not a directory",
            args.output_dir.display()
        );
    }

    let client = BoundaryClient::new(&args.api_url, Duration::from_secs(args.timeout))
        .context("Failed to create HTTP client")?;
    let exporter = DirExporter::new(&args.output_dir);

    let request = ExtractRequest {
        region: args.osm_id,
        api_key: args.api_key,
        database: args.database,
        srid: args.srid,
        simplify: args.simplify,
        mapping_file: args.admin_mapping_file,
    };

    let summary = run(&client, &exporter, &request)
        .await
        .with_context(|| format!("Extraction of relation {} failed", request.region))?;

    for file in &summary.files {
        info!(
            "{}: {} features -> {}",
            file.level,
            file.features,
            file.path.display()
        );
    }

    Ok(())
}
