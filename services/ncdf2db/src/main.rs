//! WRF-to-SUADA exporter.
//!
//! Reads WRF output files, derives per-station meteorological and
//! tropospheric parameters, and writes them either into the SUADA
//! database or into TROPOSINEX text files.

mod config;
mod files;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::{database_url, Environment, OutputMode};
use derivation::TimeStepPipeline;
use nwp_common::{CountryFilter, Station};
use projection::LambertProjector;
use suada_db::{DbSink, SuadaDb};
use troposinex::TroposinexSink;

/// Stations are registered against this instrument in SUADA.
const INSTRUMENT_NAME: &str = "GNSS";

#[derive(Parser, Debug)]
#[command(name = "ncdf2db")]
#[command(about = "Exports WRF model output to SUADA or TROPOSINEX")]
struct Args {
    /// Directory containing the WRF output files
    #[arg(short, long, default_value = "./")]
    basedir: PathBuf,

    /// Input filename prefix
    #[arg(short, long, default_value = "wrfout_d02")]
    prefix: String,

    /// Model source name registered in the SOURCE table
    #[arg(short, long)]
    source_name: String,

    /// Country filter; 'All' processes stations from every country
    #[arg(short, long, default_value = "All")]
    country: String,

    /// Target environment: dev or prod
    #[arg(short = 'd', long)]
    env: String,

    /// Output mode: 'db' or 'tro'
    #[arg(short, long, default_value = "db")]
    output: String,

    /// Directory for TROPOSINEX output files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting WRF-to-SUADA exporter");

    let environment = Environment::parse(&args.env)?;
    let output = OutputMode::parse(&args.output)?;
    let country = CountryFilter::parse(&args.country);

    let input_files = files::list_input_files(&args.basedir, &args.prefix)?;
    if input_files.is_empty() {
        bail!(
            "no candidate input files matching {}* under {}",
            args.prefix,
            args.basedir.display()
        );
    }
    info!(
        count = input_files.len(),
        basedir = %args.basedir.display(),
        prefix = %args.prefix,
        "Found input files"
    );

    let db = SuadaDb::connect(&database_url(environment)?).await?;
    db.migrate().await?;

    let source_id = db.source_id(&args.source_name).await?;
    info!(source = %args.source_name, source_id, "Resolved source");

    let stations = load_stations(&db, &args.source_name).await;
    let projector = LambertProjector;

    let summary = match output {
        OutputMode::Db => {
            let sink = DbSink::new(db.pool().clone(), source_id);
            TimeStepPipeline::new(&projector, sink, country)
                .run(&input_files, &stations)
                .await?
        }
        OutputMode::Tro => {
            let sink = TroposinexSink::new(&args.out_dir);
            TimeStepPipeline::new(&projector, sink, country)
                .run(&input_files, &stations)
                .await?
        }
    };

    info!(
        files_processed = summary.files_processed,
        records_written = summary.records_written,
        "Export finished"
    );
    Ok(())
}

/// Load the station set; a failed query logs and yields an empty set
/// so the run still walks the input files.
async fn load_stations(db: &SuadaDb, source_name: &str) -> Vec<Station> {
    match db.stations(source_name, INSTRUMENT_NAME).await {
        Ok(stations) => stations,
        Err(e) => {
            warn!(error = %e, "Station query failed, continuing with no stations");
            Vec::new()
        }
    }
}
