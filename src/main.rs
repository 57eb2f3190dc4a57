use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use video_pairing::{
    config::Config,
    pairing::{sort_rows_by_date, PairingEngine, PairingSummary},
    video::VideoLoader,
};

#[derive(Parser)]
#[command(
    name = "video-pairing",
    version,
    about = "Pair Instagram posts with their TikTok reposts",
    long_about = "Reads an export of a creator's Instagram and TikTok videos, matches each Instagram post to its TikTok repost by posting time, duration and thumbnail similarity, and writes the paired rows as JSON."
)]
struct Cli {
    /// JSON export of video records
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the paired rows (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sort rows by date, newest first
    #[arg(short, long)]
    sort: bool,

    /// Only log the summary, do not write rows
    #[arg(long)]
    summary_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let log_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting video-pairing v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if cli.sort {
        config.output.sort_by_date = true;
    }

    let videos = VideoLoader::load(&cli.input).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let engine = PairingEngine::new(config.pairing.clone());
    let mut rows = engine.pair(&videos);

    if config.output.sort_by_date {
        sort_rows_by_date(&mut rows, config.output.newest_first);
    }

    info!("{}", PairingSummary::compute(&videos, &rows));

    if cli.summary_only {
        return Ok(());
    }

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing rows to {}", path.display()))?;
            info!("Rows written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
