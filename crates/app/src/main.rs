//! DoodleDream - headless coloring book painter
//!
//! Replays a JSON script of UI messages (tool commands and pointer events)
//! against a paint session and writes the finished canvas as PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use doodle_config::EngineConfig;
use doodle_painting::{DEFAULT_EXPORT_NAME, PaintSession};
use doodle_source::{ColoringSource, PresetLibrary};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod driver;
mod error;

use driver::Driver;
use error::AppError;

/// Replay a DoodleDream script and save the result.
#[derive(Parser, Debug)]
#[command(
    name = "doodle",
    about = "DoodleDream headless painter",
    long_about = "Replay a JSON array of UI messages against a blank canvas and\n\
                  export the result as PNG.\n\n\
                  Example:\n  \
                  doodle session.json --output dino.png --assets public/assets"
)]
struct Args {
    /// JSON script: an array of Command / Pointer messages
    #[arg(value_name = "SCRIPT.json")]
    script: PathBuf,

    /// Engine config file. Falls back to $DOODLE_CONFIG, then defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the final canvas
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_EXPORT_NAME)]
    output: PathBuf,

    /// Directory holding preset coloring pages (overrides the config)
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doodle=info,doodle_painting=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::from_env()?,
    };
    if let Some(assets) = args.assets {
        config.asset_dir = assets;
    }

    let text = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|source| AppError::Read {
            path: args.script.clone(),
            source,
        })?;
    let steps = doodle_ipc::parse_script(&text)?;
    info!(
        "Replaying {} step(s) from {}",
        steps.len(),
        args.script.display()
    );

    let session = PaintSession::from_config(&config)?;
    let source = ColoringSource::presets_only(PresetLibrary::new(&config.asset_dir));
    let mut driver = Driver::new(session, source, config.brush.clone());

    driver.announce();
    driver.run(steps).await;
    info!("Script produced {} notification(s)", driver.events().len());
    driver.export(&args.output)
}
