//! Load an image, crop it and print the recognized text.
//!
//! cargo run -p ocrop-app -- ./scan.png --crop 10,10,80,30

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use ocrop_config::Config;
use ocrop_core::{ImageLoader, ImageSource, Session};
use ocrop_ocr::SubmissionOrchestrator;
use ocrop_types::Selection;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocrop")]
#[command(about = "Extract text from a region of an image")]
#[command(version)]
struct Args {
    /// Image file path, http(s) URL or data URI
    source: String,

    /// Crop as x,y,width,height (percent of the displayed image by default)
    #[arg(long)]
    crop: Option<CropArg>,

    /// Read --crop as displayed pixels instead of percent
    #[arg(long)]
    pixels: bool,
}

#[derive(Debug, Clone, Copy)]
struct CropArg([f64; 4]);

impl FromStr for CropArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>().map_err(|e| format!("'{v}': {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let values: [f64; 4] = values
            .try_into()
            .map_err(|_| "expected x,y,width,height".to_string())?;
        Ok(CropArg(values))
    }
}

impl CropArg {
    fn to_selection(self, pixels: bool) -> Selection {
        let [x, y, width, height] = self.0;
        if pixels {
            Selection::pixels(x, y, width, height)
        } else {
            Selection::percent(x, y, width, height)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::new();

    let loader = ImageLoader::new(config.render.viewport);
    let image = loader
        .load(ImageSource::parse(&args.source))
        .await
        .context("Failed to load image")?;

    let mut session = Session::new();
    let generation = session.load(image);
    tracing::debug!("Image loaded as generation {}", generation);
    if let Some(crop) = args.crop {
        session.select(crop.to_selection(args.pixels));
    }

    let orchestrator = SubmissionOrchestrator::from_config(&config, loader);
    let submission = orchestrator.submit_session(&session).await;

    if submission.generation != Some(generation) {
        anyhow::bail!("Image changed while recognition was running");
    }

    let text = submission.result?;
    println!("{text}");
    Ok(())
}
