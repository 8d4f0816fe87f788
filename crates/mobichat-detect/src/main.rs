use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mobichat_detect::{draw_detection, DetectorClient};

/// Count wheelchairs on an image and write an annotated copy
#[derive(Parser)]
#[command(name = "mobichat-detect")]
#[command(about = "Wheelchair detection on a single image")]
struct Cli {
    /// Image file to analyze
    image: PathBuf,

    /// Where to write the annotated image
    #[arg(long, default_value = "result.jpg")]
    output: PathBuf,

    /// Detection-model endpoint
    #[arg(long, env = "DETECTOR_URL", default_value = "http://127.0.0.1:8500/v1/detect")]
    endpoint: String,

    /// Discard detections below this confidence
    #[arg(long, default_value_t = 0.5)]
    min_confidence: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let image_bytes = std::fs::read(&cli.image)
        .with_context(|| format!("Failed to read image {}", cli.image.display()))?;
    let mut image = image::open(&cli.image)
        .with_context(|| format!("Failed to decode image {}", cli.image.display()))?
        .to_rgb8();

    let client = DetectorClient::new(cli.endpoint.clone())?;
    let detections = client.detect(image_bytes).await?;

    let wheelchairs: Vec<_> = detections
        .into_iter()
        .filter(|d| d.confidence >= cli.min_confidence)
        .collect();

    println!("Number of wheelchairs detected : {}", wheelchairs.len());

    for detection in &wheelchairs {
        draw_detection(&mut image, detection);
    }
    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Annotated image written to {}", cli.output.display());

    Ok(())
}
