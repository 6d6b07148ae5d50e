//! Train the voting detector on a face corpus and optionally sweep an image.
//!
//! Usage:
//!   haar-vote --faces faces                          # face1.jpg .. face57.jpg, print votes
//!   haar-vote --faces faces --detect group.jpg       # also report detections
//!   haar-vote --faces faces --detect group.jpg -o out.png --json report.json

use anyhow::{Context, Result};
use clap::Parser;
use haar_vote_face::haar_lite::render::{save_detections, Colors};
use haar_vote_face::haar_lite::utils::{load_luma, load_rgb};
use haar_vote_face::{CorpusSource, DetectorConfig, Trainer};
use image::DynamicImage;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "haar-vote")]
#[command(author, version, about = "Haar-like feature voting face detector", long_about = None)]
struct Args {
    /// Directory holding the training faces
    #[arg(long, required = true)]
    faces: PathBuf,

    /// Number of numbered training images (face1.jpg .. faceN.jpg); scans the whole directory when omitted
    #[arg(long)]
    count: Option<usize>,

    /// JSON detector configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the selection threshold
    #[arg(long)]
    threshold: Option<usize>,

    /// Image to sweep for faces
    #[arg(long)]
    detect: Option<PathBuf>,

    /// Where to save the detection overlay
    #[arg(short, long, requires = "detect")]
    output: Option<PathBuf>,

    /// Where to write the vote report as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.selection_threshold = threshold;
    }

    let source = match args.count {
        Some(count) => CorpusSource::faces(&args.faces, count),
        None => CorpusSource::Directory(args.faces.clone()),
    };

    let outcome = Trainer::new(config)?.train(&source)?;
    let report = outcome.report();
    println!("{report}");

    if let Some(path) = &args.json {
        report.write_json(path)?;
        info!("wrote vote report to {}", path.display());
    }

    let Some(scene) = &args.detect else {
        return Ok(());
    };

    let detector = outcome.into_detector()?;
    let gray = load_luma(scene)?;
    let detections = detector.detect(gray.view())?;
    for detection in &detections {
        println!("face at row {}, col {}", detection.row, detection.col);
    }
    info!("{} faces in {}", detections.len(), scene.display());

    if let Some(output) = &args.output {
        let image = DynamicImage::ImageRgb8(load_rgb(scene)?);
        save_detections(&image, &detections, Colors::GREEN, 3, output)?;
        info!("saved overlay to {}", output.display());
    }

    Ok(())
}
