use haar_vote_face::haar_lite::render::{save_detections, Colors};
use haar_vote_face::haar_lite::utils::{load_luma, load_rgb};
use haar_vote_face::{CorpusSource, DetectorConfig, Trainer};
use image::DynamicImage;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let detector = Trainer::new(DetectorConfig::default())?
        .train(&CorpusSource::faces("faces", 57))?
        .into_detector()?;

    let scene = Path::new("test_data/group.jpg");
    let gray = load_luma(scene)?;
    let detections = detector.detect(gray.view())?;
    println!("detections: {:?}", detections);

    let image = DynamicImage::ImageRgb8(load_rgb(scene)?);
    std::fs::create_dir_all("assets")?;
    save_detections(&image, &detections, Colors::RED, 2, Path::new("./assets/group_faces.png"))?;
    Ok(())
}
