pub mod haar_lite;

pub use haar_lite::classify::{classify, detect, Detector};
pub use haar_lite::config::{DetectorConfig, Quorum};
pub use haar_lite::corpus::{scan_corpus, CorpusSource};
pub use haar_lite::error::{HaarError, Result};
pub use haar_lite::features::FeatureKind;
pub use haar_lite::train::{Trainer, TrainingOutcome, TrainingReport};
pub use haar_lite::types::{Detection, FeatureValue, LumaImage, MeanTable, VoteTable};

#[cfg(test)]
mod tests {
    use crate::haar_lite::boost::boost;
    use crate::haar_lite::classify::classify;
    use crate::haar_lite::config::DetectorConfig;
    use crate::haar_lite::corpus::{scan_corpus, CorpusSource};
    use crate::haar_lite::features::FeatureKind;
    use crate::haar_lite::render::{render_detections, Colors};
    use crate::haar_lite::select::select_features;
    use crate::haar_lite::train::Trainer;
    use crate::haar_lite::types::{NUM_FEATURES, NUM_WINDOWS};
    use crate::haar_lite::utils::{load_luma, load_rgb, RGB_WEIGHTS};
    use image::{DynamicImage, Rgb, RgbImage};
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("haar_vote_e2e_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_solid_gray_corpus_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = temp_dir("gray");
        for i in 1..=2 {
            RgbImage::from_pixel(225, 225, Rgb([128, 128, 128]))
                .save(dir.join(format!("face{i}.png")))
                .unwrap();
        }
        let source = CorpusSource::Numbered {
            dir: dir.clone(),
            prefix: "face".to_string(),
            count: 2,
            extension: "png".to_string(),
        };
        let config = DetectorConfig::default();

        // halves cancel, thirds leave the gray level itself
        let gray = 128.0 * (RGB_WEIGHTS[0] + RGB_WEIGHTS[1] + RGB_WEIGHTS[2]);
        let expected = |kind: FeatureKind| match kind {
            FeatureKind::HorizontalMiddle | FeatureKind::VerticalMiddle => gray,
            _ => 0.0,
        };

        let corpus = scan_corpus(&source, &config).unwrap();
        for data in &corpus {
            for window in data.windows() {
                for (kind, value) in window.iter() {
                    assert!(value.iter().all(|&v| (v - expected(kind)).abs() < 1e-6), "{kind}");
                }
            }
        }

        let (votes, means) = boost(&corpus, &config).unwrap();
        for window in 0..NUM_WINDOWS {
            for kind in FeatureKind::ALL {
                assert_eq!(votes.get(window, kind), 2);
                assert!(means.get(window, kind).iter().all(|&v| (v - expected(kind)).abs() < 1e-6));
            }
        }

        let selection = select_features(&votes, 1);
        assert_eq!(selection.total_selected(), NUM_WINDOWS * NUM_FEATURES);

        let tile = load_luma(&dir.join("face1.png")).unwrap();
        assert!(classify(tile.view(), &selection, selection.total_selected(), &means, &config).unwrap());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_train_detect_and_render() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = temp_dir("detect");
        let face = RgbImage::from_fn(225, 225, |x, y| {
            let v = ((x * 3 + y * 5) % 200) as u8;
            Rgb([v, v, v])
        });
        face.save(dir.join("face1.png")).unwrap();

        let config = DetectorConfig {
            selection_threshold: 0,
            ..Default::default()
        };
        let outcome = Trainer::new(config)
            .unwrap()
            .train(&CorpusSource::Directory(dir.clone()))
            .unwrap();
        assert_eq!(outcome.corpus_size, 1);
        let detector = outcome.into_detector().unwrap();

        // face in the second tile of the first row, stripes elsewhere
        let scene = RgbImage::from_fn(500, 300, |x, y| {
            if (225..450).contains(&x) && y < 225 {
                *face.get_pixel(x - 225, y)
            } else if (x / 2 + y / 3) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let scene_path = dir.join("scene.png");
        scene.save(&scene_path).unwrap();

        let gray = load_luma(&scene_path).unwrap();
        let detections = detector.detect(gray.view()).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!((detections[0].row, detections[0].col), (0, 225));

        let rgb = DynamicImage::ImageRgb8(load_rgb(&scene_path).unwrap());
        let rendered = render_detections(&rgb, &detections, Colors::RED, 3);
        assert_eq!(rendered.get_pixel(225, 0), &Rgb([255, 0, 0]));

        fs::remove_dir_all(dir).unwrap();
    }
}
