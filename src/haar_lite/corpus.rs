//! Training corpus enumeration and scanning.
//!
//! Every training image is loaded, converted to luminance and scanned as one
//! tile. Any image that cannot be read or is smaller than the tile aborts the
//! whole scan; a partial corpus is never returned.
use crate::haar_lite::config::DetectorConfig;
use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::scan::scan;
use crate::haar_lite::types::{Corpus, ImageFeatureData, LumaImage};
use crate::haar_lite::utils::load_luma;
use log::{debug, info};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Where the labeled face images come from.
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// `dir/{prefix}1.{extension}` through `dir/{prefix}{count}.{extension}`.
    Numbered {
        dir: PathBuf,
        prefix: String,
        count: usize,
        extension: String,
    },
    /// Every supported image file in a directory, sorted by file name.
    Directory(PathBuf),
    /// An explicit ordered list.
    Paths(Vec<PathBuf>),
}

impl CorpusSource {
    /// `dir/face1.jpg .. dir/face{count}.jpg`.
    pub fn faces(dir: impl Into<PathBuf>, count: usize) -> Self {
        CorpusSource::Numbered {
            dir: dir.into(),
            prefix: "face".to_string(),
            count,
            extension: "jpg".to_string(),
        }
    }

    pub fn paths(&self) -> Result<Vec<PathBuf>> {
        match self {
            CorpusSource::Numbered {
                dir,
                prefix,
                count,
                extension,
            } => Ok((1..=*count)
                .map(|i| dir.join(format!("{prefix}{i}.{extension}")))
                .collect()),
            CorpusSource::Directory(dir) => {
                let mut paths = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if is_supported_image(&path) {
                        paths.push(path);
                    }
                }
                paths.sort();
                Ok(paths)
            }
            CorpusSource::Paths(paths) => Ok(paths.clone()),
        }
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Scan an already-converted luminance image as one training tile.
pub fn scan_luma(image: &LumaImage, path: &Path, config: &DetectorConfig) -> Result<ImageFeatureData> {
    let (height, width) = image.dim();
    if height < config.tile_size || width < config.tile_size {
        return Err(HaarError::ImageTooSmall {
            path: path.to_path_buf(),
            width,
            height,
            tile_size: config.tile_size,
        });
    }
    scan(image.view(), config.tile_size)
}

pub fn scan_image(path: &Path, config: &DetectorConfig) -> Result<ImageFeatureData> {
    debug!("Scanning image: {}", path.display());
    let image = load_luma(path)?;
    scan_luma(&image, path, config)
}

/// Scan every image, in parallel, keeping input order.
pub fn scan_images(paths: &[PathBuf], config: &DetectorConfig) -> Result<Corpus> {
    let corpus = paths
        .par_iter()
        .map(|path| scan_image(path, config))
        .collect::<Result<Corpus>>()?;

    info!("scanned {} training images", corpus.len());
    Ok(corpus)
}

pub fn scan_corpus(source: &CorpusSource, config: &DetectorConfig) -> Result<Corpus> {
    let paths = source.paths()?;
    scan_images(&paths, config)
}
