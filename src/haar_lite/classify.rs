//! Tile classification and the non-overlapping sliding-window sweep.
use crate::haar_lite::boost::matches_mean;
use crate::haar_lite::config::DetectorConfig;
use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::scan::window_region;
use crate::haar_lite::select::SelectionMap;
use crate::haar_lite::types::{Detection, MeanTable};
use log::debug;
use ndarray::{s, ArrayView2};
use rayon::prelude::*;

/// Majority vote of the selected features on one tile.
///
/// Each selected feature is recomputed on its window and passes when it matches
/// the learned mean. The tile is a face when at least `total_selected / 2`
/// (floor) features pass. With nothing selected there is no evidence, and the
/// tile is never a face.
pub fn classify(
    tile: ArrayView2<f64>,
    selection: &SelectionMap,
    total_selected: usize,
    means: &MeanTable,
    config: &DetectorConfig,
) -> Result<bool> {
    let (rows, cols) = tile.dim();
    if rows < config.tile_size || cols < config.tile_size {
        return Err(HaarError::TileTooSmall {
            rows,
            cols,
            tile_size: config.tile_size,
        });
    }
    if total_selected == 0 {
        return Ok(false);
    }

    let window_size = config.window_size();
    let mut passed = 0;
    for (window, kinds) in selection.iter() {
        let region = window_region(window, window_size);
        for &kind in kinds {
            let value = kind.extract(tile, region);
            if matches_mean(&value, means.get(window, kind), config) {
                passed += 1;
            }
        }
    }

    Ok(passed >= total_selected / 2)
}

/// Tile origins visited by the sweep, in raster order. Tiles that would cross
/// the image border are skipped.
pub fn tile_origins(rows: usize, cols: usize, tile_size: usize) -> Vec<(usize, usize)> {
    if tile_size == 0 || rows < tile_size || cols < tile_size {
        return Vec::new();
    }
    let row_starts = (0..=rows - tile_size).step_by(tile_size);
    row_starts
        .flat_map(|row| (0..=cols - tile_size).step_by(tile_size).map(move |col| (row, col)))
        .collect()
}

/// Classify every whole tile of `image` and report the positive ones in raster order.
pub fn detect(
    image: ArrayView2<f64>,
    selection: &SelectionMap,
    total_selected: usize,
    means: &MeanTable,
    config: &DetectorConfig,
) -> Result<Vec<Detection>> {
    let size = config.tile_size;
    let (rows, cols) = image.dim();

    let hits = tile_origins(rows, cols, size)
        .into_par_iter()
        .map(|(row, col)| -> Result<Option<Detection>> {
            let tile = image.slice(s![row..row + size, col..col + size]);
            let face = classify(tile, selection, total_selected, means, config)?;
            debug!("tile ({row}, {col}) face={face}");
            Ok(face.then_some(Detection::new(row, col, size)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(hits.into_iter().flatten().collect())
}

/// A trained detector: the selected features and their learned means.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    selection: SelectionMap,
    means: MeanTable,
}

impl Detector {
    /// Fails with [`HaarError::DegenerateSelection`] when no feature was selected,
    /// since such a detector could never report a face.
    pub fn new(config: DetectorConfig, selection: SelectionMap, means: MeanTable) -> Result<Self> {
        if selection.is_empty() {
            return Err(HaarError::DegenerateSelection);
        }
        Ok(Self {
            config,
            selection,
            means,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionMap {
        &self.selection
    }

    pub fn means(&self) -> &MeanTable {
        &self.means
    }

    pub fn classify_tile(&self, tile: ArrayView2<f64>) -> Result<bool> {
        classify(tile, &self.selection, self.selection.total_selected(), &self.means, &self.config)
    }

    pub fn detect(&self, image: ArrayView2<f64>) -> Result<Vec<Detection>> {
        detect(image, &self.selection, self.selection.total_selected(), &self.means, &self.config)
    }
}
