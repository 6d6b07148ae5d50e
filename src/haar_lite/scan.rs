use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::features::FeatureKind;
use crate::haar_lite::types::{ImageFeatureData, Region, WindowFeatureSet, GRID_SIZE, NUM_WINDOWS};
use ndarray::ArrayView2;

/// Window `index` (row-major over the 5x5 grid) of a tile with `window_size` windows.
pub fn window_region(index: usize, window_size: usize) -> Region {
    debug_assert!(index < NUM_WINDOWS);
    let row = index / GRID_SIZE;
    let col = index % GRID_SIZE;

    Region::new(
        row * window_size,
        (row + 1) * window_size,
        col * window_size,
        (col + 1) * window_size,
    )
}

/// Evaluate all five features on one window.
pub fn scan_window(image: ArrayView2<f64>, region: Region) -> WindowFeatureSet {
    WindowFeatureSet::new(FeatureKind::ALL.map(|kind| kind.extract(image, region)))
}

/// Scan the top-left `size x size` tile of `image` as a 5x5 grid of windows.
///
/// Windows are `size / 5` pixels wide, so when `size` is not a multiple of 5 the
/// trailing rows and columns of the tile fall outside every window.
pub fn scan(image: ArrayView2<f64>, size: usize) -> Result<ImageFeatureData> {
    let (rows, cols) = image.dim();
    if rows < size || cols < size {
        return Err(HaarError::TileTooSmall {
            rows,
            cols,
            tile_size: size,
        });
    }

    let window_size = size / GRID_SIZE;
    let windows = (0..NUM_WINDOWS)
        .map(|index| scan_window(image, window_region(index, window_size)))
        .collect();

    Ok(ImageFeatureData::new(windows))
}
