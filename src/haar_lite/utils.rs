use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::types::LumaImage;
use image::RgbImage;
use ndarray::Array2;
use std::path::Path;

/// Luminance weights applied to (R, G, B).
pub const RGB_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Weighted grayscale conversion on the 0..255 scale.
pub fn rgb_to_luma(image: &RgbImage) -> LumaImage {
    let (width, height) = image.dimensions();
    let [wr, wg, wb] = RGB_WEIGHTS;

    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
        r as f64 * wr + g as f64 * wg + b as f64 * wb
    })
}

/// Open an image file as 8-bit RGB. Grayscale and alpha images are expanded.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| HaarError::MissingOrUnreadableImage {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgb8())
}

pub fn load_luma(path: &Path) -> Result<LumaImage> {
    load_rgb(path).map(|rgb| rgb_to_luma(&rgb))
}
