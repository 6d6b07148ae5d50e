use crate::haar_lite::types::Detection;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
}

/// Outline of each detected tile, in pixel coordinates.
pub fn detections_to_rects(detections: &[Detection]) -> Vec<Rect> {
    detections
        .iter()
        .map(|detection| {
            let bbox = detection.bbox();
            Rect::at(bbox.xmin as i32, bbox.ymin as i32).of_size(bbox.width() as u32, bbox.height() as u32)
        })
        .collect()
}

/// Draw a `thickness`-pixel outline around every detection on an RGB copy of `image`.
pub fn render_detections(
    image: &DynamicImage,
    detections: &[Detection],
    color: Color,
    thickness: u32,
) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let pixel = color.to_rgb();

    for rect in detections_to_rects(detections) {
        for inset in 0..thickness {
            if rect.width() <= 2 * inset || rect.height() <= 2 * inset {
                break;
            }
            let inner = Rect::at(rect.left() + inset as i32, rect.top() + inset as i32)
                .of_size(rect.width() - 2 * inset, rect.height() - 2 * inset);
            draw_hollow_rect_mut(&mut canvas, inner, pixel);
        }
    }

    canvas
}

pub fn save_detections(
    image: &DynamicImage,
    detections: &[Detection],
    color: Color,
    thickness: u32,
    path: &Path,
) -> anyhow::Result<()> {
    render_detections(image, detections, color, thickness).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_outline() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(60, 40, Rgb([10, 10, 10])));
        let detections = [Detection::new(5, 20, 30)];
        let out = render_detections(&image, &detections, Colors::GREEN, 2);

        assert_eq!(out.dimensions(), (60, 40));
        // outer and second ring
        assert_eq!(out.get_pixel(20, 5), &Rgb([0, 255, 0]));
        assert_eq!(out.get_pixel(49, 34), &Rgb([0, 255, 0]));
        assert_eq!(out.get_pixel(21, 6), &Rgb([0, 255, 0]));
        // interior and outside untouched
        assert_eq!(out.get_pixel(30, 20), &Rgb([10, 10, 10]));
        assert_eq!(out.get_pixel(0, 0), &Rgb([10, 10, 10]));
    }

    #[test]
    fn test_detections_to_rects() {
        let rects = detections_to_rects(&[Detection::new(225, 450, 225)]);
        assert_eq!(rects[0].left(), 450);
        assert_eq!(rects[0].top(), 225);
        assert_eq!(rects[0].width(), 225);
    }
}
