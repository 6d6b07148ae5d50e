//! The five Haar-like rectangle features.
//!
//! Each feature splits a region into "white" and "black" parts and returns the
//! elementwise `white - black` residual. Midpoints and thirds use floor
//! division relative to the region start, so odd extents leave the extra row or
//! column on the second half and thirds drop a remainder of up to two rows or
//! columns at the far edge.
use crate::haar_lite::rect;
use crate::haar_lite::types::{FeatureValue, Region};
use ndarray::{s, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Top half minus bottom half.
    LeftRight = 0,
    /// Left half minus right half.
    TopBottom = 1,
    /// Outer row thirds minus the middle row third.
    HorizontalMiddle = 2,
    /// Outer column thirds minus the middle column third.
    VerticalMiddle = 3,
    /// Main-diagonal quadrants minus anti-diagonal quadrants.
    Diagonal = 4,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::LeftRight,
        FeatureKind::TopBottom,
        FeatureKind::HorizontalMiddle,
        FeatureKind::VerticalMiddle,
        FeatureKind::Diagonal,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<FeatureKind> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            FeatureKind::LeftRight => "left-right",
            FeatureKind::TopBottom => "top-bottom",
            FeatureKind::HorizontalMiddle => "horizontal-middle",
            FeatureKind::VerticalMiddle => "vertical-middle",
            FeatureKind::Diagonal => "diagonal",
        }
    }

    /// Evaluate this feature on `region` of `image`.
    ///
    /// `region` must lie inside `image`.
    pub fn extract(self, image: ArrayView2<f64>, region: Region) -> FeatureValue {
        match self {
            FeatureKind::LeftRight => left_right(image, region),
            FeatureKind::TopBottom => top_bottom(image, region),
            FeatureKind::HorizontalMiddle => horizontal_middle(image, region),
            FeatureKind::VerticalMiddle => vertical_middle(image, region),
            FeatureKind::Diagonal => diagonal(image, region),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn row_midpoint(region: &Region) -> usize {
    region.start_row + region.rows() / 2
}

fn col_midpoint(region: &Region) -> usize {
    region.start_col + region.cols() / 2
}

pub fn left_right(image: ArrayView2<f64>, region: Region) -> FeatureValue {
    let Region {
        start_row,
        end_row,
        start_col,
        end_col,
    } = region;
    let mid = row_midpoint(&region);

    let white = image.slice(s![start_row..mid, start_col..end_col]);
    let black = image.slice(s![mid..end_row, start_col..end_col]);

    rect::subtract(white, black)
}

pub fn top_bottom(image: ArrayView2<f64>, region: Region) -> FeatureValue {
    let Region {
        start_row,
        end_row,
        start_col,
        end_col,
    } = region;
    let mid = col_midpoint(&region);

    let white = image.slice(s![start_row..end_row, start_col..mid]);
    let black = image.slice(s![start_row..end_row, mid..end_col]);

    rect::subtract(white, black)
}

pub fn horizontal_middle(image: ArrayView2<f64>, region: Region) -> FeatureValue {
    let Region {
        start_row,
        start_col,
        end_col,
        ..
    } = region;
    let third = region.rows() / 3;
    let first = start_row + third;
    let second = first + third;

    let white_top = image.slice(s![start_row..first, start_col..end_col]);
    let black = image.slice(s![first..second, start_col..end_col]);
    let white_bottom = image.slice(s![second..second + third, start_col..end_col]);

    let white = rect::add(white_top, white_bottom);
    rect::subtract(white.view(), black)
}

pub fn vertical_middle(image: ArrayView2<f64>, region: Region) -> FeatureValue {
    let Region {
        start_row,
        end_row,
        start_col,
        ..
    } = region;
    let third = region.cols() / 3;
    let first = start_col + third;
    let second = first + third;

    let white_left = image.slice(s![start_row..end_row, start_col..first]);
    let black = image.slice(s![start_row..end_row, first..second]);
    let white_right = image.slice(s![start_row..end_row, second..second + third]);

    let white = rect::add(white_left, white_right);
    rect::subtract(white.view(), black)
}

pub fn diagonal(image: ArrayView2<f64>, region: Region) -> FeatureValue {
    let Region {
        start_row,
        end_row,
        start_col,
        end_col,
    } = region;
    let mid_row = row_midpoint(&region);
    let mid_col = col_midpoint(&region);

    let top_left = image.slice(s![start_row..mid_row, start_col..mid_col]);
    let bottom_left = image.slice(s![mid_row..end_row, start_col..mid_col]);
    let top_right = image.slice(s![start_row..mid_row, mid_col..end_col]);
    let bottom_right = image.slice(s![mid_row..end_row, mid_col..end_col]);

    let white = rect::add(top_left, bottom_right);
    let black = rect::add(bottom_left, top_right);
    rect::subtract(white.view(), black.view())
}
