//! Elementwise arithmetic on rectangles that may differ by the odd row or
//! column left over when a side is split at its midpoint.
//!
//! Both operands are truncated to their common top-left `min(rows) x min(cols)`
//! block before combining. Nothing is resampled; the surplus rows and columns
//! of the larger operand are dropped. If the common block has no rows or no
//! columns the result is an empty array.
use crate::haar_lite::types::FeatureValue;
use ndarray::{s, ArrayView2};

/// Truncate `white` and `black` to their shared top-left block.
///
/// Returns the inputs unchanged when their shapes already agree.
pub fn align<'a>(white: ArrayView2<'a, f64>, black: ArrayView2<'a, f64>) -> (ArrayView2<'a, f64>, ArrayView2<'a, f64>) {
    let rows = white.nrows().min(black.nrows());
    let cols = white.ncols().min(black.ncols());

    (white.slice_move(s![..rows, ..cols]), black.slice_move(s![..rows, ..cols]))
}

/// `white - black` over the aligned block.
pub fn subtract<'a>(white: ArrayView2<'a, f64>, black: ArrayView2<'a, f64>) -> FeatureValue {
    let (white, black) = align(white, black);
    &white - &black
}

/// `a + b` over the aligned block.
pub fn add<'a>(a: ArrayView2<'a, f64>, b: ArrayView2<'a, f64>) -> FeatureValue {
    let (a, b) = align(a, b);
    &a + &b
}
