use crate::haar_lite::features::FeatureKind;
use ndarray::Array2;
use serde::Serialize;

/// Windows per tile side.
pub const GRID_SIZE: usize = 5;

/// Windows per tile, in row-major order.
pub const NUM_WINDOWS: usize = GRID_SIZE * GRID_SIZE;

/// Haar-like feature kinds evaluated per window.
pub const NUM_FEATURES: usize = 5;

/// Grayscale luminance grid, indexed `[row, col]`.
pub type LumaImage = Array2<f64>;

/// Signed elementwise white-minus-black residual of one feature on one window.
/// May be empty when a split leaves one side without rows or columns.
pub type FeatureValue = Array2<f64>;

/// Half-open rectangle `[start_row, end_row) x [start_col, end_col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Region {
    pub fn new(start_row: usize, end_row: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start_row,
            end_row,
            start_col,
            end_col,
        }
    }

    pub fn rows(&self) -> usize {
        self.end_row.saturating_sub(self.start_row)
    }

    pub fn cols(&self) -> usize {
        self.end_col.saturating_sub(self.start_col)
    }
}

/// The five feature values of one window, indexed by [`FeatureKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFeatureSet {
    values: [FeatureValue; NUM_FEATURES],
}

impl WindowFeatureSet {
    pub fn new(values: [FeatureValue; NUM_FEATURES]) -> Self {
        Self { values }
    }

    pub fn get(&self, kind: FeatureKind) -> &FeatureValue {
        &self.values[kind.index()]
    }

    pub fn get_mut(&mut self, kind: FeatureKind) -> &mut FeatureValue {
        &mut self.values[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKind, &FeatureValue)> {
        FeatureKind::ALL.into_iter().zip(self.values.iter())
    }
}

/// Feature values for the 25 windows of one tile, in row-major window order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFeatureData {
    windows: Vec<WindowFeatureSet>,
}

impl ImageFeatureData {
    pub(crate) fn new(windows: Vec<WindowFeatureSet>) -> Self {
        debug_assert_eq!(windows.len(), NUM_WINDOWS);
        Self { windows }
    }

    pub fn windows(&self) -> &[WindowFeatureSet] {
        &self.windows
    }

    pub fn window(&self, index: usize) -> &WindowFeatureSet {
        &self.windows[index]
    }

    pub fn get(&self, window: usize, kind: FeatureKind) -> &FeatureValue {
        self.windows[window].get(kind)
    }
}

/// Feature data of every training image, in corpus order.
pub type Corpus = Vec<ImageFeatureData>;

/// Per (window, feature) count of training images that sat close to the mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteTable {
    votes: [[usize; NUM_FEATURES]; NUM_WINDOWS],
}

impl Default for VoteTable {
    fn default() -> Self {
        Self::zeros()
    }
}

impl VoteTable {
    pub fn zeros() -> Self {
        Self {
            votes: [[0; NUM_FEATURES]; NUM_WINDOWS],
        }
    }

    pub fn get(&self, window: usize, kind: FeatureKind) -> usize {
        self.votes[window][kind.index()]
    }

    pub fn increment(&mut self, window: usize, kind: FeatureKind) {
        self.votes[window][kind.index()] += 1;
    }

    /// Votes of one window, indexed by feature.
    pub fn window(&self, window: usize) -> &[usize; NUM_FEATURES] {
        &self.votes[window]
    }

    /// Elementwise sum, used to merge per-worker partial tables.
    pub fn merge(mut self, other: &VoteTable) -> Self {
        for (row, other_row) in self.votes.iter_mut().zip(other.votes.iter()) {
            for (v, o) in row.iter_mut().zip(other_row.iter()) {
                *v += o;
            }
        }
        self
    }
}

/// Mean feature value per (window, feature) across the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanTable {
    windows: Vec<WindowFeatureSet>,
}

impl MeanTable {
    pub(crate) fn new(windows: Vec<WindowFeatureSet>) -> Self {
        debug_assert_eq!(windows.len(), NUM_WINDOWS);
        Self { windows }
    }

    pub fn get(&self, window: usize, kind: FeatureKind) -> &FeatureValue {
        self.windows[window].get(kind)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBox {
    /// Create a new BBox
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    /// Calculate the width of the bounding box
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Calculate the height of the bounding box
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Top-left corner of a tile classified as a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub row: usize,
    pub col: usize,
    pub size: usize,
}

impl Detection {
    pub fn new(row: usize, col: usize, size: usize) -> Self {
        Self { row, col, size }
    }

    // Bounding box in pixel coordinates
    pub fn bbox(&self) -> BBox {
        let xmin = self.col as f64;
        let ymin = self.row as f64;
        BBox::new(xmin, ymin, xmin + self.size as f64, ymin + self.size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_table_merge() {
        let mut a = VoteTable::zeros();
        a.increment(3, FeatureKind::Diagonal);
        let mut b = VoteTable::zeros();
        b.increment(3, FeatureKind::Diagonal);
        b.increment(24, FeatureKind::LeftRight);

        let merged = a.merge(&b);
        assert_eq!(merged.get(3, FeatureKind::Diagonal), 2);
        assert_eq!(merged.get(24, FeatureKind::LeftRight), 1);
        assert_eq!(merged.get(0, FeatureKind::LeftRight), 0);
    }

    #[test]
    fn test_detection_bbox() {
        let bbox = Detection::new(450, 225, 225).bbox();
        assert_eq!(bbox.xmin, 225.0);
        assert_eq!(bbox.ymin, 450.0);
        assert_eq!(bbox.width(), 225.0);
        assert_eq!(bbox.height(), 225.0);
    }

    #[test]
    fn test_region_extent() {
        let region = Region::new(45, 90, 0, 45);
        assert_eq!(region.rows(), 45);
        assert_eq!(region.cols(), 45);
        assert_eq!(Region::new(5, 3, 0, 0).rows(), 0);
    }
}
