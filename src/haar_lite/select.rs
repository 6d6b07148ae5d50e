use crate::haar_lite::features::FeatureKind;
use crate::haar_lite::types::{VoteTable, NUM_WINDOWS};
use log::{info, warn};
use serde::Serialize;

/// Features kept per window after thresholding the votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionMap {
    windows: Vec<Vec<FeatureKind>>,
    total: usize,
}

impl SelectionMap {
    pub fn window(&self, window: usize) -> &[FeatureKind] {
        &self.windows[window]
    }

    /// `(window, features)` for every window with at least one selected feature.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[FeatureKind])> {
        self.windows
            .iter()
            .enumerate()
            .filter(|(_, kinds)| !kinds.is_empty())
            .map(|(window, kinds)| (window, kinds.as_slice()))
    }

    /// Number of selected (window, feature) pairs.
    pub fn total_selected(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Keep, per window, the features with strictly more than `threshold` votes.
pub fn select_features(votes: &VoteTable, threshold: usize) -> SelectionMap {
    let windows: Vec<Vec<FeatureKind>> = (0..NUM_WINDOWS)
        .map(|window| {
            FeatureKind::ALL
                .into_iter()
                .filter(|&kind| votes.get(window, kind) > threshold)
                .collect()
        })
        .collect();
    let total = windows.iter().map(Vec::len).sum();

    if total == 0 {
        warn!("no feature has more than {threshold} votes");
    } else {
        info!("selected {total} features with more than {threshold} votes");
    }

    SelectionMap { windows, total }
}
