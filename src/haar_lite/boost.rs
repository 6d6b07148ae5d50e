//! Feature voting.
//!
//! The mean of every (window, feature) value is taken over the corpus, then each
//! image votes for the features on which it lies close to that mean. Stable
//! features collect many votes and are kept for classification.
use crate::haar_lite::config::DetectorConfig;
use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::features::FeatureKind;
use crate::haar_lite::rect;
use crate::haar_lite::types::{FeatureValue, ImageFeatureData, MeanTable, VoteTable, WindowFeatureSet, NUM_WINDOWS};
use log::{info, warn};
use ndarray::Zip;
use rayon::prelude::*;

/// Images summed per worker before the partial sums are merged in order.
const ACCUMULATE_CHUNK: usize = 8;

/// Running elementwise sum of feature data.
///
/// Partial accumulators built on separate workers merge by elementwise
/// addition. Every added image must have the same feature shapes as the first.
#[derive(Debug, Clone, Default)]
pub struct MeanAccumulator {
    sums: Option<Vec<WindowFeatureSet>>,
    count: usize,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn add(mut self, data: &ImageFeatureData) -> Result<Self> {
        match self.sums.as_mut() {
            Some(sums) => add_windows(sums, data.windows())?,
            None => self.sums = Some(data.windows().to_vec()),
        }
        self.count += 1;
        Ok(self)
    }

    pub fn merge(mut self, other: MeanAccumulator) -> Result<Self> {
        if let Some(other_sums) = other.sums {
            match self.sums.as_mut() {
                Some(sums) => add_windows(sums, &other_sums)?,
                None => self.sums = Some(other_sums),
            }
        }
        self.count += other.count;
        Ok(self)
    }

    pub fn finish(self) -> Result<MeanTable> {
        let mut sums = self.sums.ok_or(HaarError::EmptyCorpus)?;
        let n = self.count as f64;
        for window in sums.iter_mut() {
            for kind in FeatureKind::ALL {
                *window.get_mut(kind) /= n;
            }
        }
        Ok(MeanTable::new(sums))
    }
}

fn add_windows(sums: &mut [WindowFeatureSet], other: &[WindowFeatureSet]) -> Result<()> {
    for (window, (sum, add)) in sums.iter_mut().zip(other).enumerate() {
        for kind in FeatureKind::ALL {
            let sum = sum.get_mut(kind);
            let add = add.get(kind);
            if sum.dim() != add.dim() {
                return Err(HaarError::ShapeMismatch {
                    window,
                    feature: kind.index(),
                    expected: sum.dim(),
                    found: add.dim(),
                });
            }
            *sum += add;
        }
    }
    Ok(())
}

/// Elementwise mean of every (window, feature) value across the corpus.
pub fn mean_table(corpus: &[ImageFeatureData]) -> Result<MeanTable> {
    if corpus.is_empty() {
        return Err(HaarError::EmptyCorpus);
    }

    let partials = corpus
        .par_chunks(ACCUMULATE_CHUNK)
        .map(|chunk| chunk.iter().try_fold(MeanAccumulator::new(), |acc, data| acc.add(data)))
        .collect::<Result<Vec<_>>>()?;

    partials
        .into_iter()
        .try_fold(MeanAccumulator::new(), |acc, partial| acc.merge(partial))?
        .finish()
}

/// Cells of the aligned `value`/`mean` pair whose absolute difference is below `threshold`.
pub fn count_close(value: &FeatureValue, mean: &FeatureValue, threshold: f64) -> usize {
    let (value, mean) = rect::align(value.view(), mean.view());
    Zip::from(value)
        .and(mean)
        .fold(0, |acc, &v, &m| if (v - m).abs() < threshold { acc + 1 } else { acc })
}

/// True when enough cells of `value` sit close to `mean` to reach the quorum.
pub fn matches_mean(value: &FeatureValue, mean: &FeatureValue, config: &DetectorConfig) -> bool {
    let compared = value.nrows().min(mean.nrows()) * value.ncols().min(mean.ncols());
    count_close(value, mean, config.closeness_threshold) >= config.quorum.required(compared)
}

fn image_votes(data: &ImageFeatureData, means: &MeanTable, config: &DetectorConfig) -> VoteTable {
    let mut votes = VoteTable::zeros();
    for window in 0..NUM_WINDOWS {
        for kind in FeatureKind::ALL {
            if matches_mean(data.get(window, kind), means.get(window, kind), config) {
                votes.increment(window, kind);
            }
        }
    }
    votes
}

/// One vote per image for every feature on which it matches the mean.
pub fn vote(corpus: &[ImageFeatureData], means: &MeanTable, config: &DetectorConfig) -> VoteTable {
    corpus
        .par_iter()
        .map(|data| image_votes(data, means, config))
        .reduce(VoteTable::zeros, |a, b| a.merge(&b))
}

/// Compute the mean table, then the vote table, over `corpus`.
pub fn boost(corpus: &[ImageFeatureData], config: &DetectorConfig) -> Result<(VoteTable, MeanTable)> {
    let means = mean_table(corpus)?;

    let unreachable = (0..NUM_WINDOWS)
        .flat_map(|window| FeatureKind::ALL.map(|kind| (window, kind)))
        .filter(|&(window, kind)| {
            let len = means.get(window, kind).len();
            len < config.quorum.required(len)
        })
        .count();
    if unreachable > 0 {
        warn!("{unreachable} features are smaller than the vote quorum and can never collect votes");
    }

    let votes = vote(corpus, &means, config);
    info!("boosted {} training images", corpus.len());

    Ok((votes, means))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haar_lite::config::Quorum;
    use crate::haar_lite::scan::scan;
    use ndarray::Array2;

    fn small_config(quorum: usize) -> DetectorConfig {
        DetectorConfig {
            tile_size: 50,
            quorum: Quorum::Absolute(quorum),
            ..Default::default()
        }
    }

    fn pattern(seed: usize, size: usize) -> ImageFeatureData {
        let image = Array2::from_shape_fn((size, size), |(r, c)| ((r * 31 + c * 17 + seed * 53) % 97) as f64);
        scan(image.view(), size).unwrap()
    }

    #[test]
    fn test_mean_is_elementwise_average() {
        let corpus: Vec<_> = (0..11).map(|seed| pattern(seed, 50)).collect();
        let means = mean_table(&corpus).unwrap();

        for window in [0, 7, 24] {
            for kind in FeatureKind::ALL {
                let mut expected = Array2::<f64>::zeros(corpus[0].get(window, kind).dim());
                for data in &corpus {
                    expected += data.get(window, kind);
                }
                expected /= corpus.len() as f64;
                let mean = means.get(window, kind);
                assert_eq!(mean.dim(), expected.dim());
                assert!(mean.iter().zip(expected.iter()).all(|(a, b)| (a - b).abs() < 1e-3));
            }
        }
    }

    #[test]
    fn test_empty_corpus() {
        assert!(matches!(boost(&[], &DetectorConfig::default()), Err(HaarError::EmptyCorpus)));
        assert!(matches!(MeanAccumulator::new().finish(), Err(HaarError::EmptyCorpus)));
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let corpus = vec![pattern(0, 50), pattern(1, 25)];
        assert!(matches!(
            boost(&corpus, &small_config(10)),
            Err(HaarError::ShapeMismatch { window: 0, feature: 0, .. })
        ));
    }

    #[test]
    fn test_merge_matches_sequential_add() {
        let corpus: Vec<_> = (0..4).map(|seed| pattern(seed, 25)).collect();
        let left = MeanAccumulator::new().add(&corpus[0]).unwrap().add(&corpus[1]).unwrap();
        let right = MeanAccumulator::new().add(&corpus[2]).unwrap().add(&corpus[3]).unwrap();
        let merged = left.merge(right).unwrap();
        assert_eq!(merged.count(), 4);

        let sequential = corpus
            .iter()
            .try_fold(MeanAccumulator::new(), |acc, data| acc.add(data))
            .unwrap();
        assert_eq!(merged.finish().unwrap(), sequential.finish().unwrap());
    }

    #[test]
    fn test_count_close_strict_threshold() {
        let value = Array2::from_shape_vec((1, 4), vec![0.0f64, 9.9, 10.0, -9.0]).unwrap();
        let mean = Array2::<f64>::zeros((1, 4));
        assert_eq!(count_close(&value, &mean, 10.0), 3);
        assert_eq!(count_close(&Array2::zeros((0, 4)), &mean, 10.0), 0);
    }

    #[test]
    fn test_lower_quorum_never_loses_votes() {
        let corpus: Vec<_> = (0..6).map(|seed| pattern(seed, 50)).collect();
        let (strict, _) = boost(&corpus, &small_config(40)).unwrap();
        let (loose, _) = boost(&corpus, &small_config(10)).unwrap();
        for window in 0..NUM_WINDOWS {
            for kind in FeatureKind::ALL {
                assert!(loose.get(window, kind) >= strict.get(window, kind));
            }
        }
    }

    #[test]
    fn test_uniform_corpus_votes_everywhere() {
        let image = Array2::from_elem((225, 225), 128.0f64);
        let data = scan(image.view(), 225).unwrap();
        let corpus = vec![data.clone(), data];

        let (votes, means) = boost(&corpus, &DetectorConfig::default()).unwrap();
        for window in 0..NUM_WINDOWS {
            for kind in FeatureKind::ALL {
                assert_eq!(votes.get(window, kind), 2);
                // two outer thirds against one middle third leave one gray level
                let expected = match kind {
                    FeatureKind::HorizontalMiddle | FeatureKind::VerticalMiddle => 128.0,
                    _ => 0.0,
                };
                assert!(means.get(window, kind).iter().all(|&v| v == expected), "{kind}");
            }
        }
    }
}
