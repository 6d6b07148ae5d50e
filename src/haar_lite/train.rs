//! Scan, boost and select in one pass.
use crate::haar_lite::boost::boost;
use crate::haar_lite::classify::Detector;
use crate::haar_lite::config::DetectorConfig;
use crate::haar_lite::corpus::{scan_corpus, CorpusSource};
use crate::haar_lite::error::Result;
use crate::haar_lite::features::FeatureKind;
use crate::haar_lite::select::{select_features, SelectionMap};
use crate::haar_lite::types::{ImageFeatureData, MeanTable, VoteTable, NUM_FEATURES, NUM_WINDOWS};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

pub struct Trainer {
    config: DetectorConfig,
}

impl Trainer {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn train(&self, source: &CorpusSource) -> Result<TrainingOutcome> {
        let corpus = scan_corpus(source, &self.config)?;
        self.train_corpus(&corpus)
    }

    pub fn train_corpus(&self, corpus: &[ImageFeatureData]) -> Result<TrainingOutcome> {
        let (votes, means) = boost(corpus, &self.config)?;
        let selection = select_features(&votes, self.config.selection_threshold);

        Ok(TrainingOutcome {
            config: self.config.clone(),
            corpus_size: corpus.len(),
            votes,
            means,
            selection,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub config: DetectorConfig,
    pub corpus_size: usize,
    pub votes: VoteTable,
    pub means: MeanTable,
    pub selection: SelectionMap,
}

impl TrainingOutcome {
    pub fn report(&self) -> TrainingReport {
        let windows = (0..NUM_WINDOWS)
            .map(|window| WindowReport {
                window,
                votes: *self.votes.window(window),
                selected: self.selection.window(window).to_vec(),
            })
            .collect();

        TrainingReport {
            corpus_size: self.corpus_size,
            selection_threshold: self.config.selection_threshold,
            total_selected: self.selection.total_selected(),
            windows,
        }
    }

    pub fn into_detector(self) -> Result<Detector> {
        Detector::new(self.config, self.selection, self.means)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub window: usize,
    pub votes: [usize; NUM_FEATURES],
    pub selected: Vec<FeatureKind>,
}

/// Per-window vote counts and the resulting selection.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub corpus_size: usize,
    pub selection_threshold: usize,
    pub total_selected: usize,
    pub windows: Vec<WindowReport>,
}

impl TrainingReport {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for window in &self.windows {
            writeln!(f, "Votes for window {}:", window.window)?;
            for (feature, votes) in window.votes.iter().enumerate() {
                // features are numbered from 1 in the report
                writeln!(f, "Votes for feature {}: {}", feature + 1, votes)?;
            }
        }
        write!(
            f,
            "{} of {} features selected with more than {} votes from {} images",
            self.total_selected,
            NUM_WINDOWS * NUM_FEATURES,
            self.selection_threshold,
            self.corpus_size
        )
    }
}
