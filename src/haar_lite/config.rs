use crate::haar_lite::error::{HaarError, Result};
use crate::haar_lite::types::GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Side length of the square training tile.
pub const DEFAULT_TILE_SIZE: usize = 225;

/// A cell is "close" when its absolute distance to the mean is below this.
pub const DEFAULT_CLOSENESS_THRESHOLD: f64 = 10.0;

/// Close cells a feature needs before it counts as a match.
pub const DEFAULT_VOTE_QUORUM: usize = 300;

/// Votes a feature must exceed to be selected.
pub const DEFAULT_SELECTION_THRESHOLD: usize = 20;

/// How many close cells a compared feature value needs to count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quorum {
    /// A fixed number of cells, regardless of the feature value size.
    Absolute(usize),
    /// A fraction in (0, 1] of the cells of the compared feature value.
    Fraction(f64),
}

impl Default for Quorum {
    fn default() -> Self {
        Quorum::Absolute(DEFAULT_VOTE_QUORUM)
    }
}

impl Quorum {
    /// Number of close cells required for a feature value holding `len` cells.
    ///
    /// A fractional quorum never resolves to zero, so an empty feature value
    /// cannot match.
    pub fn required(&self, len: usize) -> usize {
        match *self {
            Quorum::Absolute(n) => n,
            Quorum::Fraction(f) => ((f * len as f64).ceil() as usize).max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub tile_size: usize,
    pub closeness_threshold: f64,
    pub quorum: Quorum,
    pub selection_threshold: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            closeness_threshold: DEFAULT_CLOSENESS_THRESHOLD,
            quorum: Quorum::default(),
            selection_threshold: DEFAULT_SELECTION_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Read a JSON config. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: DetectorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn window_size(&self) -> usize {
        self.tile_size / GRID_SIZE
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_size < GRID_SIZE || self.tile_size % GRID_SIZE != 0 {
            return Err(HaarError::InvalidConfig(format!(
                "tile_size {} must be a positive multiple of {GRID_SIZE}",
                self.tile_size
            )));
        }
        if self.closeness_threshold.is_nan() || self.closeness_threshold <= 0.0 {
            return Err(HaarError::InvalidConfig(format!(
                "closeness_threshold {} must be positive",
                self.closeness_threshold
            )));
        }
        match self.quorum {
            Quorum::Absolute(n) => {
                let max_cells = self.window_size() * self.window_size();
                if n > max_cells {
                    return Err(HaarError::InvalidConfig(format!(
                        "quorum {n} exceeds the {max_cells} cells of a {0}x{0} window",
                        self.window_size()
                    )));
                }
            }
            Quorum::Fraction(f) => {
                if f.is_nan() || f <= 0.0 || f > 1.0 {
                    return Err(HaarError::InvalidConfig(format!("quorum fraction {f} must lie in (0, 1]")));
                }
            }
        }
        Ok(())
    }
}
