use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HaarError {
    #[error("cannot read image {}: {reason}", path.display())]
    MissingOrUnreadableImage { path: PathBuf, reason: String },

    #[error("image {} is {width}x{height}, smaller than the {tile_size}x{tile_size} tile", path.display())]
    ImageTooSmall {
        path: PathBuf,
        width: usize,
        height: usize,
        tile_size: usize,
    },

    #[error("tile is {rows}x{cols}, smaller than the {tile_size}x{tile_size} tile size")]
    TileTooSmall { rows: usize, cols: usize, tile_size: usize },

    #[error("feature shape mismatch at window {window}, feature {feature}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        window: usize,
        feature: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("boosting needs at least one training image")]
    EmptyCorpus,

    #[error("no feature passed the selection threshold")]
    DegenerateSelection,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HaarError>;
