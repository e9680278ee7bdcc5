//! Error type for everything that crosses the crate boundary.
//!
//! Only malformed external input ends up here. Broken engine invariants
//! panic instead, since they mean a bug in the operators.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TspError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("point set is empty")]
    EmptyPointSet,
    #[error("point {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid coordinate {value:?} in record {record}")]
    InvalidCoordinate { record: usize, value: String },
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot enumerate {0} points exhaustively (limit is {1})")]
    TooLarge(usize, usize),
}

impl TspError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TspError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TspError>;
