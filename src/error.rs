//! Typed errors for the library layer.
//!
//! "No data" is never an error here: empty logs and profiles are ordinary
//! results. These variants cover fatal I/O and bad input only.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode message record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid {kind} name: {value:?}")]
    InvalidName { kind: &'static str, value: String },
}

impl LogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("stopword list not found at {0}")]
    StopwordsNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon file {path}: {message}")]
    Lexicon { path: PathBuf, message: String },

    #[error(transparent)]
    Log(#[from] LogError),
}

pub type LogResult<T> = std::result::Result<T, LogError>;
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
