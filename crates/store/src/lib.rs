//! High-score file storage.
//!
//! The high score is one decimal integer in a text file. Reading takes the
//! last non-empty line; writing truncates and replaces the whole file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use tui_birb_core::ScoreStore;

pub use tui_birb_core as core;

/// Default file name, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "score.txt";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read high score from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold a number: {value:?}")]
    Parse { path: PathBuf, value: String },
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// High score kept in a plain text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    type Error = PersistenceError;

    fn load(&mut self) -> Result<Option<u32>, Self::Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score file yet");
                return Ok(None);
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        parse_score(&text)
            .map(Some)
            .ok_or_else(|| PersistenceError::Parse {
                path: self.path.clone(),
                value: text.trim().to_string(),
            })
    }

    fn store(&mut self, high_score: u32) -> Result<(), Self::Error> {
        fs::write(&self.path, high_score.to_string()).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Parse the last non-empty line as a decimal score
pub fn parse_score(text: &str) -> Option<u32> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .and_then(|line| line.parse().ok())
}
