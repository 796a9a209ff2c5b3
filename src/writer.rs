//! Persists strategy outputs for offline diffing.
//!
//! The writer performs no parsing, diffing, or validation; it writes each
//! strategy's verbatim output text to a file keyed by strategy name,
//! overwriting any previous run's file at the same location. Comparing the
//! two files is an external step.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::request::Strategy;

/// Result type alias for writer operations
pub type WriteResult<T> = Result<T, WriteError>;

/// Errors from persisting benchmark outputs
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to write output {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes per-strategy output files under one directory.
pub struct ResultWriter {
    out_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Path the given strategy's output is written to.
    pub fn output_path(&self, strategy: Strategy) -> PathBuf {
        self.out_dir.join(format!("{}_output.txt", strategy))
    }

    /// Persist one strategy's output text verbatim.
    pub fn persist(&self, strategy: Strategy, output_text: &str) -> WriteResult<PathBuf> {
        fs::create_dir_all(&self.out_dir).map_err(|source| WriteError::Io {
            path: self.out_dir.clone(),
            source,
        })?;

        let path = self.output_path(strategy);
        fs::write(&path, output_text).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
