//! Source artifact loading.
//!
//! An artifact is an opaque text payload read from disk once per benchmark
//! run. Both strategies consume the same snapshot, so their inputs stay
//! provably identical; nothing re-reads a file mid-run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors from loading source artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The requested path does not exist on disk.
    #[error("Artifact not found at {path}")]
    NotFound { path: PathBuf },

    /// The path exists but could not be read as text.
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An immutable snapshot of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Short identifier, the file name portion of the source path.
    pub id: String,
    /// Full file contents at snapshot time.
    pub content: String,
}

impl Artifact {
    /// Load a single artifact from disk.
    pub fn load(path: &Path) -> ArtifactResult<Self> {
        if !path.exists() {
            return Err(ArtifactError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { id, content })
    }
}

/// Load an ordered set of artifacts, failing fast on the first missing path.
pub fn load_all(paths: &[PathBuf]) -> ArtifactResult<Vec<Artifact>> {
    paths.iter().map(|p| Artifact::load(p)).collect()
}
