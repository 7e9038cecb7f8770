use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading embeddings or extracting features.
///
/// Every malformed-line error aborts the whole call; callers never see a
/// partially built table or a partially filled feature matrix.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("malformed embedding line {line} in {}: {reason}", path.display())]
    MalformedEmbeddingLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("malformed dataset line {line} in {}: missing tab between label and sentence", path.display())]
    MalformedDatasetLine { path: PathBuf, line: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("I/O failure reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FeatureError>;

impl FeatureError {
    /// Classify an I/O error on `path`; a missing file gets its own kind.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FeatureError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FeatureError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read a whole text resource, mapping failures onto [`FeatureError`].
pub(crate) fn read_resource(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| FeatureError::from_io(path, e))
}
