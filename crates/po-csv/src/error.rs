use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoCsvError {
    #[error("Invalid path: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Message id '{key}' from {} is not present in the translation table", path.display())]
    MissingKey { key: String, path: PathBuf },

    #[error("Path {} does not have the <locale>/<subdir>/<file> structure", path.display())]
    MalformedPath { path: PathBuf },

    #[error("Translation table has no '{column}' column")]
    MissingColumn { column: String },

    #[error("Failed to parse catalog {}: {message}", path.display())]
    CatalogParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl PoCsvError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        PoCsvError::InvalidArgument(message.into())
    }
}

/// Fail with [`PoCsvError::PathNotFound`] unless `path` exists.
pub(crate) fn ensure_exists(path: &std::path::Path) -> Result<(), PoCsvError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PoCsvError::PathNotFound {
            path: path.to_path_buf(),
        })
    }
}
