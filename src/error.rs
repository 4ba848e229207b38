//! Error types for manifest generation

use std::path::PathBuf;

/// Errors raised while scanning, rendering, or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Data directory '{}' not found", path.display())]
    MissingInputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest '{}' does not exist", path.display())]
    MissingManifest { path: PathBuf },

    #[error("Manifest '{}' is out of date ({added} to add, {removed} to remove)", path.display())]
    Stale {
        path: PathBuf,
        added: usize,
        removed: usize,
    },

    #[error("Invalid config file '{}': {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },
}

impl ManifestError {
    /// True for the failures the user can fix by pointing at the right directory
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ManifestError::MissingInputDirectory { .. })
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
