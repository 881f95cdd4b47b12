//! Model loader port: turns an artifact on disk into a [`Classifier`].

use std::path::{Path, PathBuf};

use crate::domain::DiseaseId;

use super::Classifier;

/// Fatal error while building the model registry.
#[derive(Debug, thiserror::Error)]
pub enum StartupLoadError {
    #[error("Model artifact for {disease} not found at {path:?}")]
    Missing { disease: DiseaseId, path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt model artifact {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Model for {disease} does not match its input schema: {reason}")]
    SchemaMismatch { disease: DiseaseId, reason: String },

    #[error("Integrity check failed for {path:?}: {reason}")]
    Integrity { path: PathBuf, reason: String },
}

/// Trait for deserializing classifier artifacts.
pub trait ModelLoader {
    /// Load the artifact at `path`, given its raw bytes.
    ///
    /// The registry reads the file itself (so integrity checks see the same
    /// bytes that are parsed) and passes them in.
    ///
    /// # Errors
    /// Returns `StartupLoadError::Corrupt` if the bytes are not a usable model.
    fn load(&self, path: &Path, bytes: &[u8]) -> Result<Box<dyn Classifier>, StartupLoadError>;
}
