//! Classifier port: the single inference capability the dispatcher needs.
//!
//! Implementations are loaded once at startup and only read afterwards.

use crate::domain::{DiseaseId, FeatureVector, Prediction};

/// Error raised by a classifier on a well-formed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("Classifier produced a non-finite decision value")]
    NonFinite,

    #[error("No classifier loaded for {0}")]
    ModelUnavailable(DiseaseId),

    #[error("Inference failed: {0}")]
    Failed(String),
}

/// Trait for a pre-trained binary classifier.
pub trait Classifier: Send + Sync {
    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Feature names in training order, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Predict the class of one input vector.
    ///
    /// # Errors
    /// Returns `InferenceError` if the vector does not fit the model or the
    /// model cannot produce a label.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError>;
}
