//! # medscreen
//!
//! Terminal disease-screening form backed by pre-trained binary classifiers.
//!
//! The user picks one of five conditions, fills in that condition's numeric
//! fields and triggers an evaluation; the matching classifier returns 0 or 1,
//! which is shown as a fixed verdict sentence.
//!
//! ## Architecture
//!
//! - `domain`: disease catalogue, input buffers, feature vectors, diagnoses
//! - `ports`: the `Classifier` and `ModelLoader` traits
//! - `adapters`: JSON linear-model loader, artifact manifest, log sanitizer
//! - `application`: model registry and dispatcher
//! - `tui`: terminal user interface
//! - `config`: environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{DispatchError, Dispatcher, ModelRegistry};
pub use domain::{Diagnosis, DiseaseId, DiseaseSpec, Prediction};

/// Result type for medscreen operations
pub type Result<T> = std::result::Result<T, MedscreenError>;

/// Main error type for medscreen
#[derive(Debug, thiserror::Error)]
pub enum MedscreenError {
    #[error("Startup failed: {0}")]
    StartupLoad(#[from] ports::StartupLoadError),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}
