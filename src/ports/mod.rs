//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundary between the dispatch logic and the
//! pre-trained models it calls.

mod classifier;
mod model_loader;

pub use classifier::{Classifier, InferenceError};
pub use model_loader::{ModelLoader, StartupLoadError};
