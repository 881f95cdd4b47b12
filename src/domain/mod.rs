//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the disease catalogue, input buffers, feature
//! vectors and diagnosis results.

pub mod disease;
mod diagnosis;
mod features;

pub use diagnosis::{Diagnosis, Prediction};
pub use disease::{DiseaseId, DiseaseSpec, FieldSpec, UnknownDisease};
pub use features::{FeatureVector, FieldInput, FieldValues, ValidationError};
