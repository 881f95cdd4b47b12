//! Adapters layer: Concrete implementations of ports.
//!
//! - `linear`: JSON-exported logistic regression / linear SVM classifiers
//! - `manifest`: SHA-256 integrity manifest for model artifacts
//! - `sanitize`: redaction of clinical values in logs

pub mod linear;
pub mod manifest;
pub mod sanitize;
