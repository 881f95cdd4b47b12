//! Linear model adapter: JSON-exported logistic regression and linear SVM.
//!
//! The training pipeline exports each fitted estimator as a small JSON
//! document holding its coefficients, intercept and (optionally) the
//! standard scaler fitted in front of it. This adapter evaluates the same
//! decision function in plain `f64` arithmetic.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureVector, Prediction};
use crate::ports::{Classifier, InferenceError, ModelLoader, StartupLoadError};

fn default_threshold() -> f64 {
    0.5
}

/// Estimator family of an exported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// `p = sigmoid(w·x + b)`, positive when `p > threshold`
    LogisticRegression,
    /// positive when `w·x + b > 0`
    LinearSvm,
}

/// Standardization fitted before the estimator: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub kind: ModelKind,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExportedLinearModel {
    /// Sanity-check parameter shapes and values.
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err("model has no coefficients".into());
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != n {
            return Err(format!(
                "feature_names has {} entries but there are {n} coefficients",
                self.feature_names.len()
            ));
        }
        if self.coefficients.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err("coefficients and intercept must be finite".into());
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err("scaler parameter lengths do not match coefficient count".into());
            }
            if scaler
                .mean
                .iter()
                .chain(scaler.scale.iter())
                .any(|v| !v.is_finite())
            {
                return Err("scaler parameters must be finite".into());
            }
        }
        if self.kind == ModelKind::LogisticRegression && !(0.0..1.0).contains(&self.threshold) {
            return Err(format!("threshold {} outside [0, 1)", self.threshold));
        }
        Ok(())
    }

    /// Raw decision value `w·x' + b` where `x'` is the scaled input.
    fn decision_function(&self, x: &[f64]) -> f64 {
        let dot: f64 = match &self.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((xi, wi), (mu, sigma))| {
                    // Zero-variance columns are left unscaled.
                    let sigma = if *sigma == 0.0 { 1.0 } else { *sigma };
                    wi * (xi - mu) / sigma
                })
                .sum(),
            None => x.iter().zip(&self.coefficients).map(|(xi, wi)| xi * wi).sum(),
        };
        dot + self.intercept
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for ExportedLinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        if self.feature_names.is_empty() {
            None
        } else {
            Some(&self.feature_names)
        }
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let x = features.as_slice();
        if x.len() != self.n_features() {
            return Err(InferenceError::FeatureCountMismatch {
                expected: self.n_features(),
                got: x.len(),
            });
        }

        let z = self.decision_function(x);
        if !z.is_finite() {
            return Err(InferenceError::NonFinite);
        }

        let positive = match self.kind {
            ModelKind::LogisticRegression => Self::sigmoid(z) > self.threshold,
            ModelKind::LinearSvm => z > 0.0,
        };
        tracing::debug!(kind = ?self.kind, positive, "linear model evaluated");

        Ok(if positive {
            Prediction::Positive
        } else {
            Prediction::Negative
        })
    }
}

/// Loader for JSON-exported linear models.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearModelLoader;

impl LinearModelLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ModelLoader for LinearModelLoader {
    fn load(&self, path: &Path, bytes: &[u8]) -> Result<Box<dyn Classifier>, StartupLoadError> {
        let model: ExportedLinearModel =
            serde_json::from_slice(bytes).map_err(|e| StartupLoadError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        model.validate().map_err(|reason| StartupLoadError::Corrupt {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::info!(
            "Loaded {:?} model from {:?} (n_features={}, scaled={})",
            model.kind,
            path,
            model.n_features(),
            model.scaler.is_some()
        );
        Ok(Box::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svm(coefficients: Vec<f64>, intercept: f64) -> ExportedLinearModel {
        ExportedLinearModel {
            kind: ModelKind::LinearSvm,
            feature_names: Vec::new(),
            coefficients,
            intercept,
            scaler: None,
            threshold: 0.5,
            description: None,
        }
    }

    #[test]
    fn test_linear_svm_sign() {
        let model = svm(vec![1.0, -1.0], 0.0);
        let pos = model.predict(&vec![3.0, 1.0].into()).expect("predict");
        let neg = model.predict(&vec![1.0, 3.0].into()).expect("predict");
        assert_eq!(pos, Prediction::Positive);
        assert_eq!(neg, Prediction::Negative);
        // Decision value exactly zero is class 0.
        let tie = model.predict(&vec![2.0, 2.0].into()).expect("predict");
        assert_eq!(tie, Prediction::Negative);
    }

    #[test]
    fn test_logistic_threshold() {
        let mut model = svm(vec![1.0], 0.0);
        model.kind = ModelKind::LogisticRegression;
        // sigmoid(1) ~= 0.73
        assert_eq!(model.predict(&vec![1.0].into()), Ok(Prediction::Positive));
        model.threshold = 0.8;
        assert_eq!(model.predict(&vec![1.0].into()), Ok(Prediction::Negative));
    }

    #[test]
    fn test_scaler_applied() {
        let mut model = svm(vec![1.0], 0.0);
        model.scaler = Some(StandardScaler {
            mean: vec![100.0],
            scale: vec![10.0],
        });
        assert_eq!(model.predict(&vec![90.0].into()), Ok(Prediction::Negative));
        assert_eq!(model.predict(&vec![110.0].into()), Ok(Prediction::Positive));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = svm(vec![1.0, 1.0], 0.0);
        assert_eq!(
            model.predict(&vec![1.0].into()),
            Err(InferenceError::FeatureCountMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_non_finite_decision() {
        let model = svm(vec![1e308, 1e308], 0.0);
        assert_eq!(
            model.predict(&vec![1e308, 1e308].into()),
            Err(InferenceError::NonFinite)
        );
    }

    #[test]
    fn test_loader_rejects_corrupt_and_inconsistent() {
        let loader = LinearModelLoader::new();
        let path = Path::new("bad.json");

        let err = loader.load(path, b"not json").err().expect("should fail");
        assert!(matches!(err, StartupLoadError::Corrupt { .. }));

        let bad = br#"{"kind":"linear_svm","feature_names":["a"],"coefficients":[1.0,2.0],"intercept":0.0}"#;
        let err = loader.load(path, bad).err().expect("should fail");
        assert!(matches!(err, StartupLoadError::Corrupt { .. }));
    }

    #[test]
    fn test_loader_accepts_exported_json() {
        let json = br#"{
            "kind": "logistic_regression",
            "feature_names": ["x", "y"],
            "coefficients": [0.5, -0.25],
            "intercept": 0.1,
            "scaler": {"mean": [1.0, 2.0], "scale": [1.0, 0.0]}
        }"#;
        let model = LinearModelLoader::new()
            .load(Path::new("ok.json"), json)
            .expect("should load");
        assert_eq!(model.n_features(), 2);
        assert_eq!(
            model.feature_names().map(<[String]>::len),
            Some(2)
        );
    }
}
