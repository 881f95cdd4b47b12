//! Test doubles shared by the application and TUI tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::linear::{ExportedLinearModel, ModelKind};
use crate::domain::{DiseaseId, FeatureVector, Prediction};
use crate::ports::{Classifier, InferenceError};

/// Classifier returning a fixed answer and recording every vector it sees.
pub struct StubClassifier {
    width: usize,
    answer: Result<Prediction, InferenceError>,
    /// Error returned from the second call onwards
    then_fail: Option<InferenceError>,
    calls: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl StubClassifier {
    pub fn new(width: usize, answer: Prediction) -> Self {
        Self {
            width,
            answer: Ok(answer),
            then_fail: None,
            calls: Arc::default(),
        }
    }

    /// Answers `answer` once, then fails every later call with `error`.
    pub fn answer_then_fail(width: usize, answer: Prediction, error: InferenceError) -> Self {
        Self {
            then_fail: Some(error),
            ..Self::new(width, answer)
        }
    }

    pub fn failing(width: usize, error: InferenceError) -> Self {
        Self {
            width,
            answer: Err(error),
            then_fail: None,
            calls: Arc::default(),
        }
    }

    /// Shared handle to the recorded calls.
    pub fn calls(&self) -> Arc<Mutex<Vec<Vec<f64>>>> {
        Arc::clone(&self.calls)
    }

    /// One stub per disease, all giving `answer`.
    pub fn full_set(answer: Prediction) -> Vec<(DiseaseId, Box<dyn Classifier>)> {
        DiseaseId::ALL
            .into_iter()
            .map(|id| {
                let stub: Box<dyn Classifier> = Box::new(Self::new(id.spec().width(), answer));
                (id, stub)
            })
            .collect()
    }
}

impl Classifier for StubClassifier {
    fn n_features(&self) -> usize {
        self.width
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(features.as_slice().to_vec());
        match &self.then_fail {
            Some(error) if calls.len() > 1 => Err(error.clone()),
            _ => self.answer.clone(),
        }
    }
}

/// Write a valid artifact for every disease into `dir`.
pub fn write_artifacts(dir: &Path) {
    for id in DiseaseId::ALL {
        let spec = id.spec();
        let model = ExportedLinearModel {
            kind: ModelKind::LinearSvm,
            feature_names: spec.feature_names().map(str::to_string).collect(),
            coefficients: vec![0.0; spec.width()],
            intercept: -1.0,
            scaler: None,
            threshold: 0.5,
            description: Some("test fixture".into()),
        };
        let json = serde_json::to_string_pretty(&model).expect("serialize model");
        std::fs::write(dir.join(spec.artifact), json).expect("write model");
    }
}
