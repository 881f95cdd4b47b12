//! Dispatcher: selection → fields → evaluation → result.
//!
//! State machine:
//!
//! ```text
//! Idle → DiseaseSelected → FieldsRendered → Evaluating → ResultShown
//!              ^                                              |
//!              +------------- select_disease -----------------+
//! ```
//!
//! Selecting a disease from any state discards the entered values and any
//! shown result. Validation and inference failures are returned to the caller
//! and recorded for display; they never leave the dispatcher half-updated.

use std::sync::Arc;

use crate::domain::{
    Diagnosis, DiseaseId, DiseaseSpec, FeatureVector, FieldInput, FieldValues, ValidationError,
};
use crate::ports::InferenceError;

use super::ModelRegistry;

/// Dispatcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    DiseaseSelected,
    FieldsRendered,
    Evaluating,
    ResultShown,
}

/// Recoverable error at the dispatcher boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("No disease selected")]
    NoDiseaseSelected,
}

impl DispatchError {
    /// Text shown to the user.
    ///
    /// Validation errors name the field; inference errors are reported
    /// generically (details go to the log).
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Inference(_) => "Prediction failed. Please check the inputs and try again.".into(),
            Self::NoDiseaseSelected => "Select a disease to predict first.".into(),
        }
    }
}

/// Run one classifier call for `spec` over the entered `inputs`.
///
/// Every field is parsed before anything else happens, so an invalid field
/// means the classifier is never called.
///
/// # Errors
/// Returns `DispatchError::Validation` naming the first invalid field, or
/// `DispatchError::Inference` if the classifier fails.
pub fn evaluate(
    spec: &DiseaseSpec,
    inputs: &[FieldInput],
    registry: &ModelRegistry,
) -> Result<Diagnosis, DispatchError> {
    let values = FieldValues::parse(inputs)?;
    let vector = FeatureVector::assemble(spec, &values)?;

    let classifier = registry
        .get(spec.id)
        .ok_or(InferenceError::ModelUnavailable(spec.id))?;
    let prediction = classifier.predict(&vector)?;

    Ok(Diagnosis::new(spec, prediction))
}

/// Drives one user's selection / entry / evaluation cycle.
pub struct Dispatcher {
    registry: Arc<ModelRegistry>,
    state: DispatchState,
    selected: Option<&'static DiseaseSpec>,
    inputs: Vec<FieldInput>,
    result: Option<Diagnosis>,
    last_error: Option<DispatchError>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            state: DispatchState::Idle,
            selected: None,
            inputs: Vec::new(),
            result: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    #[must_use]
    pub fn selected(&self) -> Option<&'static DiseaseSpec> {
        self.selected
    }

    #[must_use]
    pub fn result(&self) -> Option<&Diagnosis> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&DispatchError> {
        self.last_error.as_ref()
    }

    /// Select a workflow, discarding entered values and any shown result.
    pub fn select_disease(&mut self, id: DiseaseId) -> &'static DiseaseSpec {
        let spec = id.spec();
        tracing::info!(disease = %id, "disease selected");

        // FieldInput wipes its buffer on drop.
        self.inputs.clear();
        self.result = None;
        self.last_error = None;
        self.selected = Some(spec);
        self.state = DispatchState::DiseaseSelected;
        spec
    }

    /// Select a workflow by its textual identifier.
    ///
    /// # Errors
    /// Returns `UnknownDisease` if `key` is not one of the five identifiers;
    /// the current selection is left untouched.
    pub fn select_disease_by_key(
        &mut self,
        key: &str,
    ) -> Result<&'static DiseaseSpec, crate::domain::UnknownDisease> {
        let id: DiseaseId = key.parse()?;
        Ok(self.select_disease(id))
    }

    /// Create one empty input per field of the selected workflow.
    ///
    /// Calling this again after the fields exist returns the live inputs
    /// unchanged.
    ///
    /// # Errors
    /// Returns `DispatchError::NoDiseaseSelected` in the `Idle` state.
    pub fn render_fields(&mut self) -> Result<&mut [FieldInput], DispatchError> {
        let spec = self.selected.ok_or(DispatchError::NoDiseaseSelected)?;
        if self.state == DispatchState::DiseaseSelected {
            self.inputs = spec.fields.iter().map(FieldInput::new).collect();
            self.state = DispatchState::FieldsRendered;
        }
        Ok(&mut self.inputs)
    }

    /// Live inputs of the current form (empty until fields are rendered).
    #[must_use]
    pub fn inputs(&self) -> &[FieldInput] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [FieldInput] {
        &mut self.inputs
    }

    /// Fill the form with the workflow's sample row.
    pub fn load_sample(&mut self) {
        if let Some(spec) = self.selected {
            for (input, value) in self.inputs.iter_mut().zip(spec.sample) {
                input.set(value);
            }
        }
    }

    /// Clear every entered value, keeping the selection.
    pub fn clear_inputs(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.last_error = None;
    }

    /// Evaluate the current form (the explicit trigger).
    ///
    /// On success the result replaces any previous one. On failure the
    /// previous result, if any, stays on screen and the error is recorded.
    ///
    /// # Errors
    /// Returns `DispatchError` on a missing selection, invalid field, or
    /// classifier failure.
    pub fn evaluate(&mut self) -> Result<&Diagnosis, DispatchError> {
        let Some(spec) = self.selected else {
            return Err(DispatchError::NoDiseaseSelected);
        };
        if self.state == DispatchState::DiseaseSelected {
            self.render_fields()?;
        }

        let previous = self.state;
        self.state = DispatchState::Evaluating;
        tracing::info!(disease = %spec.id, n_features = spec.width(), "evaluating");

        match evaluate(spec, &self.inputs, &self.registry) {
            Ok(diagnosis) => {
                tracing::info!(
                    disease = %spec.id,
                    prediction = %diagnosis.prediction,
                    "evaluation complete"
                );
                self.last_error = None;
                self.state = DispatchState::ResultShown;
                Ok(&*self.result.insert(diagnosis))
            }
            Err(e) => {
                match &e {
                    DispatchError::Validation(v) => {
                        tracing::info!(disease = %spec.id, field = v.field(), "input rejected")
                    }
                    other => tracing::error!(disease = %spec.id, "inference failed: {}", other),
                }
                self.state = previous;
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}
