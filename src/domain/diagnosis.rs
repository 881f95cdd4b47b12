//! Diagnosis result types.
//!
//! Represents the output of one classifier call mapped to display text.

use serde::{Deserialize, Serialize};

use super::disease::{DiseaseId, DiseaseSpec};

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    /// Class 0: condition not indicated
    Negative,
    /// Class 1: condition indicated
    Positive,
}

impl Prediction {
    /// Raw class label.
    #[must_use]
    pub fn label(&self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of one evaluation, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub disease: DiseaseId,
    pub prediction: Prediction,
    /// Human-readable verdict taken from the disease's label pair
    pub label: String,

    /// Timestamp of evaluation
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Diagnosis {
    /// Map a prediction to the disease's verdict sentence.
    #[must_use]
    pub fn new(spec: &DiseaseSpec, prediction: Prediction) -> Self {
        let label = match prediction {
            Prediction::Positive => spec.label_true,
            Prediction::Negative => spec.label_false,
        };
        Self {
            disease: spec.id,
            prediction,
            label: label.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::disease::{DIABETES, THYROID};

    #[test]
    fn test_label_mapping() {
        let positive = Diagnosis::new(&DIABETES, Prediction::Positive);
        assert_eq!(positive.label, "The person is diabetic");
        assert_eq!(positive.prediction, Prediction::Positive);

        let negative = Diagnosis::new(&THYROID, Prediction::Negative);
        assert_eq!(negative.label, "The person does not have Hypo-Thyroid disease");
        assert_eq!(negative.disease, DiseaseId::Thyroid);
    }

    #[test]
    fn test_prediction_display() {
        assert_eq!(Prediction::Negative.to_string(), "0");
        assert_eq!(Prediction::Positive.label(), 1);
    }
}
