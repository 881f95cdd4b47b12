//! Disease catalogue: the five screening workflows and their input schemas.
//!
//! Each [`DiseaseSpec`] is a compile-time constant. The order of its
//! [`FieldSpec`]s is the positional layout the matching classifier was
//! trained on, so the table below doubles as the feature schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one screening workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseId {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    Thyroid,
}

impl DiseaseId {
    /// All workflows, in menu order.
    pub const ALL: [DiseaseId; 5] = [
        DiseaseId::Diabetes,
        DiseaseId::HeartDisease,
        DiseaseId::Parkinsons,
        DiseaseId::LungCancer,
        DiseaseId::Thyroid,
    ];

    /// Stable string key (used in artifacts, manifests and logs).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart_disease",
            Self::Parkinsons => "parkinsons",
            Self::LungCancer => "lung_cancer",
            Self::Thyroid => "thyroid",
        }
    }

    /// Static description of this workflow.
    #[must_use]
    pub fn spec(&self) -> &'static DiseaseSpec {
        match self {
            Self::Diabetes => &DIABETES,
            Self::HeartDisease => &HEART_DISEASE,
            Self::Parkinsons => &PARKINSONS,
            Self::LungCancer => &LUNG_CANCER,
            Self::Thyroid => &THYROID,
        }
    }

    /// Position in [`DiseaseId::ALL`].
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|id| id == self)
            .unwrap_or_default()
    }

    /// Next workflow in menu order, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous workflow in menu order, wrapping around.
    #[must_use]
    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a textual identifier names none of the five workflows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown disease identifier: {0:?}")]
pub struct UnknownDisease(pub String);

impl FromStr for DiseaseId {
    type Err = UnknownDisease;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownDisease(s.to_string()))
    }
}

/// One numeric input of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Feature name as the classifier knows it
    pub id: &'static str,
    /// Label shown above the input
    pub label: &'static str,
    /// Hint shown while the input is empty
    pub help: &'static str,
}

const fn field(id: &'static str, label: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec { id, label, help }
}

/// Static description of one prediction workflow.
#[derive(Debug, PartialEq)]
pub struct DiseaseSpec {
    pub id: DiseaseId,
    /// Entry in the selection menu
    pub menu_label: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    /// Label of the evaluation trigger
    pub trigger_label: &'static str,
    pub fields: &'static [FieldSpec],
    /// Shown when the classifier returns 1
    pub label_true: &'static str,
    /// Shown when the classifier returns 0
    pub label_false: &'static str,
    /// Artifact file name inside the model directory
    pub artifact: &'static str,
    /// Example input row, one entry per field
    pub sample: &'static [&'static str],
}

impl DiseaseSpec {
    /// Number of features the classifier expects.
    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Feature identifiers in declared order.
    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.id)
    }
}

pub static DIABETES: DiseaseSpec = DiseaseSpec {
    id: DiseaseId::Diabetes,
    menu_label: "Diabetes Prediction",
    title: "Diabetes",
    prompt: "Enter the following details to predict diabetes:",
    trigger_label: "Diabetes Test Result",
    fields: &[
        field("Pregnancies", "Number of Pregnancies", "Enter number of times pregnant"),
        field("Glucose", "Glucose Level", "Enter glucose level"),
        field("BloodPressure", "Blood Pressure value", "Enter blood pressure value"),
        field("SkinThickness", "Skin Thickness value", "Enter skin thickness value"),
        field("Insulin", "Insulin Level", "Enter insulin level"),
        field("BMI", "BMI value", "Enter Body Mass Index value"),
        field(
            "DiabetesPedigreeFunction",
            "Diabetes Pedigree Function value",
            "Enter diabetes pedigree function value",
        ),
        field("Age", "Age of the Person", "Enter age of the person"),
    ],
    label_true: "The person is diabetic",
    label_false: "The person is not diabetic",
    artifact: "diabetes_model.json",
    sample: &["2", "120", "70", "30", "80", "28.5", "0.5", "33"],
};

pub static HEART_DISEASE: DiseaseSpec = DiseaseSpec {
    id: DiseaseId::HeartDisease,
    menu_label: "Heart Disease Prediction",
    title: "Heart Disease",
    prompt: "Enter the following details to predict heart disease:",
    trigger_label: "Heart Disease Test Result",
    fields: &[
        field("age", "Age", "Enter age of the person"),
        field("sex", "Sex (1 = male; 0 = female)", "Enter sex of the person"),
        field("cp", "Chest Pain types (0, 1, 2, 3)", "Enter chest pain type"),
        field("trestbps", "Resting Blood Pressure", "Enter resting blood pressure"),
        field("chol", "Serum Cholesterol in mg/dl", "Enter serum cholesterol"),
        field(
            "fbs",
            "Fasting Blood Sugar > 120 mg/dl (1 = true; 0 = false)",
            "Enter fasting blood sugar",
        ),
        field(
            "restecg",
            "Resting Electrocardiographic results (0, 1, 2)",
            "Enter resting ECG results",
        ),
        field("thalach", "Maximum Heart Rate achieved", "Enter maximum heart rate"),
        field(
            "exang",
            "Exercise Induced Angina (1 = yes; 0 = no)",
            "Enter exercise induced angina",
        ),
        field("oldpeak", "ST depression induced by exercise", "Enter ST depression value"),
        field(
            "slope",
            "Slope of the peak exercise ST segment (0, 1, 2)",
            "Enter slope value",
        ),
        field(
            "ca",
            "Major vessels colored by fluoroscopy (0-3)",
            "Enter number of major vessels",
        ),
        field(
            "thal",
            "Thal (0 = normal; 1 = fixed defect; 2 = reversible defect)",
            "Enter thal value",
        ),
    ],
    label_true: "The person has heart disease",
    label_false: "The person does not have heart disease",
    artifact: "heart_disease_model.json",
    sample: &[
        "57", "1", "0", "140", "241", "0", "1", "123", "1", "0.2", "1", "0", "3",
    ],
};

pub static PARKINSONS: DiseaseSpec = DiseaseSpec {
    id: DiseaseId::Parkinsons,
    menu_label: "Parkinsons Prediction",
    title: "Parkinson's Disease",
    prompt: "Enter the following details to predict Parkinson's disease:",
    trigger_label: "Parkinson's Test Result",
    fields: &[
        field("fo", "MDVP:Fo(Hz)", "Enter MDVP:Fo(Hz) value"),
        field("fhi", "MDVP:Fhi(Hz)", "Enter MDVP:Fhi(Hz) value"),
        field("flo", "MDVP:Flo(Hz)", "Enter MDVP:Flo(Hz) value"),
        field("Jitter_percent", "MDVP:Jitter(%)", "Enter MDVP:Jitter(%) value"),
        field("Jitter_Abs", "MDVP:Jitter(Abs)", "Enter MDVP:Jitter(Abs) value"),
        field("RAP", "MDVP:RAP", "Enter MDVP:RAP value"),
        field("PPQ", "MDVP:PPQ", "Enter MDVP:PPQ value"),
        field("DDP", "Jitter:DDP", "Enter Jitter:DDP value"),
        field("Shimmer", "MDVP:Shimmer", "Enter MDVP:Shimmer value"),
        field("Shimmer_dB", "MDVP:Shimmer(dB)", "Enter MDVP:Shimmer(dB) value"),
        field("APQ3", "Shimmer:APQ3", "Enter Shimmer:APQ3 value"),
        field("APQ5", "Shimmer:APQ5", "Enter Shimmer:APQ5 value"),
        field("APQ", "MDVP:APQ", "Enter MDVP:APQ value"),
        field("DDA", "Shimmer:DDA", "Enter Shimmer:DDA value"),
        field("NHR", "NHR", "Enter NHR value"),
        field("HNR", "HNR", "Enter HNR value"),
        field("RPDE", "RPDE", "Enter RPDE value"),
        field("DFA", "DFA", "Enter DFA value"),
        field("spread1", "Spread1", "Enter spread1 value"),
        field("spread2", "Spread2", "Enter spread2 value"),
        field("D2", "D2", "Enter D2 value"),
        field("PPE", "PPE", "Enter PPE value"),
    ],
    label_true: "The person has Parkinson's disease",
    label_false: "The person does not have Parkinson's disease",
    artifact: "parkinsons_model.json",
    sample: &[
        "119.992", "157.302", "74.997", "0.00784", "0.00007", "0.0037", "0.00554", "0.01109",
        "0.04374", "0.426", "0.02182", "0.0313", "0.02971", "0.06545", "0.02211", "21.033",
        "0.414783", "0.815285", "-4.813031", "0.266482", "2.301442", "0.284654",
    ],
};

pub static LUNG_CANCER: DiseaseSpec = DiseaseSpec {
    id: DiseaseId::LungCancer,
    menu_label: "Lung Cancer Prediction",
    title: "Lung Cancer",
    prompt: "Enter the following details to predict lung cancer:",
    trigger_label: "Lung Cancer Test Result",
    fields: &[
        field("GENDER", "Gender (1 = Male; 0 = Female)", "Enter gender of the person"),
        field("AGE", "Age", "Enter age of the person"),
        field("SMOKING", "Smoking (1 = Yes; 0 = No)", "Enter if the person smokes"),
        field(
            "YELLOW_FINGERS",
            "Yellow Fingers (1 = Yes; 0 = No)",
            "Enter if the person has yellow fingers",
        ),
        field("ANXIETY", "Anxiety (1 = Yes; 0 = No)", "Enter if the person has anxiety"),
        field(
            "PEER_PRESSURE",
            "Peer Pressure (1 = Yes; 0 = No)",
            "Enter if the person is under peer pressure",
        ),
        field(
            "CHRONIC_DISEASE",
            "Chronic Disease (1 = Yes; 0 = No)",
            "Enter if the person has a chronic disease",
        ),
        field(
            "FATIGUE",
            "Fatigue (1 = Yes; 0 = No)",
            "Enter if the person experiences fatigue",
        ),
        field("ALLERGY", "Allergy (1 = Yes; 0 = No)", "Enter if the person has allergies"),
        field(
            "WHEEZING",
            "Wheezing (1 = Yes; 0 = No)",
            "Enter if the person experiences wheezing",
        ),
        field(
            "ALCOHOL_CONSUMING",
            "Alcohol Consuming (1 = Yes; 0 = No)",
            "Enter if the person consumes alcohol",
        ),
        field(
            "COUGHING",
            "Coughing (1 = Yes; 0 = No)",
            "Enter if the person experiences coughing",
        ),
        field(
            "SHORTNESS_OF_BREATH",
            "Shortness Of Breath (1 = Yes; 0 = No)",
            "Enter if the person experiences shortness of breath",
        ),
        field(
            "SWALLOWING_DIFFICULTY",
            "Swallowing Difficulty (1 = Yes; 0 = No)",
            "Enter if the person has difficulty swallowing",
        ),
        field(
            "CHEST_PAIN",
            "Chest Pain (1 = Yes; 0 = No)",
            "Enter if the person experiences chest pain",
        ),
    ],
    label_true: "The person has lung cancer disease",
    label_false: "The person does not have lung cancer disease",
    artifact: "lungs_disease_model.json",
    sample: &[
        "1", "69", "1", "1", "1", "0", "0", "1", "0", "1", "1", "1", "1", "1", "1",
    ],
};

pub static THYROID: DiseaseSpec = DiseaseSpec {
    id: DiseaseId::Thyroid,
    menu_label: "Hypo-Thyroid Prediction",
    title: "Hypo-Thyroid",
    prompt: "Enter the following details to predict hypo-thyroid disease:",
    trigger_label: "Thyroid Test Result",
    fields: &[
        field("age", "Age", "Enter age of the person"),
        field("sex", "Sex (1 = Male; 0 = Female)", "Enter sex of the person"),
        field(
            "on_thyroxine",
            "On Thyroxine (1 = Yes; 0 = No)",
            "Enter if the person is on thyroxine",
        ),
        field("tsh", "TSH Level", "Enter TSH level"),
        field("t3_measured", "T3 Measured (1 = Yes; 0 = No)", "Enter if T3 was measured"),
        field("t3", "T3 Level", "Enter T3 level"),
        field("tt4", "TT4 Level", "Enter TT4 level"),
    ],
    label_true: "The person has Hypo-Thyroid disease",
    label_false: "The person does not have Hypo-Thyroid disease",
    artifact: "thyroid_model.json",
    sample: &["45", "0", "1", "3.2", "1", "1.8", "90"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_counts() {
        assert_eq!(DiseaseId::Diabetes.spec().width(), 8);
        assert_eq!(DiseaseId::HeartDisease.spec().width(), 13);
        assert_eq!(DiseaseId::Parkinsons.spec().width(), 22);
        assert_eq!(DiseaseId::LungCancer.spec().width(), 15);
        assert_eq!(DiseaseId::Thyroid.spec().width(), 7);
    }

    #[test]
    fn test_specs_are_self_consistent() {
        for id in DiseaseId::ALL {
            let spec = id.spec();
            assert_eq!(spec.id, id);
            assert_eq!(spec.sample.len(), spec.width(), "{id} sample width");

            let unique: HashSet<&str> = spec.feature_names().collect();
            assert_eq!(unique.len(), spec.width(), "{id} has duplicate field ids");
        }
    }

    #[test]
    fn test_from_str_roundtrip_and_unknown() {
        for id in DiseaseId::ALL {
            assert_eq!(id.as_str().parse::<DiseaseId>(), Ok(id));
        }
        let err = "influenza".parse::<DiseaseId>().unwrap_err();
        assert_eq!(err, UnknownDisease("influenza".into()));
    }

    #[test]
    fn test_menu_cycling_wraps() {
        assert_eq!(DiseaseId::Thyroid.next(), DiseaseId::Diabetes);
        assert_eq!(DiseaseId::Diabetes.prev(), DiseaseId::Thyroid);
        assert_eq!(DiseaseId::HeartDisease.next(), DiseaseId::Parkinsons);
    }

    #[test]
    fn test_artifact_names_are_distinct() {
        let names: HashSet<&str> = DiseaseId::ALL.iter().map(|id| id.spec().artifact).collect();
        assert_eq!(names.len(), DiseaseId::ALL.len());
    }
}
