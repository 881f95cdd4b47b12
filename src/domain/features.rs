//! Field input buffers and feature-vector assembly.
//!
//! Text entered in the form is parsed field by field into a typed value
//! before any vector is built. The vector is then assembled by looking each
//! declared field up by identifier, so the classifier always receives the
//! layout its [`DiseaseSpec`] declares.

use std::collections::HashMap;

use zeroize::Zeroize;

use super::disease::{DiseaseSpec, FieldSpec};

/// Error raised when an entered value cannot be used for inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label}: a value is required")]
    Empty { field: &'static str, label: &'static str },

    #[error("{label}: {input:?} is not a number")]
    NotNumeric {
        field: &'static str,
        label: &'static str,
        input: String,
    },

    #[error("{label}: value must be a finite number")]
    NotFinite { field: &'static str, label: &'static str },

    #[error("{label}: no value supplied")]
    Missing { field: &'static str, label: &'static str },
}

impl ValidationError {
    /// Identifier of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field, .. }
            | Self::NotNumeric { field, .. }
            | Self::NotFinite { field, .. }
            | Self::Missing { field, .. } => field,
        }
    }
}

/// Live text buffer backing one numeric input.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub spec: &'static FieldSpec,
    value: String,
}

impl FieldInput {
    /// Create an empty input for `spec`.
    #[must_use]
    pub fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append a character. Only characters that can appear in a decimal
    /// number are accepted; returns whether the buffer changed.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') {
            self.value.push(c);
            true
        } else {
            false
        }
    }

    /// Remove the last character.
    ///
    /// `String::pop` only shortens the length, so the buffer is rebuilt and
    /// the old allocation wiped instead.
    pub fn pop_char(&mut self) {
        let Some(last) = self.value.chars().next_back() else {
            return;
        };
        let keep = self.value.len() - last.len_utf8();
        let mut next = String::with_capacity(self.value.capacity());
        next.push_str(&self.value[..keep]);
        self.value.zeroize();
        self.value = next;
    }

    /// Replace the buffer contents.
    pub fn set(&mut self, value: &str) {
        self.value.zeroize();
        self.value.push_str(value);
    }

    /// Wipe the buffer.
    pub fn clear(&mut self) {
        self.value.zeroize();
    }

    /// Parse the buffer into a finite number.
    ///
    /// # Errors
    /// Returns `ValidationError` naming this field if the buffer is empty,
    /// not a number, or not finite.
    pub fn parse(&self) -> Result<f64, ValidationError> {
        let FieldSpec { id, label, .. } = *self.spec;
        let raw = self.value.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: id, label });
        }
        let value: f64 = raw.parse().map_err(|_| ValidationError::NotNumeric {
            field: id,
            label,
            input: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: id, label });
        }
        Ok(value)
    }
}

impl Drop for FieldInput {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Parsed values keyed by field identifier.
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    values: HashMap<&'static str, f64>,
}

impl FieldValues {
    /// Parse every input, stopping at the first invalid one.
    ///
    /// # Errors
    /// Returns the `ValidationError` of the first invalid field, in display order.
    pub fn parse(inputs: &[FieldInput]) -> Result<Self, ValidationError> {
        let mut values = HashMap::with_capacity(inputs.len());
        for input in inputs {
            values.insert(input.spec.id, input.parse()?);
        }
        Ok(Self { values })
    }

    pub fn insert(&mut self, field: &'static str, value: f64) {
        self.values.insert(field, value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

/// Ordered numeric input for one classifier call.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Build the vector for `spec` by looking up each declared field.
    ///
    /// # Errors
    /// Returns `ValidationError::Missing` for the first declared field that
    /// has no value.
    pub fn assemble(spec: &DiseaseSpec, values: &FieldValues) -> Result<Self, ValidationError> {
        spec.fields
            .iter()
            .map(|f| {
                values.get(f.id).ok_or(ValidationError::Missing {
                    field: f.id,
                    label: f.label,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}
