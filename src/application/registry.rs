//! Model registry: the five classifiers, loaded once at startup.
//!
//! The registry is built before the UI starts and never changes afterwards.
//! It is shared by `Arc` and only read, so no locking is needed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::adapters::manifest::{ArtifactManifest, MANIFEST_FILE};
use crate::domain::{DiseaseId, DiseaseSpec};
use crate::ports::{Classifier, ModelLoader, StartupLoadError};

/// Immutable mapping from disease to its loaded classifier.
pub struct ModelRegistry {
    models: BTreeMap<DiseaseId, Box<dyn Classifier>>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("diseases", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ModelRegistry {
    /// Load all five artifacts from `model_dir`.
    ///
    /// If `manifest.json` is present every artifact must match its digest;
    /// with `require_manifest` set, a missing manifest is itself an error.
    ///
    /// # Errors
    /// Returns the first `StartupLoadError` encountered. There is no partial
    /// registry: any failure aborts the load.
    pub fn load<L: ModelLoader>(
        loader: &L,
        model_dir: &Path,
        require_manifest: bool,
    ) -> Result<Self, StartupLoadError> {
        tracing::info!("Loading models from {:?}", model_dir);

        let manifest = ArtifactManifest::read_from(model_dir)?;
        match &manifest {
            Some(m) => tracing::info!(
                "Verifying artifacts against {} ({} entries)",
                MANIFEST_FILE,
                m.files.len()
            ),
            None if require_manifest => {
                return Err(StartupLoadError::Integrity {
                    path: model_dir.join(MANIFEST_FILE),
                    reason: "manifest required but not found".into(),
                });
            }
            None => tracing::warn!("No {} in {:?}; skipping integrity checks", MANIFEST_FILE, model_dir),
        }

        let mut models = Vec::with_capacity(DiseaseId::ALL.len());
        for id in DiseaseId::ALL {
            let spec = id.spec();
            let path = model_dir.join(spec.artifact);
            if !path.is_file() {
                return Err(StartupLoadError::Missing { disease: id, path });
            }

            let bytes = std::fs::read(&path).map_err(|source| StartupLoadError::Io {
                path: path.clone(),
                source,
            })?;
            if let Some(manifest) = &manifest {
                manifest.verify(spec.artifact, &path, &bytes)?;
            }

            models.push((id, loader.load(&path, &bytes)?));
        }

        Self::from_classifiers(models)
    }

    /// Build a registry from already-constructed classifiers.
    ///
    /// # Errors
    /// Returns `StartupLoadError::SchemaMismatch` if a classifier's width or
    /// feature names disagree with its disease's fields, and
    /// `StartupLoadError::Missing` if any disease has no classifier.
    pub fn from_classifiers(
        classifiers: impl IntoIterator<Item = (DiseaseId, Box<dyn Classifier>)>,
    ) -> Result<Self, StartupLoadError> {
        let mut models = BTreeMap::new();
        for (id, classifier) in classifiers {
            check_schema(id.spec(), classifier.as_ref())?;
            models.insert(id, classifier);
        }

        if let Some(missing) = DiseaseId::ALL.into_iter().find(|id| !models.contains_key(id)) {
            return Err(StartupLoadError::Missing {
                disease: missing,
                path: missing.spec().artifact.into(),
            });
        }

        tracing::info!("Model registry ready ({} classifiers)", models.len());
        Ok(Self { models })
    }

    /// Classifier for `id`.
    #[must_use]
    pub fn get(&self, id: DiseaseId) -> Option<&dyn Classifier> {
        self.models.get(&id).map(|model| model.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn check_schema(spec: &DiseaseSpec, classifier: &dyn Classifier) -> Result<(), StartupLoadError> {
    if classifier.n_features() != spec.width() {
        return Err(StartupLoadError::SchemaMismatch {
            disease: spec.id,
            reason: format!(
                "model expects {} features, form has {}",
                classifier.n_features(),
                spec.width()
            ),
        });
    }

    if let Some(names) = classifier.feature_names() {
        if let Some((pos, (got, want))) = names
            .iter()
            .zip(spec.feature_names())
            .enumerate()
            .find(|(_, (got, want))| got.as_str() != *want)
        {
            return Err(StartupLoadError::SchemaMismatch {
                disease: spec.id,
                reason: format!("feature {pos} is {got:?} in the model but {want:?} in the form"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::linear::LinearModelLoader;
    use crate::application::testing::{write_artifacts, StubClassifier};
    use crate::domain::Prediction;
    use tempfile::tempdir;

    #[test]
    fn test_load_all_five() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());

        let registry =
            ModelRegistry::load(&LinearModelLoader::new(), temp.path(), false).expect("load");
        assert_eq!(registry.len(), 5);
        for id in DiseaseId::ALL {
            let classifier = registry.get(id).expect("present");
            assert_eq!(classifier.n_features(), id.spec().width());
        }
    }

    #[test]
    fn test_shipped_models_serve_sample_rows() {
        use crate::application::evaluate;
        use crate::domain::FieldInput;

        let model_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let registry =
            ModelRegistry::load(&LinearModelLoader::new(), &model_dir, false).expect("load");

        let expected = [
            (DiseaseId::Diabetes, "The person is not diabetic"),
            (DiseaseId::HeartDisease, "The person does not have heart disease"),
            (DiseaseId::Parkinsons, "The person has Parkinson's disease"),
            (DiseaseId::LungCancer, "The person has lung cancer disease"),
            (DiseaseId::Thyroid, "The person does not have Hypo-Thyroid disease"),
        ];
        for (id, label) in expected {
            let spec = id.spec();
            let inputs: Vec<FieldInput> = spec
                .fields
                .iter()
                .zip(spec.sample)
                .map(|(field, value)| {
                    let mut input = FieldInput::new(field);
                    input.set(value);
                    input
                })
                .collect();
            assert_eq!(inputs.len(), spec.width(), "{id} sample row incomplete");

            let diagnosis = evaluate(spec, &inputs, &registry).expect("evaluate");
            assert_eq!(diagnosis.label, label, "{id}");
        }
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        std::fs::remove_file(temp.path().join("parkinsons_model.json")).expect("remove");

        let err = ModelRegistry::load(&LinearModelLoader::new(), temp.path(), false).unwrap_err();
        match err {
            StartupLoadError::Missing { disease, .. } => assert_eq!(disease, DiseaseId::Parkinsons),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        std::fs::write(temp.path().join("thyroid_model.json"), b"\x00\x01garbage").expect("write");

        let err = ModelRegistry::load(&LinearModelLoader::new(), temp.path(), false).unwrap_err();
        assert!(matches!(err, StartupLoadError::Corrupt { .. }));
    }

    #[test]
    fn test_manifest_enforced() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());

        let err = ModelRegistry::load(&LinearModelLoader::new(), temp.path(), true).unwrap_err();
        assert!(matches!(err, StartupLoadError::Integrity { .. }));

        let files: Vec<(String, Vec<u8>)> = DiseaseId::ALL
            .iter()
            .map(|id| {
                let name = id.spec().artifact;
                (name.to_string(), std::fs::read(temp.path().join(name)).expect("read"))
            })
            .collect();
        ArtifactManifest::from_files(files.iter().map(|(n, b)| (n.as_str(), b.as_slice())))
            .write_to(temp.path())
            .expect("write manifest");
        ModelRegistry::load(&LinearModelLoader::new(), temp.path(), true).expect("verified load");

        // Tamper after signing.
        let heart = temp.path().join("heart_disease_model.json");
        let mut bytes = std::fs::read(&heart).expect("read");
        bytes.push(b' ');
        std::fs::write(&heart, bytes).expect("write");
        let err = ModelRegistry::load(&LinearModelLoader::new(), temp.path(), false).unwrap_err();
        assert!(matches!(err, StartupLoadError::Integrity { .. }));
    }

    #[test]
    fn test_schema_width_mismatch() {
        let mut classifiers = StubClassifier::full_set(Prediction::Negative);
        classifiers[0].1 = Box::new(StubClassifier::new(3, Prediction::Negative));

        let err = ModelRegistry::from_classifiers(classifiers).unwrap_err();
        assert!(matches!(
            err,
            StartupLoadError::SchemaMismatch { disease: DiseaseId::Diabetes, .. }
        ));
    }

    #[test]
    fn test_schema_name_mismatch() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        let path = temp.path().join("thyroid_model.json");
        let json = std::fs::read_to_string(&path).expect("read");
        std::fs::write(&path, json.replace("\"tsh\"", "\"TSH\"")).expect("write");

        let err = ModelRegistry::load(&LinearModelLoader::new(), temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("TSH"));
    }

    #[test]
    fn test_incomplete_set_rejected() {
        let classifiers: Vec<(DiseaseId, Box<dyn Classifier>)> = StubClassifier::full_set(Prediction::Positive)
            .into_iter()
            .filter(|(id, _)| *id != DiseaseId::LungCancer)
            .collect();
        let err = ModelRegistry::from_classifiers(classifiers).unwrap_err();
        assert!(matches!(
            err,
            StartupLoadError::Missing { disease: DiseaseId::LungCancer, .. }
        ));
    }
}
