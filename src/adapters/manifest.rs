//! Artifact integrity manifest.
//!
//! A `manifest.json` next to the model artifacts binds each file name to the
//! SHA-256 of its contents. When present, the registry refuses to load any
//! artifact that is unlisted or whose digest differs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::StartupLoadError;

/// File name of the manifest inside the model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

const MANIFEST_VERSION: u32 = 1;

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for hex digests.
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: u32,
    /// Unix timestamp (seconds) when the manifest was written
    pub created_at: i64,
    /// File name -> SHA-256 hex digest
    pub files: BTreeMap<String, String>,
}

impl ArtifactManifest {
    /// Build a manifest over the given `(file name, contents)` pairs.
    #[must_use]
    pub fn from_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            created_at: chrono::Utc::now().timestamp(),
            files: files
                .into_iter()
                .map(|(name, bytes)| (name.to_string(), sha256_hex(bytes)))
                .collect(),
        }
    }

    /// Read `manifest.json` from `dir`, if it exists.
    ///
    /// # Errors
    /// Returns `StartupLoadError` if the manifest exists but cannot be read,
    /// parsed, or has an unsupported version.
    pub fn read_from(dir: &Path) -> Result<Option<Self>, StartupLoadError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|source| StartupLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: Self =
            serde_json::from_slice(&bytes).map_err(|e| StartupLoadError::Integrity {
                path: path.clone(),
                reason: format!("invalid manifest format: {e}"),
            })?;
        if manifest.version != MANIFEST_VERSION {
            return Err(StartupLoadError::Integrity {
                path,
                reason: format!("unsupported manifest version {}", manifest.version),
            });
        }
        Ok(Some(manifest))
    }

    /// Write the manifest as pretty JSON into `dir`.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Check that `name` is listed and its digest matches `bytes`.
    ///
    /// # Errors
    /// Returns `StartupLoadError::Integrity` on an unlisted file or digest mismatch.
    pub fn verify(&self, name: &str, path: &Path, bytes: &[u8]) -> Result<(), StartupLoadError> {
        let expected = self.files.get(name).ok_or_else(|| StartupLoadError::Integrity {
            path: path.to_path_buf(),
            reason: format!("{name} is not listed in {MANIFEST_FILE}"),
        })?;
        let actual = sha256_hex(bytes);
        if !constant_time_eq_str(&expected.to_ascii_lowercase(), &actual) {
            return Err(StartupLoadError::Integrity {
                path: path.to_path_buf(),
                reason: "SHA-256 digest does not match manifest".into(),
            });
        }
        Ok(())
    }
}
