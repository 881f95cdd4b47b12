//! Integrity manifest utility for Medscreen model artifacts.
//!
//! Hashes the five model artifacts in a directory and writes `manifest.json`
//! next to them. With `MEDSCREEN_REQUIRE_MANIFEST=1` the application refuses
//! to start unless every artifact matches its recorded digest.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin write_manifest -- <model_dir>
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use medscreen::adapters::manifest::ArtifactManifest;
use medscreen::DiseaseId;

fn usage() -> String {
    "Usage: write_manifest <model_dir>".to_string()
}

fn parse_args() -> Result<PathBuf, String> {
    let mut model_dir: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage()),
            _ => {
                if model_dir.is_none() {
                    model_dir = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    model_dir.ok_or_else(usage)
}

fn main() -> Result<(), String> {
    let model_dir = parse_args()?;
    if !model_dir.is_dir() {
        return Err(format!("{model_dir:?} is not a directory"));
    }

    let mut contents = Vec::with_capacity(DiseaseId::ALL.len());
    for id in DiseaseId::ALL {
        let name = id.spec().artifact;
        let path = model_dir.join(name);
        let bytes = fs::read(&path).map_err(|e| format!("Failed to read {path:?}: {e}"))?;
        contents.push((name, bytes));
    }

    let manifest = ArtifactManifest::from_files(
        contents
            .iter()
            .map(|(name, bytes)| (*name, bytes.as_slice())),
    );
    let manifest_path = manifest
        .write_to(&model_dir)
        .map_err(|e| format!("Failed to write manifest: {e}"))?;

    for (name, digest) in &manifest.files {
        println!("{digest}  {name}");
    }
    println!("Wrote manifest: {manifest_path:?}");

    Ok(())
}
