// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Model store — durable on-disk representation of a trained pipeline.
//
// The artifact is a JSON envelope holding the serialized pipeline plus a
// SHA-256 checksum of it. Saving goes through a temp file in the destination
// directory followed by an atomic rename, so a reader never observes a torn
// artifact. Loading distinguishes a missing artifact from a corrupt one.

use std::io::Write;
use std::path::{Path, PathBuf};

use docsift_core::StoreError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::pipeline::{MODEL_FORMAT_VERSION, TrainedPipeline};

/// On-disk envelope: the serialized pipeline and its digest.
#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    /// SHA-256 hex digest of `payload`.
    checksum: String,
    /// The pipeline, serialized as JSON.
    payload: String,
}

/// Reads and writes the model artifact at a fixed location.
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    /// Default artifact location, relative to the process working directory.
    pub const DEFAULT_RELATIVE_PATH: &'static str = "models/textModel.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at [`Self::DEFAULT_RELATIVE_PATH`].
    pub fn at_default_location() -> Self {
        Self::new(Self::DEFAULT_RELATIVE_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an artifact currently exists at this location.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist a pipeline, overwriting any prior artifact.
    ///
    /// The containing directory is created if absent. The write is atomic
    /// from an external reader's perspective: the envelope is written to a
    /// temp file in the same directory and renamed over the final path.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, pipeline: &TrainedPipeline) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let payload = serde_json::to_string(pipeline)?;
        let artifact = ModelArtifact {
            checksum: hex::encode(Sha256::digest(payload.as_bytes())),
            payload,
        };
        let bytes = serde_json::to_vec_pretty(&artifact)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(&bytes)?;
        temp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;

        info!(bytes = bytes.len(), "model artifact saved");
        Ok(())
    }

    /// Load the pipeline from the artifact.
    ///
    /// A missing file is `NotFound`. An artifact that exists but cannot be
    /// proven whole — undecodable envelope, checksum mismatch, undecodable
    /// payload, or a format-version mismatch — is `Corrupt`.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<TrainedPipeline, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|err| {
            StoreError::Corrupt(format!("artifact envelope is not valid JSON: {}", err))
        })?;

        let actual = hex::encode(Sha256::digest(artifact.payload.as_bytes()));
        if actual != artifact.checksum {
            return Err(StoreError::Corrupt(format!(
                "checksum mismatch: expected {}, got {}",
                artifact.checksum, actual
            )));
        }

        let pipeline: TrainedPipeline =
            serde_json::from_str(&artifact.payload).map_err(|err| {
                StoreError::Corrupt(format!("pipeline payload does not deserialize: {}", err))
            })?;

        if pipeline.format_version() != MODEL_FORMAT_VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported artifact format version {} (expected {})",
                pipeline.format_version(),
                MODEL_FORMAT_VERSION
            )));
        }

        debug!(model_id = %pipeline.model_id(), "model artifact loaded");
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::LabeledSample;

    fn fitted_pipeline() -> TrainedPipeline {
        TrainedPipeline::fit(&[
            LabeledSample::new("pay this invoice now", "Invoice"),
            LabeledSample::new("resume of a rust engineer", "Resume"),
        ])
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("models").join("textModel.json"));
        assert!(!store.exists());

        let pipeline = fitted_pipeline();
        store.save(&pipeline).expect("save");
        assert!(store.exists());

        let loaded = store.load().expect("load");
        assert_eq!(loaded.model_id(), pipeline.model_id());
        assert_eq!(loaded.labels(), pipeline.labels());
        assert_eq!(
            loaded.predict("an invoice to pay"),
            pipeline.predict("an invoice to pay")
        );
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("deep").join("nested").join("model.json"));
        store.save(&fitted_pipeline()).expect("save");
        assert!(store.exists());
    }

    #[test]
    fn save_overwrites_the_previous_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("textModel.json"));

        let first = fitted_pipeline();
        store.save(&first).expect("first save");

        let second = fitted_pipeline();
        store.save(&second).expect("second save");

        let loaded = store.load().expect("load");
        assert_eq!(loaded.model_id(), second.model_id());
        assert_ne!(loaded.model_id(), first.model_id());
    }

    #[test]
    fn load_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("textModel.json"));
        let result = store.load();
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn load_rejects_an_undecodable_envelope() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("textModel.json"));
        std::fs::write(store.path(), b"definitely not json").expect("write");

        let result = store.load();
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn load_rejects_a_tampered_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ModelStore::new(dir.path().join("textModel.json"));
        store.save(&fitted_pipeline()).expect("save");

        // Flip a character inside the payload while keeping the envelope
        // valid JSON; the checksum must catch it.
        let content = std::fs::read_to_string(store.path()).expect("read");
        let tampered = content.replacen("Invoice", "Invoize", 1);
        assert_ne!(content, tampered, "fixture must actually change");
        std::fs::write(store.path(), tampered).expect("write");

        let result = store.load();
        assert!(matches!(result, Err(StoreError::Corrupt(message)) if message.contains("checksum")));
    }

    #[test]
    fn default_location_is_the_well_known_path() {
        let store = ModelStore::at_default_location();
        assert_eq!(store.path(), Path::new("models/textModel.json"));
    }
}
