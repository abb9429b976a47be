// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The trained pipeline (featurizer + classifier + label vocabulary) and the
// classifier front that owns training, persistence, and prediction.

use chrono::{DateTime, Utc};
use docsift_core::{LabeledSample, PredictError, Prediction, StoreError, TrainError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::features::TfidfVectorizer;
use crate::model::SoftmaxClassifier;
use crate::store::ModelStore;

/// Version stamp of the persisted artifact layout. Bump when the pipeline's
/// serialized shape changes incompatibly.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// An immutable, fitted classification pipeline.
///
/// Bundles the fitted featurizer, the fitted classifier, and the label
/// vocabulary (distinct training labels in first-seen order, mapping class
/// keys back to label strings). Produced by one training run; never mutated
/// afterwards — retraining produces a new pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedPipeline {
    format_version: u32,
    /// Identity of this training run.
    model_id: Uuid,
    trained_at: DateTime<Utc>,
    vectorizer: TfidfVectorizer,
    classifier: SoftmaxClassifier,
    labels: Vec<String>,
}

impl TrainedPipeline {
    /// Fit a pipeline on a non-empty training set.
    pub(crate) fn fit(samples: &[LabeledSample]) -> Self {
        // Label vocabulary in first-seen order; each sample's label maps to
        // its class key.
        let mut labels: Vec<String> = Vec::new();
        let mut targets = Vec::with_capacity(samples.len());
        for sample in samples {
            let key = match labels.iter().position(|label| label == &sample.label) {
                Some(key) => key,
                None => {
                    labels.push(sample.label.clone());
                    labels.len() - 1
                }
            };
            targets.push(key);
        }

        let documents: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&documents);
        let features: Vec<Vec<f64>> = samples
            .iter()
            .map(|sample| vectorizer.transform(&sample.text))
            .collect();
        let classifier = SoftmaxClassifier::fit(&features, &targets, labels.len());

        info!(
            samples = samples.len(),
            labels = labels.len(),
            dimension = vectorizer.dimension(),
            "pipeline fitted"
        );

        Self {
            format_version: MODEL_FORMAT_VERSION,
            model_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            vectorizer,
            classifier,
            labels,
        }
    }

    /// Classify a text. The returned label is always one of `labels()`.
    pub fn predict(&self, text: &str) -> Prediction {
        let features = self.vectorizer.transform(text);
        let key = self.classifier.predict(&features);
        Prediction {
            label: self.labels[key].clone(),
        }
    }

    /// The label vocabulary, in first-seen training order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn model_id(&self) -> Uuid {
        self.model_id
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }
}

/// Trainable text classifier with persisted model state.
///
/// Owns the current in-memory pipeline (if any) and the model store.
/// `train` fits a new pipeline, persists it (overwriting any prior
/// artifact), and replaces the in-memory reference. `predict` resolves a
/// pipeline in order: in-memory, then the on-disk artifact (cached on
/// success), then fails with `ModelUnavailable`.
pub struct TextClassifier {
    store: ModelStore,
    current: Option<TrainedPipeline>,
}

impl TextClassifier {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// A classifier persisting to the default artifact location.
    pub fn with_default_store() -> Self {
        Self::new(ModelStore::at_default_location())
    }

    /// Train on a sequence of labeled samples and persist the result.
    #[instrument(skip_all, fields(samples = samples.len()))]
    pub fn train(&mut self, samples: &[LabeledSample]) -> Result<&TrainedPipeline, TrainError> {
        if samples.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let pipeline = TrainedPipeline::fit(samples);
        self.store.save(&pipeline)?;
        info!(model_id = %pipeline.model_id(), "pipeline trained and persisted");

        Ok(self.current.insert(pipeline))
    }

    /// Classify a text with the current pipeline, loading the persisted one
    /// if nothing is in memory yet.
    #[instrument(skip_all)]
    pub fn predict(&mut self, text: &str) -> Result<Prediction, PredictError> {
        if self.current.is_none() {
            match self.store.load() {
                Ok(pipeline) => {
                    debug!(model_id = %pipeline.model_id(), "pipeline loaded from artifact");
                    self.current = Some(pipeline);
                }
                Err(StoreError::NotFound { .. }) => return Err(PredictError::ModelUnavailable),
                Err(err) => return Err(err.into()),
            }
        }

        let Some(pipeline) = self.current.as_ref() else {
            return Err(PredictError::ModelUnavailable);
        };
        Ok(pipeline.predict(text))
    }

    /// The in-memory pipeline, if one has been trained or loaded.
    pub fn current(&self) -> Option<&TrainedPipeline> {
        self.current.as_ref()
    }
}
