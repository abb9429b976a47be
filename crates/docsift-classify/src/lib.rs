// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docsift-classify — Trainable text classification.
//
// A TF-IDF featurizer composed with a softmax-regression classifier, wrapped
// in an immutable trained pipeline that can be persisted to and reloaded
// from a single on-disk artifact. Training replaces the pipeline; prediction
// resolves in-memory state first, then the artifact, then fails recoverably.

pub mod features;
pub mod model;
pub mod pipeline;
pub mod store;

pub use features::TfidfVectorizer;
pub use model::SoftmaxClassifier;
pub use pipeline::{TextClassifier, TrainedPipeline};
pub use store::ModelStore;
