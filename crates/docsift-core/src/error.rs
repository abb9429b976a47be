// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error types for docsift. One enum per subsystem boundary: extraction,
// training, prediction, and model persistence. Nothing crosses these
// boundaries as a panic — underlying library failures are converted into
// the variants below at the call site that observes them.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the extraction strategies and the dispatcher.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The OCR language-data/model directory (or a model file inside it)
    /// does not exist. Checked before any recognition work starts.
    #[error("OCR resources missing: {0}")]
    ResourceMissing(String),

    /// The OCR engine (or image decoding feeding it) failed.
    #[error("OCR engine failure: {0}")]
    EngineFailure(String),

    /// A document could not be opened or parsed.
    #[error("document parse failure: {0}")]
    ParseFailure(String),

    /// The file's format is neither declared nor inferable from its extension.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Failures reported by `train`.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training set is empty")]
    EmptyDataset,

    /// Persisting the freshly trained pipeline failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures reported by `predict`.
#[derive(Debug, Error)]
pub enum PredictError {
    /// No trained pipeline in memory and no artifact on disk. Recoverable:
    /// the caller is expected to train first.
    #[error("no trained model available in memory or on disk; train first")]
    ModelUnavailable,

    /// The model store failed — notably a corrupt artifact, which is
    /// surfaced here rather than treated as "no model".
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures reported by the model store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no model artifact at {path}")]
    NotFound { path: PathBuf },

    /// The artifact exists but cannot be trusted: undecodable envelope,
    /// checksum mismatch, undecodable payload, or format-version mismatch.
    #[error("model artifact is corrupt: {0}")]
    Corrupt(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
