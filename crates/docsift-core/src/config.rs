// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the extraction and classification engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the OCR detection/recognition models. The image
    /// strategy refuses to run when this directory is absent.
    pub ocr_model_dir: PathBuf,
    /// Location of the persisted model artifact written by training and read
    /// by prediction.
    pub model_path: PathBuf,
    /// Run the scan-cleanup pipeline (grayscale, contrast, binarization)
    /// before handing images to the OCR engine.
    pub enhance_scans: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ocr_model_dir: PathBuf::from("ocr-models"),
            model_path: PathBuf::from("models").join("textModel.json"),
            enhance_scans: false,
        }
    }
}
