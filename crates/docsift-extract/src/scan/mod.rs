// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanned-image strategy — optional cleanup (binarization, contrast) and
// optical character recognition (OCR).

pub mod enhance;
pub mod ocr;

pub use enhance::ScanEnhancer;
pub use ocr::{ImageExtractor, OcrModelConfig};
