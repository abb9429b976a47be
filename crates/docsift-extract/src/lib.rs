// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docsift-extract — Plain-text extraction from heterogeneous document formats.
//
// One strategy per supported format (raster image via OCR, PDF, DOCX), each
// behind the `TextExtractor` capability, plus a dispatcher that routes a file
// to the right strategy by declared format or extension inference. Strategies
// never panic and never leak library errors: every outcome is an
// `ExtractError` value.

pub mod dispatch;
pub mod docx;
pub mod pdf;
pub mod scan;

use std::path::Path;

use docsift_core::ExtractError;

pub use dispatch::ExtractionDispatcher;
pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use scan::enhance::ScanEnhancer;
pub use scan::ocr::{ImageExtractor, OcrModelConfig};

/// The one capability every extraction strategy provides: turn a file path
/// into the document's plain text, or a typed failure.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}
