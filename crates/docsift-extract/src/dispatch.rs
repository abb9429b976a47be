// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction dispatcher — route a request to the matching strategy, by the
// caller's declared format or by extension inference.

use std::path::Path;

use docsift_core::{DocumentFormat, EngineConfig, ExtractError, ExtractionRequest};
use tracing::{debug, instrument};

use crate::TextExtractor;
use crate::docx::DocxExtractor;
use crate::pdf::PdfExtractor;
use crate::scan::ocr::{ImageExtractor, OcrModelConfig};

/// Routes extraction requests to the right strategy.
///
/// Owns one instance of each strategy. A request with a declared format goes
/// straight to that strategy; otherwise the format is inferred from the file
/// extension. An unrecognized extension is an `UnsupportedFormat` failure —
/// reported without opening the file, and no strategy is invoked. One
/// strategy invocation per call, no retries.
pub struct ExtractionDispatcher {
    image: ImageExtractor,
    pdf: PdfExtractor,
    docx: DocxExtractor,
}

impl ExtractionDispatcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            image: ImageExtractor::new(
                OcrModelConfig::from_dir(&config.ocr_model_dir),
                config.enhance_scans,
            ),
            pdf: PdfExtractor::new(),
            docx: DocxExtractor::new(),
        }
    }

    /// A dispatcher with the default engine configuration.
    pub fn with_defaults() -> Self {
        Self::new(&EngineConfig::default())
    }

    /// Extract the plain text of the document named by `request`.
    #[instrument(skip_all, fields(
        path = %request.path.display(),
        declared = ?request.declared_format,
    ))]
    pub fn dispatch(&self, request: &ExtractionRequest) -> Result<String, ExtractError> {
        let format = match request.declared_format {
            Some(format) => format,
            None => infer_format(&request.path)?,
        };
        debug!(?format, "strategy selected");

        let strategy: &dyn TextExtractor = match format {
            DocumentFormat::Image => &self.image,
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
        };
        strategy.extract(&request.path)
    }
}

/// Infer the document format from the path's extension.
fn infer_format(path: &Path) -> Result<DocumentFormat, ExtractError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
        .ok_or_else(|| {
            ExtractError::UnsupportedFormat(format!(
                "cannot infer a document format for {}",
                path.display()
            ))
        })
}
