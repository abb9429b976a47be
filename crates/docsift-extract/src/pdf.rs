// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF strategy — page-ordered text extraction using the `lopdf` crate.

use std::path::Path;

use docsift_core::ExtractError;
use lopdf::Document;
use tracing::{debug, instrument};

use crate::TextExtractor;

/// Extracts plain text from PDF documents, page by page in page order.
///
/// Each page's text is followed by a newline, so a two-page document yields
/// `page1\npage2\n` — the final page keeps its trailing newline.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let document = Document::load(path).map_err(|err| {
            ExtractError::ParseFailure(format!("failed to open {}: {}", path.display(), err))
        })?;

        // get_pages is keyed by 1-indexed page number in a BTreeMap, so
        // iterating the keys walks the document in page order.
        let pages = document.get_pages();
        debug!(pages = pages.len(), "PDF loaded");

        let mut text = String::new();
        for &number in pages.keys() {
            let page_text = document.extract_text(&[number]).map_err(|err| {
                ExtractError::ParseFailure(format!(
                    "failed to extract text from page {} of {}: {}",
                    number,
                    path.display(),
                    err
                ))
            })?;
            text.push_str(&page_text);
            text.push('\n');
        }

        debug!(chars = text.len(), "PDF text extracted");
        Ok(text)
    }
}
