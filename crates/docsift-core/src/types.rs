// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the docsift engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Supported input document formats. A closed set: the dispatcher selects a
/// strategy by this tag, never by inspecting file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Raster image (JPEG/PNG) handed to the OCR strategy.
    Image,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Infer the document format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => Some(Self::Image),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// A single extraction call: which file, and (optionally) which format the
/// caller says it is. Without a declared format the dispatcher falls back to
/// extension inference.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub path: PathBuf,
    pub declared_format: Option<DocumentFormat>,
}

impl ExtractionRequest {
    /// Request extraction with an explicitly declared format.
    pub fn with_format(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            declared_format: Some(format),
        }
    }

    /// Request extraction with the format inferred from the file extension.
    pub fn infer(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declared_format: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One training example: a document's text and its category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub text: String,
    pub label: String,
}

impl LabeledSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// The outcome of classifying a piece of text. The label is always one of
/// the labels the producing pipeline was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("Jpeg"), Some(DocumentFormat::Image));
        assert_eq!(DocumentFormat::from_extension("jpg"), Some(DocumentFormat::Image));
        assert_eq!(DocumentFormat::from_extension("png"), Some(DocumentFormat::Image));
        assert_eq!(DocumentFormat::from_extension("DOCX"), Some(DocumentFormat::Docx));
    }

    #[test]
    fn unknown_extension_has_no_format() {
        assert_eq!(DocumentFormat::from_extension("txt"), None);
        assert_eq!(DocumentFormat::from_extension("pdfx"), None);
        assert_eq!(DocumentFormat::from_extension(""), None);
    }

    #[test]
    fn request_constructors() {
        let explicit = ExtractionRequest::with_format("scan.png", DocumentFormat::Image);
        assert_eq!(explicit.declared_format, Some(DocumentFormat::Image));

        let inferred = ExtractionRequest::infer("report.pdf");
        assert!(inferred.declared_format.is_none());
        assert_eq!(inferred.path(), Path::new("report.pdf"));
    }
}
