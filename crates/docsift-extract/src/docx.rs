// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX strategy — read the OOXML package and concatenate the text runs of
// the main document body.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use docsift_core::ExtractError;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::TextExtractor;

/// Name of the main document part inside the OOXML package.
const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Extracts the full inner text of a DOCX main document body.
///
/// All `<w:t>` runs inside `<w:body>` are concatenated in document order with
/// no separators and no normalization. A package without a main document
/// part, or a document without a body, yields empty text — that is a
/// successful extraction, not a failure.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocxExtractor {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let file = File::open(path).map_err(|err| {
            ExtractError::ParseFailure(format!("failed to open {}: {}", path.display(), err))
        })?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|err| {
            ExtractError::ParseFailure(format!(
                "failed to read {} as a DOCX package: {}",
                path.display(),
                err
            ))
        })?;

        let mut xml = String::new();
        match archive.by_name(MAIN_DOCUMENT_PART) {
            Ok(mut part) => {
                part.read_to_string(&mut xml).map_err(|err| {
                    ExtractError::ParseFailure(format!(
                        "failed to read {MAIN_DOCUMENT_PART} from {}: {}",
                        path.display(),
                        err
                    ))
                })?;
            }
            Err(ZipError::FileNotFound) => {
                debug!("package has no main document part");
                return Ok(String::new());
            }
            Err(err) => {
                return Err(ExtractError::ParseFailure(format!(
                    "failed to locate {MAIN_DOCUMENT_PART} in {}: {}",
                    path.display(),
                    err
                )));
            }
        }

        let text = body_text(&xml).map_err(|err| {
            ExtractError::ParseFailure(format!(
                "malformed {MAIN_DOCUMENT_PART} in {}: {}",
                path.display(),
                err
            ))
        })?;

        debug!(chars = text.len(), "DOCX text extracted");
        Ok(text)
    }
}

/// Walk the document XML and collect the character content of every `<w:t>`
/// element inside `<w:body>`. A document without a body yields empty text.
fn body_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_body = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"body" => in_body = true,
                b"t" if in_body => in_run_text = true,
                _ => {}
            },
            Event::End(element) => match element.local_name().as_ref() {
                b"body" => in_body = false,
                b"t" => in_run_text = false,
                _ => {}
            },
            Event::Text(run) if in_run_text => {
                text.push_str(&run.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
