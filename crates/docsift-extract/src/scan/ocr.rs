// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image strategy — text recognition from raster images using the `ocrs`
// crate, a pure-Rust OCR engine backed by neural network models executed via
// `rten`.
//
// The engine requires two model files in a language-data directory:
//
// - `text-detection.rten` — locates text regions in the image.
// - `text-recognition.rten` — decodes characters from detected regions.
//
// The directory defaults to `ocr-models/` relative to the process working
// directory and must exist before extraction is attempted; its absence is a
// reported failure, never a crash.

use std::path::{Path, PathBuf};

use docsift_core::{EngineConfig, ExtractError};
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use crate::TextExtractor;
use crate::scan::enhance::ScanEnhancer;

/// Well-known filenames for the detection and recognition models.
const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Locations of the OCR model files.
#[derive(Debug, Clone)]
pub struct OcrModelConfig {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrModelConfig {
    /// Points at the engine's default model directory.
    fn default() -> Self {
        Self::from_dir(EngineConfig::default().ocr_model_dir)
    }
}

impl OcrModelConfig {
    /// Create a config from a model directory expected to contain
    /// `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Create a config pointing at two specific model files.
    pub fn from_paths(
        detection_model: impl Into<PathBuf>,
        recognition_model: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detection_model_path: detection_model.into(),
            recognition_model_path: recognition_model.into(),
        }
    }

    /// Verify that both model files exist. Runs before any recognition work.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if !self.detection_model_path.exists() {
            return Err(ExtractError::ResourceMissing(format!(
                "detection model not found at {}",
                self.detection_model_path.display()
            )));
        }
        if !self.recognition_model_path.exists() {
            return Err(ExtractError::ResourceMissing(format!(
                "recognition model not found at {}",
                self.recognition_model_path.display()
            )));
        }
        Ok(())
    }
}

/// Extracts text from raster images (JPEG/PNG) via OCR.
///
/// The recognized text is returned exactly as the engine produced it — no
/// whitespace normalization or post-processing. With `enhance` set, the input
/// image runs through the scan-cleanup pipeline first, which helps on noisy
/// phone photos and low-contrast scans.
#[derive(Debug)]
pub struct ImageExtractor {
    config: OcrModelConfig,
    enhance: bool,
}

impl ImageExtractor {
    pub fn new(config: OcrModelConfig, enhance: bool) -> Self {
        Self { config, enhance }
    }

    /// An extractor using the default model directory, without enhancement.
    pub fn with_defaults() -> Self {
        Self::new(OcrModelConfig::default(), false)
    }

    /// Load both models and initialise the ocrs engine.
    ///
    /// Model loading is the expensive step; the engine lives for the
    /// duration of one extraction call.
    fn build_engine(&self) -> Result<OcrEngine, ExtractError> {
        let detection_model = Model::load_file(&self.config.detection_model_path).map_err(
            |err| {
                ExtractError::EngineFailure(format!(
                    "failed to load detection model from {}: {}",
                    self.config.detection_model_path.display(),
                    err
                ))
            },
        )?;

        let recognition_model = Model::load_file(&self.config.recognition_model_path).map_err(
            |err| {
                ExtractError::EngineFailure(format!(
                    "failed to load recognition model from {}: {}",
                    self.config.recognition_model_path.display(),
                    err
                ))
            },
        )?;

        OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| {
            ExtractError::EngineFailure(format!("failed to initialise OCR engine: {}", err))
        })
    }

    /// Run recognition on an already-decoded image.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, engine: &OcrEngine, image: &DynamicImage) -> Result<String, ExtractError> {
        // ocrs expects RGB8.
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            ExtractError::EngineFailure(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = engine.prepare_input(source).map_err(|err| {
            ExtractError::EngineFailure(format!("OCR preprocessing failed: {}", err))
        })?;

        let text = engine.get_text(&input).map_err(|err| {
            ExtractError::EngineFailure(format!("OCR text recognition failed: {}", err))
        })?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}

impl TextExtractor for ImageExtractor {
    #[instrument(skip_all, fields(path = %path.display(), enhance = self.enhance))]
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        self.config.validate()?;

        let image = image::open(path).map_err(|err| {
            ExtractError::EngineFailure(format!(
                "failed to open image {}: {}",
                path.display(),
                err
            ))
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Image loaded for OCR"
        );

        let image = if self.enhance {
            ScanEnhancer::from_dynamic(image).enhance_scan().into_dynamic()
        } else {
            image
        };

        let engine = self.build_engine()?;
        self.recognize(&engine, &image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_well_known_filenames() {
        let config = OcrModelConfig::default();
        let detection = config.detection_model_path.to_string_lossy();
        assert!(
            detection.ends_with(DETECTION_MODEL_FILENAME),
            "detection model path should end with {DETECTION_MODEL_FILENAME}, got {detection}"
        );
        let recognition = config.recognition_model_path.to_string_lossy();
        assert!(
            recognition.ends_with(RECOGNITION_MODEL_FILENAME),
            "recognition model path should end with {RECOGNITION_MODEL_FILENAME}, got {recognition}"
        );
    }

    #[test]
    fn config_from_dir() {
        let config = OcrModelConfig::from_dir("/srv/ocr-models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/srv/ocr-models/text-detection.rten")
        );
        assert_eq!(
            config.recognition_model_path,
            PathBuf::from("/srv/ocr-models/text-recognition.rten")
        );
    }

    #[test]
    fn validate_reports_missing_resources() {
        let config = OcrModelConfig::from_dir("/nonexistent/ocr-models");
        let result = config.validate();
        assert!(matches!(result, Err(ExtractError::ResourceMissing(_))));
    }

    #[test]
    fn extract_checks_resources_before_reading_the_image() {
        let extractor = ImageExtractor::new(
            OcrModelConfig::from_dir("/nonexistent/ocr-models"),
            false,
        );
        // The image path does not exist either; the resource check must win.
        let result = extractor.extract(Path::new("/nonexistent/scan.png"));
        assert!(matches!(result, Err(ExtractError::ResourceMissing(_))));
    }

    #[test]
    fn unreadable_image_is_an_engine_failure() {
        // Model files exist (empty placeholders satisfy the resource check;
        // the engine is only built after image decoding succeeds).
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(DETECTION_MODEL_FILENAME), b"").expect("write");
        std::fs::write(dir.path().join(RECOGNITION_MODEL_FILENAME), b"").expect("write");

        let extractor = ImageExtractor::new(OcrModelConfig::from_dir(dir.path()), false);
        let result = extractor.extract(Path::new("/nonexistent/scan.png"));
        assert!(matches!(result, Err(ExtractError::EngineFailure(_))));
    }
}
