//! Core orchestration for PII detection and redaction.
//!
//! Wires the collaborator seams (OCR, NER, rasterization) to the detection
//! and compositing stages and exposes the two document-level operations:
//!
//! - [`PiiService::detect`]: bytes in, labeled boxes and a summary out.
//! - [`PiiService::redact`]: bytes in, masked document bytes out.
//!
//! Everything is request-scoped; no state survives a call.

pub mod config;
mod detect;
mod entities;
mod error;
mod lines;
mod redact;
mod types;

pub use config::{load_config, save_config, ConfigError, EngineConfig};
pub use detect::{detect_page, detect_pages, PageDetection};
pub use error::{CoreError, Result};
pub use lines::{assemble_lines, LineGroup};
pub use redact::redact_pages;
pub use types::{BoxGeometry, DetectedEntity, Detection, RedactedDocument, Summary};

// Collaborator seams, re-exported for embedders and tests.
pub use veil_ner::{EntitySpan, NerConfig, NerEngine, NerError, PersonLabels};
pub use veil_ocr::{OcrEngine, OcrError, TesseractConfig, TesseractEngine, WordToken};
pub use veil_pdf::{RasterConfig, SourceKind};
pub use veil_render::{MaskMode, UnsupportedMode};
pub use veil_rules::{parse_label_set, DetectedBox, PiiLabel};

use image::DynamicImage;
use veil_pdf::{build_pdf, encode_png, output_filename, rasterize};

/// The detection and redaction pipeline with its collaborators attached.
pub struct PiiService {
    ocr: Box<dyn OcrEngine>,
    ner: Box<dyn NerEngine>,
    person: PersonLabels,
    raster: RasterConfig,
}

impl PiiService {
    /// Build the service from configuration: Tesseract OCR plus the
    /// configured NER backend.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let ocr = TesseractEngine::new(config.tesseract.clone())?;
        let ner = veil_ner::create_engine(&config.ner)?;
        Ok(Self {
            ocr: Box::new(ocr),
            ner,
            person: config.ner.person_labels(),
            raster: config.raster.clone(),
        })
    }

    /// Build the service around explicit collaborator instances.
    pub fn with_engines(
        ocr: Box<dyn OcrEngine>,
        ner: Box<dyn NerEngine>,
        person: PersonLabels,
        raster: RasterConfig,
    ) -> Self {
        Self {
            ocr,
            ner,
            person,
            raster,
        }
    }

    /// Detect PII in a document.
    pub fn detect(&mut self, file_bytes: &[u8], filename: &str) -> Result<Detection> {
        let raster = rasterize(file_bytes, filename, &self.raster)?;
        log::info!(
            "[Detect] {}: {} page(s) ({:?})",
            filename,
            raster.pages.len(),
            raster.kind
        );

        let (boxes, summary) = detect_pages(
            &raster.pages,
            self.ocr.as_mut(),
            self.ner.as_mut(),
            &self.person,
        )?;

        Ok(Detection {
            entities: boxes.iter().map(DetectedEntity::from).collect(),
            summary,
        })
    }

    /// Redact the requested labels from a document.
    ///
    /// `labels` is case-normalized; unknown labels match nothing. The mode
    /// string is validated before any page work starts.
    pub fn redact(
        &mut self,
        file_bytes: &[u8],
        filename: &str,
        labels: &[String],
        mode: &str,
        partial: bool,
    ) -> Result<RedactedDocument> {
        let mode: MaskMode = mode.parse()?;
        let label_set = parse_label_set(labels);

        let raster = rasterize(file_bytes, filename, &self.raster)?;
        log::info!(
            "[Redact] {}: {} page(s), labels {:?}, mode {:?}, partial {}",
            filename,
            raster.pages.len(),
            label_set,
            mode,
            partial
        );

        let masked = redact_pages(
            &raster.pages,
            &label_set,
            mode,
            partial,
            self.ocr.as_mut(),
            self.ner.as_mut(),
            &self.person,
        )?;

        let mut pages: Vec<DynamicImage> = masked.into_iter().map(DynamicImage::ImageRgba8).collect();

        // Single image in, single image out; anything else becomes a PDF.
        if raster.kind == SourceKind::Image && pages.len() == 1 {
            let page = pages.remove(0);
            Ok(RedactedDocument {
                bytes: encode_png(&page)?,
                filename: output_filename(filename, "png"),
            })
        } else {
            Ok(RedactedDocument {
                bytes: build_pdf(&pages, self.raster.dpi)?,
                filename: output_filename(filename, "pdf"),
            })
        }
    }
}
