//! Redaction orchestration.
//!
//! Re-runs detection per page, filters to the requested labels and hands the
//! retained boxes to the compositor. The box list for a page is complete
//! before any pixel is painted, so detection never reads already-redacted
//! content.

use image::{DynamicImage, RgbaImage};
use std::collections::BTreeSet;

use veil_ner::{NerEngine, PersonLabels};
use veil_ocr::OcrEngine;
use veil_render::{apply_masks, MaskMode};
use veil_rules::{DetectedBox, PiiLabel};

use crate::detect::detect_page;
use crate::error::Result;

/// Redact every page, preserving page order.
pub fn redact_pages(
    pages: &[DynamicImage],
    labels: &BTreeSet<PiiLabel>,
    mode: MaskMode,
    partial: bool,
    ocr: &mut dyn OcrEngine,
    ner: &mut dyn NerEngine,
    person: &PersonLabels,
) -> Result<Vec<RgbaImage>> {
    let mut redacted = Vec::with_capacity(pages.len());

    for (page_index, page) in pages.iter().enumerate() {
        let detection = detect_page(page, page_index, ocr, ner, person)?;

        let retained: Vec<DetectedBox> = detection
            .boxes
            .into_iter()
            .filter(|b| labels.contains(&b.label))
            .collect();

        log::info!(
            "[Redact] page {}: {} box(es) retained for masking",
            page_index,
            retained.len()
        );

        redacted.push(apply_masks(page, &retained, mode, partial));
    }

    Ok(redacted)
}
