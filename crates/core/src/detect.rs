//! Detection aggregation.
//!
//! Per page, the pattern pass over word tokens and the entity pass over
//! assembled lines feed one append-only box list. The two signals are not
//! deduplicated: a token that is both pattern-matched and covered by an
//! entity span yields both boxes.

use image::DynamicImage;

use veil_ner::{NerEngine, PersonLabels};
use veil_ocr::{prepare_for_ocr, OcrEngine, WordToken};
use veil_rules::{match_token, DetectedBox, PiiLabel};

use crate::entities::localize_person_entities;
use crate::error::Result;
use crate::lines::assemble_lines;
use crate::types::Summary;

/// Detection output for one page.
#[derive(Debug, Clone)]
pub struct PageDetection {
    pub boxes: Vec<DetectedBox>,
    pub summary: Summary,
}

/// Run both detection passes over one page raster.
///
/// Recognition sees a preprocessed copy; geometry refers to the original
/// raster (preprocessing preserves dimensions).
pub fn detect_page(
    page: &DynamicImage,
    page_index: usize,
    ocr: &mut dyn OcrEngine,
    ner: &mut dyn NerEngine,
    person: &PersonLabels,
) -> Result<PageDetection> {
    let prepared = prepare_for_ocr(page);
    let recognized = ocr.recognize(&prepared)?;

    // OCR output is page-agnostic; restamp instead of mutating it.
    let tokens: Vec<WordToken> = recognized
        .into_iter()
        .map(|t| WordToken { page_index, ..t })
        .collect();

    let mut boxes = Vec::new();
    let mut summary = Summary::new();

    for token in &tokens {
        if token.text.trim().is_empty() {
            continue;
        }
        if let Some(label) = match_token(&token.text) {
            boxes.push(DetectedBox {
                label,
                text: token.text.clone(),
                left: token.left,
                top: token.top,
                width: token.width,
                height: token.height,
                page_index,
            });
            *summary.entry(label).or_insert(0) += 1;
        }
    }

    for group in assemble_lines(&tokens) {
        if group.line_text.trim().is_empty() {
            continue;
        }
        let spans = ner.extract_entities(&group.line_text)?;
        let localized = localize_person_entities(&group, &spans, person);
        if !localized.is_empty() {
            *summary.entry(PiiLabel::Name).or_insert(0) += localized.len() as u32;
        }
        boxes.extend(localized);
    }

    log::info!(
        "[Detect] page {}: {} token(s), {} box(es)",
        page_index,
        tokens.len(),
        boxes.len()
    );

    Ok(PageDetection { boxes, summary })
}

/// Run detection over every page, merging per-page summaries additively.
pub fn detect_pages(
    pages: &[DynamicImage],
    ocr: &mut dyn OcrEngine,
    ner: &mut dyn NerEngine,
    person: &PersonLabels,
) -> Result<(Vec<DetectedBox>, Summary)> {
    let mut all_boxes = Vec::new();
    let mut combined = Summary::new();

    for (page_index, page) in pages.iter().enumerate() {
        let detection = detect_page(page, page_index, ocr, ner, person)?;
        all_boxes.extend(detection.boxes);
        for (label, count) in detection.summary {
            *combined.entry(label).or_insert(0) += count;
        }
    }

    Ok((all_boxes, combined))
}
