//! OCR collaborator boundary.
//!
//! The engine contract is word-level: one [`WordToken`] per recognized word,
//! with pixel geometry and the block/paragraph/line grouping keys the line
//! assembler depends on. The bundled implementation wraps the Tesseract CLI.

mod engine;
mod error;
mod preprocess;
mod tesseract;

pub use engine::OcrEngine;
pub use error::OcrError;
pub use preprocess::prepare_for_ocr;
pub use tesseract::{get_tesseract_version, TesseractEngine};

use serde::{Deserialize, Serialize};

/// One OCR-recognized word.
///
/// Geometry is in page pixel coordinates. `block_id`/`paragraph_id`/`line_id`
/// identify the layout group the engine placed the word in; words sharing all
/// three belong to the same text line. Engines always emit `page_index = 0`
/// (they see a single page); the caller restamps it for multi-page documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub block_id: u32,
    pub paragraph_id: u32,
    pub line_id: u32,
    pub page_index: usize,
}

impl WordToken {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Tesseract configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TesseractConfig {
    /// Tesseract executable path. Falls back to `tesseract` on PATH.
    pub binary_path: Option<String>,
    /// tessdata directory, exported as TESSDATA_PREFIX when set.
    pub tessdata_path: Option<String>,
    /// Recognition language(s), e.g. "eng" or "eng+hin".
    pub lang: Option<String>,
    /// Page segmentation mode (0-13).
    pub psm: Option<u8>,
    /// OCR engine mode (0-3).
    pub oem: Option<u8>,
}

impl TesseractConfig {
    pub fn lang_or_default(&self) -> &str {
        self.lang.as_deref().unwrap_or("eng")
    }

    pub fn psm_or_default(&self) -> u8 {
        self.psm.unwrap_or(6)
    }

    pub fn oem_or_default(&self) -> u8 {
        self.oem.unwrap_or(1)
    }
}
