//! OCR error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("ocr engine unavailable: {0}")]
    Unavailable(String),

    #[error("image processing failed: {0}")]
    ImageProcess(String),

    #[error("recognition failed: {0}")]
    Recognition(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
