//! Core error taxonomy.
//!
//! A collaborator failure fails the whole request. Detection is a safety
//! pass: partial output after a missed pass would look like a clean
//! document when it is not.

use veil_ner::NerError;
use veil_ocr::OcrError;
use veil_pdf::PdfError;
use veil_render::UnsupportedMode;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed input bytes: a client error, not retried.
    #[error("could not decode input document: {0}")]
    InputDecoding(String),

    /// Document processing failed after decode (render, reassembly).
    #[error("document processing failed: {0}")]
    Document(#[source] PdfError),

    /// The OCR collaborator failed.
    #[error("ocr failure: {0}")]
    Ocr(#[from] OcrError),

    /// The NER collaborator failed.
    #[error("ner failure: {0}")]
    Ner(#[from] NerError),

    /// Unrecognized redaction mode. Fails fast before any page is touched.
    #[error("unsupported redaction mode: {0}")]
    UnsupportedMode(String),
}

impl From<PdfError> for CoreError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Decode(msg) => CoreError::InputDecoding(msg),
            other => CoreError::Document(other),
        }
    }
}

impl From<UnsupportedMode> for CoreError {
    fn from(err: UnsupportedMode) -> Self {
        CoreError::UnsupportedMode(err.0)
    }
}
