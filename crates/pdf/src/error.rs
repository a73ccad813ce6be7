//! Document layer error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("could not decode input document: {0}")]
    Decode(String),

    #[error("pdfium library unavailable: {0}")]
    PdfiumUnavailable(String),

    #[error("page render failed: {0}")]
    Render(String),

    #[error("output encoding failed: {0}")]
    Encode(String),

    #[error("pdf write failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
