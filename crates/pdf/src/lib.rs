//! Document rasterization and reassembly.
//!
//! Input bytes become an ordered list of page rasters: PDFs are rendered
//! page-by-page through pdfium, anything else is decoded as a single image.
//! After redaction the pages are reassembled — PNG for a single-image
//! source, a PDF of full-page JPEGs otherwise.

mod assemble;
mod error;
mod raster;

pub use assemble::{build_pdf, encode_png, output_filename};
pub use error::PdfError;
pub use raster::rasterize;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// What the input bytes turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Image,
}

/// Rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterConfig {
    /// Render resolution for PDF pages. PDFs are 72 pt/inch; the rendered
    /// pixel size is `points * dpi / 72`.
    pub dpi: u32,
    /// Directory holding the pdfium shared library. Falls back to the
    /// system library when unset.
    pub pdfium_dir: Option<String>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            dpi: 150,
            pdfium_dir: None,
        }
    }
}

/// A decoded document: ordered page rasters plus the source kind.
#[derive(Debug)]
pub struct RasterDocument {
    pub pages: Vec<DynamicImage>,
    pub kind: SourceKind,
}

pub(crate) fn is_pdf_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_detection() {
        assert!(is_pdf_filename("scan.pdf"));
        assert!(is_pdf_filename("SCAN.PDF"));
        assert!(!is_pdf_filename("scan.png"));
        assert!(!is_pdf_filename("pdf"));
    }

    #[test]
    fn test_raster_config_default_dpi() {
        assert_eq!(RasterConfig::default().dpi, 150);
    }
}
