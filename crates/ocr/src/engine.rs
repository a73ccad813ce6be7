//! OCR engine trait.

use crate::error::OcrError;
use crate::WordToken;
use image::DynamicImage;

/// Unified OCR engine interface.
///
/// Implementations recognize one page raster at a time and return word-level
/// tokens. Output is read-only to the caller: downstream stages build their
/// own values from it and never mutate the token list.
pub trait OcrEngine: Send {
    /// Recognize the words on a page image.
    fn recognize(&mut self, img: &DynamicImage) -> Result<Vec<WordToken>, OcrError>;

    /// Recognize an image file on disk.
    fn recognize_file(&mut self, image_path: &str) -> Result<Vec<WordToken>, OcrError> {
        let img = image::open(image_path)
            .map_err(|e| OcrError::ImageProcess(format!("failed to open image: {}", e)))?;
        self.recognize(&img)
    }
}
