//! Image preprocessing for OCR.
//!
//! Lightweight cleanup applied to a copy of the page before recognition:
//! grayscale, histogram equalization, mild unsharp mask. Detection geometry
//! and redaction always run against the original raster — preprocessing must
//! not change image dimensions.

use image::DynamicImage;
use imageproc::contrast::equalize_histogram;

const SHARPEN_SIGMA: f32 = 1.5;
const SHARPEN_THRESHOLD: i32 = 2;

/// Prepare a page raster for recognition.
pub fn prepare_for_ocr(img: &DynamicImage) -> DynamicImage {
    let gray = img.to_luma8();
    let equalized = equalize_histogram(&gray);
    DynamicImage::ImageLuma8(equalized).unsharpen(SHARPEN_SIGMA, SHARPEN_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_dimensions_preserved() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(320, 200));
        let prepared = prepare_for_ocr(&img);
        assert_eq!(prepared.width(), 320);
        assert_eq!(prepared.height(), 200);
    }

    #[test]
    fn test_output_is_single_channel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([200, 10, 10, 255]),
        ));
        let prepared = prepare_for_ocr(&img);
        assert_eq!(prepared.color().channel_count(), 1);
    }
}
