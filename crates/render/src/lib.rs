//! Redaction compositing.
//!
//! Takes the detected boxes for one page and produces a masked copy of the
//! page raster. The input page is never touched: every box is resolved to a
//! clamped mask region first, then the regions are painted onto a fresh RGBA
//! copy. `black` fills with solid black; `blur` replaces the region with a
//! heavily blurred copy of itself.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use veil_rules::{DetectedBox, PiiLabel};

/// Blur strength for `blur` mode. Large enough that the masked text is not
/// recoverable by inspection.
const BLUR_SIGMA: f32 = 10.0;

/// Visual masking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    Black,
    Blur,
}

/// Raised for a masking mode outside the accepted set. Redaction must fail
/// fast here rather than ship a document masked differently than requested.
#[derive(Debug, thiserror::Error)]
#[error("unsupported redaction mode: {0}")]
pub struct UnsupportedMode(pub String);

impl FromStr for MaskMode {
    type Err = UnsupportedMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(MaskMode::Black),
            "blur" => Ok(MaskMode::Blur),
            other => Err(UnsupportedMode(other.to_string())),
        }
    }
}

/// Fraction of the box width masked in partial mode.
///
/// Structured numbers keep their tail visible for reference; names are
/// always covered in full.
pub fn mask_ratio(label: PiiLabel) -> f64 {
    match label {
        PiiLabel::Aadhaar | PiiLabel::Phone => 0.7,
        PiiLabel::Pan | PiiLabel::Email => 0.6,
        _ => 1.0,
    }
}

/// A pixel region to paint, clamped to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolve a detected box to its mask region.
///
/// Partial mode keeps the box's left edge and masks `width * ratio` of it at
/// full height. Returns `None` when the clamped region is empty.
pub fn mask_region(
    detected: &DetectedBox,
    partial: bool,
    page_width: u32,
    page_height: u32,
) -> Option<MaskRegion> {
    let masked_width = if partial {
        (detected.width as f64 * mask_ratio(detected.label)).round() as u32
    } else {
        detected.width
    };

    if detected.left >= page_width || detected.top >= page_height {
        return None;
    }

    let width = masked_width.min(page_width - detected.left);
    let height = detected.height.min(page_height - detected.top);

    if width == 0 || height == 0 {
        return None;
    }

    Some(MaskRegion {
        x: detected.left,
        y: detected.top,
        width,
        height,
    })
}

/// Composite the masks for one page onto a fresh copy of its raster.
///
/// All regions are resolved before any pixel is painted, so detection input
/// never sees partially redacted content. A page with no boxes comes back as
/// an untouched copy.
pub fn apply_masks(
    page: &DynamicImage,
    boxes: &[DetectedBox],
    mode: MaskMode,
    partial: bool,
) -> RgbaImage {
    let mut out = page.to_rgba8();
    let (page_width, page_height) = out.dimensions();

    let regions: Vec<MaskRegion> = boxes
        .iter()
        .filter_map(|b| mask_region(b, partial, page_width, page_height))
        .collect();

    for region in &regions {
        match mode {
            MaskMode::Black => fill_black(&mut out, region),
            MaskMode::Blur => blur_region(&mut out, region),
        }
    }

    if !regions.is_empty() {
        log::info!(
            "[Redact] painted {} region(s) ({:?}, partial: {})",
            regions.len(),
            mode,
            partial
        );
    }

    out
}

fn fill_black(img: &mut RgbaImage, region: &MaskRegion) {
    let rect = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
    draw_filled_rect_mut(img, rect, Rgba([0u8, 0u8, 0u8, 255u8]));
}

fn blur_region(img: &mut RgbaImage, region: &MaskRegion) {
    let cropped =
        image::imageops::crop_imm(img, region.x, region.y, region.width, region.height).to_image();
    let blurred = image::imageops::blur(&cropped, BLUR_SIGMA);
    image::imageops::replace(img, &blurred, region.x as i64, region.y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_page(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 255, 255, 255]),
        ))
    }

    fn boxed(label: PiiLabel, left: u32, top: u32, width: u32, height: u32) -> DetectedBox {
        DetectedBox {
            label,
            text: String::new(),
            left,
            top,
            width,
            height,
            page_index: 0,
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("black".parse::<MaskMode>().unwrap(), MaskMode::Black);
        assert_eq!("BLUR".parse::<MaskMode>().unwrap(), MaskMode::Blur);
        assert!("pixelate".parse::<MaskMode>().is_err());
        assert!("".parse::<MaskMode>().is_err());
    }

    #[test]
    fn test_partial_ratio_law() {
        // An AADHAAR box of width 100 at left 0 masks exactly [0, 70).
        let page = white_page(200, 40);
        let boxes = [boxed(PiiLabel::Aadhaar, 0, 10, 100, 20)];
        let out = apply_masks(&page, &boxes, MaskMode::Black, true);

        for x in 0..70 {
            assert_eq!(out.get_pixel(x, 15), &Rgba([0, 0, 0, 255]), "x={}", x);
        }
        for x in 70..200 {
            assert_eq!(out.get_pixel(x, 15), &Rgba([255, 255, 255, 255]), "x={}", x);
        }
    }

    #[test]
    fn test_partial_name_is_fully_masked() {
        let region = mask_region(&boxed(PiiLabel::Name, 10, 10, 80, 20), true, 200, 40).unwrap();
        assert_eq!(region.width, 80);
    }

    #[test]
    fn test_full_mode_ignores_ratio() {
        let region = mask_region(&boxed(PiiLabel::Pan, 10, 10, 80, 20), false, 200, 40).unwrap();
        assert_eq!(region.width, 80);
    }

    #[test]
    fn test_region_clamped_to_page() {
        let region = mask_region(&boxed(PiiLabel::Email, 150, 30, 100, 40), false, 200, 40).unwrap();
        assert_eq!(region.width, 50);
        assert_eq!(region.height, 10);

        assert!(mask_region(&boxed(PiiLabel::Email, 250, 10, 20, 10), false, 200, 40).is_none());
    }

    #[test]
    fn test_no_boxes_returns_identical_copy() {
        let page = white_page(64, 64);
        let out = apply_masks(&page, &[], MaskMode::Black, false);
        assert_eq!(out.as_raw(), page.to_rgba8().as_raw());
    }

    #[test]
    fn test_input_page_is_untouched() {
        let page = white_page(64, 64);
        let boxes = [boxed(PiiLabel::Phone, 0, 0, 64, 64)];
        let _ = apply_masks(&page, &boxes, MaskMode::Black, false);
        assert_eq!(page.to_rgba8().get_pixel(32, 32), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_blur_changes_region_only() {
        // Checkerboard inside the box so the blur has structure to smear.
        let mut raw = RgbaImage::from_pixel(100, 40, Rgba([255, 255, 255, 255]));
        for y in 5..25 {
            for x in 5..45 {
                if (x + y) % 2 == 0 {
                    raw.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                }
            }
        }
        let page = DynamicImage::ImageRgba8(raw);
        let boxes = [boxed(PiiLabel::Email, 5, 5, 40, 20)];
        let out = apply_masks(&page, &boxes, MaskMode::Blur, false);

        // Inside: the checkerboard is gone, pixels pulled toward gray.
        let inside = out.get_pixel(20, 15);
        assert_ne!(inside, &Rgba([0, 0, 0, 255]));
        assert_ne!(inside, &Rgba([255, 255, 255, 255]));
        // Outside: untouched.
        assert_eq!(out.get_pixel(80, 15), &Rgba([255, 255, 255, 255]));
    }
}
