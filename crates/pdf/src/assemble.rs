//! Redacted-document reassembly.
//!
//! Multi-page output is a PDF whose pages each carry one full-page JPEG of
//! the redacted raster; page size in points is derived from the render DPI
//! so the output matches the source geometry. Single-image sources are
//! written back as PNG.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Cursor;
use std::path::Path;

use crate::error::PdfError;

const JPEG_QUALITY: u8 = 90;

/// Encode one page as PNG bytes.
pub fn encode_png(page: &DynamicImage) -> Result<Vec<u8>, PdfError> {
    let mut bytes = Vec::new();
    page.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| PdfError::Encode(format!("png encode failed: {}", e)))?;
    Ok(bytes)
}

/// Build a PDF from page rasters, preserving page order.
pub fn build_pdf(pages: &[DynamicImage], dpi: u32) -> Result<Vec<u8>, PdfError> {
    if pages.is_empty() {
        return Err(PdfError::Encode("no pages to assemble".to_string()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let rgb = page.to_rgb8();
        let (px_width, px_height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut jpeg), JPEG_QUALITY)
            .encode_image(&rgb)
            .map_err(|e| PdfError::Encode(format!("jpeg encode failed on page {}: {}", index, e)))?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_width as i64,
                "Height" => px_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let pt_width = px_width as f32 * 72.0 / dpi as f32;
        let pt_height = px_height as f32 * 72.0 / dpi as f32;

        // Scale the unit image square up to the full page.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(pt_width),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(pt_height),
                        Object::Real(0.0),
                        Object::Real(0.0),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(PdfError::Pdf)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(pt_width),
                Object::Real(pt_height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut Cursor::new(&mut bytes))?;

    log::info!("[Assemble] wrote {} page(s), {} bytes", pages.len(), bytes.len());

    Ok(bytes)
}

/// Derive the output filename: `redacted_<stem>.<extension>`.
pub fn output_filename(filename: &str, extension: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    format!("redacted_{}.{}", stem, extension)
}
