//! Input bytes to page rasters.

use pdfium_render::prelude::*;
use std::path::Path;

use crate::error::PdfError;
use crate::{is_pdf_filename, RasterConfig, RasterDocument, SourceKind};

/// Decode input bytes into ordered page rasters.
///
/// The filename's apparent format routes the bytes: `.pdf` goes through
/// pdfium page rendering at the configured DPI, anything else must decode
/// as a single raster image.
pub fn rasterize(
    bytes: &[u8],
    filename: &str,
    config: &RasterConfig,
) -> Result<RasterDocument, PdfError> {
    if is_pdf_filename(filename) {
        let pages = rasterize_pdf(bytes, config)?;
        Ok(RasterDocument {
            pages,
            kind: SourceKind::Pdf,
        })
    } else {
        let img = image::load_from_memory(bytes)
            .map_err(|e| PdfError::Decode(format!("not a decodable image: {}", e)))?;
        Ok(RasterDocument {
            pages: vec![img],
            kind: SourceKind::Image,
        })
    }
}

fn rasterize_pdf(bytes: &[u8], config: &RasterConfig) -> Result<Vec<image::DynamicImage>, PdfError> {
    let pdfium = bind_pdfium(config)?;

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| PdfError::Decode(format!("failed to load pdf: {}", e)))?;

    let page_count = document.pages().len();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page_index in 0..page_count {
        let page = document
            .pages()
            .get(page_index)
            .map_err(|e| PdfError::Render(format!("failed to get page {}: {}", page_index, e)))?;

        let page_width = page.width().value;
        let page_height = page.height().value;

        // PDF geometry is 72 pt/inch.
        let scale = config.dpi as f32 / 72.0;
        let target_width = (page_width * scale) as i32;
        let target_height = (page_height * scale) as i32;

        log::info!(
            "[Raster] page {}: {}x{} pt -> {}x{} px (dpi: {})",
            page_index,
            page_width,
            page_height,
            target_width,
            target_height,
            config.dpi
        );

        let render_config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_target_height(target_height);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| PdfError::Render(format!("failed to render page {}: {}", page_index, e)))?;

        pages.push(bitmap.as_image());
    }

    Ok(pages)
}

/// Bind the pdfium library: the configured directory first, then the
/// system library.
fn bind_pdfium(config: &RasterConfig) -> Result<Pdfium, PdfError> {
    if let Some(dir) = &config.pdfium_dir {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(Path::new(dir));
        log::debug!("[Raster] trying pdfium at {:?}", lib_path);
        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            return Ok(Pdfium::new(bindings));
        }
        log::warn!("[Raster] no usable pdfium in {:?}, trying system library", dir);
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| PdfError::PdfiumUnavailable(e.to_string()))
}
