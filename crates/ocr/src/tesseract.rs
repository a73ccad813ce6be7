//! Tesseract OCR engine (CLI wrapper).

use image::DynamicImage;
use std::process::Command;
use std::time::Instant;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::{TesseractConfig, WordToken};

/// Word rows in Tesseract TSV output carry level 5.
const TSV_WORD_LEVEL: i32 = 5;

/// Tesseract OCR engine.
///
/// Invokes the configured `tesseract` binary in TSV mode and parses the
/// word-level rows, keeping the block/paragraph/line grouping keys.
pub struct TesseractEngine {
    config: TesseractConfig,
    version: String,
}

impl TesseractEngine {
    /// Create the engine, probing the binary for its version.
    pub fn new(config: TesseractConfig) -> Result<Self, OcrError> {
        let binary = config.binary_path.as_deref().unwrap_or("tesseract");
        let version = get_tesseract_version(binary)?;

        log::info!("[Tesseract] initialized, version: {}", version);

        Ok(Self { config, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn binary_path(&self) -> &str {
        self.config.binary_path.as_deref().unwrap_or("tesseract")
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&mut self, img: &DynamicImage) -> Result<Vec<WordToken>, OcrError> {
        let temp_dir = std::env::temp_dir();
        let temp_input = temp_dir.join(format!("veil_ocr_input_{}.png", std::process::id()));

        img.save(&temp_input)
            .map_err(|e| OcrError::ImageProcess(format!("failed to save temp image: {}", e)))?;

        let results = self.recognize_file(temp_input.to_string_lossy().as_ref());

        let _ = std::fs::remove_file(&temp_input);

        results
    }

    fn recognize_file(&mut self, image_path: &str) -> Result<Vec<WordToken>, OcrError> {
        let start = Instant::now();

        let mut cmd = Command::new(self.binary_path());
        cmd.arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(self.config.lang_or_default())
            .arg("--psm")
            .arg(self.config.psm_or_default().to_string())
            .arg("--oem")
            .arg(self.config.oem_or_default().to_string())
            .arg("tsv");

        if let Some(tessdata_path) = &self.config.tessdata_path {
            cmd.env("TESSDATA_PREFIX", tessdata_path);
        }

        log::debug!(
            "[Tesseract] exec: {} {} -l {} --psm {} --oem {} tsv",
            self.binary_path(),
            image_path,
            self.config.lang_or_default(),
            self.config.psm_or_default(),
            self.config.oem_or_default()
        );

        let output = cmd
            .output()
            .map_err(|e| OcrError::Unavailable(format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with error: {}",
                stderr
            )));
        }

        let tsv_output = String::from_utf8_lossy(&output.stdout);
        let tokens = parse_tesseract_tsv(&tsv_output);

        log::info!(
            "[Tesseract] recognized {} words in {} ms",
            tokens.len(),
            start.elapsed().as_millis()
        );

        Ok(tokens)
    }
}

/// Parse Tesseract TSV output into word tokens.
///
/// TSV columns:
/// level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
///
/// Only word rows (level 5) with non-empty text and a valid confidence are
/// kept. Geometry stays in page pixels.
fn parse_tesseract_tsv(tsv: &str) -> Vec<WordToken> {
    let mut tokens = Vec::new();

    for line in tsv.lines().skip(1) {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }

        let level: i32 = cols[0].parse().unwrap_or(-1);
        let block_id: u32 = cols[2].parse().unwrap_or(0);
        let paragraph_id: u32 = cols[3].parse().unwrap_or(0);
        let line_id: u32 = cols[4].parse().unwrap_or(0);
        let left: u32 = cols[6].parse().unwrap_or(0);
        let top: u32 = cols[7].parse().unwrap_or(0);
        let width: u32 = cols[8].parse().unwrap_or(0);
        let height: u32 = cols[9].parse().unwrap_or(0);
        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        let text = cols[11].trim();

        if level != TSV_WORD_LEVEL || text.is_empty() || conf < 0.0 {
            continue;
        }

        tokens.push(WordToken {
            text: text.to_string(),
            left,
            top,
            width,
            height,
            block_id,
            paragraph_id,
            line_id,
            page_index: 0,
        });
    }

    tokens
}

/// Probe the Tesseract binary for its version string.
pub fn get_tesseract_version(binary_path: &str) -> Result<String, OcrError> {
    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .map_err(|e| OcrError::Unavailable(format!("cannot execute {}: {}", binary_path, e)))?;

    if !output.status.success() {
        return Err(OcrError::Unavailable(
            "tesseract --version exited with error".to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}{}", stdout, stderr);

    for line in combined.lines() {
        if line.contains("tesseract") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                return Ok(parts[1].trim_start_matches('v').to_string());
            }
        }
    }

    Ok("unknown".to_string())
}
