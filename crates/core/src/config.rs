//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use veil_ner::NerConfig;
use veil_ocr::TesseractConfig;
use veil_pdf::RasterConfig;

/// Full engine configuration: collaborator paths and render settings, all
/// explicit — nothing is read from hardcoded locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Tesseract OCR configuration.
    pub tesseract: TesseractConfig,
    /// NER backend configuration.
    pub ner: NerConfig,
    /// Rasterization configuration.
    pub raster: RasterConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load configuration from a JSON file. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Persist configuration as pretty-printed JSON.
pub fn save_config(path: &Path, config: &EngineConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/veil-config.json")).unwrap();
        assert_eq!(config.raster.dpi, 150);
        assert_eq!(config.tesseract.lang_or_default(), "eng");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = EngineConfig::default();
        config.tesseract.binary_path = Some("/usr/bin/tesseract".into());
        config.ner.endpoint = Some("http://127.0.0.1:9090/extract".into());
        config.raster.dpi = 200;

        let raw = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.tesseract.binary_path.as_deref(), Some("/usr/bin/tesseract"));
        assert_eq!(back.raster.dpi, 200);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: EngineConfig =
            serde_json::from_str(r#"{"tesseract":{"psm":11}}"#).unwrap();
        assert_eq!(back.tesseract.psm_or_default(), 11);
        assert_eq!(back.raster.dpi, 150);
    }
}
