//! Wire-shaped result types for the detect and redact operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use veil_rules::{DetectedBox, PiiLabel};

/// Label → count of detected boxes across all pages of one document.
pub type Summary = BTreeMap<PiiLabel, u32>;

/// Box geometry as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// One detected entity in a detect response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub label: PiiLabel,
    pub text: String,
    pub page: usize,
    #[serde(rename = "box")]
    pub bounds: BoxGeometry,
}

impl From<&DetectedBox> for DetectedEntity {
    fn from(b: &DetectedBox) -> Self {
        DetectedEntity {
            label: b.label,
            text: b.text.clone(),
            page: b.page_index,
            bounds: BoxGeometry {
                left: b.left,
                top: b.top,
                width: b.width,
                height: b.height,
            },
        }
    }
}

/// Result of the detect operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub entities: Vec<DetectedEntity>,
    pub summary: Summary,
}

/// Result of the redact operation.
#[derive(Debug, Clone)]
pub struct RedactedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}
