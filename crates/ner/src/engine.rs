//! NER engine trait.

use crate::error::NerError;
use crate::EntitySpan;

/// Unified NER engine interface.
///
/// `line_text` is one assembled OCR line; returned span offsets are
/// character offsets into that exact string.
pub trait NerEngine: Send {
    fn extract_entities(&mut self, line_text: &str) -> Result<Vec<EntitySpan>, NerError>;
}
