//! Line assembly.
//!
//! Groups OCR word tokens into logical text lines and computes the
//! character-offset map from line text back to constituent tokens. The
//! offset arithmetic must match the single-space join exactly — entity
//! localization resolves NER spans through it.

use std::collections::BTreeMap;

use veil_ocr::WordToken;

/// Tokens sharing one `(block, paragraph, line)` identity, assembled into a
/// logical text line.
#[derive(Debug, Clone)]
pub struct LineGroup {
    /// Constituent tokens in OCR reading order.
    pub tokens: Vec<WordToken>,
    /// Token texts joined by single spaces.
    pub line_text: String,
    /// `offsets[k]` is the half-open character span of `tokens[k]` within
    /// `line_text`.
    pub offsets: Vec<(usize, usize)>,
}

/// Group a page's tokens into lines.
///
/// Tokens whose trimmed text is empty are skipped before grouping — OCR
/// noise carries no PII and must not shift offsets. Within a group the
/// OCR-reported order is preserved; groups themselves come back in key
/// order.
pub fn assemble_lines(tokens: &[WordToken]) -> Vec<LineGroup> {
    let mut groups: BTreeMap<(u32, u32, u32), Vec<WordToken>> = BTreeMap::new();

    for token in tokens {
        if token.text.trim().is_empty() {
            continue;
        }
        groups
            .entry((token.block_id, token.paragraph_id, token.line_id))
            .or_default()
            .push(token.clone());
    }

    groups.into_values().map(build_group).collect()
}

fn build_group(tokens: Vec<WordToken>) -> LineGroup {
    let mut line_text = String::new();
    let mut offsets = Vec::with_capacity(tokens.len());
    let mut pos = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            line_text.push(' ');
        }
        let len = token.text.chars().count();
        offsets.push((pos, pos + len));
        line_text.push_str(&token.text);
        pos += len + 1;
    }

    LineGroup {
        tokens,
        line_text,
        offsets,
    }
}
