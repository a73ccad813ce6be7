//! Entity localization.
//!
//! Resolves NER character spans over an assembled line to the minimal
//! covering set of word tokens, and unions their geometry into one pixel
//! box per entity.

use veil_ner::{EntitySpan, PersonLabels};
use veil_ocr::WordToken;
use veil_rules::{DetectedBox, PiiLabel};

use crate::lines::LineGroup;

/// Localize person entities on one line.
///
/// Spans whose label is not a person designation are skipped. A span that
/// overlaps no token cannot be localized and is dropped — a box with
/// undefined geometry must never be emitted.
pub fn localize_person_entities(
    group: &LineGroup,
    spans: &[EntitySpan],
    person: &PersonLabels,
) -> Vec<DetectedBox> {
    let mut boxes = Vec::new();

    for span in spans {
        if !person.matches(&span.label) {
            continue;
        }

        let covered: Vec<&WordToken> = group
            .offsets
            .iter()
            .zip(&group.tokens)
            .filter(|((start, end), _)| !(*end <= span.start || *start >= span.end))
            .map(|(_, token)| token)
            .collect();

        if covered.is_empty() {
            log::debug!(
                "[Detect] entity span {}..{} overlaps no token, dropped",
                span.start,
                span.end
            );
            continue;
        }

        boxes.push(union_box(&covered, &span.text));
    }

    boxes
}

/// Geometric union of the covered tokens' boxes.
fn union_box(tokens: &[&WordToken], text: &str) -> DetectedBox {
    let left = tokens.iter().map(|t| t.left).min().unwrap_or(0);
    let top = tokens.iter().map(|t| t.top).min().unwrap_or(0);
    let right = tokens.iter().map(|t| t.right()).max().unwrap_or(0);
    let bottom = tokens.iter().map(|t| t.bottom()).max().unwrap_or(0);

    DetectedBox {
        label: PiiLabel::Name,
        text: text.to_string(),
        left,
        top,
        width: right - left,
        height: bottom - top,
        page_index: tokens[0].page_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::assemble_lines;

    fn token(text: &str, left: u32, top: u32, width: u32, height: u32) -> WordToken {
        WordToken {
            text: text.to_string(),
            left,
            top,
            width,
            height,
            block_id: 1,
            paragraph_id: 1,
            line_id: 1,
            page_index: 0,
        }
    }

    fn span(label: &str, text: &str, start: usize, end: usize) -> EntitySpan {
        EntitySpan {
            label: label.to_string(),
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_span_over_two_tokens_unions_geometry() {
        let tokens = vec![token("Ravi", 100, 50, 60, 20), token("Kumar", 170, 48, 70, 24)];
        let group = &assemble_lines(&tokens)[0];

        let boxes = localize_person_entities(
            group,
            &[span("PER", "Ravi Kumar", 0, 10)],
            &PersonLabels::default(),
        );

        assert_eq!(boxes.len(), 1);
        let b = &boxes[0];
        assert_eq!(b.label, PiiLabel::Name);
        assert_eq!(b.left, 100);
        assert_eq!(b.top, 48);
        assert_eq!(b.width, 140); // 170 + 70 - 100
        assert_eq!(b.height, 24); // 48 + 24 covers 50 + 20
    }

    #[test]
    fn test_span_over_single_token() {
        let tokens = vec![token("Mr", 10, 10, 20, 12), token("Sharma", 40, 10, 60, 12)];
        let group = &assemble_lines(&tokens)[0];

        // "Mr Sharma": span covering only "Sharma" (3..9).
        let boxes = localize_person_entities(
            group,
            &[span("PERSON", "Sharma", 3, 9)],
            &PersonLabels::default(),
        );

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].left, 40);
        assert_eq!(boxes[0].width, 60);
    }

    #[test]
    fn test_non_person_spans_are_skipped() {
        let tokens = vec![token("Mumbai", 10, 10, 80, 14)];
        let group = &assemble_lines(&tokens)[0];

        let boxes = localize_person_entities(
            group,
            &[span("LOC", "Mumbai", 0, 6)],
            &PersonLabels::default(),
        );
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_unlocalizable_span_is_dropped() {
        let tokens = vec![token("Ravi", 10, 10, 40, 14)];
        let group = &assemble_lines(&tokens)[0];

        // Span entirely past the line text.
        let boxes = localize_person_entities(
            group,
            &[span("PER", "ghost", 10, 15)],
            &PersonLabels::default(),
        );
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        // Token "Ravi" occupies [0, 4); a span starting exactly at 4 (the
        // separator) must not pull it in.
        let tokens = vec![token("Ravi", 10, 10, 40, 14), token("Kumar", 60, 10, 50, 14)];
        let group = &assemble_lines(&tokens)[0];

        let boxes = localize_person_entities(
            group,
            &[span("PER", "Kumar", 5, 10)],
            &PersonLabels::default(),
        );
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].left, 60);
        assert_eq!(boxes[0].width, 50);
    }
}
