//! PII label taxonomy and pattern rules.
//!
//! The pattern registry is fixed: each rule is an anchored regex that must
//! match an OCR token in its entirety. Substring hits are not PII hits —
//! OCR splits words on whitespace, so a partial match is almost always a
//! fragment of something else.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category of detected sensitive text.
///
/// The pattern labels are fixed; `Name` is reserved for person entities
/// coming from the NER pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PiiLabel {
    Pan,
    Aadhaar,
    Phone,
    Email,
    Name,
}

impl PiiLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiLabel::Pan => "PAN",
            PiiLabel::Aadhaar => "AADHAAR",
            PiiLabel::Phone => "PHONE",
            PiiLabel::Email => "EMAIL",
            PiiLabel::Name => "NAME",
        }
    }

    /// Parse a label name, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<PiiLabel> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PAN" => Some(PiiLabel::Pan),
            "AADHAAR" => Some(PiiLabel::Aadhaar),
            "PHONE" => Some(PiiLabel::Phone),
            "EMAIL" => Some(PiiLabel::Email),
            "NAME" => Some(PiiLabel::Name),
            _ => None,
        }
    }
}

impl std::fmt::Display for PiiLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled box on a page, in page pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedBox {
    pub label: PiiLabel,
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub page_index: usize,
}

struct PatternRule {
    label: PiiLabel,
    regex: Regex,
}

/// Fixed registry, in matching order. A token takes the first match only.
///
/// PAN: 5 letters + 4 digits + 1 letter. AADHAAR: 4-4-4 digit groups with
/// optional space separators. PHONE: 10 digits starting 6-9. EMAIL:
/// local@domain.tld.
static PATTERNS: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule {
            label: PiiLabel::Pan,
            regex: Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap(),
        },
        PatternRule {
            label: PiiLabel::Aadhaar,
            regex: Regex::new(r"^\d{4}\s?\d{4}\s?\d{4}$").unwrap(),
        },
        PatternRule {
            label: PiiLabel::Phone,
            regex: Regex::new(r"^[6-9]\d{9}$").unwrap(),
        },
        PatternRule {
            label: PiiLabel::Email,
            regex: Regex::new(r"^[\w.-]+@[\w.-]+\.\w{2,3}$").unwrap(),
        },
    ]
});

/// Match a single OCR token against the pattern registry.
///
/// The token must satisfy a pattern in its entirety; the first matching
/// pattern in registry order wins.
pub fn match_token(text: &str) -> Option<PiiLabel> {
    let token = text.trim();
    if token.is_empty() {
        return None;
    }
    PATTERNS
        .iter()
        .find(|rule| rule.regex.is_match(token))
        .map(|rule| rule.label)
}

/// Normalize a requested label list into a label set.
///
/// Matching is case-insensitive; unknown labels are ignored (they simply
/// match nothing downstream).
pub fn parse_label_set(labels: &[String]) -> BTreeSet<PiiLabel> {
    labels.iter().filter_map(|l| PiiLabel::parse(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_token_match_only() {
        assert_eq!(match_token("ABCDE1234F"), Some(PiiLabel::Pan));
        // Substring matches must never produce a hit.
        assert_eq!(match_token("XABCDE1234F"), None);
        assert_eq!(match_token("ABCDE1234FX"), None);
    }

    #[test]
    fn test_aadhaar_with_and_without_spaces() {
        assert_eq!(match_token("123412341234"), Some(PiiLabel::Aadhaar));
        assert_eq!(match_token("1234 1234 1234"), Some(PiiLabel::Aadhaar));
        assert_eq!(match_token("12341234123"), None);
    }

    #[test]
    fn test_phone_leading_digit() {
        assert_eq!(match_token("9876543210"), Some(PiiLabel::Phone));
        assert_eq!(match_token("5876543210"), None);
        assert_eq!(match_token("98765432101"), None);
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(match_token("ravi.kumar@example.com"), Some(PiiLabel::Email));
        assert_eq!(match_token("not-an-email@"), None);
        assert_eq!(match_token("@example.com"), None);
    }

    #[test]
    fn test_whitespace_token_matches_nothing() {
        assert_eq!(match_token("   "), None);
        assert_eq!(match_token(""), None);
    }

    #[test]
    fn test_parse_label_set() {
        let labels = vec!["pan".to_string(), "Name".to_string(), "SSN".to_string()];
        let set = parse_label_set(&labels);
        assert!(set.contains(&PiiLabel::Pan));
        assert!(set.contains(&PiiLabel::Name));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_label_wire_form() {
        let json = serde_json::to_string(&PiiLabel::Aadhaar).unwrap();
        assert_eq!(json, "\"AADHAAR\"");
    }
}
