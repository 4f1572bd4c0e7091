//! Requirement detection

use crate::classify::{contains_any, PRIORITY_KEYWORDS};
use regex::Regex;
use std::sync::LazyLock;

/// Leading list numbering such as "3. " or "12) "
static ENUMERATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").expect("enumeration pattern is valid"));

/// Whether a fragment reads as a requirement rather than narrative text
///
/// True when the fragment contains any priority keyword, or starts with a
/// numbered-list prefix.
///
/// # Examples
///
/// ```
/// use curio_extractor::is_requirement;
///
/// assert!(is_requirement("The vendor shall provide manikins"));
/// assert!(is_requirement("4) Provide manikins for each pair"));
/// assert!(!is_requirement("The county was founded in 1850"));
/// ```
pub fn is_requirement(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    PRIORITY_KEYWORDS
        .iter()
        .any(|(_, keywords)| contains_any(&lower, keywords))
        || ENUMERATION_PREFIX.is_match(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection_is_case_insensitive() {
        assert!(is_requirement("Trainers MUST hold current credentials"));
        assert!(is_requirement("Recommended class size is twelve"));
        assert!(is_requirement("Optional refresher modules"));
    }

    #[test]
    fn test_enumeration_prefix() {
        assert!(is_requirement("1. Provide a classroom with projector"));
        assert!(is_requirement("10) Provide a classroom with projector"));
        assert!(!is_requirement("1.Provide a classroom with projector"));
        assert!(!is_requirement("Section 1. Provide a classroom"));
        assert!(!is_requirement("a) Provide a classroom with projector"));
    }

    #[test]
    fn test_narrative_text_rejected() {
        assert!(!is_requirement("The county operates four fire stations"));
        assert!(!is_requirement(""));
    }
}
