//! Sentence segmentation of extracted document text

use regex::Regex;
use std::sync::LazyLock;

/// Terminal punctuation followed by whitespace, or a run of newlines
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+|\n+").expect("sentence boundary pattern is valid")
});

/// Split text into trimmed, non-empty candidate sentences in document order
///
/// Knows nothing about abbreviations, decimals or quotes, so "Dr. Smith" and
/// "1.5 hours" will be split.
///
/// # Examples
///
/// ```
/// use curio_extractor::segment;
///
/// let parts: Vec<&str> = segment("Bring water. Wear shoes!\n\nArrive early").collect();
/// assert_eq!(parts, vec!["Bring water", "Wear shoes", "Arrive early"]);
/// ```
pub fn segment(text: &str) -> impl Iterator<Item = &str> + '_ {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<&str> {
        segment(text).collect()
    }

    #[test]
    fn test_splits_on_terminal_punctuation() {
        assert_eq!(
            collect("One sentence. Two sentence! Three sentence? Four"),
            vec!["One sentence", "Two sentence", "Three sentence", "Four"]
        );
    }

    #[test]
    fn test_splits_on_newlines() {
        assert_eq!(
            collect("first line\nsecond line\n\n\nthird line"),
            vec!["first line", "second line", "third line"]
        );
    }

    #[test]
    fn test_punctuation_without_whitespace_is_kept() {
        assert_eq!(collect("Version 2.5 is required."), vec!["Version 2.5 is required."]);
    }

    #[test]
    fn test_trailing_period_at_end_of_text_is_kept() {
        assert_eq!(collect("Ends here."), vec!["Ends here."]);
    }

    #[test]
    fn test_page_markers_become_their_own_fragments() {
        assert_eq!(
            collect("\n[PAGE 1]\nFirst page text.\n\n[PAGE 2]\nSecond page text.\n"),
            vec!["[PAGE 1]", "First page text", "[PAGE 2]", "Second page text"]
        );
    }

    #[test]
    fn test_over_splits_abbreviations() {
        assert_eq!(collect("Ask Dr. Smith"), vec!["Ask Dr", "Smith"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(collect("").is_empty());
        assert!(collect("   \n\n  \t ").is_empty());
    }
}
