//! Keyword classification of requirement text
//!
//! Both classifiers are total: every input gets a priority and a category.
//! Matching is plain substring search over the lower-cased text, so "time"
//! also matches "sometimes" and "test" matches "latest".

use curio_domain::{Category, Priority};

/// Priority keyword sets, in precedence order
///
/// The first set with any keyword present decides the priority, so mandatory
/// language wins over advisory language in the same sentence.
pub const PRIORITY_KEYWORDS: [(Priority, &[&str]); 3] = [
    (Priority::Must, &["must", "shall", "required", "mandatory"]),
    (Priority::Should, &["should", "recommended", "preferred"]),
    (Priority::May, &["may", "optional", "could"]),
];

/// Category keyword sets, in tie-break order
pub const CATEGORY_KEYWORDS: [(Category, &[&str]); 4] = [
    (Category::Duration, &["hour", "minute", "day", "week", "duration", "time"]),
    (Category::Content, &["topic", "subject", "content", "cover", "include", "teach"]),
    (Category::Assessment, &["test", "exam", "assess", "evaluat", "quiz", "certification"]),
    (Category::Equipment, &["equipment", "material", "tool", "resource", "supply"]),
];

/// Priority implied by the text, `May` when no keyword is present
///
/// # Examples
///
/// ```
/// use curio_domain::Priority;
/// use curio_extractor::classify_priority;
///
/// assert_eq!(classify_priority("Vendors may, and shall, comply"), Priority::Must);
/// assert_eq!(classify_priority("Lunch is provided"), Priority::May);
/// ```
pub fn classify_priority(text: &str) -> Priority {
    let lower = text.to_lowercase();
    PRIORITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(priority, _)| *priority)
        .unwrap_or(Priority::May)
}

/// Category with the highest keyword score, `Other` when nothing matches
///
/// A keyword counts once however often it appears. Ties go to the category
/// listed first in [`CATEGORY_KEYWORDS`].
pub fn classify_category(text: &str) -> Category {
    let lower = text.to_lowercase();
    let mut best = (Category::Other, 0);
    for (category, _) in CATEGORY_KEYWORDS.iter() {
        let score = category_score_lower(&lower, *category);
        if score > best.1 {
            best = (*category, score);
        }
    }
    best.0
}

/// Number of distinct keywords of `category` present in the text
///
/// Always 0 for `Category::Other`.
pub fn category_score(text: &str, category: Category) -> usize {
    category_score_lower(&text.to_lowercase(), category)
}

fn category_score_lower(lower: &str, category: Category) -> usize {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, keywords)| keywords.iter().filter(|k| lower.contains(*k)).count())
        .unwrap_or(0)
}

pub(crate) fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}
