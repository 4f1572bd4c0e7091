//! Clause module - the single record produced by RFP extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength of obligation expressed by a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Mandatory language (must, shall, required, mandatory)
    Must,

    /// Advisory language (should, recommended, preferred)
    Should,

    /// Permissive language, and the default when nothing else matches
    May,
}

impl Priority {
    /// Get the priority name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Must => "must",
            Priority::Should => "should",
            Priority::May => "may",
        }
    }

    /// Parse a priority from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "must" => Some(Priority::Must),
            "should" => Some(Priority::Should),
            "may" => Some(Priority::May),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid priority: {}", s))
    }
}

/// Subject-matter bucket of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Hours, days, schedule and other time constraints
    Duration,

    /// Topics and subject matter to be taught
    Content,

    /// Tests, exams and certification
    Assessment,

    /// Equipment, materials and supplies
    Equipment,

    /// Nothing recognizable; the default
    Other,
}

impl Category {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Duration => "duration",
            Category::Content => "content",
            Category::Assessment => "assessment",
            Category::Equipment => "equipment",
            Category::Other => "other",
        }
    }

    /// Parse a category from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "duration" => Some(Category::Duration),
            "content" => Some(Category::Content),
            "assessment" => Some(Category::Assessment),
            "equipment" => Some(Category::Equipment),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// A requirement clause extracted from an RFP document
///
/// Clauses are immutable once built: fields are only reachable through
/// accessors, and the `with_*` builders consume the value. Category and
/// priority are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    text: String,
    category: Category,
    priority: Priority,
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    section: Option<String>,
}

impl Clause {
    /// Create a clause with no page or section provenance
    pub fn new(text: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
            page_number: None,
            section: None,
        }
    }

    /// Attach the page the clause was found on
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Attach a section / provenance label, replacing any existing one
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// The requirement sentence as it appeared in the document
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Subject-matter category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Obligation strength
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Page the clause came from, when the source tracks pages
    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    /// Section or provenance label
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }
}
