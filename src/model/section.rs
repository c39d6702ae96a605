//! Sections, heading candidates and chunks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Name given to pages that no detected heading covers.
pub const UNKNOWN_SECTION: &str = "Unknown";

/// Name of the terminal bibliography section.
pub const REFERENCES_SECTION: &str = "References";

/// A named, page-bounded region of the document.
///
/// Invariant: `1 <= start_page <= end_page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section name (e.g. "Introduction")
    pub name: String,

    /// First page (1-indexed, inclusive)
    pub start_page: u32,

    /// Last page (inclusive)
    pub end_page: u32,
}

impl Section {
    /// Create a new section.
    pub fn new(name: impl Into<String>, start_page: u32, end_page: u32) -> Self {
        Self {
            name: name.into(),
            start_page,
            end_page,
        }
    }

    /// Whether the section covers the given page.
    pub fn contains(&self, page: u32) -> bool {
        (self.start_page..=self.end_page).contains(&page)
    }

    /// Number of pages covered.
    pub fn page_span(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page) + 1
    }
}

/// A line or ToC entry believed to start a new section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Page the heading appears on (1-indexed)
    pub page: u32,

    /// Vertical position on the page; 0 for ToC entries
    pub y: f32,

    /// Normalized heading name
    pub name: String,
}

impl HeadingCandidate {
    /// Create a new candidate.
    pub fn new(page: u32, y: f32, name: impl Into<String>) -> Self {
        Self {
            page,
            y,
            name: name.into(),
        }
    }

    /// Reading-order comparison on `(page, y)`.
    pub fn reading_order(&self, other: &Self) -> Ordering {
        self.page
            .cmp(&other.page)
            .then_with(|| self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }
}

/// A bounded, overlapping slice of page text tagged with its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable identifier within one run (`c_<order>`)
    pub id: String,

    /// Chunk text
    pub text: String,

    /// Owning section name
    pub section: String,

    /// Source page (1-indexed)
    pub page: u32,

    /// Position in the chunk stream (0-based)
    pub order: usize,
}

impl Chunk {
    /// Create a chunk; the id is derived from the stream order.
    pub fn new(order: usize, text: impl Into<String>, section: impl Into<String>, page: u32) -> Self {
        Self {
            id: format!("c_{}", order),
            text: text.into(),
            section: section.into(),
            page,
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_contains() {
        let section = Section::new("Methods", 3, 5);
        assert!(section.contains(3));
        assert!(section.contains(5));
        assert!(!section.contains(2));
        assert!(!section.contains(6));
        assert_eq!(section.page_span(), 3);
    }

    #[test]
    fn test_candidate_reading_order() {
        let a = HeadingCandidate::new(2, 300.0, "Methods");
        let b = HeadingCandidate::new(2, 80.0, "Introduction");
        let c = HeadingCandidate::new(1, 700.0, "Abstract");
        let mut all = vec![a, b, c];
        all.sort_by(|x, y| x.reading_order(y));
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Abstract", "Introduction", "Methods"]);
    }

    #[test]
    fn test_chunk_id_follows_order() {
        let chunk = Chunk::new(12, "text", "Results", 4);
        assert_eq!(chunk.id, "c_12");
        assert_eq!(chunk.order, 12);
    }

    #[test]
    fn test_chunk_serialized_shape() {
        let chunk = Chunk::new(0, "Hello.", "Abstract", 1);
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["id"], "c_0");
        assert_eq!(json["section"], "Abstract");
        assert_eq!(json["page"], 1);
        assert_eq!(json["order"], 0);
    }
}
