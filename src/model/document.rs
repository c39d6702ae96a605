//! Document-level types.

use super::{Chunk, Section};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata reported by the PDF engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title from the info dictionary
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Raw creation date (PDF `D:YYYYMMDDHHmmSS` or RFC 3339)
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    /// Parse the creation date.
    ///
    /// PDF dates may be truncated after any component (`D:2021`,
    /// `D:202103`), so the longest parsable prefix wins.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let raw = self.creation_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        let digits: String = raw
            .strip_prefix("D:")
            .unwrap_or(raw)
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .take(14)
            .collect();

        let naive = match digits.len() {
            14 => NaiveDateTime::parse_from_str(&digits, "%Y%m%d%H%M%S").ok(),
            8..=13 => NaiveDate::parse_from_str(&digits[..8], "%Y%m%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            4..=7 => digits[..4]
                .parse::<i32>()
                .ok()
                .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            _ => None,
        }?;
        Some(naive.and_utc())
    }

    /// Publication year as a string; the raw date when it cannot be parsed.
    pub fn year(&self) -> String {
        match self.created() {
            Some(dt) => dt.year().to_string(),
            None => self.creation_date.clone().unwrap_or_default(),
        }
    }

    /// Non-blank title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A table-of-contents entry (bookmark).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Nesting level (1 = top level)
    pub level: u8,

    /// Entry title
    pub title: String,

    /// Target page (1-indexed)
    pub page: u32,
}

impl TocEntry {
    /// Create a new entry.
    pub fn new(level: u8, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// Metadata block of a structured document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMetadata {
    /// Best-guess title
    pub title: String,

    /// Author string from the document info (may be empty)
    pub authors: String,

    /// Publication year (may be empty)
    pub year: String,

    /// Source filename
    pub filename: String,

    /// Number of pages actually read
    pub pages: u32,
}

/// Which signal the section list was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSignal {
    /// Font size, weight and numbering of styled lines
    Layout,
    /// Keyword entries of the table of contents
    TableOfContents,
    /// Heading patterns in chunk text
    #[default]
    TextPatterns,
}

/// The structured result of one structuring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Title, authors, year, filename and page count
    pub metadata: StructureMetadata,

    /// Contiguous sections covering every page read
    pub sections: Vec<Section>,

    /// Chunk stream in order
    pub chunks: Vec<Chunk>,

    /// Signal the sections came from
    #[serde(default, skip_serializing)]
    pub signal: SectionSignal,
}

impl DocumentStructure {
    /// Number of pages that were read.
    pub fn page_count(&self) -> u32 {
        self.metadata.pages
    }

    /// The section that owns a page.
    pub fn section_for_page(&self, page: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(page))
    }

    /// Chunks belonging to a named section.
    pub fn chunks_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.chunks.iter().filter(move |c| c.section == section)
    }
}
