//! Document sources.
//!
//! The structurer never decodes PDF bytes itself. A [`PdfEngine`] opens a
//! payload and hands back a [`DocumentSource`], which serves one page at a
//! time so that pages beyond the configured limits are never extracted.
//!
//! [`ExtractedDocument`] is the in-memory source: pages that were already
//! extracted elsewhere, typically loaded from JSON.
//!
//! # Example
//!
//! ```no_run
//! use docstruct::source::{DocumentSource, ExtractedDocument};
//!
//! fn main() -> docstruct::Result<()> {
//!     let doc = ExtractedDocument::from_path("paper.json")?;
//!     println!("{} pages", doc.page_count());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{DocumentInfo, PageRecord, TocEntry};

/// Page-at-a-time access to an opened document.
pub trait DocumentSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract one page (1-indexed).
    ///
    /// Failures are reported per page; the structurer degrades a failing
    /// page to an empty record instead of aborting.
    fn page(&self, index: u32) -> Result<PageRecord>;

    /// Table of contents, if the document has one.
    fn toc(&self) -> Vec<TocEntry> {
        Vec::new()
    }

    /// Document metadata.
    fn info(&self) -> DocumentInfo {
        DocumentInfo::default()
    }
}

/// A PDF decoding backend.
///
/// Implement this trait to plug a PDF library into
/// [`structure_bytes`](crate::structure::structure_bytes).
pub trait PdfEngine: Send + Sync {
    /// Name of this engine.
    fn name(&self) -> &str;

    /// Open a PDF payload.
    ///
    /// Implementations should return [`Error::Unreadable`] for payloads
    /// they cannot parse.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn DocumentSource>>;
}

/// A document whose pages have already been extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Document metadata
    #[serde(default)]
    pub info: DocumentInfo,

    /// Table of contents
    #[serde(default)]
    pub toc: Vec<TocEntry>,

    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

impl ExtractedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a text-only document from page strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, index)| PageRecord::new(index, text))
            .collect();
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Append a page.
    pub fn with_page(mut self, page: PageRecord) -> Self {
        self.pages.push(page);
        self
    }

    /// Set the document metadata.
    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    /// Set the table of contents.
    pub fn with_toc(mut self, toc: Vec<TocEntry>) -> Self {
        self.toc = toc;
        self
    }

    /// Parse a JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

impl DocumentSource for ExtractedDocument {
    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    /// Pages are numbered by position, whatever index they were stored with.
    fn page(&self, index: u32) -> Result<PageRecord> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.pages.get(i));
        match slot {
            Some(page) => Ok(PageRecord {
                index,
                ..page.clone()
            }),
            None => Err(Error::PageExtract {
                page: index,
                reason: format!("no such page (document has {})", self.pages.len()),
            }),
        }
    }

    fn toc(&self) -> Vec<TocEntry> {
        self.toc.clone()
    }

    fn info(&self) -> DocumentInfo {
        self.info.clone()
    }
}
