//! Document structuring.
//!
//! A [`Structurer`] reads pages from a [`DocumentSource`] within the
//! configured [`Limits`], infers the title, cuts the text into chunks and
//! partitions the pages into named sections.
//!
//! Sections come from the first signal that yields anything:
//!
//! 1. **Layout**: headings recognized by font size, weight or numbering on
//!    pages that carry styled lines;
//! 2. **Table of contents**: entries naming a well-known section;
//! 3. **Text patterns**: headings found in the chunk text itself.
//!
//! Whatever the signal, every chunk ends up labelled with the section that
//! owns its page.
//!
//! # Example
//!
//! ```
//! use docstruct::source::ExtractedDocument;
//! use docstruct::structure::{StructureOptions, Structurer};
//!
//! let doc = ExtractedDocument::from_texts([
//!     "Abstract\nWe study chunking.",
//!     "1. Introduction\nChunking matters.",
//! ]);
//! let structurer = Structurer::new(StructureOptions::default()).unwrap();
//! let result = structurer.structure(&doc, "paper.pdf").unwrap();
//! assert_eq!(result.sections[0].name, "Abstract");
//! assert_eq!(result.sections[1].name, "Introduction");
//! ```

mod options;

pub use options::{
    Limits, StructureOptions, ENV_CHUNK_MAX_CHARS, ENV_CHUNK_OVERLAP, ENV_MAX_CHUNKS,
    ENV_MAX_PAGES, ENV_MAX_TOTAL_CHARS,
};

use log::{debug, warn};

use crate::analysis::{
    aggregate, aggregate_from_chunks, extract_title, section_for_page, toc_candidates, Chunker,
    HeadingMatcher, LayoutScorer, SectionTracker,
};
use crate::detect::validate_upload;
use crate::error::{Error, Result};
use crate::model::{
    Chunk, DocumentInfo, DocumentStructure, PageRecord, Section, SectionSignal,
    StructureMetadata, TocEntry, UNKNOWN_SECTION,
};
use crate::source::{DocumentSource, ExtractedDocument, PdfEngine};

/// Turns a document source into a [`DocumentStructure`].
#[derive(Debug, Clone)]
pub struct Structurer {
    options: StructureOptions,
    chunker: Chunker,
    matcher: HeadingMatcher,
    scorer: LayoutScorer,
}

impl Structurer {
    /// Create a structurer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `chunk_max_chars` is 0.
    pub fn new(options: StructureOptions) -> Result<Self> {
        let chunker = Chunker::new(options.limits.chunk_max_chars, options.limits.chunk_overlap)?;
        let matcher = HeadingMatcher::new().with_order(options.match_order);
        Ok(Self {
            options,
            chunker,
            matcher,
            scorer: LayoutScorer::new(),
        })
    }

    /// The options in use.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Structure a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if the source has no pages. Pages that
    /// fail to load are logged and treated as empty.
    pub fn structure(&self, source: &dyn DocumentSource, filename: &str) -> Result<DocumentStructure> {
        let total = source.page_count();
        if total == 0 {
            return Err(Error::EmptyInput("pages"));
        }

        let info = source.info();
        let pages = self.read_pages(source, total);
        let page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);
        let title = resolve_title(&pages, &info, filename);

        let mut chunks = self.chunk_pages(&pages);
        let (sections, signal) = self.sections(&pages, &source.toc(), &mut chunks, page_count);
        assign_sections(&mut chunks, &sections);

        debug!(
            "structured {:?}: {} of {} pages, {} sections from {:?}, {} chunks",
            filename,
            page_count,
            total,
            sections.len(),
            signal,
            chunks.len()
        );

        Ok(DocumentStructure {
            metadata: StructureMetadata {
                title,
                authors: info.author.as_deref().map(str::trim).unwrap_or_default().to_string(),
                year: info.year(),
                filename: filename.to_string(),
                pages: page_count,
            },
            sections,
            chunks,
            signal,
        })
    }

    /// Read pages in order until a limit is reached.
    fn read_pages(&self, source: &dyn DocumentSource, total: u32) -> Vec<PageRecord> {
        let limits = &self.options.limits;
        let last = total.min(limits.effective_max_pages());
        let mut pages = Vec::with_capacity(last as usize);
        let mut chars = 0usize;

        for index in 1..=last {
            let page = match source.page(index) {
                Ok(page) => PageRecord { index, ..page },
                Err(e) => {
                    warn!("page {} treated as empty: {}", index, e);
                    PageRecord::empty(index)
                }
            };
            chars += page.char_count();
            pages.push(page);
            if chars > limits.max_total_chars {
                debug!(
                    "character budget of {} exceeded after page {}",
                    limits.max_total_chars, index
                );
                break;
            }
        }

        pages
    }

    /// Chunk every non-blank page, stopping at the chunk cap.
    fn chunk_pages(&self, pages: &[PageRecord]) -> Vec<Chunk> {
        let max_chunks = self.options.limits.max_chunks;
        let mut chunks = Vec::new();

        'pages: for page in pages.iter().filter(|p| !p.is_blank()) {
            for piece in self.chunker.chunk(page.text.trim()) {
                if chunks.len() >= max_chunks {
                    debug!("chunk cap of {} reached on page {}", max_chunks, page.index);
                    break 'pages;
                }
                chunks.push(Chunk::new(chunks.len(), piece, UNKNOWN_SECTION, page.index));
            }
        }

        chunks
    }

    fn sections(
        &self,
        pages: &[PageRecord],
        toc: &[TocEntry],
        chunks: &mut [Chunk],
        page_count: u32,
    ) -> (Vec<Section>, SectionSignal) {
        if self.options.use_layout && pages.iter().any(PageRecord::has_layout) {
            let candidates = self.scorer.candidates(pages);
            if !candidates.is_empty() {
                return (aggregate(&candidates, page_count), SectionSignal::Layout);
            }
            debug!("styled lines present but no heading candidates");
        }

        let candidates = toc_candidates(toc, page_count);
        if !candidates.is_empty() {
            return (aggregate(&candidates, page_count), SectionSignal::TableOfContents);
        }

        self.label_chunks(chunks);
        (aggregate_from_chunks(chunks, page_count), SectionSignal::TextPatterns)
    }

    /// Label chunks from the headings found in their own text.
    fn label_chunks(&self, chunks: &mut [Chunk]) {
        let mut tracker = SectionTracker::new();
        for chunk in chunks {
            let detected = if tracker.is_locked() {
                Vec::new()
            } else {
                self.matcher.detect(&chunk.text)
            };
            chunk.section = tracker.label(&detected);
        }
    }
}

/// Title from page 1 typography, else the metadata title, else the filename.
pub fn resolve_title(pages: &[PageRecord], info: &DocumentInfo, filename: &str) -> String {
    pages
        .first()
        .and_then(|page| extract_title(&page.lines))
        .or_else(|| info.title().map(str::to_string))
        .unwrap_or_else(|| filename.to_string())
}

/// Relabel every chunk with the section that owns its page.
fn assign_sections(chunks: &mut [Chunk], sections: &[Section]) {
    for chunk in chunks {
        if let Some(section) = section_for_page(sections, chunk.page) {
            if chunk.section != section.name {
                chunk.section.clone_from(&section.name);
            }
        }
    }
}

/// Structure already-extracted pages with default options and the given
/// limits.
pub fn structure(
    pages: Vec<PageRecord>,
    toc: Vec<TocEntry>,
    info: DocumentInfo,
    filename: &str,
    limits: &Limits,
) -> Result<DocumentStructure> {
    let doc = ExtractedDocument { info, toc, pages };
    Structurer::new(StructureOptions::default().with_limits(*limits))?.structure(&doc, filename)
}

/// Validate and open a PDF payload, then structure it.
///
/// The filename extension and the `%PDF-` header are checked before the
/// engine is called.
pub fn structure_bytes(
    engine: &dyn PdfEngine,
    bytes: &[u8],
    filename: &str,
    options: StructureOptions,
) -> Result<DocumentStructure> {
    let format = validate_upload(filename, bytes)?;
    let structurer = Structurer::new(options)?;
    debug!("opening {:?} ({}) with {}", filename, format, engine.name());
    let source = engine.open(bytes)?;
    structurer.structure(source.as_ref(), filename)
}
