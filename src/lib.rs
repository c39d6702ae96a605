//! # docstruct
//!
//! Title, section and chunk structuring for text extracted from PDF papers.
//!
//! Given per-page text (optionally with styled lines and a table of
//! contents), this library produces a best-guess title, a contiguous list of
//! named sections covering every page, and a bounded stream of overlapping,
//! sentence-aligned chunks tagged with their section and page. The chunks
//! are ready for embedding and retrieval.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docstruct::{render, structure_file, JsonFormat};
//!
//! fn main() -> docstruct::Result<()> {
//!     let structure = structure_file("paper.json")?;
//!     println!("{}", render::to_json(&structure, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Three section signals**: layout (font size, weight, numbering), table
//!   of contents, and text patterns, tried in that order
//! - **Bounded work**: page, character and chunk caps, overridable from the
//!   environment
//! - **Pluggable collaborators**: bring your own PDF engine
//!   ([`PdfEngine`]) and embedding backend ([`embed::TextEmbedder`])
//! - **Embeddings**: request validation, a process-wide model cache and an
//!   optional `fastembed` backend

pub mod analysis;
pub mod detect;
pub mod embed;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod structure;

// Re-export commonly used types
pub use analysis::{chunk_text, detect_headings, extract_title, Chunker, MatchOrder};
pub use detect::{detect_format_from_bytes, ensure_pdf_filename, is_pdf_bytes, PdfFormat};
pub use embed::{EmbeddingRequest, EmbeddingResponse, EmbeddingService, DEFAULT_MODEL};
pub use error::{Error, Result};
pub use model::{
    Chunk, DocumentInfo, DocumentStructure, HeadingCandidate, PageRecord, Section, SectionSignal,
    StructureMetadata, StyledLine, TocEntry,
};
pub use render::JsonFormat;
pub use source::{DocumentSource, ExtractedDocument, PdfEngine};
pub use structure::{
    resolve_title, structure, structure_bytes, Limits, StructureOptions, Structurer,
};

use std::path::Path;

/// Structure an extracted-document JSON file with default options.
///
/// The filename recorded in the metadata is the file's name.
pub fn structure_file<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    structure_file_with_options(path, StructureOptions::default())
}

/// Structure an extracted-document JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use docstruct::{structure_file_with_options, Limits, StructureOptions};
///
/// let options = StructureOptions::new().with_limits(Limits::from_env());
/// let structure = structure_file_with_options("paper.json", options).unwrap();
/// println!("{} chunks", structure.chunks.len());
/// ```
pub fn structure_file_with_options<P: AsRef<Path>>(
    path: P,
    options: StructureOptions,
) -> Result<DocumentStructure> {
    let path = path.as_ref();
    let doc = ExtractedDocument::from_path(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Structurer::new(options)?.structure(&doc, &filename)
}
