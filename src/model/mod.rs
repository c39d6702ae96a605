//! Document model types.
//!
//! Inputs (`PageRecord`, `StyledLine`, `TocEntry`, `DocumentInfo`) are what
//! the PDF engine hands over; outputs (`Section`, `Chunk`,
//! `DocumentStructure`) are what a structuring call returns. Everything here
//! is created per call and serializes with serde.

mod document;
mod page;
mod section;

pub use document::{DocumentInfo, DocumentStructure, SectionSignal, StructureMetadata, TocEntry};
pub use page::{PageRecord, StyledLine};
pub use section::{Chunk, HeadingCandidate, Section, REFERENCES_SECTION, UNKNOWN_SECTION};
