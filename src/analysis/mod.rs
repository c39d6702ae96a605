//! Text analysis: heading detection, title inference, chunking and
//! section aggregation.

pub mod chunker;
pub mod heading;
pub mod layout;
mod normalize;
pub mod sections;
pub mod title;
pub mod tracker;

pub use chunker::{chunk_text, Chunker, DEFAULT_MAX_CHARS, DEFAULT_OVERLAP};
pub use heading::{detect_headings, is_section_keyword, HeadingMatcher, MatchOrder};
pub use layout::{toc_candidates, LayoutScorer, LineScore, PageFontStats};
pub use normalize::{collapse_whitespace, normalize_heading};
pub use sections::{aggregate, aggregate_from_chunks, section_for_page};
pub use title::extract_title;
pub use tracker::{SectionState, SectionTracker};
