//! Structuring options and resource limits.

use std::env;
use std::str::FromStr;

use log::warn;

use crate::analysis::{MatchOrder, DEFAULT_MAX_CHARS, DEFAULT_OVERLAP};

/// Environment variable overriding [`Limits::max_pages`].
pub const ENV_MAX_PAGES: &str = "EMBEDDER_MAX_PAGES";
/// Environment variable overriding [`Limits::max_total_chars`].
pub const ENV_MAX_TOTAL_CHARS: &str = "EMBEDDER_MAX_TOTAL_CHARS";
/// Environment variable overriding [`Limits::max_chunks`].
pub const ENV_MAX_CHUNKS: &str = "EMBEDDER_MAX_CHUNKS";
/// Environment variable overriding [`Limits::chunk_max_chars`].
pub const ENV_CHUNK_MAX_CHARS: &str = "EMBEDDER_CHUNK_MAX_CHARS";
/// Environment variable overriding [`Limits::chunk_overlap`].
pub const ENV_CHUNK_OVERLAP: &str = "EMBEDDER_CHUNK_OVERLAP";

/// Resource caps for one structuring call.
///
/// Exceeding a cap truncates the output; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of pages read (values below 1 are treated as 1)
    pub max_pages: u32,

    /// Reading stops after the page that pushes the accumulated character
    /// count above this
    pub max_total_chars: usize,

    /// Maximum number of chunks emitted
    pub max_chunks: usize,

    /// Maximum chunk length in characters
    pub chunk_max_chars: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Limits {
    /// Create limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `EMBEDDER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut limits = Self::default();
        override_from(&lookup, ENV_MAX_PAGES, &mut limits.max_pages);
        override_from(&lookup, ENV_MAX_TOTAL_CHARS, &mut limits.max_total_chars);
        override_from(&lookup, ENV_MAX_CHUNKS, &mut limits.max_chunks);
        override_from(&lookup, ENV_CHUNK_MAX_CHARS, &mut limits.chunk_max_chars);
        override_from(&lookup, ENV_CHUNK_OVERLAP, &mut limits.chunk_overlap);
        limits
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the character budget.
    pub fn with_max_total_chars(mut self, chars: usize) -> Self {
        self.max_total_chars = chars;
        self
    }

    /// Set the chunk cap.
    pub fn with_max_chunks(mut self, chunks: usize) -> Self {
        self.max_chunks = chunks;
        self
    }

    /// Set chunk size and overlap.
    pub fn with_chunking(mut self, max_chars: usize, overlap: usize) -> Self {
        self.chunk_max_chars = max_chars;
        self.chunk_overlap = overlap;
        self
    }

    /// Page cap actually applied.
    pub fn effective_max_pages(&self) -> u32 {
        self.max_pages.max(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pages: 80,
            max_total_chars: 2_000_000,
            max_chunks: 4000,
            chunk_max_chars: DEFAULT_MAX_CHARS,
            chunk_overlap: DEFAULT_OVERLAP,
        }
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else { return };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!("ignoring {}={:?}: not a non-negative integer", key, raw),
    }
}

/// Options for structuring a document.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Resource caps
    pub limits: Limits,

    /// Ordering of text-pattern heading matches
    pub match_order: MatchOrder,

    /// Whether styled lines are used for heading detection
    pub use_layout: bool,
}

impl StructureOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resource caps.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the heading match ordering.
    pub fn with_match_order(mut self, order: MatchOrder) -> Self {
        self.match_order = order;
        self
    }

    /// Enable or disable the layout signal.
    pub fn with_layout(mut self, use_layout: bool) -> Self {
        self.use_layout = use_layout;
        self
    }

    /// Ignore styled lines; sections come from the ToC or text patterns.
    pub fn text_only(mut self) -> Self {
        self.use_layout = false;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            match_order: MatchOrder::Position,
            use_layout: true,
        }
    }
}
