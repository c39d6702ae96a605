//! Sentence-aligned chunking with overlap.
//!
//! ## How It Works
//!
//! ```text
//! max_chars = 10, overlap = 3
//!
//! Text:    "A. B. C. A. B. C. A. B. C."
//!
//! Window 0: "A. B. C. A"   -> last ". " at 7, snap end to 9
//! Chunk 0:  "A. B. C."
//! Window 1: starts at 9 - 3 = 6
//! ```
//!
//! Each window is cut back to its last `". "` so most chunks end on a
//! sentence. The next window starts `overlap` characters before the cut.
//! If that would not move forward (a short sentence with a large overlap),
//! the cursor is pushed ahead by `min(100, max_chars / 2)` characters, so
//! the loop always terminates.
//!
//! Lengths are counted in characters, not bytes.

use log::warn;

use crate::error::{Error, Result};

/// Default maximum chunk length in characters.
pub const DEFAULT_MAX_CHARS: usize = 1800;

/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_OVERLAP: usize = 200;

/// Upper bound on the forced step when overlap prevents progress.
const MAX_FORCED_STEP: usize = 100;

/// Splits text into bounded, overlapping, sentence-aligned pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_chars: usize,
    overlap: usize,
}

impl Chunker {
    /// Create a chunker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `max_chars == 0`.
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(Error::InvalidChunkSize(max_chars));
        }
        Ok(Self { max_chars, overlap })
    }

    /// Maximum chunk length in characters.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Overlap between consecutive chunks in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Step taken when `end - overlap` does not advance the cursor.
    fn forced_step(&self) -> usize {
        (self.max_chars / 2).min(MAX_FORCED_STEP).max(1)
    }

    /// Rough number of chunks for a text of `len` characters.
    pub fn estimate_chunks(&self, len: usize) -> usize {
        let step = self.max_chars.saturating_sub(self.overlap).max(self.forced_step());
        len / step + 1
    }

    /// Split `text` into chunks.
    ///
    /// Text that already fits is returned unchanged as a single chunk.
    /// Otherwise every chunk is trimmed, non-empty and at most `max_chars`
    /// characters long.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character, plus the end of the text.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;

        if len <= self.max_chars {
            return vec![text.to_string()];
        }

        let max_iterations = len / 10 + 100;
        let mut chunks = Vec::with_capacity(self.estimate_chunks(len));
        let mut start = 0;
        let mut iterations = 0;

        while start < len {
            iterations += 1;
            if iterations > max_iterations {
                warn!(
                    "chunker stopped after {} iterations at char {} of {}",
                    max_iterations, start, len
                );
                break;
            }

            let mut end = (start + self.max_chars).min(len);
            if end != len {
                let window = &text[bounds[start]..bounds[end]];
                if let Some(pos) = window.rfind(". ") {
                    end = start + window[..pos].chars().count() + 2;
                }
            }

            let piece = text[bounds[start]..bounds[end]].trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= len {
                break;
            }

            let mut next = end.saturating_sub(self.overlap);
            if next <= start {
                next = start + self.forced_step();
            }
            if next >= len {
                break;
            }
            start = next;
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Split `text` with the given limits.
///
/// # Errors
///
/// Returns [`Error::InvalidChunkSize`] if `max_chars == 0`.
pub fn chunk_text(text: &str, max_chars: usize, overlap: usize) -> Result<Vec<String>> {
    Ok(Chunker::new(max_chars, overlap)?.chunk(text))
}
