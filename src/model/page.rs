//! Page-level types.

use serde::{Deserialize, Serialize};

/// One page of extracted text, as supplied by the PDF engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page number (1-indexed); assigned from position when omitted
    #[serde(default)]
    pub index: u32,

    /// Plain text of the page
    #[serde(default)]
    pub text: String,

    /// Styled lines in reading order (empty when no layout metadata exists)
    #[serde(default)]
    pub lines: Vec<StyledLine>,
}

impl PageRecord {
    /// Create a page with text only.
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            lines: Vec::new(),
        }
    }

    /// Create the degraded record used when a page cannot be read.
    pub fn empty(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Attach styled lines to the page.
    pub fn with_lines(mut self, lines: Vec<StyledLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Whether the page carries layout metadata.
    pub fn has_layout(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Whether the page has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters in the page text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A visually coherent line of text with its dominant style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledLine {
    /// Combined text of the line's spans
    pub text: String,

    /// Largest span font size in points
    #[serde(default)]
    pub font_size: f32,

    /// Whether the line is set in a bold face
    #[serde(default)]
    pub bold: bool,

    /// Left edge
    #[serde(default)]
    pub x: f32,

    /// Top edge; grows downward
    #[serde(default)]
    pub y: f32,
}

impl StyledLine {
    /// Create a regular-weight line at the given position.
    pub fn new(text: impl Into<String>, font_size: f32, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            x,
            y,
        }
    }

    /// Mark the line as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
