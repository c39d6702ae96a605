//! Lexical heading detection.
//!
//! Two pattern families are recognized:
//!
//! - **Numbered headings**: `1. Introduction`, `2.3.1. Loss Functions`. The
//!   number must end with a dot and the title must start with a capital
//!   letter. Titles starting with `Figure`, `Table` or `Algorithm` are
//!   captions, not headings.
//! - **Keyword headings**: a line holding nothing but one of the usual
//!   paper section names (`Abstract`, `References`, ...), in any case.
//!
//! This is the signal of last resort: it works on plain text and needs no
//! layout metadata.

use std::sync::OnceLock;

use regex::Regex;

use super::normalize::{capitalize_first, normalize_heading};

/// Section names recognized as whole-line headings.
const KEYWORD_PATTERN: &str = r"abstract|introduction|conclusions?|references?|methodology|results|discussion(?:[ \t]+and[ \t]+conclusions)?|background|future[ \t]+work|supplemental[ \t]+information|acknowledge?ments|declaration[ \t]+of[ \t]+interests|keywords";

/// Caption words that disqualify a numbered heading.
const CAPTION_WORDS: [&str; 3] = ["Figure", "Table", "Algorithm"];

fn numbered_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*\d+(?:\.\d+){0,5}\.\s{0,3}([A-Z][^\n]{0,120})$")
            .expect("numbered heading regex is valid")
    })
}

fn keyword_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?mi)^[ \t]*({})[ \t]*[:.]?[ \t\r]*$", KEYWORD_PATTERN))
            .expect("keyword heading regex is valid")
    })
}

fn keyword_title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i)^(?:{})$", KEYWORD_PATTERN)).expect("keyword title regex is valid")
    })
}

/// How matches from the two pattern families are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchOrder {
    /// Strictly by position in the text
    #[default]
    Position,
    /// All numbered headings first, then all keyword headings
    Family,
}

/// Detects heading names in a span of text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingMatcher {
    order: MatchOrder,
}

impl HeadingMatcher {
    /// Create a matcher with the default (positional) ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match ordering.
    pub fn with_order(mut self, order: MatchOrder) -> Self {
        self.order = order;
        self
    }

    /// The configured match ordering.
    pub fn order(&self) -> MatchOrder {
        self.order
    }

    /// Detect heading names in `text`, normalized.
    pub fn detect(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        for caps in numbered_heading_regex().captures_iter(text) {
            let Some(title) = caps.get(1) else { continue };
            if is_caption(title.as_str()) {
                continue;
            }
            let name = normalize_heading(title.as_str());
            if !name.is_empty() {
                found.push((title.start(), name));
            }
        }

        for caps in keyword_heading_regex().captures_iter(text) {
            let Some(keyword) = caps.get(1) else { continue };
            let name = normalize_heading(&capitalize_first(keyword.as_str()));
            found.push((keyword.start(), name));
        }

        if self.order == MatchOrder::Position {
            found.sort_by_key(|(pos, _)| *pos);
        }
        found.into_iter().map(|(_, name)| name).collect()
    }
}

/// Detect heading names with the default matcher.
pub fn detect_headings(text: &str) -> Vec<String> {
    HeadingMatcher::new().detect(text)
}

/// Whether a (normalized) title is one of the section keywords.
pub fn is_section_keyword(title: &str) -> bool {
    keyword_title_regex().is_match(title.trim())
}

/// Whether a heading name denotes the bibliography.
pub fn is_references(name: &str) -> bool {
    let name = name.trim();
    name.eq_ignore_ascii_case("references") || name.eq_ignore_ascii_case("reference")
}

/// Whether a heading name is the "Keywords" pseudo-heading.
pub fn is_keywords(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("keywords")
}

fn is_caption(title: &str) -> bool {
    CAPTION_WORDS.iter().any(|word| {
        title.strip_prefix(word).is_some_and(|rest| {
            !rest
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
        })
    })
}
