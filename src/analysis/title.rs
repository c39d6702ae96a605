//! Title inference from the first page's typography.

use std::cmp::Ordering;

use super::normalize::collapse_whitespace;
use crate::model::StyledLine;

/// Lines shorter than this are never part of a title.
const MIN_TITLE_LINE_CHARS: usize = 6;

/// Words required for a line to anchor the title.
const MIN_ANCHOR_WORDS: usize = 4;

/// Size tolerance for picking up the second line of a wrapped title.
const SIZE_TOLERANCE: f32 = 0.5;

/// Maximum number of lines joined into the title.
const MAX_TITLE_LINES: usize = 2;

const NON_TITLE_PREFIXES: [&str; 7] = [
    "abstract",
    "keywords",
    "received:",
    "revised:",
    "accepted:",
    "copyright",
    "licensee",
];

#[derive(Debug)]
struct TitleLine<'a> {
    text: &'a str,
    size: f32,
    y: f32,
}

/// Pick the document title from the first page's styled lines.
///
/// The largest-font line with at least four words anchors the title (the
/// largest line overall when none has four words); lines within half a
/// point of the anchor's size are joined in reading order, at most two of
/// them, so two-line titles come out whole.
pub fn extract_title(first_page_lines: &[StyledLine]) -> Option<String> {
    let lines: Vec<TitleLine<'_>> = first_page_lines
        .iter()
        .map(|l| TitleLine {
            text: l.text.trim(),
            size: l.font_size,
            y: l.y,
        })
        .filter(|l| l.size.is_finite() && is_title_eligible(l.text))
        .collect();

    let mut by_size: Vec<&TitleLine<'_>> = lines.iter().collect();
    by_size.sort_by(|a, b| {
        b.size
            .partial_cmp(&a.size)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    let anchor = by_size
        .iter()
        .find(|l| l.text.split_whitespace().count() >= MIN_ANCHOR_WORDS)
        .or_else(|| by_size.first())?;

    let mut title_lines: Vec<&TitleLine<'_>> = lines
        .iter()
        .filter(|l| l.size >= anchor.size - SIZE_TOLERANCE)
        .collect();
    title_lines.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));

    let joined = title_lines
        .iter()
        .take(MAX_TITLE_LINES)
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join(" ");
    let title = collapse_whitespace(&joined);
    (!title.is_empty()).then_some(title)
}

fn is_title_eligible(text: &str) -> bool {
    if text.chars().count() < MIN_TITLE_LINE_CHARS {
        return false;
    }
    let lower = text.to_lowercase();
    !(lower.contains("doi") || NON_TITLE_PREFIXES.iter().any(|p| lower.starts_with(p)))
}
