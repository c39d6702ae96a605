//! Layout-based heading detection.
//!
//! Headings are told apart from body text by how they look: larger than
//! most of the page, set in bold, or carrying a section number. The size
//! threshold is computed per page so documents with unusual body sizes are
//! handled without tuning.

use std::sync::OnceLock;

use regex::Regex;

use super::heading::is_section_keyword;
use super::normalize::{capitalize_first, normalize_heading};
use crate::model::{HeadingCandidate, PageRecord, StyledLine, TocEntry};

fn caption_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(figure|table|algorithm)\s+\d+").expect("caption regex is valid")
    })
}

fn numbered_shape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)*\s+[A-Z]").expect("numbered shape regex is valid"))
}

/// Font size statistics of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFontStats {
    /// Median line size
    pub median: f32,
    /// 90th percentile line size
    pub p90: f32,
    /// Size at or above which a line counts as a heading
    pub threshold: f32,
}

impl PageFontStats {
    /// Compute statistics over the positive font sizes of a page.
    ///
    /// Returns `None` when no line carries a usable size.
    pub fn from_lines(lines: &[StyledLine], min_gap: f32) -> Option<Self> {
        let mut sizes: Vec<f32> = lines
            .iter()
            .map(|l| l.font_size)
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        if sizes.is_empty() {
            return None;
        }
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = median(&sizes);
        let p90 = percentile(&sizes, 0.9);
        Some(Self {
            median,
            p90,
            threshold: p90.max(median + min_gap),
        })
    }
}

/// Median of sorted values.
fn median(sorted: &[f32]) -> f32 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Nearest-rank percentile of sorted values.
fn percentile(sorted: &[f32], p: f64) -> f32 {
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// Verdict for a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScore {
    /// Whether the line looks like a heading
    pub is_heading: bool,
    /// Normalized heading name (empty for non-headings)
    pub name: String,
}

/// Flags heading lines using size, weight and numbering signals.
#[derive(Debug, Clone)]
pub struct LayoutScorer {
    /// Minimum distance above the median size for the size signal
    pub min_size_gap: f32,
    /// Maximum number of words in a heading line
    pub max_words: usize,
}

impl Default for LayoutScorer {
    fn default() -> Self {
        Self {
            min_size_gap: 2.0,
            max_words: 12,
        }
    }
}

impl LayoutScorer {
    /// Create a scorer with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score every line of a page.
    pub fn score_page(&self, lines: &[StyledLine]) -> Vec<LineScore> {
        let stats = PageFontStats::from_lines(lines, self.min_size_gap);
        lines
            .iter()
            .map(|line| {
                if self.is_heading(line, stats.as_ref()) {
                    let name = normalize_heading(&line.text);
                    LineScore {
                        is_heading: !name.is_empty(),
                        name,
                    }
                } else {
                    LineScore {
                        is_heading: false,
                        name: String::new(),
                    }
                }
            })
            .collect()
    }

    fn is_heading(&self, line: &StyledLine, stats: Option<&PageFontStats>) -> bool {
        let text = line.text.trim();
        let words = line.word_count();
        if words == 0 || words > self.max_words || caption_regex().is_match(text) {
            return false;
        }
        let large = stats.is_some_and(|s| line.font_size >= s.threshold);
        large || line.bold || numbered_shape_regex().is_match(text)
    }

    /// Heading candidates of a single page.
    ///
    /// On page 1, lines opening with "abstract" or "keywords" always yield
    /// a candidate: these are reliably present but not always styled.
    pub fn page_candidates(&self, page: &PageRecord) -> Vec<HeadingCandidate> {
        let scores = self.score_page(&page.lines);
        page.lines
            .iter()
            .zip(scores)
            .filter_map(|(line, score)| {
                if page.index == 1 {
                    if let Some(name) = front_matter_heading(&line.text) {
                        return Some(HeadingCandidate::new(page.index, line.y, name));
                    }
                }
                score
                    .is_heading
                    .then(|| HeadingCandidate::new(page.index, line.y, score.name))
            })
            .collect()
    }

    /// Heading candidates over a whole document.
    pub fn candidates(&self, pages: &[PageRecord]) -> Vec<HeadingCandidate> {
        pages
            .iter()
            .filter(|p| p.has_layout())
            .flat_map(|p| self.page_candidates(p))
            .collect()
    }
}

fn front_matter_heading(text: &str) -> Option<&'static str> {
    let lower = text.trim_start().to_lowercase();
    if lower.starts_with("abstract") {
        Some("Abstract")
    } else if lower.starts_with("keywords") {
        Some("Keywords")
    } else {
        None
    }
}

/// Candidates from table-of-contents entries naming a known section.
///
/// Entries pointing outside `[1, page_count]` are ignored.
pub fn toc_candidates(toc: &[TocEntry], page_count: u32) -> Vec<HeadingCandidate> {
    toc.iter()
        .filter(|e| e.page >= 1 && e.page <= page_count)
        .filter_map(|e| {
            let name = normalize_heading(&e.title);
            is_section_keyword(&name).then(|| HeadingCandidate::new(e.page, 0.0, capitalize_first(&name)))
        })
        .collect()
}
