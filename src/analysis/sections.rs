//! Section aggregation.
//!
//! Turns an unordered bag of heading candidates into a section list for an
//! N-page document that is sorted, non-overlapping, contiguous and covers
//! every page from 1 to N.

use std::slice;

use log::debug;

use super::heading::is_keywords;
use super::tracker::SectionTracker;
use crate::model::{Chunk, HeadingCandidate, Section, UNKNOWN_SECTION};

/// Build the section list of a `page_count`-page document.
///
/// - candidates outside `[1, page_count]` are dropped;
/// - candidates are taken in reading order, and nothing after a References
///   heading opens a section;
/// - a section runs until the page before the next candidate's page, so the
///   page on which a heading appears belongs to that heading;
/// - "Keywords" extends the previous section instead of opening one;
/// - leading pages without a heading form an "Unknown" section, and
///   neighbours sharing a name are merged.
///
/// Returns an empty list only when `page_count` is 0.
pub fn aggregate(candidates: &[HeadingCandidate], page_count: u32) -> Vec<Section> {
    if page_count == 0 {
        return Vec::new();
    }

    let mut ordered: Vec<&HeadingCandidate> = candidates
        .iter()
        .filter(|c| c.page >= 1 && c.page <= page_count)
        .collect();
    ordered.sort_by(|a, b| a.reading_order(b));

    let mut tracker = SectionTracker::new();
    let mut labelled: Vec<(u32, String)> = Vec::with_capacity(ordered.len());
    for candidate in ordered {
        if tracker.is_locked() {
            break;
        }
        let label = tracker.label(slice::from_ref(&candidate.name));
        labelled.push((candidate.page, label));
    }

    let mut raw: Vec<Section> = Vec::with_capacity(labelled.len());
    for (i, (page, name)) in labelled.iter().enumerate() {
        let end = labelled
            .get(i + 1)
            .map_or(page_count, |(next, _)| next.saturating_sub(1));
        if is_keywords(name) {
            if let Some(prev) = raw.last_mut() {
                prev.end_page = prev.end_page.max(end);
            }
            continue;
        }
        raw.push(Section::new(name.clone(), *page, end));
    }

    let mut sections = make_contiguous(raw);

    match sections.first() {
        None => return vec![Section::new(UNKNOWN_SECTION, 1, page_count)],
        Some(first) if first.start_page > 1 => {
            let end = first.start_page - 1;
            sections.insert(0, Section::new(UNKNOWN_SECTION, 1, end));
        }
        Some(_) => {}
    }
    if let Some(last) = sections.last_mut() {
        last.end_page = page_count;
    }

    let merged = merge_adjacent(sections);
    debug!(
        "aggregated {} candidates into {} sections over {} pages",
        candidates.len(),
        merged.len(),
        page_count
    );
    merged
}

/// Drop empty ranges, clamp overlaps and close gaps.
fn make_contiguous(raw: Vec<Section>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::with_capacity(raw.len());
    let mut last_end = 0;

    for mut section in raw {
        if section.end_page < section.start_page {
            continue;
        }
        if section.start_page <= last_end {
            section.start_page = last_end + 1;
            if section.start_page > section.end_page {
                continue;
            }
        }
        if section.start_page > last_end + 1 {
            if let Some(prev) = sections.last_mut() {
                prev.end_page = section.start_page - 1;
            }
        }
        last_end = section.end_page;
        sections.push(section);
    }

    sections
}

fn merge_adjacent(sections: Vec<Section>) -> Vec<Section> {
    let mut merged: Vec<Section> = Vec::with_capacity(sections.len());
    for section in sections {
        match merged.last_mut() {
            Some(prev) if prev.name == section.name => prev.end_page = section.end_page,
            _ => merged.push(section),
        }
    }
    merged
}

/// Build sections from already-labelled chunks.
///
/// Consecutive chunks sharing a label form one run; each run opens at the
/// page of its first chunk. Runs are then normalized through [`aggregate`].
pub fn aggregate_from_chunks(chunks: &[Chunk], page_count: u32) -> Vec<Section> {
    let mut runs: Vec<HeadingCandidate> = Vec::new();
    for chunk in chunks {
        if runs.last().is_some_and(|run| run.name == chunk.section) {
            continue;
        }
        let y = runs.len() as f32;
        runs.push(HeadingCandidate::new(chunk.page, y, chunk.section.clone()));
    }
    aggregate(&runs, page_count)
}

/// The section covering `page`, if any.
pub fn section_for_page(sections: &[Section], page: u32) -> Option<&Section> {
    sections.iter().find(|s| s.contains(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(page: u32, y: f32, name: &str) -> HeadingCandidate {
        HeadingCandidate::new(page, y, name)
    }

    fn shape(sections: &[Section]) -> Vec<(&str, u32, u32)> {
        sections
            .iter()
            .map(|s| (s.name.as_str(), s.start_page, s.end_page))
            .collect()
    }

    #[test]
    fn test_no_candidates_single_unknown() {
        assert_eq!(shape(&aggregate(&[], 7)), vec![("Unknown", 1, 7)]);
    }

    #[test]
    fn test_zero_pages() {
        assert!(aggregate(&[cand(1, 0.0, "Abstract")], 0).is_empty());
    }

    #[test]
    fn test_basic_paper() {
        let candidates = vec![
            cand(1, 100.0, "Abstract"),
            cand(2, 50.0, "Introduction"),
            cand(5, 300.0, "Results"),
            cand(9, 80.0, "References"),
        ];
        assert_eq!(
            shape(&aggregate(&candidates, 10)),
            vec![
                ("Abstract", 1, 1),
                ("Introduction", 2, 4),
                ("Results", 5, 8),
                ("References", 9, 10)
            ]
        );
    }

    #[test]
    fn test_unsorted_input_and_leading_unknown() {
        let candidates = vec![cand(6, 10.0, "Conclusion"), cand(3, 10.0, "Methods")];
        assert_eq!(
            shape(&aggregate(&candidates, 8)),
            vec![("Unknown", 1, 2), ("Methods", 3, 5), ("Conclusion", 6, 8)]
        );
    }

    #[test]
    fn test_same_page_later_heading_owns_page() {
        let candidates = vec![
            cand(1, 100.0, "Abstract"),
            cand(1, 400.0, "Introduction"),
            cand(3, 100.0, "Method"),
        ];
        assert_eq!(
            shape(&aggregate(&candidates, 4)),
            vec![("Introduction", 1, 2), ("Method", 3, 4)]
        );
    }

    #[test]
    fn test_references_stops_later_candidates() {
        let candidates = vec![
            cand(1, 0.0, "Introduction"),
            cand(4, 0.0, "REFERENCES"),
            cand(6, 0.0, "Appendix"),
        ];
        assert_eq!(
            shape(&aggregate(&candidates, 8)),
            vec![("Introduction", 1, 3), ("References", 4, 8)]
        );
    }

    #[test]
    fn test_keywords_extend_previous() {
        let candidates = vec![
            cand(1, 10.0, "Abstract"),
            cand(2, 10.0, "Keywords"),
            cand(4, 10.0, "Introduction"),
        ];
        assert_eq!(
            shape(&aggregate(&candidates, 5)),
            vec![("Abstract", 1, 3), ("Introduction", 4, 5)]
        );
    }

    #[test]
    fn test_out_of_range_candidates_dropped() {
        let candidates = vec![cand(0, 0.0, "Preface"), cand(2, 0.0, "Body"), cand(42, 0.0, "Tail")];
        assert_eq!(
            shape(&aggregate(&candidates, 3)),
            vec![("Unknown", 1, 1), ("Body", 2, 3)]
        );
    }

    #[test]
    fn test_adjacent_equal_names_merged() {
        let candidates = vec![cand(1, 0.0, "Results"), cand(3, 0.0, "Results")];
        assert_eq!(shape(&aggregate(&candidates, 4)), vec![("Results", 1, 4)]);
    }

    #[test]
    fn test_from_chunks() {
        let chunks = vec![
            Chunk::new(0, "a", "Unknown", 1),
            Chunk::new(1, "b", "Abstract", 1),
            Chunk::new(2, "c", "Abstract", 2),
            Chunk::new(3, "d", "Introduction", 3),
            Chunk::new(4, "e", "References", 6),
        ];
        assert_eq!(
            shape(&aggregate_from_chunks(&chunks, 7)),
            vec![("Abstract", 1, 2), ("Introduction", 3, 5), ("References", 6, 7)]
        );
    }

    #[test]
    fn test_from_no_chunks() {
        assert_eq!(shape(&aggregate_from_chunks(&[], 2)), vec![("Unknown", 1, 2)]);
    }

    #[test]
    fn test_section_for_page() {
        let sections = aggregate(&[cand(3, 0.0, "Methods")], 5);
        assert_eq!(section_for_page(&sections, 2).map(|s| s.name.as_str()), Some("Unknown"));
        assert_eq!(section_for_page(&sections, 5).map(|s| s.name.as_str()), Some("Methods"));
        assert!(section_for_page(&sections, 6).is_none());
    }
}
