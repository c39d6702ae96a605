//! Plain-text outline of a structured document.

use std::fmt::Write;

use crate::model::DocumentStructure;

/// Render a short human-readable outline: title, then one line per section
/// with its page range and chunk count.
pub fn to_outline(structure: &DocumentStructure) -> String {
    let mut out = String::new();
    let meta = &structure.metadata;

    let _ = writeln!(out, "{}", meta.title);
    if !meta.authors.is_empty() {
        let _ = writeln!(out, "by {}", meta.authors);
    }
    let _ = writeln!(
        out,
        "{} ({} pages, {} chunks)",
        meta.filename,
        meta.pages,
        structure.chunks.len()
    );
    out.push('\n');

    for section in &structure.sections {
        let pages = if section.start_page == section.end_page {
            format!("p. {}", section.start_page)
        } else {
            format!("pp. {}-{}", section.start_page, section.end_page)
        };
        let count = structure.chunks_in(&section.name).count();
        let _ = writeln!(out, "  {:<32} {:>12}  {} chunks", section.name, pages, count);
    }

    out
}
