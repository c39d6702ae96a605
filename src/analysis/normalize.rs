//! Text normalization shared by heading and title detection.

use unicode_normalization::UnicodeNormalization;

/// Collapse runs of whitespace to single spaces, trim, and NFC-normalize.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .nfc()
        .collect()
}

/// Normalize a heading: drop leading section numbers ("1.2 "), then
/// collapse whitespace.
pub fn normalize_heading(text: &str) -> String {
    let stripped = text.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c.is_whitespace());
    collapse_whitespace(stripped)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_heading_strips_numbering() {
        assert_eq!(normalize_heading("1.2  Related   Work "), "Related Work");
        assert_eq!(normalize_heading("  3. Results"), "Results");
        assert_eq!(normalize_heading("Introduction"), "Introduction");
    }

    #[test]
    fn test_normalize_heading_all_digits() {
        assert_eq!(normalize_heading("4.1."), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("Deep\n Learning\t for  X"), "Deep Learning for X");
    }

    #[test]
    fn test_collapse_whitespace_composes_nfc() {
        assert_eq!(collapse_whitespace("Cafe\u{301}"), "Caf\u{e9}");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("references"), "References");
        assert_eq!(capitalize_first("REFERENCES"), "REFERENCES");
        assert_eq!(capitalize_first(""), "");
    }
}
