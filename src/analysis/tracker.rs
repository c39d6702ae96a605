//! Running section state threaded through a heading stream.

use super::heading::{is_keywords, is_references};
use crate::model::{REFERENCES_SECTION, UNKNOWN_SECTION};

/// State of the section tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState {
    /// Inside a regular section
    Normal(String),
    /// Inside the bibliography; terminal
    Locked,
}

/// Assigns section labels to a stream of heading detections.
///
/// Given the headings detected in one unit of text (a chunk, or a single
/// heading candidate):
///
/// - the first heading labels that unit;
/// - the last heading, unless it is "Keywords", becomes the current section
///   for later units without headings;
/// - a last heading of "References" locks the tracker. Every later unit is
///   labelled "References" and detection is no longer needed.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    state: SectionState,
}

impl SectionTracker {
    /// Start in the "Unknown" section.
    pub fn new() -> Self {
        Self {
            state: SectionState::Normal(UNKNOWN_SECTION.to_string()),
        }
    }

    /// Current state.
    pub fn state(&self) -> &SectionState {
        &self.state
    }

    /// Whether the References section has been entered.
    pub fn is_locked(&self) -> bool {
        self.state == SectionState::Locked
    }

    /// Name of the current section.
    pub fn current(&self) -> &str {
        match &self.state {
            SectionState::Normal(name) => name,
            SectionState::Locked => REFERENCES_SECTION,
        }
    }

    /// Label the next unit given the headings detected in it.
    pub fn label(&mut self, detected: &[String]) -> String {
        if self.is_locked() {
            return REFERENCES_SECTION.to_string();
        }

        let (Some(first), Some(last)) = (detected.first(), detected.last()) else {
            return self.current().to_string();
        };

        let label = canonical(first);
        if is_references(last) {
            self.state = SectionState::Locked;
        } else if !is_keywords(last) {
            self.state = SectionState::Normal(last.clone());
        }
        label
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Spell every variant of the bibliography heading the same way.
fn canonical(name: &str) -> String {
    if is_references(name) {
        REFERENCES_SECTION.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_starts_unknown() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.label(&[]), "Unknown");
        assert!(!tracker.is_locked());
    }

    #[test]
    fn test_first_labels_last_carries() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.label(&names(&["Abstract", "Introduction"])), "Abstract");
        assert_eq!(tracker.label(&[]), "Introduction");
    }

    #[test]
    fn test_keywords_do_not_become_current() {
        let mut tracker = SectionTracker::new();
        tracker.label(&names(&["Abstract"]));
        assert_eq!(tracker.label(&names(&["Keywords"])), "Keywords");
        assert_eq!(tracker.label(&[]), "Abstract");
    }

    #[test]
    fn test_references_lock_is_terminal() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.label(&names(&["Conclusion", "REFERENCES"])), "Conclusion");
        assert!(tracker.is_locked());
        assert_eq!(tracker.label(&[]), "References");
        assert_eq!(tracker.label(&names(&["1. Appendix A"])), "References");
        assert_eq!(tracker.state(), &SectionState::Locked);
    }

    #[test]
    fn test_references_label_is_canonical() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.label(&names(&["REFERENCE"])), "References");
    }

    #[test]
    fn test_references_not_last_does_not_lock() {
        let mut tracker = SectionTracker::new();
        tracker.label(&names(&["References", "Appendix"]));
        assert!(!tracker.is_locked());
        assert_eq!(tracker.current(), "Appendix");
    }
}
