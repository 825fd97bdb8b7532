//! Text selection handling.
//!
//! Selections use exclusive ranges of character offsets:
//! - empty selections (start == end) are natural
//! - length is just `end - start`
//! - they slice the buffer directly

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A selection of text in the buffer.
///
/// The start is always before or equal to the end (normalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Selection {
    /// Creates a new selection.
    ///
    /// Automatically normalizes so start <= end.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self {
            start: anchor.min(head),
            end: anchor.max(head),
        }
    }

    /// Creates a zero-width selection (cursor position).
    pub fn cursor(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selection as a range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if an offset is within this selection.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns true if this selection overlaps with another.
    pub fn overlaps(&self, other: &Selection) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the selection clamped to a buffer of `len` characters.
    pub fn clamp(&self, len: usize) -> Selection {
        Selection {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Selection::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_normalization() {
        let sel = Selection::new(9, 3);
        assert_eq!(sel.start, 3);
        assert_eq!(sel.end, 9);
        assert_eq!(sel.len(), 6);
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(0, 10);
        assert!(sel.contains(5));
        assert!(!sel.contains(10)); // End is exclusive
    }

    #[test]
    fn test_selection_overlaps() {
        let a = Selection::new(0, 5);
        assert!(a.overlaps(&Selection::new(4, 8)));
        assert!(!a.overlaps(&Selection::new(5, 8)));
    }

    #[test]
    fn test_cursor_is_empty() {
        assert!(Selection::cursor(4).is_empty());
        assert!(!Selection::new(4, 5).is_empty());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Selection::new(2, 20).clamp(8), Selection::new(2, 8));
    }
}
