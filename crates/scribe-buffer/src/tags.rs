//! Named styling tags over character ranges.
//!
//! A tag (e.g. `"underline"`) covers a set of character ranges. For each tag
//! the ranges are kept sorted, non-empty, and merged, so "is offset `n`
//! tagged?" is a binary search and adding then removing the same range is an
//! exact round trip.
//!
//! Ranges follow buffer edits like marks in a text widget:
//! - text inserted strictly inside a tagged range is tagged too
//! - text inserted at a range boundary is not
//! - deleting text shrinks or removes the ranges it covered

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

use crate::history::{Edit, EditKind};

/// Tag name to tagged character ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: BTreeMap<String, Vec<Range<usize>>>,
}

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags `range` with `tag`, merging with any touching ranges.
    pub fn add(&mut self, tag: &str, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let ranges = self.tags.entry(tag.to_string()).or_default();
        ranges.push(range);
        normalize(ranges);
    }

    /// Removes `tag` from every character in `range`.
    ///
    /// Ranges partially covered are trimmed or split.
    pub fn remove(&mut self, tag: &str, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let Some(ranges) = self.tags.get_mut(tag) else {
            return;
        };

        let mut kept = Vec::with_capacity(ranges.len() + 1);
        for r in ranges.drain(..) {
            if r.end <= range.start || r.start >= range.end {
                kept.push(r);
                continue;
            }
            if r.start < range.start {
                kept.push(r.start..range.start);
            }
            if r.end > range.end {
                kept.push(range.end..r.end);
            }
        }

        if kept.is_empty() {
            self.tags.remove(tag);
        } else {
            *ranges = kept;
        }
    }

    /// Returns true if the character at `offset` carries `tag`.
    pub fn contains(&self, tag: &str, offset: usize) -> bool {
        self.tags.get(tag).is_some_and(|ranges| {
            // Ranges are sorted and disjoint: find the last one starting at
            // or before `offset`.
            let idx = ranges.partition_point(|r| r.start <= offset);
            idx > 0 && offset < ranges[idx - 1].end
        })
    }

    /// The ranges carrying `tag`, sorted and disjoint.
    pub fn ranges(&self, tag: &str) -> &[Range<usize>] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if no character carries any tag.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Removes every tag.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Adjusts ranges for `len` characters inserted at offset `at`.
    pub fn shift_for_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for ranges in self.tags.values_mut() {
            for r in ranges.iter_mut() {
                if at <= r.start {
                    r.start += len;
                    r.end += len;
                } else if at < r.end {
                    r.end += len;
                }
            }
        }
    }

    /// Adjusts ranges for the characters in `deleted` being removed.
    pub fn shift_for_delete(&mut self, deleted: Range<usize>) {
        if deleted.is_empty() {
            return;
        }
        let map = |offset: usize| {
            if offset <= deleted.start {
                offset
            } else if offset >= deleted.end {
                offset - deleted.len()
            } else {
                deleted.start
            }
        };

        for ranges in self.tags.values_mut() {
            for r in ranges.iter_mut() {
                *r = map(r.start)..map(r.end);
            }
            normalize(ranges);
        }
        self.tags.retain(|_, ranges| !ranges.is_empty());
    }

    /// Adjusts ranges for an edit applied to the buffer.
    pub fn follow_edit(&mut self, edit: &Edit) {
        let len = edit.len_chars();
        match edit.kind {
            EditKind::Insert => self.shift_for_insert(edit.position, len),
            EditKind::Delete => self.shift_for_delete(edit.position..edit.position + len),
        }
    }
}

/// Sorts, drops empty ranges, and merges overlapping or touching ones.
fn normalize(ranges: &mut Vec<Range<usize>>) {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    *ranges = merged;
}
