//! Undo/redo history.
//!
//! Every mutation of a [`TextBuffer`](crate::TextBuffer) is recorded as an
//! [`Edit`]. Edits are collected into [`EditGroup`]s; one undo step reverts
//! one group. Groups come from two places:
//!
//! - explicit grouping (`begin_group` / `end_group`) for compound operations
//!   like "replace the whole document"
//! - coalescing, which folds rapid adjacent keystrokes into the previous
//!   group so typing a word is one undo step

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// The type of edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Text was inserted
    Insert,
    /// Text was deleted
    Delete,
}

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// What kind of edit this is
    pub kind: EditKind,
    /// Character position where the edit occurred
    pub position: usize,
    /// The text that was inserted or deleted
    pub content: String,
}

impl Edit {
    /// Creates an insert edit.
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            content: content.into(),
        }
    }

    /// Creates a delete edit.
    pub fn delete(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            content: content.into(),
        }
    }

    /// Number of characters touched by this edit.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Returns the inverse of this edit (for undo).
    pub fn inverse(&self) -> Self {
        Self {
            kind: match self.kind {
                EditKind::Insert => EditKind::Delete,
                EditKind::Delete => EditKind::Insert,
            },
            position: self.position,
            content: self.content.clone(),
        }
    }

    /// Returns true if `other` continues this edit and can be folded into it.
    ///
    /// Edits coalesce when they have the same kind, are adjacent, and
    /// neither contains a newline.
    pub fn can_coalesce(&self, other: &Edit) -> bool {
        if self.kind != other.kind {
            return false;
        }

        if self.content.contains('\n') || other.content.contains('\n') {
            return false;
        }

        match self.kind {
            EditKind::Insert => self.position + self.len_chars() == other.position,
            EditKind::Delete => {
                // Backspace walks left, forward delete stays put
                other.position + other.len_chars() == self.position
                    || self.position == other.position
            }
        }
    }

    /// Coalesces another edit into this one.
    pub fn coalesce(&mut self, other: Edit) {
        match self.kind {
            EditKind::Insert => {
                self.content.push_str(&other.content);
            }
            EditKind::Delete => {
                if other.position < self.position {
                    self.content = other.content + &self.content;
                    self.position = other.position;
                } else {
                    self.content.push_str(&other.content);
                }
            }
        }
    }
}

/// A group of edits that are undone/redone together.
///
/// Edits are stored in the order they were applied.
#[derive(Debug, Clone, Default)]
pub struct EditGroup {
    /// The edits in this group
    pub edits: Vec<Edit>,
    /// When this group last changed; `None` disables coalescing
    timestamp: Option<Instant>,
}

impl EditGroup {
    fn single(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            timestamp: Some(Instant::now()),
        }
    }
}

/// Manages undo/redo history.
///
/// `VecDeque` for the undo side so the oldest group can be dropped cheaply
/// once `max_size` is reached.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<EditGroup>,
    redo_stack: Vec<EditGroup>,
    /// Group being built between `begin_group` and `end_group`
    open_group: Option<EditGroup>,
    max_size: usize,
    coalesce_threshold: Duration,
}

impl History {
    /// Creates a new history with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_size.min(64)),
            redo_stack: Vec::new(),
            open_group: None,
            max_size,
            coalesce_threshold: Duration::from_millis(300),
        }
    }

    /// Sets how close together two edits must be to coalesce.
    ///
    /// `Duration::ZERO` turns coalescing off.
    pub fn set_coalesce_threshold(&mut self, threshold: Duration) {
        self.coalesce_threshold = threshold;
    }

    /// Records an edit. Clears the redo stack.
    pub fn push(&mut self, edit: Edit) {
        self.redo_stack.clear();

        if let Some(group) = self.open_group.as_mut() {
            group.edits.push(edit);
            return;
        }

        if let Some(last_group) = self.undo_stack.back_mut() {
            let recent = last_group
                .timestamp
                .is_some_and(|t| t.elapsed() < self.coalesce_threshold);
            if recent && last_group.edits.len() == 1 {
                if let Some(last_edit) = last_group.edits.last_mut() {
                    if last_edit.can_coalesce(&edit) {
                        last_edit.coalesce(edit);
                        last_group.timestamp = Some(Instant::now());
                        return;
                    }
                }
            }
        }

        self.push_group(EditGroup::single(edit));
    }

    /// Starts a compound edit. Everything pushed until [`end_group`](Self::end_group)
    /// becomes one undo step.
    pub fn begin_group(&mut self) {
        if self.open_group.is_none() {
            self.open_group = Some(EditGroup::default());
        }
    }

    /// Closes the compound edit started by [`begin_group`](Self::begin_group).
    pub fn end_group(&mut self) {
        if let Some(group) = self.open_group.take() {
            if !group.edits.is_empty() {
                self.push_group(group);
            }
        }
    }

    fn push_group(&mut self, group: EditGroup) {
        self.undo_stack.push_back(group);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    /// Pops the most recent group for undoing.
    pub fn undo(&mut self) -> Option<EditGroup> {
        let mut group = self.undo_stack.pop_back()?;
        group.timestamp = None;
        self.redo_stack.push(group.clone());
        Some(group)
    }

    /// Pops the most recently undone group for redoing.
    pub fn redo(&mut self) -> Option<EditGroup> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push_back(group.clone());
        Some(group)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
