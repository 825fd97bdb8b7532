//! The single open document.
//!
//! `DocumentState` owns everything the command handlers touch: the text
//! buffer, the insertion point and selection reported by the host, the
//! whole-document formatting, and the tag ranges. Handlers borrow it
//! mutably, so there is no shared UI state to coordinate.
//!
//! Tag ranges are shifted on every edit, whichever side made it (a handler,
//! undo/redo, or the user typing into the host widget).

use scribe_buffer::{BufferError, Edit, EditKind, LineSpan, Position, Selection, TagSet, TextBuffer};
use std::borrow::Cow;
use std::path::Path;

use crate::format::Formatting;
use crate::{CoreError, CoreResult};

/// Document text, insertion point, selection, formatting and tags.
#[derive(Debug)]
pub struct DocumentState {
    buffer: TextBuffer,

    /// Insertion point (char offset)
    cursor: usize,

    /// Active selection; never empty
    selection: Option<Selection>,

    formatting: Formatting,

    tags: TagSet,

    /// Bumped whenever the text changes
    revision: u64,
}

impl DocumentState {
    /// Creates an empty document with the given formatting.
    pub fn new(formatting: Formatting) -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: 0,
            selection: None,
            formatting,
            tags: TagSet::new(),
            revision: 0,
        }
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The full text.
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line/column of the insertion point.
    pub fn cursor_position(&self) -> Position {
        self.buffer.position_of(self.cursor).unwrap_or_default()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    pub fn formatting_mut(&mut self) -> &mut Formatting {
        &mut self.formatting
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if the text changed since it was last loaded or written.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    // ==================== Wholesale changes ====================

    /// Empties the document. Formatting is kept.
    pub fn clear(&mut self) {
        self.replace_buffer(TextBuffer::new());
    }

    /// Replaces the document with `text`. The cursor ends after it.
    pub fn load(&mut self, text: &str) {
        self.replace_buffer(TextBuffer::from(text));
    }

    /// Replaces the document with the contents of a file, read verbatim.
    ///
    /// On failure the document is left untouched.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let buffer = TextBuffer::from_file(path)?;
        self.replace_buffer(buffer);
        Ok(())
    }

    /// Writes the whole text to a file, verbatim.
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        self.buffer.write_to(path)?;
        Ok(())
    }

    fn replace_buffer(&mut self, buffer: TextBuffer) {
        self.cursor = buffer.len_chars();
        self.buffer = buffer;
        self.selection = None;
        self.tags.clear();
        self.revision += 1;
    }

    // ==================== Cursor and selection ====================

    /// Moves the insertion point, clamped to the text.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer.len_chars());
    }

    /// Sets the selection. Empty selections clear it.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection
            .map(|sel| sel.clamp(self.buffer.len_chars()))
            .filter(|sel| !sel.is_empty());
    }

    /// The selected text, if anything is selected.
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.selection?;
        self.buffer
            .slice(selection.range())
            .ok()
            .map(Cow::into_owned)
    }

    // ==================== Edits ====================

    /// Inserts `text` at the insertion point and moves the insertion point
    /// after it. Returns the number of characters inserted.
    pub fn insert_at_cursor(&mut self, text: &str) -> CoreResult<usize> {
        let at = self.cursor.min(self.buffer.len_chars());
        let len = text.chars().count();

        self.buffer.insert(at, text)?;
        self.tags.shift_for_insert(at, len);

        self.cursor = at + len;
        self.selection = None;
        if len > 0 {
            self.revision += 1;
        }
        Ok(len)
    }

    /// Brings the document in line with text edited in the host widget.
    ///
    /// The change is found by trimming the common prefix and suffix, and is
    /// recorded as a plain insert or delete when it is one, so consecutive
    /// keystrokes coalesce in the history. Returns false if nothing changed.
    pub fn apply_host_text(&mut self, text: &str) -> CoreResult<bool> {
        let (removed, inserted) = {
            let old = self.buffer.text();
            if old == text {
                return Ok(false);
            }

            let prefix = old
                .chars()
                .zip(text.chars())
                .take_while(|(a, b)| a == b)
                .count();
            let old_len = self.buffer.len_chars();
            let new_len = text.chars().count();
            let suffix = old
                .chars()
                .rev()
                .zip(text.chars().rev())
                .take(old_len.min(new_len) - prefix)
                .take_while(|(a, b)| a == b)
                .count();

            let inserted: String = text
                .chars()
                .skip(prefix)
                .take(new_len - suffix - prefix)
                .collect();
            (prefix..old_len - suffix, inserted)
        };

        let at = removed.start;
        let inserted_len = inserted.chars().count();
        if inserted.is_empty() {
            self.buffer.delete(removed.clone())?;
        } else if removed.is_empty() {
            self.buffer.insert(at, &inserted)?;
        } else {
            self.buffer.replace(removed.clone(), &inserted)?;
        }

        self.tags.shift_for_delete(removed);
        self.tags.shift_for_insert(at, inserted_len);
        self.cursor = at + inserted_len;
        self.selection = None;
        self.revision += 1;

        tracing::trace!("Host edit at {}: +{} chars", at, inserted_len);
        Ok(true)
    }

    /// Reverts the last edit group. Returns false if there was none.
    pub fn undo(&mut self) -> CoreResult<bool> {
        match self.buffer.undo() {
            Ok(edits) => {
                self.follow_edits(&edits);
                Ok(true)
            }
            Err(BufferError::NothingToUndo) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Re-applies the last undone edit group. Returns false if there was none.
    pub fn redo(&mut self) -> CoreResult<bool> {
        match self.buffer.redo() {
            Ok(edits) => {
                self.follow_edits(&edits);
                Ok(true)
            }
            Err(BufferError::NothingToRedo) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn follow_edits(&mut self, edits: &[Edit]) {
        for edit in edits {
            self.tags.follow_edit(edit);
        }
        if let Some(last) = edits.last() {
            self.cursor = match last.kind {
                EditKind::Insert => last.position + last.len_chars(),
                EditKind::Delete => last.position,
            };
        }
        self.selection = None;
        self.revision += 1;
    }

    // ==================== Tags ====================

    /// Toggles `tag` over the selection.
    ///
    /// Whether the character at the selection start already carries the tag
    /// decides between removing and adding. Returns true if the tag was
    /// added.
    pub fn toggle_tag(&mut self, tag: &str) -> CoreResult<bool> {
        let selection = self.selection.ok_or(CoreError::NoSelection)?;

        if self.tags.contains(tag, selection.start) {
            self.tags.remove(tag, selection.range());
            Ok(false)
        } else {
            self.tags.add(tag, selection.range());
            Ok(true)
        }
    }

    /// Per-line byte spans of the text carrying `tag`, for rendering.
    pub fn tag_spans(&self, tag: &str) -> Vec<LineSpan> {
        self.tags
            .ranges(tag)
            .iter()
            .filter_map(|range| self.buffer.line_spans(range.clone()).ok())
            .flatten()
            .collect()
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new(Formatting::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNDERLINE;

    fn doc(text: &str) -> DocumentState {
        let mut doc = DocumentState::default();
        doc.load(text);
        doc
    }

    #[test]
    fn test_load_puts_cursor_at_end() {
        let doc = doc("two\nlines");
        assert_eq!(doc.text(), "two\nlines");
        assert_eq!(doc.cursor(), 9);
        assert_eq!(doc.cursor_position(), Position::new(1, 5));
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_clear_keeps_formatting_and_drops_tags() {
        let mut doc = doc("hello");
        doc.formatting_mut().font.size = 20;
        doc.set_selection(Some(Selection::new(0, 5)));
        doc.toggle_tag(UNDERLINE).unwrap();

        doc.clear();
        assert_eq!(doc.text(), "");
        assert!(doc.tags().is_empty());
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.formatting().font.size, 20);
    }

    #[test]
    fn test_empty_selection_is_no_selection() {
        let mut doc = doc("hello");
        doc.set_selection(Some(Selection::cursor(2)));
        assert_eq!(doc.selection(), None);

        doc.set_selection(Some(Selection::new(3, 99)));
        assert_eq!(doc.selection(), Some(Selection::new(3, 5)));
        assert_eq!(doc.selected_text().as_deref(), Some("lo"));
    }

    #[test]
    fn test_insert_at_cursor_shifts_tags() {
        let mut doc = doc("hello world");
        doc.set_selection(Some(Selection::new(6, 11)));
        doc.toggle_tag(UNDERLINE).unwrap();

        doc.set_cursor(0);
        assert_eq!(doc.insert_at_cursor(">> ").unwrap(), 3);
        assert_eq!(doc.text(), ">> hello world");
        assert_eq!(doc.cursor(), 3);
        assert_eq!(doc.tags().ranges(UNDERLINE), &[9..14]);
    }

    #[test]
    fn test_toggle_tag_requires_selection() {
        let mut doc = doc("hello");
        assert!(matches!(
            doc.toggle_tag(UNDERLINE),
            Err(CoreError::NoSelection)
        ));
    }

    #[test]
    fn test_toggle_tag_checks_selection_start() {
        let mut doc = doc("hello world");
        doc.set_selection(Some(Selection::new(0, 5)));
        assert!(doc.toggle_tag(UNDERLINE).unwrap());

        // Starts untagged: the whole selection gets tagged
        doc.set_selection(Some(Selection::new(5, 11)));
        assert!(doc.toggle_tag(UNDERLINE).unwrap());
        assert_eq!(doc.tags().ranges(UNDERLINE), &[0..11]);

        // Starts tagged: the whole selection is cleared
        doc.set_selection(Some(Selection::new(3, 8)));
        assert!(!doc.toggle_tag(UNDERLINE).unwrap());
        assert_eq!(doc.tags().ranges(UNDERLINE), &[0..3, 8..11]);
    }

    #[test]
    fn test_host_typing_is_an_insert() {
        let mut doc = doc("helo");
        assert!(doc.apply_host_text("hello").unwrap());
        assert_eq!(doc.text(), "hello");
        assert_eq!(doc.cursor(), 4);

        assert!(!doc.apply_host_text("hello").unwrap());
    }

    #[test]
    fn test_host_edit_inside_tag_extends_it() {
        let mut doc = doc("abcdef");
        doc.set_selection(Some(Selection::new(1, 5)));
        doc.toggle_tag(UNDERLINE).unwrap();

        doc.apply_host_text("abcXYdef").unwrap();
        assert_eq!(doc.tags().ranges(UNDERLINE), &[1..7]);

        doc.apply_host_text("aef").unwrap();
        assert_eq!(doc.tags().ranges(UNDERLINE), &[1..2]);
    }

    #[test]
    fn test_host_replacement_is_one_undo_step() {
        let mut doc = doc("the cat sat");
        doc.apply_host_text("the dog sat").unwrap();
        assert_eq!(doc.text(), "the dog sat");

        assert!(doc.undo().unwrap());
        assert_eq!(doc.text(), "the cat sat");
        assert!(doc.redo().unwrap());
        assert_eq!(doc.text(), "the dog sat");
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut doc = doc("text");
        assert!(!doc.undo().unwrap());
        assert!(!doc.redo().unwrap());
        assert_eq!(doc.text(), "text");
    }

    #[test]
    fn test_undo_moves_tags_back() {
        let mut doc = doc("world");
        doc.set_selection(Some(Selection::new(0, 5)));
        doc.toggle_tag(UNDERLINE).unwrap();

        doc.set_cursor(0);
        doc.insert_at_cursor("hello ").unwrap();
        assert_eq!(doc.tags().ranges(UNDERLINE), &[6..11]);

        doc.undo().unwrap();
        assert_eq!(doc.text(), "world");
        assert_eq!(doc.tags().ranges(UNDERLINE), &[0..5]);
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_tag_spans_are_per_line() {
        let mut doc = doc("ab\ncd");
        doc.set_selection(Some(Selection::new(1, 4)));
        doc.toggle_tag(UNDERLINE).unwrap();

        let spans = doc.tag_spans(UNDERLINE);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].line, spans[0].bytes.clone()), (0, 1..2));
        assert_eq!((spans[1].line, spans[1].bytes.clone()), (1, 0..1));
    }

    #[test]
    fn test_revision_tracks_text_changes() {
        let mut doc = DocumentState::default();
        let start = doc.revision();
        doc.insert_at_cursor("").unwrap();
        assert_eq!(doc.revision(), start);

        doc.insert_at_cursor("x").unwrap();
        assert_eq!(doc.revision(), start + 1);

        doc.set_selection(Some(Selection::new(0, 1)));
        doc.toggle_tag(UNDERLINE).unwrap();
        assert_eq!(doc.revision(), start + 1);
    }
}
