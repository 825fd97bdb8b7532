//! Core text buffer implementation using a rope.
//!
//! The rope gives O(log n) insertion and deletion anywhere in the document
//! and cheap char/line index conversion, which is what both the editor
//! commands and the widget synchronisation lean on.

use ropey::Rope;
use std::borrow::Cow;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use crate::history::{Edit, EditKind, History};
use crate::{BufferError, BufferResult, Position};

/// Maximum number of undo groups kept per buffer.
const MAX_HISTORY: usize = 1000;

/// Part of a single line, in byte offsets relative to the line start.
///
/// This is the shape a line-oriented renderer wants when painting a tagged
/// character range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineSpan {
    /// Line number (0-indexed)
    pub line: usize,
    /// Byte range inside the line
    pub bytes: Range<usize>,
}

/// A text buffer backed by a rope, with undo/redo history.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Edit history for undo/redo
    history: History,

    /// Whether the buffer changed since it was loaded or last written
    modified: bool,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use scribe_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            history: History::new(MAX_HISTORY),
            modified: false,
        }
    }

    /// Reads a file verbatim into a new buffer.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from(content.as_str()))
    }

    /// Writes the whole buffer to `path`, replacing any existing file.
    ///
    /// The text goes to a uniquely named temporary file in the target's
    /// directory and is then renamed over the target, so a failed write
    /// never leaves a truncated file. A symlink is followed and its target
    /// replaced; the link itself stays.
    pub fn write_to(&mut self, path: impl AsRef<Path>) -> BufferResult<()> {
        let path = path.as_ref();
        let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(self.text().as_bytes())?;
        if let Ok(metadata) = std::fs::metadata(&path) {
            file.as_file().set_permissions(metadata.permissions())?;
        }
        file.persist(&path).map_err(|err| err.error)?;

        self.modified = false;
        Ok(())
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<Cow<'_, str>> {
        self.check_range(&range)?;
        Ok(self.rope.slice(range).into())
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line. A buffer ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        if text.is_empty() {
            return Ok(());
        }

        self.history.push(Edit::insert(char_idx, text));
        self.rope.insert(char_idx, text);
        self.modified = true;

        Ok(())
    }

    /// Deletes text in a character range, returning what was removed.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(String::new());
        }

        let deleted: String = self.rope.slice(range.clone()).into();
        self.history.push(Edit::delete(range.start, deleted.clone()));
        self.rope.remove(range);
        self.modified = true;

        Ok(deleted)
    }

    /// Replaces text in a range with new text as a single undo step.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> BufferResult<String> {
        self.check_range(&range)?;

        self.history.begin_group();
        let result = self
            .delete(range.clone())
            .and_then(|deleted| self.insert(range.start, text).map(|()| deleted));
        self.history.end_group();

        result
    }

    /// Replaces the whole content as a single undo step.
    pub fn set_text(&mut self, text: &str) -> BufferResult<String> {
        self.replace(0..self.len_chars(), text)
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last edit group.
    ///
    /// Returns the edits as they were applied to the rope, in order, so
    /// callers tracking offsets (tags, cursors) can follow along.
    pub fn undo(&mut self) -> BufferResult<Vec<Edit>> {
        let group = self.history.undo().ok_or(BufferError::NothingToUndo)?;

        let applied: Vec<Edit> = group.edits.iter().rev().map(Edit::inverse).collect();
        for edit in &applied {
            self.apply_unrecorded(edit);
        }

        self.modified = true;
        Ok(applied)
    }

    /// Redoes the last undone edit group.
    pub fn redo(&mut self) -> BufferResult<Vec<Edit>> {
        let group = self.history.redo().ok_or(BufferError::NothingToRedo)?;

        for edit in &group.edits {
            self.apply_unrecorded(edit);
        }

        self.modified = true;
        Ok(group.edits)
    }

    /// Applies an edit to the rope without touching history.
    fn apply_unrecorded(&mut self, edit: &Edit) {
        match edit.kind {
            EditKind::Insert => self.rope.insert(edit.position, &edit.content),
            EditKind::Delete => {
                let end = edit.position + edit.len_chars();
                self.rope.remove(edit.position..end);
            }
        }
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the edit history.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    // ==================== Position Conversion ====================

    /// Converts a character index to a line/column position.
    pub fn position_of(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let line = self.rope.char_to_line(char_idx);
        let column = char_idx - self.rope.line_to_char(line);
        Ok(Position { line, column })
    }

    /// Converts a line/column position to a character index.
    ///
    /// Columns past the end of the line's text are clamped to the end of the
    /// line (before its line break).
    pub fn char_at_position(&self, pos: Position) -> BufferResult<usize> {
        if pos.line >= self.len_lines() {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        let line_start = self.rope.line_to_char(pos.line);
        Ok(line_start + pos.column.min(self.line_text_len(pos.line)))
    }

    /// Characters on a line, excluding the trailing line break.
    fn line_text_len(&self, line_idx: usize) -> usize {
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    /// Splits a character range into per-line byte spans.
    ///
    /// Line breaks are not part of any span. Lines the range only touches
    /// at their break produce no span.
    pub fn line_spans(&self, range: Range<usize>) -> BufferResult<Vec<LineSpan>> {
        self.check_range(&range)?;

        let mut spans = Vec::new();
        if range.is_empty() {
            return Ok(spans);
        }

        let first_line = self.rope.char_to_line(range.start);
        let last_line = self.rope.char_to_line(range.end - 1);

        for line in first_line..=last_line {
            let line_start = self.rope.line_to_char(line);
            let text_end = line_start + self.line_text_len(line);

            let start = range.start.max(line_start);
            let end = range.end.min(text_end);
            if start >= end {
                continue;
            }

            let line_slice = self.rope.line(line);
            spans.push(LineSpan {
                line,
                bytes: line_slice.char_to_byte(start - line_start)
                    ..line_slice.char_to_byte(end - line_start),
            });
        }

        Ok(spans)
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has unwritten changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn check_range(&self, range: &Range<usize>) -> BufferResult<()> {
        if range.start > range.end {
            return Err(BufferError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            history: History::new(MAX_HISTORY),
            modified: false,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
