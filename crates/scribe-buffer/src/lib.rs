//! # Scribe Buffer
//!
//! Text storage for the editor.
//!
//! ## Pieces
//!
//! - [`TextBuffer`]: the document text in a rope, with undo/redo history
//! - [`Selection`]: a normalized `[start, end)` range of character offsets
//! - [`TagSet`]: named styling tags over character ranges (e.g. "underline")
//! - [`Position`]: line/column coordinates for display
//!
//! All offsets are character offsets, not bytes. Byte offsets only appear in
//! [`LineSpan`], which is what a renderer needs to paint part of a line.

mod buffer;
mod history;
mod position;
mod selection;
mod tags;

pub use buffer::{LineSpan, TextBuffer};
pub use history::{Edit, EditGroup, EditKind, History};
pub use position::Position;
pub use selection::Selection;
pub use tags::TagSet;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Invalid range: {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len_chars(), 0);
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = TextBuffer::from("Hello, World!");
        assert_eq!(buffer.len_chars(), 13);
        assert_eq!(buffer.text(), "Hello, World!");
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, "Hello").unwrap();
        assert_eq!(buffer.text(), "Hello");

        buffer.insert(5, ", World!").unwrap();
        assert_eq!(buffer.text(), "Hello, World!");

        buffer.delete(5..7).unwrap();
        assert_eq!(buffer.text(), "HelloWorld!");
    }

    #[test]
    fn test_line_operations() {
        let buffer = TextBuffer::from("Line 1\nLine 2\nLine 3");
        assert_eq!(buffer.len_lines(), 3);
        assert_eq!(buffer.position_of(7).unwrap(), Position::new(1, 0));
        assert_eq!(buffer.char_at_position(Position::new(2, 4)).unwrap(), 18);
    }
}
