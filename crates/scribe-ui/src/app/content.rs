//! Keeps the text widget and the document in step.
//!
//! The widget works in lines and byte columns; the document works in char
//! offsets. These helpers translate between the two.

use iced::widget::text_editor::{Action, Content, Motion};
use scribe_buffer::{Position, Selection, TextBuffer};

/// The widget's text, with each line keeping the break it has in `document`.
///
/// The widget drops line terminators. Lines the edit left alone at the top
/// and bottom keep their old break, so a mixed `\n`/`\r\n` file stays as it
/// was. New breaks inside the edited region copy the first break of that
/// region.
pub fn widget_text(content: &Content, document: &str) -> String {
    let lines: Vec<String> = content.lines().map(|line| line.to_string()).collect();
    join_lines(&lines, document)
}

/// Splits `text` into lines and the break after each one.
fn split_lines(text: &str) -> (Vec<&str>, Vec<&'static str>) {
    let mut lines = Vec::new();
    let mut breaks = Vec::new();
    let mut rest = text;

    while let Some(idx) = rest.find('\n') {
        let line = &rest[..idx];
        match line.strip_suffix('\r') {
            Some(stripped) => {
                lines.push(stripped);
                breaks.push("\r\n");
            }
            None => {
                lines.push(line);
                breaks.push("\n");
            }
        }
        rest = &rest[idx + 1..];
    }
    lines.push(rest);

    (lines, breaks)
}

fn join_lines(lines: &[String], document: &str) -> String {
    let (old_lines, old_breaks) = split_lines(document);
    let (old_count, new_count) = (old_lines.len(), lines.len());

    let prefix = lines
        .iter()
        .zip(&old_lines)
        .take_while(|(new, old)| new.as_str() == **old)
        .count();
    let suffix = lines
        .iter()
        .rev()
        .zip(old_lines.iter().rev())
        .take(old_count.min(new_count) - prefix)
        .take_while(|(new, old)| new.as_str() == **old)
        .count();
    let fallback = old_breaks
        .get(prefix)
        .or(old_breaks.last())
        .copied()
        .unwrap_or("\n");

    let mut text = String::with_capacity(document.len() + 16);
    for (i, line) in lines.iter().enumerate() {
        text.push_str(line);
        if i + 1 == new_count {
            break;
        }

        // Break after line `i`: unchanged lines above the edit keep theirs by
        // index, unchanged lines below it by distance from the end.
        let old_break = if i < prefix {
            old_breaks.get(i)
        } else if i + 1 >= new_count - suffix {
            (i + old_count)
                .checked_sub(new_count)
                .and_then(|k| old_breaks.get(k))
        } else {
            None
        };
        text.push_str(old_break.copied().unwrap_or(fallback));
    }

    text
}

/// Char column of a byte column within `line`.
pub fn char_column(line: &str, byte: usize) -> usize {
    line.char_indices().take_while(|(i, _)| *i < byte).count()
}

/// Char offset of the widget's cursor in `buffer`.
pub fn cursor_offset(content: &Content, buffer: &TextBuffer) -> usize {
    let (line, byte) = content.cursor_position();
    let column = content
        .line(line)
        .map(|text| char_column(&text, byte))
        .unwrap_or(byte);

    buffer
        .char_at_position(Position::new(line, column))
        .unwrap_or(buffer.len_chars())
}

/// Works out the selected range in `buffer`.
///
/// The widget reports the selection as text only, with `\n` breaks, and
/// keeps the cursor at its moving end. With a known `anchor` (where the
/// cursor was when the selection started) the range is anchor..cursor as
/// long as that span holds the selected text. Otherwise it is whichever
/// side of the cursor holds it, the side before the cursor first.
pub fn resolve_selection(
    buffer: &TextBuffer,
    anchor: Option<usize>,
    cursor: usize,
    selected: &str,
) -> Option<Selection> {
    if selected.is_empty() {
        return None;
    }

    let holds = |selection: &Selection| {
        buffer
            .slice(selection.range())
            .is_ok_and(|text| text.replace("\r\n", "\n") == selected)
    };

    let from_anchor = anchor.map(|anchor| Selection::new(anchor, cursor));
    let before = start_before(buffer, cursor, selected).map(|start| Selection::new(start, cursor));
    let after = end_after(buffer, cursor, selected).map(|end| Selection::new(cursor, end));

    from_anchor.into_iter().chain(before).chain(after).find(holds)
}

/// Where `selected` would start if it ended at `cursor`.
fn start_before(buffer: &TextBuffer, cursor: usize, selected: &str) -> Option<usize> {
    let breaks = selected.matches('\n').count();
    let first_len = selected.split('\n').next().map_or(0, |s| s.chars().count());
    if breaks == 0 {
        return cursor.checked_sub(first_len);
    }

    let line = buffer.position_of(cursor).ok()?.line.checked_sub(breaks)?;
    let line_end = buffer.char_at_position(Position::new(line, usize::MAX)).ok()?;
    line_end.checked_sub(first_len)
}

/// Where `selected` would end if it started at `cursor`.
fn end_after(buffer: &TextBuffer, cursor: usize, selected: &str) -> Option<usize> {
    let breaks = selected.matches('\n').count();
    let last_len = selected.rsplit('\n').next().map_or(0, |s| s.chars().count());
    if breaks == 0 {
        return Some(cursor + last_len);
    }

    let line = buffer.position_of(cursor).ok()?.line + breaks;
    buffer.char_at_position(Position::new(line, last_len)).ok()
}

/// Moves the widget's cursor to a line/column.
pub fn place_cursor(content: &mut Content, position: Position) {
    content.perform(Action::Move(Motion::DocumentStart));
    for _ in 0..position.line {
        content.perform(Action::Move(Motion::Down));
    }
    content.perform(Action::Move(Motion::Home));
    for _ in 0..position.column {
        content.perform(Action::Move(Motion::Right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::text_editor::Edit;
    use scribe_core::{Editor, UNDERLINE};

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_join_lines_uniform_breaks() {
        assert_eq!(join_lines(&lines(&["a", "b", ""]), "a\nb\n"), "a\nb\n");
        assert_eq!(join_lines(&lines(&["a", "b", ""]), "a\r\nb\r\n"), "a\r\nb\r\n");
    }

    #[test]
    fn test_join_lines_keeps_mixed_breaks() {
        let document = "a\r\nb\nc";
        assert_eq!(join_lines(&lines(&["a", "b", "cX"]), document), "a\r\nb\ncX");
        assert_eq!(join_lines(&lines(&["Xa", "b", "c"]), document), "Xa\r\nb\nc");
    }

    #[test]
    fn test_join_lines_after_joining_two_lines() {
        // Backspace at the start of "b"
        assert_eq!(join_lines(&lines(&["ab", "c"]), "a\r\nb\nc"), "ab\nc");
    }

    #[test]
    fn test_join_lines_new_line_copies_neighbouring_break() {
        assert_eq!(join_lines(&lines(&["a", "b", ""]), "a\r\nb"), "a\r\nb\r\n");
        assert_eq!(join_lines(&lines(&["a", "", "b"]), "a\nb"), "a\n\nb");
        assert_eq!(join_lines(&lines(&["a", ""]), "a"), "a\n");
    }

    #[test]
    fn test_typing_keeps_mixed_breaks_and_tags() {
        let mut editor = Editor::new();
        let document = editor.document_mut();
        document.load("a\r\nb\nc");
        document.set_selection(Some(Selection::new(5, 6)));
        document.toggle_tag(UNDERLINE).unwrap();

        let mut content = Content::with_text(&document.text());
        content.perform(Action::Move(Motion::DocumentEnd));
        content.perform(Action::Edit(Edit::Insert('X')));

        let text = widget_text(&content, &document.text());
        document.apply_host_text(&text).unwrap();

        assert_eq!(document.text(), "a\r\nb\ncX");
        assert_eq!(document.tags().ranges(UNDERLINE), &[5..6]);
    }

    #[test]
    fn test_char_column() {
        assert_eq!(char_column("hello", 3), 3);
        assert_eq!(char_column("héllo", 3), 2);
        assert_eq!(char_column("ab", 10), 2);
    }

    #[test]
    fn test_backward_selection_uses_anchor() {
        // Second "ab" selected right to left: anchor 4, cursor 2
        let buffer = TextBuffer::from("abab");
        assert_eq!(
            resolve_selection(&buffer, Some(4), 2, "ab"),
            Some(Selection::new(2, 4))
        );
        assert_eq!(
            resolve_selection(&buffer, Some(0), 2, "ab"),
            Some(Selection::new(0, 2))
        );
    }

    #[test]
    fn test_stale_anchor_falls_back_to_text() {
        let buffer = TextBuffer::from("hello world");
        assert_eq!(
            resolve_selection(&buffer, Some(1), 11, "world"),
            Some(Selection::new(6, 11))
        );
    }

    #[test]
    fn test_selection_without_anchor() {
        let buffer = TextBuffer::from("hello world");
        assert_eq!(
            resolve_selection(&buffer, None, 5, "hello"),
            Some(Selection::new(0, 5))
        );
        assert_eq!(
            resolve_selection(&buffer, None, 6, "world"),
            Some(Selection::new(6, 11))
        );
    }

    #[test]
    fn test_selection_across_mixed_breaks() {
        let buffer = TextBuffer::from("ab\r\ncd\nef");
        // Cursor after "c", selection "b\r\nc" before it
        assert_eq!(
            resolve_selection(&buffer, None, 5, "b\nc"),
            Some(Selection::new(1, 5))
        );
        // Cursor on "b", selection "b\r\ncd\ne" after it
        assert_eq!(
            resolve_selection(&buffer, None, 1, "b\ncd\ne"),
            Some(Selection::new(1, 8))
        );
    }

    #[test]
    fn test_selection_mismatch() {
        let buffer = TextBuffer::from("hello");
        assert_eq!(resolve_selection(&buffer, None, 0, "xyz"), None);
        assert_eq!(resolve_selection(&buffer, Some(0), 2, ""), None);
    }
}
