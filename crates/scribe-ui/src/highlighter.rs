//! Paints tagged text in the editor.
//!
//! iced's text editor has no underline decoration, so underlined ranges are
//! drawn in an accent color instead. The ranges come from the document's
//! tag set as per-line byte spans; the highlighter only looks them up.

use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::{Color, Font};
use scribe_buffer::LineSpan;
use std::collections::BTreeMap;
use std::ops::Range;

/// Spans to paint and the color to paint them with.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSettings {
    pub spans: Vec<LineSpan>,
    pub color: Color,
}

/// Format for tagged text.
#[derive(Debug, Clone, Copy)]
pub struct TagFormat {
    pub color: Color,
}

impl TagFormat {
    pub fn to_format(&self) -> Format<Font> {
        Format {
            color: Some(self.color),
            font: None,
        }
    }
}

/// Highlighter over precomputed tag spans.
pub struct TagHighlighter {
    by_line: BTreeMap<usize, Vec<Range<usize>>>,
    color: Color,
    current_line: usize,
}

impl TagHighlighter {
    fn index(&mut self, settings: &TagSettings) {
        self.by_line.clear();
        for span in &settings.spans {
            self.by_line
                .entry(span.line)
                .or_default()
                .push(span.bytes.clone());
        }
        self.color = settings.color;
    }
}

impl Highlighter for TagHighlighter {
    type Settings = TagSettings;
    type Highlight = TagFormat;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, TagFormat)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        let mut highlighter = Self {
            by_line: BTreeMap::new(),
            color: settings.color,
            current_line: 0,
        };
        highlighter.index(settings);
        highlighter
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        self.index(new_settings);
        // Repaint everything
        self.current_line = 0;
    }

    fn change_line(&mut self, line: usize) {
        self.current_line = self.current_line.min(line);
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        let format = TagFormat { color: self.color };
        let spans: Vec<_> = self
            .by_line
            .get(&self.current_line)
            .into_iter()
            .flatten()
            .filter_map(|range| {
                // The widget and the document can disagree for a frame
                let end = range.end.min(line.len());
                let valid = range.start < end
                    && line.is_char_boundary(range.start)
                    && line.is_char_boundary(end);
                valid.then(|| (range.start..end, format))
            })
            .collect();

        self.current_line += 1;
        spans.into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}
