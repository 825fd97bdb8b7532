use iced::widget::{Space, container, horizontal_space, row, text, text_editor};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use scribe_core::UNDERLINE;

use crate::app::{App, Message};
use crate::highlighter::{TagHighlighter, TagSettings};
use crate::theme::{self, colors};

impl App {
    pub fn view_editor(&self) -> Element<'_, Message> {
        let formatting = *self.editor.document().formatting();
        let foreground = theme::to_color(formatting.foreground);
        let background = theme::to_color(formatting.background);

        let tag_settings = TagSettings {
            spans: self.editor.document().tag_spans(UNDERLINE),
            color: theme::underline_color(formatting.background),
        };

        text_editor(&self.content)
            .height(Length::Fill)
            .padding(Padding::from([8, 10]))
            .font(theme::to_font(&formatting.font))
            .size(formatting.font.size as f32)
            .style(move |_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(background),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: colors::TEXT_MUTED,
                placeholder: colors::TEXT_MUTED,
                value: foreground,
                selection: colors::SELECTION,
            })
            .highlight_with::<TagHighlighter>(tag_settings, |highlight, _theme| {
                highlight.to_format()
            })
            .on_action(Message::EditorAction)
            .into()
    }

    pub fn view_status_bar(&self) -> Element<'_, Message> {
        let document = self.editor.document();
        let position = document.cursor_position();
        let cursor_info = format!("Ln {}, Col {}", position.line + 1, position.column + 1);

        let formatting = document.formatting();
        let scheme = if formatting.background.is_dark() {
            "Dark"
        } else {
            "Light"
        };

        let status_content = row![
            text(&self.status_message)
                .size(12)
                .color(colors::TEXT_SECONDARY),
            horizontal_space(),
            text(formatting.font.to_string())
                .size(12)
                .color(colors::TEXT_SECONDARY),
            Space::with_width(24),
            text(cursor_info).size(12).color(colors::TEXT_PRIMARY),
            Space::with_width(24),
            text(scheme).size(12).color(colors::TEXT_SECONDARY),
            Space::with_width(12),
        ]
        .padding(Padding::from([4, 12]))
        .align_y(iced::Alignment::Center);

        container(status_content)
            .width(Length::Fill)
            .height(26)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_BAR)),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
