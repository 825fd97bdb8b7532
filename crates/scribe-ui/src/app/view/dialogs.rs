use iced::widget::{
    Space, button, checkbox, column, container, pick_list, row, slider, text, text_input,
};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use scribe_core::{FontFamily, FontSpec};

use crate::app::{App, Channel, Message};
use crate::theme::{self, colors};

fn dialog_button<'a>(label: &'a str, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label).size(13).color(colors::TEXT_PRIMARY))
        .padding(Padding::from([6, 18]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                button::Status::Disabled => colors::BG_BAR,
                _ => colors::BG_BUTTON,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press_maybe(on_press)
        .into()
}

/// Centers `content` in a bordered dialog box.
fn dialog_frame<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        container(content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MENU)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

impl App {
    pub fn view_font_dialog(&self) -> Element<'_, Message> {
        let Some(dialog) = &self.font_dialog else {
            return Space::new(0, 0).into();
        };
        let font = dialog.font;

        let preview = text("The quick brown fox jumps over the lazy dog")
            .font(theme::to_font(&font))
            .size(font.size as f32)
            .color(colors::TEXT_PRIMARY);

        let modal_content = column![
            text("Font").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            row![
                text("Family").size(13).width(Length::Fixed(60.0)),
                pick_list(FontFamily::ALL, Some(font.family), Message::FontFamilyPicked)
                    .text_size(13),
            ]
            .align_y(iced::Alignment::Center),
            Space::with_height(8),
            row![
                text("Size").size(13).width(Length::Fixed(60.0)),
                slider(
                    FontSpec::MIN_SIZE..=FontSpec::MAX_SIZE,
                    font.size,
                    Message::FontSizeChanged
                ),
                Space::with_width(8),
                text(font.size.to_string()).size(13).width(Length::Fixed(28.0)),
            ]
            .align_y(iced::Alignment::Center),
            Space::with_height(8),
            row![
                checkbox("Bold", font.bold)
                    .on_toggle(Message::FontBoldToggled)
                    .size(16)
                    .text_size(13),
                Space::with_width(16),
                checkbox("Italic", font.italic)
                    .on_toggle(Message::FontItalicToggled)
                    .size(16)
                    .text_size(13),
            ],
            Space::with_height(12),
            container(preview)
                .width(Length::Fill)
                .height(Length::Fixed(80.0))
                .padding(8)
                .clip(true)
                .style(|_| container::Style {
                    background: Some(Background::Color(Color::WHITE)),
                    border: Border {
                        color: colors::BORDER,
                        width: 1.0,
                        radius: 2.0.into(),
                    },
                    ..Default::default()
                }),
            Space::with_height(16),
            row![
                Space::with_width(Length::Fill),
                dialog_button("Cancel", Some(Message::FontCancel)),
                Space::with_width(8),
                dialog_button("OK", Some(Message::FontConfirm)),
            ],
        ]
        .padding(20)
        .width(Length::Fixed(400.0));

        dialog_frame(modal_content)
    }

    pub fn view_color_dialog(&self) -> Element<'_, Message> {
        let Some(dialog) = &self.color_dialog else {
            return Space::new(0, 0).into();
        };
        let color = dialog.color;

        let mut channels = column![].spacing(6);
        for channel in Channel::ALL {
            let value = channel.get(color);
            channels = channels.push(
                row![
                    text(channel.label()).size(13).width(Length::Fixed(50.0)),
                    slider(0..=u8::MAX, value, move |v| Message::ColorChannelChanged(
                        channel, v
                    )),
                    Space::with_width(8),
                    text(value.to_string()).size(13).width(Length::Fixed(28.0)),
                ]
                .align_y(iced::Alignment::Center),
            );
        }

        let hex_valid = dialog.hex_is_valid();
        let swatch = container(Space::new(Length::Fixed(48.0), Length::Fixed(28.0))).style(
            move |_| container::Style {
                background: Some(Background::Color(theme::to_color(color))),
                border: Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 3.0.into(),
                },
                ..Default::default()
            },
        );

        let hex_row = row![
            text("Hex").size(13).width(Length::Fixed(50.0)),
            text_input("#rrggbb", &dialog.hex_input)
                .on_input(Message::ColorHexChanged)
                .on_submit(Message::ColorConfirm)
                .padding(Padding::from([4, 8]))
                .size(13)
                .width(Length::Fixed(110.0)),
            Space::with_width(12),
            swatch,
        ]
        .align_y(iced::Alignment::Center);

        let hint: Element<'_, Message> = if hex_valid {
            Space::with_height(14).into()
        } else {
            text("Enter a color as #rrggbb").size(11).color(colors::ERROR).into()
        };

        let modal_content = column![
            text("Text Color").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            channels,
            Space::with_height(10),
            hex_row,
            hint,
            Space::with_height(12),
            row![
                Space::with_width(Length::Fill),
                dialog_button("Cancel", Some(Message::ColorCancel)),
                Space::with_width(8),
                dialog_button("OK", hex_valid.then_some(Message::ColorConfirm)),
            ],
        ]
        .padding(20)
        .width(Length::Fixed(380.0));

        dialog_frame(modal_content)
    }
}
