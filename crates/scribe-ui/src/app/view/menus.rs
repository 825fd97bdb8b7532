use iced::widget::{Column, Row, Space, button, column, container, horizontal_space, row, text};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};
use scribe_core::{Command, Menu, TOOLBAR};

use crate::app::{App, Message};
use crate::theme::colors;

const MENU_BAR_HEIGHT: f32 = 30.0;
const MENU_BUTTON_WIDTH: f32 = 64.0;

impl App {
    pub fn view_menu_bar(&self) -> Element<'_, Message> {
        let mut menu_items: Vec<Element<'_, Message>> = Vec::new();

        for menu in Menu::ALL {
            let is_active = self.active_menu == Some(menu);

            let menu_btn = button(text(menu.label()).size(13).color(colors::TEXT_PRIMARY))
                .width(Length::Fixed(MENU_BUTTON_WIDTH))
                .padding(Padding::from([6, 10]))
                .style(move |_: &Theme, status: button::Status| {
                    let bg = if is_active {
                        colors::BG_ACTIVE
                    } else {
                        match status {
                            button::Status::Hovered => colors::BG_HOVER,
                            _ => colors::BG_BAR,
                        }
                    };
                    button::Style {
                        background: Some(Background::Color(bg)),
                        text_color: colors::TEXT_PRIMARY,
                        border: Border {
                            radius: 3.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::ToggleMenu(menu));

            menu_items.push(menu_btn.into());
        }

        menu_items.push(horizontal_space().into());

        let bar = Row::with_children(menu_items)
            .height(Length::Fixed(MENU_BAR_HEIGHT))
            .padding(Padding::from([0, 4]))
            .align_y(iced::Alignment::Center);

        container(bar)
            .width(Length::Fill)
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

    /// The row of scheme buttons under the menu bar.
    pub fn view_toolbar(&self) -> Element<'_, Message> {
        let buttons: Vec<Element<'_, Message>> = TOOLBAR
            .iter()
            .map(|&command| {
                button(text(command.display_name()).size(12).color(colors::TEXT_PRIMARY))
                    .padding(Padding::from([4, 12]))
                    .style(|_: &Theme, status: button::Status| {
                        let bg = match status {
                            button::Status::Hovered => colors::BG_HOVER,
                            button::Status::Pressed => colors::BG_ACTIVE,
                            _ => colors::BG_BUTTON,
                        };
                        button::Style {
                            background: Some(Background::Color(bg)),
                            text_color: colors::TEXT_PRIMARY,
                            border: Border {
                                color: colors::BORDER,
                                width: 1.0,
                                radius: 3.0.into(),
                            },
                            ..Default::default()
                        }
                    })
                    .on_press(Message::Run(command))
                    .into()
            })
            .collect();

        container(Row::with_children(buttons).spacing(6))
            .width(Length::Fill)
            .padding(Padding::from([4, 8]))
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_BAR)),
                ..Default::default()
            })
            .into()
    }

    /// A dropdown entry with its label and shortcut; greyed out and inert
    /// when disabled.
    pub fn menu_item<'a>(
        command: Command,
        shortcut: Option<String>,
        enabled: bool,
    ) -> Element<'a, Message> {
        let text_color = if enabled {
            colors::TEXT_PRIMARY
        } else {
            colors::TEXT_MUTED
        };

        let btn = button(
            row![
                text(command.display_name()).size(13).color(text_color),
                horizontal_space(),
                text(shortcut.unwrap_or_default()).size(12).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([5, 14]))
        .style(|_: &Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: Border::default(),
                ..Default::default()
            }
        });

        if enabled {
            btn.on_press(Message::Run(command)).into()
        } else {
            btn.into()
        }
    }

    pub fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BORDER)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_menu_dropdown(&self) -> Element<'_, Message> {
        let Some(menu) = self.active_menu else {
            return Space::new(0, 0).into();
        };

        let keymap = self.editor.keymap();
        let mut items: Vec<Element<'_, Message>> = Vec::new();
        for &command in menu.commands() {
            if command.separated_before() {
                items.push(Self::menu_separator());
            }
            items.push(Self::menu_item(
                command,
                keymap.shortcut_label(command),
                self.editor.is_enabled(command),
            ));
        }

        let menu_content = Column::with_children(items)
            .width(Length::Fixed(220.0))
            .padding(4);

        let index = Menu::ALL.iter().position(|m| *m == menu).unwrap_or(0);
        let offset_x = 4.0 + index as f32 * MENU_BUTTON_WIDTH;

        let menu_box = container(menu_content).style(|_| container::Style {
            background: Some(Background::Color(colors::BG_MENU)),
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        });

        column![
            Space::with_height(Length::Fixed(MENU_BAR_HEIGHT)),
            row![Space::with_width(Length::Fixed(offset_x)), menu_box],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
