pub mod dialogs;
pub mod editor;
pub mod menus;

use iced::widget::{Space, column, container, mouse_area, stack};
use iced::{Background, Element, Length};

use crate::app::{App, Message};
use crate::theme::colors;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_menu_bar(),
            self.view_toolbar(),
            self.view_editor(),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(colors::BG_BAR)),
                ..Default::default()
            })
            .into();

        if self.font_dialog.is_some() {
            stack![
                main_view,
                Self::modal_backdrop(Message::FontCancel),
                self.view_font_dialog(),
            ]
            .into()
        } else if self.color_dialog.is_some() {
            stack![
                main_view,
                Self::modal_backdrop(Message::ColorCancel),
                self.view_color_dialog(),
            ]
            .into()
        } else if self.active_menu.is_some() {
            stack![
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                )
                .on_press(Message::CloseMenu),
                main_view,
                self.view_menu_dropdown(),
            ]
            .into()
        } else {
            main_view
        }
    }

    /// Dimmed layer behind a dialog; clicking it dismisses the dialog.
    fn modal_backdrop<'a>(on_press: Message) -> Element<'a, Message> {
        mouse_area(
            container(Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(Background::Color(colors::OVERLAY)),
                    ..Default::default()
                }),
        )
        .on_press(on_press)
        .into()
    }
}
