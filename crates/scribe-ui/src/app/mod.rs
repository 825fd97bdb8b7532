use iced::widget::text_editor;
use iced::{Subscription, Task, keyboard};
use scribe_core::config::WindowConfig;
use scribe_core::{Editor, EventHandler, Menu};

pub mod content;
pub mod host;
pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use host::DesktopHost;
pub use messages::*;
pub use types::*;

pub struct App {
    pub editor: Editor,
    pub host: DesktopHost,
    pub events: EventHandler,
    pub content: text_editor::Content,
    /// Fixed end of the widget's current selection, as a char offset
    pub selection_anchor: Option<usize>,
    pub window: WindowConfig,
    pub active_menu: Option<Menu>,
    pub font_dialog: Option<FontDialog>,
    pub color_dialog: Option<ColorDialog>,
    pub status_message: String,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let editor = Editor::with_config(&flags.config);
        let events = EventHandler::new(editor.subscribe());

        let app = Self {
            editor,
            host: DesktopHost::new(),
            events,
            content: text_editor::Content::new(),
            selection_anchor: None,
            window: flags.config.window,
            active_menu: None,
            font_dialog: None,
            color_dialog: None,
            status_message: "Ready".to_string(),
        };

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        let modified = if self.editor.document().is_modified() {
            " *"
        } else {
            ""
        };
        format!("{}{}", self.window.title, modified)
    }

    pub fn theme(&self) -> iced::Theme {
        iced::Theme::Light
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = iced::Size::new(
        flags.config.window.width as f32,
        flags.config.window.height as f32,
    );

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(size)
        .theme(App::theme)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
