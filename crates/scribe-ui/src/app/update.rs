use iced::widget::text_editor;
use iced::{Task, keyboard};
use scribe_core::{Command, EditorEvent, KeyChord, Modifiers, Outcome};
use std::path::Path;

use super::content::{cursor_offset, place_cursor, resolve_selection, widget_text};
use super::{App, ColorDialog, FontDialog, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Run(command) => {
                self.active_menu = None;
                return self.run_command(command);
            }

            Message::ToggleMenu(menu) => {
                if self.active_menu == Some(menu) {
                    self.active_menu = None;
                } else {
                    self.active_menu = Some(menu);
                }
            }

            Message::CloseMenu => {
                self.active_menu = None;
            }

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }

            Message::EditorAction(action) => {
                self.active_menu = None;
                self.handle_editor_action(action);
            }

            // Font dialog
            Message::FontFamilyPicked(family) => {
                if let Some(dialog) = &mut self.font_dialog {
                    dialog.font.family = family;
                }
            }

            Message::FontSizeChanged(size) => {
                if let Some(dialog) = &mut self.font_dialog {
                    dialog.font.size = size;
                }
            }

            Message::FontBoldToggled(bold) => {
                if let Some(dialog) = &mut self.font_dialog {
                    dialog.font.bold = bold;
                }
            }

            Message::FontItalicToggled(italic) => {
                if let Some(dialog) = &mut self.font_dialog {
                    dialog.font.italic = italic;
                }
            }

            Message::FontConfirm => {
                if let Some(dialog) = self.font_dialog.take() {
                    self.host.font_answer = Some(dialog.font);
                    return self.dispatch(Command::ChooseFont);
                }
            }

            Message::FontCancel => {
                if self.font_dialog.take().is_some() {
                    return self.dispatch(Command::ChooseFont);
                }
            }

            // Color dialog
            Message::ColorChannelChanged(channel, value) => {
                if let Some(dialog) = &mut self.color_dialog {
                    dialog.set_channel(channel, value);
                }
            }

            Message::ColorHexChanged(input) => {
                if let Some(dialog) = &mut self.color_dialog {
                    dialog.set_hex(input);
                }
            }

            Message::ColorConfirm => {
                if let Some(dialog) = self.color_dialog.take_if(|dialog| dialog.hex_is_valid()) {
                    self.host.color_answer = Some(dialog.color);
                    return self.dispatch(Command::ChooseColor);
                }
            }

            Message::ColorCancel => {
                if self.color_dialog.take().is_some() {
                    return self.dispatch(Command::ChooseColor);
                }
            }
        }
        Task::none()
    }

    /// Opens the in-window picker for Font and Color; everything else goes
    /// straight to the editor.
    fn run_command(&mut self, command: Command) -> Task<Message> {
        match command {
            Command::ChooseFont => {
                let font = self.editor.document().formatting().font;
                self.font_dialog = Some(FontDialog { font });
                Task::none()
            }
            Command::ChooseColor => {
                let color = self.editor.document().formatting().foreground;
                self.color_dialog = Some(ColorDialog::new(color));
                Task::none()
            }
            _ => self.dispatch(command),
        }
    }

    fn dispatch(&mut self, command: Command) -> Task<Message> {
        let revision = self.editor.document().revision();

        let task = match self.editor.dispatch(command, &mut self.host) {
            Ok(Outcome::Quit) => iced::exit(),
            Ok(Outcome::Cancelled) => {
                self.status_message = format!("{} cancelled", command.display_name());
                Task::none()
            }
            Ok(Outcome::Unchanged) => {
                self.status_message = format!("{}: nothing to do", command.display_name());
                Task::none()
            }
            Ok(Outcome::Applied) => Task::none(),
            Err(err) => {
                tracing::error!("{} failed: {}", command.display_name(), err);
                self.status_message = format!("{} failed: {}", command.display_name(), err);
                self.host.show_error("Error", &err.to_string());
                Task::none()
            }
        };

        if self.editor.document().revision() != revision {
            self.reload_content();
        }

        self.drain_events();
        task
    }

    /// Rebuilds the widget contents after the editor changed the text.
    fn reload_content(&mut self) {
        let document = self.editor.document();
        self.content = text_editor::Content::with_text(&document.text());
        place_cursor(&mut self.content, document.cursor_position());
        self.selection_anchor = None;
    }

    fn drain_events(&mut self) {
        for event in self.events.drain() {
            if let Some(message) = status_for(&event) {
                self.status_message = message;
            }
        }
    }

    fn handle_editor_action(&mut self, action: text_editor::Action) {
        let is_edit = action.is_edit();
        let cursor_before = self.editor.document().cursor();
        self.content.perform(action);

        let document = self.editor.document_mut();
        if is_edit {
            let text = widget_text(&self.content, &document.text());
            if let Err(err) = document.apply_host_text(&text) {
                tracing::error!("Failed to apply edit: {}", err);
            }
        }

        let cursor = cursor_offset(&self.content, document.buffer());
        document.set_cursor(cursor);

        // The anchor is where the cursor stood when the selection appeared.
        let selection = match self.content.selection() {
            Some(selected) => {
                let anchor = *self.selection_anchor.get_or_insert(cursor_before);
                let selection =
                    resolve_selection(document.buffer(), Some(anchor), cursor, &selected);
                if let Some(selection) = selection {
                    let anchor = if selection.start == cursor {
                        selection.end
                    } else {
                        selection.start
                    };
                    self.selection_anchor = Some(anchor);
                }
                selection
            }
            None => {
                self.selection_anchor = None;
                None
            }
        };
        document.set_selection(selection);
    }

    pub fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        if self.font_dialog.is_some() || self.color_dialog.is_some() {
            return Task::none();
        }

        let Some(chord) = key_chord(&key, modifiers) else {
            return Task::none();
        };

        match self.editor.keymap().resolve(&chord) {
            Some(command) => self.update(Message::Run(command)),
            None => Task::none(),
        }
    }
}

/// Converts an iced key press into a chord the keymap understands.
fn key_chord(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyChord> {
    if !modifiers.command() && !modifiers.alt() {
        return None;
    }

    let c = match key {
        keyboard::Key::Character(c) => c.chars().next()?,
        _ => return None,
    };

    Some(KeyChord::new(
        c,
        Modifiers {
            ctrl: modifiers.command(),
            alt: modifiers.alt(),
            shift: modifiers.shift(),
        },
    ))
}

/// Status bar text for an editor event.
fn status_for(event: &EditorEvent) -> Option<String> {
    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    let message = match event {
        EditorEvent::DocumentCleared => "New document".to_string(),
        EditorEvent::DocumentOpened(path) => format!("Opened: {}", file_name(path)),
        EditorEvent::DocumentSaved(path) => format!("Saved: {}", file_name(path)),
        EditorEvent::TextInserted { len, .. } => format!("Inserted {} characters", len),
        EditorEvent::TextEdited => return None,
        EditorEvent::FormattingChanged => "Formatting updated".to_string(),
        EditorEvent::TagToggled { applied: true, .. } => "Underline on".to_string(),
        EditorEvent::TagToggled { applied: false, .. } => "Underline off".to_string(),
        EditorEvent::QrGenerated { payload_len } => {
            format!("QR code generated ({} bytes)", payload_len)
        }
        EditorEvent::QrScanned { found: true } => "QR code decoded".to_string(),
        EditorEvent::QrScanned { found: false } => "No QR code found".to_string(),
        EditorEvent::PrintRequested => "Print requested".to_string(),
        EditorEvent::Quit => return None,
    };
    Some(message)
}
