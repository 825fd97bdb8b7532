//! The editor controller.
//!
//! ## Learning: One Dispatch Function
//!
//! `Editor::dispatch` is the only way commands run. It matches on the
//! [`Command`] and calls one handler, which runs to completion before the
//! next event is processed. Handlers borrow the document mutably and the
//! host mutably, so nothing else can observe a half-applied command.

use std::path::PathBuf;
use tokio::sync::broadcast;

use scribe_qr::QrSettings;

use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::document::DocumentState;
use crate::event::{EditorEvent, EventBus};
use crate::format::ColorScheme;
use crate::host::{FileFilter, Host};
use crate::keymap::Keymap;
use crate::{CoreResult, UNDERLINE};

/// Owns the document and turns commands into changes.
pub struct Editor {
    /// The open document
    document: DocumentState,

    /// Keyboard shortcuts
    keymap: Keymap,

    /// Event bus for notifications
    event_bus: EventBus,

    /// Whether the editor should quit
    should_quit: bool,
}

impl Editor {
    /// Creates an editor with default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an editor whose document starts with the configured
    /// formatting.
    pub fn with_config(config: &Config) -> Self {
        Self {
            document: DocumentState::new(config.initial_formatting()),
            keymap: Keymap::new(),
            event_bus: EventBus::new(),
            should_quit: false,
        }
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    /// Mutable access for the host to report cursor, selection and typing.
    pub fn document_mut(&mut self) -> &mut DocumentState {
        &mut self.document
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    /// Returns true if `command` can currently do anything.
    ///
    /// Only Undo and Redo depend on state; every other command is always
    /// available.
    pub fn is_enabled(&self, command: Command) -> bool {
        let buffer = self.document.buffer();
        match command {
            Command::Undo => buffer.can_undo(),
            Command::Redo => buffer.can_redo(),
            _ => true,
        }
    }

    /// Returns true once Exit has run.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }

    /// Runs one command against the document.
    ///
    /// A dismissed dialog is `Ok(Outcome::Cancelled)`. Failures (unreadable
    /// files, no selection for Underline, text too long for a QR code) are
    /// returned as errors and leave the document as it was.
    pub fn dispatch<H: Host + ?Sized>(
        &mut self,
        command: Command,
        host: &mut H,
    ) -> CoreResult<Outcome> {
        tracing::debug!("Dispatching {:?}", command);

        let outcome = match command {
            Command::New => self.new_document(),
            Command::Open => self.open(host)?,
            Command::Save | Command::SaveAs => self.save(host)?,
            Command::Print => self.print(host),
            Command::Exit => self.exit(),
            Command::Undo => self.undo()?,
            Command::Redo => self.redo()?,
            Command::Copy => self.copy(host),
            Command::Paste => self.paste(host)?,
            Command::ChooseFont => self.choose_font(host),
            Command::ChooseColor => self.choose_color(host),
            Command::Underline => self.underline()?,
            Command::DarkMode => self.set_scheme(ColorScheme::Dark),
            Command::LightMode => self.set_scheme(ColorScheme::Light),
            Command::GenerateQr => self.generate_qr(host)?,
            Command::ScanQr => self.scan_qr(host)?,
        };

        tracing::debug!("{:?} -> {:?}", command, outcome);
        Ok(outcome)
    }

    // ==================== File ====================

    fn new_document(&mut self) -> Outcome {
        self.document.clear();
        self.emit(EditorEvent::DocumentCleared);
        Outcome::Applied
    }

    fn open<H: Host + ?Sized>(&mut self, host: &mut H) -> CoreResult<Outcome> {
        let Some(path) = host.pick_open(&FileFilter::TEXT) else {
            return Ok(Outcome::Cancelled);
        };

        self.document.load_file(&path)?;
        tracing::info!("Opened {}", path.display());
        self.emit(EditorEvent::DocumentOpened(path));
        Ok(Outcome::Applied)
    }

    /// Save and Save As: always asks for a path.
    fn save<H: Host + ?Sized>(&mut self, host: &mut H) -> CoreResult<Outcome> {
        let Some(path) = host.pick_save(&FileFilter::TEXT) else {
            return Ok(Outcome::Cancelled);
        };
        let path = with_default_extension(path, &FileFilter::TEXT);

        self.document.write_file(&path)?;
        tracing::info!("Saved {}", path.display());
        self.emit(EditorEvent::DocumentSaved(path));
        Ok(Outcome::Applied)
    }

    fn print<H: Host + ?Sized>(&mut self, host: &mut H) -> Outcome {
        host.notify("Print", "Printing the document...");
        self.emit(EditorEvent::PrintRequested);
        Outcome::Applied
    }

    fn exit(&mut self) -> Outcome {
        tracing::info!("Exit requested");
        self.should_quit = true;
        self.emit(EditorEvent::Quit);
        Outcome::Quit
    }

    // ==================== Edit ====================

    fn undo(&mut self) -> CoreResult<Outcome> {
        if self.document.undo()? {
            self.emit(EditorEvent::TextEdited);
            Ok(Outcome::Applied)
        } else {
            Ok(Outcome::Unchanged)
        }
    }

    fn redo(&mut self) -> CoreResult<Outcome> {
        if self.document.redo()? {
            self.emit(EditorEvent::TextEdited);
            Ok(Outcome::Applied)
        } else {
            Ok(Outcome::Unchanged)
        }
    }

    fn copy<H: Host + ?Sized>(&mut self, host: &mut H) -> Outcome {
        match self.document.selected_text() {
            Some(text) => {
                host.set_text(&text);
                Outcome::Applied
            }
            None => Outcome::Unchanged,
        }
    }

    fn paste<H: Host + ?Sized>(&mut self, host: &mut H) -> CoreResult<Outcome> {
        match host.get_text().filter(|text| !text.is_empty()) {
            Some(text) => {
                self.insert_text(&text)?;
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        let offset = self.document.cursor();
        let len = self.document.insert_at_cursor(text)?;
        self.emit(EditorEvent::TextInserted { offset, len });
        Ok(())
    }

    // ==================== Format ====================

    fn choose_font<H: Host + ?Sized>(&mut self, host: &mut H) -> Outcome {
        let current = self.document.formatting().font;
        let Some(font) = host.pick_font(&current) else {
            return Outcome::Cancelled;
        };

        tracing::info!("Font set to {}", font);
        self.document.formatting_mut().font = font;
        self.emit(EditorEvent::FormattingChanged);
        Outcome::Applied
    }

    fn choose_color<H: Host + ?Sized>(&mut self, host: &mut H) -> Outcome {
        let current = self.document.formatting().foreground;
        let Some(color) = host.pick_color(current) else {
            return Outcome::Cancelled;
        };

        tracing::info!("Foreground set to {}", color);
        self.document.formatting_mut().foreground = color;
        self.emit(EditorEvent::FormattingChanged);
        Outcome::Applied
    }

    fn underline(&mut self) -> CoreResult<Outcome> {
        let applied = self.document.toggle_tag(UNDERLINE)?;
        self.emit(EditorEvent::TagToggled {
            tag: UNDERLINE.to_string(),
            applied,
        });
        Ok(Outcome::Applied)
    }

    fn set_scheme(&mut self, scheme: ColorScheme) -> Outcome {
        self.document.formatting_mut().apply_scheme(scheme);
        self.emit(EditorEvent::FormattingChanged);
        Outcome::Applied
    }

    // ==================== Tools ====================

    fn generate_qr<H: Host + ?Sized>(&mut self, host: &mut H) -> CoreResult<Outcome> {
        let text = self.document.text().into_owned();
        let raster = scribe_qr::encode(&text, &QrSettings::STANDARD)?;

        host.show_image(&raster)?;
        tracing::info!("Generated QR code for {} bytes of text", text.len());
        self.emit(EditorEvent::QrGenerated {
            payload_len: text.len(),
        });
        Ok(Outcome::Applied)
    }

    fn scan_qr<H: Host + ?Sized>(&mut self, host: &mut H) -> CoreResult<Outcome> {
        let Some(path) = host.pick_open(&FileFilter::IMAGES) else {
            return Ok(Outcome::Cancelled);
        };

        let decoded = scribe_qr::decode_file(&path)?;
        self.emit(EditorEvent::QrScanned {
            found: decoded.is_some(),
        });

        match decoded {
            Some(text) => {
                tracing::info!("Decoded QR code from {}", path.display());
                self.insert_text(&text)?;
                Ok(Outcome::Applied)
            }
            None => {
                tracing::info!("No QR code found in {}", path.display());
                Ok(Outcome::Unchanged)
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends the filter's first extension when `path` has none.
fn with_default_extension(path: PathBuf, filter: &FileFilter) -> PathBuf {
    match filter.default_extension() {
        Some(ext) if path.extension().is_none() => path.with_extension(ext),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use crate::event::EventHandler;
    use crate::format::{FontFamily, FontSpec, Rgb};
    use crate::host::{Clipboard, FileDialogs, ImageViewer, Notifier, Pickers};
    use scribe_buffer::Selection;
    use scribe_qr::{QrError, QrRaster};
    use std::collections::VecDeque;
    use std::path::Path;

    /// A host that answers from queued responses and records what it was
    /// asked to do.
    #[derive(Default)]
    struct ScriptedHost {
        open_paths: VecDeque<Option<PathBuf>>,
        save_paths: VecDeque<Option<PathBuf>>,
        fonts: VecDeque<Option<FontSpec>>,
        colors: VecDeque<Option<Rgb>>,
        clipboard: Option<String>,
        notifications: Vec<(String, String)>,
        shown: Vec<QrRaster>,
        filters: Vec<FileFilter>,
    }

    impl FileDialogs for ScriptedHost {
        fn pick_open(&mut self, filter: &FileFilter) -> Option<PathBuf> {
            self.filters.push(*filter);
            self.open_paths.pop_front().flatten()
        }

        fn pick_save(&mut self, filter: &FileFilter) -> Option<PathBuf> {
            self.filters.push(*filter);
            self.save_paths.pop_front().flatten()
        }
    }

    impl Pickers for ScriptedHost {
        fn pick_font(&mut self, _current: &FontSpec) -> Option<FontSpec> {
            self.fonts.pop_front().flatten()
        }

        fn pick_color(&mut self, _current: Rgb) -> Option<Rgb> {
            self.colors.pop_front().flatten()
        }
    }

    impl Clipboard for ScriptedHost {
        fn get_text(&mut self) -> Option<String> {
            self.clipboard.clone()
        }

        fn set_text(&mut self, text: &str) {
            self.clipboard = Some(text.to_string());
        }
    }

    impl Notifier for ScriptedHost {
        fn notify(&mut self, title: &str, message: &str) {
            self.notifications
                .push((title.to_string(), message.to_string()));
        }
    }

    impl ImageViewer for ScriptedHost {
        fn show_image(&mut self, raster: &QrRaster) -> CoreResult<()> {
            self.shown.push(raster.clone());
            Ok(())
        }
    }

    fn editor_with(text: &str) -> Editor {
        let mut editor = Editor::new();
        editor.document_mut().load(text);
        editor
    }

    fn select(editor: &mut Editor, start: usize, end: usize) {
        editor
            .document_mut()
            .set_selection(Some(Selection::new(start, end)));
    }

    #[test]
    fn test_undo_redo_enabled_follow_history() {
        let mut editor = Editor::new();
        let mut host = ScriptedHost::default();
        assert!(!editor.is_enabled(Command::Undo));
        assert!(!editor.is_enabled(Command::Redo));
        assert!(editor.is_enabled(Command::Save));

        editor.document_mut().insert_at_cursor("abc").unwrap();
        assert!(editor.is_enabled(Command::Undo));
        assert!(!editor.is_enabled(Command::Redo));

        editor.dispatch(Command::Undo, &mut host).unwrap();
        assert!(!editor.is_enabled(Command::Undo));
        assert!(editor.is_enabled(Command::Redo));
    }

    #[test]
    fn test_new_clears_document() {
        let mut editor = editor_with("some text");
        let mut host = ScriptedHost::default();

        let outcome = editor.dispatch(Command::New, &mut host).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(editor.document().text(), "");
    }

    #[test]
    fn test_new_then_open_loads_file_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let content = "line one\r\nline two\n\ttabbed ünïcode\n";
        std::fs::write(&path, content).unwrap();

        let mut editor = editor_with("old");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(Some(path));

        editor.dispatch(Command::New, &mut host).unwrap();
        let outcome = editor.dispatch(Command::Open, &mut host).unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(editor.document().text(), content);
        assert_eq!(host.filters, vec![FileFilter::TEXT]);
    }

    #[test]
    fn test_cancelled_open_is_noop() {
        let mut editor = editor_with("keep me");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(None);

        let outcome = editor.dispatch(Command::Open, &mut host).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(editor.document().text(), "keep me");
    }

    #[test]
    fn test_open_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("keep me");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(Some(dir.path().join("absent.txt")));

        let result = editor.dispatch(Command::Open, &mut host);
        assert!(matches!(result, Err(CoreError::Buffer(_))));
        assert_eq!(editor.document().text(), "keep me");
    }

    #[test]
    fn test_save_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let content = "first\nsecond\r\nthird";

        let mut editor = editor_with(content);
        let mut host = ScriptedHost::default();
        host.save_paths.push_back(Some(path.clone()));

        assert_eq!(
            editor.dispatch(Command::Save, &mut host).unwrap(),
            Outcome::Applied
        );
        assert_eq!(std::fs::read(&path).unwrap(), content.as_bytes());
    }

    #[test]
    fn test_save_and_save_as_write_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let save_path = dir.path().join("save.txt");
        let save_as_path = dir.path().join("save_as.txt");

        let mut editor = editor_with("same content\n");
        let mut host = ScriptedHost::default();
        host.save_paths.push_back(Some(save_path.clone()));
        host.save_paths.push_back(Some(save_as_path.clone()));

        editor.dispatch(Command::Save, &mut host).unwrap();
        editor.dispatch(Command::SaveAs, &mut host).unwrap();

        assert_eq!(
            std::fs::read(save_path).unwrap(),
            std::fs::read(save_as_path).unwrap()
        );
        assert_eq!(host.filters, vec![FileFilter::TEXT, FileFilter::TEXT]);
    }

    #[test]
    fn test_save_appends_txt_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("x");
        let mut host = ScriptedHost::default();
        host.save_paths.push_back(Some(dir.path().join("untitled")));

        editor.dispatch(Command::Save, &mut host).unwrap();
        assert!(dir.path().join("untitled.txt").exists());
        assert!(!dir.path().join("untitled").exists());
    }

    #[test]
    fn test_cancelled_save_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("x");
        let mut host = ScriptedHost::default();
        host.save_paths.push_back(None);

        assert_eq!(
            editor.dispatch(Command::SaveAs, &mut host).unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_print_only_notifies() {
        let mut editor = editor_with("text");
        let mut host = ScriptedHost::default();

        editor.dispatch(Command::Print, &mut host).unwrap();
        assert_eq!(
            host.notifications,
            vec![("Print".to_string(), "Printing the document...".to_string())]
        );
        assert_eq!(editor.document().text(), "text");
    }

    #[test]
    fn test_exit() {
        let mut editor = Editor::new();
        let mut host = ScriptedHost::default();

        assert!(!editor.should_quit());
        assert_eq!(
            editor.dispatch(Command::Exit, &mut host).unwrap(),
            Outcome::Quit
        );
        assert!(editor.should_quit());
    }

    #[test]
    fn test_copy_selection_and_paste_at_cursor() {
        let mut editor = editor_with("hello world");
        let mut host = ScriptedHost::default();

        select(&mut editor, 0, 5);
        editor.dispatch(Command::Copy, &mut host).unwrap();
        assert_eq!(host.clipboard.as_deref(), Some("hello"));

        editor.document_mut().set_cursor(11);
        editor.dispatch(Command::Paste, &mut host).unwrap();
        assert_eq!(editor.document().text(), "hello worldhello");
    }

    #[test]
    fn test_copy_without_selection_leaves_clipboard() {
        let mut editor = editor_with("hello");
        let mut host = ScriptedHost {
            clipboard: Some("before".to_string()),
            ..Default::default()
        };

        assert_eq!(
            editor.dispatch(Command::Copy, &mut host).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(host.clipboard.as_deref(), Some("before"));
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut editor = editor_with("hello");
        let mut host = ScriptedHost::default();

        assert_eq!(
            editor.dispatch(Command::Paste, &mut host).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(editor.document().text(), "hello");
    }

    #[test]
    fn test_undo_after_paste_restores_text() {
        let mut editor = editor_with("abc");
        let mut host = ScriptedHost {
            clipboard: Some("XYZ".to_string()),
            ..Default::default()
        };

        editor.document_mut().set_cursor(1);
        editor.dispatch(Command::Paste, &mut host).unwrap();
        assert_eq!(editor.document().text(), "aXYZbc");

        assert_eq!(
            editor.dispatch(Command::Undo, &mut host).unwrap(),
            Outcome::Applied
        );
        assert_eq!(editor.document().text(), "abc");

        editor.dispatch(Command::Redo, &mut host).unwrap();
        assert_eq!(editor.document().text(), "aXYZbc");
    }

    #[test]
    fn test_undo_with_nothing_to_undo() {
        let mut editor = editor_with("abc");
        let mut host = ScriptedHost::default();
        assert_eq!(
            editor.dispatch(Command::Undo, &mut host).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn test_choose_font_applies_to_document() {
        let font = FontSpec {
            family: FontFamily::Serif,
            size: 20,
            bold: true,
            italic: false,
        };
        let mut editor = Editor::new();
        let mut host = ScriptedHost::default();
        host.fonts.push_back(Some(font));
        host.fonts.push_back(None);

        editor.dispatch(Command::ChooseFont, &mut host).unwrap();
        assert_eq!(editor.document().formatting().font, font);

        assert_eq!(
            editor.dispatch(Command::ChooseFont, &mut host).unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(editor.document().formatting().font, font);
    }

    #[test]
    fn test_choose_color_sets_foreground_only() {
        let red = Rgb::new(255, 0, 0);
        let mut editor = Editor::new();
        let mut host = ScriptedHost::default();
        host.colors.push_back(Some(red));
        host.colors.push_back(None);

        editor.dispatch(Command::ChooseColor, &mut host).unwrap();
        assert_eq!(editor.document().formatting().foreground, red);
        assert_eq!(editor.document().formatting().background, Rgb::WHITE);

        assert_eq!(
            editor.dispatch(Command::ChooseColor, &mut host).unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(editor.document().formatting().foreground, red);
    }

    #[test]
    fn test_underline_twice_returns_to_untagged() {
        let mut editor = editor_with("hello world");
        let mut host = ScriptedHost::default();
        select(&mut editor, 0, 5);

        editor.dispatch(Command::Underline, &mut host).unwrap();
        assert_eq!(editor.document().tags().ranges(UNDERLINE), &[0..5]);

        editor.dispatch(Command::Underline, &mut host).unwrap();
        assert!(editor.document().tags().is_empty());
    }

    #[test]
    fn test_underline_without_selection_fails() {
        let mut editor = editor_with("hello");
        let mut host = ScriptedHost::default();

        let result = editor.dispatch(Command::Underline, &mut host);
        assert!(matches!(result, Err(CoreError::NoSelection)));
    }

    #[test]
    fn test_schemes_leave_no_residue() {
        let mut editor = Editor::new();
        let mut host = ScriptedHost::default();
        host.colors.push_back(Some(Rgb::new(12, 200, 40)));
        editor.dispatch(Command::ChooseColor, &mut host).unwrap();

        editor.dispatch(Command::DarkMode, &mut host).unwrap();
        let formatting = editor.document().formatting();
        assert_eq!(
            (formatting.foreground, formatting.background),
            (Rgb::WHITE, Rgb::BLACK)
        );

        editor.dispatch(Command::LightMode, &mut host).unwrap();
        let formatting = editor.document().formatting();
        assert_eq!(
            (formatting.foreground, formatting.background),
            (Rgb::BLACK, Rgb::WHITE)
        );

        editor.dispatch(Command::DarkMode, &mut host).unwrap();
        let formatting = editor.document().formatting();
        assert_eq!(
            (formatting.foreground, formatting.background),
            (Rgb::WHITE, Rgb::BLACK)
        );
    }

    #[test]
    fn test_generate_qr_round_trips() {
        let mut editor = editor_with("hello");
        let mut host = ScriptedHost::default();

        editor.dispatch(Command::GenerateQr, &mut host).unwrap();
        assert_eq!(host.shown.len(), 1);
        assert_eq!(
            scribe_qr::decode_image(host.shown[0].image()).as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_generate_qr_too_long_fails() {
        let mut editor = editor_with(&"a".repeat(100));
        let mut host = ScriptedHost::default();

        let result = editor.dispatch(Command::GenerateQr, &mut host);
        assert!(matches!(
            result,
            Err(CoreError::Qr(QrError::PayloadTooLarge { .. }))
        ));
        assert!(host.shown.is_empty());
    }

    fn write_qr(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("code.png");
        scribe_qr::encode(text, &QrSettings::STANDARD)
            .unwrap()
            .save_png(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_scan_qr_inserts_at_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_qr(dir.path(), "QR");

        let mut editor = editor_with("[]");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(Some(path));
        editor.document_mut().set_cursor(1);

        assert_eq!(
            editor.dispatch(Command::ScanQr, &mut host).unwrap(),
            Outcome::Applied
        );
        assert_eq!(editor.document().text(), "[QR]");
        assert_eq!(host.filters, vec![FileFilter::IMAGES]);
    }

    #[test]
    fn test_generate_then_scan_restores_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.png");

        let mut editor = editor_with("hello");
        let mut host = ScriptedHost::default();
        editor.dispatch(Command::GenerateQr, &mut host).unwrap();
        host.shown[0].save_png(&path).unwrap();

        editor.dispatch(Command::New, &mut host).unwrap();
        host.open_paths.push_back(Some(path));
        editor.dispatch(Command::ScanQr, &mut host).unwrap();
        assert_eq!(editor.document().text(), "hello");
    }

    #[test]
    fn test_scan_image_without_qr_leaves_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        image::GrayImage::from_pixel(120, 120, image::Luma([255]))
            .save(&path)
            .unwrap();

        let mut editor = editor_with("unchanged");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(Some(path));

        assert_eq!(
            editor.dispatch(Command::ScanQr, &mut host).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(editor.document().text(), "unchanged");
    }

    #[test]
    fn test_scan_unreadable_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let mut editor = editor_with("unchanged");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(Some(path));

        let result = editor.dispatch(Command::ScanQr, &mut host);
        assert!(matches!(result, Err(CoreError::Qr(_))));
        assert_eq!(editor.document().text(), "unchanged");
    }

    #[test]
    fn test_cancelled_scan_is_noop() {
        let mut editor = editor_with("unchanged");
        let mut host = ScriptedHost::default();
        host.open_paths.push_back(None);

        assert_eq!(
            editor.dispatch(Command::ScanQr, &mut host).unwrap(),
            Outcome::Cancelled
        );
    }

    #[test]
    fn test_with_default_extension() {
        let filter = FileFilter::TEXT;
        assert_eq!(
            with_default_extension(PathBuf::from("a/notes"), &filter),
            PathBuf::from("a/notes.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("a/notes.md"), &filter),
            PathBuf::from("a/notes.md")
        );
    }

    #[test]
    fn test_dark_config_starts_dark() {
        let mut config = Config::default();
        config.editor.scheme = ColorScheme::Dark;
        let editor = Editor::with_config(&config);
        assert_eq!(editor.document().formatting().background, Rgb::BLACK);
    }

    #[tokio::test]
    async fn test_commands_emit_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.txt");

        let mut editor = editor_with("hi");
        let mut events = EventHandler::new(editor.subscribe());
        let mut host = ScriptedHost {
            clipboard: Some("!".to_string()),
            ..Default::default()
        };
        host.save_paths.push_back(Some(path.clone()));

        editor.dispatch(Command::Save, &mut host).unwrap();
        editor.dispatch(Command::Paste, &mut host).unwrap();
        select(&mut editor, 0, 1);
        editor.dispatch(Command::Underline, &mut host).unwrap();
        editor.dispatch(Command::DarkMode, &mut host).unwrap();
        editor.dispatch(Command::Print, &mut host).unwrap();
        editor.dispatch(Command::Exit, &mut host).unwrap();

        let expected = [
            EditorEvent::DocumentSaved(path),
            EditorEvent::TextInserted { offset: 2, len: 1 },
            EditorEvent::TagToggled {
                tag: UNDERLINE.to_string(),
                applied: true,
            },
            EditorEvent::FormattingChanged,
            EditorEvent::PrintRequested,
            EditorEvent::Quit,
        ];
        for event in expected {
            assert_eq!(events.next().await, Some(event));
        }
    }
}
