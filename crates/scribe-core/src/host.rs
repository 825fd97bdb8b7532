//! Collaborators the editor calls out to.
//!
//! The widget toolkit side implements these; tests implement them with
//! scripted answers. Every dialog-like call returns `Option`, and `None`
//! means the user dismissed it.

use scribe_qr::QrRaster;
use std::path::PathBuf;

use crate::CoreResult;
use crate::format::{FontSpec, Rgb};

/// A named set of file extensions for a file dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    /// Extensions without the leading dot
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    /// Plain text documents.
    pub const TEXT: FileFilter = FileFilter {
        name: "Text Files",
        extensions: &["txt"],
    };

    /// Images that may hold a QR code.
    pub const IMAGES: FileFilter = FileFilter {
        name: "Image Files",
        extensions: &["png", "jpg", "jpeg"],
    };

    /// Extension appended to saved files that have none.
    pub fn default_extension(&self) -> Option<&'static str> {
        self.extensions.first().copied()
    }
}

/// Native open/save dialogs.
pub trait FileDialogs {
    /// Asks for an existing file to read.
    fn pick_open(&mut self, filter: &FileFilter) -> Option<PathBuf>;

    /// Asks for a file to write.
    fn pick_save(&mut self, filter: &FileFilter) -> Option<PathBuf>;
}

/// Font and color pickers.
pub trait Pickers {
    /// Asks for a font, starting from `current`.
    fn pick_font(&mut self, current: &FontSpec) -> Option<FontSpec>;

    /// Asks for a color, starting from `current`.
    fn pick_color(&mut self, current: Rgb) -> Option<Rgb>;
}

/// The system clipboard.
pub trait Clipboard {
    /// Current clipboard text; `None` if empty or not text.
    fn get_text(&mut self) -> Option<String>;

    fn set_text(&mut self, text: &str);
}

/// Informational message boxes.
pub trait Notifier {
    fn notify(&mut self, title: &str, message: &str);
}

/// Shows a rendered QR code to the user.
pub trait ImageViewer {
    fn show_image(&mut self, raster: &QrRaster) -> CoreResult<()>;
}

/// Everything [`Editor::dispatch`](crate::Editor::dispatch) needs from the
/// outside world.
pub trait Host: FileDialogs + Pickers + Clipboard + Notifier + ImageViewer {}

impl<T> Host for T where T: FileDialogs + Pickers + Clipboard + Notifier + ImageViewer {}
