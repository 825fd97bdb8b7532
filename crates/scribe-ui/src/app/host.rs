//! Desktop implementations of the editor's collaborators.

use scribe_core::{
    Clipboard, CoreError, CoreResult, FileDialogs, FileFilter, FontSpec, ImageViewer, Notifier,
    Pickers, Rgb,
};
use scribe_qr::QrRaster;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempPath;

/// QR images kept on disk at once; older ones are deleted as new ones open.
const MAX_SHOWN_IMAGES: usize = 8;

/// Native dialogs, the system clipboard and the default image viewer.
///
/// Font and color are picked in in-window dialogs, which answer before the
/// command is dispatched: the UI stores the answer here and `pick_font` /
/// `pick_color` hand it over. No stored answer means the dialog was
/// cancelled.
#[derive(Default)]
pub struct DesktopHost {
    pub font_answer: Option<FontSpec>,
    pub color_answer: Option<Rgb>,
    /// Rendered QR codes; removed from disk when the host is dropped
    shown_images: Vec<TempPath>,
}

impl DesktopHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows an error message box.
    pub fn show_error(&self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

fn file_dialog(filter: &FileFilter) -> rfd::FileDialog {
    rfd::FileDialog::new().add_filter(filter.name, filter.extensions)
}

impl FileDialogs for DesktopHost {
    fn pick_open(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        file_dialog(filter).pick_file()
    }

    fn pick_save(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        let mut dialog = file_dialog(filter);
        if let Some(ext) = filter.default_extension() {
            dialog = dialog.set_file_name(format!("untitled.{}", ext));
        }
        dialog.save_file()
    }
}

impl Pickers for DesktopHost {
    fn pick_font(&mut self, _current: &FontSpec) -> Option<FontSpec> {
        self.font_answer.take()
    }

    fn pick_color(&mut self, _current: Rgb) -> Option<Rgb> {
        self.color_answer.take()
    }
}

impl Clipboard for DesktopHost {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!("Clipboard has no text: {}", err);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        let result =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        if let Err(err) = result {
            tracing::warn!("Failed to copy to clipboard: {}", err);
        }
    }
}

impl Notifier for DesktopHost {
    fn notify(&mut self, title: &str, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

impl ImageViewer for DesktopHost {
    fn show_image(&mut self, raster: &QrRaster) -> CoreResult<()> {
        let mut file = tempfile::Builder::new()
            .prefix("scribe-qr-")
            .suffix(".png")
            .tempfile()?;
        file.write_all(&raster.to_png_bytes()?)?;
        file.flush()?;

        let path = file.into_temp_path();
        tracing::debug!("Opening QR code image {}", path.display());
        opener::open(&*path).map_err(|err| CoreError::Viewer(err.to_string()))?;

        keep_image(&mut self.shown_images, path);
        Ok(())
    }
}

/// Holds on to `path`, dropping (and so deleting) the oldest images past
/// the cap.
fn keep_image(images: &mut Vec<TempPath>, path: TempPath) {
    images.push(path);
    if images.len() > MAX_SHOWN_IMAGES {
        let excess = images.len() - MAX_SHOWN_IMAGES;
        images.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_image() -> TempPath {
        tempfile::NamedTempFile::new().unwrap().into_temp_path()
    }

    #[test]
    fn test_keep_image_deletes_oldest_past_cap() {
        let mut images = Vec::new();
        let first = temp_image();
        let first_path = first.to_path_buf();
        keep_image(&mut images, first);

        for _ in 0..MAX_SHOWN_IMAGES - 1 {
            keep_image(&mut images, temp_image());
        }
        assert_eq!(images.len(), MAX_SHOWN_IMAGES);
        assert!(first_path.exists());

        keep_image(&mut images, temp_image());
        assert_eq!(images.len(), MAX_SHOWN_IMAGES);
        assert!(!first_path.exists());
        assert!(images.iter().all(|path| path.exists()));
    }
}
