//! # Scribe Core
//!
//! Editor logic, independent of any widget toolkit.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Editor                        │
//! │  ┌───────────────┐ ┌──────────┐ ┌─────────────────┐  │
//! │  │ DocumentState │ │  Keymap  │ │    EventBus     │  │
//! │  └───────────────┘ └──────────┘ └─────────────────┘  │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ dispatch(Command, &mut Host)
//!          ┌─────────────┬───┴─────────┬──────────────┐
//!     FileDialogs     Pickers      Clipboard    Notifier / ImageViewer
//! ```
//!
//! The UI turns clicks and shortcuts into [`Command`]s and hands them to
//! [`Editor::dispatch`] together with its [`Host`] implementation.

pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod event;
pub mod format;
pub mod host;
pub mod keymap;

pub use command::{Command, Menu, Outcome, TOOLBAR};
pub use config::{Config, ConfigError};
pub use document::DocumentState;
pub use editor::Editor;
pub use event::{EditorEvent, EventBus, EventHandler};
pub use format::{ColorScheme, FontFamily, FontSpec, Formatting, ParseColorError, Rgb};
pub use host::{Clipboard, FileDialogs, FileFilter, Host, ImageViewer, Notifier, Pickers};
pub use keymap::{KeyChord, Keymap, Modifiers};

/// The tag Format → Underline toggles.
pub const UNDERLINE: &str = "underline";

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] scribe_buffer::BufferError),

    #[error("QR error: {0}")]
    Qr(#[from] scribe_qr::QrError),

    #[error("No text selected")]
    NoSelection,

    #[error("Could not show image: {0}")]
    Viewer(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
