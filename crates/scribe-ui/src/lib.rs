//! # Scribe UI
//!
//! Desktop window for the Scribe editor, built with iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: [`App`] owns the core [`scribe_core::Editor`] and the widget state
//! - **Message**: clicks, shortcuts and widget actions
//! - **Update**: turns messages into editor commands
//! - **View**: menu bar, toolbar, text area and status bar
//!
//! ## Learning: Keeping two text models in step
//!
//! iced's text editor owns its own copy of the text. Typing is applied to the
//! widget first and then diffed into the document; commands that change the
//! document (Open, Paste, Undo) rebuild the widget from it. The document
//! stays the source of truth for saving, tags and undo.

pub mod app;
pub mod highlighter;
pub mod theme;

pub use app::{App, Flags, run};
