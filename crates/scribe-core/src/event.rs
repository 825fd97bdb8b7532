//! Editor notifications.
//!
//! Handlers report what they did as [`EditorEvent`] values on a
//! `tokio::sync::broadcast` channel. The UI drains them after each command
//! to refresh its status bar; tests await them.
//!
//! ## Learning: Events as Values
//!
//! A broadcast channel hands every subscriber its own clone of each event,
//! so the controller never holds references to whoever is listening.

use std::path::PathBuf;
use tokio::sync::broadcast;

/// Something the editor did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    // Document events
    /// The document was emptied (New)
    DocumentCleared,
    /// A file was loaded into the document
    DocumentOpened(PathBuf),
    /// The document was written to a file
    DocumentSaved(PathBuf),
    /// Text was inserted by a command (Paste, Scan QR Code)
    TextInserted { offset: usize, len: usize },
    /// The text changed through undo or redo
    TextEdited,

    // Formatting events
    /// Font or colors changed
    FormattingChanged,
    /// A tag was added to or removed from the selection
    TagToggled { tag: String, applied: bool },

    // Tool events
    /// A QR code was rendered and shown
    QrGenerated { payload_len: usize },
    /// An image was scanned for a QR code
    QrScanned { found: bool },
    /// Print was requested
    PrintRequested,

    /// Editor is quitting
    Quit,
}

/// Event bus for broadcasting editor events.
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Events a slow receiver may fall behind before it starts losing them.
    pub const CAPACITY: usize = 256;

    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Receiving end of the event bus.
pub struct EventHandler {
    receiver: broadcast::Receiver<EditorEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<EditorEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event.
    pub async fn next(&mut self) -> Option<EditorEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Takes every event already queued, without waiting.
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                }
                Err(_) => return events,
            }
        }
    }
}
