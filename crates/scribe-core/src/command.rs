//! User commands.
//!
//! ## Learning: Commands as Values
//!
//! Every menu item, toolbar button and shortcut becomes one `Command`
//! variant. The UI never calls handlers directly; it hands a `Command` to
//! [`Editor::dispatch`](crate::Editor::dispatch), which matches on it
//! exhaustively. Adding a command without handling it is a compile error.

use std::fmt;

/// Every action the editor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // File
    New,
    Open,
    Save,
    SaveAs,
    Print,
    Exit,

    // Edit
    Undo,
    Redo,
    Copy,
    Paste,

    // Format
    ChooseFont,
    ChooseColor,
    Underline,

    // Toolbar
    DarkMode,
    LightMode,

    // Tools
    GenerateQr,
    ScanQr,
}

impl Command {
    /// Menu / button label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open => "Open",
            Command::Save => "Save",
            Command::SaveAs => "Save As",
            Command::Print => "Print",
            Command::Exit => "Exit",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::ChooseFont => "Font",
            Command::ChooseColor => "Color",
            Command::Underline => "Underline",
            Command::DarkMode => "Dark Mode",
            Command::LightMode => "Light Mode",
            Command::GenerateQr => "Generate QR Code",
            Command::ScanQr => "Scan QR Code",
        }
    }

    /// Whether a menu draws a separator above this entry.
    pub fn separated_before(&self) -> bool {
        matches!(self, Command::Exit | Command::Copy)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Top-level menus, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
    Format,
    Tools,
}

impl Menu {
    pub const ALL: [Menu; 4] = [Menu::File, Menu::Edit, Menu::Format, Menu::Tools];

    /// Entries in menu order.
    pub fn commands(&self) -> &'static [Command] {
        match self {
            Menu::File => &[
                Command::New,
                Command::Open,
                Command::Save,
                Command::SaveAs,
                Command::Print,
                Command::Exit,
            ],
            Menu::Edit => &[Command::Undo, Command::Redo, Command::Copy, Command::Paste],
            Menu::Format => &[Command::ChooseFont, Command::ChooseColor, Command::Underline],
            Menu::Tools => &[Command::GenerateQr, Command::ScanQr],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Menu::File => "File",
            Menu::Edit => "Edit",
            Menu::Format => "Format",
            Menu::Tools => "Tools",
        }
    }
}

/// Toolbar buttons, left to right.
pub const TOOLBAR: [Command; 2] = [Command::DarkMode, Command::LightMode];

/// What a dispatched command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and changed something
    Applied,
    /// The user dismissed a dialog or picker
    Cancelled,
    /// The command ran but had nothing to do
    Unchanged,
    /// The editor should close
    Quit,
}
