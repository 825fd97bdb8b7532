use iced::keyboard;
use iced::widget::text_editor;
use scribe_core::{Command, FontFamily, Menu};

use crate::app::types::Channel;

#[derive(Debug, Clone)]
pub enum Message {
    // Menu bar, toolbar and shortcuts
    Run(Command),
    ToggleMenu(Menu),
    CloseMenu,
    KeyPressed(keyboard::Key, keyboard::Modifiers),

    // Editor
    EditorAction(text_editor::Action),

    // Font dialog
    FontFamilyPicked(FontFamily),
    FontSizeChanged(u16),
    FontBoldToggled(bool),
    FontItalicToggled(bool),
    FontConfirm,
    FontCancel,

    // Color dialog
    ColorChannelChanged(Channel, u8),
    ColorHexChanged(String),
    ColorConfirm,
    ColorCancel,
}
