use scribe_core::{Config, FontSpec, Rgb};

/// Launch options.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub config: Config,
}

/// Font picker state while the dialog is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDialog {
    pub font: FontSpec,
}

/// One channel of an RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    pub fn get(&self, color: Rgb) -> u8 {
        match self {
            Channel::Red => color.r,
            Channel::Green => color.g,
            Channel::Blue => color.b,
        }
    }

    pub fn set(&self, color: &mut Rgb, value: u8) {
        match self {
            Channel::Red => color.r = value,
            Channel::Green => color.g = value,
            Channel::Blue => color.b = value,
        }
    }
}

/// Color picker state while the dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDialog {
    pub color: Rgb,
    /// Contents of the hex field; may be mid-edit and invalid
    pub hex_input: String,
}

impl ColorDialog {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            hex_input: color.to_string(),
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        channel.set(&mut self.color, value);
        self.hex_input = self.color.to_string();
    }

    /// Takes the typed text; the color follows once it parses.
    pub fn set_hex(&mut self, input: String) {
        if let Ok(color) = input.parse() {
            self.color = color;
        }
        self.hex_input = input;
    }

    /// Returns true if the hex field holds a valid color.
    pub fn hex_is_valid(&self) -> bool {
        self.hex_input.parse::<Rgb>().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_edits_update_hex() {
        let mut dialog = ColorDialog::new(Rgb::BLACK);
        dialog.set_channel(Channel::Green, 255);
        assert_eq!(dialog.color, Rgb::new(0, 255, 0));
        assert_eq!(dialog.hex_input, "#00ff00");
    }

    #[test]
    fn test_partial_hex_keeps_last_color() {
        let mut dialog = ColorDialog::new(Rgb::WHITE);
        dialog.set_hex("#12".to_string());
        assert_eq!(dialog.color, Rgb::WHITE);
        assert!(!dialog.hex_is_valid());

        dialog.set_hex("#123456".to_string());
        assert_eq!(dialog.color, Rgb::new(0x12, 0x34, 0x56));
        assert!(dialog.hex_is_valid());
    }
}
