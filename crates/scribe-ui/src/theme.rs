//! Window chrome colors and conversions from the core formatting model.
//!
//! The chrome (menu bar, toolbar, status bar, dialogs) is always light; only
//! the text area follows the document's colors.

use iced::font::{Family, Style, Weight};
use iced::{Color, Font};
use scribe_core::{FontFamily, FontSpec, Rgb};

/// Chrome palette.
pub mod colors {
    use iced::Color;

    pub const BG_BAR: Color = Color::from_rgb(0.94, 0.94, 0.94);
    pub const BG_MENU: Color = Color::from_rgb(0.98, 0.98, 0.98);
    pub const BG_HOVER: Color = Color::from_rgb(0.85, 0.89, 0.96);
    pub const BG_ACTIVE: Color = Color::from_rgb(0.80, 0.85, 0.94);
    pub const BG_BUTTON: Color = Color::from_rgb(0.90, 0.90, 0.90);
    pub const BORDER: Color = Color::from_rgb(0.78, 0.78, 0.78);
    pub const OVERLAY: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.35);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.10, 0.10, 0.10);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.30, 0.30, 0.30);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.55, 0.55, 0.55);
    pub const ERROR: Color = Color::from_rgb(0.75, 0.15, 0.15);

    /// Underlined text
    pub const UNDERLINE_LIGHT: Color = Color::from_rgb(0.05, 0.35, 0.85);
    pub const UNDERLINE_DARK: Color = Color::from_rgb(0.45, 0.70, 1.0);

    pub const SELECTION: Color = Color::from_rgba(0.25, 0.46, 0.85, 0.40);
}

/// Converts a document color to an iced color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

/// Converts a document font to an iced font.
pub fn to_font(spec: &FontSpec) -> Font {
    Font {
        family: match spec.family {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
        },
        weight: if spec.bold { Weight::Bold } else { Weight::Normal },
        style: if spec.italic { Style::Italic } else { Style::Normal },
        ..Font::DEFAULT
    }
}

/// Color for underlined text that stands out from `background`.
pub fn underline_color(background: Rgb) -> Color {
    if background.is_dark() {
        colors::UNDERLINE_DARK
    } else {
        colors::UNDERLINE_LIGHT
    }
}
