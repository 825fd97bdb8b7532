//! Whole-document formatting: font, foreground and background.
//!
//! Colors serialize as `"#rrggbb"` strings so they read naturally in the
//! config file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness below the midpoint.
    pub fn is_dark(&self) -> bool {
        let luma = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        luma < 128_000
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error for a malformed `#rrggbb` / `#rgb` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{0}': expected #rrggbb or #rgb")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Generic font families the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    SansSerif,
    Serif,
    #[default]
    Monospace,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [
        FontFamily::SansSerif,
        FontFamily::Serif,
        FontFamily::Monospace,
    ];
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FontFamily::SansSerif => "Sans Serif",
            FontFamily::Serif => "Serif",
            FontFamily::Monospace => "Monospace",
        };
        f.write_str(label)
    }
}

/// A font descriptor, as returned by the font picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: FontFamily,
    /// Point size
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub const MIN_SIZE: u16 = 6;
    pub const MAX_SIZE: u16 = 72;
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::Monospace,
            size: 14,
            bold: false,
            italic: false,
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)?;
        if self.bold {
            f.write_str(" Bold")?;
        }
        if self.italic {
            f.write_str(" Italic")?;
        }
        Ok(())
    }
}

/// Light or dark colors for the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// `(foreground, background)`
    pub fn colors(self) -> (Rgb, Rgb) {
        match self {
            ColorScheme::Light => (Rgb::BLACK, Rgb::WHITE),
            ColorScheme::Dark => (Rgb::WHITE, Rgb::BLACK),
        }
    }
}

/// Formatting applied to the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatting {
    pub font: FontSpec,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Formatting {
    /// Default font with the given scheme's colors.
    pub fn new(font: FontSpec, scheme: ColorScheme) -> Self {
        let (foreground, background) = scheme.colors();
        Self {
            font,
            foreground,
            background,
        }
    }

    /// Overwrites both colors with the scheme's pair.
    pub fn apply_scheme(&mut self, scheme: ColorScheme) {
        (self.foreground, self.background) = scheme.colors();
    }
}

impl Default for Formatting {
    fn default() -> Self {
        Self::new(FontSpec::default(), ColorScheme::Light)
    }
}
