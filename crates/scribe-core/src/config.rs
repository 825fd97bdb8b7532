//! Editor configuration.
//!
//! Read from `<config dir>/scribe/config.toml`. Every field has a default,
//! and a missing file means "all defaults", which is the stock editor: an
//! 800x600 "Text Editor" window in light mode with a 14pt monospace font.
//!
//! ## Learning: `#[serde(default)]`
//!
//! With `#[serde(default)]` on a struct, fields missing from the TOML are
//! filled from `Default::default()`, so a config file only needs the keys
//! it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::{ColorScheme, FontSpec, Formatting};

/// Main editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window settings
    pub window: WindowConfig,

    /// Initial document formatting
    pub editor: EditorConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    ///
    /// A malformed file is logged and ignored.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config: {}", err);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("scribe").join("config.toml"))
    }

    /// Formatting a fresh document starts with.
    pub fn initial_formatting(&self) -> Formatting {
        Formatting::new(self.editor.font, self.editor.scheme)
    }
}

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Initial width in logical pixels
    pub width: u32,

    /// Initial height in logical pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Text Editor".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Document appearance at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial color scheme
    pub scheme: ColorScheme,

    /// Initial font
    pub font: FontSpec,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FontFamily, Rgb};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.title, "Text Editor");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.editor.scheme, ColorScheme::Light);

        let formatting = config.initial_formatting();
        assert_eq!(formatting.foreground, Rgb::BLACK);
        assert_eq!(formatting.background, Rgb::WHITE);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.editor.scheme = ColorScheme::Dark;
        config.editor.font.family = FontFamily::Serif;

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [editor]
            scheme = "dark"
            font = { size = 18 }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.window, WindowConfig::default());
        assert_eq!(parsed.editor.scheme, ColorScheme::Dark);
        assert_eq!(parsed.editor.font.size, 18);
        assert_eq!(parsed.editor.font.family, FontFamily::Monospace);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window.title = "Notes".to_string();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window\nwidth = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[editor]\nscheme = \"sepia\"\n");
        assert!(result.is_err());
    }
}
