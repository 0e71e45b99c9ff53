//! Conversion settings, loaded from TOML.

use crate::error::{PressError, Result};
use crate::render::DEFAULT_THEME;
use crate::types::{TitleSource, WikilinkMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings that shape the conversion pipeline.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How wikilinks are rewritten.
    pub wikilink_mode: WikilinkMode,
    /// Highlight fenced code with syntect; when off the renderer emits plain blocks.
    pub highlight_code: bool,
    /// Syntect theme name.
    pub code_style: String,
    /// Which sources the title resolver consults.
    pub title_source: TitleSource,
    /// Remove Prev/Next navigation blocks.
    pub strip_navigation: bool,
    /// Level-2 headings whose sections are removed (case-insensitive).
    pub strip_sections: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wikilink_mode: WikilinkMode::default(),
            highlight_code: true,
            code_style: DEFAULT_THEME.to_string(),
            title_source: TitleSource::default(),
            strip_navigation: true,
            strip_sections: vec!["Connections".to_string()],
        }
    }
}

impl Config {
    /// `<config_dir>/vaultpress/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vaultpress").join("config.toml"))
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file that must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PressError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the explicit path if given, else the default location if it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.wikilink_mode, WikilinkMode::Strip);
        assert!(config.highlight_code);
        assert_eq!(config.code_style, "InspiredGitHub");
        assert_eq!(config.title_source, TitleSource::Auto);
        assert!(config.strip_navigation);
        assert_eq!(config.strip_sections, vec!["Connections"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            "wikilink_mode = \"styled\"\ntitle_source = \"heading\"\nstrip_sections = [\"See Also\"]\n",
        )
        .unwrap();
        assert_eq!(config.wikilink_mode, WikilinkMode::Styled);
        assert_eq!(config.title_source, TitleSource::Heading);
        assert_eq!(config.strip_sections, vec!["See Also"]);
        assert!(config.highlight_code);
    }

    #[test]
    fn test_invalid_value() {
        let err = Config::from_toml_str("wikilink_mode = \"bold\"").unwrap_err();
        assert!(matches!(err, PressError::TomlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "highlight_code = false\ncode_style = \"Solarized (dark)\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.highlight_code);
        assert_eq!(config.code_style, "Solarized (dark)");
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, PressError::ConfigError(_)));
    }
}
