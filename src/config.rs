//! Runtime settings.
//!
//! Defaults are compiled in. With the `config` feature enabled, a TOML file at
//! `$CONFIG_DIR/bbrowse/config.toml` (or a path given on the command line) can override them:
//!
//! ```toml
//! min_search_length = 16
//! theme = "high-contrast"
//! ```
//!
//! Command-line flags are applied last and win over both.

use crate::error::{BrowserError, Result};
use crate::search::MIN_SEARCH_LENGTH;
use std::str::FromStr;

/// Named color themes selectable from the command line or config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl ThemeName {
    pub const VARIANTS: [&'static str; 3] = ["default", "monochrome", "high-contrast"];
}

impl FromStr for ThemeName {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(ThemeName::Default),
            "monochrome" => Ok(ThemeName::Monochrome),
            "high-contrast" => Ok(ThemeName::HighContrast),
            other => Err(BrowserError::invalid_argument(format!(
                "unknown theme '{other}' (expected one of: {})",
                Self::VARIANTS.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct BrowserConfig {
    /// Digits required before a submitted NIK search runs.
    pub min_search_length: usize,
    pub theme: ThemeName,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            min_search_length: MIN_SEARCH_LENGTH,
            theme: ThemeName::default(),
        }
    }
}

impl BrowserConfig {
    /// Reject settings the browser cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_search_length == 0 {
            return Err(BrowserError::config(
                "min_search_length must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl BrowserConfig {
    /// Default location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bbrowse").join("config.toml"))
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| BrowserError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from `path`, or from [`BrowserConfig::default_path`] when `path` is None.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("reading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(e) => Err(BrowserError::file_error(
                format!("Failed to read config file: {}", path.display()),
                e,
            )),
        }
    }
}
