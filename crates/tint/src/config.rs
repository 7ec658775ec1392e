//! Provider configuration.
//!
//! ```yaml
//! accent_key: theme-color
//! mode_key: theme-mode
//! default_theme:
//!   accent: rose
//!   mode: system
//! ```
//!
//! Every field is optional. Unknown default values are tolerated here and
//! replaced when the defaults are resolved (see [`DefaultTheme`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::theme::DefaultTheme;

/// Storage key holding the accent token.
pub const DEFAULT_ACCENT_KEY: &str = "theme-color";

/// Storage key holding the mode token.
pub const DEFAULT_MODE_KEY: &str = "theme-mode";

/// Everything a host supplies when constructing a provider or rendering the
/// preboot script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent_key: String,
    pub mode_key: String,
    pub default_theme: DefaultTheme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_key: DEFAULT_ACCENT_KEY.to_string(),
            mode_key: DEFAULT_MODE_KEY.to_string(),
            default_theme: DefaultTheme::default(),
        }
    }
}

impl ThemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_theme(mut self, default_theme: DefaultTheme) -> Self {
        self.default_theme = default_theme;
        self
    }

    /// Overrides both storage keys.
    pub fn with_keys(mut self, accent_key: impl Into<String>, mode_key: impl Into<String>) -> Self {
        self.accent_key = accent_key.into();
        self.mode_key = mode_key.into();
        self
    }

    /// Parses a YAML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] if the YAML is malformed or has the
    /// wrong shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ConfigIo`] if the file cannot be read and
    /// [`ThemeError::Config`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded theme configuration");
        Self::from_yaml(&content)
    }
}
