//! Stated mode and effective appearance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseModeError;

/// The user's stated light/dark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system preference.
    #[default]
    System,
}

impl Mode {
    /// Every mode, in canonical order.
    pub const ALL: [Mode; 3] = [Mode::Light, Mode::Dark, Mode::System];

    /// The lowercase token for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
            Mode::System => "system",
        }
    }

    /// Iterates over all tokens in canonical order.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|mode| mode.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            "system" => Ok(Mode::System),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

/// The appearance actually rendered: a [`Mode`] with `System` resolved.
///
/// Never persisted. See [`crate::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    /// Maps an "is dark" flag to an appearance.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Appearance::Dark
    }

    /// The class token and color-scheme value for this appearance.
    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("light".parse::<Mode>(), Ok(Mode::Light));
        assert_eq!("dark".parse::<Mode>(), Ok(Mode::Dark));
        assert_eq!("system".parse::<Mode>(), Ok(Mode::System));
        assert_eq!(
            "auto".parse::<Mode>(),
            Err(ParseModeError("auto".to_string()))
        );
        assert!("DARK".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_mode_is_system() {
        assert_eq!(Mode::default(), Mode::System);
    }

    #[test]
    fn test_appearance_tokens_match_mode_tokens() {
        assert_eq!(Appearance::Dark.as_str(), Mode::Dark.as_str());
        assert_eq!(Appearance::Light.as_str(), Mode::Light.as_str());
    }

    #[test]
    fn test_appearance_from_dark() {
        assert_eq!(Appearance::from_dark(true), Appearance::Dark);
        assert_eq!(Appearance::from_dark(false), Appearance::Light);
        assert!(Appearance::Dark.is_dark());
        assert!(!Appearance::Light.is_dark());
    }
}
