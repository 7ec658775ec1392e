//! The stated preference and its partial updates.

use serde::{Deserialize, Serialize};

use super::accent::Accent;
use super::mode::Mode;

/// The user's stated preference: an accent and a mode.
///
/// This is what gets persisted. What the document shows is the
/// [`Appearance`](super::Appearance) derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Theme {
    pub accent: Accent,
    pub mode: Mode,
}

impl Theme {
    pub fn new(accent: Accent, mode: Mode) -> Self {
        Self { accent, mode }
    }

    /// Returns this theme with the fields present in `patch` replaced.
    ///
    /// ```rust
    /// use tint::{Accent, Mode, Theme, ThemePatch};
    ///
    /// let theme = Theme::new(Accent::Rose, Mode::Light);
    /// let merged = theme.merge(ThemePatch::new().mode(Mode::Dark));
    /// assert_eq!(merged, Theme::new(Accent::Rose, Mode::Dark));
    /// ```
    pub fn merge(self, patch: ThemePatch) -> Self {
        Self {
            accent: patch.accent.unwrap_or(self.accent),
            mode: patch.mode.unwrap_or(self.mode),
        }
    }
}

/// A partial update for [`Theme`]. Omitted fields stay unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePatch {
    pub accent: Option<Accent>,
    pub mode: Option<Mode>,
}

impl ThemePatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accent(mut self, accent: Accent) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.accent.is_none() && self.mode.is_none()
    }

    /// Builds a patch from untyped input.
    ///
    /// A value that is present but not a known token is replaced by the
    /// corresponding field of `defaults`, so a bad request never reaches
    /// state or storage.
    pub fn from_raw(accent: Option<&str>, mode: Option<&str>, defaults: &DefaultTheme) -> Self {
        Self {
            accent: accent.map(|raw| {
                raw.parse().unwrap_or_else(|err| {
                    tracing::warn!(%err, "requested accent rejected, using default");
                    defaults.accent()
                })
            }),
            mode: mode.map(|raw| {
                raw.parse().unwrap_or_else(|err| {
                    tracing::warn!(%err, "requested mode rejected, using default");
                    defaults.mode()
                })
            }),
        }
    }
}

impl From<Accent> for ThemePatch {
    fn from(accent: Accent) -> Self {
        Self::new().accent(accent)
    }
}

impl From<Mode> for ThemePatch {
    fn from(mode: Mode) -> Self {
        Self::new().mode(mode)
    }
}

impl From<Theme> for ThemePatch {
    fn from(theme: Theme) -> Self {
        Self::new().accent(theme.accent).mode(theme.mode)
    }
}

/// Host-supplied fallback used when nothing valid is persisted.
///
/// Fields are raw strings because they usually come from configuration.
/// Each one resolves on its own: a missing or unknown accent becomes
/// [`Accent::Slate`], a missing or unknown mode becomes [`Mode::System`].
///
/// ```rust
/// use tint::{Accent, DefaultTheme, Mode};
///
/// let defaults = DefaultTheme::new().with_accent("teal").with_mode(Mode::Dark);
/// assert_eq!(defaults.accent(), Accent::Slate);
/// assert_eq!(defaults.mode(), Mode::Dark);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultTheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl DefaultTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// The default accent, validated.
    pub fn accent(&self) -> Accent {
        match self.accent.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "default accent ignored");
                Accent::default()
            }),
            None => Accent::default(),
        }
    }

    /// The default mode, validated.
    pub fn mode(&self) -> Mode {
        match self.mode.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "default mode ignored");
                Mode::default()
            }),
            None => Mode::default(),
        }
    }

    /// Both fields, validated.
    pub fn resolve(&self) -> Theme {
        Theme::new(self.accent(), self.mode())
    }
}

impl From<Theme> for DefaultTheme {
    fn from(theme: Theme) -> Self {
        Self::new().with_accent(theme.accent).with_mode(theme.mode)
    }
}
