//! Applying the persisted theme before anything else runs.
//!
//! The document has to show the right appearance on its first paint. Two
//! entry points exist for that, and both run the same rules:
//!
//! - [`boot`]: load, resolve, apply, in one call with no provider involved.
//!   [`ThemeProvider::mount`](crate::ThemeProvider::mount) calls it too, so
//!   the provider's first reconciliation cannot disagree with the preboot
//!   pass.
//! - [`PrebootScript`]: the same rules as a dependency-free inline script,
//!   for server-rendered pages that must act before any program loads.
//!
//! # Example
//!
//! ```rust
//! use tint::{boot, FixedProbe, MemoryDocument, MemoryStorage, PreferenceStore, ThemeConfig};
//!
//! let config = ThemeConfig::default();
//! let store = PreferenceStore::from_config(MemoryStorage::new(), &config);
//! let doc = MemoryDocument::new();
//!
//! let outcome = boot(&store, &config.default_theme, Some(&FixedProbe(true)), &doc);
//! assert!(outcome.appearance.is_dark());
//! assert!(doc.has_class("slate") && doc.has_class("dark"));
//! ```

use minijinja::{context, AutoEscape, Environment};

use crate::apply::{apply, DocumentRoot};
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::resolve::{resolve, AppearanceProbe, PREFERS_DARK_QUERY};
use crate::store::{PreferenceStore, StorageMedium};
use crate::theme::{Accent, Appearance, DefaultTheme, Mode, Theme};

/// What [`boot`] read and applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootOutcome {
    pub theme: Theme,
    pub appearance: Appearance,
}

/// Reads the persisted theme (falling back to `defaults` per field),
/// resolves its appearance and applies it to `doc`.
pub fn boot<M, D>(
    store: &PreferenceStore<M>,
    defaults: &DefaultTheme,
    probe: Option<&dyn AppearanceProbe>,
    doc: &D,
) -> BootOutcome
where
    M: StorageMedium,
    D: DocumentRoot + ?Sized,
{
    let theme = store.load(defaults);
    let appearance = resolve(theme.mode, probe);
    apply(doc, theme.accent, appearance);
    tracing::debug!(
        accent = %theme.accent,
        mode = %theme.mode,
        %appearance,
        "theme booted"
    );
    BootOutcome { theme, appearance }
}

const SCRIPT_TEMPLATE: &str = r#"(function () {
  var accents = {{ accents|tojson }};
  var modes = {{ modes|tojson }};
  function read(key) {
    try { return window.localStorage.getItem(key) || ""; } catch (e) { return ""; }
  }
  var accent = read({{ accent_key|tojson }});
  var mode = read({{ mode_key|tojson }});
  if (accents.indexOf(accent) < 0) { accent = {{ default_accent|tojson }}; }
  if (modes.indexOf(mode) < 0) { mode = {{ default_mode|tojson }}; }
  var dark = mode === "dark";
  if (mode === "system") {
    try { dark = window.matchMedia({{ query|tojson }}).matches; } catch (e) { dark = false; }
  }
  var root = document.documentElement;
  var stale = accents.concat(modes);
  for (var i = 0; i < stale.length; i++) { root.classList.remove(stale[i]); }
  root.classList.add(accent, dark ? "dark" : "light");
  root.style.colorScheme = dark ? "dark" : "light";
})();"#;

const TAG_TEMPLATE: &str =
    r#"<script{% if nonce %} nonce="{{ nonce|e }}"{% endif %}>{{ body }}</script>"#;

/// Renders the inline preboot script for a [`ThemeConfig`].
///
/// Defaults are validated before they are embedded, so the script only
/// carries known tokens. Every embedded value goes through JSON encoding
/// with HTML-sensitive characters escaped, which keeps the output safe
/// inside a `<script>` element.
///
/// ```rust
/// use tint::{PrebootScript, ThemeConfig};
///
/// let tag = PrebootScript::new(&ThemeConfig::default())
///     .nonce("r4nd0m")
///     .render_tag()
///     .unwrap();
/// assert!(tag.starts_with(r#"<script nonce="r4nd0m">"#));
/// ```
#[derive(Debug, Clone)]
pub struct PrebootScript<'a> {
    config: &'a ThemeConfig,
    nonce: Option<String>,
}

impl<'a> PrebootScript<'a> {
    pub fn new(config: &'a ThemeConfig) -> Self {
        Self {
            config,
            nonce: None,
        }
    }

    /// Content-Security-Policy nonce for the `<script>` tag.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// The script body, without the surrounding tag.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Template`] if rendering fails.
    pub fn render(&self) -> Result<String, ThemeError> {
        let defaults = self.config.default_theme.resolve();
        let env = environment();
        let body = env.render_str(
            SCRIPT_TEMPLATE,
            context! {
                accents => Accent::tokens().collect::<Vec<_>>(),
                modes => Mode::tokens().collect::<Vec<_>>(),
                accent_key => self.config.accent_key.as_str(),
                mode_key => self.config.mode_key.as_str(),
                default_accent => defaults.accent.as_str(),
                default_mode => defaults.mode.as_str(),
                query => PREFERS_DARK_QUERY,
            },
        )?;
        Ok(body)
    }

    /// The script wrapped in a `<script>` element.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Template`] if rendering fails.
    pub fn render_tag(&self) -> Result<String, ThemeError> {
        let body = self.render()?;
        let env = environment();
        Ok(env.render_str(
            TAG_TEMPLATE,
            context! {
                nonce => self.nonce.as_deref(),
                body => body,
            },
        )?)
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}
