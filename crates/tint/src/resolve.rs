//! Resolving a [`Mode`] into the [`Appearance`] to render.
//!
//! Explicit modes map straight through. [`Mode::System`] asks an
//! [`AppearanceProbe`] whether the operating system prefers dark. The probe
//! is optional and fallible: when it is missing or fails, the answer is
//! light. No failure leaves this module.
//!
//! There is no caching and no live subscription. Every call asks the probe
//! again, so a change in the OS preference shows up the next time anything
//! resolves.
//!
//! ```rust
//! use tint::{resolve, Appearance, FixedProbe, Mode};
//!
//! assert_eq!(resolve(Mode::Dark, None), Appearance::Dark);
//! assert_eq!(resolve(Mode::System, Some(&FixedProbe(true))), Appearance::Dark);
//! assert_eq!(resolve(Mode::System, None), Appearance::Light);
//! ```

use crate::error::ProbeError;
use crate::theme::{Appearance, Mode};

/// Media query matching an OS dark preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Environment variable that, when set to `dark` or `light`, overrides what
/// [`OsProbe`] reports.
pub const APPEARANCE_ENV_VAR: &str = "TINT_APPEARANCE";

/// Synchronous query for the operating system's light/dark preference.
pub trait AppearanceProbe {
    /// `Ok(true)` when the OS prefers a dark appearance.
    fn prefers_dark(&self) -> Result<bool, ProbeError>;
}

/// Closures work as probes.
impl<F> AppearanceProbe for F
where
    F: Fn() -> Result<bool, ProbeError>,
{
    fn prefers_dark(&self) -> Result<bool, ProbeError> {
        (self)()
    }
}

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProbe(pub bool);

impl AppearanceProbe for FixedProbe {
    fn prefers_dark(&self) -> Result<bool, ProbeError> {
        Ok(self.0)
    }
}

/// A probe that always fails, like a host without a media-query API.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingProbe;

impl AppearanceProbe for FailingProbe {
    fn prefers_dark(&self) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported("no appearance query in this host".to_string()))
    }
}

/// Desktop probe backed by the `dark-light` crate.
///
/// [`APPEARANCE_ENV_VAR`] takes precedence when it holds `dark` or `light`
/// (any case). An OS that reports no preference counts as light.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProbe;

#[cfg(not(target_arch = "wasm32"))]
impl AppearanceProbe for OsProbe {
    fn prefers_dark(&self) -> Result<bool, ProbeError> {
        if let Some(forced) = env_override() {
            return Ok(forced);
        }
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Ok(true),
            Ok(dark_light::Mode::Light) | Ok(dark_light::Mode::Unspecified) => Ok(false),
            Err(err) => Err(ProbeError::Failed(err.to_string())),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_override() -> Option<bool> {
    let value = std::env::var(APPEARANCE_ENV_VAR).ok()?;
    if value.eq_ignore_ascii_case("dark") {
        Some(true)
    } else if value.eq_ignore_ascii_case("light") {
        Some(false)
    } else {
        None
    }
}

/// Resolves `mode` to the appearance to render.
pub fn resolve(mode: Mode, probe: Option<&dyn AppearanceProbe>) -> Appearance {
    match mode {
        Mode::Dark => Appearance::Dark,
        Mode::Light => Appearance::Light,
        Mode::System => {
            let Some(probe) = probe else {
                tracing::debug!("no appearance probe, system mode resolves to light");
                return Appearance::Light;
            };
            match probe.prefers_dark() {
                Ok(dark) => Appearance::from_dark(dark),
                Err(err) => {
                    tracing::debug!(%err, "appearance probe failed, system mode resolves to light");
                    Appearance::Light
                }
            }
        }
    }
}

/// [`resolve`] as a boolean.
pub fn is_dark(mode: Mode, probe: Option<&dyn AppearanceProbe>) -> bool {
    resolve(mode, probe).is_dark()
}
