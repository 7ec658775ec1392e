//! Command implementations. Each returns the text to print.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tint::{
    resolve, Accent, Appearance, AppearanceProbe, DefaultTheme, FileStorage, MemoryDocument,
    Mode, PreferenceStore, PrebootScript, ThemeConfig, ThemePatch, ThemeProvider,
};

use crate::cli::Args;

/// Loads the configuration file (if any) and applies the CLI overrides.
pub fn load_config(args: &Args) -> Result<ThemeConfig> {
    let mut config = match &args.config {
        Some(path) => ThemeConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ThemeConfig::default(),
    };
    if let Some(accent) = &args.default_accent {
        config.default_theme.accent = Some(accent.clone());
    }
    if let Some(mode) = &args.default_mode {
        config.default_theme.mode = Some(mode.clone());
    }
    Ok(config)
}

/// A mounted provider over the preference file.
///
/// The document is in memory; the CLI only reports what a page would show.
pub fn open_provider(
    config: ThemeConfig,
    store: &Path,
    probe: impl AppearanceProbe + 'static,
) -> ThemeProvider {
    tracing::debug!(store = %store.display(), "opening preference store");
    let provider = ThemeProvider::builder()
        .config(config)
        .storage(FileStorage::new(store))
        .probe(probe)
        .document(MemoryDocument::new())
        .build();
    provider.mount();
    provider
}

pub fn script(config: &ThemeConfig, tag: bool, nonce: Option<String>) -> Result<String> {
    let mut script = PrebootScript::new(config);
    let wrap = tag || nonce.is_some();
    if let Some(nonce) = nonce {
        script = script.nonce(nonce);
    }
    let rendered = if wrap {
        script.render_tag()?
    } else {
        script.render()?
    };
    Ok(rendered)
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    accent: Accent,
    mode: Mode,
    appearance: Appearance,
    store: &'a Path,
}

pub fn show(provider: &ThemeProvider, store: &Path, json: bool) -> Result<String> {
    let ctx = provider.context()?;
    let theme = ctx.theme()?;
    let report = Report {
        accent: theme.accent,
        mode: theme.mode,
        appearance: ctx.appearance()?,
        store,
    };
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!(
        "accent:     {}\nmode:       {}\nappearance: {}\nstore:      {}",
        report.accent,
        report.mode,
        report.appearance,
        store.display()
    ))
}

/// Updates the stored preference, then reads the file back.
///
/// The library only logs failed writes; here they are an error.
pub fn set(
    provider: &ThemeProvider,
    store: &Path,
    accent: Option<Accent>,
    mode: Option<Mode>,
) -> Result<String> {
    let ctx = provider.context()?;
    ctx.set_theme(ThemePatch { accent, mode })?;
    let theme = ctx.theme()?;

    let config = provider.config();
    let saved = PreferenceStore::from_config(FileStorage::new(store), config);
    if saved.read(saved.accent_key()).as_deref() != Some(theme.accent.as_str())
        || saved.read(saved.mode_key()).as_deref() != Some(theme.mode.as_str())
    {
        bail!("preference was not saved to {}", store.display());
    }

    Ok(format!("{} {} ({})", theme.accent, theme.mode, ctx.appearance()?))
}

pub fn resolve_mode(mode: Mode, probe: &dyn AppearanceProbe) -> String {
    resolve(mode, Some(probe)).to_string()
}

pub fn list(defaults: &DefaultTheme) -> String {
    let theme = defaults.resolve();
    let mark = |selected: bool| if selected { " (default)" } else { "" };

    let mut out = String::from("accents:\n");
    for accent in Accent::ALL {
        out.push_str(&format!("  {}{}\n", accent, mark(accent == theme.accent)));
    }
    out.push_str("modes:\n");
    for mode in Mode::ALL {
        out.push_str(&format!("  {}{}\n", mode, mark(mode == theme.mode)));
    }
    out.truncate(out.trim_end().len());
    out
}
