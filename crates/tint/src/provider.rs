//! The theme provider and the consumer-facing context.
//!
//! A [`ThemeProvider`] owns the current [`Theme`] and the three capabilities
//! (storage, OS probe, document). It moves through two phases:
//!
//! 1. **Init**: right after construction the state holds the resolved
//!    defaults and nothing has touched the document.
//! 2. **Settled**: [`mount`](ThemeProvider::mount) runs [`boot`], the same
//!    routine as the preboot pass, and adopts its result. From then on every
//!    accepted mutation re-resolves, re-applies, persists and notifies
//!    subscribers, synchronously and in that order.
//!
//! Consumers reach the provider through a [`Scope`]. Scopes handed out by
//! [`ThemeProvider::scope`] (and their [`child`](Scope::child) scopes) are
//! descendants of the provider. [`use_theme`] on any other scope, or after the
//! provider was dropped, or before it mounted, is a usage error. So is any
//! operation on a [`ThemeContext`] kept past its provider's unmount.
//!
//! # Example
//!
//! ```rust
//! use tint::{use_theme, Accent, FixedProbe, MemoryDocument, MemoryStorage, Mode, ThemeProvider};
//!
//! let storage = MemoryStorage::new()
//!     .with_entry("theme-color", "rose")
//!     .with_entry("theme-mode", "light");
//! let doc = MemoryDocument::new();
//!
//! let provider = ThemeProvider::builder()
//!     .storage(storage.clone())
//!     .probe(FixedProbe(false))
//!     .document(doc.clone())
//!     .build();
//! provider.mount();
//!
//! let theme = use_theme(&provider.scope()).unwrap();
//! theme.set_theme(Mode::Dark).unwrap();
//!
//! assert_eq!(theme.theme().unwrap().accent, Accent::Rose);
//! assert_eq!(storage.value("theme-mode").as_deref(), Some("dark"));
//! assert!(doc.has_class("rose") && doc.has_class("dark"));
//! ```
//!
//! # Single-Threaded Design
//!
//! Like the hosts it models (a browser main thread, a UI event loop), the
//! provider is single-threaded: state lives behind `Rc`/`RefCell` and none
//! of the capabilities need `Send + Sync`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::apply::{apply, DocumentRoot, MemoryDocument};
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::preboot::{boot, BootOutcome};
use crate::resolve::{resolve, AppearanceProbe};
use crate::store::{MemoryStorage, PreferenceStore, StorageMedium};
use crate::theme::{Appearance, DefaultTheme, Mode, Theme, ThemePatch};

/// Lifecycle phase of a [`ThemeProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; state holds the defaults; the document is untouched.
    Init,
    /// Mounted; state tracks the persisted preference and every change is
    /// applied.
    Settled,
    /// The provider was dropped.
    Unmounted,
}

/// Delivered to subscribers after every accepted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub theme: Theme,
    pub appearance: Appearance,
}

/// Handle returned by [`ThemeContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&ThemeChange)>;

struct State {
    theme: Theme,
    phase: Phase,
}

struct Shared {
    config: ThemeConfig,
    store: PreferenceStore<Box<dyn StorageMedium>>,
    probe: Option<Box<dyn AppearanceProbe>>,
    document: Box<dyn DocumentRoot>,
    state: RefCell<State>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl Shared {
    fn probe(&self) -> Option<&dyn AppearanceProbe> {
        self.probe.as_deref()
    }

    fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    fn notify(&self, change: ThemeChange) {
        // Snapshot first: listeners may subscribe, unsubscribe or update.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&change);
        }
    }
}

/// Owns the theme state for one consumer tree.
///
/// Dropping the provider unmounts it.
pub struct ThemeProvider {
    shared: Rc<Shared>,
}

impl ThemeProvider {
    /// Starts building a provider.
    pub fn builder() -> ThemeProviderBuilder {
        ThemeProviderBuilder::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.shared.phase()
    }

    /// Current stated preference. Before mounting this is the defaults.
    pub fn theme(&self) -> Theme {
        self.shared.theme()
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.shared.config
    }

    /// Reconciles with storage and the document, then enters
    /// [`Phase::Settled`].
    ///
    /// Runs the same [`boot`] routine as the preboot pass, so the document
    /// ends up exactly as preboot left it when nothing changed in between.
    /// Mounting again re-reads storage, which picks up out-of-band writes.
    pub fn mount(&self) -> BootOutcome {
        let shared = &self.shared;
        let outcome = boot(
            &shared.store,
            &shared.config.default_theme,
            shared.probe(),
            &shared.document,
        );
        {
            let mut state = shared.state.borrow_mut();
            state.theme = outcome.theme;
            state.phase = Phase::Settled;
        }
        tracing::debug!(accent = %outcome.theme.accent, mode = %outcome.theme.mode, "theme provider mounted");
        shared.notify(ThemeChange {
            theme: outcome.theme,
            appearance: outcome.appearance,
        });
        outcome
    }

    /// A scope whose consumers are descendants of this provider.
    pub fn scope(&self) -> Scope {
        Scope {
            provider: Some(Rc::downgrade(&self.shared)),
        }
    }

    /// Shorthand for `use_theme(&self.scope())`.
    pub fn context(&self) -> Result<ThemeContext, ThemeError> {
        use_theme(&self.scope())
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.shared.state.borrow_mut().phase = Phase::Unmounted;
        self.shared.listeners.borrow_mut().clear();
        tracing::debug!("theme provider unmounted");
    }
}

impl fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("theme", &self.theme())
            .field("phase", &self.phase())
            .field("config", &self.shared.config)
            .finish()
    }
}

/// Builder for [`ThemeProvider`].
///
/// Unset capabilities default to [`MemoryStorage`], [`MemoryDocument`] and
/// no probe (system mode then resolves to light).
#[derive(Default)]
pub struct ThemeProviderBuilder {
    config: ThemeConfig,
    storage: Option<Box<dyn StorageMedium>>,
    probe: Option<Box<dyn AppearanceProbe>>,
    document: Option<Box<dyn DocumentRoot>>,
}

impl ThemeProviderBuilder {
    pub fn config(mut self, config: ThemeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces only the default theme of the configuration.
    pub fn default_theme(mut self, default_theme: DefaultTheme) -> Self {
        self.config.default_theme = default_theme;
        self
    }

    pub fn storage(mut self, storage: impl StorageMedium + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn probe(mut self, probe: impl AppearanceProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    pub fn document(mut self, document: impl DocumentRoot + 'static) -> Self {
        self.document = Some(Box::new(document));
        self
    }

    /// Builds the provider in [`Phase::Init`]. Nothing is read or applied
    /// until [`ThemeProvider::mount`].
    pub fn build(self) -> ThemeProvider {
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemoryStorage::new()));
        let document = self
            .document
            .unwrap_or_else(|| Box::new(MemoryDocument::new()));
        let store = PreferenceStore::from_config(storage, &self.config);
        let theme = self.config.default_theme.resolve();

        ThemeProvider {
            shared: Rc::new(Shared {
                config: self.config,
                store,
                probe: self.probe,
                document,
                state: RefCell::new(State {
                    theme,
                    phase: Phase::Init,
                }),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }
}

impl fmt::Debug for ThemeProviderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProviderBuilder")
            .field("config", &self.config)
            .field("has_storage", &self.storage.is_some())
            .field("has_probe", &self.probe.is_some())
            .field("has_document", &self.document.is_some())
            .finish()
    }
}

/// A position in the consumer tree.
///
/// [`Scope::root`] sits outside every provider.
#[derive(Clone, Default)]
pub struct Scope {
    provider: Option<Weak<Shared>>,
}

impl Scope {
    /// A scope with no provider above it.
    pub fn root() -> Self {
        Self::default()
    }

    /// A nested scope. It sees the same provider as its parent.
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Whether a mounted provider is above this scope, i.e. whether
    /// [`use_theme`] would succeed here.
    pub fn has_provider(&self) -> bool {
        self.provider
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|shared| shared.phase() == Phase::Settled)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("has_provider", &self.has_provider())
            .finish()
    }
}

/// Gets the theme context for a consumer at `scope`.
///
/// # Errors
///
/// Returns [`ThemeError::MissingProvider`] when `scope` is not a descendant
/// of a mounted provider. This is a programming error to fix, not a
/// condition to recover from.
pub fn use_theme(scope: &Scope) -> Result<ThemeContext, ThemeError> {
    let shared = scope
        .provider
        .as_ref()
        .and_then(Weak::upgrade)
        .ok_or(ThemeError::MissingProvider)?;
    if shared.phase() != Phase::Settled {
        return Err(ThemeError::MissingProvider);
    }
    Ok(ThemeContext { shared })
}

/// Read, update and query access to a mounted provider.
///
/// Cheap to clone. A context may outlive its provider; once the provider
/// has unmounted every operation fails with [`ThemeError::MissingProvider`].
#[derive(Clone)]
pub struct ThemeContext {
    shared: Rc<Shared>,
}

impl ThemeContext {
    fn settled(&self) -> Result<&Shared, ThemeError> {
        match self.shared.phase() {
            Phase::Settled => Ok(&self.shared),
            phase => {
                tracing::warn!(?phase, "theme context used outside a mounted provider");
                Err(ThemeError::MissingProvider)
            }
        }
    }

    /// Current stated preference.
    pub fn theme(&self) -> Result<Theme, ThemeError> {
        Ok(self.settled()?.theme())
    }

    /// Current effective appearance, resolved now.
    pub fn appearance(&self) -> Result<Appearance, ThemeError> {
        let shared = self.settled()?;
        Ok(resolve(shared.theme().mode, shared.probe()))
    }

    /// Whether `mode` (or the current mode when `None`) renders dark.
    ///
    /// A pure query: state, storage and document are untouched.
    pub fn is_dark_mode(&self, mode: Option<Mode>) -> Result<bool, ThemeError> {
        let shared = self.settled()?;
        let mode = mode.unwrap_or_else(|| shared.theme().mode);
        Ok(resolve(mode, shared.probe()).is_dark())
    }

    /// Merges `patch` into the current theme, applies the result and persists
    /// both fields.
    ///
    /// An empty patch still applies and re-persists the unchanged pair, so
    /// storage always holds a complete pair afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MissingProvider`] once the provider has
    /// unmounted. Nothing is applied or persisted in that case.
    pub fn set_theme(&self, patch: impl Into<ThemePatch>) -> Result<(), ThemeError> {
        let shared = self.settled()?;
        let theme = {
            let mut state = shared.state.borrow_mut();
            state.theme = state.theme.merge(patch.into());
            state.theme
        };

        let appearance = resolve(theme.mode, shared.probe());
        apply(&shared.document, theme.accent, appearance);
        shared.store.save(&theme);
        tracing::debug!(accent = %theme.accent, mode = %theme.mode, %appearance, "theme updated");
        shared.notify(ThemeChange { theme, appearance });
        Ok(())
    }

    /// [`set_theme`](Self::set_theme) for untyped callers.
    ///
    /// Unknown tokens are replaced by the configured defaults rather than
    /// rejected.
    pub fn set_theme_raw(
        &self,
        accent: Option<&str>,
        mode: Option<&str>,
    ) -> Result<(), ThemeError> {
        let shared = self.settled()?;
        let patch = ThemePatch::from_raw(accent, mode, &shared.config.default_theme);
        self.set_theme(patch)
    }

    /// Registers `listener` to run after every accepted change.
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId, ThemeError>
    where
        F: Fn(&ThemeChange) + 'static,
    {
        let shared = self.settled()?;
        let id = SubscriptionId(shared.next_id.get());
        shared.next_id.set(id.0 + 1);
        shared.listeners.borrow_mut().push((id, Rc::new(listener)));
        Ok(id)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.shared.config
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.shared.theme())
            .field("phase", &self.shared.phase())
            .finish()
    }
}
