//! # Tint - Appearance Preferences Without the Flash
//!
//! `tint` keeps track of a user's color accent and light/dark/system mode,
//! persists the choice, and applies it to a document root as class tokens
//! plus a `color-scheme` hint. The same rules run twice: once before the
//! interactive program starts (so the first paint is already right) and
//! again when the provider mounts (so later changes stay in sync).
//!
//! ## Core Concepts
//!
//! - [`Theme`]: the stated preference, an [`Accent`] plus a [`Mode`]
//! - [`Appearance`]: what is rendered, with [`Mode::System`] resolved
//! - [`PreferenceStore`]: the two persisted fields over a [`StorageMedium`]
//! - [`resolve`]: mode + [`AppearanceProbe`] to appearance, never failing
//! - [`apply`]: full reset-then-set of the [`DocumentRoot`] tokens
//! - [`boot`] / [`PrebootScript`]: the early pass, native or inline script
//! - [`ThemeProvider`] / [`use_theme`]: state holder and consumer access
//!
//! ## Quick Start
//!
//! ```rust
//! use tint::{
//!     boot, use_theme, Accent, FixedProbe, MemoryDocument, MemoryStorage, Mode,
//!     PreferenceStore, ThemeConfig, ThemePatch, ThemeProvider,
//! };
//!
//! let config = ThemeConfig::default();
//! let storage = MemoryStorage::new();
//! let doc = MemoryDocument::new();
//!
//! // Before first paint.
//! let store = PreferenceStore::from_config(storage.clone(), &config);
//! boot(&store, &config.default_theme, Some(&FixedProbe(true)), &doc);
//! assert!(doc.has_class("slate") && doc.has_class("dark"));
//!
//! // Once the program is up.
//! let provider = ThemeProvider::builder()
//!     .config(config)
//!     .storage(storage)
//!     .probe(FixedProbe(true))
//!     .document(doc.clone())
//!     .build();
//! provider.mount();
//!
//! let ctx = use_theme(&provider.scope()).unwrap();
//! ctx.set_theme(ThemePatch::new().accent(Accent::Rose).mode(Mode::Light)).unwrap();
//! assert!(doc.has_class("rose") && doc.has_class("light"));
//! ```
//!
//! ## Server-Rendered Pages
//!
//! Pages that must act before any script bundle loads embed the preboot
//! pass inline:
//!
//! ```rust
//! use tint::{PrebootScript, ThemeConfig};
//!
//! let head = PrebootScript::new(&ThemeConfig::default()).render_tag().unwrap();
//! assert!(head.starts_with("<script>"));
//! ```
//!
//! ## Failure Handling
//!
//! Storage failures, unknown tokens and probe failures never surface; they
//! degrade to "absent", "default" and "light" respectively. The only error a
//! consumer sees is [`ThemeError::MissingProvider`], from [`use_theme`]
//! outside a mounted provider or from a [`ThemeContext`] used after its
//! provider unmounted.

pub mod apply;
pub mod config;
mod error;
pub mod preboot;
pub mod provider;
pub mod resolve;
pub mod store;
pub mod theme;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Error types
pub use error::{ParseAccentError, ParseModeError, ProbeError, StorageError, ThemeError};

// Model
pub use theme::{Accent, Appearance, DefaultTheme, Mode, Theme, ThemePatch};

// Configuration
pub use config::{ThemeConfig, DEFAULT_ACCENT_KEY, DEFAULT_MODE_KEY};

// Capabilities and their implementations
pub use apply::{apply, managed_tokens, DocumentRoot, DocumentSnapshot, MemoryDocument};
#[cfg(not(target_arch = "wasm32"))]
pub use resolve::OsProbe;
pub use resolve::{
    is_dark, resolve, AppearanceProbe, FailingProbe, FixedProbe, APPEARANCE_ENV_VAR,
    PREFERS_DARK_QUERY,
};
pub use store::{FileStorage, MemoryStorage, PreferenceStore, StorageMedium, UnavailableStorage};

// Preboot and provider
pub use preboot::{boot, BootOutcome, PrebootScript};
pub use provider::{
    use_theme, Phase, Scope, SubscriptionId, ThemeChange, ThemeContext, ThemeProvider,
    ThemeProviderBuilder,
};
