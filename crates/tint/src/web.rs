//! Browser implementations of the capabilities, via `web-sys`.
//!
//! Only compiled on `wasm32` targets. Every lookup of `window`, `document` or
//! `localStorage` is made per call and any failure degrades the way the rest
//! of the crate expects: storage errors are reported to the store (which
//! swallows them), probe errors to the resolver (which falls back to light),
//! and document errors are ignored.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, Storage};

use crate::apply::DocumentRoot;
use crate::config::ThemeConfig;
use crate::error::{ProbeError, StorageError};
use crate::preboot::{boot, BootOutcome};
use crate::provider::ThemeProvider;
use crate::resolve::{AppearanceProbe, PREFERS_DARK_QUERY};
use crate::store::{PreferenceStore, StorageMedium};
use crate::theme::Appearance;

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::unavailable("no window"))?;
        window
            .local_storage()
            .map_err(|err| StorageError::unavailable(describe(&err)))?
            .ok_or_else(|| StorageError::unavailable("localStorage is disabled"))
    }
}

impl StorageMedium for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::unavailable(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::unavailable(describe(&err)))
    }
}

/// `window.matchMedia("(prefers-color-scheme: dark)")`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MediaQueryProbe;

impl AppearanceProbe for MediaQueryProbe {
    fn prefers_dark(&self) -> Result<bool, ProbeError> {
        let window =
            web_sys::window().ok_or_else(|| ProbeError::Unsupported("no window".to_string()))?;
        let list = window
            .match_media(PREFERS_DARK_QUERY)
            .map_err(|err| ProbeError::Failed(describe(&err)))?
            .ok_or_else(|| ProbeError::Unsupported("matchMedia returned null".to_string()))?;
        Ok(list.matches())
    }
}

/// `document.documentElement`.
#[derive(Debug, Clone)]
pub struct HtmlRoot {
    element: Element,
}

impl HtmlRoot {
    /// The root element of the current document, if there is one.
    pub fn from_document() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self { element })
    }

    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl DocumentRoot for HtmlRoot {
    fn remove_class(&self, token: &str) {
        let _ = self.element.class_list().remove_1(token);
    }

    fn add_class(&self, token: &str) {
        let _ = self.element.class_list().add_1(token);
    }

    fn set_color_scheme(&self, scheme: Appearance) {
        if let Some(html) = self.element.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("color-scheme", scheme.as_str());
        }
    }
}

/// Runs the preboot pass against the live page.
///
/// Returns `None` outside a document.
pub fn boot_page(config: &ThemeConfig) -> Option<BootOutcome> {
    let root = HtmlRoot::from_document()?;
    let store = PreferenceStore::from_config(LocalStorage, config);
    Some(boot(
        &store,
        &config.default_theme,
        Some(&MediaQueryProbe),
        &root,
    ))
}

/// A provider wired to the live page, not yet mounted.
///
/// Returns `None` outside a document.
pub fn page_provider(config: ThemeConfig) -> Option<ThemeProvider> {
    let root = HtmlRoot::from_document()?;
    Some(
        ThemeProvider::builder()
            .config(config)
            .storage(LocalStorage)
            .probe(MediaQueryProbe)
            .document(root)
            .build(),
    )
}
