//! Writing an effective theme onto the document root.
//!
//! [`apply`] does a full reset-then-set on every call: it strips every
//! accent token and every mode token, whether present or not, then adds one
//! accent token, one of `dark`/`light`, and the matching color-scheme hint.
//! The result depends only on the arguments, so repeated calls converge and
//! a document polluted with stale tokens is cleaned up.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::theme::{Accent, Appearance, Mode};

/// The appearance-related surface of a document root element.
///
/// Methods take `&self`: a document is a shared, host-owned object.
pub trait DocumentRoot {
    /// Removes a class token. Removing an absent token is not an error.
    fn remove_class(&self, token: &str);

    /// Adds a class token. Adding a present token is not an error.
    fn add_class(&self, token: &str);

    /// Sets the `color-scheme` hint.
    fn set_color_scheme(&self, scheme: Appearance);
}

impl<T: DocumentRoot + ?Sized> DocumentRoot for Box<T> {
    fn remove_class(&self, token: &str) {
        (**self).remove_class(token)
    }

    fn add_class(&self, token: &str) {
        (**self).add_class(token)
    }

    fn set_color_scheme(&self, scheme: Appearance) {
        (**self).set_color_scheme(scheme)
    }
}

impl<T: DocumentRoot + ?Sized> DocumentRoot for &T {
    fn remove_class(&self, token: &str) {
        (**self).remove_class(token)
    }

    fn add_class(&self, token: &str) {
        (**self).add_class(token)
    }

    fn set_color_scheme(&self, scheme: Appearance) {
        (**self).set_color_scheme(scheme)
    }
}

/// Every class token this crate owns on the document root.
pub fn managed_tokens() -> impl Iterator<Item = &'static str> {
    Accent::tokens().chain(Mode::tokens())
}

/// Replaces the document's appearance tokens and color-scheme hint.
pub fn apply<D: DocumentRoot + ?Sized>(doc: &D, accent: Accent, appearance: Appearance) {
    for token in managed_tokens() {
        doc.remove_class(token);
    }
    doc.add_class(accent.as_str());
    doc.add_class(appearance.as_str());
    doc.set_color_scheme(appearance);
    tracing::trace!(%accent, %appearance, "applied theme to document");
}

// === In-memory document ===

/// Observable state of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSnapshot {
    pub classes: BTreeSet<String>,
    pub color_scheme: Option<Appearance>,
}

impl DocumentSnapshot {
    /// Accent tokens currently present.
    pub fn accents(&self) -> Vec<Accent> {
        self.classes.iter().filter_map(|c| c.parse().ok()).collect()
    }

    /// `dark`/`light` tokens currently present.
    pub fn appearances(&self) -> Vec<Appearance> {
        self.classes
            .iter()
            .filter_map(|c| match c.as_str() {
                "dark" => Some(Appearance::Dark),
                "light" => Some(Appearance::Light),
                _ => None,
            })
            .collect()
    }
}

/// A document root held in memory, for tests and headless hosts.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentSnapshot>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given class tokens already present.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let doc = Self::new();
        doc.state
            .borrow_mut()
            .classes
            .extend(classes.into_iter().map(Into::into));
        doc
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.borrow().clone()
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.state.borrow().classes.contains(token)
    }

    pub fn color_scheme(&self) -> Option<Appearance> {
        self.state.borrow().color_scheme
    }
}

impl DocumentRoot for MemoryDocument {
    fn remove_class(&self, token: &str) {
        self.state.borrow_mut().classes.remove(token);
    }

    fn add_class(&self, token: &str) {
        self.state.borrow_mut().classes.insert(token.to_string());
    }

    fn set_color_scheme(&self, scheme: Appearance) {
        self.state.borrow_mut().color_scheme = Some(scheme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_one_accent_and_one_appearance() {
        let doc = MemoryDocument::new();
        apply(&doc, Accent::Rose, Appearance::Dark);

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.accents(), vec![Accent::Rose]);
        assert_eq!(snapshot.appearances(), vec![Appearance::Dark]);
        assert_eq!(snapshot.color_scheme, Some(Appearance::Dark));
    }

    #[test]
    fn apply_cleans_contaminated_document() {
        let doc = MemoryDocument::with_classes([
            "zinc", "rose", "violet", "dark", "light", "system", "app-shell",
        ]);
        apply(&doc, Accent::Green, Appearance::Light);

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.accents(), vec![Accent::Green]);
        assert_eq!(snapshot.appearances(), vec![Appearance::Light]);
        assert!(!doc.has_class("system"));
        assert!(doc.has_class("app-shell"), "unrelated tokens are left alone");
    }

    #[test]
    fn apply_is_idempotent() {
        let doc = MemoryDocument::with_classes(["blue", "dark"]);
        apply(&doc, Accent::Stone, Appearance::Light);
        let once = doc.snapshot();
        apply(&doc, Accent::Stone, Appearance::Light);
        assert_eq!(doc.snapshot(), once);
    }

    #[test]
    fn apply_switches_appearance() {
        let doc = MemoryDocument::new();
        apply(&doc, Accent::Slate, Appearance::Dark);
        apply(&doc, Accent::Slate, Appearance::Light);
        assert!(!doc.has_class("dark"));
        assert!(doc.has_class("light"));
        assert_eq!(doc.color_scheme(), Some(Appearance::Light));
    }

    #[test]
    fn managed_tokens_cover_accents_and_modes() {
        let tokens: Vec<_> = managed_tokens().collect();
        assert_eq!(tokens.len(), 15);
        assert!(tokens.contains(&"violet"));
        assert!(tokens.contains(&"system"));
    }
}
