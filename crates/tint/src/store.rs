//! Preference persistence.
//!
//! [`StorageMedium`] is the raw string key-value capability (browser
//! `localStorage`, a JSON file, memory). [`PreferenceStore`] wraps a medium
//! with the two keys a theme occupies and never lets a medium failure escape:
//! failed reads behave as absent, failed writes are dropped. The preference
//! simply does not survive a reload in that case.
//!
//! The store does not validate what it reads. [`PreferenceStore::load`] is
//! where raw values are checked against the enumerations.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::{ThemeConfig, DEFAULT_ACCENT_KEY, DEFAULT_MODE_KEY};
use crate::error::StorageError;
use crate::theme::{Accent, DefaultTheme, Mode, Theme};

/// Abstraction over a persistent string key-value store.
///
/// Methods take `&self`: the media this models (browser storage, files) are
/// shared, externally owned resources.
pub trait StorageMedium {
    /// Returns the stored value, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: StorageMedium + ?Sized> StorageMedium for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: StorageMedium + ?Sized> StorageMedium for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// === Media ===

/// In-memory storage.
///
/// Clones share the same entries, so a test can hand one clone to a provider
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Raw value under `key`, bypassing the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageMedium for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that refuses every operation, like a browser with storage disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl StorageMedium for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::unavailable("storage is disabled"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::unavailable("storage is disabled"))
    }
}

/// Storage backed by a JSON object in a file.
///
/// A missing file reads as empty and is created on first write, along with
/// its parent directories. A file that is not a JSON object of strings is
/// reported as [`StorageError::Corrupt`] and is never overwritten.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|err| {
            StorageError::Corrupt(format!("{}: {}", self.path.display(), err))
        })
    }
}

impl StorageMedium for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

// === Preference store ===

/// The two persisted theme fields on top of a [`StorageMedium`].
#[derive(Debug, Clone)]
pub struct PreferenceStore<M> {
    medium: M,
    accent_key: String,
    mode_key: String,
}

impl<M: StorageMedium> PreferenceStore<M> {
    /// Uses the default keys, `theme-color` and `theme-mode`.
    pub fn new(medium: M) -> Self {
        Self::with_keys(medium, DEFAULT_ACCENT_KEY, DEFAULT_MODE_KEY)
    }

    pub fn with_keys(medium: M, accent_key: impl Into<String>, mode_key: impl Into<String>) -> Self {
        Self {
            medium,
            accent_key: accent_key.into(),
            mode_key: mode_key.into(),
        }
    }

    /// Uses the keys named in `config`.
    pub fn from_config(medium: M, config: &ThemeConfig) -> Self {
        Self::with_keys(medium, config.accent_key.clone(), config.mode_key.clone())
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn accent_key(&self) -> &str {
        &self.accent_key
    }

    pub fn mode_key(&self) -> &str {
        &self.mode_key
    }

    /// Raw stored value. `None` when never set or when storage fails.
    pub fn read(&self, key: &str) -> Option<String> {
        match self.medium.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(key, %err, "preference read failed, treating as absent");
                None
            }
        }
    }

    /// Best-effort write. Failures are logged at `warn` and dropped: the
    /// change still shows, but it will not survive a reload.
    pub fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.medium.set(key, value) {
            tracing::warn!(key, %err, "preference write failed, not persisted");
        }
    }

    /// Reads the persisted theme, validating each field on its own.
    ///
    /// A field that is absent, unreadable or not a known token takes the
    /// matching field of `defaults`.
    pub fn load(&self, defaults: &DefaultTheme) -> Theme {
        let accent = match self.read(&self.accent_key) {
            Some(raw) => raw.parse::<Accent>().unwrap_or_else(|err| {
                tracing::debug!(%err, "persisted accent discarded");
                defaults.accent()
            }),
            None => defaults.accent(),
        };
        let mode = match self.read(&self.mode_key) {
            Some(raw) => raw.parse::<Mode>().unwrap_or_else(|err| {
                tracing::debug!(%err, "persisted mode discarded");
                defaults.mode()
            }),
            None => defaults.mode(),
        };
        Theme::new(accent, mode)
    }

    /// Persists both fields of `theme`.
    pub fn save(&self, theme: &Theme) {
        self.write(&self.accent_key, theme.accent.as_str());
        self.write(&self.mode_key, theme.mode.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn memory_storage_shares_entries_between_clones() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();
        storage.set("k", "v").unwrap();
        assert_eq!(observer.value("k"), Some("v".to_string()));
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn read_absent_key() {
        let store = PreferenceStore::new(MemoryStorage::new());
        assert_eq!(store.read("theme-color"), None);
    }

    #[test]
    fn read_does_not_validate() {
        let store = PreferenceStore::new(MemoryStorage::new().with_entry("theme-color", "teal"));
        assert_eq!(store.read("theme-color"), Some("teal".to_string()));
    }

    #[test]
    #[traced_test]
    fn unavailable_storage_reads_absent_and_swallows_writes() {
        let store = PreferenceStore::new(UnavailableStorage);
        assert_eq!(store.read("theme-color"), None);
        store.write("theme-color", "rose");
        store.save(&Theme::new(Accent::Rose, Mode::Dark));
        assert!(logs_contain("preference write failed"));
    }

    #[test]
    #[traced_test]
    fn failed_write_to_corrupt_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ broken").unwrap();

        PreferenceStore::new(FileStorage::new(&path)).save(&Theme::new(Accent::Rose, Mode::Dark));

        assert!(logs_contain("WARN"));
        assert!(logs_contain("preference write failed, not persisted"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }

    #[test]
    fn load_uses_defaults_when_empty() {
        let store = PreferenceStore::new(MemoryStorage::new());
        let defaults = DefaultTheme::new().with_accent("green").with_mode("light");
        assert_eq!(store.load(&defaults), Theme::new(Accent::Green, Mode::Light));
    }

    #[test]
    fn load_validates_fields_independently() {
        let storage = MemoryStorage::new()
            .with_entry("theme-color", "nonexistent-color")
            .with_entry("theme-mode", "dark");
        let store = PreferenceStore::new(storage);
        let defaults = DefaultTheme::new().with_accent("blue");
        assert_eq!(store.load(&defaults), Theme::new(Accent::Blue, Mode::Dark));
    }

    #[test]
    fn save_writes_both_keys() {
        let storage = MemoryStorage::new();
        let store = PreferenceStore::new(storage.clone());
        store.save(&Theme::new(Accent::Yellow, Mode::System));
        assert_eq!(storage.value("theme-color"), Some("yellow".to_string()));
        assert_eq!(storage.value("theme-mode"), Some("system".to_string()));
    }

    #[test]
    fn custom_keys() {
        let storage = MemoryStorage::new();
        let config = ThemeConfig::new().with_keys("a", "m");
        let store = PreferenceStore::from_config(storage.clone(), &config);
        store.save(&Theme::new(Accent::Red, Mode::Light));
        assert_eq!(storage.value("a"), Some("red".to_string()));
        assert_eq!(storage.value("m"), Some("light".to_string()));
        assert_eq!(storage.value("theme-color"), None);
    }

    #[test]
    fn file_storage_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));
        assert_eq!(storage.get("theme-color").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FileStorage::new(&path).set("theme-color", "rose").unwrap();
        FileStorage::new(&path).set("theme-mode", "dark").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("theme-color").unwrap(), Some("rose".to_string()));
        assert_eq!(reopened.get("theme-mode").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn file_storage_corrupt_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("k"), Err(StorageError::Corrupt(_))));
        assert!(storage.set("k", "v").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");

        let store = PreferenceStore::new(storage);
        assert_eq!(store.load(&DefaultTheme::new()), Theme::default());
    }
}
