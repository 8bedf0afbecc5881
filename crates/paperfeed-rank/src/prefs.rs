//! Persisted keyword and author preferences.
//!
//! Preferences live in a string key-value store under two keys, each holding a
//! JSON-encoded array of strings. Reading never fails: a missing key is an empty list and
//! a malformed value is logged and treated as empty.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Store key of the preferred keyword list.
pub const KEYWORDS_KEY: &str = "preferredKeywords";
/// Store key of the preferred author list.
pub const AUTHORS_KEY: &str = "preferredAuthors";

/// Errors from changing or persisting preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Writing the store failed.
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        /// Store file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Encoding a value failed.
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    /// The term was blank.
    #[error("preference terms must not be empty")]
    EmptyTerm,

    /// The term is already saved.
    #[error("\"{0}\" is already saved")]
    Duplicate(String),

    /// The term is not saved.
    #[error("\"{0}\" is not saved")]
    NotFound(String),
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError>;

    /// Deletes a value. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PrefsError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored values.
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object of key to string value.
///
/// Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// File location.
    path: PathBuf,
    /// Current contents.
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty store; the latter two are
    /// logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), "ignoring malformed preference file: {e}");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), "cannot read preference file: {e}");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the whole store, creating parent directories.
    fn save(&self) -> Result<(), PrefsError> {
        let write_err = |source| PrefsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents).map_err(write_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// Saved keywords and authors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordPreferences {
    /// Saved keywords, in the order they were added.
    pub keywords: Vec<String>,
    /// Saved authors, in the order they were added.
    pub authors: Vec<String>,
}

/// Which saved list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum List {
    /// Keywords.
    Keywords,
    /// Authors.
    Authors,
}

impl List {
    /// Store key of the list.
    fn key(self) -> &'static str {
        match self {
            Self::Keywords => KEYWORDS_KEY,
            Self::Authors => AUTHORS_KEY,
        }
    }
}

/// Preferences backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct PreferenceStore<S> {
    /// Backing store.
    store: S,
    /// Loaded preferences.
    prefs: KeywordPreferences,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Loads preferences from `store`.
    pub fn load(store: S) -> Self {
        let prefs = KeywordPreferences {
            keywords: read_list(&store, KEYWORDS_KEY),
            authors: read_list(&store, AUTHORS_KEY),
        };
        Self { store, prefs }
    }

    /// Current preferences.
    pub fn preferences(&self) -> &KeywordPreferences {
        &self.prefs
    }

    /// Saved keywords.
    pub fn keywords(&self) -> &[String] {
        &self.prefs.keywords
    }

    /// Saved authors.
    pub fn authors(&self) -> &[String] {
        &self.prefs.authors
    }

    /// Adds and persists a keyword.
    pub fn add_keyword(&mut self, keyword: &str) -> Result<(), PrefsError> {
        self.add(List::Keywords, keyword)
    }

    /// Removes and persists a keyword.
    pub fn remove_keyword(&mut self, keyword: &str) -> Result<(), PrefsError> {
        self.remove(List::Keywords, keyword)
    }

    /// Adds and persists an author.
    pub fn add_author(&mut self, author: &str) -> Result<(), PrefsError> {
        self.add(List::Authors, author)
    }

    /// Removes and persists an author.
    pub fn remove_author(&mut self, author: &str) -> Result<(), PrefsError> {
        self.remove(List::Authors, author)
    }

    /// Clears both lists and deletes their keys.
    pub fn reset(&mut self) -> Result<(), PrefsError> {
        self.store.remove(KEYWORDS_KEY)?;
        self.prefs.keywords.clear();
        self.store.remove(AUTHORS_KEY)?;
        self.prefs.authors.clear();
        Ok(())
    }

    /// One of the saved lists.
    fn list(&self, list: List) -> &[String] {
        match list {
            List::Keywords => &self.prefs.keywords,
            List::Authors => &self.prefs.authors,
        }
    }

    /// Adds a trimmed, non-empty, new term and persists the list.
    fn add(&mut self, list: List, term: &str) -> Result<(), PrefsError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(PrefsError::EmptyTerm);
        }
        if self.list(list).iter().any(|t| t == term) {
            return Err(PrefsError::Duplicate(term.to_string()));
        }
        let mut entries = self.list(list).to_vec();
        entries.push(term.to_string());
        self.commit(list, entries)
    }

    /// Removes a term and persists the list.
    fn remove(&mut self, list: List, term: &str) -> Result<(), PrefsError> {
        let term = term.trim();
        let pos = self
            .list(list)
            .iter()
            .position(|t| t == term)
            .ok_or_else(|| PrefsError::NotFound(term.to_string()))?;
        let mut entries = self.list(list).to_vec();
        entries.remove(pos);
        self.commit(list, entries)
    }

    /// Persists `entries` as one list, replacing the loaded list only once the write succeeds.
    fn commit(&mut self, list: List, entries: Vec<String>) -> Result<(), PrefsError> {
        let encoded = serde_json::to_string(&entries)?;
        self.store.set(list.key(), encoded)?;
        match list {
            List::Keywords => self.prefs.keywords = entries,
            List::Authors => self.prefs.authors = entries,
        }
        Ok(())
    }
}

/// Reads a JSON string array, treating anything unreadable as empty.
fn read_list(store: &impl KeyValueStore, key: &str) -> Vec<String> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(key, "ignoring malformed stored preference: {e}");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_are_empty() {
        let prefs = PreferenceStore::load(MemoryStore::new());
        assert!(prefs.keywords().is_empty());
        assert!(prefs.authors().is_empty());
    }

    #[test]
    fn test_malformed_value_is_empty() {
        let mut store = MemoryStore::new();
        store.set(KEYWORDS_KEY, "{not json".into()).unwrap();
        store.set(AUTHORS_KEY, r#"["Hinton"]"#.into()).unwrap();
        let prefs = PreferenceStore::load(store);
        assert!(prefs.keywords().is_empty());
        assert_eq!(prefs.authors(), ["Hinton"]);
    }

    #[test]
    fn test_add_remove_persist() {
        let mut prefs = PreferenceStore::load(MemoryStore::new());
        prefs.add_keyword(" llm ").unwrap();
        prefs.add_keyword("agents").unwrap();
        assert!(matches!(
            prefs.add_keyword("llm"),
            Err(PrefsError::Duplicate(_))
        ));
        assert!(matches!(prefs.add_author("  "), Err(PrefsError::EmptyTerm)));
        prefs.remove_keyword("agents").unwrap();
        assert!(matches!(
            prefs.remove_author("nobody"),
            Err(PrefsError::NotFound(_))
        ));

        assert_eq!(
            prefs.store.get(KEYWORDS_KEY).as_deref(),
            Some(r#"["llm"]"#)
        );
    }

    #[test]
    fn test_reset_clears_store() {
        let mut prefs = PreferenceStore::load(MemoryStore::new());
        prefs.add_keyword("llm").unwrap();
        prefs.add_author("Hinton").unwrap();
        prefs.reset().unwrap();
        assert_eq!(prefs.preferences(), &KeywordPreferences::default());
        assert!(prefs.store.get(AUTHORS_KEY).is_none());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prefs.json");

        let mut prefs = PreferenceStore::load(JsonFileStore::open(&path));
        prefs.add_keyword("diffusion").unwrap();
        prefs.add_author("Ho").unwrap();

        let reopened = PreferenceStore::load(JsonFileStore::open(&path));
        assert_eq!(reopened.keywords(), ["diffusion"]);
        assert_eq!(reopened.authors(), ["Ho"]);
    }

    #[test]
    fn test_malformed_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = JsonFileStore::open(&path);
        assert!(store.get(KEYWORDS_KEY).is_none());
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), PrefsError> {
            Err(PrefsError::Write {
                path: PathBuf::from("prefs.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), PrefsError> {
            Err(PrefsError::Write {
                path: PathBuf::from("prefs.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_failed_write_leaves_lists_unchanged() {
        let mut store = MemoryStore::new();
        store.set(KEYWORDS_KEY, r#"["llm"]"#.into()).unwrap();
        let mut prefs = PreferenceStore::load(ReadOnlyStore(store));

        assert!(matches!(
            prefs.add_keyword("agents"),
            Err(PrefsError::Write { .. })
        ));
        assert!(matches!(
            prefs.remove_keyword("llm"),
            Err(PrefsError::Write { .. })
        ));
        assert!(prefs.reset().is_err());
        assert_eq!(prefs.keywords(), ["llm"]);
    }
}
