//! Persisted key/value preferences (`~/.config/vitrine/store.json`).
//!
//! The showcase keeps exactly two records: the display-mode preference and
//! the interest-counter blob. Both live in one JSON object file so a write
//! is always an atomic read-modify-write of the whole record set. Reads
//! that fail for any reason mean "no preference" and never surface to the
//! user.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Storage key for the persisted display mode (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";
/// Storage key for the interest-counter JSON blob.
pub const COUNTERS_KEY: &str = "productCounters";

const STORE_FILE: &str = "store.json";
const STORAGE_DIR_ENV: &str = "VITRINE_STORAGE_DIR";

/// Synchronous string key/value store, the page's persistence surface.
///
/// Injected into the components that persist state so tests can swap in
/// [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Resolve the storage directory path.
fn storage_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(STORAGE_DIR_ENV) {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    let home = env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config").join("vitrine"))
}

/// File-backed store holding all keys in a single JSON object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store rooted at an explicit directory.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(STORE_FILE),
        }
    }

    /// Store at the default location, if one can be resolved.
    pub fn open_default() -> Option<Self> {
        storage_dir().map(Self::at_dir)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    fn write_all(&self, records: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                debug!(dir = %parent.display(), %err, "storage: failed to create directory");
                return;
            }
        }
        let body = match serde_json::to_string_pretty(records) {
            Ok(body) => body,
            Err(err) => {
                debug!(%err, "storage: failed to encode records");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, body) {
            debug!(path = %self.path.display(), %err, "storage: failed to write");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut records = self.read_all();
        records.insert(key.to_string(), value.to_string());
        self.write_all(&records);
    }
}

/// In-memory store for tests and for sessions with no resolvable home.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.records.insert(key.to_string(), value.to_string());
    }
}
