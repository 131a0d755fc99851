//! String key-value persistence.
//!
//! SOFA persists three string values (home address, current address and
//! the resume map). A single writer owns the store; every write replaces a
//! whole value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sofa_types::error::{Result, SofaError};

/// A local string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Ephemeral store backed by a `BTreeMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// Store persisted as one JSON object in a file.
///
/// Every mutation rewrites the whole file through a sibling temp file and a
/// rename, so a failed write leaves the previous file untouched.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt store {}: {e}", path.display());
                    BTreeMap::new()
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read store {}: {e}", path.display());
                BTreeMap::new()
            },
        };
        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            SofaError::Store(format!("cannot replace {}: {e}", self.path.display()))
        })
    }

    /// Apply `mutate` to a copy of the entries and keep it only if the
    /// flush succeeds.
    fn commit(&mut self, mutate: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut next = self.entries.clone();
        mutate(&mut next);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.commit(|entries| {
            entries.remove(key);
        })
    }
}
