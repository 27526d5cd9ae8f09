//! Persistent tag store
//!
//! Tags live in a single JSON document mapping normalized absolute paths to
//! ordered lists of distinct tag strings. Every mutating call rewrites the
//! whole document before returning (write-through, no batching), because the
//! process may be killed between user actions without a separate flush step.
//! The in-memory map is authoritative for the running session: a failed
//! write is reported but never rolled back.

pub mod error;

pub use error::StoreError;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default document name, stored in the user's home directory
pub const TAGS_FILE: &str = ".tags.json";

/// Durable mapping from normalized path to its ordered set of tags
///
/// Invariants: no duplicate tag within one path's list, and a path with an
/// empty list is never kept - the key is removed instead.
#[derive(Debug)]
pub struct TagStore {
    storage_path: PathBuf,
    tags: BTreeMap<String, Vec<String>>,
    /// Bumped on every in-memory change; lets derived views detect writes
    /// from other readers of a shared store without polling the document
    version: u64,
}

impl TagStore {
    /// Default document location: `.tags.json` in the home directory
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TAGS_FILE)
    }

    /// Create an empty store that will persist to `storage_path`
    #[must_use]
    pub fn empty(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            tags: BTreeMap::new(),
            version: 0,
        }
    }

    /// Load the store from its JSON document.
    ///
    /// A missing file yields an empty store. A document that exists but
    /// cannot be read or parsed also yields an empty store, paired with the
    /// warning so the caller can report it - the session never refuses to
    /// start over a bad tag file.
    pub fn load(storage_path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let storage_path = storage_path.into();

        let raw = match fs::read_to_string(&storage_path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return (Self::empty(storage_path), None);
            }
            Err(source) => {
                let warning = StoreError::Read {
                    path: storage_path.clone(),
                    source,
                };
                return (Self::empty(storage_path), Some(warning));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tags) => (
                Self {
                    storage_path,
                    tags,
                    version: 0,
                },
                None,
            ),
            Err(source) => {
                let warning = StoreError::Corrupt {
                    path: storage_path.clone(),
                    source,
                };
                (Self::empty(storage_path), Some(warning))
            }
        }
    }

    /// Document this store persists to
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Tags attached to `path`, empty if none
    #[must_use]
    pub fn get(&self, path: &Path) -> &[String] {
        self.tags
            .get(&normalize_path(path))
            .map_or(&[], Vec::as_slice)
    }

    /// Attach `tag` to `path`. No-op (and no write) if already present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the document could not be written;
    /// the in-memory state keeps the new tag regardless.
    pub fn add(&mut self, path: &Path, tag: &str) -> Result<(), StoreError> {
        let key = normalize_path(path);
        let entry = self.tags.entry(key).or_default();
        if entry.iter().any(|existing| existing == tag) {
            return Ok(());
        }
        entry.push(tag.to_string());
        self.version += 1;
        self.persist()
    }

    /// Detach `tag` from `path`. No-op (and no write) if absent. Removes the
    /// path key entirely when its last tag goes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the document could not be written;
    /// the in-memory removal stands regardless.
    pub fn remove(&mut self, path: &Path, tag: &str) -> Result<(), StoreError> {
        let key = normalize_path(path);
        let Some(entry) = self.tags.get_mut(&key) else {
            return Ok(());
        };
        let Some(position) = entry.iter().position(|existing| existing == tag) else {
            return Ok(());
        };
        entry.remove(position);
        if entry.is_empty() {
            self.tags.remove(&key);
        }
        self.version += 1;
        self.persist()
    }

    /// Replace the tags on `path` wholesale. An empty list deletes the key.
    /// Duplicates in `tags` are dropped, keeping first occurrence order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the document could not be written;
    /// the in-memory replacement stands regardless.
    pub fn set(&mut self, path: &Path, tags: Vec<String>) -> Result<(), StoreError> {
        let key = normalize_path(path);
        if tags.is_empty() {
            self.tags.remove(&key);
        } else {
            let mut distinct: Vec<String> = Vec::with_capacity(tags.len());
            for tag in tags {
                if !distinct.contains(&tag) {
                    distinct.push(tag);
                }
            }
            self.tags.insert(key, distinct);
        }
        self.version += 1;
        self.persist()
    }

    /// Every tag in the store with the number of paths carrying it,
    /// sorted by tag
    #[must_use]
    pub fn all_tags(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tags in self.tags.values() {
            for tag in tags {
                *counts.entry(tag).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }

    /// Monotonic change counter; advances on every in-memory mutation
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of paths carrying at least one tag
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let document = serde_json::to_string_pretty(&self.tags).map_err(|source| {
            StoreError::Persist {
                path: self.storage_path.clone(),
                source: std::io::Error::other(source),
            }
        })?;
        fs::write(&self.storage_path, document).map_err(|source| StoreError::Persist {
            path: self.storage_path.clone(),
            source,
        })
    }
}

/// Lexically normalize a path: resolve `.` and `..` components and render
/// with the OS-native separator. Purely textual - the filesystem is never
/// consulted, so the path does not have to exist.
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    // relative path climbing above its start keeps the `..`
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized.display().to_string()
}
