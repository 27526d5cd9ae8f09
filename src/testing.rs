//! Testing utilities for modpane
//!
//! Provides an in-memory entry source for exercising view layers without a
//! real file system, plus a helper for a tag store persisting into its own
//! temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::source::{Entry, EntrySource, SourceError};
use crate::tags::TagStore;

/// Build a plain file entry under `dir`
#[must_use]
pub fn entry(dir: &str, name: &str) -> Entry {
    Entry {
        path: Path::new(dir).join(name),
        raw_name: name.to_string(),
        is_dir: false,
        size: 0,
        modified: None,
    }
}

/// In-memory entry source backed by a shared map of directory listings
///
/// Cloning (or taking a [`handle`](Self::handle)) shares the listings, so a
/// test can mutate the "file system" while a layer holds the source.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    dirs: Rc<RefCell<HashMap<PathBuf, Vec<Entry>>>>,
}

impl VecSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with one directory populated by plain files named `names`
    #[must_use]
    pub fn with_names(dir: &str, names: &[&str]) -> Self {
        let source = Self::new();
        source.dirs.borrow_mut().insert(
            PathBuf::from(dir),
            names.iter().map(|name| entry(dir, name)).collect(),
        );
        source
    }

    /// A handle for mutating the listings after the source has been moved
    /// into a layer
    #[must_use]
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Add a plain file to a directory's listing
    pub fn insert(&self, dir: &str, name: &str) {
        self.dirs
            .borrow_mut()
            .entry(PathBuf::from(dir))
            .or_default()
            .push(entry(dir, name));
    }

    /// Drop an entry from a directory's listing
    pub fn remove(&self, dir: &str, name: &str) {
        if let Some(entries) = self.dirs.borrow_mut().get_mut(Path::new(dir)) {
            entries.retain(|e| e.raw_name != name);
        }
    }

    /// Rename an entry in place, as a toggle would
    pub fn rename(&self, dir: &str, from: &str, to: &str) {
        if let Some(entries) = self.dirs.borrow_mut().get_mut(Path::new(dir))
            && let Some(found) = entries.iter_mut().find(|e| e.raw_name == from)
        {
            found.raw_name = to.to_string();
            found.path = Path::new(dir).join(to);
        }
    }
}

impl EntrySource for VecSource {
    fn children(&self, dir: &Path) -> Result<Vec<Entry>, SourceError> {
        self.dirs.borrow().get(dir).cloned().ok_or_else(|| {
            SourceError::ReadDir {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such test directory",
                ),
            }
        })
    }
}

/// Fresh shared tag store persisting into its own temporary directory.
/// Keep the returned `TempDir` alive for as long as the store mutates.
#[must_use]
pub fn shared_store() -> (Rc<RefCell<TagStore>>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = TagStore::empty(dir.path().join(".tags.json"));
    (Rc::new(RefCell::new(store)), dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{SortLayer, ViewLayer};

    #[test]
    fn test_vec_source_shared_mutation() {
        let source = VecSource::with_names("/m", &["a"]);
        let handle = source.handle();
        handle.insert("/m", "b");
        assert_eq!(source.children(Path::new("/m")).unwrap().len(), 2);

        handle.rename("/m", "a", "c");
        let names: Vec<String> = source
            .children(Path::new("/m"))
            .unwrap()
            .into_iter()
            .map(|e| e.raw_name)
            .collect();
        assert_eq!(names, ["c", "b"]);

        handle.remove("/m", "b");
        assert_eq!(source.children(Path::new("/m")).unwrap().len(), 1);
    }

    #[test]
    fn test_vec_source_unknown_dir_errors() {
        let source = VecSource::new();
        assert!(source.children(Path::new("/nope")).is_err());
    }

    #[test]
    fn test_vec_source_feeds_layers() {
        let layer = SortLayer::new(VecSource::with_names("/m", &["b", "a"]), "/m");
        assert_eq!(layer.row_count(), 2);
        assert_eq!(layer.entry_at(0).unwrap().raw_name, "a");
    }
}
