//! File-system entries and the source boundary
//!
//! [`EntrySource`] is the only part of the core that talks to a real file
//! system. It hands out [`Entry`] values materialized fresh from each query;
//! nothing above it may hold an `Entry` across a mutation, because change
//! notifications force the view layers to re-query.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::name;

/// Entry source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Listing a directory failed
    #[error("Could not read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One file-system object as seen through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute, OS-native path; unique within one source scope
    pub path: PathBuf,

    /// Literal on-disk base name
    pub raw_name: String,

    /// Whether the entry is a directory
    pub is_dir: bool,

    /// Size in bytes (0 for directories)
    pub size: u64,

    /// Last modified time, when the file system reports one
    pub modified: Option<SystemTime>,
}

impl Entry {
    /// Display name: the disable marker and boundary underscores removed
    #[must_use]
    pub fn effective_name(&self) -> &str {
        name::effective_name(&self.raw_name)
    }

    /// True iff the raw name carries the disable marker
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        name::is_disabled(&self.raw_name)
    }
}

/// A change reported under a watched directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// An entry appeared
    Inserted(PathBuf),
    /// An entry went away
    Removed(PathBuf),
    /// An entry changed its name in place
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    /// Check whether the change touches the listing of `dir`
    #[must_use]
    pub fn touches(&self, dir: &Path) -> bool {
        match self {
            Self::Inserted(path) | Self::Removed(path) => path.parent() == Some(dir),
            Self::Renamed { from, to } => {
                from.parent() == Some(dir) || to.parent() == Some(dir)
            }
        }
    }
}

/// Live hierarchical snapshot boundary: lists the children of a directory
///
/// The order of the returned sequence is unspecified; layers above re-order.
pub trait EntrySource {
    /// Children of `dir`, materialized fresh from the underlying storage
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the directory cannot be listed.
    fn children(&self, dir: &Path) -> Result<Vec<Entry>, SourceError>;
}

/// Real-filesystem source. Read-through: every call hits `read_dir`, no
/// caching, so a listing taken after a mutation is never stale.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEntrySource;

impl EntrySource for FsEntrySource {
    fn children(&self, dir: &Path) -> Result<Vec<Entry>, SourceError> {
        let read_dir = fs::read_dir(dir).map_err(|source| SourceError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for dirent in read_dir {
            let dirent = dirent.map_err(|source| SourceError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = dirent.path();
            let raw_name = dirent.file_name().to_string_lossy().into_owned();
            let metadata = dirent.metadata().ok();
            entries.push(Entry {
                raw_name,
                is_dir: metadata.as_ref().is_some_and(fs::Metadata::is_dir),
                size: metadata
                    .as_ref()
                    .map_or(0, |m| if m.is_dir() { 0 } else { m.len() }),
                modified: metadata.and_then(|m| m.modified().ok()),
                path,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_source_lists_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Foo"), b"abc").unwrap();
        fs::create_dir(dir.path().join("Sub")).unwrap();

        let entries = FsEntrySource.children(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let foo = entries.iter().find(|e| e.raw_name == "Foo").unwrap();
        assert!(!foo.is_dir);
        assert_eq!(foo.size, 3);
        assert!(foo.modified.is_some());

        let sub = entries.iter().find(|e| e.raw_name == "Sub").unwrap();
        assert!(sub.is_dir);
        assert_eq!(sub.size, 0);
    }

    #[test]
    fn test_fs_source_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsEntrySource.children(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, SourceError::ReadDir { .. }));
    }

    #[test]
    fn test_fs_source_is_read_through() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Foo"), b"x").unwrap();

        let before = FsEntrySource.children(dir.path()).unwrap();
        assert_eq!(before.len(), 1);

        fs::write(dir.path().join("Bar"), b"y").unwrap();
        let after = FsEntrySource.children(dir.path()).unwrap();
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_entry_state_helpers() {
        let entry = Entry {
            path: PathBuf::from("/m/DISABLED_Bar"),
            raw_name: "DISABLED_Bar".to_string(),
            is_dir: false,
            size: 0,
            modified: None,
        };
        assert!(entry.is_disabled());
        assert_eq!(entry.effective_name(), "Bar");
    }

    #[test]
    fn test_change_event_touches() {
        let dir = Path::new("/m");
        assert!(ChangeEvent::Inserted(PathBuf::from("/m/x")).touches(dir));
        assert!(!ChangeEvent::Inserted(PathBuf::from("/other/x")).touches(dir));
        assert!(
            ChangeEvent::Renamed {
                from: PathBuf::from("/other/x"),
                to: PathBuf::from("/m/x"),
            }
            .touches(dir)
        );
        assert!(!ChangeEvent::Removed(PathBuf::from("/m/sub/x")).touches(dir));
    }
}
