//! Stable name ordering over an entry source

use std::path::{Path, PathBuf};

use super::ViewLayer;
use crate::source::{Entry, EntrySource, SourceError};

/// Presents the children of one directory in ascending effective-name order.
///
/// The comparison is case-insensitive on the effective name with ties broken
/// by raw name, which keeps the order total and deterministic even when a
/// disabled entry shares its effective name with a differently-cased
/// sibling. Re-sorts eagerly whenever [`refresh`](ViewLayer::refresh) runs,
/// which the owning session triggers on every relevant change notification.
pub struct SortLayer<S: EntrySource> {
    source: S,
    dir: PathBuf,
    /// Snapshot of the source listing, in source order
    entries: Vec<Entry>,
    /// row -> source index
    order: Vec<usize>,
    /// source index -> row
    inverse: Vec<usize>,
    error: Option<SourceError>,
}

impl<S: EntrySource> SortLayer<S> {
    /// Create a layer over `source`, observing `dir`, sorted immediately
    pub fn new(source: S, dir: impl Into<PathBuf>) -> Self {
        let mut layer = Self {
            source,
            dir: dir.into(),
            entries: Vec::new(),
            order: Vec::new(),
            inverse: Vec::new(),
            error: None,
        };
        layer.refresh();
        layer
    }

    /// Directory this layer observes
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Point the layer at another directory and re-sort
    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dir = dir.into();
        self.refresh();
    }

    /// The listing failure behind the current (empty) snapshot, if any
    #[must_use]
    pub const fn last_error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    /// The source this layer reads from
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S: EntrySource> ViewLayer for SortLayer<S> {
    fn row_count(&self) -> usize {
        self.order.len()
    }

    fn map_to_source(&self, row: usize) -> Option<usize> {
        self.order.get(row).copied()
    }

    fn map_from_source(&self, source_row: usize) -> Option<usize> {
        self.inverse.get(source_row).copied()
    }

    fn entry_at(&self, row: usize) -> Option<&Entry> {
        self.map_to_source(row).and_then(|index| self.entries.get(index))
    }

    fn row_of_path(&self, path: &Path) -> Option<usize> {
        let index = self.entries.iter().position(|entry| entry.path == path)?;
        self.map_from_source(index)
    }

    fn invalidate(&mut self) {
        // sorting has no lazy state; an invalidation is a re-sort
        self.refresh();
    }

    fn refresh(&mut self) {
        match self.source.children(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(error) => {
                self.entries = Vec::new();
                self.error = Some(error);
            }
        }

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (left, right) = (&self.entries[a], &self.entries[b]);
            left.effective_name()
                .to_lowercase()
                .cmp(&right.effective_name().to_lowercase())
                .then_with(|| left.raw_name.cmp(&right.raw_name))
        });

        let mut inverse = vec![0; order.len()];
        for (row, &index) in order.iter().enumerate() {
            inverse[index] = row;
        }

        self.order = order;
        self.inverse = inverse;
    }
}
