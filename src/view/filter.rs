//! Search filtering over a sorted layer

use std::cell::{Ref, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::ViewLayer;
use crate::source::Entry;
use crate::tags::TagStore;

/// Presents the subsequence of an inner layer's rows whose effective name or
/// any attached tag contains the active search string (case-insensitive).
///
/// An empty search string keeps every row and skips tag lookups entirely.
/// The row mapping is memoized and recomputed lazily on the next access
/// after the search string, the scoped root, the tags or the inner layer
/// change - whole-mapping recomputation, no incremental updates, since
/// directory listings are small.
///
/// The memo records the tag store's change counter it was computed at, so a
/// tag write from any holder of the shared store (another pane included) is
/// picked up on this layer's next query without an explicit invalidation.
pub struct FilterLayer<L: ViewLayer> {
    inner: L,
    store: Rc<RefCell<TagStore>>,
    /// Lowercased search string; empty matches everything
    search: String,
    /// Subtree the search applies to; entries outside it always pass
    root: PathBuf,
    /// Memoized (store version, row -> inner row ascending)
    rows: RefCell<Option<(u64, Vec<usize>)>>,
}

impl<L: ViewLayer> FilterLayer<L> {
    /// Create a filter over `inner`, scoped to `root`, with no search active
    pub fn new(inner: L, store: Rc<RefCell<TagStore>>, root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            store,
            search: String::new(),
            root: root.into(),
            rows: RefCell::new(None),
        }
    }

    /// Active search string (lowercased)
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Replace the search string; the mapping recomputes on next access
    pub fn set_search_text(&mut self, text: &str) {
        self.search = text.to_lowercase();
        *self.rows.get_mut() = None;
    }

    /// Subtree the search is scoped to
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Re-scope the search; the mapping recomputes on next access
    pub fn set_root_path(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
        *self.rows.get_mut() = None;
    }

    /// The layer below this one
    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Mutable access to the layer below. Any mutation of the inner layer
    /// invalidates this layer's mapping, so the memo is dropped up front.
    pub fn inner_mut(&mut self) -> &mut L {
        *self.rows.get_mut() = None;
        &mut self.inner
    }

    fn accepts(&self, entry: &Entry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        if !entry.path.starts_with(&self.root) {
            // outside the scoped subtree the search does not apply
            return true;
        }
        if entry.effective_name().to_lowercase().contains(&self.search) {
            return true;
        }
        let store = self.store.borrow();
        store
            .get(&entry.path)
            .iter()
            .any(|tag| tag.to_lowercase().contains(&self.search))
    }

    fn rows(&self) -> Ref<'_, [usize]> {
        let version = self.store.borrow().version();
        let stale = !matches!(&*self.rows.borrow(), Some((seen, _)) if *seen == version);
        if stale {
            let mut rows = Vec::new();
            for inner_row in 0..self.inner.row_count() {
                if let Some(entry) = self.inner.entry_at(inner_row)
                    && self.accepts(entry)
                {
                    rows.push(inner_row);
                }
            }
            *self.rows.borrow_mut() = Some((version, rows));
        }
        Ref::map(self.rows.borrow(), |memo| {
            memo.as_ref().map_or(&[][..], |(_, rows)| rows.as_slice())
        })
    }
}

impl<L: ViewLayer> ViewLayer for FilterLayer<L> {
    fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn map_to_source(&self, row: usize) -> Option<usize> {
        self.rows().get(row).copied()
    }

    fn map_from_source(&self, source_row: usize) -> Option<usize> {
        self.rows().binary_search(&source_row).ok()
    }

    fn entry_at(&self, row: usize) -> Option<&Entry> {
        let inner_row = self.map_to_source(row)?;
        self.inner.entry_at(inner_row)
    }

    fn row_of_path(&self, path: &Path) -> Option<usize> {
        let inner_row = self.inner.row_of_path(path)?;
        self.map_from_source(inner_row)
    }

    fn invalidate(&mut self) {
        *self.rows.get_mut() = None;
    }

    fn refresh(&mut self) {
        self.inner.refresh();
        *self.rows.get_mut() = None;
    }
}
