//! Browse sessions
//!
//! A [`Pane`] wires one entry source, the sort and filter layers, a
//! navigation history and a shared tag store into the surface a renderer
//! consumes: row counts, entries by row, and toggle/tag edits issued by
//! path rather than by row, so a mapping going stale mid-interaction can
//! never corrupt a write. Two panes over the same store handle see each
//! other's writes on their next query.
//!
//! The layer chain is built once here as a concrete type; nothing in the
//! crate discovers the chain shape at runtime. File-system change
//! notifications arrive through [`Pane::handle_change`] - the watching
//! collaborator calls it explicitly, there are no back-references into the
//! pane.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::history::NavigationHistory;
use crate::name::{self, ToggleError};
use crate::source::{ChangeEvent, Entry, FsEntrySource, SourceError};
use crate::tags::{StoreError, TagStore};
use crate::view::{FilterLayer, SortLayer, ViewLayer};

/// Shared handle to one tag store; cheap to hand to a second pane
pub type SharedTagStore = Rc<RefCell<TagStore>>;

/// One browser pane: a typed layer chain over a directory plus its history
pub struct Pane {
    layers: FilterLayer<SortLayer<FsEntrySource>>,
    history: NavigationHistory,
    store: SharedTagStore,
}

impl Pane {
    /// Open a pane showing `dir`
    pub fn new(dir: impl Into<PathBuf>, store: SharedTagStore) -> Self {
        let dir = dir.into();
        let sort = SortLayer::new(FsEntrySource, &dir);
        let layers = FilterLayer::new(sort, Rc::clone(&store), &dir);
        let mut history = NavigationHistory::new();
        history.push(&dir);
        Self {
            layers,
            history,
            store,
        }
    }

    /// Directory the pane currently shows
    #[must_use]
    pub fn path(&self) -> &Path {
        self.layers.inner().dir()
    }

    /// Navigate to `dir`: clear the search, re-scope the filter, re-sort.
    /// Records the visit unless `record` is false (history replay).
    pub fn set_path(&mut self, dir: impl Into<PathBuf>, record: bool) {
        let dir = dir.into();
        self.layers.set_search_text("");
        self.layers.set_root_path(&dir);
        self.layers.inner_mut().set_dir(&dir);
        if record {
            self.history.push(dir);
        }
    }

    /// Navigate into the parent directory, if there is one
    pub fn go_up(&mut self) -> bool {
        let Some(parent) = self.path().parent().map(Path::to_path_buf) else {
            return false;
        };
        self.set_path(parent, true);
        true
    }

    /// Replay one step back in the history
    pub fn navigate_back(&mut self) -> bool {
        let Some(path) = self.history.back().map(Path::to_path_buf) else {
            return false;
        };
        self.set_path(path, false);
        true
    }

    /// Replay one step forward in the history
    pub fn navigate_forward(&mut self) -> bool {
        let Some(path) = self.history.forward().map(Path::to_path_buf) else {
            return false;
        };
        self.set_path(path, false);
        true
    }

    /// Active search string
    #[must_use]
    pub fn search_text(&self) -> &str {
        self.layers.search_text()
    }

    /// Update the search; visible rows recompute on next access
    pub fn set_search_text(&mut self, text: &str) {
        self.layers.set_search_text(text);
    }

    /// Rows currently visible
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.layers.row_count()
    }

    /// Entry at a visible row
    #[must_use]
    pub fn entry_at(&self, row: usize) -> Option<&Entry> {
        self.layers.entry_at(row)
    }

    /// Row currently displaying `path`; `None` while it is filtered out
    /// or gone
    #[must_use]
    pub fn row_of_path(&self, path: &Path) -> Option<usize> {
        self.layers.row_of_path(path)
    }

    /// Visible entries in display order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        (0..self.row_count()).filter_map(move |row| self.entry_at(row))
    }

    /// The listing failure behind the current (empty) view, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&SourceError> {
        self.layers.inner().last_error()
    }

    /// Toggle the enabled/disabled state of the entry at `path` and return
    /// its new path. The rename is processed as a change event before this
    /// returns, so row mappings are already re-resolved.
    ///
    /// # Errors
    ///
    /// Returns `ToggleError` from the rename; the file system and the view
    /// are left unchanged on failure.
    pub fn toggle(&mut self, path: &Path) -> Result<PathBuf, ToggleError> {
        let renamed = name::toggle(path)?;
        self.handle_change(&ChangeEvent::Renamed {
            from: path.to_path_buf(),
            to: renamed.clone(),
        });
        Ok(renamed)
    }

    /// Tags attached to `path`
    #[must_use]
    pub fn tags_of(&self, path: &Path) -> Vec<String> {
        self.store.borrow().get(path).to_vec()
    }

    /// Attach a tag. Every pane over this store, this one included, picks
    /// the change up on its next row query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the store document could not be
    /// written; the in-memory tag state is updated regardless.
    pub fn add_tag(&mut self, path: &Path, tag: &str) -> Result<(), StoreError> {
        self.store.borrow_mut().add(path, tag)
    }

    /// Detach a tag. Every pane over this store picks the change up on its
    /// next row query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the store document could not be
    /// written; the in-memory tag state is updated regardless.
    pub fn remove_tag(&mut self, path: &Path, tag: &str) -> Result<(), StoreError> {
        self.store.borrow_mut().remove(path, tag)
    }

    /// Replace the tags on `path` wholesale; empty clears them
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persist` if the store document could not be
    /// written; the in-memory tag state is updated regardless.
    pub fn set_tags(&mut self, path: &Path, tags: Vec<String>) -> Result<(), StoreError> {
        self.store.borrow_mut().set(path, tags)
    }

    /// Shared store handle, e.g. to open a second pane over the same store
    #[must_use]
    pub fn store(&self) -> &SharedTagStore {
        &self.store
    }

    /// Process a file-system change notification synchronously. Changes
    /// outside the observed directory are ignored; anything under it forces
    /// an eager re-sort and drops the filter's memoized mapping, so the
    /// next row query is served from fresh state.
    pub fn handle_change(&mut self, event: &ChangeEvent) {
        let relevant = event.touches(self.path());
        if relevant {
            self.layers.refresh();
        }
    }

    /// Force a full re-query of the source
    pub fn refresh(&mut self) {
        self.layers.refresh();
    }

    /// Back/forward history of this pane
    #[must_use]
    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::shared_store;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, SharedTagStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        for entry_name in ["Foo", "DISABLED_Bar", "baz"] {
            fs::write(dir.path().join(entry_name), b"x").unwrap();
        }
        let (store, store_dir) = shared_store();
        (dir, store, store_dir)
    }

    fn visible_names(pane: &Pane) -> Vec<String> {
        pane.entries().map(|e| e.raw_name.clone()).collect()
    }

    #[test]
    fn test_pane_lists_sorted() {
        let (dir, store, _store_dir) = fixture();
        let pane = Pane::new(dir.path(), store);
        assert_eq!(visible_names(&pane), ["DISABLED_Bar", "baz", "Foo"]);
    }

    #[test]
    fn test_toggle_keeps_sort_position() {
        let (dir, store, _store_dir) = fixture();
        let mut pane = Pane::new(dir.path(), store);

        let renamed = pane.toggle(&dir.path().join("DISABLED_Bar")).unwrap();
        assert_eq!(renamed, dir.path().join("Bar"));

        // effective name is unchanged, so the order is stable
        assert_eq!(visible_names(&pane), ["Bar", "baz", "Foo"]);
        let entry = pane.entry_at(0).unwrap();
        assert!(!entry.is_disabled());
    }

    #[test]
    fn test_toggle_failure_leaves_view_intact() {
        let (dir, store, _store_dir) = fixture();
        fs::write(dir.path().join("Bar"), b"sibling").unwrap();
        let mut pane = Pane::new(dir.path(), store);
        let before = visible_names(&pane);

        let err = pane.toggle(&dir.path().join("DISABLED_Bar")).unwrap_err();
        assert!(matches!(err, ToggleError::RenameConflict { .. }));
        assert_eq!(visible_names(&pane), before);
    }

    #[test]
    fn test_search_and_tag_predicate() {
        let (dir, store, _store_dir) = fixture();
        let mut pane = Pane::new(dir.path(), store);
        let target = dir.path().join("Foo");

        pane.add_tag(&target, "armor").unwrap();
        pane.set_search_text("arm");

        assert_eq!(visible_names(&pane), ["Foo"]);
        assert_eq!(pane.row_of_path(&target), Some(0));
        assert_eq!(pane.row_of_path(&dir.path().join("baz")), None);
    }

    #[test]
    fn test_set_path_clears_search() {
        let (dir, store, _store_dir) = fixture();
        let sub = dir.path().join("Sub");
        fs::create_dir(&sub).unwrap();

        let mut pane = Pane::new(dir.path(), store);
        pane.set_search_text("foo");
        assert_eq!(pane.row_count(), 1);

        pane.set_path(dir.path(), true);
        assert!(pane.search_text().is_empty());
        assert_eq!(pane.row_count(), 4);
    }

    #[test]
    fn test_navigation_history_replay() {
        let (dir, store, _store_dir) = fixture();
        let sub = dir.path().join("Sub");
        fs::create_dir(&sub).unwrap();

        let mut pane = Pane::new(dir.path(), store);
        pane.set_path(&sub, true);
        assert_eq!(pane.path(), sub.as_path());

        assert!(pane.navigate_back());
        assert_eq!(pane.path(), dir.path());

        assert!(pane.navigate_forward());
        assert_eq!(pane.path(), sub.as_path());
        assert!(!pane.navigate_forward());
    }

    #[test]
    fn test_go_up_records_history() {
        let (dir, store, _store_dir) = fixture();
        let sub = dir.path().join("Sub");
        fs::create_dir(&sub).unwrap();

        let mut pane = Pane::new(&sub, store);
        assert!(pane.go_up());
        assert_eq!(pane.path(), dir.path());
        assert!(pane.navigate_back());
        assert_eq!(pane.path(), sub.as_path());
    }

    #[test]
    fn test_external_change_notification() {
        let (dir, store, _store_dir) = fixture();
        let mut pane = Pane::new(dir.path(), store);
        assert_eq!(pane.row_count(), 3);

        let added = dir.path().join("Alpha");
        fs::write(&added, b"x").unwrap();
        pane.handle_change(&ChangeEvent::Inserted(added));
        assert_eq!(visible_names(&pane), ["Alpha", "DISABLED_Bar", "baz", "Foo"]);

        // changes elsewhere are ignored
        pane.handle_change(&ChangeEvent::Removed(PathBuf::from("/elsewhere/x")));
        assert_eq!(pane.row_count(), 4);
    }

    #[test]
    fn test_two_panes_share_tag_store() {
        let (dir, store, _store_dir) = fixture();
        let mut left = Pane::new(dir.path(), Rc::clone(&store));
        let mut right = Pane::new(dir.path(), store);
        let target = dir.path().join("baz");

        // right is already filtered when left writes
        right.set_search_text("armor");
        assert_eq!(right.row_count(), 0);

        left.add_tag(&target, "armor").unwrap();

        // the write is visible to the other pane on its next query
        assert_eq!(right.tags_of(&target), ["armor".to_string()]);
        assert_eq!(visible_names(&right), ["baz"]);
    }

    #[test]
    fn test_missing_directory_is_empty_not_fatal() {
        let (dir, store, _store_dir) = fixture();
        let pane = Pane::new(dir.path().join("absent"), store);
        assert_eq!(pane.row_count(), 0);
        assert!(pane.last_error().is_some());
    }
}
