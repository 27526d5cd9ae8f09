//! Composable view layers over an entry source
//!
//! Every transform between the raw directory listing and the rows a consumer
//! sees implements the same three-operation contract: `row_count`,
//! `map_to_source` (one step down) and `map_from_source` (one step up).
//! Because the contract is uniform, layers stack without special-casing:
//! resolving a row to an entry walks the chain down through `entry_at`, and
//! resolving a path to its displayed row walks up through `row_of_path`.
//!
//! A failed upward mapping is not an error. It is the normal state of an
//! entry the layer currently excludes, so mappings return `Option` and the
//! walk simply stops at the first layer that answers `None`.
//!
//! The chain is fixed at construction time - each layer owns the one below
//! it as a typed field - so there is never a runtime walk to discover the
//! chain's shape.

mod filter;
mod sort;

pub use filter::FilterLayer;
pub use sort::SortLayer;

use std::path::Path;

use crate::source::Entry;

/// The shared contract of every layer in a view pipeline
pub trait ViewLayer {
    /// Number of rows this layer currently presents
    fn row_count(&self) -> usize;

    /// Translate a row one step down; `None` once the row no longer exists
    fn map_to_source(&self, row: usize) -> Option<usize>;

    /// Translate a source row one step up; `None` while this layer
    /// excludes it
    fn map_from_source(&self, source_row: usize) -> Option<usize>;

    /// Resolve a row to its entry by walking the chain down
    fn entry_at(&self, row: usize) -> Option<&Entry>;

    /// Resolve a path to its displayed row by walking the chain up
    fn row_of_path(&self, path: &Path) -> Option<usize>;

    /// Drop this layer's memoized mapping; the next access recomputes.
    /// Layers that hold no lazy state recompute immediately.
    fn invalidate(&mut self);

    /// Re-query the underlying source through the whole chain
    fn refresh(&mut self);
}
