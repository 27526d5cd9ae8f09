//! Tag-store-specific error types
//!
//! This module defines the failure states of the persistent tag store.
//! A corrupt or unreadable document is a warning, not a fatal error: the
//! store degrades to empty and the session keeps running. A failed persist
//! is surfaced to the caller while the in-memory state stays updated, so
//! the current session remains consistent even when durability is lost.

use std::path::PathBuf;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The on-disk document exists but failed to parse
    #[error("Tag store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The on-disk document exists but could not be read
    #[error("Could not read tag store at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mutation was applied in memory but could not be written back
    #[error("Could not persist tag store to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
