//! Modpane - a two-pane file browser core
//!
//! This library provides the model layer of a file browser: a composable
//! view pipeline (sort and filter layers with bidirectional row mapping),
//! a persistent tag store, and the rename-based enable/disable naming
//! convention used by mod directories.

use thiserror::Error;

pub mod browse;
pub mod cli;
pub mod config;
pub mod history;
pub mod name;
pub mod output;
pub mod source;
pub mod tags;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ModpaneError {
    /// Toggle (rename) error
    #[error("Toggle error: {0}")]
    ToggleError(#[from] name::ToggleError),
    /// Tag store error
    #[error("Tag store error: {0}")]
    StoreError(#[from] tags::StoreError),
    /// Entry source error
    #[error("Source error: {0}")]
    SourceError(#[from] source::SourceError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub use browse::Pane;
pub use source::{ChangeEvent, Entry, EntrySource, FsEntrySource};
pub use tags::TagStore;
pub use view::{FilterLayer, SortLayer, ViewLayer};
