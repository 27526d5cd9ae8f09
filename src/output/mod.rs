//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including path display formatting and listing-row formatting.

use std::path::Path;

use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local};
use colored::Colorize;

use crate::config::PathFormat;
use crate::source::Entry;

/// Format a path according to the display mode
#[must_use]
pub fn format_path(path: &Path, format: PathFormat) -> String {
    match format {
        PathFormat::Absolute => path.display().to_string(),
        PathFormat::Relative => {
            if let Ok(cwd) = std::env::current_dir()
                && let Ok(rel_path) = path.strip_prefix(&cwd)
            {
                return rel_path.display().to_string();
            }
            // Fallback to absolute if relative path cannot be computed
            path.display().to_string()
        }
    }
}

/// Colored state marker: green when enabled, red when disabled
#[must_use]
pub fn state_marker(disabled: bool) -> String {
    if disabled {
        "disabled".red().to_string()
    } else {
        " enabled".green().to_string()
    }
}

/// Format an entry's size, or a directory marker
#[must_use]
pub fn format_size(entry: &Entry) -> String {
    if entry.is_dir {
        "<dir>".to_string()
    } else {
        Byte::from_u64(entry.size)
            .get_appropriate_unit(UnitType::Binary)
            .to_string()
    }
}

/// Format an entry's modified time, empty when the file system has none
#[must_use]
pub fn format_modified(entry: &Entry) -> String {
    entry.modified.map_or_else(String::new, |time| {
        DateTime::<Local>::from(time)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    })
}

/// Format one listing row: state, effective name, size, mtime, tags
#[must_use]
pub fn entry_row(entry: &Entry, tags: &[String], quiet: bool) -> String {
    if quiet {
        return entry.path.display().to_string();
    }

    let mut row = format!(
        "  [{}] {:<32} {:>10}  {}",
        state_marker(entry.is_disabled()),
        entry.effective_name(),
        format_size(entry),
        format_modified(entry),
    );

    if !tags.is_empty() {
        let pills: Vec<String> = tags.iter().map(|tag| format!("#{tag}")).collect();
        row.push_str(&format!("  {}", pills.join(" ").cyan()));
    }

    row
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} path(s))")
    }
}
