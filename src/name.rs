//! Enable/disable naming convention
//!
//! A file or folder is disabled when its on-disk base name carries the
//! literal `DISABLED_` prefix - matched case-insensitively on read, written
//! in canonical upper case. This module is the single source of truth for
//! that convention: the marker predicate, the effective display name, and
//! the rename that flips an entry between the two states. No other part of
//! the crate inspects raw names directly.
//!
//! Effective names always have boundary underscores trimmed, so re-enabling
//! `DISABLED__Foo_` yields `Foo`. That trimming is literal behavior carried
//! over from the on-disk convention, even where it mutates a name that used
//! underscores for its own purposes.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Canonical marker prefix written when disabling an entry
pub const DISABLED_PREFIX: &str = "DISABLED_";

/// Errors from [`toggle`]
#[derive(Debug, Error)]
pub enum ToggleError {
    /// A sibling already carries the target name; nothing was renamed
    #[error("Cannot rename {path}: '{target}' already exists")]
    RenameConflict { path: PathBuf, target: String },

    /// The path has no usable UTF-8 base name to transform
    #[error("Path has no usable file name: {0}")]
    InvalidName(PathBuf),

    /// The rename failed for an OS-level reason; the entry is left untouched
    #[error("Rename failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check whether a raw name carries the disable marker
///
/// The match is case-insensitive, so `disabled_foo` and `Disabled_foo`
/// count as disabled alongside the canonical `DISABLED_foo`.
///
/// # Examples
/// ```
/// # use modpane::name::is_disabled;
/// assert!(is_disabled("DISABLED_armor"));
/// assert!(is_disabled("disabled_armor"));
/// assert!(!is_disabled("armor"));
/// assert!(!is_disabled("DISABLEDarmor"));
/// ```
#[must_use]
pub fn is_disabled(raw_name: &str) -> bool {
    raw_name
        .get(..DISABLED_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DISABLED_PREFIX))
}

/// Display name of a raw name: the marker dropped, boundary underscores trimmed
///
/// # Examples
/// ```
/// # use modpane::name::effective_name;
/// assert_eq!(effective_name("DISABLED_armor"), "armor");
/// assert_eq!(effective_name("armor"), "armor");
/// assert_eq!(effective_name("_armor_"), "armor");
/// assert_eq!(effective_name("DISABLED__armor"), "armor");
/// ```
#[must_use]
pub fn effective_name(raw_name: &str) -> &str {
    let stripped = if is_disabled(raw_name) {
        // prefix check guarantees the first 9 bytes are ASCII
        &raw_name[DISABLED_PREFIX.len()..]
    } else {
        raw_name
    };
    stripped.trim_matches('_')
}

/// Raw name an entry would have after a toggle
///
/// Disabling prepends the canonical marker; enabling drops the marker and
/// trims boundary underscores.
#[must_use]
pub fn toggled_name(raw_name: &str) -> String {
    if is_disabled(raw_name) {
        raw_name[DISABLED_PREFIX.len()..].trim_matches('_').to_string()
    } else {
        format!("{DISABLED_PREFIX}{raw_name}")
    }
}

/// Toggle the enabled/disabled state of the entry at `path` by renaming it
/// in place (same parent directory), and return the new path.
///
/// # Errors
///
/// Returns `ToggleError::RenameConflict` if a sibling with the target name
/// already exists, and `ToggleError::Io` for any other rename failure. On
/// error the original entry is left untouched.
pub fn toggle(path: &Path) -> Result<PathBuf, ToggleError> {
    let raw_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ToggleError::InvalidName(path.to_path_buf()))?;

    let target = toggled_name(raw_name);
    let new_path = path.with_file_name(&target);

    if new_path.exists() {
        return Err(ToggleError::RenameConflict {
            path: path.to_path_buf(),
            target,
        });
    }

    std::fs::rename(path, &new_path).map_err(|source| ToggleError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(new_path)
}
