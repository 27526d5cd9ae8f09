//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for modpane using the
//! `clap` crate. Command handlers live in `main.rs`; this module only
//! declares the surface.
//!
//! # Commands
//!
//! - **ls**: List a directory through the sort/filter pipeline (default)
//! - **search**: List only the rows matching a name/tag substring
//! - **toggle**: Enable or disable an entry by renaming it in place
//! - **tag**: Manage tags on a path (add, rm, set, clear, show)
//! - **tags**: List every tag in the store with usage counts
//! - **open**: Open an entry with the default application
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--store` override for the tag document location
//! - Command aliases (e.g., `l` for `ls`, `t` for `toggle`)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse, search, tag and toggle files through the view pipeline
#[derive(Parser, Debug)]
#[command(name = "modpane", version, about)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tag store document to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a directory through the sort/filter pipeline (default)
    #[command(alias = "l")]
    Ls {
        /// Directory to list; configured root or current directory if omitted
        path: Option<PathBuf>,

        /// Only show rows whose name or tags contain this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search a directory by name or tag substring
    #[command(alias = "s")]
    Search {
        /// Text to match against effective names and tags
        query: String,

        /// Directory to search; configured root or current directory if omitted
        path: Option<PathBuf>,
    },

    /// Enable or disable an entry by renaming it in place
    #[command(alias = "t")]
    Toggle {
        /// File or folder to toggle
        path: PathBuf,
    },

    /// Manage tags on a file or folder
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// List every tag in the store with its usage count
    Tags,

    /// Open an entry with the default application
    #[command(alias = "o")]
    Open {
        /// File or folder to open
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Attach tags to a path
    Add {
        path: PathBuf,
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Detach tags from a path
    Rm {
        path: PathBuf,
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Replace all tags on a path; no tags clears them
    Set {
        path: PathBuf,
        tags: Vec<String>,
    },

    /// Remove every tag from a path
    Clear { path: PathBuf },

    /// Show the tags attached to a path
    Show { path: PathBuf },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The requested command, defaulting to a plain listing
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Ls {
            path: None,
            search: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ls() {
        let cli = Cli::try_parse_from(["modpane"]).unwrap();
        assert!(matches!(
            cli.into_command(),
            Commands::Ls { path: None, search: None }
        ));
    }

    #[test]
    fn test_ls_with_search() {
        let cli = Cli::try_parse_from(["modpane", "ls", "/mods", "-s", "armor"]).unwrap();
        match cli.into_command() {
            Commands::Ls { path, search } => {
                assert_eq!(path, Some(PathBuf::from("/mods")));
                assert_eq!(search.as_deref(), Some("armor"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::try_parse_from(["modpane", "search", "armor", "/mods"]).unwrap();
        match cli.into_command() {
            Commands::Search { query, path } => {
                assert_eq!(query, "armor");
                assert_eq!(path, Some(PathBuf::from("/mods")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_toggle_alias() {
        let cli = Cli::try_parse_from(["modpane", "t", "/mods/Bar"]).unwrap();
        assert!(matches!(cli.into_command(), Commands::Toggle { .. }));
    }

    #[test]
    fn test_tag_add_requires_tags() {
        assert!(Cli::try_parse_from(["modpane", "tag", "add", "/mods/Bar"]).is_err());
        let cli =
            Cli::try_parse_from(["modpane", "tag", "add", "/mods/Bar", "armor", "rare"]).unwrap();
        match cli.into_command() {
            Commands::Tag {
                command: TagCommands::Add { tags, .. },
            } => assert_eq!(tags, ["armor", "rare"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["modpane", "-q", "--store", "/tmp/t.json", "tags"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/t.json")));
    }
}
