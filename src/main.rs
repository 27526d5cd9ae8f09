//! Modpane CLI application entry point
//!
//! This is the main executable for the modpane file browser core. It plays
//! the role of the renderer: it resolves the configured tag store, builds a
//! pane over the requested directory and prints what the pipeline exposes.
//!
//! # Usage
//!
//! ```bash
//! # List the configured root (default command)
//! modpane
//! modpane ls ~/mods
//!
//! # Search by name or tag
//! modpane search armor ~/mods
//! modpane ls ~/mods -s armor
//!
//! # Disable/enable an entry (renames DISABLED_ prefix in place)
//! modpane toggle ~/mods/GreatSword
//!
//! # Tag management
//! modpane tag add ~/mods/GreatSword weapon rare
//! modpane tag rm ~/mods/GreatSword rare
//! modpane tag show ~/mods/GreatSword
//! modpane tags
//!
//! # Quiet mode (bare paths, for scripting)
//! modpane -q ls ~/mods -s weapon
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/modpane/config.toml` on Linux). The tag store defaults to
//! `.tags.json` in the home directory; override with `--store` or the
//! `tag_store` config key.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use colored::Colorize;
use modpane::{
    ModpaneError,
    browse::{Pane, SharedTagStore},
    cli::{Cli, Commands, TagCommands},
    config::ModpaneConfig,
    name,
    output,
    tags::TagStore,
};

type Result<T> = std::result::Result<T, ModpaneError>;

/// Load the tag store, reporting (but surviving) a corrupt document
fn open_store(config: &ModpaneConfig, override_path: Option<PathBuf>, quiet: bool) -> SharedTagStore {
    let path = override_path.unwrap_or_else(|| config.tag_store_path());
    let (store, warning) = TagStore::load(path);
    if let Some(warning) = warning
        && !quiet
    {
        eprintln!("{} {warning}", "Warning:".yellow());
    }
    Rc::new(RefCell::new(store))
}

/// Canonicalize a user-supplied path, with a friendly error
fn canonicalized(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        ModpaneError::InvalidInput(format!("Cannot access path '{}': {}", path.display(), e))
    })
}

/// Handle the ls command - list a directory through the pipeline
///
/// Builds a pane over the resolved root, optionally applies a search
/// string, and prints one row per visible entry.
///
/// # Errors
///
/// Returns `ModpaneError` if the root cannot be resolved or listed.
fn handle_ls_command(
    config: &ModpaneConfig,
    store: SharedTagStore,
    path: Option<PathBuf>,
    search: Option<String>,
    quiet: bool,
) -> Result<()> {
    let root = config.resolve_root(path)?;
    let root = canonicalized(&root)?;

    let mut pane = Pane::new(&root, store);
    if let Some(error) = pane.last_error() {
        return Err(ModpaneError::InvalidInput(format!(
            "Cannot list '{}': {error}",
            root.display()
        )));
    }
    if let Some(text) = search {
        pane.set_search_text(&text);
    }

    if pane.row_count() == 0 {
        if !quiet {
            if pane.search_text().is_empty() {
                println!("{} is empty.", output::format_path(&root, config.path_format));
            } else {
                println!(
                    "No entries matching '{}' under {}.",
                    pane.search_text(),
                    output::format_path(&root, config.path_format)
                );
            }
        }
        return Ok(());
    }

    if !quiet {
        println!("{}:", output::format_path(&root, config.path_format));
    }
    for row in 0..pane.row_count() {
        let Some(entry) = pane.entry_at(row) else {
            continue;
        };
        let tags = pane.tags_of(&entry.path);
        println!("{}", output::entry_row(entry, &tags, quiet));
    }
    Ok(())
}

/// Handle the toggle command - flip the enabled/disabled naming state
///
/// # Errors
///
/// Returns `ModpaneError` if the path is inaccessible, the target name is
/// taken, or the rename fails.
fn handle_toggle_command(store: SharedTagStore, path: &Path, quiet: bool) -> Result<()> {
    let fullpath = canonicalized(path)?;
    let parent = fullpath
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let mut pane = Pane::new(parent, store);
    let renamed = pane.toggle(&fullpath)?;

    if !quiet {
        let now_disabled = renamed
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(name::is_disabled);
        let verb = if now_disabled {
            "Disabled".red()
        } else {
            "Enabled".green()
        };
        println!("{verb} {}", renamed.display());
    }
    Ok(())
}

/// Handle the tag command - per-path tag management
///
/// # Errors
///
/// Returns `ModpaneError` if the path is inaccessible or the store document
/// cannot be written.
fn handle_tag_command(store: &SharedTagStore, command: &TagCommands, quiet: bool) -> Result<()> {
    match command {
        TagCommands::Add { path, tags } => {
            let fullpath = canonicalized(path)?;
            for tag in tags {
                store.borrow_mut().add(&fullpath, tag)?;
            }
            if !quiet {
                println!("Tagged {} with: {}", path.display(), tags.join(", "));
            }
        }
        TagCommands::Rm { path, tags } => {
            let fullpath = canonicalized(path)?;
            for tag in tags {
                store.borrow_mut().remove(&fullpath, tag)?;
            }
            if !quiet {
                println!("Removed tags {} from {}", tags.join(", "), path.display());
            }
        }
        TagCommands::Set { path, tags } => {
            let fullpath = canonicalized(path)?;
            store.borrow_mut().set(&fullpath, tags.clone())?;
            if !quiet {
                if tags.is_empty() {
                    println!("Cleared tags on {}", path.display());
                } else {
                    println!("Set tags on {} to: {}", path.display(), tags.join(", "));
                }
            }
        }
        TagCommands::Clear { path } => {
            let fullpath = canonicalized(path)?;
            store.borrow_mut().set(&fullpath, Vec::new())?;
            if !quiet {
                println!("Cleared tags on {}", path.display());
            }
        }
        TagCommands::Show { path } => {
            let fullpath = canonicalized(path)?;
            let store = store.borrow();
            let tags = store.get(&fullpath);
            if tags.is_empty() {
                if !quiet {
                    println!("{} has no tags.", path.display());
                }
            } else {
                for tag in tags {
                    println!("{tag}");
                }
            }
        }
    }
    Ok(())
}

/// Handle the tags command - global tag inventory
fn handle_tags_command(store: &SharedTagStore, quiet: bool) {
    let store = store.borrow();
    let all = store.all_tags();

    if all.is_empty() {
        if !quiet {
            println!("No tags in store.");
        }
        return;
    }

    if !quiet {
        println!("Tags in store:");
    }
    for (tag, count) in all {
        println!("{}", output::tag_with_count(&tag, count, quiet));
    }
}

/// Handle the open command - hand the path to the default application
///
/// # Errors
///
/// Returns `ModpaneError` if the path is inaccessible or the system opener
/// fails.
fn handle_open_command(path: &Path, quiet: bool) -> Result<()> {
    let fullpath = canonicalized(path)?;
    open::that(&fullpath)?;
    if !quiet {
        println!("Opened {}", fullpath.display());
    }
    Ok(())
}

/// Main entry point for the modpane application
///
/// Loads configuration, parses command-line arguments, and dispatches to
/// the appropriate command handler.
///
/// # Errors
///
/// Returns `ModpaneError` if configuration loading fails or any command
/// handler returns an error.
fn main() -> Result<()> {
    let config = ModpaneConfig::load()?;

    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;
    let store = open_store(&config, cli.store.clone(), quiet);

    match cli.into_command() {
        Commands::Ls { path, search } => handle_ls_command(&config, store, path, search, quiet)?,
        Commands::Search { query, path } => {
            handle_ls_command(&config, store, path, Some(query), quiet)?;
        }
        Commands::Toggle { path } => handle_toggle_command(store, &path, quiet)?,
        Commands::Tag { command } => handle_tag_command(&store, &command, quiet)?,
        Commands::Tags => handle_tags_command(&store, quiet),
        Commands::Open { path } => handle_open_command(&path, quiet)?,
    }

    Ok(())
}
