//! Ignore-list CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::storage::{ConfigStore, MergeOutcome};

#[derive(Subcommand)]
pub enum IgnoreCommands {
    /// Add kanji to the ignore list
    Add {
        /// Kanji to add (every kanji in the string counts)
        #[arg(default_value = "")]
        kanji: String,

        /// Add all kanji contained in this file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Remove kanji from the ignore list
    Remove {
        /// Kanji to remove
        #[arg(default_value = "")]
        kanji: String,

        /// Remove all kanji contained in this file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Overwrite the ignore list; run without arguments to clear it
    Set {
        /// New ignore list contents
        #[arg(default_value = "")]
        kanji: String,

        /// Take the new contents from this file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print the kanji contained in the ignore list
    List {
        /// Print without separating spaces
        #[arg(long)]
        no_spaces: bool,
    },

    /// Manage the external ignore list file
    #[command(subcommand)]
    File(IgnoreFileCommands),
}

#[derive(Subcommand)]
pub enum IgnoreFileCommands {
    /// Set the external ignore file path; omit the path to switch back
    /// to internal storage
    Set {
        /// File (or directory) to keep the ignore list in
        path: Option<PathBuf>,

        /// Merge previously added kanji into the new file
        #[arg(long = "move")]
        move_existing: bool,
    },

    /// Print the external ignore list file path
    Path,
}

pub fn run(cmd: IgnoreCommands, output: &Output) -> Result<()> {
    let store = ConfigStore::open_default()?;

    match cmd {
        IgnoreCommands::Add { kanji, file } => {
            let text = input_text(kanji, file.as_deref())?;
            let count = store.add_kanji(&text)?;

            if output.is_json() {
                output.data(&serde_json::json!({ "added": count }));
            } else {
                output.success(&format!("Added {} new kanji to the ignore list", count));
            }
        }

        IgnoreCommands::Remove { kanji, file } => {
            let text = input_text(kanji, file.as_deref())?;
            let count = store.remove_kanji(&text)?;

            if output.is_json() {
                output.data(&serde_json::json!({ "removed": count }));
            } else {
                output.success(&format!("Removed {} kanji from the ignore list", count));
            }
        }

        IgnoreCommands::Set { kanji, file } => {
            let text = input_text(kanji, file.as_deref())?;
            let (old, new) = store.set_kanji(&text)?;

            if output.is_json() {
                output.data(&serde_json::json!({ "old": old, "new": new }));
            } else {
                println!("{} -> {}", old, new);
                println!("({} -> {})", old.chars().count(), new.chars().count());
            }
        }

        IgnoreCommands::List { no_spaces } => {
            let list = store.list_kanji()?;

            if output.is_json() {
                output.data(&serde_json::json!({ "ignore_list": list }));
            } else {
                let sep = if no_spaces { "" } else { " " };
                let joined: Vec<String> = list.chars().map(String::from).collect();
                println!("{}", joined.join(sep));
            }
        }

        IgnoreCommands::File(cmd) => run_file(cmd, &store, output)?,
    }

    Ok(())
}

fn run_file(cmd: IgnoreFileCommands, store: &ConfigStore, output: &Output) -> Result<()> {
    match cmd {
        IgnoreFileCommands::Set {
            path,
            move_existing,
        } => {
            let outcome = store.set_external_path(path.as_deref(), move_existing)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": outcome.path.as_ref().map(|p| p.display().to_string()),
                    "merged": matches!(outcome.merge, MergeOutcome::Merged { .. }),
                }));
                return Ok(());
            }

            match &outcome.path {
                None => output.success("External ignore list disabled"),
                Some(p) => {
                    output.success(&format!("Ignore list file path set to {}", p.display()));
                    if !move_existing {
                        println!(
                            "If you want to move your previously added kanji, \
                             execute this command with the --move flag"
                        );
                    }
                }
            }

            if let MergeOutcome::Merged { added } = &outcome.merge {
                output.verbose_ctx("ignore", &format!("Merged {} kanji into external file", added));
            }
            if outcome.merge == MergeOutcome::SkippedNoExternal {
                output.warn("No external file configured, unable to merge the internal list");
            }
        }

        IgnoreFileCommands::Path => match store.external_path()? {
            Some(p) => {
                if output.is_json() {
                    output.data(&serde_json::json!({ "path": p.display().to_string() }));
                } else {
                    println!("{}", p.display());
                }
            }
            None => {
                if output.is_json() {
                    output.data(&serde_json::json!({ "path": null }));
                }
                // Text mode prints nothing when no external path is set.
            }
        },
    }

    Ok(())
}

/// The inline kanji argument, or the contents of `--file` when given.
fn input_text(kanji: String, file: Option<&Path>) -> Result<String> {
    match file {
        None => Ok(kanji),
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}
