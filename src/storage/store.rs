//! The config store
//!
//! Owns the internal data-file location and every ignore-list operation.
//! The store holds no loaded document: the active config is re-resolved
//! from disk on each call so a changed external path takes effect
//! immediately. Every mutating operation is a full read-modify-write
//! cycle with no locking (concurrent invocations are last-write-wins).

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::config::{
    ActiveConfig, ConfigError, ExternalConfig, ExternalLoad, InternalConfig,
    DEFAULT_EXTERNAL_FILE_NAME, INTERNAL_FILE_NAME,
};
use crate::domain::is_kanji;

/// Environment variable overriding the internal data directory.
pub const DATA_DIR_ENV: &str = "KANJIEXTRACT_DATA_DIR";

/// Entry point for all ignore-list persistence.
pub struct ConfigStore {
    internal_path: PathBuf,
}

/// Result of [`ConfigStore::set_external_path`].
#[derive(Debug, PartialEq, Eq)]
pub struct SetPathOutcome {
    /// The resolved external path, or `None` when external storage was
    /// disabled.
    pub path: Option<PathBuf>,
    pub merge: MergeOutcome,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    NotRequested,
    /// Internal kanji were merged into the external document.
    Merged { added: usize },
    /// A merge was requested while disabling external storage; there is
    /// nothing to merge into. Reported as a warning, never an error.
    SkippedNoExternal,
}

impl ConfigStore {
    /// Creates a store over an explicit internal document path.
    pub fn new(internal_path: impl Into<PathBuf>) -> Self {
        Self {
            internal_path: internal_path.into(),
        }
    }

    /// Opens the store at the platform default location.
    ///
    /// `KANJIEXTRACT_DATA_DIR` overrides the directory. The directory is
    /// created on first use; failure to create it is fatal.
    pub fn open_default() -> Result<Self> {
        let dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("dev", "kanjiextract", "kanjiextract")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

        Ok(Self::new(dir.join(INTERNAL_FILE_NAME)))
    }

    /// Path of the internal document.
    pub fn internal_path(&self) -> &Path {
        &self.internal_path
    }

    /// Loads the internal document (auto-created when missing).
    pub fn load_internal(&self) -> Result<InternalConfig> {
        InternalConfig::load(&self.internal_path)
    }

    /// Loads an external document with the tagged recovery result.
    pub fn load_external(&self, path: &Path) -> Result<ExternalLoad> {
        ExternalConfig::load(path)
    }

    /// Resolves the document that currently governs ignore behavior.
    pub fn resolve_active(&self) -> Result<ActiveConfig> {
        let internal = self.load_internal()?;
        match internal.external_path.clone() {
            None => Ok(ActiveConfig::Internal(internal)),
            Some(path) => Ok(ActiveConfig::External(
                ExternalConfig::load(&path)?.into_config(),
            )),
        }
    }

    /// Adds every kanji in `text` to the active ignore list.
    ///
    /// Returns how many characters were actually added; non-kanji and
    /// already-present characters do not count.
    pub fn add_kanji(&self, text: &str) -> Result<usize> {
        let mut active = self.resolve_active()?;
        let mut set: BTreeSet<char> = active.ignore_list().chars().collect();
        let before = set.len();

        set.extend(text.chars().filter(|c| is_kanji(*c)));

        let added = set.len() - before;
        active.set_ignore_list(set.into_iter().collect());
        active.save()?;
        Ok(added)
    }

    /// Removes every kanji in `text` from the active ignore list.
    pub fn remove_kanji(&self, text: &str) -> Result<usize> {
        let mut active = self.resolve_active()?;
        let mut set: BTreeSet<char> = active.ignore_list().chars().collect();
        let before = set.len();

        for c in text.chars().filter(|c| is_kanji(*c)) {
            set.remove(&c);
        }

        let removed = before - set.len();
        active.set_ignore_list(set.into_iter().collect());
        active.save()?;
        Ok(removed)
    }

    /// Replaces the active ignore list with the kanji found in `text`.
    ///
    /// Returns the previous and the new list contents.
    pub fn set_kanji(&self, text: &str) -> Result<(String, String)> {
        let mut active = self.resolve_active()?;
        let old = active.ignore_list().to_string();

        let new: String = text
            .chars()
            .filter(|c| is_kanji(*c))
            .collect::<BTreeSet<char>>()
            .into_iter()
            .collect();

        active.set_ignore_list(new.clone());
        active.save()?;
        Ok((old, new))
    }

    /// Returns the active ignore list.
    pub fn list_kanji(&self) -> Result<String> {
        Ok(self.resolve_active()?.ignore_list().to_string())
    }

    /// Returns the currently configured external path, if any.
    pub fn external_path(&self) -> Result<Option<PathBuf>> {
        Ok(self.load_internal()?.external_path)
    }

    /// Points the store at an external ignore file, or disables external
    /// storage when `path` is `None`.
    ///
    /// With `merge`, the internal ignore list (as it stood before this
    /// call) is unioned into the external document.
    pub fn set_external_path(&self, path: Option<&Path>, merge: bool) -> Result<SetPathOutcome> {
        let resolved = match path {
            Some(p) => Some(resolve_external_path(p)?),
            None => None,
        };

        let mut internal = self.load_internal()?;
        let internal_list = internal.ignore_list.clone();
        internal.external_path = resolved.clone();
        internal.save()?;

        let merge_outcome = if !merge {
            MergeOutcome::NotRequested
        } else {
            match &resolved {
                None => MergeOutcome::SkippedNoExternal,
                Some(p) => {
                    let mut external = ExternalConfig::load(p)?.into_config();
                    let mut set: BTreeSet<char> = external.ignore_list.chars().collect();
                    let before = set.len();

                    set.extend(internal_list.chars().filter(|c| is_kanji(*c)));

                    let added = set.len() - before;
                    external.ignore_list = set.into_iter().collect();
                    external.save()?;
                    MergeOutcome::Merged { added }
                }
            }
        };

        Ok(SetPathOutcome {
            path: resolved,
            merge: merge_outcome,
        })
    }
}

/// Normalizes a user-supplied external location to an absolute file path.
///
/// Relative paths resolve against the current working directory. A path
/// naming a directory gets [`DEFAULT_EXTERNAL_FILE_NAME`] appended. The
/// parent directory must already exist; it is canonicalized so the stored
/// path survives later `cd`s.
fn resolve_external_path(path: &Path) -> Result<PathBuf> {
    let mut absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to resolve current working directory")?
            .join(path)
    };

    if absolute.is_dir() {
        absolute.push(DEFAULT_EXTERNAL_FILE_NAME);
    }

    let parent = absolute
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();
    if !parent.is_dir() {
        return Err(ConfigError::ExternalDirMissing(parent).into());
    }

    let file_name = absolute
        .file_name()
        .ok_or_else(|| ConfigError::ExternalDirMissing(absolute.clone()))?
        .to_os_string();

    let parent = parent
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory: {}", parent.display()))?;

    Ok(parent.join(file_name))
}
