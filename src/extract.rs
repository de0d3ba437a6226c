//! Extraction pipeline
//!
//! Reads a text file, partitions its kanji against the active ignore
//! list and returns the result. Rendering (counts, jisho links) is the
//! caller's job; the pipeline never prints.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use crate::domain::{self, KanjiPartition};
use crate::storage::ConfigStore;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file exists but is not valid UTF-8 text. Non-fatal: callers
    /// report it and continue.
    #[error("Unable to read {path}. Is it a text file?", path = .path.display())]
    NotText { path: PathBuf },

    #[error("Failed to read {path}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

/// Outcome of one extraction run.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Resolved absolute path of the scanned file.
    pub path: PathBuf,
    pub partition: KanjiPartition,
}

/// Scans the file at `path` for kanji.
///
/// Relative paths resolve against the current working directory. With
/// `use_ignore_list`, the active ignore list is consulted; otherwise
/// every kanji is kept.
pub fn extract(
    store: &ConfigStore,
    path: &Path,
    use_ignore_list: bool,
) -> Result<ExtractionResult, ExtractError> {
    let path = absolutize(path)?;

    let bytes = std::fs::read(&path).map_err(|source| ExtractError::Io {
        path: path.clone(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|_| ExtractError::NotText { path: path.clone() })?;

    let ignore: BTreeSet<char> = if use_ignore_list {
        store.list_kanji()?.chars().collect()
    } else {
        BTreeSet::new()
    };

    let partition = domain::scan(&text, &ignore);

    Ok(ExtractionResult { path, partition })
}

fn absolutize(path: &Path) -> Result<PathBuf, ExtractError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().context("Failed to resolve current working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("data.json"))
    }

    #[test]
    fn extracts_kanji_in_first_occurrence_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let file = dir.path().join("sample.txt");
        fs::write(&file, "日本語test").unwrap();

        let result = extract(&store, &file, true).unwrap();
        assert_eq!(result.partition.kept, "日本語");
        assert_eq!(result.partition.ignored, "");
        assert_eq!(result.partition.total(), 3);
    }

    #[test]
    fn ignore_list_filters_kanji() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_kanji("語").unwrap();

        let file = dir.path().join("sample.txt");
        fs::write(&file, "日本語test").unwrap();

        let result = extract(&store, &file, true).unwrap();
        assert_eq!(result.partition.kept, "日本");
        assert_eq!(result.partition.ignored, "語");
    }

    #[test]
    fn ignore_list_can_be_bypassed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_kanji("語").unwrap();

        let file = dir.path().join("sample.txt");
        fs::write(&file, "日本語").unwrap();

        let result = extract(&store, &file, false).unwrap();
        assert_eq!(result.partition.kept, "日本語");
        assert_eq!(result.partition.ignored, "");
    }

    #[test]
    fn non_utf8_file_is_not_text() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let file = dir.path().join("binary.bin");
        fs::write(&file, [0xFF, 0xFE, 0x00, 0x80]).unwrap();

        let err = extract(&store, &file, true).unwrap_err();
        assert!(matches!(err, ExtractError::NotText { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = extract(&store, &dir.path().join("absent.txt"), true).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
