//! Ignore-list documents
//!
//! One JSON document per config location. The internal document lives at
//! a fixed path and additionally records the optional external path; an
//! external document holds nothing but its ignore list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the internal document inside the data directory.
pub const INTERNAL_FILE_NAME: &str = "data.json";

/// File name appended when the external path names a directory.
pub const DEFAULT_EXTERNAL_FILE_NAME: &str = "kanjiextract_data.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine a data directory for this platform")]
    NoDataDir,

    #[error("Directory for external ignore file does not exist: {0}")]
    ExternalDirMissing(PathBuf),

    #[error("Failed to parse ignore config: {0}")]
    Parse(String),
}

/// Wire format of the internal document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct InternalDoc {
    ignore_list: String,
    external_ignored_file_path: Option<PathBuf>,
}

/// Wire format of an external document. No external-path field.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct ExternalDoc {
    ignore_list: String,
}

/// The internal ignore-list document, bound to its on-disk location.
#[derive(Debug, Clone)]
pub struct InternalConfig {
    pub ignore_list: String,
    pub external_path: Option<PathBuf>,
    path: PathBuf,
}

impl InternalConfig {
    /// Loads the internal document, creating a fresh default when the
    /// file does not exist yet.
    ///
    /// Unlike external documents, a corrupt internal document is a fatal
    /// configuration error and is never repaired silently.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self {
                ignore_list: String::new(),
                external_path: None,
                path: path.to_path_buf(),
            };
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore config: {}", path.display()))?;

        let doc: InternalDoc = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse ignore config: {}", path.display()))?;

        Ok(Self {
            ignore_list: doc.ignore_list,
            external_path: doc.external_ignored_file_path,
            path: path.to_path_buf(),
        })
    }

    /// Persists the whole document (full overwrite, pretty-printed).
    pub fn save(&self) -> Result<()> {
        let doc = InternalDoc {
            ignore_list: self.ignore_list.clone(),
            external_ignored_file_path: self.external_path.clone(),
        };
        write_doc(&self.path, &doc)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An ignore-list document at a user-chosen path.
#[derive(Debug, Clone)]
pub struct ExternalConfig {
    pub ignore_list: String,
    path: PathBuf,
}

/// Tagged result of loading an external document, so callers can tell a
/// clean load from a corruption recovery without inspecting the
/// filesystem.
#[derive(Debug)]
pub enum ExternalLoad {
    /// Parsed fine, or created fresh at a valid location.
    Loaded(ExternalConfig),
    /// The file was unparsable: quarantined under `backup`, replaced
    /// with a fresh empty document at the original path.
    Recreated {
        config: ExternalConfig,
        backup: PathBuf,
    },
}

impl ExternalLoad {
    /// Discards the load distinction and yields the usable document.
    pub fn into_config(self) -> ExternalConfig {
        match self {
            ExternalLoad::Loaded(config) => config,
            ExternalLoad::Recreated { config, .. } => config,
        }
    }
}

impl ExternalConfig {
    /// Loads the external document at `path`.
    ///
    /// Missing file with an existing parent directory is auto-created
    /// empty; missing parent directory is a [`ConfigError`]; unparsable
    /// content is quarantined and replaced.
    pub fn load(path: &Path) -> Result<ExternalLoad> {
        if !path.exists() {
            let parent_ok = path.parent().map(Path::is_dir).unwrap_or(false);
            if !parent_ok {
                let parent = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
                return Err(ConfigError::ExternalDirMissing(parent).into());
            }
            let config = Self::empty(path);
            config.save()?;
            return Ok(ExternalLoad::Loaded(config));
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore config: {}", path.display()))?;

        match serde_json::from_str::<ExternalDoc>(&content) {
            Ok(doc) => Ok(ExternalLoad::Loaded(Self {
                ignore_list: doc.ignore_list,
                path: path.to_path_buf(),
            })),
            Err(_) => {
                let backup = quarantine(path)?;
                let config = Self::empty(path);
                config.save()?;
                Ok(ExternalLoad::Recreated { config, backup })
            }
        }
    }

    fn empty(path: &Path) -> Self {
        Self {
            ignore_list: String::new(),
            path: path.to_path_buf(),
        }
    }

    /// Persists the whole document (full overwrite, pretty-printed).
    pub fn save(&self) -> Result<()> {
        let doc = ExternalDoc {
            ignore_list: self.ignore_list.clone(),
        };
        write_doc(&self.path, &doc)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whichever ignore-list document currently governs ignore behavior.
#[derive(Debug)]
pub enum ActiveConfig {
    Internal(InternalConfig),
    External(ExternalConfig),
}

impl ActiveConfig {
    pub fn ignore_list(&self) -> &str {
        match self {
            ActiveConfig::Internal(c) => &c.ignore_list,
            ActiveConfig::External(c) => &c.ignore_list,
        }
    }

    pub fn set_ignore_list(&mut self, list: String) {
        match self {
            ActiveConfig::Internal(c) => c.ignore_list = list,
            ActiveConfig::External(c) => c.ignore_list = list,
        }
    }

    pub fn save(&self) -> Result<()> {
        match self {
            ActiveConfig::Internal(c) => c.save(),
            ActiveConfig::External(c) => c.save(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ActiveConfig::Internal(c) => c.path(),
            ActiveConfig::External(c) => c.path(),
        }
    }
}

/// Renames a corrupt document aside so its bytes stay recoverable.
fn quarantine(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("ignore-config");
    let backup_name = format!("{}.backup-{}.json", file_name, Utc::now().timestamp());
    let backup = path.with_file_name(backup_name);

    fs::rename(path, &backup).with_context(|| {
        format!(
            "Failed to quarantine corrupt ignore config: {}",
            path.display()
        )
    })?;

    Ok(backup)
}

fn write_doc<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(doc).context("Failed to serialize ignore config")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write ignore config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn internal_load_creates_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let config = InternalConfig::load(&path).unwrap();
        assert_eq!(config.ignore_list, "");
        assert!(config.external_path.is_none());
        assert!(path.is_file());

        // The persisted document round-trips.
        let reloaded = InternalConfig::load(&path).unwrap();
        assert_eq!(reloaded.ignore_list, "");
    }

    #[test]
    fn internal_corruption_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(InternalConfig::load(&path).is_err());
        // The corrupt file is left untouched.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn internal_persists_external_path_as_null_when_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        InternalConfig::load(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["external_ignored_file_path"].is_null());
    }

    #[test]
    fn internal_writes_kanji_literally() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let mut config = InternalConfig::load(&path).unwrap();
        config.ignore_list = "日本語".to_string();
        config.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("日本語"));
    }

    #[test]
    fn external_load_creates_empty_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ignored.json");

        let loaded = ExternalConfig::load(&path).unwrap();
        assert!(matches!(loaded, ExternalLoad::Loaded(_)));
        assert!(path.is_file());
    }

    #[test]
    fn external_load_fails_without_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("ignored.json");

        let err = ExternalConfig::load(&path).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn external_corruption_is_quarantined() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ignored.json");
        fs::write(&path, "truncated {").unwrap();

        let loaded = ExternalConfig::load(&path).unwrap();
        let backup = match loaded {
            ExternalLoad::Recreated {
                ref config,
                ref backup,
            } => {
                assert_eq!(config.ignore_list, "");
                backup.clone()
            }
            ExternalLoad::Loaded(_) => panic!("expected corruption recovery"),
        };

        // The bad bytes survive under the backup name.
        assert!(backup.is_file());
        let name = backup.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("ignored.json.backup-"));
        assert!(name.ends_with(".json"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "truncated {");

        // A fresh document took the original place.
        let reloaded = ExternalConfig::load(&path).unwrap();
        assert!(matches!(reloaded, ExternalLoad::Loaded(_)));
    }

    #[test]
    fn external_document_omits_external_path_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ignored.json");

        let mut config = ExternalConfig::load(&path).unwrap().into_config();
        config.ignore_list = "語".to_string();
        config.save().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("external_ignored_file_path").is_none());
        assert_eq!(raw["ignore_list"], "語");
    }
}
