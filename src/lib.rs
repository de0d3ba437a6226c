//! Kanjiextract - Pull kanji out of text files
//!
//! Scans text files for CJK kanji, filters them against a persisted
//! ignore list and builds jisho.org search links for the rest. The
//! ignore list lives in a small JSON config store with an optional
//! user-relocatable external file.

pub mod cli;
pub mod domain;
pub mod extract;
pub mod storage;

pub use domain::{is_kanji, jisho_links};
pub use extract::{extract, ExtractError, ExtractionResult};
pub use storage::{ConfigStore, ConfigError};
