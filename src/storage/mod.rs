//! # Storage Layer
//!
//! Persistence for the kanji ignore list.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Internal config | JSON | `<data dir>/data.json` |
//! | External config | JSON | user-chosen path (optional) |
//! | Quarantined config | JSON | `<name>.backup-<unixtime>.json` |
//!
//! The internal document carries the ignore list plus an optional pointer
//! to an external document. When that pointer is set, the external
//! document becomes the *active* ignore list and the internal one stays
//! dormant. Resolution happens fresh on every operation; no document is
//! cached across calls.
//!
//! ## Corruption Policy
//!
//! A corrupt *external* document is never fatal: it is renamed aside with
//! a timestamp (quarantined) and replaced by a fresh empty document. A
//! corrupt *internal* document is a fatal configuration error.
//!
//! ## Key Types
//!
//! - [`ConfigStore`] - entry point; owns the internal path and all
//!   mutating operations
//! - [`InternalConfig`] / [`ExternalConfig`] - one loaded document each
//! - [`ActiveConfig`] - whichever document currently governs ignores
//! - [`ExternalLoad`] - tagged load result (`Loaded` vs `Recreated`)

mod config;
mod store;

pub use config::{
    ActiveConfig, ConfigError, ExternalConfig, ExternalLoad, InternalConfig,
    DEFAULT_EXTERNAL_FILE_NAME, INTERNAL_FILE_NAME,
};
pub use store::{ConfigStore, MergeOutcome, SetPathOutcome, DATA_DIR_ENV};
