//! Domain logic for kanjiextract
//!
//! Pure kanji classification, scanning and link generation, without any
//! I/O concerns.

mod kanji;
mod links;

pub use kanji::{is_kanji, scan, KanjiPartition};
pub use links::{jisho_links, LINK_BATCH_SIZE};
