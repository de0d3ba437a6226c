//! jisho.org search link generation
//!
//! Kanji are batched into fixed-size chunks so one link covers several
//! characters; jisho.org treats the `#kanji` suffix as a request for the
//! kanji details view.

/// Number of kanji packed into a single search link.
pub const LINK_BATCH_SIZE: usize = 10;

/// Builds jisho.org search links for the given kanji, preserving order.
///
/// Characters are chunked into batches of [`LINK_BATCH_SIZE`]; each batch
/// is percent-encoded together with the `#kanji` suffix. Empty input
/// produces no links.
pub fn jisho_links(kanji: &str) -> Vec<String> {
    let chars: Vec<char> = kanji.chars().collect();

    chars
        .chunks(LINK_BATCH_SIZE)
        .map(|chunk| {
            let batch: String = chunk.iter().collect();
            let query = format!("{}#kanji", batch);
            format!("https://jisho.org/search/{}", urlencoding::encode(&query))
        })
        .collect()
}
