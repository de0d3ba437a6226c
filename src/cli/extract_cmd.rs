//! `extract` command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::jisho_links;
use crate::extract::{self, ExtractError};
use crate::storage::ConfigStore;

pub fn run(output: &Output, filepath: &Path, all: bool) -> Result<()> {
    let store = ConfigStore::open_default()?;

    let result = match extract::extract(&store, filepath, !all) {
        Ok(result) => result,
        Err(err @ ExtractError::NotText { .. }) => {
            // Not a text file is reported, never fatal.
            output.warn(&err.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let partition = &result.partition;
    let links = jisho_links(&partition.kept);

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": result.path.display().to_string(),
            "kept": partition.kept,
            "ignored": partition.ignored,
            "found": partition.kept_count(),
            "ignored_count": partition.ignored_count(),
            "total": partition.total(),
            "links": links,
        }));
        return Ok(());
    }

    println!(
        "Found {} kanji ({} ignored, {} total):",
        partition.kept_count(),
        partition.ignored_count(),
        partition.total()
    );
    println!("{}", spaced(&partition.kept));
    println!();
    println!("jisho.org links:");
    for link in &links {
        println!("{}", link);
        println!();
    }

    Ok(())
}

fn spaced(kanji: &str) -> String {
    let chars: Vec<String> = kanji.chars().map(String::from).collect();
    chars.join(" ")
}
