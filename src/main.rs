//! Kanjiextract - extract kanji from text files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = kanjiextract::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
