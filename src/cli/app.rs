//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{extract_cmd, ignore};

#[derive(Parser)]
#[command(name = "kanjiextract")]
#[command(author, version, about = "Extract kanji from text files and build jisho.org search links")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find all kanji in a file and build jisho.org search links
    Extract {
        /// File to scan
        filepath: PathBuf,

        /// Skip the ignore list and report every kanji
        #[arg(long)]
        all: bool,
    },

    /// Manage the kanji ignore list
    #[command(subcommand)]
    Ignore(ignore::IgnoreCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Kanjiextract starting");

    match cli.command {
        Commands::Extract { filepath, all } => {
            output.verbose_ctx(
                "extract",
                &format!("Scanning {} (use ignore list: {})", filepath.display(), !all),
            );
            extract_cmd::run(&output, &filepath, all)?
        }

        Commands::Ignore(cmd) => ignore::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
