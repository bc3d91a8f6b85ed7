//! Command-line interface for wordtree.
//!
//! This module provides the CLI structure for the `wordscan` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, KeywordArgs, OutputFormat, RedactCommand, ScanCommand,
};

/// wordscan - Find and mask keywords in text
///
/// Builds a keyword trie from the configured word lists and scans text for
/// every occurrence, skipping punctuation and whitespace inside matches.
#[derive(Debug, Parser)]
#[command(name = "wordscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report every keyword occurrence
    Scan(ScanCommand),

    /// Report whether any keyword occurs (exit status 1 if none)
    Check(CheckCommand),

    /// Mask keyword occurrences
    Redact(RedactCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
