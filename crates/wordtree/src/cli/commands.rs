//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::mode::MatchMode;

/// Keyword sources given on the command line.
///
/// These are added to whatever the configuration file already lists.
#[derive(Debug, Clone, Default, Args)]
pub struct KeywordArgs {
    /// Keyword to look for (repeatable)
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// File with one keyword per line (repeatable)
    #[arg(short = 'w', long = "words-file", value_name = "FILE")]
    pub words_files: Vec<PathBuf>,
}

/// Scan command arguments.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Text to scan (reads stdin when omitted)
    pub text: Option<String>,

    /// Extra keyword sources.
    #[command(flatten)]
    pub keywords: KeywordArgs,

    /// Match mode: dense-greedy, dense-lazy, sparse-greedy or sparse-lazy
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<MatchMode>,

    /// Maximum number of matches (0 for unlimited)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Text to check (reads stdin when omitted)
    pub text: Option<String>,

    /// Extra keyword sources.
    #[command(flatten)]
    pub keywords: KeywordArgs,
}

/// Redact command arguments.
#[derive(Debug, Args)]
pub struct RedactCommand {
    /// Text to redact (reads stdin when omitted)
    pub text: Option<String>,

    /// Extra keyword sources.
    #[command(flatten)]
    pub keywords: KeywordArgs,

    /// Match mode used to find words to mask
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<MatchMode>,

    /// Mask character
    #[arg(long)]
    pub mask: Option<char>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated match per line
    #[default]
    Plain,
    /// JSON array
    Json,
}

fn parse_mode(s: &str) -> Result<MatchMode, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}
