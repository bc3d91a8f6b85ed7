//! `wordscan` - CLI for wordtree
//!
//! This binary scans or redacts text using keywords from the configuration
//! file, the environment and the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use wordtree::cli::{
    CheckCommand, Cli, Command, ConfigCommand, KeywordArgs, OutputFormat, RedactCommand,
    ScanCommand,
};
use wordtree::{init_logging, Config, WordTree};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Scan(scan_cmd) => handle_scan(config, scan_cmd),
        Command::Check(check_cmd) => handle_check(config, check_cmd),
        Command::Redact(redact_cmd) => handle_redact(config, redact_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Fold command-line keyword sources into the loaded configuration.
fn with_keywords(mut config: Config, args: KeywordArgs) -> Config {
    config.keywords.words.extend(args.keywords);
    config.keywords.files.extend(args.words_files);
    config
}

fn build_tree(config: &Config) -> anyhow::Result<WordTree> {
    let tree = config.build_tree()?;
    if tree.is_empty() {
        warn!("No keywords configured; nothing will match");
    }
    Ok(tree)
}

fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

fn handle_scan(config: Config, cmd: ScanCommand) -> anyhow::Result<ExitCode> {
    let config = with_keywords(config, cmd.keywords);
    let tree = build_tree(&config)?;
    let text = read_text(cmd.text)?;

    let mode = cmd.mode.unwrap_or(config.matching.mode);
    let limit = cmd.limit.unwrap_or(config.matching.limit);
    let found = tree.scan(&text, mode, limit);

    match cmd.format {
        OutputFormat::Plain => {
            for word in &found {
                println!(
                    "{}\t{}\t{}\t{}",
                    word.start(),
                    word.end(),
                    word.keyword(),
                    word.matched_text()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_check(config: Config, cmd: CheckCommand) -> anyhow::Result<ExitCode> {
    let config = with_keywords(config, cmd.keywords);
    let tree = build_tree(&config)?;
    let text = read_text(cmd.text)?;

    let found = tree.contains_match(&text);
    println!("{found}");
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_redact(config: Config, cmd: RedactCommand) -> anyhow::Result<ExitCode> {
    let mut config = with_keywords(config, cmd.keywords);
    if let Some(mode) = cmd.mode {
        config.matching.mode = mode;
    }
    if let Some(mask) = cmd.mask {
        config.redaction.mask = mask;
    }
    config.validate()?;

    let redactor = config.build_redactor()?;
    if redactor.tree().is_empty() {
        warn!("No keywords configured; nothing will be redacted");
    }
    let text = read_text(cmd.text)?;
    print!("{}", redactor.redact(&text));
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Matching]");
                println!("  Mode:               {}", config.matching.mode);
                println!("  Limit:              {}", config.matching.limit);
                println!();
                println!("[Filter]");
                println!(
                    "  Default stop chars: {}",
                    config.filter.use_default_stop_chars
                );
                println!("  Extra stop chars:   {:?}", config.filter.extra_stop_chars);
                println!("  Accept all:         {}", config.filter.accept_all);
                println!();
                println!("[Keywords]");
                println!("  Inline words:       {}", config.keywords.words.len());
                println!("  Keyword files:      {}", config.keywords.files.len());
                println!();
                println!("[Redaction]");
                println!("  Mask:               {}", config.redaction.mask);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)).and_then(|c| c.load_keywords()) {
                Ok(keywords) => {
                    println!("Configuration is valid ({} keywords).", keywords.len());
                }
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
