//! Configuration management for wordtree.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::StopChars;
use crate::mode::MatchMode;
use crate::redact::{Redactor, DEFAULT_MASK};
use crate::tree::{WordTree, WordTreeBuilder};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "wordtree";

/// Environment variable prefix.
const ENV_PREFIX: &str = "WORDTREE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WORDTREE_`, sections split on `__`)
/// 2. TOML config file at `~/.config/wordtree/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching configuration.
    pub matching: MatchingConfig,
    /// Character filter configuration.
    pub filter: FilterConfig,
    /// Keyword sources.
    pub keywords: KeywordsConfig,
    /// Redaction configuration.
    pub redaction: RedactionConfig,
}

/// Matching-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Density and greediness, e.g. `"sparse-greedy"`.
    pub mode: MatchMode,
    /// Maximum number of matches to report.
    /// Set to 0 for unlimited.
    pub limit: usize,
}

/// Stop-character configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Start from the built-in stop-character table.
    pub use_default_stop_chars: bool,
    /// Additional stop characters, written as one string.
    pub extra_stop_chars: String,
    /// Treat every character as significant.
    pub accept_all: bool,
}

/// Where keywords come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    /// Inline keywords.
    pub words: Vec<String>,
    /// Keyword files, one keyword per line.
    /// Blank lines and lines starting with `#` are ignored.
    pub files: Vec<PathBuf>,
    /// Optional separator splitting each inline entry into several keywords.
    pub separator: Option<char>,
}

/// Redaction-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Character written over every matched character.
    pub mask: char,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            use_default_stop_chars: true,
            extra_stop_chars: String::new(),
            accept_all: false,
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self { mask: DEFAULT_MASK }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        debug!(path = %config_file.display(), "Configuration loaded");
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.filter.accept_all && !self.filter.extra_stop_chars.is_empty() {
            return Err(Error::config_validation(
                "filter.accept_all cannot be combined with filter.extra_stop_chars",
            ));
        }

        if self.redaction.mask.is_control() {
            return Err(Error::config_validation(format!(
                "redaction.mask must be a printable character, got {:?}",
                self.redaction.mask
            )));
        }

        Ok(())
    }

    /// Build the character filter described by `[filter]`.
    #[must_use]
    pub fn build_filter(&self) -> StopChars {
        if self.filter.accept_all {
            return StopChars::empty();
        }

        let mut filter = if self.filter.use_default_stop_chars {
            StopChars::default()
        } else {
            StopChars::empty()
        };
        filter.extend(self.filter.extra_stop_chars.chars());
        filter
    }

    /// Collect keywords from inline entries and keyword files.
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword file cannot be read.
    pub fn load_keywords(&self) -> Result<Vec<String>> {
        let mut keywords = Vec::new();

        for entry in &self.keywords.words {
            match self.keywords.separator {
                Some(sep) => keywords.extend(
                    entry
                        .split(sep)
                        .map(str::trim)
                        .filter(|w| !w.is_empty())
                        .map(String::from),
                ),
                None => keywords.push(entry.clone()),
            }
        }

        for path in &self.keywords.files {
            keywords.extend(read_keyword_file(path)?);
        }

        debug!(count = keywords.len(), "Keywords collected");
        Ok(keywords)
    }

    /// Build a word tree from the configured keywords and filter.
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword file cannot be read.
    pub fn build_tree(&self) -> Result<WordTree> {
        let keywords = self.load_keywords()?;
        let mut builder = WordTreeBuilder::new();
        builder.char_filter(self.build_filter());
        builder.insert_all(&keywords);
        Ok(builder.build())
    }

    /// Build a redactor from the configured tree, mask and mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword file cannot be read.
    pub fn build_redactor(&self) -> Result<Redactor> {
        Ok(Redactor::new(self.build_tree()?)
            .with_mask(self.redaction.mask)
            .with_mode(self.matching.mode))
    }
}

/// Read one keyword per line, skipping blanks and `#` comments.
fn read_keyword_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::KeywordFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
