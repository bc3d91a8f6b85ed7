//! Sensitive-word redaction on top of a [`WordTree`].
//!
//! Every match is masked character for character, including stop characters
//! caught inside the match, so the redacted text keeps its length and any
//! overlapping matches simply mask the same characters twice.
//!
//! ```
//! use wordtree::{Redactor, WordTree};
//!
//! let tree = WordTree::from_keywords(["大", "大土豆", "土豆", "刚出锅", "出锅"]);
//! let redactor = Redactor::new(tree);
//!
//! assert_eq!(redactor.redact("我有一颗$大土^豆，刚出锅的"), "我有一颗$****，***的");
//! ```

use tracing::debug;

use crate::found::FoundWord;
use crate::mode::{Density, MatchMode};
use crate::tree::WordTree;

/// Default mask character.
pub const DEFAULT_MASK: char = '*';

/// Masks keyword occurrences in text.
#[derive(Debug, Clone)]
pub struct Redactor {
    tree: WordTree,
    mask: char,
    mode: MatchMode,
}

impl Redactor {
    /// Create a redactor masking with `*` in dense greedy mode.
    #[must_use]
    pub fn new(tree: WordTree) -> Self {
        Self {
            tree,
            mask: DEFAULT_MASK,
            mode: MatchMode::default(),
        }
    }

    /// Use a different mask character.
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    /// Use a different match mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// The underlying word tree.
    #[must_use]
    pub fn tree(&self) -> &WordTree {
        &self.tree
    }

    /// Check if `text` contains any sensitive word.
    #[must_use]
    pub fn contains_sensitive(&self, text: &str) -> bool {
        self.tree.contains_match(text)
    }

    /// The first sensitive word in `text`.
    #[must_use]
    pub fn first_sensitive(&self, text: &str) -> Option<FoundWord> {
        self.tree.first_match(text)
    }

    /// All sensitive words in `text` under the configured mode.
    #[must_use]
    pub fn all_sensitive(&self, text: &str) -> Vec<FoundWord> {
        self.tree.scan(text, self.mode, 0)
    }

    /// Replace every matched character with the mask.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        let found = self.all_sensitive(text);
        if found.is_empty() {
            return text.to_string();
        }

        let mut chars: Vec<char> = text.chars().collect();
        for word in &found {
            chars[word.span()].fill(self.mask);
        }

        debug!(matches = found.len(), "Text redacted");
        chars.into_iter().collect()
    }

    /// Replace each match with the output of `replace`.
    ///
    /// Replacements may change the text length, so matching is forced to
    /// sparse density to keep spans disjoint.
    pub fn redact_with<F>(&self, text: &str, replace: F) -> String
    where
        F: Fn(&FoundWord) -> String,
    {
        let mode = MatchMode::new(Density::Sparse, self.mode.greediness);
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        for word in self.tree.scan(text, mode, 0) {
            out.extend(&chars[cursor..word.start()]);
            out.push_str(&replace(&word));
            cursor = word.end() + 1;
        }
        out.extend(&chars[cursor..]);
        out
    }
}
