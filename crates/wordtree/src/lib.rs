//! `wordtree` - multi-keyword matching with a character trie
//!
//! Keywords are inserted into a [`WordTreeBuilder`], frozen into a
//! [`WordTree`], and every occurrence in a text is reported in one
//! left-to-right pass. Stop characters such as punctuation and whitespace are
//! skipped inside matches, so `"a-b"` still matches the keyword `"ab"`.
//!
//! ```
//! use wordtree::{MatchMode, WordTree};
//!
//! let tree = WordTree::from_keywords(["ab"]);
//! let found = tree.scan("xx a-b", MatchMode::default(), 0);
//!
//! assert_eq!(found[0].keyword(), "ab");
//! assert_eq!(found[0].matched_text(), "a-b");
//! assert_eq!((found[0].start(), found[0].end()), (3, 5));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod found;
pub mod logging;
pub mod mode;
pub mod redact;
pub mod tree;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{is_not_stop_char, is_stop_char, AcceptAll, CharFilter, StopChars};
pub use found::FoundWord;
pub use logging::init_logging;
pub use mode::{Density, Greediness, MatchMode};
pub use redact::Redactor;
pub use tree::{WordTree, WordTreeBuilder};
