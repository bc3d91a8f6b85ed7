//! The keyword trie and its scanning automaton.
//!
//! A [`WordTreeBuilder`] collects keywords; [`WordTreeBuilder::build`] freezes
//! it into a [`WordTree`] that only supports scanning. The frozen tree is
//! `Send + Sync` and can be shared across threads without locking.
//!
//! # Example
//!
//! ```
//! use wordtree::{MatchMode, WordTreeBuilder};
//!
//! let mut builder = WordTreeBuilder::new();
//! builder.insert_all(["say", "her", "he", "she", "shr"]);
//! let tree = builder.build();
//!
//! let found: Vec<_> = tree
//!     .scan("sasherhsay", MatchMode::SPARSE_GREEDY, 0)
//!     .into_iter()
//!     .map(|w| (w.keyword().to_string(), w.start(), w.end()))
//!     .collect();
//! assert_eq!(
//!     found,
//!     vec![("she".to_string(), 2, 4), ("say".to_string(), 7, 9)]
//! );
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::filter::{CharFilter, StopChars};
use crate::found::FoundWord;
use crate::mode::MatchMode;

/// One trie node.
///
/// A keyword end is recorded on the parent: `c` is in `terminal_chars` when
/// the child reached through `c` completes an inserted keyword. Keywords of
/// different lengths therefore share a single node chain.
///
/// Keywords can be arbitrarily long, so nothing here recurses over the
/// depth of the trie: walks, `Clone` and `Drop` all use an explicit stack.
#[derive(Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal_chars: HashSet<char>,
}

impl TrieNode {
    /// Add the path for `chars`, marking its last char as a keyword end.
    fn insert_chars(&mut self, chars: &[char]) {
        let Some((&last, prefix)) = chars.split_last() else {
            return;
        };

        let mut parent = self;
        for &c in prefix {
            parent = parent.children.entry(c).or_default();
        }
        parent.children.entry(last).or_default();
        parent.terminal_chars.insert(last);
    }

    /// Call `f` with every keyword under this node, depth first.
    fn for_each_keyword(&self, mut f: impl FnMut(&[char])) {
        let mut path: Vec<char> = Vec::new();
        let mut stack: Vec<(usize, char, bool, &TrieNode)> = self
            .children
            .iter()
            .map(|(&c, child)| (0, c, self.terminal_chars.contains(&c), child))
            .collect();

        while let Some((depth, c, terminal, node)) = stack.pop() {
            path.truncate(depth);
            path.push(c);
            if terminal {
                f(&path);
            }
            stack.extend(
                node.children
                    .iter()
                    .map(|(&c, child)| (depth + 1, c, node.terminal_chars.contains(&c), child)),
            );
        }
    }

    fn collect_keywords(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.for_each_keyword(|keyword| out.push(keyword.iter().collect()));
        out
    }

    fn count_keywords(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += node.terminal_chars.len();
            stack.extend(node.children.values());
        }
        count
    }
}

// Every node lies on some keyword's path, so replaying the keywords rebuilds
// an identical trie.
impl Clone for TrieNode {
    fn clone(&self) -> Self {
        let mut copy = Self::default();
        self.for_each_keyword(|keyword| copy.insert_chars(keyword));
        copy
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.children.drain().map(|(_, node)| node).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Mutable construction phase of a [`WordTree`].
#[derive(Clone)]
pub struct WordTreeBuilder {
    root: TrieNode,
    filter: Arc<dyn CharFilter>,
}

impl WordTreeBuilder {
    /// Create an empty builder using the default stop characters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            filter: Arc::new(StopChars::default()),
        }
    }

    /// Replace the character filter.
    ///
    /// Keywords inserted afterwards are walked with the new filter, and the
    /// built tree scans with whichever filter is set when
    /// [`build`](Self::build) is called.
    pub fn char_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: CharFilter + 'static,
    {
        self.filter = Arc::new(filter);
        self
    }

    /// Insert one keyword.
    ///
    /// Rejected characters are dropped from the keyword. A keyword left with
    /// no accepted characters inserts nothing. Inserting a keyword twice is a
    /// no-op the second time.
    pub fn insert(&mut self, keyword: impl AsRef<str>) -> &mut Self {
        let accepted: Vec<char> = keyword
            .as_ref()
            .chars()
            .filter(|&c| self.filter.accepts(c))
            .collect();

        if accepted.is_empty() {
            trace!(keyword = keyword.as_ref(), "Keyword has no accepted chars");
            return self;
        }

        self.root.insert_chars(&accepted);
        self
    }

    /// Insert every keyword from an iterator.
    pub fn insert_all<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            self.insert(keyword);
        }
        self
    }

    /// Split `words` on `separator` and insert each trimmed, non-empty piece.
    pub fn insert_separated(&mut self, words: &str, separator: char) -> &mut Self {
        self.insert_all(
            words
                .split(separator)
                .map(str::trim)
                .filter(|w| !w.is_empty()),
        )
    }

    /// Freeze the builder into a scannable tree.
    #[must_use]
    pub fn build(self) -> WordTree {
        let tree = WordTree {
            root: self.root,
            filter: self.filter,
        };
        debug!(keywords = tree.keyword_count(), "Word tree built");
        tree
    }
}

impl Default for WordTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WordTreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordTreeBuilder")
            .field("keywords", &self.root.count_keywords())
            .finish_non_exhaustive()
    }
}

/// Immutable keyword automaton.
#[derive(Clone)]
pub struct WordTree {
    root: TrieNode,
    filter: Arc<dyn CharFilter>,
}

impl WordTree {
    /// Shorthand for building a tree from a keyword list with the default
    /// filter.
    #[must_use]
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = WordTreeBuilder::new();
        builder.insert_all(keywords);
        builder.build()
    }

    /// Check if any keyword occurs in `text`.
    #[must_use]
    pub fn contains_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// The first match in `text`, if any.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<FoundWord> {
        self.scan(text, MatchMode::default(), 1).into_iter().next()
    }

    /// Every match in `text`, dense and greedy.
    #[must_use]
    pub fn find_all(&self, text: &str) -> Vec<FoundWord> {
        self.scan(text, MatchMode::default(), 0)
    }

    /// Scan `text` and report matches under `mode`.
    ///
    /// Matches come out ordered by start index, and by extension order for a
    /// shared start. Scanning stops once `limit` matches have been found; a
    /// `limit` of zero means no limit.
    ///
    /// For each candidate start `i`, characters are consumed left to right:
    ///
    /// - a rejected character at the candidate start ends the attempt; inside
    ///   a match it is carried into the matched text;
    /// - an accepted character with no child edge ends the attempt;
    /// - when a keyword ends, it is reported. Sparse mode then resumes at the
    ///   character after the match; lazy mode ends the attempt; dense greedy
    ///   keeps extending.
    #[must_use]
    pub fn scan(&self, text: &str, mode: MatchMode, limit: usize) -> Vec<FoundWord> {
        let chars: Vec<char> = text.chars().collect();
        let mut found = Vec::new();
        let mut matched = String::new();
        let mut keyword = String::new();

        let mut i = 0;
        'starts: while i < chars.len() {
            let mut current = &self.root;
            matched.clear();
            keyword.clear();

            for (j, &c) in chars.iter().enumerate().skip(i) {
                if !self.filter.accepts(c) {
                    if matched.is_empty() {
                        break;
                    }
                    matched.push(c);
                    continue;
                }

                let Some(child) = current.children.get(&c) else {
                    break;
                };
                matched.push(c);
                keyword.push(c);

                if current.terminal_chars.contains(&c) {
                    trace!(keyword = %keyword, start = i, end = j, "Keyword matched");
                    found.push(FoundWord::from_scan(keyword.clone(), matched.clone(), i, j));

                    if limit > 0 && found.len() >= limit {
                        break 'starts;
                    }
                    if mode.is_sparse() {
                        i = j;
                        break;
                    }
                    if mode.is_lazy() {
                        break;
                    }
                }

                current = child;
            }

            i += 1;
        }

        debug!(
            chars = chars.len(),
            matches = found.len(),
            mode = %mode,
            "Scan complete"
        );
        found
    }

    /// All canonical keywords held by the tree, sorted.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        let mut out = self.root.collect_keywords();
        out.sort_unstable();
        out
    }

    /// Number of distinct canonical keywords.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.root.count_keywords()
    }

    /// True when no keyword was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// The filter used while scanning.
    #[must_use]
    pub fn char_filter(&self) -> &dyn CharFilter {
        self.filter.as_ref()
    }

    /// Thaw the tree to insert more keywords.
    #[must_use]
    pub fn into_builder(self) -> WordTreeBuilder {
        WordTreeBuilder {
            root: self.root,
            filter: self.filter,
        }
    }
}

impl Default for WordTree {
    fn default() -> Self {
        WordTreeBuilder::new().build()
    }
}

impl fmt::Debug for WordTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordTree")
            .field("keywords", &self.keyword_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::AcceptAll;

    fn tree(words: &[&str]) -> WordTree {
        WordTree::from_keywords(words)
    }

    fn spans(found: &[FoundWord]) -> Vec<(&str, usize, usize)> {
        found
            .iter()
            .map(|w| (w.keyword(), w.start(), w.end()))
            .collect()
    }

    const SHE: &[&str] = &["say", "her", "he", "she", "shr"];

    #[test]
    fn test_terminal_recorded_on_parent() {
        let tree = tree(&["ab"]);
        let a = &tree.root.children[&'a'];
        assert!(tree.root.terminal_chars.is_empty());
        assert!(a.terminal_chars.contains(&'b'));
        assert!(a.children[&'b'].terminal_chars.is_empty());
    }

    #[test]
    fn test_shared_prefix_shares_nodes() {
        let tree = tree(&["he", "her"]);
        assert_eq!(tree.root.children.len(), 1);
        let h = &tree.root.children[&'h'];
        assert_eq!(h.children.len(), 1);
        assert!(h.terminal_chars.contains(&'e'));
        assert!(h.children[&'e'].terminal_chars.contains(&'r'));
    }

    #[test]
    fn test_dense_greedy() {
        let found = tree(SHE).scan("sasherhsay", MatchMode::DENSE_GREEDY, 0);
        assert_eq!(
            spans(&found),
            vec![("she", 2, 4), ("he", 3, 4), ("her", 3, 5), ("say", 7, 9)]
        );
    }

    #[test]
    fn test_sparse_greedy() {
        let found = tree(SHE).scan("sasherhsay", MatchMode::SPARSE_GREEDY, 0);
        assert_eq!(spans(&found), vec![("she", 2, 4), ("say", 7, 9)]);
    }

    #[test]
    fn test_dense_lazy_restarts_next_char() {
        let found = tree(SHE).scan("sasherhsay", MatchMode::DENSE_LAZY, 0);
        assert_eq!(spans(&found), vec![("she", 2, 4), ("he", 3, 4), ("say", 7, 9)]);
    }

    #[test]
    fn test_sparse_lazy() {
        let found = tree(&["a", "ab", "b"]).scan("abab", MatchMode::SPARSE_LAZY, 0);
        assert_eq!(spans(&found), vec![("a", 0, 0), ("b", 1, 1), ("a", 2, 2), ("b", 3, 3)]);
    }

    #[test]
    fn test_greedy_extends_past_shorter_keyword() {
        let found = tree(&["a", "ab"]).scan("ab", MatchMode::DENSE_GREEDY, 0);
        assert_eq!(spans(&found), vec![("a", 0, 0), ("ab", 0, 1)]);

        let found = tree(&["a", "ab"]).scan("ab", MatchMode::DENSE_LAZY, 0);
        assert_eq!(spans(&found), vec![("a", 0, 0)]);
    }

    #[test]
    fn test_stop_char_inside_match() {
        let found = tree(&["ab"]).find_all("a-b");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keyword(), "ab");
        assert_eq!(found[0].matched_text(), "a-b");
        assert_eq!((found[0].start(), found[0].end()), (0, 2));
    }

    #[test]
    fn test_leading_stop_chars_are_skipped() {
        let found = tree(&["ab"]).find_all("--ab");
        assert_eq!(spans(&found), vec![("ab", 2, 3)]);
        assert_eq!(found[0].matched_text(), "ab");
    }

    #[test]
    fn test_trailing_stop_chars_not_reported() {
        let found = tree(&["ab"]).find_all("ab--");
        assert_eq!(found[0].matched_text(), "ab");
        assert_eq!(found[0].end(), 1);
    }

    #[test]
    fn test_stop_chars_carried_into_longer_match() {
        let found = tree(&["a", "ab"]).find_all("a b");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].matched_text(), "a b");
        assert_eq!(found[1].end(), 2);
    }

    #[test]
    fn test_stop_chars_in_keyword_are_dropped() {
        let tree = tree(&["a-b", "c d"]);
        assert_eq!(tree.keywords(), vec!["ab".to_string(), "cd".to_string()]);
        assert!(tree.contains_match("ab"));
    }

    #[test]
    fn test_keyword_of_only_stop_chars_inserts_nothing() {
        let tree = tree(&["--", " ", ""]);
        assert!(tree.is_empty());
        assert_eq!(tree.keyword_count(), 0);
        assert!(tree.find_all("-- ").is_empty());
    }

    #[test]
    fn test_accept_all_filter() {
        let mut builder = WordTreeBuilder::new();
        builder.char_filter(AcceptAll).insert("a-b");
        let tree = builder.build();
        assert_eq!(tree.keywords(), vec!["a-b".to_string()]);
        assert!(tree.find_all("a b").is_empty());
        assert_eq!(tree.find_all("xa-b")[0].start(), 1);
    }

    #[test]
    fn test_limit() {
        let tree = tree(SHE);
        assert_eq!(tree.scan("sasherhsay", MatchMode::DENSE_GREEDY, 2).len(), 2);
        assert_eq!(tree.scan("sasherhsay", MatchMode::DENSE_GREEDY, 100).len(), 4);
    }

    #[test]
    fn test_first_match() {
        let tree = tree(SHE);
        let first = tree.first_match("sasherhsay").unwrap();
        assert_eq!((first.keyword(), first.start(), first.end()), ("she", 2, 4));
        assert!(tree.first_match("nothing here").is_none());
    }

    #[test]
    fn test_contains_match() {
        let tree = tree(SHE);
        assert!(tree.contains_match("she sells"));
        assert!(!tree.contains_match("sea shells"));
    }

    #[test]
    fn test_empty_text_and_empty_tree() {
        assert!(tree(SHE).find_all("").is_empty());
        assert!(WordTree::default().find_all("anything").is_empty());
        assert!(!WordTree::default().contains_match("anything"));
    }

    #[test]
    fn test_indices_are_char_based() {
        let found = tree(&["土豆"]).find_all("我有土豆");
        assert_eq!(spans(&found), vec![("土豆", 2, 3)]);
    }

    #[test]
    fn test_keywords_flatten() {
        let tree = tree(&["her", "he", "he", "say"]);
        assert_eq!(
            tree.keywords(),
            vec!["he".to_string(), "her".to_string(), "say".to_string()]
        );
        assert_eq!(tree.keyword_count(), 3);
    }

    #[test]
    fn test_insert_separated() {
        let mut builder = WordTreeBuilder::new();
        builder.insert_separated("foo, bar,,baz ", ',');
        let tree = builder.build();
        assert_eq!(tree.keywords(), vec!["bar", "baz", "foo"]);
    }

    #[test]
    fn test_into_builder_adds_keywords() {
        let tree = tree(&["he"]);
        let mut builder = tree.into_builder();
        builder.insert("she");
        let tree = builder.build();
        assert_eq!(tree.keyword_count(), 2);
        assert!(tree.contains_match("ashe"));
    }

    #[test]
    fn test_filter_changed_after_insert_applies_to_scan() {
        let mut builder = WordTreeBuilder::new();
        builder.insert("ab");
        builder.char_filter(|c: char| c != '*');
        let tree = builder.build();
        assert!(tree.contains_match("a*b"));
        assert!(!tree.contains_match("a-b"));
        assert!(!tree.char_filter().accepts('*'));
    }

    #[test]
    fn test_clone_keeps_every_keyword() {
        let original = tree(SHE);
        let copy = original.clone();
        assert_eq!(copy.keywords(), original.keywords());
        assert_eq!(copy.find_all("sasherhsay"), original.find_all("sasherhsay"));
        drop(original);
        assert_eq!(copy.keyword_count(), 5);
    }

    #[test]
    fn test_very_long_keyword_does_not_overflow_stack() {
        let long = format!("b{}", "a".repeat(100_000));
        let tree = tree(&[long.as_str(), "ba"]);
        assert_eq!(tree.keyword_count(), 2);
        assert_eq!(tree.keywords().last().map(String::len), Some(long.len()));

        let found = tree.scan(&long, MatchMode::DENSE_GREEDY, 0);
        assert_eq!(spans(&found), vec![("ba", 0, 1), (long.as_str(), 0, 100_000)]);

        let copy = tree.clone();
        drop(tree);
        assert!(copy.contains_match(&long));
        drop(copy);
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WordTree>();
    }

    #[test]
    fn test_concurrent_scans() {
        let tree = tree(SHE);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| tree.find_all("sasherhsay").len()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 4);
            }
        });
    }

    #[test]
    fn test_debug() {
        let debug_str = format!("{:?}", tree(SHE));
        assert!(debug_str.contains("WordTree"));
        assert!(debug_str.contains("keywords: 5"));
    }
}
