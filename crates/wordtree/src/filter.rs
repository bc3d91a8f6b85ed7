//! Character filter policies.
//!
//! A filter decides which characters take part in keyword matching. Rejected
//! characters ("stop characters") never become trie edges, but when they show
//! up inside an in-progress match they are carried into the reported matched
//! text, so `"a-b"` still matches the keyword `"ab"`.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Predicate deciding whether a character participates in keyword matching.
///
/// Any `Fn(char) -> bool` closure that is `Send + Sync` is a filter:
///
/// ```
/// use wordtree::{CharFilter, WordTreeBuilder};
///
/// let mut builder = WordTreeBuilder::new();
/// builder.char_filter(|c: char| c != '_');
/// builder.insert("ab");
/// let tree = builder.build();
///
/// assert!(tree.contains_match("a_b"));
/// assert!((|c: char| c != '_').accepts('a'));
/// ```
pub trait CharFilter: Send + Sync {
    /// Returns `true` if `c` advances the trie walk.
    fn accepts(&self, c: char) -> bool;
}

impl<F> CharFilter for F
where
    F: Fn(char) -> bool + Send + Sync,
{
    fn accepts(&self, c: char) -> bool {
        self(c)
    }
}

/// Filter that accepts every character, disabling stop-character skipping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl CharFilter for AcceptAll {
    fn accepts(&self, _c: char) -> bool {
        true
    }
}

/// Built-in stop characters: ASCII and full-width punctuation, math and
/// currency symbols, shapes, arrows, box drawing and enumerated numerals.
const DEFAULT_STOP_CHARS: &[char] = &[
    // ASCII punctuation
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
    // CJK and full-width punctuation
    '、', '。', '·', 'ˉ', 'ˇ', '々', '—', '～', '‖', '…', '‘', '’', '“', '”', '〃', '〔', '〕',
    '〈', '〉', '《', '》', '「', '」', '『', '』', '〖', '〗', '【', '】', '！', '＂', '＃', '％',
    '＆', '＇', '（', '）', '＊', '，', '．', '／', '：', '；', '＜', '＝', '＞', '？', '＠', '［',
    '＼', '］', '＾', '＿', '｀', '｛', '｜', '｝', '￣',
    // Math
    '±', '＋', '－', '×', '÷', '∧', '∨', '∑', '∏', '∪', '∩', '∈', '√', '⊥', '⊙', '∫', '∮', '≡',
    '≌', '≈', '∽', '∝', '≠', '≮', '≯', '≤', '≥', '∞', '∶', '∵', '∴', '∷',
    // Units, currency and misc symbols
    '♂', '♀', '°', '′', '″', '℃', '＄', '¤', '￠', '￡', '‰', '§', '№', '※', '〓',
    // Shapes
    '☆', '★', '〇', '○', '●', '◎', '◇', '◆', '□', '■', '△', '▽', '⊿', '▲', '▼', '◣', '◤', '◢',
    '◥', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█', '▉', '▊', '▋', '▌', '▍', '▎', '▏', '▓',
    // Arrows
    '→', '←', '↑', '↓', '↖', '↗', '↘', '↙',
    // Box drawing
    '─', '━', '│', '┃', '┄', '┅', '┆', '┇', '┈', '┉', '┊', '┋', '┌', '┍', '┎', '┏', '┐', '┑',
    '┒', '┓', '└', '┕', '┖', '┗', '┘', '┙', '┚', '┛', '├', '┝', '┞', '┟', '┠', '┡', '┢', '┣',
    '┤', '┥', '┦', '┧', '┨', '┩', '┪', '┫', '┬', '┭', '┮', '┯', '┰', '┱', '┲', '┳', '┴', '┵',
    '┶', '┷', '┸', '┹', '┺', '┻', '┼', '┽', '┾', '┿', '╀', '╁', '╂', '╃', '╄', '╅', '╆', '╇',
    '╈', '╉', '╊', '╋',
    // Enumerated numerals
    'ⅰ', 'ⅱ', 'ⅲ', 'ⅳ', 'ⅴ', 'ⅵ', 'ⅶ', 'ⅷ', 'ⅸ', 'ⅹ', 'Ⅰ', 'Ⅱ', 'Ⅲ', 'Ⅳ', 'Ⅴ', 'Ⅵ', 'Ⅶ', 'Ⅷ',
    'Ⅸ', 'Ⅹ', 'Ⅺ', 'Ⅻ', '①', '②', '③', '④', '⑤', '⑥', '⑦', '⑧', '⑨', '⑩', '⑴', '⑵', '⑶', '⑷',
    '⑸', '⑹', '⑺', '⑻', '⑼', '⑽', '⑾', '⑿', '⒀', '⒁', '⒂', '⒃', '⒄', '⒅', '⒆', '⒇', '⒈', '⒉',
    '⒊', '⒋', '⒌', '⒍', '⒎', '⒏', '⒐', '⒑', '⒒', '⒓', '⒔', '⒕', '⒖', '⒗', '⒘', '⒙', '⒚', '⒛',
    '㈠', '㈡', '㈢', '㈣', '㈤', '㈥', '㈦', '㈧', '㈨', '㈩',
];

static DEFAULT_STOP_SET: LazyLock<HashSet<char>> =
    LazyLock::new(|| DEFAULT_STOP_CHARS.iter().copied().collect());

/// Check if a character is one of the built-in stop characters.
///
/// Whitespace of any kind counts as a stop character.
#[must_use]
pub fn is_stop_char(c: char) -> bool {
    c.is_whitespace() || DEFAULT_STOP_SET.contains(&c)
}

/// Inverse of [`is_stop_char`].
#[must_use]
pub fn is_not_stop_char(c: char) -> bool {
    !is_stop_char(c)
}

/// Set-backed filter rejecting a configurable collection of stop characters.
#[derive(Clone, PartialEq, Eq)]
pub struct StopChars {
    chars: HashSet<char>,
    whitespace: bool,
}

impl StopChars {
    /// A filter that rejects nothing until characters are added.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            chars: HashSet::new(),
            whitespace: false,
        }
    }

    /// A filter rejecting exactly the given characters.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            chars: chars.into_iter().collect(),
            whitespace: false,
        }
    }

    /// Add one stop character.
    #[must_use]
    pub fn with(mut self, c: char) -> Self {
        self.chars.insert(c);
        self
    }

    /// Add several stop characters.
    pub fn extend<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.chars.extend(chars);
    }

    /// Whether `c` is rejected by this filter.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        (self.whitespace && c.is_whitespace()) || self.chars.contains(&c)
    }

    /// Number of explicitly listed stop characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when no explicit stop characters are listed and whitespace is
    /// not rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && !self.whitespace
    }
}

impl Default for StopChars {
    fn default() -> Self {
        Self {
            chars: DEFAULT_STOP_SET.clone(),
            whitespace: true,
        }
    }
}

impl CharFilter for StopChars {
    fn accepts(&self, c: char) -> bool {
        !self.contains(c)
    }
}

impl fmt::Debug for StopChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopChars")
            .field("len", &self.chars.len())
            .field("whitespace", &self.whitespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_punctuation() {
        let filter = StopChars::default();
        for c in ['-', '$', '^', '，', '。', '!', '【'] {
            assert!(!filter.accepts(c), "{c:?} should be a stop char");
        }
    }

    #[test]
    fn test_default_rejects_whitespace() {
        let filter = StopChars::default();
        assert!(!filter.accepts(' '));
        assert!(!filter.accepts('\t'));
        assert!(!filter.accepts('\n'));
        assert!(!filter.accepts('\u{3000}'));
    }

    #[test]
    fn test_default_accepts_words() {
        let filter = StopChars::default();
        for c in ['a', 'Z', '0', '大', '土', 'é'] {
            assert!(filter.accepts(c), "{c:?} should be accepted");
        }
    }

    #[test]
    fn test_is_stop_char_matches_default() {
        let filter = StopChars::default();
        for c in ['a', '-', ' ', '豆', '※', '⑤'] {
            assert_eq!(is_stop_char(c), !filter.accepts(c));
            assert_eq!(is_not_stop_char(c), filter.accepts(c));
        }
    }

    #[test]
    fn test_empty_accepts_everything() {
        let filter = StopChars::empty();
        assert!(filter.is_empty());
        assert!(filter.accepts('-'));
        assert!(filter.accepts(' '));
    }

    #[test]
    fn test_from_chars_and_with() {
        let filter = StopChars::from_chars(['x', 'y']).with('z');
        assert_eq!(filter.len(), 3);
        assert!(!filter.accepts('x'));
        assert!(!filter.accepts('z'));
        assert!(filter.accepts('-'));
    }

    #[test]
    fn test_extend() {
        let mut filter = StopChars::empty();
        filter.extend("#@".chars());
        assert!(filter.contains('#'));
        assert!(filter.contains('@'));
        assert!(!filter.contains('a'));
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.accepts('-'));
        assert!(AcceptAll.accepts(' '));
    }

    #[test]
    fn test_closure_filter() {
        let filter = |c: char| c.is_ascii_alphabetic();
        assert!(filter.accepts('q'));
        assert!(!filter.accepts('1'));
    }

    #[test]
    fn test_stop_chars_debug() {
        let debug_str = format!("{:?}", StopChars::from_chars(['a']));
        assert!(debug_str.contains("StopChars"));
        assert!(debug_str.contains("len: 1"));
    }
}
