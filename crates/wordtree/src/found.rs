//! Match results reported by a scan.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One located keyword occurrence.
///
/// Offsets are inclusive and counted in `char`s of the scanned text. The
/// matched text is the literal span between them and may contain stop
/// characters that the keyword itself does not. `start <= end` always holds
/// and the matched text is exactly `end - start + 1` characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFoundWord")]
pub struct FoundWord {
    keyword: String,
    matched_text: String,
    start: usize,
    end: usize,
}

/// Unchecked wire form of a [`FoundWord`].
#[derive(Deserialize)]
struct RawFoundWord {
    keyword: String,
    matched_text: String,
    start: usize,
    end: usize,
}

impl FoundWord {
    /// Create a match result, checking that the span is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `end < start` or if
    /// `matched_text` is not exactly as long as the span.
    pub fn new(
        keyword: impl Into<String>,
        matched_text: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Result<Self> {
        let matched_text = matched_text.into();
        if end < start {
            return Err(Error::invalid_argument(format!(
                "match end {end} is before start {start}"
            )));
        }
        let width = matched_text.chars().count();
        if width != end - start + 1 {
            return Err(Error::invalid_argument(format!(
                "matched text has {width} chars but span {start}..={end} covers {}",
                end - start + 1
            )));
        }
        Ok(Self::from_scan(keyword.into(), matched_text, start, end))
    }

    /// Build a result the scanner already knows to be consistent.
    pub(crate) fn from_scan(
        keyword: String,
        matched_text: String,
        start: usize,
        end: usize,
    ) -> Self {
        debug_assert!(start <= end);
        Self {
            keyword,
            matched_text,
            start,
            end,
        }
    }

    /// The canonical keyword, without stop characters.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The literal text covered by the match.
    #[must_use]
    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }

    /// Index of the first matched character.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last matched character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Width of the matched span in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the span covers no characters. Never true for a constructed
    /// match, whose span holds at least one character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inclusive character range of the match.
    #[must_use]
    pub fn span(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Whether the two spans share at least one character.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl TryFrom<RawFoundWord> for FoundWord {
    type Error = Error;

    fn try_from(raw: RawFoundWord) -> Result<Self> {
        Self::new(raw.keyword, raw.matched_text, raw.start, raw.end)
    }
}

impl fmt::Display for FoundWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.matched_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(keyword: &str, matched: &str, start: usize, end: usize) -> FoundWord {
        FoundWord::new(keyword, matched, start, end).unwrap()
    }

    #[test]
    fn test_accessors() {
        let found = word("ab", "a-b", 3, 5);
        assert_eq!(found.keyword(), "ab");
        assert_eq!(found.matched_text(), "a-b");
        assert_eq!(found.start(), 3);
        assert_eq!(found.end(), 5);
        assert_eq!(found.len(), 3);
        assert!(!found.is_empty());
        assert_eq!(found.span(), 3..=5);
    }

    #[test]
    fn test_len_counts_chars_not_bytes() {
        let found = word("大土豆", "大土^豆", 5, 8);
        assert_eq!(found.len(), found.matched_text().chars().count());
    }

    #[test]
    fn test_new_rejects_reversed_span() {
        let err = FoundWord::new("ab", "ab", 5, 2).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("before start"));
    }

    #[test]
    fn test_new_rejects_width_mismatch() {
        let err = FoundWord::new("ab", "a-b", 0, 1).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_overlaps() {
        let a = word("she", "she", 2, 4);
        let b = word("he", "he", 3, 4);
        let c = word("say", "say", 7, 9);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = word("ab", "ab", 0, 1);
        let b = word("cd", "cd", 2, 3);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_display_uses_matched_text() {
        let found = word("ab", "a b", 0, 2);
        assert_eq!(found.to_string(), "a b");
    }

    #[test]
    fn test_serialize() {
        let found = word("he", "he", 3, 4);
        let json = serde_json::to_string(&found).unwrap();
        assert!(json.contains(r#""keyword":"he""#));
        assert!(json.contains(r#""start":3"#));

        let back: FoundWord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, found);
    }

    #[test]
    fn test_deserialize_rejects_reversed_span() {
        let json = r#"{"keyword":"ab","matched_text":"ab","start":5,"end":2}"#;
        let err = serde_json::from_str::<FoundWord>(json).unwrap_err();
        assert!(err.to_string().contains("before start"));
    }

    #[test]
    fn test_deserialize_rejects_width_mismatch() {
        let json = r#"{"keyword":"ab","matched_text":"ab","start":0,"end":4}"#;
        assert!(serde_json::from_str::<FoundWord>(json).is_err());
    }
}
