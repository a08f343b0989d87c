use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::core::char_predicate::CharPredicate;
use crate::error::{Error, Result};

/// Byte range of one located separator. `end == start` for zero-width matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorMatch {
    pub start: usize,
    pub end: usize,
}

/// Finds token boundaries in a text.
///
/// `from` is always a char boundary in `0..=text.len()`. Locators hold no
/// per-iteration state: the returned match carries both its start and end.
///
/// # Panics
///
/// `locate` panics if `from > text.len()` or `from` is not on a char boundary.
pub trait SeparatorLocator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch>;
    fn name(&self) -> &str;
}

// every char matched by the predicate is a one-char separator
#[derive(Debug, Clone)]
pub struct CharSeparator {
    predicate: CharPredicate,
}

impl CharSeparator {
    pub fn new(predicate: CharPredicate) -> Self {
        CharSeparator { predicate }
    }

    pub fn predicate(&self) -> &CharPredicate {
        &self.predicate
    }
}

impl SeparatorLocator for CharSeparator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch> {
        text[from..]
            .char_indices()
            .find(|(_, c)| self.predicate.matches(*c))
            .map(|(i, c)| SeparatorMatch {
                start: from + i,
                end: from + i + c.len_utf8(),
            })
    }

    fn name(&self) -> &str {
        "char"
    }
}

#[derive(Debug, Clone)]
pub struct LiteralSeparator {
    separator: Arc<str>,
}

impl LiteralSeparator {
    pub fn new(separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(Error::EmptySeparator);
        }
        Ok(LiteralSeparator {
            separator: separator.into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.separator
    }
}

impl SeparatorLocator for LiteralSeparator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch> {
        text[from..].find(&*self.separator).map(|i| SeparatorMatch {
            start: from + i,
            end: from + i + self.separator.len(),
        })
    }

    fn name(&self) -> &str {
        "literal"
    }
}

#[derive(Debug, Clone)]
pub struct PatternSeparator {
    regex: Regex,
}

impl PatternSeparator {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::from_regex(Regex::new(pattern)?)
    }

    /// Rejects patterns matching `""`: such a separator would never move the cursor.
    pub fn from_regex(regex: Regex) -> Result<Self> {
        if regex.is_match("") {
            return Err(Error::EmptyMatchingPattern(regex.as_str().to_string()));
        }
        Ok(PatternSeparator { regex })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl SeparatorLocator for PatternSeparator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch> {
        // find_at keeps the surrounding text visible to \b and friends
        self.regex.find_at(text, from).map(|m| SeparatorMatch {
            start: m.start(),
            end: m.end(),
        })
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Zero-width boundaries every `chunk_len` chars; the content is never inspected.
#[derive(Debug, Clone, Copy)]
pub struct FixedLengthSeparator {
    chunk_len: usize,
}

impl FixedLengthSeparator {
    pub fn new(chunk_len: usize) -> Result<Self> {
        if chunk_len == 0 {
            return Err(Error::InvalidChunkLength(chunk_len));
        }
        Ok(FixedLengthSeparator { chunk_len })
    }

    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }
}

impl SeparatorLocator for FixedLengthSeparator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch> {
        // a boundary only exists strictly inside the text
        text[from..]
            .char_indices()
            .nth(self.chunk_len)
            .map(|(i, _)| SeparatorMatch {
                start: from + i,
                end: from + i,
            })
    }

    fn name(&self) -> &str {
        "fixed_length"
    }
}

/// The closed set of separator kinds a [`Splitter`](crate::core::splitter::Splitter) can use.
#[derive(Debug, Clone)]
pub enum Separator {
    Char(CharSeparator),
    Literal(LiteralSeparator),
    Pattern(PatternSeparator),
    FixedLength(FixedLengthSeparator),
}

impl Separator {
    pub fn on_predicate(predicate: CharPredicate) -> Self {
        debug!("char separator on {}", predicate);
        Separator::Char(CharSeparator::new(predicate))
    }

    /// A one-char literal is located as a char separator.
    pub fn on_str(separator: &str) -> Result<Self> {
        let mut chars = separator.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::on_predicate(CharPredicate::is(c)));
        }
        let literal = LiteralSeparator::new(separator)?;
        debug!("literal separator on {:?}", separator);
        Ok(Separator::Literal(literal))
    }

    pub fn on_pattern(pattern: &str) -> Result<Self> {
        let sep = PatternSeparator::new(pattern)?;
        debug!("pattern separator on /{}/", pattern);
        Ok(Separator::Pattern(sep))
    }

    pub fn on_regex(regex: Regex) -> Result<Self> {
        let sep = PatternSeparator::from_regex(regex)?;
        debug!("pattern separator on /{}/", sep.regex().as_str());
        Ok(Separator::Pattern(sep))
    }

    pub fn fixed_length(chunk_len: usize) -> Result<Self> {
        let sep = FixedLengthSeparator::new(chunk_len)?;
        debug!("fixed length separator every {} chars", chunk_len);
        Ok(Separator::FixedLength(sep))
    }
}

impl SeparatorLocator for Separator {
    fn locate(&self, text: &str, from: usize) -> Option<SeparatorMatch> {
        match self {
            Separator::Char(s) => s.locate(text, from),
            Separator::Literal(s) => s.locate(text, from),
            Separator::Pattern(s) => s.locate(text, from),
            Separator::FixedLength(s) => s.locate(text, from),
        }
    }

    fn name(&self) -> &str {
        match self {
            Separator::Char(s) => s.name(),
            Separator::Literal(s) => s.name(),
            Separator::Pattern(s) => s.name(),
            Separator::FixedLength(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: usize, end: usize) -> Option<SeparatorMatch> {
        Some(SeparatorMatch { start, end })
    }

    #[test]
    fn char_separator() {
        let sep = CharSeparator::new(CharPredicate::any_of(",;"));
        assert_eq!(sep.locate("a,b;c", 0), at(1, 2));
        assert_eq!(sep.locate("a,b;c", 2), at(3, 4));
        assert_eq!(sep.locate("a,b;c", 4), None);
        assert_eq!(sep.locate("a,b;c", 5), None);
        // multi-byte separators are one char wide
        let sep = CharSeparator::new(CharPredicate::is('、'));
        assert_eq!(sep.locate("甲、乙", 0), at(3, 6));
    }

    #[test]
    fn literal_separator() {
        let sep = LiteralSeparator::new(", ").unwrap();
        assert_eq!(sep.locate("yam, bam, jam", 0), at(3, 5));
        assert_eq!(sep.locate("yam, bam, jam", 5), at(8, 10));
        assert_eq!(sep.locate("yam, bam, jam", 10), None);
        assert!(matches!(LiteralSeparator::new(""), Err(Error::EmptySeparator)));
    }

    #[test]
    fn pattern_separator() {
        let sep = PatternSeparator::new(r"\s*,\s*").unwrap();
        assert_eq!(sep.locate("a , b,c", 0), at(1, 4));
        assert_eq!(sep.locate("a , b,c", 4), at(5, 6));
        assert_eq!(sep.locate("a , b,c", 6), None);
    }

    #[test]
    fn pattern_separator_sees_context() {
        let sep = PatternSeparator::new(r"\b").unwrap();
        // the boundary after "foo" is found even when the search starts mid-word
        assert_eq!(sep.locate("foo bar", 1), at(3, 3));
        assert_eq!(sep.locate("foo bar", 4), at(4, 4));
    }

    #[test]
    fn pattern_separator_rejects_empty_matches() {
        assert!(matches!(
            PatternSeparator::new("a*"),
            Err(Error::EmptyMatchingPattern(p)) if p == "a*"
        ));
        assert!(matches!(PatternSeparator::new("^"), Err(Error::EmptyMatchingPattern(_))));
        assert!(matches!(PatternSeparator::new("(unclosed"), Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn fixed_length_separator() {
        let sep = FixedLengthSeparator::new(2).unwrap();
        assert_eq!(sep.locate("abcde", 0), at(2, 2));
        assert_eq!(sep.locate("abcde", 2), at(4, 4));
        assert_eq!(sep.locate("abcde", 4), None);
        assert_eq!(sep.locate("abcd", 2), None);
        assert_eq!(sep.locate("", 0), None);
        // chunks count chars, not bytes
        assert_eq!(sep.locate("中文字", 0), at(6, 6));
        assert!(matches!(FixedLengthSeparator::new(0), Err(Error::InvalidChunkLength(0))));
    }

    #[test]
    fn astral_chars() {
        assert_eq!(CharSeparator::new(CharPredicate::is('x')).locate("😀x", 0), at(4, 5));
        assert_eq!(CharSeparator::new(CharPredicate::is('😀')).locate("a😀", 0), at(1, 5));
        assert_eq!(FixedLengthSeparator::new(1).unwrap().locate("😀a", 0), at(4, 4));
        assert_eq!(FixedLengthSeparator::new(1).unwrap().locate("😀a", 4), None);
        assert_eq!(PatternSeparator::new(r"\b").unwrap().locate("😀 a", 0), at(5, 5));
    }

    #[test]
    #[should_panic]
    fn locate_past_end_panics() {
        CharSeparator::new(CharPredicate::is(',')).locate("a,b", 4);
    }

    #[test]
    #[should_panic]
    fn locate_inside_char_panics() {
        LiteralSeparator::new("::").unwrap().locate("中::", 1);
    }

    #[test]
    fn single_char_literal_uses_char_separator() {
        assert!(matches!(Separator::on_str(",").unwrap(), Separator::Char(_)));
        assert!(matches!(Separator::on_str("中").unwrap(), Separator::Char(_)));
        assert!(matches!(Separator::on_str(", ").unwrap(), Separator::Literal(_)));
        assert_eq!(Separator::on_str(", ").unwrap().name(), "literal");
        assert_eq!(Separator::fixed_length(3).unwrap().name(), "fixed_length");
    }
}
