use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use phf::{phf_set, Set};
use unicode_blocks::{self, UnicodeBlock};

use crate::error::{Error, Result};

// Unicode White_Space property
static WHITESPACE_CHARS: Set<char> = phf_set! {
    '\t',
    '\n',
    '\u{000B}',
    '\u{000C}',
    '\r',
    ' ',
    '\u{0085}',
    '\u{00A0}',
    '\u{1680}',
    '\u{2000}',
    '\u{2001}',
    '\u{2002}',
    '\u{2003}',
    '\u{2004}',
    '\u{2005}',
    '\u{2006}',
    '\u{2007}',
    '\u{2008}',
    '\u{2009}',
    '\u{200A}',
    '\u{2028}',
    '\u{2029}',
    '\u{202F}',
    '\u{205F}',
    '\u{3000}',
};

type CharFn = dyn Fn(char) -> bool + Send + Sync;

/// A boolean test over a single `char`.
///
/// Predicates are immutable and cheap to clone; combinators share their
/// operands instead of copying them.
#[derive(Clone)]
pub enum CharPredicate {
    None,
    Any,
    Whitespace,
    Is(char),
    Either(char, char),
    AnyOf(Arc<[char]>),
    InRange(char, char),
    InBlock(UnicodeBlock),
    Negated(Arc<CharPredicate>),
    And(Arc<CharPredicate>, Arc<CharPredicate>),
    Or(Arc<CharPredicate>, Arc<CharPredicate>),
    Custom(Arc<str>, Arc<CharFn>),
}

impl Default for CharPredicate {
    fn default() -> Self {
        CharPredicate::None
    }
}

impl CharPredicate {
    pub fn none() -> Self {
        CharPredicate::None
    }

    pub fn any() -> Self {
        CharPredicate::Any
    }

    pub fn whitespace() -> Self {
        CharPredicate::Whitespace
    }

    pub fn is(c: char) -> Self {
        CharPredicate::Is(c)
    }

    /// Matches any char occurring in `chars`.
    pub fn any_of(chars: &str) -> Self {
        let mut it = chars.chars();
        match (it.next(), it.next(), it.next()) {
            (None, _, _) => CharPredicate::None,
            (Some(a), None, _) => CharPredicate::Is(a),
            (Some(a), Some(b), None) => CharPredicate::Either(a, b),
            _ => {
                let mut sorted: Vec<char> = chars.chars().collect();
                sorted.sort_unstable();
                sorted.dedup();
                CharPredicate::AnyOf(sorted.into())
            }
        }
    }

    /// Matches chars in `lo..=hi`.
    pub fn in_range(lo: char, hi: char) -> Self {
        CharPredicate::InRange(lo, hi)
    }

    pub fn in_block(block: UnicodeBlock) -> Self {
        CharPredicate::InBlock(block)
    }

    pub fn from_fn<F>(name: &str, f: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        CharPredicate::Custom(name.into(), Arc::new(f))
    }

    pub fn negate(&self) -> Self {
        match self {
            CharPredicate::None => CharPredicate::Any,
            CharPredicate::Any => CharPredicate::None,
            CharPredicate::Negated(inner) => inner.as_ref().clone(),
            _ => CharPredicate::Negated(Arc::new(self.clone())),
        }
    }

    pub fn and(&self, other: CharPredicate) -> Self {
        CharPredicate::And(Arc::new(self.clone()), Arc::new(other))
    }

    pub fn or(&self, other: CharPredicate) -> Self {
        CharPredicate::Or(Arc::new(self.clone()), Arc::new(other))
    }

    pub fn matches(&self, c: char) -> bool {
        match self {
            CharPredicate::None => false,
            CharPredicate::Any => true,
            CharPredicate::Whitespace => WHITESPACE_CHARS.contains(&c),
            CharPredicate::Is(m) => c == *m,
            CharPredicate::Either(a, b) => c == *a || c == *b,
            CharPredicate::AnyOf(sorted) => sorted.binary_search(&c).is_ok(),
            CharPredicate::InRange(lo, hi) => (*lo..=*hi).contains(&c),
            CharPredicate::InBlock(block) => unicode_blocks::find_unicode_block(c)
                .map_or(false, |found| found == *block),
            CharPredicate::Negated(inner) => !inner.matches(c),
            CharPredicate::And(a, b) => a.matches(c) && b.matches(c),
            CharPredicate::Or(a, b) => a.matches(c) || b.matches(c),
            CharPredicate::Custom(_, f) => f(c),
        }
    }

    /// Byte offset of the first matching char, if any.
    pub fn index_in(&self, text: &str) -> Option<usize> {
        match self {
            CharPredicate::None => None,
            _ => text
                .char_indices()
                .find(|(_, c)| self.matches(*c))
                .map(|(i, _)| i),
        }
    }

    /// Like [`index_in`](Self::index_in) but starts the scan at byte offset `start`.
    pub fn index_in_from(&self, text: &str, start: usize) -> Result<Option<usize>> {
        if start > text.len() {
            return Err(Error::IndexOutOfBounds {
                index: start,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(start) {
            return Err(Error::NotCharBoundary(start));
        }
        Ok(self.index_in(&text[start..]).map(|i| start + i))
    }

    pub fn last_index_in(&self, text: &str) -> Option<usize> {
        match self {
            CharPredicate::None => None,
            _ => text
                .char_indices()
                .rev()
                .find(|(_, c)| self.matches(*c))
                .map(|(i, _)| i),
        }
    }

    pub fn matches_any_of(&self, text: &str) -> bool {
        !self.matches_none_of(text)
    }

    pub fn matches_all_of(&self, text: &str) -> bool {
        text.chars().all(|c| self.matches(c))
    }

    pub fn matches_none_of(&self, text: &str) -> bool {
        self.index_in(text).is_none()
    }

    pub fn count_in(&self, text: &str) -> usize {
        text.chars().filter(|c| self.matches(*c)).count()
    }

    pub fn trim_from<'a>(&self, text: &'a str) -> &'a str {
        text.trim_matches(|c| self.matches(c))
    }

    pub fn trim_leading_from<'a>(&self, text: &'a str) -> &'a str {
        text.trim_start_matches(|c| self.matches(c))
    }

    pub fn trim_trailing_from<'a>(&self, text: &'a str) -> &'a str {
        text.trim_end_matches(|c| self.matches(c))
    }

    pub fn remove_from(&self, text: &str) -> String {
        text.chars().filter(|c| !self.matches(*c)).collect()
    }

    pub fn retain_from(&self, text: &str) -> String {
        text.chars().filter(|c| self.matches(*c)).collect()
    }
}

fn show_chars(f: &mut Formatter<'_>, chars: &[char]) -> fmt::Result {
    for c in chars {
        write!(f, "{}", c.escape_unicode())?;
    }
    Ok(())
}

impl Display for CharPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CharPredicate::None => write!(f, "CharPredicate.none()"),
            CharPredicate::Any => write!(f, "CharPredicate.any()"),
            CharPredicate::Whitespace => write!(f, "CharPredicate.whitespace()"),
            CharPredicate::Is(c) => write!(f, "CharPredicate.is('{}')", c.escape_unicode()),
            CharPredicate::Either(a, b) => {
                write!(f, "CharPredicate.anyOf(\"")?;
                show_chars(f, &[*a, *b])?;
                write!(f, "\")")
            }
            CharPredicate::AnyOf(chars) => {
                write!(f, "CharPredicate.anyOf(\"")?;
                show_chars(f, chars)?;
                write!(f, "\")")
            }
            CharPredicate::InRange(lo, hi) => write!(
                f,
                "CharPredicate.inRange('{}', '{}')",
                lo.escape_unicode(),
                hi.escape_unicode()
            ),
            CharPredicate::InBlock(block) => {
                write!(f, "CharPredicate.inBlock({})", block.name())
            }
            CharPredicate::Negated(inner) => write!(f, "{}.negate()", inner),
            CharPredicate::And(a, b) => write!(f, "CharPredicate.and({}, {})", a, b),
            CharPredicate::Or(a, b) => write!(f, "CharPredicate.or({}, {})", a, b),
            CharPredicate::Custom(name, _) => write!(f, "{}", name),
        }
    }
}

impl Debug for CharPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
