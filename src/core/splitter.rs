use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Range;

use log::trace;
use regex::Regex;

use crate::core::char_predicate::CharPredicate;
use crate::core::lazy_iter::{LazyIter, Producer};
use crate::core::separator::{Separator, SeparatorLocator};
use crate::error::{Error, Result};

/// Immutable splitting recipe: where to cut, and what to do with the pieces.
///
/// Every configuration method returns a new `Splitter`, so one instance can
/// be shared and reused for any number of inputs.
///
/// ```
/// use splitter_rs::Splitter;
///
/// let splitter = Splitter::on(',').trim_results().omit_empty_strings();
/// assert_eq!(splitter.split_to_list(" a,, b ,c,"), vec!["a", "b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    separator: Separator,
    trimmer: CharPredicate,
    omit_empty_strings: bool,
    limit: usize,
}

impl Splitter {
    pub fn with_separator(separator: Separator) -> Self {
        Splitter {
            separator,
            trimmer: CharPredicate::none(),
            omit_empty_strings: false,
            limit: usize::MAX,
        }
    }

    pub fn on(separator: char) -> Self {
        Self::on_predicate(CharPredicate::is(separator))
    }

    pub fn on_predicate(predicate: CharPredicate) -> Self {
        Self::with_separator(Separator::on_predicate(predicate))
    }

    pub fn on_str(separator: &str) -> Result<Self> {
        Ok(Self::with_separator(Separator::on_str(separator)?))
    }

    pub fn on_pattern(pattern: &str) -> Result<Self> {
        Ok(Self::with_separator(Separator::on_pattern(pattern)?))
    }

    pub fn on_regex(regex: Regex) -> Result<Self> {
        Ok(Self::with_separator(Separator::on_regex(regex)?))
    }

    /// Splits into chunks of `chunk_len` chars; the last chunk may be shorter.
    pub fn fixed_length(chunk_len: usize) -> Result<Self> {
        Ok(Self::with_separator(Separator::fixed_length(chunk_len)?))
    }

    pub fn omit_empty_strings(&self) -> Self {
        Splitter {
            omit_empty_strings: true,
            ..self.clone()
        }
    }

    /// Trims whitespace from both ends of every token.
    pub fn trim_results(&self) -> Self {
        self.trim_results_with(CharPredicate::whitespace())
    }

    pub fn trim_results_with(&self, trimmer: CharPredicate) -> Self {
        Splitter {
            trimmer,
            ..self.clone()
        }
    }

    /// Stops after `limit` tokens; the last one holds the rest of the input.
    pub fn limit(&self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }
        Ok(Splitter {
            limit,
            ..self.clone()
        })
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    pub fn trimmer(&self) -> &CharPredicate {
        &self.trimmer
    }

    pub fn omits_empty_strings(&self) -> bool {
        self.omit_empty_strings
    }

    pub fn max_tokens(&self) -> Option<usize> {
        (self.limit != usize::MAX).then_some(self.limit)
    }

    /// Lazily splits `text`. Nothing is computed until the result is iterated.
    pub fn split<'s, 't>(&'s self, text: &'t str) -> Split<'s, 't> {
        Split {
            splitter: self,
            text,
        }
    }

    pub fn split_to_list<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.split(text).iter().collect()
    }
}

/// The tokens of one text under one [`Splitter`].
///
/// A view, not a cursor: each call to [`iter`](Split::iter) starts over.
/// `Debug` and `Display` both print the token list.
#[derive(Clone, Copy)]
pub struct Split<'s, 't> {
    splitter: &'s Splitter,
    text: &'t str,
}

pub type Spans<'s, 't> = LazyIter<SplittingProducer<'s, 't>>;

impl<'s, 't> Split<'s, 't> {
    /// Byte ranges of the tokens within the input.
    pub fn spans(&self) -> Spans<'s, 't> {
        LazyIter::new(SplittingProducer::new(self.splitter, self.text))
    }

    pub fn iter(&self) -> SplitIter<'s, 't> {
        SplitIter {
            text: self.text,
            spans: self.spans(),
        }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }
}

impl<'s, 't> IntoIterator for &Split<'s, 't> {
    type Item = &'t str;
    type IntoIter = SplitIter<'s, 't>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'s, 't> IntoIterator for Split<'s, 't> {
    type Item = &'t str;
    type IntoIter = SplitIter<'s, 't>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SplitIter<'s, 't> {
    text: &'t str,
    spans: Spans<'s, 't>,
}

impl<'s, 't> Iterator for SplitIter<'s, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        let text = self.text;
        self.spans.next().map(|span| &text[span])
    }
}

impl Display for Split<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", token)?;
        }
        write!(f, "]")
    }
}

impl Debug for Split<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Token extraction state for one pass over one text.
pub struct SplittingProducer<'s, 't> {
    text: &'t str,
    separator: &'s Separator,
    trimmer: &'s CharPredicate,
    omit_empty_strings: bool,
    // where to look for the next separator; None once the text is used up
    offset: Option<usize>,
    limit: usize,
}

impl<'s, 't> SplittingProducer<'s, 't> {
    pub fn new(splitter: &'s Splitter, text: &'t str) -> Self {
        SplittingProducer {
            text,
            separator: &splitter.separator,
            trimmer: &splitter.trimmer,
            omit_empty_strings: splitter.omit_empty_strings,
            offset: Some(0),
            limit: splitter.limit,
        }
    }

    fn trim_leading(&self, mut start: usize, end: usize) -> usize {
        while start < end {
            match self.text[start..end].chars().next() {
                Some(c) if self.trimmer.matches(c) => start += c.len_utf8(),
                _ => break,
            }
        }
        start
    }

    fn trim_trailing(&self, start: usize, mut end: usize) -> usize {
        while end > start {
            match self.text[start..end].chars().next_back() {
                Some(c) if self.trimmer.matches(c) => end -= c.len_utf8(),
                _ => break,
            }
        }
        end
    }
}

impl Producer for SplittingProducer<'_, '_> {
    type Item = Range<usize>;

    fn compute_next(&mut self) -> Option<Range<usize>> {
        let len = self.text.len();
        // start of the token being built; offset is where the separator search resumes
        let mut next_start = self.offset?;
        while let Some(offset) = self.offset {
            let mut start = next_start;
            let mut end;
            match self.separator.locate(self.text, offset) {
                Some(sep) => {
                    end = sep.start;
                    self.offset = Some(sep.end);
                }
                None => {
                    end = len;
                    self.offset = None;
                }
            }

            if self.offset == Some(next_start) {
                // empty match right at the token start: step one char past it,
                // keeping next_start so the skipped char stays in the token
                let step = self.text[next_start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                let advanced = next_start + step;
                trace!(
                    "zero-width {} separator at {}, advancing to {}",
                    self.separator.name(),
                    next_start,
                    advanced
                );
                self.offset = (advanced <= len).then_some(advanced);
                continue;
            }

            start = self.trim_leading(start, end);
            end = self.trim_trailing(start, end);

            if self.omit_empty_strings && start == end {
                // the separator is not part of the next token either
                if let Some(offset) = self.offset {
                    next_start = offset;
                }
                continue;
            }

            if self.limit == 1 {
                // omitted tokens never reach here, so they do not count
                end = self.trim_trailing(start, len);
                self.offset = None;
            } else {
                self.limit -= 1;
            }

            return Some(start..end);
        }
        None
    }
}
