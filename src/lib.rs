pub mod config;
pub mod core;
pub mod error;

use once_cell::sync::Lazy;
use tantivy::tokenizer::{BoxTokenStream, Token, TokenStream, Tokenizer};

pub use crate::core::char_predicate::CharPredicate;
pub use crate::core::lazy_iter::{LazyIter, Producer};
pub use crate::core::separator::{Separator, SeparatorLocator, SeparatorMatch};
pub use crate::core::splitter::{Split, Splitter};
pub use crate::error::{Error, Result};

/// Splits on any whitespace run, dropping empty tokens.
pub static WHITESPACE_SPLITTER: Lazy<Splitter> =
    Lazy::new(|| Splitter::on_predicate(CharPredicate::whitespace()).omit_empty_strings());

/// A tantivy tokenizer whose tokens are the pieces of a [`Splitter`].
#[derive(Clone)]
pub struct SplitterTokenizer {
    splitter: Splitter,
}

pub struct SplitterTokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream for SplitterTokenStream {
    fn advance(&mut self) -> bool {
        if self.index < self.tokens.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.tokens[self.index - 1]
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.tokens[self.index - 1]
    }
}

impl SplitterTokenizer {
    pub fn new(splitter: Splitter) -> Self {
        Self { splitter }
    }
}

impl Default for SplitterTokenizer {
    fn default() -> Self {
        Self::new(WHITESPACE_SPLITTER.clone())
    }
}

impl Tokenizer for SplitterTokenizer {
    fn token_stream<'a>(&self, text: &'a str) -> BoxTokenStream<'a> {
        let tokens = self
            .splitter
            .split(text)
            .spans()
            .enumerate()
            .map(|(position, span)| Token {
                offset_from: span.start,
                offset_to: span.end,
                position,
                text: String::from(&text[span]),
                position_length: 1,
            })
            .collect();
        BoxTokenStream::from(SplitterTokenStream { tokens, index: 0 })
    }
}
