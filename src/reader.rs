//! A thin pull-interface wrapper around [`Scanner`], giving a consumer
//! (e.g. a parser this crate does not itself provide) a "current token"
//! view instead of an `Iterator`/`Result` pair to juggle on every step.

use crate::error::SyntaxError;
use crate::scanner::{Scanner, ScannerConfig};
use crate::token::Token;

/// Pulls tokens one at a time from a [`Scanner`], exposing the token
/// currently "under the cursor" until the caller consumes it.
pub struct Reader<I> {
    scanner: Scanner<I>,
    current: Option<Token>,
}

impl<I: Iterator<Item = char>> Reader<I> {
    #[must_use]
    pub fn new(source: I) -> Reader<I> {
        Reader {
            scanner: Scanner::new(source),
            current: None,
        }
    }

    #[must_use]
    pub fn new_with_config(source: I, config: ScannerConfig) -> Reader<I> {
        Reader {
            scanner: Scanner::new_with_config(source, config),
            current: None,
        }
    }

    /// The token currently exposed, if any.
    ///
    /// Returns `None` before the first call to [`Self::move_next`] and
    /// after [`Self::consume_current`] until `move_next` is called again.
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Advance so that [`Self::current`] exposes the next token.
    ///
    /// Returns `Ok(false)` once `StreamEnd` has already been consumed and
    /// there is nothing left to advance to.
    pub fn move_next(&mut self) -> Result<bool, SyntaxError> {
        if self.current.is_some() {
            return Ok(true);
        }
        match self.scanner.next_token()? {
            Some(tok) => {
                self.current = Some(tok);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the currently exposed token, so the next [`Self::move_next`]
    /// call advances past it.
    pub fn consume_current(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn get_error(&self) -> Option<SyntaxError> {
        self.scanner.get_error()
    }
}
