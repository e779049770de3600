//! Anchor (`&name`) and alias (`*name`) scanning.

use super::Scanner;
use crate::char_traits::{is_alpha, is_blankz};
use crate::error::{ScanResult, SyntaxError};
use crate::token::{Token, TokenKind};

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(super) fn fetch_anchor(&mut self, alias: bool) -> ScanResult {
        self.save_simple_key();
        self.disallow_simple_key();

        let tok = self.scan_anchor(alias)?;
        self.tokens.enqueue(tok);

        Ok(())
    }

    fn scan_anchor(&mut self, alias: bool) -> Result<Token, SyntaxError> {
        let mut string = String::new();
        let start_mark = self.mark;

        self.skip();
        // Anchor/alias names are restricted to `[A-Za-z0-9_-]+`, unlike
        // most other scanned names in this scanner which tolerate any
        // non-space, non-flow character.
        while is_alpha(self.look_ch()) {
            string.push(self.ch());
            self.skip();
        }

        if string.is_empty() {
            return Err(SyntaxError::new(
                start_mark,
                "while scanning an anchor or alias, did not find expected alphabetic or numeric character",
            ));
        }

        if !is_blankz(self.ch()) && !matches!(self.ch(), '?' | ':' | ',' | ']' | '}' | '%' | '@' | '`') {
            return Err(SyntaxError::new(
                start_mark,
                "while scanning an anchor or alias, found unexpected character after name",
            ));
        }

        let kind = if alias {
            TokenKind::AnchorAlias(string)
        } else {
            TokenKind::Anchor(string)
        };
        Ok(Token::new(start_mark, self.mark, kind))
    }
}
