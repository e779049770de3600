//! Tag scanning: verbatim (`!<uri>`), handle+suffix (`!h!suffix`), and
//! the bare `!suffix`/`!` forms, plus `%XX` URI escape decoding.

use super::Scanner;
use crate::char_traits::{is_alpha, is_blankz, is_hex, as_hex};
use crate::error::{ScanResult, SyntaxError};
use crate::mark::Mark;
use crate::token::{Token, TokenKind};

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(super) fn fetch_tag(&mut self) -> ScanResult {
        self.save_simple_key();
        self.disallow_simple_key();

        let tok = self.scan_tag()?;
        self.tokens.enqueue(tok);
        Ok(())
    }

    fn scan_tag(&mut self) -> Result<Token, SyntaxError> {
        let start_mark = self.mark;
        let mut handle = String::new();
        let mut suffix;

        self.lookahead(2);

        if self.peek_at(1) == '<' {
            // Eat `!<`.
            self.skip();
            self.skip();
            suffix = self.scan_tag_uri(false, false, "", &start_mark)?;

            if self.ch() != '>' {
                return Err(SyntaxError::new(
                    start_mark,
                    "while scanning a tag, did not find the expected '>'",
                ));
            }

            self.skip();
        } else {
            // Either `!suffix` or `!handle!suffix`. Determine which it is
            // before scanning any URI, so the suffix is scanned exactly once.
            handle = self.scan_tag_handle(false, &start_mark)?;
            if handle.len() >= 2 && handle.starts_with('!') && handle.ends_with('!') {
                let is_secondary_handle = handle == "!!";
                suffix = self.scan_tag_uri(false, is_secondary_handle, "", &start_mark)?;
            } else {
                suffix = self.scan_tag_uri(false, false, &handle, &start_mark)?;
                handle = "!".to_owned();
                // The bare `!` tag: empty handle, suffix of `!`.
                if suffix.is_empty() {
                    handle.clear();
                    suffix = "!".to_owned();
                }
            }
        }

        if is_blankz(self.look_ch()) {
            Ok(Token::new(
                start_mark,
                self.mark,
                TokenKind::Tag { handle, suffix },
            ))
        } else {
            Err(SyntaxError::new(
                start_mark,
                "while scanning a tag, did not find expected whitespace or line break",
            ))
        }
    }

    pub(super) fn scan_tag_handle(
        &mut self,
        directive: bool,
        mark: &Mark,
    ) -> Result<String, SyntaxError> {
        let mut string = String::new();
        if self.look_ch() != '!' {
            return Err(SyntaxError::new(
                *mark,
                "while scanning a tag, did not find expected '!'",
            ));
        }

        string.push(self.ch_skip());

        while is_alpha(self.look_ch()) {
            string.push(self.ch_skip());
        }

        if self.ch() == '!' {
            string.push(self.ch_skip());
        } else if directive && string != "!" {
            return Err(SyntaxError::new(
                *mark,
                "while parsing a tag directive, did not find expected '!'",
            ));
        }
        Ok(string)
    }

    pub(super) fn scan_tag_uri(
        &mut self,
        directive: bool,
        _is_secondary: bool,
        head: &str,
        mark: &Mark,
    ) -> Result<String, SyntaxError> {
        let mut length = head.len();
        let mut string = String::new();

        // Copy the head, skipping its leading `!`.
        if length > 1 {
            string.extend(head.chars().skip(1));
        }

        while match self.look_ch() {
            ';' | '/' | '?' | ':' | '@' | '&' => true,
            '=' | '+' | '$' | ',' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' | '[' | ']' => true,
            '%' => true,
            c if is_alpha(c) => true,
            _ => false,
        } {
            if self.ch() == '%' {
                string.push(self.scan_uri_escapes(directive, mark)?);
            } else {
                string.push(self.ch());
                self.skip();
            }

            length += 1;
        }

        if length == 0 {
            return Err(SyntaxError::new(
                *mark,
                "while parsing a tag, did not find expected tag URI",
            ));
        }

        Ok(string)
    }

    fn scan_uri_escapes(&mut self, _directive: bool, mark: &Mark) -> Result<char, SyntaxError> {
        let mut width = 0usize;
        let mut code = 0u32;
        loop {
            self.lookahead(3);

            if !(self.ch() == '%' && is_hex(self.peek_at(1)) && is_hex(self.peek_at(2))) {
                return Err(SyntaxError::new(
                    *mark,
                    "while parsing a tag, did not find URI escaped octet",
                ));
            }

            let octet = (as_hex(self.peek_at(1)) << 4) + as_hex(self.peek_at(2));
            if width == 0 {
                width = match octet {
                    _ if octet & 0x80 == 0x00 => 1,
                    _ if octet & 0xE0 == 0xC0 => 2,
                    _ if octet & 0xF0 == 0xE0 => 3,
                    _ if octet & 0xF8 == 0xF0 => 4,
                    _ => {
                        return Err(SyntaxError::new(
                            *mark,
                            "while parsing a tag, found an incorrect leading UTF-8 octet",
                        ));
                    }
                };
                code = octet;
            } else {
                if octet & 0xc0 != 0x80 {
                    return Err(SyntaxError::new(
                        *mark,
                        "while parsing a tag, found an incorrect trailing UTF-8 octet",
                    ));
                }
                code = (code << 8) + octet;
            }

            self.skip();
            self.skip();
            self.skip();

            width -= 1;
            if width == 0 {
                break;
            }
        }

        match char::from_u32(code) {
            Some(ch) => Ok(ch),
            None => Err(SyntaxError::new(
                *mark,
                "while parsing a tag, found an invalid UTF-8 codepoint",
            )),
        }
    }
}
