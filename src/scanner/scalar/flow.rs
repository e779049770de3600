//! Single- and double-quoted scalar scanning.

use crate::char_traits::{is_blank, is_blankz, is_break, is_breakz, is_hex, is_z, as_hex};
use crate::error::{ScanResult, SyntaxError};
use crate::mark::Mark;
use crate::scanner::{Scanner, SkipTabs};
use crate::token::{ScalarStyle, Token, TokenKind};

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(crate) fn fetch_flow_scalar(&mut self, single: bool) -> ScanResult {
        self.save_simple_key();
        self.disallow_simple_key();

        let tok = self.scan_flow_scalar(single)?;

        // To ensure JSON compatibility, a value may immediately follow a
        // JSON-like flow-mapping key's `:` with no intervening whitespace.
        self.skip_to_next_token()?;
        self.adjacent_value_allowed_at = self.mark.index;

        self.tokens.enqueue(tok);
        Ok(())
    }

    fn scan_flow_scalar(&mut self, single: bool) -> Result<Token, SyntaxError> {
        let start_mark = self.mark;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks;

        self.skip();

        loop {
            self.lookahead(4);

            if self.mark.column == 0
                && ((self.peek_at(0) == '-' && self.peek_at(1) == '-' && self.peek_at(2) == '-')
                    || (self.peek_at(0) == '.' && self.peek_at(1) == '.' && self.peek_at(2) == '.'))
                && is_blankz(self.peek_at(3))
            {
                return Err(SyntaxError::new(
                    start_mark,
                    "while scanning a quoted scalar, found unexpected document indicator",
                ));
            }

            if is_z(self.ch()) {
                return Err(SyntaxError::new(
                    start_mark,
                    "while scanning a quoted scalar, found unexpected end of stream",
                ));
            }

            leading_blanks = false;
            self.consume_flow_scalar_non_whitespace_chars(
                single,
                &mut string,
                &mut leading_blanks,
                &start_mark,
            )?;

            match self.look_ch() {
                '\'' if single => break,
                '"' if !single => break,
                _ => {}
            }

            while is_blank(self.ch()) || is_break(self.ch()) {
                if is_blank(self.ch()) {
                    if leading_blanks {
                        if self.ch() == '\t' && (self.mark.column as isize) < self.indent {
                            return Err(SyntaxError::new(
                                self.mark,
                                "tab cannot be used as indentation",
                            ));
                        }
                        self.skip();
                    } else {
                        whitespaces.push(self.ch());
                        self.skip();
                    }
                } else {
                    self.lookahead(2);
                    if leading_blanks {
                        self.read_break(&mut trailing_breaks);
                    } else {
                        whitespaces.clear();
                        self.read_break(&mut leading_break);
                        leading_blanks = true;
                    }
                }
                self.lookahead(1);
            }

            if leading_blanks {
                if leading_break.is_empty() {
                    string.push_str(&leading_break);
                    string.push_str(&trailing_breaks);
                    trailing_breaks.clear();
                    leading_break.clear();
                } else {
                    if trailing_breaks.is_empty() {
                        string.push(' ');
                    } else {
                        string.push_str(&trailing_breaks);
                        trailing_breaks.clear();
                    }
                    leading_break.clear();
                }
            } else {
                string.push_str(&whitespaces);
                whitespaces.clear();
            }
        }

        // Eat the right quote.
        self.skip();
        self.skip_ws_to_eol(SkipTabs::Yes);
        match self.ch() {
            ',' | '}' | ']' if self.flow_level > 0 => {}
            c if is_breakz(c) => {}
            ':' if self.flow_level == 0 && start_mark.line == self.mark.line => {}
            ':' if self.flow_level > 0 => {}
            _ => {
                return Err(SyntaxError::new(
                    self.mark,
                    "invalid trailing content after double-quoted scalar",
                ));
            }
        }

        let style = if single {
            ScalarStyle::SingleQuoted
        } else {
            ScalarStyle::DoubleQuoted
        };
        Ok(Token::new(
            start_mark,
            self.mark,
            TokenKind::Scalar { value: string, style },
        ))
    }

    /// Consume successive non-whitespace characters from a flow scalar.
    ///
    /// Resolves escape sequences and stops upon whitespace, end of
    /// stream, or the closing quote (`'` for single-quoted, `"` for
    /// double-quoted).
    fn consume_flow_scalar_non_whitespace_chars(
        &mut self,
        single: bool,
        string: &mut String,
        leading_blanks: &mut bool,
        start_mark: &Mark,
    ) -> ScanResult {
        self.lookahead(2);
        while !is_blankz(self.ch()) {
            match self.ch() {
                '\'' if self.peek_at(1) == '\'' && single => {
                    string.push('\'');
                    self.skip();
                    self.skip();
                }
                '\'' if single => break,
                '"' if !single => break,
                '\\' if !single && is_break(self.peek_at(1)) => {
                    self.lookahead(3);
                    self.skip();
                    self.skip_line();
                    *leading_blanks = true;
                    break;
                }
                '\\' if !single => {
                    string.push(self.resolve_flow_scalar_escape_sequence(start_mark)?);
                }
                c => {
                    string.push(c);
                    self.skip();
                }
            }
            self.lookahead(2);
        }
        Ok(())
    }

    /// Resolve the escape sequence `self.ch()` (a `\`) starts.
    fn resolve_flow_scalar_escape_sequence(&mut self, start_mark: &Mark) -> Result<char, SyntaxError> {
        let mut code_length = 0usize;
        let mut ret = '\0';

        match self.peek_at(1) {
            '0' => ret = '\0',
            'a' => ret = '\x07',
            'b' => ret = '\x08',
            't' | '\t' => ret = '\t',
            'n' => ret = '\n',
            'v' => ret = '\x0b',
            'f' => ret = '\x0c',
            'r' => ret = '\x0d',
            'e' => ret = '\x1b',
            ' ' => ret = '\x20',
            '"' => ret = '"',
            '\'' => ret = '\'',
            '\\' => ret = '\\',
            // Unicode next line (#x85).
            'N' => ret = char::from_u32(0x85).unwrap(),
            // Unicode non-breaking space (#xA0).
            '_' => ret = char::from_u32(0xA0).unwrap(),
            // Unicode line separator (#x2028).
            'L' => ret = char::from_u32(0x2028).unwrap(),
            // Unicode paragraph separator (#x2029).
            'P' => ret = char::from_u32(0x2029).unwrap(),
            'x' => code_length = 2,
            'u' => code_length = 4,
            'U' => code_length = 8,
            _ => {
                return Err(SyntaxError::new(
                    *start_mark,
                    "while parsing a quoted scalar, found unknown escape character",
                ))
            }
        }
        self.skip();
        self.skip();

        if code_length > 0 {
            self.lookahead(code_length);
            let mut value = 0u32;
            for i in 0..code_length {
                if !is_hex(self.peek_at(i)) {
                    return Err(SyntaxError::new(
                        *start_mark,
                        "while parsing a quoted scalar, did not find expected hexadecimal number",
                    ));
                }
                value = (value << 4) + as_hex(self.peek_at(i));
            }

            let Some(ch) = char::from_u32(value) else {
                return Err(SyntaxError::new(
                    *start_mark,
                    "while parsing a quoted scalar, found invalid Unicode character escape code",
                ));
            };
            ret = ch;

            for _ in 0..code_length {
                self.skip();
            }
        }
        Ok(ret)
    }
}
