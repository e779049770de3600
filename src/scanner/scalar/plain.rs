//! Plain scalar scanning.

use crate::char_traits::{is_blank, is_blankz, is_break, is_breakz, is_flow};
use crate::error::{ScanResult, SyntaxError};
use crate::scanner::{Scanner, SkipTabs};
use crate::token::{ScalarStyle, Token, TokenKind};

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(crate) fn fetch_plain_scalar(&mut self) -> ScanResult {
        self.save_simple_key();
        self.disallow_simple_key();

        let tok = self.scan_plain_scalar()?;
        self.tokens.enqueue(tok);
        Ok(())
    }

    fn scan_plain_scalar(&mut self) -> Result<Token, SyntaxError> {
        self.unroll_non_block_indents();
        let indent = self.indent + 1;
        let start_mark = self.mark;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks = true;

        loop {
            self.lookahead(4);

            if self.mark.column == 0
                && ((self.peek_at(0) == '-' && self.peek_at(1) == '-' && self.peek_at(2) == '-')
                    || (self.peek_at(0) == '.' && self.peek_at(1) == '.' && self.peek_at(2) == '.'))
                && is_blankz(self.peek_at(3))
            {
                break;
            }

            if self.ch() == '#' {
                break;
            }
            while !is_blankz(self.ch()) {
                match self.ch() {
                    ':' if is_blankz(self.peek_at(1))
                        || (self.flow_level > 0 && is_flow(self.peek_at(1))) =>
                    {
                        break;
                    }
                    ':' if self.flow_level > 0 => {
                        return Err(SyntaxError::new(
                            start_mark,
                            "while scanning a plain scalar in flow context, found unexpected ':'",
                        ));
                    }
                    ',' | '[' | ']' | '{' | '}' if self.flow_level > 0 => break,
                    _ => {}
                }

                if leading_blanks || !whitespaces.is_empty() {
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
                        leading_blanks = false;
                    } else {
                        string.push_str(&whitespaces);
                        whitespaces.clear();
                    }
                }

                string.push(self.ch());
                self.skip();
                self.lookahead(2);
            }
            if !(is_blank(self.ch()) || is_break(self.ch())) {
                break;
            }

            while is_blank(self.look_ch()) || is_break(self.ch()) {
                if is_blank(self.ch()) {
                    if leading_blanks && (self.mark.column as isize) < indent && self.ch() == '\t' {
                        self.skip_ws_to_eol(SkipTabs::Yes);
                        if is_breakz(self.ch()) {
                            continue;
                        }
                        return Err(SyntaxError::new(
                            start_mark,
                            "while scanning a plain scalar, found a tab",
                        ));
                    }

                    if !leading_blanks {
                        whitespaces.push(self.ch());
                    }
                    self.skip();
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
            }

            if self.flow_level == 0 && (self.mark.column as isize) < indent {
                break;
            }
        }

        if leading_blanks {
            self.allow_simple_key();
        }

        Ok(Token::new(
            start_mark,
            self.mark,
            TokenKind::Scalar {
                value: string,
                style: ScalarStyle::Plain,
            },
        ))
    }
}
