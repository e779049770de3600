//! Literal (`|`) and folded (`>`) block scalar scanning.

use crate::char_traits::{is_blank, is_break, is_breakz, is_digit, is_z};
use crate::error::{ScanResult, SyntaxError};
use crate::scanner::{Scanner, SkipTabs};
use crate::token::{ScalarStyle, Token, TokenKind};

/// How a block scalar's trailing line breaks are handled.
///
/// No indicator in the header defaults to [`Chomping::Clip`]: the final
/// line break is kept, any further trailing blank lines are dropped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Chomping {
    /// `-`: drop the final line break and any trailing blank lines.
    Strip,
    /// No indicator: keep exactly one final line break.
    Clip,
    /// `+`: keep the final line break and all trailing blank lines.
    Keep,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(crate) fn fetch_block_scalar(&mut self, literal: bool) -> ScanResult {
        self.save_simple_key();
        self.allow_simple_key();
        let tok = self.scan_block_scalar(literal)?;

        self.tokens.enqueue(tok);
        Ok(())
    }

    fn scan_block_scalar(&mut self, literal: bool) -> Result<Token, SyntaxError> {
        let header_mark = self.mark;
        let mut chomping = Chomping::Clip;
        let mut increment: usize = 0;
        let mut indent: usize = 0;
        let mut trailing_blank: bool;
        let mut leading_blank: bool = false;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();

        // Skip `|` or `>`.
        self.skip();
        self.unroll_non_block_indents();

        if self.look_ch() == '+' || self.ch() == '-' {
            chomping = if self.ch() == '+' {
                Chomping::Keep
            } else {
                Chomping::Strip
            };
            self.skip();
            if is_digit(self.look_ch()) {
                if self.ch() == '0' {
                    return Err(SyntaxError::new(
                        header_mark,
                        "while scanning a block scalar, found an indentation indicator equal to 0",
                    ));
                }
                increment = (self.ch() as usize) - ('0' as usize);
                self.skip();
            }
        } else if is_digit(self.ch()) {
            if self.ch() == '0' {
                return Err(SyntaxError::new(
                    header_mark,
                    "while scanning a block scalar, found an indentation indicator equal to 0",
                ));
            }

            increment = (self.ch() as usize) - ('0' as usize);
            self.skip();
            self.lookahead(1);
            if self.ch() == '+' || self.ch() == '-' {
                chomping = if self.ch() == '+' {
                    Chomping::Keep
                } else {
                    Chomping::Strip
                };
                self.skip();
            }
        }

        self.skip_ws_to_eol(SkipTabs::Yes);

        if !is_breakz(self.ch()) {
            return Err(SyntaxError::new(
                header_mark,
                "while scanning a block scalar, did not find expected comment or line break",
            ));
        }

        if is_break(self.ch()) {
            self.lookahead(2);
            self.skip_line();
        }

        if self.look_ch() == '\t' {
            return Err(SyntaxError::new(
                header_mark,
                "a block scalar content cannot start with a tab",
            ));
        }

        if increment > 0 {
            indent = if self.indent >= 0 {
                (self.indent + increment as isize) as usize
            } else {
                increment
            }
        }

        // Scan the leading line breaks, determining the indentation level if needed.
        if indent == 0 {
            self.skip_block_scalar_first_line_indent(&mut indent, &mut trailing_breaks);
        } else {
            self.skip_block_scalar_indent(indent, &mut trailing_breaks);
        }

        self.lookahead(1);

        let content_start_mark = self.mark;

        while (self.mark.column) == indent && !is_z(self.ch()) {
            // Beginning of a non-empty line.
            trailing_blank = is_blank(self.ch());
            if !literal && !leading_break.is_empty() && !leading_blank && !trailing_blank {
                if trailing_breaks.is_empty() {
                    string.push(' ');
                }
                leading_break.clear();
            } else {
                string.push_str(&leading_break);
                leading_break.clear();
            }

            string.push_str(&trailing_breaks);
            trailing_breaks.clear();

            leading_blank = is_blank(self.ch());

            while !is_breakz(self.ch()) {
                string.push(self.ch());
                self.skip();
                self.lookahead(1);
            }
            if is_z(self.ch()) {
                break;
            }

            self.lookahead(2);
            self.read_break(&mut leading_break);

            self.skip_block_scalar_indent(indent, &mut trailing_breaks);
        }

        // Apply chomping.
        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => string.push_str(&leading_break),
            Chomping::Keep => {
                string.push_str(&leading_break);
                string.push_str(&trailing_breaks);
            }
        }

        let style = if literal {
            ScalarStyle::Literal
        } else {
            ScalarStyle::Folded
        };
        Ok(Token::new(
            content_start_mark,
            self.mark,
            TokenKind::Scalar { value: string, style },
        ))
    }

    /// Skip block scalar indentation and empty lines.
    fn skip_block_scalar_indent(&mut self, indent: usize, breaks: &mut String) {
        loop {
            while (self.mark.column) < indent && self.look_ch() == ' ' {
                self.skip();
            }

            if is_break(self.look_ch()) {
                self.lookahead(2);
                self.read_break(breaks);
            } else {
                break;
            }
        }
    }

    /// Determine the indentation level for a block scalar from its first line.
    ///
    /// Skips whitespace-only lines and sets `indent` to the longest such
    /// line's width.
    fn skip_block_scalar_first_line_indent(&mut self, indent: &mut usize, breaks: &mut String) {
        let mut max_indent = 0;
        loop {
            while self.look_ch() == ' ' {
                self.skip();
            }

            if (self.mark.column) > max_indent {
                max_indent = (self.mark.column);
            }

            if is_break(self.look_ch()) {
                self.lookahead(2);
                self.read_break(breaks);
            } else {
                break;
            }
        }

        // `indent` must be at least 1 unless the surrounding indent is -1
        // (top-level), in which case an unindented first content line sets
        // the indentation to 0.
        *indent = max_indent.max((self.indent + 1) as usize);
        if self.indent > 0 {
            *indent = (*indent).max(1);
        }
    }
}
