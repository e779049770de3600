//! `%YAML` and `%TAG` directive scanning.

use super::Scanner;
use crate::char_traits::{is_alpha, is_blank, is_blankz, is_break, is_breakz, is_digit};
use crate::error::SyntaxError;
use crate::mark::Mark;
use crate::token::{Token, TokenKind};

impl<I: Iterator<Item = char>> Scanner<I> {
    pub(super) fn fetch_directive(&mut self) -> crate::error::ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();

        let tok = self.scan_directive()?;
        self.tokens.enqueue(tok);

        Ok(())
    }

    fn scan_directive(&mut self) -> Result<Token, SyntaxError> {
        let start_mark = self.mark;
        self.skip();

        let name = self.scan_directive_name()?;
        let tok = match name.as_ref() {
            "YAML" => self.scan_version_directive_value(&start_mark)?,
            "TAG" => self.scan_tag_directive_value(&start_mark)?,
            _ => {
                return Err(SyntaxError::new(
                    start_mark,
                    format!("while scanning a directive, found unknown directive name: {name}"),
                ))
            }
        };
        self.lookahead(1);

        while is_blank(self.ch()) {
            self.skip();
            self.lookahead(1);
        }

        if self.ch() == '#' {
            while !is_breakz(self.ch()) {
                self.skip();
                self.lookahead(1);
            }
        }

        if !is_breakz(self.ch()) {
            return Err(SyntaxError::new(
                start_mark,
                "while scanning a directive, did not find expected comment or line break",
            ));
        }

        if is_break(self.ch()) {
            self.lookahead(2);
            self.skip_line();
        }

        Ok(tok)
    }

    fn scan_version_directive_value(&mut self, mark: &Mark) -> Result<Token, SyntaxError> {
        self.lookahead(1);

        while is_blank(self.ch()) {
            self.skip();
            self.lookahead(1);
        }

        let major = self.scan_version_directive_number(mark)?;

        if self.ch() != '.' {
            return Err(SyntaxError::new(
                *mark,
                "while scanning a YAML directive, did not find expected digit or '.' character",
            ));
        }

        self.skip();

        let minor = self.scan_version_directive_number(mark)?;

        Ok(Token::new(
            *mark,
            self.mark,
            TokenKind::VersionDirective { major, minor },
        ))
    }

    fn scan_directive_name(&mut self) -> Result<String, SyntaxError> {
        let start_mark = self.mark;
        let mut string = String::new();
        self.lookahead(1);
        while is_alpha(self.ch()) {
            string.push(self.ch());
            self.skip();
            self.lookahead(1);
        }

        if string.is_empty() {
            return Err(SyntaxError::new(
                start_mark,
                "while scanning a directive, could not find expected directive name",
            ));
        }

        if !is_blankz(self.ch()) {
            return Err(SyntaxError::new(
                start_mark,
                "while scanning a directive, found unexpected non-alphabetical character",
            ));
        }

        Ok(string)
    }

    fn scan_version_directive_number(&mut self, mark: &Mark) -> Result<u32, SyntaxError> {
        let mut val = 0u32;
        let mut length = 0usize;
        self.lookahead(1);
        while is_digit(self.ch()) {
            if length + 1 > 9 {
                return Err(SyntaxError::new(
                    *mark,
                    "while scanning a YAML directive, found extremely long version number",
                ));
            }
            length += 1;
            val = val * 10 + ((self.ch() as u32) - ('0' as u32));
            self.skip();
            self.lookahead(1);
        }

        if length == 0 {
            return Err(SyntaxError::new(
                *mark,
                "while scanning a YAML directive, did not find expected version number",
            ));
        }

        Ok(val)
    }

    fn scan_tag_directive_value(&mut self, mark: &Mark) -> Result<Token, SyntaxError> {
        self.lookahead(1);
        while is_blank(self.ch()) {
            self.skip();
            self.lookahead(1);
        }
        let handle = self.scan_tag_handle(true, mark)?;

        while is_blank(self.look_ch()) {
            self.skip();
        }

        let is_secondary = handle == "!!";
        let prefix = self.scan_tag_uri(true, is_secondary, "", mark)?;

        self.lookahead(1);

        if is_blankz(self.ch()) {
            Ok(Token::new(
                *mark,
                self.mark,
                TokenKind::TagDirective { handle, prefix },
            ))
        } else {
            Err(SyntaxError::new(
                *mark,
                "while scanning TAG, did not find expected whitespace or line break",
            ))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::token::TokenKind;
    use crate::Scanner;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Scanner::new(input.chars()).map(|t| t.kind).collect()
    }

    #[test]
    fn yaml_directive_is_parsed() {
        let k = kinds("%YAML 1.1\n---\n1\n");
        assert!(k.contains(&TokenKind::VersionDirective { major: 1, minor: 1 }));
    }

    #[test]
    fn tag_directive_is_parsed() {
        let k = kinds("%TAG !e! tag:example.com,2000:app/\n---\n1\n");
        assert!(k.iter().any(|t| matches!(
            t,
            TokenKind::TagDirective { handle, prefix }
                if handle == "!e!" && prefix == "tag:example.com,2000:app/"
        )));
    }

    #[test]
    fn unknown_directive_is_fatal() {
        let mut scanner = Scanner::new("%FOO bar baz\n---\n1\n".chars());
        let _: Vec<_> = (&mut scanner).collect();
        assert!(scanner.get_error().is_some());
    }

    #[test]
    fn version_number_overflow_is_fatal() {
        let mut scanner = Scanner::new("%YAML 9999999999.0\n".chars());
        let _: Vec<_> = (&mut scanner).collect();
        assert!(scanner.get_error().is_some());
    }

    #[test]
    fn missing_directive_name_is_fatal() {
        let mut scanner = Scanner::new("% \n".chars());
        let _: Vec<_> = (&mut scanner).collect();
        assert!(scanner.get_error().is_some());
    }
}
