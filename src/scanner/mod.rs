//! The YAML scanner: the state machine turning characters into tokens.
//!
//! This corresponds to the low-level interface when reading YAML. The
//! scanner emits tokens as they are read (akin to a lexer), but it also
//! holds sufficient context to disambiguate constructs that need
//! lookahead: indentation, whether a scalar is a mapping key, whether a
//! flow collection is open. It has no notion of the event grammar built
//! on top of tokens (that belongs to a parser this crate does not
//! provide); it only guarantees a well-formed token stream or a single,
//! located [`SyntaxError`].

mod anchor;
pub mod config;
mod directive;
mod scalar;
mod tag;

use crate::buffer::LookAheadBuffer;
use crate::char_traits::{is_alpha, is_blank, is_blankz, is_break, is_breakz, is_flow, is_z};
use crate::error::{ScanResult, SyntaxError};
use crate::mark::Mark;
use crate::queue::InsertionQueue;
use crate::simple_key::SimpleKey;
use crate::token::{Token, TokenKind};

pub use config::ScannerConfig;

/// An indentation level on the stack of indentations.
#[derive(Clone, Debug, Default)]
struct Indent {
    /// The former indentation level.
    indent: isize,
    /// Whether, upon closing, this indent generates a `BlockEnd` token.
    ///
    /// Some indentation levels don't start a block, e.g. the single extra
    /// column after a block sequence's `-`: closing them must not emit a
    /// `BlockEnd`, or every sequence entry would produce one.
    needs_block_end: bool,
}

/// Behavior to adopt regarding treating tabs as whitespace.
///
/// Tab is a valid YAML whitespace character but does not behave the same
/// as a space everywhere (it may not be used for indentation).
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) enum SkipTabs {
    /// Skip all tabs as whitespace.
    Yes,
    /// Don't skip any tab; return from the function upon encountering one.
    No,
    /// Return value produced by a call with `Yes`.
    Result(bool, bool),
}

impl SkipTabs {
    /// Whether tabs were found while skipping whitespace.
    ///
    /// Must be called on the value returned by [`Scanner::skip_ws_to_eol`].
    pub(crate) fn found_tabs(self) -> bool {
        matches!(self, SkipTabs::Result(true, _))
    }

    /// Whether at least one valid YAML whitespace was found.
    ///
    /// Must be called on the value returned by [`Scanner::skip_ws_to_eol`].
    pub(crate) fn has_valid_yaml_ws(self) -> bool {
        matches!(self, SkipTabs::Result(_, true))
    }
}

/// The YAML scanner.
///
/// Generic over any `Iterator<Item = char>`; see [`crate::source`] for
/// adapters turning a `&str` or a byte stream into one.
#[allow(clippy::struct_excessive_bools)]
pub struct Scanner<I> {
    /// The lookahead window over the character source.
    buffer: LookAheadBuffer<I>,
    /// The position of the cursor within the source.
    mark: Mark,
    /// Tuning knobs (simple-key distance limit, mostly).
    config: ScannerConfig,
    /// Tokens ready, or nearly ready, to be returned.
    ///
    /// Holds tokens that cannot yet be released, such as a scalar which
    /// may turn out to be a mapping key once more context is available.
    tokens: InsertionQueue<Token>,
    /// The last error encountered, if any. Scanning does not resume after one.
    error: Option<SyntaxError>,

    /// Whether `StreamStart` has already been emitted.
    stream_start_produced: bool,
    /// Whether `StreamEnd` has already been emitted.
    stream_end_produced: bool,
    adjacent_value_allowed_at: usize,
    /// Whether a simple key could potentially start at the current position.
    simple_key_allowed: bool,
    /// A stack of potential simple keys, one slot per flow-nesting level
    /// (slot 0 is block context).
    simple_keys: Vec<SimpleKey>,
    /// The current indentation level.
    indent: isize,
    /// All block indentation levels we are inside of (except the current one).
    indents: Vec<Indent>,
    /// Level of nesting of flow collections.
    flow_level: u8,
    /// The number of tokens that have been returned from the scanner so far.
    tokens_parsed: usize,
    /// Whether a token is ready to be taken from `tokens`.
    token_available: bool,
    /// Whether all characters encountered since the last newline were whitespace.
    leading_whitespace: bool,
    /// Whether we have started a flow mapping (used to detect implicit ones).
    flow_mapping_started: bool,
    /// Whether we are currently inside an implicit flow mapping.
    implicit_flow_mapping: bool,
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }
        match self.next_token() {
            Ok(Some(tok)) => {
                log::trace!("scanned {:?} {:?}..{:?}", tok.kind, tok.start, tok.end);
                Some(tok)
            }
            Ok(None) => None,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Create a scanner with the default configuration.
    #[must_use]
    pub fn new(source: I) -> Scanner<I> {
        Scanner::new_with_config(source, ScannerConfig::default())
    }

    /// Create a scanner, overriding its tuning knobs.
    #[must_use]
    pub fn new_with_config(source: I, config: ScannerConfig) -> Scanner<I> {
        Scanner {
            buffer: LookAheadBuffer::new(source),
            mark: Mark::new(0, 0, 0),
            config,
            tokens: InsertionQueue::new(),
            error: None,

            stream_start_produced: false,
            stream_end_produced: false,
            adjacent_value_allowed_at: 0,
            simple_key_allowed: true,
            simple_keys: Vec::new(),
            indent: -1,
            indents: Vec::new(),
            flow_level: 0,
            tokens_parsed: 0,
            token_available: false,
            leading_whitespace: true,
            flow_mapping_started: false,
            implicit_flow_mapping: false,
        }
    }

    /// Return a copy of the last error encountered, if any.
    #[must_use]
    pub fn get_error(&self) -> Option<SyntaxError> {
        self.error.clone()
    }

    #[must_use]
    pub fn stream_started(&self) -> bool {
        self.stream_start_produced
    }

    #[must_use]
    pub fn stream_ended(&self) -> bool {
        self.stream_end_produced
    }

    #[must_use]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Fill the lookahead window with at least `count` characters.
    pub(crate) fn lookahead(&mut self, count: usize) {
        self.buffer.cache(count);
    }

    /// Peek `offset` characters ahead without consuming anything.
    pub(crate) fn peek_at(&mut self, offset: usize) -> char {
        self.lookahead(offset + 1);
        self.buffer.peek(offset)
    }

    /// Consume the next character, removing it from the buffer and updating the mark.
    pub(crate) fn skip(&mut self) {
        let c = self.buffer.peek(0);
        self.buffer.skip(1);
        self.mark.index += 1;
        if c == '\n' {
            self.leading_whitespace = true;
            self.mark.line += 1;
            self.mark.column = 0;
        } else {
            if self.leading_whitespace && !is_blank(c) {
                self.leading_whitespace = false;
            }
            self.mark.column += 1;
        }
    }

    /// Consume a linebreak (`\r`, `\n` or `\r\n`), if any. Does nothing otherwise.
    pub(crate) fn skip_line(&mut self) {
        if self.buffer.peek(0) == '\r' && self.buffer.peek(1) == '\n' {
            self.skip();
            self.skip();
        } else if is_break(self.buffer.peek(0)) {
            self.skip();
        }
    }

    /// Return the next character without consuming it.
    pub(crate) fn ch(&self) -> char {
        self.buffer.peek(0)
    }

    /// Ensure one character is cached, then return it.
    pub(crate) fn look_ch(&mut self) -> char {
        self.lookahead(1);
        self.ch()
    }

    /// Consume and return the next character.
    pub(crate) fn ch_skip(&mut self) -> char {
        let ret = self.ch();
        self.skip();
        ret
    }

    /// Return whether the next character is `c`.
    pub(crate) fn ch_is(&self, c: char) -> bool {
        self.buffer.peek(0) == c
    }

    /// Read and consume a line break, pushing a single `\n` onto `s`.
    ///
    /// # Panics
    /// Panics if the next characters do not form a line break.
    pub(crate) fn read_break(&mut self, s: &mut String) {
        if self.buffer.peek(0) == '\r' && self.buffer.peek(1) == '\n' {
            s.push('\n');
            self.skip();
            self.skip();
        } else if self.buffer.peek(0) == '\r' || self.buffer.peek(0) == '\n' {
            s.push('\n');
            self.skip();
        } else {
            unreachable!("read_break called without a line break ahead");
        }
    }

    /// Insert a token so that exactly `pos` tokens of the (not yet
    /// released) queue remain ahead of it.
    pub(crate) fn insert_token(&mut self, pos: usize, tok: Token) {
        log::trace!("queue insert at {pos}: {:?}", tok.kind);
        self.tokens.insert(pos, tok);
    }

    pub(crate) fn allow_simple_key(&mut self) {
        self.simple_key_allowed = true;
    }

    pub(crate) fn disallow_simple_key(&mut self) {
        self.simple_key_allowed = false;
    }

    fn fetch_next_token(&mut self) -> ScanResult {
        self.lookahead(1);

        if !self.stream_start_produced {
            self.fetch_stream_start();
            return Ok(());
        }
        self.skip_to_next_token()?;

        log::trace!("fetch_next_token at {:?}, ch={:?}", self.mark, self.ch());

        self.stale_simple_keys()?;

        let mark = self.mark;
        self.unroll_indent(mark.column as isize);

        self.lookahead(4);

        if is_z(self.ch()) {
            self.fetch_stream_end()?;
            return Ok(());
        }

        if self.mark.column == 0 && self.ch_is('%') {
            return self.fetch_directive();
        }

        if self.mark.column == 0
            && self.buffer.peek(0) == '-'
            && self.buffer.peek(1) == '-'
            && self.buffer.peek(2) == '-'
            && is_blankz(self.buffer.peek(3))
        {
            self.fetch_document_indicator(TokenKind::DocumentStart)?;
            return Ok(());
        }

        if self.mark.column == 0
            && self.buffer.peek(0) == '.'
            && self.buffer.peek(1) == '.'
            && self.buffer.peek(2) == '.'
            && is_blankz(self.buffer.peek(3))
        {
            self.fetch_document_indicator(TokenKind::DocumentEnd)?;
            self.skip_ws_to_eol(SkipTabs::Yes);
            if !is_breakz(self.ch()) {
                return Err(SyntaxError::new(
                    self.mark,
                    "invalid content after document end marker",
                ));
            }
            return Ok(());
        }

        if (self.mark.column as isize) < self.indent {
            return Err(SyntaxError::new(self.mark, "invalid indentation"));
        }

        let c = self.buffer.peek(0);
        let nc = self.buffer.peek(1);
        match c {
            '[' => self.fetch_flow_collection_start(TokenKind::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(TokenKind::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(TokenKind::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(TokenKind::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),
            '-' if is_blankz(nc) => self.fetch_block_entry(),
            '?' if is_blankz(nc) => self.fetch_key(),
            ':' if is_blankz(nc)
                || (self.flow_level > 0
                    && (is_flow(nc) || self.mark.index == self.adjacent_value_allowed_at)) =>
            {
                self.fetch_value()
            }
            '*' => self.fetch_anchor(true),
            '&' => self.fetch_anchor(false),
            '!' => self.fetch_tag(),
            '|' if self.flow_level == 0 => self.fetch_block_scalar(true),
            '>' if self.flow_level == 0 => self.fetch_block_scalar(false),
            '\'' => self.fetch_flow_scalar(true),
            '"' => self.fetch_flow_scalar(false),
            '-' if !is_blankz(nc) => self.fetch_plain_scalar(),
            ':' | '?' if !is_blankz(nc) && self.flow_level == 0 => self.fetch_plain_scalar(),
            '%' | '@' | '`' => Err(SyntaxError::new(
                self.mark,
                format!("unexpected character: `{c}'"),
            )),
            _ => self.fetch_plain_scalar(),
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        if self.stream_end_produced {
            return Ok(None);
        }

        if !self.token_available {
            self.fetch_more_tokens()?;
        }
        let t = self.tokens.dequeue().expect("token_available implies a token is queued");
        self.token_available = false;
        self.tokens_parsed += 1;

        if let TokenKind::StreamEnd = t.kind {
            self.stream_end_produced = true;
        }
        Ok(Some(t))
    }

    fn fetch_more_tokens(&mut self) -> ScanResult {
        loop {
            let mut need_more;
            if self.tokens.is_empty() {
                need_more = true;
            } else {
                need_more = false;
                self.stale_simple_keys()?;
                for sk in &self.simple_keys {
                    if sk.possible && sk.token_number == self.tokens_parsed {
                        need_more = true;
                        break;
                    }
                }
            }

            if !need_more {
                break;
            }
            self.fetch_next_token()?;
        }
        self.token_available = true;

        Ok(())
    }

    /// Mark simple keys that can no longer be keys as such.
    ///
    /// # Errors
    /// Returns an error if a staled key was required.
    fn stale_simple_keys(&mut self) -> ScanResult {
        for sk in &mut self.simple_keys {
            if sk.possible
                && self.flow_level == 0
                && (sk.mark.line < self.mark.line
                    || sk.mark.index + self.config.simple_key_max_distance < self.mark.index)
            {
                if sk.required {
                    return Err(SyntaxError::new(self.mark, "simple key expect ':'"));
                }
                log::trace!("stale simple key at {:?}", sk.mark);
                sk.possible = false;
            }
        }
        Ok(())
    }

    /// Skip over all whitespace and comments until the next token.
    ///
    /// # Errors
    /// Returns an error if a tabulation is found where indentation is required.
    fn skip_to_next_token(&mut self) -> ScanResult {
        loop {
            match self.look_ch() {
                ' ' => self.skip(),
                '\t' if self.is_within_block()
                    && self.leading_whitespace
                    && (self.mark.column as isize) < self.indent =>
                {
                    self.skip_ws_to_eol(SkipTabs::Yes);
                    if !is_breakz(self.ch()) {
                        return Err(SyntaxError::new(
                            self.mark,
                            "tabs disallowed within this context (block indentation)",
                        ));
                    }
                }
                '\t' => self.skip(),
                '\n' | '\r' => {
                    self.lookahead(2);
                    self.skip_line();
                    if self.flow_level == 0 {
                        self.allow_simple_key();
                    }
                }
                '#' => {
                    while !is_breakz(self.ch()) {
                        self.skip();
                        self.lookahead(1);
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip over YAML whitespace (` `, `\n`, `\r`).
    ///
    /// # Errors
    /// Returns an error if no whitespace was found.
    fn skip_yaml_whitespace(&mut self) -> ScanResult {
        let mut need_whitespace = true;
        loop {
            match self.look_ch() {
                ' ' => {
                    self.skip();
                    need_whitespace = false;
                }
                '\n' | '\r' => {
                    self.lookahead(2);
                    self.skip_line();
                    if self.flow_level == 0 {
                        self.allow_simple_key();
                    }
                    need_whitespace = false;
                }
                '#' => {
                    while !is_breakz(self.ch()) {
                        self.skip();
                        self.lookahead(1);
                    }
                }
                _ => break,
            }
        }

        if need_whitespace {
            Err(SyntaxError::new(self.mark(), "expected whitespace"))
        } else {
            Ok(())
        }
    }

    /// Skip YAML whitespace at most up to end of line. Also skips comments.
    pub(crate) fn skip_ws_to_eol(&mut self, skip_tabs: SkipTabs) -> SkipTabs {
        let mut encountered_tab = false;
        let mut has_yaml_ws = false;
        loop {
            match self.look_ch() {
                ' ' => {
                    has_yaml_ws = true;
                    self.skip();
                }
                '\t' if skip_tabs != SkipTabs::No => {
                    encountered_tab = true;
                    self.skip();
                }
                '#' => {
                    while !is_breakz(self.look_ch()) {
                        self.skip();
                    }
                }
                _ => break,
            }
        }

        SkipTabs::Result(encountered_tab, has_yaml_ws)
    }

    fn fetch_stream_start(&mut self) {
        let mark = self.mark;
        self.indent = -1;
        self.stream_start_produced = true;
        self.allow_simple_key();
        self.tokens.enqueue(Token::at(mark, TokenKind::StreamStart));
        self.simple_keys.push(SimpleKey::new(Mark::new(0, 0, 0)));
    }

    fn fetch_stream_end(&mut self) -> ScanResult {
        // Force a new line so the final mark looks sane.
        if self.mark.column != 0 {
            self.mark.column = 0;
            self.mark.line += 1;
        }

        for sk in &mut self.simple_keys {
            if sk.required && sk.possible {
                return Err(SyntaxError::new(self.mark, "simple key expected"));
            }
            sk.possible = false;
        }

        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();

        self.tokens.enqueue(Token::at(self.mark, TokenKind::StreamEnd));
        Ok(())
    }

    fn fetch_document_indicator(&mut self, kind: TokenKind) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();

        let mark = self.mark;
        self.skip();
        self.skip();
        self.skip();

        self.tokens.enqueue(Token::new(mark, self.mark, kind));
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, kind: TokenKind) -> ScanResult {
        // The indicators `[` and `{` may start a simple key.
        self.save_simple_key();

        self.roll_one_col_indent();
        self.increase_flow_level()?;

        self.allow_simple_key();

        let start_mark = self.mark;
        self.skip();

        if kind == TokenKind::FlowMappingStart {
            self.flow_mapping_started = true;
        }

        self.tokens.enqueue(Token::new(start_mark, self.mark, kind));
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, kind: TokenKind) -> ScanResult {
        self.remove_simple_key()?;
        self.decrease_flow_level();

        self.disallow_simple_key();

        self.end_implicit_mapping(self.mark);

        let start_mark = self.mark;
        self.skip();

        self.tokens.enqueue(Token::new(start_mark, self.mark, kind));
        Ok(())
    }

    /// Push the `FlowEntry` token and skip over the `,`.
    fn fetch_flow_entry(&mut self) -> ScanResult {
        self.remove_simple_key()?;
        self.allow_simple_key();

        self.end_implicit_mapping(self.mark);

        let start_mark = self.mark;
        self.skip();

        self.tokens
            .enqueue(Token::new(start_mark, self.mark, TokenKind::FlowEntry));
        Ok(())
    }

    fn increase_flow_level(&mut self) -> ScanResult {
        self.simple_keys.push(SimpleKey::new(Mark::new(0, 0, 0)));
        self.flow_level = self
            .flow_level
            .checked_add(1)
            .ok_or_else(|| SyntaxError::new(self.mark, "recursion limit exceeded"))?;
        Ok(())
    }

    fn decrease_flow_level(&mut self) {
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
    }

    /// Push the `Block*` token(s) and skip over the `-`.
    fn fetch_block_entry(&mut self) -> ScanResult {
        if self.flow_level > 0 {
            return Err(SyntaxError::new(
                self.mark,
                r#""-" is only valid inside a block"#,
            ));
        }
        if !self.simple_key_allowed {
            return Err(SyntaxError::new(
                self.mark,
                "block sequence entries are not allowed in this context",
            ));
        }

        let mark = self.mark;
        self.skip();

        self.roll_indent(mark.column, None, TokenKind::BlockSequenceStart, mark);
        let found_tabs = self.skip_ws_to_eol(SkipTabs::Yes).found_tabs();
        self.lookahead(2);
        if found_tabs && self.buffer.peek(0) == '-' && is_blankz(self.buffer.peek(1)) {
            return Err(SyntaxError::new(
                self.mark,
                "'-' must be followed by a valid YAML whitespace",
            ));
        }

        self.skip_ws_to_eol(SkipTabs::No);
        if is_break(self.look_ch()) || is_flow(self.ch()) {
            self.roll_one_col_indent();
        }

        self.remove_simple_key()?;
        self.allow_simple_key();

        self.tokens
            .enqueue(Token::new(mark, self.mark, TokenKind::BlockEntry));

        Ok(())
    }

    fn fetch_key(&mut self) -> ScanResult {
        let start_mark = self.mark;
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(SyntaxError::new(
                    self.mark,
                    "mapping keys are not allowed in this context",
                ));
            }
            self.roll_indent(
                start_mark.column,
                None,
                TokenKind::BlockMappingStart,
                start_mark,
            );
        } else {
            self.flow_mapping_started = true;
        }

        self.remove_simple_key()?;

        if self.flow_level == 0 {
            self.allow_simple_key();
        } else {
            self.disallow_simple_key();
        }

        self.skip();
        self.skip_yaml_whitespace()?;
        if self.ch() == '\t' {
            return Err(SyntaxError::new(self.mark(), "tabs disallowed in this context"));
        }
        self.tokens
            .enqueue(Token::new(start_mark, self.mark, TokenKind::Key));
        Ok(())
    }

    /// Fetch a value from a mapping (after a `:`).
    fn fetch_value(&mut self) -> ScanResult {
        let sk = self.simple_keys.last().unwrap().clone();
        let start_mark = self.mark;
        self.implicit_flow_mapping = self.flow_level > 0 && !self.flow_mapping_started;

        self.skip();
        if self.look_ch() == '\t'
            && !self.skip_ws_to_eol(SkipTabs::Yes).has_valid_yaml_ws()
            && (self.ch() == '-' || is_alpha(self.ch()))
        {
            return Err(SyntaxError::new(
                self.mark,
                "':' must be followed by a valid YAML whitespace",
            ));
        }

        if sk.possible {
            let tok = Token::at(sk.mark, TokenKind::Key);
            self.insert_token(sk.token_number - self.tokens_parsed, tok);
            if self.implicit_flow_mapping {
                if sk.mark.line < start_mark.line {
                    return Err(SyntaxError::new(
                        start_mark,
                        "illegal placement of ':' indicator",
                    ));
                }
                self.insert_token(
                    sk.token_number - self.tokens_parsed,
                    Token::at(self.mark, TokenKind::FlowMappingStart),
                );
            }

            self.roll_indent(
                sk.mark.column,
                Some(sk.token_number),
                TokenKind::BlockMappingStart,
                start_mark,
            );
            self.roll_one_col_indent();

            self.simple_keys.last_mut().unwrap().possible = false;
            self.disallow_simple_key();
        } else {
            if self.implicit_flow_mapping {
                self.tokens
                    .enqueue(Token::at(self.mark, TokenKind::FlowMappingStart));
            }
            if self.flow_level == 0 {
                if !self.simple_key_allowed {
                    return Err(SyntaxError::new(
                        start_mark,
                        "mapping values are not allowed in this context",
                    ));
                }
                self.roll_indent(
                    start_mark.column,
                    None,
                    TokenKind::BlockMappingStart,
                    start_mark,
                );
            }
            self.roll_one_col_indent();

            if self.flow_level == 0 {
                self.allow_simple_key();
            } else {
                self.disallow_simple_key();
            }
        }
        self.tokens
            .enqueue(Token::new(start_mark, self.mark, TokenKind::Value));

        Ok(())
    }

    /// Add an indentation level to the stack with the given block token, if needed.
    fn roll_indent(&mut self, col: usize, number: Option<usize>, kind: TokenKind, mark: Mark) {
        if self.flow_level > 0 {
            return;
        }

        if self.indent <= col as isize {
            if let Some(indent) = self.indents.last() {
                if !indent.needs_block_end {
                    self.indent = indent.indent;
                    self.indents.pop();
                }
            }
        }

        if self.indent < col as isize {
            self.indents.push(Indent {
                indent: self.indent,
                needs_block_end: true,
            });
            self.indent = col as isize;
            let tokens_parsed = self.tokens_parsed;
            match number {
                Some(n) => self.insert_token(n - tokens_parsed, Token::at(mark, kind)),
                None => self.tokens.enqueue(Token::at(mark, kind)),
            }
        }
    }

    /// Pop indentation levels from the stack while they are further indented than `col`.
    fn unroll_indent(&mut self, col: isize) {
        if self.flow_level > 0 {
            return;
        }
        while self.indent > col {
            let indent = self.indents.pop().unwrap();
            self.indent = indent.indent;
            if indent.needs_block_end {
                self.tokens
                    .enqueue(Token::at(self.mark, TokenKind::BlockEnd));
            }
        }
    }

    /// Add an indentation level of one column that does not start a block.
    fn roll_one_col_indent(&mut self) {
        if self.flow_level == 0 && self.indents.last().is_some_and(|x| x.needs_block_end) {
            self.indents.push(Indent {
                indent: self.indent,
                needs_block_end: false,
            });
            self.indent += 1;
        }
    }

    /// Unroll all indents created by [`Self::roll_one_col_indent`].
    fn unroll_non_block_indents(&mut self) {
        while let Some(indent) = self.indents.last() {
            if indent.needs_block_end {
                break;
            }
            self.indent = indent.indent;
            self.indents.pop();
        }
    }

    /// Save the last (not yet released) token as a simple key candidate.
    fn save_simple_key(&mut self) {
        if self.simple_key_allowed {
            let required = self.flow_level == 0
                && self.indent == (self.mark.column as isize)
                && self.indents.last().is_some_and(|i| i.needs_block_end);
            let mut sk = SimpleKey::new(self.mark);
            sk.possible = true;
            sk.required = required;
            sk.token_number = self.tokens_parsed + self.tokens.len();

            log::trace!("push simple key at {:?}", sk.mark);
            self.simple_keys.pop();
            self.simple_keys.push(sk);
        }
    }

    fn remove_simple_key(&mut self) -> ScanResult {
        let last = self.simple_keys.last_mut().unwrap();
        if last.possible && last.required {
            return Err(SyntaxError::new(self.mark, "simple key expected"));
        }

        last.possible = false;
        Ok(())
    }

    /// Whether the scanner is inside a block but outside any flow sequence.
    fn is_within_block(&self) -> bool {
        !self.indents.is_empty()
    }

    /// End an implicit flow mapping, if one was open.
    fn end_implicit_mapping(&mut self, mark: Mark) {
        if self.implicit_flow_mapping {
            self.implicit_flow_mapping = false;
            self.flow_mapping_started = false;
            self.tokens
                .enqueue(Token::at(mark, TokenKind::FlowMappingEnd));
        }
    }
}
