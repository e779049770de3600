// Copyright 2015, Yuheng Chen.
// Copyright 2023, Ethiraric.
// See the LICENSE file at the top-level directory of this distribution.

//! A streaming YAML 1.1 scanner: characters in, tokens out.
//!
//! This crate implements only the lexical layer of YAML — the component
//! that turns a character stream into a well-formed token stream while
//! tracking indentation, flow nesting and simple-key lookahead. It does
//! not build an event grammar, a representation model, or an emitter on
//! top of that token stream; those are layers a parser built on this
//! crate would add.
//!
//! # Usage
//!
//! ```
//! use yaml_scan::{Reader, TokenKind};
//!
//! let mut reader = Reader::new("a: [1, 2]\n".chars());
//! while reader.move_next().unwrap() {
//!     let tok = reader.current().unwrap();
//!     if let TokenKind::Scalar { value, .. } = &tok.kind {
//!         println!("scalar: {value}");
//!     }
//!     reader.consume_current();
//! }
//! ```
//!
//! Alternatively, [`scanner::Scanner`] itself implements `Iterator<Item =
//! Token>`, stopping (returning `None`) on the first [`SyntaxError`]; call
//! [`scanner::Scanner::get_error`] afterwards to retrieve it.

#![cfg_attr(feature = "cargo-clippy", warn(clippy::pedantic))]
#![cfg_attr(
    feature = "cargo-clippy",
    allow(
        clippy::match_same_arms,
        clippy::should_implement_trait,
        clippy::missing_errors_doc,
        clippy::missing_panics_doc,
        clippy::redundant_else,
    )
)]

pub(crate) mod buffer;
pub(crate) mod char_traits;
pub mod error;
pub mod mark;
pub(crate) mod queue;
pub mod reader;
pub mod scanner;
pub(crate) mod simple_key;
pub mod source;
pub mod token;

pub use crate::error::SyntaxError;
pub use crate::mark::Mark;
pub use crate::reader::Reader;
pub use crate::scanner::{Scanner, ScannerConfig};
pub use crate::source::{from_str, Utf8StreamSource};
pub use crate::token::{ScalarStyle, Token, TokenKind};
