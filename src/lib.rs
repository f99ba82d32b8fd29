//! Character-stream tokenizer for a small expression language.
//!
//! A [`Scanner`] pulls characters one at a time from any [`std::io::BufRead`]
//! and hands out positioned [`Token`]s until it reaches `EndOfInput`.

pub mod cursor;
pub mod error;
pub mod scanner;
pub mod token;

pub use {
    error::ScanError,
    scanner::{IdentifierScan, Scanner, Tokens},
    token::{SourcePosition, Token, TokenKind},
};
