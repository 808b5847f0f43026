//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of
//! tokens. Lexing never fails: malformed input becomes
//! [`TokenKind::Invalid`] tokens that the grammar rejects.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{Keyword, Token, TokenCategory, TokenKind};
pub use tokenizer::Lexer;
