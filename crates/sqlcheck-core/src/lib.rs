//! # sqlcheck-core
//!
//! Decides whether a string is syntactically valid SQL.
//!
//! This crate provides:
//! - A hand-written lexer that never fails: malformed input becomes invalid
//!   tokens rather than errors
//! - A recursive descent recognizer with Pratt expression parsing that
//!   accepts or rejects without building a syntax tree
//! - A bounded nesting depth, so any input yields a definite answer
//!
//! ## Validating SQL
//!
//! ```rust
//! use sqlcheck_core::{is_valid, validate};
//!
//! assert!(is_valid("SELECT 1"));
//! assert!(is_valid("select id from users where name like 'a%';"));
//! assert!(!is_valid("SELECT 1 FROM"));
//! assert!(!is_valid(""));
//!
//! let outcome = validate("SELECT * FROM users WHERE");
//! assert_eq!(outcome.offset(), Some(25));
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use sqlcheck_core::{StatementPolicy, Validator, ValidatorConfig};
//!
//! let validator = Validator::new(
//!     ValidatorConfig::default()
//!         .with_max_depth(32)
//!         .with_policy(StatementPolicy::FirstOnly),
//! );
//! assert!(validator.validate("SELECT 1; this part is ignored").is_valid());
//! ```

pub mod config;
pub mod grammar;
pub mod lexer;
mod validator;

pub use config::{DEFAULT_MAX_DEPTH, StatementPolicy, ValidatorConfig};
pub use grammar::{StatementInfo, StatementKind, ValidationError};
pub use lexer::{Keyword, LexError, Lexer, Span, Token, TokenCategory, TokenKind};
pub use validator::{ValidationOutcome, Validator, is_valid, validate};
