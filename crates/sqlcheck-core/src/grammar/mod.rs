//! SQL grammar recognizer
//!
//! A hand-written recursive descent recognizer with Pratt expression parsing.
//! It decides whether a token stream derives from the statement grammar
//! without building a syntax tree.

mod error;
mod pratt;
mod recognizer;
pub mod rules;

pub use error::ValidationError;
pub use recognizer::Recognizer;
pub use rules::{Rule, STATEMENT_RULES, StatementInfo, StatementKind};
