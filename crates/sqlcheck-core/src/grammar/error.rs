//! Validation error types.

use crate::lexer::{LexError, Span};

/// Why an input was rejected.
///
/// Every variant carries enough position information for [`offset`] to point
/// at the first token that diverged from the grammar.
///
/// [`offset`]: ValidationError::offset
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValidationError {
    /// The input holds no statement (only whitespace, comments or `;`).
    #[error("empty input: no statement found")]
    Empty,
    /// The input bytes are not UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        offset: usize,
    },
    /// The input exceeds the configured size bound.
    #[error("input is {len} bytes, larger than the limit of {limit} bytes")]
    InputTooLarge {
        /// Input length in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// The lexer produced an invalid token where the grammar needed one.
    #[error("{error}")]
    Lexical {
        /// The lexical anomaly.
        error: LexError,
        /// Location of the invalid token.
        span: Span,
    },
    /// A token that no grammar alternative accepts.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        /// What the grammar could have accepted.
        expected: &'static str,
        /// Description of the offending token.
        found: String,
        /// Location of the offending token.
        span: Span,
    },
    /// The input stopped in the middle of a statement.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the grammar could have accepted.
        expected: &'static str,
        /// Input length in bytes.
        offset: usize,
    },
    /// Nesting went deeper than the configured cap.
    #[error("nesting exceeds the maximum depth of {limit}")]
    TooDeep {
        /// Configured depth cap.
        limit: usize,
        /// Start of the token at which the cap was crossed.
        offset: usize,
    },
}

impl ValidationError {
    /// Byte offset of the first diverging token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Empty | Self::InputTooLarge { .. } => 0,
            Self::InvalidUtf8 { offset }
            | Self::UnexpectedEnd { offset, .. }
            | Self::TooDeep { offset, .. } => *offset,
            Self::Lexical { span, .. } | Self::Unexpected { span, .. } => span.start,
        }
    }
}
