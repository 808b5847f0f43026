//! Lexical anomalies.
//!
//! The lexer never fails: anything it cannot classify becomes a
//! [`TokenKind::Invalid`](super::TokenKind::Invalid) token carrying one of
//! these, and the recognizer rejects it when it reaches that token.

/// Why a stretch of input could not be turned into a regular token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexError {
    /// A character that starts no token.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// A `'...'` literal reaching end of input.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A `"..."` or `` `...` `` identifier reaching end of input.
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdentifier,
    /// A `$tag$...$tag$` literal whose closing tag never appears.
    #[error("unterminated dollar-quoted string")]
    UnterminatedDollarString,
    /// An `X'...'` literal reaching end of input.
    #[error("unterminated blob literal")]
    UnterminatedBlob,
    /// An `X'...'` literal with a non-hex character or an odd digit count.
    #[error("invalid blob literal")]
    InvalidBlob,
    /// A `/* ...` comment reaching end of input.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A number with a dangling exponent or trailing identifier characters.
    #[error("malformed numeric literal")]
    MalformedNumber,
    /// A `$` not followed by digits or a dollar-quote tag.
    #[error("invalid parameter placeholder")]
    InvalidParameter,
}
