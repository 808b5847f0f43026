//! Pratt binding powers for operator precedence.
//!
//! Lowest to highest: `OR`, `AND`, prefix `NOT`, comparisons and predicates,
//! `|`, `&`, shifts, `+ - ||`, `* / %`, unary `- + ~`, then the postfix
//! forms `::`, `COLLATE` and `[..]`.

use crate::lexer::{Keyword, TokenKind};

/// Minimum binding power that stops before comparisons and predicates.
///
/// Used where an expression is followed by keywords that would otherwise
/// read as operators, e.g. `DEFAULT 0 NOT NULL`.
pub const ARITHMETIC_BP: u8 = 9;

/// Returns the prefix binding power for a unary operator.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // Unary minus, plus and bitwise NOT
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(19),
        // NOT keyword
        TokenKind::Keyword(Keyword::Not) => Some(5),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparison operators
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((7, 8)),

        // IS, IN, BETWEEN, LIKE, ILIKE and their NOT forms
        TokenKind::Keyword(
            Keyword::Is
            | Keyword::In
            | Keyword::Between
            | Keyword::Like
            | Keyword::Ilike
            | Keyword::Not,
        ) => Some((7, 8)),

        // Bitwise OR
        TokenKind::BitOr => Some((9, 10)),

        // Bitwise AND
        TokenKind::BitAnd => Some((11, 12)),

        // Bit shifts
        TokenKind::LeftShift | TokenKind::RightShift => Some((13, 14)),

        // Additive (string concat has same precedence as addition)
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((15, 16)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((17, 18)),

        _ => None,
    }
}

/// Returns the postfix binding power for a token.
///
/// Returns `None` if the token is not a postfix operator.
#[must_use]
pub const fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // Casts, collations and subscripts
        TokenKind::DoubleColon | TokenKind::LeftBracket | TokenKind::Keyword(Keyword::Collate) => {
            Some(21)
        }
        _ => None,
    }
}

/// Returns true for the comparison operators. They take `ANY`, `SOME` or
/// `ALL` quantifiers and do not associate.
#[must_use]
pub const fn is_comparison(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
    )
}
