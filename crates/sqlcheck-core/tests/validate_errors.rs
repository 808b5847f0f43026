//! Tests for rejection reasons and the offsets they report.

mod common;
use common::*;

use sqlcheck_core::{
    LexError, Span, StatementPolicy, ValidationError, Validator, ValidatorConfig, is_valid,
    validate,
};

// =============================================================================
// Acceptance basics
// =============================================================================

#[test]
fn basic_acceptance() {
    assert!(is_valid("SELECT 1"));
    assert!(is_valid("SELECT 1;"));
    assert!(!is_valid("INVALID SQL"));
    assert!(!is_valid(""));
    assert!(!is_valid("SELECT 1 FROM"));
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(is_valid("select 1"), is_valid("SELECT 1"));
    assert_valid("SeLeCt Id FrOm UsErS wHeRe Id In (1, 2)");
}

#[test]
fn empty_units() {
    for sql in ["", "   ", "\n\t", "-- comment only", ";;;", "/* c */ ;"] {
        assert_eq!(error_for(sql), ValidationError::Empty, "input: {sql:?}");
        assert_eq!(validate(sql).offset(), Some(0));
    }
}

// =============================================================================
// Syntax errors
// =============================================================================

#[test]
fn unknown_statement() {
    let err = error_for("INVALID SQL");
    assert_eq!(err.offset(), 0);
    assert_eq!(err.to_string(), "expected statement, found identifier `INVALID`");
}

#[test]
fn trailing_token_after_statement() {
    let err = error_for("SELECT 1 2");
    assert_eq!(
        err,
        ValidationError::Unexpected {
            expected: "';' or end of input",
            found: "number `2`".into(),
            span: Span::new(9, 10),
        }
    );
    assert_eq!(
        err.to_string(),
        "expected ';' or end of input, found number `2`"
    );
}

#[test]
fn trailing_garbage_offset() {
    assert_eq!(
        validate("SELECT * FROM users WHERE id = 1 garbage").offset(),
        Some(33)
    );
}

#[test]
fn incomplete_where_reports_end_of_input() {
    let err = error_for("SELECT * FROM users WHERE");
    assert_eq!(
        err,
        ValidationError::UnexpectedEnd {
            expected: "expression",
            offset: 25,
        }
    );
}

#[test]
fn incomplete_second_statement() {
    assert_eq!(
        error_for("SELECT 1 FROM t; DROP"),
        ValidationError::UnexpectedEnd {
            expected: "TABLE, INDEX or VIEW",
            offset: 21,
        }
    );
}

#[test]
fn failure_in_second_statement_points_into_it() {
    let err = error_for("SELECT 1; SELECT FROM");
    assert_eq!(
        err,
        ValidationError::Unexpected {
            expected: "expression",
            found: "keyword FROM".into(),
            span: Span::new(17, 21),
        }
    );
}

#[test]
fn missing_punctuation_names_the_symbol() {
    let err = error_for("SELECT count(1 WHERE a");
    assert_eq!(err.offset(), 15);
    assert_eq!(err.to_string(), "expected ')', found keyword WHERE");
}

// =============================================================================
// Lexical errors
// =============================================================================

#[test]
fn unterminated_string() {
    assert_eq!(
        error_for("SELECT a FROM t WHERE b = 'x"),
        ValidationError::Lexical {
            error: LexError::UnterminatedString,
            span: Span::new(26, 28),
        }
    );
}

#[test]
fn unterminated_comment() {
    let err = error_for("SELECT /* never closed");
    assert_eq!(err.offset(), 7);
    assert!(matches!(
        err,
        ValidationError::Lexical {
            error: LexError::UnterminatedComment,
            ..
        }
    ));
}

#[test]
fn malformed_number() {
    assert_eq!(
        error_for("SELECT 12abc"),
        ValidationError::Lexical {
            error: LexError::MalformedNumber,
            span: Span::new(7, 12),
        }
    );
}

#[test]
fn unexpected_character() {
    let err = error_for("SELECT 1 @");
    assert_eq!(err.offset(), 9);
    assert_eq!(err.to_string(), "unexpected character");
}

#[test]
fn invalid_blob() {
    assert!(matches!(
        error_for("SELECT X'ABC'"),
        ValidationError::Lexical {
            error: LexError::InvalidBlob,
            ..
        }
    ));
}

// =============================================================================
// Limits and raw bytes
// =============================================================================

#[test]
fn nesting_beyond_default_depth() {
    let sql = format!("SELECT {}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(
        error_for(&sql),
        ValidationError::TooDeep {
            limit: 100,
            offset: 106,
        }
    );
}

#[test]
fn nesting_within_configured_depth() {
    let sql = format!("SELECT {}1{}", "(".repeat(50), ")".repeat(50));
    assert_valid(&sql);

    let validator = Validator::new(ValidatorConfig::default().with_max_depth(20));
    assert!(!validator.validate(&sql).is_valid());
}

#[test]
fn input_size_limit() {
    let validator = Validator::new(ValidatorConfig::default().with_max_input_bytes(8));
    assert!(validator.validate("SELECT 1").is_valid());
    assert_eq!(
        validator.validate("SELECT 10").into_result(),
        Err(ValidationError::InputTooLarge { len: 9, limit: 8 })
    );
}

#[test]
fn invalid_utf8_bytes() {
    let validator = Validator::default();
    assert!(validator.validate_bytes(b"SELECT 1").is_valid());
    assert_eq!(
        validator.validate_bytes(b"SELECT \xff").into_result(),
        Err(ValidationError::InvalidUtf8 { offset: 7 })
    );
}

// =============================================================================
// Statement policy
// =============================================================================

#[test]
fn all_statements_must_parse_by_default() {
    assert_valid("SELECT 1; SELECT 2; SELECT 3");
    assert_invalid("SELECT 1; garbage");
}

#[test]
fn first_only_policy() {
    let validator =
        Validator::new(ValidatorConfig::default().with_policy(StatementPolicy::FirstOnly));
    assert!(validator.validate("SELECT 1; garbage").is_valid());
    assert!(validator.validate("SELECT 1; 'unterminated").is_valid());
    assert!(!validator.validate("garbage; SELECT 1").is_valid());
    assert!(!validator.validate("SELECT 1 2").is_valid());
}
