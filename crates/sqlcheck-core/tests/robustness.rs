//! Every input must get a definite, repeatable answer: short adversarial
//! byte strings, truncated statements, deep nesting and large inputs.

mod common;
use common::*;

use sqlcheck_core::grammar::STATEMENT_RULES;
use sqlcheck_core::{Keyword, ValidationError, ValidationOutcome, Validator, is_valid};

const ALPHABET: &[u8] = b"S1'\"$(;-*/ X\xff\xc3";

fn check_twice(validator: &Validator, bytes: &[u8]) -> ValidationOutcome {
    let first = validator.validate_bytes(bytes);
    let second = validator.validate_bytes(bytes);
    assert_eq!(first, second, "non-deterministic result for {bytes:?}");
    first
}

/// Small xorshift generator so the inputs are the same on every run.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

#[test]
fn exhaustive_short_byte_strings() {
    let mut input = Vec::with_capacity(4);
    visit_all(&Validator::default(), &mut input, 4);
}

fn visit_all(validator: &Validator, input: &mut Vec<u8>, remaining: usize) {
    check_twice(validator, input);
    if remaining == 0 {
        return;
    }
    for &byte in ALPHABET {
        input.push(byte);
        visit_all(validator, input, remaining - 1);
        input.pop();
    }
}

#[test]
fn random_bytes() {
    let validator = Validator::default();
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

    for _ in 0..2000 {
        let len = usize::try_from(rng.next() % 96).unwrap();
        let bytes: Vec<u8> = (0..len).map(|_| rng.next().to_le_bytes()[0]).collect();
        check_twice(&validator, &bytes);
    }
}

#[test]
fn random_token_soup() {
    const WORDS: &[&str] = &[
        "SELECT", "FROM", "WHERE", "(", ")", ",", ";", "1", "'x'", "a", "=", "AND", "NOT",
        "CASE", "END", "WITH", "AS", "JOIN", "ON", "INSERT", "INTO", "VALUES", "::", "[", "]",
    ];
    let validator = Validator::default();
    let mut rng = XorShift(42);

    for _ in 0..2000 {
        let count = rng.next() % 24;
        let sql = (0..count)
            .map(|_| WORDS[usize::try_from(rng.next()).unwrap() % WORDS.len()])
            .collect::<Vec<_>>()
            .join(" ");
        check_twice(&validator, sql.as_bytes());
    }
}

#[test]
fn every_prefix_of_valid_statements() {
    let statements = [
        "SELECT a, b AS c FROM t JOIN u ON t.id = u.id WHERE x IN (1, 2) ORDER BY a LIMIT 5",
        "INSERT INTO t (a, b) VALUES (1, 'two') ON CONFLICT (a) DO UPDATE SET b = excluded.b",
        "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(10) NOT NULL DEFAULT 'x')",
        "WITH r AS (SELECT 1) SELECT CASE WHEN a > 0 THEN 'p' ELSE 'n' END FROM r",
    ];
    let validator = Validator::default();

    for sql in statements {
        assert_valid(sql);
        for end in (0..sql.len()).filter(|&end| sql.is_char_boundary(end)) {
            check_twice(&validator, &sql.as_bytes()[..end]);
        }
    }
}

#[test]
fn deep_parentheses() {
    let sql = format!("SELECT {}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(error_for(&sql), ValidationError::TooDeep { .. }));

    let unclosed = format!("SELECT {}", "(".repeat(10_000));
    assert!(matches!(error_for(&unclosed), ValidationError::TooDeep { .. }));
}

#[test]
fn deep_unary_chains() {
    let minus = format!("SELECT {}1", "- ".repeat(10_000));
    assert!(matches!(error_for(&minus), ValidationError::TooDeep { .. }));

    let not = format!("SELECT {}TRUE", "NOT ".repeat(10_000));
    assert!(matches!(error_for(&not), ValidationError::TooDeep { .. }));
}

#[test]
fn deep_subqueries_and_joins() {
    let subqueries = format!("{}SELECT 1{}", "SELECT * FROM (".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(error_for(&subqueries), ValidationError::TooDeep { .. }));

    let joins = format!("SELECT * FROM {}t", "(".repeat(10_000));
    assert!(matches!(error_for(&joins), ValidationError::TooDeep { .. }));

    let explain = format!("{}SELECT 1", "EXPLAIN ".repeat(10_000));
    assert!(matches!(error_for(&explain), ValidationError::TooDeep { .. }));
}

#[test]
fn long_flat_expression() {
    let sql = format!("SELECT {}1", "1 + ".repeat(100_000));
    assert_valid(&sql);
}

#[test]
fn many_statements() {
    let sql = "SELECT 1;".repeat(10_000);
    let statements = Validator::default().statements(&sql).unwrap();
    assert_eq!(statements.len(), 10_000);
}

#[test]
fn long_literals_and_comments() {
    let sql = format!("SELECT '{}' /* {} */", "x".repeat(1 << 20), "y".repeat(1 << 20));
    assert_valid(&sql);
    let unterminated = format!("SELECT '{}", "x".repeat(1 << 20));
    assert_invalid(&unterminated);
}

#[test]
fn statement_keywords_alone() {
    let complete_alone = [
        Keyword::Begin,
        Keyword::Commit,
        Keyword::End,
        Keyword::Rollback,
    ];
    for (keyword, _) in STATEMENT_RULES {
        assert_eq!(
            is_valid(keyword.as_str()),
            complete_alone.contains(keyword),
            "keyword {keyword}"
        );
    }
}
