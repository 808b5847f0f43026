#![allow(dead_code)]

use sqlcheck_core::{StatementKind, ValidationError, Validator, is_valid, validate};

pub fn assert_valid(sql: &str) {
    if let Some(err) = validate(sql).error() {
        panic!("Expected valid SQL: {sql}\nError: {err:?}");
    }
}

pub fn assert_invalid(sql: &str) {
    assert!(!is_valid(sql), "Expected invalid SQL: {sql}");
}

pub fn error_for(sql: &str) -> ValidationError {
    validate(sql)
        .into_result()
        .expect_err(&format!("Expected validation error for: {sql}"))
}

pub fn statement_kinds(sql: &str) -> Vec<StatementKind> {
    Validator::default()
        .statements(sql)
        .unwrap_or_else(|e| panic!("Failed to validate: {sql}\nError: {e:?}"))
        .into_iter()
        .map(|info| info.kind)
        .collect()
}
