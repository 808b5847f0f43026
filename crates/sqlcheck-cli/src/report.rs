//! Per-input validation reports and their text rendering.

use std::fmt;
use std::path::PathBuf;
use std::str;

use serde::Serialize;
use sqlcheck_core::Validator;

/// Where one input came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// The n-th `--execute` argument, counted from 1.
    Inline(usize),
    Stdin,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(n) => write!(f, "<execute #{n}>"),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// A statement found in a valid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSummary {
    pub kind: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Why an input was rejected, located for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    /// Byte offset of the first diverging token.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// 1-based column of `offset`, in characters.
    pub column: usize,
}

/// The outcome of validating one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub source: String,
    pub valid: bool,
    pub statements: Vec<StatementSummary>,
    pub error: Option<ErrorReport>,
}

impl Report {
    /// Validates `bytes` and records the result.
    #[must_use]
    pub fn build(source: &Source, bytes: &[u8], validator: &Validator) -> Self {
        let source = source.to_string();
        let result = validator.statements_bytes(bytes);
        let text = match str::from_utf8(bytes) {
            Ok(sql) => sql,
            Err(err) => str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
        };

        match result {
            Ok(statements) => Self {
                source,
                valid: true,
                statements: statements
                    .iter()
                    .map(|info| StatementSummary {
                        kind: info.kind.as_str(),
                        start: info.span.start,
                        end: info.span.end,
                    })
                    .collect(),
                error: None,
            },
            Err(err) => {
                let offset = err.offset();
                let (line, column) = line_column(text, offset);
                Self {
                    source,
                    valid: false,
                    statements: Vec::new(),
                    error: Some(ErrorReport {
                        message: err.to_string(),
                        offset,
                        line,
                        column,
                    }),
                }
            }
        }
    }

    /// Renders the report as a single line.
    #[must_use]
    pub fn render_text(&self) -> String {
        match &self.error {
            None => {
                let count = self.statements.len();
                let noun = if count == 1 { "statement" } else { "statements" };
                format!("{}: ok ({count} {noun})", self.source)
            }
            Some(error) => format!(
                "{}:{}:{}: error: {}",
                self.source, error.line, error.column, error.message
            ),
        }
    }
}

/// Converts a byte offset into a 1-based line and character column.
#[must_use]
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let prefix = text.get(..offset).unwrap_or(text);
    let line = prefix.matches('\n').count() + 1;
    let column = prefix
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlcheck_core::ValidatorConfig;

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("SELECT 1", 0), (1, 1));
        assert_eq!(line_column("SELECT 1", 7), (1, 8));
        assert_eq!(line_column("SELECT\n  1 FROM", 15), (2, 9));
        assert_eq!(line_column("SELECT 'é' x", 11), (1, 11));
        assert_eq!(line_column("abc", 99), (1, 4));
    }

    #[test]
    fn test_valid_report() {
        let report = Report::build(
            &Source::Inline(1),
            b"SELECT 1; INSERT INTO t VALUES (1)",
            &Validator::default(),
        );
        assert!(report.valid);
        assert_eq!(report.statements.len(), 2);
        assert_eq!(
            report.statements[1],
            StatementSummary {
                kind: "INSERT",
                start: 10,
                end: 34,
            }
        );
        assert_eq!(report.render_text(), "<execute #1>: ok (2 statements)");
    }

    #[test]
    fn test_invalid_report() {
        let report = Report::build(
            &Source::File("query.sql".into()),
            b"SELECT *\nFROM users\nWHERE",
            &Validator::default(),
        );
        assert!(!report.valid);
        let error = report.error.as_ref().unwrap();
        assert_eq!(error.offset, 25);
        assert_eq!((error.line, error.column), (3, 6));
        assert_eq!(
            report.render_text(),
            "query.sql:3:6: error: unexpected end of input, expected expression"
        );
    }

    #[test]
    fn test_invalid_utf8_report() {
        let report = Report::build(&Source::Stdin, b"SELECT\n'\xff'", &Validator::default());
        let error = report.error.unwrap();
        assert_eq!(error.offset, 8);
        assert_eq!((error.line, error.column), (2, 2));
        assert_eq!(error.message, "input is not valid UTF-8");
    }

    #[test]
    fn test_size_limit_wins_over_encoding() {
        let validator = Validator::new(ValidatorConfig::default().with_max_input_bytes(4));
        let report = Report::build(&Source::Inline(1), b"SELECT \xff", &validator);
        let error = report.error.unwrap();
        assert_eq!((error.offset, error.line, error.column), (0, 1, 1));
        assert_eq!(error.message, "input is 8 bytes, larger than the limit of 4 bytes");
    }

    #[test]
    fn test_json_shape() {
        let report = Report::build(&Source::Stdin, b"SELECT 1", &Validator::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["source"], "<stdin>");
        assert_eq!(value["valid"], true);
        assert_eq!(value["statements"][0]["kind"], "SELECT");
        assert!(value["error"].is_null());
    }
}
