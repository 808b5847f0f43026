//! The validation facade.

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::grammar::{Recognizer, StatementInfo, ValidationError};
use crate::lexer::{Lexer, Token};

/// The result of validating one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every statement in the input is syntactically valid.
    Valid,
    /// The input was rejected.
    Invalid(ValidationError),
}

impl ValidationOutcome {
    /// Returns true for [`ValidationOutcome::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }

    /// Returns the byte offset of the first diverging token, if rejected.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err.offset()),
        }
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason for an invalid outcome.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(err) => Err(err),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationOutcome {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(err) => Self::Invalid(err),
        }
    }
}

/// Validates SQL text against the statement grammar.
///
/// A validator holds only its configuration; it can be shared across
/// threads and reused for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub const fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `sql`.
    #[must_use]
    pub fn validate(&self, sql: &str) -> ValidationOutcome {
        self.statements(sql).map(|_| ()).into()
    }

    /// Validates raw bytes, rejecting anything that is not UTF-8.
    #[must_use]
    pub fn validate_bytes(&self, bytes: &[u8]) -> ValidationOutcome {
        self.statements_bytes(bytes).map(|_| ()).into()
    }

    /// Like [`Validator::statements`], over raw bytes. The size limit is
    /// checked before the encoding.
    ///
    /// # Errors
    ///
    /// Returns the reason the input was rejected, `InvalidUtf8` when it is
    /// not UTF-8.
    pub fn statements_bytes(&self, bytes: &[u8]) -> Result<Vec<StatementInfo>, ValidationError> {
        self.check_size(bytes.len())?;
        let sql = core::str::from_utf8(bytes).map_err(|err| {
            debug!(offset = err.valid_up_to(), "input is not UTF-8");
            ValidationError::InvalidUtf8 {
                offset: err.valid_up_to(),
            }
        })?;
        self.statements(sql)
    }

    /// Validates `sql` and lists the statements it contains.
    ///
    /// # Errors
    ///
    /// Returns the reason the input was rejected.
    pub fn statements(&self, sql: &str) -> Result<Vec<StatementInfo>, ValidationError> {
        debug!(bytes = sql.len(), "validating SQL");
        self.check_size(sql.len())?;

        let recognizer = Recognizer::new(sql, self.config.max_depth);
        let result = recognizer.recognize(self.config.policy);
        match &result {
            Ok(statements) => debug!(statements = statements.len(), "SQL accepted"),
            Err(err) => debug!(offset = err.offset(), error = %err, "SQL rejected"),
        }
        result
    }

    /// Returns the token stream of `sql`, ending with `Eof`.
    #[must_use]
    pub fn tokens<'a>(&self, sql: &'a str) -> Vec<Token<'a>> {
        Lexer::new(sql).tokenize()
    }

    fn check_size(&self, len: usize) -> Result<(), ValidationError> {
        match self.config.max_input_bytes {
            Some(limit) if len > limit => {
                debug!(len, limit, "input too large");
                Err(ValidationError::InputTooLarge { len, limit })
            }
            _ => Ok(()),
        }
    }
}

/// Validates `sql` with the default configuration.
#[must_use]
pub fn validate(sql: &str) -> ValidationOutcome {
    Validator::default().validate(sql)
}

/// Returns true if `sql` is syntactically valid under the default
/// configuration.
#[must_use]
pub fn is_valid(sql: &str) -> bool {
    validate(sql).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatementPolicy;
    use crate::grammar::StatementKind;
    use crate::lexer::TokenKind;

    #[test]
    fn test_outcome_accessors() {
        let valid = validate("SELECT 1");
        assert!(valid.is_valid());
        assert_eq!(valid.error(), None);
        assert_eq!(valid.offset(), None);
        assert_eq!(valid.into_result(), Ok(()));

        let invalid = validate("SELECT 1 FROM");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.offset(), Some(13));
        assert!(invalid.into_result().is_err());
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(ValidationOutcome::from(Ok(())), ValidationOutcome::Valid);
        assert_eq!(
            ValidationOutcome::from(Err(ValidationError::Empty)),
            ValidationOutcome::Invalid(ValidationError::Empty)
        );
    }

    #[test]
    fn test_validate_bytes_rejects_invalid_utf8() {
        let validator = Validator::default();
        assert_eq!(
            validator.validate_bytes(b"SELECT '\xff'"),
            ValidationOutcome::Invalid(ValidationError::InvalidUtf8 { offset: 8 })
        );
        assert!(validator.validate_bytes(b"SELECT 1").is_valid());
    }

    #[test]
    fn test_input_size_limit() {
        let validator = Validator::new(ValidatorConfig::default().with_max_input_bytes(8));
        assert!(validator.validate("SELECT 1").is_valid());
        assert_eq!(
            validator.validate("SELECT 10"),
            ValidationOutcome::Invalid(ValidationError::InputTooLarge { len: 9, limit: 8 })
        );
        assert_eq!(
            validator.validate_bytes(b"\xff\xff\xff\xff\xff\xff\xff\xff\xff"),
            ValidationOutcome::Invalid(ValidationError::InputTooLarge { len: 9, limit: 8 })
        );
    }

    #[test]
    fn test_size_limit_checked_before_encoding() {
        let validator = Validator::new(ValidatorConfig::default().with_max_input_bytes(4));
        let expected = ValidationError::InputTooLarge { len: 8, limit: 4 };
        assert_eq!(
            validator.statements_bytes(b"SELECT \xff"),
            Err(expected.clone())
        );
        assert_eq!(
            validator.validate_bytes(b"SELECT \xff"),
            ValidationOutcome::Invalid(expected)
        );
        assert_eq!(
            Validator::default().statements_bytes(b"SELECT \xff"),
            Err(ValidationError::InvalidUtf8 { offset: 7 })
        );
        let statements = Validator::default().statements_bytes(b"BEGIN; END").unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<ValidationOutcome>();
    }

    #[test]
    fn test_shared_across_threads() {
        let validator = Validator::new(ValidatorConfig::default().with_max_depth(32));
        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|worker| {
                    let validator = &validator;
                    scope.spawn(move || {
                        for i in 0..500 {
                            let sql = format!("SELECT {i} + {worker}");
                            assert!(validator.validate(&sql).is_valid());
                            assert_eq!(validator.validate("SELECT 1 FROM").offset(), Some(13));
                        }
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }
        });
    }

    #[test]
    fn test_statements_lists_kinds() {
        let statements = Validator::default()
            .statements("BEGIN; INSERT INTO t VALUES (1); COMMIT")
            .unwrap();
        let kinds: Vec<_> = statements.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Begin,
                StatementKind::Insert,
                StatementKind::Commit
            ]
        );
    }

    #[test]
    fn test_policy_is_applied() {
        let sql = "SELECT 1; SELEC 2";
        assert!(!is_valid(sql));
        let first_only =
            Validator::new(ValidatorConfig::default().with_policy(StatementPolicy::FirstOnly));
        assert!(first_only.validate(sql).is_valid());
    }

    #[test]
    fn test_tokens_end_with_eof() {
        let tokens = Validator::default().tokens("SELECT 1");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }
}
