//! Validator configuration.

/// Default cap on grammar nesting (statements, queries and expressions).
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// How a unit with several `;`-separated statements is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum StatementPolicy {
    /// Every statement must parse; the first failure rejects the unit.
    #[default]
    AllMustParse,
    /// Only the first statement is checked. Input after its `;` is ignored.
    FirstOnly,
}

/// Limits and policies applied by a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ValidatorConfig {
    /// Maximum nesting depth before input is rejected as too complex.
    pub max_depth: usize,
    /// Multi-statement policy.
    pub policy: StatementPolicy,
    /// Inputs longer than this many bytes are rejected without lexing.
    pub max_input_bytes: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            policy: StatementPolicy::default(),
            max_input_bytes: None,
        }
    }
}

impl ValidatorConfig {
    /// Sets the nesting cap.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the multi-statement policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: StatementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the input size bound.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.policy, StatementPolicy::AllMustParse);
        assert_eq!(config.max_input_bytes, None);
    }

    #[test]
    fn test_builder_methods() {
        let config = ValidatorConfig::default()
            .with_max_depth(8)
            .with_policy(StatementPolicy::FirstOnly)
            .with_max_input_bytes(1024);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.policy, StatementPolicy::FirstOnly);
        assert_eq!(config.max_input_bytes, Some(1024));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{ "policy": "first-only" }"#).unwrap();
        assert_eq!(config.policy, StatementPolicy::FirstOnly);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
