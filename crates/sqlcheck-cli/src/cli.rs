//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sqlcheck_core::StatementPolicy;

/// Check SQL text for syntax errors.
///
/// Validates each FILE, each `--execute` string, or standard input when
/// neither is given. Exits with 0 when every input is valid, 1 when any input
/// is invalid, and 2 on I/O or configuration errors.
#[derive(Debug, Parser)]
#[command(name = "sqlcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQL files to validate.
    pub files: Vec<PathBuf>,

    /// SQL text to validate (repeatable).
    #[arg(short = 'e', long = "execute", value_name = "SQL")]
    pub execute: Vec<String>,

    /// JSON file with validator settings.
    #[arg(short, long, env = "SQLCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum nesting depth.
    #[arg(long, env = "SQLCHECK_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// How inputs with several statements are judged.
    #[arg(long, env = "SQLCHECK_POLICY", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Reject inputs longer than this many bytes.
    #[arg(long, env = "SQLCHECK_MAX_INPUT_BYTES")]
    pub max_input_bytes: Option<usize>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the token stream of each input.
    #[arg(long)]
    pub tokens: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report through the exit status.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Multi-statement policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Every statement must parse.
    AllMustParse,
    /// Only the first statement is checked.
    FirstOnly,
}

impl From<PolicyArg> for StatementPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::AllMustParse => Self::AllMustParse,
            PolicyArg::FirstOnly => Self::FirstOnly,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per input.
    Text,
    /// A JSON array with one report per input.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sqlcheck"]).unwrap();
        assert!(cli.files.is_empty());
        assert!(cli.execute.is_empty());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.tokens);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_policy_values() {
        let cli = Cli::try_parse_from(["sqlcheck", "--policy", "first-only"]).unwrap();
        assert_eq!(cli.policy, Some(PolicyArg::FirstOnly));
        assert_eq!(
            StatementPolicy::from(PolicyArg::AllMustParse),
            StatementPolicy::AllMustParse
        );
        assert!(Cli::try_parse_from(["sqlcheck", "--policy", "sometimes"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sqlcheck", "-q", "-v"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
