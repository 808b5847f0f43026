//! The static statement grammar table.
//!
//! Each supported statement form starts with a distinct keyword, so the
//! recognizer picks an alternative from the first token alone and never
//! backtracks between statements. A parenthesized query is the single form
//! without a leading keyword and is dispatched to [`Rule::Query`] directly.

use crate::lexer::{Keyword, Span};

/// Top-level grammar rules, one per statement family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// SELECT, VALUES, WITH and parenthesized queries.
    Query,
    Insert,
    Update,
    Delete,
    /// CREATE TABLE, CREATE INDEX and CREATE VIEW.
    Create,
    Drop,
    Alter,
    Truncate,
    /// BEGIN, START, COMMIT, END and ROLLBACK.
    Transaction,
    Savepoint,
    Release,
    Explain,
}

impl Rule {
    /// Name used in diagnostics and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Create => "create",
            Self::Drop => "drop",
            Self::Alter => "alter",
            Self::Truncate => "truncate",
            Self::Transaction => "transaction",
            Self::Savepoint => "savepoint",
            Self::Release => "release",
            Self::Explain => "explain",
        }
    }
}

/// Leading keyword to statement rule.
pub static STATEMENT_RULES: &[(Keyword, Rule)] = &[
    (Keyword::Select, Rule::Query),
    (Keyword::Values, Rule::Query),
    (Keyword::With, Rule::Query),
    (Keyword::Insert, Rule::Insert),
    (Keyword::Update, Rule::Update),
    (Keyword::Delete, Rule::Delete),
    (Keyword::Create, Rule::Create),
    (Keyword::Drop, Rule::Drop),
    (Keyword::Alter, Rule::Alter),
    (Keyword::Truncate, Rule::Truncate),
    (Keyword::Begin, Rule::Transaction),
    (Keyword::Start, Rule::Transaction),
    (Keyword::Commit, Rule::Transaction),
    (Keyword::End, Rule::Transaction),
    (Keyword::Rollback, Rule::Transaction),
    (Keyword::Savepoint, Rule::Savepoint),
    (Keyword::Release, Rule::Release),
    (Keyword::Explain, Rule::Explain),
];

/// Looks up the rule a statement starting with `keyword` must follow.
#[must_use]
pub fn rule_for(keyword: Keyword) -> Option<Rule> {
    STATEMENT_RULES
        .iter()
        .find(|(kw, _)| *kw == keyword)
        .map(|(_, rule)| *rule)
}

/// The kind of a recognized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
    CreateIndex,
    CreateView,
    DropTable,
    DropIndex,
    DropView,
    AlterTable,
    Truncate,
    Begin,
    Commit,
    Rollback,
    Savepoint,
    Release,
    Explain,
}

impl StatementKind {
    /// Returns the SQL spelling of the statement kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::CreateTable => "CREATE TABLE",
            Self::CreateIndex => "CREATE INDEX",
            Self::CreateView => "CREATE VIEW",
            Self::DropTable => "DROP TABLE",
            Self::DropIndex => "DROP INDEX",
            Self::DropView => "DROP VIEW",
            Self::AlterTable => "ALTER TABLE",
            Self::Truncate => "TRUNCATE",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Savepoint => "SAVEPOINT",
            Self::Release => "RELEASE SAVEPOINT",
            Self::Explain => "EXPLAIN",
        }
    }
}

impl core::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One statement of a validated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementInfo {
    /// What kind of statement it is.
    pub kind: StatementKind,
    /// From the first token to the last token, terminator excluded.
    pub span: Span,
}
