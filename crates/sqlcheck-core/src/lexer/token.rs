//! Token types for the SQL lexer.

use std::borrow::Cow;
use std::fmt;

use super::{LexError, Span};

/// Longest keyword spelling, `CURRENT_TIMESTAMP`.
const MAX_KEYWORD_LEN: usize = 17;

/// SQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    // Data Query Language (DQL)
    Select,
    From,
    Where,
    Order,
    By,
    Group,
    Having,
    Limit,
    Offset,
    Fetch,
    Next,
    Only,
    Distinct,
    All,
    Values,
    With,
    Recursive,
    As,
    For,
    Share,
    Lateral,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    On,
    Using,

    // Set operations
    Union,
    Intersect,
    Except,

    // Data Manipulation Language (DML)
    Insert,
    Into,
    Update,
    Set,
    Delete,
    Default,
    Returning,
    Conflict,
    Do,
    Nothing,

    // Data Definition Language (DDL)
    Create,
    Drop,
    Alter,
    Table,
    Index,
    View,
    Temp,
    Temporary,
    If,
    Replace,
    Add,
    Column,
    Rename,
    To,
    Type,
    Data,
    Truncate,
    Restart,
    Continue,
    Identity,
    Collate,

    // Constraints
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Constraint,
    Cascade,
    Restrict,
    No,
    Action,

    // Logical operators and predicates
    And,
    Or,
    Not,
    In,
    Between,
    Symmetric,
    Like,
    Ilike,
    Escape,
    Is,
    Null,
    True,
    False,
    Exists,
    Any,
    Some,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Common expressions
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    CurrentUser,

    // Multi-word type names
    Double,
    Precision,
    Character,
    Varying,
    Time,
    Timestamp,
    Without,
    Zone,

    // Windows
    Over,
    Partition,
    Window,
    Filter,
    Rows,
    Row,
    Range,
    Unbounded,
    Preceding,
    Following,
    Current,

    // Transaction
    Begin,
    Start,
    Commit,
    Rollback,
    Transaction,
    Work,
    Savepoint,
    Release,

    // Utility
    Explain,
    Analyze,
    Verbose,
}

impl Keyword {
    /// Attempts to parse a keyword from a word (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        if s.len() > MAX_KEYWORD_LEN || !s.is_ascii() {
            return None;
        }
        let mut buf = [0u8; MAX_KEYWORD_LEN];
        let upper = &mut buf[..s.len()];
        upper.copy_from_slice(s.as_bytes());
        upper.make_ascii_uppercase();

        match &*upper {
            b"SELECT" => Some(Self::Select),
            b"FROM" => Some(Self::From),
            b"WHERE" => Some(Self::Where),
            b"ORDER" => Some(Self::Order),
            b"BY" => Some(Self::By),
            b"GROUP" => Some(Self::Group),
            b"HAVING" => Some(Self::Having),
            b"LIMIT" => Some(Self::Limit),
            b"OFFSET" => Some(Self::Offset),
            b"FETCH" => Some(Self::Fetch),
            b"NEXT" => Some(Self::Next),
            b"ONLY" => Some(Self::Only),
            b"DISTINCT" => Some(Self::Distinct),
            b"ALL" => Some(Self::All),
            b"VALUES" => Some(Self::Values),
            b"WITH" => Some(Self::With),
            b"RECURSIVE" => Some(Self::Recursive),
            b"AS" => Some(Self::As),
            b"FOR" => Some(Self::For),
            b"SHARE" => Some(Self::Share),
            b"LATERAL" => Some(Self::Lateral),
            b"JOIN" => Some(Self::Join),
            b"INNER" => Some(Self::Inner),
            b"LEFT" => Some(Self::Left),
            b"RIGHT" => Some(Self::Right),
            b"FULL" => Some(Self::Full),
            b"OUTER" => Some(Self::Outer),
            b"CROSS" => Some(Self::Cross),
            b"NATURAL" => Some(Self::Natural),
            b"ON" => Some(Self::On),
            b"USING" => Some(Self::Using),
            b"UNION" => Some(Self::Union),
            b"INTERSECT" => Some(Self::Intersect),
            b"EXCEPT" => Some(Self::Except),
            b"INSERT" => Some(Self::Insert),
            b"INTO" => Some(Self::Into),
            b"UPDATE" => Some(Self::Update),
            b"SET" => Some(Self::Set),
            b"DELETE" => Some(Self::Delete),
            b"DEFAULT" => Some(Self::Default),
            b"RETURNING" => Some(Self::Returning),
            b"CONFLICT" => Some(Self::Conflict),
            b"DO" => Some(Self::Do),
            b"NOTHING" => Some(Self::Nothing),
            b"CREATE" => Some(Self::Create),
            b"DROP" => Some(Self::Drop),
            b"ALTER" => Some(Self::Alter),
            b"TABLE" => Some(Self::Table),
            b"INDEX" => Some(Self::Index),
            b"VIEW" => Some(Self::View),
            b"TEMP" => Some(Self::Temp),
            b"TEMPORARY" => Some(Self::Temporary),
            b"IF" => Some(Self::If),
            b"REPLACE" => Some(Self::Replace),
            b"ADD" => Some(Self::Add),
            b"COLUMN" => Some(Self::Column),
            b"RENAME" => Some(Self::Rename),
            b"TO" => Some(Self::To),
            b"TYPE" => Some(Self::Type),
            b"DATA" => Some(Self::Data),
            b"TRUNCATE" => Some(Self::Truncate),
            b"RESTART" => Some(Self::Restart),
            b"CONTINUE" => Some(Self::Continue),
            b"IDENTITY" => Some(Self::Identity),
            b"COLLATE" => Some(Self::Collate),
            b"PRIMARY" => Some(Self::Primary),
            b"KEY" => Some(Self::Key),
            b"FOREIGN" => Some(Self::Foreign),
            b"REFERENCES" => Some(Self::References),
            b"UNIQUE" => Some(Self::Unique),
            b"CHECK" => Some(Self::Check),
            b"CONSTRAINT" => Some(Self::Constraint),
            b"CASCADE" => Some(Self::Cascade),
            b"RESTRICT" => Some(Self::Restrict),
            b"NO" => Some(Self::No),
            b"ACTION" => Some(Self::Action),
            b"AND" => Some(Self::And),
            b"OR" => Some(Self::Or),
            b"NOT" => Some(Self::Not),
            b"IN" => Some(Self::In),
            b"BETWEEN" => Some(Self::Between),
            b"SYMMETRIC" => Some(Self::Symmetric),
            b"LIKE" => Some(Self::Like),
            b"ILIKE" => Some(Self::Ilike),
            b"ESCAPE" => Some(Self::Escape),
            b"IS" => Some(Self::Is),
            b"NULL" => Some(Self::Null),
            b"TRUE" => Some(Self::True),
            b"FALSE" => Some(Self::False),
            b"EXISTS" => Some(Self::Exists),
            b"ANY" => Some(Self::Any),
            b"SOME" => Some(Self::Some),
            b"ASC" => Some(Self::Asc),
            b"DESC" => Some(Self::Desc),
            b"NULLS" => Some(Self::Nulls),
            b"FIRST" => Some(Self::First),
            b"LAST" => Some(Self::Last),
            b"CASE" => Some(Self::Case),
            b"WHEN" => Some(Self::When),
            b"THEN" => Some(Self::Then),
            b"ELSE" => Some(Self::Else),
            b"END" => Some(Self::End),
            b"CAST" => Some(Self::Cast),
            b"CURRENT_DATE" => Some(Self::CurrentDate),
            b"CURRENT_TIME" => Some(Self::CurrentTime),
            b"CURRENT_TIMESTAMP" => Some(Self::CurrentTimestamp),
            b"CURRENT_USER" => Some(Self::CurrentUser),
            b"DOUBLE" => Some(Self::Double),
            b"PRECISION" => Some(Self::Precision),
            b"CHARACTER" => Some(Self::Character),
            b"VARYING" => Some(Self::Varying),
            b"TIME" => Some(Self::Time),
            b"TIMESTAMP" => Some(Self::Timestamp),
            b"WITHOUT" => Some(Self::Without),
            b"ZONE" => Some(Self::Zone),
            b"OVER" => Some(Self::Over),
            b"PARTITION" => Some(Self::Partition),
            b"WINDOW" => Some(Self::Window),
            b"FILTER" => Some(Self::Filter),
            b"ROWS" => Some(Self::Rows),
            b"ROW" => Some(Self::Row),
            b"RANGE" => Some(Self::Range),
            b"UNBOUNDED" => Some(Self::Unbounded),
            b"PRECEDING" => Some(Self::Preceding),
            b"FOLLOWING" => Some(Self::Following),
            b"CURRENT" => Some(Self::Current),
            b"BEGIN" => Some(Self::Begin),
            b"START" => Some(Self::Start),
            b"COMMIT" => Some(Self::Commit),
            b"ROLLBACK" => Some(Self::Rollback),
            b"TRANSACTION" => Some(Self::Transaction),
            b"WORK" => Some(Self::Work),
            b"SAVEPOINT" => Some(Self::Savepoint),
            b"RELEASE" => Some(Self::Release),
            b"EXPLAIN" => Some(Self::Explain),
            b"ANALYZE" => Some(Self::Analyze),
            b"VERBOSE" => Some(Self::Verbose),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Group => "GROUP",
            Self::Having => "HAVING",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Fetch => "FETCH",
            Self::Next => "NEXT",
            Self::Only => "ONLY",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::Values => "VALUES",
            Self::With => "WITH",
            Self::Recursive => "RECURSIVE",
            Self::As => "AS",
            Self::For => "FOR",
            Self::Share => "SHARE",
            Self::Lateral => "LATERAL",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::Natural => "NATURAL",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Default => "DEFAULT",
            Self::Returning => "RETURNING",
            Self::Conflict => "CONFLICT",
            Self::Do => "DO",
            Self::Nothing => "NOTHING",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Replace => "REPLACE",
            Self::Add => "ADD",
            Self::Column => "COLUMN",
            Self::Rename => "RENAME",
            Self::To => "TO",
            Self::Type => "TYPE",
            Self::Data => "DATA",
            Self::Truncate => "TRUNCATE",
            Self::Restart => "RESTART",
            Self::Continue => "CONTINUE",
            Self::Identity => "IDENTITY",
            Self::Collate => "COLLATE",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Constraint => "CONSTRAINT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Symmetric => "SYMMETRIC",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::Escape => "ESCAPE",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Exists => "EXISTS",
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::CurrentUser => "CURRENT_USER",
            Self::Double => "DOUBLE",
            Self::Precision => "PRECISION",
            Self::Character => "CHARACTER",
            Self::Varying => "VARYING",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Without => "WITHOUT",
            Self::Zone => "ZONE",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Window => "WINDOW",
            Self::Filter => "FILTER",
            Self::Rows => "ROWS",
            Self::Row => "ROW",
            Self::Range => "RANGE",
            Self::Unbounded => "UNBOUNDED",
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
            Self::Current => "CURRENT",
            Self::Begin => "BEGIN",
            Self::Start => "START",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Transaction => "TRANSACTION",
            Self::Work => "WORK",
            Self::Savepoint => "SAVEPOINT",
            Self::Release => "RELEASE",
            Self::Explain => "EXPLAIN",
            Self::Analyze => "ANALYZE",
            Self::Verbose => "VERBOSE",
        }
    }

    /// Returns true for keywords that can never appear where a bare column,
    /// table or alias name is expected.
    ///
    /// Every other keyword doubles as an identifier, so `SELECT key, data
    /// FROM t` stays valid.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::All
                | Self::And
                | Self::Any
                | Self::As
                | Self::Asc
                | Self::Between
                | Self::Case
                | Self::Cast
                | Self::Check
                | Self::Collate
                | Self::Column
                | Self::Constraint
                | Self::Create
                | Self::Cross
                | Self::CurrentDate
                | Self::CurrentTime
                | Self::CurrentTimestamp
                | Self::CurrentUser
                | Self::Default
                | Self::Desc
                | Self::Distinct
                | Self::Do
                | Self::Else
                | Self::End
                | Self::Except
                | Self::Exists
                | Self::False
                | Self::Fetch
                | Self::For
                | Self::Foreign
                | Self::From
                | Self::Full
                | Self::Group
                | Self::Having
                | Self::Ilike
                | Self::In
                | Self::Inner
                | Self::Intersect
                | Self::Into
                | Self::Is
                | Self::Join
                | Self::Lateral
                | Self::Left
                | Self::Like
                | Self::Limit
                | Self::Natural
                | Self::Not
                | Self::Null
                | Self::Offset
                | Self::On
                | Self::Only
                | Self::Or
                | Self::Order
                | Self::Outer
                | Self::Primary
                | Self::References
                | Self::Returning
                | Self::Right
                | Self::Select
                | Self::Some
                | Self::Table
                | Self::Then
                | Self::To
                | Self::True
                | Self::Union
                | Self::Unique
                | Self::Using
                | Self::When
                | Self::Where
                | Self::Window
                | Self::With
        )
    }

    /// Returns true if the keyword may name a function, e.g. `left(s, 2)`.
    #[must_use]
    pub const fn is_function_name(&self) -> bool {
        !self.is_reserved() || matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse token classes, independent of the exact operator or keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenCategory {
    Keyword,
    Identifier,
    NumberLiteral,
    StringLiteral,
    Operator,
    Punctuation,
    EndOfInput,
    Invalid,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals
    /// Numeric literal (e.g., 42, 3.14, .5e-3)
    Number,
    /// String literal ('it''s', $$body$$, X'CAFE')
    String,

    // Identifiers and keywords
    /// Bare identifier (e.g., column_name)
    Identifier,
    /// Quoted identifier ("Column Name" or `column`)
    QuotedIdentifier,
    /// SQL keyword
    Keyword(Keyword),
    /// Parameter placeholder (?, $1, :name)
    Parameter,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// ::
    DoubleColon,

    // Punctuation
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,

    // Special
    /// End of input
    Eof,
    /// Input the lexer could not classify
    Invalid(LexError),
}

impl TokenKind {
    /// Maps the kind onto its coarse [`TokenCategory`].
    #[must_use]
    pub const fn category(&self) -> TokenCategory {
        match self {
            Self::Number => TokenCategory::NumberLiteral,
            Self::String => TokenCategory::StringLiteral,
            Self::Identifier | Self::QuotedIdentifier | Self::Parameter => {
                TokenCategory::Identifier
            }
            Self::Keyword(_) => TokenCategory::Keyword,
            Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Percent
            | Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Concat
            | Self::BitAnd
            | Self::BitOr
            | Self::BitNot
            | Self::LeftShift
            | Self::RightShift
            | Self::DoubleColon => TokenCategory::Operator,
            Self::LeftParen
            | Self::RightParen
            | Self::LeftBracket
            | Self::RightBracket
            | Self::Comma
            | Self::Semicolon
            | Self::Dot
            | Self::Colon => TokenCategory::Punctuation,
            Self::Eof => TokenCategory::EndOfInput,
            Self::Invalid(_) => TokenCategory::Invalid,
        }
    }

    /// The quoted source form of operators and punctuation, e.g. `'('`.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NotEq => "'<>'",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitNot => "'~'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::DoubleColon => "'::'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = self.symbol() {
            return f.write_str(symbol);
        }
        match self {
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string literal"),
            Self::Identifier | Self::QuotedIdentifier => f.write_str("identifier"),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Parameter => f.write_str("parameter"),
            Self::Eof => f.write_str("end of input"),
            Self::Invalid(err) => write!(f, "invalid token ({err})"),
            _ => f.write_str("token"),
        }
    }
}

/// A token with its span and raw text in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
    /// The source text covered by `span`, quotes included.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, text: &'a str) -> Self {
        Self { kind, span, text }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if the lexer could not classify this token.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.kind, TokenKind::Invalid(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the coarse category of the token.
    #[must_use]
    pub const fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Returns the content of a literal or quoted identifier with its quoting
    /// removed and doubled quotes collapsed. Other tokens return their text.
    #[must_use]
    pub fn unquoted(&self) -> Cow<'a, str> {
        match self.kind {
            TokenKind::String => unquote_string(self.text),
            TokenKind::QuotedIdentifier => match self.text.chars().next() {
                Some(quote) => strip_quotes(self.text, quote),
                None => Cow::Borrowed(self.text),
            },
            _ => Cow::Borrowed(self.text),
        }
    }
}

fn unquote_string(text: &str) -> Cow<'_, str> {
    if let Some(rest) = text.strip_prefix(['x', 'X']) {
        return Cow::Borrowed(rest.trim_matches('\''));
    }
    if text.starts_with('$') {
        // $tag$body$tag$: the tag is everything up to the second '$'.
        let tag_len = text[1..].find('$').map_or(1, |i| i + 2);
        let body_end = text.len().saturating_sub(tag_len).max(tag_len);
        return Cow::Borrowed(&text[tag_len..body_end]);
    }
    strip_quotes(text, '\'')
}

fn strip_quotes(text: &str, quote: char) -> Cow<'_, str> {
    let inner = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);
    let single = quote.to_string();
    let doubled = single.repeat(2);
    if inner.contains(&doubled) {
        Cow::Owned(inner.replace(&doubled, &single))
    } else {
        Cow::Borrowed(inner)
    }
}
