//! Recursive-descent SQL recognizer.
//!
//! The recognizer walks the grammar with one token of lookahead, pulling
//! tokens from the lexer as it goes. It builds no tree: every rule either
//! consumes its tokens and returns `Ok(())` or reports the first token that
//! fits no alternative.

use tracing::trace;

use super::error::ValidationError;
use super::pratt::{
    ARITHMETIC_BP, infix_binding_power, is_comparison, postfix_binding_power,
    prefix_binding_power,
};
use super::rules::{self, Rule, StatementInfo, StatementKind};
use crate::config::StatementPolicy;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

type Result<T> = core::result::Result<T, ValidationError>;

/// Longest token text quoted back in a diagnostic.
const FOUND_TEXT_LIMIT: usize = 32;

/// SQL recognizer.
pub struct Recognizer<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    previous: Token<'a>,
    /// Number of nested rule entries currently open.
    depth: usize,
    max_depth: usize,
}

impl<'a> Recognizer<'a> {
    /// Creates a new recognizer for the given input.
    #[must_use]
    pub fn new(input: &'a str, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::at(0), ""),
            depth: 0,
            max_depth,
        }
    }

    /// Recognizes a whole unit of `;`-separated statements.
    ///
    /// # Errors
    ///
    /// Returns the first divergence from the grammar, or
    /// [`ValidationError::Empty`] when the unit holds no statement.
    pub fn recognize(mut self, policy: StatementPolicy) -> Result<Vec<StatementInfo>> {
        let mut statements = Vec::new();

        loop {
            // Empty statements
            while self.eat(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }

            let first = self.current.span;
            let kind = self.parse_statement()?;
            let span = first.merge(self.previous.span);
            trace!(
                kind = kind.as_str(),
                start = span.start,
                end = span.end,
                "statement accepted"
            );
            statements.push(StatementInfo { kind, span });

            match self.current.kind {
                TokenKind::Semicolon if policy == StatementPolicy::FirstOnly => break,
                TokenKind::Semicolon => self.advance(),
                TokenKind::Eof => break,
                _ => return Err(self.unexpected("';' or end of input")),
            }
        }

        if statements.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(statements)
    }

    // ===================================================================
    // Statements
    // ===================================================================

    /// Recognizes a single statement, dispatching on its first token.
    fn parse_statement(&mut self) -> Result<StatementKind> {
        self.descend(|p| {
            let rule = match p.current.kind {
                TokenKind::LeftParen => Some(Rule::Query),
                TokenKind::Keyword(keyword) => rules::rule_for(keyword),
                _ => None,
            };
            let Some(rule) = rule else {
                return Err(p.unexpected("statement"));
            };
            trace!(rule = rule.name(), offset = p.current.span.start, "entering rule");

            match rule {
                Rule::Query => p.parse_query_statement(),
                Rule::Insert => p.parse_insert().map(|()| StatementKind::Insert),
                Rule::Update => p.parse_update().map(|()| StatementKind::Update),
                Rule::Delete => p.parse_delete().map(|()| StatementKind::Delete),
                Rule::Create => p.parse_create(),
                Rule::Drop => p.parse_drop(),
                Rule::Alter => p.parse_alter().map(|()| StatementKind::AlterTable),
                Rule::Truncate => p.parse_truncate().map(|()| StatementKind::Truncate),
                Rule::Transaction => p.parse_transaction(),
                Rule::Savepoint => {
                    p.advance();
                    p.expect_name("savepoint name")?;
                    Ok(StatementKind::Savepoint)
                }
                Rule::Release => {
                    p.advance();
                    p.eat_keyword(Keyword::Savepoint);
                    p.expect_name("savepoint name")?;
                    Ok(StatementKind::Release)
                }
                Rule::Explain => {
                    p.advance();
                    p.eat_keyword(Keyword::Analyze);
                    p.eat_keyword(Keyword::Verbose);
                    p.parse_statement()?;
                    Ok(StatementKind::Explain)
                }
            }
        })
    }

    /// Parses a query at statement level, where a WITH clause may also lead
    /// into INSERT, UPDATE or DELETE.
    fn parse_query_statement(&mut self) -> Result<StatementKind> {
        if self.eat_keyword(Keyword::With) {
            self.parse_with_list()?;
            match self.current.as_keyword() {
                Some(Keyword::Insert) => return self.parse_insert().map(|()| StatementKind::Insert),
                Some(Keyword::Update) => return self.parse_update().map(|()| StatementKind::Update),
                Some(Keyword::Delete) => return self.parse_delete().map(|()| StatementKind::Delete),
                _ => {}
            }
        }
        self.parse_query_body()?;
        Ok(StatementKind::Select)
    }

    /// Parses an INSERT statement.
    fn parse_insert(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        self.parse_qualified_name("table name")?;
        if self.eat_keyword(Keyword::As) {
            self.expect_name("alias")?;
        }

        if self.eat(&TokenKind::LeftParen) {
            // INSERT INTO t (SELECT ...)
            if self.is_query_start() {
                self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                return self.parse_insert_tail();
            }
            self.parse_name_list("column name")?;
            self.expect(&TokenKind::RightParen)?;
        }

        if self.eat_keyword(Keyword::Default) {
            self.expect_keyword(Keyword::Values)?;
        } else {
            self.parse_query()?;
        }
        self.parse_insert_tail()
    }

    /// Parses ON CONFLICT and RETURNING after the INSERT source.
    fn parse_insert_tail(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::On) {
            self.expect_keyword(Keyword::Conflict)?;
            if self.eat(&TokenKind::LeftParen) {
                self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                if self.eat_keyword(Keyword::Where) {
                    self.parse_expression(0)?;
                }
            } else if self.eat_keyword(Keyword::On) {
                self.expect_keyword(Keyword::Constraint)?;
                self.expect_name("constraint name")?;
            }

            self.expect_keyword(Keyword::Do)?;
            if !self.eat_keyword(Keyword::Nothing) {
                self.expect_keyword(Keyword::Update)?;
                self.expect_keyword(Keyword::Set)?;
                self.parse_assignments()?;
                if self.eat_keyword(Keyword::Where) {
                    self.parse_expression(0)?;
                }
            }
        }
        self.parse_returning()
    }

    /// Parses an UPDATE statement.
    fn parse_update(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Update)?;
        self.eat_keyword(Keyword::Only);
        self.parse_qualified_name("table name")?;
        self.parse_optional_alias()?;
        self.expect_keyword(Keyword::Set)?;
        self.parse_assignments()?;

        if self.eat_keyword(Keyword::From) {
            self.parse_from_list()?;
        }
        if self.eat_keyword(Keyword::Where) {
            self.parse_expression(0)?;
        }
        self.parse_returning()
    }

    /// Parses SET assignments: `col = expr`, `col = DEFAULT`, `(a, b) = row`.
    fn parse_assignments(&mut self) -> Result<()> {
        loop {
            if self.eat(&TokenKind::LeftParen) {
                self.parse_name_list("column name")?;
                self.expect(&TokenKind::RightParen)?;
                self.expect(&TokenKind::Eq)?;
                self.parse_expression(0)?;
            } else {
                self.parse_qualified_name("column name")?;
                self.expect(&TokenKind::Eq)?;
                if !self.eat_keyword(Keyword::Default) {
                    self.parse_expression(0)?;
                }
            }

            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Parses a DELETE statement.
    fn parse_delete(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        self.eat_keyword(Keyword::Only);
        self.parse_qualified_name("table name")?;
        self.parse_optional_alias()?;

        if self.eat_keyword(Keyword::Using) {
            self.parse_from_list()?;
        }
        if self.eat_keyword(Keyword::Where) {
            self.parse_expression(0)?;
        }
        self.parse_returning()
    }

    fn parse_returning(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Returning) {
            self.parse_projection()?;
        }
        Ok(())
    }

    /// Parses CREATE TABLE, CREATE INDEX or CREATE VIEW.
    fn parse_create(&mut self) -> Result<StatementKind> {
        self.expect_keyword(Keyword::Create)?;

        if self.eat_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            self.eat_any_keyword(&[Keyword::Temp, Keyword::Temporary]);
            self.expect_keyword(Keyword::View)?;
            return self.parse_create_view().map(|()| StatementKind::CreateView);
        }

        let temporary = self.eat_any_keyword(&[Keyword::Temp, Keyword::Temporary]);
        match self.current.as_keyword() {
            Some(Keyword::Table) => {
                self.advance();
                self.parse_create_table().map(|()| StatementKind::CreateTable)
            }
            Some(Keyword::View) => {
                self.advance();
                self.parse_create_view().map(|()| StatementKind::CreateView)
            }
            Some(Keyword::Unique | Keyword::Index) if !temporary => {
                self.eat_keyword(Keyword::Unique);
                self.expect_keyword(Keyword::Index)?;
                self.parse_create_index().map(|()| StatementKind::CreateIndex)
            }
            _ if temporary => Err(self.unexpected("TABLE or VIEW")),
            _ => Err(self.unexpected("TABLE, INDEX or VIEW")),
        }
    }

    /// Parses the rest of CREATE TABLE after the TABLE keyword.
    fn parse_create_table(&mut self) -> Result<()> {
        self.parse_if_not_exists()?;
        self.parse_qualified_name("table name")?;

        if self.eat_keyword(Keyword::As) {
            return self.parse_query();
        }

        self.expect(&TokenKind::LeftParen)?;
        loop {
            if self.is_table_constraint_start() {
                self.parse_table_constraint()?;
            } else {
                self.parse_column_definition()?;
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)
    }

    /// Parses a column definition: name, type and column constraints.
    fn parse_column_definition(&mut self) -> Result<()> {
        self.expect_name("column name")?;
        self.parse_type_name()?;

        loop {
            let named = if self.eat_keyword(Keyword::Constraint) {
                self.expect_name("constraint name")?;
                true
            } else {
                false
            };

            match self.current.as_keyword() {
                Some(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                }
                Some(Keyword::Null | Keyword::Unique) => self.advance(),
                Some(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    self.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
                }
                Some(Keyword::Default) => {
                    self.advance();
                    self.parse_expression(ARITHMETIC_BP)?;
                }
                Some(Keyword::Check) => {
                    self.advance();
                    self.parse_parenthesized_expression()?;
                }
                Some(Keyword::References) => self.parse_references()?,
                Some(Keyword::Collate) => {
                    self.advance();
                    self.parse_qualified_name("collation name")?;
                }
                _ if named => return Err(self.unexpected("column constraint")),
                _ => return Ok(()),
            }
        }
    }

    fn is_table_constraint_start(&self) -> bool {
        self.check_any_keyword(&[
            Keyword::Constraint,
            Keyword::Primary,
            Keyword::Unique,
            Keyword::Check,
            Keyword::Foreign,
        ])
    }

    /// Parses a table constraint.
    fn parse_table_constraint(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Constraint) {
            self.expect_name("constraint name")?;
        }

        match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.parse_paren_name_list("column name")
            }
            Some(Keyword::Unique) => {
                self.advance();
                self.parse_paren_name_list("column name")
            }
            Some(Keyword::Check) => {
                self.advance();
                self.parse_parenthesized_expression()
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.parse_paren_name_list("column name")?;
                self.parse_references()
            }
            _ => Err(self.unexpected("PRIMARY KEY, UNIQUE, CHECK or FOREIGN KEY")),
        }
    }

    /// Parses `REFERENCES t [(cols)] [ON {DELETE | UPDATE} action]...`.
    fn parse_references(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::References)?;
        self.parse_qualified_name("table name")?;
        if self.check(&TokenKind::LeftParen) {
            self.parse_paren_name_list("column name")?;
        }

        while self.eat_keyword(Keyword::On) {
            self.expect_any_keyword(&[Keyword::Delete, Keyword::Update], "DELETE or UPDATE")?;
            match self.current.as_keyword() {
                Some(Keyword::Cascade | Keyword::Restrict) => self.advance(),
                Some(Keyword::Set) => {
                    self.advance();
                    self.expect_any_keyword(&[Keyword::Null, Keyword::Default], "NULL or DEFAULT")?;
                }
                Some(Keyword::No) => {
                    self.advance();
                    self.expect_keyword(Keyword::Action)?;
                }
                _ => return Err(self.unexpected("referential action")),
            }
        }
        Ok(())
    }

    /// Parses the rest of CREATE INDEX after the INDEX keyword.
    fn parse_create_index(&mut self) -> Result<()> {
        self.parse_if_not_exists()?;
        if !self.check_keyword(Keyword::On) {
            self.parse_qualified_name("index name")?;
        }
        self.expect_keyword(Keyword::On)?;
        self.eat_keyword(Keyword::Only);
        self.parse_qualified_name("table name")?;
        if self.eat_keyword(Keyword::Using) {
            self.expect_name("index method")?;
        }

        self.expect(&TokenKind::LeftParen)?;
        self.parse_order_list()?;
        self.expect(&TokenKind::RightParen)?;

        if self.eat_keyword(Keyword::Where) {
            self.parse_expression(0)?;
        }
        Ok(())
    }

    /// Parses the rest of CREATE VIEW after the VIEW keyword.
    fn parse_create_view(&mut self) -> Result<()> {
        self.parse_qualified_name("view name")?;
        if self.check(&TokenKind::LeftParen) {
            self.parse_paren_name_list("column name")?;
        }
        self.expect_keyword(Keyword::As)?;
        self.parse_query()
    }

    /// Parses DROP TABLE, DROP INDEX or DROP VIEW.
    fn parse_drop(&mut self) -> Result<StatementKind> {
        self.expect_keyword(Keyword::Drop)?;
        let kind = match self.current.as_keyword() {
            Some(Keyword::Table) => StatementKind::DropTable,
            Some(Keyword::Index) => StatementKind::DropIndex,
            Some(Keyword::View) => StatementKind::DropView,
            _ => return Err(self.unexpected("TABLE, INDEX or VIEW")),
        };
        self.advance();

        self.parse_if_exists()?;
        loop {
            self.parse_qualified_name("name")?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.eat_any_keyword(&[Keyword::Cascade, Keyword::Restrict]);
        Ok(kind)
    }

    /// Parses ALTER TABLE with one or more comma-separated actions.
    fn parse_alter(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        self.parse_if_exists()?;
        self.eat_keyword(Keyword::Only);
        self.parse_qualified_name("table name")?;

        loop {
            self.parse_alter_action()?;
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_alter_action(&mut self) -> Result<()> {
        match self.current.as_keyword() {
            Some(Keyword::Add) => {
                self.advance();
                if self.is_table_constraint_start() {
                    return self.parse_table_constraint();
                }
                self.eat_keyword(Keyword::Column);
                self.parse_if_not_exists()?;
                self.parse_column_definition()
            }
            Some(Keyword::Drop) => {
                self.advance();
                if self.eat_keyword(Keyword::Constraint) {
                    self.parse_if_exists()?;
                    self.expect_name("constraint name")?;
                } else {
                    self.eat_keyword(Keyword::Column);
                    self.parse_if_exists()?;
                    self.expect_name("column name")?;
                }
                self.eat_any_keyword(&[Keyword::Cascade, Keyword::Restrict]);
                Ok(())
            }
            Some(Keyword::Rename) => {
                self.advance();
                if self.eat_keyword(Keyword::To) {
                    return self.parse_qualified_name("table name");
                }
                if !self.eat_keyword(Keyword::Constraint) {
                    self.eat_keyword(Keyword::Column);
                }
                self.expect_name("column name")?;
                self.expect_keyword(Keyword::To)?;
                self.expect_name("column name")
            }
            Some(Keyword::Alter) => {
                self.advance();
                self.eat_keyword(Keyword::Column);
                self.expect_name("column name")?;
                self.parse_alter_column_action()
            }
            _ => Err(self.unexpected("ADD, DROP, RENAME or ALTER")),
        }
    }

    fn parse_alter_column_action(&mut self) -> Result<()> {
        match self.current.as_keyword() {
            Some(Keyword::Set) => {
                self.advance();
                match self.current.as_keyword() {
                    Some(Keyword::Default) => {
                        self.advance();
                        self.parse_expression(ARITHMETIC_BP)
                    }
                    Some(Keyword::Not) => {
                        self.advance();
                        self.expect_keyword(Keyword::Null)
                    }
                    Some(Keyword::Data) => {
                        self.advance();
                        self.expect_keyword(Keyword::Type)?;
                        self.parse_column_type_change()
                    }
                    _ => Err(self.unexpected("DEFAULT, NOT NULL or DATA TYPE")),
                }
            }
            Some(Keyword::Drop) => {
                self.advance();
                if self.eat_keyword(Keyword::Not) {
                    self.expect_keyword(Keyword::Null)
                } else {
                    self.expect_keyword(Keyword::Default)
                }
            }
            Some(Keyword::Type) => {
                self.advance();
                self.parse_column_type_change()
            }
            _ => Err(self.unexpected("SET, DROP or TYPE")),
        }
    }

    fn parse_column_type_change(&mut self) -> Result<()> {
        self.parse_type_name()?;
        if self.eat_keyword(Keyword::Collate) {
            self.parse_qualified_name("collation name")?;
        }
        if self.eat_keyword(Keyword::Using) {
            self.parse_expression(0)?;
        }
        Ok(())
    }

    /// Parses a TRUNCATE statement.
    fn parse_truncate(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Truncate)?;
        self.eat_keyword(Keyword::Table);
        self.eat_keyword(Keyword::Only);
        loop {
            self.parse_qualified_name("table name")?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if self.eat_any_keyword(&[Keyword::Restart, Keyword::Continue]) {
            self.expect_keyword(Keyword::Identity)?;
        }
        self.eat_any_keyword(&[Keyword::Cascade, Keyword::Restrict]);
        Ok(())
    }

    /// Parses BEGIN, START TRANSACTION, COMMIT, END and ROLLBACK.
    fn parse_transaction(&mut self) -> Result<StatementKind> {
        let keyword = self.current.as_keyword();
        self.advance();

        match keyword {
            Some(Keyword::Start) => {
                self.expect_keyword(Keyword::Transaction)?;
                Ok(StatementKind::Begin)
            }
            Some(Keyword::Begin) => {
                self.eat_any_keyword(&[Keyword::Work, Keyword::Transaction]);
                Ok(StatementKind::Begin)
            }
            Some(Keyword::Rollback) => {
                self.eat_any_keyword(&[Keyword::Work, Keyword::Transaction]);
                if self.eat_keyword(Keyword::To) {
                    self.eat_keyword(Keyword::Savepoint);
                    self.expect_name("savepoint name")?;
                }
                Ok(StatementKind::Rollback)
            }
            // COMMIT and END
            _ => {
                self.eat_any_keyword(&[Keyword::Work, Keyword::Transaction]);
                Ok(StatementKind::Commit)
            }
        }
    }

    fn parse_if_not_exists(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }
        Ok(())
    }

    fn parse_if_exists(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
        }
        Ok(())
    }

    // ===================================================================
    // Queries
    // ===================================================================

    /// Parses a nested query: `[WITH ...] body`.
    fn parse_query(&mut self) -> Result<()> {
        self.descend(|p| {
            if p.eat_keyword(Keyword::With) {
                p.parse_with_list()?;
            }
            p.parse_query_body()
        })
    }

    fn is_query_start(&self) -> bool {
        self.check_any_keyword(&[Keyword::Select, Keyword::Values, Keyword::With])
    }

    /// Parses the CTE list after WITH.
    fn parse_with_list(&mut self) -> Result<()> {
        self.eat_keyword(Keyword::Recursive);
        loop {
            self.expect_name("common table expression name")?;
            if self.check(&TokenKind::LeftParen) {
                self.parse_paren_name_list("column name")?;
            }
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            match self.current.as_keyword() {
                Some(Keyword::Insert) => self.descend(Self::parse_insert)?,
                Some(Keyword::Update) => self.descend(Self::parse_update)?,
                Some(Keyword::Delete) => self.descend(Self::parse_delete)?,
                _ => self.parse_query()?,
            }
            self.expect(&TokenKind::RightParen)?;

            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Parses query terms joined by set operations, then the trailing
    /// ORDER BY / LIMIT / OFFSET / FETCH / FOR clauses.
    fn parse_query_body(&mut self) -> Result<()> {
        self.parse_query_term()?;
        while self.eat_any_keyword(&[Keyword::Union, Keyword::Intersect, Keyword::Except]) {
            self.eat_any_keyword(&[Keyword::All, Keyword::Distinct]);
            self.parse_query_term()?;
        }
        self.parse_query_tail()
    }

    fn parse_query_term(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Select) => self.parse_select_core(),
            TokenKind::Keyword(Keyword::Values) => self.parse_values(),
            TokenKind::LeftParen => {
                self.advance();
                self.parse_query()?;
                self.expect(&TokenKind::RightParen)
            }
            _ => Err(self.unexpected("SELECT, VALUES or '('")),
        }
    }

    /// Parses SELECT up to and including HAVING and WINDOW.
    fn parse_select_core(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT [ON (...)] or ALL
        if self.eat_keyword(Keyword::Distinct) {
            if self.eat_keyword(Keyword::On) {
                self.expect(&TokenKind::LeftParen)?;
                self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
            }
        } else {
            self.eat_keyword(Keyword::All);
        }

        self.parse_projection()?;

        // FROM clause (optional for expressions like SELECT 1+1)
        if self.eat_keyword(Keyword::From) {
            self.parse_from_list()?;
        }

        // WHERE clause
        if self.eat_keyword(Keyword::Where) {
            self.parse_expression(0)?;
        }

        // GROUP BY clause
        if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?;
        }

        // HAVING clause
        if self.eat_keyword(Keyword::Having) {
            self.parse_expression(0)?;
        }

        // WINDOW clause
        if self.eat_keyword(Keyword::Window) {
            loop {
                self.expect_name("window name")?;
                self.expect_keyword(Keyword::As)?;
                self.parse_window_spec()?;
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parses a projection list (also used by RETURNING).
    fn parse_projection(&mut self) -> Result<()> {
        loop {
            if !self.eat(&TokenKind::Star) {
                self.parse_expression(0)?;

                // Check for alias (AS name or just name)
                if self.eat_keyword(Keyword::As) {
                    self.expect_label("alias")?;
                } else if matches!(
                    self.current.kind,
                    TokenKind::Identifier | TokenKind::QuotedIdentifier
                ) {
                    self.advance();
                }
            }

            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_query_tail(&mut self) -> Result<()> {
        // ORDER BY clause
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_list()?;
        }

        // LIMIT and OFFSET, in either order
        let limit_seen = self.parse_limit()?;
        if self.eat_keyword(Keyword::Offset) {
            self.parse_expression(0)?;
            self.eat_any_keyword(&[Keyword::Row, Keyword::Rows]);
        }
        if !limit_seen {
            self.parse_limit()?;
        }

        // FETCH {FIRST | NEXT} [n] {ROW | ROWS} ONLY
        if self.eat_keyword(Keyword::Fetch) {
            self.expect_any_keyword(&[Keyword::First, Keyword::Next], "FIRST or NEXT")?;
            if !self.check_any_keyword(&[Keyword::Row, Keyword::Rows]) {
                self.parse_expression(ARITHMETIC_BP)?;
            }
            self.expect_any_keyword(&[Keyword::Row, Keyword::Rows], "ROW or ROWS")?;
            self.expect_keyword(Keyword::Only)?;
        }

        // Locking clause
        if self.eat_keyword(Keyword::For) {
            self.expect_any_keyword(&[Keyword::Update, Keyword::Share], "UPDATE or SHARE")?;
        }

        Ok(())
    }

    fn parse_limit(&mut self) -> Result<bool> {
        if !self.eat_keyword(Keyword::Limit) {
            return Ok(false);
        }
        if !self.eat_keyword(Keyword::All) {
            self.parse_expression(0)?;
        }
        Ok(true)
    }

    /// Parses `VALUES (row), ...`.
    fn parse_values(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Values)?;
        loop {
            self.expect(&TokenKind::LeftParen)?;
            loop {
                if !self.eat_keyword(Keyword::Default) {
                    self.parse_expression(0)?;
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;

            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Parses `expr [ASC | DESC] [NULLS {FIRST | LAST}], ...`.
    fn parse_order_list(&mut self) -> Result<()> {
        loop {
            self.parse_expression(0)?;
            self.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
            if self.eat_keyword(Keyword::Nulls) {
                self.expect_any_keyword(&[Keyword::First, Keyword::Last], "FIRST or LAST")?;
            }
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    // ===================================================================
    // FROM clause
    // ===================================================================

    fn parse_from_list(&mut self) -> Result<()> {
        loop {
            self.parse_table_ref()?;
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Parses a table factor followed by any number of joins.
    fn parse_table_ref(&mut self) -> Result<()> {
        self.parse_table_factor()?;

        loop {
            if self.eat_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                self.parse_table_factor()?;
                continue;
            }

            let natural = self.eat_keyword(Keyword::Natural);
            match self.current.as_keyword() {
                Some(Keyword::Join) => self.advance(),
                Some(Keyword::Inner) => {
                    self.advance();
                    self.expect_keyword(Keyword::Join)?;
                }
                Some(Keyword::Left | Keyword::Right | Keyword::Full) => {
                    self.advance();
                    self.eat_keyword(Keyword::Outer);
                    self.expect_keyword(Keyword::Join)?;
                }
                _ if natural => return Err(self.unexpected("JOIN")),
                _ => return Ok(()),
            }

            self.parse_table_factor()?;
            if natural {
                continue;
            }

            if self.eat_keyword(Keyword::On) {
                self.parse_expression(0)?;
            } else if self.eat_keyword(Keyword::Using) {
                self.parse_paren_name_list("column name")?;
            } else {
                return Err(self.unexpected("ON or USING"));
            }
        }
    }

    /// Parses a table, table function, subquery or parenthesized join, with
    /// an optional alias.
    fn parse_table_factor(&mut self) -> Result<()> {
        self.descend(|p| {
            p.eat_keyword(Keyword::Lateral);

            if p.eat(&TokenKind::LeftParen) {
                if p.is_query_start() {
                    p.parse_query()?;
                } else {
                    p.parse_table_ref()?;
                }
                p.expect(&TokenKind::RightParen)?;
            } else {
                p.eat_keyword(Keyword::Only);
                p.parse_qualified_name("table name")?;

                // Table function
                if p.eat(&TokenKind::LeftParen) {
                    if !p.check(&TokenKind::RightParen) {
                        p.parse_expression_list()?;
                    }
                    p.expect(&TokenKind::RightParen)?;
                }
            }

            if p.parse_optional_alias()? && p.check(&TokenKind::LeftParen) {
                p.parse_paren_name_list("column name")?;
            }
            Ok(())
        })
    }

    /// Parses an optional alias (AS name or just name).
    fn parse_optional_alias(&mut self) -> Result<bool> {
        if self.eat_keyword(Keyword::As) {
            self.expect_name("alias")?;
            return Ok(true);
        }
        if matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        ) {
            self.advance();
            return Ok(true);
        }
        Ok(false)
    }

    // ===================================================================
    // Expressions
    // ===================================================================

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<()> {
        self.descend(|p| p.parse_expression_bp(min_bp))
    }

    fn parse_expression_bp(&mut self, min_bp: u8) -> Result<()> {
        self.parse_prefix()?;
        self.parse_operators(min_bp)
    }

    /// Parses the postfix and infix operators that follow an operand.
    fn parse_operators(&mut self, min_bp: u8) -> Result<()> {
        // Comparisons do not chain: `a = b = c` is rejected.
        let mut after_comparison = false;
        loop {
            let kind = self.current.kind;

            if let Some(bp) = postfix_binding_power(&kind) {
                if bp < min_bp {
                    break;
                }
                self.parse_postfix()?;
                continue;
            }

            let Some((l_bp, r_bp)) = infix_binding_power(&kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            if after_comparison && is_comparison(&kind) {
                return Err(self.unexpected("end of comparison"));
            }
            after_comparison = is_comparison(&kind);
            self.advance();

            // Handle special infix operators
            match kind {
                TokenKind::Keyword(Keyword::Is) => self.parse_is_tail(r_bp)?,
                TokenKind::Keyword(Keyword::Not) => self.parse_negated_predicate(r_bp)?,
                TokenKind::Keyword(Keyword::In) => self.parse_in_tail()?,
                TokenKind::Keyword(Keyword::Between) => self.parse_between_tail(r_bp)?,
                TokenKind::Keyword(Keyword::Like | Keyword::Ilike) => {
                    self.parse_like_tail(r_bp)?;
                }
                _ if is_comparison(&kind)
                    && self.check_any_keyword(&[Keyword::Any, Keyword::Some, Keyword::All]) =>
                {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    self.parse_query_or_list()?;
                    self.expect(&TokenKind::RightParen)?;
                }
                _ => self.parse_expression(r_bp)?,
            }
        }

        Ok(())
    }

    /// Parses a prefix operator or a primary expression.
    fn parse_prefix(&mut self) -> Result<()> {
        let token = self.current;

        // Unary operators
        if let Some(bp) = prefix_binding_power(&token.kind) {
            self.advance();
            return self.parse_expression(bp);
        }

        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Parameter => {
                self.advance();
                Ok(())
            }
            TokenKind::Keyword(
                Keyword::Null
                | Keyword::True
                | Keyword::False
                | Keyword::CurrentDate
                | Keyword::CurrentTime
                | Keyword::CurrentTimestamp
                | Keyword::CurrentUser,
            ) => {
                self.advance();
                Ok(())
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                self.parse_query()?;
                self.expect(&TokenKind::RightParen)
            }
            TokenKind::LeftParen => {
                self.advance();
                self.parse_query_or_list()?;
                self.expect(&TokenKind::RightParen)
            }
            TokenKind::Identifier | TokenKind::QuotedIdentifier => self.parse_name_expression(),
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => self.parse_name_expression(),
            // LEFT(s, n) and RIGHT(s, n)
            TokenKind::Keyword(keyword) if keyword.is_function_name() => {
                self.advance();
                self.parse_function_tail()
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses `::type`, `COLLATE name` or a `[...]` subscript.
    fn parse_postfix(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::DoubleColon => {
                self.advance();
                self.parse_type_name()
            }
            TokenKind::Keyword(Keyword::Collate) => {
                self.advance();
                self.parse_qualified_name("collation name")
            }
            _ => {
                self.expect(&TokenKind::LeftBracket)?;
                while !self.check(&TokenKind::RightBracket) {
                    if self.eat(&TokenKind::Colon) {
                        continue;
                    }
                    self.parse_expression(0)?;
                    if self.is_named_parameter() {
                        // `a[1:b]` scans `:b` as one token
                        self.descend(|p| {
                            p.parse_name_expression()?;
                            p.parse_operators(0)
                        })?;
                    }
                    if !self.check(&TokenKind::Colon) && !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RightBracket)
            }
        }
    }

    /// Parses a column reference, function call or typed literal.
    fn parse_name_expression(&mut self) -> Result<()> {
        let first = self.current;
        self.advance();

        let mut qualified = false;
        while self.eat(&TokenKind::Dot) {
            // t.*
            if self.eat(&TokenKind::Star) {
                return Ok(());
            }
            self.expect_label("column name")?;
            qualified = true;
        }

        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_tail();
        }

        // DATE '2024-01-01', TIMESTAMP '...'
        if !qualified && first.kind != TokenKind::QuotedIdentifier {
            self.eat(&TokenKind::String);
        }
        Ok(())
    }

    /// Parses function arguments and the FILTER / OVER clauses.
    fn parse_function_tail(&mut self) -> Result<()> {
        self.expect(&TokenKind::LeftParen)?;

        // COUNT(*) and f()
        if !self.eat(&TokenKind::Star) && !self.check(&TokenKind::RightParen) {
            self.eat_any_keyword(&[Keyword::Distinct, Keyword::All]);
            self.parse_expression_list()?;
            // EXTRACT(YEAR FROM d), SUBSTRING(s FROM 1 FOR 2)
            while self.eat_any_keyword(&[Keyword::From, Keyword::For]) {
                self.parse_expression(0)?;
            }
            // string_agg(x, ',' ORDER BY y)
            if self.eat_keyword(Keyword::Order) {
                self.expect_keyword(Keyword::By)?;
                self.parse_order_list()?;
            }
        }
        self.expect(&TokenKind::RightParen)?;

        if self.eat_keyword(Keyword::Filter) {
            self.expect(&TokenKind::LeftParen)?;
            self.expect_keyword(Keyword::Where)?;
            self.parse_expression(0)?;
            self.expect(&TokenKind::RightParen)?;
        }

        if self.eat_keyword(Keyword::Over) {
            if self.check(&TokenKind::LeftParen) {
                self.parse_window_spec()?;
            } else {
                self.expect_name("window name")?;
            }
        }
        Ok(())
    }

    /// Parses `( [name] [PARTITION BY ..] [ORDER BY ..] [frame] )`.
    fn parse_window_spec(&mut self) -> Result<()> {
        self.expect(&TokenKind::LeftParen)?;

        // Existing window name
        if matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        ) {
            self.advance();
        }
        if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?;
        }
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_list()?;
        }
        if self.eat_any_keyword(&[Keyword::Rows, Keyword::Range]) {
            if self.eat_keyword(Keyword::Between) {
                self.parse_frame_bound()?;
                self.expect_keyword(Keyword::And)?;
            }
            self.parse_frame_bound()?;
        }

        self.expect(&TokenKind::RightParen)
    }

    fn parse_frame_bound(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Current) {
            return self.expect_keyword(Keyword::Row);
        }
        if !self.eat_keyword(Keyword::Unbounded) {
            self.parse_expression(ARITHMETIC_BP)?;
        }
        self.expect_any_keyword(
            &[Keyword::Preceding, Keyword::Following],
            "PRECEDING or FOLLOWING",
        )
    }

    /// Parses `CASE [operand] WHEN .. THEN .. [ELSE ..] END`.
    fn parse_case(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE has an operand
        if !self.check_keyword(Keyword::When) {
            self.parse_expression(0)?;
        }

        self.expect_keyword(Keyword::When)?;
        loop {
            self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            self.parse_expression(0)?;
            if !self.eat_keyword(Keyword::When) {
                break;
            }
        }

        if self.eat_keyword(Keyword::Else) {
            self.parse_expression(0)?;
        }
        self.expect_keyword(Keyword::End)
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        self.parse_type_name()?;
        self.expect(&TokenKind::RightParen)
    }

    /// Parses `IS [NOT] {NULL | TRUE | FALSE | DISTINCT FROM expr}`.
    fn parse_is_tail(&mut self, r_bp: u8) -> Result<()> {
        self.eat_keyword(Keyword::Not);
        if self.eat_keyword(Keyword::Distinct) {
            self.expect_keyword(Keyword::From)?;
            return self.parse_expression(r_bp);
        }
        self.expect_any_keyword(
            &[Keyword::Null, Keyword::True, Keyword::False],
            "NULL, TRUE, FALSE or DISTINCT FROM",
        )
    }

    /// Parses the predicate after an infix NOT.
    fn parse_negated_predicate(&mut self, r_bp: u8) -> Result<()> {
        match self.current.as_keyword() {
            Some(Keyword::In) => {
                self.advance();
                self.parse_in_tail()
            }
            Some(Keyword::Between) => {
                self.advance();
                self.parse_between_tail(r_bp)
            }
            Some(Keyword::Like | Keyword::Ilike) => {
                self.advance();
                self.parse_like_tail(r_bp)
            }
            _ => Err(self.unexpected("IN, BETWEEN, LIKE or ILIKE")),
        }
    }

    fn parse_in_tail(&mut self) -> Result<()> {
        self.expect(&TokenKind::LeftParen)?;
        self.parse_query_or_list()?;
        self.expect(&TokenKind::RightParen)
    }

    fn parse_between_tail(&mut self, r_bp: u8) -> Result<()> {
        self.eat_keyword(Keyword::Symmetric);
        self.parse_expression(r_bp)?;
        self.expect_keyword(Keyword::And)?;
        self.parse_expression(r_bp)
    }

    fn parse_like_tail(&mut self, r_bp: u8) -> Result<()> {
        self.parse_expression(r_bp)?;
        if self.eat_keyword(Keyword::Escape) {
            self.parse_expression(r_bp)?;
        }
        Ok(())
    }

    /// Parses the inside of a parenthesis that holds either a subquery or an
    /// expression list.
    fn parse_query_or_list(&mut self) -> Result<()> {
        if self.is_query_start() {
            self.parse_query()
        } else {
            self.parse_expression_list()
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Result<()> {
        self.expect(&TokenKind::LeftParen)?;
        self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen)
    }

    /// Parses a comma-separated list of expressions.
    fn parse_expression_list(&mut self) -> Result<()> {
        loop {
            self.parse_expression(0)?;
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// Parses a type name with optional modifiers and array suffixes.
    fn parse_type_name(&mut self) -> Result<()> {
        match self.current.as_keyword() {
            Some(Keyword::Double) => {
                self.advance();
                self.expect_keyword(Keyword::Precision)?;
            }
            Some(Keyword::Character) => {
                self.advance();
                self.eat_keyword(Keyword::Varying);
                self.parse_type_modifier()?;
            }
            Some(Keyword::Time | Keyword::Timestamp) => {
                self.advance();
                self.parse_type_modifier()?;
                if self.eat_any_keyword(&[Keyword::With, Keyword::Without]) {
                    self.expect_keyword(Keyword::Time)?;
                    self.expect_keyword(Keyword::Zone)?;
                }
            }
            _ => {
                self.parse_qualified_name("type name")?;
                self.parse_type_modifier()?;
            }
        }

        // Array suffixes: int[], int[3][3]
        while self.eat(&TokenKind::LeftBracket) {
            self.eat(&TokenKind::Number);
            self.expect(&TokenKind::RightBracket)?;
        }
        Ok(())
    }

    /// Parses `(p [, s])`.
    fn parse_type_modifier(&mut self) -> Result<()> {
        if !self.eat(&TokenKind::LeftParen) {
            return Ok(());
        }
        loop {
            if !self.eat(&TokenKind::Number) {
                return Err(self.unexpected("number"));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)
    }

    // ===================================================================
    // Names
    // ===================================================================

    /// Returns true if the token can be used as a plain name.
    fn is_name(kind: &TokenKind) -> bool {
        match kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
            TokenKind::Keyword(keyword) => !keyword.is_reserved(),
            _ => false,
        }
    }

    /// Expects an identifier or a non-reserved keyword.
    fn expect_name(&mut self, expected: &'static str) -> Result<()> {
        if Self::is_name(&self.current.kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expects an identifier or any keyword, as allowed after `AS` in a
    /// projection and after a dot.
    fn expect_label(&mut self, expected: &'static str) -> Result<()> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Parses `name[.name]...`.
    fn parse_qualified_name(&mut self, expected: &'static str) -> Result<()> {
        self.expect_name(expected)?;
        while self.eat(&TokenKind::Dot) {
            self.expect_name(expected)?;
        }
        Ok(())
    }

    fn parse_name_list(&mut self, expected: &'static str) -> Result<()> {
        loop {
            self.expect_name(expected)?;
            if !self.eat(&TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_paren_name_list(&mut self, expected: &'static str) -> Result<()> {
        self.expect(&TokenKind::LeftParen)?;
        self.parse_name_list(expected)?;
        self.expect(&TokenKind::RightParen)
    }

    // ===================================================================
    // Helper methods
    // ===================================================================

    /// Runs `rule` one nesting level deeper, rejecting input that crosses
    /// the depth cap.
    fn descend<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(ValidationError::TooDeep {
                limit: self.max_depth,
                offset: self.current.span.start,
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = self.current;
        self.current = self.lexer.next_token();
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    fn is_named_parameter(&self) -> bool {
        self.current.kind == TokenKind::Parameter && self.current.text.starts_with(':')
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.kind == TokenKind::Keyword(keyword)
    }

    fn check_any_keyword(&self, keywords: &[Keyword]) -> bool {
        self.current
            .as_keyword()
            .is_some_and(|keyword| keywords.contains(&keyword))
    }

    /// Consumes the current token if it matches the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_any_keyword(&mut self, keywords: &[Keyword]) -> bool {
        let matched = self.check_any_keyword(keywords);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to match the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.symbol().unwrap_or("token")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_any_keyword(&mut self, keywords: &[Keyword], expected: &'static str) -> Result<()> {
        if self.eat_any_keyword(keywords) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds the error for a current token that fits no alternative.
    fn unexpected(&self, expected: &'static str) -> ValidationError {
        let token = self.current;
        match token.kind {
            TokenKind::Eof => ValidationError::UnexpectedEnd {
                expected,
                offset: token.span.start,
            },
            TokenKind::Invalid(error) => ValidationError::Lexical {
                error,
                span: token.span,
            },
            _ => ValidationError::Unexpected {
                expected,
                found: describe(&token),
                span: token.span,
            },
        }
    }
}

/// Describes a token for a diagnostic, quoting short source text for names
/// and numbers.
fn describe(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Identifier
        | TokenKind::QuotedIdentifier
        | TokenKind::Number
        | TokenKind::Parameter => {
            let text: String = token.text.chars().take(FOUND_TEXT_LIMIT).collect();
            format!("{} `{text}`", token.kind)
        }
        _ => token.kind.to_string(),
    }
}
