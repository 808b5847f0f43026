//! SQL Tokenizer implementation.

use std::iter::FusedIterator;

use super::{Keyword, LexError, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// Tokens are produced on demand. As an [`Iterator`] the lexer yields every
/// token up to and including a single [`TokenKind::Eof`], then stops.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once the iterator has handed out `Eof`.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            finished: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Moves to end of input, used when a construct never terminates.
    const fn exhaust(&mut self) {
        self.pos = self.input.len();
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error if a block comment runs off the end of the input; the
    /// token start is then left on the opening `/*`.
    fn skip_whitespace_and_comments(&mut self) -> Option<LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }
            self.start = self.pos;

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Block comments (/* ... */), which nest
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance(); // /
                self.advance(); // *
                let mut depth = 1usize;
                while depth > 0 {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            depth -= 1;
                        }
                        Some('/') if self.peek() == Some('*') => {
                            self.advance();
                            depth += 1;
                        }
                        Some(_) => {}
                        None => return Some(LexError::UnterminatedComment),
                    }
                }
                continue;
            }

            return None;
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.make_span(), &self.input[self.start..self.pos])
    }

    fn invalid(&self, err: LexError) -> Token<'a> {
        self.make_token(TokenKind::Invalid(err))
    }

    /// Consumes identifier continuation characters.
    fn eat_word(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token<'a> {
        self.eat_word();
        let text = &self.input[self.start..self.pos];

        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token<'a> {
        self.advance(); // consume opening quote

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    // Doubled quote is an escaped quote
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => return self.invalid(LexError::UnterminatedQuotedIdentifier),
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::QuotedIdentifier)
    }

    /// Scans a number. Signs are never part of the literal.
    fn scan_number(&mut self) -> Token<'a> {
        let mut has_point = false;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A single decimal point, but not the first dot of `1..2`
        if self.peek() == Some('.') && self.peek_next() != Some('.') {
            has_point = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent, only when digits follow
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let rest = &self.input[self.pos + 1..];
            let digits_at = usize::from(rest.starts_with(['+', '-']));
            if rest[digits_at..].starts_with(|c: char| c.is_ascii_digit()) {
                self.advance(); // e/E
                if digits_at == 1 {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        // `12abc`, `1e`, `3.5.` are not numbers followed by something else
        let glued = self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_')
            || (has_point && self.peek() == Some('.'));
        if glued {
            self.eat_word();
            while self.peek() == Some('.') {
                self.advance();
                self.eat_word();
            }
            return self.invalid(LexError::MalformedNumber);
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Token<'a> {
        self.advance(); // consume opening quote

        loop {
            match self.peek() {
                Some('\'') => {
                    // Doubled quote is an escaped quote
                    if self.peek_next() == Some('\'') {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => return self.invalid(LexError::UnterminatedString),
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String)
    }

    /// Scans a blob literal (X'...' or x'...').
    fn scan_blob(&mut self) -> Token<'a> {
        self.advance(); // consume X/x
        self.advance(); // consume opening quote

        let mut digits = 0usize;
        let mut well_formed = true;
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => digits += 1,
                Some(_) => well_formed = false,
                None => return self.invalid(LexError::UnterminatedBlob),
            }
        }

        if well_formed && digits % 2 == 0 {
            self.make_token(TokenKind::String)
        } else {
            self.invalid(LexError::InvalidBlob)
        }
    }

    /// Scans what follows a `$`: a positional parameter (`$1`) or a
    /// dollar-quoted string (`$$...$$`, `$tag$...$tag$`).
    fn scan_dollar(&mut self) -> Token<'a> {
        self.advance(); // consume $

        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return self.make_token(TokenKind::Parameter);
        }

        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            while self
                .peek()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
            {
                self.advance();
            }
        }
        if self.peek() != Some('$') {
            return self.invalid(LexError::InvalidParameter);
        }
        self.advance(); // closing $ of the opening tag

        let delimiter = &self.input[self.start..self.pos];
        match self.input[self.pos..].find(delimiter) {
            Some(offset) => {
                self.pos += offset + delimiter.len();
                self.make_token(TokenKind::String)
            }
            None => {
                self.exhaust();
                self.invalid(LexError::UnterminatedDollarString)
            }
        }
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted this keeps returning `Eof`.
    #[must_use]
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(err) = self.skip_whitespace_and_comments() {
            return self.invalid(err);
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '&' => self.make_token(TokenKind::BitAnd),
            '=' => self.make_token(TokenKind::Eq),

            // Potentially multi-character tokens
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos = self.start;
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            ':' => {
                if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon)
                } else if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
                    self.eat_word();
                    self.make_token(TokenKind::Parameter)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '?' => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
                self.make_token(TokenKind::Parameter)
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some('<') {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.invalid(LexError::UnexpectedCharacter)
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }

            // String literals
            '\'' => {
                self.pos = self.start; // Reset position to scan from quote
                self.scan_string()
            }
            '$' => {
                self.pos = self.start;
                self.scan_dollar()
            }

            // Quoted identifiers
            '"' | '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier(c)
            }

            // Blob literals
            'X' | 'x' if self.peek() == Some('\'') => {
                self.pos = self.start;
                self.scan_blob()
            }

            // Numbers
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.invalid(LexError::UnexpectedCharacter),
        }
    }

    /// Tokenizes the remaining input, `Eof` included.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token<'a>> {
        self.by_ref().collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].span, Span::at(0));
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].span.start, 7);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("SELECT");
        assert!(lexer.next().is_some_and(|t| t.kind == TokenKind::Keyword(Keyword::Select)));
        assert!(lexer.next().is_some_and(|t| t.is_eof()));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_next_token_repeats_eof() {
        let mut lexer = Lexer::new("x");
        let _ = lexer.next_token();
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_single_line_comment() {
        assert_eq!(
            token_kinds("SELECT -- comment\nFROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comments_nest() {
        assert_eq!(
            token_kinds("SELECT /* outer /* inner */ still */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = tokenize("SELECT /* never closed");
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens[1].kind,
            TokenKind::Invalid(LexError::UnterminatedComment)
        );
        assert_eq!(tokens[1].span, Span::new(7, 22));
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_keep_case() {
        let tokens = tokenize("Foo bar_baz _qux n$1 café");
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(texts("Foo bar_baz"), vec!["Foo", "bar_baz", ""]);
        assert_eq!(tokens[4].text, "café");
    }

    #[test]
    fn test_quoted_identifiers() {
        let tokens = tokenize("\"Column Name\" `another` \"a\"\"b\"");
        assert!(tokens[..3]
            .iter()
            .all(|t| t.kind == TokenKind::QuotedIdentifier));
        assert_eq!(tokens[0].unquoted(), "Column Name");
        assert_eq!(tokens[2].unquoted(), "a\"b");
    }

    #[test]
    fn test_unterminated_quoted_identifier() {
        assert_eq!(
            token_kinds("SELECT \"abc"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Invalid(LexError::UnterminatedQuotedIdentifier),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            texts("42 0 3.14 .5 1. 1e10 2.5e-3 7E+2"),
            vec!["42", "0", "3.14", ".5", "1.", "1e10", "2.5e-3", "7E+2", ""]
        );
        assert!(tokenize("42 3.14 .5 1e10")[..4]
            .iter()
            .all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_sign_is_not_part_of_number() {
        assert_eq!(
            token_kinds("-1 +2"),
            vec![
                TokenKind::Minus,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_malformed_numbers() {
        for input in ["12abc", "1e", "1.2.3", "9_000"] {
            let tokens = tokenize(input);
            assert_eq!(
                tokens[0].kind,
                TokenKind::Invalid(LexError::MalformedNumber),
                "input: {input}"
            );
            assert_eq!(tokens[0].text, input);
            assert!(tokens[1].is_eof());
        }
    }

    #[test]
    fn test_range_dots_stop_number() {
        assert_eq!(
            token_kinds("1..2"),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize("'hello' 'it''s' ''");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::String));
        assert_eq!(tokens[0].unquoted(), "hello");
        assert_eq!(tokens[1].unquoted(), "it's");
        assert_eq!(tokens[2].unquoted(), "");
    }

    #[test]
    fn test_string_preserves_case() {
        let tokens = tokenize("'MiXeD'");
        assert_eq!(tokens[0].text, "'MiXeD'");
    }

    #[test]
    fn test_unterminated_string_covers_rest_of_input() {
        let tokens = tokenize("SELECT 'abc FROM t");
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens[1].kind,
            TokenKind::Invalid(LexError::UnterminatedString)
        );
        assert_eq!(tokens[1].span, Span::new(7, 18));
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_dollar_quoted_strings() {
        let tokens = tokenize("$$a 'quoted' body$$ $fn$ x $$ y $fn$");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].unquoted(), "a 'quoted' body");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].unquoted(), " x $$ y ");
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_unterminated_dollar_string() {
        assert_eq!(
            token_kinds("$body$ never closed"),
            vec![
                TokenKind::Invalid(LexError::UnterminatedDollarString),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_blob() {
        let tokens = tokenize("X'48454C4C4F' x''");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(
            token_kinds("X'ABC'")[0],
            TokenKind::Invalid(LexError::InvalidBlob)
        );
        assert_eq!(
            token_kinds("X'zz'")[0],
            TokenKind::Invalid(LexError::InvalidBlob)
        );
        assert_eq!(
            token_kinds("X'AB")[0],
            TokenKind::Invalid(LexError::UnterminatedBlob)
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != <> < <= > >= || & | ~ << >> ::"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::BitAnd,
                TokenKind::BitOr,
                TokenKind::BitNot,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("( ) [ ] , ; . :"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_parameter_placeholders() {
        assert_eq!(texts("? ?1 $2 :name"), vec!["?", "?1", "$2", ":name", ""]);
        assert!(tokenize("? ?1 $2 :name")[..4]
            .iter()
            .all(|t| t.kind == TokenKind::Parameter));
        assert_eq!(
            token_kinds("$ x")[0],
            TokenKind::Invalid(LexError::InvalidParameter)
        );
    }

    #[test]
    fn test_unexpected_characters() {
        for input in ["!", "@", "#", "^", "\\", "\u{1F600}", "\u{0}"] {
            let tokens = tokenize(input);
            assert_eq!(
                tokens[0].kind,
                TokenKind::Invalid(LexError::UnexpectedCharacter),
                "input: {input:?}"
            );
            assert_eq!(tokens[0].span.len(), input.len());
            assert!(tokens[1].is_eof());
        }
    }

    #[test]
    fn test_lexing_continues_after_invalid_character() {
        assert_eq!(
            token_kinds("a # b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Invalid(LexError::UnexpectedCharacter),
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            token_kinds("SELECT id, name FROM users WHERE active = 1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
        assert_eq!(tokens[2].span, Span::at(9));
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("'é' x");
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 6));
    }
}
