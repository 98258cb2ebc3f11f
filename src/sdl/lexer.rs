//! Lexer for GraphQL SDL.
//!
//! Commas, whitespace, the byte-order mark, and `#` comments are insignificant
//! and skipped. String values are unescaped here so the parser only sees
//! their final text.

use super::SdlError;
use super::ast::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Name(String),
    Int(i64),
    Float(f64),
    String(String),
    /// A `"""` block string, already dedented.
    BlockString(String),
    Bang,
    Dollar,
    Amp,
    LParen,
    RParen,
    Spread,
    Colon,
    Equals,
    At,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Pipe,
    Eof,
}

impl TokenKind {
    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Name(name) => format!("name \"{name}\""),
            TokenKind::Int(value) => format!("integer {value}"),
            TokenKind::Float(value) => format!("float {value}"),
            TokenKind::String(_) | TokenKind::BlockString(_) => "string".to_string(),
            TokenKind::Bang => "\"!\"".to_string(),
            TokenKind::Dollar => "\"$\"".to_string(),
            TokenKind::Amp => "\"&\"".to_string(),
            TokenKind::LParen => "\"(\"".to_string(),
            TokenKind::RParen => "\")\"".to_string(),
            TokenKind::Spread => "\"...\"".to_string(),
            TokenKind::Colon => "\":\"".to_string(),
            TokenKind::Equals => "\"=\"".to_string(),
            TokenKind::At => "\"@\"".to_string(),
            TokenKind::LBracket => "\"[\"".to_string(),
            TokenKind::RBracket => "\"]\"".to_string(),
            TokenKind::LBrace => "\"{\"".to_string(),
            TokenKind::RBrace => "\"}\"".to_string(),
            TokenKind::Pipe => "\"|\"".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source.strip_prefix('\u{feff}').unwrap_or(source),
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the whole source, ending with a single `Eof` token.
    pub fn tokenize_all(source: &str) -> Result<Vec<Token>, SdlError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SdlError> {
        self.skip_ignored();

        let position = self.position();
        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        let kind = match c {
            '!' => self.single(TokenKind::Bang),
            '$' => self.single(TokenKind::Dollar),
            '&' => self.single(TokenKind::Amp),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ':' => self.single(TokenKind::Colon),
            '=' => self.single(TokenKind::Equals),
            '@' => self.single(TokenKind::At),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '|' => self.single(TokenKind::Pipe),
            '.' => {
                if self.rest.starts_with("...") {
                    self.advance_by(3);
                    TokenKind::Spread
                } else {
                    return Err(self.error_at(position, "unexpected character \".\""));
                }
            }
            '"' => {
                if self.rest.starts_with("\"\"\"") {
                    self.scan_block_string(position)?
                } else {
                    self.scan_string(position)?
                }
            }
            '-' => self.scan_number(position)?,
            c if c.is_ascii_digit() => self.scan_number(position)?,
            c if is_name_start(c) => self.scan_name(),
            c => {
                return Err(self.error_at(position, format!("unexpected character {c:?}")));
            }
        };

        Ok(Token { kind, position })
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error_at(&self, position: Position, message: impl Into<String>) -> SdlError {
        SdlError::Syntax {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\n' | '\r' | ',' => {
                    self.advance();
                }
                '#' => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_name(&mut self) -> TokenKind {
        let mut name = String::new();
        while let Some(c) = self.peek_char() {
            if !is_name_continue(c) {
                break;
            }
            name.push(c);
            self.advance();
        }
        TokenKind::Name(name)
    }

    fn scan_number(&mut self, start: Position) -> Result<TokenKind, SdlError> {
        let mut text = String::new();
        if self.peek_char() == Some('-') {
            text.push('-');
            self.advance();
        }

        let integer_start = text.len();
        self.take_digits(&mut text);
        if text.len() == integer_start {
            return Err(self.error_at(start, "expected digit after \"-\""));
        }
        if text[integer_start..].starts_with('0') && text.len() - integer_start > 1 {
            return Err(self.error_at(start, format!("invalid number \"{text}\": leading zero")));
        }

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            let before = text.len();
            self.take_digits(&mut text);
            if text.len() == before {
                return Err(self.error_at(start, format!("invalid number \"{text}\"")));
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            text.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                text.push(sign);
                self.advance();
            }
            let before = text.len();
            self.take_digits(&mut text);
            if text.len() == before {
                return Err(self.error_at(start, format!("invalid number \"{text}\"")));
            }
        }
        if self.peek_char().is_some_and(|c| is_name_start(c) || c == '.') {
            return Err(self.error_at(start, format!("invalid number \"{text}\"")));
        }

        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|e| self.error_at(start, format!("invalid float \"{text}\": {e}")))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|e| self.error_at(start, format!("invalid integer \"{text}\": {e}")))
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    fn scan_string(&mut self, start: Position) -> Result<TokenKind, SdlError> {
        self.advance();
        let mut value = String::new();
        loop {
            let Some(c) = self.advance() else {
                return Err(self.error_at(start, "unterminated string"));
            };
            match c {
                '"' => return Ok(TokenKind::String(value)),
                '\n' | '\r' => return Err(self.error_at(start, "unterminated string")),
                '\\' => {
                    let escape_position = self.position();
                    let Some(escaped) = self.advance() else {
                        return Err(self.error_at(start, "unterminated string"));
                    };
                    match escaped {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        '/' => value.push('/'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'u' => value.push(self.scan_unicode_escape(escape_position)?),
                        other => {
                            return Err(self.error_at(
                                escape_position,
                                format!("invalid escape sequence \"\\{other}\""),
                            ));
                        }
                    }
                }
                c => value.push(c),
            }
        }
    }

    fn scan_unicode_escape(&mut self, start: Position) -> Result<char, SdlError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .advance()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error_at(start, "invalid unicode escape sequence"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code)
            .ok_or_else(|| self.error_at(start, format!("invalid unicode scalar \\u{code:04x}")))
    }

    fn scan_block_string(&mut self, start: Position) -> Result<TokenKind, SdlError> {
        self.advance_by(3);
        let mut raw = String::new();
        loop {
            if self.rest.starts_with("\\\"\"\"") {
                raw.push_str("\"\"\"");
                self.advance_by(4);
                continue;
            }
            if self.rest.starts_with("\"\"\"") {
                self.advance_by(3);
                return Ok(TokenKind::BlockString(dedent_block_string(&raw)));
            }
            match self.advance() {
                Some(c) => raw.push(c),
                None => return Err(self.error_at(start, "unterminated block string")),
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Removes the common indentation and surrounding blank lines of a block string.
fn dedent_block_string(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                *line
            } else if line.trim().is_empty() {
                ""
            } else {
                &line[common_indent..]
            }
        })
        .collect();

    while dedented.first().is_some_and(|line| line.trim().is_empty()) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|line| line.trim().is_empty()) {
        dedented.pop();
    }

    dedented.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize_all(source)
            .expect("source should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[rstest]
    fn test_punctuation_and_names() {
        assert_eq!(
            kinds("type User @sql { id: Int! }"),
            vec![
                TokenKind::Name("type".into()),
                TokenKind::Name("User".into()),
                TokenKind::At,
                TokenKind::Name("sql".into()),
                TokenKind::LBrace,
                TokenKind::Name("id".into()),
                TokenKind::Colon,
                TokenKind::Name("Int".into()),
                TokenKind::Bang,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[rstest]
    fn test_commas_and_comments_are_ignored() {
        assert_eq!(
            kinds("a, b # trailing comment\n, c"),
            vec![
                TokenKind::Name("a".into()),
                TokenKind::Name("b".into()),
                TokenKind::Name("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[rstest]
    #[case("0", TokenKind::Int(0))]
    #[case("-42", TokenKind::Int(-42))]
    #[case("1.5", TokenKind::Float(1.5))]
    #[case("2e3", TokenKind::Float(2000.0))]
    fn test_numbers(#[case] source: &str, #[case] expected: TokenKind) {
        assert_eq!(kinds(source), vec![expected, TokenKind::Eof]);
    }

    #[rstest]
    #[case("012")]
    #[case("1.")]
    #[case("-")]
    #[case("3abc")]
    fn test_invalid_numbers(#[case] source: &str) {
        assert!(Lexer::tokenize_all(source).is_err());
    }

    #[rstest]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\nb \"q\" \u0041""#),
            vec![TokenKind::String("a\nb \"q\" A".into()), TokenKind::Eof]
        );
    }

    #[rstest]
    fn test_string_passes_sql_through() {
        assert_eq!(
            kinds(r#""ALWAYS AS (data->>'$.test')""#),
            vec![
                TokenKind::String("ALWAYS AS (data->>'$.test')".into()),
                TokenKind::Eof
            ]
        );
    }

    #[rstest]
    fn test_unterminated_string_reports_position() {
        let err = Lexer::tokenize_all("\n  \"abc").unwrap_err();
        assert_eq!(err.to_string(), "syntax error at 2:3: unterminated string");
    }

    #[rstest]
    fn test_block_string_is_dedented() {
        let source = "\"\"\"\n    First line\n      indented\n    last\n  \"\"\"";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::BlockString("First line\n  indented\nlast".into()),
                TokenKind::Eof
            ]
        );
    }

    #[rstest]
    fn test_positions_track_lines() {
        let tokens = Lexer::tokenize_all("type\n  User").unwrap();
        assert_eq!(tokens[1].position, Position { line: 2, column: 3 });
    }

    #[rstest]
    fn test_unexpected_character() {
        let err = Lexer::tokenize_all("type ?").unwrap_err();
        assert!(err.to_string().contains("unexpected character '?'"));
    }
}
