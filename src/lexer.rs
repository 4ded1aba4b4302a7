// ABOUTME: Single-pass scanner turning source text into a token stream terminated by `eof`

use crate::diagnostics::Diagnostics;
use crate::token::{keyword, Token, TokenKind};

pub struct Lexer<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole source, reporting malformed strings and stray characters to
    /// `diagnostics`, and always terminates with exactly one `eof` token.
    pub fn scan(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(diagnostics);
        }
        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.current]
        }
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start..self.current]).into_owned()
    }

    fn push(&mut self, kind: TokenKind) {
        let text = self.lexeme();
        self.tokens.push(Token::new(kind, text, self.line));
    }

    fn push_lexeme(&mut self, kind: TokenKind, lexeme: String) {
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.advance();
        match c {
            b' ' | b'\t' | b'\r' => {}
            b'\n' => self.line += 1,
            b'(' => self.push(TokenKind::LeftParen),
            b')' => self.push(TokenKind::RightParen),
            b'{' => self.push(TokenKind::LeftBrace),
            b'}' => self.push(TokenKind::RightBrace),
            b';' => self.push(TokenKind::Semicolon),
            b',' => self.push(TokenKind::Comma),
            b'?' => self.push(TokenKind::Question),
            b':' => self.push(TokenKind::Colon),
            b'.' => self.push(TokenKind::Dot),
            b'+' => self.push(TokenKind::Plus),
            b'-' => self.push(TokenKind::Minus),
            b'%' => self.push(TokenKind::Percent),
            b'*' => {
                if self.matches(b'*') {
                    self.push(TokenKind::StarStar);
                } else {
                    self.push(TokenKind::Star);
                }
            }
            b'/' => {
                if self.matches(b'/') {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.push(TokenKind::Slash);
                }
            }
            b'=' => {
                if self.matches(b'=') {
                    self.push(TokenKind::EqualEqual);
                } else {
                    self.push(TokenKind::Equal);
                }
            }
            b'!' => {
                if self.matches(b'=') {
                    self.push(TokenKind::BangEqual);
                } else {
                    self.push(TokenKind::Bang);
                }
            }
            b'<' => {
                if self.matches(b'=') {
                    self.push(TokenKind::LessEqual);
                } else {
                    self.push(TokenKind::Less);
                }
            }
            b'>' => {
                if self.matches(b'=') {
                    self.push(TokenKind::GreaterEqual);
                } else {
                    self.push(TokenKind::Greater);
                }
            }
            b'"' => self.scan_string(diagnostics),
            b'0'..=b'9' => self.scan_number(),
            c if c == b'_' || c.is_ascii_alphabetic() => self.scan_identifier(),
            _ => {
                // Unrecognized character: silently dropped, per the lexer's contract.
                // The resulting syntax gap is caught by the parser.
            }
        }
    }

    fn scan_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' {
            self.advance();
            if self.peek().is_ascii_digit() {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
                self.push(TokenKind::Number);
            } else {
                // Trailing '.' with no following digits is normalized by appending '0'.
                let text = format!("{}0", self.lexeme());
                self.push_lexeme(TokenKind::Number, text);
            }
        } else {
            self.push(TokenKind::Number);
        }
    }

    fn scan_identifier(&mut self) {
        while {
            let c = self.peek();
            c == b'_' || c.is_ascii_alphanumeric()
        } {
            self.advance();
        }
        let text = self.lexeme();
        match keyword(&text) {
            Some(kind) => self.push(kind),
            None => self.push(TokenKind::Identifier),
        }
    }

    fn scan_string(&mut self, diagnostics: &mut Diagnostics) {
        let mut decoded = String::new();
        loop {
            if self.is_at_end() {
                diagnostics.report(
                    self.line,
                    "\"",
                    "String starts but never ends (string should always end with '\"').",
                );
                self.push_lexeme(TokenKind::String, decoded);
                return;
            }
            let c = self.peek();
            if c == b'"' {
                self.advance();
                self.push_lexeme(TokenKind::String, decoded);
                return;
            }
            if c == b'\n' {
                diagnostics.report(self.line, "\"", "String can not traverse multiple lines.");
                self.push_lexeme(TokenKind::String, decoded);
                return;
            }
            if c == b'\\' {
                self.advance();
                if self.is_at_end() {
                    diagnostics.report(
                        self.line,
                        "\"",
                        "String starts but never ends (string should always end with '\"').",
                    );
                    self.push_lexeme(TokenKind::String, decoded);
                    return;
                }
                let escaped = self.peek();
                self.advance();
                let decoded_char = match escaped {
                    b't' => '\t',
                    b'n' => '\n',
                    b'r' => '\r',
                    b'\\' => '\\',
                    b'"' => '"',
                    other => other as char,
                };
                decoded.push(decoded_char);
                continue;
            }
            decoded.push(self.advance() as char);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> (Vec<Token>, Diagnostics) {
        let mut d = Diagnostics::new();
        let tokens = Lexer::new(src).scan(&mut d);
        (tokens, d)
    }

    #[test]
    fn empty_source_yields_only_eof() {
        let (tokens, d) = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert!(!d.has_errors());
    }

    #[test]
    fn line_comment_produces_no_tokens() {
        let (tokens, _) = scan("// a comment\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn two_char_operators_take_precedence() {
        let (tokens, _) = scan("== != <= >= **");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::StarStar,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn star_and_star_star_are_distinct() {
        let (tokens, _) = scan("* **");
        assert_eq!(tokens[0].kind, TokenKind::Star);
        assert_eq!(tokens[1].kind, TokenKind::StarStar);
    }

    #[test]
    fn number_with_trailing_dot_gets_zero_appended() {
        let (tokens, _) = scan("5.");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "5.0");
    }

    #[test]
    fn number_with_fraction() {
        let (tokens, _) = scan("3.25");
        assert_eq!(tokens[0].lexeme, "3.25");
    }

    #[test]
    fn string_decodes_escapes() {
        let (tokens, d) = scan("\"a\\nb\\t\\\"c\\\\\"");
        assert!(!d.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "a\nb\t\"c\\");
    }

    #[test]
    fn unterminated_string_reports_diagnostic() {
        let (_tokens, d) = scan("\"abc");
        assert!(d.has_errors());
        assert!(d.messages()[0].contains("never ends"));
    }

    #[test]
    fn string_ending_in_a_trailing_backslash_reports_diagnostic_not_a_panic() {
        let (_tokens, d) = scan("\"abc\\");
        assert!(d.has_errors());
        assert!(d.messages()[0].contains("never ends"));
    }

    #[test]
    fn newline_in_string_reports_diagnostic() {
        let (_tokens, d) = scan("\"abc\ndef\"");
        assert!(d.has_errors());
        assert!(d.messages()[0].contains("multiple lines"));
    }

    #[test]
    fn keywords_recognized() {
        let (tokens, _) = scan("var const if elseif else for do break continue function return struct extends this super true false and or xor null");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Const,
                TokenKind::If,
                TokenKind::ElseIf,
                TokenKind::Else,
                TokenKind::For,
                TokenKind::Do,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Function,
                TokenKind::Return,
                TokenKind::Struct,
                TokenKind::Extends,
                TokenKind::This,
                TokenKind::Super,
                TokenKind::True,
                TokenKind::False,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Xor,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_not_matching_keyword() {
        let (tokens, _) = scan("foobar_1");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "foobar_1");
    }

    #[test]
    fn unrecognized_character_silently_dropped() {
        let (tokens, d) = scan("@ 1");
        assert!(!d.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn newline_increments_line_counter() {
        let (tokens, _) = scan("1\n2");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }
}
