use thiserror::Error;

use crate::{
    ast::{Position, Token, TokenKind},
    grammar::Grammar,
};

/// Errors raised while splitting source text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("unterminated comment starting at {position}")]
    UnterminatedComment { position: Position },

    #[error("invalid escape sequence \\{ch} at {position}")]
    InvalidEscape { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::UnterminatedComment { position }
            | LexError::InvalidEscape { position, .. } => *position,
        }
    }
}

/// Lazy token stream over one source string.
///
/// Whitespace and comments are produced as tokens too, so the consumer can
/// count line breaks. After the first error the stream ends.
pub struct Lexer<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
    position: Position,
    failed: bool,
}

impl<'g, 's> Lexer<'g, 's> {
    pub fn new(grammar: &'g Grammar, source: &'s str) -> Self {
        Lexer {
            grammar,
            source,
            position: Position::start(),
            failed: false,
        }
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        self.position
    }

    fn rest(&self) -> &'s str {
        &self.source[self.position.offset..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position.offset += ch.len_utf8();
            if ch == '\n' {
                self.position.line += 1;
                self.position.col = 1;
            } else {
                self.position.col += 1;
            }
        }
    }

    fn advance_by(&mut self, chars: usize) {
        for _ in 0..chars {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_comment(&mut self, start: Position) -> Result<(), LexError> {
        self.advance(); // consume '/'
        if self.current_char() == Some('/') {
            while let Some(ch) = self.current_char() {
                if ch == '\n' {
                    break;
                }
                self.advance();
            }
            return Ok(());
        }

        self.advance(); // consume '*'
        loop {
            match self.current_char() {
                Some('*') if self.peek_char(1) == Some('/') => {
                    self.advance_by(2);
                    return Ok(());
                }
                Some(_) => self.advance(),
                None => return Err(LexError::UnterminatedComment { position: start }),
            }
        }
    }

    fn read_string(&mut self, quote: char, start: Position) -> Result<String, LexError> {
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = self.position;
                    self.advance(); // consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: escape_at,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Operators and punctuation, longest match first.
    fn read_symbol(&self) -> Option<(TokenKind, usize)> {
        let two = match (self.current_char()?, self.peek_char(1)) {
            ('&', Some('&')) => Some(TokenKind::And),
            ('|', Some('|')) => Some(TokenKind::Or),
            ('*', Some('*')) => Some(TokenKind::Power),
            ('=', Some('=')) => Some(TokenKind::EqEq),
            ('!', Some('=')) => Some(TokenKind::NotEq),
            ('<', Some('=')) => Some(TokenKind::LtEq),
            ('>', Some('=')) => Some(TokenKind::GtEq),
            ('+', Some('=')) => Some(TokenKind::AddAssign),
            ('-', Some('=')) => Some(TokenKind::SubAssign),
            _ => None,
        };
        if let Some(kind) = two {
            return Some((kind, 2));
        }

        let one = match self.current_char()? {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '@' => TokenKind::At,
            '?' => TokenKind::Question,
            '!' => TokenKind::Not,
            '=' => TokenKind::Assign,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Power,
            '&' => TokenKind::Concat,
            _ => return None,
        };
        Some((one, 1))
    }

    /// Reads the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let start = self.position;
        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let (kind, value) = match ch {
            c if c.is_whitespace() => {
                self.skip_whitespace();
                (TokenKind::Whitespace, None)
            }
            '/' if matches!(self.peek_char(1), Some('/') | Some('*')) => {
                self.read_comment(start)?;
                (TokenKind::Comment, None)
            }
            '"' | '\'' => {
                let value = self.read_string(ch, start)?;
                (TokenKind::String, Some(value))
            }
            c if c.is_ascii_digit() => {
                let len = self
                    .grammar
                    .match_number(self.rest())
                    .ok_or(LexError::UnexpectedCharacter { ch, position: start })?;
                // Numbers are ASCII, byte length equals char count
                self.advance_by(len);
                (TokenKind::Number, None)
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let len = self
                    .grammar
                    .match_name(self.rest())
                    .ok_or(LexError::UnexpectedCharacter { ch, position: start })?;
                let word = &self.rest()[..len];
                let kind = self.grammar.word(word).unwrap_or(TokenKind::Name);
                self.advance_by(len);
                (kind, None)
            }
            _ => {
                let (kind, len) = self
                    .read_symbol()
                    .ok_or(LexError::UnexpectedCharacter { ch, position: start })?;
                self.advance_by(len);
                (kind, None)
            }
        };

        let text = &self.source[start.offset..self.position.offset];
        Ok(Some(Token {
            kind,
            value: value.unwrap_or_else(|| text.to_string()),
            text: text.to_string(),
            position: start,
            line_breaks: text.matches('\n').count(),
        }))
    }

    /// Collects the remaining tokens, trivia included.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
fn kinds(source: &str) -> Vec<TokenKind> {
    let grammar = Grammar::new();
    Lexer::new(&grammar, source)
        .map(|t| t.unwrap().kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn test_keywords() {
    use crate::ast::Keyword;

    assert_eq!(
        kinds("collection function or not true false"),
        vec![
            TokenKind::Keyword(Keyword::Collection),
            TokenKind::Keyword(Keyword::Function),
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Boolean,
            TokenKind::Boolean,
        ]
    );
}

#[test]
fn test_field_declaration() {
    assert_eq!(
        kinds("age: number!;"),
        vec![
            TokenKind::Name,
            TokenKind::Colon,
            TokenKind::Name,
            TokenKind::Not,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_stops_after_error() {
    let grammar = Grammar::new();
    let mut lexer = Lexer::new(&grammar, "a # b");
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}
