use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{
        Direction, IndexField, Keyword, Node, NodeKind, Number, Op, Position, Primitive, Token,
        TokenKind, UnaryKind,
    },
    grammar::{Grammar, Level},
    lexer::{LexError, Lexer},
};

/// Errors raised while parsing source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{error}\n{snippet}")]
    Lex {
        #[source]
        error: LexError,
        snippet: String,
    },

    #[error(
        "syntax error at {position}: unexpected {kind} token {value:?}{}\n{snippet}",
        expected_list(.expected)
    )]
    UnexpectedToken {
        kind: TokenKind,
        value: String,
        position: Position,
        expected: Vec<String>,
        snippet: String,
    },

    #[error("syntax error at {position}: unexpected end of input{}", expected_list(.expected))]
    UnexpectedEnd {
        position: Position,
        expected: Vec<String>,
    },

    #[error("invalid assignment target at {position}\n{snippet}")]
    InvalidAssignmentTarget { position: Position, snippet: String },

    #[error("nesting deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex { error, .. } => error.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::InvalidAssignmentTarget { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }

    /// Token descriptions that would have been accepted where parsing failed.
    pub fn expected(&self) -> &[String] {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEnd { expected, .. } => expected,
            _ => &[],
        }
    }
}

fn expected_list(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected one of: {}", expected.join(", "))
    }
}

/// Renders the source line of `position` with a caret under the column.
pub fn snippet(source: &str, position: Position) -> String {
    let line = source
        .lines()
        .nth(position.line.saturating_sub(1))
        .unwrap_or("");
    let number = position.line.to_string();
    format!(
        "{} | {}\n{} | {}^",
        number,
        line,
        " ".repeat(number.len()),
        " ".repeat(position.col.saturating_sub(1))
    )
}

/// A point where a line break could have ended the statement but the parser
/// continued the expression instead.
///
/// `a\n(b)` is read as the call `a(b)`, never as `a` followed by `(b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ambiguity {
    pub position: Position,
    pub token: TokenKind,
}

/// Result of [`Parser::parse_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub nodes: Vec<Node>,
    pub ambiguities: Vec<Ambiguity>,
}

/// Maximum nesting of expressions and blocks before parsing gives up.
pub const MAX_DEPTH: usize = 64;

struct Lexed {
    token: Token,
    newline_before: bool,
}

pub struct Parser<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
    tokens: Vec<Lexed>,
    cursor: usize,
    prev_end: usize,
    end: Position,
    expected: Vec<&'static str>,
    ambiguities: Vec<Ambiguity>,
    depth: usize,
}

impl<'g, 's> Parser<'g, 's> {
    pub fn new(grammar: &'g Grammar, source: &'s str) -> Self {
        Parser {
            grammar,
            source,
            tokens: Vec::new(),
            cursor: 0,
            prev_end: 0,
            end: Position::start(),
            expected: Vec::new(),
            ambiguities: Vec::new(),
            depth: 0,
        }
    }

    fn load(&mut self) -> Result<(), ParseError> {
        let mut lexer = Lexer::new(self.grammar, self.source);
        let mut tokens = Vec::new();
        let mut newline_before = false;

        for token in lexer.by_ref() {
            let token = token.map_err(|error| ParseError::Lex {
                snippet: snippet(self.source, error.position()),
                error,
            })?;
            if token.kind.is_trivia() {
                newline_before |= token.line_breaks > 0;
                continue;
            }
            tokens.push(Lexed {
                token,
                newline_before,
            });
            newline_before = false;
        }

        trace!(tokens = tokens.len(), "lexed source");
        self.end = lexer.position();
        self.tokens = tokens;
        self.cursor = 0;
        self.prev_end = 0;
        self.expected.clear();
        self.ambiguities.clear();
        self.depth = 0;
        Ok(())
    }

    /// Parses a whole source text into its top-level statements.
    pub fn parse(&mut self) -> Result<Vec<Node>, ParseError> {
        self.parse_detailed().map(|output| output.nodes)
    }

    /// Like [`parse`](Self::parse), also reporting every ambiguous line break
    /// the parser resolved by continuing an expression.
    pub fn parse_detailed(&mut self) -> Result<ParseOutput, ParseError> {
        self.load()?;
        let nodes = self.parse_root()?;

        debug!(
            statements = nodes.len(),
            ambiguities = self.ambiguities.len(),
            "parsed source"
        );
        Ok(ParseOutput {
            nodes,
            ambiguities: std::mem::take(&mut self.ambiguities),
        })
    }

    /// Parses a source text holding exactly one expression.
    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.load()?;
        let node = self.expression()?;
        if self.peek().is_some() {
            return Err(self.error_here());
        }
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Lexed> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|lexed| lexed.token.kind)
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            true
        } else {
            self.expecting(kind.describe());
            false
        }
    }

    fn expecting(&mut self, what: &'static str) {
        if !self.expected.contains(&what) {
            self.expected.push(what);
        }
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.cursor].token.clone();
        self.cursor += 1;
        self.prev_end = token.position.offset + token.text.len();
        self.expected.clear();
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.eat(kind).ok_or_else(|| self.error_here())
    }

    fn skip_semicolons(&mut self) {
        while self.eat(TokenKind::Semicolon).is_some() {}
    }

    /// Records an ambiguity when the next token sits on a new line.
    fn note_continuation(&mut self) {
        if let Some(lexed) = self.peek().filter(|lexed| lexed.newline_before) {
            let ambiguity = Ambiguity {
                position: lexed.token.position,
                token: lexed.token.kind,
            };
            debug!(
                line = ambiguity.position.line,
                col = ambiguity.position.col,
                token = %ambiguity.token,
                "line break before expression continuation, continuing expression"
            );
            self.ambiguities.push(ambiguity);
        }
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            let position = self.peek().map_or(self.end, |lexed| lexed.token.position);
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn error_here(&self) -> ParseError {
        let expected = self.expected.iter().map(|s| s.to_string()).collect();
        match self.peek() {
            Some(lexed) => ParseError::UnexpectedToken {
                kind: lexed.token.kind,
                value: lexed.token.value.clone(),
                position: lexed.token.position,
                expected,
                snippet: snippet(self.source, lexed.token.position),
            },
            None => ParseError::UnexpectedEnd {
                position: self.end,
                expected,
            },
        }
    }

    fn unexpected(&self, token: &Token, expected: &[&str]) -> ParseError {
        ParseError::UnexpectedToken {
            kind: token.kind,
            value: token.value.clone(),
            position: token.position,
            expected: expected.iter().map(|s| s.to_string()).collect(),
            snippet: snippet(self.source, token.position),
        }
    }

    /// Builds a node spanning from `start` to the last consumed token.
    fn finish(&self, kind: NodeKind, start: Position) -> Node {
        let text = self.source.get(start.offset..self.prev_end).unwrap_or("");
        let mut node = Node::new(kind, start);
        node.line_breaks = text.matches('\n').count();
        node.text = text.to_string();
        node
    }

    fn operator(&self, token: &Token) -> Result<Node, ParseError> {
        let op = Op::from_token(token.kind).ok_or_else(|| self.unexpected(token, &["operator"]))?;
        let mut node = Node::new(NodeKind::Operator(op), token.position);
        node.text = token.text.clone();
        Ok(node)
    }

    /// Comma separated items up to `close`; a trailing comma is allowed.
    fn parse_list<T>(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close).is_some() {
                break;
            }
            items.push(item(self)?);
            if self.eat(TokenKind::Comma).is_none() {
                self.expect(close)?;
                break;
            }
        }
        Ok(items)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_root(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        self.skip_semicolons();
        while self.peek().is_some() {
            nodes.push(self.parse_root_statement()?);
            self.skip_semicolons();
        }

        if nodes.is_empty() {
            self.expecting("statement");
            return Err(self.error_here());
        }
        Ok(nodes)
    }

    fn parse_root_statement(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Collection)) => self.parse_collection(),
            Some(TokenKind::Keyword(Keyword::Function)) => self.parse_function(),
            _ => self.parse_statement(),
        }
    }

    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),
            Some(TokenKind::Keyword(Keyword::Const)) => self.parse_const(),
            Some(TokenKind::Keyword(Keyword::Let)) => self.parse_let(),
            Some(TokenKind::Keyword(Keyword::Return)) => self.parse_return(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<Node, ParseError> {
        let left = self.expression()?;

        let is_assignment = [TokenKind::Assign, TokenKind::AddAssign, TokenKind::SubAssign]
            .into_iter()
            .any(|kind| self.check(kind));
        if !is_assignment {
            return Ok(left);
        }

        if !left.is_assignable() {
            return Err(ParseError::InvalidAssignmentTarget {
                position: left.position,
                snippet: snippet(self.source, left.position),
            });
        }

        let start = left.position;
        let token = self.bump();
        let op = self.operator(&token)?;
        let right = self.expression()?;
        Ok(self.finish(
            NodeKind::Assign {
                left: Box::new(left),
                op: Box::new(op),
                right: Box::new(right),
            },
            start,
        ))
    }

    fn parse_block(&mut self) -> Result<Vec<Node>, ParseError> {
        self.nested(Self::parse_block_inner)
    }

    fn parse_block_inner(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut body = Vec::new();

        self.skip_semicolons();
        while !self.check(TokenKind::RBrace) {
            if self.peek().is_none() {
                return Err(self.error_here());
            }
            body.push(self.parse_statement()?);
            self.skip_semicolons();
        }

        self.expect(TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_if(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'if'
        let expression = self.expression()?;
        let body = self.parse_block()?;

        let mut elses = Vec::new();
        while let Some(token) = self.eat(TokenKind::Keyword(Keyword::Else)) {
            if self.eat(TokenKind::Keyword(Keyword::If)).is_some() {
                let expression = self.expression()?;
                let body = self.parse_block()?;
                elses.push(self.finish(
                    NodeKind::ElseIf {
                        expression: Box::new(expression),
                        body,
                    },
                    token.position,
                ));
            } else {
                let body = self.parse_block()?;
                elses.push(self.finish(NodeKind::Else { body }, token.position));
                break;
            }
        }

        Ok(self.finish(
            NodeKind::If {
                expression: Box::new(expression),
                body,
                elses,
            },
            start,
        ))
    }

    fn parse_const(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'const'
        let name = self.expect(TokenKind::Name)?.value;
        self.expect(TokenKind::Assign)?;
        let value = self.expression()?;
        Ok(self.finish(
            NodeKind::Const {
                name,
                value: Box::new(value),
            },
            start,
        ))
    }

    fn parse_let(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'let'
        let name = self.expect(TokenKind::Name)?.value;
        let value = match self.eat(TokenKind::Assign) {
            Some(_) => Some(Box::new(self.expression()?)),
            None => None,
        };
        Ok(self.finish(NodeKind::Let { name, value }, start))
    }

    fn parse_return(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'return'
        let value = match self.peek_kind() {
            None | Some(TokenKind::RBrace) | Some(TokenKind::Semicolon) => None,
            Some(_) => Some(Box::new(self.expression()?)),
        };
        Ok(self.finish(NodeKind::Return { value }, start))
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_collection(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'collection'
        let name = self.expect(TokenKind::Name)?.value;
        self.expect(TokenKind::LBrace)?;

        let mut items = Vec::new();
        self.skip_semicolons();
        while !self.check(TokenKind::RBrace) {
            let item = match self.peek_kind() {
                Some(TokenKind::Keyword(Keyword::Function)) => self.parse_function()?,
                Some(TokenKind::At) => self.parse_index()?,
                Some(TokenKind::Name) => self.parse_field()?,
                _ => {
                    self.expecting("function");
                    self.expecting("\"@\"");
                    self.expecting("name");
                    return Err(self.error_here());
                }
            };
            items.push(item);
            self.skip_semicolons();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(self.finish(NodeKind::Collection { name, items }, start))
    }

    /// `name: type`, `name: type!` or the shorthand `name type`.
    fn parse_field(&mut self) -> Result<Node, ParseError> {
        let token = self.bump();
        self.eat(TokenKind::Colon);
        let field_type = self.parse_type()?;
        let required = self.eat(TokenKind::Not).is_some();

        Ok(self.finish(
            NodeKind::Field {
                name: token.value,
                field_type,
                required,
            },
            token.position,
        ))
    }

    /// A type name, optionally followed by `[]`.
    fn parse_type(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect(TokenKind::Name)?.value;
        if self.eat(TokenKind::LBracket).is_some() {
            self.expect(TokenKind::RBracket)?;
            name.push_str("[]");
        }
        Ok(name)
    }

    fn parse_index(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume '@'
        let directive = self.expect(TokenKind::Name)?;
        if directive.value != "index" {
            return Err(self.unexpected(&directive, &["index"]));
        }

        self.expect(TokenKind::LParen)?;
        let fields = self.parse_list(TokenKind::RParen, Self::parse_index_field)?;

        Ok(self.finish(NodeKind::Index { fields }, start))
    }

    fn parse_index_field(&mut self) -> Result<IndexField, ParseError> {
        if self.eat(TokenKind::LBracket).is_none() {
            let name = self.expect(TokenKind::Name)?.value;
            return Ok(IndexField {
                name,
                direction: None,
            });
        }

        let name = self.expect(TokenKind::Name)?.value;
        let mut direction = None;
        if self.eat(TokenKind::Comma).is_some() {
            let token = self.expect(TokenKind::Name)?;
            direction = Some(match token.value.as_str() {
                "asc" => Direction::Asc,
                "desc" => Direction::Desc,
                _ => return Err(self.unexpected(&token, &["asc", "desc"])),
            });
        }
        self.expect(TokenKind::RBracket)?;

        Ok(IndexField { name, direction })
    }

    fn parse_function(&mut self) -> Result<Node, ParseError> {
        let start = self.bump().position; // consume 'function'
        let name = self.expect(TokenKind::Name)?.value;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_list(TokenKind::RParen, Self::parse_param)?;
        let body = self.parse_block()?;

        Ok(self.finish(NodeKind::Function { name, params, body }, start))
    }

    /// `name`, `name?`, `name: type`, `name?: type`
    fn parse_param(&mut self) -> Result<Node, ParseError> {
        let token = self.expect(TokenKind::Name)?;
        let optional = self.eat(TokenKind::Question).is_some();
        let param_type = match self.eat(TokenKind::Colon) {
            Some(_) => Some(self.parse_type()?),
            None => None,
        };

        Ok(self.finish(
            NodeKind::Param {
                name: token.value,
                param_type,
                optional,
            },
            token.position,
        ))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expression(&mut self) -> Result<Node, ParseError> {
        self.nested(|parser| parser.parse_level(0))
    }

    /// Precedence climbing over the grammar's level table.
    fn parse_level(&mut self, index: usize) -> Result<Node, ParseError> {
        let grammar = self.grammar;
        let Some(level) = grammar.levels().get(index) else {
            return self.parse_postfix();
        };

        match level {
            Level::Binary { kind, operators } => {
                let mut left = self.parse_level(index + 1)?;

                while self.peek_kind().is_some_and(|k| operators.contains(&k)) {
                    self.note_continuation();
                    let start = left.position;
                    let token = self.bump();
                    let op = self.operator(&token)?;
                    let right = self.parse_operand(index + 1)?;

                    left = self.finish(
                        NodeKind::Binary {
                            kind: *kind,
                            left: Box::new(left),
                            op: Box::new(op),
                            right: Box::new(right),
                        },
                        start,
                    );
                }
                Ok(left)
            }
            Level::Unary { operators } => {
                let unary = self
                    .peek_kind()
                    .and_then(|k| operators.iter().find(|(kind, _)| *kind == k))
                    .map(|(_, unary)| *unary);

                let Some(unary) = unary else {
                    return self.parse_level(index + 1);
                };

                let start = self.bump().position;
                let value = Box::new(self.nested(|parser| parser.parse_level(index))?);
                let kind = match unary {
                    UnaryKind::Not => NodeKind::Not { value },
                    UnaryKind::Negate => NodeKind::Negate { value },
                };
                Ok(self.finish(kind, start))
            }
        }
    }

    /// Right operand of a binary operator at `index`.
    ///
    /// A prefix operator of a looser unary level is still accepted, so
    /// `2 ^ -1` is `2 ^ (-1)`. The operand then extends as far as that unary
    /// level allows: `a ^ -b ^ c` is `a ^ -(b ^ c)`.
    fn parse_operand(&mut self, index: usize) -> Result<Node, ParseError> {
        let grammar = self.grammar;
        let Some(next) = self.peek_kind() else {
            return self.parse_level(index);
        };

        let unary = grammar.levels()[..index]
            .iter()
            .rposition(|level| match level {
                Level::Unary { operators } => operators.iter().any(|(kind, _)| *kind == next),
                Level::Binary { .. } => false,
            });

        self.parse_level(unary.unwrap_or(index))
    }

    /// Atom followed by any chain of `.name`, `[key]` and `(args)`.
    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_atom()?;

        loop {
            let start = node.position;
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.note_continuation();
                    self.bump();
                    let name = self.expect(TokenKind::Name)?.value;
                    node = self.finish(NodeKind::Name(name), start).with_prefix(node);
                }
                Some(TokenKind::LBracket) => {
                    self.note_continuation();
                    self.bump();
                    let key = self.expression()?;
                    self.expect(TokenKind::RBracket)?;
                    node = self.bracketed(key, node, start);
                }
                Some(TokenKind::LParen) => {
                    self.note_continuation();
                    self.bump();
                    let args = self.parse_list(TokenKind::RParen, Self::expression)?;
                    node = self.finish(NodeKind::Call { args }, start).with_prefix(node);
                }
                _ => {
                    self.expecting("\".\"");
                    self.expecting("\"[\"");
                    self.expecting("\"(\"");
                    break;
                }
            }
        }
        Ok(node)
    }

    /// `object[key]` becomes the key node itself, flagged `bracket`, chained
    /// from `object`. A key that already carries a prefix, a bracket or
    /// parentheses is wrapped in a `Computed` node so those are kept.
    fn bracketed(&self, key: Node, object: Node, start: Position) -> Node {
        let mut node = if key.prefix.is_some() || key.bracket || key.parenthesized {
            let kind = NodeKind::Computed {
                expression: Box::new(key),
            };
            Node::new(kind, start)
        } else {
            key
        };

        let text = self.source.get(start.offset..self.prev_end).unwrap_or("");
        node.position = start;
        node.line_breaks = text.matches('\n').count();
        node.text = text.to_string();
        node.bracket = true;
        node.with_prefix(object)
    }

    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        let Some(kind) = self.peek_kind() else {
            self.expecting("expression");
            return Err(self.error_here());
        };

        match kind {
            TokenKind::Number => {
                let token = self.bump();
                let value = Number::from(token.value);
                Ok(self.finish(NodeKind::Primitive(Primitive::Number(value)), token.position))
            }
            TokenKind::String => {
                let token = self.bump();
                Ok(self.finish(
                    NodeKind::Primitive(Primitive::String(token.value)),
                    token.position,
                ))
            }
            TokenKind::Boolean => {
                let token = self.bump();
                let value = token.value == "true";
                Ok(self.finish(NodeKind::Primitive(Primitive::Boolean(value)), token.position))
            }
            TokenKind::Name => {
                let token = self.bump();
                Ok(self.finish(NodeKind::Name(token.value), token.position))
            }
            TokenKind::LBracket => {
                let start = self.bump().position;
                let items = self.parse_list(TokenKind::RBracket, Self::expression)?;
                Ok(self.finish(NodeKind::Array { items }, start))
            }
            TokenKind::LBrace => {
                let start = self.bump().position;
                let entries = self.parse_list(TokenKind::RBrace, Self::parse_object_entry)?;
                Ok(self.finish(NodeKind::Object { entries }, start))
            }
            TokenKind::LParen => {
                let start = self.bump().position;
                let mut inner = self.expression()?;
                self.expect(TokenKind::RParen)?;

                let text = self.source.get(start.offset..self.prev_end).unwrap_or("");
                inner.position = start;
                inner.line_breaks = text.matches('\n').count();
                inner.text = text.to_string();
                inner.parenthesized = true;
                Ok(inner)
            }
            _ => {
                self.expecting("expression");
                Err(self.error_here())
            }
        }
    }

    /// `key: value`, `"key": value` or the shorthand `key`.
    fn parse_object_entry(&mut self) -> Result<Node, ParseError> {
        let key = match self.peek_kind() {
            Some(TokenKind::Name) => {
                let token = self.bump();
                self.finish(NodeKind::Name(token.value), token.position)
            }
            Some(TokenKind::String) => {
                let token = self.bump();
                self.finish(
                    NodeKind::Primitive(Primitive::String(token.value)),
                    token.position,
                )
            }
            _ => {
                self.expecting("name");
                self.expecting("string");
                return Err(self.error_here());
            }
        };

        let value = if self.eat(TokenKind::Colon).is_some() {
            self.expression()?
        } else if key.name().is_some() {
            key.clone()
        } else {
            return Err(self.error_here());
        };

        let start = key.position;
        Ok(self.finish(
            NodeKind::ObjectKeyValue {
                key: Box::new(key),
                value: Box::new(value),
            },
            start,
        ))
    }
}

/// Parses `source` with a freshly built standard [`Grammar`].
///
/// Callers parsing many sources should build one grammar and use
/// [`Parser::new`] instead.
///
/// # Examples
///
/// ```
/// let nodes = schema_lang::parse("collection User { name: string! }").unwrap();
/// assert_eq!(nodes[0].type_name(), "collection");
/// ```
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
    let grammar = Grammar::new();
    Parser::new(&grammar, source).parse()
}
