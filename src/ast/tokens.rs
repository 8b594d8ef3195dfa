use std::fmt;

/// Source location of a token or node.
///
/// Lines and columns start at 1, offsets are byte offsets starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    pub offset: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            line: 1,
            col: 1,
            offset: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.col)
    }
}

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Collection,
    Function,
    If,
    Else,
    Return,
    Const,
    Let,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Collection => "collection",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Return => "return",
            Keyword::Const => "const",
            Keyword::Let => "let",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    /// Spaces, tabs and newlines
    Whitespace,

    /// Line (`// ...`) or block (`/* ... */`) comment
    Comment,

    // Literals
    /// `true` or `false`
    Boolean,

    /// Integer or decimal number
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// 3.14
    /// ```
    Number,

    /// Single or double quoted string
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'it\'s'
    /// ```
    String,

    // Identifiers
    /// Field, function or variable name
    ///
    /// Starts with a letter, `_` or `$`.
    ///
    /// # Examples
    /// ```text
    /// age
    /// _internal
    /// $owner
    /// ```
    Name,

    /// Reserved word
    Keyword(Keyword),

    // Logical
    /// `&&`
    And,
    /// `||` or `or`
    Or,
    /// `!` or `not`
    ///
    /// Also the required-field suffix: `age: number!`
    Not,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Semicolon,
    Dot,
    /// Directive prefix: `@index(...)`
    At,
    /// Optional parameter suffix: `function f (a?)`
    Question,

    // Assignment
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `^` or `**`
    Power,

    /// String concatenation (`&`)
    Concat,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Human readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Boolean => "boolean",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Name => "name",
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::And => "\"&&\"",
            TokenKind::Or => "\"||\"",
            TokenKind::Not => "\"!\"",
            TokenKind::LParen => "\"(\"",
            TokenKind::RParen => "\")\"",
            TokenKind::LBracket => "\"[\"",
            TokenKind::RBracket => "\"]\"",
            TokenKind::LBrace => "\"{\"",
            TokenKind::RBrace => "\"}\"",
            TokenKind::Colon => "\":\"",
            TokenKind::Comma => "\",\"",
            TokenKind::Semicolon => "\";\"",
            TokenKind::Dot => "\".\"",
            TokenKind::At => "\"@\"",
            TokenKind::Question => "\"?\"",
            TokenKind::Assign => "\"=\"",
            TokenKind::AddAssign => "\"+=\"",
            TokenKind::SubAssign => "\"-=\"",
            TokenKind::EqEq => "\"==\"",
            TokenKind::NotEq => "\"!=\"",
            TokenKind::Lt => "\"<\"",
            TokenKind::LtEq => "\"<=\"",
            TokenKind::Gt => "\">\"",
            TokenKind::GtEq => "\">=\"",
            TokenKind::Plus => "\"+\"",
            TokenKind::Minus => "\"-\"",
            TokenKind::Star => "\"*\"",
            TokenKind::Slash => "\"/\"",
            TokenKind::Percent => "\"%\"",
            TokenKind::Power => "\"^\"",
            TokenKind::Concat => "\"&\"",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token.
///
/// `value` holds the decoded value (escapes resolved for strings), `text` the
/// raw source slice the token was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub text: String,
    pub position: Position,
    /// Number of newlines inside the token
    pub line_breaks: usize,
}
