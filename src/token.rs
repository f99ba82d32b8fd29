#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    Illegal,

    // Literals
    Identifier,
    Integer,
    StringLiteral,

    // Single-character tokens.
    Semicolon,
    Add,
    Subtract,
    Multiply,
    Divide,
    Assign,
    LeftParen,
    RightParen,
    Quote,
}

impl TokenKind {
    /// Fixed label used by the driver output and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Identifier => "IDENT",
            TokenKind::Integer => "INT",
            TokenKind::StringLiteral => "STRING",
            TokenKind::Semicolon => ";",
            TokenKind::Add => "+",
            TokenKind::Subtract => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Assign => "=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Quote => "QUOTE",
        }
    }

    /// Kind of a character that always forms a token on its own.
    pub fn single_char(c: char) -> Option<TokenKind> {
        let kind = match c {
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Add,
            '-' => TokenKind::Subtract,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '=' => TokenKind::Assign,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Line and column of the last character consumed.
///
/// Lines start at 1. Column 0 means nothing has been consumed on the line yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub const START: SourcePosition = SourcePosition { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: SourcePosition,
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(position: SourcePosition, kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            literal: literal.into(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// Formats as `<line>:<column>\t<label>\t<literal>`.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.position, self.kind, self.literal)
    }
}
