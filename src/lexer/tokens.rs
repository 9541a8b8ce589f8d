use std::fmt::Display;

use crate::Position;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Id,

    // Values
    IntVal,
    DoubleVal,
    CharVal,
    StringVal,
    BoolVal,
    NullVal,

    // Type names
    IntType,
    DoubleType,
    CharType,
    StringType,
    BoolType,
    VoidType,

    Plus,
    Minus,
    Times,
    Divide,

    Assign,    // =
    Equal,     // ==
    NotEqual,  // !=

    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    And,
    Or,
    Not,

    Dot,
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Semicolon,

    // Reserved
    Struct,
    Array,
    New,
    If,
    Elseif,
    Else,
    While,
    For,
    Return,

    EOS,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexed token as handed over by the lexer, with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
