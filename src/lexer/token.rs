use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub text: String,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: impl Into<String>, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            column,
        }
    }

    /// Column just past the last character of this token
    pub fn end_column(&self) -> usize {
        self.column + self.text.chars().count()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}

/// All possible token types in SimpleScript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Identifier (letter followed by letters or digits)
    Identifier,
    /// `int` keyword
    IntKeyword,
    /// Integer literal (digits only)
    IntLiteral,
    /// Assignment operator (=)
    Assignment,
    /// Statement terminator (;)
    SemiColon,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Greater than operator (>)
    Gt,
    /// Greater than or equal operator (>=)
    Ge,
    /// Less than operator (<)
    Lt,
    /// Less than or equal operator (<=)
    Le,
}

impl TokenKind {
    /// Check if token is an additive operator
    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    /// Check if token is a multiplicative operator
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }

    /// Check if token is a comparison operator (tokenized, never parsed)
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Gt | TokenKind::Ge | TokenKind::Lt | TokenKind::Le
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::IntKeyword => "IntKeyword",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::Assignment => "Assignment",
            TokenKind::SemiColon => "SemiColon",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
        };
        f.write_str(name)
    }
}
