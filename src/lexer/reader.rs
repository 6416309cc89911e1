use super::token::{Token, TokenKind};

/// Cursor over a scanned token sequence
///
/// The tokens are owned and never change; only the position moves. Saving
/// and restoring a parse point is saving and restoring an index, which is
/// how the parser backtracks between statement alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReader {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenReader {
    /// Creates a reader positioned before the first token
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenReader {
            tokens,
            position: 0,
        }
    }

    /// Current token without advancing, `None` at the end
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Kind of the current token, `None` at the end
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns true if the current token has the given kind
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Current token, advancing past it; `None` at the end
    pub fn read(&mut self) -> Option<&Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
            self.tokens.get(self.position - 1)
        } else {
            None
        }
    }

    /// Moves back one token; a no-op at the start
    pub fn unread(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Current position, in `0..=len`
    pub fn position(&self) -> usize {
        self.position
    }

    /// Restores a saved position, clamped to `0..=len`
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    /// Column of the current token, or one past the last token at the end
    pub fn column(&self) -> usize {
        match self.peek() {
            Some(token) => token.column,
            None => self.tokens.last().map_or(1, Token::end_column),
        }
    }

    /// Returns true once every token has been read
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
