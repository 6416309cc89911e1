use super::reader::TokenReader;
use super::token::{Token, TokenKind};

/// States of the tokenizer automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DfaState {
    /// Between tokens
    Initial,
    /// Inside an identifier run
    Identifier,
    /// Seen `i` of a possible `int`
    Int1,
    /// Seen `in` of a possible `int`
    Int2,
    /// Seen `int`; keyword unless another identifier character follows
    Int3,
    /// Inside an integer literal run
    IntLiteral,
    /// Seen `>`, waiting for a possible `=`
    Gt,
    /// Seen `<`, waiting for a possible `=`
    Lt,
    /// A complete punctuation token is pending
    Complete,
}

/// Token being accumulated by the automaton
struct PendingToken {
    kind: TokenKind,
    text: String,
    column: usize,
}

/// Scanner for SimpleScript statements
///
/// A deterministic finite automaton: each character either extends the
/// pending token or flushes it and starts the next one. Characters that
/// cannot start a token (whitespace, unknown punctuation) are dropped.
pub struct SimpleScanner {
    /// Source code as character vector
    source: Vec<char>,
}

impl SimpleScanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        SimpleScanner {
            source: source.chars().collect(),
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pending: Option<PendingToken> = None;
        let mut state = DfaState::Initial;

        for (index, &c) in self.source.iter().enumerate() {
            let column = index + 1;
            state = match state {
                DfaState::Initial | DfaState::Complete => {
                    Self::init_token(c, column, &mut pending, &mut tokens)
                }
                DfaState::Identifier => {
                    if is_identifier_char(c) {
                        Self::extend(&mut pending, c);
                        DfaState::Identifier
                    } else {
                        Self::init_token(c, column, &mut pending, &mut tokens)
                    }
                }
                DfaState::Int1 => Self::keyword_step(
                    c,
                    'n',
                    DfaState::Int2,
                    column,
                    &mut pending,
                    &mut tokens,
                ),
                DfaState::Int2 => Self::keyword_step(
                    c,
                    't',
                    DfaState::Int3,
                    column,
                    &mut pending,
                    &mut tokens,
                ),
                DfaState::Int3 => {
                    if is_identifier_char(c) {
                        Self::extend(&mut pending, c);
                        DfaState::Identifier
                    } else {
                        Self::promote_keyword(&mut pending);
                        Self::init_token(c, column, &mut pending, &mut tokens)
                    }
                }
                DfaState::IntLiteral => {
                    if c.is_ascii_digit() {
                        Self::extend(&mut pending, c);
                        DfaState::IntLiteral
                    } else {
                        Self::init_token(c, column, &mut pending, &mut tokens)
                    }
                }
                DfaState::Gt | DfaState::Lt => {
                    if c == '=' {
                        Self::extend(&mut pending, c);
                        if let Some(token) = pending.as_mut() {
                            token.kind = if state == DfaState::Gt {
                                TokenKind::Ge
                            } else {
                                TokenKind::Le
                            };
                        }
                        DfaState::Complete
                    } else {
                        Self::init_token(c, column, &mut pending, &mut tokens)
                    }
                }
            };
        }

        if state == DfaState::Int3 {
            Self::promote_keyword(&mut pending);
        }
        Self::flush(&mut pending, &mut tokens);

        tracing::trace!(count = tokens.len(), "scanned tokens");
        tokens
    }

    /// Scans the source and wraps the tokens in a reader
    pub fn tokenize(&self) -> TokenReader {
        TokenReader::new(self.scan_tokens())
    }

    /// Flushes the pending token and starts a new one at `c`
    fn init_token(
        c: char,
        column: usize,
        pending: &mut Option<PendingToken>,
        tokens: &mut Vec<Token>,
    ) -> DfaState {
        Self::flush(pending, tokens);

        let (kind, state) = match c {
            'i' => (TokenKind::Identifier, DfaState::Int1),
            c if c.is_ascii_alphabetic() => (TokenKind::Identifier, DfaState::Identifier),
            c if c.is_ascii_digit() => (TokenKind::IntLiteral, DfaState::IntLiteral),
            '>' => (TokenKind::Gt, DfaState::Gt),
            '<' => (TokenKind::Lt, DfaState::Lt),
            '=' => (TokenKind::Assignment, DfaState::Complete),
            '+' => (TokenKind::Plus, DfaState::Complete),
            '-' => (TokenKind::Minus, DfaState::Complete),
            '*' => (TokenKind::Star, DfaState::Complete),
            '/' => (TokenKind::Slash, DfaState::Complete),
            ';' => (TokenKind::SemiColon, DfaState::Complete),
            '(' => (TokenKind::LeftParen, DfaState::Complete),
            ')' => (TokenKind::RightParen, DfaState::Complete),
            _ => return DfaState::Initial,
        };

        *pending = Some(PendingToken {
            kind,
            text: c.to_string(),
            column,
        });
        state
    }

    /// One step of the speculative `int` match
    fn keyword_step(
        c: char,
        expected: char,
        next: DfaState,
        column: usize,
        pending: &mut Option<PendingToken>,
        tokens: &mut Vec<Token>,
    ) -> DfaState {
        if c == expected {
            Self::extend(pending, c);
            next
        } else if is_identifier_char(c) {
            Self::extend(pending, c);
            DfaState::Identifier
        } else {
            Self::init_token(c, column, pending, tokens)
        }
    }

    fn extend(pending: &mut Option<PendingToken>, c: char) {
        if let Some(token) = pending.as_mut() {
            token.text.push(c);
        }
    }

    fn promote_keyword(pending: &mut Option<PendingToken>) {
        if let Some(token) = pending.as_mut() {
            token.kind = TokenKind::IntKeyword;
        }
    }

    fn flush(pending: &mut Option<PendingToken>, tokens: &mut Vec<Token>) {
        if let Some(token) = pending.take() {
            tokens.push(Token::new(token.kind, token.text, token.column));
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}
