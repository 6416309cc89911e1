//! Error types for the SimpleScript interpreter

use thiserror::Error;

/// SimpleScript interpreter errors
///
/// Every error is fatal for the statement being processed: the parser never
/// hands back a half-built tree and the evaluator never hands back a partial
/// result. Callers that want to keep going (the REPL) report the error and
/// move on to the next statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** Token sequences that match no grammar production
    /// **Example:** `1 + ;` (binary operator without a right operand)
    #[error("Syntax error at column {column}: {message}")]
    SyntaxError {
        /// Index of the token the parser was looking at when it gave up
        position: usize,
        /// Column (1-indexed) of that token, or one past the end of input
        column: usize,
        /// Error description
        message: String,
    },

    /// Expression nested deeper than the configured limit
    ///
    /// **Triggered by:** Deep parenthesis nesting or very long operator chains,
    /// while parsing or when evaluating a hand-built tree
    /// **Example:** `((((...1...))));` past the limit, `1 + 1 + ... + 1;`
    #[error("Expression nested too deeply (limit: {limit})")]
    NestingTooDeep {
        /// Maximum allowed depth
        limit: usize,
    },

    // Runtime errors
    /// Integer literal text that is not a valid base-10 `i64`
    #[error("Invalid integer literal: {text}")]
    InvalidIntLiteral {
        /// Literal text as it appeared in the source
        text: String,
    },

    /// Division by zero error
    ///
    /// **Triggered by:** A `/` whose right operand evaluates to zero
    /// **Example:** `5 / 0;`
    #[error("Division by zero")]
    DivisionByZero,

    /// Arithmetic result outside the 64-bit signed range
    #[error("Integer overflow in `{op}`")]
    IntegerOverflow {
        /// Operator that overflowed
        op: String,
    },

    /// Reference to a variable
    ///
    /// SimpleScript keeps no variable storage, so an identifier used as a
    /// value never resolves.
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// Variable name
        name: String,
    },

    /// AST node whose shape does not match its kind
    #[error("Malformed {kind} node: {reason}")]
    MalformedNode {
        /// Node kind
        kind: String,
        /// What is wrong with it
        reason: String,
    },
}

impl Error {
    /// Create a syntax error at the given token position
    pub fn syntax(position: usize, column: usize, message: impl Into<String>) -> Self {
        Error::SyntaxError {
            position,
            column,
            message: message.into(),
        }
    }

    /// Create an overflow error for an operator
    pub fn overflow(op: impl Into<String>) -> Self {
        Error::IntegerOverflow { op: op.into() }
    }

    /// Returns true for errors raised while parsing
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::SyntaxError { .. })
    }

    /// Token position of a syntax error, if this is one
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::SyntaxError { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for SimpleScript operations
pub type Result<T> = std::result::Result<T, Error>;
