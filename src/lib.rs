//! # SimpleScript - A Tiny Integer Scripting Language
//!
//! A minimal scripting-language front end: a DFA tokenizer, a recursive-descent
//! parser with one level of backtracking, and a tree-walking evaluator that
//! reduces each program to an integer.
//!
//! ## Quick Start
//!
//! ```rust
//! use simplescript::{Evaluator, Parser, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Tokenize (scan)
//! let tokens = Scanner::new("int total = 3 + 4 * 5;").scan_tokens();
//!
//! // Parse into AST
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//!
//! // Execute
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.evaluate(&program)?;
//!
//! assert_eq!(result, 23);
//! # Ok(())
//! # }
//! ```
//!
//! Or all three steps at once:
//!
//! ```rust
//! assert_eq!(simplescript::evaluate_script("(1 + 2) * 3;").unwrap(), 9);
//! ```
//!
//! ## Language Overview
//!
//! ```text
//! program             -> (intDeclare | expressionStatement | assignmentStatement)*
//! intDeclare          -> 'int' Identifier ('=' additive)? ';'
//! expressionStatement -> additive ';'
//! assignmentStatement -> Identifier '=' additive ';'
//! additive            -> multiplicative (('+' | '-') multiplicative)*
//! multiplicative      -> primary (('*' | '/') primary)*
//! primary             -> IntLiteral | Identifier | '(' additive ')'
//! ```
//!
//! - Integers are 64-bit signed; `/` truncates toward zero
//! - `*` and `/` bind tighter than `+` and `-`; both levels are left-associative
//! - A program evaluates to the value of its last statement
//! - There is no variable storage: declarations and assignments evaluate to
//!   their value, but identifiers used as values do not resolve
//!
//! ## Architecture
//!
//! ```text
//! Statement Text → Scanner → Tokens → Parser → AST → Evaluator → i64
//! ```
//!
//! - [`Scanner`] - Tokenizes statement text
//! - [`TokenReader`] - Cursor the parser reads tokens through
//! - [`Parser`] - Builds the [`Node`] tree
//! - [`Evaluator`] - Reduces the tree to an integer
//! - [`repl`] - Line-accumulating interactive front end
//!
//! ## Error Handling
//!
//! Parse and evaluation failures are fatal for the statement and come back as
//! an [`Error`]:
//!
//! ```rust
//! use simplescript::{evaluate_script, Error};
//!
//! assert_eq!(evaluate_script("5 / 0;"), Err(Error::DivisionByZero));
//!
//! let err = evaluate_script("1 + ;").unwrap_err();
//! assert!(err.to_string().contains("expecting the right part"));
//! ```

/// Version of the SimpleScript interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{tokenize, SimpleScanner, Token, TokenKind, TokenReader};
pub use parser::{Node, NodeKind, SimpleParser};
pub use runtime::SimpleEvaluator;

/// Type alias for the scanner (lexer).
/// Converts raw statement text into tokens for the parser.
pub type Scanner = SimpleScanner;

/// Type alias for the parser.
/// Converts tokens into an abstract syntax tree (AST).
pub type Parser = SimpleParser;

/// Type alias for the evaluator.
/// Reduces the AST to an integer.
pub type Evaluator = SimpleEvaluator;

/// Tokenizes, parses and evaluates `source` in one call
pub fn evaluate_script(source: &str) -> Result<i64> {
    let program = Parser::from_reader(tokenize(source)).parse()?;
    Evaluator::new().evaluate(&program)
}
