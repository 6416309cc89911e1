//! Lexical analysis for SimpleScript
//!
//! Converts statement text into a sequence of tokens with a deterministic
//! finite automaton, and provides the cursor the parser reads them through.

mod reader;
mod simple_scanner;
mod token;

pub use reader::TokenReader;
pub use simple_scanner::SimpleScanner;
pub use token::{Token, TokenKind};

/// Tokenizes statement text into a reader positioned at the first token
pub fn tokenize(source: &str) -> TokenReader {
    SimpleScanner::new(source).tokenize()
}
