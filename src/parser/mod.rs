//! SimpleScript Parser Module
//!
//! Parses token sequences into an abstract syntax tree rooted at a
//! `Program` node.

mod ast;
mod simple_parser;

pub use ast::{Node, NodeKind};
pub use simple_parser::{SimpleParser, DEFAULT_MAX_DEPTH};
