use super::ast::{Node, NodeKind};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind, TokenReader};

/// Default limit on expression nesting (parentheses and operator chains)
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser for SimpleScript
///
/// Grammar:
///
/// ```text
/// program             -> (intDeclare | expressionStatement | assignmentStatement)*
/// intDeclare          -> 'int' Identifier ('=' additive)? ';'
/// expressionStatement -> additive ';'
/// assignmentStatement -> Identifier '=' additive ';'
/// additive            -> multiplicative (('+' | '-') multiplicative)*
/// multiplicative      -> primary (('*' | '/') primary)*
/// primary             -> IntLiteral | Identifier | '(' additive ')'
/// ```
///
/// Every production returns `Ok(None)` when it does not apply at the current
/// position, leaving the reader where it was, and `Err` once it has committed
/// to a construct that then turns out to be malformed.
///
/// Both the parenthesis nesting and the height of any expression tree are
/// capped at `max_depth`, so neither the parser nor the evaluator recurses
/// without bound.
pub struct SimpleParser {
    reader: TokenReader,
    /// Maximum parenthesis nesting and expression tree height
    max_depth: usize,
    /// Current parenthesis nesting
    depth: usize,
}

/// Expression subtree together with its height
struct Expr {
    node: Node,
    height: usize,
}

impl Expr {
    fn leaf(node: Node) -> Self {
        Expr { node, height: 1 }
    }
}

impl SimpleParser {
    /// Creates a new parser over scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        SimpleParser::from_reader(TokenReader::new(tokens))
    }

    /// Creates a new parser over an existing reader
    pub fn from_reader(reader: TokenReader) -> Self {
        SimpleParser {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Sets the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Position of the underlying reader
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Parses the tokens into a `Program` node
    pub fn parse(&mut self) -> Result<Node> {
        let mut program = Node::program();
        self.depth = 0;

        while !self.reader.is_at_end() {
            let statement = match self.int_declare()? {
                Some(node) => node,
                None => match self.expression_statement()? {
                    Some(node) => node,
                    None => match self.assignment_statement()? {
                        Some(node) => node,
                        None => return Err(self.syntax_error("unknown statement")),
                    },
                },
            };
            tracing::trace!(kind = %statement.kind, "parsed statement");
            program.add_child(statement);
        }

        Ok(program)
    }

    /// `'int' Identifier ('=' additive)? ';'`
    fn int_declare(&mut self) -> Result<Option<Node>> {
        if !self.reader.check(TokenKind::IntKeyword) {
            return Ok(None);
        }
        self.reader.read();

        let mut node = match self.reader.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let node = Node::new(NodeKind::IntDeclaration, token.text.clone());
                self.reader.read();
                node
            }
            _ => return Err(self.syntax_error("variable name expected")),
        };

        if self.reader.check(TokenKind::Assignment) {
            self.reader.read();
            match self.additive()? {
                Some(initializer) => node.add_child(initializer.node),
                None => {
                    return Err(self.syntax_error(
                        "invalid variable initialization, expecting an expression",
                    ))
                }
            }
        }

        self.expect_semicolon()?;
        Ok(Some(node))
    }

    /// `additive ';'`, backtracking when the expression is not closed by `;`
    fn expression_statement(&mut self) -> Result<Option<Node>> {
        let saved = self.reader.position();

        if let Some(expr) = self.additive()? {
            if self.reader.check(TokenKind::SemiColon) {
                self.reader.read();
                return Ok(Some(expr.node));
            }
        }

        tracing::debug!(position = saved, "not an expression statement, backtracking");
        self.reader.set_position(saved);
        Ok(None)
    }

    /// `Identifier '=' additive ';'`
    fn assignment_statement(&mut self) -> Result<Option<Node>> {
        let saved = self.reader.position();

        let mut node = match self.reader.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                Node::new(NodeKind::Assignment, token.text.clone())
            }
            _ => return Ok(None),
        };
        self.reader.read();

        if !self.reader.check(TokenKind::Assignment) {
            self.reader.set_position(saved);
            return Ok(None);
        }
        self.reader.read();

        match self.additive()? {
            Some(value) => node.add_child(value.node),
            None => {
                return Err(
                    self.syntax_error("invalid assignment statement, expecting an expression")
                )
            }
        }

        self.expect_semicolon()?;
        Ok(Some(node))
    }

    /// `multiplicative (('+' | '-') multiplicative)*`, folded to the left
    fn additive(&mut self) -> Result<Option<Expr>> {
        let Some(mut left) = self.multiplicative()? else {
            return Ok(None);
        };

        while let Some(op) = self.match_operator(TokenKind::is_additive) {
            match self.multiplicative()? {
                Some(right) => left = self.fold(NodeKind::AdditiveExpr, op, left, right)?,
                None => {
                    return Err(self.syntax_error(
                        "invalid additive expression, expecting the right part",
                    ))
                }
            }
        }

        Ok(Some(left))
    }

    /// `primary (('*' | '/') primary)*`, folded to the left
    fn multiplicative(&mut self) -> Result<Option<Expr>> {
        let Some(mut left) = self.primary()? else {
            return Ok(None);
        };

        while let Some(op) = self.match_operator(TokenKind::is_multiplicative) {
            match self.primary()? {
                Some(right) => {
                    left = self.fold(NodeKind::MultiplicativeExpr, op, left, right)?
                }
                None => {
                    return Err(self.syntax_error(
                        "invalid multiplicative expression, expecting the right part",
                    ))
                }
            }
        }

        Ok(Some(left))
    }

    /// `IntLiteral | Identifier | '(' additive ')'`
    fn primary(&mut self) -> Result<Option<Expr>> {
        let Some(token) = self.reader.peek() else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::IntLiteral => {
                let node = Node::new(NodeKind::IntLiteral, token.text.clone());
                self.reader.read();
                Ok(Some(Expr::leaf(node)))
            }
            TokenKind::Identifier => {
                let node = Node::new(NodeKind::Identifier, token.text.clone());
                self.reader.read();
                Ok(Some(Expr::leaf(node)))
            }
            TokenKind::LeftParen => {
                if self.depth >= self.max_depth {
                    return Err(self.too_deep());
                }
                self.reader.read();

                self.depth += 1;
                let inner = self.additive()?;
                self.depth -= 1;

                let Some(inner) = inner else {
                    return Err(
                        self.syntax_error("expecting an additive expression inside parenthesis")
                    );
                };
                if !self.reader.check(TokenKind::RightParen) {
                    return Err(self.syntax_error("expecting right parenthesis"));
                }
                self.reader.read();
                Ok(Some(inner))
            }
            _ => Ok(None),
        }
    }

    /// Builds a binary node over two operands, enforcing the height limit
    fn fold(&self, kind: NodeKind, op: String, left: Expr, right: Expr) -> Result<Expr> {
        let height = left.height.max(right.height) + 1;
        if height > self.max_depth {
            return Err(self.too_deep());
        }
        Ok(Expr {
            node: Node::binary(kind, op, left.node, right.node),
            height,
        })
    }

    /// Consumes the current token if `accepts` its kind, returning its text
    fn match_operator(&mut self, accepts: fn(&TokenKind) -> bool) -> Option<String> {
        let token = self.reader.peek()?;
        if !accepts(&token.kind) {
            return None;
        }
        let op = token.text.clone();
        self.reader.read();
        Some(op)
    }

    fn expect_semicolon(&mut self) -> Result<()> {
        if self.reader.check(TokenKind::SemiColon) {
            self.reader.read();
            Ok(())
        } else {
            Err(self.syntax_error("invalid statement, expecting semicolon"))
        }
    }

    /// Helper to create a syntax error at the current position
    fn syntax_error(&self, message: &str) -> Error {
        Error::syntax(self.reader.position(), self.reader.column(), message)
    }

    fn too_deep(&self) -> Error {
        tracing::debug!(
            position = self.reader.position(),
            limit = self.max_depth,
            "expression nested too deeply"
        );
        Error::NestingTooDeep {
            limit: self.max_depth,
        }
    }
}
