use crate::error::{Error, Result};
use crate::parser::{Node, NodeKind};

/// Default limit on how deep the walk may descend into a tree
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tree-walking evaluator for SimpleScript
///
/// Reduces a tree to an `i64` in a single post-order walk:
/// - `Program` yields the value of its last statement (0 when empty)
/// - `IntDeclaration` yields its initializer, or 0 without one
/// - `Assignment` yields its right-hand side
/// - `AdditiveExpr` / `MultiplicativeExpr` combine their two operands
///
/// There is no variable storage. Declared and assigned values are not
/// remembered, and an `Identifier` used as a value is an error.
///
/// Trees deeper than `max_depth` fail with [`Error::NestingTooDeep`]. The
/// parser already caps expression height below the default, so this only
/// trips on trees built by hand.
#[derive(Debug)]
pub struct SimpleEvaluator {
    /// Execution trace, one line per visited node, when enabled
    execution_trace: Option<Vec<String>>,
    /// Maximum node depth, the root being depth 0
    max_depth: usize,
}

impl Default for SimpleEvaluator {
    fn default() -> Self {
        SimpleEvaluator::new()
    }
}

impl SimpleEvaluator {
    /// Creates a new evaluator
    pub fn new() -> Self {
        SimpleEvaluator {
            execution_trace: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates an evaluator that records an execution trace
    pub fn with_trace() -> Self {
        SimpleEvaluator {
            execution_trace: Some(Vec::new()),
            ..SimpleEvaluator::new()
        }
    }

    /// Sets the depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the execution trace (empty when tracing is disabled)
    pub fn execution_trace(&self) -> &[String] {
        self.execution_trace.as_deref().unwrap_or(&[])
    }

    /// Clear the execution trace
    pub fn clear_execution_trace(&mut self) {
        if let Some(trace) = self.execution_trace.as_mut() {
            trace.clear();
        }
    }

    /// Evaluates a tree to an integer
    pub fn evaluate(&mut self, node: &Node) -> Result<i64> {
        self.evaluate_node(node, 0)
    }

    fn evaluate_node(&mut self, node: &Node, depth: usize) -> Result<i64> {
        if depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        tracing::trace!(depth, "Calculating: {}", node.kind);
        if let Some(trace) = self.execution_trace.as_mut() {
            trace.push(format!("{}Calculating: {}", "\t".repeat(depth), node.kind));
        }

        match node.kind {
            NodeKind::Program => {
                let mut last = 0;
                for statement in &node.children {
                    last = self.evaluate_node(statement, depth + 1)?;
                }
                Ok(last)
            }

            NodeKind::IntLiteral => node
                .text
                .parse::<i64>()
                .map_err(|_| Error::InvalidIntLiteral {
                    text: node.text.clone(),
                }),

            NodeKind::IntDeclaration => match node.child(0) {
                Some(initializer) => self.evaluate_node(initializer, depth + 1),
                None => Ok(0),
            },

            NodeKind::Assignment => match node.child(0) {
                Some(value) => self.evaluate_node(value, depth + 1),
                None => Err(malformed(node, "assignment without a value")),
            },

            NodeKind::AdditiveExpr => {
                let (left, right) = self.evaluate_operands(node, depth)?;
                let value = if node.text == "+" {
                    left.checked_add(right)
                } else {
                    left.checked_sub(right)
                };
                value.ok_or_else(|| Error::overflow(node.text.as_str()))
            }

            NodeKind::MultiplicativeExpr => {
                let (left, right) = self.evaluate_operands(node, depth)?;
                if node.text == "*" {
                    left.checked_mul(right)
                        .ok_or_else(|| Error::overflow(node.text.as_str()))
                } else if right == 0 {
                    Err(Error::DivisionByZero)
                } else {
                    left.checked_div(right)
                        .ok_or_else(|| Error::overflow(node.text.as_str()))
                }
            }

            NodeKind::Identifier => Err(Error::UndefinedVariable {
                name: node.text.clone(),
            }),
        }
    }

    /// Evaluates the two operands of a binary node, left first
    fn evaluate_operands(&mut self, node: &Node, depth: usize) -> Result<(i64, i64)> {
        match node.children.as_slice() {
            [left, right] => {
                let left = self.evaluate_node(left, depth + 1)?;
                let right = self.evaluate_node(right, depth + 1)?;
                Ok((left, right))
            }
            children => Err(malformed(
                node,
                &format!("expected 2 operands, found {}", children.len()),
            )),
        }
    }
}

fn malformed(node: &Node, reason: &str) -> Error {
    Error::MalformedNode {
        kind: node.kind.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SimpleScanner;
    use crate::parser::SimpleParser;

    fn eval_str(source: &str) -> Result<i64> {
        let tokens = SimpleScanner::new(source).scan_tokens();
        let program = SimpleParser::new(tokens).parse()?;
        SimpleEvaluator::new().evaluate(&program)
    }

    fn parse(source: &str) -> Node {
        SimpleParser::new(SimpleScanner::new(source).scan_tokens())
            .parse()
            .unwrap()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_str("3 + 4 * 5;").unwrap(), 23);
        assert_eq!(eval_str("10 - 2 - 3;").unwrap(), 5);
        assert_eq!(eval_str("(1 + 2) * 3;").unwrap(), 9);
        assert_eq!(eval_str("100 / 10 / 5;").unwrap(), 2);
        assert_eq!(eval_str("7 / 2;").unwrap(), 3);
        assert_eq!(eval_str("1 - 8 / 3;").unwrap(), -1);
    }

    #[test]
    fn test_truncating_division_of_negative_values() {
        assert_eq!(eval_str("(0 - 7) / 2;").unwrap(), -3);
    }

    #[test]
    fn test_program_yields_last_statement() {
        assert_eq!(eval_str("1 + 1; 2 * 5;").unwrap(), 10);
        assert_eq!(eval_str("").unwrap(), 0);
    }

    #[test]
    fn test_declarations_and_assignments() {
        assert_eq!(eval_str("int x;").unwrap(), 0);
        assert_eq!(eval_str("int a = 1 + 2;").unwrap(), 3);
        assert_eq!(eval_str("b = 4 * 4;").unwrap(), 16);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_str("5 / 0;").unwrap_err(), Error::DivisionByZero);
        assert_eq!(eval_str("5 / (2 - 2);").unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            eval_str("9223372036854775807 + 1;").unwrap_err(),
            Error::overflow("+")
        );
        assert_eq!(
            eval_str("99999999999999999999;").unwrap_err(),
            Error::InvalidIntLiteral {
                text: "99999999999999999999".to_string()
            }
        );
    }

    #[test]
    fn test_identifier_does_not_resolve() {
        let err = eval_str("int x = 3; x + 1;").unwrap_err();
        assert_eq!(
            err,
            Error::UndefinedVariable {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_literal_in_hand_built_tree() {
        let node = Node::new(NodeKind::IntLiteral, "12a");
        assert!(matches!(
            SimpleEvaluator::new().evaluate(&node),
            Err(Error::InvalidIntLiteral { .. })
        ));
    }

    #[test]
    fn test_malformed_binary_node() {
        let node = Node::new(NodeKind::AdditiveExpr, "+")
            .with_child(Node::new(NodeKind::IntLiteral, "1"));
        assert!(matches!(
            SimpleEvaluator::new().evaluate(&node),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn test_execution_trace() {
        let tokens = SimpleScanner::new("1 + 2;").scan_tokens();
        let program = SimpleParser::new(tokens).parse().unwrap();

        let mut evaluator = SimpleEvaluator::with_trace();
        assert_eq!(evaluator.evaluate(&program).unwrap(), 3);
        assert_eq!(
            evaluator.execution_trace(),
            &[
                "Calculating: Program".to_string(),
                "\tCalculating: AdditiveExpr".to_string(),
                "\t\tCalculating: IntLiteral".to_string(),
                "\t\tCalculating: IntLiteral".to_string(),
            ]
        );

        evaluator.clear_execution_trace();
        assert!(evaluator.execution_trace().is_empty());
        assert!(SimpleEvaluator::new().execution_trace().is_empty());
    }

    #[test]
    fn test_depth_limit() {
        // Program -> AdditiveExpr -> MultiplicativeExpr -> IntLiteral
        assert_eq!(
            SimpleEvaluator::new().with_max_depth(3).evaluate(&parse("1 + 2 * 3;")),
            Ok(7)
        );
        assert_eq!(
            SimpleEvaluator::new().with_max_depth(2).evaluate(&parse("1 + 2 * 3;")),
            Err(Error::NestingTooDeep { limit: 2 })
        );
    }

    #[test]
    fn test_hand_built_deep_tree() {
        let mut node = Node::new(NodeKind::IntLiteral, "1");
        for _ in 0..DEFAULT_MAX_DEPTH + 100 {
            node = Node::binary(
                NodeKind::AdditiveExpr,
                "+",
                node,
                Node::new(NodeKind::IntLiteral, "1"),
            );
        }
        let program = Node::program().with_child(node);

        let mut evaluator = SimpleEvaluator::with_trace();
        assert_eq!(
            evaluator.evaluate(&program),
            Err(Error::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            })
        );
    }
}
