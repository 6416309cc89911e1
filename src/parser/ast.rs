use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Kinds of AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root node; children are the top-level statements in source order
    Program,
    /// Integer literal; text holds the digits
    IntLiteral,
    /// `int name (= additive)?`; text holds the name, optional child is the initializer
    IntDeclaration,
    /// `left (+|-) right`; text holds the operator
    AdditiveExpr,
    /// `left (*|/) right`; text holds the operator
    MultiplicativeExpr,
    /// `name = additive`; text holds the name, the child is the value
    Assignment,
    /// Identifier used as a value; text holds the name
    Identifier,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Program => "Program",
            NodeKind::IntLiteral => "IntLiteral",
            NodeKind::IntDeclaration => "IntDeclaration",
            NodeKind::AdditiveExpr => "AdditiveExpr",
            NodeKind::MultiplicativeExpr => "MultiplicativeExpr",
            NodeKind::Assignment => "Assignment",
            NodeKind::Identifier => "Identifier",
        };
        f.write_str(name)
    }
}

/// A node of the abstract syntax tree
///
/// Each node owns its children outright; the tree has no sharing and no
/// parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// What this node represents
    pub kind: NodeKind,
    /// Operator, name or literal digits, depending on `kind`
    pub text: String,
    /// Child nodes in order
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Node {
            kind,
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Creates an empty program node
    pub fn program() -> Self {
        Node::new(NodeKind::Program, "")
    }

    /// Creates a binary operator node from its two operands
    pub fn binary(kind: NodeKind, op: impl Into<String>, left: Node, right: Node) -> Self {
        Node {
            kind,
            text: op.into(),
            children: vec![left, right],
        }
    }

    /// Builder-style variant of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Child at `index`, if present
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Renders the tree, one `<kind> <text>` line per node, indented one
    /// tab per level
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(&self.kind.to_string());
        if !self.text.is_empty() {
            out.push(' ');
            out.push_str(&self.text);
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}

/// Frees descendants from an explicit stack so that dropping a very deep
/// tree does not recurse once per level
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
