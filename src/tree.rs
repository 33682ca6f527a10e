// File: src/tree.rs
//
// Read-only AST tree walk and console rendering.
// External consumers (visualizers, debug tooling) see the AST through one
// uniform interface: every node has a display label and an ordered list of
// child nodes. The renderer below draws the same indented tree the
// reference implementation prints after semantic analysis.

use crate::ast::{Condition, Expr, Program, Stmt};

/// A borrowed view of any AST node, uniform for generic tree walks
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Block(&'a [Stmt], &'static str),
    Condition(&'a Condition),
    Expr(&'a Expr),
    Name(&'a str),
}

impl<'a> AstNode<'a> {
    /// Display label for this node
    pub fn label(self) -> String {
        match self {
            AstNode::Program(_) => "program".to_string(),
            AstNode::Stmt(stmt) => match stmt {
                Stmt::Decl { .. } => "decl".to_string(),
                Stmt::Assign { .. } => "assign".to_string(),
                Stmt::Print { .. } => "print".to_string(),
                Stmt::If { .. } => "if".to_string(),
                Stmt::While { .. } => "while".to_string(),
            },
            AstNode::Block(_, name) => name.to_string(),
            AstNode::Condition(condition) => condition.op.symbol().to_string(),
            AstNode::Expr(expr) => match expr {
                Expr::Literal(n) => n.to_string(),
                Expr::Variable { name, .. } => name.clone(),
                Expr::Binary { op, .. } => op.symbol().to_string(),
            },
            AstNode::Name(name) => name.to_string(),
        }
    }

    /// Ordered child nodes, left to right
    pub fn children(self) -> Vec<AstNode<'a>> {
        match self {
            AstNode::Program(program) => {
                program.statements.iter().map(AstNode::Stmt).collect()
            }
            AstNode::Stmt(stmt) => match stmt {
                Stmt::Decl { names, .. } => {
                    names.iter().map(|name| AstNode::Name(name)).collect()
                }
                Stmt::Assign { name, value, .. } => {
                    vec![AstNode::Name(name), AstNode::Expr(value)]
                }
                Stmt::Print { value, .. } => vec![AstNode::Expr(value)],
                Stmt::If { condition, then_branch, else_branch } => {
                    let mut children =
                        vec![AstNode::Condition(condition), AstNode::Block(then_branch, "then")];
                    if let Some(else_branch) = else_branch {
                        children.push(AstNode::Block(else_branch, "else"));
                    }
                    children
                }
                Stmt::While { condition, body } => {
                    vec![AstNode::Condition(condition), AstNode::Block(body, "body")]
                }
            },
            AstNode::Block(statements, _) => statements.iter().map(AstNode::Stmt).collect(),
            AstNode::Condition(condition) => {
                vec![AstNode::Expr(&condition.left), AstNode::Expr(&condition.right)]
            }
            AstNode::Expr(expr) => match expr {
                Expr::Literal(_) | Expr::Variable { .. } => Vec::new(),
                Expr::Binary { left, right, .. } => {
                    vec![AstNode::Expr(left), AstNode::Expr(right)]
                }
            },
            AstNode::Name(_) => Vec::new(),
        }
    }
}

/// Renders the program as an indented console tree
pub fn render(program: &Program) -> String {
    let root = AstNode::Program(program);
    let mut out = String::new();
    out.push_str(&root.label());
    out.push('\n');
    let children = root.children();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        render_node(child, "", i + 1 == count, &mut out);
    }
    out
}

fn render_node(node: AstNode, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    out.push_str(connector);
    out.push_str(&node.label());
    out.push('\n');

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    let children = node.children();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        render_node(child, &child_prefix, i + 1 == count, out);
    }
}
