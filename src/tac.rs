// File: src/tac.rs
//
// Three-address-code listing for MiniPython programs.
// A linear diagnostic form of the validated AST: declarations, temporaries
// for every intermediate arithmetic result, and label/goto pairs for
// control flow. The listing is purely informational and is never consulted
// for execution.

use crate::ast::{Condition, Expr, Program, Stmt};

/// Generates the TAC listing for a program, one instruction per line
pub fn generate(program: &Program) -> Vec<String> {
    let mut builder = TacBuilder::default();
    builder.emit_stmts(&program.statements);
    builder.lines
}

#[derive(Default)]
struct TacBuilder {
    lines: Vec<String>,
    next_temp: usize,
    next_label: usize,
}

impl TacBuilder {
    fn temp(&mut self) -> String {
        self.next_temp += 1;
        format!("t{}", self.next_temp)
    }

    fn label(&mut self) -> String {
        self.next_label += 1;
        format!("L{}", self.next_label)
    }

    fn emit_stmts(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.emit_stmt(stmt);
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl { names, .. } => {
                for name in names {
                    self.lines.push(format!("DECLARE {}", name));
                }
            }
            Stmt::Assign { name, value, .. } => {
                let operand = self.emit_expr(value);
                self.lines.push(format!("{} := {}", name, operand));
            }
            Stmt::Print { value, .. } => {
                let operand = self.emit_expr(value);
                self.lines.push(format!("PRINT {}", operand));
            }
            Stmt::If { condition, then_branch, else_branch } => {
                let test = self.emit_condition(condition);
                let skip_then = self.label();
                self.lines.push(format!("ifFalse {} goto {}", test, skip_then));
                self.emit_stmts(then_branch);
                match else_branch {
                    Some(else_branch) => {
                        let end = self.label();
                        self.lines.push(format!("goto {}", end));
                        self.lines.push(format!("{}:", skip_then));
                        self.emit_stmts(else_branch);
                        self.lines.push(format!("{}:", end));
                    }
                    None => {
                        self.lines.push(format!("{}:", skip_then));
                    }
                }
            }
            Stmt::While { condition, body } => {
                let top = self.label();
                let exit = self.label();
                self.lines.push(format!("{}:", top));
                let test = self.emit_condition(condition);
                self.lines.push(format!("ifFalse {} goto {}", test, exit));
                self.emit_stmts(body);
                self.lines.push(format!("goto {}", top));
                self.lines.push(format!("{}:", exit));
            }
        }
    }

    /// Emits instructions for an expression and returns the operand that
    /// holds its value: a literal, a variable name, or a temporary
    fn emit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(n) => n.to_string(),
            Expr::Variable { name, .. } => name.clone(),
            Expr::Binary { op, left, right } => {
                let left = self.emit_expr(left);
                let right = self.emit_expr(right);
                let temp = self.temp();
                self.lines.push(format!("{} := {} {} {}", temp, left, op.symbol(), right));
                temp
            }
        }
    }

    fn emit_condition(&mut self, condition: &Condition) -> String {
        let left = self.emit_expr(&condition.left);
        let right = self.emit_expr(&condition.right);
        let temp = self.temp();
        self.lines.push(format!("{} := {} {} {}", temp, left, condition.op.symbol(), right));
        temp
    }
}
