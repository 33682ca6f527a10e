// File: src/interpreter/mod.rs
//
// Tree-walking evaluator for the MiniPython language.
// Executes a validated program by traversing the Abstract Syntax Tree
// depth-first, left to right.
//
// The interpreter owns a runtime environment created from the symbol
// table, with every declared variable pre-initialized to 0. Declarations
// are no-ops at execution time (the semantic analyzer already consumed
// them); assignments overwrite bindings; print statements write one
// integer per line to the output sink.
//
// Division by zero evaluates to 0. This is deliberate reference behavior
// observed across all MiniPython variants, not a fault, and callers must
// not treat it as an error. A `while` loop whose condition never becomes
// false runs forever; no iteration cap is applied, and terminating such a
// program is the caller's responsibility.

mod environment;

pub use environment::Environment;

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::ast::{BinOp, CmpOp, Condition, Expr, Program, Stmt};
use crate::errors::MiniPyError;
use crate::semantic::SymbolTable;

/// Executes validated MiniPython programs
pub struct Interpreter {
    pub env: Environment,
    output: Option<Arc<Mutex<Vec<u8>>>>,
}

impl Interpreter {
    /// Creates an interpreter whose environment holds every name in the
    /// symbol table, each bound to 0
    pub fn new(symbols: &SymbolTable) -> Self {
        Interpreter { env: Environment::from_symbols(symbols), output: None }
    }

    /// Sets the output sink for print statements (used for testing and
    /// callers that capture program output instead of printing it)
    pub fn set_output(&mut self, output: Arc<Mutex<Vec<u8>>>) {
        self.output = Some(output);
    }

    /// Runs the program to completion.
    ///
    /// The only runtime failure is an environment lookup that misses even
    /// though semantic analysis succeeded, which indicates an internal
    /// consistency violation and aborts execution.
    pub fn run(&mut self, program: &Program) -> Result<(), MiniPyError> {
        self.exec_stmts(&program.statements)
    }

    fn exec_stmts(&mut self, statements: &[Stmt]) -> Result<(), MiniPyError> {
        for stmt in statements {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), MiniPyError> {
        match stmt {
            // Already consumed by the semantic analyzer; the environment
            // entries exist before execution begins.
            Stmt::Decl { .. } => Ok(()),
            Stmt::Assign { name, value, .. } => {
                let result = self.eval_expr(value)?;
                if self.env.set(name, result) {
                    Ok(())
                } else {
                    Err(MiniPyError::invariant_violation(format!(
                        "Variable '{}' passed analysis but is missing from the environment",
                        name
                    )))
                }
            }
            Stmt::Print { value, .. } => {
                let result = self.eval_expr(value)?;
                self.write_output(result);
                Ok(())
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval_condition(condition)? {
                    self.exec_stmts(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmts(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                // Re-tested before every iteration; runs until false.
                while self.eval_condition(condition)? {
                    self.exec_stmts(body)?;
                }
                Ok(())
            }
        }
    }

    fn eval_condition(&self, condition: &Condition) -> Result<bool, MiniPyError> {
        let left = self.eval_expr(&condition.left)?;
        let right = self.eval_expr(&condition.right)?;
        let result = match condition.op {
            CmpOp::Eq => left == right,
            CmpOp::Ne => left != right,
            CmpOp::Lt => left < right,
            CmpOp::Gt => left > right,
        };
        Ok(result)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<i64, MiniPyError> {
        match expr {
            Expr::Literal(n) => Ok(*n),
            Expr::Variable { name, .. } => self.env.get(name).ok_or_else(|| {
                MiniPyError::invariant_violation(format!(
                    "Variable '{}' passed analysis but is missing from the environment",
                    name
                ))
            }),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                let result = match op {
                    BinOp::Add => left.wrapping_add(right),
                    BinOp::Sub => left.wrapping_sub(right),
                    BinOp::Mul => left.wrapping_mul(right),
                    // Integer division; dividing by zero yields 0, the
                    // reference semantics for MiniPython.
                    BinOp::Div => {
                        if right == 0 {
                            0
                        } else {
                            left.wrapping_div(right)
                        }
                    }
                };
                Ok(result)
            }
        }
    }

    /// Helper to write one printed value to either the output buffer or stdout
    fn write_output(&self, value: i64) {
        if let Some(out) = &self.output {
            let mut buffer = out.lock().unwrap();
            let _ = writeln!(buffer, "{}", value);
        } else {
            println!("{}", value);
        }
    }
}
