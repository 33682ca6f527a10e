// File: src/semantic.rs
//
// Semantic analysis for the MiniPython language.
// Walks the AST once, building a flat symbol table and rejecting
// redeclarations and uses of undeclared variables.
//
// MiniPython has a single global scope: a declaration anywhere in the
// program (including inside if/while bodies) inserts into the same table,
// and names become visible at their point of declaration in linear
// statement order. Forward references are not permitted.

use std::collections::HashMap;

use crate::ast::{Condition, Expr, Program, Stmt};
use crate::errors::{find_closest_match, MiniPyError, SourceLocation};

/// The declared type of a variable. MiniPython only has integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
        }
    }
}

/// Flat mapping from declared variable name to its type.
///
/// Built incrementally during analysis and immutable afterwards: no new
/// declarations appear at runtime, so the evaluator treats the table as a
/// fixed description of the program's variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: HashMap<String, VarType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<VarType> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All declared names, sorted for stable display and suggestions
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VarType)> {
        self.entries.iter()
    }

    fn insert(&mut self, name: String) {
        self.entries.insert(name, VarType::Int);
    }
}

/// Validates a program and produces its symbol table.
///
/// Single forward pass over the statement sequence, recursing into
/// if/while bodies. Fails with `Redeclared` when a name is declared twice
/// (including twice within one declaration) and with `UndeclaredVariable`
/// when a name is referenced before its declaration. Analysis is a pure
/// function of the AST: re-running it yields an identical table, and no
/// partial table is returned on error.
pub fn analyze(program: &Program) -> Result<SymbolTable, MiniPyError> {
    let mut symbols = SymbolTable::new();
    check_stmts(&program.statements, &mut symbols)?;
    Ok(symbols)
}

fn check_stmts(statements: &[Stmt], symbols: &mut SymbolTable) -> Result<(), MiniPyError> {
    for stmt in statements {
        check_stmt(stmt, symbols)?;
    }
    Ok(())
}

fn check_stmt(stmt: &Stmt, symbols: &mut SymbolTable) -> Result<(), MiniPyError> {
    match stmt {
        Stmt::Decl { names, location } => {
            for name in names {
                if symbols.contains(name) {
                    return Err(MiniPyError::redeclared(name, location.clone()));
                }
                symbols.insert(name.clone());
            }
            Ok(())
        }
        Stmt::Assign { name, location, value } => {
            if !symbols.contains(name) {
                return Err(undeclared(name, location, symbols));
            }
            check_expr(value, symbols)
        }
        Stmt::Print { value, .. } => check_expr(value, symbols),
        Stmt::If { condition, then_branch, else_branch } => {
            check_condition(condition, symbols)?;
            check_stmts(then_branch, symbols)?;
            if let Some(else_branch) = else_branch {
                check_stmts(else_branch, symbols)?;
            }
            Ok(())
        }
        Stmt::While { condition, body } => {
            check_condition(condition, symbols)?;
            check_stmts(body, symbols)
        }
    }
}

fn check_condition(condition: &Condition, symbols: &SymbolTable) -> Result<(), MiniPyError> {
    check_expr(&condition.left, symbols)?;
    check_expr(&condition.right, symbols)
}

fn check_expr(expr: &Expr, symbols: &SymbolTable) -> Result<(), MiniPyError> {
    match expr {
        Expr::Literal(_) => Ok(()),
        Expr::Variable { name, location } => {
            if symbols.contains(name) {
                Ok(())
            } else {
                Err(undeclared(name, location, symbols))
            }
        }
        Expr::Binary { left, right, .. } => {
            check_expr(left, symbols)?;
            check_expr(right, symbols)
        }
    }
}

fn undeclared(name: &str, location: &SourceLocation, symbols: &SymbolTable) -> MiniPyError {
    let err = MiniPyError::undeclared_variable(name, location.clone());
    match find_closest_match(name, &symbols.names()) {
        Some(candidate) => err.with_suggestion(candidate.to_string()),
        None => err,
    }
}
