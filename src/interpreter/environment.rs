// File: src/interpreter/environment.rs
//
// Runtime variable storage for the MiniPython evaluator.
// MiniPython has one flat global scope, so the environment is a single
// name-to-value map whose key set is fixed at construction time.

use std::collections::HashMap;

use crate::semantic::SymbolTable;

/// Variable storage for one evaluation.
///
/// The environment is created from the symbol table before execution
/// begins, with every declared name bound to 0. Its key set never changes
/// afterwards: assignments overwrite existing bindings and nothing else is
/// ever inserted, so the keys mirror the symbol table for the lifetime of
/// the evaluation.
///
/// # Examples
///
/// ```ignore
/// let env = Environment::from_symbols(&symbols);
/// assert_eq!(env.get("x"), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct Environment {
    values: HashMap<String, i64>,
}

impl Environment {
    /// Create an environment with every declared name initialized to 0
    pub fn from_symbols(symbols: &SymbolTable) -> Self {
        let values = symbols.iter().map(|(name, _)| (name.clone(), 0)).collect();
        Environment { values }
    }

    /// Get a variable's current value, or None if the name was never declared
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Overwrite an existing binding. Returns false if the name is absent;
    /// the environment never grows, so an absent name is the caller's
    /// signal of an internal inconsistency.
    pub fn set(&mut self, name: &str, value: i64) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All bindings, sorted by name for stable display
    pub fn bindings(&self) -> Vec<(String, i64)> {
        let mut bindings: Vec<(String, i64)> =
            self.values.iter().map(|(name, value)| (name.clone(), *value)).collect();
        bindings.sort();
        bindings
    }
}
