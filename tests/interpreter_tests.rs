// Integration tests for the MiniPy interpreter
//
// These tests verify the interpreter's behavior by running complete
// MiniPython programs through the full pipeline and checking the results.
// Tests cover:
// - Declarations, assignment and default initialization
// - Arithmetic with operator precedence
// - Control flow (if/else, while)
// - The division-by-zero policy
// - Error reporting from every phase

use minipy::errors::{ErrorKind, MiniPyError};
use minipy::interpreter::Interpreter;
use minipy::lexer::tokenize;
use minipy::parser::Parser;
use minipy::semantic::{self, SymbolTable};
use minipy::{ast, tree};
use std::sync::{Arc, Mutex};

fn compile(source: &str) -> Result<(ast::Program, SymbolTable), MiniPyError> {
    let tokens = tokenize(source)?;
    let program = Parser::new(tokens).parse()?;
    let symbols = semantic::analyze(&program)?;
    Ok((program, symbols))
}

/// Runs a program and returns the printed lines
fn run_output(source: &str) -> Vec<String> {
    let (program, symbols) = compile(source).expect("program should compile");
    let mut interp = Interpreter::new(&symbols);
    let output = Arc::new(Mutex::new(Vec::new()));
    interp.set_output(Arc::clone(&output));
    interp.run(&program).expect("program should run");

    let bytes = output.lock().unwrap();
    String::from_utf8(bytes.clone())
        .expect("output should be UTF-8")
        .lines()
        .map(|line| line.to_string())
        .collect()
}

/// Runs a program and returns the interpreter for environment inspection
fn run_code(source: &str) -> Interpreter {
    let (program, symbols) = compile(source).expect("program should compile");
    let mut interp = Interpreter::new(&symbols);
    let output = Arc::new(Mutex::new(Vec::new()));
    interp.set_output(Arc::clone(&output));
    interp.run(&program).expect("program should run");
    interp
}

fn compile_err(source: &str) -> MiniPyError {
    compile(source).map(|_| ()).expect_err("compilation should fail")
}

#[test]
fn test_declare_assign_print() {
    let output = run_output("int x, y; x = 5; y = x + 2; print(y);");
    assert_eq!(output, vec!["7"]);
}

#[test]
fn test_unassigned_variable_prints_zero() {
    let output = run_output("int x; print(x);");
    assert_eq!(output, vec!["0"]);
}

#[test]
fn test_redeclaration_is_rejected() {
    let err = compile_err("int x; int x;");
    assert_eq!(err.kind, ErrorKind::Redeclared);
    assert!(err.message.contains("'x'"));
}

#[test]
fn test_assignment_to_undeclared_is_rejected() {
    let err = compile_err("y = 3;");
    assert_eq!(err.kind, ErrorKind::UndeclaredVariable);
    assert!(err.message.contains("'y'"));
}

#[test]
fn test_division_by_zero_yields_zero() {
    let interp = run_code("int a; a = 10 / 0;");
    assert_eq!(interp.env.get("a"), Some(0));
}

#[test]
fn test_while_loop_prints_sequence() {
    let output = run_output("int i; i = 0; while (i < 3) { print(i); i = i + 1; }");
    assert_eq!(output, vec!["0", "1", "2"]);
}

#[test]
fn test_operator_precedence() {
    let interp = run_code("int x; x = 2 + 3 * 4;");
    assert_eq!(interp.env.get("x"), Some(14));
}

#[test]
fn test_parentheses_override_precedence() {
    let interp = run_code("int x; x = (2 + 3) * 4;");
    assert_eq!(interp.env.get("x"), Some(20));
}

#[test]
fn test_division_truncates_toward_zero() {
    let interp = run_code("int x; x = 7 / 2;");
    assert_eq!(interp.env.get("x"), Some(3));
}

#[test]
fn test_subtraction_can_go_negative() {
    let interp = run_code("int x; x = 3 - 10;");
    assert_eq!(interp.env.get("x"), Some(-7));
}

#[test]
fn test_division_by_zero_inside_larger_expression() {
    // The zero result of 5 / 0 participates normally in the rest of
    // the expression.
    let interp = run_code("int x; x = 1 + 5 / 0;");
    assert_eq!(interp.env.get("x"), Some(1));
}

#[test]
fn test_assignment_overwrites_previous_value() {
    let interp = run_code("int x; x = 10; x = 20;");
    assert_eq!(interp.env.get("x"), Some(20));
}

#[test]
fn test_if_true_branch() {
    let output = run_output("int x; x = 5; if (x > 3) { print(1); }");
    assert_eq!(output, vec!["1"]);
}

#[test]
fn test_if_false_without_else_prints_nothing() {
    let output = run_output("int x; x = 1; if (x > 3) { print(1); }");
    assert!(output.is_empty());
}

#[test]
fn test_if_else_branch() {
    let output = run_output("int x; if (x != 0) { print(1); } else { print(2); }");
    assert_eq!(output, vec!["2"]);
}

#[test]
fn test_while_false_condition_never_executes() {
    let output = run_output("int x; while (x > 0) { print(x); x = x - 1; }");
    assert!(output.is_empty());
}

#[test]
fn test_nested_control_flow() {
    // Print only even numbers below 6 using a nested if
    let source = "\
        int i, half; \
        i = 0; \
        while (i < 6) { \
            half = i / 2; \
            if (half * 2 == i) { print(i); } \
            i = i + 1; \
        }";
    let output = run_output(source);
    assert_eq!(output, vec!["0", "2", "4"]);
}

#[test]
fn test_bare_print_form() {
    let output = run_output("int x; x = 9; print x;");
    assert_eq!(output, vec!["9"]);
}

#[test]
fn test_print_accepts_full_expressions() {
    let output = run_output("int x; x = 2; print(x * x + 1);");
    assert_eq!(output, vec!["5"]);
}

#[test]
fn test_prints_appear_in_program_order() {
    let output = run_output("int a, b; a = 1; b = 2; print(a); print(b); print(a + b);");
    assert_eq!(output, vec!["1", "2", "3"]);
}

#[test]
fn test_declaration_inside_loop_body() {
    // Declarations inside bodies land in the flat global table and are
    // executed as no-ops, so re-entering the block does not redeclare.
    let source = "\
        int i; \
        i = 0; \
        while (i < 2) { int t; t = i * 10; print(t); i = i + 1; }";
    let output = run_output(source);
    assert_eq!(output, vec!["0", "10"]);
}

#[test]
fn test_duplicate_name_in_single_declaration() {
    let err = compile_err("int a, b, a;");
    assert_eq!(err.kind, ErrorKind::Redeclared);
}

#[test]
fn test_use_before_declaration_is_rejected() {
    let err = compile_err("x = 1; int x;");
    assert_eq!(err.kind, ErrorKind::UndeclaredVariable);
}

#[test]
fn test_undeclared_in_condition_is_rejected() {
    let err = compile_err("int i; while (i < limit) { i = i + 1; }");
    assert_eq!(err.kind, ErrorKind::UndeclaredVariable);
    assert!(err.message.contains("'limit'"));
}

#[test]
fn test_lex_error_surfaces_position() {
    let err = compile_err("int x;\nx = 5 $ 3;");
    assert_eq!(err.kind, ErrorKind::LexError);
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, 7);
}

#[test]
fn test_parse_error_reports_expected_and_found() {
    let err = compile_err("int x; x = ;");
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert!(err.message.contains("Expected"));
    assert!(err.message.contains("';'"));
}

#[test]
fn test_semantic_error_aborts_before_execution() {
    // The undeclared reference comes after a print; nothing may execute.
    let (result, output) = {
        let output = Arc::new(Mutex::new(Vec::new()));
        let result = (|| -> Result<(), MiniPyError> {
            let tokens = tokenize("int x; print(x); y = 1;")?;
            let program = Parser::new(tokens).parse()?;
            let symbols = semantic::analyze(&program)?;
            let mut interp = Interpreter::new(&symbols);
            interp.set_output(Arc::clone(&output));
            interp.run(&program)
        })();
        let bytes = output.lock().unwrap().clone();
        (result, bytes)
    };
    let err = result.expect_err("analysis should fail");
    assert_eq!(err.kind, ErrorKind::UndeclaredVariable);
    assert!(output.is_empty(), "no output may be produced after a semantic error");
}

#[test]
fn test_environment_keys_match_symbol_table() {
    let (program, symbols) = compile("int a, b; a = 1; if (a > 0) { int c; c = 2; b = c; }")
        .expect("program should compile");
    let interp = {
        let mut interp = Interpreter::new(&symbols);
        interp.set_output(Arc::new(Mutex::new(Vec::new())));
        interp.run(&program).expect("program should run");
        interp
    };

    let env_names: Vec<String> =
        interp.env.bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(env_names, symbols.names());
}

#[test]
fn test_every_variable_reference_resolves_after_analysis() {
    let (program, symbols) =
        compile("int x, y; x = 2; y = x * x; if (y > x) { print(y - x); }")
            .expect("program should compile");

    // Walk the validated AST generically; every variable label must be a
    // declared name.
    fn walk(node: tree::AstNode<'_>, symbols: &SymbolTable) {
        if let tree::AstNode::Expr(expr) = node {
            if let ast::Expr::Variable { name, .. } = expr {
                assert!(symbols.contains(name), "orphan reference '{}'", name);
            }
        }
        for child in node.children() {
            walk(child, symbols);
        }
    }
    walk(tree::AstNode::Program(&program), &symbols);
}

#[test]
fn test_analysis_is_idempotent() {
    let tokens = tokenize("int x, y; x = 5; y = x + 2; print(y);").expect("lexing");
    let program = Parser::new(tokens).parse().expect("parsing");
    let first = semantic::analyze(&program).expect("first analysis");
    let second = semantic::analyze(&program).expect("second analysis");
    assert_eq!(first, second);
}

#[test]
fn test_fresh_environment_per_interpreter() {
    let (program, symbols) = compile("int x; x = 41;").expect("program should compile");

    let mut first = Interpreter::new(&symbols);
    first.run(&program).expect("first run");
    assert_eq!(first.env.get("x"), Some(41));

    // A second interpreter starts from zeroed state regardless of the
    // first run's mutations.
    let second = Interpreter::new(&symbols);
    assert_eq!(second.env.get("x"), Some(0));
}

#[test]
fn test_empty_program_is_valid() {
    let output = run_output("");
    assert!(output.is_empty());
}

#[test]
fn test_undeclared_variable_gets_suggestion() {
    let err = compile_err("int counter; counter = 1; print(countr);");
    assert_eq!(err.kind, ErrorKind::UndeclaredVariable);
    assert_eq!(err.suggestion.as_deref(), Some("counter"));
}
