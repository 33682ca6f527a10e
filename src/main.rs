// File: src/main.rs
//
// Main entry point for the MiniPy interpreter.
// Handles command-line argument parsing and dispatches to the appropriate
// subcommand (run or repl).

use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use minipy::errors::MiniPyError;
use minipy::interpreter::Interpreter;
use minipy::repl::Repl;
use minipy::{lexer, parser, semantic, tac, tree};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "minipy",
    about = "MiniPy: an interpreter for the MiniPython teaching language",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Run a MiniPython source file
    Run {
        /// Path to the source file
        file: PathBuf,

        /// Print the token stream before parsing
        #[arg(long)]
        show_tokens: bool,

        /// Print the AST after semantic analysis
        #[arg(long)]
        show_ast: bool,

        /// Print the three-address-code listing
        #[arg(long)]
        show_tac: bool,
    },

    /// Launch the interactive MiniPy REPL
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, show_tokens, show_ast, show_tac } => {
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!(
                        "{} cannot read {}: {}",
                        "Error:".bright_red().bold(),
                        file.display(),
                        err
                    );
                    return ExitCode::FAILURE;
                }
            };

            let file_name = file.display().to_string();
            match run_source(&source, show_tokens, show_ast, show_tac) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprint!("{}", err.with_source_context(&source).in_file(file_name));
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Repl => match Repl::new() {
            Ok(mut repl) => match repl.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{} {}", "Error:".bright_red().bold(), err);
                    ExitCode::FAILURE
                }
            },
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                ExitCode::FAILURE
            }
        },
    }
}

/// Drives one source file through the full pipeline, with optional phase
/// diagnostics between the stages
fn run_source(
    source: &str,
    show_tokens: bool,
    show_ast: bool,
    show_tac: bool,
) -> Result<(), MiniPyError> {
    let tokens = lexer::tokenize(source)?;
    if show_tokens {
        for token in &tokens {
            println!("{:>4}:{:<4} {:?}", token.line, token.column, token.kind);
        }
    }

    let program = parser::Parser::new(tokens).parse()?;
    let symbols = semantic::analyze(&program)?;

    if show_ast {
        print!("{}", tree::render(&program));
    }
    if show_tac {
        for line in tac::generate(&program) {
            println!("{}", line);
        }
    }

    let mut interpreter = Interpreter::new(&symbols);
    interpreter.run(&program)
}
