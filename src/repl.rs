// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for the MiniPython language.
// Provides an interactive shell for executing MiniPython programs with:
// - Multi-line input support for if/while blocks
// - Command history with up/down arrow navigation
// - Special commands (:help, :clear, :quit)
// - Proper error handling and display
//
// Each complete input is compiled and executed as a standalone program:
// the full lex/parse/analyze/evaluate pipeline runs per submission, and no
// declarations or values persist between submissions.

use crate::errors::MiniPyError;
use crate::interpreter::Interpreter;
use crate::lexer;
use crate::parser;
use crate::semantic;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// REPL session that handles user interaction
pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new REPL session
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let editor = DefaultEditor::new()?;
        Ok(Repl { editor })
    }

    /// Displays the welcome banner with version and help information
    fn show_banner(&self) {
        println!("{}", "╔══════════════════════════════════════════════════════╗".bright_cyan());
        println!("{}", "║        MiniPy REPL v0.1.0 - Interactive Shell        ║".bright_cyan());
        println!("{}", "╚══════════════════════════════════════════════════════╝".bright_cyan());
        println!();
        println!(
            "  {} Use {}{}{}{}",
            "Welcome!".bright_green(),
            ":".bright_blue(),
            "help".bright_yellow(),
            " for commands or ".bright_blue(),
            ":quit".bright_yellow()
        );
        println!("  {} Multi-line input: End with unclosed braces", "Tip:".bright_magenta());
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            // Determine prompt based on whether we're in multi-line mode
            let prompt = if buffer.is_empty() {
                "minipy> ".bright_green().to_string()
            } else {
                "......> ".bright_blue().to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    // Check for special commands (only when not in multi-line mode)
                    if buffer.is_empty() && line.trim().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        } else {
                            break; // :quit was called
                        }
                    }

                    // Accumulate input
                    buffer.push_str(&line);
                    buffer.push('\n');

                    // Check if input is complete
                    if self.is_input_complete(&buffer) {
                        self.eval_input(&buffer);
                        buffer.clear();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C (Ctrl+C to interrupt, :quit to exit)".bright_yellow());
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "\nGoodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    eprintln!("{} {}", "Error:".bright_red(), err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'
    /// Returns true to continue REPL, false to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Goodbye!".bright_cyan());
                false
            }
            ":clear" | ":c" => {
                // Clear the screen
                print!("\x1B[2J\x1B[1;1H");
                self.show_banner();
                true
            }
            _ => {
                println!(
                    "{} Unknown command: {}. Type {}{}{}",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":".bright_blue(),
                    "help".bright_yellow(),
                    " for available commands.".bright_blue()
                );
                true
            }
        }
    }

    /// Displays help information about available commands
    fn show_help(&self) {
        println!();
        println!("{}", "REPL Commands:".bright_cyan().bold());
        println!();
        println!("  {}{}  Display this help message", ":help".bright_yellow(), " or :h".dimmed());
        println!("  {}{}  Exit the REPL", ":quit".bright_yellow(), " or :q".dimmed());
        println!("  {}{}  Clear the screen", ":clear".bright_yellow(), " or :c".dimmed());
        println!();
        println!("{}", "Input:".bright_cyan().bold());
        println!();
        println!("  Each submitted program is compiled and run on its own;");
        println!("  declarations do not carry over to the next submission.");
        println!("  Leave braces or parentheses unclosed to continue on the");
        println!("  next line. Close them to execute.");
        println!();
        println!("{}", "Example:".bright_cyan().bold());
        println!();
        println!("  {}", "minipy> int i; i = 0; while (i < 3) {".dimmed());
        println!("  {}", "......>     print(i); i = i + 1;".dimmed());
        println!("  {}", "......> }".dimmed());
        println!();
    }

    /// Checks if the input is syntactically complete
    /// Returns true if all braces and parentheses are balanced
    fn is_input_complete(&self, input: &str) -> bool {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return true;
        }

        let mut brace_count: i64 = 0;
        let mut paren_count: i64 = 0;

        for ch in trimmed.chars() {
            match ch {
                '{' => brace_count += 1,
                '}' => brace_count -= 1,
                '(' => paren_count += 1,
                ')' => paren_count -= 1,
                _ => {}
            }
        }

        brace_count <= 0 && paren_count <= 0
    }

    /// Runs the input through the full pipeline and displays any error
    fn eval_input(&mut self, input: &str) {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return;
        }

        if let Err(err) = Self::run_program(input) {
            self.print_error(&err.with_source_context(input));
        }
    }

    /// Compiles and executes one standalone program
    fn run_program(source: &str) -> Result<(), MiniPyError> {
        let tokens = lexer::tokenize(source)?;
        let program = parser::Parser::new(tokens).parse()?;
        let symbols = semantic::analyze(&program)?;
        let mut interpreter = Interpreter::new(&symbols);
        interpreter.run(&program)
    }

    /// Displays an error message
    fn print_error(&self, err: &MiniPyError) {
        print!("{}", err);
    }
}
