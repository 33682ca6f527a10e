// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for the MiniPython language.
// Converts source code text into a sequence of tokens for parsing.
//
// Supports:
// - Keywords: int, print, if, else, while
// - Identifiers and unsigned integer literals
// - Operators: +, -, *, /, =, ==, !=, <, >
// - Punctuation: ( ) { } ; ,

use crate::errors::{MiniPyError, SourceLocation};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Number(i64),
    Operator(String),
    Punctuation(char),
    Keyword(String),
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::Number(n) => format!("number '{}'", n),
            TokenKind::Operator(op) => format!("'{}'", op),
            TokenKind::Punctuation(c) => format!("'{}'", c),
            TokenKind::Keyword(k) => format!("keyword '{}'", k),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenizes MiniPython source code into a vector of tokens.
///
/// Processes the input character by character, recognizing keywords,
/// identifiers, numbers, operators, and punctuation. Whitespace is skipped;
/// every other unmatched character aborts lexing immediately.
///
/// # Arguments
/// * `source` - The MiniPython source code as a string
///
/// # Returns
/// A vector of tokens ending with an Eof marker, or a `LexError` for the
/// first character that starts no token pattern
pub fn tokenize(source: &str) -> Result<Vec<Token>, MiniPyError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;
    let mut col = 1;

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' => {
                chars.next();
                col += 1;
            }
            '\n' => {
                chars.next();
                line += 1;
                col = 1;
            }
            '0'..='9' => {
                let start_col = col;
                let mut num = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() {
                        num.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }
                let parsed = num.parse().map_err(|_| {
                    MiniPyError::lex_error(
                        format!("Integer literal '{}' is too large", num),
                        SourceLocation::new(line, start_col),
                    )
                })?;
                tokens.push(Token {
                    kind: TokenKind::Number(parsed),
                    line,
                    column: start_col,
                });
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start_col = col;
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }

                let kind = match ident.as_str() {
                    "int" | "print" | "if" | "else" | "while" => TokenKind::Keyword(ident),
                    _ => TokenKind::Identifier(ident),
                };

                tokens.push(Token {
                    kind,
                    line,
                    column: start_col,
                });
            }
            '=' => {
                let start_col = col;
                chars.next();
                col += 1;
                if chars.peek() == Some(&'=') {
                    chars.next();
                    col += 1;
                    tokens.push(Token {
                        kind: TokenKind::Operator("==".into()),
                        line,
                        column: start_col,
                    });
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Operator("=".into()),
                        line,
                        column: start_col,
                    });
                }
            }
            '!' => {
                let start_col = col;
                chars.next();
                col += 1;
                if chars.peek() == Some(&'=') {
                    chars.next();
                    col += 1;
                    tokens.push(Token {
                        kind: TokenKind::Operator("!=".into()),
                        line,
                        column: start_col,
                    });
                } else {
                    return Err(MiniPyError::lex_error(
                        "Unexpected character: '!'".to_string(),
                        SourceLocation::new(line, start_col),
                    )
                    .with_help("'!' is only valid as part of the '!=' operator".to_string()));
                }
            }
            '+' | '-' | '*' | '/' | '<' | '>' => {
                tokens.push(Token {
                    kind: TokenKind::Operator(c.to_string()),
                    line,
                    column: col,
                });
                chars.next();
                col += 1;
            }
            '(' | ')' | '{' | '}' | ',' | ';' => {
                tokens.push(Token {
                    kind: TokenKind::Punctuation(c),
                    line,
                    column: col,
                });
                chars.next();
                col += 1;
            }
            _ => {
                return Err(MiniPyError::lex_error(
                    format!("Unexpected character: '{}'", c),
                    SourceLocation::new(line, col),
                ));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
        column: col,
    });

    Ok(tokens)
}
