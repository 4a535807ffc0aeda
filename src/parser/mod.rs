/*
    This module parses rewrite grammar files
*/

pub mod lexer;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::error_handling::*;
use crate::grammar::*;
use itertools::Itertools;
use lexer::*;

#[derive(Debug)]
pub enum CompileErrorType {
    // The lexer found a character that is not part of the language
    UnknownCharacter(char),
    // The current parser state does not accept this token
    UnexpectedToken { found: Token, expected: Vec<TokenKind> },
    // A `=>` with nothing to rewrite in front of it
    MissingPattern,
    // The tokens ran out before the program was complete
    // This is a problem with the lexer, not the grammar
    UnexpectedEnd,
    // The grammar file does not exist
    MissingFile,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UnknownCharacter(a), CompileErrorType::UnknownCharacter(b)) => a == b,
            (
                CompileErrorType::UnexpectedToken { found: a, expected: x },
                CompileErrorType::UnexpectedToken { found: b, expected: y }
            ) => a == b && x == y,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::UnknownCharacter(c) => write!(f, "Unknown character `{}`", c),
            CompileErrorType::UnexpectedToken { found, expected } if expected.is_empty() => {
                write!(f, "Unexpected token `{}`, nothing more was expected", found)
            }
            CompileErrorType::UnexpectedToken { found, expected } => {
                write!(f, "Unexpected token `{}`, expected {}", found, expected.iter().join(" or "))
            }
            CompileErrorType::MissingPattern => write!(f, "Unexpected token `=>`, no pattern to rewrite was found"),
            CompileErrorType::UnexpectedEnd => write!(f, "Token stream ended early (this is a problem with the lexer, not the grammar)"),
            CompileErrorType::MissingFile => write!(f, "File not found"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type CompileResult<T> = std::result::Result<T, CompileError>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::file(file.to_path_buf()),
        error: CompileErrorType::FileError(error)
    }
}

// Each state owns only the part of the rule being built that it needs
#[derive(Debug, PartialEq)]
enum State {
    StartProgram,
    StartGroupDefinition { pattern: Vec<Symbol> },
    BeginningOfGroupDefinition,
    GroupDefinition { pattern: Vec<Symbol> },
    OutputStart { pattern: Vec<Symbol>, rewrite: Rewrite },
    OutputDefinition { pattern: Vec<Symbol>, rewrite: Rewrite, current: Alternative },
    EndOfProgram,
}

impl State {
    fn expected(&self) -> &'static [TokenKind] {
        use TokenKind::*;
        match self {
            State::StartProgram => &[Start],
            State::StartGroupDefinition { .. } => &[Assign],
            State::BeginningOfGroupDefinition => &[NewLine, EndOfFile, Terminal, Nonterminal],
            State::GroupDefinition { .. } => &[Terminal, Nonterminal, Assign],
            State::OutputStart { .. } => &[Terminal, Nonterminal, Epsilon],
            State::OutputDefinition { .. } => &[Terminal, Nonterminal, Or, NewLine, EndOfFile],
            State::EndOfProgram => &[],
        }
    }
}

impl Token {
    fn symbol(&self) -> Option<Symbol> {
        match self {
            Token::Terminal(c) => Some(Symbol::Terminal(*c)),
            Token::Nonterminal(c) => Some(Symbol::Nonterminal(*c)),
            Token::Start => Some(Symbol::Start),
            Token::Epsilon => Some(Symbol::Epsilon),
            _ => None
        }
    }
}

fn finish(pattern: Vec<Symbol>, mut rewrite: Rewrite, current: Alternative) -> Rule {
    rewrite.push(current);
    Rule { pattern, rewrite }
}

// One step of the state machine. A finished rule is handed back to be
// appended to the grammar
fn transition(state: State, token: Token) -> Result<(State, Option<Rule>)> {
    use State::*;

    let next = match (state, token) {
        (StartProgram, Token::Start) => StartGroupDefinition { pattern: vec![Symbol::Start] },
        (StartGroupDefinition { pattern }, Token::Assign) => OutputStart { pattern, rewrite: Vec::new() },

        (BeginningOfGroupDefinition, Token::NewLine) => GroupDefinition { pattern: Vec::new() },
        (BeginningOfGroupDefinition, Token::EndOfFile) => EndOfProgram,
        (BeginningOfGroupDefinition, Token::Terminal(_) | Token::Nonterminal(_)) => GroupDefinition {
            pattern: token.symbol().into_iter().collect()
        },

        (GroupDefinition { mut pattern }, Token::Terminal(_) | Token::Nonterminal(_)) => {
            pattern.extend(token.symbol());
            GroupDefinition { pattern }
        }
        (GroupDefinition { pattern }, Token::Assign) => {
            if pattern.is_empty() {
                return Err(CompileErrorType::MissingPattern);
            }
            OutputStart { pattern, rewrite: Vec::new() }
        }

        (OutputStart { pattern, rewrite }, Token::Terminal(_) | Token::Nonterminal(_) | Token::Epsilon) => {
            OutputDefinition { pattern, rewrite, current: token.symbol().into_iter().collect() }
        }

        (OutputDefinition { pattern, rewrite, mut current }, Token::Terminal(_) | Token::Nonterminal(_)) => {
            current.extend(token.symbol());
            OutputDefinition { pattern, rewrite, current }
        }
        (OutputDefinition { pattern, mut rewrite, current }, Token::Or) => {
            rewrite.push(current);
            OutputStart { pattern, rewrite }
        }
        (OutputDefinition { pattern, rewrite, current }, Token::NewLine) => {
            return Ok((BeginningOfGroupDefinition, Some(finish(pattern, rewrite, current))));
        }
        (OutputDefinition { pattern, rewrite, current }, Token::EndOfFile) => {
            return Ok((EndOfProgram, Some(finish(pattern, rewrite, current))));
        }

        (state, found) => {
            return Err(CompileErrorType::UnexpectedToken {
                found,
                expected: state.expected().to_vec()
            });
        }
    };

    Ok((next, None))
}

// Runs the token stream through the parser state machine until the end of
// the program. The first rule of the result is always `S => ...`
pub fn parse_tokens(tokens: &[Lexeme]) -> CompileResult<Grammar> {
    let mut grammar = Grammar::default();
    let mut state = State::StartProgram;

    for lexeme in tokens {
        let (next, finished) = transition(state, lexeme.token).map_err(|error| CompileError {
            location: lexeme.location.clone(),
            error
        })?;
        grammar.rules.extend(finished);
        state = next;

        if state == State::EndOfProgram {
            return Ok(grammar);
        }
    }

    Err(CompileError {
        location: tokens.last().map(|l| l.location.clone()).unwrap_or_default(),
        error: CompileErrorType::UnexpectedEnd
    })
}

pub fn parse_source(file: &Path, text: &str) -> CompileResult<Grammar> {
    let tokens = tokenize(file, text)?;
    parse_tokens(&tokens)
}

pub fn parse_file(path: &PathBuf) -> CompileResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(e, path))?;
    parse_source(path, &text)
}
