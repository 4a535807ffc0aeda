use std::fmt::Display;
use std::path::Path;

use super::{CompileError, CompileErrorType, CompileResult};
use crate::error_handling::Location;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Token {
    Terminal(char),
    Nonterminal(char),
    Start,
    Epsilon,
    Or,
    Assign,
    NewLine,
    EndOfFile
}

// What kind of token a parser state accepts, without the letter
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenKind {
    Terminal,
    Nonterminal,
    Start,
    Epsilon,
    Or,
    Assign,
    NewLine,
    EndOfFile
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Terminal(c) | Token::Nonterminal(c) => write!(f, "{}", c),
            Token::Start => write!(f, "S"),
            Token::Epsilon => write!(f, "ε"),
            Token::Or => write!(f, "|"),
            Token::Assign => write!(f, "=>"),
            Token::NewLine => write!(f, "new line"),
            Token::EndOfFile => write!(f, "end of file")
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Terminal => write!(f, "terminal (a-z)"),
            TokenKind::Nonterminal => write!(f, "nonterminal (A-Z)"),
            TokenKind::Start => write!(f, "`S`"),
            TokenKind::Epsilon => write!(f, "`ε`"),
            TokenKind::Or => write!(f, "`|`"),
            TokenKind::Assign => write!(f, "`=>`"),
            TokenKind::NewLine => write!(f, "new line"),
            TokenKind::EndOfFile => write!(f, "end of file")
        }
    }
}

// A token and where it was found
#[derive(PartialEq, Debug, Clone)]
pub struct Lexeme {
    pub token: Token,
    pub location: Location
}

fn at(file: &Path, line: usize, column: usize) -> Location {
    Location {
        file: file.to_path_buf(),
        line,
        column
    }
}

fn lex_line(line: &str, line_num: usize, file: &Path, tokens: &mut Vec<Lexeme>) -> CompileResult<()> {
    let mut chars = line.chars().enumerate().peekable();

    while let Some((mut col, c)) = chars.next() {
        let token = match c {
            ' ' | '\t' => continue,
            '/' if chars.peek().map(|&(_, n)| n) == Some('/') => break,
            'E' | 'ε' => Token::Epsilon,
            'S' => Token::Start,
            '|' => Token::Or,
            'a'..='z' => Token::Terminal(c),
            'A'..='Z' => Token::Nonterminal(c),
            '=' | '-' if chars.peek().map(|&(_, n)| n) == Some('>') => {
                // Consume the '>', which is where the token is reported
                col += 1;
                chars.next();
                Token::Assign
            }
            _ => return Err(CompileError {
                location: at(file, line_num, col + 1),
                error: CompileErrorType::UnknownCharacter(c)
            })
        };
        tokens.push(Lexeme { token, location: at(file, line_num, col + 1) });
    }

    Ok(())
}

// Turns a grammar source into tokens. Lines are separated by `NewLine`
// tokens and the result always ends with exactly one `EndOfFile`
pub fn tokenize(file: &Path, text: &str) -> CompileResult<Vec<Lexeme>> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let mut tokens = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;
        lex_line(line, line_num, file, &mut tokens)?;

        if line_num < lines.len() {
            tokens.push(Lexeme {
                token: Token::NewLine,
                location: at(file, line_num, 1)
            });
        }
    }

    // split always yields at least one line
    let last = lines.last().map_or(0, |line| line.chars().count());
    tokens.push(Lexeme {
        token: Token::EndOfFile,
        location: at(file, lines.len(), last)
    });

    Ok(tokens)
}
