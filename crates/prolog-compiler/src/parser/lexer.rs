//! Tokenizes source text into an owned token stream the grammar consumes.

use logos::Logos;

use crate::error::ParseError;
use crate::parser::token::Tok;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: Tok,
    pub text: String,
}

pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Tok::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                return Err(ParseError::UnexpectedToken {
                    found: lexer.slice().to_string(),
                    expected: "a valid token",
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod lexer_tests;
