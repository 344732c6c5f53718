//! Token kinds for the surface syntax, recognized with `logos`.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"%[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Tok {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    #[token(":-")]
    Neck,
    #[token("?-")]
    Query,
    #[token(";")]
    Semicolon,

    #[token("\\=")]
    NotEquals,
    #[token("=")]
    Equals,
    #[token("=<")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token("**")]
    Pow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("!")]
    Cut,

    #[regex(r"[a-z][A-Za-z0-9_]*")]
    Atom,
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    QuotedAtom,
    #[regex(r"[A-Z_][A-Za-z0-9_]*")]
    Var,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod token_tests;
