//! Recursive-descent, operator-precedence parser over the owned token
//! stream from [`super::lexer`], producing [`Clause`]/[`Term`] ASTs
//! directly — there is no intermediate concrete syntax tree.
//!
//! Precedence is handled by tiering the grammar one function per level
//! rather than a general Pratt loop: the operator set is small and
//! fixed, so the tiers read as a direct transcription of the table
//! rather than hiding it behind generic climbing logic.
//!
//! `,` and `;` only have special meaning directly inside a clause body
//! or query — nested inside an argument list or parentheses they would
//! just be ordinary terms if this grammar supported writing them there,
//! which it doesn't (out of scope: conjunction/disjunction as a plain
//! term value, e.g. passed to `call/1`). Body-level parsing therefore
//! builds an intermediate [`BodyNode`] rather than routing `,`/`;`
//! through [`Term::Functor`]; `;` is expanded into separate clauses
//! before the annotator or generator ever sees a clause, since the
//! resolver has no runtime disjunction operator to interpret.

use prolog_core::{Clause, Interner, SymbolKeyGen, Term};

use crate::error::ParseError;
use crate::parser::lexer::{lex, Token};
use crate::parser::token::Tok;

const MAX_RECURSION: u32 = 4096;

/// An unexpanded clause body: `,` and `;` kept as explicit nodes until
/// [`expand_body`] turns them into the final list of goal sequences.
enum BodyNode {
    Goal(Term),
    And(Box<BodyNode>, Box<BodyNode>),
    Or(Box<BodyNode>, Box<BodyNode>),
}

pub struct Parser<'i> {
    tokens: Vec<Token>,
    pos: usize,
    interner: &'i mut Interner,
    keys: SymbolKeyGen,
    depth: u32,
}

/// Parse every clause and query in `source`, expanding `;` into separate
/// clauses. Names interned through `interner` are shared across the
/// whole source so clauses sharing a head functor share its id.
pub fn parse(source: &str, interner: &mut Interner) -> Result<Vec<Clause>, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        interner,
        keys: SymbolKeyGen::new(),
        depth: 0,
    };
    parser.parse_clauses()
}

impl<'i> Parser<'i> {
    fn current(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn current_text(&self) -> &str {
        self.tokens
            .get(self.pos)
            .map(|t| t.text.as_str())
            .unwrap_or("")
    }

    fn at(&self, kind: Tok) -> bool {
        self.current() == Some(&kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: Tok, expected: &'static str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else if self.pos >= self.tokens.len() {
            Err(ParseError::UnexpectedEof)
        } else {
            Err(ParseError::UnexpectedToken {
                found: self.current_text().to_string(),
                expected,
            })
        }
    }

    fn enter_recursion(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_RECURSION {
            return Err(ParseError::RecursionLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn functor(&mut self, name: &str, args: Vec<Term>) -> Result<Term, ParseError> {
        let id = self
            .interner
            .intern_functor(name, args.len() as u32)
            .map_err(|_| ParseError::InvalidNumber(name.to_string()))?;
        let key = self.keys.next();
        Ok(Term::functor(key, id, args))
    }

    // --- clauses -----------------------------------------------------

    fn parse_clauses(&mut self) -> Result<Vec<Clause>, ParseError> {
        let mut clauses = Vec::new();
        while self.pos < self.tokens.len() {
            self.keys = SymbolKeyGen::new();
            clauses.extend(self.parse_one_clause()?);
        }
        Ok(clauses)
    }

    fn parse_one_clause(&mut self) -> Result<Vec<Clause>, ParseError> {
        if self.at(Tok::Query) {
            self.bump();
            let body = self.parse_body_1100()?;
            self.expect(Tok::Dot, "'.' terminating a query")?;
            return Ok(expand_body(body)
                .into_iter()
                .map(|body| Clause { head: None, body })
                .collect());
        }

        let head = self.parse_primary()?;

        if self.at(Tok::Neck) {
            self.bump();
            let body = self.parse_body_1100()?;
            self.expect(Tok::Dot, "'.' terminating a clause")?;
            return Ok(expand_body(body)
                .into_iter()
                .map(|body| Clause {
                    head: Some(head.clone()),
                    body,
                })
                .collect());
        }

        self.expect(Tok::Dot, "'.' terminating a fact")?;
        Ok(vec![Clause {
            head: Some(head),
            body: Vec::new(),
        }])
    }

    /// `;` — 1100, xfy (right-associative).
    fn parse_body_1100(&mut self) -> Result<BodyNode, ParseError> {
        self.enter_recursion()?;
        let left = self.parse_body_1000()?;
        let result = if self.at(Tok::Semicolon) {
            self.bump();
            let right = self.parse_body_1100()?;
            Ok(BodyNode::Or(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        };
        self.exit_recursion();
        result
    }

    /// `,` — 1000, xfy (right-associative).
    fn parse_body_1000(&mut self) -> Result<BodyNode, ParseError> {
        self.enter_recursion()?;
        let left = self.parse_goal()?;
        let result = if self.at(Tok::Comma) {
            self.bump();
            let right = self.parse_body_1000()?;
            Ok(BodyNode::And(
                Box::new(BodyNode::Goal(left)),
                Box::new(right),
            ))
        } else {
            Ok(BodyNode::Goal(left))
        };
        self.exit_recursion();
        result
    }

    fn parse_goal(&mut self) -> Result<Term, ParseError> {
        self.parse_700()
    }

    // --- precedence tiers over plain terms ----------------------------

    /// `=`, `\=`, `is`, `<`, `=<`, `>`, `>=` — 700, xfx (non-associative).
    fn parse_700(&mut self) -> Result<Term, ParseError> {
        self.enter_recursion()?;
        let left = self.parse_500()?;
        let op = match self.current() {
            Some(Tok::Equals) => Some("="),
            Some(Tok::NotEquals) => Some("\\="),
            Some(Tok::Lt) => Some("<"),
            Some(Tok::Le) => Some("=<"),
            Some(Tok::Gt) => Some(">"),
            Some(Tok::Ge) => Some(">="),
            Some(Tok::Atom) if self.current_text() == "is" => Some("is"),
            _ => None,
        };
        let result = if let Some(op) = op {
            self.bump();
            let right = self.parse_500()?;
            self.functor(op, vec![left, right])
        } else {
            Ok(left)
        };
        self.exit_recursion();
        result
    }

    /// `+`, `-` — 500, yfx (left-associative).
    fn parse_500(&mut self) -> Result<Term, ParseError> {
        self.enter_recursion()?;
        let mut left = self.parse_400()?;
        loop {
            let op = match self.current() {
                Some(Tok::Plus) => "+",
                Some(Tok::Minus) => "-",
                _ => break,
            };
            self.bump();
            let right = self.parse_400()?;
            left = self.functor(op, vec![left, right])?;
        }
        self.exit_recursion();
        Ok(left)
    }

    /// `*`, `/` — 400, yfx (left-associative).
    fn parse_400(&mut self) -> Result<Term, ParseError> {
        self.enter_recursion()?;
        let mut left = self.parse_200()?;
        loop {
            let op = match self.current() {
                Some(Tok::Star) => "*",
                Some(Tok::Slash) => "/",
                _ => break,
            };
            self.bump();
            let right = self.parse_200()?;
            left = self.functor(op, vec![left, right])?;
        }
        self.exit_recursion();
        Ok(left)
    }

    /// `**` — 200, xfy (right-associative).
    fn parse_200(&mut self) -> Result<Term, ParseError> {
        self.enter_recursion()?;
        let left = self.parse_primary()?;
        let result = if self.at(Tok::Pow) {
            self.bump();
            let right = self.parse_200()?;
            self.functor("**", vec![left, right])
        } else {
            Ok(left)
        };
        self.exit_recursion();
        result
    }

    // --- primaries -----------------------------------------------------

    fn parse_primary(&mut self) -> Result<Term, ParseError> {
        self.enter_recursion()?;
        let result = self.parse_primary_inner();
        self.exit_recursion();
        result
    }

    fn parse_primary_inner(&mut self) -> Result<Term, ParseError> {
        match self.current().cloned() {
            Some(Tok::LParen) => {
                self.bump();
                let term = self.parse_700()?;
                self.expect(Tok::RParen, "closing ')'")?;
                Ok(term)
            }
            Some(Tok::LBracket) => self.parse_list(),
            Some(Tok::Cut) => {
                self.bump();
                self.functor("!", Vec::new())
            }
            Some(Tok::Minus) => {
                self.bump();
                match self.current().cloned() {
                    Some(Tok::Int) => {
                        let token = self.bump();
                        let value: i64 = token
                            .text
                            .parse()
                            .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
                        Ok(Term::Int {
                            key: self.keys.next(),
                            value: -value,
                        })
                    }
                    Some(Tok::Float) => {
                        let token = self.bump();
                        let value: f64 = token
                            .text
                            .parse()
                            .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
                        Ok(Term::Real {
                            key: self.keys.next(),
                            value: -value,
                        })
                    }
                    _ => {
                        let operand = self.parse_200()?;
                        self.functor("-", vec![operand])
                    }
                }
            }
            Some(Tok::Int) => {
                let token = self.bump();
                let value: i64 = token
                    .text
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
                Ok(Term::Int {
                    key: self.keys.next(),
                    value,
                })
            }
            Some(Tok::Float) => {
                let token = self.bump();
                let value: f64 = token
                    .text
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
                Ok(Term::Real {
                    key: self.keys.next(),
                    value,
                })
            }
            Some(Tok::Var) => {
                let token = self.bump();
                let anonymous = token.text == "_";
                let id = self
                    .interner
                    .intern_variable(&token.text)
                    .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
                Ok(Term::var(self.keys.next(), id, anonymous))
            }
            Some(Tok::Str) => {
                let token = self.bump();
                let content = unquote(&token.text);
                self.functor(&content, Vec::new())
            }
            Some(Tok::Atom) | Some(Tok::QuotedAtom) => {
                let token = self.bump();
                let name = if token.kind == Tok::QuotedAtom {
                    unquote(&token.text)
                } else {
                    token.text.clone()
                };
                if self.at(Tok::LParen) {
                    self.bump();
                    let args = self.parse_arg_list()?;
                    self.expect(Tok::RParen, "closing ')' of argument list")?;
                    self.functor(&name, args)
                } else {
                    self.functor(&name, Vec::new())
                }
            }
            _ if self.pos >= self.tokens.len() => Err(ParseError::UnexpectedEof),
            _ => Err(ParseError::UnexpectedToken {
                found: self.current_text().to_string(),
                expected: "a term",
            }),
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Term>, ParseError> {
        if self.at(Tok::RParen) {
            return Err(ParseError::EmptyArgumentList);
        }
        let mut args = vec![self.parse_700()?];
        while self.at(Tok::Comma) {
            self.bump();
            args.push(self.parse_700()?);
        }
        Ok(args)
    }

    fn parse_list(&mut self) -> Result<Term, ParseError> {
        self.expect(Tok::LBracket, "opening '['")?;
        if self.at(Tok::RBracket) {
            self.bump();
            return Ok(Term::Nil { key: self.keys.next() });
        }

        let mut elements = vec![self.parse_700()?];
        while self.at(Tok::Comma) {
            self.bump();
            elements.push(self.parse_700()?);
        }

        let tail = if self.at(Tok::Pipe) {
            self.bump();
            self.parse_700()?
        } else {
            Term::Nil { key: self.keys.next() }
        };
        self.expect(Tok::RBracket, "closing ']'")?;

        Ok(elements.into_iter().rev().fold(tail, |tail, head| Term::Cons {
            key: self.keys.next(),
            head: Box::new(head),
            tail: Box::new(tail),
        }))
    }
}

fn unquote(text: &str) -> String {
    let len = text.chars().count();
    text.chars().skip(1).take(len.saturating_sub(2)).collect()
}

/// Every clause-body variant obtained by distributing `;` branches over
/// `,` sequencing — a body with N independent disjunctions expands into
/// up to 2^N clauses.
fn expand_body(node: BodyNode) -> Vec<Vec<Term>> {
    match node {
        BodyNode::Goal(term) => vec![vec![term]],
        BodyNode::And(left, right) => {
            let left_variants = expand_body(*left);
            let right_variants = expand_body(*right);
            let mut combined = Vec::with_capacity(left_variants.len() * right_variants.len());
            for l in &left_variants {
                for r in &right_variants {
                    let mut goals = l.clone();
                    goals.extend(r.clone());
                    combined.push(goals);
                }
            }
            combined
        }
        BodyNode::Or(left, right) => {
            let mut variants = expand_body(*left);
            variants.extend(expand_body(*right));
            variants
        }
    }
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod grammar_tests;
