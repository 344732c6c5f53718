//! Error types for every stage of the pipeline: lexing/parsing,
//! scope bookkeeping, and clause linkage.

/// Errors from turning source text into a `Clause` AST.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token {found:?}, expected {expected}")]
    UnexpectedToken { found: String, expected: &'static str },
    #[error("clause is missing its terminating '.'")]
    UnterminatedClause,
    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),
    #[error("empty argument list: use an atom instead of f()")]
    EmptyArgumentList,
    #[error("recursion limit exceeded while parsing a term")]
    RecursionLimitExceeded,
    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// Errors from [`crate::symbol_table::SymbolTable`] misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SymbolTableError {
    #[error("scope has already been left")]
    ScopeDetached,
}

/// A call to an undefined predicate, in strict linkage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("predicate {name:?}/{arity} is called but never defined")]
pub struct LinkageError {
    pub name: String,
    pub arity: u32,
}

/// Top-level compilation error, composed from every stage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Linkage(#[from] LinkageError),
    #[error("interning failed: {0}")]
    Intern(#[from] prolog_core::InternError),
    #[error(transparent)]
    Bytecode(#[from] prolog_bytecode::BytecodeError),
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
