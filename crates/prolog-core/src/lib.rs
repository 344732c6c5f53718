#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the logic engine: interned names, the term
//! model, and the clause/query shapes built out of them.
//!
//! Everything downstream — the symbol table, the instruction generator,
//! the bytecode, the resolver — operates on the types defined here rather
//! than on source text, so parsing happens exactly once per clause.

mod error;
mod interner;
mod term;

pub use error::InternError;
pub use interner::{FunctorId, Interner, VarId};
pub use term::{Clause, SymbolKey, SymbolKeyGen, Term};
