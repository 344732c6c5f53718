//! Interning of functor and variable names into compact integer ids.
//!
//! Converts source-level names into cheap handles (`FunctorId`, `VarId`).
//! Comparing two ids is O(1) integer comparison; downstream bytecode and
//! the resolver carry only ids, never strings.
//!
//! Functor identity is `(name, arity)` — `foo/1` and `foo/2` intern to
//! distinct ids. Variable identity is the bare name. The two id spaces
//! are disjoint by construction (separate counters, separate types).

use std::collections::HashMap;

use crate::error::InternError;

/// A compact handle for an interned `(name, arity)` functor.
///
/// Arity is part of identity, so `foo/1` and `foo/2` never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FunctorId(u32);

impl FunctorId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// A compact handle for an interned variable name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Bidirectional map between printable functor/variable names and the
/// compact ids the compiler and VM operate on.
///
/// Two independent counters back the two id spaces, so a `FunctorId` and
/// a `VarId` with the same raw value still name unrelated things — the
/// type system keeps callers from conflating them.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    functors: HashMap<(String, u32), FunctorId>,
    functor_names: Vec<(String, u32)>,
    variables: HashMap<String, VarId>,
    variable_names: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a functor name at a given arity. Idempotent for equal
    /// `(name, arity)` pairs.
    pub fn intern_functor(&mut self, name: &str, arity: u32) -> Result<FunctorId, InternError> {
        if name.is_empty() {
            return Err(InternError::InvalidName);
        }
        let key = (name.to_owned(), arity);
        if let Some(&id) = self.functors.get(&key) {
            return Ok(id);
        }
        let id = FunctorId(self.functor_names.len() as u32);
        self.functor_names.push(key.clone());
        self.functors.insert(key, id);
        Ok(id)
    }

    /// Intern a variable name. Idempotent for equal names.
    pub fn intern_variable(&mut self, name: &str) -> Result<VarId, InternError> {
        if name.is_empty() {
            return Err(InternError::InvalidName);
        }
        if let Some(&id) = self.variables.get(name) {
            return Ok(id);
        }
        let id = VarId(self.variable_names.len() as u32);
        self.variable_names.push(name.to_owned());
        self.variables.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Reverse lookup: functor name and arity for an id.
    pub fn name_of(&self, id: FunctorId) -> Result<(&str, u32), InternError> {
        self.functor_names
            .get(id.0 as usize)
            .map(|(name, arity)| (name.as_str(), *arity))
            .ok_or(InternError::UnknownId)
    }

    /// Reverse lookup: variable name for an id.
    pub fn name_of_var(&self, id: VarId) -> Result<&str, InternError> {
        self.variable_names
            .get(id.0 as usize)
            .map(String::as_str)
            .ok_or(InternError::UnknownId)
    }

    pub fn functor_count(&self) -> usize {
        self.functor_names.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }
}

#[cfg(test)]
#[path = "interner_tests.rs"]
mod interner_tests;
