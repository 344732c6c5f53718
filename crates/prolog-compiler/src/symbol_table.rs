//! A nested-scope, two-key map of per-term annotations.
//!
//! Scopes nest following the clause/term tree (`enter_scope`/`leave_scope`
//! mirror the positional traverser's enter/leave events); the annotation
//! values themselves live in table-wide *field channels* addressed by
//! `(SymbolKey, field name)`, so `get_values` can sweep one field across
//! every scope without walking the scope tree.

use std::collections::HashMap;

use prolog_core::SymbolKey;

use crate::error::SymbolTableError;

/// A value recorded against one symbol key in one field channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(u32),
}

impl Value {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(self) -> Option<u32> {
        match self {
            Value::Int(n) => Some(n),
            Value::Bool(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct FieldChannel {
    values: HashMap<SymbolKey, Value>,
    order: Vec<SymbolKey>,
    low_mark: usize,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<usize>,
    primary: Option<SymbolKey>,
    children: HashMap<SymbolKey, usize>,
}

/// An opaque handle to a scope, returned by `enter_scope`/`leave_scope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    stack: Vec<usize>,
    fields: HashMap<&'static str, FieldChannel>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            stack: vec![0],
            fields: HashMap::new(),
        }
    }

    fn current(&self) -> usize {
        *self.stack.last().expect("scope stack is never empty")
    }

    pub fn get_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The primary key of the current scope, usable later to jump
    /// straight back to this scope's row via `get`/`put` without
    /// re-walking the tree (field channels are keyed by symbol key alone).
    pub fn get_symbol_key(&self) -> Option<SymbolKey> {
        self.scopes[self.current()].primary
    }

    /// Enter (creating if needed) the named child scope of the current
    /// scope.
    pub fn enter_scope(&mut self, key: SymbolKey) -> ScopeId {
        let parent = self.current();
        let child = if let Some(&existing) = self.scopes[parent].children.get(&key) {
            existing
        } else {
            let id = self.scopes.len();
            self.scopes.push(Scope {
                parent: Some(parent),
                primary: Some(key),
                children: HashMap::new(),
            });
            self.scopes[parent].children.insert(key, id);
            id
        };
        self.stack.push(child);
        ScopeId(child)
    }

    /// Pop to the parent scope that produced the current one (LIFO).
    pub fn leave_scope(&mut self) -> Result<ScopeId, SymbolTableError> {
        if self.stack.len() <= 1 {
            return Err(SymbolTableError::ScopeDetached);
        }
        self.stack.pop();
        Ok(ScopeId(self.current()))
    }

    /// Record `value` for `key` in `field`, appending to that field's
    /// processing order if this is the key's first value there.
    pub fn put(&mut self, key: SymbolKey, field: &'static str, value: Value) {
        let channel = self.fields.entry(field).or_default();
        if !channel.values.contains_key(&key) {
            channel.order.push(key);
        }
        channel.values.insert(key, value);
    }

    pub fn get(&self, key: SymbolKey, field: &str) -> Option<Value> {
        self.fields.get(field)?.values.get(&key).copied()
    }

    /// Every entry currently recorded for `field`, across the whole tree.
    pub fn get_values(&self, field: &str) -> impl Iterator<Item = (SymbolKey, Value)> + '_ {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|channel| channel.values.iter().map(|(&k, &v)| (k, v)))
    }

    /// Drop every value recorded at or before `key`'s position in
    /// `field`'s processing order.
    pub fn clear_up_to(&mut self, key: SymbolKey, field: &str) {
        let Some(channel) = self.fields.get_mut(field) else {
            return;
        };
        let Some(pos) = channel.order.iter().position(|&k| k == key) else {
            return;
        };
        for dropped in channel.order.drain(..=pos) {
            channel.values.remove(&dropped);
        }
        channel.low_mark = channel.low_mark.saturating_sub(pos + 1);
    }

    /// Remember `key`'s position in `field`'s order as the low-water mark.
    pub fn set_low_mark(&mut self, key: SymbolKey, field: &'static str) {
        let channel = self.fields.entry(field).or_default();
        if let Some(pos) = channel.order.iter().position(|&k| k == key) {
            channel.low_mark = pos;
        }
    }

    /// Drop every value recorded before `field`'s low-water mark.
    pub fn clear_up_to_low_mark(&mut self, field: &str) {
        let Some(channel) = self.fields.get_mut(field) else {
            return;
        };
        for dropped in channel.order.drain(..channel.low_mark) {
            channel.values.remove(&dropped);
        }
        channel.low_mark = 0;
    }
}

#[cfg(test)]
#[path = "symbol_table_tests.rs"]
mod symbol_table_tests;
