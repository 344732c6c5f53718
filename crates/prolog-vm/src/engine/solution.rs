//! Solution materialization: reads a query's bound heap terms back out
//! as owned values keyed by the original source variable names — the
//! bridge between the resolver's internal `HeapRef` graph and a
//! caller-facing binding set. The compiler's `CompiledQuery::var_slots`
//! supplies the name-id -> slot mapping; this module only needs the
//! slots and the heap they point into.

use std::collections::HashMap;

use prolog_bytecode::VarSlot;
use prolog_core::{Interner, VarId};

use super::error::RuntimeError;
use super::frame::Frame;
use super::heap::{Heap, HeapCell, HeapRef};

/// A fully-dereferenced term read back from the heap, independent of any
/// `HeapRef` — the value a caller actually sees in a solution.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Atom(String),
    Int(i64),
    Real(f64),
    Nil,
    Struct(String, Vec<Binding>),
    Cons(Box<Binding>, Box<Binding>),
    /// Still unbound at solution time. Reported structurally rather than
    /// by a synthesized name, since it never had a source name of its own.
    Unbound,
}

/// One solution: the query's variables bound to fully-dereferenced
/// terms, restricted to the variables the original query named.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    bindings: HashMap<String, Binding>,
}

impl Solution {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Build a solution from a query's compiled variable slots, reading
    /// each one's bound value out of `frame`'s slots through `heap`. A
    /// slot with no occurrence recorded yet reports as [`Binding::Unbound`]
    /// rather than erroring — an unbound query variable is a legitimate
    /// (if uninformative) solution.
    pub(crate) fn materialize(
        var_slots: &HashMap<VarId, VarSlot>,
        frame: &Frame,
        heap: &Heap,
        interner: &Interner,
    ) -> Result<Solution, RuntimeError> {
        let mut bindings = HashMap::with_capacity(var_slots.len());
        for (&var_id, &slot) in var_slots {
            let name = interner.name_of_var(var_id)?.to_owned();
            let value = match frame.slot(slot) {
                Some(r) => read_term(heap, interner, r)?,
                None => Binding::Unbound,
            };
            bindings.insert(name, value);
        }
        Ok(Solution { bindings })
    }
}

fn read_term(heap: &Heap, interner: &Interner, r: HeapRef) -> Result<Binding, RuntimeError> {
    let d = heap.deref(r);
    Ok(match heap.cell(d) {
        HeapCell::Var(_) => Binding::Unbound,
        HeapCell::Atom(name) => {
            let (text, _) = interner.name_of(*name)?;
            Binding::Atom(text.to_owned())
        }
        HeapCell::Int(v) => Binding::Int(*v),
        HeapCell::Real(v) => Binding::Real(*v),
        HeapCell::Nil => Binding::Nil,
        HeapCell::Struct(name, args) => {
            let (text, _) = interner.name_of(*name)?;
            let text = text.to_owned();
            let args = args.clone();
            let mut members = Vec::with_capacity(args.len());
            for arg in args {
                members.push(read_term(heap, interner, arg)?);
            }
            Binding::Struct(text, members)
        }
        HeapCell::Cons(h, t) => {
            let (h, t) = (*h, *t);
            Binding::Cons(
                Box::new(read_term(heap, interner, h)?),
                Box::new(read_term(heap, interner, t)?),
            )
        }
    })
}

#[cfg(test)]
#[path = "solution_tests.rs"]
mod solution_tests;
