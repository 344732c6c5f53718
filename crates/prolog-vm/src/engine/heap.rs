//! The heap: an arena of cells addressed by [`HeapRef`], holding every
//! term built during resolution — variable bindings, functor structures,
//! list cells, literals.
//!
//! Variables are represented by index rather than by reference so that
//! binding chains can be cyclic without borrow-checker contortions: a
//! bound variable cell stores the `HeapRef` it was bound to, and
//! [`Heap::deref`] walks that chain. A variable bound to itself is a
//! no-op and `deref` must not loop forever on it.

use prolog_core::FunctorId;

/// An index into the heap arena. Cheap to copy, cheap to compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeapRef(u32);

impl HeapRef {
    fn new(index: usize) -> Self {
        Self(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HeapCell {
    /// Unbound, or bound to the term at the given reference.
    Var(Option<HeapRef>),
    Atom(FunctorId),
    Struct(FunctorId, Vec<HeapRef>),
    Int(i64),
    Real(f64),
    Nil,
    Cons(HeapRef, HeapRef),
}

#[derive(Default, Debug)]
pub struct Heap {
    cells: Vec<HeapCell>,
}

impl Heap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn push(&mut self, cell: HeapCell) -> HeapRef {
        let r = HeapRef::new(self.cells.len());
        self.cells.push(cell);
        r
    }

    pub fn new_var(&mut self) -> HeapRef {
        self.push(HeapCell::Var(None))
    }

    pub fn new_atom(&mut self, name: FunctorId) -> HeapRef {
        self.push(HeapCell::Atom(name))
    }

    pub fn new_struct(&mut self, name: FunctorId, args: Vec<HeapRef>) -> HeapRef {
        self.push(HeapCell::Struct(name, args))
    }

    pub fn new_int(&mut self, value: i64) -> HeapRef {
        self.push(HeapCell::Int(value))
    }

    pub fn new_real(&mut self, value: f64) -> HeapRef {
        self.push(HeapCell::Real(value))
    }

    pub fn new_nil(&mut self) -> HeapRef {
        self.push(HeapCell::Nil)
    }

    pub fn new_cons(&mut self, head: HeapRef, tail: HeapRef) -> HeapRef {
        self.push(HeapCell::Cons(head, tail))
    }

    pub fn cell(&self, r: HeapRef) -> &HeapCell {
        &self.cells[r.index()]
    }

    /// Walk a binding chain to its representative cell. A variable bound
    /// to itself (a self-loop, possible after certain unifications of
    /// two unbound variables) terminates immediately rather than
    /// spinning: it dereferences to itself.
    pub fn deref(&self, r: HeapRef) -> HeapRef {
        let mut current = r;
        loop {
            match &self.cells[current.index()] {
                HeapCell::Var(Some(next)) if *next != current => current = *next,
                _ => return current,
            }
        }
    }

    /// Bind an unbound variable cell to `value`. Caller is responsible
    /// for recording the binding on the trail first, since undoing it
    /// requires knowing the reference being rewritten.
    pub fn bind(&mut self, var: HeapRef, value: HeapRef) {
        self.cells[var.index()] = HeapCell::Var(Some(value));
    }

    /// Reset a cell back to unbound, used by trail rollback.
    pub fn unbind(&mut self, var: HeapRef) {
        self.cells[var.index()] = HeapCell::Var(None);
    }

    /// Truncate the heap back to `mark` cells, discarding everything
    /// allocated since. Only safe when nothing below `mark` references a
    /// cell above it — true for trail rollback since bindings above the
    /// mark are undone (or discarded) before cells are dropped.
    pub fn truncate(&mut self, mark: usize) {
        self.cells.truncate(mark);
    }
}

#[cfg(test)]
#[path = "heap_tests.rs"]
mod heap_tests;
