//! General structural unification between two already-built heap terms.
//!
//! The instruction-driven head match (`resolver::match_head_arg`) only
//! needs this for the `next_var`/`next_var` case — two variables meeting
//! mid-structure — and for `=/2`. Everywhere else the compiled
//! instruction stream tells the resolver exactly what shape to expect,
//! which is cheaper than a fully generic unify.

use super::heap::{Heap, HeapCell, HeapRef};
use super::trail::Trail;

/// Attempt to unify `a` and `b`, recording every binding made on
/// `trail`. Returns `false` on mismatch, leaving any partial bindings in
/// place — callers must roll back to a pre-call trail mark themselves.
pub fn unify(heap: &mut Heap, trail: &mut Trail, a: HeapRef, b: HeapRef) -> bool {
    let a = heap.deref(a);
    let b = heap.deref(b);
    if a == b {
        return true;
    }

    match (heap.cell(a).clone(), heap.cell(b).clone()) {
        (HeapCell::Var(_), _) => bind(heap, trail, a, b),
        (_, HeapCell::Var(_)) => bind(heap, trail, b, a),
        (HeapCell::Atom(n1), HeapCell::Atom(n2)) => n1 == n2,
        (HeapCell::Int(x), HeapCell::Int(y)) => x == y,
        (HeapCell::Real(x), HeapCell::Real(y)) => x == y,
        (HeapCell::Nil, HeapCell::Nil) => true,
        (HeapCell::Struct(n1, args1), HeapCell::Struct(n2, args2)) => {
            n1 == n2
                && args1.len() == args2.len()
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(&x, &y)| unify(heap, trail, x, y))
        }
        (HeapCell::Cons(h1, t1), HeapCell::Cons(h2, t2)) => {
            unify(heap, trail, h1, h2) && unify(heap, trail, t1, t2)
        }
        _ => false,
    }
}

fn bind(heap: &mut Heap, trail: &mut Trail, var: HeapRef, value: HeapRef) -> bool {
    heap.bind(var, value);
    trail.record(var);
    true
}

#[cfg(test)]
#[path = "unify_tests.rs"]
mod unify_tests;
