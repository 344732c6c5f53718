//! Dispatch for the built-ins that are self-contained goals: they either
//! succeed or fail deterministically without invoking the resolver
//! recursively. `call/1` and `not/1` need the resolver itself (they
//! prove a nested goal) and are special-cased in
//! [`super::resolver::Resolver`] instead.

use std::cmp::Ordering;

use prolog_core::Interner;

use super::arith::eval;
use super::error::RuntimeError;
use super::heap::{Heap, HeapCell};
use super::heap::HeapRef;
use super::trail::Trail;
use super::unify::unify;

/// Outcome of a self-contained built-in: whether the goal succeeded.
/// `Err` is reserved for the error table's strict-mode cases; lenient
/// failures (the common case — a type error just fails the goal) are
/// folded into `Ok(false)` by the caller's mode check.
pub type BuiltinResult = Result<bool, RuntimeError>;

/// Attempt to dispatch `name/arity` as a self-contained built-in.
/// `None` means the name isn't one of these — the caller should fall
/// back to ordinary user-predicate resolution.
pub fn dispatch(
    name: &str,
    args: &[HeapRef],
    heap: &mut Heap,
    trail: &mut Trail,
    interner: &Interner,
) -> Option<BuiltinResult> {
    let result = match (name, args) {
        ("true", []) => Ok(true),
        ("fail", []) | ("false", []) => Ok(false),
        ("=", [a, b]) => Ok(unify(heap, trail, *a, *b)),
        ("\\=", [a, b]) => {
            let mark = trail.mark();
            let heap_mark = heap.len();
            let unified = unify(heap, trail, *a, *b);
            trail.undo_to(heap, mark);
            heap.truncate(heap_mark);
            Ok(!unified)
        }
        ("is", [result, expr]) => match eval(heap, interner, *expr) {
            Ok(number) => {
                let value = number.to_heap(heap);
                Ok(unify(heap, trail, *result, value))
            }
            Err(e) => Err(e),
        },
        ("<", [a, b]) => compare(heap, interner, *a, *b, |o| o == Ordering::Less),
        ("=<", [a, b]) => compare(heap, interner, *a, *b, |o| o != Ordering::Greater),
        (">", [a, b]) => compare(heap, interner, *a, *b, |o| o == Ordering::Greater),
        (">=", [a, b]) => compare(heap, interner, *a, *b, |o| o != Ordering::Less),
        ("integer", [a]) => Ok(matches!(heap.cell(heap.deref(*a)), HeapCell::Int(_))),
        ("float", [a]) => Ok(matches!(heap.cell(heap.deref(*a)), HeapCell::Real(_))),
        ("var", [a]) => Ok(matches!(heap.cell(heap.deref(*a)), HeapCell::Var(_))),
        _ => return None,
    };
    Some(result)
}

fn compare(
    heap: &Heap,
    interner: &Interner,
    a: HeapRef,
    b: HeapRef,
    relation: impl Fn(Ordering) -> bool,
) -> BuiltinResult {
    let x = eval(heap, interner, a)?;
    let y = eval(heap, interner, b)?;
    Ok(relation(x.partial_cmp(y)))
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod builtins_tests;
