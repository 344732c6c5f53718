//! Arithmetic evaluation for `is/2` and the numeric comparisons.
//!
//! Operator precedence is already baked into the term shape by the
//! parser — this just walks the already-nested structure and applies
//! each operator, it never needs to reason about precedence itself.

use prolog_core::Interner;

use super::error::RuntimeError;
use super::heap::{Heap, HeapCell};
use super::heap::HeapRef;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Real(r) => r,
        }
    }

    pub fn to_heap(self, heap: &mut Heap) -> HeapRef {
        match self {
            Number::Int(i) => heap.new_int(i),
            Number::Real(r) => heap.new_real(r),
        }
    }

    pub fn partial_cmp(self, other: Number) -> std::cmp::Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            _ => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(std::cmp::Ordering::Equal),
        }
    }
}

/// Evaluate the dereferenced term at `r` as an arithmetic expression.
pub fn eval(heap: &Heap, interner: &Interner, r: HeapRef) -> Result<Number, RuntimeError> {
    let r = heap.deref(r);
    match heap.cell(r) {
        HeapCell::Int(i) => Ok(Number::Int(*i)),
        HeapCell::Real(f) => Ok(Number::Real(*f)),
        HeapCell::Var(_) => Err(RuntimeError::InstantiationError),
        HeapCell::Struct(name, args) => {
            let (op, arity) = interner.name_of(*name)?;
            match (op, arity, args.as_slice()) {
                ("+", 2, [a, b]) => binary(heap, interner, *a, *b, |x, y| x + y, |x, y| x + y),
                ("-", 2, [a, b]) => binary(heap, interner, *a, *b, |x, y| x - y, |x, y| x - y),
                ("*", 2, [a, b]) => binary(heap, interner, *a, *b, |x, y| x * y, |x, y| x * y),
                ("/", 2, [a, b]) => {
                    let x = eval(heap, interner, *a)?;
                    let y = eval(heap, interner, *b)?;
                    Ok(Number::Real(x.as_f64() / y.as_f64()))
                }
                ("mod", 2, [a, b]) => {
                    let x = eval(heap, interner, *a)?;
                    let y = eval(heap, interner, *b)?;
                    match (x, y) {
                        (Number::Int(x), Number::Int(y)) => Ok(Number::Int(x.rem_euclid(y))),
                        _ => Err(RuntimeError::TypeError("mod/2 requires integers".into())),
                    }
                }
                ("**", 2, [a, b]) => {
                    let x = eval(heap, interner, *a)?;
                    let y = eval(heap, interner, *b)?;
                    Ok(Number::Real(x.as_f64().powf(y.as_f64())))
                }
                ("-", 1, [a]) => {
                    let x = eval(heap, interner, *a)?;
                    Ok(match x {
                        Number::Int(i) => Number::Int(-i),
                        Number::Real(r) => Number::Real(-r),
                    })
                }
                ("+", 1, [a]) => eval(heap, interner, *a),
                _ => Err(RuntimeError::TypeError(format!(
                    "{op}/{arity} is not an arithmetic operator"
                ))),
            }
        }
        HeapCell::Atom(name) => Err(RuntimeError::TypeError(format!(
            "{} is not an arithmetic value",
            interner.name_of(*name).map(|(n, _)| n).unwrap_or("?")
        ))),
        HeapCell::Nil | HeapCell::Cons(..) => {
            Err(RuntimeError::TypeError("list is not an arithmetic value".into()))
        }
    }
}

fn binary(
    heap: &Heap,
    interner: &Interner,
    a: HeapRef,
    b: HeapRef,
    int_op: impl Fn(i64, i64) -> i64,
    real_op: impl Fn(f64, f64) -> f64,
) -> Result<Number, RuntimeError> {
    let x = eval(heap, interner, a)?;
    let y = eval(heap, interner, b)?;
    Ok(match (x, y) {
        (Number::Int(x), Number::Int(y)) => Number::Int(int_op(x, y)),
        _ => Number::Real(real_op(x.as_f64(), y.as_f64())),
    })
}

#[cfg(test)]
#[path = "arith_tests.rs"]
mod arith_tests;
