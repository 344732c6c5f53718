use super::{FunctorId, Interner};
use crate::error::InternError;

#[test]
fn intern_functor_deduplicates_by_name_and_arity() {
    let mut interner = Interner::new();

    let a = interner.intern_functor("foo", 1).unwrap();
    let b = interner.intern_functor("foo", 1).unwrap();
    let c = interner.intern_functor("foo", 2).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c, "arity is part of functor identity");
    assert_eq!(interner.functor_count(), 2);
}

#[test]
fn intern_variable_deduplicates_by_name() {
    let mut interner = Interner::new();

    let x = interner.intern_variable("X").unwrap();
    let x2 = interner.intern_variable("X").unwrap();
    let y = interner.intern_variable("Y").unwrap();

    assert_eq!(x, x2);
    assert_ne!(x, y);
    assert_eq!(interner.variable_count(), 2);
}

#[test]
fn functor_and_variable_ids_are_independent_spaces() {
    let mut interner = Interner::new();

    let f = interner.intern_functor("x", 0).unwrap();
    let v = interner.intern_variable("x").unwrap();

    // Same raw value is plausible (separate counters) but the types differ,
    // so name_of/name_of_var resolve through the correct table regardless.
    assert_eq!(interner.name_of(f).unwrap(), ("x", 0));
    assert_eq!(interner.name_of_var(v).unwrap(), "x");
}

#[test]
fn name_of_roundtrip() {
    let mut interner = Interner::new();
    let id = interner.intern_functor("likes", 2).unwrap();
    assert_eq!(interner.name_of(id).unwrap(), ("likes", 2));
}

#[test]
fn empty_name_is_invalid() {
    let mut interner = Interner::new();
    assert_eq!(
        interner.intern_functor("", 0).unwrap_err(),
        InternError::InvalidName
    );
    assert_eq!(
        interner.intern_variable("").unwrap_err(),
        InternError::InvalidName
    );
}

#[test]
fn unknown_id_fails_reverse_lookup() {
    let interner = Interner::new();
    assert_eq!(
        interner.name_of(FunctorId::from_raw(0)).unwrap_err(),
        InternError::UnknownId
    );
}

#[test]
fn ids_are_copy() {
    let mut interner = Interner::new();
    let id = interner.intern_functor("x", 0).unwrap();
    let copy = id;
    assert_eq!(id, copy);
}
