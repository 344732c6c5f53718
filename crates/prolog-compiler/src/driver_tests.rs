use super::*;
use prolog_core::Interner;

#[test]
fn facts_are_indexed_by_name_and_arity_in_load_order() {
    let mut driver = Driver::new();
    let mut interner = Interner::new();
    let query = driver
        .consult("likes(mary, wine).\nlikes(john, beer).", &mut interner, LinkageMode::Lenient)
        .unwrap();
    assert!(query.is_none());
    let name = interner.intern_functor("likes", 2).unwrap();
    assert_eq!(driver.code().entries_for(name, 2).len(), 2);
}

#[test]
fn a_trailing_query_is_compiled_but_not_indexed() {
    let mut driver = Driver::new();
    let mut interner = Interner::new();
    let query = driver
        .consult("f(a).\n?- f(X).", &mut interner, LinkageMode::Lenient)
        .unwrap();
    assert!(query.is_some());
    let marker = interner.intern_functor("$query", 0).unwrap();
    assert_eq!(driver.code().entries_for(marker, 0).len(), 1);
}

#[test]
fn strict_mode_rejects_a_call_to_an_undefined_predicate() {
    let mut driver = Driver::new();
    let mut interner = Interner::new();
    let err = driver
        .consult("f(X) :- undefined_predicate(X).", &mut interner, LinkageMode::Strict)
        .unwrap_err();
    assert!(matches!(err, CompileError::Linkage(_)));
}

#[test]
fn strict_mode_does_not_flag_builtins_or_cut() {
    let mut driver = Driver::new();
    let mut interner = Interner::new();
    let result = driver.consult(
        "f(X) :- X > 0, !, X is X + 1.",
        &mut interner,
        LinkageMode::Strict,
    );
    assert!(result.is_ok());
}

#[test]
fn lenient_mode_accepts_an_undefined_predicate() {
    let mut driver = Driver::new();
    let mut interner = Interner::new();
    let result = driver.consult(
        "f(X) :- undefined_predicate(X).",
        &mut interner,
        LinkageMode::Lenient,
    );
    assert!(result.is_ok());
}
