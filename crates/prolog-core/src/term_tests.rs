use super::*;
use crate::Interner;

fn functor(interner: &mut Interner, keys: &mut SymbolKeyGen, name: &str, args: Vec<Term>) -> Term {
    let id = interner.intern_functor(name, args.len() as u32).unwrap();
    Term::functor(keys.next(), id, args)
}

#[test]
fn atom_has_zero_arity() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let t = functor(&mut interner, &mut keys, "foo", vec![]);
    assert!(t.is_atom());
    assert_eq!(t.arity(), 0);
}

#[test]
fn functor_arity_matches_arg_count() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let arg = functor(&mut interner, &mut keys, "a", vec![]);
    let t = functor(&mut interner, &mut keys, "f", vec![arg]);
    assert_eq!(t.arity(), 1);
    assert!(!t.is_atom());
}

#[test]
fn symbol_keys_are_distinct_per_term() {
    let mut keys = SymbolKeyGen::new();
    let a = keys.next();
    let b = keys.next();
    assert_ne!(a, b);
}

#[test]
fn anonymous_variable_is_distinguished_from_named() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let x = interner.intern_variable("X").unwrap();
    let named = Term::var(keys.next(), x, false);
    let anon = Term::var(keys.next(), x, true);
    assert!(!named.is_anonymous_var());
    assert!(anon.is_anonymous_var());
}

#[test]
fn fact_has_head_and_empty_body() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let head = functor(&mut interner, &mut keys, "f", vec![]);
    let clause = Clause {
        head: Some(head),
        body: vec![],
    };
    assert!(clause.is_fact());
    assert!(!clause.is_query());
}

#[test]
fn query_has_no_head() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let goal = functor(&mut interner, &mut keys, "f", vec![]);
    let clause = Clause {
        head: None,
        body: vec![goal],
    };
    assert!(clause.is_query());
    assert!(clause.head_functor().is_none());
}

#[test]
fn head_functor_reports_name_and_arity_identity() {
    let mut interner = Interner::new();
    let mut keys = SymbolKeyGen::new();
    let head = functor(&mut interner, &mut keys, "p", vec![]);
    let id = head.key();
    let _ = id; // key is assigned, distinct from the functor id itself
    let clause = Clause {
        head: Some(head),
        body: vec![],
    };
    assert!(clause.head_functor().is_some());
}
