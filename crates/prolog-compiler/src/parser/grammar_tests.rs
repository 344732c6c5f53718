use super::parse;
use prolog_core::{Interner, Term};

fn name_of<'a>(interner: &'a Interner, term: &Term) -> Option<(&'a str, u32)> {
    match term {
        Term::Functor { name, .. } => interner.name_of(*name).ok(),
        _ => None,
    }
}

#[test]
fn parses_a_fact() {
    let mut interner = Interner::new();
    let clauses = parse("parent(tom, bob).", &mut interner).unwrap();
    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert!(clause.body.is_empty());
    assert_eq!(name_of(&interner, clause.head.as_ref().unwrap()), Some(("parent", 2)));
}

#[test]
fn parses_a_rule_with_a_conjunctive_body() {
    let mut interner = Interner::new();
    let clauses = parse("grandparent(X, Z) :- parent(X, Y), parent(Y, Z).", &mut interner).unwrap();
    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert_eq!(clause.body.len(), 2);
    assert_eq!(name_of(&interner, &clause.body[0]), Some(("parent", 2)));
    assert_eq!(name_of(&interner, &clause.body[1]), Some(("parent", 2)));
}

#[test]
fn disjunction_expands_into_separate_clauses() {
    let mut interner = Interner::new();
    let clauses = parse("happy(X) :- rich(X) ; famous(X).", &mut interner).unwrap();
    assert_eq!(clauses.len(), 2);
    assert_eq!(name_of(&interner, &clauses[0].body[0]), Some(("rich", 1)));
    assert_eq!(name_of(&interner, &clauses[1].body[0]), Some(("famous", 1)));
}

#[test]
fn disjunction_and_conjunction_combine_via_cartesian_product() {
    let mut interner = Interner::new();
    let clauses = parse("p(X) :- (a(X) ; b(X)), c(X).", &mut interner).unwrap();
    assert_eq!(clauses.len(), 2);
    for clause in &clauses {
        assert_eq!(clause.body.len(), 2);
        assert_eq!(name_of(&interner, &clause.body[1]), Some(("c", 1)));
    }
}

#[test]
fn arithmetic_respects_precedence() {
    let mut interner = Interner::new();
    let clauses = parse("p(X) :- X is 2 + 3 * 4.", &mut interner).unwrap();
    let goal = &clauses[0].body[0];
    assert_eq!(name_of(&interner, goal), Some(("is", 2)));
    let Term::Functor { args, .. } = goal else { panic!() };
    let rhs = &args[1];
    assert_eq!(name_of(&interner, rhs), Some(("+", 2)));
    let Term::Functor { args: plus_args, .. } = rhs else { panic!() };
    assert_eq!(name_of(&interner, &plus_args[1]), Some(("*", 2)));
}

#[test]
fn exponentiation_is_right_associative() {
    let mut interner = Interner::new();
    let clauses = parse("p(X) :- X is 2 ** 3 ** 2.", &mut interner).unwrap();
    let goal = &clauses[0].body[0];
    assert_eq!(name_of(&interner, goal), Some(("is", 2)));
    let Term::Functor { args, .. } = goal else { panic!() };
    let rhs = &args[1];
    assert_eq!(name_of(&interner, rhs), Some(("**", 2)));
    let Term::Functor { args: outer_pow_args, .. } = rhs else { panic!() };
    assert!(matches!(outer_pow_args[0], Term::Int { value: 2, .. }));
    let inner = &outer_pow_args[1];
    assert_eq!(name_of(&interner, inner), Some(("**", 2)));
    let Term::Functor { args: inner_pow_args, .. } = inner else { panic!() };
    assert!(matches!(inner_pow_args[0], Term::Int { value: 3, .. }));
    assert!(matches!(inner_pow_args[1], Term::Int { value: 2, .. }));
}

#[test]
fn cut_parses_as_a_zero_arity_atom() {
    let mut interner = Interner::new();
    let clauses = parse("p :- !, q.", &mut interner).unwrap();
    assert_eq!(name_of(&interner, &clauses[0].body[0]), Some(("!", 0)));
}

#[test]
fn lists_build_cons_chains_with_a_tail_variable() {
    let mut interner = Interner::new();
    let clauses = parse("p([H|T]).", &mut interner).unwrap();
    let head = clauses[0].head.as_ref().unwrap();
    let Term::Functor { args, .. } = head else { panic!() };
    assert!(matches!(args[0], Term::Cons { .. }));
}

#[test]
fn query_has_no_head() {
    let mut interner = Interner::new();
    let clauses = parse("?- parent(tom, X).", &mut interner).unwrap();
    assert_eq!(clauses.len(), 1);
    assert!(clauses[0].head.is_none());
}

#[test]
fn shared_predicate_name_interns_to_the_same_functor_id_across_clauses() {
    let mut interner = Interner::new();
    let clauses = parse("f(a). f(b).", &mut interner).unwrap();
    assert_eq!(clauses[0].head.as_ref().unwrap().key() != clauses[1].head.as_ref().unwrap().key(), true);
    let Term::Functor { name: n0, .. } = clauses[0].head.as_ref().unwrap() else { panic!() };
    let Term::Functor { name: n1, .. } = clauses[1].head.as_ref().unwrap() else { panic!() };
    assert_eq!(n0, n1);
}
