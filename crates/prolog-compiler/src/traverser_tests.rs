use super::*;
use prolog_core::{Interner, SymbolKeyGen};

struct Fixture {
    interner: Interner,
    keys: SymbolKeyGen,
}

impl Fixture {
    fn new() -> Self {
        Self {
            interner: Interner::new(),
            keys: SymbolKeyGen::new(),
        }
    }

    fn functor(&mut self, name: &str, args: Vec<Term>) -> Term {
        let id = self.interner.intern_functor(name, args.len() as u32).unwrap();
        Term::functor(self.keys.next(), id, args)
    }

    fn var(&mut self, name: &str) -> Term {
        let id = self.interner.intern_variable(name).unwrap();
        Term::var(self.keys.next(), id, false)
    }
}

#[test]
fn head_and_body_functors_are_top_level_their_args_are_not() {
    let mut fx = Fixture::new();
    let x = fx.var("X");
    let head = fx.functor("f", vec![x]);
    let y = fx.var("Y");
    let goal = fx.functor("g", vec![y]);
    let clause = Clause {
        head: Some(head),
        body: vec![goal],
    };

    let mut events = Vec::new();
    Traverser::new(&clause, TraverserConfig::default()).walk(|e| events.push(e));

    let enters: Vec<_> = events.iter().filter(|e| e.is_entering()).collect();
    assert_eq!(enters.len(), 4); // head, X, goal, Y
    assert!(enters[0].context().is_top_level); // head functor
    assert!(!enters[1].context().is_top_level); // X, nested arg
    assert!(enters[2].context().is_top_level); // body goal
    assert!(!enters[3].context().is_top_level); // Y, nested arg
}

#[test]
fn head_args_are_marked_in_head_body_args_are_not() {
    let mut fx = Fixture::new();
    let x = fx.var("X");
    let head = fx.functor("f", vec![x]);
    let y = fx.var("Y");
    let goal = fx.functor("g", vec![y]);
    let clause = Clause {
        head: Some(head),
        body: vec![goal],
    };

    let mut events = Vec::new();
    Traverser::new(&clause, TraverserConfig::default()).walk(|e| events.push(e));

    let enters: Vec<_> = events.iter().filter(|e| e.is_entering()).collect();
    assert!(enters[1].context().is_in_head); // X
    assert!(!enters[3].context().is_in_head); // Y
}

#[test]
fn last_body_functor_flag_covers_its_whole_subtree() {
    let mut fx = Fixture::new();
    let g1 = fx.functor("g", vec![]);
    let h1_arg = fx.var("X");
    let h1 = fx.functor("h", vec![h1_arg]);
    let clause = Clause {
        head: None,
        body: vec![g1, h1],
    };

    let mut events = Vec::new();
    Traverser::new(&clause, TraverserConfig::default()).walk(|e| events.push(e));

    let enters: Vec<_> = events.iter().filter(|e| e.is_entering()).collect();
    assert!(!enters[0].context().is_last_body_functor); // g1
    assert!(enters[1].context().is_last_body_functor); // h1
    assert!(enters[2].context().is_last_body_functor); // h1's X argument
}

#[test]
fn every_enter_has_a_matching_leave_in_reverse_order() {
    let mut fx = Fixture::new();
    let arg = fx.var("X");
    let head = fx.functor("f", vec![arg]);
    let clause = Clause {
        head: Some(head),
        body: vec![],
    };

    let mut events = Vec::new();
    Traverser::new(&clause, TraverserConfig::default()).walk(|e| events.push(e));

    assert_eq!(events.len(), 4);
    assert!(events[0].is_entering()); // enter f
    assert!(events[1].is_entering()); // enter X
    assert!(events[2].is_leaving()); // leave X
    assert!(events[3].is_leaving()); // leave f
}

#[test]
fn empty_body_produces_no_body_events() {
    let mut fx = Fixture::new();
    let head = fx.functor("f", vec![]);
    let clause = Clause {
        head: Some(head),
        body: vec![],
    };

    let mut events = Vec::new();
    Traverser::new(&clause, TraverserConfig::default()).walk(|e| events.push(e));
    assert_eq!(events.len(), 2);
}
