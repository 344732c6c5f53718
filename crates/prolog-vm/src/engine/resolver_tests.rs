use super::*;
use prolog_bytecode::VarSlot;
use prolog_core::Interner;

/// Hand-assembles a clause/query body the way the compiler's own
/// continuation-linking pass does: every `Goal`'s continuation is
/// patched to the offset right after its paired `Call`/`LastCall`.
/// Lets these tests build instruction sequences without depending on
/// the compiler crate.
fn link(mut instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut offsets = Vec::with_capacity(instructions.len() + 1);
    let mut acc = 0u32;
    for instruction in &instructions {
        offsets.push(acc);
        acc += instruction.byte_len() as u32;
    }
    offsets.push(acc);

    for i in 0..instructions.len() {
        if matches!(instructions[i], Instruction::Goal { .. }) {
            let terminator = (i + 1..instructions.len())
                .find(|&j| matches!(instructions[j], Instruction::Call | Instruction::LastCall))
                .expect("every Goal is paired with a terminator");
            let continuation = offsets[terminator + 1];
            if let Instruction::Goal { continuation: c, .. } = &mut instructions[i] {
                *c = continuation;
            }
        }
    }
    instructions
}

fn slot(n: u32) -> VarSlot {
    VarSlot::new(n)
}

#[test]
fn facts_disjunction_enumerates_every_clause_in_load_order() {
    let mut interner = Interner::new();
    let f = interner.intern_functor("f", 1).unwrap();
    let x = interner.intern_functor("x", 0).unwrap();
    let y = interner.intern_functor("y", 0).unwrap();
    let z = interner.intern_functor("z", 0).unwrap();

    let mut code = CodeArea::new();
    code.append_clause(f, 1, &link(vec![Instruction::Atom(x), Instruction::NoGoal]));
    code.append_clause(f, 1, &link(vec![Instruction::Atom(y), Instruction::NoGoal]));
    code.append_clause(f, 1, &link(vec![Instruction::Atom(z), Instruction::NoGoal]));

    // ?- f(X).
    let query = link(vec![
        Instruction::Goal { name: f, continuation: 0 },
        Instruction::FirstVar(slot(0)),
        Instruction::LastCall,
        Instruction::NoGoal,
    ]);
    let entry = code.append_clause(interner.intern_functor("$query", 0).unwrap(), 0, &query);

    let mut var_slots = HashMap::new();
    var_slots.insert(interner.intern_variable("X").unwrap(), slot(0));

    let mut resolver = Resolver::new(&code, &interner, entry, ResolverConfig::default());

    let mut seen = Vec::new();
    while resolver.next_solution().is_some() {
        let solution = resolver.solution(&var_slots).unwrap();
        seen.push(solution.get("X").cloned().unwrap());
    }

    assert_eq!(
        seen,
        vec![
            Binding::Atom("x".to_string()),
            Binding::Atom("y".to_string()),
            Binding::Atom("z".to_string()),
        ]
    );
}

#[test]
fn conjunction_with_shared_variable_propagates_the_binding() {
    let mut interner = Interner::new();
    let g = interner.intern_functor("g", 1).unwrap();
    let h = interner.intern_functor("h", 1).unwrap();
    let f = interner.intern_functor("f", 1).unwrap();
    let x = interner.intern_functor("x", 0).unwrap();

    let mut code = CodeArea::new();
    code.append_clause(g, 1, &link(vec![Instruction::Atom(x), Instruction::NoGoal]));
    code.append_clause(h, 1, &link(vec![Instruction::Atom(x), Instruction::NoGoal]));
    // f(X) :- g(X), h(X).
    code.append_clause(
        f,
        1,
        &link(vec![
            Instruction::FirstVar(slot(0)),
            Instruction::Goal { name: g, continuation: 0 },
            Instruction::NextVar(slot(0)),
            Instruction::Call,
            Instruction::Goal { name: h, continuation: 0 },
            Instruction::NextVar(slot(0)),
            Instruction::LastCall,
            Instruction::NoGoal,
        ]),
    );

    // ?- f(Y).
    let query = link(vec![
        Instruction::Goal { name: f, continuation: 0 },
        Instruction::FirstVar(slot(0)),
        Instruction::LastCall,
        Instruction::NoGoal,
    ]);
    let entry = code.append_clause(interner.intern_functor("$query", 0).unwrap(), 0, &query);

    let mut var_slots = HashMap::new();
    var_slots.insert(interner.intern_variable("Y").unwrap(), slot(0));

    let mut resolver = Resolver::new(&code, &interner, entry, ResolverConfig::default());
    assert!(resolver.next_solution().unwrap().is_ok());
    let solution = resolver.solution(&var_slots).unwrap();
    assert_eq!(solution.get("Y"), Some(&Binding::Atom("x".to_string())));
    assert!(resolver.next_solution().is_none());
}

#[test]
fn cut_commits_to_the_first_clause_and_blocks_the_second() {
    let mut interner = Interner::new();
    let f = interner.intern_functor("f", 1).unwrap();
    let x = interner.intern_functor("x", 0).unwrap();
    let y = interner.intern_functor("y", 0).unwrap();
    let true_atom = interner.intern_functor("true", 0).unwrap();

    let mut code = CodeArea::new();
    // f(x) :- !, true.
    code.append_clause(
        f,
        1,
        &link(vec![
            Instruction::Atom(x),
            Instruction::Cut,
            Instruction::Call,
            Instruction::Goal { name: true_atom, continuation: 0 },
            Instruction::LastCall,
            Instruction::NoGoal,
        ]),
    );
    // f(y).
    code.append_clause(f, 1, &link(vec![Instruction::Atom(y), Instruction::NoGoal]));

    // ?- f(X).
    let query = link(vec![
        Instruction::Goal { name: f, continuation: 0 },
        Instruction::FirstVar(slot(0)),
        Instruction::LastCall,
        Instruction::NoGoal,
    ]);
    let entry = code.append_clause(interner.intern_functor("$query", 0).unwrap(), 0, &query);

    let mut var_slots = HashMap::new();
    var_slots.insert(interner.intern_variable("X").unwrap(), slot(0));

    let mut resolver = Resolver::new(&code, &interner, entry, ResolverConfig::default());
    assert!(resolver.next_solution().unwrap().is_ok());
    let solution = resolver.solution(&var_slots).unwrap();
    assert_eq!(solution.get("X"), Some(&Binding::Atom("x".to_string())));
    // the cut discarded f(y)'s choice point entirely
    assert!(resolver.next_solution().is_none());
}

#[test]
fn not_negates_a_failing_goal_without_leaving_bindings() {
    let mut interner = Interner::new();
    let p = interner.intern_functor("p", 1).unwrap();
    let not_ = interner.intern_functor("not", 1).unwrap();
    let x = interner.intern_functor("x", 0).unwrap();
    let y = interner.intern_functor("y", 0).unwrap();

    let mut code = CodeArea::new();
    code.append_clause(p, 1, &link(vec![Instruction::Atom(x), Instruction::NoGoal]));

    // ?- not(p(y)).
    let query = link(vec![
        Instruction::Goal { name: not_, continuation: 0 },
        Instruction::Struct(p),
        Instruction::Atom(y),
        Instruction::LastCall,
        Instruction::NoGoal,
    ]);
    let entry = code.append_clause(interner.intern_functor("$query", 0).unwrap(), 0, &query);

    let mut resolver = Resolver::new(&code, &interner, entry, ResolverConfig::default());
    assert!(resolver.next_solution().unwrap().is_ok());
    assert!(resolver.next_solution().is_none());
}

#[test]
fn not_fails_when_its_argument_succeeds() {
    let mut interner = Interner::new();
    let p = interner.intern_functor("p", 1).unwrap();
    let not_ = interner.intern_functor("not", 1).unwrap();
    let x = interner.intern_functor("x", 0).unwrap();

    let mut code = CodeArea::new();
    code.append_clause(p, 1, &link(vec![Instruction::Atom(x), Instruction::NoGoal]));

    // ?- not(p(x)).
    let query = link(vec![
        Instruction::Goal { name: not_, continuation: 0 },
        Instruction::Struct(p),
        Instruction::Atom(x),
        Instruction::LastCall,
        Instruction::NoGoal,
    ]);
    let entry = code.append_clause(interner.intern_functor("$query", 0).unwrap(), 0, &query);

    let mut resolver = Resolver::new(&code, &interner, entry, ResolverConfig::default());
    assert!(resolver.next_solution().is_none());
}
