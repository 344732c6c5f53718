//! Walks an annotated clause and emits its VAM2P instruction sequence.
//!
//! Driven by the same [`Traverser`] used to annotate the clause; the
//! generator only needs the temporariness bit from [`Annotations`] (the
//! groundness domain feeds the abstract interpreter, not codegen) plus
//! its own first/next-occurrence bookkeeping, which is clause-local and
//! therefore lives here rather than in the symbol table.

use std::collections::{HashMap, HashSet};

use prolog_bytecode::{Instruction, VarSlot};
use prolog_core::{Clause, Interner, Term, VarId};

use crate::annotate::Annotations;
use crate::traverser::{Event, Traverser, TraverserConfig};

/// The reserved zero-arity atom compiling to [`Instruction::Cut`] instead
/// of [`Instruction::Goal`] — every other built-in (`true`, `fail`,
/// `is/2`, …) is an ordinary goal the resolver special-cases at dispatch
/// time (component K), but cut affects the choice-point stack directly
/// and has no code-area clause to call into. It still gets the usual
/// `call`/`lastcall` terminator like any other top-level body functor.
const CUT_ATOM: &str = "!";

/// Per-clause slot allocator: each distinct variable gets one slot the
/// first time codegen sees it, reused for every later occurrence.
#[derive(Default)]
struct SlotAllocator {
    slots: HashMap<VarId, VarSlot>,
    next: u32,
}

impl SlotAllocator {
    fn slot_for(&mut self, id: VarId) -> VarSlot {
        *self.slots.entry(id).or_insert_with(|| {
            let slot = VarSlot::new(self.next);
            self.next += 1;
            slot
        })
    }
}

/// Emit the VAM2P instruction sequence for one annotated clause.
pub fn generate(
    clause: &Clause,
    annotations: &Annotations,
    interner: &Interner,
) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut seen_vars: HashSet<VarId> = HashSet::new();
    let mut slots = SlotAllocator::default();

    let traverser = Traverser::new(clause, TraverserConfig::default());
    traverser.walk(|event| {
        let Event::Enter(ctx) = event else {
            if let Event::Leave(ctx) = event {
                if ctx.is_top_level && ctx.is_in_head {
                    // head functor itself: no instruction (spec's
                    // instruction table has no row for it — the code
                    // area already indexes clauses by name/arity).
                } else if ctx.is_top_level && !ctx.is_in_head {
                    // Cut is still framed like any other top-level body
                    // functor (spec's instruction table has no special
                    // row for it) — only its *entering* instruction
                    // differs (`cut` instead of `goal(name)`), since it
                    // has no code-area clause to call into.
                    if ctx.is_last_body_functor {
                        instructions.push(Instruction::LastCall);
                    } else {
                        instructions.push(Instruction::Call);
                    }
                }
            }
            return;
        };

        match ctx.term {
            Term::Functor { name, args, .. } if ctx.is_top_level && !ctx.is_in_head => {
                if is_cut(ctx.term, interner) {
                    instructions.push(Instruction::Cut);
                } else {
                    // continuation is patched to a real byte offset by
                    // the compiler driver once the whole clause's
                    // instructions have fixed lengths.
                    let _ = args;
                    instructions.push(Instruction::Goal {
                        name: *name,
                        continuation: 0,
                    });
                }
            }
            Term::Functor { name, args, .. } if ctx.is_top_level && ctx.is_in_head => {
                let _ = (name, args);
            }
            Term::Functor { name, args, .. } => {
                if args.is_empty() {
                    instructions.push(Instruction::Atom(*name));
                } else {
                    instructions.push(Instruction::Struct(*name));
                }
            }
            Term::Int { value, .. } => instructions.push(Instruction::Int(*value)),
            Term::Real { value, .. } => instructions.push(Instruction::Real(*value)),
            Term::Nil { .. } => instructions.push(Instruction::Nil),
            Term::Cons { .. } => instructions.push(Instruction::List),
            Term::Var { name, anonymous, .. } => {
                if *anonymous {
                    instructions.push(Instruction::Void);
                    return;
                }
                let first = seen_vars.insert(*name);
                let slot = slots.slot_for(*name);
                let temp = annotations.is_temporary(*name);
                instructions.push(match (first, temp) {
                    (true, true) => Instruction::FirstTemp(slot),
                    (true, false) => Instruction::FirstVar(slot),
                    (false, true) => Instruction::NextTemp(slot),
                    (false, false) => Instruction::NextVar(slot),
                });
            }
        }
    });

    // Every clause ends in `nogoal`, not just facts: the last body goal's
    // continuation has to land on a real instruction once it succeeds,
    // the same way an empty body's "clause has nothing to do" does.
    instructions.push(Instruction::NoGoal);

    link_goal_continuations(instructions)
}

fn is_cut(term: &Term, interner: &Interner) -> bool {
    matches!(term, Term::Functor { name, args, .. }
        if args.is_empty() && interner.name_of(*name).is_ok_and(|(n, _)| n == CUT_ATOM))
}

/// The `VarId` -> `VarSlot` mapping codegen assigned while compiling
/// `clause`, keyed the same way [`generate`]'s own `SlotAllocator` does.
/// The compiler driver needs this for queries: it is how a solution's
/// heap bindings get traced back to the source variable names a caller
/// typed in.
pub fn clause_var_slots(clause: &Clause) -> HashMap<VarId, VarSlot> {
    let mut slots = SlotAllocator::default();
    let mut map = HashMap::new();

    let traverser = Traverser::new(clause, TraverserConfig::default());
    traverser.walk(|event| {
        if let Event::Enter(ctx) = event {
            if let Term::Var { name, anonymous: false, .. } = ctx.term {
                map.entry(*name).or_insert_with(|| slots.slot_for(*name));
            }
        }
    });

    map
}

/// Patch every `Goal`'s continuation offset to the byte offset of the
/// instruction following its paired `Call`/`LastCall`. Every instruction
/// has a fixed byte width regardless of the continuation's own value, so
/// offsets can be computed before the patch in a single forward pass.
///
/// A `Goal`'s terminator isn't always its immediate neighbor: the goal's
/// own argument-building instructions (`Struct`, `FirstVar`, ...) sit
/// between them. Since goals never nest, the terminator is simply the
/// next `Call`/`LastCall` instruction in the stream.
fn link_goal_continuations(mut instructions: Vec<Instruction>) -> Vec<Instruction> {
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
                .expect("every Goal is paired with a Call or LastCall terminator");
            let continuation = offsets[terminator + 1];
            if let Instruction::Goal { continuation: c, .. } = &mut instructions[i] {
                *c = continuation;
            }
        }
    }

    instructions
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
