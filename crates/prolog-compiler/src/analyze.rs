//! The abstract interpreter (component J): a fixpoint over per-predicate
//! argument-groundness call patterns.
//!
//! Walks the same linear instruction stream VAM2P compiles to (the head
//! pattern followed by each body goal's own argument instructions),
//! translated through [`AbstractInstruction::from_concrete`] so the walk
//! carries no runtime semantics — no bindings, no trail, just a join
//! over booleans. A predicate's call pattern only ever loses `true` bits
//! as more call sites are folded in, so the worklist below is guaranteed
//! to drain: each of the finitely many `(predicate, argument)` bits can
//! flip at most once.

use std::collections::{HashMap, HashSet, VecDeque};

use prolog_bytecode::{AbstractInstruction, CodeArea, VarSlot};
use prolog_core::{FunctorId, Interner};

use crate::error::CompileError;

/// Per-argument-position groundness for one predicate, joined across
/// every call site seen so far. Starts optimistic (`top`, every
/// position assumed ground) since with zero observed calls nothing
/// contradicts it; each real call site can only turn a `true` bit
/// `false`, never the reverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallPattern(Vec<bool>);

impl CallPattern {
    pub fn top(arity: u32) -> Self {
        Self(vec![true; arity as usize])
    }

    pub fn from_ground(ground: Vec<bool>) -> Self {
        Self(ground)
    }

    pub fn arity(&self) -> u32 {
        self.0.len() as u32
    }

    pub fn is_ground(&self, index: u32) -> bool {
        self.0[index as usize]
    }

    fn join(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(other.0.iter()).map(|(&a, &b)| a && b).collect())
    }
}

/// The fixpoint's result: every analyzed predicate's settled call
/// pattern, ready to feed back into the symbol table for a tighter
/// second codegen pass.
#[derive(Debug, Default)]
pub struct ProgramFacts {
    patterns: HashMap<(FunctorId, u32), CallPattern>,
}

impl ProgramFacts {
    pub fn pattern_for(&self, name: FunctorId, arity: u32) -> Option<&CallPattern> {
        self.patterns.get(&(name, arity))
    }
}

/// Run the groundness fixpoint over every predicate compiled into
/// `code`.
pub fn analyze(code: &CodeArea, interner: &Interner) -> Result<ProgramFacts, CompileError> {
    let mut facts = ProgramFacts::default();
    let mut worklist: VecDeque<(FunctorId, u32)> = VecDeque::new();
    let mut queued: HashSet<(FunctorId, u32)> = HashSet::new();

    for (name, arity) in code.predicates() {
        facts.patterns.insert((name, arity), CallPattern::top(arity));
        worklist.push_back((name, arity));
        queued.insert((name, arity));
    }

    while let Some((name, arity)) = worklist.pop_front() {
        queued.remove(&(name, arity));
        let incoming = facts.patterns[&(name, arity)].clone();

        for entry in code.entries_for(name, arity).to_vec() {
            for (callee, observed) in analyze_clause(code, entry, arity, &incoming, interner)? {
                let current = facts
                    .patterns
                    .entry(callee)
                    .or_insert_with(|| CallPattern::top(observed.arity()));
                let joined = current.join(&observed);
                if joined != *current {
                    *current = joined;
                    if queued.insert(callee) {
                        worklist.push_back(callee);
                    }
                }
            }
        }
    }

    Ok(facts)
}

/// Walk one compiled clause's head (seeding variable groundness from
/// `incoming`) and then its body, recording the call pattern each body
/// goal presents to its own callee.
fn analyze_clause(
    code: &CodeArea,
    entry: u32,
    arity: u32,
    incoming: &CallPattern,
    interner: &Interner,
) -> Result<Vec<((FunctorId, u32), CallPattern)>, CompileError> {
    let mut env: HashMap<VarSlot, bool> = HashMap::new();
    let mut offset = entry;

    for i in 0..arity {
        walk_term(code, &mut offset, &mut env, interner, Some(incoming.is_ground(i)))?;
    }

    let mut calls = Vec::new();
    loop {
        let (instruction, next) = code.decode_at(offset)?;
        offset = next;
        match AbstractInstruction::from_concrete(&instruction) {
            AbstractInstruction::NoGoal => break,
            AbstractInstruction::Cut => {}
            AbstractInstruction::Goal(name) => {
                let (_, goal_arity) = interner.name_of(name)?;
                let mut ground = Vec::with_capacity(goal_arity as usize);
                for _ in 0..goal_arity {
                    ground.push(walk_term(code, &mut offset, &mut env, interner, None)?);
                }
                let (_, after_terminator) = code.decode_at(offset)?;
                offset = after_terminator;
                if code.is_defined(name, goal_arity) {
                    calls.push(((name, goal_arity), CallPattern::from_ground(ground)));
                }
            }
            _ => {
                return Err(CompileError::Internal(
                    "unexpected control instruction at a clause body position",
                ));
            }
        }
    }

    Ok(calls)
}

/// Decode one term's abstract instructions, returning whether it is
/// ground. `incoming` seeds a head argument's first-occurrence
/// variables from the caller's call pattern; `None` means this term is
/// being built bottom-up instead (a body goal's own argument), where a
/// variable's groundness comes only from what's already in `env`.
fn walk_term(
    code: &CodeArea,
    offset: &mut u32,
    env: &mut HashMap<VarSlot, bool>,
    interner: &Interner,
    incoming: Option<bool>,
) -> Result<bool, CompileError> {
    let (instruction, next) = code.decode_at(*offset)?;
    *offset = next;
    Ok(match AbstractInstruction::from_concrete(&instruction) {
        AbstractInstruction::Literal | AbstractInstruction::Nil => true,
        AbstractInstruction::Void => true,
        AbstractInstruction::Struct(name) => {
            let (_, arity) = interner.name_of(name)?;
            let mut ground = true;
            for _ in 0..arity {
                ground &= walk_term(code, offset, env, interner, None)?;
            }
            ground
        }
        AbstractInstruction::List => {
            let head = walk_term(code, offset, env, interner, None)?;
            let tail = walk_term(code, offset, env, interner, None)?;
            head && tail
        }
        AbstractInstruction::FirstVar(slot) | AbstractInstruction::FirstTemp(slot) => {
            let ground = incoming.unwrap_or(false);
            env.insert(slot, ground);
            ground
        }
        AbstractInstruction::NextVar(slot) | AbstractInstruction::NextTemp(slot) => {
            *env.get(&slot).unwrap_or(&false)
        }
        AbstractInstruction::Goal(_)
        | AbstractInstruction::Call
        | AbstractInstruction::LastCall
        | AbstractInstruction::Cut
        | AbstractInstruction::NoGoal => {
            return Err(CompileError::Internal(
                "unexpected control instruction while walking a term",
            ));
        }
    })
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod analyze_tests;
