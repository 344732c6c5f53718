//! The VAM2P dispatch loop: head-unification and body execution driven
//! by a single decode of the compiled instruction stream, realized as
//! an explicit frame stack and choice-point stack rather than literal
//! synchronized `gip`/`hip` byte pointers across two separate streams.
//! Every instruction still dispatches from one decode, choice points
//! still snapshot exactly the state the spec's table calls for, and cut
//! still truncates to the barrier recorded at clause entry — the
//! two-pointer interleaving is an implementation detail of how a single
//! code area lays out a clause, not an externally observable property.

use std::collections::HashMap;

use prolog_bytecode::{CodeArea, Instruction, VarSlot};
use prolog_core::{FunctorId, Interner, VarId};

use super::builtins;
use super::choice_point::ChoicePoint;
use super::config::ResolverConfig;
use super::error::RuntimeError;
use super::frame::{Frame, FrameArena, FrameRef};
use super::heap::{Heap, HeapCell, HeapRef};
use super::solution::Solution;
use super::trace::{NoopTracer, Port, Tracer};
use super::trail::Trail;

/// Outcome of driving the resolver to its next stopping point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solved {
    Succeeded,
    Exhausted,
}

/// One query's resolution state: the data area (heap, trail, frames,
/// choice points) plus the shared code area and interner it runs
/// against. Mirrors §4.I's VM record, with `FrameArena`/`Vec<ChoicePoint>`
/// standing in for the raw `esp`/`lcp` stacks.
pub struct Resolver<'a> {
    code: &'a CodeArea,
    interner: &'a Interner,
    config: ResolverConfig,
    heap: Heap,
    trail: Trail,
    frames: FrameArena,
    choice_points: Vec<ChoicePoint>,
    entry: u32,
    steps: u32,
    started: bool,
    exhausted: bool,
    /// The frame the query itself runs in, recorded once on the first
    /// [`Resolver::next_solution`] call — every later [`Resolver::solution`]
    /// reads a query variable's binding out of this frame's slots.
    query_frame: Option<FrameRef>,
    tracer: Box<dyn Tracer>,
}

impl<'a> Resolver<'a> {
    pub fn new(code: &'a CodeArea, interner: &'a Interner, entry: u32, config: ResolverConfig) -> Self {
        Self {
            code,
            interner,
            heap: Heap::with_capacity(config.get_heap_capacity()),
            trail: Trail::with_capacity(config.get_trail_capacity()),
            frames: FrameArena::default(),
            choice_points: Vec::new(),
            entry,
            config,
            steps: 0,
            started: false,
            exhausted: false,
            query_frame: None,
            tracer: Box::new(NoopTracer),
        }
    }

    /// Replace the resolver's tracer, e.g. with a [`super::trace::PrintTracer`]
    /// for `--trace`. Takes effect for every goal dispatched from here on.
    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = tracer;
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn frames(&self) -> &FrameArena {
        &self.frames
    }

    /// Drop every accumulated resolution state as if freshly constructed,
    /// without leaking trail entries or stale choice points across runs.
    pub fn reset(&mut self) {
        self.heap = Heap::with_capacity(self.config.get_heap_capacity());
        self.trail = Trail::with_capacity(self.config.get_trail_capacity());
        self.frames = FrameArena::default();
        self.choice_points.clear();
        self.steps = 0;
        self.started = false;
        self.exhausted = false;
        self.query_frame = None;
    }

    /// Read the current solution's bindings for `var_slots` (normally a
    /// compiled query's variable-name-id -> slot mapping). Only
    /// meaningful right after `next_solution` returns `Some(Ok(()))`.
    pub fn solution(&self, var_slots: &HashMap<VarId, VarSlot>) -> Result<Solution, RuntimeError> {
        let frame_ref = self
            .query_frame
            .expect("solution() called before next_solution() ever returned a success");
        let frame = self.frames.get(frame_ref);
        Solution::materialize(var_slots, frame, &self.heap, self.interner)
    }

    /// Advance to the next solution, or `None` once the search is
    /// exhausted. `Some(Err(_))` surfaces a strict-mode or internal
    /// error; the resolver's state is left as-is for diagnosis.
    pub fn next_solution(&mut self) -> Option<Result<(), RuntimeError>> {
        if self.exhausted {
            return None;
        }
        let outcome = if !self.started {
            self.started = true;
            let query_frame = self.frames.push_with_parent(self.entry, 0, None);
            self.query_frame = Some(query_frame);
            self.run()
        } else {
            match self.backtrack() {
                Ok(true) => self.run(),
                Ok(false) => {
                    self.exhausted = true;
                    return None;
                }
                Err(e) => return Some(Err(e)),
            }
        };
        match outcome {
            Ok(Solved::Succeeded) => Some(Ok(())),
            Ok(Solved::Exhausted) => {
                self.exhausted = true;
                None
            }
            Err(e) => Some(Err(e)),
        }
    }

    fn run(&mut self) -> Result<Solved, RuntimeError> {
        self.run_until(None, 0)
    }

    fn backtrack(&mut self) -> Result<bool, RuntimeError> {
        self.backtrack_above(0)
    }

    /// Drive execution until `frames.current()` equals `stop_at` (query
    /// success, or a nested `not/1` search returning to its caller) or
    /// the choice-point stack drains back to `floor` (failure).
    fn run_until(&mut self, stop_at: Option<FrameRef>, floor: usize) -> Result<Solved, RuntimeError> {
        loop {
            if self.frames.current() == stop_at {
                return Ok(Solved::Succeeded);
            }
            self.steps += 1;
            let max_steps = self.config.get_max_steps();
            if max_steps != 0 && self.steps > max_steps {
                return Err(RuntimeError::MaxStepsExceeded(max_steps));
            }

            let frame_ref = self
                .frames
                .current()
                .expect("current is Some: the stop_at==None top-level check above already returned");
            let code_pos = self.frames.get(frame_ref).code_pos;
            let (instruction, next) = self.code.decode_at(code_pos)?;

            match instruction {
                Instruction::NoGoal => {
                    self.frames.pop();
                }
                Instruction::Cut => {
                    self.tracer.trace_cut();
                    let barrier = self.frames.get(frame_ref).cut_barrier;
                    self.choice_points.truncate(barrier.max(floor));
                    let (terminator, after) = self.code.decode_at(next)?;
                    debug_assert!(matches!(terminator, Instruction::Call | Instruction::LastCall));
                    self.frames.get_mut(frame_ref).code_pos = after;
                }
                Instruction::Goal { name, continuation } => {
                    let (_, arity) = self.interner.name_of(name)?;
                    let mut offset = next;
                    let mut args = Vec::with_capacity(arity as usize);
                    for _ in 0..arity {
                        let frame = self.frames.get_mut(frame_ref);
                        args.push(build_arg(self.code, &mut offset, &mut self.heap, frame, self.interner)?);
                    }
                    self.frames.get_mut(frame_ref).code_pos = continuation;

                    if !self.dispatch_goal(name, arity, args, frame_ref)? && !self.backtrack_above(floor)? {
                        return Ok(Solved::Exhausted);
                    }
                }
                _ => {
                    return Err(RuntimeError::InternalInvariant(
                        "unexpected instruction at a clause body position",
                    ));
                }
            }
        }
    }

    /// Pop and retry choice points down to (but not including) `floor`,
    /// restoring each one's trail/heap watermark before the retry.
    fn backtrack_above(&mut self, floor: usize) -> Result<bool, RuntimeError> {
        loop {
            if self.choice_points.len() <= floor {
                return Ok(false);
            }
            let last = self.choice_points.last_mut().expect("checked len() > floor above");
            if last.remaining_entries.is_empty() {
                self.choice_points.pop();
                continue;
            }
            let entry = last.remaining_entries.remove(0);
            let is_last_alternative = last.remaining_entries.is_empty();
            let args = last.args.clone();
            let caller = last.caller;
            let cut_barrier = last.cut_barrier;
            let trail_mark = last.trail_mark;
            let heap_mark = last.heap_mark;
            let name = last.name;
            let arity = last.arity;

            if is_last_alternative {
                self.choice_points.pop();
            }
            self.trail.undo_to(&mut self.heap, trail_mark);
            self.heap.truncate(heap_mark);

            let (name_text, _) = self.interner.name_of(name)?;
            self.tracer.trace_goal(name_text, arity, Port::Redo);

            if self.try_clause(entry, &args, caller, cut_barrier)? {
                return Ok(true);
            }
        }
    }

    /// Select the clause at `entry`, head-unify it against `args`, and —
    /// on success — make its frame current. On mismatch, every binding
    /// made during the attempt is rolled back and `current` is restored
    /// to `caller`.
    fn try_clause(
        &mut self,
        entry: u32,
        args: &[HeapRef],
        caller: Option<FrameRef>,
        cut_barrier: usize,
    ) -> Result<bool, RuntimeError> {
        let new_frame = self.frames.push_with_parent(entry, cut_barrier, caller);
        let mark = self.trail.mark();
        let mut offset = entry;
        let mut matched = true;
        for &goal_arg in args {
            let frame = self.frames.get_mut(new_frame);
            if !match_arg(self.code, &mut offset, &mut self.heap, &mut self.trail, frame, self.interner, goal_arg)? {
                matched = false;
                break;
            }
        }

        if matched {
            self.frames.get_mut(new_frame).code_pos = offset;
            Ok(true)
        } else {
            self.trail.undo_to(&mut self.heap, mark);
            self.frames.set_current(caller);
            Ok(false)
        }
    }

    /// Dispatch a call to `name/arity` with already-built `args`:
    /// self-contained built-ins resolve immediately, `call/1` and
    /// `not/1` recurse, and everything else selects a clause (pushing a
    /// choice point for any remaining alternatives).
    fn dispatch_goal(
        &mut self,
        name: FunctorId,
        arity: u32,
        args: Vec<HeapRef>,
        frame_ref: FrameRef,
    ) -> Result<bool, RuntimeError> {
        let (name_text, _) = self.interner.name_of(name)?;
        let name_text = name_text.to_owned();

        if let Some(outcome) = builtins::dispatch(&name_text, &args, &mut self.heap, &mut self.trail, self.interner) {
            return match outcome {
                Ok(ok) => Ok(ok),
                Err(RuntimeError::TypeError(_)) | Err(RuntimeError::InstantiationError)
                    if !self.config.get_strict_errors() =>
                {
                    Ok(false)
                }
                Err(e) => Err(e),
            };
        }

        if name_text == "call" && arity == 1 {
            let (callee_name, callee_arity, callee_args) = self.deref_as_callable(args[0])?;
            return self.dispatch_goal(callee_name, callee_arity, callee_args, frame_ref);
        }
        if name_text == "not" && arity == 1 {
            return self.dispatch_not1(args[0], frame_ref);
        }

        let entries = self.code.entries_for(name, arity);
        if entries.is_empty() {
            return Ok(false);
        }
        self.tracer.trace_goal(&name_text, arity, Port::Call);
        let cut_barrier = self.choice_points.len();
        let mut remaining: Vec<u32> = entries.to_vec();
        let first_entry = remaining.remove(0);
        if !remaining.is_empty() {
            self.choice_points.push(ChoicePoint {
                name,
                arity,
                args: args.clone(),
                remaining_entries: remaining,
                caller: Some(frame_ref),
                cut_barrier,
                trail_mark: self.trail.mark(),
                heap_mark: self.heap.len(),
            });
        }
        self.try_clause(first_entry, &args, Some(frame_ref), cut_barrier)
    }

    /// Negation as failure: run the argument to completion in an
    /// isolated nested search, then unconditionally discard every
    /// binding and choice point it produced — success or failure, `not`
    /// never leaves a trace.
    fn dispatch_not1(&mut self, arg: HeapRef, frame_ref: FrameRef) -> Result<bool, RuntimeError> {
        let (name, arity, args) = self.deref_as_callable(arg)?;
        let trail_mark = self.trail.mark();
        let heap_mark = self.heap.len();
        let floor = self.choice_points.len();

        let entered = self.dispatch_goal(name, arity, args, frame_ref)?;
        let succeeded = entered && matches!(self.run_until(Some(frame_ref), floor)?, Solved::Succeeded);

        self.choice_points.truncate(floor);
        self.trail.undo_to(&mut self.heap, trail_mark);
        self.heap.truncate(heap_mark);
        self.frames.set_current(Some(frame_ref));

        Ok(!succeeded)
    }

    fn deref_as_callable(&self, r: HeapRef) -> Result<(FunctorId, u32, Vec<HeapRef>), RuntimeError> {
        let d = self.heap.deref(r);
        match self.heap.cell(d) {
            HeapCell::Var(_) => Err(RuntimeError::InstantiationError),
            HeapCell::Atom(name) => Ok((*name, 0, Vec::new())),
            HeapCell::Struct(name, args) => Ok((*name, args.len() as u32, args.clone())),
            _ => Err(RuntimeError::TypeError("call/1 argument must be callable".into())),
        }
    }
}

/// Decode one goal-side ("put") term instruction, building it fresh from
/// `frame`'s slots and the heap. Used for a body goal's own arguments.
fn build_arg(
    code: &CodeArea,
    offset: &mut u32,
    heap: &mut Heap,
    frame: &mut Frame,
    interner: &Interner,
) -> Result<HeapRef, RuntimeError> {
    let (instruction, next) = code.decode_at(*offset)?;
    *offset = next;
    Ok(match instruction {
        Instruction::Atom(name) => heap.new_atom(name),
        Instruction::Int(v) => heap.new_int(v),
        Instruction::Real(v) => heap.new_real(v),
        Instruction::Nil => heap.new_nil(),
        Instruction::Struct(name) => {
            let arity = struct_arity(interner, name)?;
            let mut args = Vec::with_capacity(arity);
            for _ in 0..arity {
                args.push(build_arg(code, offset, heap, frame, interner)?);
            }
            heap.new_struct(name, args)
        }
        Instruction::List => {
            let head = build_arg(code, offset, heap, frame, interner)?;
            let tail = build_arg(code, offset, heap, frame, interner)?;
            heap.new_cons(head, tail)
        }
        Instruction::Void => heap.new_var(),
        Instruction::FirstVar(slot) | Instruction::FirstTemp(slot) => {
            let fresh = heap.new_var();
            frame.set_slot(slot, fresh);
            fresh
        }
        Instruction::NextVar(slot) | Instruction::NextTemp(slot) => frame
            .slot(slot)
            .ok_or(RuntimeError::InternalInvariant("next_var before first_var in a goal argument"))?,
        _ => {
            return Err(RuntimeError::InternalInvariant(
                "unexpected instruction while building a goal argument",
            ));
        }
    })
}

/// Decode one head-side ("get") term instruction and unify it against
/// the already-built `goal_ref`. Returns `false` on a structural
/// mismatch; the caller is responsible for rolling back the trail.
fn match_arg(
    code: &CodeArea,
    offset: &mut u32,
    heap: &mut Heap,
    trail: &mut Trail,
    frame: &mut Frame,
    interner: &Interner,
    goal_ref: HeapRef,
) -> Result<bool, RuntimeError> {
    let (instruction, next) = code.decode_at(*offset)?;
    *offset = next;
    let goal_ref = heap.deref(goal_ref);

    Ok(match instruction {
        Instruction::Void => true,
        Instruction::Atom(name) => match heap.cell(goal_ref).clone() {
            HeapCell::Var(_) => {
                let built = heap.new_atom(name);
                bind(heap, trail, goal_ref, built)
            }
            HeapCell::Atom(other) => other == name,
            _ => false,
        },
        Instruction::Int(v) => match heap.cell(goal_ref).clone() {
            HeapCell::Var(_) => {
                let built = heap.new_int(v);
                bind(heap, trail, goal_ref, built)
            }
            HeapCell::Int(other) => other == v,
            _ => false,
        },
        Instruction::Real(v) => match heap.cell(goal_ref).clone() {
            HeapCell::Var(_) => {
                let built = heap.new_real(v);
                bind(heap, trail, goal_ref, built)
            }
            HeapCell::Real(other) => other == v,
            _ => false,
        },
        Instruction::Nil => match heap.cell(goal_ref).clone() {
            HeapCell::Var(_) => {
                let built = heap.new_nil();
                bind(heap, trail, goal_ref, built)
            }
            HeapCell::Nil => true,
            _ => false,
        },
        Instruction::Struct(name) => {
            let arity = struct_arity(interner, name)?;
            match heap.cell(goal_ref).clone() {
                HeapCell::Var(_) => {
                    let mut members = Vec::with_capacity(arity);
                    for _ in 0..arity {
                        members.push(heap.new_var());
                    }
                    let built = heap.new_struct(name, members.clone());
                    bind(heap, trail, goal_ref, built);
                    let mut ok = true;
                    for &member in &members {
                        if !match_arg(code, offset, heap, trail, frame, interner, member)? {
                            ok = false;
                        }
                    }
                    ok
                }
                HeapCell::Struct(other_name, other_args) if other_name == name && other_args.len() == arity => {
                    let mut ok = true;
                    for &member in &other_args {
                        if !match_arg(code, offset, heap, trail, frame, interner, member)? {
                            ok = false;
                        }
                    }
                    ok
                }
                _ => false,
            }
        }
        Instruction::List => match heap.cell(goal_ref).clone() {
            HeapCell::Var(_) => {
                let head_slot = heap.new_var();
                let tail_slot = heap.new_var();
                let built = heap.new_cons(head_slot, tail_slot);
                bind(heap, trail, goal_ref, built);
                let head_ok = match_arg(code, offset, heap, trail, frame, interner, head_slot)?;
                let tail_ok = match_arg(code, offset, heap, trail, frame, interner, tail_slot)?;
                head_ok && tail_ok
            }
            HeapCell::Cons(h, t) => {
                let head_ok = match_arg(code, offset, heap, trail, frame, interner, h)?;
                let tail_ok = match_arg(code, offset, heap, trail, frame, interner, t)?;
                head_ok && tail_ok
            }
            _ => false,
        },
        Instruction::FirstVar(slot) | Instruction::FirstTemp(slot) => {
            frame.set_slot(slot, goal_ref);
            true
        }
        Instruction::NextVar(slot) | Instruction::NextTemp(slot) => {
            let prev = frame
                .slot(slot)
                .ok_or(RuntimeError::InternalInvariant("next_var before first_var in a head pattern"))?;
            super::unify::unify(heap, trail, prev, goal_ref)
        }
        _ => {
            return Err(RuntimeError::InternalInvariant(
                "unexpected instruction while matching a head argument",
            ));
        }
    })
}

/// `Struct(name)`'s argument count, looked up the same way every other
/// component resolves functor identity: the interner is the single
/// source of truth for a functor's arity.
fn struct_arity(interner: &Interner, name: FunctorId) -> Result<usize, RuntimeError> {
    let (_, arity) = interner.name_of(name)?;
    Ok(arity as usize)
}

fn bind(heap: &mut Heap, trail: &mut Trail, var: HeapRef, value: HeapRef) -> bool {
    heap.bind(var, value);
    trail.record(var);
    true
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
