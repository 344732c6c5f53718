//! The environment arena: one [`Frame`] per active clause invocation.
//!
//! Frames form a cactus stack, same pattern as a call-frame arena:
//! append-only, with a `current` pointer that moves on call/return and
//! can be rewound wholesale on backtracking without invalidating frames
//! a choice point still references. "Popping" a frame (clause body
//! exhausted via `nogoal`) just walks `current` to the parent; the
//! frame itself stays in the backing `Vec` for the rest of the query,
//! since a choice point below it in the search tree may still hold a
//! [`FrameRef`] into it. The arena never reclaims space mid-query; a
//! [`Resolver`](super::resolver::Resolver) only ever drops it all at
//! once, by replacing it wholesale at the start of a fresh query.

use prolog_bytecode::VarSlot;

use super::heap::HeapRef;

/// One active clause (or query) invocation.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Byte offset of the next instruction to decode in this frame's
    /// clause body (the "gip"/"hip" of the two-pointer design, scoped
    /// per-activation rather than globally).
    pub code_pos: u32,
    /// This clause's local variable slots, indexed by `VarSlot`.
    pub slots: Vec<Option<HeapRef>>,
    /// The frame whose body resumes once this one finishes (`nogoal`).
    pub parent: Option<FrameRef>,
    /// `choice_points.len()` at the moment this frame's clause was
    /// selected, before that selection's own alternative-clause choice
    /// point (if any) was pushed. `!` truncates to this.
    pub cut_barrier: usize,
}

impl Frame {
    /// The heap reference bound to `slot` in this frame, if any occurrence
    /// of that variable has been seen yet.
    pub fn slot(&self, slot: VarSlot) -> Option<HeapRef> {
        self.slots.get(slot.as_u32() as usize).copied().flatten()
    }

    /// Record the heap reference for `slot`'s first occurrence, growing
    /// the slot vector on demand (slot counts aren't known up front).
    pub fn set_slot(&mut self, slot: VarSlot, value: HeapRef) {
        let idx = slot.as_u32() as usize;
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some(value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRef(u32);

impl FrameRef {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Default, Debug)]
pub struct FrameArena {
    frames: Vec<Frame>,
    current: Option<FrameRef>,
}

impl FrameArena {
    pub fn push(&mut self, code_pos: u32, cut_barrier: usize) -> FrameRef {
        self.push_with_parent(code_pos, cut_barrier, self.current)
    }

    /// Push a frame whose parent is explicitly `parent` rather than the
    /// current frame — used when a choice point retries a call, since
    /// the retry's parent is the call site, not wherever execution
    /// happened to be when the choice point was reached.
    pub fn push_with_parent(
        &mut self,
        code_pos: u32,
        cut_barrier: usize,
        parent: Option<FrameRef>,
    ) -> FrameRef {
        let idx = self.frames.len() as u32;
        self.frames.push(Frame {
            code_pos,
            slots: Vec::new(),
            parent,
            cut_barrier,
        });
        let r = FrameRef(idx);
        self.current = Some(r);
        r
    }

    pub fn get(&self, r: FrameRef) -> &Frame {
        &self.frames[r.index()]
    }

    pub fn get_mut(&mut self, r: FrameRef) -> &mut Frame {
        &mut self.frames[r.index()]
    }

    pub fn current(&self) -> Option<FrameRef> {
        self.current
    }

    pub fn set_current(&mut self, r: Option<FrameRef>) {
        self.current = r;
    }

    /// Walk to the parent of the current frame (clause body exhausted).
    pub fn pop(&mut self) {
        self.current = self.current.and_then(|r| self.frames[r.index()].parent);
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod frame_tests;
