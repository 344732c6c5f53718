//! The trail: every variable binding made during resolution, in order,
//! so a choice-point rollback can undo exactly the bindings made since
//! it was pushed.
//!
//! Mirrors the watermark/truncate shape of an effect log: `mark` takes a
//! low-water position, `undo_to` discards (and reverses) everything
//! recorded since.

use super::heap::{Heap, HeapRef};

#[derive(Default, Debug)]
pub struct Trail {
    entries: Vec<HeapRef>,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Current length, used as a choice point's rollback watermark.
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Record that `var` was just bound, so it can be unwound later.
    pub fn record(&mut self, var: HeapRef) {
        self.entries.push(var);
    }

    /// Unwind every binding recorded since `mark`, restoring each
    /// variable to unbound on `heap`.
    pub fn undo_to(&mut self, heap: &mut Heap, mark: usize) {
        while self.entries.len() > mark {
            let var = self.entries.pop().expect("checked len() > mark above");
            heap.unbind(var);
        }
    }
}

#[cfg(test)]
#[path = "trail_tests.rs"]
mod trail_tests;
