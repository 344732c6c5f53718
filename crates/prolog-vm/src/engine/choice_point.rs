//! Choice points: the state needed to retry a call with its next
//! matching clause after the current attempt backtracks.

use prolog_core::FunctorId;

use super::frame::FrameRef;
use super::heap::HeapRef;

#[derive(Clone, Debug)]
pub struct ChoicePoint {
    /// The call's name/arity, to re-look-up its clause entries.
    pub name: FunctorId,
    pub arity: u32,
    /// Already-built argument terms for this call, reused unchanged
    /// across every candidate clause.
    pub args: Vec<HeapRef>,
    /// Remaining candidate entry offsets, tried head-first.
    pub remaining_entries: Vec<u32>,
    /// The frame this call was issued from — its `code_pos` already
    /// points past the call, ready to resume once some candidate's
    /// clause body finishes.
    pub caller: Option<FrameRef>,
    /// The barrier every retried clause's own frame is stamped with.
    pub cut_barrier: usize,
    pub trail_mark: usize,
    pub heap_mark: usize,
}

#[cfg(test)]
#[path = "choice_point_tests.rs"]
mod choice_point_tests;
