use super::*;
use crate::engine::heap::Heap;
use prolog_bytecode::VarSlot;

#[test]
fn pop_walks_to_the_parent_frame() {
    let mut arena = FrameArena::default();
    let root = arena.push(0, 0);
    let child = arena.push_with_parent(10, 0, Some(root));
    assert_eq!(arena.current(), Some(child));
    arena.pop();
    assert_eq!(arena.current(), Some(root));
    arena.pop();
    assert_eq!(arena.current(), None);
}

#[test]
fn slots_start_unbound_and_are_independent_per_frame() {
    let mut heap = Heap::default();
    let mut arena = FrameArena::default();
    let a = arena.push(0, 0);
    let b = arena.push_with_parent(0, 0, None);
    let v = heap.new_var();
    arena.get_mut(a).set_slot(VarSlot::new(0), v);
    assert_eq!(arena.get(a).slot(VarSlot::new(0)), Some(v));
    assert_eq!(arena.get(b).slot(VarSlot::new(0)), None);
}
