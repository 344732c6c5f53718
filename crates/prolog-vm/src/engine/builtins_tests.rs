use super::*;
use prolog_core::Interner;

#[test]
fn equals_unifies_its_two_arguments() {
    let interner = Interner::new();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let v = heap.new_var();
    let one = heap.new_int(1);
    let ok = dispatch("=", &[v, one], &mut heap, &mut trail, &interner).unwrap();
    assert_eq!(ok.unwrap(), true);
    assert_eq!(heap.deref(v), one);
}

#[test]
fn not_equals_fails_when_terms_unify_and_leaves_no_binding() {
    let interner = Interner::new();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let v = heap.new_var();
    let one = heap.new_int(1);
    let ok = dispatch("\\=", &[v, one], &mut heap, &mut trail, &interner).unwrap();
    assert_eq!(ok.unwrap(), false);
    assert_eq!(heap.deref(v), v);
}

#[test]
fn is_evaluates_and_unifies_the_left_side() {
    let mut interner = Interner::new();
    let plus = interner.intern_functor("+", 2).unwrap();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let one = heap.new_int(1);
    let two = heap.new_int(2);
    let expr = heap.new_struct(plus, vec![one, two]);
    let result = heap.new_var();
    let ok = dispatch("is", &[result, expr], &mut heap, &mut trail, &interner).unwrap();
    assert_eq!(ok.unwrap(), true);
    assert!(matches!(heap.cell(heap.deref(result)), HeapCell::Int(3)));
}

#[test]
fn unknown_name_returns_none_so_the_caller_falls_back() {
    let interner = Interner::new();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    assert!(dispatch("frobnicate", &[], &mut heap, &mut trail, &interner).is_none());
}
