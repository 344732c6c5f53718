use super::*;
use prolog_core::Interner;

#[test]
fn two_times_three_plus_one_is_seven() {
    let mut interner = Interner::new();
    let plus = interner.intern_functor("+", 2).unwrap();
    let times = interner.intern_functor("*", 2).unwrap();
    let mut heap = Heap::default();
    let two = heap.new_int(2);
    let three = heap.new_int(3);
    let one = heap.new_int(1);
    let mul = heap.new_struct(times, vec![two, three]);
    let expr = heap.new_struct(plus, vec![mul, one]);
    assert_eq!(eval(&heap, &interner, expr).unwrap(), Number::Int(7));
}

#[test]
fn parenthesized_sum_times_three_is_nine() {
    let mut interner = Interner::new();
    let plus = interner.intern_functor("+", 2).unwrap();
    let times = interner.intern_functor("*", 2).unwrap();
    let mut heap = Heap::default();
    let one = heap.new_int(1);
    let two = heap.new_int(2);
    let three = heap.new_int(3);
    let sum = heap.new_struct(plus, vec![one, two]);
    let expr = heap.new_struct(times, vec![sum, three]);
    assert_eq!(eval(&heap, &interner, expr).unwrap(), Number::Int(9));
}

#[test]
fn unbound_variable_is_an_instantiation_error() {
    let interner = Interner::new();
    let mut heap = Heap::default();
    let v = heap.new_var();
    assert!(matches!(
        eval(&heap, &interner, v),
        Err(RuntimeError::InstantiationError)
    ));
}
