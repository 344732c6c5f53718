use super::*;
use prolog_core::Interner;

#[test]
fn two_unbound_variables_unify_by_binding_one_to_the_other() {
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let a = heap.new_var();
    let b = heap.new_var();
    assert!(unify(&mut heap, &mut trail, a, b));
    assert_eq!(heap.deref(a), heap.deref(b));
}

#[test]
fn mismatched_atoms_fail() {
    let mut interner = Interner::new();
    let a_id = interner.intern_functor("a", 0).unwrap();
    let b_id = interner.intern_functor("b", 0).unwrap();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let a = heap.new_atom(a_id);
    let b = heap.new_atom(b_id);
    assert!(!unify(&mut heap, &mut trail, a, b));
}

#[test]
fn structures_unify_argument_by_argument() {
    let mut interner = Interner::new();
    let f = interner.intern_functor("f", 1).unwrap();
    let mut heap = Heap::default();
    let mut trail = Trail::default();
    let x = heap.new_var();
    let one = heap.new_int(1);
    let s1 = heap.new_struct(f, vec![x]);
    let s2 = heap.new_struct(f, vec![one]);
    assert!(unify(&mut heap, &mut trail, s1, s2));
    assert_eq!(heap.deref(x), one);
}

/// WAM book 2.9: unify `p(f(X),h(Y,f(a)),Y)` with `p(Z,h(Z,W),f(W))`.
#[test]
fn wam_book_2_9_unification_succeeds_with_free_variable_substitutions() {
    let mut interner = Interner::new();
    let p = interner.intern_functor("p", 3).unwrap();
    let f1 = interner.intern_functor("f", 1).unwrap();
    let h = interner.intern_functor("h", 2).unwrap();
    let a_atom = interner.intern_functor("a", 0).unwrap();

    let mut heap = Heap::default();
    let mut trail = Trail::default();

    // p(f(X), h(Y, f(a)), Y)
    let x = heap.new_var();
    let y = heap.new_var();
    let a = heap.new_atom(a_atom);
    let f_a = heap.new_struct(f1, vec![a]);
    let f_x = heap.new_struct(f1, vec![x]);
    let h_y_fa = heap.new_struct(h, vec![y, f_a]);
    let term1 = heap.new_struct(p, vec![f_x, h_y_fa, y]);

    // p(Z, h(Z, W), f(W))
    let z = heap.new_var();
    let w = heap.new_var();
    let h_z_w = heap.new_struct(h, vec![z, w]);
    let f_w = heap.new_struct(f1, vec![w]);
    let term2 = heap.new_struct(p, vec![z, h_z_w, f_w]);

    assert!(unify(&mut heap, &mut trail, term1, term2));

    // X = W = f(a); Y = Z = f(f(a)).
    assert!(term_eq(&heap, x, w));
    assert!(term_eq(&heap, y, z));
    assert!(!term_eq(&heap, x, y));
}

/// Read-only structural equality after full dereferencing, for asserting
/// on a solved binding graph without mutating it further.
fn term_eq(heap: &Heap, a: HeapRef, b: HeapRef) -> bool {
    let a = heap.deref(a);
    let b = heap.deref(b);
    match (heap.cell(a), heap.cell(b)) {
        (HeapCell::Var(_), HeapCell::Var(_)) => a == b,
        (HeapCell::Atom(n1), HeapCell::Atom(n2)) => n1 == n2,
        (HeapCell::Int(x), HeapCell::Int(y)) => x == y,
        (HeapCell::Real(x), HeapCell::Real(y)) => x == y,
        (HeapCell::Nil, HeapCell::Nil) => true,
        (HeapCell::Struct(n1, args1), HeapCell::Struct(n2, args2)) => {
            n1 == n2
                && args1.len() == args2.len()
                && args1.iter().zip(args2).all(|(&x, &y)| term_eq(heap, x, y))
        }
        (HeapCell::Cons(h1, t1), HeapCell::Cons(h2, t2)) => {
            term_eq(heap, *h1, *h2) && term_eq(heap, *t1, *t2)
        }
        _ => false,
    }
}
