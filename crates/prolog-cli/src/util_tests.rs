use super::*;
use prolog_compiler::LinkageMode;
use prolog_vm::ResolverConfig;

use crate::engine::Engine;

#[test]
fn format_solution_renders_every_named_variable_sorted_alphabetically() {
    let mut engine = Engine::new(ResolverConfig::default(), LinkageMode::Lenient);
    let compiled = engine.consult("pair(1, a).\n?- pair(Y, X).").unwrap().unwrap();
    let mut run = engine.query(&compiled);
    let solution = run.next().unwrap().unwrap();
    assert_eq!(format_solution(&solution), "X = a, Y = 1");
}

#[test]
fn format_solution_reports_an_empty_query_as_true() {
    let mut engine = Engine::new(ResolverConfig::default(), LinkageMode::Lenient);
    let compiled = engine.consult("f(x).\n?- f(x).").unwrap().unwrap();
    let mut run = engine.query(&compiled);
    let solution = run.next().unwrap().unwrap();
    assert_eq!(format_solution(&solution), "true");
}

#[test]
fn format_solution_renders_a_compound_struct_binding() {
    let mut engine = Engine::new(ResolverConfig::default(), LinkageMode::Lenient);
    let compiled = engine.consult("f(point(1, 2)).\n?- f(X).").unwrap().unwrap();
    let mut run = engine.query(&compiled);
    let solution = run.next().unwrap().unwrap();
    assert_eq!(format_solution(&solution), "X = point(1, 2)");
}
