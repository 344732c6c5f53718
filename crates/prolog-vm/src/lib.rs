//! Resolution engine for the logic language: a VAM2P two-pointer abstract
//! machine, realized as an explicit frame stack and choice-point stack
//! over a compiled [`prolog_bytecode::CodeArea`].
//!
//! This crate owns the mutable runtime state (heap, trail, frames,
//! choice points) and the resolver loop that drives it. It has no
//! dependency on the compiler: callers supply a `CodeArea`, an entry
//! offset, and a `var_slots` map, and get solutions back.

pub mod engine;

pub use engine::{
    Binding, ChoicePoint, Frame, FrameArena, FrameRef, Heap, HeapCell, HeapRef, NoopTracer, Port,
    PrintTracer, Resolver, ResolverConfig, RuntimeError, Solution, Solved, Tracer, Trail,
};
