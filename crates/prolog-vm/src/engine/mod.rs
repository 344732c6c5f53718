//! The resolution engine: heap, trail, frame arena, choice points, and
//! the resolver that ties them together into the VAM2P dispatch loop.

mod arith;
mod builtins;
mod choice_point;
mod config;
mod error;
mod frame;
mod heap;
mod resolver;
mod solution;
mod trace;
mod trail;
mod unify;

pub use choice_point::ChoicePoint;
pub use config::ResolverConfig;
pub use error::RuntimeError;
pub use frame::{Frame, FrameArena, FrameRef};
pub use heap::{Heap, HeapCell, HeapRef};
pub use resolver::{Resolver, Solved};
pub use solution::{Binding, Solution};
pub use trace::{NoopTracer, Port, PrintTracer, Tracer};
pub use trail::Trail;
