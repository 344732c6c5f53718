//! Execution tracing: a `Tracer` trait the resolver calls into at the
//! two events a backtracking search can observe cheaply without extra
//! bookkeeping — a goal being tried (first time or on retry) and a cut
//! firing. Mirrors the classic four-port Prolog debugger's `Call`/`Redo`
//! ports; `Exit`/`Fail` would need per-frame goal identity the resolver
//! doesn't otherwise track and aren't worth the extra state for a
//! debugging aid.
//!
//! `NoopTracer`'s methods are `#[inline(always)]` no-ops so a resolver
//! built without `--trace` pays nothing for the hook.

/// Which port a goal is being traced at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    Call,
    Redo,
}

pub trait Tracer {
    fn trace_goal(&mut self, name: &str, arity: u32, port: Port);
    fn trace_cut(&mut self);
}

pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_goal(&mut self, _name: &str, _arity: u32, _port: Port) {}

    #[inline(always)]
    fn trace_cut(&mut self) {}
}

/// Prints one line per traced event to stdout, in the classic tracer
/// shape (`Call: name/arity`).
#[derive(Default)]
pub struct PrintTracer;

impl Tracer for PrintTracer {
    fn trace_goal(&mut self, name: &str, arity: u32, port: Port) {
        let label = match port {
            Port::Call => "Call",
            Port::Redo => "Redo",
        };
        println!("{label}: {name}/{arity}");
    }

    fn trace_cut(&mut self) {
        println!("Cut");
    }
}
