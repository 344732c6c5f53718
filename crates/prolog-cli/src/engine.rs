//! Ties the parser/compiler driver and the resolver together behind one
//! handle: consult source into the shared code area, then run a query
//! against whatever has been loaded so far.

use std::collections::HashMap;

use prolog_bytecode::{CodeArea, VarSlot};
use prolog_compiler::{CompiledQuery, Driver, LinkageMode};
use prolog_core::{Interner, VarId};
use prolog_vm::{Resolver, ResolverConfig, Solution, Tracer};

use crate::error::EngineError;

/// A loaded program plus the configuration every query against it runs
/// with. Each [`Engine::query`] call gets its own [`Resolver`] scoped to
/// the code compiled so far — consulting more clauses never disturbs a
/// query already in progress because that query owns a private heap,
/// trail, and choice-point stack.
pub struct Engine {
    interner: Interner,
    driver: Driver,
    config: ResolverConfig,
    linkage: LinkageMode,
}

impl Engine {
    pub fn new(config: ResolverConfig, linkage: LinkageMode) -> Self {
        Self {
            interner: Interner::new(),
            driver: Driver::new(),
            config,
            linkage,
        }
    }

    pub fn code(&self) -> &CodeArea {
        self.driver.code()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Compile every clause in `source` into the shared code area. A
    /// trailing query clause, if present, is compiled too and returned
    /// rather than indexed, since nothing can call a query by name.
    pub fn consult(&mut self, source: &str) -> Result<Option<CompiledQuery>, EngineError> {
        let result = self.driver.consult(source, &mut self.interner, self.linkage);
        match &result {
            Ok(query) => tracing::debug!(has_query = query.is_some(), bytes = self.driver.code().len(), "consulted source"),
            Err(e) => tracing::debug!(error = %e, "consult failed"),
        }
        result.map_err(EngineError::from)
    }

    /// Run one query to its first solution, then drain the rest via the
    /// returned closure's repeated calls — callers that only want one
    /// answer just call `next()` once and drop the iterator.
    pub fn query<'a>(&'a self, compiled: &'a CompiledQuery) -> QueryRun<'a> {
        QueryRun {
            resolver: Resolver::new(self.code(), &self.interner, compiled.entry, self.config.clone()),
            var_slots: &compiled.var_slots,
        }
    }

    /// Drop every compiled clause and every interned name, as if freshly
    /// constructed.
    pub fn reset(&mut self) {
        self.driver.reset();
        self.interner = Interner::new();
    }
}

/// One query's resolution in progress. Each [`QueryRun::next`] call
/// advances to the next solution, backtracking through the choice
/// points left by the previous one.
pub struct QueryRun<'a> {
    resolver: Resolver<'a>,
    var_slots: &'a HashMap<VarId, VarSlot>,
}

impl<'a> QueryRun<'a> {
    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.resolver.set_tracer(tracer);
    }

    pub fn next(&mut self) -> Option<Result<Solution, EngineError>> {
        match self.resolver.next_solution()? {
            Ok(()) => Some(self.resolver.solution(self.var_slots).map_err(EngineError::from)),
            Err(e) => Some(Err(EngineError::from(e))),
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
