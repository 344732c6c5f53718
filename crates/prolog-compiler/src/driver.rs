//! Orchestrates the compilation pipeline: parse, annotate, generate,
//! appending each fact/rule's instructions to one shared code area and
//! indexing it by `(name, arity)` the way the resolver looks clauses up.

use std::collections::HashMap;

use prolog_bytecode::{CodeArea, VarSlot};
use prolog_core::{Clause, Interner, Term, VarId};

use crate::annotate::annotate;
use crate::codegen::{clause_var_slots, generate};
use crate::error::{CompileError, LinkageError};
use crate::symbol_table::SymbolTable;

/// Names the resolver special-cases at dispatch time rather than
/// looking up in the code area (component K) — a strict-mode linkage
/// check must not flag a call to one of these as undefined. Kept in
/// sync with the runtime's own builtin dispatch table by hand, the way
/// a compiler's view of a VM's intrinsics usually is.
const BUILTINS: &[(&str, u32)] = &[
    ("true", 0),
    ("fail", 0),
    ("false", 0),
    ("=", 2),
    ("\\=", 2),
    ("is", 2),
    ("<", 2),
    ("=<", 2),
    (">", 2),
    (">=", 2),
    ("integer", 1),
    ("float", 1),
    ("var", 1),
    ("call", 1),
    ("not", 1),
    ("!", 0),
];

/// Whether a call to an undefined predicate is a hard compile error
/// (`Strict`) or left to fail at resolution time (`Lenient`), per the
/// error-handling table's linkage-error row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkageMode {
    Strict,
    Lenient,
}

/// A compiled query: its entry offset into the shared code area, and
/// the slot each of its named variables ended up in, so a solution's
/// bindings can be reported back under the names the caller used.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub entry: u32,
    pub var_slots: HashMap<VarId, VarSlot>,
}

/// Compiles source text against one shared [`CodeArea`] and [`Interner`].
#[derive(Default)]
pub struct Driver {
    code: CodeArea,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &CodeArea {
        &self.code
    }

    /// Drop every compiled clause, as if freshly constructed.
    pub fn reset(&mut self) {
        self.code.reset();
    }

    /// Parse and compile every clause in `source`. Facts and rules are
    /// appended to the shared code area; a trailing query clause (if
    /// any) is compiled but not indexed, and returned to the caller.
    pub fn consult(
        &mut self,
        source: &str,
        interner: &mut Interner,
        mode: LinkageMode,
    ) -> Result<Option<CompiledQuery>, CompileError> {
        let clauses = crate::parser::parse(source, interner)?;
        let mut query = None;
        for clause in &clauses {
            if clause.is_query() {
                query = Some(self.compile_query(clause, interner)?);
            } else {
                self.load_clause(clause, interner)?;
            }
        }
        if mode == LinkageMode::Strict {
            self.check_linkage(&clauses, interner)?;
        }
        Ok(query)
    }

    /// Compile one fact or rule and append it to the code area.
    pub fn load_clause(&mut self, clause: &Clause, interner: &Interner) -> Result<u32, CompileError> {
        let name = clause
            .head_functor()
            .expect("load_clause is only called with facts and rules, which always have a head");
        let arity = clause.head.as_ref().map(Term::arity).unwrap_or(0) as u32;
        let mut table = SymbolTable::new();
        let annotations = annotate(clause, &mut table);
        let instructions = generate(clause, &annotations, interner);
        Ok(self.code.append_clause(name, arity, &instructions))
    }

    /// Compile a query clause (no head). Queries share the code area's
    /// buffer so the resolver can walk them with the same `decode_at` it
    /// uses for clause bodies, but under a reserved marker functor —
    /// nothing ever calls one by name.
    pub fn compile_query(
        &mut self,
        clause: &Clause,
        interner: &mut Interner,
    ) -> Result<CompiledQuery, CompileError> {
        let mut table = SymbolTable::new();
        let annotations = annotate(clause, &mut table);
        let instructions = generate(clause, &annotations, &*interner);
        let var_slots = clause_var_slots(clause);
        let marker = interner.intern_functor("$query", 0)?;
        let entry = self.code.append_clause(marker, 0, &instructions);
        Ok(CompiledQuery { entry, var_slots })
    }

    fn check_linkage(&self, clauses: &[Clause], interner: &Interner) -> Result<(), LinkageError> {
        for clause in clauses {
            for goal in &clause.body {
                let Term::Functor { name, args, .. } = goal else {
                    continue;
                };
                let arity = args.len() as u32;
                let (text, _) = interner
                    .name_of(*name)
                    .expect("every functor in a parsed clause was interned by that same parse");
                if BUILTINS.contains(&(text, arity)) {
                    continue;
                }
                if !self.code.is_defined(*name, arity) {
                    return Err(LinkageError {
                        name: text.to_owned(),
                        arity,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
