//! The annotating visitor: one traversal over a clause computing
//! groundness per sub-term and temporariness per variable, writing both
//! into the symbol table fields the instruction generator reads back.

use std::collections::HashMap;

use prolog_core::{Clause, SymbolKey, Term, VarId};

use crate::symbol_table::{SymbolTable, Value};
use crate::traverser::{Event, Traverser, TraverserConfig};

pub const FIELD_GROUND: &str = "ground";
pub const FIELD_TEMPORARY: &str = "temporary";

/// Result of annotating one clause: the per-variable temporariness bit,
/// alongside the symbol table it was written into.
pub struct Annotations {
    var_temporary: HashMap<VarId, bool>,
}

impl Annotations {
    pub fn is_temporary(&self, id: VarId) -> bool {
        // A variable never occurring is vacuously temporary — it has no
        // occurrence outside the head to disqualify it.
        self.var_temporary.get(&id).copied().unwrap_or(true)
    }
}

/// Run the groundness and temporariness passes over `clause`, writing
/// both into `table` and returning the temporariness lookup `codegen`
/// consumes directly.
pub fn annotate(clause: &Clause, table: &mut SymbolTable) -> Annotations {
    let mut var_temporary: HashMap<VarId, bool> = HashMap::new();
    let mut occurrences: HashMap<VarId, Vec<SymbolKey>> = HashMap::new();

    let traverser = Traverser::new(clause, TraverserConfig::default());
    traverser.walk(|event| {
        let Event::Leave(ctx) = event else {
            if let Event::Enter(ctx) = event {
                if let Term::Var { name, .. } = ctx.term {
                    occurrences.entry(*name).or_default().push(ctx.symbol_key);
                    let seen_in_head = ctx.is_in_head;
                    var_temporary
                        .entry(*name)
                        .and_modify(|temp| *temp = *temp && seen_in_head)
                        .or_insert(seen_in_head);
                }
            }
            return;
        };

        let ground = match ctx.term {
            Term::Functor { args, .. } => args
                .iter()
                .all(|arg| table.get(arg.key(), FIELD_GROUND) == Some(Value::Bool(true))),
            Term::Var { .. } => false,
            Term::Int { .. } | Term::Real { .. } | Term::Nil { .. } => true,
            Term::Cons { head, tail, .. } => {
                table.get(head.key(), FIELD_GROUND) == Some(Value::Bool(true))
                    && table.get(tail.key(), FIELD_GROUND) == Some(Value::Bool(true))
            }
        };
        table.put(ctx.symbol_key, FIELD_GROUND, Value::Bool(ground));
    });

    for (id, keys) in &occurrences {
        let temp = var_temporary.get(id).copied().unwrap_or(true);
        for &key in keys {
            table.put(key, FIELD_TEMPORARY, Value::Bool(temp));
        }
    }

    Annotations { var_temporary }
}

#[cfg(test)]
#[path = "annotate_tests.rs"]
mod annotate_tests;
