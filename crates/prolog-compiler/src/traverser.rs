//! A reversible, depth-first walk over one clause's term tree, reporting
//! the positional context (head/body, top-level, last-body-functor, …)
//! a downstream visitor needs without threading that state through every
//! call site itself.
//!
//! Each recursive call to `walk_term` builds the [`Context`] for its own
//! sub-term and passes the enclosing functor's key down as `parent`,
//! then emits [`Event::Enter`] before recursing into the children and
//! [`Event::Leave`] after — plain recursive descent, not an explicit
//! stack. A visitor sees only the current and parent context at each
//! event; walking up further than one level means tracking earlier
//! events itself.

use prolog_core::{Clause, SymbolKey, Term};

/// Traversal order flags, fixed for the lifetime of one traversal.
#[derive(Debug, Clone, Copy)]
pub struct TraverserConfig {
    pub clause_head_first: bool,
    pub left_to_right_clause_bodies: bool,
    pub left_to_right_functor_args: bool,
}

impl Default for TraverserConfig {
    fn default() -> Self {
        Self {
            clause_head_first: true,
            left_to_right_clause_bodies: true,
            left_to_right_functor_args: true,
        }
    }
}

/// The positional context of one sub-term at the point a visitor sees it.
#[derive(Debug, Clone, Copy)]
pub struct Context<'c> {
    pub term: &'c Term,
    pub symbol_key: SymbolKey,
    /// True for the clause head functor itself and for each direct body
    /// functor; false for anything nested inside one (arguments, list
    /// cells, …).
    pub is_top_level: bool,
    pub is_in_head: bool,
    /// True for the last body functor and everything nested under it.
    pub is_last_body_functor: bool,
    pub position: usize,
    pub parent: Option<SymbolKey>,
}

/// One step of the traversal: a sub-term is entered, or left.
#[derive(Debug, Clone, Copy)]
pub enum Event<'c> {
    Enter(Context<'c>),
    Leave(Context<'c>),
}

impl<'c> Event<'c> {
    pub fn context(&self) -> &Context<'c> {
        match self {
            Event::Enter(ctx) | Event::Leave(ctx) => ctx,
        }
    }

    pub fn is_entering(&self) -> bool {
        matches!(self, Event::Enter(_))
    }

    pub fn is_leaving(&self) -> bool {
        matches!(self, Event::Leave(_))
    }
}

/// Drives one depth-first, backtracking-safe walk over a clause.
pub struct Traverser<'c> {
    clause: &'c Clause,
    config: TraverserConfig,
}

impl<'c> Traverser<'c> {
    pub fn new(clause: &'c Clause, config: TraverserConfig) -> Self {
        Self { clause, config }
    }

    /// Walk the clause, calling `visitor` once on entry and once on leave
    /// for every sub-term.
    pub fn walk(&self, mut visitor: impl FnMut(Event<'c>)) {
        let walk_head = |visitor: &mut dyn FnMut(Event<'c>)| {
            if let Some(head) = &self.clause.head {
                self.walk_term(head, true, true, false, None, 0, visitor);
            }
        };
        let walk_body = |visitor: &mut dyn FnMut(Event<'c>)| self.walk_body(visitor);

        if self.config.clause_head_first {
            walk_head(&mut visitor);
            walk_body(&mut visitor);
        } else {
            walk_body(&mut visitor);
            walk_head(&mut visitor);
        }
    }

    fn walk_body(&self, visitor: &mut dyn FnMut(Event<'c>)) {
        let body = &self.clause.body;
        if body.is_empty() {
            return;
        }
        let last_idx = body.len() - 1;
        let order: Box<dyn Iterator<Item = usize>> = if self.config.left_to_right_clause_bodies {
            Box::new(0..body.len())
        } else {
            Box::new((0..body.len()).rev())
        };
        for i in order {
            let is_last = i == last_idx;
            self.walk_term(&body[i], true, false, is_last, None, i, visitor);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_term(
        &self,
        term: &'c Term,
        top_level: bool,
        in_head: bool,
        last_body: bool,
        parent: Option<SymbolKey>,
        position: usize,
        visitor: &mut dyn FnMut(Event<'c>),
    ) {
        let ctx = Context {
            term,
            symbol_key: term.key(),
            is_top_level: top_level,
            is_in_head: in_head,
            is_last_body_functor: last_body,
            position,
            parent,
        };
        visitor(Event::Enter(ctx));

        match term {
            Term::Functor { key, args, .. } => {
                let order: Box<dyn Iterator<Item = usize>> =
                    if self.config.left_to_right_functor_args {
                        Box::new(0..args.len())
                    } else {
                        Box::new((0..args.len()).rev())
                    };
                for idx in order {
                    self.walk_term(&args[idx], false, in_head, last_body, Some(*key), idx, visitor);
                }
            }
            Term::Cons { key, head, tail, .. } => {
                self.walk_term(head, false, in_head, last_body, Some(*key), 0, visitor);
                self.walk_term(tail, false, in_head, last_body, Some(*key), 1, visitor);
            }
            Term::Var { .. } | Term::Int { .. } | Term::Real { .. } | Term::Nil { .. } => {}
        }

        visitor(Event::Leave(ctx));
    }
}

#[cfg(test)]
#[path = "traverser_tests.rs"]
mod traverser_tests;
