//! The VAMAI instruction set: the same shape as VAM2P (component F), but
//! consumed by the abstract interpreter (component J) instead of the
//! resolver. It carries no runtime semantics of its own — no bindings, no
//! trail — only the structural information the abstract dispatch loop
//! needs to join variable-domain facts at each step.

use prolog_core::FunctorId;

use crate::instruction::{Instruction, VarSlot};

/// One step of the abstract instruction stream, derived 1:1 from its
/// VAM2P counterpart by [`AbstractInstruction::from_concrete`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AbstractInstruction {
    Literal,
    Struct(FunctorId),
    Nil,
    List,
    Void,
    FirstTemp(VarSlot),
    NextTemp(VarSlot),
    FirstVar(VarSlot),
    NextVar(VarSlot),
    Goal(FunctorId),
    Call,
    LastCall,
    Cut,
    NoGoal,
}

impl AbstractInstruction {
    /// Strip the runtime-only operands (literal values, continuation
    /// offsets) a concrete instruction carries, keeping only what the
    /// groundness/temporariness join needs.
    pub fn from_concrete(instruction: &Instruction) -> Self {
        match *instruction {
            Instruction::Atom(_) | Instruction::Int(_) | Instruction::Real(_) => Self::Literal,
            Instruction::Struct(name) => Self::Struct(name),
            Instruction::Nil => Self::Nil,
            Instruction::List => Self::List,
            Instruction::Void => Self::Void,
            Instruction::FirstTemp(slot) => Self::FirstTemp(slot),
            Instruction::NextTemp(slot) => Self::NextTemp(slot),
            Instruction::FirstVar(slot) => Self::FirstVar(slot),
            Instruction::NextVar(slot) => Self::NextVar(slot),
            Instruction::Goal { name, .. } => Self::Goal(name),
            Instruction::Call => Self::Call,
            Instruction::LastCall => Self::LastCall,
            Instruction::Cut => Self::Cut,
            Instruction::NoGoal => Self::NoGoal,
        }
    }

    /// The variable slot this step reads or binds, if any.
    pub fn slot(&self) -> Option<VarSlot> {
        match *self {
            Self::FirstTemp(slot) | Self::NextTemp(slot) => Some(slot),
            Self::FirstVar(slot) | Self::NextVar(slot) => Some(slot),
            _ => None,
        }
    }

    /// Whether this step is a variable's first occurrence, which seeds
    /// rather than joins the abstract domain bit for that slot.
    pub fn is_first_occurrence(&self) -> bool {
        matches!(self, Self::FirstTemp(_) | Self::FirstVar(_))
    }
}

#[cfg(test)]
#[path = "vamai_tests.rs"]
mod vamai_tests;
