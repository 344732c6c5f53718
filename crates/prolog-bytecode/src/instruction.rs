//! The VAM2P instruction set: one tagged variant per instruction, with
//! byte encode/decode to the code area's linear buffer.
//!
//! Opcodes are powers of two. Two distinct powers of two never sum to a
//! value any other pair of opcodes (distinct or repeated) can also reach,
//! because the binary representation of `2^i + 2^j` (i != j) has exactly
//! the two bits `i` and `j` set, and `2^i + 2^i = 2^(i+1)` has exactly one
//! bit set at a position no two-bit sum ever lands on. The set is
//! therefore Golomb-ruler-valid for pairwise-sum dispatch without having
//! to search for one: the resolver's `hop + gop` lookup (spec's main
//! dispatch table) never sees a collision.

use prolog_core::FunctorId;

use crate::error::BytecodeError;

/// A compiled slot index for a variable within one clause's environment
/// frame. Assigned by the instruction generator, not the interner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VarSlot(u32);

impl VarSlot {
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

macro_rules! opcodes {
    ($($variant:ident = $bit:expr),* $(,)?) => {
        /// The short opcode carried by an [`Instruction`], independent of
        /// its operands. Each value is `1 << bit` for a unique `bit`.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u16)]
        pub enum Opcode {
            $($variant = 1u16 << $bit),*
        }

        impl Opcode {
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant),*];

            fn from_u16(raw: u16) -> Option<Self> {
                match raw {
                    $(x if x == Opcode::$variant as u16 => Some(Opcode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

opcodes! {
    Atom = 0,
    Int = 1,
    Real = 2,
    Struct = 3,
    Nil = 4,
    List = 5,
    Void = 6,
    FirstTemp = 7,
    NextTemp = 8,
    FirstVar = 9,
    NextVar = 10,
    Goal = 11,
    Call = 12,
    LastCall = 13,
    Cut = 14,
    NoGoal = 15,
}

impl Opcode {
    #[inline]
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// One VAM2P instruction together with its operands.
#[derive(Clone, PartialEq, Debug)]
pub enum Instruction {
    /// An atom (zero-arity functor) in non-top position: `const(name)`.
    Atom(FunctorId),
    /// An integer literal in non-top position: `const(intval)`.
    Int(i64),
    /// A real literal; not named in the source table but required by the
    /// term model's `Real` leaf — encoded alongside `Int` under the same
    /// non-top "literal" rule.
    Real(f64),
    /// A compound functor in non-top position.
    Struct(FunctorId),
    /// The empty list.
    Nil,
    /// A cons cell; recurse into head and tail.
    List,
    /// An anonymous variable; always succeeds, never binds.
    Void,
    /// First occurrence of a temporary variable.
    FirstTemp(VarSlot),
    /// Subsequent occurrence of a temporary variable.
    NextTemp(VarSlot),
    /// First occurrence of a non-temporary (permanent) variable.
    FirstVar(VarSlot),
    /// Subsequent occurrence of a non-temporary variable.
    NextVar(VarSlot),
    /// Top-level body functor, entering: call out to `name`, resuming
    /// execution after `continuation` once it succeeds.
    Goal { name: FunctorId, continuation: u32 },
    /// Top-level body functor, leaving, not the last goal.
    Call,
    /// Top-level body functor, leaving, the last goal (enables
    /// last-call tail position, no frame growth).
    LastCall,
    /// Discard choice points back to the enclosing clause's cut barrier.
    Cut,
    /// Clause with an empty body, emitted once at the tail.
    NoGoal,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Atom(_) => Opcode::Atom,
            Instruction::Int(_) => Opcode::Int,
            Instruction::Real(_) => Opcode::Real,
            Instruction::Struct(_) => Opcode::Struct,
            Instruction::Nil => Opcode::Nil,
            Instruction::List => Opcode::List,
            Instruction::Void => Opcode::Void,
            Instruction::FirstTemp(_) => Opcode::FirstTemp,
            Instruction::NextTemp(_) => Opcode::NextTemp,
            Instruction::FirstVar(_) => Opcode::FirstVar,
            Instruction::NextVar(_) => Opcode::NextVar,
            Instruction::Goal { .. } => Opcode::Goal,
            Instruction::Call => Opcode::Call,
            Instruction::LastCall => Opcode::LastCall,
            Instruction::Cut => Opcode::Cut,
            Instruction::NoGoal => Opcode::NoGoal,
        }
    }

    /// Encoded length in bytes, without actually encoding — every operand
    /// has a fixed width for its opcode, so this is known before a final
    /// operand value (e.g. a `Goal`'s continuation offset) is settled.
    pub fn byte_len(&self) -> usize {
        2 + match self {
            Instruction::Atom(_) | Instruction::Struct(_) => 4,
            Instruction::Int(_) | Instruction::Real(_) => 8,
            Instruction::FirstTemp(_)
            | Instruction::NextTemp(_)
            | Instruction::FirstVar(_)
            | Instruction::NextVar(_) => 4,
            Instruction::Goal { .. } => 8,
            Instruction::Nil
            | Instruction::List
            | Instruction::Void
            | Instruction::Call
            | Instruction::LastCall
            | Instruction::Cut
            | Instruction::NoGoal => 0,
        }
    }

    /// Append the big-endian opcode and operand bytes to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.opcode().as_u16().to_be_bytes());
        match *self {
            Instruction::Atom(id) | Instruction::Struct(id) => {
                buf.extend_from_slice(&id.as_u32().to_be_bytes());
            }
            Instruction::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Instruction::Real(v) => buf.extend_from_slice(&v.to_bits().to_be_bytes()),
            Instruction::FirstTemp(slot)
            | Instruction::NextTemp(slot)
            | Instruction::FirstVar(slot)
            | Instruction::NextVar(slot) => {
                buf.extend_from_slice(&slot.as_u32().to_be_bytes());
            }
            Instruction::Goal { name, continuation } => {
                buf.extend_from_slice(&name.as_u32().to_be_bytes());
                buf.extend_from_slice(&continuation.to_be_bytes());
            }
            Instruction::Nil
            | Instruction::List
            | Instruction::Void
            | Instruction::Call
            | Instruction::LastCall
            | Instruction::Cut
            | Instruction::NoGoal => {}
        }
    }

    /// Decode one instruction starting at `bytes[0]`, returning it and the
    /// number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> Result<(Instruction, usize), BytecodeError> {
        let raw_op = read_u16(bytes, 0)?;
        let opcode = Opcode::from_u16(raw_op).ok_or(BytecodeError::UnknownOpcode(raw_op))?;
        let body = &bytes[2..];
        let (instruction, operand_len) = match opcode {
            Opcode::Atom => (Instruction::Atom(FunctorId::from_raw(read_u32(body, 0)?)), 4),
            Opcode::Struct => (
                Instruction::Struct(FunctorId::from_raw(read_u32(body, 0)?)),
                4,
            ),
            Opcode::Int => (Instruction::Int(read_i64(body, 0)?), 8),
            Opcode::Real => (Instruction::Real(f64::from_bits(read_u64(body, 0)?)), 8),
            Opcode::Nil => (Instruction::Nil, 0),
            Opcode::List => (Instruction::List, 0),
            Opcode::Void => (Instruction::Void, 0),
            Opcode::FirstTemp => (Instruction::FirstTemp(VarSlot::new(read_u32(body, 0)?)), 4),
            Opcode::NextTemp => (Instruction::NextTemp(VarSlot::new(read_u32(body, 0)?)), 4),
            Opcode::FirstVar => (Instruction::FirstVar(VarSlot::new(read_u32(body, 0)?)), 4),
            Opcode::NextVar => (Instruction::NextVar(VarSlot::new(read_u32(body, 0)?)), 4),
            Opcode::Goal => {
                let name = FunctorId::from_raw(read_u32(body, 0)?);
                let continuation = read_u32(body, 4)?;
                (Instruction::Goal { name, continuation }, 8)
            }
            Opcode::Call => (Instruction::Call, 0),
            Opcode::LastCall => (Instruction::LastCall, 0),
            Opcode::Cut => (Instruction::Cut, 0),
            Opcode::NoGoal => (Instruction::NoGoal, 0),
        };
        Ok((instruction, 2 + operand_len))
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, BytecodeError> {
    let slice = bytes
        .get(offset..offset + 2)
        .ok_or(BytecodeError::Truncated)?;
    Ok(u16::from_be_bytes(slice.try_into().unwrap()))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, BytecodeError> {
    let slice = bytes
        .get(offset..offset + 4)
        .ok_or(BytecodeError::Truncated)?;
    Ok(u32::from_be_bytes(slice.try_into().unwrap()))
}

fn read_u64(bytes: &[u8], offset: usize) -> Result<u64, BytecodeError> {
    let slice = bytes
        .get(offset..offset + 8)
        .ok_or(BytecodeError::Truncated)?;
    Ok(u64::from_be_bytes(slice.try_into().unwrap()))
}

fn read_i64(bytes: &[u8], offset: usize) -> Result<i64, BytecodeError> {
    read_u64(bytes, offset).map(|v| v as i64)
}

#[cfg(test)]
#[path = "instruction_tests.rs"]
mod instruction_tests;
