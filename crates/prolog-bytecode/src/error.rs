//! Errors from decoding a byte-encoded instruction stream.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BytecodeError {
    #[error("instruction stream ended mid-instruction")]
    Truncated,
    #[error("unknown opcode {0:#06x}")]
    UnknownOpcode(u16),
    #[error("predicate {name_id}/{arity} has no compiled entry point")]
    UnknownEntry { name_id: u32, arity: u32 },
}
