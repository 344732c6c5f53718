//! Runtime error kinds, per the error-handling table: most resolution
//! outcomes are ordinary search failure, not an error at all — these
//! variants are reserved for the cases the table calls out explicitly.

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("type error: {0}")]
    TypeError(String),
    #[error("instantiation error: unbound variable where a value was required")]
    InstantiationError,
    #[error("step limit ({0}) exceeded")]
    MaxStepsExceeded(u32),
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
    #[error(transparent)]
    Bytecode(#[from] prolog_bytecode::BytecodeError),
    #[error(transparent)]
    Intern(#[from] prolog_core::InternError),
}
