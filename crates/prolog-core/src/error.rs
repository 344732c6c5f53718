//! Error types shared by the interner and term model.

/// Errors from interning or resolving names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("cannot intern an empty name")]
    InvalidName,
    #[error("id was not produced by this interner")]
    UnknownId,
}
