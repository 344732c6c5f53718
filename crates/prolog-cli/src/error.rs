//! Top-level error type composed from every layer the CLI drives:
//! compilation (parse/annotate/codegen/linkage) and resolution.

use prolog_compiler::CompileError;
use prolog_vm::RuntimeError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
