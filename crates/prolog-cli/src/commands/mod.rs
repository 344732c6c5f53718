pub mod consult;
pub mod dump;
pub mod query;
pub mod repl;
