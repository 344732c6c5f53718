//! Instruction emission: turns an annotated clause into a VAM2P
//! instruction sequence the code area can append.

mod generator;

pub use generator::{clause_var_slots, generate};
