//! Instruction set model (opcodes, classes, instruction values).

/// Instruction value type and constructors.
pub mod instruction;

pub use instruction::{InstrClass, Instruction, Opcode, Operands};
