//! Instruction values.
//!
//! This module defines the immutable instruction value that flows through
//! the pipeline. It provides:
//! 1. **Opcodes:** The fixed enumerated operation set.
//! 2. **Classes:** The derived tag (arithmetic, memory, branch) that
//!    dispatch decisions are made on.
//! 3. **Operands:** A tagged payload so an instruction's operand shape
//!    always matches its class by construction.
//!
//! Instructions are created by an external instruction source, flow from
//! the fetch buffer into the decode slot, and are consumed on dispatch.

use serde::{Deserialize, Serialize};

/// The fixed operation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Integer addition, wrapped into the cell range.
    Add,
    /// Integer subtraction, wrapped into the cell range.
    Sub,
    /// Integer multiplication, wrapped into the cell range.
    Mul,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Load a memory cell into a register.
    Load,
    /// Store a register into a memory cell.
    Store,
    /// Branch if the two operands are equal.
    BranchEq,
    /// Branch if the first operand is less than the second.
    BranchLt,
}

impl Opcode {
    /// The class tag derived from the opcode.
    pub fn class(self) -> InstrClass {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::And | Self::Or => InstrClass::Arithmetic,
            Self::Load | Self::Store => InstrClass::Memory,
            Self::BranchEq | Self::BranchLt => InstrClass::Branch,
        }
    }
}

/// Instruction class, used for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrClass {
    /// Executed by the ALU, writes a register.
    Arithmetic,
    /// Executed by the memory-operation unit.
    Memory,
    /// Evaluated by the ALU for a predicate; resolved by the decoder.
    Branch,
}

/// Operand payload, shaped per instruction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operands {
    /// Two source registers and a destination register (arithmetic).
    Binary {
        /// First operand register.
        src1: usize,
        /// Second operand register.
        src2: usize,
        /// Result register.
        dest: usize,
    },
    /// Two source registers and a branch target address (branch).
    Compare {
        /// First operand register.
        src1: usize,
        /// Second operand register.
        src2: usize,
        /// Instruction address taken when the predicate holds.
        target: usize,
    },
    /// One register and one memory cell address (load/store).
    Transfer {
        /// Destination register for a load; source register for a store.
        reg: usize,
        /// Memory cell address.
        addr: usize,
    },
}

/// An immutable instruction value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    opcode: Opcode,
    operands: Operands,
}

impl Instruction {
    /// Creates an arithmetic instruction `dest := src1 <op> src2`.
    ///
    /// `opcode` must be arithmetic-class; class/operand mismatches are
    /// construction defects.
    pub fn alu(opcode: Opcode, src1: usize, src2: usize, dest: usize) -> Self {
        debug_assert_eq!(opcode.class(), InstrClass::Arithmetic);
        Self {
            opcode,
            operands: Operands::Binary { src1, src2, dest },
        }
    }

    /// Creates a load instruction `reg := memory[addr]`.
    pub fn load(reg: usize, addr: usize) -> Self {
        Self {
            opcode: Opcode::Load,
            operands: Operands::Transfer { reg, addr },
        }
    }

    /// Creates a store instruction `memory[addr] := reg`.
    pub fn store(reg: usize, addr: usize) -> Self {
        Self {
            opcode: Opcode::Store,
            operands: Operands::Transfer { reg, addr },
        }
    }

    /// Creates a branch instruction comparing `src1` and `src2`, jumping to
    /// `target` when the predicate holds.
    ///
    /// `opcode` must be branch-class.
    pub fn branch(opcode: Opcode, src1: usize, src2: usize, target: usize) -> Self {
        debug_assert_eq!(opcode.class(), InstrClass::Branch);
        Self {
            opcode,
            operands: Operands::Compare { src1, src2, target },
        }
    }

    /// The instruction's opcode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The instruction's class tag.
    pub fn class(&self) -> InstrClass {
        self.opcode.class()
    }

    /// The operand payload.
    pub fn operands(&self) -> Operands {
        self.operands
    }

    /// The branch target address, if this is a branch.
    pub fn branch_target(&self) -> Option<usize> {
        match self.operands {
            Operands::Compare { target, .. } => Some(target),
            _ => None,
        }
    }
}
