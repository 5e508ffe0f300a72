//! Arithmetic Logic Unit.
//!
//! Executes arithmetic-class instructions (add, sub, mul, bitwise and/or)
//! against the register file, wrapping every result into the byte cell
//! range, and evaluates branch-class predicates (equal, less-than),
//! returning the boolean to the caller instead of writing a register.
//!
//! The unit is busy only for the duration of a `compute` call: it is a
//! single logical step from the engine's perspective, and any real latency
//! comes from the register accesses going through the timed-access
//! protocol.

use crate::common::error::{ConfigError, SimError};
use crate::isa::{Instruction, Opcode, Operands};
use crate::mem::cells::{AccessSource, DataCellArray};

/// The execute unit: stateless compute logic plus a transient busy flag.
#[derive(Debug, Default)]
pub struct Alu {
    busy: bool,
}

impl Alu {
    /// Creates an idle ALU.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no instruction is currently in flight.
    pub fn is_ready(&self) -> bool {
        !self.busy
    }

    /// Executes one instruction against the register file.
    ///
    /// Arithmetic-class: applies the opcode's binary function to the two
    /// operand values, wraps the result into `[0, 256)`, writes the
    /// destination register, and returns `None`. Branch-class: evaluates
    /// the comparison predicate and returns `Some(taken)` without writing
    /// anything; the boolean feeds branch resolution in the decoder.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidOpcode`] for any opcode outside the
    /// arithmetic/branch sets (fatal); register bounds/readiness errors
    /// propagate from the cell array.
    pub fn compute(
        &mut self,
        inst: &Instruction,
        regs: &mut DataCellArray,
    ) -> Result<Option<bool>, SimError> {
        self.busy = true;
        let result = Self::compute_inner(inst, regs);
        // Freed immediately: compute is one logical step.
        self.busy = false;
        result
    }

    fn compute_inner(
        inst: &Instruction,
        regs: &mut DataCellArray,
    ) -> Result<Option<bool>, SimError> {
        match (inst.opcode(), inst.operands()) {
            (
                Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or,
                Operands::Binary { src1, src2, dest },
            ) => {
                // One granted access covers the whole operand set.
                let mut window = regs.access()?;
                let a = i64::from(window.get(src1)?);
                let b = i64::from(window.get(src2)?);
                let raw = match inst.opcode() {
                    Opcode::Add => a + b,
                    Opcode::Sub => a - b,
                    Opcode::Mul => a * b,
                    Opcode::And => a & b,
                    Opcode::Or => a | b,
                    _ => unreachable!("guarded by the outer match"),
                };
                // The cell array wraps the raw result into [0, 256).
                window.set(dest, raw, AccessSource::Alu)?;
                Ok(None)
            }
            (
                Opcode::BranchEq | Opcode::BranchLt,
                Operands::Compare { src1, src2, .. },
            ) => {
                let window = regs.access()?;
                let a = window.get(src1)?;
                let b = window.get(src2)?;
                let taken = match inst.opcode() {
                    Opcode::BranchEq => a == b,
                    Opcode::BranchLt => a < b,
                    _ => unreachable!("guarded by the outer match"),
                };
                Ok(Some(taken))
            }
            _ => Err(ConfigError::InvalidOpcode(inst.opcode()).into()),
        }
    }
}
