//! Load/store ("IO") unit.
//!
//! Executes memory-class instructions by moving values between the
//! register file and the data memory bank. Like the ALU, the unit is busy
//! only for the duration of a call; real latency comes from the cell-array
//! accesses going through the timed-access protocol.

use crate::common::error::{ConfigError, SimError};
use crate::isa::{Instruction, Opcode, Operands};
use crate::mem::cells::{AccessSource, DataCellArray};

/// The memory-operation unit.
#[derive(Debug, Default)]
pub struct Lsu {
    busy: bool,
}

impl Lsu {
    /// Creates an idle unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no instruction is currently in flight.
    pub fn is_ready(&self) -> bool {
        !self.busy
    }

    /// Executes one memory-class instruction.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidOpcode`] for a non-memory opcode; bounds and
    /// readiness errors propagate from the cell arrays.
    pub fn process_io(
        &mut self,
        inst: &Instruction,
        regs: &mut DataCellArray,
        mem: &mut DataCellArray,
    ) -> Result<(), SimError> {
        self.busy = true;
        let result = Self::process_inner(inst, regs, mem);
        self.busy = false;
        result
    }

    fn process_inner(
        inst: &Instruction,
        regs: &mut DataCellArray,
        mem: &mut DataCellArray,
    ) -> Result<(), SimError> {
        match (inst.opcode(), inst.operands()) {
            (Opcode::Load, Operands::Transfer { reg, addr }) => {
                let value = mem.access()?.get(addr)?;
                regs.access()?.set(reg, i64::from(value), AccessSource::Io)
            }
            (Opcode::Store, Operands::Transfer { reg, addr }) => {
                let value = regs.access()?.get(reg)?;
                mem.access()?.set(addr, i64::from(value), AccessSource::Io)
            }
            _ => Err(ConfigError::InvalidOpcode(inst.opcode()).into()),
        }
    }
}
