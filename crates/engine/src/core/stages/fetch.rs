//! Instruction fetch stage.
//!
//! Runs one cycle of fetch orchestration: re-polls or issues the timed
//! request to instruction memory and moves a ready instruction into the
//! fetch-side buffer. All the state lives in the fetch unit; this stage
//! only wires it to the chip's instruction memory.

use crate::common::error::SimError;
use crate::core::Chip;

/// Executes the fetch stage for one cycle.
///
/// # Errors
///
/// Propagates bounds and protocol errors from the memory layer.
pub fn fetch_stage(chip: &mut Chip) -> Result<(), SimError> {
    chip.fetcher.fetch_instruction(&mut chip.imem)
}
