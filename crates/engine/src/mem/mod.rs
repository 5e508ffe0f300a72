//! Latency-modeled storage components.
//!
//! All three storage kinds share the timed-access protocol from
//! [`crate::common::timing`]:
//! 1. **Cell arrays:** Byte-cell banks serving as register files and data
//!    memory.
//! 2. **Instruction memory:** The addressed, pre-loaded instruction store
//!    the fetch unit reads from.
//! 3. **Instruction buffers:** Bounded instruction holding slots between
//!    pipeline stages.

/// Timed instruction holding slot between stages.
pub mod buffer;

/// Byte-cell array (register file / data memory bank).
pub mod cells;

/// Addressed instruction store.
pub mod imem;

pub use buffer::InstructionBuffer;
pub use cells::{AccessSource, AccessWindow, DataCellArray, CELL_RANGE};
pub use imem::InstructionMemory;
