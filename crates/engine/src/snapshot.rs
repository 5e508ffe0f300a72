//! Read-only observer snapshot.
//!
//! Observers and renderers pull state from the engine after a tick; the
//! engine never pushes into a presentation layer and has zero awareness
//! of whether it is observed. A snapshot is a plain serializable value,
//! detached from the live chip.

use serde::Serialize;

use crate::core::units::decoder::DecodeState;
use crate::core::units::fetcher::FetchState;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// A point-in-time view of one chip's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct ChipSnapshot {
    /// Cycles elapsed when the snapshot was taken.
    pub cycle: u64,
    /// Current program counter.
    pub pc: usize,
    /// Fetch unit state tag.
    pub fetch_state: FetchState,
    /// Decode slot state (with the held instruction, if any).
    pub decode_state: DecodeState,
    /// Contents of the fetch-side instruction buffer, front to back.
    pub fetch_buffer: Vec<Instruction>,
    /// Register file cells.
    pub registers: Vec<u8>,
    /// Data memory cells.
    pub memory: Vec<u8>,
    /// Register file readiness flag.
    pub registers_ready: bool,
    /// Data memory readiness flag.
    pub memory_ready: bool,
    /// Instruction memory readiness flag.
    pub instruction_memory_ready: bool,
    /// Throughput statistics at snapshot time.
    pub stats: SimStats,
}
