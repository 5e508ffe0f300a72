//! Decode/dispatch unit.
//!
//! The decoder holds at most one instruction and drives it through an
//! explicit tagged state machine:
//!
//! `Empty` → `Held` → `Dispatched` → `Empty`, with the branch sub-path
//! `Held` → `AwaitingPredicate` → `Empty`.
//!
//! The pipelining policy lives here: in pipelined mode the decoder
//! triggers the fetch of instruction N+1 while instruction N is still
//! held (unless N is a branch); in non-pipelined mode it only triggers a
//! fetch once both execution units are ready again.
//!
//! The decoder is a pipeline sink — its output is undefined by design and
//! reading it always fails.

use serde::Serialize;
use tracing::trace;

use crate::common::error::{ConfigError, ProtocolError, SimError};
use crate::core::units::fetcher::Fetcher;
use crate::isa::Instruction;
use crate::mem::imem::InstructionMemory;

/// Capability interface for retirement notifications.
///
/// Passed to the decoder by the owning chip; the decoder signals exactly
/// one call per retired instruction (arithmetic, memory, or resolved
/// branch) for throughput accounting. The engine has no awareness of what
/// the sink does with the notification.
pub trait RetirementSink {
    /// Called once when `inst`'s effects are committed and it leaves
    /// pipeline state.
    fn retire(&mut self, inst: &Instruction);
}

/// Decode slot state, carrying the held instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeState {
    /// No instruction held.
    Empty,
    /// An instruction is held, awaiting dispatch.
    Held(Instruction),
    /// The held instruction has been handed to an execution unit.
    Dispatched(Instruction),
    /// A branch has its predicate evaluated and awaits resolution.
    AwaitingPredicate(Instruction),
}

/// The decode/dispatch unit.
#[derive(Debug)]
pub struct Decoder {
    clock_hz: u64,
    pipelined: bool,
    state: DecodeState,
}

impl Decoder {
    /// Creates an empty decoder with the given clock rate and pipelining
    /// policy.
    pub fn new(clock_hz: u64, pipelined: bool) -> Self {
        Self {
            clock_hz,
            pipelined,
            state: DecodeState::Empty,
        }
    }

    /// The decoder's clock rate.
    pub fn clock_hz(&self) -> u64 {
        self.clock_hz
    }

    /// Whether the overlapping fetch policy is enabled.
    pub fn is_pipelined(&self) -> bool {
        self.pipelined
    }

    /// The slot's current state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Whether the slot currently holds no instruction.
    pub fn is_empty(&self) -> bool {
        self.state == DecodeState::Empty
    }

    pub(crate) fn hold(&mut self, inst: Instruction) {
        debug_assert!(self.is_empty(), "decode slot overwritten while occupied");
        self.state = DecodeState::Held(inst);
    }

    pub(crate) fn mark_dispatched(&mut self, inst: Instruction) {
        self.state = DecodeState::Dispatched(inst);
    }

    pub(crate) fn mark_awaiting_predicate(&mut self, inst: Instruction) {
        self.state = DecodeState::AwaitingPredicate(inst);
    }

    /// Retires the instruction occupying the slot and empties it.
    pub(crate) fn retire(&mut self, inst: &Instruction, sink: &mut dyn RetirementSink) {
        trace!(opcode = ?inst.opcode(), "instruction retired");
        sink.retire(inst);
        self.state = DecodeState::Empty;
    }

    /// Resolves the branch awaiting its predicate.
    ///
    /// Taken: sets the fetcher's PC to the branch target and discards any
    /// in-flight speculative fetch. Not taken: notifies instruction memory
    /// that the branch was skipped, leaving the PC unchanged. Exactly one
    /// of the two paths executes per resolved branch; either path retires
    /// the instruction and returns the slot to `Empty`.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::BranchNotPending`] if no branch is awaiting
    /// resolution; a branch without a target is a construction defect
    /// surfaced as [`ConfigError::InvalidOpcode`].
    pub fn take_branch(
        &mut self,
        taken: bool,
        fetcher: &mut Fetcher,
        imem: &mut InstructionMemory,
        sink: &mut dyn RetirementSink,
    ) -> Result<(), SimError> {
        let DecodeState::AwaitingPredicate(inst) = self.state else {
            return Err(ProtocolError::BranchNotPending.into());
        };
        if taken {
            let target = inst
                .branch_target()
                .ok_or(ConfigError::InvalidOpcode(inst.opcode()))?;
            trace!(target, "branch taken");
            fetcher.redirect(target, imem);
        } else {
            trace!("branch not taken");
            fetcher.notify_branch_skipped(imem);
        }
        self.retire(&inst, sink);
        Ok(())
    }

    /// Reads from the decoder's output.
    ///
    /// The decoder is a pipeline sink: this is undefined by design and
    /// always fails.
    ///
    /// # Errors
    ///
    /// Always [`ProtocolError::DecoderIsSink`].
    pub fn read_output(&self) -> Result<Instruction, SimError> {
        Err(ProtocolError::DecoderIsSink.into())
    }
}
