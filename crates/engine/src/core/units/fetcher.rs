//! Instruction fetch unit.
//!
//! Owns the program counter and the fetch-side instruction buffer, and
//! orchestrates reads from instruction memory through the timed-access
//! protocol. The unit is an explicit state machine:
//!
//! `Empty` (idle) → `AwaitingMemory` (request outstanding) → `Filled`
//! (fetched instruction sitting in the output buffer) → `Empty`.
//!
//! A fetch makes no progress on a cycle where instruction memory is not
//! ready; the request is simply re-polled on a later tick.

use serde::Serialize;
use tracing::trace;

use crate::common::error::SimError;
use crate::isa::Instruction;
use crate::mem::buffer::InstructionBuffer;
use crate::mem::imem::InstructionMemory;

/// Fetch unit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchState {
    /// Idle: nothing requested, output buffer empty.
    Empty,
    /// A timed request to instruction memory (or the output buffer) is
    /// outstanding.
    AwaitingMemory,
    /// A fetched instruction is available in the output buffer.
    Filled,
}

/// Program counter plus fetch orchestration.
#[derive(Debug)]
pub struct Fetcher {
    pc: usize,
    clock_hz: u64,
    state: FetchState,
    /// Set by the decoder's fetch policy; cleared once a fetch completes.
    pending_request: bool,
    /// Instruction read from memory but not yet placed in a delayed
    /// output buffer.
    staged: Option<Instruction>,
    /// The program ran off the end of instruction memory.
    halted: bool,
    /// Fetch-side output buffer, read by the decoder.
    pub buffer: InstructionBuffer,
}

impl Fetcher {
    /// Creates an idle fetcher with PC 0 and the given output buffer.
    pub fn new(clock_hz: u64, buffer: InstructionBuffer) -> Self {
        Self {
            pc: 0,
            clock_hz,
            state: FetchState::Empty,
            pending_request: false,
            staged: None,
            halted: false,
            buffer,
        }
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Overrides the program counter (used on a taken branch).
    ///
    /// An invalid address is reported by the memory layer at the next
    /// fetch, not here.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
        self.halted = false;
    }

    /// The unit's current state.
    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Whether the program has run off the end of instruction memory.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Marks that the decoder wants the next instruction fetched.
    pub fn request_fetch(&mut self) {
        if !self.halted {
            self.pending_request = true;
        }
    }

    /// Whether a fetch has been requested but not yet completed.
    pub fn has_pending_request(&self) -> bool {
        self.pending_request
    }

    /// Runs one cycle of fetch orchestration.
    ///
    /// Issues or re-polls the timed request to instruction memory; once
    /// memory is ready, retrieves the instruction at the current PC,
    /// places it into the output buffer, and advances the PC by exactly
    /// one.
    ///
    /// # Errors
    ///
    /// Bounds errors from the memory layer (invalid PC) and protocol
    /// errors propagate.
    pub fn fetch_instruction(&mut self, imem: &mut InstructionMemory) -> Result<(), SimError> {
        // A previously fetched instruction may still be waiting on a
        // delayed output buffer.
        if let Some(inst) = self.staged {
            if self.buffer.is_ready() {
                self.buffer.write(inst)?;
                self.staged = None;
                self.state = FetchState::Filled;
                trace!(pc = self.pc, "staged instruction entered fetch buffer");
            } else if !self.buffer.in_flight() {
                self.buffer.request_access(self.clock_hz)?;
            }
            return Ok(());
        }

        if !self.pending_request {
            return Ok(());
        }

        if !imem.is_ready() {
            if !imem.in_flight() {
                imem.request(self.pc, self.clock_hz)?;
                trace!(pc = self.pc, "fetch request issued to instruction memory");
            }
            self.state = FetchState::AwaitingMemory;
            return Ok(());
        }

        let Some(inst) = imem.fetch(self.pc)? else {
            trace!(pc = self.pc, "no instruction at PC; fetch unit halted");
            self.halted = true;
            self.pending_request = false;
            self.state = FetchState::Empty;
            return Ok(());
        };

        trace!(pc = self.pc, opcode = ?inst.opcode(), "instruction fetched");
        self.pending_request = false;
        self.pc += 1;

        if self.buffer.is_ready() {
            self.buffer.write(inst)?;
            self.state = FetchState::Filled;
        } else {
            self.staged = Some(inst);
            if !self.buffer.in_flight() {
                self.buffer.request_access(self.clock_hz)?;
            }
            self.state = FetchState::AwaitingMemory;
        }
        Ok(())
    }

    /// Pulls one fetched instruction on behalf of the decoder running at
    /// `requester_hz`, honoring the output buffer's timed protocol.
    ///
    /// Returns `Ok(None)` when nothing is available yet — either the
    /// buffer is empty or its latency has not elapsed (in which case a
    /// request is issued and the caller re-polls next tick).
    ///
    /// # Errors
    ///
    /// Protocol errors propagate from the buffer.
    pub fn pull(&mut self, requester_hz: u64) -> Result<Option<Instruction>, SimError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }
        if !self.buffer.is_ready() {
            if !self.buffer.in_flight() {
                self.buffer.request_access(requester_hz)?;
            }
            return Ok(None);
        }
        let inst = self.buffer.read()?;
        if self.buffer.is_empty() && self.staged.is_none() && self.state == FetchState::Filled {
            self.state = FetchState::Empty;
        }
        Ok(inst)
    }

    /// Redirects the fetch stream to `target` (taken branch), discarding
    /// any in-flight speculative fetch and buffered wrong-path
    /// instructions.
    pub fn redirect(&mut self, target: usize, imem: &mut InstructionMemory) {
        trace!(target, "fetch stream redirected");
        self.pc = target;
        self.pending_request = false;
        self.staged = None;
        self.halted = false;
        self.buffer.clear();
        imem.cancel_pending();
        self.state = FetchState::Empty;
    }

    /// Informs instruction memory that the instruction previously
    /// requested at `PC - 1` was a branch not taken, discarding any
    /// speculative read-ahead state for that address.
    pub fn notify_branch_skipped(&self, imem: &mut InstructionMemory) {
        imem.discard_readahead(self.pc.saturating_sub(1));
    }
}
