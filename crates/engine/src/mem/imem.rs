//! Addressed instruction store.
//!
//! Instruction memory is pre-loaded by an external instruction source
//! before simulation starts and read by the fetch unit through the
//! timed-access protocol. It additionally tracks which address the
//! outstanding request belongs to, so the speculative read-ahead state of
//! a not-taken branch can be discarded without disturbing an unrelated
//! in-flight fetch.

use tracing::trace;

use crate::common::error::{ConfigError, SimError};
use crate::common::timing::{AccessTimer, DelayMode};
use crate::isa::Instruction;

/// Fixed-capacity instruction store behind the timed-access protocol.
#[derive(Debug, Clone)]
pub struct InstructionMemory {
    slots: Vec<Option<Instruction>>,
    timer: AccessTimer,
    clock_hz: u64,
    /// Address of the outstanding (or completed, unconsumed) request.
    pending: Option<usize>,
}

impl InstructionMemory {
    /// Creates an empty store with `capacity` addressable slots.
    pub fn new(capacity: usize, mode: DelayMode, clock_hz: u64) -> Self {
        Self {
            slots: vec![None; capacity],
            timer: AccessTimer::new(mode),
            clock_hz,
            pending: None,
        }
    }

    /// Number of addressable instruction slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store has zero slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a fetch would currently succeed.
    pub fn is_ready(&self) -> bool {
        self.timer.is_ready()
    }

    /// Whether a request countdown is currently running.
    pub fn in_flight(&self) -> bool {
        self.timer.in_flight()
    }

    fn check_bounds(&self, addr: usize) -> Result<(), ConfigError> {
        if addr < self.slots.len() {
            Ok(())
        } else {
            Err(ConfigError::AddressOutOfBounds {
                addr,
                len: self.slots.len(),
            })
        }
    }

    /// Pre-loads an instruction at `addr`. Not subject to the protocol;
    /// loading happens before simulation starts.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AddressOutOfBounds`] for an invalid address.
    pub fn load(&mut self, addr: usize, inst: Instruction) -> Result<(), SimError> {
        self.check_bounds(addr)?;
        self.slots[addr] = Some(inst);
        Ok(())
    }

    /// Requests one instruction at `addr` on behalf of a unit running at
    /// `requester_hz`.
    ///
    /// # Errors
    ///
    /// Bounds and protocol errors per the timed-access contract.
    pub fn request(&mut self, addr: usize, requester_hz: u64) -> Result<(), SimError> {
        self.check_bounds(addr)?;
        self.timer.request(requester_hz, self.clock_hz)?;
        self.pending = Some(addr);
        Ok(())
    }

    /// Advances the store's timer by one of its own ticks.
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    /// Retrieves the instruction at `addr`, consuming readiness.
    ///
    /// Returns `None` when the slot was never loaded — the program has run
    /// off its end, which is not an error.
    ///
    /// # Errors
    ///
    /// Bounds and protocol errors per the timed-access contract.
    pub fn fetch(&mut self, addr: usize) -> Result<Option<Instruction>, SimError> {
        self.check_bounds(addr)?;
        self.timer.consume()?;
        self.pending = None;
        Ok(self.slots[addr])
    }

    /// Discards speculative read-ahead state associated with `addr`.
    ///
    /// Called when the branch previously requested at `addr` was not taken.
    /// State belonging to any other address is left untouched.
    pub fn discard_readahead(&mut self, addr: usize) {
        if self.pending == Some(addr) {
            trace!(addr, "discarding speculative read-ahead");
            self.pending = None;
            self.timer.cancel();
        }
    }

    /// Discards whatever request is outstanding, if any.
    ///
    /// Called on a taken branch, when the in-flight wrong-path fetch is
    /// abandoned wholesale.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.timer.cancel();
        }
    }
}
