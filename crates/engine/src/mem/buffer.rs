//! Timed instruction holding slot.
//!
//! An [`InstructionBuffer`] wraps a [`BoundedQueue`] of instructions behind
//! the timed-access protocol, modeling the cross-unit latency of a
//! fetch/decode holding slot: the buffer runs at its owner's clock, and a
//! consumer on another clock pays `ceil(f_consumer / f_owner)` ticks per
//! access.

use crate::common::error::{ConfigError, SimError};
use crate::common::queue::BoundedQueue;
use crate::common::timing::{AccessTimer, DelayMode};
use crate::isa::Instruction;

/// Bounded instruction queue behind the timed-access protocol.
#[derive(Debug, Clone)]
pub struct InstructionBuffer {
    queue: BoundedQueue<Instruction>,
    timer: AccessTimer,
    clock_hz: u64,
}

impl InstructionBuffer {
    /// Creates an empty buffer of the given capacity running at `clock_hz`
    /// in the given delay mode.
    pub fn new(capacity: usize, mode: DelayMode, clock_hz: u64) -> Self {
        Self {
            queue: BoundedQueue::new(capacity),
            timer: AccessTimer::new(mode),
            clock_hz,
        }
    }

    /// The buffer's fixed capacity.
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Number of instructions currently held.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the buffer holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Whether an access would currently succeed.
    pub fn is_ready(&self) -> bool {
        self.timer.is_ready()
    }

    /// Whether an access countdown is currently running.
    pub fn in_flight(&self) -> bool {
        self.timer.in_flight()
    }

    /// Requests access on behalf of a unit running at `requester_hz`.
    ///
    /// # Errors
    ///
    /// Propagates protocol errors per the timed-access contract.
    pub fn request_access(&mut self, requester_hz: u64) -> Result<(), SimError> {
        self.timer.request(requester_hz, self.clock_hz)?;
        Ok(())
    }

    /// Advances the buffer's timer by one of its own ticks.
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    /// Appends an instruction, consuming readiness.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Overflow`] when full; protocol errors per the
    /// timed-access contract.
    pub fn write(&mut self, inst: Instruction) -> Result<(), SimError> {
        self.timer.consume()?;
        self.queue.enqueue(inst)?;
        Ok(())
    }

    /// Removes and returns the front instruction, consuming readiness.
    ///
    /// An empty buffer yields `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Protocol errors per the timed-access contract.
    pub fn read(&mut self) -> Result<Option<Instruction>, SimError> {
        self.timer.consume()?;
        Ok(self.queue.dequeue())
    }

    /// Non-destructive view of the front instruction. Bypasses the protocol.
    pub fn peek(&self) -> Option<&Instruction> {
        self.queue.peek()
    }

    /// Transfers up to `count` instructions into `dest`, preserving order,
    /// consuming readiness once for the whole transfer.
    ///
    /// A partial transfer (limited by this buffer's contents or `dest`'s
    /// remaining space) is allowed and is not an error. Returns the number
    /// of instructions moved.
    ///
    /// # Errors
    ///
    /// [`ConfigError::OversizedTransfer`] when `count` exceeds this
    /// buffer's capacity — such a request can never be satisfied and is a
    /// caller defect; protocol errors per the timed-access contract.
    pub fn transfer_to(&mut self, dest: &mut Self, count: usize) -> Result<usize, SimError> {
        if count > self.capacity() {
            return Err(ConfigError::OversizedTransfer {
                requested: count,
                capacity: self.capacity(),
            }
            .into());
        }
        self.timer.consume()?;
        Ok(self.queue.move_to(&mut dest.queue, count))
    }

    /// Removes all held instructions and discards any pending request.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.timer.cancel();
    }

    /// Iterates over the held instructions, front to back. Bypasses the
    /// protocol (observer view).
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.queue.iter()
    }
}
