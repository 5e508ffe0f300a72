//! Byte-cell array: register file or data memory bank.
//!
//! A fixed array of `words × word_width` cells, each holding a value in
//! `[0, 256)`. All mutation goes through the bounds-checked, readiness-
//! checked access contract — single reads and writes, or one granted
//! [`AccessWindow`] covering an instruction's whole operand set against
//! the array. Observers get a read-only view of the cells that bypasses
//! the protocol entirely.

use serde::Serialize;

use crate::common::error::{ConfigError, SimError};
use crate::common::timing::{AccessTimer, DelayMode};

/// Exclusive upper bound of a cell value.
pub const CELL_RANGE: i64 = 256;

/// Advisory tag identifying which unit performed a write.
///
/// Metadata for observers only; it has no behavioral effect in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessSource {
    /// Written by the ALU (arithmetic result).
    Alu,
    /// Written by the memory-operation unit (load/store traffic).
    Io,
    /// Written by an external collaborator (preload, test harness).
    External,
}

/// Fixed-size array of byte-range cells behind the timed-access protocol.
#[derive(Debug, Clone)]
pub struct DataCellArray {
    cells: Vec<u8>,
    timer: AccessTimer,
    clock_hz: u64,
    last_write: Option<(usize, AccessSource)>,
}

impl DataCellArray {
    /// Creates an array of `words × word_width` zeroed cells running at
    /// `clock_hz` in the given delay mode.
    pub fn new(words: usize, word_width: usize, mode: DelayMode, clock_hz: u64) -> Self {
        Self {
            cells: vec![0; words * word_width],
            timer: AccessTimer::new(mode),
            clock_hz,
            last_write: None,
        }
    }

    /// Number of addressable cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the array has zero cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
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
    /// Propagates [`crate::common::error::ProtocolError::RequestOnImmediate`]
    /// for a no-delay array.
    pub fn request_access(&mut self, requester_hz: u64) -> Result<(), SimError> {
        self.timer.request(requester_hz, self.clock_hz)?;
        Ok(())
    }

    /// Advances the array's timer by one of its own ticks.
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    fn check_bounds(&self, addr: usize) -> Result<(), ConfigError> {
        if addr < self.cells.len() {
            Ok(())
        } else {
            Err(ConfigError::AddressOutOfBounds {
                addr,
                len: self.cells.len(),
            })
        }
    }

    /// Reads the cell at `addr`, consuming readiness.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AddressOutOfBounds`] for an invalid address (fatal);
    /// [`crate::common::error::ProtocolError::NotReady`] when a delayed
    /// array's latency has not elapsed.
    pub fn read(&mut self, addr: usize) -> Result<u8, SimError> {
        self.check_bounds(addr)?;
        self.timer.consume()?;
        Ok(self.cells[addr])
    }

    /// Writes `value mod 256` to the cell at `addr`, consuming readiness.
    ///
    /// The stored value is always non-negative: negative inputs wrap up
    /// into `[0, 256)`. `source` is recorded for observers only.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::read`].
    pub fn write(&mut self, addr: usize, value: i64, source: AccessSource) -> Result<(), SimError> {
        self.check_bounds(addr)?;
        self.timer.consume()?;
        self.cells[addr] = value.rem_euclid(CELL_RANGE) as u8;
        self.last_write = Some((addr, source));
        Ok(())
    }

    /// Opens one granted access window, consuming readiness.
    ///
    /// A window covers an instruction's whole operand set against this
    /// array: the grant is consumed once, and every cell touched through
    /// the window shares it. Per-cell bounds checks still apply.
    ///
    /// # Errors
    ///
    /// [`crate::common::error::ProtocolError::NotReady`] when a delayed
    /// array's latency has not elapsed.
    pub fn access(&mut self) -> Result<AccessWindow<'_>, SimError> {
        self.timer.consume()?;
        Ok(AccessWindow { array: self })
    }

    /// Read-only observer view of every cell. Bypasses the protocol.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The most recent write's address and advisory source tag.
    pub fn last_write(&self) -> Option<(usize, AccessSource)> {
        self.last_write
    }
}

/// One granted access over a cell array.
///
/// Obtained through [`DataCellArray::access`]; every cell touched through
/// the window shares the single consumed grant.
#[derive(Debug)]
pub struct AccessWindow<'a> {
    array: &'a mut DataCellArray,
}

impl AccessWindow<'_> {
    /// Reads the cell at `addr`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AddressOutOfBounds`] for an invalid address.
    pub fn get(&self, addr: usize) -> Result<u8, SimError> {
        self.array.check_bounds(addr)?;
        Ok(self.array.cells[addr])
    }

    /// Writes `value mod 256` to the cell at `addr`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::AddressOutOfBounds`] for an invalid address.
    pub fn set(&mut self, addr: usize, value: i64, source: AccessSource) -> Result<(), SimError> {
        self.array.check_bounds(addr)?;
        self.array.cells[addr] = value.rem_euclid(CELL_RANGE) as u8;
        self.array.last_write = Some((addr, source));
        Ok(())
    }
}
