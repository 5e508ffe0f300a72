//! Chip core: storage, units, and the per-cycle step function.
//!
//! A [`Chip`] owns one complete single-issue pipeline: register file, data
//! and instruction memory, fetch unit, decode unit, ALU, LSU, and the
//! retirement statistics. All storage is created once at construction and
//! persists for the simulation's lifetime; ticking never allocates these
//! entities.
//!
//! The whole engine advances through uniform external [`Chip::tick`]
//! calls, one cycle at a time. Within a tick, resource timers advance
//! first (each decrements its own countdown exactly once), then the
//! stages run in fixed order: fetch, then decode (which dispatches to the
//! execution units). No call ever suspends; a stage either completes
//! synchronously or records a pending request to re-poll next cycle.

use tracing::debug;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::stages::{decode_stage, fetch_stage};
use crate::core::units::{Alu, Decoder, Fetcher, Lsu};
use crate::isa::Instruction;
use crate::mem::buffer::InstructionBuffer;
use crate::mem::cells::DataCellArray;
use crate::mem::imem::InstructionMemory;
use crate::snapshot::ChipSnapshot;
use crate::stats::SimStats;

/// Pipeline stage functions.
pub mod stages;

/// Execution units.
pub mod units;

/// One complete single-issue pipeline instance.
///
/// Chip instances are independent; they share no mutable state unless an
/// external driver composes them around explicit timed resources.
#[derive(Debug)]
pub struct Chip {
    /// Instruction fetch unit (program counter, fetch buffer).
    pub fetcher: Fetcher,
    /// Decode/dispatch unit.
    pub decoder: Decoder,
    /// Arithmetic logic unit.
    pub alu: Alu,
    /// Load/store unit.
    pub lsu: Lsu,
    /// Register file.
    pub regs: DataCellArray,
    /// Data memory bank.
    pub dmem: DataCellArray,
    /// Instruction memory.
    pub imem: InstructionMemory,
    /// Retirement and cycle statistics; the default retirement sink.
    pub stats: SimStats,
}

impl Chip {
    /// Builds a chip from a configuration.
    pub fn new(config: &Config) -> Self {
        debug!(
            pipelined = config.pipeline.pipelined,
            fetch_hz = config.clocks.fetch_hz,
            decode_hz = config.clocks.decode_hz,
            "constructing chip"
        );
        let buffer = InstructionBuffer::new(
            config.storage.fetch_buffer_capacity,
            config.storage.fetch_buffer_mode,
            config.clocks.fetch_hz,
        );
        Self {
            fetcher: Fetcher::new(config.clocks.fetch_hz, buffer),
            decoder: Decoder::new(config.clocks.decode_hz, config.pipeline.pipelined),
            alu: Alu::new(),
            lsu: Lsu::new(),
            regs: DataCellArray::new(
                config.storage.register_words,
                config.storage.register_word_width,
                config.storage.register_mode,
                config.clocks.register_hz,
            ),
            dmem: DataCellArray::new(
                config.storage.data_words,
                config.storage.data_word_width,
                config.storage.data_memory_mode,
                config.clocks.data_memory_hz,
            ),
            imem: InstructionMemory::new(
                config.storage.instruction_capacity,
                config.storage.instruction_memory_mode,
                config.clocks.instruction_memory_hz,
            ),
            stats: SimStats::new(),
        }
    }

    /// Pre-loads a program into instruction memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Bounds errors when the program exceeds instruction memory.
    pub fn load_program(&mut self, program: &[Instruction]) -> Result<(), SimError> {
        for (addr, inst) in program.iter().enumerate() {
            self.imem.load(addr, *inst)?;
        }
        Ok(())
    }

    /// Advances the chip by one simulated cycle.
    ///
    /// # Errors
    ///
    /// The first configuration or protocol error aborts the cycle; both
    /// categories are caller defects and are never retried internally.
    pub fn tick(&mut self) -> Result<(), SimError> {
        // Each resource decrements its countdown exactly once per tick.
        self.imem.tick();
        self.regs.tick();
        self.dmem.tick();
        self.fetcher.buffer.tick();

        fetch_stage(self)?;
        decode_stage(self)?;

        self.stats.cycles += 1;
        Ok(())
    }

    /// Advances the chip by `cycles` cycles.
    ///
    /// # Errors
    ///
    /// Stops at the first failing cycle.
    pub fn run(&mut self, cycles: u64) -> Result<(), SimError> {
        for _ in 0..cycles {
            self.tick()?;
        }
        Ok(())
    }

    /// Captures a read-only snapshot of all observable state.
    ///
    /// The pull-based observer surface: after each tick, callers may query
    /// buffer contents, cell values, readiness flags, and the program
    /// counter. The engine itself never pushes state anywhere.
    pub fn snapshot(&self) -> ChipSnapshot {
        ChipSnapshot {
            cycle: self.stats.cycles,
            pc: self.fetcher.pc(),
            fetch_state: self.fetcher.state(),
            decode_state: self.decoder.state(),
            fetch_buffer: self.fetcher.buffer.iter().copied().collect(),
            registers: self.regs.cells().to_vec(),
            memory: self.dmem.cells().to_vec(),
            registers_ready: self.regs.is_ready(),
            memory_ready: self.dmem.is_ready(),
            instruction_memory_ready: self.imem.is_ready(),
            stats: self.stats.clone(),
        }
    }
}
