//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize a
//! chip. It provides:
//! 1. **Defaults:** Baseline hardware constants (clock rates, storage sizes,
//!    buffer capacity).
//! 2. **Structures:** Hierarchical config for clocks, storage, and the
//!    decode pipeline policy.
//!
//! Configuration is supplied via JSON (CLI) or `Config::default()`.

use serde::Deserialize;

use crate::common::timing::DelayMode;

/// Default configuration constants for the simulator.
///
/// These values define the baseline chip when not explicitly overridden.
mod defaults {
    /// Fetch unit clock rate (relative frequency units).
    pub const FETCH_HZ: u64 = 100;

    /// Decode unit clock rate.
    pub const DECODE_HZ: u64 = 100;

    /// Register file clock rate.
    pub const REGISTER_HZ: u64 = 100;

    /// Data memory clock rate.
    ///
    /// Slower than the core clocks so delayed-mode runs exhibit a
    /// multi-cycle access latency by default.
    pub const DATA_MEMORY_HZ: u64 = 50;

    /// Instruction memory clock rate.
    pub const INSTRUCTION_MEMORY_HZ: u64 = 50;

    /// Register file geometry: words × word width = cell count.
    pub const REGISTER_WORDS: usize = 4;

    /// Cells per register word.
    pub const REGISTER_WORD_WIDTH: usize = 2;

    /// Data memory geometry: words.
    pub const DATA_WORDS: usize = 16;

    /// Cells per data memory word.
    pub const DATA_WORD_WIDTH: usize = 4;

    /// Number of addressable instruction slots.
    pub const INSTRUCTION_CAPACITY: usize = 64;

    /// Fetch-side instruction buffer capacity.
    pub const FETCH_BUFFER_CAPACITY: usize = 2;
}

/// Clock rates for each unit, in relative frequency units.
///
/// Frequencies are only ever used for latency-ratio arithmetic
/// (`ceil(requester / resource)`, minimum one tick); their absolute scale
/// is meaningless.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Fetch unit clock rate.
    pub fetch_hz: u64,
    /// Decode unit clock rate.
    pub decode_hz: u64,
    /// Register file clock rate.
    pub register_hz: u64,
    /// Data memory clock rate.
    pub data_memory_hz: u64,
    /// Instruction memory clock rate.
    pub instruction_memory_hz: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fetch_hz: defaults::FETCH_HZ,
            decode_hz: defaults::DECODE_HZ,
            register_hz: defaults::REGISTER_HZ,
            data_memory_hz: defaults::DATA_MEMORY_HZ,
            instruction_memory_hz: defaults::INSTRUCTION_MEMORY_HZ,
        }
    }
}

/// Storage geometry and delay modes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Register file words.
    pub register_words: usize,
    /// Cells per register word.
    pub register_word_width: usize,
    /// Register file delay mode.
    pub register_mode: DelayMode,
    /// Data memory words.
    pub data_words: usize,
    /// Cells per data memory word.
    pub data_word_width: usize,
    /// Data memory delay mode.
    pub data_memory_mode: DelayMode,
    /// Addressable instruction slots.
    pub instruction_capacity: usize,
    /// Instruction memory delay mode.
    pub instruction_memory_mode: DelayMode,
    /// Fetch-side instruction buffer capacity.
    pub fetch_buffer_capacity: usize,
    /// Fetch-side instruction buffer delay mode.
    pub fetch_buffer_mode: DelayMode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            register_words: defaults::REGISTER_WORDS,
            register_word_width: defaults::REGISTER_WORD_WIDTH,
            register_mode: DelayMode::Immediate,
            data_words: defaults::DATA_WORDS,
            data_word_width: defaults::DATA_WORD_WIDTH,
            data_memory_mode: DelayMode::Immediate,
            instruction_capacity: defaults::INSTRUCTION_CAPACITY,
            instruction_memory_mode: DelayMode::Immediate,
            fetch_buffer_capacity: defaults::FETCH_BUFFER_CAPACITY,
            fetch_buffer_mode: DelayMode::Immediate,
        }
    }
}

/// Decode pipeline policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whether decode overlaps the fetch of instruction N+1 with the
    /// execution of instruction N.
    pub pipelined: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { pipelined: true }
    }
}

/// Root configuration for one chip.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-unit clock rates.
    pub clocks: ClockConfig,
    /// Storage geometry and delay modes.
    pub storage: StorageConfig,
    /// Decode pipeline policy.
    pub pipeline: PipelineConfig,
}
