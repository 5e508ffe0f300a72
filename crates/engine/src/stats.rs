//! Retirement and cycle statistics.
//!
//! Tracks throughput metrics for one chip: total cycles, instructions
//! retired, and the retirement mix by class. `SimStats` is the chip's
//! default [`RetirementSink`]; external drivers may substitute their own.

use serde::Serialize;

use crate::core::units::decoder::RetirementSink;
use crate::isa::{InstrClass, Instruction};

/// Throughput statistics for one chip.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimStats {
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Instructions retired (committed).
    pub retired: u64,
    /// Arithmetic-class instructions retired.
    pub retired_arithmetic: u64,
    /// Memory-class instructions retired.
    pub retired_memory: u64,
    /// Branch-class instructions retired (resolved either way).
    pub retired_branch: u64,
}

impl SimStats {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions per cycle over the run so far.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.retired as f64 / self.cycles as f64
        }
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "cycles={} retired={} (alu={} mem={} branch={}) ipc={:.3}",
            self.cycles,
            self.retired,
            self.retired_arithmetic,
            self.retired_memory,
            self.retired_branch,
            self.ipc()
        )
    }
}

impl RetirementSink for SimStats {
    fn retire(&mut self, inst: &Instruction) {
        self.retired += 1;
        match inst.class() {
            InstrClass::Arithmetic => self.retired_arithmetic += 1,
            InstrClass::Memory => self.retired_memory += 1,
            InstrClass::Branch => self.retired_branch += 1,
        }
    }
}
