//! Simulation statistics collection.
//!
//! This module tracks execution metrics for the simulator. It provides:
//! 1. **Cycles:** Committed cycles, which equal retired instructions in a
//!    single-cycle model.
//! 2. **Instruction mix:** Counts by category (ALU, mul/div, load, store,
//!    branch, jump, system).
//! 3. **Faults:** Number of non-fatal faults reported by committed cycles.
//!
//! Rendering is left to the caller; the structure serializes with `serde`.

use serde::Serialize;

use crate::isa::OpClass;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Committed cycles.
    pub cycles: u64,

    /// Count of ALU instructions retired (arithmetic, logic, shifts, compares, HI/LO moves).
    pub inst_alu: u64,
    /// Count of multiply/divide instructions retired.
    pub inst_muldiv: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of jumps retired (`j`, `jal`, `jr`, `jalr`).
    pub inst_jump: u64,
    /// Count of `syscall` instructions retired.
    pub inst_system: u64,

    /// Faults reported by cycles that still committed (overflow under the
    /// `continue` policy, division by zero).
    pub faults_reported: u64,
}

impl SimStats {
    /// Records one committed cycle of the given instruction class.
    pub fn record(&mut self, class: OpClass) {
        self.cycles += 1;
        let counter = match class {
            OpClass::Alu => &mut self.inst_alu,
            OpClass::MulDiv => &mut self.inst_muldiv,
            OpClass::Load => &mut self.inst_load,
            OpClass::Store => &mut self.inst_store,
            OpClass::Branch => &mut self.inst_branch,
            OpClass::Jump => &mut self.inst_jump,
            OpClass::System => &mut self.inst_system,
        };
        *counter += 1;
    }

    /// Total retired instructions across all classes.
    pub const fn instructions(&self) -> u64 {
        self.inst_alu
            + self.inst_muldiv
            + self.inst_load
            + self.inst_store
            + self.inst_branch
            + self.inst_jump
            + self.inst_system
    }
}
