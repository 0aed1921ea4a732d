//! Architectural State.
//!
//! One snapshot of everything an instruction can observe or change besides
//! memory: the program counter, the register file and the HI/LO pair. The
//! simulator holds two of these, `current` and `next`.

use crate::core::arch::gpr::Gpr;

/// Programmer-visible processor state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchState {
    /// Program counter.
    pub pc: u32,
    /// General-purpose registers.
    pub gpr: Gpr,
    /// Upper multiply result / division remainder.
    pub hi: u32,
    /// Lower multiply result / division quotient.
    pub lo: u32,
}

impl ArchState {
    /// Creates a zeroed state with the PC at `pc`.
    pub const fn new(pc: u32) -> Self {
        Self {
            pc,
            gpr: Gpr::new(),
            hi: 0,
            lo: 0,
        }
    }
}
