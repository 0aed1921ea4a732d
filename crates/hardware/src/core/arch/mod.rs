//! MIPS architectural state.
//!
//! This module contains the programmer-visible state of the processor:
//! 1. **GPRs:** General-Purpose Register file with the hardwired zero register.
//! 2. **State:** The `{pc, gpr, hi, lo}` snapshot committed once per cycle.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Architectural state snapshot.
pub mod state;

pub use gpr::Gpr;
pub use state::ArchState;
