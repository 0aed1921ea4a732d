//! Execution units and functional components.
//!
//! The single-cycle engine needs only the integer ALU; memory access goes
//! straight to the [`MemoryBus`](crate::soc::traits::MemoryBus).

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
