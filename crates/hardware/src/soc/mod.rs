//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory side of the simulated system: the
//! `MemoryBus` access trait and the segmented `Memory` that implements it.

/// Segmented byte-addressed memory.
pub mod memory;

/// Memory access trait used by the execution engine.
pub mod traits;

pub use memory::{Memory, MemoryRegion};
pub use traits::MemoryBus;
