//! Simulation driver and program loading.
//!
//! Provides the two-pass assembler that turns source text into instruction
//! words and the `Simulator` that owns the CPU and memory.

/// Two-pass assembler.
pub mod loader;

/// Top-level simulator (load, step, run, reset, dumps).
pub mod simulator;

pub use loader::{Program, assemble};
pub use simulator::{ListingLine, RegisterDump, RunReport, RunStop, Simulator, Status};
