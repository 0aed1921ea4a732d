//! Core processor implementation.
//!
//! This module contains the single-cycle CPU: the architectural state it
//! commits, the ALU it computes with, and the engine that ties them to memory.

/// Architectural state (register file, PC, HI/LO).
pub mod arch;

/// CPU core implementation and per-cycle execution.
pub mod cpu;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::{CycleOutcome, Cpu};
