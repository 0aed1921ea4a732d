//! MIPS32 instruction-level simulator library.
//!
//! This crate implements a single-cycle MIPS32 simulator with the following:
//! 1. **ISA:** A table-driven codec (encode, strict decode, disassembly) for the
//!    integer instruction set.
//! 2. **Core:** Architectural state held as current/next snapshots and the
//!    execution engine that derives one from the other.
//! 3. **Memory:** Segmented, little-endian, byte-addressed regions with explicit
//!    unmapped and misaligned faults.
//! 4. **Simulation:** A two-pass assembler, the `Simulator` driver, configuration
//!    and statistics.
//!
//! # Example
//!
//! ```
//! use mipsim_core::{Config, Simulator};
//!
//! let mut sim = Simulator::new(&Config::default()).unwrap();
//! sim.load("addi $t0, $zero, 5\naddi $t1, $zero, 7\nadd $t2, $t0, $t1\n").unwrap();
//! sim.run_n(3);
//! assert_eq!(sim.read_register(10).unwrap(), 12);
//! assert_eq!(sim.cycles(), 3);
//! ```

/// Common types and constants (errors, faults, word size).
pub mod common;
/// Simulator configuration (defaults, overflow policy, memory map).
pub mod config;
/// CPU core (architectural state, ALU, execution engine).
pub mod core;
/// Instruction set (mnemonic table, encode, decode, disassembly, ABI).
pub mod isa;
/// Program loader and the simulator driver.
pub mod sim;
/// Memory subsystem (regions, memory bus trait).
pub mod soc;
/// Simulation statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Result of a single cycle.
pub use crate::core::CycleOutcome;
/// Main simulator type; construct with `Simulator::new`.
pub use crate::sim::Simulator;
