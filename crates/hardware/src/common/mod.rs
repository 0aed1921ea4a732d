//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Word size, register counts and the halt sentinel.
//! 2. **Error Handling:** Address errors, codec errors, execution faults,
//!    load errors and configuration errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and fault definitions.
pub mod error;

pub use constants::{HALT_SENTINEL, NUM_GPRS, WORD_BYTES};
pub use error::{AddressError, CodecError, ConfigError, Fault, LoadError};
