//! Memory bus trait.
//!
//! This module defines the `MemoryBus` trait the execution engine performs every
//! fetch, load and store through. It provides:
//! 1. **Reads:** Byte, half and word reads at absolute addresses.
//! 2. **Writes:** Byte, half and word writes at absolute addresses.
//!
//! Every access returns an explicit [`AddressError`] on failure. Implementors
//! must never substitute a default value for an unmapped address.

use crate::common::AddressError;

/// Byte-addressed, little-endian memory as seen by the engine.
///
/// Word accesses require 4-byte alignment; byte and half accesses do not.
pub trait MemoryBus {
    /// Reads one byte.
    fn read_byte(&self, addr: u32) -> Result<u8, AddressError>;
    /// Reads two bytes (little-endian).
    fn read_half(&self, addr: u32) -> Result<u16, AddressError>;
    /// Reads four bytes (little-endian) from an aligned address.
    fn read_word(&self, addr: u32) -> Result<u32, AddressError>;
    /// Writes one byte.
    fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), AddressError>;
    /// Writes two bytes (little-endian).
    fn write_half(&mut self, addr: u32, val: u16) -> Result<(), AddressError>;
    /// Writes four bytes (little-endian) to an aligned address.
    fn write_word(&mut self, addr: u32, val: u32) -> Result<(), AddressError>;
}
