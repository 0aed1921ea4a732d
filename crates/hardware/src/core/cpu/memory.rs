//! Memory Access Helpers.
//!
//! This module provides the interface between the execution engine and the
//! [`MemoryBus`]. It performs the following:
//! 1. **Width Selection:** Maps each load/store operation to a byte, half or word access.
//! 2. **Extension:** Sign-extends `lb`/`lh` results and zero-extends `lbu`/`lhu`.
//! 3. **Truncation:** Stores the low byte or half of the source register for `sb`/`sh`.

use crate::common::AddressError;
use crate::isa::Op;
use crate::soc::traits::MemoryBus;

/// Performs the load selected by `op` and returns the widened value.
///
/// # Arguments
///
/// * `bus` - Memory to read from.
/// * `op` - One of `Lb`, `Lh`, `Lw`, `Lbu`, `Lhu`.
/// * `addr` - Effective address.
///
/// # Returns
///
/// The 32-bit value to write to `rt`. Non-load operations read nothing and return 0.
pub fn load<B: MemoryBus + ?Sized>(bus: &B, op: Op, addr: u32) -> Result<u32, AddressError> {
    Ok(match op {
        Op::Lb => bus.read_byte(addr)? as i8 as i32 as u32,
        Op::Lbu => u32::from(bus.read_byte(addr)?),
        Op::Lh => bus.read_half(addr)? as i16 as i32 as u32,
        Op::Lhu => u32::from(bus.read_half(addr)?),
        Op::Lw => bus.read_word(addr)?,
        _ => 0,
    })
}

/// Performs the store selected by `op`.
///
/// # Arguments
///
/// * `bus` - Memory to write to.
/// * `op` - One of `Sb`, `Sh`, `Sw`.
/// * `addr` - Effective address.
/// * `val` - Source register value; truncated to the access width.
pub fn store<B: MemoryBus + ?Sized>(
    bus: &mut B,
    op: Op,
    addr: u32,
    val: u32,
) -> Result<(), AddressError> {
    match op {
        Op::Sb => bus.write_byte(addr, val as u8),
        Op::Sh => bus.write_half(addr, val as u16),
        Op::Sw => bus.write_word(addr, val),
        _ => Ok(()),
    }
}
