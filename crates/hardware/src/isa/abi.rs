//! MIPS o32 Application Binary Interface (ABI) register names.
//!
//! Defines the conventional register names, the indices the engine refers to
//! directly, and the name resolution used by the assembler.

use crate::common::{CodecError, NUM_GPRS};

/// Register $0 (hardwired zero).
pub const REG_ZERO: usize = 0;
/// Register $2 (first return value, `syscall` service number).
pub const REG_V0: usize = 2;
/// Register $4 (first argument).
pub const REG_A0: usize = 4;
/// Register $29 (stack pointer).
pub const REG_SP: usize = 29;
/// Register $31 (return address, written by `jal`).
pub const REG_RA: usize = 31;

/// ABI names for $0 to $31, without the `$` prefix.
pub const REG_NAMES: [&str; NUM_GPRS] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "fp",
    "ra",
];

/// Returns the ABI name of a register index, or `"??"` if out of range.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("??")
}

/// Resolves a register operand.
///
/// Accepts `$name` (ABI name, including the `$s8` alias for `$fp`) and `$n`
/// for `n` in `0..=31`. Names are case-insensitive.
///
/// # Errors
///
/// Returns [`CodecError::UnknownRegister`] for anything else, including a
/// missing `$` prefix.
pub fn parse_register(token: &str) -> Result<u8, CodecError> {
    let unknown = || CodecError::UnknownRegister(token.to_string());
    let name = token.strip_prefix('$').ok_or_else(unknown)?;

    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        return match name.parse::<usize>() {
            Ok(n) if n < NUM_GPRS => Ok(n as u8),
            _ => Err(unknown()),
        };
    }

    let lower = name.to_ascii_lowercase();
    if lower == "s8" {
        return Ok(30);
    }
    REG_NAMES
        .iter()
        .position(|candidate| *candidate == lower)
        .map(|idx| idx as u8)
        .ok_or_else(unknown)
}
