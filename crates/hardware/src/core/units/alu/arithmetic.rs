//! ALU arithmetic operations.
//!
//! Implements 32-bit addition and subtraction in wrapping and trapping
//! variants, and the multiply/divide family that produces a `(hi, lo)` pair.

use super::AluOp;

/// Number of bits in a word (used to split a 64-bit product).
const WORD_BITS: u32 = 32;

/// Executes a wrapping arithmetic operation.
///
/// # Returns
///
/// The two's-complement result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}

/// Signed addition that traps on overflow (`add`, `addi`).
///
/// Returns `None` if the signed 32-bit sum overflows.
pub fn checked_add(a: u32, b: u32) -> Option<u32> {
    (a as i32).checked_add(b as i32).map(|v| v as u32)
}

/// Signed subtraction that traps on overflow (`sub`).
pub fn checked_sub(a: u32, b: u32) -> Option<u32> {
    (a as i32).checked_sub(b as i32).map(|v| v as u32)
}

/// Splits a 64-bit value into `(hi, lo)`.
#[inline]
const fn split(v: u64) -> (u32, u32) {
    ((v >> WORD_BITS) as u32, v as u32)
}

/// Signed 32x32 multiply, returning `(hi, lo)` of the 64-bit product.
pub fn mult(a: u32, b: u32) -> (u32, u32) {
    split((i64::from(a as i32) * i64::from(b as i32)) as u64)
}

/// Unsigned 32x32 multiply, returning `(hi, lo)` of the 64-bit product.
pub fn multu(a: u32, b: u32) -> (u32, u32) {
    split(u64::from(a) * u64::from(b))
}

/// Signed divide, returning `(hi, lo) = (remainder, quotient)`.
///
/// Returns `None` for a zero divisor. `i32::MIN / -1` wraps to
/// `(0, 0x8000_0000)`.
pub fn div(a: u32, b: u32) -> Option<(u32, u32)> {
    let (a, b) = (a as i32, b as i32);
    if b == 0 {
        return None;
    }
    Some((a.wrapping_rem(b) as u32, a.wrapping_div(b) as u32))
}

/// Unsigned divide, returning `(hi, lo) = (remainder, quotient)`.
///
/// Returns `None` for a zero divisor.
pub fn divu(a: u32, b: u32) -> Option<(u32, u32)> {
    if b == 0 {
        return None;
    }
    Some((a % b, a / b))
}
