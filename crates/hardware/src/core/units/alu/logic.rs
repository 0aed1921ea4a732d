//! ALU logical and comparison operations.

use super::AluOp;

/// Executes a bitwise or comparison operation.
///
/// Comparisons produce `1` when `a < b` and `0` otherwise; `Slt` compares as
/// signed, `Sltu` as unsigned. Returns `0` for other opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Nor => !(a | b),
        AluOp::Slt => u32::from((a as i32) < (b as i32)),
        AluOp::Sltu => u32::from(a < b),
        _ => 0,
    }
}
