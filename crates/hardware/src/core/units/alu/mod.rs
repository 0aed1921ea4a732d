//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the execution engine. It
//! handles 32-bit arithmetic, logical operations, comparisons and shifts, plus
//! the HI/LO multiply and divide operations.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub (wrapping and trapping), Mult, Multu, Div, Divu
//! - [`logic`]:      Or, And, Xor, Nor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

/// Single-result ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// Signed less-than, 0 or 1.
    Slt,
    /// Unsigned less-than, 0 or 1.
    Sltu,
    /// Logical shift left by the low 5 bits of `b`.
    Sll,
    /// Logical shift right by the low 5 bits of `b`.
    Srl,
    /// Arithmetic shift right by the low 5 bits of `b`.
    Sra,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes a single-result integer ALU operation.
    ///
    /// Never faults; the trapping `add`/`sub` variants live in
    /// [`arithmetic::checked_add`] and [`arithmetic::checked_sub`].
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand (the shifted value for shifts)
    /// * `b`  - Second operand (the shift amount for shifts)
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1), 0x8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Sltu, -5_i32 as u32, 10), 0);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Nor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}
