//! MIPS32 Secondary Function Codes.
//!
//! The `funct` field (bits 5-0) distinguishes the `SPECIAL` (opcode 0)
//! instructions. The `rt` field (bits 20-16) distinguishes the `REGIMM`
//! (opcode 1) branches; those selectors live in [`regimm`].

/// Shift Left Logical.
pub const SLL: u32 = 0b000000;
/// Shift Right Logical.
pub const SRL: u32 = 0b000010;
/// Shift Right Arithmetic.
pub const SRA: u32 = 0b000011;
/// Shift Left Logical Variable.
pub const SLLV: u32 = 0b000100;
/// Shift Right Logical Variable.
pub const SRLV: u32 = 0b000110;
/// Shift Right Arithmetic Variable.
pub const SRAV: u32 = 0b000111;
/// Jump Register.
pub const JR: u32 = 0b001000;
/// Jump and Link Register.
pub const JALR: u32 = 0b001001;
/// System Call.
pub const SYSCALL: u32 = 0b001100;
/// Move From HI.
pub const MFHI: u32 = 0b010000;
/// Move To HI.
pub const MTHI: u32 = 0b010001;
/// Move From LO.
pub const MFLO: u32 = 0b010010;
/// Move To LO.
pub const MTLO: u32 = 0b010011;
/// Multiply (signed).
pub const MULT: u32 = 0b011000;
/// Multiply Unsigned.
pub const MULTU: u32 = 0b011001;
/// Divide (signed).
pub const DIV: u32 = 0b011010;
/// Divide Unsigned.
pub const DIVU: u32 = 0b011011;
/// Add, trapping on overflow.
pub const ADD: u32 = 0b100000;
/// Add Unsigned, wrapping.
pub const ADDU: u32 = 0b100001;
/// Subtract, trapping on overflow.
pub const SUB: u32 = 0b100010;
/// Subtract Unsigned, wrapping.
pub const SUBU: u32 = 0b100011;
/// Bitwise AND.
pub const AND: u32 = 0b100100;
/// Bitwise OR.
pub const OR: u32 = 0b100101;
/// Bitwise XOR.
pub const XOR: u32 = 0b100110;
/// Bitwise NOR.
pub const NOR: u32 = 0b100111;
/// Set on Less Than (signed).
pub const SLT: u32 = 0b101010;
/// Set on Less Than Unsigned.
pub const SLTU: u32 = 0b101011;

/// `rt` selectors of the `REGIMM` branch family.
pub mod regimm {
    /// Branch on Less Than Zero.
    pub const BLTZ: u32 = 0b00000;
    /// Branch on Greater Than or Equal to Zero.
    pub const BGEZ: u32 = 0b00001;
}
