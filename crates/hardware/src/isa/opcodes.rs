//! MIPS32 Major Opcodes.
//!
//! Defines the primary opcode field (bits 31-26) for every supported instruction.
//! Opcodes `SPECIAL` and `REGIMM` are families resolved by a secondary field.

/// R-type family; the operation is selected by the `funct` field.
pub const SPECIAL: u32 = 0b000000;

/// Register-immediate branch family; the operation is selected by the `rt` field.
pub const REGIMM: u32 = 0b000001;

/// Jump (J).
pub const J: u32 = 0b000010;

/// Jump and Link (JAL).
pub const JAL: u32 = 0b000011;

/// Branch on Equal (BEQ).
pub const BEQ: u32 = 0b000100;

/// Branch on Not Equal (BNE).
pub const BNE: u32 = 0b000101;

/// Branch on Less Than or Equal to Zero (BLEZ).
pub const BLEZ: u32 = 0b000110;

/// Branch on Greater Than Zero (BGTZ).
pub const BGTZ: u32 = 0b000111;

/// Add Immediate, trapping on overflow (ADDI).
pub const ADDI: u32 = 0b001000;

/// Add Immediate Unsigned, wrapping (ADDIU).
pub const ADDIU: u32 = 0b001001;

/// Set on Less Than Immediate (SLTI).
pub const SLTI: u32 = 0b001010;

/// Set on Less Than Immediate Unsigned (SLTIU).
pub const SLTIU: u32 = 0b001011;

/// AND Immediate (ANDI).
pub const ANDI: u32 = 0b001100;

/// OR Immediate (ORI).
pub const ORI: u32 = 0b001101;

/// XOR Immediate (XORI).
pub const XORI: u32 = 0b001110;

/// Load Upper Immediate (LUI).
pub const LUI: u32 = 0b001111;

/// Load Byte, sign-extended (LB).
pub const LB: u32 = 0b100000;

/// Load Halfword, sign-extended (LH).
pub const LH: u32 = 0b100001;

/// Load Word (LW).
pub const LW: u32 = 0b100011;

/// Load Byte Unsigned (LBU).
pub const LBU: u32 = 0b100100;

/// Load Halfword Unsigned (LHU).
pub const LHU: u32 = 0b100101;

/// Store Byte (SB).
pub const SB: u32 = 0b101000;

/// Store Halfword (SH).
pub const SH: u32 = 0b101001;

/// Store Word (SW).
pub const SW: u32 = 0b101011;
