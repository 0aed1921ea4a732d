//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for the MIPS32 instruction fields and the
//! decoded instruction record, a variant per encoding format.

/// Bit shift of the opcode field (bits 31-26).
pub const OPCODE_SHIFT: u32 = 26;
/// Bit shift of the `rs` field (bits 25-21).
pub const RS_SHIFT: u32 = 21;
/// Bit shift of the `rt` field (bits 20-16).
pub const RT_SHIFT: u32 = 16;
/// Bit shift of the `rd` field (bits 15-11).
pub const RD_SHIFT: u32 = 11;
/// Bit shift of the `shamt` field (bits 10-6).
pub const SHAMT_SHIFT: u32 = 6;

/// Bit mask for the 6-bit opcode field after shifting.
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit mask for a 5-bit register or shift field after shifting.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 6-bit funct field.
pub const FUNCT_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate field.
pub const IMM_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump target field.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the `rs` register field (bits 25-21).
    fn rs(&self) -> usize;

    /// Extracts the `rt` register field (bits 20-16).
    fn rt(&self) -> usize;

    /// Extracts the `rd` register field (bits 15-11).
    fn rd(&self) -> usize;

    /// Extracts the shift amount field (bits 10-6).
    fn shamt(&self) -> u32;

    /// Extracts the funct field (bits 5-0).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 15-0).
    fn imm16(&self) -> u16;

    /// Returns the 16-bit immediate sign-extended to 32 bits.
    fn simm(&self) -> u32;

    /// Returns the 16-bit immediate zero-extended to 32 bits.
    fn zimm(&self) -> u32;

    /// Extracts the 26-bit jump target field (bits 25-0).
    fn target26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u16 {
        (self & IMM_MASK) as u16
    }

    /// Reinterprets the low half as `i16` so the sign bit is replicated.
    #[inline(always)]
    fn simm(&self) -> u32 {
        self.imm16() as i16 as i32 as u32
    }

    #[inline(always)]
    fn zimm(&self) -> u32 {
        self & IMM_MASK
    }

    #[inline(always)]
    fn target26(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Instruction encoding format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register format: `opcode | rs | rt | rd | shamt | funct`.
    R,
    /// Immediate format: `opcode | rs | rt | imm16`.
    I,
    /// Jump format: `opcode | target26`.
    J,
}

/// Decoded instruction record.
///
/// Carries the raw field values of one word split according to its format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Register-format instruction.
    R {
        /// Major opcode (always `SPECIAL`).
        opcode: u8,
        /// First source register.
        rs: u8,
        /// Second source register.
        rt: u8,
        /// Destination register.
        rd: u8,
        /// Shift amount.
        shamt: u8,
        /// Function code.
        funct: u8,
    },
    /// Immediate-format instruction.
    I {
        /// Major opcode.
        opcode: u8,
        /// Source / base register.
        rs: u8,
        /// Destination / second source register.
        rt: u8,
        /// Raw 16-bit immediate.
        imm: u16,
    },
    /// Jump-format instruction.
    J {
        /// Major opcode.
        opcode: u8,
        /// 26-bit word target.
        target: u32,
    },
}

impl Instruction {
    /// Splits a raw word into the fields of `format`.
    pub fn from_word(word: u32, format: Format) -> Self {
        match format {
            Format::R => Self::R {
                opcode: word.opcode() as u8,
                rs: word.rs() as u8,
                rt: word.rt() as u8,
                rd: word.rd() as u8,
                shamt: word.shamt() as u8,
                funct: word.funct() as u8,
            },
            Format::I => Self::I {
                opcode: word.opcode() as u8,
                rs: word.rs() as u8,
                rt: word.rt() as u8,
                imm: word.imm16(),
            },
            Format::J => Self::J {
                opcode: word.opcode() as u8,
                target: word.target26(),
            },
        }
    }

    /// Packs the record back into a 32-bit word.
    pub fn to_word(self) -> u32 {
        match self {
            Self::R {
                opcode,
                rs,
                rt,
                rd,
                shamt,
                funct,
            } => {
                (opcode as u32 & OPCODE_MASK) << OPCODE_SHIFT
                    | (rs as u32 & REG_MASK) << RS_SHIFT
                    | (rt as u32 & REG_MASK) << RT_SHIFT
                    | (rd as u32 & REG_MASK) << RD_SHIFT
                    | (shamt as u32 & REG_MASK) << SHAMT_SHIFT
                    | (funct as u32 & FUNCT_MASK)
            }
            Self::I { opcode, rs, rt, imm } => {
                (opcode as u32 & OPCODE_MASK) << OPCODE_SHIFT
                    | (rs as u32 & REG_MASK) << RS_SHIFT
                    | (rt as u32 & REG_MASK) << RT_SHIFT
                    | imm as u32
            }
            Self::J { opcode, target } => {
                (opcode as u32 & OPCODE_MASK) << OPCODE_SHIFT | (target & TARGET_MASK)
            }
        }
    }

    /// Returns the encoding format of this record.
    pub const fn format(&self) -> Format {
        match self {
            Self::R { .. } => Format::R,
            Self::I { .. } => Format::I,
            Self::J { .. } => Format::J,
        }
    }
}
