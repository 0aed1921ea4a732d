//! MIPS32 Instruction Decoder.
//!
//! Classifies a raw word by its opcode (and, for `SPECIAL` and `REGIMM`, by
//! the secondary selector) using the [mnemonic table](crate::isa::table). The
//! decoder is strict: a word with bits set outside the fields its entry
//! defines is rejected, so every accepted word re-encodes to itself.

use crate::common::CodecError;
use crate::isa::encode::Operand;
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::table::{self, Field, ImmKind, Op, OpClass, OpSpec};

/// A successfully decoded instruction word.
#[derive(Clone, Copy, Debug)]
pub struct Decoded {
    /// Table entry the word matched.
    pub spec: &'static OpSpec,
    /// The word split into its format's fields.
    pub inst: Instruction,
    /// The raw word.
    pub word: u32,
}

impl Decoded {
    /// Returns the instruction mnemonic.
    pub const fn mnemonic(&self) -> &'static str {
        self.spec.mnemonic
    }

    /// Returns the operation to execute.
    pub const fn op(&self) -> Op {
        self.spec.op
    }

    /// Returns the statistics category.
    pub const fn class(&self) -> OpClass {
        self.spec.class
    }

    /// `rs` register index.
    #[inline]
    pub fn rs(&self) -> usize {
        self.word.rs()
    }

    /// `rt` register index.
    #[inline]
    pub fn rt(&self) -> usize {
        self.word.rt()
    }

    /// `rd` register index.
    #[inline]
    pub fn rd(&self) -> usize {
        self.word.rd()
    }

    /// Shift amount.
    #[inline]
    pub fn shamt(&self) -> u32 {
        self.word.shamt()
    }

    /// Immediate widened according to the entry (sign or zero extension).
    #[inline]
    pub fn imm(&self) -> u32 {
        match self.spec.imm {
            ImmKind::Signed => self.word.simm(),
            ImmKind::Unsigned => self.word.zimm(),
        }
    }

    /// 26-bit jump target (word index within the segment).
    #[inline]
    pub fn target(&self) -> u32 {
        self.word.target26()
    }

    /// Reconstructs the operand list in source order.
    ///
    /// Passing the result back to [`encode`](crate::isa::encode::encode) with
    /// [`mnemonic`](Self::mnemonic) yields the original word.
    pub fn operands(&self) -> Vec<Operand> {
        self.spec
            .syntax
            .fields()
            .iter()
            .map(|field| match field {
                Field::Rs => Operand::Reg(self.rs() as u8),
                Field::Rt => Operand::Reg(self.rt() as u8),
                Field::Rd => Operand::Reg(self.rd() as u8),
                Field::Shamt => Operand::Imm(i64::from(self.shamt())),
                Field::Imm => match self.spec.imm {
                    ImmKind::Signed => Operand::Imm(i64::from(self.word.imm16() as i16)),
                    ImmKind::Unsigned => Operand::Imm(i64::from(self.word.imm16())),
                },
                Field::Target => Operand::Imm(i64::from(self.target())),
            })
            .collect()
    }
}

/// Decodes a 32-bit word.
///
/// # Errors
///
/// Returns [`CodecError::IllegalInstruction`] if no table entry matches the
/// opcode and selector, or if bits outside the entry's fields are set.
pub fn decode(word: u32) -> Result<Decoded, CodecError> {
    let spec = table::lookup_word(word).ok_or(CodecError::IllegalInstruction(word))?;
    if word & !spec.defined_mask() != 0 {
        return Err(CodecError::IllegalInstruction(word));
    }
    Ok(Decoded {
        spec,
        inst: Instruction::from_word(word, spec.format),
        word,
    })
}
