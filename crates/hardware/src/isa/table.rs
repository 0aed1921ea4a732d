//! The Mnemonic Table.
//!
//! A single static table describes every supported instruction: its mnemonic,
//! format, opcode, secondary selector, operand syntax and the operation the
//! engine performs. The encoder, the decoder and the disassembler all query
//! this table, so the three can never disagree about an encoding.

use crate::isa::funct::{self, regimm};
use crate::isa::instruction::{
    FUNCT_MASK, Format, IMM_MASK, OPCODE_MASK, OPCODE_SHIFT, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT,
    SHAMT_SHIFT, TARGET_MASK,
};
use crate::isa::opcodes;

/// Operation performed by the execution engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Op {
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Syscall,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Mult,
    Multu,
    Div,
    Divu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Bltz,
    Bgez,
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
}

/// Instruction category, used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Integer arithmetic, logic, shifts, compares and HI/LO moves.
    Alu,
    /// Multiply and divide.
    MulDiv,
    /// Memory loads.
    Load,
    /// Memory stores.
    Store,
    /// Conditional branches.
    Branch,
    /// Unconditional jumps.
    Jump,
    /// `syscall`.
    System,
}

/// An instruction field that an operand is placed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// `rs` register (bits 25-21).
    Rs,
    /// `rt` register (bits 20-16).
    Rt,
    /// `rd` register (bits 15-11).
    Rd,
    /// Shift amount (bits 10-6), `0..=31`.
    Shamt,
    /// 16-bit immediate (bits 15-0).
    Imm,
    /// 26-bit jump target (bits 25-0).
    Target,
}

impl Field {
    /// Returns `true` if the field holds a register index.
    pub const fn is_register(self) -> bool {
        matches!(self, Self::Rs | Self::Rt | Self::Rd)
    }

    /// Bit position of the field's least significant bit.
    pub const fn shift(self) -> u32 {
        match self {
            Self::Rs => RS_SHIFT,
            Self::Rt => RT_SHIFT,
            Self::Rd => RD_SHIFT,
            Self::Shamt => SHAMT_SHIFT,
            Self::Imm | Self::Target => 0,
        }
    }

    /// Unshifted mask of the field's width.
    pub const fn mask(self) -> u32 {
        match self {
            Self::Rs | Self::Rt | Self::Rd | Self::Shamt => REG_MASK,
            Self::Imm => IMM_MASK,
            Self::Target => TARGET_MASK,
        }
    }
}

/// Assembly operand layout of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// `rd, rs, rt`
    RdRsRt,
    /// `rd, rt, shamt`
    RdRtShamt,
    /// `rd, rt, rs`
    RdRtRs,
    /// `rs, rt`
    RsRt,
    /// `rd`
    Rd,
    /// `rs`
    Rs,
    /// `rd, rs`
    RdRs,
    /// No operands.
    Bare,
    /// `rt, rs, imm`
    RtRsImm,
    /// `rt, imm`
    RtImm,
    /// `rt, offset(rs)`
    RtOffsetBase,
    /// `rs, rt, offset`
    RsRtOffset,
    /// `rs, offset`
    RsOffset,
    /// `target`
    Target,
}

impl Syntax {
    /// Fields filled by the operands, in source order.
    ///
    /// For [`Syntax::RtOffsetBase`] the order is `rt, offset, base`, matching
    /// how `offset(base)` reads left to right.
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::RdRsRt => &[Field::Rd, Field::Rs, Field::Rt],
            Self::RdRtShamt => &[Field::Rd, Field::Rt, Field::Shamt],
            Self::RdRtRs => &[Field::Rd, Field::Rt, Field::Rs],
            Self::RsRt => &[Field::Rs, Field::Rt],
            Self::Rd => &[Field::Rd],
            Self::Rs => &[Field::Rs],
            Self::RdRs => &[Field::Rd, Field::Rs],
            Self::Bare => &[],
            Self::RtRsImm => &[Field::Rt, Field::Rs, Field::Imm],
            Self::RtImm => &[Field::Rt, Field::Imm],
            Self::RtOffsetBase => &[Field::Rt, Field::Imm, Field::Rs],
            Self::RsRtOffset => &[Field::Rs, Field::Rt, Field::Imm],
            Self::RsOffset => &[Field::Rs, Field::Imm],
            Self::Target => &[Field::Target],
        }
    }

    /// Human-readable operand list, used in error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::RdRsRt => "operands `rd, rs, rt`",
            Self::RdRtShamt => "operands `rd, rt, shamt`",
            Self::RdRtRs => "operands `rd, rt, rs`",
            Self::RsRt => "operands `rs, rt`",
            Self::Rd => "operand `rd`",
            Self::Rs => "operand `rs`",
            Self::RdRs => "operands `rd, rs`",
            Self::Bare => "no operands",
            Self::RtRsImm => "operands `rt, rs, imm`",
            Self::RtImm => "operands `rt, imm`",
            Self::RtOffsetBase => "operands `rt, offset(rs)`",
            Self::RsRtOffset => "operands `rs, rt, offset`",
            Self::RsOffset => "operands `rs, offset`",
            Self::Target => "operand `target`",
        }
    }
}

/// How a 16-bit immediate is widened to 32 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmKind {
    /// Sign-extended; accepts `-32768..=32767`.
    Signed,
    /// Zero-extended; accepts `0..=65535`.
    Unsigned,
}

/// One entry of the mnemonic table.
#[derive(Debug)]
pub struct OpSpec {
    /// Lower-case mnemonic.
    pub mnemonic: &'static str,
    /// Encoding format.
    pub format: Format,
    /// Major opcode.
    pub opcode: u32,
    /// `funct` selector for `SPECIAL` instructions.
    pub funct: Option<u32>,
    /// `rt` selector for `REGIMM` branches.
    pub rt_select: Option<u32>,
    /// Operand layout.
    pub syntax: Syntax,
    /// Immediate widening, for entries with an `Imm` field.
    pub imm: ImmKind,
    /// Operation executed by the engine.
    pub op: Op,
    /// Statistics category.
    pub class: OpClass,
}

impl OpSpec {
    /// Bits fixed by the entry itself (opcode and selector).
    pub const fn fixed_bits(&self) -> u32 {
        let mut word = (self.opcode & OPCODE_MASK) << OPCODE_SHIFT;
        if let Some(f) = self.funct {
            word |= f & FUNCT_MASK;
        }
        if let Some(rt) = self.rt_select {
            word |= (rt & REG_MASK) << RT_SHIFT;
        }
        word
    }

    /// Mask of every bit the entry defines: opcode, selector and operand fields.
    ///
    /// A word with set bits outside this mask is not a valid encoding of the entry.
    pub fn defined_mask(&self) -> u32 {
        let mut mask = OPCODE_MASK << OPCODE_SHIFT;
        if self.funct.is_some() {
            mask |= FUNCT_MASK;
        }
        if self.rt_select.is_some() {
            mask |= REG_MASK << RT_SHIFT;
        }
        for field in self.syntax.fields() {
            mask |= field.mask() << field.shift();
        }
        mask
    }

    /// Inclusive range accepted for an immediate placed in `field`.
    pub const fn range(&self, field: Field) -> (i64, i64) {
        match field {
            Field::Rs | Field::Rt | Field::Rd | Field::Shamt => (0, 31),
            Field::Target => (0, TARGET_MASK as i64),
            Field::Imm => match self.imm {
                ImmKind::Signed => (i16::MIN as i64, i16::MAX as i64),
                ImmKind::Unsigned => (0, u16::MAX as i64),
            },
        }
    }

    /// Returns `true` if `word` carries this entry's opcode and selector.
    pub const fn matches(&self, word: u32) -> bool {
        let opcode = (word >> OPCODE_SHIFT) & OPCODE_MASK;
        if opcode != self.opcode {
            return false;
        }
        if let Some(f) = self.funct
            && word & FUNCT_MASK != f
        {
            return false;
        }
        if let Some(rt) = self.rt_select
            && (word >> RT_SHIFT) & REG_MASK != rt
        {
            return false;
        }
        true
    }
}

/// Builds a `SPECIAL` (R-format) entry.
const fn special(mnemonic: &'static str, f: u32, syntax: Syntax, op: Op, class: OpClass) -> OpSpec {
    OpSpec {
        mnemonic,
        format: Format::R,
        opcode: opcodes::SPECIAL,
        funct: Some(f),
        rt_select: None,
        syntax,
        imm: ImmKind::Signed,
        op,
        class,
    }
}

/// Builds an I-format entry.
const fn immediate(
    mnemonic: &'static str,
    opcode: u32,
    syntax: Syntax,
    imm: ImmKind,
    op: Op,
    class: OpClass,
) -> OpSpec {
    OpSpec {
        mnemonic,
        format: Format::I,
        opcode,
        funct: None,
        rt_select: None,
        syntax,
        imm,
        op,
        class,
    }
}

/// Builds a `REGIMM` branch entry.
const fn regimm_branch(mnemonic: &'static str, rt: u32, op: Op) -> OpSpec {
    OpSpec {
        mnemonic,
        format: Format::I,
        opcode: opcodes::REGIMM,
        funct: None,
        rt_select: Some(rt),
        syntax: Syntax::RsOffset,
        imm: ImmKind::Signed,
        op,
        class: OpClass::Branch,
    }
}

/// Builds a J-format entry.
const fn jump(mnemonic: &'static str, opcode: u32, op: Op) -> OpSpec {
    OpSpec {
        mnemonic,
        format: Format::J,
        opcode,
        funct: None,
        rt_select: None,
        syntax: Syntax::Target,
        imm: ImmKind::Unsigned,
        op,
        class: OpClass::Jump,
    }
}

use ImmKind::{Signed, Unsigned};
use OpClass::{Alu, Branch, Jump, Load, MulDiv, Store, System};

/// Every supported instruction.
pub static MNEMONICS: &[OpSpec] = &[
    // ── SPECIAL ──────────────────────────────────────────
    special("sll", funct::SLL, Syntax::RdRtShamt, Op::Sll, Alu),
    special("srl", funct::SRL, Syntax::RdRtShamt, Op::Srl, Alu),
    special("sra", funct::SRA, Syntax::RdRtShamt, Op::Sra, Alu),
    special("sllv", funct::SLLV, Syntax::RdRtRs, Op::Sllv, Alu),
    special("srlv", funct::SRLV, Syntax::RdRtRs, Op::Srlv, Alu),
    special("srav", funct::SRAV, Syntax::RdRtRs, Op::Srav, Alu),
    special("jr", funct::JR, Syntax::Rs, Op::Jr, Jump),
    special("jalr", funct::JALR, Syntax::RdRs, Op::Jalr, Jump),
    special("syscall", funct::SYSCALL, Syntax::Bare, Op::Syscall, System),
    special("mfhi", funct::MFHI, Syntax::Rd, Op::Mfhi, Alu),
    special("mthi", funct::MTHI, Syntax::Rs, Op::Mthi, Alu),
    special("mflo", funct::MFLO, Syntax::Rd, Op::Mflo, Alu),
    special("mtlo", funct::MTLO, Syntax::Rs, Op::Mtlo, Alu),
    special("mult", funct::MULT, Syntax::RsRt, Op::Mult, MulDiv),
    special("multu", funct::MULTU, Syntax::RsRt, Op::Multu, MulDiv),
    special("div", funct::DIV, Syntax::RsRt, Op::Div, MulDiv),
    special("divu", funct::DIVU, Syntax::RsRt, Op::Divu, MulDiv),
    special("add", funct::ADD, Syntax::RdRsRt, Op::Add, Alu),
    special("addu", funct::ADDU, Syntax::RdRsRt, Op::Addu, Alu),
    special("sub", funct::SUB, Syntax::RdRsRt, Op::Sub, Alu),
    special("subu", funct::SUBU, Syntax::RdRsRt, Op::Subu, Alu),
    special("and", funct::AND, Syntax::RdRsRt, Op::And, Alu),
    special("or", funct::OR, Syntax::RdRsRt, Op::Or, Alu),
    special("xor", funct::XOR, Syntax::RdRsRt, Op::Xor, Alu),
    special("nor", funct::NOR, Syntax::RdRsRt, Op::Nor, Alu),
    special("slt", funct::SLT, Syntax::RdRsRt, Op::Slt, Alu),
    special("sltu", funct::SLTU, Syntax::RdRsRt, Op::Sltu, Alu),
    // ── REGIMM ───────────────────────────────────────────
    regimm_branch("bltz", regimm::BLTZ, Op::Bltz),
    regimm_branch("bgez", regimm::BGEZ, Op::Bgez),
    // ── Jumps ────────────────────────────────────────────
    jump("j", opcodes::J, Op::J),
    jump("jal", opcodes::JAL, Op::Jal),
    // ── Branches ─────────────────────────────────────────
    immediate("beq", opcodes::BEQ, Syntax::RsRtOffset, Signed, Op::Beq, Branch),
    immediate("bne", opcodes::BNE, Syntax::RsRtOffset, Signed, Op::Bne, Branch),
    immediate("blez", opcodes::BLEZ, Syntax::RsOffset, Signed, Op::Blez, Branch),
    immediate("bgtz", opcodes::BGTZ, Syntax::RsOffset, Signed, Op::Bgtz, Branch),
    // ── Immediate arithmetic and logic ───────────────────
    immediate("addi", opcodes::ADDI, Syntax::RtRsImm, Signed, Op::Addi, Alu),
    immediate("addiu", opcodes::ADDIU, Syntax::RtRsImm, Signed, Op::Addiu, Alu),
    immediate("slti", opcodes::SLTI, Syntax::RtRsImm, Signed, Op::Slti, Alu),
    immediate("sltiu", opcodes::SLTIU, Syntax::RtRsImm, Signed, Op::Sltiu, Alu),
    immediate("andi", opcodes::ANDI, Syntax::RtRsImm, Unsigned, Op::Andi, Alu),
    immediate("ori", opcodes::ORI, Syntax::RtRsImm, Unsigned, Op::Ori, Alu),
    immediate("xori", opcodes::XORI, Syntax::RtRsImm, Unsigned, Op::Xori, Alu),
    immediate("lui", opcodes::LUI, Syntax::RtImm, Unsigned, Op::Lui, Alu),
    // ── Loads and stores ─────────────────────────────────
    immediate("lb", opcodes::LB, Syntax::RtOffsetBase, Signed, Op::Lb, Load),
    immediate("lh", opcodes::LH, Syntax::RtOffsetBase, Signed, Op::Lh, Load),
    immediate("lw", opcodes::LW, Syntax::RtOffsetBase, Signed, Op::Lw, Load),
    immediate("lbu", opcodes::LBU, Syntax::RtOffsetBase, Signed, Op::Lbu, Load),
    immediate("lhu", opcodes::LHU, Syntax::RtOffsetBase, Signed, Op::Lhu, Load),
    immediate("sb", opcodes::SB, Syntax::RtOffsetBase, Signed, Op::Sb, Store),
    immediate("sh", opcodes::SH, Syntax::RtOffsetBase, Signed, Op::Sh, Store),
    immediate("sw", opcodes::SW, Syntax::RtOffsetBase, Signed, Op::Sw, Store),
];

/// Finds the table entry for a mnemonic, ignoring ASCII case.
pub fn lookup(mnemonic: &str) -> Option<&'static OpSpec> {
    MNEMONICS
        .iter()
        .find(|spec| spec.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Finds the table entry whose opcode and selector match `word`.
pub fn lookup_word(word: u32) -> Option<&'static OpSpec> {
    MNEMONICS.iter().find(|spec| spec.matches(word))
}
