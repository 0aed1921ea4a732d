//! MIPS32 Instruction Encoder.
//!
//! Packs a mnemonic and its operand list into a 32-bit word by looking the
//! mnemonic up in the [mnemonic table](crate::isa::table) and placing each
//! operand into the field its syntax names.

use std::fmt;

use crate::common::CodecError;
use crate::isa::table::{self, Field, OpSpec};

/// One resolved assembly operand.
///
/// Registers are already resolved to indices; labels are already converted to
/// the number the target field expects (word offset for branches, word index
/// for jumps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Register index. Values above 31 are rejected by the encoder.
    Reg(u8),
    /// Immediate, shift amount, branch offset or jump target.
    Imm(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg(r) => write!(f, "${r}"),
            Self::Imm(v) => write!(f, "{v}"),
        }
    }
}

/// Encodes `mnemonic` with `operands` into an instruction word.
///
/// Operands are given in source order, see [`Syntax::fields`](table::Syntax::fields).
///
/// # Errors
///
/// * [`CodecError::UnknownMnemonic`] if the mnemonic is not supported.
/// * [`CodecError::OperandMismatch`] if the count or kind of operands is wrong.
/// * [`CodecError::UnknownRegister`] for a register index above 31.
/// * [`CodecError::ImmediateOutOfRange`] if a value does not fit its field.
pub fn encode(mnemonic: &str, operands: &[Operand]) -> Result<u32, CodecError> {
    let spec = table::lookup(mnemonic)
        .ok_or_else(|| CodecError::UnknownMnemonic(mnemonic.to_string()))?;
    encode_spec(spec, operands)
}

/// Encodes operands against an already resolved table entry.
pub fn encode_spec(spec: &OpSpec, operands: &[Operand]) -> Result<u32, CodecError> {
    let fields = spec.syntax.fields();
    let mismatch = || CodecError::OperandMismatch {
        mnemonic: spec.mnemonic,
        expected: spec.syntax.describe(),
    };
    if fields.len() != operands.len() {
        return Err(mismatch());
    }

    let mut word = spec.fixed_bits();
    for (&field, &operand) in fields.iter().zip(operands) {
        let raw = match (field.is_register(), operand) {
            (true, Operand::Reg(r)) => {
                if u32::from(r) > Field::Rs.mask() {
                    return Err(CodecError::UnknownRegister(format!("${r}")));
                }
                u32::from(r)
            }
            (false, Operand::Imm(value)) => {
                let (min, max) = spec.range(field);
                if value < min || value > max {
                    return Err(CodecError::ImmediateOutOfRange { value, min, max });
                }
                // Two's complement truncation to the field width.
                (value as u32) & field.mask()
            }
            _ => return Err(mismatch()),
        };
        word |= raw << field.shift();
    }
    Ok(word)
}
