//! # Codec Round-Trip Tests
//!
//! Known encodings, encoder error reporting, and the inverse property:
//! every word that decodes re-encodes to itself.

use mipsim_core::common::CodecError;
use mipsim_core::isa::table::{Field, ImmKind, MNEMONICS};
use mipsim_core::isa::{Operand, decode, encode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use Operand::{Imm, Reg};

// ══════════════════════════════════════════════════════════
// 1. Known encodings
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("add", &[Reg(10), Reg(8), Reg(9)], 0x0109_5020)]
#[case("addi", &[Reg(8), Reg(0), Imm(5)], 0x2008_0005)]
#[case("lw", &[Reg(8), Imm(4), Reg(29)], 0x8FA8_0004)]
#[case("sw", &[Reg(31), Imm(-4), Reg(29)], 0xAFBF_FFFC)]
#[case("j", &[Imm(0x10_0000)], 0x0810_0000)]
#[case("jal", &[Imm(0x10_0000)], 0x0C10_0000)]
#[case("beq", &[Reg(8), Reg(9), Imm(3)], 0x1109_0003)]
#[case("bltz", &[Reg(8), Imm(-1)], 0x0500_FFFF)]
#[case("bgez", &[Reg(8), Imm(-1)], 0x0501_FFFF)]
#[case("lui", &[Reg(8), Imm(0x1001)], 0x3C08_1001)]
#[case("ori", &[Reg(8), Reg(8), Imm(0xFFFF)], 0x3508_FFFF)]
#[case("sll", &[Reg(8), Reg(9), Imm(4)], 0x0009_4100)]
#[case("syscall", &[], 0x0000_000C)]
#[case("jr", &[Reg(31)], 0x03E0_0008)]
#[case("jalr", &[Reg(31), Reg(8)], 0x0100_F809)]
#[case("mult", &[Reg(8), Reg(9)], 0x0109_0018)]
#[case("mfhi", &[Reg(8)], 0x0000_4010)]
fn test_known_encodings(#[case] mnemonic: &str, #[case] ops: &[Operand], #[case] word: u32) {
    assert_eq!(encode(mnemonic, ops), Ok(word), "{mnemonic}");
    let d = decode(word).unwrap();
    assert_eq!(d.mnemonic(), mnemonic);
    assert_eq!(d.operands(), ops);
}

#[test]
fn test_mnemonic_lookup_is_case_insensitive() {
    assert_eq!(
        encode("ADDI", &[Reg(8), Reg(0), Imm(5)]),
        encode("addi", &[Reg(8), Reg(0), Imm(5)])
    );
}

// ══════════════════════════════════════════════════════════
// 2. Encoder errors
// ══════════════════════════════════════════════════════════

#[test]
fn test_unknown_mnemonic() {
    assert_eq!(
        encode("mul", &[Reg(1), Reg(2), Reg(3)]),
        Err(CodecError::UnknownMnemonic("mul".into()))
    );
}

#[test]
fn test_operand_count_and_kind_mismatch() {
    assert!(matches!(
        encode("add", &[Reg(1), Reg(2)]),
        Err(CodecError::OperandMismatch {
            mnemonic: "add",
            ..
        })
    ));
    assert!(matches!(
        encode("add", &[Reg(1), Reg(2), Imm(3)]),
        Err(CodecError::OperandMismatch { .. })
    ));
    assert!(matches!(
        encode("addi", &[Reg(1), Imm(2), Imm(3)]),
        Err(CodecError::OperandMismatch { .. })
    ));
}

#[test]
fn test_register_above_31_rejected() {
    assert_eq!(
        encode("jr", &[Reg(32)]),
        Err(CodecError::UnknownRegister("$32".into()))
    );
}

#[rstest]
#[case("addi", &[Reg(8), Reg(0), Imm(32768)], 32768, -32768, 32767)]
#[case("addi", &[Reg(8), Reg(0), Imm(-32769)], -32769, -32768, 32767)]
#[case("ori", &[Reg(8), Reg(0), Imm(-1)], -1, 0, 65535)]
#[case("ori", &[Reg(8), Reg(0), Imm(65536)], 65536, 0, 65535)]
#[case("sll", &[Reg(8), Reg(8), Imm(32)], 32, 0, 31)]
#[case("j", &[Imm(0x0400_0000)], 0x0400_0000, 0, 0x03FF_FFFF)]
fn test_immediate_out_of_range(
    #[case] mnemonic: &str,
    #[case] ops: &[Operand],
    #[case] value: i64,
    #[case] min: i64,
    #[case] max: i64,
) {
    assert_eq!(
        encode(mnemonic, ops),
        Err(CodecError::ImmediateOutOfRange { value, min, max })
    );
}

#[test]
fn test_immediate_range_boundaries_accepted() {
    assert!(encode("addi", &[Reg(8), Reg(0), Imm(-32768)]).is_ok());
    assert!(encode("addi", &[Reg(8), Reg(0), Imm(32767)]).is_ok());
    assert!(encode("andi", &[Reg(8), Reg(0), Imm(0)]).is_ok());
    assert!(encode("andi", &[Reg(8), Reg(0), Imm(65535)]).is_ok());
    assert!(encode("sra", &[Reg(8), Reg(8), Imm(31)]).is_ok());
}

// ══════════════════════════════════════════════════════════
// 3. Round-trip properties
// ══════════════════════════════════════════════════════════

/// Builds an operand for `field` of the given entry from raw random material.
fn operand_for(imm: ImmKind, field: Field, reg: u8, raw: u32) -> Operand {
    match field {
        Field::Rs | Field::Rt | Field::Rd => Reg(reg % 32),
        Field::Shamt => Imm(i64::from(raw % 32)),
        Field::Target => Imm(i64::from(raw & 0x03FF_FFFF)),
        Field::Imm => match imm {
            ImmKind::Signed => Imm(i64::from(raw as u16 as i16)),
            ImmKind::Unsigned => Imm(i64::from(raw as u16)),
        },
    }
}

#[test]
fn test_every_mnemonic_round_trips() {
    for spec in MNEMONICS {
        let ops: Vec<Operand> = spec
            .syntax
            .fields()
            .iter()
            .enumerate()
            .map(|(i, &f)| operand_for(spec.imm, f, 5 + i as u8, 0x0123_8765))
            .collect();
        let word = encode(spec.mnemonic, &ops).unwrap();
        let d = decode(word).unwrap();
        assert_eq!(d.mnemonic(), spec.mnemonic);
        assert_eq!(d.operands(), ops, "{}", spec.mnemonic);
    }
}

proptest! {
    #[test]
    fn prop_encode_then_decode(
        idx in 0..MNEMONICS.len(),
        regs in any::<[u8; 3]>(),
        raw in any::<u32>(),
    ) {
        let spec = &MNEMONICS[idx];
        let ops: Vec<Operand> = spec
            .syntax
            .fields()
            .iter()
            .enumerate()
            .map(|(i, &f)| operand_for(spec.imm, f, regs[i % 3], raw))
            .collect();
        let word = encode(spec.mnemonic, &ops).unwrap();
        let d = decode(word).unwrap();
        prop_assert_eq!(d.mnemonic(), spec.mnemonic);
        prop_assert_eq!(d.operands(), ops);
    }

    #[test]
    fn prop_decodable_words_reencode_exactly(word in any::<u32>()) {
        if let Ok(d) = decode(word) {
            prop_assert_eq!(encode(d.mnemonic(), &d.operands()), Ok(word));
        }
    }
}
