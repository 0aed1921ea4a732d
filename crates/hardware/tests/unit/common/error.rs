//! # Error Tests
//!
//! Display formatting, fault classification and codec-to-load error mapping.

use mipsim_core::common::{AddressError, CodecError, Fault, LoadError};
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// 1. Display
// ══════════════════════════════════════════════════════════

#[test]
fn test_address_error_display() {
    assert_eq!(
        AddressError::Unmapped(0x1234).to_string(),
        "unmapped address 0x00001234"
    );
    assert_eq!(
        AddressError::Misaligned {
            addr: 0x0040_0002,
            width: 4
        }
        .to_string(),
        "misaligned 4-byte access at 0x00400002"
    );
}

#[test]
fn test_fault_display_includes_pc() {
    let fault = Fault::ArithmeticOverflow { pc: 0x0040_0008 };
    assert_eq!(fault.to_string(), "arithmetic overflow at 0x00400008");

    let fault = Fault::Address {
        pc: 0x0040_0000,
        source: AddressError::Unmapped(0),
    };
    assert_eq!(
        fault.to_string(),
        "address error at pc 0x00400000: unmapped address 0x00000000"
    );
}

#[test]
fn test_load_error_display_has_line() {
    let err = LoadError::UndefinedLabel {
        line: 7,
        label: "done".into(),
    };
    assert_eq!(err.to_string(), "line 7: undefined label `done`");
}

// ══════════════════════════════════════════════════════════
// 2. Classification
// ══════════════════════════════════════════════════════════

#[test]
fn test_fault_pc_and_fatality() {
    let illegal = Fault::IllegalInstruction {
        addr: 0x10,
        word: 0xFFFF_FFFF,
    };
    assert_eq!(illegal.pc(), 0x10);
    assert!(illegal.is_fatal());

    let div = Fault::DivisionUndefined { pc: 0x20 };
    assert_eq!(div.pc(), 0x20);
    assert!(!div.is_fatal());

    assert!(!Fault::ArithmeticOverflow { pc: 0 }.is_fatal());
    assert!(
        Fault::Address {
            pc: 0,
            source: AddressError::Unmapped(4)
        }
        .is_fatal()
    );
}

// ══════════════════════════════════════════════════════════
// 3. Codec to load error mapping
// ══════════════════════════════════════════════════════════

#[test]
fn test_from_codec_preserves_kind_and_line() {
    assert_eq!(
        LoadError::from_codec(3, CodecError::UnknownRegister("$t10".into())),
        LoadError::UnknownRegister {
            line: 3,
            name: "$t10".into()
        }
    );
    assert_eq!(
        LoadError::from_codec(
            4,
            CodecError::ImmediateOutOfRange {
                value: 70000,
                min: -32768,
                max: 32767
            }
        ),
        LoadError::ImmediateOutOfRange {
            line: 4,
            value: 70000,
            min: -32768,
            max: 32767
        }
    );
    assert!(matches!(
        LoadError::from_codec(
            5,
            CodecError::OperandMismatch {
                mnemonic: "add",
                expected: "operands `rd, rs, rt`"
            }
        ),
        LoadError::Parse { line: 5, .. }
    ));
}
