//! # Disassembler Tests

use mipsim_core::isa::disassemble;
use mipsim_core::sim::loader::assemble;
use pretty_assertions::assert_eq;
use rstest::rstest;

const PC: u32 = 0x0040_0000;

#[rstest]
#[case(0x0109_5020, "add $t2, $t0, $t1")]
#[case(0x2008_0005, "addi $t0, $zero, 5")]
#[case(0x2108_FFFF, "addi $t0, $t0, -1")]
#[case(0x3508_FFFF, "ori $t0, $t0, 0xffff")]
#[case(0x3C08_1001, "lui $t0, 0x1001")]
#[case(0x8FA8_0004, "lw $t0, 4($sp)")]
#[case(0xAFBF_FFFC, "sw $ra, -4($sp)")]
#[case(0x0009_4100, "sll $t0, $t1, 4")]
#[case(0x1109_0003, "beq $t0, $t1, 3")]
#[case(0x0500_FFFF, "bltz $t0, -1")]
#[case(0x0810_0000, "j 0x00400000")]
#[case(0x03E0_0008, "jr $ra")]
#[case(0x0100_F809, "jalr $ra, $t0")]
#[case(0x0000_000C, "syscall")]
#[case(0x0000_4010, "mfhi $t0")]
#[case(0x0109_0018, "mult $t0, $t1")]
#[case(0xFFFF_FFFF, "unknown")]
fn test_disassemble(#[case] word: u32, #[case] text: &str) {
    assert_eq!(disassemble(word, PC), text);
}

#[test]
fn test_disassembly_reassembles_to_same_word() {
    let words = [
        0x0109_5020,
        0x2108_FFFF,
        0x3508_FFFF,
        0x8FA8_0004,
        0xAFBF_FFFC,
        0x0009_4100,
        0x1109_0003,
        0x0810_0000,
        0x0C10_0004,
        0x0100_F809,
        0x0000_000C,
    ];
    for word in words {
        let text = disassemble(word, PC);
        let program = assemble(&text, PC).unwrap();
        assert_eq!(program.words, vec![word], "{text}");
    }
}
