//! # Instruction Execution Tests
//!
//! Drives `execute` directly with hand-built register state and a flat mock
//! bus, so every case checks one instruction's effect on `next` and memory.

use mipsim_core::common::{AddressError, Fault};
use mipsim_core::core::arch::ArchState;
use mipsim_core::core::cpu::execution::{Effect, execute};
use mipsim_core::isa::{Operand, decode, encode};
use mipsim_core::soc::MemoryBus;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::mocks::memory::MockBus;

use Operand::{Imm, Reg};

const PC: u32 = 0x0040_0000;
const BUS_BASE: u32 = 0x1000_0000;

const T0: usize = 8;
const T1: usize = 9;
const T2: usize = 10;
const V0: usize = 2;
const RA: usize = 31;

struct Rig {
    current: ArchState,
    bus: MockBus,
}

impl Rig {
    fn new() -> Self {
        Self {
            current: ArchState::new(PC),
            bus: MockBus::new(0x100, BUS_BASE),
        }
    }

    fn reg(mut self, idx: usize, val: u32) -> Self {
        self.current.gpr.write(idx, val);
        self
    }

    /// Executes one instruction and returns the effect and the built `next` state.
    fn exec(&mut self, mnemonic: &str, ops: &[Operand]) -> (Result<Effect, Fault>, ArchState) {
        let d = decode(encode(mnemonic, ops).unwrap()).unwrap();
        let before = self.current.clone();
        let mut next = self.current.clone();
        let result = execute(&self.current, &mut next, &d, &mut self.bus);
        assert_eq!(self.current, before, "current must not change");
        (result, next)
    }
}

// ══════════════════════════════════════════════════════════
// 1. Arithmetic and logic
// ══════════════════════════════════════════════════════════

#[test]
fn test_add_writes_rd_and_advances_pc() {
    let mut rig = Rig::new().reg(T0, 5).reg(T1, 7);
    let (r, next) = rig.exec("add", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!(next.gpr.read(T2), 12);
    assert_eq!(next.pc, PC + 4);
}

#[rstest]
#[case("add", 0x7FFF_FFFF, 1)]
#[case("add", 0x8000_0000, 0xFFFF_FFFF)]
#[case("sub", 0x8000_0000, 1)]
fn test_trapping_overflow_leaves_destination(
    #[case] mnemonic: &str,
    #[case] a: u32,
    #[case] b: u32,
) {
    let mut rig = Rig::new().reg(T0, a).reg(T1, b).reg(T2, 0x55);
    let (r, next) = rig.exec(mnemonic, &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(r, Ok(Effect::Report(Fault::ArithmeticOverflow { pc: PC })));
    assert_eq!(next.gpr.read(T2), 0x55);
}

#[test]
fn test_addi_overflow_reported() {
    let mut rig = Rig::new().reg(T0, 0x7FFF_FFFF);
    let (r, next) = rig.exec("addi", &[Reg(9), Reg(8), Imm(1)]);
    assert_eq!(r, Ok(Effect::Report(Fault::ArithmeticOverflow { pc: PC })));
    assert_eq!(next.gpr.read(T1), 0);
}

#[test]
fn test_unsigned_variants_wrap_silently() {
    let mut rig = Rig::new().reg(T0, 0x7FFF_FFFF).reg(T1, 1);
    let (r, next) = rig.exec("addu", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!(next.gpr.read(T2), 0x8000_0000);

    let (r, next) = rig.exec("addiu", &[Reg(10), Reg(8), Imm(1)]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!(next.gpr.read(T2), 0x8000_0000);

    let (_, next) = rig.exec("subu", &[Reg(10), Reg(0), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 0xFFFF_FFFF);
}

#[rstest]
#[case("addi", -1, 0xFFFF_FFFF)]
#[case("slti", -1, 0)]
#[case("sltiu", -1, 1)]
#[case("andi", 0xFFFF, 0x0000_FFFF)]
#[case("ori", 0x8000, 0x0000_8000)]
#[case("xori", 0xFFFF, 0x0000_FFFF)]
fn test_immediate_widening(#[case] mnemonic: &str, #[case] imm: i64, #[case] expected: u32) {
    // Source is $zero except for andi, which masks all-ones.
    let mut rig = Rig::new().reg(T1, 0xFFFF_FFFF);
    let src = if mnemonic == "andi" { 9 } else { 0 };
    let (_, next) = rig.exec(mnemonic, &[Reg(8), Reg(src), Imm(imm)]);
    assert_eq!(next.gpr.read(T0), expected);
}

#[test]
fn test_lui_places_upper_half() {
    let mut rig = Rig::new().reg(T0, 0xFFFF_FFFF);
    let (_, next) = rig.exec("lui", &[Reg(8), Imm(0x1001)]);
    assert_eq!(next.gpr.read(T0), 0x1001_0000);
}

#[test]
fn test_compare_signed_and_unsigned() {
    let mut rig = Rig::new().reg(T0, 0xFFFF_FFFF).reg(T1, 1);
    let (_, next) = rig.exec("slt", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 1);
    let (_, next) = rig.exec("sltu", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 0);
}

#[test]
fn test_logic_register_forms() {
    let mut rig = Rig::new().reg(T0, 0b1100).reg(T1, 0b1010);
    let cases = [
        ("and", 0b1000),
        ("or", 0b1110),
        ("xor", 0b0110),
        ("nor", !0b1110),
    ];
    for (mnemonic, expected) in cases {
        let (_, next) = rig.exec(mnemonic, &[Reg(10), Reg(8), Reg(9)]);
        assert_eq!(next.gpr.read(T2), expected, "{mnemonic}");
    }
}

#[test]
fn test_shifts() {
    let mut rig = Rig::new().reg(T0, 0x8000_0010).reg(T1, 36);
    let (_, next) = rig.exec("sll", &[Reg(10), Reg(8), Imm(4)]);
    assert_eq!(next.gpr.read(T2), 0x0000_0100);
    let (_, next) = rig.exec("srl", &[Reg(10), Reg(8), Imm(4)]);
    assert_eq!(next.gpr.read(T2), 0x0800_0001);
    let (_, next) = rig.exec("sra", &[Reg(10), Reg(8), Imm(4)]);
    assert_eq!(next.gpr.read(T2), 0xF800_0001);
    // Variable shifts use the low five bits of rs.
    let (_, next) = rig.exec("srav", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 0xF800_0001);
    let (_, next) = rig.exec("sllv", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 0x0000_0100);
    let (_, next) = rig.exec("srlv", &[Reg(10), Reg(8), Reg(9)]);
    assert_eq!(next.gpr.read(T2), 0x0800_0001);
}

#[test]
fn test_write_to_zero_is_discarded() {
    let mut rig = Rig::new();
    let (r, next) = rig.exec("addi", &[Reg(0), Reg(0), Imm(5)]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!(next.gpr.read(0), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Multiply, divide, HI/LO
// ══════════════════════════════════════════════════════════

#[test]
fn test_mult_and_moves() {
    let mut rig = Rig::new().reg(T0, 0xFFFF_FFFF).reg(T1, 2);
    let (_, next) = rig.exec("mult", &[Reg(8), Reg(9)]);
    assert_eq!((next.hi, next.lo), (0xFFFF_FFFF, 0xFFFF_FFFE));
    let (_, next) = rig.exec("multu", &[Reg(8), Reg(9)]);
    assert_eq!((next.hi, next.lo), (1, 0xFFFF_FFFE));

    rig.current.hi = 0xAAAA;
    rig.current.lo = 0xBBBB;
    let (_, next) = rig.exec("mfhi", &[Reg(10)]);
    assert_eq!(next.gpr.read(T2), 0xAAAA);
    let (_, next) = rig.exec("mflo", &[Reg(10)]);
    assert_eq!(next.gpr.read(T2), 0xBBBB);
    let (_, next) = rig.exec("mthi", &[Reg(9)]);
    assert_eq!(next.hi, 2);
    let (_, next) = rig.exec("mtlo", &[Reg(9)]);
    assert_eq!(next.lo, 2);
}

#[test]
fn test_div_signed_and_unsigned() {
    let mut rig = Rig::new().reg(T0, -7i32 as u32).reg(T1, 2);
    let (_, next) = rig.exec("div", &[Reg(8), Reg(9)]);
    assert_eq!((next.hi, next.lo), (-1i32 as u32, -3i32 as u32));
    let (_, next) = rig.exec("divu", &[Reg(8), Reg(9)]);
    assert_eq!((next.hi, next.lo), (1, 0x7FFF_FFFC));
}

#[test]
fn test_div_min_by_minus_one_wraps() {
    let mut rig = Rig::new().reg(T0, 0x8000_0000).reg(T1, 0xFFFF_FFFF);
    let (r, next) = rig.exec("div", &[Reg(8), Reg(9)]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!((next.hi, next.lo), (0, 0x8000_0000));
}

#[rstest]
#[case("div")]
#[case("divu")]
fn test_division_by_zero_reported(#[case] mnemonic: &str) {
    let mut rig = Rig::new().reg(T0, 10);
    rig.current.hi = 0x1111;
    rig.current.lo = 0x2222;
    let (r, next) = rig.exec(mnemonic, &[Reg(8), Reg(9)]);
    assert_eq!(r, Ok(Effect::Report(Fault::DivisionUndefined { pc: PC })));
    assert_eq!((next.hi, next.lo), (0x1111, 0x2222));
    assert_eq!(next.pc, PC + 4);
}

// ══════════════════════════════════════════════════════════
// 3. Control flow
// ══════════════════════════════════════════════════════════

#[test]
fn test_beq_taken_and_not_taken() {
    let mut rig = Rig::new().reg(T0, 3).reg(T1, 3);
    let (_, next) = rig.exec("beq", &[Reg(8), Reg(9), Imm(4)]);
    assert_eq!(next.pc, PC + 20);
    let (_, next) = rig.exec("bne", &[Reg(8), Reg(9), Imm(4)]);
    assert_eq!(next.pc, PC + 4);
}

#[test]
fn test_backward_branch() {
    let mut rig = Rig::new();
    let (_, next) = rig.exec("beq", &[Reg(0), Reg(0), Imm(-1)]);
    assert_eq!(next.pc, PC);
}

#[rstest]
#[case("bltz", 0xFFFF_FFFF, true)]
#[case("bltz", 0, false)]
#[case("bgez", 0, true)]
#[case("bgez", 0x8000_0000, false)]
#[case("blez", 0, true)]
#[case("blez", 1, false)]
#[case("bgtz", 1, true)]
#[case("bgtz", 0xFFFF_FFFF, false)]
fn test_compare_with_zero_branches(#[case] mnemonic: &str, #[case] rs: u32, #[case] taken: bool) {
    let mut rig = Rig::new().reg(T0, rs);
    let (_, next) = rig.exec(mnemonic, &[Reg(8), Imm(2)]);
    assert_eq!(next.pc, if taken { PC + 12 } else { PC + 4 });
}

#[test]
fn test_j_and_jal() {
    let mut rig = Rig::new();
    let (_, next) = rig.exec("j", &[Imm(0x10_0040)]);
    assert_eq!(next.pc, 0x0040_0100);
    assert_eq!(next.gpr.read(RA), 0);

    let (_, next) = rig.exec("jal", &[Imm(0x10_0040)]);
    assert_eq!(next.pc, 0x0040_0100);
    assert_eq!(next.gpr.read(RA), PC + 4);
}

#[test]
fn test_jump_keeps_upper_segment_bits() {
    let mut rig = Rig::new();
    rig.current.pc = 0x9000_0000;
    let (_, next) = rig.exec("j", &[Imm(1)]);
    assert_eq!(next.pc, 0x9000_0004);
}

#[test]
fn test_jr_and_jalr() {
    let mut rig = Rig::new().reg(RA, 0x0040_0080).reg(T0, 0x0040_0100);
    let (_, next) = rig.exec("jr", &[Reg(31)]);
    assert_eq!(next.pc, 0x0040_0080);

    let (_, next) = rig.exec("jalr", &[Reg(31), Reg(8)]);
    assert_eq!(next.pc, 0x0040_0100);
    assert_eq!(next.gpr.read(RA), PC + 4);
}

#[test]
fn test_jalr_same_register_uses_old_value() {
    let mut rig = Rig::new().reg(T0, 0x0040_0100);
    let (_, next) = rig.exec("jalr", &[Reg(8), Reg(8)]);
    assert_eq!(next.pc, 0x0040_0100);
    assert_eq!(next.gpr.read(T0), PC + 4);
}

// ══════════════════════════════════════════════════════════
// 4. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn test_loads_extend_correctly() {
    let mut rig = Rig::new().reg(T1, BUS_BASE);
    rig.bus.write_word(BUS_BASE, 0x8001_80FF).unwrap();

    let cases = [
        ("lw", 0, 0x8001_80FF),
        ("lb", 0, 0xFFFF_FFFF),
        ("lbu", 0, 0x0000_00FF),
        ("lb", 1, 0xFFFF_FF80),
        ("lh", 0, 0xFFFF_80FF),
        ("lhu", 0, 0x0000_80FF),
        ("lhu", 2, 0x0000_8001),
    ];
    for (mnemonic, offset, expected) in cases {
        let (r, next) = rig.exec(mnemonic, &[Reg(8), Imm(offset), Reg(9)]);
        assert_eq!(r, Ok(Effect::Normal), "{mnemonic}");
        assert_eq!(next.gpr.read(T0), expected, "{mnemonic} {offset}");
    }
}

#[test]
fn test_negative_offset_load() {
    let mut rig = Rig::new().reg(T1, BUS_BASE + 8);
    rig.bus.write_word(BUS_BASE + 4, 99).unwrap();
    let (_, next) = rig.exec("lw", &[Reg(8), Imm(-4), Reg(9)]);
    assert_eq!(next.gpr.read(T0), 99);
}

#[test]
fn test_stores_write_width() {
    let mut rig = Rig::new().reg(T0, 0x1122_3344).reg(T1, BUS_BASE);
    let _ = rig.exec("sw", &[Reg(8), Imm(0), Reg(9)]);
    let _ = rig.exec("sh", &[Reg(8), Imm(4), Reg(9)]);
    let _ = rig.exec("sb", &[Reg(8), Imm(8), Reg(9)]);

    assert_eq!(rig.bus.read_word(BUS_BASE), Ok(0x1122_3344));
    assert_eq!(rig.bus.read_word(BUS_BASE + 4), Ok(0x0000_3344));
    assert_eq!(rig.bus.read_word(BUS_BASE + 8), Ok(0x0000_0044));
    assert_eq!(
        rig.bus.writes,
        vec![(BUS_BASE, 4), (BUS_BASE + 4, 2), (BUS_BASE + 8, 1)]
    );
}

#[test]
fn test_misaligned_word_load_faults() {
    let mut rig = Rig::new().reg(T1, BUS_BASE + 2);
    let (r, _) = rig.exec("lw", &[Reg(8), Imm(0), Reg(9)]);
    assert_eq!(
        r,
        Err(Fault::Address {
            pc: PC,
            source: AddressError::Misaligned {
                addr: BUS_BASE + 2,
                width: 4
            },
        })
    );
}

#[test]
fn test_faulting_store_writes_nothing() {
    let mut rig = Rig::new().reg(T0, 0xFF).reg(T1, BUS_BASE);
    rig.bus.inject_fault(BUS_BASE + 0x10);
    let (r, _) = rig.exec("sw", &[Reg(8), Imm(0x10), Reg(9)]);
    assert_eq!(
        r,
        Err(Fault::Address {
            pc: PC,
            source: AddressError::Unmapped(BUS_BASE + 0x10),
        })
    );
    assert!(rig.bus.writes.is_empty());
}

#[test]
fn test_unmapped_load_faults() {
    let mut rig = Rig::new();
    let (r, _) = rig.exec("lw", &[Reg(8), Imm(0), Reg(0)]);
    assert_eq!(
        r,
        Err(Fault::Address {
            pc: PC,
            source: AddressError::Unmapped(0),
        })
    );
}

// ══════════════════════════════════════════════════════════
// 5. System
// ══════════════════════════════════════════════════════════

#[test]
fn test_syscall_exit_service() {
    let mut rig = Rig::new().reg(V0, 10);
    let (r, _) = rig.exec("syscall", &[]);
    assert_eq!(r, Ok(Effect::Exit));
}

#[test]
fn test_other_syscall_services_are_no_ops() {
    let mut rig = Rig::new().reg(V0, 1).reg(T0, 7);
    let (r, next) = rig.exec("syscall", &[]);
    assert_eq!(r, Ok(Effect::Normal));
    assert_eq!(next.pc, PC + 4);
    assert_eq!(next.gpr, rig.current.gpr);
}
