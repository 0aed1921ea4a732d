//! Instruction Execution.
//!
//! This module implements the state-transition function of the engine. It performs the following:
//! 1. **Operand Read:** Reads every source from the `current` snapshot only.
//! 2. **Dispatch:** Executes the decoded operation, writing results into `next`.
//! 3. **Control Flow:** Computes `next.pc` (sequential, branch or jump).
//! 4. **Fault Reporting:** Propagates memory faults and reports overflow and
//!    division by zero without touching the destination.
//!
//! Stores are the only side effect outside `next`. A store is the last thing an
//! instruction does, so a faulting instruction never leaves memory half-written.

use tracing::debug;

use crate::common::constants::{JUMP_SEGMENT_MASK, SYSCALL_EXIT};
use crate::common::{Fault, WORD_BYTES};
use crate::core::arch::ArchState;
use crate::core::cpu::memory;
use crate::core::units::alu::{Alu, AluOp, arithmetic};
use crate::isa::abi::{REG_RA, REG_V0};
use crate::isa::{Decoded, Op};
use crate::soc::traits::MemoryBus;

/// Outcome of an instruction that completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Normal completion.
    Normal,
    /// `syscall` exit service: the program has finished.
    Exit,
    /// Completed with a reported fault; the faulting result was not written.
    ///
    /// Arithmetic overflow is returned this way too. Whether it is fatal is
    /// decided by the caller's overflow policy.
    Report(Fault),
}

/// Computes the target of a taken branch: `pc + 4 + (offset << 2)`.
#[inline]
const fn branch_target(pc: u32, offset: u32) -> u32 {
    pc.wrapping_add(WORD_BYTES).wrapping_add(offset << 2)
}

/// Computes the target of `j`/`jal`: `(pc + 4)[31:28] | target << 2`.
#[inline]
const fn jump_target(pc: u32, target: u32) -> u32 {
    (pc.wrapping_add(WORD_BYTES) & JUMP_SEGMENT_MASK) | (target << 2)
}

/// Executes one decoded instruction.
///
/// `next` must hold a copy of `current` on entry. On `Err` the caller must
/// discard `next`.
///
/// # Arguments
///
/// * `current` - State at the start of the cycle; never modified.
/// * `next` - State being built for the end of the cycle.
/// * `d` - The decoded instruction fetched from `current.pc`.
/// * `bus` - Memory for loads and stores.
///
/// # Errors
///
/// Returns [`Fault::Address`] if a load or store fails.
pub fn execute<B: MemoryBus + ?Sized>(
    current: &ArchState,
    next: &mut ArchState,
    d: &Decoded,
    bus: &mut B,
) -> Result<Effect, Fault> {
    let pc = current.pc;
    let rs = current.gpr.read(d.rs());
    let rt = current.gpr.read(d.rt());
    let imm = d.imm();
    let link = pc.wrapping_add(WORD_BYTES);

    next.pc = link;

    match d.op() {
        // ── Shifts ──────────────────────────────────────────
        Op::Sll => next.gpr.write(d.rd(), Alu::execute(AluOp::Sll, rt, d.shamt())),
        Op::Srl => next.gpr.write(d.rd(), Alu::execute(AluOp::Srl, rt, d.shamt())),
        Op::Sra => next.gpr.write(d.rd(), Alu::execute(AluOp::Sra, rt, d.shamt())),
        Op::Sllv => next.gpr.write(d.rd(), Alu::execute(AluOp::Sll, rt, rs)),
        Op::Srlv => next.gpr.write(d.rd(), Alu::execute(AluOp::Srl, rt, rs)),
        Op::Srav => next.gpr.write(d.rd(), Alu::execute(AluOp::Sra, rt, rs)),

        // ── Register jumps ──────────────────────────────────
        Op::Jr => next.pc = rs,
        Op::Jalr => {
            next.pc = rs;
            next.gpr.write(d.rd(), link);
        }

        Op::Syscall => {
            let service = current.gpr.read(REG_V0);
            if service == SYSCALL_EXIT {
                return Ok(Effect::Exit);
            }
            debug!(pc = %format_args!("{pc:#010x}"), service, "syscall service not modeled");
        }

        // ── HI/LO ───────────────────────────────────────────
        Op::Mfhi => next.gpr.write(d.rd(), current.hi),
        Op::Mthi => next.hi = rs,
        Op::Mflo => next.gpr.write(d.rd(), current.lo),
        Op::Mtlo => next.lo = rs,
        Op::Mult => (next.hi, next.lo) = arithmetic::mult(rs, rt),
        Op::Multu => (next.hi, next.lo) = arithmetic::multu(rs, rt),
        Op::Div | Op::Divu => {
            let quotient = if d.op() == Op::Div {
                arithmetic::div(rs, rt)
            } else {
                arithmetic::divu(rs, rt)
            };
            match quotient {
                Some((hi, lo)) => (next.hi, next.lo) = (hi, lo),
                None => return Ok(Effect::Report(Fault::DivisionUndefined { pc })),
            }
        }

        // ── Register arithmetic and logic ───────────────────
        Op::Add => match arithmetic::checked_add(rs, rt) {
            Some(v) => next.gpr.write(d.rd(), v),
            None => return Ok(Effect::Report(Fault::ArithmeticOverflow { pc })),
        },
        Op::Sub => match arithmetic::checked_sub(rs, rt) {
            Some(v) => next.gpr.write(d.rd(), v),
            None => return Ok(Effect::Report(Fault::ArithmeticOverflow { pc })),
        },
        Op::Addu => next.gpr.write(d.rd(), Alu::execute(AluOp::Add, rs, rt)),
        Op::Subu => next.gpr.write(d.rd(), Alu::execute(AluOp::Sub, rs, rt)),
        Op::And => next.gpr.write(d.rd(), Alu::execute(AluOp::And, rs, rt)),
        Op::Or => next.gpr.write(d.rd(), Alu::execute(AluOp::Or, rs, rt)),
        Op::Xor => next.gpr.write(d.rd(), Alu::execute(AluOp::Xor, rs, rt)),
        Op::Nor => next.gpr.write(d.rd(), Alu::execute(AluOp::Nor, rs, rt)),
        Op::Slt => next.gpr.write(d.rd(), Alu::execute(AluOp::Slt, rs, rt)),
        Op::Sltu => next.gpr.write(d.rd(), Alu::execute(AluOp::Sltu, rs, rt)),

        // ── Branches ────────────────────────────────────────
        Op::Beq | Op::Bne | Op::Blez | Op::Bgtz | Op::Bltz | Op::Bgez => {
            let taken = match d.op() {
                Op::Beq => rs == rt,
                Op::Bne => rs != rt,
                Op::Blez => (rs as i32) <= 0,
                Op::Bgtz => (rs as i32) > 0,
                Op::Bltz => (rs as i32) < 0,
                _ => (rs as i32) >= 0,
            };
            if taken {
                next.pc = branch_target(pc, imm);
            }
        }

        // ── Jumps ───────────────────────────────────────────
        Op::J => next.pc = jump_target(pc, d.target()),
        Op::Jal => {
            next.pc = jump_target(pc, d.target());
            next.gpr.write(REG_RA, link);
        }

        // ── Immediate arithmetic and logic ──────────────────
        Op::Addi => match arithmetic::checked_add(rs, imm) {
            Some(v) => next.gpr.write(d.rt(), v),
            None => return Ok(Effect::Report(Fault::ArithmeticOverflow { pc })),
        },
        Op::Addiu => next.gpr.write(d.rt(), Alu::execute(AluOp::Add, rs, imm)),
        Op::Slti => next.gpr.write(d.rt(), Alu::execute(AluOp::Slt, rs, imm)),
        Op::Sltiu => next.gpr.write(d.rt(), Alu::execute(AluOp::Sltu, rs, imm)),
        Op::Andi => next.gpr.write(d.rt(), Alu::execute(AluOp::And, rs, imm)),
        Op::Ori => next.gpr.write(d.rt(), Alu::execute(AluOp::Or, rs, imm)),
        Op::Xori => next.gpr.write(d.rt(), Alu::execute(AluOp::Xor, rs, imm)),
        Op::Lui => next.gpr.write(d.rt(), imm << 16),

        // ── Memory ──────────────────────────────────────────
        Op::Lb | Op::Lh | Op::Lw | Op::Lbu | Op::Lhu => {
            let addr = rs.wrapping_add(imm);
            let val = memory::load(bus, d.op(), addr).map_err(|source| Fault::Address { pc, source })?;
            next.gpr.write(d.rt(), val);
        }
        Op::Sb | Op::Sh | Op::Sw => {
            let addr = rs.wrapping_add(imm);
            memory::store(bus, d.op(), addr, rt).map_err(|source| Fault::Address { pc, source })?;
        }
    }

    Ok(Effect::Normal)
}
