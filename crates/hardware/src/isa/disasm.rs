//! Instruction Disassembler for MIPS32.
//!
//! Converts a 32-bit instruction word into assembly text for debug tracing,
//! program listings and test diagnostics. The output uses ABI register names
//! and is accepted back by the loader, re-assembling to the same word when
//! placed at the same address.
//!
//! # Usage
//!
//! ```
//! use mipsim_core::isa::disasm::disassemble;
//! let text = disassemble(0x2008_0005, 0x0040_0000); // addi $t0, $zero, 5
//! assert_eq!(text, "addi $t0, $zero, 5");
//! ```

use crate::common::constants::JUMP_SEGMENT_MASK;
use crate::common::WORD_BYTES;
use crate::isa::abi::reg_name;
use crate::isa::decode::decode;
use crate::isa::table::{ImmKind, Syntax};

/// Disassembles `word` as if fetched from `pc`.
///
/// `pc` only matters for `j`/`jal`, whose absolute target is rendered. Words
/// that do not decode render as `"unknown"`.
///
/// # Arguments
///
/// * `word` - The raw 32-bit instruction encoding.
/// * `pc` - Address the word is fetched from.
pub fn disassemble(word: u32, pc: u32) -> String {
    let Ok(d) = decode(word) else {
        return "unknown".to_string();
    };
    let m = d.mnemonic();
    let rs = reg_name(d.rs());
    let rt = reg_name(d.rt());
    let rd = reg_name(d.rd());
    let imm = match d.spec.imm {
        ImmKind::Signed => format!("{}", d.imm() as i32),
        ImmKind::Unsigned => format!("{:#x}", d.imm()),
    };

    match d.spec.syntax {
        Syntax::RdRsRt => format!("{m} ${rd}, ${rs}, ${rt}"),
        Syntax::RdRtShamt => format!("{m} ${rd}, ${rt}, {}", d.shamt()),
        Syntax::RdRtRs => format!("{m} ${rd}, ${rt}, ${rs}"),
        Syntax::RsRt => format!("{m} ${rs}, ${rt}"),
        Syntax::Rd => format!("{m} ${rd}"),
        Syntax::Rs => format!("{m} ${rs}"),
        Syntax::RdRs => format!("{m} ${rd}, ${rs}"),
        Syntax::Bare => m.to_string(),
        Syntax::RtRsImm => format!("{m} ${rt}, ${rs}, {imm}"),
        Syntax::RtImm => format!("{m} ${rt}, {imm}"),
        Syntax::RtOffsetBase => format!("{m} ${rt}, {imm}(${rs})"),
        Syntax::RsRtOffset => format!("{m} ${rs}, ${rt}, {imm}"),
        Syntax::RsOffset => format!("{m} ${rs}, {imm}"),
        Syntax::Target => {
            let segment = pc.wrapping_add(WORD_BYTES) & JUMP_SEGMENT_MASK;
            format!("{m} {:#010x}", segment | (d.target() << 2))
        }
    }
}
