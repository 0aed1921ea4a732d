//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the MIPS32 opcodes, function codes, the mnemonic table and the
//! codec built on it.
//!
//! # Layout
//!
//! * `table`: the single source of truth mapping mnemonics to encodings.
//! * `encode` / `decode`: the two directions of the codec, both driven by `table`.
//! * `disasm`: renders words back to assembly text.
//! * `abi`: register names and register operand resolution.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Strict instruction decoder.
pub mod decode;

/// Instruction disassembler for debug tracing and listings.
pub mod disasm;

/// Mnemonic and operand encoder.
pub mod encode;

/// Secondary function codes (`SPECIAL` funct and `REGIMM` rt selectors).
pub mod funct;

/// Instruction field extraction and the decoded instruction record.
pub mod instruction;

/// Major opcodes.
pub mod opcodes;

/// The static mnemonic table.
pub mod table;

pub use decode::{Decoded, decode};
pub use disasm::disassemble;
pub use encode::{Operand, encode};
pub use instruction::{Format, Instruction, InstructionBits};
pub use table::{Op, OpClass};
