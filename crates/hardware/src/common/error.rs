//! Fault and error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Address errors:** Unmapped and misaligned accesses raised by the memory subsystem.
//! 2. **Codec errors:** Failures to encode an instruction or decode a word.
//! 3. **Faults:** Execution-time conditions reported by the engine for a single cycle.
//! 4. **Load and configuration errors:** Failures of the assembler and of simulator construction.
//!
//! None of these are panics. Every core operation returns one of them explicitly.

use thiserror::Error;

/// Memory access failure raised by the memory subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    /// No configured region contains the address.
    #[error("unmapped address {0:#010x}")]
    Unmapped(u32),

    /// A word access at an address that is not 4-byte aligned.
    #[error("misaligned {width}-byte access at {addr:#010x}")]
    Misaligned {
        /// The offending address.
        addr: u32,
        /// Access width in bytes.
        width: u32,
    },
}

/// Failure of the instruction codec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The mnemonic is not in the instruction table.
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    /// A register operand does not name one of the 32 GPRs.
    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    /// An immediate does not fit the field it is encoded into.
    #[error("immediate {value} out of range [{min}, {max}]")]
    ImmediateOutOfRange {
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The operand list does not match the instruction's syntax.
    #[error("`{mnemonic}` expects {expected}")]
    OperandMismatch {
        /// Mnemonic being encoded.
        mnemonic: &'static str,
        /// Human-readable operand syntax.
        expected: &'static str,
    },

    /// The word does not decode to any supported instruction.
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),
}

/// Execution fault reported for a single cycle.
///
/// Faults are either fatal (the run condition is cleared and the cycle is not
/// committed) or reported (the cycle commits and the run continues). Which
/// applies is decided by the simulator; see [`Fault::is_fatal`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The fetched word does not decode.
    #[error("illegal instruction {word:#010x} at {addr:#010x}")]
    IllegalInstruction {
        /// Address the word was fetched from.
        addr: u32,
        /// The raw word.
        word: u32,
    },

    /// A fetch, load or store failed in the memory subsystem.
    #[error("address error at pc {pc:#010x}: {source}")]
    Address {
        /// PC of the instruction performing the access.
        pc: u32,
        /// The underlying memory failure.
        #[source]
        source: AddressError,
    },

    /// Signed overflow in `add`, `sub` or `addi`. The destination is left unmodified.
    #[error("arithmetic overflow at {pc:#010x}")]
    ArithmeticOverflow {
        /// PC of the trapping instruction.
        pc: u32,
    },

    /// `div`/`divu` by zero. HI and LO are architecturally undefined afterwards.
    #[error("division by zero at {pc:#010x}, HI/LO undefined")]
    DivisionUndefined {
        /// PC of the dividing instruction.
        pc: u32,
    },
}

impl Fault {
    /// Returns the PC of the instruction that raised the fault.
    pub const fn pc(&self) -> u32 {
        match self {
            Self::IllegalInstruction { addr, .. } => *addr,
            Self::Address { pc, .. }
            | Self::ArithmeticOverflow { pc }
            | Self::DivisionUndefined { pc } => *pc,
        }
    }

    /// Returns `true` for faults that always stop the simulator.
    ///
    /// Overflow is fatal only under [`OverflowPolicy::Fatal`](crate::config::OverflowPolicy),
    /// which the simulator decides; this reports the policy-independent answer.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::IllegalInstruction { .. } | Self::Address { .. })
    }
}

/// Failure to assemble or load a program. Lines are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Malformed syntax.
    #[error("line {line}: {reason}")]
    Parse {
        /// Source line.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// The mnemonic is not supported.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// The rejected mnemonic.
        mnemonic: String,
    },

    /// A register name did not resolve.
    #[error("line {line}: unknown register `{name}`")]
    UnknownRegister {
        /// Source line.
        line: usize,
        /// The rejected register name.
        name: String,
    },

    /// A label reference has no definition.
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel {
        /// Source line.
        line: usize,
        /// The missing label.
        label: String,
    },

    /// An immediate, offset or target does not fit its field.
    #[error("line {line}: immediate {value} out of range [{min}, {max}]")]
    ImmediateOutOfRange {
        /// Source line.
        line: usize,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The assembled program does not fit in the text region.
    #[error("program of {words} words does not fit in the text region ({capacity} words)")]
    ProgramTooLarge {
        /// Assembled size in words.
        words: usize,
        /// Text region capacity in words.
        capacity: usize,
    },

    /// The assembled program could not be written to memory.
    #[error("program could not be written: {0}")]
    Address(#[from] AddressError),
}

impl LoadError {
    /// Attaches a source line to a codec failure.
    pub fn from_codec(line: usize, err: CodecError) -> Self {
        match err {
            CodecError::UnknownMnemonic(mnemonic) => Self::UnknownMnemonic { line, mnemonic },
            CodecError::UnknownRegister(name) => Self::UnknownRegister { line, name },
            CodecError::ImmediateOutOfRange { value, min, max } => Self::ImmediateOutOfRange {
                line,
                value,
                min,
                max,
            },
            other => Self::Parse {
                line,
                reason: other.to_string(),
            },
        }
    }
}

/// Invalid simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// No memory regions were configured.
    #[error("no memory regions configured")]
    NoRegions,

    /// A region has zero size or extends past the 32-bit address space.
    #[error("region `{name}` has an invalid extent")]
    InvalidRegion {
        /// Region name.
        name: String,
    },

    /// Two regions share addresses.
    #[error("regions `{first}` and `{second}` overlap")]
    Overlap {
        /// Lower region.
        first: String,
        /// Upper region.
        second: String,
    },

    /// The configured text region does not exist.
    #[error("text region `{0}` is not configured")]
    MissingTextRegion(String),

    /// The text region does not start on a word boundary.
    #[error("text region `{name}` base {base:#010x} is not word-aligned")]
    MisalignedTextRegion {
        /// Region name.
        name: String,
        /// The rejected base address.
        base: u32,
    },
}
