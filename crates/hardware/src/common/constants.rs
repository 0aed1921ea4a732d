//! Global System Constants.
//!
//! This module defines simulator-wide constants. It includes:
//! 1. **Instruction Constants:** Word size and the halt sentinel.
//! 2. **Register Constants:** Register counts and architectural register indices.
//! 3. **Service Constants:** `syscall` service numbers understood by the engine.

/// Size of one instruction word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Number of general-purpose registers.
pub const NUM_GPRS: usize = 32;

/// Word that stops the simulator when fetched.
///
/// Zeroed memory past the end of a program decodes to this, so running off the
/// end of the text halts instead of faulting. It is also the encoding of
/// `sll $zero, $zero, 0`.
pub const HALT_SENTINEL: u32 = 0x0000_0000;

/// `syscall` service number (in `$v0`) that terminates the program.
pub const SYSCALL_EXIT: u32 = 10;

/// Mask selecting the 256 MiB segment a `j`/`jal` target stays within.
pub const JUMP_SEGMENT_MASK: u32 = 0xF000_0000;
