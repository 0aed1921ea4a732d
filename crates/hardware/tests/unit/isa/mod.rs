//! Instruction set tests.


/// Encoding of every mnemonic and the encode/decode inverse property.
pub mod codec_roundtrip;


/// Disassembler output.
pub mod disasm;
