//! Assembler and simulator API tests.
