//! Simulator: owns the CPU and the memory side-by-side.
//!
//! This is the API surface drivers use. It provides:
//! 1. **Loading:** Assembles a program and installs it in the text region.
//! 2. **Running:** Single steps, bounded runs and runs to completion, all
//!    honouring the run condition and an external interrupt flag.
//! 3. **Inspection:** Register, HI/LO and memory access plus structured dumps.
//! 4. **Reset:** Zeroes memory and registers and reinstalls the last program.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use crate::common::{
    AddressError, CodecError, ConfigError, Fault, HALT_SENTINEL, LoadError, NUM_GPRS,
};
use crate::config::Config;
use crate::core::{CycleOutcome, Cpu};
use crate::isa::disassemble;
use crate::sim::loader::{Program, assemble};
use crate::soc::Memory;
use crate::stats::SimStats;

/// Run condition of the simulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Cycles will execute.
    Running,
    /// The program finished.
    Halted,
    /// A fatal fault stopped execution.
    Faulted(Fault),
}

/// Why a run stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RunStop {
    /// The requested number of cycles was executed.
    CycleLimit,
    /// The program finished.
    Halted,
    /// A fatal fault stopped execution.
    Faulted(#[serde(serialize_with = "serialize_display")] Fault),
    /// The interrupt flag was raised.
    Interrupted,
}

fn serialize_display<S: serde::Serializer>(fault: &Fault, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(fault)
}

/// Summary of a `run_n` or `run_to_completion` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Cycles committed during this call.
    pub cycles: u64,
    /// Why the run stopped.
    pub stop: RunStop,
    /// Non-fatal faults reported by committed cycles, in order.
    pub reported: Vec<Fault>,
}

/// Snapshot of the architectural registers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterDump {
    /// Program counter.
    pub pc: u32,
    /// `$0` to `$31`.
    pub gpr: [u32; NUM_GPRS],
    /// HI register.
    pub hi: u32,
    /// LO register.
    pub lo: u32,
    /// Committed cycles since the last reset.
    pub cycles: u64,
}

/// One line of the loaded program listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    /// Address of the word.
    pub addr: u32,
    /// Encoded word.
    pub word: u32,
    /// Source line the word was assembled from.
    pub line: usize,
    /// Disassembly.
    pub text: String,
}

/// Top-level simulator: CPU state, memory and run condition.
///
/// Instances share nothing, so independent simulators may run on separate threads.
#[derive(Debug)]
pub struct Simulator {
    cpu: Cpu,
    memory: Memory,
    program: Program,
    text_base: u32,
    text_capacity: usize,
    status: Status,
    interrupt: Arc<AtomicBool>,
}

impl Simulator {
    /// Creates a simulator with the memory map described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the memory map is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let memory = Memory::from_config(&config.memory)?;
        let text = memory
            .region(&config.memory.text_region)
            .ok_or_else(|| ConfigError::MissingTextRegion(config.memory.text_region.clone()))?;
        let text_base = text.base();
        let text_capacity = text.len() / 4;

        Ok(Self {
            cpu: Cpu::new(config, text_base),
            memory,
            program: Program {
                base: text_base,
                ..Program::default()
            },
            text_base,
            text_capacity,
            status: Status::Running,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Assembles `source`, installs it and resets the simulator.
    ///
    /// Assembly and size errors leave the previous program and all state
    /// untouched. The text base is word-aligned and the size is checked first,
    /// so installing the words cannot fail afterwards; if it ever does, the
    /// previous program is kept for the next [`Simulator::reset`].
    ///
    /// A `sll $zero, $zero, 0` line encodes to [`HALT_SENTINEL`] and stops the
    /// program when fetched; a warning is logged for it.
    ///
    /// # Returns
    ///
    /// The program size in words.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from assembly, or [`LoadError::ProgramTooLarge`].
    pub fn load(&mut self, source: &str) -> Result<usize, LoadError> {
        let program = assemble(source, self.text_base)?;
        if program.len() > self.text_capacity {
            return Err(LoadError::ProgramTooLarge {
                words: program.len(),
                capacity: self.text_capacity,
            });
        }
        if let Some(pos) = program.words.iter().position(|&w| w == HALT_SENTINEL) {
            warn!(
                addr = %format_args!("{:#010x}", self.text_base.wrapping_add(pos as u32 * 4)),
                "program contains the halt word; execution stops there"
            );
        }
        let words = program.len();
        let previous = std::mem::replace(&mut self.program, program);
        if let Err(err) = self.reset() {
            self.program = previous;
            return Err(err.into());
        }
        info!(
            words,
            base = %format_args!("{:#010x}", self.text_base),
            "program loaded"
        );
        Ok(words)
    }

    /// Zeroes memory and registers, reinstalls the last program, moves the PC
    /// to the text base, clears the cycle counter and restores the run condition.
    ///
    /// # Errors
    ///
    /// Fails only if the program cannot be written to the text region.
    pub fn reset(&mut self) -> Result<(), AddressError> {
        self.memory.reset();
        self.memory.load_words(self.text_base, &self.program.words)?;
        self.cpu.reset(self.text_base);
        self.status = Status::Running;
        Ok(())
    }

    /// Executes one cycle.
    ///
    /// When the simulator is no longer running, nothing executes and the
    /// terminal outcome is returned again.
    pub fn step(&mut self) -> CycleOutcome {
        match &self.status {
            Status::Halted => return CycleOutcome::Halted,
            Status::Faulted(fault) => return CycleOutcome::Faulted(fault.clone()),
            Status::Running => {}
        }

        let outcome = self.cpu.step(&mut self.memory);
        match &outcome {
            CycleOutcome::Halted => {
                info!(cycles = self.cpu.stats.cycles, "simulation halted");
                self.status = Status::Halted;
            }
            CycleOutcome::Faulted(fault) => {
                info!(cycles = self.cpu.stats.cycles, %fault, "simulation stopped");
                self.status = Status::Faulted(fault.clone());
            }
            CycleOutcome::Continued | CycleOutcome::Reported(_) => {}
        }
        outcome
    }

    /// Executes up to `n` cycles, stopping early on halt, fatal fault or interrupt.
    pub fn run_n(&mut self, n: u64) -> RunReport {
        self.run(Some(n))
    }

    /// Executes until the program halts, faults or is interrupted.
    pub fn run_to_completion(&mut self) -> RunReport {
        self.run(None)
    }

    fn run(&mut self, limit: Option<u64>) -> RunReport {
        let start = self.cpu.stats.cycles;
        let mut reported = Vec::new();
        let mut steps = 0u64;

        let stop = loop {
            if limit.is_some_and(|n| steps >= n) {
                break RunStop::CycleLimit;
            }
            if self.interrupt.swap(false, Ordering::SeqCst) {
                info!(cycles = self.cpu.stats.cycles, "run interrupted");
                break RunStop::Interrupted;
            }
            steps += 1;
            match self.step() {
                CycleOutcome::Continued => {}
                CycleOutcome::Reported(fault) => reported.push(fault),
                CycleOutcome::Halted => break RunStop::Halted,
                CycleOutcome::Faulted(fault) => break RunStop::Faulted(fault),
            }
        };

        RunReport {
            cycles: self.cpu.stats.cycles - start,
            stop,
            reported,
        }
    }

    /// Returns a flag that stops a run at the next cycle boundary when set.
    ///
    /// The flag is cleared when a run observes it.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Returns the run condition.
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Reads GPR `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownRegister`] for `idx > 31`.
    pub fn read_register(&self, idx: usize) -> Result<u32, CodecError> {
        check_register(idx)?;
        Ok(self.cpu.state().gpr.read(idx))
    }

    /// Writes GPR `idx`. Writes to `$zero` have no effect.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownRegister`] for `idx > 31`.
    pub fn write_register(&mut self, idx: usize, val: u32) -> Result<(), CodecError> {
        check_register(idx)?;
        self.cpu.write_gpr(idx, val);
        Ok(())
    }

    /// Reads HI.
    pub const fn read_hi(&self) -> u32 {
        self.cpu.state().hi
    }

    /// Writes HI.
    pub const fn write_hi(&mut self, val: u32) {
        self.cpu.write_hi(val);
    }

    /// Reads LO.
    pub const fn read_lo(&self) -> u32 {
        self.cpu.state().lo
    }

    /// Writes LO.
    pub const fn write_lo(&mut self, val: u32) {
        self.cpu.write_lo(val);
    }

    /// Returns the committed program counter.
    pub const fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Returns the committed cycle count since the last reset.
    pub const fn cycles(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Returns the base address of the text region.
    pub const fn text_base(&self) -> u32 {
        self.text_base
    }

    /// Returns the `(address, word)` pairs from `lo` to `hi`, see [`Memory::dump`].
    ///
    /// # Errors
    ///
    /// Fails on the first misaligned or unmapped word.
    pub fn dump_memory(&self, lo: u32, hi: u32) -> Result<Vec<(u32, u32)>, AddressError> {
        self.memory.dump(lo, hi)
    }

    /// Returns a snapshot of the registers and the cycle counter.
    pub fn dump_registers(&self) -> RegisterDump {
        let state = self.cpu.state();
        RegisterDump {
            pc: state.pc,
            gpr: state.gpr.snapshot(),
            hi: state.hi,
            lo: state.lo,
            cycles: self.cpu.stats.cycles,
        }
    }

    /// Returns the loaded program with addresses and disassembly.
    pub fn program_listing(&self) -> Vec<ListingLine> {
        self.program
            .words
            .iter()
            .zip(&self.program.lines)
            .enumerate()
            .map(|(i, (&word, &line))| {
                let addr = self.program.address_of(i);
                ListingLine {
                    addr,
                    word,
                    line,
                    text: disassemble(word, addr),
                }
            })
            .collect()
    }

    /// Returns the loaded program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Returns execution statistics since the last reset.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Returns the memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the memory for direct modification (e.g. seeding data).
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }
}

fn check_register(idx: usize) -> Result<(), CodecError> {
    if idx < NUM_GPRS {
        Ok(())
    } else {
        Err(CodecError::UnknownRegister(format!("${idx}")))
    }
}
