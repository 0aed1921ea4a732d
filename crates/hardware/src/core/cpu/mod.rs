//! CPU Core Definition.
//!
//! This module defines the central `Cpu` structure, which holds the processor state and
//! runs one fetch-decode-execute cycle per call. It coordinates the following:
//! 1. **State Management:** Owns the `current` and `next` architectural snapshots.
//! 2. **Cycle Commit:** Copies `next` over `current` only when a cycle completes.
//! 3. **Fault Policy:** Decides which faults stop the processor.
//! 4. **Observability:** Per-instruction tracing and instruction-mix statistics.

/// Instruction execution (the state-transition function).
pub mod execution;

/// Load and store width handling.
pub mod memory;

use std::mem;

use tracing::{debug, info, warn};

use self::execution::Effect;
use crate::common::{Fault, HALT_SENTINEL};
use crate::config::{Config, OverflowPolicy};
use crate::core::arch::ArchState;
use crate::isa::{decode, disassemble};
use crate::soc::traits::MemoryBus;
use crate::stats::SimStats;

/// Result of one simulated cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The instruction completed and the cycle committed.
    Continued,
    /// The cycle committed but reported a non-fatal fault.
    Reported(Fault),
    /// The program finished (halt sentinel or `syscall` exit).
    Halted,
    /// A fatal fault stopped the processor. The cycle did not commit.
    Faulted(Fault),
}

impl CycleOutcome {
    /// Returns `true` if the processor can keep running after this outcome.
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Continued | Self::Reported(_))
    }
}

/// Single-cycle MIPS processor.
///
/// Reads every operand from `current`, builds `next`, and swaps the two on
/// commit. `current` is never mutated while a cycle is in flight.
#[derive(Clone, Debug)]
pub struct Cpu {
    current: ArchState,
    next: ArchState,
    /// What trapping arithmetic overflow does to the run.
    pub overflow_policy: OverflowPolicy,
    /// Emit a `debug` event per executed instruction.
    pub trace: bool,
    /// Execution statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with zeroed registers and the PC at `entry`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the overflow policy and trace flag.
    /// * `entry` - Initial program counter.
    pub fn new(config: &Config, entry: u32) -> Self {
        Self {
            current: ArchState::new(entry),
            next: ArchState::new(entry),
            overflow_policy: config.general.overflow_policy,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Zeroes all registers, clears statistics and sets the PC to `entry`.
    pub fn reset(&mut self, entry: u32) {
        self.current = ArchState::new(entry);
        self.next = ArchState::new(entry);
        self.stats = SimStats::default();
    }

    /// Returns the committed architectural state.
    pub const fn state(&self) -> &ArchState {
        &self.current
    }

    /// Returns the committed program counter.
    pub const fn pc(&self) -> u32 {
        self.current.pc
    }

    /// Writes a GPR in both snapshots. Writes to `$zero` are discarded.
    pub fn write_gpr(&mut self, idx: usize, val: u32) {
        self.current.gpr.write(idx, val);
        self.next.gpr.write(idx, val);
    }

    /// Writes HI in both snapshots.
    pub const fn write_hi(&mut self, val: u32) {
        self.current.hi = val;
        self.next.hi = val;
    }

    /// Writes LO in both snapshots.
    pub const fn write_lo(&mut self, val: u32) {
        self.current.lo = val;
        self.next.lo = val;
    }

    /// Runs one fetch-decode-execute cycle against `bus`.
    ///
    /// Fetch faults, illegal instructions, memory faults and (under the fatal
    /// policy) overflow leave `current` untouched and return
    /// [`CycleOutcome::Faulted`]. The halt sentinel returns
    /// [`CycleOutcome::Halted`] without committing. Everything else commits.
    pub fn step<B: MemoryBus + ?Sized>(&mut self, bus: &mut B) -> CycleOutcome {
        let pc = self.current.pc;

        let word = match bus.read_word(pc) {
            Ok(word) => word,
            Err(source) => return Self::fatal(Fault::Address { pc, source }),
        };

        if word == HALT_SENTINEL {
            info!(pc = %format_args!("{pc:#010x}"), "halt sentinel reached");
            return CycleOutcome::Halted;
        }

        let Ok(decoded) = decode(word) else {
            return Self::fatal(Fault::IllegalInstruction { addr: pc, word });
        };

        if self.trace {
            debug!(
                cycle = self.stats.cycles,
                pc = %format_args!("{pc:#010x}"),
                word = %format_args!("{word:#010x}"),
                "{}",
                disassemble(word, pc)
            );
        }

        self.next.clone_from(&self.current);
        let effect = match execution::execute(&self.current, &mut self.next, &decoded, bus) {
            Ok(effect) => effect,
            Err(fault) => return Self::fatal(fault),
        };

        if let Effect::Report(fault @ Fault::ArithmeticOverflow { .. }) = &effect
            && self.overflow_policy == OverflowPolicy::Fatal
        {
            return Self::fatal(fault.clone());
        }

        mem::swap(&mut self.current, &mut self.next);
        self.stats.record(decoded.class());

        match effect {
            Effect::Normal => CycleOutcome::Continued,
            Effect::Exit => {
                info!(pc = %format_args!("{pc:#010x}"), "program exited via syscall");
                CycleOutcome::Halted
            }
            Effect::Report(fault) => {
                warn!(%fault, "fault reported");
                self.stats.faults_reported += 1;
                CycleOutcome::Reported(fault)
            }
        }
    }

    /// Logs and wraps a fatal fault.
    fn fatal(fault: Fault) -> CycleOutcome {
        warn!(%fault, "fatal fault");
        CycleOutcome::Faulted(fault)
    }
}
