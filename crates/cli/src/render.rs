//! Text rendering for simulator state.
//!
//! The core returns structured values only; everything printed by the CLI is
//! formatted here.

use std::fmt::Write as _;

use mipsim_core::isa::abi::REG_NAMES;
use mipsim_core::sim::{ListingLine, RegisterDump, RunReport, RunStop};
use mipsim_core::stats::SimStats;

/// Renders the register file, two registers per row.
pub fn registers(dump: &RegisterDump) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current register/bus values:");
    let _ = writeln!(out, "-------------------------------------");
    let _ = writeln!(out, "Instruction count: {}", dump.cycles);
    let _ = writeln!(out, "PC               : {:#010x}", dump.pc);
    let _ = writeln!(out, "Registers:");
    for (i, pair) in dump.gpr.chunks(2).enumerate() {
        let r = i * 2;
        let _ = writeln!(
            out,
            "  ${:<2} {:<5} {:#010x}    ${:<2} {:<5} {:#010x}",
            r,
            REG_NAMES[r],
            pair[0],
            r + 1,
            REG_NAMES[r + 1],
            pair[1]
        );
    }
    let _ = writeln!(out, "HI: {:#010x}", dump.hi);
    let _ = writeln!(out, "LO: {:#010x}", dump.lo);
    out
}

/// Renders `(address, word)` pairs, one per line.
pub fn memory(words: &[(u32, u32)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Memory content:");
    let _ = writeln!(out, "-------------------------------------");
    for (addr, word) in words {
        let _ = writeln!(out, "  {addr:#010x} ({addr}) : {word:#010x}");
    }
    out
}

/// Renders the loaded program listing.
pub fn listing(lines: &[ListingLine]) -> String {
    let mut out = String::new();
    for l in lines {
        let _ = writeln!(out, "{:#010x}  {:08x}  {:<28} # line {}", l.addr, l.word, l.text, l.line);
    }
    out
}

/// Renders a one-line run summary plus any reported faults.
pub fn report(report: &RunReport) -> String {
    let mut out = String::new();
    let stop = match &report.stop {
        RunStop::CycleLimit => "cycle limit reached".to_string(),
        RunStop::Halted => "halted".to_string(),
        RunStop::Faulted(fault) => format!("faulted: {fault}"),
        RunStop::Interrupted => "interrupted".to_string(),
    };
    let _ = writeln!(out, "Simulated {} cycle(s), {stop}", report.cycles);
    for fault in &report.reported {
        let _ = writeln!(out, "  reported: {fault}");
    }
    out
}

/// Renders the instruction mix.
pub fn stats(stats: &SimStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(out, "  cycles            {}", stats.cycles);
    let _ = writeln!(out, "  alu               {}", stats.inst_alu);
    let _ = writeln!(out, "  mul/div           {}", stats.inst_muldiv);
    let _ = writeln!(out, "  load              {}", stats.inst_load);
    let _ = writeln!(out, "  store             {}", stats.inst_store);
    let _ = writeln!(out, "  branch            {}", stats.inst_branch);
    let _ = writeln!(out, "  jump              {}", stats.inst_jump);
    let _ = writeln!(out, "  system            {}", stats.inst_system);
    let _ = writeln!(out, "  faults reported   {}", stats.faults_reported);
    out
}
