//! MIPS32 instruction-level simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Batch run:** Assemble a program, run it (to completion or for N cycles) and dump state.
//! 2. **Interactive shell:** The classic `sim` / `run n` / `rdump` / `mdump` command loop.
//! 3. **Disassembly:** Print the assembled listing of a program.

mod render;
mod shell;

use std::path::{Path, PathBuf};
use std::{fs, io, process};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mipsim_core::config::Config;
use mipsim_core::sim::{RegisterDump, RunStop};
use mipsim_core::stats::SimStats;
use mipsim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "MIPS32 instruction-level simulator",
    long_about = "Assemble and run a MIPS32 program, interactively or in batch.\n\nExamples:\n  mipsim run prog.s --rdump\n  mipsim run prog.s --cycles 100 --mdump 0x10010000 0x1001000c\n  mipsim shell prog.s\n  mipsim disasm prog.s"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Assembly source file.
    program: PathBuf,

    /// JSON configuration file (memory map, overflow policy).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every executed instruction at debug level.
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion, or for a fixed number of cycles.
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Stop after this many cycles.
        #[arg(short = 'n', long)]
        cycles: Option<u64>,

        /// Dump the registers afterwards.
        #[arg(long)]
        rdump: bool,

        /// Dump memory from LO to HI afterwards.
        #[arg(long, num_args = 2, value_names = ["LO", "HI"], value_parser = shell::parse_u32)]
        mdump: Option<Vec<u32>>,

        /// Print the instruction mix.
        #[arg(long)]
        stats: bool,

        /// Emit the results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive shell.
    Shell {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the assembled program with disassembly.
    Disasm {
        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Machine-readable result of `run --json`.
#[derive(Serialize, Debug)]
struct RunOutput {
    cycles: u64,
    stop: RunStop,
    reported: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registers: Option<RegisterDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<Vec<(u32, u32)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SimStats>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            common,
            cycles,
            rdump,
            mdump,
            stats,
            json,
        } => {
            let mut sim = setup(&common);
            cmd_run(&mut sim, cycles, rdump, mdump.as_deref(), stats, json);
        }
        Commands::Shell { common } => {
            let sim = setup(&common);
            let stdin = io::stdin();
            if let Err(e) = shell::Shell::new(sim).run(stdin.lock(), io::stdout()) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Commands::Disasm { common } => {
            let sim = setup(&common);
            print!("{}", render::listing(&sim.program_listing()));
        }
    }
}

/// Prints `msg` to stderr and exits with status 1.
fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    process::exit(1);
}

/// Installs the tracing subscriber. `--trace` forces `debug`; otherwise
/// `RUST_LOG` applies, defaulting to `warn`.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads the configuration file, or returns the default configuration.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| fatal(format!("could not read config '{}': {e}", path.display())));
    Config::from_json(&text).unwrap_or_else(|e| fatal(e))
}

/// Builds the simulator and loads the program; every failure is fatal.
fn setup(common: &CommonArgs) -> Simulator {
    init_tracing(common.trace);

    let source = fs::read_to_string(&common.program).unwrap_or_else(|e| {
        fatal(format!(
            "could not read program '{}': {e}",
            common.program.display()
        ))
    });

    let mut config = load_config(common.config.as_deref());
    config.general.trace_instructions |= common.trace;

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| fatal(e));
    if let Err(e) = sim.load(&source) {
        fatal(format!("{}: {e}", common.program.display()));
    }
    sim
}

fn cmd_run(
    sim: &mut Simulator,
    cycles: Option<u64>,
    rdump: bool,
    mdump: Option<&[u32]>,
    stats: bool,
    json: bool,
) {
    let report = match cycles {
        Some(n) => sim.run_n(n),
        None => sim.run_to_completion(),
    };

    let memory = match mdump {
        Some(&[lo, hi]) => Some(sim.dump_memory(lo, hi).unwrap_or_else(|e| fatal(e))),
        _ => None,
    };

    if json {
        let output = RunOutput {
            cycles: report.cycles,
            stop: report.stop.clone(),
            reported: report.reported.iter().map(ToString::to_string).collect(),
            registers: rdump.then(|| sim.dump_registers()),
            memory,
            stats: stats.then(|| sim.stats().clone()),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => fatal(e),
        }
    } else {
        print!("{}", render::report(&report));
        if rdump {
            print!("{}", render::registers(&sim.dump_registers()));
        }
        if let Some(words) = &memory {
            print!("{}", render::memory(words));
        }
        if stats {
            print!("{}", render::stats(sim.stats()));
        }
    }

    if matches!(report.stop, RunStop::Faulted(_)) {
        process::exit(1);
    }
}
