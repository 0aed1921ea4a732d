//! Interactive command shell.
//!
//! Reads one command per line and drives the simulator. Malformed commands
//! print a message and the shell keeps going; only `quit` or end of input
//! leave the loop.

use std::io::{self, BufRead, Write};

use mipsim_core::Simulator;

use crate::render;

const HELP: &str = "\
----------------MIPS ISIM Help-----------------------
sim                   - run program to completion
run n                 - execute program for n instructions
rdump                 - dump the register & bus values
reset                 - reset the machine and reload the program
input reg_num reg_val - set GPR reg_num to reg_val
mdump low high        - dump memory from low to high
high value            - set the HI register to value
low value             - set the LO register to value
print                 - print the loaded program
?                     - display this help menu
quit                  - exit the program
";

/// Whether the shell should keep reading commands.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Parses a decimal or `0x` hexadecimal unsigned number.
pub fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if hex.starts_with(['+', '-']) => return Err(format!("invalid number `{s}`")),
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid number `{s}`: {e}"))
}

/// Parses a register value: anything [`parse_u32`] accepts, or a negative
/// number stored as its two's complement.
pub fn parse_value(s: &str) -> Result<u32, String> {
    let Some(magnitude) = s.strip_prefix('-') else {
        return parse_u32(s);
    };
    match parse_u32(magnitude)? {
        m if m <= 0x8000_0000 => Ok(m.wrapping_neg()),
        _ => Err(format!("`{s}` does not fit in 32 bits")),
    }
}

/// Interactive shell around one simulator.
#[derive(Debug)]
pub struct Shell {
    sim: Simulator,
}

impl Shell {
    /// Wraps a simulator with a program already loaded.
    pub const fn new(sim: Simulator) -> Self {
        Self { sim }
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Welcome to the MIPS simulator. Type ? for help.")?;
        write!(out, "MU-MIPS SIM:> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            match self.execute(line.trim()) {
                Ok((Flow::Quit, text)) => {
                    write!(out, "{text}")?;
                    break;
                }
                Ok((Flow::Continue, text)) => write!(out, "{text}")?,
                Err(msg) => writeln!(out, "Error: {msg}")?,
            }
            write!(out, "MU-MIPS SIM:> ")?;
            out.flush()?;
        }
        writeln!(out, "Bye.")?;
        Ok(())
    }

    /// Executes one command line and returns the text to print.
    fn execute(&mut self, line: &str) -> Result<(Flow, String), String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Ok((Flow::Continue, String::new()));
        };
        let raw = |i: usize| {
            args.get(i)
                .copied()
                .ok_or_else(|| format!("`{cmd}` expects {} argument(s)", i + 1))
        };
        let arg = |i: usize| raw(i).and_then(parse_u32);
        let value = |i: usize| raw(i).and_then(parse_value);

        let text = match cmd.to_ascii_lowercase().as_str() {
            "sim" | "go" => render::report(&self.sim.run_to_completion()),
            "run" => render::report(&self.sim.run_n(u64::from(arg(0)?))),
            "rdump" => render::registers(&self.sim.dump_registers()),
            "reset" => {
                self.sim.reset().map_err(|e| e.to_string())?;
                "Machine reset.\n".to_string()
            }
            "input" => {
                let reg = arg(0)? as usize;
                let val = value(1)?;
                self.sim.write_register(reg, val).map_err(|e| e.to_string())?;
                String::new()
            }
            "mdump" => {
                let words = self
                    .sim
                    .dump_memory(arg(0)?, arg(1)?)
                    .map_err(|e| e.to_string())?;
                render::memory(&words)
            }
            "high" => {
                self.sim.write_hi(value(0)?);
                String::new()
            }
            "low" => {
                self.sim.write_lo(value(0)?);
                String::new()
            }
            "print" => render::listing(&self.sim.program_listing()),
            "?" | "help" => HELP.to_string(),
            "quit" | "q" => return Ok((Flow::Quit, String::new())),
            other => return Err(format!("unknown command `{other}`, type ? for help")),
        };
        Ok((Flow::Continue, text))
    }
}
