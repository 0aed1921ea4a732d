//! Program Loader (two-pass assembler).
//!
//! This module turns assembly text into instruction words for the text region. It performs:
//! 1. **Preprocessing:** Strips `#` comments and blank lines, splits off `name:` labels.
//! 2. **Symbol pass:** Assigns every label the address `base + 4 * instruction_index`.
//! 3. **Encoding pass:** Resolves registers, numbers and label references, then encodes
//!    each instruction through the [codec](crate::isa::encode).
//!
//! Assembly is all-or-nothing: the first error aborts with its 1-based source line
//! and nothing is written to memory. Writing the words is the caller's job.

use std::collections::HashMap;

use crate::common::constants::JUMP_SEGMENT_MASK;
use crate::common::{CodecError, LoadError, WORD_BYTES};
use crate::isa::abi::parse_register;
use crate::isa::encode::{Operand, encode_spec};
use crate::isa::instruction::TARGET_MASK;
use crate::isa::table::{self, Field, OpClass, OpSpec, Syntax};

/// An assembled program, ready to be written at `base`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Address of the first word.
    pub base: u32,
    /// Encoded instruction words.
    pub words: Vec<u32>,
    /// 1-based source line of each word.
    pub lines: Vec<usize>,
    /// Resolved label addresses.
    pub labels: HashMap<String, u32>,
}

impl Program {
    /// Number of instruction words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Address of the word at `index`.
    pub const fn address_of(&self, index: usize) -> u32 {
        self.base.wrapping_add((index as u32).wrapping_mul(WORD_BYTES))
    }
}

/// One instruction line after preprocessing.
#[derive(Debug)]
struct Statement<'a> {
    line: usize,
    mnemonic: &'a str,
    operands: Vec<&'a str>,
}

/// Assembles `source` for a text region starting at `base`.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered, tagged with its source line.
///
/// `sll $zero, $zero, 0` assembles to
/// [`HALT_SENTINEL`](crate::common::HALT_SENTINEL), so a program that
/// contains it stops there when run.
///
/// # Examples
///
/// ```
/// use mipsim_core::sim::loader::assemble;
///
/// let program = assemble("loop: addi $t0, $t0, 1\n  j loop\n", 0x0040_0000).unwrap();
/// assert_eq!(program.words, vec![0x2108_0001, 0x0810_0000]);
/// assert_eq!(program.labels["loop"], 0x0040_0000);
/// ```
pub fn assemble(source: &str, base: u32) -> Result<Program, LoadError> {
    let mut labels = HashMap::new();
    let mut statements = Vec::new();

    // Pass one: labels and statements.
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let mut rest = raw.split('#').next().unwrap_or_default().trim();

        while let Some((head, tail)) = split_label(rest) {
            if !is_identifier(head) {
                return Err(parse_error(line, format!("invalid label `{head}`")));
            }
            let addr = base.wrapping_add((statements.len() as u32).wrapping_mul(WORD_BYTES));
            if labels.insert(head.to_string(), addr).is_some() {
                return Err(parse_error(line, format!("duplicate label `{head}`")));
            }
            rest = tail.trim();
        }

        if rest.is_empty() {
            continue;
        }
        let (mnemonic, operands) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        statements.push(Statement {
            line,
            mnemonic,
            operands: operands
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect(),
        });
    }

    // Pass two: encoding.
    let mut program = Program {
        base,
        words: Vec::with_capacity(statements.len()),
        lines: Vec::with_capacity(statements.len()),
        labels: HashMap::new(),
    };
    for stmt in &statements {
        let pc = program.address_of(program.words.len());
        let word = assemble_statement(stmt, pc, &labels)?;
        program.words.push(word);
        program.lines.push(stmt.line);
    }
    program.labels = labels;
    Ok(program)
}

/// Splits `name: rest` when the colon comes before any operand text.
fn split_label(text: &str) -> Option<(&str, &str)> {
    let (head, tail) = text.split_once(':')?;
    let head = head.trim();
    (!head.contains(char::is_whitespace)).then_some((head, tail))
}

/// Returns `true` for `[A-Za-z_.][A-Za-z0-9_.]*`.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Parses a decimal or `0x` hexadecimal integer with an optional leading `-`.
fn parse_number(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<i64>().ok()?
        }
        None => return None,
    };
    Some(if negative { -value } else { value })
}

fn parse_error(line: usize, reason: String) -> LoadError {
    LoadError::Parse { line, reason }
}

/// Resolves and encodes one statement located at `pc`.
fn assemble_statement(
    stmt: &Statement<'_>,
    pc: u32,
    labels: &HashMap<String, u32>,
) -> Result<u32, LoadError> {
    let line = stmt.line;
    let spec = table::lookup(stmt.mnemonic).ok_or_else(|| LoadError::UnknownMnemonic {
        line,
        mnemonic: stmt.mnemonic.to_string(),
    })?;

    let tokens = expand_operands(stmt, spec)?;
    let fields = spec.syntax.fields();
    if tokens.len() != fields.len() {
        return Err(LoadError::from_codec(
            line,
            CodecError::OperandMismatch {
                mnemonic: spec.mnemonic,
                expected: spec.syntax.describe(),
            },
        ));
    }

    let operands = fields
        .iter()
        .zip(&tokens)
        .map(|(&field, token)| resolve_operand(spec, field, token, pc, labels, line))
        .collect::<Result<Vec<_>, _>>()?;

    encode_spec(spec, &operands).map_err(|e| LoadError::from_codec(line, e))
}

/// Applies operand sugar: `offset(base)` splitting and single-operand `jalr`.
fn expand_operands<'a>(stmt: &Statement<'a>, spec: &OpSpec) -> Result<Vec<&'a str>, LoadError> {
    let ops = &stmt.operands;
    match (spec.syntax, ops.as_slice()) {
        (Syntax::RtOffsetBase, &[rt, addr]) => {
            let (offset, base) = addr
                .strip_suffix(')')
                .and_then(|a| a.split_once('('))
                .ok_or_else(|| {
                    parse_error(stmt.line, format!("expected `offset($base)`, found `{addr}`"))
                })?;
            Ok(vec![rt, if offset.is_empty() { "0" } else { offset }, base])
        }
        (Syntax::RdRs, &[rs]) => Ok(vec!["$ra", rs]),
        _ => Ok(ops.clone()),
    }
}

/// Converts one operand token into an [`Operand`] for `field`.
fn resolve_operand(
    spec: &OpSpec,
    field: Field,
    token: &str,
    pc: u32,
    labels: &HashMap<String, u32>,
    line: usize,
) -> Result<Operand, LoadError> {
    if field.is_register() {
        return parse_register(token)
            .map(Operand::Reg)
            .map_err(|e| LoadError::from_codec(line, e));
    }

    let label = |name: &str| {
        labels
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::UndefinedLabel {
                line,
                label: name.to_string(),
            })
    };
    let next_pc = i64::from(pc.wrapping_add(WORD_BYTES));

    match field {
        Field::Imm if spec.class == OpClass::Branch => match parse_number(token) {
            Some(offset) => Ok(Operand::Imm(offset)),
            None if is_identifier(token) => {
                let target = i64::from(label(token)?);
                Ok(Operand::Imm((target - next_pc) / i64::from(WORD_BYTES)))
            }
            None => Err(parse_error(line, format!("invalid branch target `{token}`"))),
        },
        Field::Target => {
            let addr = match parse_number(token) {
                Some(addr) => addr,
                None if is_identifier(token) => i64::from(label(token)?),
                None => return Err(parse_error(line, format!("invalid jump target `{token}`"))),
            };
            let segment = next_pc & i64::from(JUMP_SEGMENT_MASK);
            let (min, max) = (segment, segment + i64::from(TARGET_MASK << 2));
            if addr < min || addr > max {
                return Err(LoadError::ImmediateOutOfRange {
                    line,
                    value: addr,
                    min,
                    max,
                });
            }
            if addr % i64::from(WORD_BYTES) != 0 {
                return Err(parse_error(
                    line,
                    format!("jump target {addr:#x} is not word-aligned"),
                ));
            }
            Ok(Operand::Imm((addr - segment) >> 2))
        }
        _ => parse_number(token)
            .map(Operand::Imm)
            .ok_or_else(|| parse_error(line, format!("invalid immediate `{token}`"))),
    }
}
