//! Configuration system for the MIPS simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** The MU-MIPS memory map (text, data, stack, ktext, kdata).
//! 2. **Structures:** General settings and the memory region layout.
//! 3. **Enums:** The arithmetic overflow policy.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`. Every field is optional in JSON and falls back to its default.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of the text (program) segment.
    pub const TEXT_BASE: u32 = 0x0040_0000;

    /// Base address of the static data segment.
    pub const DATA_BASE: u32 = 0x1001_0000;

    /// Base address of the stack segment.
    pub const STACK_BASE: u32 = 0x7FF0_0000;

    /// Base address of the kernel text segment.
    pub const KTEXT_BASE: u32 = 0x8000_0000;

    /// Base address of the kernel data segment.
    pub const KDATA_BASE: u32 = 0x9000_0000;

    /// Size of every default segment (1 MiB).
    pub const SEGMENT_SIZE: u32 = 0x0010_0000;

    /// Name of the region programs are assembled into.
    pub const TEXT_REGION: &str = "text";
}

/// Behaviour of the trapping arithmetic instructions (`add`, `sub`, `addi`) on
/// signed overflow.
///
/// In both cases the destination register keeps its previous value and the
/// fault is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Stop the simulator. The cycle is not committed and the PC stays on the
    /// trapping instruction.
    #[default]
    #[serde(alias = "Fatal")]
    Fatal,
    /// Commit the cycle (destination untouched, PC advanced) and keep running.
    #[serde(alias = "Continue")]
    Continue,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::{Config, OverflowPolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "overflow_policy": "continue" },
///     "memory": {
///         "regions": [
///             { "name": "text", "base": 4194304, "size": 4096 },
///             { "name": "data", "base": 268500992, "size": 4096 }
///         ]
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.overflow_policy, OverflowPolicy::Continue);
/// assert_eq!(config.memory.regions.len(), 2);
/// assert_eq!(config.memory.text_region, "text");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `debug`-level trace event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// What `add`/`sub`/`addi` overflow does to the run condition.
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

/// One memory region of the simulated address space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionConfig {
    /// Region name (e.g. `"text"`).
    pub name: String,
    /// First mapped address.
    pub base: u32,
    /// Size in bytes; the region covers `base..=base + size - 1`.
    pub size: u32,
}

impl RegionConfig {
    /// Creates a region description.
    pub fn new(name: impl Into<String>, base: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            base,
            size,
        }
    }
}

/// Memory map configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Mapped regions. Order does not matter; they are sorted by base when built.
    #[serde(default = "MemoryConfig::default_regions")]
    pub regions: Vec<RegionConfig>,

    /// Name of the region programs are loaded into; the PC resets to its base.
    #[serde(default = "MemoryConfig::default_text_region")]
    pub text_region: String,
}

impl MemoryConfig {
    /// Returns the MU-MIPS segment layout.
    fn default_regions() -> Vec<RegionConfig> {
        vec![
            RegionConfig::new("text", defaults::TEXT_BASE, defaults::SEGMENT_SIZE),
            RegionConfig::new("data", defaults::DATA_BASE, defaults::SEGMENT_SIZE),
            RegionConfig::new("stack", defaults::STACK_BASE, defaults::SEGMENT_SIZE),
            RegionConfig::new("ktext", defaults::KTEXT_BASE, defaults::SEGMENT_SIZE),
            RegionConfig::new("kdata", defaults::KDATA_BASE, defaults::SEGMENT_SIZE),
        ]
    }

    /// Returns the default text region name.
    fn default_text_region() -> String {
        defaults::TEXT_REGION.to_string()
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            regions: Self::default_regions(),
            text_region: Self::default_text_region(),
        }
    }
}
