// Configuration module - core emulation settings
//
// These settings govern the CPU/PPU/bus coordinator, not the host frontend
// (video, audio, input device binding live outside this crate). Settings
// are loaded from a TOML file via `serde` the same way the rest of this
// codebase persists configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What the CPU does when it decodes an opcode byte with no defined
/// behavior (the small set of NMOS 6502 opcodes commonly called "KIL"/
/// "JAM", plus the handful of unstable illegal opcodes this core does not
/// model: ANE, LXA, LAS, SHA, SHX, SHY, TAS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownOpcodePolicy {
    /// Log the occurrence and treat the byte as a one-cycle, one-byte NOP
    /// so execution keeps going. Useful for running real-world ROMs that
    /// occasionally hit padding bytes or misaligned decode states.
    TreatAsNop,
    /// Return an error from the step coordinator, halting emulation.
    Fail,
}

impl Default for UnknownOpcodePolicy {
    fn default() -> Self {
        UnknownOpcodePolicy::TreatAsNop
    }
}

/// Core emulation configuration.
///
/// This does not cover windowing, audio output, or controller device
/// binding; those are frontend concerns layered on top of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Behavior when an undefined opcode byte is decoded.
    #[serde(default)]
    pub unknown_opcode_policy: UnknownOpcodePolicy,

    /// CPU-cycle budget the coordinator advances before ticking the PPU one
    /// scanline. 113 approximates 341 PPU dots / 3 dots-per-CPU-cycle.
    #[serde(default = "default_cycles_per_scanline")]
    pub cycles_per_scanline: u32,
}

fn default_cycles_per_scanline() -> u32 {
    113
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            unknown_opcode_policy: UnknownOpcodePolicy::default(),
            cycles_per_scanline: default_cycles_per_scanline(),
        }
    }
}

impl EmulatorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not parse as
    /// valid TOML matching this structure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::CoreError> {
        let contents = fs::read_to_string(path)?;
        let config: EmulatorConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if
    /// the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or the file
    /// cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::error::CoreError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
