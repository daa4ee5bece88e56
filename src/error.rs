// Crate-level error type
//
// All fallible library entry points (cartridge loading, mapper selection)
// return `Result<T, CoreError>`. The CPU's step loop never produces this
// error across its own boundary; unknown opcodes are handled according to
// `UnknownOpcodePolicy` instead of propagating an error mid-frame.

use thiserror::Error;

/// Errors produced by the emulator core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// iNES header magic mismatch, or the payload is shorter than the
    /// header promises.
    #[error("invalid iNES ROM: {0}")]
    InvalidRom(String),

    /// The cartridge declares a mapper number this core does not implement.
    #[error("unsupported mapper: {0}")]
    UnsupportedMapper(u8),

    /// An opcode byte with no table entry was fetched, and the configured
    /// `UnknownOpcodePolicy` is `Fail` rather than `TreatAsNop`.
    #[error("unknown opcode ${0:02X} at ${1:04X}")]
    UnknownOpcode(u8, u16),

    /// A read or write targeted a register in a way the hardware ignores
    /// rather than faults on (write-only register read, read-only register
    /// write). Carried as an error variant so callers can log it, but never
    /// fatal and never propagated out of `step`.
    #[error("illegal bus access at ${0:04X}")]
    IllegalBusAccess(u16),

    /// Wraps I/O failures encountered while loading a ROM from disk.
    #[error("i/o error loading ROM: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps TOML parse failures when loading an `EmulatorConfig`.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Wraps TOML serialization failures when saving an `EmulatorConfig`.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
