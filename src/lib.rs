// NES Emulator Library
// Core library for the NES emulator implementation

// Public modules
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use bus::{Bus, MemoryMappedDevice};
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, Mirroring};
pub use config::{EmulatorConfig, UnknownOpcodePolicy};
pub use cpu::Cpu;
pub use emulator::Emulator;
pub use error::CoreError;
pub use input::{Controller, ControllerIO};
pub use ppu::Ppu;
