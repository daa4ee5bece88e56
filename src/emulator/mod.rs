// Emulator module - frame loop / timing coordinator
//
// Interleaves CPU opcode execution with PPU scanline advancement using a
// cycles-per-scanline budget, per the single-threaded cooperative scheduling
// model: the CPU and PPU advance deterministically under one loop, and the
// only suspension point is frame presentation between calls to `run_frame`.

use crate::bus::Bus;
use crate::cartridge::{mappers::create_mapper, Cartridge};
use crate::config::EmulatorConfig;
use crate::cpu::Cpu;
use crate::error::CoreError;
use std::path::Path;

/// Coordinates the CPU, PPU, and bus to run a loaded cartridge.
///
/// The host drives this by calling [`Emulator::run_frame`] once per
/// presentation tick (nominally 60 Hz); the coordinator itself never
/// sleeps or blocks on I/O. Between frames the host should call
/// [`Emulator::set_buttons`] with the latest controller state and read
/// [`Emulator::frame_buffer`] for the pixels to present.
pub struct Emulator {
    cpu: Cpu,
    bus: Bus,
    config: EmulatorConfig,
    cycles_this_scanline: u32,
    stop_requested: bool,
}

impl Emulator {
    /// Create a new emulator with default configuration and no cartridge loaded.
    pub fn new() -> Self {
        Self::with_config(EmulatorConfig::default())
    }

    /// Create a new emulator with an explicit configuration.
    pub fn with_config(config: EmulatorConfig) -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            config,
            cycles_this_scanline: 0,
            stop_requested: false,
        }
    }

    /// Load an iNES ROM from disk, wire its mapper into the bus, and reset
    /// the CPU so PC picks up the cartridge's reset vector.
    ///
    /// # Errors
    /// Returns [`CoreError`] if the file cannot be read, fails iNES
    /// validation, or declares an unsupported mapper.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CoreError> {
        let cartridge = Cartridge::from_ines_file(path)?;
        let mapper = create_mapper(cartridge)?;
        self.bus.load_cartridge(mapper);
        self.reset();
        Ok(())
    }

    /// Reset the CPU and PPU to their power-on state, preserving the
    /// attached cartridge.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.bus.ppu.reset();
        self.cycles_this_scanline = 0;
    }

    /// Advance the emulator by one PPU scanline: run CPU opcodes until
    /// their cycle cost reaches the configured per-scanline budget, then
    /// tick the PPU one scanline.
    ///
    /// Returns `true` if this call completed a full 262-scanline frame.
    pub fn step_scanline(&mut self) -> bool {
        while self.cycles_this_scanline < self.config.cycles_per_scanline {
            self.cycles_this_scanline += self.cpu.step(&mut self.bus);
        }
        self.cycles_this_scanline -= self.config.cycles_per_scanline;
        self.bus.ppu.step_scanline()
    }

    /// Run exactly one full 262-scanline frame and return.
    ///
    /// A host loop controls pacing between calls; this never blocks.
    pub fn run_frame(&mut self) {
        loop {
            if self.step_scanline() {
                break;
            }
        }
    }

    /// Request that the coordinator stop at the next opportunity.
    ///
    /// Checked by callers driving a multi-frame loop (e.g. the CLI
    /// entrypoint); the coordinator itself always completes the current
    /// opcode/scanline before this takes effect.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Whether a stop has been requested.
    pub fn should_stop(&self) -> bool {
        self.stop_requested
    }

    /// Set controller 1's button state, in bit order
    /// {A, B, Select, Start, Up, Down, Left, Right}. Call once per frame,
    /// before presenting.
    pub fn set_buttons(&mut self, buttons: u8) {
        self.bus.controller.set_buttons(buttons);
    }

    /// The current 256x240 frame buffer, one palette index (0-63) per pixel.
    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.ppu.frame()
    }

    /// Reference to the CPU, for tests and debugging tools.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable reference to the CPU, for tests and debugging tools.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Reference to the bus, for tests and debugging tools.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Mutable reference to the bus, for tests and debugging tools.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Reference to the active configuration.
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
