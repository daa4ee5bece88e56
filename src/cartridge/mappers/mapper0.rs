// Mapper 0 (NROM) - The simplest NES mapper with no bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Variants:
// - NROM-128: 16KB PRG-ROM (mirrored to fill 32KB space)
// - NROM-256: 32KB PRG-ROM (no mirroring)
//
// CHR Configuration:
// - CHR-ROM: 8KB read-only pattern memory
// - CHR-RAM: 8KB writable pattern memory

use crate::cartridge::{Cartridge, Mapper, Mirroring};

/// Mapper 0 implementation (NROM)
///
/// This is the simplest mapper used by games like Super Mario Bros., Donkey Kong,
/// and Balloon Fight. It has no bank switching capability.
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is RAM (writable) or ROM (read-only)
    chr_is_ram: bool,
    /// Mirroring type (fixed, cannot be changed by the mapper)
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create a new Mapper0 instance from a cartridge.
    ///
    /// The loader is expected to have already validated PRG-ROM size
    /// ($4000 or $8000 bytes); `cpu_read` mirrors via modulo regardless,
    /// so an unexpected size degrades to a different mirroring pattern
    /// rather than panicking.
    pub fn new(cartridge: Cartridge) -> Self {
        Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            mirroring: cartridge.mirroring,
        }
    }
}

impl Mapper for Mapper0 {
    /// Read from CPU address space
    ///
    /// For NROM:
    /// - $8000-$BFFF: First 16KB of PRG-ROM
    /// - $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB for 16KB ROMs)
    fn cpu_read(&self, address: u16) -> u8 {
        match address {
            0x8000..=0xFFFF => {
                // Map address to PRG-ROM index
                let index = (address - 0x8000) as usize;

                // Use modulo to handle mirroring for 16KB ROMs
                // For 32KB ROMs, modulo has no effect since index < prg_rom.len()
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
                0
            }
        }
    }

    /// Write to CPU address space
    ///
    /// NROM has no writable registers, so all writes are ignored
    fn cpu_write(&mut self, _address: u16, _value: u8) {
        // NROM has no bank switching or other mapper registers
        // Writes to PRG-ROM space are ignored
    }

    /// Read from PPU address space
    ///
    /// For NROM:
    /// - $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
    fn ppu_read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => {
                let index = address as usize;
                self.chr_mem[index]
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
                0
            }
        }
    }

    /// Write to PPU address space
    ///
    /// For NROM:
    /// - CHR-RAM: writes are allowed
    /// - CHR-ROM: writes are ignored
    fn ppu_write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x1FFF => {
                if self.chr_is_ram {
                    let index = address as usize;
                    self.chr_mem[index] = value;
                }
                // For CHR-ROM, writes are silently ignored
            }
            _ => {
                // Unmapped address (shouldn't happen if bus is implemented correctly)
            }
        }
    }

    /// Get the mirroring mode
    ///
    /// For NROM, mirroring is fixed and determined by the cartridge header
    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
