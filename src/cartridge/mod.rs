// Cartridge module - iNES ROM loading and mapper abstraction
//
// Parses the iNES container format into PRG/CHR banks plus the handful of
// header bits the bus and PPU need (mirroring, mapper id, battery backing),
// and defines the `Mapper` trait that the bus delegates CPU/PPU-space
// cartridge accesses to.

pub mod mappers;

use crate::error::CoreError;
use std::fs;
use std::path::Path;

const INES_MAGIC: [u8; 4] = [b'N', b'E', b'S', 0x1A];
const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_LEN: usize = 16 * 1024;
const CHR_BANK_LEN: usize = 8 * 1024;

/// Nametable mirroring mode, as selected by the cartridge header (or, for
/// four-screen carts, by onboard VRAM the mapper would otherwise bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    SingleScreen,
    FourScreen,
}

/// Parsed iNES header fields, kept around for diagnostics even after the
/// payload has been split into PRG/CHR banks.
#[derive(Debug, Clone, Copy)]
pub struct INesHeader {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    pub has_trainer: bool,
}

/// Errors specific to iNES header/payload parsing. Folded into [`CoreError`]
/// at the loader's return boundary so callers only match one error type.
#[derive(Debug, thiserror::Error)]
pub enum INesError {
    #[error("ROM is too short to contain an iNES header ({0} bytes)")]
    TooShort(usize),
    #[error("missing iNES magic bytes (expected 'NES\\x1A')")]
    BadMagic,
    #[error("PRG-ROM payload is truncated: expected {expected} bytes, found {actual}")]
    TruncatedPrg { expected: usize, actual: usize },
    #[error("CHR-ROM payload is truncated: expected {expected} bytes, found {actual}")]
    TruncatedChr { expected: usize, actual: usize },
}

impl From<INesError> for CoreError {
    fn from(value: INesError) -> Self {
        CoreError::InvalidRom(value.to_string())
    }
}

/// A loaded cartridge: PRG/CHR banks plus the header bits the bus and PPU
/// consult (mirroring, mapper id). Immutable once loaded; the only mutation
/// path is through the mapper it's handed off to.
#[derive(Debug, Clone)]
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub trainer: Option<Vec<u8>>,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    /// True if the header advertised zero CHR banks, meaning `chr_rom` is
    /// actually 8 KiB of writable CHR-RAM rather than read-only CHR data.
    pub chr_is_ram: bool,
}

impl Default for Cartridge {
    fn default() -> Self {
        Cartridge {
            prg_rom: vec![0u8; PRG_BANK_LEN],
            chr_rom: vec![0u8; CHR_BANK_LEN],
            trainer: None,
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            has_battery: false,
            chr_is_ram: true,
        }
    }
}

impl Cartridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cartridge from a file on disk.
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes).map_err(CoreError::from)
    }

    /// Load a cartridge from an in-memory iNES image. Exposed separately
    /// from [`Cartridge::from_ines_file`] so tests can exercise the header
    /// parser without touching disk.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, INesError> {
        if data.len() < HEADER_LEN {
            return Err(INesError::TooShort(data.len()));
        }
        if data[0..4] != INES_MAGIC {
            return Err(INesError::BadMagic);
        }

        let prg_banks = data[4];
        let chr_banks = data[5];
        let flags6 = data[6];
        let flags7 = data[7];

        let has_trainer = flags6 & 0b0000_0100 != 0;
        let has_battery = flags6 & 0b0000_0010 != 0;
        let four_screen = flags6 & 0b0000_1000 != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let mapper = (flags7 & 0xF0) | (flags6 >> 4);

        let mut offset = HEADER_LEN;

        let trainer = if has_trainer {
            let end = offset + TRAINER_LEN;
            if data.len() < end {
                return Err(INesError::TruncatedPrg {
                    expected: end,
                    actual: data.len(),
                });
            }
            let t = data[offset..end].to_vec();
            offset = end;
            Some(t)
        } else {
            None
        };

        let prg_len = prg_banks as usize * PRG_BANK_LEN;
        let prg_end = offset + prg_len;
        if data.len() < prg_end {
            return Err(INesError::TruncatedPrg {
                expected: prg_len,
                actual: data.len() - offset,
            });
        }
        let prg_rom = data[offset..prg_end].to_vec();
        offset = prg_end;

        let chr_is_ram = chr_banks == 0;
        let chr_rom = if chr_is_ram {
            vec![0u8; CHR_BANK_LEN]
        } else {
            let chr_len = chr_banks as usize * CHR_BANK_LEN;
            let chr_end = offset + chr_len;
            if data.len() < chr_end {
                return Err(INesError::TruncatedChr {
                    expected: chr_len,
                    actual: data.len() - offset,
                });
            }
            data[offset..chr_end].to_vec()
        };

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            trainer,
            mapper,
            mirroring,
            has_battery,
            chr_is_ram,
        })
    }

    /// The parsed header as a standalone value, useful for diagnostics
    /// logged before mapper construction can fail.
    pub fn header(&self) -> INesHeader {
        INesHeader {
            prg_banks: (self.prg_rom.len() / PRG_BANK_LEN) as u8,
            chr_banks: if self.chr_is_ram {
                0
            } else {
                (self.chr_rom.len() / CHR_BANK_LEN) as u8
            },
            mapper: self.mapper,
            mirroring: self.mirroring,
            has_battery: self.has_battery,
            has_trainer: self.trainer.is_some(),
        }
    }
}

/// Cartridge-side memory mapper. The bus delegates all CPU-space accesses
/// at $8000-$FFFF (and PPU-space pattern table accesses at $0000-$1FFF) to
/// whatever mapper the cartridge selects.
pub trait Mapper {
    fn cpu_read(&self, address: u16) -> u8;
    fn cpu_write(&mut self, address: u16, value: u8);
    fn ppu_read(&self, address: u16) -> u8;
    fn ppu_write(&mut self, address: u16, value: u8);
    fn mirroring(&self) -> Mirroring;
}
