// Mappers module - cartridge-specific memory mapping
//
// This module holds the mapper factory and individual mapper implementations.
// Only mapper 0 (NROM) is implemented; any other mapper id is a fatal
// UnsupportedMapper error at load time.

mod mapper0;

use super::{Cartridge, Mapper};
use crate::error::CoreError;
pub use mapper0::Mapper0;

/// Create a mapper instance based on the mapper number in the cartridge.
///
/// # Errors
/// Returns [`CoreError::UnsupportedMapper`] if the cartridge's mapper id
/// is not mapper 0.
///
/// # Example
/// ```no_run
/// use nes_rs::Cartridge;
/// use nes_rs::cartridge::mappers::create_mapper;
///
/// let cartridge = Cartridge::from_ines_file("game.nes").unwrap();
/// let mapper = create_mapper(cartridge).unwrap();
/// ```
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, CoreError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        mapper_num => Err(CoreError::UnsupportedMapper(mapper_num)),
    }
}
