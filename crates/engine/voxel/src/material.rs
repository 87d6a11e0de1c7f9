//! 3-byte RGB material records
//!
//! Materials are owned by the arena, not by any single octree leaf; any
//! number of child slots may share one material address.

use crate::address::Address;
use crate::arena::{Arena, ArenaError};

/// Bytes per material record.
pub const MATERIAL_BYTES: usize = 3;

/// An RGB material value.
///
/// Two materials are equal iff all three channel bytes match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Material {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Material {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Allocate a material record in `arena` and return its address.
    pub fn create(arena: &mut Arena, r: u8, g: u8, b: u8) -> Result<Address, ArenaError> {
        let address = arena.alloc(MATERIAL_BYTES)?;
        arena.write_bytes(address, &[r, g, b]);
        Ok(address)
    }

    /// Read the material record at `address`.
    ///
    /// `address` must be a real material address; callers check for
    /// [`crate::NO_MATERIAL`] before dereferencing.
    pub fn read(arena: &Arena, address: Address) -> Self {
        let bytes = arena.read_bytes(address, MATERIAL_BYTES);
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        }
    }

    /// Channel bytes in record order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; MATERIAL_BYTES] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_read() {
        let mut arena = Arena::new(16);
        let red = Material::create(&mut arena, 255, 0, 0).unwrap();
        let teal = Material::create(&mut arena, 0, 128, 128).unwrap();
        assert_eq!(Material::read(&arena, red), Material::new(255, 0, 0));
        assert_eq!(Material::read(&arena, teal), Material::new(0, 128, 128));
        assert_eq!(arena.used(), 2 * MATERIAL_BYTES);
    }

    #[test]
    fn equality_is_byte_equality() {
        let mut arena = Arena::new(16);
        let a = Material::create(&mut arena, 10, 20, 30).unwrap();
        let b = Material::create(&mut arena, 10, 20, 30).unwrap();
        assert_ne!(a, b); // distinct records
        assert_eq!(Material::read(&arena, a), Material::read(&arena, b));
    }
}
