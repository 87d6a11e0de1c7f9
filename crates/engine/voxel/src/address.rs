//! 32-bit arena addresses, sentinels and remap tables
//!
//! An address is a byte offset into one specific arena; the pairing is the
//! caller's responsibility, an address alone carries no arena identity.
//! Keeping addresses as plain integers instead of references is what makes
//! a populated arena relocatable as a single block of bytes.

/// Byte offset into an arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Address(u32);

/// "This slot holds no surface" in octree child slots.
///
/// Shares its bit pattern with [`UNMAPPED`] but lives in a different
/// namespace: `NO_MATERIAL` is a valid persistent slot value, `UNMAPPED`
/// only ever appears inside a remap table during one clone or compaction
/// pass. The two are never compared against each other.
pub const NO_MATERIAL: Address = Address(u32::MAX);

/// "Source address not yet mapped" inside a [`RemapTable`].
const UNMAPPED: u32 = u32::MAX;

impl Address {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// The address `n` bytes past this one.
    #[inline]
    pub const fn offset(self, n: u32) -> Self {
        Self(self.0 + n)
    }
}

/// Source-to-destination address map for one clone or compaction pass.
///
/// Sized to the source arena's length so every possible source address has
/// a slot. Entries start unmapped; the table is discarded with the pass.
pub struct RemapTable {
    entries: Vec<u32>,
}

impl RemapTable {
    /// Create a table covering a source arena of `source_len` bytes.
    pub fn new(source_len: usize) -> Self {
        Self {
            entries: vec![UNMAPPED; source_len],
        }
    }

    /// Destination address recorded for `source`, if any.
    #[inline]
    pub fn get(&self, source: Address) -> Option<Address> {
        let raw = self.entries[source.to_usize()];
        if raw == UNMAPPED {
            None
        } else {
            Some(Address::new(raw))
        }
    }

    /// Record that `source` was copied to `destination`.
    #[inline]
    pub fn insert(&mut self, source: Address, destination: Address) {
        self.entries[source.to_usize()] = destination.raw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_starts_unmapped() {
        let table = RemapTable::new(64);
        assert_eq!(table.get(Address::new(0)), None);
        assert_eq!(table.get(Address::new(63)), None);
    }

    #[test]
    fn remap_insert_then_get() {
        let mut table = RemapTable::new(64);
        table.insert(Address::new(33), Address::new(7));
        assert_eq!(table.get(Address::new(33)), Some(Address::new(7)));
        assert_eq!(table.get(Address::new(34)), None);
    }

    #[test]
    fn sentinel_is_all_ones() {
        assert_eq!(NO_MATERIAL.raw(), u32::MAX);
    }
}
