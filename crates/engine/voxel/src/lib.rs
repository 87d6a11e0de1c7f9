//! Flat-memory sparse voxel octree engine
//!
//! Octrees live inside a caller-supplied byte arena and reference each other
//! through raw 32-bit addresses instead of native pointers, so a whole
//! structure is relocatable as one block of bytes. The arena hands out
//! storage through a bump allocator and never frees individual regions;
//! whole-structure rebuilds (cloning, compaction) allocate a fresh arena
//! instead.
//!
//! # Modules
//!
//! - [`arena`]: fixed-capacity byte arena with a bump allocator
//! - [`address`]: 32-bit address newtype, sentinels and remap tables
//! - [`material`]: 3-byte RGB material records
//! - [`octree`]: 33-byte node records, point reads and splitting writes
//! - [`clone`]: deep copies between arenas with address-identity dedup
//! - [`compact`]: content deduplication onto an exact-fit arena
//! - [`io`]: binary snapshot serialization

pub mod address;
pub mod arena;
pub mod clone;
pub mod compact;
pub mod io;
pub mod material;
pub mod octree;

// Re-export main types and functions
pub use address::{Address, RemapTable, NO_MATERIAL};
pub use arena::{Arena, ArenaError};
pub use clone::clone_octree;
pub use compact::compact;
pub use io::{parse_snapshot, serialize_snapshot, SnapshotError};
pub use material::Material;
pub use octree::{Cell, Octree, OctreeError, NODE_BYTES};
