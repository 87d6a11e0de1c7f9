//! Binary snapshot serialization
//!
//! A snapshot persists one arena together with the octree roots living in
//! it. Because the in-memory layout is already position-independent (raw
//! offsets, no pointers), the payload is the arena's used prefix verbatim;
//! parsing rebuilds a bit-exact arena that interoperates with cloning and
//! compaction like any freshly populated one.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! offset  0  u32  magic "VXA1"
//! offset  4  u8   version (currently 1)
//! offset  5  3B   reserved
//! offset  8  u32  tree count
//! offset 12  u32  payload length
//! offset 16  per tree: u32 root address, u32 depth
//! then       payload (arena used bytes)
//! ```

use crate::address::Address;
use crate::arena::Arena;
use crate::octree::{Octree, NODE_BYTES};

/// "VXA1" in ASCII.
pub const SNAPSHOT_MAGIC: u32 = 0x5658_4131;

/// Current snapshot version.
pub const SNAPSHOT_VERSION: u8 = 1;

const HEADER_BYTES: usize = 16;
const TREE_ENTRY_BYTES: usize = 8;

/// Errors raised while parsing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Fewer bytes than the declared structure requires.
    #[error("truncated snapshot: expected {expected_bytes} bytes, {available_bytes} available")]
    TruncatedData {
        expected_bytes: usize,
        available_bytes: usize,
    },

    /// The magic number does not identify a snapshot.
    #[error("invalid magic: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic { expected: u32, found: u32 },

    /// The version byte names a format this parser does not know.
    #[error("unsupported snapshot version {found}")]
    UnsupportedVersion { found: u8 },

    /// A root address does not leave room for a node inside the payload.
    #[error("root address {root} out of range for payload of {payload_len} bytes")]
    RootOutOfRange { root: u32, payload_len: usize },
}

/// Serialize `arena` and the given tree views into a snapshot buffer.
pub fn serialize_snapshot(arena: &Arena, trees: &[Octree]) -> Vec<u8> {
    let payload = arena.used_bytes();
    let mut out =
        Vec::with_capacity(HEADER_BYTES + trees.len() * TREE_ENTRY_BYTES + payload.len());
    out.extend_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
    out.push(SNAPSHOT_VERSION);
    out.extend_from_slice(&[0, 0, 0]);
    out.extend_from_slice(&(trees.len() as u32).to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    for tree in trees {
        out.extend_from_slice(&tree.root.raw().to_le_bytes());
        out.extend_from_slice(&tree.depth.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// Parse a snapshot back into an arena and its tree views.
pub fn parse_snapshot(data: &[u8]) -> Result<(Arena, Vec<Octree>), SnapshotError> {
    if data.len() < HEADER_BYTES {
        return Err(SnapshotError::TruncatedData {
            expected_bytes: HEADER_BYTES,
            available_bytes: data.len(),
        });
    }

    let magic = read_u32(data, 0);
    if magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::InvalidMagic {
            expected: SNAPSHOT_MAGIC,
            found: magic,
        });
    }
    let version = data[4];
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: version });
    }

    let tree_count = read_u32(data, 8) as usize;
    let payload_len = read_u32(data, 12) as usize;
    let expected = HEADER_BYTES + tree_count * TREE_ENTRY_BYTES + payload_len;
    if data.len() < expected {
        return Err(SnapshotError::TruncatedData {
            expected_bytes: expected,
            available_bytes: data.len(),
        });
    }

    let mut trees = Vec::with_capacity(tree_count);
    for entry in 0..tree_count {
        let at = HEADER_BYTES + entry * TREE_ENTRY_BYTES;
        let root = read_u32(data, at);
        let depth = read_u32(data, at + 4);
        if root as usize + NODE_BYTES > payload_len {
            return Err(SnapshotError::RootOutOfRange { root, payload_len });
        }
        trees.push(Octree {
            root: Address::new(root),
            depth,
        });
    }

    let payload_at = HEADER_BYTES + tree_count * TREE_ENTRY_BYTES;
    let arena = Arena::from_bytes(data[payload_at..payload_at + payload_len].to_vec());
    Ok((arena, trees))
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
