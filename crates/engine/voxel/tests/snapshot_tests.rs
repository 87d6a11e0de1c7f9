//! Snapshot round-trip and error handling validation
//!
//! Verifies that parse_snapshot rebuilds bit-exact arenas and rejects
//! malformed data with the appropriate error types.

use voxel::io::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use voxel::{
    parse_snapshot, serialize_snapshot, Arena, Material, Octree, SnapshotError, NO_MATERIAL,
};

/// Helper: an arena holding one small populated tree.
fn populated_arena() -> (Arena, Octree) {
    let mut arena = Arena::new(512);
    let tree = Octree::create(&mut arena, 1, NO_MATERIAL).unwrap();
    let red = Material::create(&mut arena, 255, 0, 0).unwrap();
    let blue = Material::create(&mut arena, 0, 0, 255).unwrap();
    tree.write(&mut arena, 0, 0, 0, red).unwrap();
    tree.write(&mut arena, 3, 1, 2, blue).unwrap();
    (arena, tree)
}

#[test]
fn round_trip_is_bit_exact() {
    let (arena, tree) = populated_arena();
    let bytes = serialize_snapshot(&arena, &[tree]);
    let (restored, trees) = parse_snapshot(&bytes).unwrap();

    assert_eq!(restored.used_bytes(), arena.used_bytes());
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0], tree);

    let side = tree.side();
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                assert_eq!(
                    trees[0].read(&restored, x, y, z),
                    tree.read(&arena, x, y, z)
                );
            }
        }
    }
}

#[test]
fn restored_arena_interoperates_with_mutation() {
    let (arena, tree) = populated_arena();
    let bytes = serialize_snapshot(&arena, &[tree]);
    let (mut restored, trees) = parse_snapshot(&bytes).unwrap();

    // The restored cursor sits at the end of the payload: the arena is
    // exactly full, and allocation-free writes still work against it.
    assert_eq!(restored.used(), restored.capacity());
    let red = trees[0].read(&restored, 0, 0, 0);
    trees[0].write(&mut restored, 1, 0, 0, red).unwrap();
    assert_eq!(trees[0].read(&restored, 1, 0, 0), red);
}

#[test]
fn empty_buffer_rejected() {
    let empty: &[u8] = &[];
    match parse_snapshot(empty).unwrap_err() {
        SnapshotError::TruncatedData {
            expected_bytes,
            available_bytes,
        } => {
            assert_eq!(expected_bytes, 16, "should expect 16-byte header");
            assert_eq!(available_bytes, 0);
        }
        other => panic!("expected TruncatedData, got {other:?}"),
    }
}

#[test]
fn partial_header_rejected() {
    let partial: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8];
    match parse_snapshot(partial).unwrap_err() {
        SnapshotError::TruncatedData {
            expected_bytes,
            available_bytes,
        } => {
            assert_eq!(expected_bytes, 16);
            assert_eq!(available_bytes, 8);
        }
        other => panic!("expected TruncatedData, got {other:?}"),
    }
}

#[test]
fn invalid_magic_rejected() {
    let mut bad = 0xDEADBEEFu32.to_le_bytes().to_vec();
    bad.extend_from_slice(&[SNAPSHOT_VERSION, 0, 0, 0]);
    bad.extend_from_slice(&0u32.to_le_bytes()); // tree count
    bad.extend_from_slice(&0u32.to_le_bytes()); // payload length

    match parse_snapshot(&bad).unwrap_err() {
        SnapshotError::InvalidMagic { expected, found } => {
            assert_eq!(expected, SNAPSHOT_MAGIC);
            assert_eq!(found, 0xDEADBEEF);
        }
        other => panic!("expected InvalidMagic, got {other:?}"),
    }
}

#[test]
fn unsupported_version_rejected() {
    let mut bad = SNAPSHOT_MAGIC.to_le_bytes().to_vec();
    bad.extend_from_slice(&[99, 0, 0, 0]);
    bad.extend_from_slice(&0u32.to_le_bytes());
    bad.extend_from_slice(&0u32.to_le_bytes());

    match parse_snapshot(&bad).unwrap_err() {
        SnapshotError::UnsupportedVersion { found } => assert_eq!(found, 99),
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn truncated_payload_rejected() {
    let (arena, tree) = populated_arena();
    let mut bytes = serialize_snapshot(&arena, &[tree]);
    bytes.truncate(bytes.len() - 10);

    match parse_snapshot(&bytes).unwrap_err() {
        SnapshotError::TruncatedData { .. } => {}
        other => panic!("expected TruncatedData, got {other:?}"),
    }
}

#[test]
fn root_beyond_payload_rejected() {
    let mut bad = SNAPSHOT_MAGIC.to_le_bytes().to_vec();
    bad.extend_from_slice(&[SNAPSHOT_VERSION, 0, 0, 0]);
    bad.extend_from_slice(&1u32.to_le_bytes()); // one tree
    bad.extend_from_slice(&8u32.to_le_bytes()); // 8-byte payload
    bad.extend_from_slice(&100u32.to_le_bytes()); // root at 100, past payload
    bad.extend_from_slice(&0u32.to_le_bytes()); // depth
    bad.extend_from_slice(&[0u8; 8]); // payload

    match parse_snapshot(&bad).unwrap_err() {
        SnapshotError::RootOutOfRange { root, payload_len } => {
            assert_eq!(root, 100);
            assert_eq!(payload_len, 8);
        }
        other => panic!("expected RootOutOfRange, got {other:?}"),
    }
}
