//! Deep copies between arenas
//!
//! Cloning walks a source tree and rebuilds it in a destination arena,
//! deduplicating by source address through a [`RemapTable`]: two slots that
//! reference the same source record end up referencing one destination
//! record. Sharing already present in the source is preserved exactly and
//! no new duplication is introduced; collapsing *content-identical but
//! distinct* records is the compaction pass's job, not the cloner's.

use crate::address::{Address, RemapTable, NO_MATERIAL};
use crate::arena::{Arena, ArenaError};
use crate::material::{Material, MATERIAL_BYTES};
use crate::octree::{Octree, NODE_BYTES};

/// Clone the tree rooted at `tree.root` from `src` into `dst`.
///
/// `remap` must be sized to `src` and scoped to one clone pass; reusing it
/// across several roots from the same arena extends the dedup across them.
/// Returns the destination view, geometrically identical to the source.
pub fn clone_octree(
    src: &Arena,
    tree: Octree,
    dst: &mut Arena,
    remap: &mut RemapTable,
) -> Result<Octree, ArenaError> {
    let root = clone_node(src, tree.root, dst, remap)?;
    Ok(Octree {
        root,
        depth: tree.depth,
    })
}

fn clone_node(
    src: &Arena,
    node: Address,
    dst: &mut Arena,
    remap: &mut RemapTable,
) -> Result<Address, ArenaError> {
    if let Some(mapped) = remap.get(node) {
        return Ok(mapped);
    }
    let copy = dst.alloc(NODE_BYTES)?;
    // Recorded before recursing so structural reuse below this node maps
    // back to the copy instead of duplicating it.
    remap.insert(node, copy);

    let mask = src.read_u8(node);
    dst.write_u8(copy, mask);
    for index in 0..8u8 {
        let slot = 1 + 4 * index as u32;
        let child = src.read_address(node.offset(slot));
        let mapped = if mask & (1 << index) != 0 {
            clone_node(src, child, dst, remap)?
        } else if child == NO_MATERIAL {
            NO_MATERIAL
        } else {
            clone_material(src, child, dst, remap)?
        };
        dst.write_address(copy.offset(slot), mapped);
    }
    Ok(copy)
}

fn clone_material(
    src: &Arena,
    material: Address,
    dst: &mut Arena,
    remap: &mut RemapTable,
) -> Result<Address, ArenaError> {
    if let Some(mapped) = remap.get(material) {
        return Ok(mapped);
    }
    let value = Material::read(src, material);
    let copy = dst.alloc(MATERIAL_BYTES)?;
    dst.write_bytes(copy, &value.to_bytes());
    remap.insert(material, copy);
    Ok(copy)
}
