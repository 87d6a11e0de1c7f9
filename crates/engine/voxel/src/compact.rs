//! Content compaction onto an exact-fit arena
//!
//! Merges any number of octrees, each possibly on its own arena, into one
//! minimal destination arena where:
//!
//! (a) materials with identical RGB values are stored exactly once,
//! (b) structurally and materially identical subtrees are stored exactly
//!     once,
//! (c) every output byte is reachable from one of the output roots.
//!
//! Deduplication is content-keyed: nodes are emitted post-order, so a
//! node's destination record (mask byte plus canonical child addresses) is
//! itself a complete content key, and a map from emitted records to their
//! addresses collapses duplicates regardless of which input they came
//! from. A per-input [`RemapTable`] memoizes shared source subtrees so each
//! is visited once.

use std::collections::HashMap;

use crate::address::{Address, RemapTable, NO_MATERIAL};
use crate::arena::{Arena, ArenaError};
use crate::material::{Material, MATERIAL_BYTES};
use crate::octree::{Octree, NODE_BYTES};

/// Compact `inputs` onto one freshly allocated, exactly-fitting arena.
///
/// Returns the arena and the output view for each input tree, in order.
/// Trees with identical content collapse to the same root address.
pub fn compact(inputs: &[(&Arena, Octree)]) -> Result<(Arena, Vec<Octree>), ArenaError> {
    // Dedup never grows, so the sum of input prefixes bounds the output.
    let bound: usize = inputs.iter().map(|(arena, _)| arena.used()).sum();
    let mut scratch = Arena::new(bound);
    let mut pass = Pass {
        materials: HashMap::new(),
        nodes: HashMap::new(),
    };

    let mut roots = Vec::with_capacity(inputs.len());
    for (arena, tree) in inputs {
        let mut remap = RemapTable::new(arena.used());
        let root = pass.compact_node(arena, tree.root, &mut scratch, &mut remap)?;
        roots.push(Octree {
            root,
            depth: tree.depth,
        });
    }

    tracing::debug!(
        inputs = inputs.len(),
        input_bytes = bound,
        output_bytes = scratch.used(),
        unique_nodes = pass.nodes.len(),
        unique_materials = pass.materials.len(),
        "compacted octrees"
    );

    // Bump allocation keeps all reachable records in the used prefix, so
    // copying it into an exact-fit arena leaves every address valid.
    let sealed = Arena::from_bytes(scratch.used_bytes().to_vec());
    Ok((sealed, roots))
}

struct Pass {
    /// RGB bytes -> canonical destination material.
    materials: HashMap<[u8; MATERIAL_BYTES], Address>,
    /// Emitted node record -> canonical destination node.
    nodes: HashMap<[u8; NODE_BYTES], Address>,
}

impl Pass {
    fn compact_node(
        &mut self,
        src: &Arena,
        node: Address,
        dst: &mut Arena,
        remap: &mut RemapTable,
    ) -> Result<Address, ArenaError> {
        if let Some(mapped) = remap.get(node) {
            return Ok(mapped);
        }

        let mask = src.read_u8(node);
        let mut record = [0u8; NODE_BYTES];
        record[0] = mask;
        for index in 0..8u8 {
            let slot = 1 + 4 * index as usize;
            let child = src.read_address(node.offset(slot as u32));
            let mapped = if mask & (1 << index) != 0 {
                self.compact_node(src, child, dst, remap)?
            } else if child == NO_MATERIAL {
                NO_MATERIAL
            } else {
                self.compact_material(src, child, dst)?
            };
            record[slot..slot + 4].copy_from_slice(&mapped.raw().to_le_bytes());
        }

        let canonical = match self.nodes.get(&record) {
            Some(&existing) => existing,
            None => {
                let emitted = dst.alloc(NODE_BYTES)?;
                dst.write_bytes(emitted, &record);
                self.nodes.insert(record, emitted);
                emitted
            }
        };
        remap.insert(node, canonical);
        Ok(canonical)
    }

    fn compact_material(
        &mut self,
        src: &Arena,
        material: Address,
        dst: &mut Arena,
    ) -> Result<Address, ArenaError> {
        let key = Material::read(src, material).to_bytes();
        if let Some(&existing) = self.materials.get(&key) {
            return Ok(existing);
        }
        let emitted = dst.alloc(MATERIAL_BYTES)?;
        dst.write_bytes(emitted, &key);
        self.materials.insert(key, emitted);
        Ok(emitted)
    }
}
