//! Ray marching through one octree
//!
//! The tracer never keeps a traversal stack: every step converts the
//! current position to integer coordinates, descends from the root, and
//! either stops on a material or jumps to the exit face of the empty leaf
//! cell it landed in. Restarting from the root costs one logarithmic
//! descent per step, paid for by skipping whole empty subtrees at a time.

use glam::Vec3;
use voxel::{Address, Arena, Octree, NO_MATERIAL};

use crate::geometry::{enter_cube, exit_cube};

/// A resolved surface along a ray.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Material address inside the traced arena.
    pub material: Address,
    /// Surface point on the hit voxel's cube, in octree coordinates.
    pub position: Vec3,
}

/// Integer cell coordinate for a position, biased toward the ray direction.
///
/// A point exactly on a cell boundary belongs to the cell the ray is
/// entering, not the one it is leaving; without the bias the march would
/// re-resolve the cell it just left and stall.
#[inline]
fn cell_coord(p: f32, d: f32) -> i64 {
    let floor = p.floor();
    if d < 0.0 && p == floor {
        floor as i64 - 1
    } else {
        floor as i64
    }
}

/// First material surface along the ray through `tree`, if any.
///
/// Returns `None` when the ray misses the root cube entirely or crosses it
/// without touching a non-empty voxel.
pub fn trace_ray(arena: &Arena, tree: Octree, origin: Vec3, dir: Vec3) -> Option<RayHit> {
    let side = tree.side();
    let mut pos = enter_cube(origin, dir, side as f32)?;

    // A straight path crosses at most 3*side cells; the slack absorbs
    // numeric edge cases near cell boundaries.
    let max_steps = side as usize * 4;
    for _ in 0..max_steps {
        let ix = cell_coord(pos.x, dir.x);
        let iy = cell_coord(pos.y, dir.y);
        let iz = cell_coord(pos.z, dir.z);
        let inside = [ix, iy, iz].iter().all(|&c| c >= 0 && c < side as i64);
        if !inside {
            return None;
        }

        let cell = tree.probe(arena, ix as u32, iy as u32, iz as u32);
        if cell.value != NO_MATERIAL {
            return Some(RayHit {
                material: cell.value,
                position: pos,
            });
        }

        // Empty leaf: jump to where the ray leaves its cube.
        let cube_origin = Vec3::new(
            cell.origin[0] as f32,
            cell.origin[1] as f32,
            cell.origin[2] as f32,
        );
        pos = exit_cube(pos, dir, cube_origin, cell.side as f32)?;
    }
    None
}
