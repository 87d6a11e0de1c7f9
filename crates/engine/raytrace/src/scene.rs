//! Multi-object tracing and direct lighting
//!
//! Every object carries its octree plus a model-to-clip transform and its
//! inverse. A per-pixel pair of near/far clip-space points maps through
//! each inverse into a local ray, each object is traced in its own space,
//! and the nearest hit wins under a total order on clip-space distance.
//! Shading adds an ambient spectrum and, per light, the light's spectrum
//! when a shadow ray toward it crosses no object, attenuated by distance.

use std::cmp::Ordering;

use glam::{Mat4, Vec3};
use voxel::{Arena, Material, Octree};

use crate::tracer::trace_ray;

/// Offset applied to shadow-ray origins, in local octree units.
///
/// Lifts the origin off the surface it starts on so the occlusion trace
/// does not immediately re-resolve the surface voxel.
const SHADOW_BIAS: f32 = 1e-3;

/// One traceable octree with its placement.
pub struct SceneObject<'a> {
    pub arena: &'a Arena,
    pub tree: Octree,
    /// Local octree coordinates to clip space.
    pub to_clip: Mat4,
    /// Clip space back to local octree coordinates.
    pub from_clip: Mat4,
}

impl<'a> SceneObject<'a> {
    /// Build an object from its model-to-clip transform.
    pub fn new(arena: &'a Arena, tree: Octree, to_clip: Mat4) -> Self {
        Self {
            arena,
            tree,
            to_clip,
            from_clip: to_clip.inverse(),
        }
    }
}

/// A point light in clip space.
pub struct PointLight {
    pub position: Vec3,
    /// Emitted spectrum, linear RGB.
    pub color: Vec3,
}

/// Nearest surface found across a scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneHit {
    /// Index of the object that was hit.
    pub object: usize,
    /// Material value at the surface.
    pub material: Material,
    /// Surface point in the hit object's local coordinates.
    pub local_position: Vec3,
    /// The same point mapped to clip space.
    pub clip_position: Vec3,
    /// Clip-space distance from the near point; the selection key.
    pub distance: f32,
}

/// Trace all objects and keep the nearest hit.
///
/// `near` and `far` are the pixel's clip-space ray endpoints. Selection is
/// total-ordered by `f32::total_cmp` on clip distance; ties keep the
/// earlier object.
pub fn trace_scene(objects: &[SceneObject<'_>], near: Vec3, far: Vec3) -> Option<SceneHit> {
    let mut best: Option<SceneHit> = None;
    for (index, object) in objects.iter().enumerate() {
        let local_near = object.from_clip.project_point3(near);
        let local_far = object.from_clip.project_point3(far);
        let local_dir = (local_far - local_near).normalize_or_zero();
        if local_dir == Vec3::ZERO {
            continue;
        }
        let Some(hit) = trace_ray(object.arena, object.tree, local_near, local_dir) else {
            continue;
        };
        let clip_position = object.to_clip.project_point3(hit.position);
        let candidate = SceneHit {
            object: index,
            material: Material::read(object.arena, hit.material),
            local_position: hit.position,
            clip_position,
            distance: clip_position.distance(near),
        };
        let closer = best
            .as_ref()
            .is_none_or(|b| candidate.distance.total_cmp(&b.distance) == Ordering::Less);
        if closer {
            best = Some(candidate);
        }
    }
    best
}

/// Direct lighting at a scene hit.
///
/// Ambient plus each unoccluded light, attenuated by `1 / (1 + d^2)` on
/// clip-space distance. Returns linear RGB with the material's albedo
/// applied.
pub fn shade(
    objects: &[SceneObject<'_>],
    lights: &[PointLight],
    ambient: Vec3,
    hit: &SceneHit,
) -> Vec3 {
    let albedo = Vec3::new(
        hit.material.r as f32,
        hit.material.g as f32,
        hit.material.b as f32,
    ) / 255.0;

    let mut incoming = ambient;
    for light in lights {
        if occluded(objects, hit.clip_position, light.position) {
            continue;
        }
        let distance = hit.clip_position.distance(light.position);
        incoming += light.color / (1.0 + distance * distance);
    }
    albedo * incoming
}

/// Whether any object blocks the segment from `from` to `to` (clip space).
fn occluded(objects: &[SceneObject<'_>], from: Vec3, to: Vec3) -> bool {
    for object in objects {
        let local_from = object.from_clip.project_point3(from);
        let local_to = object.from_clip.project_point3(to);
        let toward = local_to - local_from;
        let length = toward.length();
        if length <= SHADOW_BIAS {
            continue;
        }
        let dir = toward / length;
        let start = local_from + dir * SHADOW_BIAS;
        if let Some(shadow) = trace_ray(object.arena, object.tree, start, dir) {
            // Only a blocker between the surface and the light occludes;
            // geometry beyond the light does not.
            if shadow.position.distance(local_from) < length {
                return true;
            }
        }
    }
    false
}
