//! Scene descriptions and octree construction
//!
//! A scene is a camera, lights and a list of voxel objects, each object a
//! set of solid axis-aligned boxes of RGB material inside its own octree.
//! Objects are built on scratch arenas and then compacted onto one shared
//! arena, so identical materials and subtrees across objects are stored
//! once.

use std::collections::HashMap;

use anyhow::Context;
use glam::{Mat4, Vec3};
use serde::Deserialize;
use voxel::octree::{max_material_bytes, max_node_bytes};
use voxel::{compact, Address, Arena, Material, Octree, NO_MATERIAL};

/// Deepest tree the tool will allocate for (side 128).
const MAX_DEPTH: u32 = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    pub objects: Vec<ObjectConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    /// World-space position.
    pub position: [f32; 3],
    /// Emitted spectrum, linear RGB.
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    /// Octree depth; the object spans `2 * 2^depth` voxels per axis.
    pub depth: u32,
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub boxes: Vec<BoxConfig>,
}

/// A solid box of one material, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxConfig {
    pub min: [u32; 3],
    pub max: [u32; 3],
    pub rgb: [u8; 3],
}

fn default_ambient() -> [f32; 3] {
    [0.15, 0.15, 0.18]
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    45.0
}

fn default_scale() -> f32 {
    1.0
}

/// An object ready for tracing: its tree on the shared arena plus its
/// model (local-to-world) matrix.
pub struct BuiltObject {
    pub tree: Octree,
    pub model: Mat4,
}

/// Build every object's octree and compact them onto one arena.
pub fn build(config: &SceneConfig) -> anyhow::Result<(Arena, Vec<BuiltObject>)> {
    let mut staged = Vec::new();
    for (index, object) in config.objects.iter().enumerate() {
        let staged_object = build_object(object)
            .with_context(|| format!("building scene object {index}"))?;
        staged.push(staged_object);
    }

    let inputs: Vec<(&Arena, Octree)> = staged
        .iter()
        .map(|(arena, tree)| (arena, *tree))
        .collect();
    let (merged, trees) = compact(&inputs).context("compacting scene arenas")?;

    let objects = config
        .objects
        .iter()
        .zip(trees)
        .map(|(object, tree)| BuiltObject {
            tree,
            model: Mat4::from_translation(Vec3::from(object.translation))
                * Mat4::from_scale(Vec3::splat(object.scale)),
        })
        .collect();
    Ok((merged, objects))
}

fn build_object(config: &ObjectConfig) -> anyhow::Result<(Arena, Octree)> {
    anyhow::ensure!(
        config.depth <= MAX_DEPTH,
        "object depth {} exceeds maximum {MAX_DEPTH}",
        config.depth
    );
    let bytes = max_node_bytes(config.depth) + max_material_bytes(config.depth);
    let mut arena = Arena::new(bytes as usize);
    let tree = Octree::create(&mut arena, config.depth, NO_MATERIAL)?;
    let side = tree.side();

    // One material record per distinct RGB within the object; compaction
    // extends the sharing across objects later.
    let mut materials: HashMap<[u8; 3], Address> = HashMap::new();
    for solid in &config.boxes {
        let material = match materials.get(&solid.rgb) {
            Some(&address) => address,
            None => {
                let address =
                    Material::create(&mut arena, solid.rgb[0], solid.rgb[1], solid.rgb[2])?;
                materials.insert(solid.rgb, address);
                address
            }
        };
        for axis in 0..3 {
            anyhow::ensure!(
                solid.min[axis] < solid.max[axis] && solid.max[axis] <= side,
                "box bounds {:?}..{:?} outside object side {side}",
                solid.min,
                solid.max
            );
        }
        for z in solid.min[2]..solid.max[2] {
            for y in solid.min[1]..solid.max[1] {
                for x in solid.min[0]..solid.max[0] {
                    tree.write(&mut arena, x, y, z, material)?;
                }
            }
        }
    }
    Ok((arena, tree))
}

/// The scene rendered when no description file is given: a ground slab,
/// a tower and a floating cube, lit by a warm key light and a cool fill.
pub fn demo_scene() -> SceneConfig {
    SceneConfig {
        camera: CameraConfig {
            eye: [34.0, 22.0, 30.0],
            target: [8.0, 4.0, 8.0],
            up: default_up(),
            fov_degrees: default_fov(),
        },
        ambient: default_ambient(),
        lights: vec![
            LightConfig {
                position: [24.0, 28.0, 20.0],
                color: [1.0, 0.9, 0.7],
            },
            LightConfig {
                position: [-10.0, 18.0, 26.0],
                color: [0.3, 0.35, 0.5],
            },
        ],
        objects: vec![ObjectConfig {
            depth: 3,
            translation: [0.0, 0.0, 0.0],
            scale: 1.0,
            boxes: vec![
                // Ground slab
                BoxConfig {
                    min: [0, 0, 0],
                    max: [16, 3, 16],
                    rgb: [90, 110, 70],
                },
                // Tower
                BoxConfig {
                    min: [5, 3, 5],
                    max: [8, 12, 8],
                    rgb: [180, 60, 50],
                },
                // Floating cube
                BoxConfig {
                    min: [10, 7, 9],
                    max: [13, 10, 12],
                    rgb: [60, 90, 200],
                },
            ],
        }],
    }
}
