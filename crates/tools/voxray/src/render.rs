//! Per-pixel rendering through the multi-object tracer
//!
//! The camera produces a clip-space near/far point pair per pixel; every
//! object's model matrix is composed with the view-projection so the
//! tracer works entirely in the spaces the scene module describes. Lights
//! are mapped into clip space the same way.

use glam::{Mat4, Vec3};
use image::{Rgb, RgbImage};
use raytrace::{shade, trace_scene, PointLight, SceneObject};
use voxel::Arena;

use crate::scene::{BuiltObject, SceneConfig};

/// Background for rays that hit nothing.
const SKY: Vec3 = Vec3::new(0.35, 0.45, 0.6);

pub fn render(
    arena: &Arena,
    objects: &[BuiltObject],
    config: &SceneConfig,
    width: u32,
    height: u32,
) -> RgbImage {
    let aspect = width as f32 / height as f32;
    let view = Mat4::look_at_rh(
        Vec3::from(config.camera.eye),
        Vec3::from(config.camera.target),
        Vec3::from(config.camera.up).normalize(),
    );
    let proj = Mat4::perspective_rh(
        config.camera.fov_degrees.to_radians(),
        aspect,
        0.1,
        200.0,
    );
    let view_proj = proj * view;

    let scene_objects: Vec<SceneObject<'_>> = objects
        .iter()
        .map(|object| SceneObject::new(arena, object.tree, view_proj * object.model))
        .collect();
    let lights: Vec<PointLight> = config
        .lights
        .iter()
        .map(|light| PointLight {
            position: view_proj.project_point3(Vec3::from(light.position)),
            color: Vec3::from(light.color),
        })
        .collect();
    let ambient = Vec3::from(config.ambient);

    let mut frame = RgbImage::new(width, height);
    for (px, py, pixel) in frame.enumerate_pixels_mut() {
        let ndc_x = (px as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (py as f32 + 0.5) / height as f32 * 2.0;
        let near = Vec3::new(ndc_x, ndc_y, 0.0);
        let far = Vec3::new(ndc_x, ndc_y, 1.0);

        let color = match trace_scene(&scene_objects, near, far) {
            Some(hit) => shade(&scene_objects, &lights, ambient, &hit),
            None => SKY,
        };
        *pixel = Rgb([to_channel(color.x), to_channel(color.y), to_channel(color.z)]);
    }
    frame
}

#[inline]
fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
