//! Ray/cube intersection primitives
//!
//! Both intersections work one axis at a time: pick the candidate face
//! plane on that axis, derive the other two coordinates by similar
//! triangles along the ray, and accept the point if it lies on the face.
//! A ray that is degenerate or divergent on every axis has no solution;
//! that is an expected, frequent outcome and is reported as `None`, never
//! a panic.

use glam::Vec3;

/// Entry point of a ray into the axis-aligned cube `[0, side]^3`.
///
/// An origin already inside the cube clamps to itself, so the "entry" of an
/// interior ray is its own origin.
pub fn enter_cube(origin: Vec3, dir: Vec3, side: f32) -> Option<Vec3> {
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        // Candidate face on this axis, only if the ray moves toward it.
        let target = if d > 0.0 {
            if o > side {
                continue;
            }
            o.max(0.0)
        } else if d < 0.0 {
            if o < 0.0 {
                continue;
            }
            o.min(side)
        } else {
            continue;
        };

        let t = (target - o) / d;
        let mut point = origin + dir * t;
        point[axis] = target;
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        if point[u] >= 0.0 && point[u] <= side && point[v] >= 0.0 && point[v] <= side {
            return Some(point);
        }
    }
    None
}

/// Exit point of a ray out of the cube at `cube_origin` with the given side.
///
/// Used on a ray currently on or inside one octree cell to find where it
/// leaves that cell's cube. Same per-axis scheme as [`enter_cube`], aimed
/// at the far face of each axis instead of the near one.
pub fn exit_cube(origin: Vec3, dir: Vec3, cube_origin: Vec3, side: f32) -> Option<Vec3> {
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let target = if d > 0.0 {
            cube_origin[axis] + side
        } else if d < 0.0 {
            cube_origin[axis]
        } else {
            continue;
        };

        let t = (target - o) / d;
        let mut point = origin + dir * t;
        point[axis] = target;
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        if point[u] >= cube_origin[u]
            && point[u] <= cube_origin[u] + side
            && point[v] >= cube_origin[v]
            && point[v] <= cube_origin[v] + side
        {
            return Some(point);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enters_through_facing_plane() {
        let hit = enter_cube(Vec3::new(1.0, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 2.0).unwrap();
        assert_eq!(hit, Vec3::new(1.0, 1.0, 2.0));

        let hit = enter_cube(Vec3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0), 2.0).unwrap();
        assert_eq!(hit, Vec3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn interior_origin_returns_itself() {
        let origin = Vec3::new(0.5, 1.5, 1.0);
        let hit = enter_cube(origin, Vec3::new(0.3, -0.2, 0.9), 2.0).unwrap();
        assert_eq!(hit, origin);
    }

    #[test]
    fn diagonal_entry_derives_other_axes() {
        // From (-2, 0, 0) along (1, 0.25, 0.25): reaches x=0 at t=2.
        let hit = enter_cube(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.25, 0.25),
            2.0,
        )
        .unwrap();
        assert_eq!(hit, Vec3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn pointing_away_misses() {
        assert!(enter_cube(Vec3::new(1.0, 1.0, 10.0), Vec3::new(0.0, 0.0, 1.0), 2.0).is_none());
        assert!(enter_cube(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(-1.0, -1.0, -1.0), 2.0).is_none());
    }

    #[test]
    fn passing_beside_misses() {
        // Parallel to z, offset outside in x.
        assert!(enter_cube(Vec3::new(5.0, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 2.0).is_none());
    }

    #[test]
    fn degenerate_direction_is_invalid() {
        assert!(enter_cube(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn exits_through_far_face() {
        // Inside [1,2]^3, heading -z: leaves through z = 1.
        let out = exit_cube(
            Vec3::new(1.5, 1.5, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            1.0,
        )
        .unwrap();
        assert_eq!(out, Vec3::new(1.5, 1.5, 1.0));
    }

    #[test]
    fn exit_picks_nearest_face() {
        // Heading mostly +x from the middle: the x face comes first.
        let out = exit_cube(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(1.0, 0.1, 0.1),
            Vec3::ZERO,
            1.0,
        )
        .unwrap();
        assert_eq!(out.x, 1.0);
        assert!(out.y > 0.5 && out.y < 1.0);
        assert!(out.z > 0.5 && out.z < 1.0);
    }
}
