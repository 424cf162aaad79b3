//! Pointer picking: ray construction lives with the camera
//! (`Camera::viewport_to_world`); this module owns the pure intersection
//! math and the resolution of a hit to its logical object.
//!
//! Placed objects are hit-tested against per-object axis-aligned bounds.
//! The registry only ever holds tagged root entities, so a hit resolves
//! directly to its logical object — there is no parent chain to walk.

use bevy::prelude::*;

/// Axis-aligned pick volume for a placed object, relative to its transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickBounds {
    /// Offset from the entity translation to the volume center.
    pub offset: Vec3,
    /// Half extents of the volume.
    pub half: Vec3,
}

/// Intersect `ray` with the ground plane y = 0. Returns the hit point, or
/// `None` when the ray is parallel to or pointing away from the plane.
pub fn ray_ground_intersection(ray: Ray3d) -> Option<Vec3> {
    let dir = *ray.direction;
    if dir.y.abs() < 1e-4 {
        return None;
    }
    let t = -ray.origin.y / dir.y;
    if t <= 0.0 {
        return None;
    }
    Some(ray.origin + dir * t)
}

/// Slab-test `ray` against an AABB centered at `center` with `half` extents.
/// Returns the entry distance along the ray, or `None` on a miss.
pub fn ray_aabb_intersection(ray: Ray3d, center: Vec3, half: Vec3) -> Option<f32> {
    let dir = *ray.direction;
    let min = center - half;
    let max = center + half;

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-8 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - origin) / d;
        let t2 = (max[axis] - origin) / d;
        let (t1, t2) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_near = t_near.max(t1);
        t_far = t_far.min(t2);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Resolve the topmost (nearest) logical object under `ray`.
pub fn pick_nearest(
    ray: Ray3d,
    candidates: impl Iterator<Item = (Entity, Vec3, Vec3)>,
) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, center, half) in candidates {
        if let Some(t) = ray_aabb_intersection(ray, center, half) {
            if best.map(|(_, bt)| t < bt).unwrap_or(true) {
                best = Some((entity, t));
            }
        }
    }
    best
}

/// Map normalized device coordinates to viewport pixels (vertical flip).
/// Used to anchor the context panel at an object's projected position.
pub fn ndc_to_viewport(ndc: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    )
}
