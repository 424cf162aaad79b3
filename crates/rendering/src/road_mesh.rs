//! Ribbon tessellation for committed roads.
//!
//! A sampled spline becomes a constant-width quad strip: each sample emits a
//! left/right vertex pair offset along the horizontal normal, consecutive
//! pairs close into two triangles. UVs span [0, 1] across the width and
//! `i / sample_count` along the length, so the center line and dashes come
//! from a procedurally generated texture rather than extra geometry.

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Small lift above the terrain so the ribbon never z-fights the ground.
pub const ROAD_SURFACE_Y: f32 = 0.05;

/// CPU-side vertex buffers for a road ribbon.
#[derive(Debug, Default)]
pub struct RibbonBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Extrude `samples` into a ribbon of `width` world units.
///
/// Tangents are forward differences; the final sample reuses the previous
/// tangent so the strip ends cleanly. Fewer than two samples produce empty
/// buffers.
pub fn build_road_ribbon(samples: &[Vec2], width: f32) -> RibbonBuffers {
    let mut buffers = RibbonBuffers::default();
    let n = samples.len();
    if n < 2 {
        return buffers;
    }

    let half_w = width / 2.0;
    buffers.positions.reserve(n * 2);
    buffers.normals.reserve(n * 2);
    buffers.uvs.reserve(n * 2);
    buffers.indices.reserve((n - 1) * 6);

    let mut tangent = Vec2::X;
    for (i, &pt) in samples.iter().enumerate() {
        if i + 1 < n {
            let fwd = samples[i + 1] - pt;
            if fwd.length_squared() > 1e-10 {
                tangent = fwd.normalize();
            }
        }
        // Rotate the tangent 90° in the ground plane.
        let normal = Vec2::new(-tangent.y, tangent.x);

        let left = pt - normal * half_w;
        let right = pt + normal * half_w;
        let v = i as f32 / n as f32;

        buffers.positions.push([left.x, ROAD_SURFACE_Y, left.y]);
        buffers.positions.push([right.x, ROAD_SURFACE_Y, right.y]);
        buffers.normals.push([0.0, 1.0, 0.0]);
        buffers.normals.push([0.0, 1.0, 0.0]);
        buffers.uvs.push([0.0, v]);
        buffers.uvs.push([1.0, v]);

        if i > 0 {
            let base = (i as u32 - 1) * 2;
            // Two triangles per quad, consistent winding for an up normal.
            buffers.indices.extend_from_slice(&[
                base,
                base + 2,
                base + 1,
                base + 1,
                base + 2,
                base + 3,
            ]);
        }
    }

    buffers
}

/// Axis-aligned bounds of the sampled curve, widened by the ribbon width;
/// used as the committed road's pick volume.
pub fn ribbon_pick_volume(samples: &[Vec2], width: f32) -> (Vec3, Vec3) {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for &p in samples {
        min = min.min(p);
        max = max.max(p);
    }
    if samples.is_empty() {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    let half_w = width / 2.0;
    let center = (min + max) / 2.0;
    let half = (max - min) / 2.0 + Vec2::splat(half_w);
    (
        Vec3::new(center.x, ROAD_SURFACE_Y, center.y),
        Vec3::new(half.x, 0.5, half.y),
    )
}

pub fn ribbon_mesh(buffers: RibbonBuffers) -> Mesh {
    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, buffers.positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, buffers.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, buffers.uvs)
    .with_inserted_indices(Indices::U32(buffers.indices))
}

const SURFACE_TEX_W: u32 = 64;
const SURFACE_TEX_H: u32 = 256;
/// Center stripe covers |u - 0.5| below this threshold.
const STRIPE_HALF_WIDTH: f32 = 0.05;
/// Dash cycles along the texture's length axis.
const DASH_CYCLES: f32 = 8.0;
/// Fraction of each cycle that is painted.
const DASH_DUTY: f32 = 0.55;

/// Whether the lane-marking pattern paints the texel at (u, v): a
/// threshold on the width axis and a modulo test along the length axis.
pub fn lane_marking_at(u: f32, v: f32) -> bool {
    (u - 0.5).abs() < STRIPE_HALF_WIDTH && (v * DASH_CYCLES).fract() < DASH_DUTY
}

/// Generate the shared road surface texture: asphalt with a dashed center
/// line, driven entirely by the ribbon's UV layout.
pub fn road_surface_image() -> Image {
    let asphalt: [u8; 4] = [70, 70, 74, 255];
    let marking: [u8; 4] = [230, 225, 180, 255];

    let mut data = Vec::with_capacity((SURFACE_TEX_W * SURFACE_TEX_H * 4) as usize);
    for y in 0..SURFACE_TEX_H {
        let v = y as f32 / SURFACE_TEX_H as f32;
        for x in 0..SURFACE_TEX_W {
            let u = x as f32 / SURFACE_TEX_W as f32;
            let texel = if lane_marking_at(u, v) { marking } else { asphalt };
            data.extend_from_slice(&texel);
        }
    }

    Image::new(
        Extent3d {
            width: SURFACE_TEX_W,
            height: SURFACE_TEX_H,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}
