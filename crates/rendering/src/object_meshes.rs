//! Visuals for placed objects: the GLB model catalog for asset-backed kinds
//! and procedural meshes for custom blocks, plus per-kind pick volumes.

use bevy::prelude::*;

use simulation::config::{BLOCK_SIZE, TERRAIN_SIZE};
use simulation::objects::{BlockColor, ObjectKind, PlacedObject};

use crate::picking::PickBounds;

/// Scene handles for the asset-backed object kinds. Loading is asynchronous;
/// failures surface later through the pending-asset system.
#[derive(Resource)]
pub struct ModelCatalog {
    pub street_lamp: Handle<Scene>,
    pub house: Handle<Scene>,
    pub tree: Handle<Scene>,
}

impl ModelCatalog {
    pub fn scene_for(&self, kind: ObjectKind) -> Option<Handle<Scene>> {
        match kind {
            ObjectKind::StreetLight => Some(self.street_lamp.clone()),
            ObjectKind::House => Some(self.house.clone()),
            ObjectKind::Tree => Some(self.tree.clone()),
            ObjectKind::CustomBlock | ObjectKind::Road => None,
        }
    }
}

pub fn load_models(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ModelCatalog {
        street_lamp: asset_server
            .load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset("models/street_lamp.glb")),
        house: asset_server
            .load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset("models/brickhouse.glb")),
        tree: asset_server
            .load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset("models/tree.glb")),
    });
}

/// Pick volume for a kind, relative to the object's translation. Models sit
/// on the ground, so their volume centers half a height above the origin;
/// blocks are translated by their center already.
pub fn pick_bounds(kind: ObjectKind) -> PickBounds {
    let half_block = BLOCK_SIZE / 2.0;
    match kind {
        ObjectKind::StreetLight => PickBounds {
            offset: Vec3::new(0.0, 3.0, 0.0),
            half: Vec3::new(0.8, 3.0, 0.8),
        },
        ObjectKind::House => PickBounds {
            offset: Vec3::new(0.0, 2.5, 0.0),
            half: Vec3::new(4.0, 2.5, 4.0),
        },
        ObjectKind::Tree => PickBounds {
            offset: Vec3::new(0.0, 3.0, 0.0),
            half: Vec3::new(1.5, 3.0, 1.5),
        },
        ObjectKind::CustomBlock => PickBounds {
            offset: Vec3::ZERO,
            half: Vec3::splat(half_block),
        },
        // Roads store absolute geometry; their volume is computed from the
        // sampled curve at commit time, not from the kind.
        ObjectKind::Road => PickBounds {
            offset: Vec3::ZERO,
            half: Vec3::new(TERRAIN_SIZE / 2.0, 0.5, TERRAIN_SIZE / 2.0),
        },
    }
}

/// Spawn a custom block with its own mesh and material instance.
///
/// Shared by the build command executor and snapshot loading; the caller is
/// responsible for registering the returned entity and emitting
/// `InventoryChanged` in the same system.
pub fn spawn_custom_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    color: u32,
) -> Entity {
    let block_color = BlockColor(color);
    let mesh = meshes.add(Cuboid::new(BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE));
    let material = materials.add(StandardMaterial {
        base_color: block_color.to_color(),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    commands
        .spawn((
            PlacedObject {
                kind: ObjectKind::CustomBlock,
                cost: ObjectKind::CustomBlock.cost(),
            },
            block_color,
            pick_bounds(ObjectKind::CustomBlock),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_volume_matches_cube() {
        let bounds = pick_bounds(ObjectKind::CustomBlock);
        assert_eq!(bounds.half, Vec3::splat(BLOCK_SIZE / 2.0));
        assert_eq!(bounds.offset, Vec3::ZERO);
    }

    #[test]
    fn test_model_volumes_sit_on_ground() {
        for kind in [ObjectKind::StreetLight, ObjectKind::House, ObjectKind::Tree] {
            let bounds = pick_bounds(kind);
            // Volume bottom touches y = 0.
            assert!((bounds.offset.y - bounds.half.y).abs() < 1e-6, "{kind:?}");
        }
    }
}
