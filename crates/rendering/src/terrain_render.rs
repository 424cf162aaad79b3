//! The textured ground plane and scene lighting.

use bevy::prelude::*;

use simulation::config::TERRAIN_SIZE;

#[derive(Component)]
pub struct Terrain;

/// Spawn the terrain plane at y = 0. The ground texture loads
/// asynchronously; until it resolves (or if it never does) the plane renders
/// with its flat base color.
pub fn spawn_terrain(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let texture: Handle<Image> = asset_server.load("textures/lalpur_c.png");
    let mesh = meshes.add(Plane3d::default().mesh().size(TERRAIN_SIZE, TERRAIN_SIZE));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.55, 0.35),
        base_color_texture: Some(texture),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    commands.spawn((
        Terrain,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        Visibility::default(),
    ));
}

pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
    });
}
