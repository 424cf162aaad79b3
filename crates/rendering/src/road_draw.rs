//! Freehand road drawing: stroke input, live preview, and commit.
//!
//! While road mode is active, holding the left button feeds ground points
//! into the draft (spacing-gated). Every accepted point regenerates a
//! lightweight spline polyline preview. Releasing the button commits: the
//! draft is re-sampled at commit resolution, priced by arc length, and
//! extruded into a ribbon — or rolled back entirely if the wallet cannot
//! cover it.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy_egui::EguiContexts;

use simulation::economy::Wallet;
use simulation::game_actions::ActionError;
use simulation::modes::InteractionMode;
use simulation::objects::{InventoryChanged, ObjectKind, ObjectRegistry, PlacedObject, RoadRibbon};
use simulation::road_draft::{RoadDraft, RoadStyle};
use simulation::spline::polyline_length;
use simulation::telemetry::PlacementEvent;

use crate::input::{egui_wants_pointer, CursorGround, StatusMessage};
use crate::picking::PickBounds;
use crate::road_mesh::{
    build_road_ribbon, ribbon_mesh, ribbon_pick_volume, road_surface_image, ROAD_SURFACE_Y,
};

/// Height of the preview polyline above the terrain.
const PREVIEW_Y: f32 = ROAD_SURFACE_Y + 0.05;

/// Marker for the transient preview polyline entity.
#[derive(Component)]
pub struct RoadPreview;

/// Shared road appearance assets, created once at startup.
#[derive(Resource)]
pub struct RoadSurface {
    pub material: Handle<StandardMaterial>,
    pub preview_material: Handle<StandardMaterial>,
}

pub fn setup_road_surface(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let surface = images.add(road_surface_image());
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(surface),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let preview_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.85, 0.2),
        unlit: true,
        ..default()
    });
    commands.insert_resource(RoadSurface {
        material,
        preview_material,
    });
}

pub fn despawn_road_preview(commands: &mut Commands, preview_q: &Query<Entity, With<RoadPreview>>) {
    for entity in preview_q.iter() {
        commands.entity(entity).despawn();
    }
}

/// Line-strip mesh through the preview samples.
fn preview_mesh(samples: &[Vec2]) -> Mesh {
    let positions: Vec<[f32; 3]> = samples.iter().map(|p| [p.x, PREVIEW_Y, p.y]).collect();
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];
    let uvs = vec![[0.0, 0.0]; positions.len()];
    Mesh::new(
        PrimitiveTopology::LineStrip,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
}

/// Price the draft, spend, and spawn the committed ribbon.
///
/// On any error nothing has been spawned, registered, or charged — commit is
/// atomic from the caller's point of view.
pub fn commit_road(
    draft: &RoadDraft,
    style: &RoadStyle,
    wallet: &mut Wallet,
    registry: &mut ObjectRegistry,
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
) -> Result<(Entity, u32), ActionError> {
    if !draft.can_finalize() {
        return Err(ActionError::InvalidRoad);
    }

    let samples = draft.commit_polyline();
    let arc_length = polyline_length(&samples);
    let cost = arc_length.round() as u32;
    wallet.spend(cost)?;

    let buffers = build_road_ribbon(&samples, style.width);
    let (center, half) = ribbon_pick_volume(&samples, style.width);
    let mesh = meshes.add(ribbon_mesh(buffers));

    let entity = commands
        .spawn((
            PlacedObject {
                kind: ObjectKind::Road,
                cost,
            },
            RoadRibbon { arc_length },
            PickBounds {
                offset: center,
                half,
            },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            Visibility::default(),
        ))
        .id();
    registry.insert(entity);
    Ok((entity, cost))
}

/// Stroke input: collect samples while the button is held, commit on release.
#[allow(clippy::too_many_arguments)]
pub fn handle_road_drawing(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorGround>,
    mode: Res<InteractionMode>,
    mut contexts: EguiContexts,
    mut draft: ResMut<RoadDraft>,
    style: Res<RoadStyle>,
    mut wallet: ResMut<Wallet>,
    mut registry: ResMut<ObjectRegistry>,
    mut status: ResMut<StatusMessage>,
    mut events_out: (EventWriter<InventoryChanged>, EventWriter<PlacementEvent>),
    surface: Res<RoadSurface>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    preview_q: Query<Entity, With<RoadPreview>>,
) {
    if *mode != InteractionMode::DrawingRoad {
        return;
    }

    // Start a new stroke.
    if buttons.just_pressed(MouseButton::Left) {
        if egui_wants_pointer(&mut contexts) || !cursor.valid {
            return;
        }
        draft.points.clear();
        draft.drawing = true;
        draft.add_sample(cursor.world_pos);
        return;
    }

    // Collect samples and refresh the preview.
    if buttons.pressed(MouseButton::Left) && draft.drawing {
        if cursor.valid && draft.add_sample(cursor.world_pos) && draft.points.len() >= 2 {
            despawn_road_preview(&mut commands, &preview_q);
            let mesh = meshes.add(preview_mesh(&draft.preview_polyline()));
            commands.spawn((
                RoadPreview,
                Mesh3d(mesh),
                MeshMaterial3d(surface.preview_material.clone()),
                Transform::IDENTITY,
                Visibility::default(),
            ));
        }
        return;
    }

    // Commit the stroke.
    if buttons.just_released(MouseButton::Left) && draft.drawing {
        if cursor.valid {
            draft.add_sample(cursor.world_pos);
        }
        despawn_road_preview(&mut commands, &preview_q);

        if !draft.can_finalize() {
            // Fewer than two points is a silent cancel.
            draft.reset();
            return;
        }

        match commit_road(
            &draft,
            &style,
            &mut wallet,
            &mut registry,
            &mut commands,
            &mut meshes,
            surface.material.clone(),
        ) {
            Ok((_, cost)) => {
                events_out.0.send(InventoryChanged);
                events_out.1.send(PlacementEvent::new(ObjectKind::Road));
                status.set(format!("Road built ({cost} crafties)"), false);
            }
            Err(err) => {
                status.set(err.notice(), true);
            }
        }
        draft.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::CommandQueue;

    fn draft_from(points: &[Vec2]) -> RoadDraft {
        let mut draft = RoadDraft::default();
        for &p in points {
            draft.add_sample(p);
        }
        draft
    }

    fn run_commit(
        draft: &RoadDraft,
        wallet: &mut Wallet,
        registry: &mut ObjectRegistry,
        world: &mut World,
        meshes: &mut Assets<Mesh>,
    ) -> Result<(Entity, u32), ActionError> {
        let mut queue = CommandQueue::default();
        let result = {
            let mut commands = Commands::new(&mut queue, world);
            commit_road(
                draft,
                &RoadStyle::default(),
                wallet,
                registry,
                &mut commands,
                meshes,
                Handle::default(),
            )
        };
        queue.apply(world);
        result
    }

    #[test]
    fn test_commit_charges_rounded_arc_length() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut wallet = Wallet { crafties: 100 };
        let mut registry = ObjectRegistry::default();

        let draft = draft_from(&[Vec2::ZERO, Vec2::new(12.0, 0.0)]);
        let (entity, cost) =
            run_commit(&draft, &mut wallet, &mut registry, &mut world, &mut meshes).unwrap();

        assert_eq!(cost, 12);
        assert_eq!(wallet.crafties, 88);
        assert!(registry.contains(entity));
        let placed = world.entity(entity).get::<PlacedObject>().unwrap();
        assert_eq!(placed.kind, ObjectKind::Road);
        assert_eq!(placed.cost, 12);
    }

    #[test]
    fn test_commit_rejected_when_balance_short() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut wallet = Wallet { crafties: 5 };
        let mut registry = ObjectRegistry::default();

        // Arc length 12 against a balance of 5: full rollback.
        let draft = draft_from(&[Vec2::ZERO, Vec2::new(12.0, 0.0)]);
        let err = run_commit(&draft, &mut wallet, &mut registry, &mut world, &mut meshes)
            .unwrap_err();

        assert_eq!(err, ActionError::InsufficientFunds);
        assert_eq!(wallet.crafties, 5);
        assert!(registry.is_empty());
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_commit_rejects_short_draft() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut wallet = Wallet { crafties: 100 };
        let mut registry = ObjectRegistry::default();

        let draft = draft_from(&[Vec2::ZERO]);
        let err = run_commit(&draft, &mut wallet, &mut registry, &mut world, &mut meshes)
            .unwrap_err();

        assert_eq!(err, ActionError::InvalidRoad);
        assert_eq!(wallet.crafties, 100);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_committed_road_records_arc_length() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut wallet = Wallet { crafties: 1000 };
        let mut registry = ObjectRegistry::default();

        let draft = draft_from(&[
            Vec2::ZERO,
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, 0.0),
        ]);
        let (entity, cost) =
            run_commit(&draft, &mut wallet, &mut registry, &mut world, &mut meshes).unwrap();

        let ribbon = world.entity(entity).get::<RoadRibbon>().unwrap();
        assert!(ribbon.arc_length > 20.0);
        assert_eq!(cost, ribbon.arc_length.round() as u32);
    }
}
